pub mod domain;
pub mod score;

pub use domain::{Member, MemberId, MemberProfile, PlanLimits, SavingsFrequency, SavingsPlan};
pub use score::{compute_score, ScoreBreakdown, BASE_SCORE, MAX_SCORE};
