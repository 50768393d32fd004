use serde::{Deserialize, Serialize};

pub const BASE_SCORE: u16 = 450;
pub const MAX_SCORE: u16 = 850;

const POINTS_PER_STREAK: u64 = 5;
const SAVINGS_STEP: f64 = 10_000.0;
const POINTS_PER_SAVINGS_STEP: u64 = 2;
const POINTS_PER_COMPLETED_LOAN: u64 = 25;

/// Itemised score so dashboards can explain where the number came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base: u16,
    pub streak_points: u64,
    pub savings_points: u64,
    pub loan_points: u64,
    pub total: u16,
}

impl ScoreBreakdown {
    pub fn compute(savings_streak: u32, total_saved: f64, completed_loans: u32) -> Self {
        let savings_steps = if total_saved.is_finite() && total_saved > 0.0 {
            (total_saved / SAVINGS_STEP).floor() as u64
        } else {
            0
        };

        let streak_points = u64::from(savings_streak) * POINTS_PER_STREAK;
        let savings_points = savings_steps.saturating_mul(POINTS_PER_SAVINGS_STEP);
        let loan_points = u64::from(completed_loans) * POINTS_PER_COMPLETED_LOAN;

        let raw = u64::from(BASE_SCORE)
            .saturating_add(streak_points)
            .saturating_add(savings_points)
            .saturating_add(loan_points);

        Self {
            base: BASE_SCORE,
            streak_points,
            savings_points,
            loan_points,
            total: raw.min(u64::from(MAX_SCORE)) as u16,
        }
    }

    pub fn is_capped(&self) -> bool {
        self.total == MAX_SCORE
    }
}

/// Behavioral score in `[0, 850]`: 450 base, 5 per streak unit, 2 per whole
/// ₦10,000 saved, 25 per completed loan.
pub fn compute_score(savings_streak: u32, total_saved: f64, completed_loans: u32) -> u16 {
    ScoreBreakdown::compute(savings_streak, total_saved, completed_loans).total
}
