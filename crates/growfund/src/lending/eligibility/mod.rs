mod catalog;

use crate::lending::domain::LoanOffer;
use crate::members::domain::{Member, SavingsFrequency};
use crate::members::score::BASE_SCORE;

use catalog::CATALOG;

/// Loan products unlocked by the member's savings behavior, Boost first.
///
/// The ceiling of each offer is `floor(total_saved × multiplier × score / 450)`.
/// An empty list is the normal answer for members without a long enough streak.
pub fn available_offers(
    savings_streak: u32,
    total_saved: f64,
    score: u16,
    plan_frequency: Option<SavingsFrequency>,
) -> Vec<LoanOffer> {
    let score_ratio = f64::from(score) / f64::from(BASE_SCORE);

    CATALOG
        .iter()
        .filter(|policy| savings_streak >= policy.unlock_streak)
        .map(|policy| {
            let multiplier = policy.multiplier(plan_frequency);
            LoanOffer {
                product: policy.product,
                label: policy.label.to_string(),
                description: policy.description.to_string(),
                multiplier,
                unlock_streak: policy.unlock_streak,
                max_amount: max_amount(total_saved, multiplier, score_ratio),
                fees: policy.fee_table(),
            }
        })
        .collect()
}

/// Offers for a member, priced with the given score.
pub fn offers_for_member(member: &Member, score: u16) -> Vec<LoanOffer> {
    available_offers(
        member.savings_streak,
        member.total_saved,
        score,
        member.plan_frequency(),
    )
}

fn max_amount(total_saved: f64, multiplier: f64, score_ratio: f64) -> f64 {
    let ceiling = (total_saved * multiplier * score_ratio).floor();
    if ceiling.is_finite() && ceiling > 0.0 {
        ceiling
    } else {
        0.0
    }
}
