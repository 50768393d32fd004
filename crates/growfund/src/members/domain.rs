use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::score::BASE_SCORE;
use crate::calendar::{self, CalendarError};

/// Identifier wrapper for member accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberId(pub String);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Contribution cadence of a savings plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SavingsFrequency {
    Weekly,
    Monthly,
}

/// Inclusive bounds on the per-period contribution of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanLimits {
    pub min: f64,
    pub max: f64,
}

impl PlanLimits {
    pub fn contains(&self, amount: f64) -> bool {
        amount >= self.min && amount <= self.max
    }
}

impl SavingsFrequency {
    pub const fn label(self) -> &'static str {
        match self {
            SavingsFrequency::Weekly => "weekly",
            SavingsFrequency::Monthly => "monthly",
        }
    }

    pub const fn limits(self) -> PlanLimits {
        match self {
            SavingsFrequency::Weekly => PlanLimits {
                min: 5_000.0,
                max: 50_000.0,
            },
            SavingsFrequency::Monthly => PlanLimits {
                min: 20_000.0,
                max: 200_000.0,
            },
        }
    }

    /// Next contribution date counted from `from`.
    pub fn next_due(self, from: DateTime<Utc>) -> Result<DateTime<Utc>, CalendarError> {
        match self {
            SavingsFrequency::Weekly => calendar::add_days(from, 7),
            SavingsFrequency::Monthly => calendar::add_months(from, 1),
        }
    }
}

impl fmt::Display for SavingsFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown savings frequency '{0}' (expected weekly or monthly)")]
pub struct UnknownFrequency(pub String);

impl FromStr for SavingsFrequency {
    type Err = UnknownFrequency;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(UnknownFrequency(raw.to_string())),
        }
    }
}

/// Periodic savings commitment attached to a member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsPlan {
    pub frequency: SavingsFrequency,
    pub amount: f64,
    pub start_date: DateTime<Utc>,
    pub is_active: bool,
}

/// Contact details captured when an account is opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfile {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub business: Option<String>,
}

impl MemberProfile {
    /// Name shown on documents issued by the member: the business if set.
    pub fn trading_name(&self) -> &str {
        self.business
            .as_deref()
            .filter(|business| !business.trim().is_empty())
            .unwrap_or(&self.name)
    }
}

/// Savings state of a member as persisted by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub member_id: MemberId,
    pub profile: MemberProfile,
    pub joined_at: DateTime<Utc>,
    pub score: u16,
    pub savings_plan: Option<SavingsPlan>,
    pub total_saved: f64,
    pub savings_streak: u32,
    pub last_payment_date: Option<DateTime<Utc>>,
    pub next_payment_date: Option<DateTime<Utc>>,
}

impl Member {
    /// A freshly opened account: base score, nothing saved, no plan.
    pub fn open(member_id: MemberId, profile: MemberProfile, joined_at: DateTime<Utc>) -> Self {
        Self {
            member_id,
            profile,
            joined_at,
            score: BASE_SCORE,
            savings_plan: None,
            total_saved: 0.0,
            savings_streak: 0,
            last_payment_date: None,
            next_payment_date: None,
        }
    }

    /// Frequency of the member's plan, active or not.
    pub fn plan_frequency(&self) -> Option<SavingsFrequency> {
        self.savings_plan.as_ref().map(|plan| plan.frequency)
    }

    pub fn active_plan(&self) -> Option<&SavingsPlan> {
        self.savings_plan.as_ref().filter(|plan| plan.is_active)
    }
}
