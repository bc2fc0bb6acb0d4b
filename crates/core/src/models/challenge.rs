use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A target/reward pair a daily challenge can be drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChallengeTier {
    pub target: f64,
    pub reward: f64,
}

/// The fixed tier set: one is drawn uniformly each calendar day.
pub const CHALLENGE_TIERS: [ChallengeTier; 3] = [
    ChallengeTier {
        target: 200.0,
        reward: 50.0,
    },
    ChallengeTier {
        target: 500.0,
        reward: 100.0,
    },
    ChallengeTier {
        target: 1000.0,
        reward: 250.0,
    },
];

/// The once-per-calendar-day profit challenge.
///
/// `completed` transitions false → true exactly once when profit crosses
/// the target, and never reverts for that date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyChallenge {
    pub target: f64,
    pub reward: f64,
    pub completed: bool,
    pub date: NaiveDate,
}

impl DailyChallenge {
    pub fn for_date(date: NaiveDate, tier: ChallengeTier) -> Self {
        Self {
            target: tier.target,
            reward: tier.reward,
            completed: false,
            date,
        }
    }
}
