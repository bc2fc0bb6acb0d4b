use chrono::NaiveDate;

use crate::models::challenge::{DailyChallenge, CHALLENGE_TIERS};

/// Issues and settles the once-per-calendar-day profit challenge.
pub struct ChallengeService;

impl ChallengeService {
    pub fn new() -> Self {
        Self
    }

    /// Draw today's challenge if none exists for `today` yet.
    ///
    /// `sample` in [0, 1) picks the tier uniformly. Returns the fresh
    /// challenge (replacing any prior day's), or None when today's is
    /// already in place.
    pub fn ensure_today(
        &self,
        existing: Option<&DailyChallenge>,
        today: NaiveDate,
        sample: f64,
    ) -> Option<DailyChallenge> {
        if existing.is_some_and(|c| c.date == today) {
            return None;
        }

        let idx = ((sample * CHALLENGE_TIERS.len() as f64) as usize).min(CHALLENGE_TIERS.len() - 1);
        Some(DailyChallenge::for_date(today, CHALLENGE_TIERS[idx]))
    }

    /// Settle the challenge against the current profit.
    ///
    /// Marks it completed and returns the reward exactly once when the
    /// profit reaches the target; every later call is a no-op.
    pub fn check(&self, challenge: &mut DailyChallenge, profit_loss: f64) -> Option<f64> {
        if challenge.completed || profit_loss < challenge.target {
            return None;
        }
        challenge.completed = true;
        Some(challenge.reward)
    }
}

impl Default for ChallengeService {
    fn default() -> Self {
        Self::new()
    }
}
