use tracing::warn;

use crate::models::challenge::DailyChallenge;
use crate::models::game_state::GameState;
use crate::models::profile::PlayerProfile;
use crate::models::stats::PlayerStats;

use super::keys;
use super::traits::KeyValueStore;

/// Typed save/load on top of the raw key→string port.
///
/// Loads tolerate missing or malformed values by falling back to the
/// documented default: corrupt data is treated as "no saved state",
/// warn-logged, never an error. Implicit saves (the per-mutation
/// snapshot) are fire-and-forget; serialization problems are logged and
/// must never take the session down.
pub struct StorageManager;

impl StorageManager {
    // ── Game state snapshot ─────────────────────────────────────────

    pub fn load_game_state(store: &dyn KeyValueStore) -> GameState {
        Self::load_json(store, keys::GAME_STATE).unwrap_or_default()
    }

    pub fn save_game_state(store: &mut dyn KeyValueStore, state: &GameState) {
        Self::save_json(store, keys::GAME_STATE, state);
    }

    pub fn clear_game_state(store: &mut dyn KeyValueStore) {
        store.remove(keys::GAME_STATE);
        store.remove(keys::PLAYER_STATS);
    }

    // ── Achievements ────────────────────────────────────────────────

    pub fn load_unlocked(store: &dyn KeyValueStore) -> Vec<String> {
        Self::load_json(store, keys::UNLOCKED_ACHIEVEMENTS).unwrap_or_default()
    }

    pub fn save_unlocked(store: &mut dyn KeyValueStore, unlocked: &[String]) {
        Self::save_json(store, keys::UNLOCKED_ACHIEVEMENTS, &unlocked);
    }

    // ── Player counters ─────────────────────────────────────────────

    pub fn load_player_stats(store: &dyn KeyValueStore) -> PlayerStats {
        Self::load_json(store, keys::PLAYER_STATS).unwrap_or_default()
    }

    pub fn save_player_stats(store: &mut dyn KeyValueStore, stats: &PlayerStats) {
        Self::save_json(store, keys::PLAYER_STATS, stats);
    }

    // ── Daily challenge ─────────────────────────────────────────────

    pub fn load_challenge(store: &dyn KeyValueStore) -> Option<DailyChallenge> {
        Self::load_json(store, keys::DAILY_CHALLENGE)
    }

    pub fn save_challenge(store: &mut dyn KeyValueStore, challenge: &DailyChallenge) {
        Self::save_json(store, keys::DAILY_CHALLENGE, challenge);
    }

    // ── Profile ─────────────────────────────────────────────────────

    /// Nickname and avatar are stored as raw strings under their own
    /// keys, not JSON, matching how the browser app wrote them.
    pub fn load_profile(store: &dyn KeyValueStore) -> PlayerProfile {
        PlayerProfile {
            nickname: store.get(keys::PLAYER_NICKNAME).filter(|s| !s.is_empty()),
            avatar: store.get(keys::PLAYER_AVATAR).filter(|s| !s.is_empty()),
        }
    }

    pub fn save_profile(store: &mut dyn KeyValueStore, profile: &PlayerProfile) {
        match &profile.nickname {
            Some(nickname) => store.set(keys::PLAYER_NICKNAME, nickname),
            None => store.remove(keys::PLAYER_NICKNAME),
        }
        match &profile.avatar {
            Some(avatar) => store.set(keys::PLAYER_AVATAR, avatar),
            None => store.remove(keys::PLAYER_AVATAR),
        }
    }

    // ── Duplicate-submission guard ──────────────────────────────────

    /// Last profit value submitted to the leaderboard for this address.
    pub fn last_submitted_profit(store: &dyn KeyValueStore, address: &str) -> Option<f64> {
        let raw = store.get(&keys::last_submitted_profit_key(address))?;
        match raw.parse() {
            Ok(profit) => Some(profit),
            Err(_) => {
                warn!(key = %keys::last_submitted_profit_key(address), "malformed profit guard value, ignoring");
                None
            }
        }
    }

    pub fn record_submitted_profit(store: &mut dyn KeyValueStore, address: &str, profit: f64) {
        store.set(
            &keys::last_submitted_profit_key(address),
            &profit.to_string(),
        );
    }

    // ── Internal ────────────────────────────────────────────────────

    fn load_json<T: serde::de::DeserializeOwned>(
        store: &dyn KeyValueStore,
        key: &str,
    ) -> Option<T> {
        let raw = store.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "malformed saved value, falling back to default");
                None
            }
        }
    }

    fn save_json<T: serde::Serialize>(store: &mut dyn KeyValueStore, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => store.set(key, &json),
            Err(e) => warn!(key, error = %e, "failed to serialize value, skipping save"),
        }
    }
}
