//! Storage key constants.
//!
//! These are the exact localStorage keys the browser app has always
//! used, so existing saved sessions keep loading.

/// JSON `GameState` snapshot (`balance`, `holdings`, `history`).
pub const GAME_STATE: &str = "gameState";

/// JSON array of unlocked achievement ids.
pub const UNLOCKED_ACHIEVEMENTS: &str = "unlockedAchievements";

/// JSON `PlayerStats` counters.
pub const PLAYER_STATS: &str = "playerStats";

/// JSON `DailyChallenge` for the current calendar day.
pub const DAILY_CHALLENGE: &str = "dailyChallenge";

/// Raw nickname string.
pub const PLAYER_NICKNAME: &str = "playerNickname";

/// Raw avatar data URL.
pub const PLAYER_AVATAR: &str = "playerAvatar";

/// Per-address duplicate-submission guard prefix.
const LAST_SUBMITTED_PROFIT_PREFIX: &str = "lastSubmittedProfit";

/// Key holding the last profit value submitted to the leaderboard for
/// the given wallet address.
pub fn last_submitted_profit_key(address: &str) -> String {
    format!("{LAST_SUBMITTED_PROFIT_PREFIX}:{address}")
}
