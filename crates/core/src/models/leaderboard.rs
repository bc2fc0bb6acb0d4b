use serde::{Deserialize, Serialize};

use super::game_mode::GameMode;
use super::trade::TradeKind;

/// One leaderboard document in the remote `scores` collection.
///
/// Field names match the original collection schema (camelCase). A score
/// is a snapshot taken at submission time: later trades in the session
/// never retroactively change a submitted entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub player_name: String,
    pub player_address: String,
    pub profit: f64,
    pub trades: usize,
    pub final_balance: f64,
    pub final_holdings: f64,
    pub final_price: f64,

    /// Submission time, Unix milliseconds
    pub timestamp: i64,
    pub game_mode: GameMode,

    /// Optional avatar data URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// One document in the remote `blockchain_trades` collection: a trade
/// paired with the decorative on-chain signature that "verified" it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedTrade {
    pub player_address: String,
    pub signature: String,

    #[serde(rename = "type")]
    pub kind: TradeKind,
    pub amount: f64,
    pub price: f64,
    pub profit: f64,

    /// Trade time, Unix milliseconds
    pub timestamp: i64,

    /// Chain the signature landed on (e.g. "devnet")
    pub chain_id: String,
}
