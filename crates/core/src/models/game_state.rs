use serde::{Deserialize, Serialize};

use super::trade::Trade;

/// Cash every new session starts with.
pub const STARTING_BALANCE: f64 = 1000.0;

/// The authoritative portfolio state for one play session.
///
/// Everything in here gets serialized to a JSON snapshot after every
/// mutation and reloaded verbatim at session start. Field names match
/// the browser snapshot format (`balance`, `holdings`, `history`).
///
/// Invariant: `balance >= 0` and `holdings >= 0` after every mutation.
/// The ledger enforces this by rejecting trades, never by clamping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Cash on hand
    pub balance: f64,

    /// Tokens held
    pub holdings: f64,

    /// Append-only trade log, insertion order = chronological order
    #[serde(default)]
    pub history: Vec<Trade>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            balance: STARTING_BALANCE,
            holdings: 0.0,
            history: Vec::new(),
        }
    }
}

impl GameState {
    /// Total portfolio value at the given market price.
    /// Always derived, never stored.
    pub fn total_value(&self, price: f64) -> f64 {
        self.balance + self.holdings * price
    }

    /// Profit or loss against the starting balance.
    pub fn profit_loss(&self, price: f64) -> f64 {
        self.total_value(price) - STARTING_BALANCE
    }
}
