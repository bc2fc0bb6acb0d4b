use serde::{Deserialize, Serialize};

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeKind {
    /// Spending cash to acquire tokens
    #[serde(rename = "BUY")]
    Buy,
    /// Selling tokens back into cash
    #[serde(rename = "SELL")]
    Sell,
}

impl std::fmt::Display for TradeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeKind::Buy => write!(f, "BUY"),
            TradeKind::Sell => write!(f, "SELL"),
        }
    }
}

/// A single executed trade in the session log.
///
/// Trades are append-only: once pushed onto the history they are never
/// mutated or removed for the lifetime of the session. Serde field names
/// match the browser snapshot format (`type`, `profit`) so saved sessions
/// from older builds load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Buy or Sell
    #[serde(rename = "type")]
    pub kind: TradeKind,

    /// Number of tokens traded (always positive)
    pub amount: f64,

    /// Market price at execution
    pub price: f64,

    /// Execution time, Unix milliseconds
    pub timestamp: i64,

    /// Realized profit: 0 for buys, lot-matched result for sells
    #[serde(rename = "profit", default)]
    pub realized_profit: f64,
}

impl Trade {
    pub fn buy(amount: f64, price: f64, timestamp: i64) -> Self {
        Self {
            kind: TradeKind::Buy,
            amount,
            price,
            timestamp,
            realized_profit: 0.0,
        }
    }

    pub fn sell(amount: f64, price: f64, timestamp: i64, realized_profit: f64) -> Self {
        Self {
            kind: TradeKind::Sell,
            amount,
            price,
            timestamp,
            realized_profit,
        }
    }

    /// Cash value of this trade at execution (amount × price).
    pub fn notional(&self) -> f64 {
        self.amount * self.price
    }
}
