use serde::{Deserialize, Serialize};

/// Derived statistics, recomputed on demand from the game state and the
/// current market price. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeStats {
    /// balance + holdings × price
    pub total_value: f64,

    /// total_value − starting balance
    pub profit_loss: f64,

    /// Number of buy trades in the log
    pub buy_count: usize,

    /// Number of sell trades in the log
    pub sell_count: usize,

    /// Total trades (buys + sells)
    pub total_trades: usize,

    /// Largest realized profit over all sells, 0 if none is positive
    pub best_trade: f64,

    /// Percentage of sells whose lot-matched profit is positive,
    /// rounded to a whole number. 0 with no trades at all.
    pub win_rate: u32,
}

/// Running counters kept across trades and fed to the achievement
/// evaluator. Persisted under the `playerStats` key; field names match
/// the browser snapshot format.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerStats {
    /// Consecutive profitable sells (reset by a losing or flat sell)
    pub win_streak: u32,

    /// Largest single trade by cash value (amount × price)
    pub biggest_trade: f64,

    /// Most tokens ever held at once
    pub max_holdings: f64,

    /// Most negative realized profit over all sells (0 until a loss occurs)
    pub biggest_loss: f64,
}
