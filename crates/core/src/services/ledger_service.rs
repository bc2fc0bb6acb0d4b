use crate::errors::CoreError;
use crate::models::game_state::GameState;
use crate::models::price::SEED_PRICE;
use crate::models::trade::{Trade, TradeKind};

/// Applies buy/sell mutations to the game state under solvency
/// constraints and owns the realized-profit lot-matching rule.
///
/// Pure business logic: no I/O, no clocks, no randomness. A rejected
/// trade never mutates balance, holdings, or the trade log.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Buy `amount` tokens at `price`.
    ///
    /// Rejects non-positive amounts and orders costing more than the
    /// available cash. On success appends a Buy trade with zero
    /// realized profit.
    pub fn buy(
        &self,
        state: &mut GameState,
        amount: f64,
        price: f64,
        timestamp: i64,
    ) -> Result<Trade, CoreError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CoreError::InvalidAmount(amount));
        }

        let cost = amount * price;
        if cost > state.balance {
            return Err(CoreError::InsufficientFunds {
                needed: cost,
                available: state.balance,
            });
        }

        state.balance -= cost;
        state.holdings += amount;

        let trade = Trade::buy(amount, price, timestamp);
        state.history.push(trade.clone());
        Ok(trade)
    }

    /// Sell `amount` tokens at `price`.
    ///
    /// Rejects non-positive amounts and sells exceeding current
    /// holdings. On success appends a Sell trade carrying its
    /// lot-matched realized profit.
    pub fn sell(
        &self,
        state: &mut GameState,
        amount: f64,
        price: f64,
        timestamp: i64,
    ) -> Result<Trade, CoreError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CoreError::InvalidAmount(amount));
        }

        if amount > state.holdings {
            return Err(CoreError::InsufficientHoldings {
                requested: amount,
                held: state.holdings,
            });
        }

        // Match against the log as it stands before this sell.
        let realized = Self::lot_matched_profit(&state.history, price, amount);

        state.balance += amount * price;
        state.holdings -= amount;

        let trade = Trade::sell(amount, price, timestamp, realized);
        state.history.push(trade.clone());
        Ok(trade)
    }

    /// The better-buy lookback rule for realized profit.
    ///
    /// Scans `trades` newest-first for the most recent Buy priced
    /// strictly below the sell price and pairs the whole sell quantity
    /// against it. Falls back to the $100 seed price when no such buy
    /// exists, so the result can be negative.
    ///
    /// Deliberately NOT FIFO/LIFO lot accounting: the rule hunts for a
    /// profitable pairing rather than the chronologically matched one.
    /// Existing leaderboard scores were produced under this rule, so it
    /// must not be "corrected".
    pub fn lot_matched_profit(trades: &[Trade], sell_price: f64, amount: f64) -> f64 {
        let reference = trades
            .iter()
            .rev()
            .find(|t| t.kind == TradeKind::Buy && t.price < sell_price)
            .map(|t| t.price)
            .unwrap_or(SEED_PRICE);

        (sell_price - reference) * amount
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}
