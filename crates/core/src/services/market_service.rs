use crate::errors::CoreError;
use crate::models::game_mode::ChaosEvent;
use crate::models::price::{PriceHistory, PRICE_FLOOR, SEED_PRICE};

use super::rng::random_unit;

/// The synthetic market: a bounded random walk that is the sole source
/// of price truth, plus the sliding chart windows (price and profit).
///
/// On each tick the price moves by a uniform delta in [-5, +5] and is
/// floored at $50. Nothing here is persisted; every session restarts at
/// the $100 seed.
pub struct MarketService {
    price: f64,
    price_history: PriceHistory,
    profit_history: PriceHistory,
}

impl MarketService {
    pub fn new() -> Self {
        let mut price_history = PriceHistory::new();
        price_history.push(SEED_PRICE);
        Self {
            price: SEED_PRICE,
            price_history,
            profit_history: PriceHistory::new(),
        }
    }

    /// The current market price.
    pub fn current_price(&self) -> f64 {
        self.price
    }

    /// Advance the walk by one tick with a pre-drawn sample in [0, 1).
    /// Returns the new price.
    pub fn apply_tick(&mut self, sample: f64) -> f64 {
        let delta = (sample - 0.5) * 10.0;
        self.price = (self.price + delta).max(PRICE_FLOOR);
        self.price_history.push(self.price);
        self.price
    }

    /// Advance the walk by one tick drawing from the platform RNG.
    pub fn tick(&mut self) -> Result<f64, CoreError> {
        let sample = random_unit()?;
        Ok(self.apply_tick(sample))
    }

    /// Apply a chaos event's price shock immediately, bypassing the
    /// normal walk for this update. `magnitude` feeds VolatilitySpike.
    pub fn apply_event(&mut self, event: ChaosEvent, magnitude: f64) -> f64 {
        self.price = event.apply(self.price, magnitude);
        self.price_history.push(self.price);
        self.price
    }

    /// Record a profit sample into the profit-over-time window.
    pub fn record_profit(&mut self, profit: f64) {
        self.profit_history.push(profit);
    }

    pub fn price_history(&self) -> &PriceHistory {
        &self.price_history
    }

    pub fn profit_history(&self) -> &PriceHistory {
        &self.profit_history
    }

    /// Clear both windows and restart at the seed price.
    pub fn reset(&mut self) {
        self.price = SEED_PRICE;
        self.price_history.clear();
        self.price_history.push(SEED_PRICE);
        self.profit_history.clear();
    }
}

impl Default for MarketService {
    fn default() -> Self {
        Self::new()
    }
}
