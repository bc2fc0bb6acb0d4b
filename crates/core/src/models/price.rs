use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Price every session starts at (also the lot-matching reference price).
pub const SEED_PRICE: f64 = 100.0;

/// The market price never drops below this floor.
pub const PRICE_FLOOR: f64 = 50.0;

/// How many samples the sliding chart window retains.
pub const WINDOW_SIZE: usize = 60;

/// A single sample in a tick-indexed series (price or profit).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Monotonically increasing tick index
    pub tick: u64,

    /// Sampled value at that tick
    pub price: f64,
}

/// Sliding window over the most recent `WINDOW_SIZE` samples.
///
/// Used for both the raw price series and the profit-over-time series.
/// Restartable and never persisted: each session begins with an empty
/// window and an arbitrary seed.
#[derive(Debug, Clone, Default)]
pub struct PriceHistory {
    points: VecDeque<PricePoint>,
    next_tick: u64,
}

impl PriceHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample, evicting the oldest one beyond the window size.
    /// Returns the point that was stored.
    pub fn push(&mut self, price: f64) -> PricePoint {
        let point = PricePoint {
            tick: self.next_tick,
            price,
        };
        self.next_tick += 1;
        self.points.push_back(point);
        while self.points.len() > WINDOW_SIZE {
            self.points.pop_front();
        }
        point
    }

    /// Most recent sample, if any.
    pub fn latest(&self) -> Option<PricePoint> {
        self.points.back().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate samples oldest-first (chart rendering order).
    pub fn iter(&self) -> impl Iterator<Item = &PricePoint> {
        self.points.iter()
    }

    /// Drop all samples and restart the tick counter.
    pub fn clear(&mut self) {
        self.points.clear();
        self.next_tick = 0;
    }
}
