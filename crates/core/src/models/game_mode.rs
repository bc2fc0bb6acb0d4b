use serde::{Deserialize, Serialize};

use super::price::PRICE_FLOOR;

/// Ticks in a Speed round (one tick per second).
pub const SPEED_ROUND_TICKS: u32 = 300;

/// Lives a Hardcore run starts with.
pub const HARDCORE_LIVES: u8 = 3;

/// Probability that a Chaos roll fires an event.
pub const CHAOS_EVENT_PROBABILITY: f64 = 0.2;

/// How many ticks the event banner stays up.
pub const EVENT_BANNER_TICKS: u8 = 3;

/// The selectable game modes. Each overlays its own timing, penalty, or
/// market-shock rules on top of the base ledger and price walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Normal,
    Speed,
    Hardcore,
    Chaos,
}

impl GameMode {
    /// Wire code used in leaderboard entries.
    pub fn code(&self) -> &'static str {
        match self {
            GameMode::Normal => "normal",
            GameMode::Speed => "speed",
            GameMode::Hardcore => "hardcore",
            GameMode::Chaos => "chaos",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "normal" => Some(GameMode::Normal),
            "speed" => Some(GameMode::Speed),
            "hardcore" => Some(GameMode::Hardcore),
            "chaos" => Some(GameMode::Chaos),
            _ => None,
        }
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// The fixed catalogue of Chaos market shocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChaosEvent {
    BullRun,
    MarketCrash,
    VolatilitySpike,
    WhaleDump,
    Pump,
    RugPull,
}

impl ChaosEvent {
    pub const ALL: [ChaosEvent; 6] = [
        ChaosEvent::BullRun,
        ChaosEvent::MarketCrash,
        ChaosEvent::VolatilitySpike,
        ChaosEvent::WhaleDump,
        ChaosEvent::Pump,
        ChaosEvent::RugPull,
    ];

    /// Banner text shown while the event is active.
    pub fn label(&self) -> &'static str {
        match self {
            ChaosEvent::BullRun => "🐂 Bull Run! +$50",
            ChaosEvent::MarketCrash => "📉 Market Crash! -$40",
            ChaosEvent::VolatilitySpike => "⚡ Volatility Spike!",
            ChaosEvent::WhaleDump => "🐋 Whale Dump! -$25",
            ChaosEvent::Pump => "🚀 Pump! +$35",
            ChaosEvent::RugPull => "💀 Rug Pull! -30%",
        }
    }

    /// Apply this event's price shock, bypassing the normal random walk.
    ///
    /// `magnitude` in [0, 1) is only consumed by VolatilitySpike, which
    /// maps it to a ±$30 swing. Every result is floored at the market floor.
    pub fn apply(&self, price: f64, magnitude: f64) -> f64 {
        let shocked = match self {
            ChaosEvent::BullRun => price + 50.0,
            ChaosEvent::MarketCrash => price - 40.0,
            ChaosEvent::VolatilitySpike => price + (magnitude - 0.5) * 60.0,
            ChaosEvent::WhaleDump => price - 25.0,
            ChaosEvent::Pump => price + 35.0,
            ChaosEvent::RugPull => price * 0.7,
        };
        shocked.max(PRICE_FLOOR)
    }
}

/// A chaos event currently showing its banner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveChaosEvent {
    pub event: ChaosEvent,
    /// Banner ticks left before the descriptor expires
    pub remaining_ticks: u8,
}

/// Mode selection plus the mode-local counters.
///
/// Switching modes resets these counters but never touches the portfolio.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeState {
    pub mode: GameMode,

    /// Speed countdown, reset to `SPEED_ROUND_TICKS` on entering Speed
    pub speed_remaining: u32,

    /// Hardcore lives, reset to `HARDCORE_LIVES` on entering Hardcore
    pub lives: u8,

    /// Transient descriptor of the chaos event currently on display
    pub active_event: Option<ActiveChaosEvent>,
}

impl Default for ModeState {
    fn default() -> Self {
        Self {
            mode: GameMode::Normal,
            speed_remaining: SPEED_ROUND_TICKS,
            lives: HARDCORE_LIVES,
            active_event: None,
        }
    }
}
