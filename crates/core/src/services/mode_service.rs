use crate::models::game_mode::{
    ActiveChaosEvent, ChaosEvent, GameMode, ModeState, CHAOS_EVENT_PROBABILITY, EVENT_BANNER_TICKS,
    HARDCORE_LIVES, SPEED_ROUND_TICKS,
};

/// What a sell did to the Hardcore life counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardcoreOutcome {
    /// Not in Hardcore, or the sell was not a loss
    Unaffected,
    /// A life was lost; the run continues
    LifeLost { remaining: u8 },
    /// The last life was lost; the caller must perform a full game reset
    GameOver,
}

/// The mode state machine: Normal, Speed, Hardcore, Chaos.
///
/// Transitions are user-initiated and always allowed. Mode-local
/// counters reset on entry; the portfolio is never touched by a switch.
pub struct ModeService;

impl ModeService {
    pub fn new() -> Self {
        Self
    }

    /// Select a mode. Entering Speed restarts its countdown, entering
    /// Hardcore restores its lives, and any lingering event banner is
    /// dismissed.
    pub fn switch(&self, mode_state: &mut ModeState, new_mode: GameMode) {
        mode_state.mode = new_mode;
        mode_state.active_event = None;
        match new_mode {
            GameMode::Speed => mode_state.speed_remaining = SPEED_ROUND_TICKS,
            GameMode::Hardcore => mode_state.lives = HARDCORE_LIVES,
            _ => {}
        }
    }

    /// One second of Speed countdown.
    ///
    /// Returns `Some(bonus)` when the round just ended: the bonus is
    /// `floor(profit × 0.5)` for a positive profit, otherwise 0. Ending
    /// the round forces the mode back to Normal and re-arms the
    /// countdown for next use.
    pub fn speed_tick(&self, mode_state: &mut ModeState, profit_loss: f64) -> Option<f64> {
        if mode_state.mode != GameMode::Speed {
            return None;
        }

        mode_state.speed_remaining = mode_state.speed_remaining.saturating_sub(1);
        if mode_state.speed_remaining > 0 {
            return None;
        }

        let bonus = if profit_loss > 0.0 {
            (profit_loss * 0.5).floor()
        } else {
            0.0
        };

        mode_state.mode = GameMode::Normal;
        mode_state.speed_remaining = SPEED_ROUND_TICKS;
        Some(bonus)
    }

    /// Account a completed sell against the Hardcore lives.
    ///
    /// Only losing sells (realized < 0) cost a life. The sell itself is
    /// already applied by the time this runs; on `GameOver` the caller
    /// performs the full reset (which also restores the lives) and
    /// forces the mode back to Normal.
    pub fn register_sell(&self, mode_state: &mut ModeState, realized_profit: f64) -> HardcoreOutcome {
        if mode_state.mode != GameMode::Hardcore || realized_profit >= 0.0 {
            return HardcoreOutcome::Unaffected;
        }

        mode_state.lives = mode_state.lives.saturating_sub(1);
        if mode_state.lives == 0 {
            HardcoreOutcome::GameOver
        } else {
            HardcoreOutcome::LifeLost {
                remaining: mode_state.lives,
            }
        }
    }

    /// One 5-second Chaos roll with pre-drawn samples in [0, 1).
    ///
    /// With probability 0.2 (`roll < 0.2`) picks one event uniformly
    /// (`pick` scaled over the catalogue), arms its banner, and returns
    /// it so the caller can shock the price. Returns None outside Chaos
    /// or when the roll misses.
    pub fn chaos_roll(
        &self,
        mode_state: &mut ModeState,
        roll: f64,
        pick: f64,
    ) -> Option<ChaosEvent> {
        if mode_state.mode != GameMode::Chaos {
            return None;
        }
        if roll >= CHAOS_EVENT_PROBABILITY {
            return None;
        }

        let idx = ((pick * ChaosEvent::ALL.len() as f64) as usize).min(ChaosEvent::ALL.len() - 1);
        let event = ChaosEvent::ALL[idx];
        mode_state.active_event = Some(ActiveChaosEvent {
            event,
            remaining_ticks: EVENT_BANNER_TICKS,
        });
        Some(event)
    }

    /// One second of banner countdown; expires the descriptor at zero.
    pub fn banner_tick(&self, mode_state: &mut ModeState) {
        if let Some(active) = mode_state.active_event.as_mut() {
            active.remaining_ticks = active.remaining_ticks.saturating_sub(1);
            if active.remaining_ticks == 0 {
                mode_state.active_event = None;
            }
        }
    }
}

impl Default for ModeService {
    fn default() -> Self {
        Self::new()
    }
}
