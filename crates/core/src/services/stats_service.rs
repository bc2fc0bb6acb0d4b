use crate::models::achievement::AchievementStats;
use crate::models::game_state::GameState;
use crate::models::stats::{PlayerStats, TradeStats};
use crate::models::trade::{Trade, TradeKind};

use super::ledger_service::LedgerService;

/// Derives statistics from the game state. Everything in `compute` is
/// recomputed from scratch on demand; the only carried state is the
/// `PlayerStats` counters this service updates after each trade.
pub struct StatsService;

impl StatsService {
    pub fn new() -> Self {
        Self
    }

    /// Recompute the full stats snapshot at the given market price.
    pub fn compute(&self, state: &GameState, price: f64) -> TradeStats {
        let buy_count = state
            .history
            .iter()
            .filter(|t| t.kind == TradeKind::Buy)
            .count();
        let sell_count = state.history.len() - buy_count;

        // Best trade: largest stored realized profit, floored at zero.
        let best_trade = state
            .history
            .iter()
            .filter(|t| t.kind == TradeKind::Sell)
            .map(|t| t.realized_profit)
            .fold(0.0_f64, f64::max);

        TradeStats {
            total_value: state.total_value(price),
            profit_loss: state.profit_loss(price),
            buy_count,
            sell_count,
            total_trades: state.history.len(),
            best_trade,
            win_rate: self.win_rate(state),
        }
    }

    /// Win rate: percentage of sells whose lot-matched profit is
    /// positive, rounded. Each sell's profit is recomputed against the
    /// log prefix that preceded it, not read from the stored trade.
    /// Zero when there are no trades at all.
    fn win_rate(&self, state: &GameState) -> u32 {
        if state.history.is_empty() {
            return 0;
        }

        let mut sell_count = 0usize;
        let mut profitable = 0usize;
        for (idx, trade) in state.history.iter().enumerate() {
            if trade.kind != TradeKind::Sell {
                continue;
            }
            sell_count += 1;
            let realized =
                LedgerService::lot_matched_profit(&state.history[..idx], trade.price, trade.amount);
            if realized > 0.0 {
                profitable += 1;
            }
        }

        (100.0 * profitable as f64 / sell_count.max(1) as f64).round() as u32
    }

    /// Fold a freshly executed trade into the running player counters.
    pub fn absorb_trade(&self, counters: &mut PlayerStats, trade: &Trade, holdings_after: f64) {
        if trade.kind == TradeKind::Sell {
            if trade.realized_profit > 0.0 {
                counters.win_streak += 1;
            } else {
                counters.win_streak = 0;
            }
            counters.biggest_loss = counters.biggest_loss.min(trade.realized_profit);
        }

        counters.biggest_trade = counters.biggest_trade.max(trade.notional());
        counters.max_holdings = counters.max_holdings.max(holdings_after);
    }

    /// Assemble the snapshot the achievement evaluator consumes.
    pub fn achievement_snapshot(
        &self,
        state: &GameState,
        price: f64,
        counters: &PlayerStats,
    ) -> AchievementStats {
        AchievementStats {
            total_trades: state.history.len(),
            profit: state.profit_loss(price),
            win_streak: counters.win_streak,
            biggest_trade: counters.biggest_trade,
            max_holdings: counters.max_holdings,
            biggest_loss: counters.biggest_loss,
        }
    }
}

impl Default for StatsService {
    fn default() -> Self {
        Self::new()
    }
}
