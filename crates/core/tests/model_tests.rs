// ═══════════════════════════════════════════════════════════════════
// Model Tests — Trade, GameState, PriceHistory, GameMode, Challenge,
// Achievement catalogue, ScoreEntry, PlayerProfile
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;

use hftg_core::models::achievement::{AchievementStats, ACHIEVEMENTS};
use hftg_core::models::challenge::{DailyChallenge, CHALLENGE_TIERS};
use hftg_core::models::game_mode::{
    ChaosEvent, GameMode, ModeState, HARDCORE_LIVES, SPEED_ROUND_TICKS,
};
use hftg_core::models::game_state::{GameState, STARTING_BALANCE};
use hftg_core::models::leaderboard::ScoreEntry;
use hftg_core::models::price::{PriceHistory, PRICE_FLOOR, SEED_PRICE, WINDOW_SIZE};
use hftg_core::models::profile::PlayerProfile;
use hftg_core::models::stats::PlayerStats;
use hftg_core::models::trade::{Trade, TradeKind};

fn snapshot(
    total_trades: usize,
    profit: f64,
    win_streak: u32,
    biggest_trade: f64,
    max_holdings: f64,
    biggest_loss: f64,
) -> AchievementStats {
    AchievementStats {
        total_trades,
        profit,
        win_streak,
        biggest_trade,
        max_holdings,
        biggest_loss,
    }
}

// ═══════════════════════════════════════════════════════════════════
// Trade
// ═══════════════════════════════════════════════════════════════════

mod trade {
    use super::*;

    #[test]
    fn buy_constructor_has_zero_profit() {
        let trade = Trade::buy(10.0, 100.0, 1_700_000_000_000);
        assert_eq!(trade.kind, TradeKind::Buy);
        assert_eq!(trade.amount, 10.0);
        assert_eq!(trade.price, 100.0);
        assert_eq!(trade.realized_profit, 0.0);
    }

    #[test]
    fn sell_constructor_carries_profit() {
        let trade = Trade::sell(4.0, 120.0, 0, 80.0);
        assert_eq!(trade.kind, TradeKind::Sell);
        assert_eq!(trade.realized_profit, 80.0);
    }

    #[test]
    fn notional_is_amount_times_price() {
        let trade = Trade::buy(2.5, 80.0, 0);
        assert_eq!(trade.notional(), 200.0);
    }

    #[test]
    fn kind_display_matches_history_rows() {
        assert_eq!(TradeKind::Buy.to_string(), "BUY");
        assert_eq!(TradeKind::Sell.to_string(), "SELL");
    }

    #[test]
    fn serde_uses_browser_field_names() {
        let trade = Trade::sell(3.0, 105.0, 42, 45.0);
        let json = serde_json::to_string(&trade).unwrap();
        assert!(json.contains("\"type\":\"SELL\""));
        assert!(json.contains("\"profit\":45.0"));

        let back: Trade = serde_json::from_str(&json).unwrap();
        assert_eq!(back, trade);
    }

    #[test]
    fn deserializes_legacy_rows_without_profit() {
        // Early snapshots stored only type/amount/price/timestamp.
        let json = r#"{"type":"BUY","amount":1.0,"price":99.0,"timestamp":7}"#;
        let trade: Trade = serde_json::from_str(json).unwrap();
        assert_eq!(trade.realized_profit, 0.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
// GameState
// ═══════════════════════════════════════════════════════════════════

mod game_state {
    use super::*;

    #[test]
    fn default_is_a_fresh_session() {
        let state = GameState::default();
        assert_eq!(state.balance, STARTING_BALANCE);
        assert_eq!(state.holdings, 0.0);
        assert!(state.history.is_empty());
    }

    #[test]
    fn total_value_is_cash_plus_holdings() {
        let state = GameState {
            balance: 400.0,
            holdings: 5.0,
            history: Vec::new(),
        };
        assert_eq!(state.total_value(120.0), 1000.0);
        assert_eq!(state.profit_loss(120.0), 0.0);
    }

    #[test]
    fn fresh_state_has_zero_profit() {
        let state = GameState::default();
        assert_eq!(state.profit_loss(SEED_PRICE), 0.0);
    }

    #[test]
    fn deserializes_snapshot_without_history() {
        let json = r#"{"balance":900.0,"holdings":1.0}"#;
        let state: GameState = serde_json::from_str(json).unwrap();
        assert_eq!(state.balance, 900.0);
        assert!(state.history.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
// PriceHistory
// ═══════════════════════════════════════════════════════════════════

mod price_history {
    use super::*;

    #[test]
    fn push_assigns_increasing_ticks() {
        let mut history = PriceHistory::new();
        let a = history.push(100.0);
        let b = history.push(101.0);
        assert_eq!(a.tick, 0);
        assert_eq!(b.tick, 1);
        assert_eq!(history.latest().unwrap().price, 101.0);
    }

    #[test]
    fn window_evicts_oldest_beyond_capacity() {
        let mut history = PriceHistory::new();
        for i in 0..(WINDOW_SIZE + 10) {
            history.push(i as f64);
        }
        assert_eq!(history.len(), WINDOW_SIZE);
        // The first ten samples fell off the front.
        assert_eq!(history.iter().next().unwrap().tick, 10);
        assert_eq!(history.latest().unwrap().tick, (WINDOW_SIZE + 10 - 1) as u64);
    }

    #[test]
    fn clear_restarts_the_tick_counter() {
        let mut history = PriceHistory::new();
        history.push(1.0);
        history.push(2.0);
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.push(3.0).tick, 0);
    }

    #[test]
    fn constants_match_the_market_contract() {
        assert_eq!(SEED_PRICE, 100.0);
        assert_eq!(PRICE_FLOOR, 50.0);
        assert_eq!(WINDOW_SIZE, 60);
    }
}

// ═══════════════════════════════════════════════════════════════════
// GameMode & ChaosEvent
// ═══════════════════════════════════════════════════════════════════

mod game_mode {
    use super::*;

    #[test]
    fn default_mode_state() {
        let mode_state = ModeState::default();
        assert_eq!(mode_state.mode, GameMode::Normal);
        assert_eq!(mode_state.speed_remaining, SPEED_ROUND_TICKS);
        assert_eq!(mode_state.lives, HARDCORE_LIVES);
        assert!(mode_state.active_event.is_none());
    }

    #[test]
    fn mode_codes_round_trip() {
        for mode in [
            GameMode::Normal,
            GameMode::Speed,
            GameMode::Hardcore,
            GameMode::Chaos,
        ] {
            assert_eq!(GameMode::from_code(mode.code()), Some(mode));
        }
        assert_eq!(GameMode::from_code("turbo"), None);
    }

    #[test]
    fn additive_events_shift_the_price() {
        assert_eq!(ChaosEvent::BullRun.apply(100.0, 0.0), 150.0);
        assert_eq!(ChaosEvent::Pump.apply(100.0, 0.0), 135.0);
        assert_eq!(ChaosEvent::WhaleDump.apply(100.0, 0.0), 75.0);
        assert_eq!(ChaosEvent::MarketCrash.apply(100.0, 0.0), 60.0);
    }

    #[test]
    fn negative_events_are_floored() {
        assert_eq!(ChaosEvent::MarketCrash.apply(55.0, 0.0), 50.0);
        assert_eq!(ChaosEvent::WhaleDump.apply(51.0, 0.0), 50.0);
    }

    #[test]
    fn rug_pull_is_multiplicative_and_floored() {
        assert_eq!(ChaosEvent::RugPull.apply(200.0, 0.0), 140.0);
        assert_eq!(ChaosEvent::RugPull.apply(60.0, 0.0), 50.0);
    }

    #[test]
    fn volatility_spike_swings_at_most_thirty() {
        // magnitude 0 → -30, magnitude just under 1 → just under +30
        assert_eq!(ChaosEvent::VolatilitySpike.apply(100.0, 0.0), 70.0);
        assert_eq!(ChaosEvent::VolatilitySpike.apply(100.0, 0.5), 100.0);
        let high = ChaosEvent::VolatilitySpike.apply(100.0, 0.999);
        assert!(high > 129.0 && high < 130.0);
    }

    #[test]
    fn every_event_has_a_label() {
        for event in ChaosEvent::ALL {
            assert!(!event.label().is_empty());
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// DailyChallenge
// ═══════════════════════════════════════════════════════════════════

mod challenge {
    use super::*;

    #[test]
    fn tier_table_matches_the_game_rules() {
        assert_eq!(CHALLENGE_TIERS.len(), 3);
        assert_eq!(CHALLENGE_TIERS[0].target, 200.0);
        assert_eq!(CHALLENGE_TIERS[0].reward, 50.0);
        assert_eq!(CHALLENGE_TIERS[1].target, 500.0);
        assert_eq!(CHALLENGE_TIERS[1].reward, 100.0);
        assert_eq!(CHALLENGE_TIERS[2].target, 1000.0);
        assert_eq!(CHALLENGE_TIERS[2].reward, 250.0);
    }

    #[test]
    fn for_date_starts_incomplete() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let challenge = DailyChallenge::for_date(date, CHALLENGE_TIERS[1]);
        assert!(!challenge.completed);
        assert_eq!(challenge.date, date);
        assert_eq!(challenge.target, 500.0);
    }

    #[test]
    fn serde_round_trip() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let challenge = DailyChallenge::for_date(date, CHALLENGE_TIERS[0]);
        let json = serde_json::to_string(&challenge).unwrap();
        let back: DailyChallenge = serde_json::from_str(&json).unwrap();
        assert_eq!(back, challenge);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Achievement catalogue
// ═══════════════════════════════════════════════════════════════════

mod achievements {
    use super::*;

    #[test]
    fn catalogue_has_ten_unique_ids() {
        assert_eq!(ACHIEVEMENTS.len(), 10);
        let mut ids: Vec<&str> = ACHIEVEMENTS.iter().map(|a| a.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn first_blood_needs_one_trade() {
        let first_blood = ACHIEVEMENTS.iter().find(|a| a.id == "first_blood").unwrap();
        assert!(!(first_blood.condition)(&snapshot(0, 0.0, 0, 0.0, 0.0, 0.0)));
        assert!((first_blood.condition)(&snapshot(1, 0.0, 0, 0.0, 0.0, 0.0)));
    }

    #[test]
    fn profitable_needs_strictly_positive_profit() {
        let profitable = ACHIEVEMENTS.iter().find(|a| a.id == "profitable").unwrap();
        assert!(!(profitable.condition)(&snapshot(5, 0.0, 0, 0.0, 0.0, 0.0)));
        assert!((profitable.condition)(&snapshot(5, 0.01, 0, 0.0, 0.0, 0.0)));
    }

    #[test]
    fn risk_taker_needs_a_deep_loss() {
        let risk_taker = ACHIEVEMENTS.iter().find(|a| a.id == "risk_taker").unwrap();
        assert!(!(risk_taker.condition)(&snapshot(5, 0.0, 0, 0.0, 0.0, -199.0)));
        assert!((risk_taker.condition)(&snapshot(5, 0.0, 0, 0.0, 0.0, -200.0)));
    }

    #[test]
    fn threshold_entries_fire_at_their_boundaries() {
        let by_id = |id: &str| ACHIEVEMENTS.iter().find(|a| a.id == id).unwrap();
        assert!((by_id("trader").condition)(&snapshot(10, 0.0, 0, 0.0, 0.0, 0.0)));
        assert!((by_id("day_trader").condition)(&snapshot(50, 0.0, 0, 0.0, 0.0, 0.0)));
        assert!((by_id("rich").condition)(&snapshot(0, 500.0, 0, 0.0, 0.0, 0.0)));
        assert!((by_id("millionaire").condition)(&snapshot(0, 1000.0, 0, 0.0, 0.0, 0.0)));
        assert!((by_id("win_streak").condition)(&snapshot(0, 0.0, 5, 0.0, 0.0, 0.0)));
        assert!((by_id("high_roller").condition)(&snapshot(0, 0.0, 0, 1000.0, 0.0, 0.0)));
        assert!((by_id("diamond_hands").condition)(&snapshot(0, 0.0, 0, 0.0, 100.0, 0.0)));
    }
}

// ═══════════════════════════════════════════════════════════════════
// ScoreEntry & PlayerProfile
// ═══════════════════════════════════════════════════════════════════

mod leaderboard {
    use super::*;

    fn entry() -> ScoreEntry {
        ScoreEntry {
            player_name: "trader_joe".into(),
            player_address: "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin".into(),
            profit: 250.5,
            trades: 12,
            final_balance: 1100.0,
            final_holdings: 1.5,
            final_price: 100.33,
            timestamp: 1_700_000_000_000,
            game_mode: GameMode::Chaos,
            avatar: None,
        }
    }

    #[test]
    fn serde_uses_collection_field_names() {
        let json = serde_json::to_string(&entry()).unwrap();
        assert!(json.contains("\"playerName\""));
        assert!(json.contains("\"playerAddress\""));
        assert!(json.contains("\"finalBalance\""));
        assert!(json.contains("\"gameMode\":\"chaos\""));
        // Absent avatar is omitted entirely, not null.
        assert!(!json.contains("avatar"));
    }

    #[test]
    fn serde_round_trip_with_avatar() {
        let mut score = entry();
        score.avatar = Some("data:image/png;base64,AAAA".into());
        let json = serde_json::to_string(&score).unwrap();
        let back: ScoreEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, score);
    }

    #[test]
    fn display_name_prefers_nickname() {
        let profile = PlayerProfile {
            nickname: Some("moon_boy".into()),
            avatar: None,
        };
        assert_eq!(profile.display_name("9xQeWvG816bU"), "moon_boy");
    }

    #[test]
    fn display_name_falls_back_to_short_address() {
        let profile = PlayerProfile::default();
        assert_eq!(profile.display_name("9xQeWvG816bUx9EP"), "9xQeWvG8...");
    }

    #[test]
    fn blank_nickname_counts_as_unset() {
        let profile = PlayerProfile {
            nickname: Some("   ".into()),
            avatar: None,
        };
        assert_eq!(profile.display_name("9xQeWvG816bU"), "9xQeWvG8...");
    }
}

// ═══════════════════════════════════════════════════════════════════
// PlayerStats
// ═══════════════════════════════════════════════════════════════════

mod player_stats {
    use super::*;

    #[test]
    fn default_is_all_zero() {
        let stats = PlayerStats::default();
        assert_eq!(stats.win_streak, 0);
        assert_eq!(stats.biggest_trade, 0.0);
        assert_eq!(stats.max_holdings, 0.0);
        assert_eq!(stats.biggest_loss, 0.0);
    }

    #[test]
    fn serde_uses_camel_case_and_tolerates_missing_fields() {
        let stats = PlayerStats {
            win_streak: 3,
            biggest_trade: 1200.0,
            max_holdings: 40.0,
            biggest_loss: -250.0,
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"winStreak\":3"));
        assert!(json.contains("\"biggestLoss\":-250.0"));

        let partial: PlayerStats = serde_json::from_str(r#"{"winStreak":2}"#).unwrap();
        assert_eq!(partial.win_streak, 2);
        assert_eq!(partial.biggest_trade, 0.0);
    }
}
