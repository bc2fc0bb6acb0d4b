pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use errors::CoreError;
use models::achievement::Achievement;
use models::challenge::DailyChallenge;
use models::game_mode::{ActiveChaosEvent, ChaosEvent, GameMode, ModeState};
use models::game_state::GameState;
use models::leaderboard::{ScoreEntry, VerifiedTrade};
use models::price::PriceHistory;
use models::profile::PlayerProfile;
use models::stats::{PlayerStats, TradeStats};
use models::trade::Trade;
use providers::traits::{ScoreStore, WalletSession};
use services::achievement_service::AchievementService;
use services::challenge_service::ChallengeService;
use services::ledger_service::LedgerService;
use services::market_service::MarketService;
use services::mode_service::{HardcoreOutcome, ModeService};
use services::rng::random_unit;
use services::stats_service::StatsService;
use storage::manager::StorageManager;
use storage::traits::KeyValueStore;

/// Everything one accepted trade set in motion.
#[derive(Debug, Clone)]
pub struct TradeOutcome {
    /// The trade as appended to the log
    pub trade: Trade,

    /// Catalogue entries this trade unlocked, in catalogue order
    pub newly_unlocked: Vec<&'static Achievement>,

    /// Daily-challenge reward credited by this trade, if it crossed the target
    pub challenge_reward: Option<f64>,

    /// What the trade did to the Hardcore life counter
    pub hardcore: HardcoreOutcome,
}

/// A successfully submitted leaderboard score.
#[derive(Debug, Clone)]
pub struct ScoreSubmission {
    /// Document id assigned by the remote store
    pub doc_id: String,

    /// The entry exactly as submitted
    pub entry: ScoreEntry,

    /// Signature of the decorative verification transfer, when it succeeded
    pub signature: Option<String>,
}

/// Main entry point for the HFTG core.
///
/// Holds the full game state and all services needed to operate on it.
/// The host UI owns the timers and drives this as a pure state machine:
/// the 1-second price timer calls [`tick`](Self::tick), the Speed
/// countdown calls [`speed_tick`](Self::speed_tick), the 5-second Chaos
/// timer calls [`chaos_tick`](Self::chaos_tick), and user actions call
/// [`buy`](Self::buy) / [`sell`](Self::sell) / mode switches.
///
/// Every mutation snapshots the session to the injected storage port,
/// fire-and-forget: a failed write is logged and play continues.
#[must_use]
pub struct TradingGame {
    state: GameState,
    market: MarketService,
    player_stats: PlayerStats,
    unlocked: Vec<String>,
    mode_state: ModeState,
    challenge: Option<DailyChallenge>,
    profile: PlayerProfile,
    ledger: LedgerService,
    stats_service: StatsService,
    achievements: AchievementService,
    modes: ModeService,
    challenges: ChallengeService,
    storage: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for TradingGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TradingGame")
            .field("balance", &self.state.balance)
            .field("holdings", &self.state.holdings)
            .field("trades", &self.state.history.len())
            .field("mode", &self.mode_state.mode)
            .field("unlocked", &self.unlocked.len())
            .finish()
    }
}

impl TradingGame {
    /// Resume (or start) a session from the injected storage port.
    ///
    /// Missing or malformed saved values silently fall back to a fresh
    /// default — a corrupt snapshot is "no saved state", not an error.
    pub fn new(storage: Box<dyn KeyValueStore>) -> Self {
        let state = StorageManager::load_game_state(storage.as_ref());
        let unlocked = StorageManager::load_unlocked(storage.as_ref());
        let player_stats = StorageManager::load_player_stats(storage.as_ref());
        let challenge = StorageManager::load_challenge(storage.as_ref());
        let profile = StorageManager::load_profile(storage.as_ref());

        Self {
            state,
            market: MarketService::new(),
            player_stats,
            unlocked,
            mode_state: ModeState::default(),
            challenge,
            profile,
            ledger: LedgerService::new(),
            stats_service: StatsService::new(),
            achievements: AchievementService::new(),
            modes: ModeService::new(),
            challenges: ChallengeService::new(),
            storage,
        }
    }

    // ── Market Ticks ────────────────────────────────────────────────

    /// One second of market time with a pre-drawn sample in [0, 1).
    /// Returns the new price. Also ages the chaos-event banner.
    pub fn tick_with(&mut self, sample: f64) -> f64 {
        let price = self.market.apply_tick(sample);
        self.modes.banner_tick(&mut self.mode_state);
        price
    }

    /// One second of market time drawing from the platform RNG.
    pub fn tick(&mut self) -> Result<f64, CoreError> {
        let sample = random_unit()?;
        Ok(self.tick_with(sample))
    }

    /// Sample the current profit into the profit-over-time window.
    pub fn record_profit_point(&mut self) {
        let profit = self.state.profit_loss(self.market.current_price());
        self.market.record_profit(profit);
    }

    /// One second of Speed countdown. Returns `Some(bonus)` when the
    /// round just ended; a positive bonus is already credited to cash.
    pub fn speed_tick(&mut self) -> Option<f64> {
        let profit_loss = self.state.profit_loss(self.market.current_price());
        let bonus = self.modes.speed_tick(&mut self.mode_state, profit_loss)?;
        if bonus > 0.0 {
            self.state.balance += bonus;
            StorageManager::save_game_state(&mut *self.storage, &self.state);
            info!(bonus, "speed round bonus credited");
        }
        Some(bonus)
    }

    /// One 5-second Chaos roll with pre-drawn samples in [0, 1).
    /// When an event fires, its price shock is applied immediately.
    pub fn chaos_tick_with(&mut self, roll: f64, pick: f64, magnitude: f64) -> Option<ChaosEvent> {
        let event = self.modes.chaos_roll(&mut self.mode_state, roll, pick)?;
        self.market.apply_event(event, magnitude);
        Some(event)
    }

    /// One 5-second Chaos roll drawing from the platform RNG.
    pub fn chaos_tick(&mut self) -> Result<Option<ChaosEvent>, CoreError> {
        let roll = random_unit()?;
        let pick = random_unit()?;
        let magnitude = random_unit()?;
        Ok(self.chaos_tick_with(roll, pick, magnitude))
    }

    // ── Trading ─────────────────────────────────────────────────────

    /// Buy tokens at the current market price.
    ///
    /// Rejections (non-positive amount, insufficient cash) leave every
    /// piece of state untouched.
    pub fn buy(&mut self, amount: f64) -> Result<TradeOutcome, CoreError> {
        let price = self.market.current_price();
        let now = Utc::now().timestamp_millis();
        let trade = self.ledger.buy(&mut self.state, amount, price, now)?;
        self.stats_service
            .absorb_trade(&mut self.player_stats, &trade, self.state.holdings);
        Ok(self.post_trade(trade, HardcoreOutcome::Unaffected))
    }

    /// Sell tokens at the current market price.
    ///
    /// Rejections (non-positive amount, insufficient holdings) leave
    /// every piece of state untouched. In Hardcore, a losing sell costs
    /// a life; losing the last one performs the full game reset after
    /// the sell itself has been applied.
    pub fn sell(&mut self, amount: f64) -> Result<TradeOutcome, CoreError> {
        let price = self.market.current_price();
        let now = Utc::now().timestamp_millis();
        let trade = self.ledger.sell(&mut self.state, amount, price, now)?;
        self.stats_service
            .absorb_trade(&mut self.player_stats, &trade, self.state.holdings);
        let hardcore = self
            .modes
            .register_sell(&mut self.mode_state, trade.realized_profit);
        Ok(self.post_trade(trade, hardcore))
    }

    /// Shared post-trade pipeline: settle the daily challenge, evaluate
    /// achievements, snapshot everything, then honor a Hardcore game
    /// over. Runs only for accepted trades.
    fn post_trade(&mut self, trade: Trade, hardcore: HardcoreOutcome) -> TradeOutcome {
        let price = self.market.current_price();

        let mut challenge_reward = None;
        let profit_loss = self.state.profit_loss(price);
        if let Some(challenge) = self.challenge.as_mut() {
            if let Some(reward) = self.challenges.check(challenge, profit_loss) {
                self.state.balance += reward;
                StorageManager::save_challenge(&mut *self.storage, challenge);
                info!(reward, "daily challenge completed");
                challenge_reward = Some(reward);
            }
        }

        let snapshot =
            self.stats_service
                .achievement_snapshot(&self.state, price, &self.player_stats);
        let newly_unlocked = self.achievements.evaluate(&mut self.unlocked, &snapshot);
        if !newly_unlocked.is_empty() {
            StorageManager::save_unlocked(&mut *self.storage, &self.unlocked);
        }

        StorageManager::save_game_state(&mut *self.storage, &self.state);
        StorageManager::save_player_stats(&mut *self.storage, &self.player_stats);

        if hardcore == HardcoreOutcome::GameOver {
            self.reset_game();
        }

        TradeOutcome {
            trade,
            newly_unlocked,
            challenge_reward,
            hardcore,
        }
    }

    // ── Game Modes ──────────────────────────────────────────────────

    /// Select a game mode. Always allowed; mode-local counters reset on
    /// entry, the portfolio is untouched.
    pub fn switch_mode(&mut self, mode: GameMode) {
        self.modes.switch(&mut self.mode_state, mode);
    }

    /// Full game reset: fresh portfolio, cleared counters and chart
    /// windows, lives restored, back to Normal, local snapshot erased.
    /// Unlocked achievements survive — the unlocked set never shrinks.
    pub fn reset_game(&mut self) {
        self.state = GameState::default();
        self.player_stats = PlayerStats::default();
        self.mode_state = ModeState::default();
        self.market.reset();
        StorageManager::clear_game_state(&mut *self.storage);
        info!("game reset");
    }

    // ── Daily Challenge ─────────────────────────────────────────────

    /// Issue the challenge for `today` if none exists yet, drawing the
    /// tier with a pre-drawn sample in [0, 1). Returns true when a
    /// fresh challenge was issued (replacing any prior day's).
    pub fn ensure_daily_challenge_with(&mut self, today: NaiveDate, sample: f64) -> bool {
        match self
            .challenges
            .ensure_today(self.challenge.as_ref(), today, sample)
        {
            Some(fresh) => {
                StorageManager::save_challenge(&mut *self.storage, &fresh);
                self.challenge = Some(fresh);
                true
            }
            None => false,
        }
    }

    /// Issue today's challenge if needed, using the system clock and
    /// the platform RNG.
    pub fn ensure_daily_challenge(&mut self) -> Result<bool, CoreError> {
        let today = Utc::now().date_naive();
        let sample = random_unit()?;
        Ok(self.ensure_daily_challenge_with(today, sample))
    }

    // ── Statistics ──────────────────────────────────────────────────

    /// Recompute the full stats snapshot at the current price.
    #[must_use]
    pub fn stats(&self) -> TradeStats {
        self.stats_service
            .compute(&self.state, self.market.current_price())
    }

    // ── Leaderboard ─────────────────────────────────────────────────

    /// Snapshot the session into a leaderboard entry for `address`.
    ///
    /// Fails with [`CoreError::DuplicateScore`] when this exact profit
    /// value was already submitted for this address from this browser.
    /// The guard is the last-submitted profit, nothing subtler: any
    /// trade that moves profit at all re-arms submission.
    pub fn build_score_entry(&self, address: &str) -> Result<ScoreEntry, CoreError> {
        let price = self.market.current_price();
        let profit = self.state.profit_loss(price);

        if StorageManager::last_submitted_profit(self.storage.as_ref(), address) == Some(profit) {
            return Err(CoreError::DuplicateScore);
        }

        Ok(ScoreEntry {
            player_name: self.profile.display_name(address),
            player_address: address.to_string(),
            profit,
            trades: self.state.history.len(),
            final_balance: self.state.balance,
            final_holdings: self.state.holdings,
            final_price: price,
            timestamp: Utc::now().timestamp_millis(),
            game_mode: self.mode_state.mode,
            avatar: self.profile.avatar.clone(),
        })
    }

    /// Submit the current session to the leaderboard.
    ///
    /// The entry is snapshotted before anything asynchronous happens,
    /// so trades executed while the save is in flight cannot corrupt
    /// it. The wallet signature is decorative: when signing fails and
    /// `allow_unverified` is false, this returns
    /// [`CoreError::SigningFailed`] without writing anything, so the UI
    /// can ask the player whether to save unverified and retry.
    pub async fn save_score(
        &mut self,
        store: &dyn ScoreStore,
        wallet: &dyn WalletSession,
        allow_unverified: bool,
    ) -> Result<ScoreSubmission, CoreError> {
        let address = wallet.address().ok_or(CoreError::WalletNotConnected)?;
        let entry = self.build_score_entry(&address)?;

        let memo = serde_json::to_string(&entry)
            .map_err(|e| CoreError::Serialization(e.to_string()))?;
        let signature = match wallet.sign_and_submit(&memo).await {
            Ok(signature) => signature,
            Err(e) => {
                warn!(error = %e, "score verification failed");
                None
            }
        };
        if signature.is_none() && !allow_unverified {
            return Err(CoreError::SigningFailed(
                "verification was declined or failed".into(),
            ));
        }

        let doc_id = store.create(&entry).await?;
        StorageManager::record_submitted_profit(&mut *self.storage, &address, entry.profit);

        if let Some(signature) = &signature {
            if let Some(last) = self.state.history.last() {
                let verified = VerifiedTrade {
                    player_address: address.clone(),
                    signature: signature.clone(),
                    kind: last.kind,
                    amount: last.amount,
                    price: last.price,
                    profit: last.realized_profit,
                    timestamp: last.timestamp,
                    chain_id: "devnet".into(),
                };
                // Decorative record: losing it is not worth failing the save.
                if let Err(e) = store.record_verified_trade(&verified).await {
                    warn!(error = %e, "failed to record verified trade");
                }
            }
        }

        Ok(ScoreSubmission {
            doc_id,
            entry,
            signature,
        })
    }

    // ── Profile ─────────────────────────────────────────────────────

    pub fn set_nickname(&mut self, nickname: Option<String>) {
        self.profile.nickname = nickname;
        StorageManager::save_profile(&mut *self.storage, &self.profile);
    }

    pub fn set_avatar(&mut self, avatar: Option<String>) {
        self.profile.avatar = avatar;
        StorageManager::save_profile(&mut *self.storage, &self.profile);
    }

    // ── Accessors ───────────────────────────────────────────────────

    #[must_use]
    pub fn balance(&self) -> f64 {
        self.state.balance
    }

    #[must_use]
    pub fn holdings(&self) -> f64 {
        self.state.holdings
    }

    #[must_use]
    pub fn current_price(&self) -> f64 {
        self.market.current_price()
    }

    /// The append-only trade log, oldest first.
    #[must_use]
    pub fn history(&self) -> &[Trade] {
        &self.state.history
    }

    #[must_use]
    pub fn price_history(&self) -> &PriceHistory {
        self.market.price_history()
    }

    #[must_use]
    pub fn profit_history(&self) -> &PriceHistory {
        self.market.profit_history()
    }

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode_state.mode
    }

    #[must_use]
    pub fn lives(&self) -> u8 {
        self.mode_state.lives
    }

    #[must_use]
    pub fn speed_remaining(&self) -> u32 {
        self.mode_state.speed_remaining
    }

    /// The chaos event currently showing its banner, if any.
    #[must_use]
    pub fn active_event(&self) -> Option<ActiveChaosEvent> {
        self.mode_state.active_event
    }

    /// Ids of every achievement this profile has earned, in unlock order.
    #[must_use]
    pub fn unlocked_achievements(&self) -> &[String] {
        &self.unlocked
    }

    #[must_use]
    pub fn daily_challenge(&self) -> Option<&DailyChallenge> {
        self.challenge.as_ref()
    }

    #[must_use]
    pub fn profile(&self) -> &PlayerProfile {
        &self.profile
    }

    #[must_use]
    pub fn player_stats(&self) -> &PlayerStats {
        &self.player_stats
    }

    /// Read-only view of the injected storage port.
    #[must_use]
    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }
}
