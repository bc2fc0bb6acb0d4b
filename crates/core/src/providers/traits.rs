use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::leaderboard::{ScoreEntry, VerifiedTrade};

/// A stored leaderboard document together with its store-assigned id.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRecord {
    pub id: String,
    pub entry: ScoreEntry,
}

/// Remote leaderboard document store.
///
/// The production implementation talks to Firestore over REST; tests
/// inject an in-memory fake. If the backing store ever changes, only
/// that one implementation changes — the rest of the codebase is
/// untouched.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ScoreStore: Send + Sync {
    /// Human-readable name of this store (for logs/errors).
    fn name(&self) -> &str;

    /// Persist a new score entry. Returns the new document id.
    async fn create(&self, entry: &ScoreEntry) -> Result<String, CoreError>;

    /// The top `n` entries ordered by profit, highest first.
    async fn top_n(&self, n: usize) -> Result<Vec<ScoreRecord>, CoreError>;

    /// Every stored entry (admin surface).
    async fn list_all(&self) -> Result<Vec<ScoreRecord>, CoreError>;

    /// Delete one entry by document id.
    async fn delete(&self, id: &str) -> Result<(), CoreError>;

    /// Delete every stored entry. Returns how many were removed.
    async fn delete_all(&self) -> Result<usize, CoreError>;

    /// Record a trade together with its decorative on-chain signature.
    async fn record_verified_trade(&self, trade: &VerifiedTrade) -> Result<String, CoreError>;

    /// Recent verified trades for one wallet address, newest first.
    async fn verified_trades(
        &self,
        address: &str,
        limit: usize,
    ) -> Result<Vec<VerifiedTrade>, CoreError>;
}

/// The wallet/session boundary.
///
/// Owned by the host shell (browser wallet adapter); the core only sees
/// this capability. Signing is purely decorative — a no-op transfer
/// whose signature "verifies" a trade without any real semantics.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait WalletSession: Send + Sync {
    /// The connected wallet address, if any.
    fn address(&self) -> Option<String>;

    /// Sign and submit the decorative no-op transfer.
    ///
    /// `Ok(None)` is a soft failure (user rejected, network hiccup):
    /// the caller may proceed unverified. `Err` is reserved for cases
    /// the caller should surface as a signing problem.
    async fn sign_and_submit(&self, memo: &str) -> Result<Option<String>, CoreError>;
}

/// Read-only blockchain queries used by the decorative verification
/// layer. Inject a fake implementation for tests.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ChainClient: Send + Sync {
    /// Human-readable name of this client (for logs/errors).
    fn name(&self) -> &str;

    /// Whether a transaction with this signature exists on chain.
    async fn verify(&self, signature: &str) -> Result<bool, CoreError>;

    /// Verify a batch of signatures, preserving order.
    async fn batch_verify(&self, signatures: &[String]) -> Result<Vec<bool>, CoreError>;

    /// Wallet balance in whole coins.
    async fn get_balance(&self, address: &str) -> Result<f64, CoreError>;

    /// Recent transaction signatures for an address, newest first.
    async fn get_history(&self, address: &str, limit: usize) -> Result<Vec<String>, CoreError>;
}
