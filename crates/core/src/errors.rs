use thiserror::Error;

/// Unified error type for the entire hftg-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Trade Rejection ─────────────────────────────────────────────
    #[error("Trade amount must be positive (got {0})")]
    InvalidAmount(f64),

    #[error("Insufficient funds: need ${needed:.2}, have ${available:.2}")]
    InsufficientFunds { needed: f64, available: f64 },

    #[error("Insufficient tokens: tried to sell {requested}, only hold {held}")]
    InsufficientHoldings { requested: f64, held: f64 },

    // ── Score Submission ────────────────────────────────────────────
    #[error("No wallet connected — connect a wallet to save your score")]
    WalletNotConnected,

    #[error("This exact score was already submitted for this wallet")]
    DuplicateScore,

    #[error("Wallet signing failed: {0}")]
    SigningFailed(String),

    // ── Storage ─────────────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    // ── Randomness ──────────────────────────────────────────────────
    #[error("Random source unavailable: {0}")]
    Rng(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Sanitize error message: strip query parameters from URLs to prevent
        // API key leakage. reqwest errors often contain full URLs with secrets.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}

impl From<getrandom::Error> for CoreError {
    fn from(e: getrandom::Error) -> Self {
        CoreError::Rng(e.to_string())
    }
}
