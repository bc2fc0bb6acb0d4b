use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;

use super::traits::ChainClient;

/// Default RPC endpoint — the game's decorative transfers land on devnet.
pub const DEVNET_URL: &str = "https://api.devnet.solana.com";

const LAMPORTS_PER_SOL: f64 = 1_000_000_000.0;

/// Solana JSON-RPC client implementing the read-only chain queries.
///
/// This is decorative infrastructure: a "verified" trade just means a
/// no-op transfer with this signature exists on devnet. Nothing here
/// carries real financial meaning.
pub struct SolanaRpcClient {
    client: Client,
    url: String,
}

impl SolanaRpcClient {
    pub fn new() -> Self {
        Self::with_url(DEVNET_URL)
    }

    pub fn with_url(url: impl Into<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            url: url.into(),
        }
    }

    /// Issue one JSON-RPC call and unwrap the `result` payload.
    async fn rpc(&self, method: &str, params: Value) -> Result<Value, CoreError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let resp: RpcEnvelope = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "Solana".into(),
                message: format!("failed to parse {method} response: {e}"),
            })?;

        if let Some(error) = resp.error {
            return Err(CoreError::Api {
                provider: "Solana".into(),
                message: format!("{method} failed ({}): {}", error.code, error.message),
            });
        }

        Ok(resp.result.unwrap_or(Value::Null))
    }
}

impl Default for SolanaRpcClient {
    fn default() -> Self {
        Self::new()
    }
}

// ── JSON-RPC response types ─────────────────────────────────────────

#[derive(Deserialize)]
struct RpcEnvelope {
    result: Option<Value>,
    error: Option<RpcErrorBody>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ChainClient for SolanaRpcClient {
    fn name(&self) -> &str {
        "Solana"
    }

    async fn verify(&self, signature: &str) -> Result<bool, CoreError> {
        // A trade is "verified" iff the transaction exists at all.
        let result = self
            .rpc("getTransaction", json!([signature, { "encoding": "json" }]))
            .await?;
        Ok(!result.is_null())
    }

    async fn batch_verify(&self, signatures: &[String]) -> Result<Vec<bool>, CoreError> {
        let mut results = Vec::with_capacity(signatures.len());
        for signature in signatures {
            results.push(self.verify(signature).await?);
        }
        Ok(results)
    }

    async fn get_balance(&self, address: &str) -> Result<f64, CoreError> {
        let result = self.rpc("getBalance", json!([address])).await?;
        let lamports = result
            .get("value")
            .and_then(Value::as_u64)
            .ok_or_else(|| CoreError::Api {
                provider: "Solana".into(),
                message: format!("no balance value returned for {address}"),
            })?;
        Ok(lamports as f64 / LAMPORTS_PER_SOL)
    }

    async fn get_history(&self, address: &str, limit: usize) -> Result<Vec<String>, CoreError> {
        let result = self
            .rpc(
                "getSignaturesForAddress",
                json!([address, { "limit": limit }]),
            )
            .await?;

        let signatures = result
            .as_array()
            .map(|rows| {
                rows.iter()
                    .filter_map(|row| row.get("signature").and_then(Value::as_str))
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();
        Ok(signatures)
    }
}
