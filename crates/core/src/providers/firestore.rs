use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Map, Value};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::game_mode::GameMode;
use crate::models::leaderboard::{ScoreEntry, VerifiedTrade};
use crate::models::trade::TradeKind;

use super::traits::{ScoreRecord, ScoreStore};

const BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// Collection holding leaderboard submissions.
pub const SCORES_COLLECTION: &str = "scores";

/// Collection holding decoratively verified trades.
pub const VERIFIED_TRADES_COLLECTION: &str = "blockchain_trades";

/// Page size used when listing a whole collection.
const LIST_PAGE_SIZE: usize = 300;

/// Connection settings for the Firestore REST API.
#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    /// Firebase project id (e.g. "hftg-prod")
    pub project_id: String,
    /// Web API key passed as the `key` query parameter
    pub api_key: String,
}

/// Firestore-backed `ScoreStore`.
///
/// Talks to the Firestore REST v1 API directly — no SDK. Documents use
/// Firestore's typed value encoding (`stringValue`, `doubleValue`,
/// `integerValue`); the codec lives in the free functions below so it
/// can be tested without a network.
pub struct FirestoreScoreStore {
    client: Client,
    config: FirestoreConfig,
}

impl FirestoreScoreStore {
    pub fn new(config: FirestoreConfig) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            config,
        }
    }

    fn documents_url(&self) -> String {
        format!(
            "{BASE_URL}/projects/{}/databases/(default)/documents",
            self.config.project_id
        )
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{collection}", self.documents_url())
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{collection}/{id}", self.documents_url())
    }

    /// Create a document with a client-generated id. Returns the id.
    async fn create_document(&self, collection: &str, fields: Value) -> Result<String, CoreError> {
        let doc_id = Uuid::new_v4().to_string();
        let url = format!(
            "{}?documentId={doc_id}&key={}",
            self.collection_url(collection),
            self.config.api_key
        );

        let resp = self.client.post(&url).json(&json!({ "fields": fields })).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Api {
                provider: "Firestore".into(),
                message: format!("create in {collection} failed: HTTP {status}"),
            });
        }

        debug!(collection, doc_id, "created document");
        Ok(doc_id)
    }

    /// Run a structured query and return (document id, fields) pairs.
    async fn run_query(&self, query: Value) -> Result<Vec<(String, Value)>, CoreError> {
        let url = format!(
            "{}:runQuery?key={}",
            self.documents_url(),
            self.config.api_key
        );

        let resp: Value = self
            .client
            .post(&url)
            .json(&json!({ "structuredQuery": query }))
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "Firestore".into(),
                message: format!("failed to parse query response: {e}"),
            })?;

        // runQuery streams one object per result; entries without a
        // `document` key are read-time markers and are skipped.
        let mut results = Vec::new();
        if let Some(rows) = resp.as_array() {
            for row in rows {
                let Some(document) = row.get("document") else {
                    continue;
                };
                let Some(name) = document.get("name").and_then(Value::as_str) else {
                    continue;
                };
                let fields = document.get("fields").cloned().unwrap_or(Value::Null);
                results.push((document_id(name), fields));
            }
        }
        Ok(results)
    }

    /// List every document in a collection, following page tokens.
    async fn list_collection(&self, collection: &str) -> Result<Vec<(String, Value)>, CoreError> {
        let mut results = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut url = format!(
                "{}?pageSize={LIST_PAGE_SIZE}&key={}",
                self.collection_url(collection),
                self.config.api_key
            );
            if let Some(token) = &page_token {
                url.push_str(&format!("&pageToken={token}"));
            }

            let resp: Value = self
                .client
                .get(&url)
                .send()
                .await?
                .json()
                .await
                .map_err(|e| CoreError::Api {
                    provider: "Firestore".into(),
                    message: format!("failed to parse list response: {e}"),
                })?;

            if let Some(documents) = resp.get("documents").and_then(Value::as_array) {
                for document in documents {
                    let Some(name) = document.get("name").and_then(Value::as_str) else {
                        continue;
                    };
                    let fields = document.get("fields").cloned().unwrap_or(Value::Null);
                    results.push((document_id(name), fields));
                }
            }

            page_token = resp
                .get("nextPageToken")
                .and_then(Value::as_str)
                .map(String::from);
            if page_token.is_none() {
                break;
            }
        }

        Ok(results)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ScoreStore for FirestoreScoreStore {
    fn name(&self) -> &str {
        "Firestore"
    }

    async fn create(&self, entry: &ScoreEntry) -> Result<String, CoreError> {
        self.create_document(SCORES_COLLECTION, encode_score(entry))
            .await
    }

    async fn top_n(&self, n: usize) -> Result<Vec<ScoreRecord>, CoreError> {
        let query = json!({
            "from": [{ "collectionId": SCORES_COLLECTION }],
            "orderBy": [{
                "field": { "fieldPath": "profit" },
                "direction": "DESCENDING"
            }],
            "limit": n
        });

        let rows = self.run_query(query).await?;
        Ok(rows
            .into_iter()
            .filter_map(|(id, fields)| {
                decode_score(&fields).map(|entry| ScoreRecord { id, entry })
            })
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<ScoreRecord>, CoreError> {
        let rows = self.list_collection(SCORES_COLLECTION).await?;
        Ok(rows
            .into_iter()
            .filter_map(|(id, fields)| {
                decode_score(&fields).map(|entry| ScoreRecord { id, entry })
            })
            .collect())
    }

    async fn delete(&self, id: &str) -> Result<(), CoreError> {
        let url = format!(
            "{}?key={}",
            self.document_url(SCORES_COLLECTION, id),
            self.config.api_key
        );
        let resp = self.client.delete(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Api {
                provider: "Firestore".into(),
                message: format!("delete {id} failed: HTTP {status}"),
            });
        }
        Ok(())
    }

    async fn delete_all(&self) -> Result<usize, CoreError> {
        let rows = self.list_collection(SCORES_COLLECTION).await?;
        let mut deleted = 0;
        for (id, _) in rows {
            self.delete(&id).await?;
            deleted += 1;
        }
        Ok(deleted)
    }

    async fn record_verified_trade(&self, trade: &VerifiedTrade) -> Result<String, CoreError> {
        self.create_document(VERIFIED_TRADES_COLLECTION, encode_verified_trade(trade))
            .await
    }

    async fn verified_trades(
        &self,
        address: &str,
        limit: usize,
    ) -> Result<Vec<VerifiedTrade>, CoreError> {
        let query = json!({
            "from": [{ "collectionId": VERIFIED_TRADES_COLLECTION }],
            "where": {
                "fieldFilter": {
                    "field": { "fieldPath": "playerAddress" },
                    "op": "EQUAL",
                    "value": { "stringValue": address }
                }
            },
            "orderBy": [{
                "field": { "fieldPath": "timestamp" },
                "direction": "DESCENDING"
            }],
            "limit": limit
        });

        let rows = self.run_query(query).await?;
        Ok(rows
            .into_iter()
            .filter_map(|(_, fields)| decode_verified_trade(&fields))
            .collect())
    }
}

// ── Firestore value codec ───────────────────────────────────────────
// Firestore wraps every field in a typed envelope: strings become
// {"stringValue": ...}, doubles {"doubleValue": ...}, and integers
// {"integerValue": "..."} with the number as a STRING. These helpers
// are pure so the codec is testable without a network.

pub fn string_value(s: &str) -> Value {
    json!({ "stringValue": s })
}

pub fn double_value(n: f64) -> Value {
    json!({ "doubleValue": n })
}

pub fn integer_value(n: i64) -> Value {
    json!({ "integerValue": n.to_string() })
}

fn field_str(fields: &Value, name: &str) -> Option<String> {
    fields
        .get(name)?
        .get("stringValue")?
        .as_str()
        .map(String::from)
}

/// Read a numeric field, accepting either envelope: `doubleValue`
/// (number or string) or `integerValue` (string or number).
fn field_f64(fields: &Value, name: &str) -> Option<f64> {
    let value = fields.get(name)?;
    if let Some(double) = value.get("doubleValue") {
        return double
            .as_f64()
            .or_else(|| double.as_str().and_then(|s| s.parse().ok()));
    }
    let integer = value.get("integerValue")?;
    integer
        .as_str()
        .and_then(|s| s.parse().ok())
        .or_else(|| integer.as_i64().map(|n| n as f64))
}

fn field_i64(fields: &Value, name: &str) -> Option<i64> {
    field_f64(fields, name).map(|n| n as i64)
}

/// Encode a score entry as a Firestore fields map.
pub fn encode_score(entry: &ScoreEntry) -> Value {
    let mut fields = Map::new();
    fields.insert("playerName".into(), string_value(&entry.player_name));
    fields.insert("playerAddress".into(), string_value(&entry.player_address));
    fields.insert("profit".into(), double_value(entry.profit));
    fields.insert("trades".into(), integer_value(entry.trades as i64));
    fields.insert("finalBalance".into(), double_value(entry.final_balance));
    fields.insert("finalHoldings".into(), double_value(entry.final_holdings));
    fields.insert("finalPrice".into(), double_value(entry.final_price));
    fields.insert("timestamp".into(), integer_value(entry.timestamp));
    fields.insert("gameMode".into(), string_value(entry.game_mode.code()));
    if let Some(avatar) = &entry.avatar {
        fields.insert("avatar".into(), string_value(avatar));
    }
    Value::Object(fields)
}

/// Decode a Firestore fields map back into a score entry.
/// Returns None when required fields are missing or mistyped.
pub fn decode_score(fields: &Value) -> Option<ScoreEntry> {
    Some(ScoreEntry {
        player_name: field_str(fields, "playerName")?,
        player_address: field_str(fields, "playerAddress")?,
        profit: field_f64(fields, "profit")?,
        trades: field_f64(fields, "trades").unwrap_or(0.0) as usize,
        final_balance: field_f64(fields, "finalBalance").unwrap_or(0.0),
        final_holdings: field_f64(fields, "finalHoldings").unwrap_or(0.0),
        final_price: field_f64(fields, "finalPrice").unwrap_or(0.0),
        timestamp: field_i64(fields, "timestamp").unwrap_or(0),
        game_mode: field_str(fields, "gameMode")
            .and_then(|code| GameMode::from_code(&code))
            .unwrap_or(GameMode::Normal),
        avatar: field_str(fields, "avatar"),
    })
}

/// Encode a verified trade as a Firestore fields map.
pub fn encode_verified_trade(trade: &VerifiedTrade) -> Value {
    let mut fields = Map::new();
    fields.insert("playerAddress".into(), string_value(&trade.player_address));
    fields.insert("signature".into(), string_value(&trade.signature));
    fields.insert("type".into(), string_value(&trade.kind.to_string()));
    fields.insert("amount".into(), double_value(trade.amount));
    fields.insert("price".into(), double_value(trade.price));
    fields.insert("profit".into(), double_value(trade.profit));
    fields.insert("timestamp".into(), integer_value(trade.timestamp));
    fields.insert("chainId".into(), string_value(&trade.chain_id));
    Value::Object(fields)
}

/// Decode a Firestore fields map back into a verified trade.
pub fn decode_verified_trade(fields: &Value) -> Option<VerifiedTrade> {
    let kind = match field_str(fields, "type")?.as_str() {
        "BUY" => TradeKind::Buy,
        "SELL" => TradeKind::Sell,
        _ => return None,
    };
    Some(VerifiedTrade {
        player_address: field_str(fields, "playerAddress")?,
        signature: field_str(fields, "signature")?,
        kind,
        amount: field_f64(fields, "amount")?,
        price: field_f64(fields, "price")?,
        profit: field_f64(fields, "profit").unwrap_or(0.0),
        timestamp: field_i64(fields, "timestamp").unwrap_or(0),
        chain_id: field_str(fields, "chainId").unwrap_or_else(|| "devnet".into()),
    })
}

/// Last path segment of a full Firestore document name.
pub fn document_id(name: &str) -> String {
    name.rsplit('/').next().unwrap_or(name).to_string()
}
