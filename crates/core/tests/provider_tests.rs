// ═══════════════════════════════════════════════════════════════════
// Provider Tests — Firestore value codec, client construction, the
// ChainClient capability
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use serde_json::json;

use hftg_core::errors::CoreError;

use hftg_core::models::game_mode::GameMode;
use hftg_core::models::leaderboard::{ScoreEntry, VerifiedTrade};
use hftg_core::models::trade::TradeKind;
use hftg_core::providers::firestore::{
    decode_score, decode_verified_trade, document_id, encode_score, encode_verified_trade,
    FirestoreConfig, FirestoreScoreStore, SCORES_COLLECTION, VERIFIED_TRADES_COLLECTION,
};
use hftg_core::providers::solana::{SolanaRpcClient, DEVNET_URL};
use hftg_core::providers::traits::{ChainClient, ScoreStore};

fn sample_entry() -> ScoreEntry {
    ScoreEntry {
        player_name: "trader_joe".into(),
        player_address: "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin".into(),
        profit: 250.5,
        trades: 12,
        final_balance: 1100.25,
        final_holdings: 1.5,
        final_price: 100.33,
        timestamp: 1_700_000_000_000,
        game_mode: GameMode::Hardcore,
        avatar: Some("data:image/png;base64,AA==".into()),
    }
}

fn sample_verified() -> VerifiedTrade {
    VerifiedTrade {
        player_address: "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin".into(),
        signature: "5SzR3vG8…sig".into(),
        kind: TradeKind::Sell,
        amount: 4.0,
        price: 120.0,
        profit: 80.0,
        timestamp: 1_700_000_000_000,
        chain_id: "devnet".into(),
    }
}

// ═══════════════════════════════════════════════════════════════════
// Score codec
// ═══════════════════════════════════════════════════════════════════

mod score_codec {
    use super::*;

    #[test]
    fn encode_wraps_fields_in_typed_envelopes() {
        let fields = encode_score(&sample_entry());

        assert_eq!(fields["playerName"]["stringValue"], "trader_joe");
        assert_eq!(fields["profit"]["doubleValue"], 250.5);
        // Firestore integers travel as strings.
        assert_eq!(fields["trades"]["integerValue"], "12");
        assert_eq!(fields["timestamp"]["integerValue"], "1700000000000");
        assert_eq!(fields["gameMode"]["stringValue"], "hardcore");
        assert_eq!(fields["avatar"]["stringValue"], "data:image/png;base64,AA==");
    }

    #[test]
    fn avatar_is_omitted_when_absent() {
        let mut entry = sample_entry();
        entry.avatar = None;
        let fields = encode_score(&entry);
        assert!(fields.get("avatar").is_none());
    }

    #[test]
    fn round_trip_is_identity() {
        let entry = sample_entry();
        let back = decode_score(&encode_score(&entry)).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn decode_accepts_integer_values_as_numbers() {
        // Some writers send integerValue as a JSON number; tolerate it.
        let fields = json!({
            "playerName": { "stringValue": "p" },
            "playerAddress": { "stringValue": "addr" },
            "profit": { "doubleValue": "42.5" },
            "trades": { "integerValue": 3 },
            "timestamp": { "integerValue": 1700000000000_i64 },
            "gameMode": { "stringValue": "speed" },
        });
        let entry = decode_score(&fields).unwrap();
        assert_eq!(entry.profit, 42.5);
        assert_eq!(entry.trades, 3);
        assert_eq!(entry.game_mode, GameMode::Speed);
        assert!(entry.avatar.is_none());
    }

    #[test]
    fn decode_rejects_entries_missing_required_fields() {
        let fields = json!({
            "playerName": { "stringValue": "p" },
            // no playerAddress, no profit
        });
        assert!(decode_score(&fields).is_none());
    }

    #[test]
    fn unknown_game_mode_falls_back_to_normal() {
        let mut fields = encode_score(&sample_entry());
        fields["gameMode"] = json!({ "stringValue": "warp" });
        assert_eq!(decode_score(&fields).unwrap().game_mode, GameMode::Normal);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Verified-trade codec
// ═══════════════════════════════════════════════════════════════════

mod verified_trade_codec {
    use super::*;

    #[test]
    fn round_trip_is_identity() {
        let trade = sample_verified();
        let back = decode_verified_trade(&encode_verified_trade(&trade)).unwrap();
        assert_eq!(back, trade);
    }

    #[test]
    fn kind_travels_as_history_row_text() {
        let fields = encode_verified_trade(&sample_verified());
        assert_eq!(fields["type"]["stringValue"], "SELL");
        assert_eq!(fields["chainId"]["stringValue"], "devnet");
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let mut fields = encode_verified_trade(&sample_verified());
        fields["type"] = json!({ "stringValue": "SHORT" });
        assert!(decode_verified_trade(&fields).is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Clients
// ═══════════════════════════════════════════════════════════════════

mod clients {
    use super::*;

    #[test]
    fn document_id_strips_the_resource_path() {
        let name = "projects/hftg/databases/(default)/documents/scores/abc-123";
        assert_eq!(document_id(name), "abc-123");
        assert_eq!(document_id("bare"), "bare");
    }

    #[test]
    fn firestore_store_reports_its_name() {
        let store = FirestoreScoreStore::new(FirestoreConfig {
            project_id: "hftg-test".into(),
            api_key: "k".into(),
        });
        assert_eq!(store.name(), "Firestore");
    }

    #[test]
    fn solana_client_reports_its_name() {
        let client = SolanaRpcClient::new();
        assert_eq!(client.name(), "Solana");
        let custom = SolanaRpcClient::with_url("http://localhost:8899");
        assert_eq!(custom.name(), "Solana");
    }

    #[test]
    fn collection_names_match_the_original_schema() {
        assert_eq!(SCORES_COLLECTION, "scores");
        assert_eq!(VERIFIED_TRADES_COLLECTION, "blockchain_trades");
        assert!(DEVNET_URL.contains("devnet"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// ChainClient capability (with an injected fake)
// ═══════════════════════════════════════════════════════════════════

mod chain_client {
    use super::*;

    /// Fake chain: a fixed set of "landed" signatures.
    struct FakeChain {
        landed: Vec<String>,
    }

    #[async_trait]
    impl ChainClient for FakeChain {
        fn name(&self) -> &str {
            "FakeChain"
        }

        async fn verify(&self, signature: &str) -> Result<bool, CoreError> {
            Ok(self.landed.iter().any(|s| s == signature))
        }

        async fn batch_verify(&self, signatures: &[String]) -> Result<Vec<bool>, CoreError> {
            let mut results = Vec::with_capacity(signatures.len());
            for signature in signatures {
                results.push(self.verify(signature).await?);
            }
            Ok(results)
        }

        async fn get_balance(&self, _address: &str) -> Result<f64, CoreError> {
            Ok(1.5)
        }

        async fn get_history(&self, _address: &str, limit: usize) -> Result<Vec<String>, CoreError> {
            Ok(self.landed.iter().take(limit).cloned().collect())
        }
    }

    #[tokio::test]
    async fn batch_verify_preserves_order() {
        let chain = FakeChain {
            landed: vec!["sig-a".into(), "sig-c".into()],
        };
        let results = chain
            .batch_verify(&["sig-a".into(), "sig-b".into(), "sig-c".into()])
            .await
            .unwrap();
        assert_eq!(results, vec![true, false, true]);
    }

    #[tokio::test]
    async fn history_honors_the_limit() {
        let chain = FakeChain {
            landed: vec!["1".into(), "2".into(), "3".into()],
        };
        let history = chain.get_history("addr", 2).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(chain.get_balance("addr").await.unwrap(), 1.5);
    }
}
