pub mod achievement_service;
pub mod challenge_service;
pub mod ledger_service;
pub mod market_service;
pub mod mode_service;
pub mod rng;
pub mod stats_service;
