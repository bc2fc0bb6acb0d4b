pub mod traits;

// Remote service implementations
pub mod firestore;
pub mod solana;
