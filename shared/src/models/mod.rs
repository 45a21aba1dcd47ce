//! Data models
//!
//! Wire types shared between the store server and its clients (via API).
//! All IDs are sequential `u64` values starting at 1; timestamps are
//! ISO-8601 strings (`chrono::DateTime<Utc>`); money fields are JSON
//! numbers with at most two fractional digits.

pub mod order;
pub mod product;

// Re-exports
pub use order::*;
pub use product::*;
