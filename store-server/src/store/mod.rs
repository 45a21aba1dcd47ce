//! In-memory repositories
//!
//! Owned collections behind `parking_lot::RwLock`, injected into the
//! workflow engine through [`crate::core::ServerState`]. Sequential ids
//! start at 1; insertion order is preserved for listings.

pub mod orders;
pub mod products;

pub use orders::OrderStore;
pub use products::ProductStore;
