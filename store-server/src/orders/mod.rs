//! Order workflow module
//!
//! - **workflow**: order placement, status transitions, cancel/delete with
//!   stock restoration
//! - **status**: the forward transition table
//! - **money**: `rust_decimal`-backed monetary validation and arithmetic
//!
//! # Control flow (placement)
//!
//! ```text
//! request → validation → availability pass (read-only)
//!         → snapshots + totals → reserve (all-or-none, compensated)
//!         → order persisted as `pending`
//! ```

pub mod money;
pub mod status;
pub mod workflow;

pub use workflow::OrderWorkflow;
