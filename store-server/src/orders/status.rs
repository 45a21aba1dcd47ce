//! Order status transition table
//!
//! Forward-only: pending → confirmed → shipped → delivered. Cancellation is
//! not part of this table; it has its own entry point with its own rules
//! (reachable from any non-terminal status, with stock restoration).

use shared::models::OrderStatus;

/// Whether `from → to` is an allowed forward transition
///
/// No skips, no reverts, no self-transitions. Terminal statuses allow
/// nothing.
pub fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
    use OrderStatus::*;
    matches!(
        (from, to),
        (Pending, Confirmed) | (Confirmed, Shipped) | (Shipped, Delivered)
    )
}
