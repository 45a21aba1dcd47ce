//! Order repository
//!
//! Insertion-ordered order records. Status mutations run under the write
//! guard via [`OrderStore::update`], so check-then-set sequences (terminal
//! checks, transition table) are atomic with respect to other requests.

use parking_lot::RwLock;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Order, OrderFilter, OrderStatus};

#[derive(Debug, Default)]
struct OrdersInner {
    items: Vec<Order>,
    next_id: u64,
}

#[derive(Debug, Default)]
pub struct OrderStore {
    inner: RwLock<OrdersInner>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an order, assigning the next sequential id
    pub fn insert(&self, mut order: Order) -> Order {
        let mut inner = self.inner.write();
        inner.next_id += 1;
        order.id = inner.next_id;
        inner.items.push(order.clone());
        order
    }

    pub fn get(&self, id: u64) -> Option<Order> {
        self.inner.read().items.iter().find(|o| o.id == id).cloned()
    }

    /// List orders in insertion order, applying optional filters
    pub fn list(&self, filter: &OrderFilter) -> Vec<Order> {
        let inner = self.inner.read();
        inner
            .items
            .iter()
            .filter(|o| filter.status.is_none_or(|s| o.status == s))
            .filter(|o| {
                filter
                    .customer_email
                    .as_ref()
                    .is_none_or(|e| o.customer_email.eq_ignore_ascii_case(e))
            })
            .cloned()
            .collect()
    }

    /// Mutate an order under the write guard
    ///
    /// The closure performs its own business checks and either mutates the
    /// order or returns a typed error. Missing id resolves to 404 here.
    pub fn update<F>(&self, id: u64, f: F) -> AppResult<Order>
    where
        F: FnOnce(&mut Order) -> AppResult<()>,
    {
        let mut inner = self.inner.write();
        let Some(order) = inner.items.iter_mut().find(|o| o.id == id) else {
            return Err(AppError::with_message(
                ErrorCode::OrderNotFound,
                format!("Order {} not found", id),
            ));
        };
        f(order)?;
        Ok(order.clone())
    }

    /// Remove an order, permitted only while `pending`
    ///
    /// Returns the removed order so the caller can release its reserved
    /// stock.
    pub fn remove_pending(&self, id: u64) -> AppResult<Order> {
        let mut inner = self.inner.write();
        let Some(idx) = inner.items.iter().position(|o| o.id == id) else {
            return Err(AppError::with_message(
                ErrorCode::OrderNotFound,
                format!("Order {} not found", id),
            ));
        };
        if inner.items[idx].status != OrderStatus::Pending {
            return Err(AppError::with_message(
                ErrorCode::OrderNotPending,
                format!(
                    "Order {} is {} and cannot be deleted",
                    id, inner.items[idx].status
                ),
            ));
        }
        Ok(inner.items.remove(idx))
    }

    /// Whether any non-cancelled order references the product
    ///
    /// Used as the referential-integrity lock on product deletion.
    pub fn references_product(&self, product_id: u64) -> bool {
        let inner = self.inner.read();
        inner.items.iter().any(|o| {
            o.status != OrderStatus::Cancelled
                && o.line_items.iter().any(|li| li.product_id == product_id)
        })
    }
}
