//! Order workflow engine
//!
//! Validates an order request, reserves stock across all line items
//! atomically, computes totals, and manages the status lifecycle including
//! compensating stock release on cancel/delete.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Order, OrderCreate, OrderFilter, OrderLineItem, OrderStatus};

use crate::orders::{money, status};
use crate::store::products::ReservationLine;
use crate::store::{OrderStore, ProductStore};
use crate::validation;

#[derive(Debug)]
pub struct OrderWorkflow {
    products: Arc<ProductStore>,
    orders: Arc<OrderStore>,
}

impl OrderWorkflow {
    pub fn new(products: Arc<ProductStore>, orders: Arc<OrderStore>) -> Self {
        Self { products, orders }
    }

    /// Place an order
    ///
    /// 1. Validate the payload shape (400, nothing mutated).
    /// 2. Read-only availability pass: missing product → 404, inactive or
    ///    short stock → 409. Fail-fast, nothing mutated.
    /// 3. Capture per-line snapshots and totals; discount > subtotal → 400.
    /// 4. Reserve stock all-or-none; a mid-reservation failure compensates
    ///    every staged decrement before surfacing 409.
    /// 5. Persist as `pending`.
    pub fn create(&self, payload: &OrderCreate) -> AppResult<Order> {
        validation::validate_order_create(payload)?;

        let lines: Vec<ReservationLine> = payload
            .items
            .iter()
            .map(|item| (item.product_id as u64, item.quantity as u32))
            .collect();

        let snapshots = self.products.snapshot_lines(&lines)?;

        let mut line_items = Vec::with_capacity(lines.len());
        let mut subtotal = Decimal::ZERO;
        for (&(product_id, quantity), product) in lines.iter().zip(&snapshots) {
            let unit_price = money::validate_amount(product.unit_price, "unitPrice")?;
            let line_subtotal = money::line_subtotal(quantity, unit_price);
            subtotal += line_subtotal;
            line_items.push(OrderLineItem {
                product_id,
                product_name_snapshot: product.name.clone(),
                quantity,
                unit_price_snapshot: money::to_f64(unit_price),
                line_subtotal: money::to_f64(line_subtotal),
            });
        }
        let subtotal = money::round2(subtotal);

        let discount = money::validate_amount(payload.discount.unwrap_or(0.0), "discount")?;
        if discount > subtotal {
            return Err(AppError::with_message(
                ErrorCode::DiscountExceedsSubtotal,
                format!(
                    "Discount {} cannot exceed subtotal {}",
                    money::to_f64(discount),
                    money::to_f64(subtotal)
                ),
            ));
        }
        let total = money::round2(subtotal - discount);

        self.products.reserve(&lines)?;

        let now = Utc::now();
        let order = self.orders.insert(Order {
            id: 0,
            customer_name: payload.customer_name.trim().to_string(),
            customer_email: payload.customer_email.trim().to_string(),
            customer_address: payload.customer_address.trim().to_string(),
            line_items,
            subtotal: money::to_f64(subtotal),
            discount: money::to_f64(discount),
            total: money::to_f64(total),
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        });

        tracing::info!(order_id = order.id, total = order.total, "order placed");
        Ok(order)
    }

    pub fn get(&self, id: u64) -> AppResult<Order> {
        self.orders.get(id).ok_or_else(|| {
            AppError::with_message(ErrorCode::OrderNotFound, format!("Order {} not found", id))
        })
    }

    pub fn list(&self, filter: &OrderFilter) -> Vec<Order> {
        self.orders.list(filter)
    }

    /// Advance an order along the forward transition table
    ///
    /// Terminal orders (cancelled/delivered) conflict with 409; a transition
    /// missing from the table between live states is a 400. No stock side
    /// effects.
    pub fn update_status(&self, id: u64, raw_status: &str) -> AppResult<Order> {
        let new_status: OrderStatus = raw_status
            .parse()
            .map_err(|_| AppError::validation(format!("Invalid status: {:?}", raw_status)))?;

        self.orders.update(id, |order| {
            match order.status {
                OrderStatus::Cancelled => {
                    return Err(AppError::with_message(
                        ErrorCode::OrderAlreadyCancelled,
                        format!("Order {} is cancelled and cannot change status", id),
                    ));
                }
                OrderStatus::Delivered => {
                    return Err(AppError::with_message(
                        ErrorCode::OrderAlreadyDelivered,
                        format!("Order {} is delivered and cannot change status", id),
                    ));
                }
                _ => {}
            }
            if !status::can_transition(order.status, new_status) {
                return Err(AppError::with_message(
                    ErrorCode::InvalidStatusTransition,
                    format!(
                        "Transition from {} to {} is not allowed",
                        order.status, new_status
                    ),
                ));
            }
            order.status = new_status;
            order.updated_at = Utc::now();
            Ok(())
        })
    }

    /// Cancel an order, restoring every line's reserved stock
    pub fn cancel(&self, id: u64) -> AppResult<Order> {
        let order = self.orders.update(id, |order| {
            match order.status {
                OrderStatus::Cancelled => Err(AppError::with_message(
                    ErrorCode::OrderAlreadyCancelled,
                    format!("Order {} is already cancelled", id),
                )),
                OrderStatus::Delivered => Err(AppError::with_message(
                    ErrorCode::OrderAlreadyDelivered,
                    format!("Order {} is delivered and cannot be cancelled", id),
                )),
                _ => {
                    order.status = OrderStatus::Cancelled;
                    order.updated_at = Utc::now();
                    Ok(())
                }
            }
        })?;

        self.products.release(&reservation_lines(&order));
        tracing::info!(order_id = id, "order cancelled, stock restored");
        Ok(order)
    }

    /// Delete a pending order, restoring its reserved stock
    pub fn delete(&self, id: u64) -> AppResult<()> {
        let order = self.orders.remove_pending(id)?;
        self.products.release(&reservation_lines(&order));
        tracing::info!(order_id = id, "order deleted, stock restored");
        Ok(())
    }
}

fn reservation_lines(order: &Order) -> Vec<ReservationLine> {
    order
        .line_items
        .iter()
        .map(|li| (li.product_id, li.quantity))
        .collect()
}
