//! Input validation helpers
//!
//! Centralized limits and per-entity validation, each rule a pure predicate
//! returning a typed [`AppError`]. Handlers validate before touching any
//! store, so a rejected payload never leaves partial state behind.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{OrderCreate, ProductCreate, ProductUpdate};
use validator::ValidateEmail;

use crate::orders::money;

// ── Limits ──────────────────────────────────────────────────────────

/// Entity and customer names
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions and categories
pub const MAX_TEXT_LEN: usize = 500;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// Stock counters and thresholds
pub const MAX_STOCK: i64 = 1_000_000;

/// Per-line order quantity
pub const MAX_QUANTITY: i64 = 9_999;

// ── Field predicates ────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(value: &Option<String>, field: &str, max_len: usize) -> AppResult<()> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate email shape (non-empty, well-formed, length-bounded)
pub fn validate_email(value: &str, field: &str) -> AppResult<()> {
    validate_required_text(value, field, MAX_EMAIL_LEN)?;
    if !value.trim().validate_email() {
        return Err(AppError::validation(format!(
            "{field} must be a valid email address"
        )));
    }
    Ok(())
}

/// Validate an integer count within `min..=max`
pub fn validate_count(value: i64, field: &str, min: i64, max: i64) -> AppResult<()> {
    if value < min || value > max {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} must be between {min} and {max}, got {value}"),
        ));
    }
    Ok(())
}

// ── Entity validation ───────────────────────────────────────────────

pub fn validate_product_create(input: &ProductCreate) -> AppResult<()> {
    validate_required_text(&input.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&input.description, "description", MAX_TEXT_LEN)?;
    validate_required_text(&input.category, "category", MAX_TEXT_LEN)?;
    money::validate_amount(input.unit_price, "unitPrice")?;
    validate_count(input.stock_quantity, "stockQuantity", 0, MAX_STOCK)?;
    validate_count(input.min_stock_threshold, "minStockThreshold", 0, MAX_STOCK)?;
    Ok(())
}

pub fn validate_product_update(patch: &ProductUpdate) -> AppResult<()> {
    if patch.is_empty() {
        return Err(AppError::new(ErrorCode::EmptyUpdate));
    }
    if let Some(name) = &patch.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(description) = &patch.description {
        validate_required_text(description, "description", MAX_TEXT_LEN)?;
    }
    if let Some(category) = &patch.category {
        validate_required_text(category, "category", MAX_TEXT_LEN)?;
    }
    if let Some(unit_price) = patch.unit_price {
        money::validate_amount(unit_price, "unitPrice")?;
    }
    if let Some(stock) = patch.stock_quantity {
        validate_count(stock, "stockQuantity", 0, MAX_STOCK)?;
    }
    if let Some(threshold) = patch.min_stock_threshold {
        validate_count(threshold, "minStockThreshold", 0, MAX_STOCK)?;
    }
    Ok(())
}

pub fn validate_order_create(payload: &OrderCreate) -> AppResult<()> {
    validate_required_text(&payload.customer_name, "customerName", MAX_NAME_LEN)?;
    validate_email(&payload.customer_email, "customerEmail")?;
    validate_required_text(&payload.customer_address, "customerAddress", MAX_ADDRESS_LEN)?;

    if payload.items.is_empty() {
        return Err(AppError::validation(
            "items must contain at least one line item",
        ));
    }
    for (idx, item) in payload.items.iter().enumerate() {
        if item.product_id < 1 {
            return Err(
                AppError::validation(format!("items[{idx}].productId must be a positive integer"))
                    .with_detail("index", idx),
            );
        }
        if item.quantity < 1 || item.quantity > MAX_QUANTITY {
            return Err(
                AppError::validation(format!(
                    "items[{idx}].quantity must be between 1 and {MAX_QUANTITY}"
                ))
                .with_detail("index", idx),
            );
        }
    }

    if let Some(discount) = payload.discount {
        money::validate_amount(discount, "discount")?;
    }
    Ok(())
}
