//! Product Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Product entity
///
/// `stock_quantity` is the currently available stock; it is decremented by
/// order reservation and restored by order cancellation/deletion, and is
/// never negative.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub description: String,
    /// Unit price in currency unit, two decimal places
    pub unit_price: f64,
    pub category: String,
    pub stock_quantity: u32,
    /// Low-stock alert threshold
    pub min_stock_threshold: u32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    /// Total allocation for the restock-cap policy: the creation-time stock,
    /// raised whenever an update explicitly raises the stock level.
    /// Server-internal, never serialized.
    #[serde(skip)]
    pub allocation: u32,
}

impl Product {
    /// Whether current stock is at or below the low-stock threshold
    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity <= self.min_stock_threshold
    }
}

/// Create product payload
///
/// Numeric fields use permissive wire types; range checks happen in the
/// validation module so malformed values surface as 400, not 422.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductCreate {
    pub name: String,
    pub description: String,
    pub unit_price: f64,
    pub category: String,
    pub stock_quantity: i64,
    pub min_stock_threshold: i64,
}

/// Update product payload (partial patch)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub unit_price: Option<f64>,
    pub category: Option<String>,
    pub stock_quantity: Option<i64>,
    pub min_stock_threshold: Option<i64>,
    pub active: Option<bool>,
}

impl ProductUpdate {
    /// An empty patch is rejected with 400
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.unit_price.is_none()
            && self.category.is_none()
            && self.stock_quantity.is_none()
            && self.min_stock_threshold.is_none()
            && self.active.is_none()
    }
}

/// Product list filters (query string)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub active: Option<bool>,
    /// When true, only products at or below their low-stock threshold
    pub low_stock: Option<bool>,
}
