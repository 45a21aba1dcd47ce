//! Product repository
//!
//! Holds product records and stock counters. The multi-line reservation
//! path runs entirely under one write guard: the availability re-check and
//! the decrements are a single critical section, so an order is either
//! fully reserved or not reserved at all, even under a multi-threaded host.

use chrono::Utc;
use parking_lot::RwLock;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Product, ProductCreate, ProductFilter, ProductUpdate};

/// One reservation line: (product id, quantity)
pub type ReservationLine = (u64, u32);

#[derive(Debug, Default)]
struct ProductsInner {
    items: Vec<Product>,
    next_id: u64,
}

impl ProductsInner {
    fn find(&self, id: u64) -> Option<&Product> {
        self.items.iter().find(|p| p.id == id)
    }

    fn find_mut(&mut self, id: u64) -> Option<&mut Product> {
        self.items.iter_mut().find(|p| p.id == id)
    }
}

#[derive(Debug)]
pub struct ProductStore {
    inner: RwLock<ProductsInner>,
    /// Restock-cap policy (see Config): clamp increments to the recorded
    /// allocation when true, unbounded when false.
    restock_cap: bool,
}

impl ProductStore {
    pub fn new(restock_cap: bool) -> Self {
        Self {
            inner: RwLock::new(ProductsInner::default()),
            restock_cap,
        }
    }

    /// Insert a new product. Input must already be validated.
    pub fn create(&self, input: &ProductCreate) -> Product {
        let mut inner = self.inner.write();
        inner.next_id += 1;

        let stock = input.stock_quantity as u32;
        let product = Product {
            id: inner.next_id,
            name: input.name.trim().to_string(),
            description: input.description.trim().to_string(),
            unit_price: input.unit_price,
            category: input.category.trim().to_string(),
            stock_quantity: stock,
            min_stock_threshold: input.min_stock_threshold as u32,
            active: true,
            created_at: Utc::now(),
            allocation: stock,
        };
        inner.items.push(product.clone());
        product
    }

    /// List products in insertion order, applying optional filters
    pub fn list(&self, filter: &ProductFilter) -> Vec<Product> {
        let inner = self.inner.read();
        inner
            .items
            .iter()
            .filter(|p| {
                filter
                    .category
                    .as_ref()
                    .is_none_or(|c| p.category == *c)
            })
            .filter(|p| filter.active.is_none_or(|a| p.active == a))
            .filter(|p| {
                filter
                    .low_stock
                    .is_none_or(|low| !low || p.is_low_stock())
            })
            .cloned()
            .collect()
    }

    pub fn get(&self, id: u64) -> Option<Product> {
        self.inner.read().find(id).cloned()
    }

    /// Apply a partial patch. Input must already be validated and non-empty.
    ///
    /// An explicit stock raise also raises the recorded allocation, so the
    /// restock cap tracks deliberate restocks rather than the original
    /// creation batch forever.
    pub fn update(&self, id: u64, patch: &ProductUpdate) -> Option<Product> {
        let mut inner = self.inner.write();
        let product = inner.find_mut(id)?;

        if let Some(name) = &patch.name {
            product.name = name.trim().to_string();
        }
        if let Some(description) = &patch.description {
            product.description = description.trim().to_string();
        }
        if let Some(unit_price) = patch.unit_price {
            product.unit_price = unit_price;
        }
        if let Some(category) = &patch.category {
            product.category = category.trim().to_string();
        }
        if let Some(stock) = patch.stock_quantity {
            let stock = stock as u32;
            product.stock_quantity = stock;
            if stock > product.allocation {
                product.allocation = stock;
            }
        }
        if let Some(threshold) = patch.min_stock_threshold {
            product.min_stock_threshold = threshold as u32;
        }
        if let Some(active) = patch.active {
            product.active = active;
        }

        Some(product.clone())
    }

    /// Remove a product. Referential-integrity checks (active orders) are
    /// the caller's responsibility.
    pub fn delete(&self, id: u64) -> bool {
        let mut inner = self.inner.write();
        let before = inner.items.len();
        inner.items.retain(|p| p.id != id);
        inner.items.len() != before
    }

    /// Decrement available stock. Fails without mutating when the product
    /// is missing or stock is insufficient.
    pub fn decrement_stock(&self, id: u64, qty: u32) -> bool {
        let mut inner = self.inner.write();
        let Some(product) = inner.find_mut(id) else {
            return false;
        };
        match product.stock_quantity.checked_sub(qty) {
            Some(remaining) => {
                product.stock_quantity = remaining;
                true
            }
            None => false,
        }
    }

    /// Increment available stock, subject to the restock-cap policy.
    pub fn increment_stock(&self, id: u64, qty: u32) -> bool {
        let mut inner = self.inner.write();
        let cap = self.restock_cap;
        let Some(product) = inner.find_mut(id) else {
            return false;
        };
        let mut stock = product.stock_quantity.saturating_add(qty);
        if cap && stock > product.allocation {
            stock = product.allocation;
        }
        product.stock_quantity = stock;
        true
    }

    /// Read-only availability pass for an order request
    ///
    /// Fails fast on the first violation; nothing is mutated. Returns the
    /// products in line order so the caller can capture snapshots.
    pub fn snapshot_lines(&self, lines: &[ReservationLine]) -> AppResult<Vec<Product>> {
        let inner = self.inner.read();
        let mut products = Vec::with_capacity(lines.len());
        for &(id, qty) in lines {
            let Some(product) = inner.find(id) else {
                return Err(AppError::with_message(
                    ErrorCode::ProductNotFound,
                    format!("Product {} not found", id),
                )
                .with_detail("productId", id));
            };
            if !product.active {
                return Err(AppError::with_message(
                    ErrorCode::ProductInactive,
                    format!("Product {} is inactive", product.name),
                )
                .with_detail("productId", id));
            }
            if product.stock_quantity < qty {
                return Err(AppError::with_message(
                    ErrorCode::InsufficientStock,
                    format!("Insufficient stock for product {}", product.name),
                )
                .with_detail("productId", id)
                .with_detail("available", product.stock_quantity)
                .with_detail("requested", qty));
            }
            products.push(product.clone());
        }
        Ok(products)
    }

    /// Reserve stock for every line, all-or-nothing
    ///
    /// Runs under a single write guard. Each successful decrement is staged
    /// on a committed list; if a later line fails (stale read relative to
    /// the earlier availability pass, or a duplicate product across lines),
    /// every staged decrement is compensated before returning, leaving zero
    /// observable change.
    pub fn reserve(&self, lines: &[ReservationLine]) -> AppResult<()> {
        let mut inner = self.inner.write();
        let mut committed: Vec<ReservationLine> = Vec::with_capacity(lines.len());

        for &(id, qty) in lines {
            let failure = match inner.find_mut(id) {
                None => Some(AppError::with_message(
                    ErrorCode::ReservationFailed,
                    format!("Product {} disappeared during reservation", id),
                )),
                Some(product) if !product.active => Some(AppError::with_message(
                    ErrorCode::ReservationFailed,
                    format!("Product {} became inactive during reservation", product.name),
                )),
                Some(product) => match product.stock_quantity.checked_sub(qty) {
                    Some(remaining) => {
                        product.stock_quantity = remaining;
                        committed.push((id, qty));
                        None
                    }
                    None => Some(
                        AppError::with_message(
                            ErrorCode::InsufficientStock,
                            format!("Insufficient stock for product {}", product.name),
                        )
                        .with_detail("productId", id),
                    ),
                },
            };

            if let Some(err) = failure {
                // Compensate staged decrements in reverse
                for &(cid, cqty) in committed.iter().rev() {
                    if let Some(product) = inner.find_mut(cid) {
                        product.stock_quantity += cqty;
                    }
                }
                return Err(err);
            }
        }

        Ok(())
    }

    /// Release previously reserved stock (order cancel/delete)
    pub fn release(&self, lines: &[ReservationLine]) {
        for &(id, qty) in lines {
            if !self.increment_stock(id, qty) {
                // Only reachable if the product was deleted after its last
                // referencing order left the active set
                tracing::warn!(product_id = id, qty, "release for missing product");
            }
        }
    }
}
