//! Product API Handlers

use axum::extract::{Path, Query, State};
use http::StatusCode;

use crate::api::extract::Json;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult, ErrorCode};
use crate::validation;
use shared::models::{Product, ProductCreate, ProductFilter, ProductUpdate};

/// GET /api/products - list products with optional filters
pub async fn list(
    State(state): State<ServerState>,
    Query(filter): Query<ProductFilter>,
) -> AppResult<Json<Vec<Product>>> {
    Ok(Json(state.products.list(&filter)))
}

/// GET /api/products/{id} - fetch a single product
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
) -> AppResult<Json<Product>> {
    let product = state.products.get(id).ok_or_else(|| {
        AppError::with_message(ErrorCode::ProductNotFound, format!("Product {} not found", id))
    })?;
    Ok(Json(product))
}

/// POST /api/products - create a product
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<(StatusCode, Json<Product>)> {
    validation::validate_product_create(&payload)?;

    let product = state.products.create(&payload);
    tracing::info!(product_id = product.id, name = %product.name, "product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// PATCH /api/products/{id} - partial update
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
    Json(patch): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    validation::validate_product_update(&patch)?;

    let product = state.products.update(id, &patch).ok_or_else(|| {
        AppError::with_message(ErrorCode::ProductNotFound, format!("Product {} not found", id))
    })?;
    Ok(Json(product))
}

/// DELETE /api/products/{id} - delete unless referenced by an active order
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
) -> AppResult<StatusCode> {
    if state.products.get(id).is_none() {
        return Err(AppError::with_message(
            ErrorCode::ProductNotFound,
            format!("Product {} not found", id),
        ));
    }
    if state.orders.references_product(id) {
        return Err(AppError::with_message(
            ErrorCode::ProductInUse,
            format!("Product {} is referenced by a non-cancelled order", id),
        ));
    }

    state.products.delete(id);
    Ok(StatusCode::NO_CONTENT)
}
