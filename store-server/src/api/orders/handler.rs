//! Order API Handlers
//!
//! Thin wrappers over [`crate::orders::OrderWorkflow`]; all business rules
//! (validation order, atomic reservation, status machine) live there.

use axum::extract::{Path, Query, State};
use http::StatusCode;

use crate::api::extract::Json;
use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{Order, OrderCreate, OrderFilter, StatusUpdate};

/// POST /api/orders - place an order
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let order = state.workflow.create(&payload)?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/orders - list orders with optional filters
pub async fn list(
    State(state): State<ServerState>,
    Query(filter): Query<OrderFilter>,
) -> AppResult<Json<Vec<Order>>> {
    Ok(Json(state.workflow.list(&filter)))
}

/// GET /api/orders/{id} - fetch a single order
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
) -> AppResult<Json<Order>> {
    Ok(Json(state.workflow.get(id)?))
}

/// PATCH /api/orders/{id}/status - advance along the forward table
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
    Json(payload): Json<StatusUpdate>,
) -> AppResult<Json<Order>> {
    Ok(Json(state.workflow.update_status(id, &payload.status)?))
}

/// PATCH /api/orders/{id}/cancel - cancel and restore stock
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
) -> AppResult<Json<Order>> {
    Ok(Json(state.workflow.cancel(id)?))
}

/// DELETE /api/orders/{id} - delete a pending order and restore stock
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
) -> AppResult<StatusCode> {
    state.workflow.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
