//! Shared types for the Storefront service
//!
//! Wire models and error types used by the store server and its clients:
//! product/order entities, request payloads, query filters, and the unified
//! error module with HTTP status mapping.

pub mod error;
pub mod models;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{Order, OrderStatus, Product};
