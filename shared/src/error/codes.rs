//! Unified error codes for the Storefront service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Product errors
//! - 2xxx: Order errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Product ====================
    /// Product not found
    ProductNotFound = 1001,
    /// Product is inactive and cannot be ordered
    ProductInactive = 1002,
    /// Not enough stock to satisfy the request
    InsufficientStock = 1003,
    /// Product is referenced by a non-cancelled order
    ProductInUse = 1004,
    /// Update payload contains no fields
    EmptyUpdate = 1005,

    // ==================== 2xxx: Order ====================
    /// Order not found
    OrderNotFound = 2001,
    /// Order has already been cancelled
    OrderAlreadyCancelled = 2002,
    /// Order has already been delivered
    OrderAlreadyDelivered = 2003,
    /// Status transition is not allowed
    InvalidStatusTransition = 2004,
    /// Discount exceeds the order subtotal
    DiscountExceedsSubtotal = 2005,
    /// Stock reservation failed and was rolled back
    ReservationFailed = 2006,
    /// Only pending orders may be deleted
    OrderNotPending = 2007,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Configuration error
    ConfigError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default human-readable message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::InvalidFormat => "Invalid format",
            Self::RequiredField => "Required field missing",
            Self::ValueOutOfRange => "Value out of range",

            Self::ProductNotFound => "Product not found",
            Self::ProductInactive => "Product is inactive",
            Self::InsufficientStock => "Insufficient stock",
            Self::ProductInUse => "Product is referenced by an active order",
            Self::EmptyUpdate => "Update payload contains no fields",

            Self::OrderNotFound => "Order not found",
            Self::OrderAlreadyCancelled => "Order has already been cancelled",
            Self::OrderAlreadyDelivered => "Order has already been delivered",
            Self::InvalidStatusTransition => "Status transition not allowed",
            Self::DiscountExceedsSubtotal => "Discount cannot exceed subtotal",
            Self::ReservationFailed => "Stock reservation failed",
            Self::OrderNotPending => "Only pending orders may be deleted",

            Self::InternalError => "Internal server error",
            Self::ConfigError => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message(), self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code as u16
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Success),
            1 => Ok(Self::Unknown),
            2 => Ok(Self::ValidationFailed),
            3 => Ok(Self::NotFound),
            4 => Ok(Self::AlreadyExists),
            5 => Ok(Self::InvalidRequest),
            6 => Ok(Self::InvalidFormat),
            7 => Ok(Self::RequiredField),
            8 => Ok(Self::ValueOutOfRange),

            1001 => Ok(Self::ProductNotFound),
            1002 => Ok(Self::ProductInactive),
            1003 => Ok(Self::InsufficientStock),
            1004 => Ok(Self::ProductInUse),
            1005 => Ok(Self::EmptyUpdate),

            2001 => Ok(Self::OrderNotFound),
            2002 => Ok(Self::OrderAlreadyCancelled),
            2003 => Ok(Self::OrderAlreadyDelivered),
            2004 => Ok(Self::InvalidStatusTransition),
            2005 => Ok(Self::DiscountExceedsSubtotal),
            2006 => Ok(Self::ReservationFailed),
            2007 => Ok(Self::OrderNotPending),

            9001 => Ok(Self::InternalError),
            9002 => Ok(Self::ConfigError),

            _ => Err(format!("Unknown error code: {}", value)),
        }
    }
}
