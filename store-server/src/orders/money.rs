//! Money calculation utilities using rust_decimal for precision
//!
//! Monetary values cross the wire as JSON numbers (`f64`) with at most two
//! fractional digits. All arithmetic happens on `Decimal`, rounded half-up
//! to two places, then converts back to `f64` for storage/serialization.

use rust_decimal::prelude::*;
use shared::error::{AppError, AppResult};

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed monetary value per field
const MAX_AMOUNT: f64 = 1_000_000.0;

/// Round a decimal to two places, half away from zero
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert a decimal back to the wire representation
pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Validate a monetary wire value and convert it to `Decimal`
///
/// Requires a finite, non-negative number within range, carrying at most
/// two fractional digits.
pub fn validate_amount(value: f64, field: &str) -> AppResult<Decimal> {
    if !value.is_finite() {
        return Err(AppError::validation(format!(
            "{} must be a finite number, got {}",
            field, value
        )));
    }
    if value < 0.0 {
        return Err(AppError::validation(format!(
            "{} must be non-negative, got {}",
            field, value
        )));
    }
    if value > MAX_AMOUNT {
        return Err(AppError::validation(format!(
            "{} exceeds maximum allowed ({}), got {}",
            field, MAX_AMOUNT, value
        )));
    }
    let decimal = Decimal::from_f64(value).ok_or_else(|| {
        AppError::validation(format!("{} is not representable as a decimal", field))
    })?;
    if round2(decimal) != decimal {
        return Err(AppError::validation(format!(
            "{} must have at most two decimal places, got {}",
            field, value
        )));
    }
    Ok(decimal)
}

/// quantity × unit price, rounded to two places
pub fn line_subtotal(quantity: u32, unit_price: Decimal) -> Decimal {
    round2(Decimal::from(quantity) * unit_price)
}
