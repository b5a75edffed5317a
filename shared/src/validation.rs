//! Validation utilities for the retail inventory core

use rust_decimal::Decimal;
use validator::ValidationError;

use crate::types::DateRange;

// ============================================================================
// Product Validations
// ============================================================================

/// Prices are stored with two decimal places
pub const PRICE_SCALE: u32 = 2;

/// Validate that a product price is not negative and fits the stored scale.
///
/// Used as a `validator` custom rule on edit inputs. Finer prices are
/// rejected, never rounded.
pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        let mut error = ValidationError::new("negative_price");
        error.message = Some("Price cannot be negative".into());
        return Err(error);
    }
    if price.normalize().scale() > PRICE_SCALE {
        let mut error = ValidationError::new("price_precision");
        error.message = Some("Price cannot have more than 2 decimal places".into());
        return Err(error);
    }
    Ok(())
}

/// Validate that a text field has content once surrounding whitespace is removed
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("Value cannot be blank".into());
        return Err(error);
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate that a report range does not end before it starts
pub fn validate_date_range(range: &DateRange) -> Result<(), &'static str> {
    if !range.is_valid() {
        return Err("Start date must not be after end date");
    }
    Ok(())
}
