//! # Validation Module
//!
//! Input validation utilities for Shopkeep.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: CLI prompts                                               │
//! │  ├── Numeric parsing (re-prompt on garbage input)                   │
//! │  └── Immediate feedback before any store call                       │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE - business rule validation                    │
//! │  ├── Runs inside register / add_stock / add_line                    │
//! │  └── Guards the stores even if a new frontend skips layer 1         │
//! │                                                                     │
//! │  Defense in depth: both layers catch different mistakes             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::DiscountRate;
use crate::MAX_LINE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a username.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 50 characters
///
/// ## Example
/// ```rust
/// use shopkeep_core::validation::validate_username;
///
/// assert!(validate_username("alice").is_ok());
/// assert!(validate_username("   ").is_err());
/// ```
pub fn validate_username(username: &str) -> ValidationResult<()> {
    let username = username.trim();

    if username.is_empty() {
        return Err(ValidationError::Required { field: "username" });
    }

    if username.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "username",
            max: 50,
        });
    }

    Ok(())
}

/// Validates a password at registration time.
///
/// ## Rules
/// - Must not be empty
///
/// No length or complexity policy beyond that - matching the single-user
/// CLI scope (no lockout, no rate limiting either).
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required { field: "password" });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required { field: "name" });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name",
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value (cart line or stock addition).
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive { field: "quantity" });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity",
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a product price.
///
/// ## Rules
/// - Must be non-negative (zero is allowed: free items)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price",
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a discount rate.
///
/// ## Rules
/// - Must lie in [0, 10000] basis points, i.e. [0%, 100%]
///
/// Returns the dedicated [`CoreError::InvalidDiscount`] rather than a
/// generic range error: an out-of-range discount is a business rule
/// violation the operator needs to recognize immediately.
pub fn validate_discount(rate: DiscountRate) -> CoreResult<()> {
    if rate.bps() > 10_000 {
        return Err(CoreError::InvalidDiscount { bps: rate.bps() });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
