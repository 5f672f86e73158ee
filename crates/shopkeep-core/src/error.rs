//! # Error Types
//!
//! Domain-specific error types for shopkeep-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  shopkeep-core errors (this file)                                   │
//! │  ├── CoreError        - Business rule violations                    │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  shopkeep-store errors (separate crate)                             │
//! │  └── StoreError       - File persistence and hashing failures       │
//! │                                                                     │
//! │  CLI errors (in app)                                                │
//! │  └── CliError         - Terminal-level failures (closed stdin)      │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → StoreError → CLI message       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (username, product id, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message the menu loop
//!    prints before re-prompting - none of these abort the process

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. The menu loop catches
/// them, prints the message, and continues - no crash, no rollback beyond
/// "nothing was mutated".
#[derive(Debug, Error)]
pub enum CoreError {
    /// Username is already taken.
    ///
    /// ## When This Occurs
    /// - Registration with a username that exists in the account file
    #[error("Username '{0}' already exists")]
    DuplicateUsername(String),

    /// Role choice is missing or not one of the accepted roles.
    ///
    /// ## When This Occurs
    /// - A non-first registration without a valid 'admin'/'user' choice
    #[error("Invalid role '{0}': expected 'admin' or 'user'")]
    InvalidRole(String),

    /// Caller lacks the role required for the operation.
    ///
    /// ## When This Occurs
    /// - A non-admin account calls add_stock
    #[error("Permission denied: only admin can {action}")]
    PermissionDenied { action: &'static str },

    /// Product id is not present in the inventory.
    #[error("Product not found: {0}")]
    ProductNotFound(u32),

    /// Checkout was attempted with no cart lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// Insufficient stock to complete checkout.
    ///
    /// ## When This Occurs
    /// - Cart lines (summed per product id) request more than on hand
    ///
    /// ## User Workflow
    /// ```text
    /// Checkout (cart wants qty 5)
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { product_id: 1, available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// CLI shows: "Insufficient stock for Cola: available 3, requested 5"
    /// ```
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: u32,
        name: String,
        available: i64,
        requested: i64,
    },

    /// Discount is outside the [0%, 100%] range.
    #[error("Discount must be between 0% and 100% (got {bps} basis points)")]
    InvalidDiscount { bps: u32 },

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: &'static str },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            product_id: 1,
            name: "Cola".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Cola: available 3, requested 5"
        );

        let err = CoreError::DuplicateUsername("alice".to_string());
        assert_eq!(err.to_string(), "Username 'alice' already exists");

        let err = CoreError::PermissionDenied { action: "add stock" };
        assert_eq!(err.to_string(), "Permission denied: only admin can add stock");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required { field: "username" };
        assert_eq!(err.to_string(), "username is required");

        let err = ValidationError::MustBePositive { field: "quantity" };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required { field: "username" };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
