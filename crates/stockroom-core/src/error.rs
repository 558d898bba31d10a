//! # Error Types
//!
//! Domain-specific error types for stockroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockroom-core errors (this file)                                     │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Form input validation failures                 │
//! │                                                                         │
//! │  stockroom-store errors (separate crate)                               │
//! │  └── ExportError      - Spreadsheet export failures                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → Notifier toast → User             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, counts)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing toast message
//!
//! Nothing here is fatal: every variant is recovered locally by
//! notifying the user and leaving state unchanged.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business rule errors.
///
/// These errors represent rejected operations. They should be caught
/// and surfaced to the user; state is guaranteed unchanged when one is
/// returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Product id does not exist in the registry.
    ///
    /// ## When This Occurs
    /// - Cart quantity update for a product deleted after it was added
    /// - Withdrawal confirmation finding a stale cart line
    #[error("Product not found: {0}")]
    ProductNotFound(u32),

    /// Requested quantity exceeds current live stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Add to Cart (qty: 6)
    ///      │
    ///      ▼
    /// Live stock check: available=5
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Widget", available: 5, requested: 6 }
    ///      │
    ///      ▼
    /// Toast: "Only 5 units of Widget available"
    /// ```
    #[error("Only {available} units of {name} available (requested {requested})")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Cart quantity must be a positive integer.
    #[error("Quantity must be greater than 0 (got {requested})")]
    InvalidQuantity { requested: i64 },

    /// Withdrawal confirmation requires at least one cart line.
    #[error("The cart is empty")]
    EmptyCart,

    /// Withdrawal confirmation requires an authenticated user.
    #[error("You must be logged in to confirm a withdrawal")]
    NotAuthenticated,

    /// Login credentials were rejected.
    #[error("Incorrect credentials")]
    InvalidCredentials,

    /// A login attempt is already in flight; attempts are serialized.
    #[error("A login attempt is already in progress")]
    LoginInProgress,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Form input validation errors.
///
/// These occur when user input doesn't meet the product form's
/// requirements. Used for early validation before a registry mutation
/// runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be greater than 0")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Category does not match any seed category.
    #[error("Unknown category: {name}")]
    UnknownCategory { name: String },
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
            name: "Widget".to_string(),
            available: 5,
            requested: 6,
        };
        assert_eq!(
            err.to_string(),
            "Only 5 units of Widget available (requested 6)"
        );

        let err = CoreError::ProductNotFound(42);
        assert_eq!(err.to_string(), "Product not found: 42");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::UnknownCategory {
            name: "Gadgets".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown category: Gadgets");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "price".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
