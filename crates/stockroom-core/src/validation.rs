//! # Validation Module
//!
//! Form-level validation rules for Stockroom.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation form                                            │
//! │  ├── THIS MODULE: field checks before a registry call                  │
//! │  └── Immediate user feedback per field                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Stores                                                       │
//! │  ├── Registry mutations trust validated input (add never fails)        │
//! │  └── Cart/withdrawal operations re-check live stock themselves         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The registry's `add_product` deliberately performs no checking of
//! its own (it never fails); these functions are the contract the form
//! fulfils before calling it.

use crate::error::ValidationError;
use crate::types::{Category, NewProduct, ProductPatch};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a category label against the seed category list.
///
/// Membership is only required here, at form time. The registry never
/// re-checks it - a product keeps whatever label it was created with
/// even if the label drifts from the seed list.
pub fn validate_category(name: &str, categories: &[Category]) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "category".to_string(),
        });
    }

    if !categories.iter().any(|c| c.name == name) {
        return Err(ValidationError::UnknownCategory {
            name: name.to_string(),
        });
    }

    Ok(())
}

/// Validates a stock level (on-hand or minimum).
///
/// ## Rules
/// - Must be non-negative; zero is allowed
pub fn validate_stock_level(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a price in cents as entered on the form.
///
/// ## Rules
/// - Must be strictly positive on create/edit
///
/// Existing products are never re-validated on read, so a zero price
/// that slipped in through seed data will still display.
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a cart quantity as entered by the user.
///
/// ## Rules
/// - Must be positive (> 0); stock-bound checks happen in the workflow
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Payload Validators
// =============================================================================

/// Validates a complete creation payload the way the product form does.
pub fn validate_new_product(product: &NewProduct, categories: &[Category]) -> ValidationResult<()> {
    validate_product_name(&product.name)?;
    validate_category(&product.category, categories)?;
    validate_stock_level("stock", product.stock)?;
    validate_stock_level("minimum stock", product.min_stock)?;
    validate_price_cents(product.price_cents)?;
    Ok(())
}

/// Validates the fields present on an edit patch.
///
/// Absent fields are skipped - the form only validates what the user
/// actually changed.
pub fn validate_patch(patch: &ProductPatch, categories: &[Category]) -> ValidationResult<()> {
    if let Some(name) = &patch.name {
        validate_product_name(name)?;
    }
    if let Some(category) = &patch.category {
        validate_category(category, categories)?;
    }
    if let Some(stock) = patch.stock {
        validate_stock_level("stock", stock)?;
    }
    if let Some(min_stock) = patch.min_stock {
        validate_stock_level("minimum stock", min_stock)?;
    }
    if let Some(price_cents) = patch.price_cents {
        validate_price_cents(price_cents)?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
