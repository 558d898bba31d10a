//! # Domain Types
//!
//! Core domain types used throughout Stockroom.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   Withdrawal    │   │      User       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u32)       │   │  id (u32)       │   │  id (u32)       │       │
//! │  │  stock          │   │  items          │   │  email          │       │
//! │  │  min_stock      │   │  total_items    │   │  role           │       │
//! │  │  price_cents    │   │  user snapshot  │   │  section        │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    CartItem     │   │    Category     │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  product_id     │   │  id (u32)       │                             │
//! │  │  quantity       │   │  name           │                             │
//! │  │  snapshot       │   │  (seed only)    │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity Pattern
//! All ids are positive integers assigned by the owning store as
//! `max(existing) + 1` (1 for an empty store). Ids are never reused.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product tracked in the stockroom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier assigned by the registry. Never reused.
    pub id: u32,

    /// Display name shown in tables and reports.
    pub name: String,

    /// Free-text description, also matched by search.
    pub description: String,

    /// Category label. Free text, only required to match a seed
    /// category at creation time (form validation) - not enforced
    /// afterwards.
    pub category: String,

    /// Current on-hand quantity.
    pub stock: i64,

    /// Reorder threshold. `stock <= min_stock` flags the product.
    pub min_stock: i64,

    /// Physical location hint (shelf, aisle). Free text, may be empty.
    pub location: String,

    /// Unit price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Optional image URL/reference.
    pub image: Option<String>,

    /// When the product was created. Immutable after creation.
    pub created_at: DateTime<Utc>,

    /// When the product was last mutated, including pure stock
    /// adjustments.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// A product is low on stock when on-hand quantity has fallen to
    /// or below the reorder threshold (inclusive).
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.min_stock
    }
}

// =============================================================================
// New Product / Patch
// =============================================================================

/// Payload for creating a product.
///
/// Ids and timestamps are assigned by the registry, so callers never
/// provide them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub category: String,
    pub stock: i64,
    pub min_stock: i64,
    pub location: String,
    pub price_cents: i64,
    pub image: Option<String>,
}

/// Explicit patch for updating a product.
///
/// Every field the edit form may change is enumerated here; there is no
/// dynamic merge of arbitrary keys. `None` leaves the current value
/// untouched. `created_at` and `id` are deliberately absent - they are
/// immutable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub stock: Option<i64>,
    pub min_stock: Option<i64>,
    pub location: Option<String>,
    pub price_cents: Option<i64>,
    pub image: Option<String>,
}

impl ProductPatch {
    /// Merges this patch into `product`, field by field.
    ///
    /// Does NOT touch `updated_at` - the registry refreshes the
    /// timestamp itself so every mutation path stamps it the same way.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(description) = &self.description {
            product.description = description.clone();
        }
        if let Some(category) = &self.category {
            product.category = category.clone();
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(min_stock) = self.min_stock {
            product.min_stock = min_stock;
        }
        if let Some(location) = &self.location {
            product.location = location.clone();
        }
        if let Some(price_cents) = self.price_cents {
            product.price_cents = price_cents;
        }
        if let Some(image) = &self.image {
            product.image = Some(image.clone());
        }
    }
}

// =============================================================================
// Category
// =============================================================================

/// A product category.
///
/// Categories are an immutable seed list - there are no create, update,
/// or delete operations in this system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u32,
    pub name: String,
}

// =============================================================================
// Cart Item
// =============================================================================

/// A pending withdrawal line item.
///
/// ## Snapshot vs Live Stock
/// `snapshot` is a frozen copy of the product at the moment it was
/// added, used for display and for the final withdrawal record. It is
/// NOT re-synced if the product changes later. Quantity bounds are
/// always re-checked against the registry's *live* stock, never the
/// snapshot - keep the two paths separate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Id of the product being withdrawn (live-lookup key).
    pub product_id: u32,

    /// Requested quantity. Always a positive integer.
    pub quantity: i64,

    /// Frozen copy of the product at time of add (display only).
    pub snapshot: Product,
}

impl CartItem {
    /// Creates a line item freezing the product as passed.
    pub fn new(product: &Product, quantity: i64) -> Self {
        CartItem {
            product_id: product.id,
            quantity,
            snapshot: product.clone(),
        }
    }
}

// =============================================================================
// Withdrawal
// =============================================================================

/// A confirmed stock withdrawal.
///
/// Once created a withdrawal is immutable and is never deleted.
/// History accumulates most-recent-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Withdrawal {
    /// Unique identifier, monotonically assigned.
    pub id: u32,

    /// The cart's line items at confirmation time (value copy, not a
    /// live reference to the cart).
    pub items: Vec<CartItem>,

    /// Sum of item quantities, computed once at confirmation.
    pub total_items: i64,

    /// User id copied from the session at confirmation time.
    pub user_id: u32,

    /// User name copied from the session at confirmation time.
    pub user_name: String,

    /// User section copied from the session at confirmation time.
    pub user_section: String,

    /// Optional free-text notes.
    pub notes: Option<String>,

    /// Timestamp of confirmation.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// User & Role
// =============================================================================

/// Role of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

/// The authenticated session user.
///
/// Serialized as-is into the persisted session record, so the field
/// names here are the on-disk contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub section: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> Product {
        Product {
            id: 1,
            name: "Widget".to_string(),
            description: "A widget".to_string(),
            category: "Tools".to_string(),
            stock: 5,
            min_stock: 2,
            location: "A-1".to_string(),
            price_cents: 1099,
            image: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_low_stock_is_inclusive() {
        let mut product = widget();

        product.stock = 3;
        assert!(!product.is_low_stock());

        // stock == min_stock counts as low
        product.stock = 2;
        assert!(product.is_low_stock());

        product.stock = 0;
        assert!(product.is_low_stock());
    }

    #[test]
    fn test_patch_merges_only_present_fields() {
        let mut product = widget();
        let patch = ProductPatch {
            name: Some("Widget XL".to_string()),
            stock: Some(9),
            ..Default::default()
        };

        patch.apply_to(&mut product);

        assert_eq!(product.name, "Widget XL");
        assert_eq!(product.stock, 9);
        // Untouched fields keep their values
        assert_eq!(product.category, "Tools");
        assert_eq!(product.price_cents, 1099);
    }

    #[test]
    fn test_cart_item_freezes_snapshot() {
        let product = widget();
        let item = CartItem::new(&product, 3);

        assert_eq!(item.product_id, 1);
        assert_eq!(item.quantity, 3);
        assert_eq!(item.snapshot.name, "Widget");
        assert_eq!(item.snapshot.stock, 5);
    }

    #[test]
    fn test_user_session_record_shape() {
        let user = User {
            id: 1,
            name: "Admin User".to_string(),
            email: "admin@example.com".to_string(),
            role: Role::Admin,
            section: "IT".to_string(),
        };

        let json = serde_json::to_value(&user).unwrap();
        // On-disk session contract: these five keys, role lowercase
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Admin User");
        assert_eq!(json["email"], "admin@example.com");
        assert_eq!(json["role"], "admin");
        assert_eq!(json["section"], "IT");
    }
}
