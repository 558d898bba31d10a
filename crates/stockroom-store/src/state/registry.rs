//! # Product Registry
//!
//! Owns the authoritative in-memory product list and the seed
//! category list.
//!
//! ## Thread Safety
//! The product list is wrapped in `Arc<Mutex<T>>` because:
//! 1. The presentation layer and the withdrawal workflow both hold
//!    clones of the registry
//! 2. Only one caller may mutate the list at a time
//! 3. Withdrawal confirmation needs a validate-then-decrement sequence
//!    that no other mutation may interleave with
//!
//! ## Registry Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Product Registry Operations                            │
//! │                                                                         │
//! │  Front End Action          Registry Call           State Change         │
//! │  ────────────────          ─────────────           ────────────         │
//! │                                                                         │
//! │  Submit create form ─────► add_product() ────────► push, id = max+1    │
//! │                                                                         │
//! │  Submit edit form ───────► update_product() ─────► patch merge         │
//! │                                                                         │
//! │  Click delete ───────────► delete_product() ─────► retain(!= id)       │
//! │                                                                         │
//! │  Type in search box ─────► search_products() ────► (read only)         │
//! │                                                                         │
//! │  Confirm withdrawal ─────► commit_withdrawal() ──► all-or-nothing      │
//! │                            (workflow only)         stock decrement      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Weak Validation, By Contract
//! `update_product` and `delete_product` treat a missing id as a no-op
//! and still toast success. That mirrors how the console smooths over
//! stale-id races in the UI. The no-op case is surfaced internally as
//! a debug log so it stays observable without changing the no-crash
//! contract.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::debug;

use stockroom_core::{
    CartItem, Category, CoreError, CoreResult, NewProduct, Product, ProductPatch, ALL_CATEGORIES,
};

use crate::notify::Notifier;

struct RegistryInner {
    products: Vec<Product>,
    categories: Vec<Category>,
}

/// The product registry service object.
///
/// Cheap to clone; all clones share the same underlying state.
#[derive(Clone)]
pub struct ProductRegistry {
    inner: Arc<Mutex<RegistryInner>>,
    notifier: Arc<dyn Notifier>,
}

impl ProductRegistry {
    /// Creates a registry seeded with the given catalog.
    pub fn new(
        products: Vec<Product>,
        categories: Vec<Category>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        ProductRegistry {
            inner: Arc::new(Mutex::new(RegistryInner {
                products,
                categories,
            })),
            notifier,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RegistryInner> {
        self.inner.lock().expect("Registry mutex poisoned")
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Returns a snapshot of the full product list, in insertion order.
    pub fn products(&self) -> Vec<Product> {
        self.lock().products.clone()
    }

    /// Returns the immutable seed category list.
    pub fn categories(&self) -> Vec<Category> {
        self.lock().categories.clone()
    }

    /// Returns the product with the given id, if present.
    ///
    /// This is the live-stock lookup the withdrawal workflow uses -
    /// always prefer it over a cart snapshot when checking quantities.
    pub fn get_product(&self, id: u32) -> Option<Product> {
        self.lock().products.iter().find(|p| p.id == id).cloned()
    }

    /// Case-insensitive substring search against name OR description.
    ///
    /// An empty or whitespace-only query returns the unfiltered list.
    pub fn search_products(&self, query: &str) -> Vec<Product> {
        let inner = self.lock();
        let query = query.trim();
        if query.is_empty() {
            return inner.products.clone();
        }

        let needle = query.to_lowercase();
        inner
            .products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    /// Exact-match category filter.
    ///
    /// The sentinel [`ALL_CATEGORIES`] returns the unfiltered list.
    pub fn filter_by_category(&self, category: &str) -> Vec<Product> {
        let inner = self.lock();
        if category == ALL_CATEGORIES {
            return inner.products.clone();
        }

        inner
            .products
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect()
    }

    /// All products at or below their reorder threshold, in registry
    /// (insertion) order - not an independently sorted view.
    pub fn low_stock_products(&self) -> Vec<Product> {
        self.lock()
            .products
            .iter()
            .filter(|p| p.is_low_stock())
            .cloned()
            .collect()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a new product and returns it.
    ///
    /// The id is `max(existing ids) + 1`, or 1 when the registry is
    /// empty. Both timestamps are stamped to now. Never fails: the
    /// form has already validated the payload
    /// (see `stockroom_core::validation`).
    pub fn add_product(&self, data: NewProduct) -> Product {
        let mut inner = self.lock();

        let id = inner.products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let now = Utc::now();
        let product = Product {
            id,
            name: data.name,
            description: data.description,
            category: data.category,
            stock: data.stock,
            min_stock: data.min_stock,
            location: data.location,
            price_cents: data.price_cents,
            image: data.image,
            created_at: now,
            updated_at: now,
        };

        debug!(id, name = %product.name, "product added");
        inner.products.push(product.clone());
        drop(inner);

        self.notifier.success("Product added successfully");
        product
    }

    /// Merges a patch into the matching product and refreshes
    /// `updated_at`.
    ///
    /// Silently no-ops when the id is not found; the success toast is
    /// emitted regardless (weak validation, intentional).
    pub fn update_product(&self, id: u32, patch: ProductPatch) {
        let mut inner = self.lock();

        match inner.products.iter_mut().find(|p| p.id == id) {
            Some(product) => {
                patch.apply_to(product);
                product.updated_at = Utc::now();
                debug!(id, "product updated");
            }
            None => debug!(id, "update for missing product, no-op"),
        }
        drop(inner);

        self.notifier.success("Product updated successfully");
    }

    /// Removes the product with the given id.
    ///
    /// No-op when absent; the success toast is emitted regardless.
    pub fn delete_product(&self, id: u32) {
        let mut inner = self.lock();

        let before = inner.products.len();
        inner.products.retain(|p| p.id != id);
        if inner.products.len() == before {
            debug!(id, "delete for missing product, no-op");
        } else {
            debug!(id, "product deleted");
        }
        drop(inner);

        self.notifier.success("Product deleted successfully");
    }

    /// Adds `delta` (may be negative) to the product's stock and
    /// refreshes `updated_at`.
    ///
    /// Low-level primitive: no clamping to zero and no rejection of
    /// negative results. Callers (the withdrawal workflow) are
    /// responsible for pre-validating sufficient stock. No
    /// notification is emitted.
    pub fn update_stock(&self, id: u32, delta: i64) {
        let mut inner = self.lock();

        if let Some(product) = inner.products.iter_mut().find(|p| p.id == id) {
            product.stock += delta;
            product.updated_at = Utc::now();
            debug!(id, delta, stock = product.stock, "stock adjusted");
        }
    }

    // =========================================================================
    // Withdrawal Commit (workflow only)
    // =========================================================================

    /// Validates every line item against live stock and, only if all
    /// pass, applies the decrements - inside a single critical
    /// section.
    ///
    /// All-or-nothing: on the first failing line nothing has been
    /// decremented and the error describes which product failed. No
    /// stock change can interleave between the check and the apply.
    pub(crate) fn commit_withdrawal(&self, items: &[CartItem]) -> CoreResult<()> {
        let mut inner = self.lock();

        // Precheck every line against current live stock
        for item in items {
            let product = inner
                .products
                .iter()
                .find(|p| p.id == item.product_id)
                .ok_or(CoreError::ProductNotFound(item.product_id))?;

            if item.quantity > product.stock {
                return Err(CoreError::InsufficientStock {
                    name: product.name.clone(),
                    available: product.stock,
                    requested: item.quantity,
                });
            }
        }

        // All lines validated; apply the decrements
        let now = Utc::now();
        for item in items {
            if let Some(product) = inner.products.iter_mut().find(|p| p.id == item.product_id) {
                product.stock -= item.quantity;
                product.updated_at = now;
            }
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
