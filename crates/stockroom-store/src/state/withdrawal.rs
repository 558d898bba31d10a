//! # Withdrawal Workflow
//!
//! Owns the cart of pending withdrawal lines and the confirmed
//! withdrawal history.
//!
//! ## Cart State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │        add_to_cart                confirm_withdrawal                    │
//! │  Empty ───────────► Building ───────────────────────► Empty            │
//! │    ▲                   │  ▲                              │              │
//! │    │    clear_cart     │  │  failed confirmation         │              │
//! │    └───────────────────┘  └──────(toast, cart kept)──────┘              │
//! │                                                                         │
//! │  There is no terminal error state: a failed confirmation returns        │
//! │  to Building with a toast, never an exception.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot vs Live Stock
//! Cart lines carry a frozen product snapshot for display, but every
//! quantity decision here goes through the registry's live lookup.
//! The snapshot is never consulted for stock.
//!
//! ## Lock Ordering
//! Workflow lock first, then registry lock (inside
//! `commit_withdrawal`). Registry methods never call back into the
//! workflow, so the order cannot invert.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::{debug, info};

use stockroom_core::{CartItem, CoreError, CoreResult, Product, Withdrawal};

use crate::notify::Notifier;
use crate::state::registry::ProductRegistry;
use crate::state::session::SessionStore;

struct WorkflowInner {
    cart: Vec<CartItem>,
    withdrawals: Vec<Withdrawal>,
}

/// The withdrawal workflow service object.
///
/// Cheap to clone; all clones share the same cart and history.
#[derive(Clone)]
pub struct WithdrawalWorkflow {
    registry: ProductRegistry,
    session: SessionStore,
    inner: Arc<Mutex<WorkflowInner>>,
    notifier: Arc<dyn Notifier>,
}

impl WithdrawalWorkflow {
    pub fn new(
        registry: ProductRegistry,
        session: SessionStore,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        WithdrawalWorkflow {
            registry,
            session,
            inner: Arc::new(Mutex::new(WorkflowInner {
                cart: Vec::new(),
                withdrawals: Vec::new(),
            })),
            notifier,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, WorkflowInner> {
        self.inner.lock().expect("Workflow mutex poisoned")
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Returns a snapshot of the current cart lines.
    pub fn cart(&self) -> Vec<CartItem> {
        self.lock().cart.clone()
    }

    /// Returns the withdrawal history, most recent first.
    pub fn withdrawals(&self) -> Vec<Withdrawal> {
        self.lock().withdrawals.clone()
    }

    /// Sum of current cart quantities, recomputed on every read.
    pub fn cart_total_items(&self) -> i64 {
        self.lock().cart.iter().map(|i| i.quantity).sum()
    }

    // =========================================================================
    // Cart Mutations
    // =========================================================================

    /// Adds a product to the cart, or accumulates quantity onto the
    /// existing line for the same product.
    ///
    /// ## Rejections (cart unchanged, error toast)
    /// - `quantity <= 0`
    /// - `quantity` exceeds the product's current stock
    /// - the *combined* quantity of an existing line exceeds current
    ///   stock (reject, don't clamp)
    pub fn add_to_cart(&self, product: &Product, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            return self.reject(CoreError::InvalidQuantity {
                requested: quantity,
            });
        }

        if quantity > product.stock {
            return self.reject(CoreError::InsufficientStock {
                name: product.name.clone(),
                available: product.stock,
                requested: quantity,
            });
        }

        let mut inner = self.lock();
        match inner.cart.iter_mut().find(|i| i.product_id == product.id) {
            Some(item) => {
                let combined = item.quantity + quantity;
                if combined > product.stock {
                    drop(inner);
                    return self.reject(CoreError::InsufficientStock {
                        name: product.name.clone(),
                        available: product.stock,
                        requested: combined,
                    });
                }
                item.quantity = combined;
                debug!(product_id = product.id, quantity = combined, "cart line accumulated");
            }
            None => {
                inner.cart.push(CartItem::new(product, quantity));
                debug!(product_id = product.id, quantity, "cart line added");
            }
        }
        drop(inner);

        self.notifier
            .success(&format!("{} added to cart", product.name));
        Ok(())
    }

    /// Removes the line for the given product, if present.
    ///
    /// No-op when absent; the success toast is emitted regardless
    /// (same weak-validation pattern as product deletion).
    pub fn remove_from_cart(&self, product_id: u32) {
        let mut inner = self.lock();
        let before = inner.cart.len();
        inner.cart.retain(|i| i.product_id != product_id);
        if inner.cart.len() == before {
            debug!(product_id, "remove for missing cart line, no-op");
        }
        drop(inner);

        self.notifier.success("Product removed from cart");
    }

    /// Sets a cart line's quantity exactly (replace, not increment).
    ///
    /// Looks up the *current* product via the registry, never the
    /// snapshot. `quantity <= 0` delegates to [`Self::remove_from_cart`].
    pub fn update_cart_item_quantity(&self, product_id: u32, quantity: i64) -> CoreResult<()> {
        // Live lookup before taking the cart lock
        let Some(product) = self.registry.get_product(product_id) else {
            return self.reject(CoreError::ProductNotFound(product_id));
        };

        if quantity <= 0 {
            self.remove_from_cart(product_id);
            return Ok(());
        }

        if quantity > product.stock {
            return self.reject(CoreError::InsufficientStock {
                name: product.name,
                available: product.stock,
                requested: quantity,
            });
        }

        let mut inner = self.lock();
        if let Some(item) = inner.cart.iter_mut().find(|i| i.product_id == product_id) {
            item.quantity = quantity;
            debug!(product_id, quantity, "cart line quantity set");
        }
        Ok(())
    }

    /// Empties the cart unconditionally. No notification.
    pub fn clear_cart(&self) {
        self.lock().cart.clear();
        debug!("cart cleared");
    }

    // =========================================================================
    // Confirmation
    // =========================================================================

    /// Confirms the pending withdrawal - the only multi-step
    /// transactional operation in the system.
    ///
    /// ## Sequence
    /// 1. Requires an authenticated user
    /// 2. Requires a non-empty cart
    /// 3. Re-validates every line against the registry's *current*
    ///    stock and applies the decrements, all inside one registry
    ///    critical section - all-or-nothing, nothing interleaves
    /// 4. Builds the immutable record (user id/name/section copied at
    ///    this moment), id assigned `max + 1`
    /// 5. Prepends to history, clears the cart, toasts success
    ///
    /// On any failure the cart is left untouched and the error is
    /// toasted; the workflow simply returns to Building.
    pub fn confirm_withdrawal(&self, notes: Option<String>) -> CoreResult<Withdrawal> {
        let Some(user) = self.session.current_user() else {
            return self.reject(CoreError::NotAuthenticated);
        };

        let mut inner = self.lock();
        if inner.cart.is_empty() {
            drop(inner);
            return self.reject(CoreError::EmptyCart);
        }

        // Validate-then-decrement happens inside the registry's own
        // critical section while we hold the cart lock, so neither the
        // cart nor the stock can change under us.
        if let Err(err) = self.registry.commit_withdrawal(&inner.cart) {
            drop(inner);
            return self.reject(err);
        }

        let total_items = inner.cart.iter().map(|i| i.quantity).sum();
        let id = inner.withdrawals.iter().map(|w| w.id).max().unwrap_or(0) + 1;
        let withdrawal = Withdrawal {
            id,
            items: std::mem::take(&mut inner.cart),
            total_items,
            user_id: user.id,
            user_name: user.name,
            user_section: user.section,
            notes,
            created_at: Utc::now(),
        };

        // Most-recent-first history
        inner.withdrawals.insert(0, withdrawal.clone());
        drop(inner);

        info!(
            withdrawal_id = withdrawal.id,
            total_items,
            "withdrawal confirmed"
        );
        self.notifier.success("Withdrawal confirmed successfully");
        Ok(withdrawal)
    }

    /// Toasts the error and hands it back with state untouched.
    fn reject<T>(&self, err: CoreError) -> CoreResult<T> {
        self.notifier.error(&err.to_string());
        Err(err)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use crate::seed::{sample_categories, sample_user};
    use crate::state::session::MemorySessionStorage;
    use stockroom_core::NewProduct;

    fn setup(authed: bool) -> (ProductRegistry, WithdrawalWorkflow, Arc<RecordingNotifier>) {
        let notifier = RecordingNotifier::new();
        let registry = ProductRegistry::new(vec![], sample_categories(), notifier.clone());
        let storage = Arc::new(MemorySessionStorage::default());
        if authed {
            storage.seed(sample_user());
        }
        let session = SessionStore::for_tests(storage, notifier.clone());
        let workflow = WithdrawalWorkflow::new(registry.clone(), session, notifier.clone());
        (registry, workflow, notifier)
    }

    fn widget(registry: &ProductRegistry, stock: i64) -> stockroom_core::Product {
        registry.add_product(NewProduct {
            name: "Widget".to_string(),
            description: "A widget".to_string(),
            category: "Tools".to_string(),
            stock,
            min_stock: 2,
            location: "A-1".to_string(),
            price_cents: 1000,
            image: None,
        })
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        let (registry, workflow, _) = setup(true);
        let product = widget(&registry, 5);

        assert!(workflow.add_to_cart(&product, 0).is_err());
        assert!(workflow.add_to_cart(&product, -1).is_err());
        assert!(workflow.cart().is_empty());
    }

    #[test]
    fn test_add_rejects_quantity_over_stock() {
        let (registry, workflow, notifier) = setup(true);
        let product = widget(&registry, 5);

        let err = workflow.add_to_cart(&product, 6).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { .. }));
        assert!(workflow.cart().is_empty());
        assert_eq!(notifier.errors().len(), 1);
    }

    #[test]
    fn test_add_twice_accumulates_like_a_single_add() {
        let (registry, workflow, _) = setup(true);
        let product = widget(&registry, 5);

        workflow.add_to_cart(&product, 2).unwrap();
        workflow.add_to_cart(&product, 3).unwrap();

        let cart = workflow.cart();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].quantity, 5);
        assert_eq!(workflow.cart_total_items(), 5);
    }

    #[test]
    fn test_accumulation_over_stock_rejects_not_clamps() {
        let (registry, workflow, _) = setup(true);
        let product = widget(&registry, 5);

        workflow.add_to_cart(&product, 3).unwrap();
        let err = workflow.add_to_cart(&product, 3).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { .. }));

        // Cart must be at its pre-call state
        assert_eq!(workflow.cart()[0].quantity, 3);
    }

    #[test]
    fn test_remove_missing_line_is_noop_with_toast() {
        let (_, workflow, notifier) = setup(true);
        workflow.remove_from_cart(42);
        assert_eq!(notifier.toasts().len(), 1);
    }

    #[test]
    fn test_update_quantity_zero_behaves_like_remove() {
        let (registry, workflow, _) = setup(true);
        let product = widget(&registry, 5);

        workflow.add_to_cart(&product, 3).unwrap();
        workflow.update_cart_item_quantity(product.id, 0).unwrap();
        assert!(workflow.cart().is_empty());
    }

    #[test]
    fn test_update_quantity_replaces_not_increments() {
        let (registry, workflow, _) = setup(true);
        let product = widget(&registry, 5);

        workflow.add_to_cart(&product, 2).unwrap();
        workflow.update_cart_item_quantity(product.id, 4).unwrap();
        assert_eq!(workflow.cart()[0].quantity, 4);
    }

    #[test]
    fn test_update_quantity_checks_live_stock_not_snapshot() {
        let (registry, workflow, _) = setup(true);
        let product = widget(&registry, 5);
        workflow.add_to_cart(&product, 2).unwrap();

        // Stock drops after the snapshot was frozen
        registry.update_stock(product.id, -3); // live stock now 2

        let err = workflow
            .update_cart_item_quantity(product.id, 4)
            .unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { available: 2, .. }));
        // Snapshot still shows the old stock; it is display-only
        assert_eq!(workflow.cart()[0].snapshot.stock, 5);
    }

    #[test]
    fn test_update_quantity_for_deleted_product_fails() {
        let (registry, workflow, _) = setup(true);
        let product = widget(&registry, 5);
        workflow.add_to_cart(&product, 2).unwrap();

        registry.delete_product(product.id);
        let err = workflow
            .update_cart_item_quantity(product.id, 1)
            .unwrap_err();
        assert_eq!(err, CoreError::ProductNotFound(product.id));
    }

    #[test]
    fn test_confirm_requires_authentication() {
        let (registry, workflow, _) = setup(false);
        let product = widget(&registry, 5);
        workflow.add_to_cart(&product, 1).unwrap();

        let err = workflow.confirm_withdrawal(None).unwrap_err();
        assert_eq!(err, CoreError::NotAuthenticated);
        assert_eq!(workflow.cart().len(), 1);
    }

    #[test]
    fn test_confirm_requires_non_empty_cart() {
        let (_, workflow, _) = setup(true);
        let err = workflow.confirm_withdrawal(None).unwrap_err();
        assert_eq!(err, CoreError::EmptyCart);
    }

    #[test]
    fn test_confirm_happy_path() {
        let (registry, workflow, _) = setup(true);
        let product = widget(&registry, 5);
        workflow.add_to_cart(&product, 3).unwrap();

        let withdrawal = workflow
            .confirm_withdrawal(Some("for bench 3".to_string()))
            .unwrap();

        assert_eq!(withdrawal.id, 1);
        assert_eq!(withdrawal.total_items, 3);
        assert_eq!(withdrawal.user_name, "Admin User");
        assert_eq!(withdrawal.user_section, "IT");
        assert_eq!(withdrawal.notes.as_deref(), Some("for bench 3"));

        assert_eq!(registry.get_product(product.id).unwrap().stock, 2);
        assert!(workflow.cart().is_empty());
        assert_eq!(workflow.withdrawals()[0].id, 1);
    }

    #[test]
    fn test_confirm_is_all_or_nothing_when_stock_raced_away() {
        let (registry, workflow, _) = setup(true);
        let a = widget(&registry, 10);
        let b = registry.add_product(NewProduct {
            name: "Bolt".to_string(),
            description: "M8 bolt".to_string(),
            category: "Tools".to_string(),
            stock: 4,
            min_stock: 1,
            location: "A-2".to_string(),
            price_cents: 20,
            image: None,
        });

        workflow.add_to_cart(&a, 5).unwrap();
        workflow.add_to_cart(&b, 4).unwrap();

        // Someone else drains product b between add and confirm
        registry.update_stock(b.id, -2);

        let err = workflow.confirm_withdrawal(None).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { .. }));

        // NO stock decremented, NO record created, cart untouched
        assert_eq!(registry.get_product(a.id).unwrap().stock, 10);
        assert_eq!(registry.get_product(b.id).unwrap().stock, 2);
        assert!(workflow.withdrawals().is_empty());
        assert_eq!(workflow.cart().len(), 2);
    }

    #[test]
    fn test_history_is_most_recent_first() {
        let (registry, workflow, _) = setup(true);
        let product = widget(&registry, 10);

        workflow.add_to_cart(&product, 1).unwrap();
        workflow.confirm_withdrawal(None).unwrap();
        workflow.add_to_cart(&product, 2).unwrap();
        workflow.confirm_withdrawal(None).unwrap();

        let history = workflow.withdrawals();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, 2);
        assert_eq!(history[1].id, 1);
    }
}
