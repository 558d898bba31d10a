//! # Aggregate Statistics
//!
//! Pure functions over store snapshots that feed the dashboard and
//! statistics views. Everything here is computed on demand; nothing
//! is cached.

use std::collections::HashMap;

use stockroom_core::{Money, Product, Withdrawal};

/// Display label for withdrawn products that no longer exist.
const UNKNOWN_PRODUCT: &str = "Unknown product";

// =============================================================================
// Overview
// =============================================================================

/// The dashboard's headline numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub total_products: usize,
    /// Distinct category labels actually in use on products.
    pub total_categories: usize,
    pub low_stock_count: usize,
    pub total_withdrawals: usize,
    /// Sum of `total_items` across all withdrawals.
    pub total_items_withdrawn: i64,
    /// Sum of unit price × on-hand stock across the catalog.
    pub inventory_value: Money,
}

/// Computes the headline numbers from current snapshots.
pub fn overview(products: &[Product], withdrawals: &[Withdrawal]) -> Overview {
    let mut categories: Vec<&str> = products.iter().map(|p| p.category.as_str()).collect();
    categories.sort_unstable();
    categories.dedup();

    Overview {
        total_products: products.len(),
        total_categories: categories.len(),
        low_stock_count: products.iter().filter(|p| p.is_low_stock()).count(),
        total_withdrawals: withdrawals.len(),
        total_items_withdrawn: withdrawals.iter().map(|w| w.total_items).sum(),
        inventory_value: products.iter().map(|p| p.price() * p.stock).sum(),
    }
}

// =============================================================================
// Breakdowns
// =============================================================================

/// Product counts per category, sorted most-populated first, capped
/// at `top`.
pub fn category_breakdown(products: &[Product], top: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for product in products {
        *counts.entry(product.category.as_str()).or_default() += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    // Count desc, name asc for a stable display order
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(top);
    ranked
}

/// A product ranked by total quantity withdrawn.
#[derive(Debug, Clone, PartialEq)]
pub struct TopProduct {
    pub product_id: u32,
    /// Current product name, or a placeholder when the product has
    /// since been deleted.
    pub name: String,
    pub quantity: i64,
}

/// The most-withdrawn products across all history, capped at `top`.
///
/// Names resolve against the *current* catalog; quantities come from
/// the historical line items.
pub fn top_withdrawn_products(
    withdrawals: &[Withdrawal],
    products: &[Product],
    top: usize,
) -> Vec<TopProduct> {
    let mut totals: HashMap<u32, i64> = HashMap::new();
    for withdrawal in withdrawals {
        for item in &withdrawal.items {
            *totals.entry(item.product_id).or_default() += item.quantity;
        }
    }

    let mut ranked: Vec<TopProduct> = totals
        .into_iter()
        .map(|(product_id, quantity)| TopProduct {
            product_id,
            name: products
                .iter()
                .find(|p| p.id == product_id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string()),
            quantity,
        })
        .collect();
    ranked.sort_by(|a, b| b.quantity.cmp(&a.quantity).then_with(|| a.product_id.cmp(&b.product_id)));
    ranked.truncate(top);
    ranked
}

/// Items withdrawn per requesting section, sorted largest first.
pub fn section_breakdown(withdrawals: &[Withdrawal]) -> Vec<(String, i64)> {
    let mut totals: HashMap<&str, i64> = HashMap::new();
    for withdrawal in withdrawals {
        *totals.entry(withdrawal.user_section.as_str()).or_default() += withdrawal.total_items;
    }

    let mut ranked: Vec<(String, i64)> = totals
        .into_iter()
        .map(|(name, total)| (name.to_string(), total))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

// =============================================================================
// Recency
// =============================================================================

/// The `top` most recently created products, newest first.
pub fn recent_products(products: &[Product], top: usize) -> Vec<Product> {
    let mut sorted = products.to_vec();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted.truncate(top);
    sorted
}

/// The `top` most recent withdrawals, newest first.
pub fn recent_withdrawals(withdrawals: &[Withdrawal], top: usize) -> Vec<Withdrawal> {
    let mut sorted = withdrawals.to_vec();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted.truncate(top);
    sorted
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use stockroom_core::CartItem;

    fn product(id: u32, name: &str, category: &str, stock: i64, price_cents: i64) -> Product {
        let now = Utc::now() + Duration::seconds(id as i64);
        Product {
            id,
            name: name.to_string(),
            description: String::new(),
            category: category.to_string(),
            stock,
            min_stock: 1,
            location: String::new(),
            price_cents,
            image: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn withdrawal(id: u32, section: &str, items: Vec<CartItem>) -> Withdrawal {
        let total_items = items.iter().map(|i| i.quantity).sum();
        Withdrawal {
            id,
            items,
            total_items,
            user_id: 1,
            user_name: "Admin User".to_string(),
            user_section: section.to_string(),
            notes: None,
            created_at: Utc::now() + Duration::seconds(id as i64),
        }
    }

    #[test]
    fn test_overview() {
        let products = vec![
            product(1, "Hammer", "Tools", 2, 1000),
            product(2, "Bolt", "Tools", 0, 50),
            product(3, "Goggles", "Safety", 5, 800),
        ];
        let p = &products[0];
        let withdrawals = vec![
            withdrawal(1, "IT", vec![CartItem::new(p, 2)]),
            withdrawal(2, "Maintenance", vec![CartItem::new(p, 3)]),
        ];

        let stats = overview(&products, &withdrawals);
        assert_eq!(stats.total_products, 3);
        assert_eq!(stats.total_categories, 2);
        assert_eq!(stats.low_stock_count, 1); // only Bolt (0 <= 1)
        assert_eq!(stats.total_withdrawals, 2);
        assert_eq!(stats.total_items_withdrawn, 5);
        // 2×$10.00 + 0×$0.50 + 5×$8.00 = $60.00
        assert_eq!(stats.inventory_value, Money::from_cents(6000));
    }

    #[test]
    fn test_category_breakdown_sorted_and_capped() {
        let products = vec![
            product(1, "A", "Tools", 1, 100),
            product(2, "B", "Tools", 1, 100),
            product(3, "C", "Safety", 1, 100),
            product(4, "D", "Office", 1, 100),
        ];

        let ranked = category_breakdown(&products, 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0], ("Tools".to_string(), 2));
    }

    #[test]
    fn test_top_withdrawn_products_handles_deleted_product() {
        let hammer = product(1, "Hammer", "Tools", 10, 100);
        let ghost = product(99, "Ghost", "Tools", 10, 100);
        let withdrawals = vec![
            withdrawal(1, "IT", vec![CartItem::new(&hammer, 2), CartItem::new(&ghost, 7)]),
            withdrawal(2, "IT", vec![CartItem::new(&hammer, 3)]),
        ];

        // Catalog no longer contains the ghost product
        let catalog = vec![hammer];
        let ranked = top_withdrawn_products(&withdrawals, &catalog, 5);

        assert_eq!(ranked[0].quantity, 7);
        assert_eq!(ranked[0].name, UNKNOWN_PRODUCT);
        assert_eq!(ranked[1].name, "Hammer");
        assert_eq!(ranked[1].quantity, 5);
    }

    #[test]
    fn test_section_breakdown() {
        let p = product(1, "Hammer", "Tools", 10, 100);
        let withdrawals = vec![
            withdrawal(1, "IT", vec![CartItem::new(&p, 1)]),
            withdrawal(2, "Maintenance", vec![CartItem::new(&p, 4)]),
            withdrawal(3, "IT", vec![CartItem::new(&p, 2)]),
        ];

        let ranked = section_breakdown(&withdrawals);
        assert_eq!(ranked[0], ("Maintenance".to_string(), 4));
        assert_eq!(ranked[1], ("IT".to_string(), 3));
    }

    #[test]
    fn test_recent_products_newest_first() {
        let products = vec![
            product(1, "Old", "Tools", 1, 100),
            product(2, "Mid", "Tools", 1, 100),
            product(3, "New", "Tools", 1, 100),
        ];

        let recent = recent_products(&products, 2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].name, "New");
        assert_eq!(recent[1].name, "Mid");
    }
}
