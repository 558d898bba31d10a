//! # Sample Data Store
//!
//! Static seed catalog used to initialize the stores. All state lives
//! in memory for the lifetime of the process; this is what it starts
//! from.

use chrono::Utc;
use stockroom_core::{Category, Product, Role, User};

/// Credentials of the single valid sample account.
///
/// Placeholder policy: the real credential check lives behind
/// [`crate::state::CredentialGate`] so a real backend can replace it
/// without touching callers.
pub const SAMPLE_EMAIL: &str = "admin@example.com";
pub const SAMPLE_PASSWORD: &str = "password";

/// The single sample user the credential gate accepts.
pub fn sample_user() -> User {
    User {
        id: 1,
        name: "Admin User".to_string(),
        email: SAMPLE_EMAIL.to_string(),
        role: Role::Admin,
        section: "IT".to_string(),
    }
}

/// Immutable seed category list.
pub fn sample_categories() -> Vec<Category> {
    ["Tools", "Electrical", "Safety", "Cleaning", "Office"]
        .iter()
        .enumerate()
        .map(|(i, name)| Category {
            id: (i + 1) as u32,
            name: name.to_string(),
        })
        .collect()
}

/// Seed product catalog.
///
/// A couple of entries start at or below their reorder threshold so
/// the low-stock view has content out of the box.
pub fn sample_products() -> Vec<Product> {
    let now = Utc::now();

    let rows: Vec<(&str, &str, &str, i64, i64, &str, i64)> = vec![
        (
            "Claw Hammer",
            "16oz fiberglass handle claw hammer",
            "Tools",
            24,
            6,
            "A-01",
            1299,
        ),
        (
            "Phillips Screwdriver Set",
            "Set of 6 magnetic-tip screwdrivers",
            "Tools",
            4,
            5,
            "A-02",
            1850,
        ),
        (
            "Extension Cord 10m",
            "Grounded 10 meter extension cord",
            "Electrical",
            15,
            4,
            "B-03",
            2499,
        ),
        (
            "LED Work Light",
            "Rechargeable 2000 lumen work light",
            "Electrical",
            7,
            3,
            "B-04",
            3999,
        ),
        (
            "Safety Goggles",
            "Anti-fog clear safety goggles",
            "Safety",
            30,
            10,
            "C-01",
            899,
        ),
        (
            "Nitrile Gloves Box",
            "Box of 100 disposable nitrile gloves",
            "Safety",
            8,
            8,
            "C-02",
            1450,
        ),
        (
            "Floor Cleaner 5L",
            "Concentrated neutral floor cleaner",
            "Cleaning",
            12,
            4,
            "D-01",
            1099,
        ),
        (
            "Copy Paper Ream",
            "A4 80gsm white copy paper, 500 sheets",
            "Office",
            40,
            12,
            "E-01",
            549,
        ),
    ];

    rows.into_iter()
        .enumerate()
        .map(
            |(i, (name, description, category, stock, min_stock, location, price_cents))| {
                Product {
                    id: (i + 1) as u32,
                    name: name.to_string(),
                    description: description.to_string(),
                    category: category.to_string(),
                    stock,
                    min_stock,
                    location: location.to_string(),
                    price_cents,
                    image: None,
                    created_at: now,
                    updated_at: now,
                }
            },
        )
        .collect()
}
