//! # Report Building
//!
//! Turns store snapshots into the flat record tables the export
//! collaborator writes out. Two reports exist: current stock (one row
//! per product) and withdrawals (one row per withdrawal *line item*).

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use stockroom_core::{Product, Withdrawal};

use crate::datefmt::{format_date, DateStyle};
use crate::export::{Cell, ExportTable};

// =============================================================================
// Filters
// =============================================================================

/// Filters withdrawals to an inclusive date range.
///
/// `end` extends to the end of that day, so a withdrawal made at
/// 23:59 on the end date is included. `None` bounds are open.
pub fn filter_by_date_range(
    withdrawals: &[Withdrawal],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<Withdrawal> {
    let start_bound: Option<DateTime<Utc>> =
        start.map(|d| Utc.from_utc_datetime(&d.and_hms_opt(0, 0, 0).expect("valid midnight")));
    let end_bound: Option<DateTime<Utc>> = end.map(|d| {
        Utc.from_utc_datetime(&d.and_hms_milli_opt(23, 59, 59, 999).expect("valid end of day"))
    });

    withdrawals
        .iter()
        .filter(|w| {
            if let Some(start) = start_bound {
                if w.created_at < start {
                    return false;
                }
            }
            if let Some(end) = end_bound {
                if w.created_at > end {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect()
}

// =============================================================================
// Stock Report
// =============================================================================

/// One row per product: stock picture at the moment of export.
pub fn stock_report(products: &[Product]) -> ExportTable {
    let mut table = ExportTable::new(vec![
        "Name",
        "Description",
        "Category",
        "Stock",
        "Min Stock",
        "Low Stock",
        "Location",
        "Price",
        "Last Updated",
    ]);

    for product in products {
        table.push_row(vec![
            Cell::text(&product.name),
            Cell::text(&product.description),
            Cell::text(&product.category),
            Cell::Int(product.stock),
            Cell::Int(product.min_stock),
            Cell::text(if product.is_low_stock() { "Yes" } else { "No" }),
            Cell::text(&product.location),
            Cell::text(product.price().to_string()),
            Cell::text(format_date(product.updated_at, DateStyle::Full)),
        ]);
    }

    table
}

/// Default filename for a stock report exported now (no extension).
pub fn stock_report_filename(now: DateTime<Utc>) -> String {
    format!("stock_report_{}", format_date(now, DateStyle::Simple))
}

// =============================================================================
// Withdrawals Report
// =============================================================================

/// One row per withdrawal line item, flattened across all
/// withdrawals. Product columns come from the frozen line snapshot -
/// the report shows what was actually taken, not the product's current
/// state.
pub fn withdrawals_report(withdrawals: &[Withdrawal]) -> ExportTable {
    let mut table = ExportTable::new(vec![
        "Withdrawal ID",
        "Date",
        "Time",
        "User",
        "Section",
        "Product",
        "Category",
        "Quantity",
        "Notes",
    ]);

    for withdrawal in withdrawals {
        for item in &withdrawal.items {
            table.push_row(vec![
                Cell::Int(withdrawal.id as i64),
                Cell::text(format_date(withdrawal.created_at, DateStyle::Full)),
                Cell::text(format_date(withdrawal.created_at, DateStyle::Time)),
                Cell::text(&withdrawal.user_name),
                Cell::text(&withdrawal.user_section),
                Cell::text(&item.snapshot.name),
                Cell::text(&item.snapshot.category),
                Cell::Int(item.quantity),
                Cell::text(withdrawal.notes.as_deref().unwrap_or("N/A")),
            ]);
        }
    }

    table
}

/// Default filename for a withdrawals report exported now (no
/// extension).
pub fn withdrawals_report_filename(now: DateTime<Utc>) -> String {
    format!("withdrawals_report_{}", format_date(now, DateStyle::Simple))
}

// =============================================================================
// Unit Tests
// =============================================================================
