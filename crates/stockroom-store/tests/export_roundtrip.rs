//! Export round-trip: a table written to .xlsx reads back with the
//! same column labels and cell values.

use calamine::{open_workbook, Data, Reader, Xlsx};
use chrono::{TimeZone, Utc};

use stockroom_core::{CartItem, Product, Withdrawal};
use stockroom_store::export::{export_to_excel, Cell};
use stockroom_store::report::{
    stock_report, stock_report_filename, withdrawals_report, withdrawals_report_filename,
};

fn product(id: u32, name: &str, stock: i64) -> Product {
    let now = Utc.with_ymd_and_hms(2026, 3, 5, 10, 0, 0).unwrap();
    Product {
        id,
        name: name.to_string(),
        description: format!("{name} for the workshop"),
        category: "Tools".to_string(),
        stock,
        min_stock: 2,
        location: "A-1".to_string(),
        price_cents: 1250,
        image: None,
        created_at: now,
        updated_at: now,
    }
}

/// Reads a cell back as a display string, collapsing calamine's
/// number representation.
fn cell_to_string(data: &Data) -> String {
    match data {
        Data::String(s) => s.clone(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        other => other.to_string(),
    }
}

fn expected_string(cell: &Cell) -> String {
    match cell {
        Cell::Text(s) => s.clone(),
        Cell::Int(n) => n.to_string(),
    }
}

#[test]
fn stock_report_round_trips_labels_and_values() {
    let products = vec![
        product(1, "Claw Hammer", 10),
        product(2, "Bolt", 1), // low stock row
    ];
    let table = stock_report(&products);

    let dir = tempfile::tempdir().unwrap();
    let now = Utc.with_ymd_and_hms(2026, 3, 5, 12, 0, 0).unwrap();
    let path = export_to_excel(&table, dir.path(), &stock_report_filename(now)).unwrap();
    assert_eq!(path.file_name().unwrap(), "stock_report_20260305.xlsx");

    let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
    let range = workbook.worksheet_range("Data").unwrap();
    let mut rows = range.rows();

    // Header row carries the column labels (order-insensitive check)
    let header: Vec<String> = rows.next().unwrap().iter().map(cell_to_string).collect();
    for label in &table.columns {
        assert!(header.contains(label), "missing column label {label}");
    }

    // Data rows preserve order and values
    for (read_row, expected_row) in rows.zip(&table.rows) {
        let read: Vec<String> = read_row.iter().map(cell_to_string).collect();
        let expected: Vec<String> = expected_row.iter().map(expected_string).collect();
        assert_eq!(read, expected);
    }
    assert_eq!(range.height(), table.rows.len() + 1);
}

#[test]
fn withdrawals_report_round_trips() {
    let hammer = product(1, "Claw Hammer", 10);
    let withdrawal = Withdrawal {
        id: 1,
        items: vec![CartItem::new(&hammer, 3)],
        total_items: 3,
        user_id: 1,
        user_name: "Admin User".to_string(),
        user_section: "IT".to_string(),
        notes: Some("bench 3".to_string()),
        created_at: Utc.with_ymd_and_hms(2026, 3, 5, 14, 30, 0).unwrap(),
    };
    let table = withdrawals_report(&[withdrawal]);

    let dir = tempfile::tempdir().unwrap();
    let now = Utc.with_ymd_and_hms(2026, 3, 5, 15, 0, 0).unwrap();
    let path = export_to_excel(&table, dir.path(), &withdrawals_report_filename(now)).unwrap();

    let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
    let range = workbook.worksheet_range("Data").unwrap();

    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][0], "1");
    assert_eq!(rows[1][1], "March 5, 2026");
    assert_eq!(rows[1][2], "14:30");
    assert_eq!(rows[1][5], "Claw Hammer");
    assert_eq!(rows[1][7], "3");
    assert_eq!(rows[1][8], "bench 3");
}
