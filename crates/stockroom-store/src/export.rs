//! # Spreadsheet Export Collaborator
//!
//! Writes a uniform table of records to a single-sheet `.xlsx`
//! workbook - the console's "download report" action.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Export Contract                                     │
//! │                                                                         │
//! │  ExportTable (column labels + uniform rows)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  export_to_excel(table, dir, "stock_report_20260305")                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  <dir>/stock_report_20260305.xlsx                                       │
//! │    • one sheet ("Data")                                                 │
//! │    • row 0 = column labels                                              │
//! │    • column width = max(label len, longest cell len) + 2                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Workbook, XlsxError};
use thiserror::Error;
use tracing::info;

/// Name of the single worksheet in every export.
const SHEET_NAME: &str = "Data";

/// Padding added to computed column widths, in characters.
const COLUMN_PAD: usize = 2;

// =============================================================================
// Table Model
// =============================================================================

/// A single spreadsheet cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Int(i64),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Character length of the displayed value, for column sizing.
    fn display_len(&self) -> usize {
        match self {
            Cell::Text(s) => s.chars().count(),
            Cell::Int(n) => n.to_string().len(),
        }
    }
}

/// A uniform table of records: ordered column labels plus rows whose
/// cells line up with those labels.
#[derive(Debug, Clone, Default)]
pub struct ExportTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl ExportTable {
    pub fn new(columns: Vec<&str>) -> Self {
        ExportTable {
            columns: columns.into_iter().map(String::from).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row.
    ///
    /// ## Panics
    /// When the cell count does not match the column count. Width
    /// uniformity is what lets the write loop and the width
    /// computation index rows by column.
    pub fn push_row(&mut self, row: Vec<Cell>) {
        assert_eq!(row.len(), self.columns.len(), "row width mismatch");
        self.rows.push(row);
    }

    /// Computed width for each column: the longer of the label and the
    /// longest cell, plus a fixed pad.
    fn column_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(col, label)| {
                let widest_cell = self
                    .rows
                    .iter()
                    .map(|row| row[col].display_len())
                    .max()
                    .unwrap_or(0);
                label.chars().count().max(widest_cell) + COLUMN_PAD
            })
            .collect()
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Spreadsheet export failures.
///
/// The only store operation with a real I/O failure mode; surfaced to
/// the user as a toast like everything else.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Spreadsheet error: {0}")]
    Workbook(#[from] XlsxError),
}

// =============================================================================
// Export
// =============================================================================

/// Writes `table` to `<dir>/<filename>.xlsx` and returns the path.
///
/// `filename` is given without its extension, per the export
/// contract.
pub fn export_to_excel(
    table: &ExportTable,
    dir: &Path,
    filename: &str,
) -> Result<PathBuf, ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, label) in table.columns.iter().enumerate() {
        worksheet.write_string(0, col as u16, label)?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let excel_row = (row_idx + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                Cell::Text(s) => worksheet.write_string(excel_row, col as u16, s)?,
                Cell::Int(n) => worksheet.write_number(excel_row, col as u16, *n as f64)?,
            };
        }
    }

    for (col, width) in table.column_widths().into_iter().enumerate() {
        worksheet.set_column_width(col as u16, width as f64)?;
    }

    let path = dir.join(format!("{filename}.xlsx"));
    workbook.save(&path)?;

    info!(path = %path.display(), rows = table.rows.len(), "report exported");
    Ok(path)
}

// =============================================================================
// Unit Tests
// =============================================================================
