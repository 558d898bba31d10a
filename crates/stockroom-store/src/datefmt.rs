//! Display date formatting shared by reports and exports.

use chrono::{DateTime, Utc};

/// The three display styles the console uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// Long form for report cells, e.g. `March 5, 2026`.
    Full,
    /// Time of day, e.g. `14:30`.
    Time,
    /// Compact form for filenames, e.g. `20260305`.
    Simple,
}

/// Formats a timestamp in the given style.
pub fn format_date(dt: DateTime<Utc>, style: DateStyle) -> String {
    match style {
        DateStyle::Full => dt.format("%B %-d, %Y").to_string(),
        DateStyle::Time => dt.format("%H:%M").to_string(),
        DateStyle::Simple => dt.format("%Y%m%d").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_styles() {
        let dt = Utc.with_ymd_and_hms(2026, 3, 5, 14, 30, 0).unwrap();
        assert_eq!(format_date(dt, DateStyle::Full), "March 5, 2026");
        assert_eq!(format_date(dt, DateStyle::Time), "14:30");
        assert_eq!(format_date(dt, DateStyle::Simple), "20260305");
    }
}
