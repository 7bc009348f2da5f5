//! Cell-level cleaning shared by the source normalizers.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::RawRow;

static LEADING_CURRENCY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[$€£]").unwrap());

/// Fetch a raw cell by source column name; an absent column reads as an
/// empty cell, which every parser below treats as missing.
pub fn cell<'a>(row: &'a RawRow, column: &str) -> &'a str {
    row.get(column).map(String::as_str).unwrap_or("")
}

/// Parse a monetary cell, stripping a leading currency symbol and comma
/// group separators first. Failures come back as missing, never as zero;
/// the fill step decides what missing means.
pub fn clean_currency(raw: &str) -> Option<f64> {
    let stripped = LEADING_CURRENCY.replace(raw, "");
    parse_numeric(&stripped.replace(',', ""))
}

/// Parse a plain numeric cell; empty or malformed cells are missing
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Try each candidate layout in priority order and take the first match.
/// A cell matching none of them is a missing date.
pub fn parse_date_any(raw: &str, layouts: &[&str]) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    layouts
        .iter()
        .find_map(|layout| NaiveDate::parse_from_str(trimmed, layout).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_cleaning_strips_symbol_and_separators() {
        assert_eq!(clean_currency("$1,234.56"), Some(1234.56));
        assert_eq!(clean_currency("  $500.00"), Some(500.0));
        assert_eq!(clean_currency("€2,000"), Some(2000.0));
        assert_eq!(clean_currency("750.25"), Some(750.25));
    }

    #[test]
    fn test_currency_failures_are_missing_not_zero() {
        assert_eq!(clean_currency(""), None);
        assert_eq!(clean_currency("n/a"), None);
        assert_eq!(clean_currency("$"), None);
    }

    #[test]
    fn test_numeric_parsing() {
        assert_eq!(parse_numeric("42"), Some(42.0));
        assert_eq!(parse_numeric(" 3.5 "), Some(3.5));
        assert_eq!(parse_numeric(""), None);
        assert_eq!(parse_numeric("abc"), None);
        // "NaN" parses as a float but is not a usable metric value
        assert_eq!(parse_numeric("NaN"), None);
    }

    #[test]
    fn test_mixed_layouts_resolve_to_same_date() {
        let layouts = &["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y"];
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15);

        assert_eq!(parse_date_any("2024-01-15", layouts), expected);
        assert_eq!(parse_date_any("15-01-2024", layouts), expected);
        assert_eq!(parse_date_any("15/01/2024", layouts), expected);
    }

    #[test]
    fn test_ambiguous_day_month_resolves_day_first() {
        let layouts = &["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y"];

        // 05-01 could be Jan 5 or May 1; the layout list has no
        // month-first entry, so day-first wins
        assert_eq!(
            parse_date_any("05-01-2024", layouts),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
    }

    #[test]
    fn test_unparseable_dates_are_missing() {
        let layouts = &["%Y-%m-%d"];

        assert_eq!(parse_date_any("", layouts), None);
        assert_eq!(parse_date_any("yesterday", layouts), None);
        assert_eq!(parse_date_any("2024-13-01", layouts), None);
    }

    #[test]
    fn test_absent_column_reads_as_empty() {
        let row = RawRow::new();
        assert_eq!(cell(&row, "Cost"), "");
    }
}
