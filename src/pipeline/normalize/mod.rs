//! Source-specific normalization into the canonical schema.

pub mod fields;
pub mod normalizers;
pub mod registry;

// Re-export the main components
pub use normalizers::{SearchAdsNormalizer, SocialAdsNormalizer, VideoNormalizer};
pub use registry::NormalizerRegistry;

use tracing::debug;

use crate::types::{CanonicalRecord, Platform, RawRow, StagedRecord};

/// Trait for normalizing one source's raw rows into the canonical schema
pub trait SourceNormalizer {
    /// Unique identifier for this source (config, CLI, and registry key)
    fn source_id(&self) -> &'static str;

    /// Human-readable name for logs
    fn name(&self) -> &str;

    /// Platform literal stamped on every canonical row
    fn platform(&self) -> Platform;

    /// Remap one raw row onto the staged shape: canonical field names,
    /// the date parsed, metrics coerced with failure-as-missing.
    fn stage(&self, row: &RawRow) -> StagedRecord;

    /// Column-level adjustment after staging and before row filtering.
    /// Returns the applied day shift for sources that realign their dates.
    fn align(&self, _staged: &mut [StagedRecord]) -> Option<i64> {
        None
    }
}

/// Result of running one normalizer over a raw table
#[derive(Debug)]
pub struct NormalizeOutcome {
    pub records: Vec<CanonicalRecord>,
    pub rows_read: usize,
    pub rows_dropped: usize,
    pub shift_days: Option<i64>,
}

/// Drive a normalizer through the fixed step order: stage every row,
/// align the date column, drop rows without a parsed date, fill missing
/// metrics, and project onto the canonical columns. Coercion always
/// happens inside `stage`, so the fill step never sees raw string
/// artifacts.
pub fn run_normalizer(normalizer: &dyn SourceNormalizer, rows: &[RawRow]) -> NormalizeOutcome {
    let rows_read = rows.len();

    let mut staged: Vec<StagedRecord> = rows.iter().map(|row| normalizer.stage(row)).collect();
    let shift_days = normalizer.align(&mut staged);

    let platform = normalizer.platform();
    let records: Vec<CanonicalRecord> = staged
        .into_iter()
        .filter_map(|row| row.into_canonical(platform))
        .collect();

    let rows_dropped = rows_read - records.len();
    if rows_dropped > 0 {
        debug!(
            "Dropped {} of {} rows with unparseable dates from '{}'",
            rows_dropped,
            rows_read,
            normalizer.source_id()
        );
    }

    NormalizeOutcome {
        records,
        rows_read,
        rows_dropped,
        shift_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    struct FixedNormalizer;

    impl SourceNormalizer for FixedNormalizer {
        fn source_id(&self) -> &'static str {
            "fixed"
        }

        fn name(&self) -> &str {
            "Fixed Normalizer"
        }

        fn platform(&self) -> Platform {
            Platform::Video
        }

        fn stage(&self, row: &RawRow) -> StagedRecord {
            StagedRecord {
                date: row
                    .get("when")
                    .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()),
                campaign_id: row.get("id").cloned().unwrap_or_default(),
                impressions: Some(1.0),
                ..StagedRecord::default()
            }
        }
    }

    fn raw(id: &str, when: &str) -> RawRow {
        RawRow::from([
            ("id".to_string(), id.to_string()),
            ("when".to_string(), when.to_string()),
        ])
    }

    #[test]
    fn test_driver_drops_only_dateless_rows() {
        let rows = vec![
            raw("a", "2024-05-01"),
            raw("b", "not a date"),
            raw("c", "2024-05-03"),
        ];

        let outcome = run_normalizer(&FixedNormalizer, &rows);

        assert_eq!(outcome.rows_read, 3);
        assert_eq!(outcome.rows_dropped, 1);
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.shift_days, None);
        assert!(outcome
            .records
            .iter()
            .all(|record| record.platform == Platform::Video));
    }

    #[test]
    fn test_driver_accepts_empty_table() {
        let outcome = run_normalizer(&FixedNormalizer, &[]);

        assert_eq!(outcome.rows_read, 0);
        assert_eq!(outcome.rows_dropped, 0);
        assert!(outcome.records.is_empty());
    }
}
