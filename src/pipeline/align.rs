//! Temporal realignment of a historical date column onto the shared
//! reporting window.

use chrono::{Duration, NaiveDate};
use tracing::info;

use crate::types::StagedRecord;

/// Shifts an entire date column by a constant day offset so its maximum
/// lands on the configured anchor, preserving relative day spacing.
#[derive(Debug, Clone, Copy)]
pub struct TemporalAligner {
    anchor: NaiveDate,
}

impl TemporalAligner {
    pub fn new(anchor: NaiveDate) -> Self {
        Self { anchor }
    }

    /// Apply the shift in place and return the offset in days. Returns
    /// `None` when no date in the column parsed: the shift is undefined
    /// and realignment is skipped. Rows whose date is already missing
    /// stay missing; realignment never invents a date.
    pub fn apply(&self, staged: &mut [StagedRecord]) -> Option<i64> {
        let max = staged.iter().filter_map(|row| row.date).max()?;
        let shift = self.anchor.signed_duration_since(max).num_days();

        let mut shifted = 0usize;
        for row in staged.iter_mut() {
            if let Some(date) = row.date {
                row.date = Some(date + Duration::days(shift));
                shifted += 1;
            }
        }

        info!(
            "Realigned {} dates by {} days onto anchor {}",
            shifted, shift, self.anchor
        );
        Some(shift)
    }
}
