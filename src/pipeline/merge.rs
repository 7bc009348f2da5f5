//! Row-wise fan-in of the normalized per-source tables.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::error::{PipelineError, Result};
use crate::pipeline::io;
use crate::types::CanonicalRecord;

/// Result of concatenating whichever normalized tables were present
#[derive(Debug)]
pub struct MergeOutcome {
    pub rows: Vec<CanonicalRecord>,
    pub sources_merged: Vec<String>,
    pub sources_skipped: Vec<String>,
}

/// Concatenate the given normalized tables in order, preserving each
/// source's row order. An absent file is skipped with a warning; zero
/// readable sources is a hard error, distinct from an empty result.
/// Metric gaps in the inputs read as 0 (see `CanonicalRecord`), so the
/// merged rows carry no missing metrics regardless of upstream state.
pub fn merge_normalized(inputs: &[(String, PathBuf)]) -> Result<MergeOutcome> {
    let mut rows = Vec::new();
    let mut sources_merged = Vec::new();
    let mut sources_skipped = Vec::new();

    for (source_id, path) in inputs {
        if !path.exists() {
            warn!(
                "Normalized file for '{}' not found at {}; skipping",
                source_id,
                path.display()
            );
            sources_skipped.push(source_id.clone());
            continue;
        }

        let table = io::read_normalized_table(path)?;
        info!("Merging {} rows from '{}'", table.len(), source_id);
        rows.extend(table);
        sources_merged.push(source_id.clone());
    }

    if sources_merged.is_empty() {
        return Err(PipelineError::NoInputData);
    }

    Ok(MergeOutcome {
        rows,
        sources_merged,
        sources_skipped,
    })
}
