// Data processing pipeline: normalization, merge, and metric derivation

pub mod align;
pub mod io;
pub mod kpi;
pub mod merge;
pub mod normalize;

use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::config::PipelineConfig;
use crate::constants;
use crate::error::{PipelineError, Result};
use crate::pipeline::normalize::{run_normalizer, NormalizerRegistry};

/// Result of normalizing one source's raw file
#[derive(Debug, Serialize)]
pub struct NormalizeSummary {
    pub source_id: String,
    pub rows_read: usize,
    pub rows_kept: usize,
    pub rows_dropped: usize,
    /// Day offset applied by temporal realignment, for sources that use one
    pub shift_days: Option<i64>,
    pub output_file: String,
}

/// Result of the merge + metric derivation stage
#[derive(Debug, Serialize)]
pub struct MergeSummary {
    pub sources_merged: Vec<String>,
    pub sources_skipped: Vec<String>,
    pub rows: usize,
    pub output_file: String,
}

/// Result of a complete pipeline run
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub normalized: Vec<NormalizeSummary>,
    pub merge: MergeSummary,
}

/// Batch pipeline over the configured source files
pub struct Pipeline {
    config: PipelineConfig,
    registry: NormalizerRegistry,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let registry = NormalizerRegistry::new(config.align.anchor_date);
        Self { config, registry }
    }

    /// Normalize a single source's raw file into its canonical table
    #[instrument(skip(self))]
    pub fn normalize_source(&self, source_id: &str) -> Result<NormalizeSummary> {
        let normalizer = self
            .registry
            .get(source_id)
            .ok_or_else(|| PipelineError::UnknownSource(source_id.to_string()))?;
        let files = self
            .config
            .sources
            .files_for(source_id)
            .ok_or_else(|| PipelineError::UnknownSource(source_id.to_string()))?;

        if !files.input.exists() {
            return Err(PipelineError::MissingSourceFile {
                source_name: source_id.to_string(),
                path: files.input.clone(),
            });
        }

        info!(
            "{}: reading raw table from {}",
            normalizer.name(),
            files.input.display()
        );
        let raw_rows = io::read_raw_table(&files.input)?;
        let outcome = run_normalizer(normalizer, &raw_rows);
        io::write_normalized_table(&files.output, &outcome.records)?;

        info!(
            "Normalized '{}': kept {} of {} rows",
            source_id,
            outcome.records.len(),
            outcome.rows_read
        );

        Ok(NormalizeSummary {
            source_id: source_id.to_string(),
            rows_read: outcome.rows_read,
            rows_kept: outcome.records.len(),
            rows_dropped: outcome.rows_dropped,
            shift_days: outcome.shift_days,
            output_file: files.output.display().to_string(),
        })
    }

    /// Normalize the given sources. A source whose raw file is absent is
    /// skipped with a warning; the merge stage decides whether anything
    /// usable remains. Other failures abort the run.
    pub fn normalize_sources(&self, source_ids: &[String]) -> Result<Vec<NormalizeSummary>> {
        let mut summaries = Vec::new();

        for source_id in source_ids {
            match self.normalize_source(source_id) {
                Ok(summary) => summaries.push(summary),
                Err(PipelineError::MissingSourceFile { source_name, path }) => {
                    warn!(
                        "Raw file for '{}' not found at {}; skipping",
                        source_name,
                        path.display()
                    );
                }
                Err(PipelineError::UnknownSource(source)) => {
                    warn!("Unknown source '{}'; skipping", source);
                }
                Err(other) => return Err(other),
            }
        }

        Ok(summaries)
    }

    /// Merge whichever normalized tables exist and derive the KPI columns
    pub fn merge(&self) -> Result<MergeSummary> {
        let inputs: Vec<(String, PathBuf)> = constants::supported_sources()
            .into_iter()
            .filter_map(|source_id| {
                self.config
                    .sources
                    .files_for(source_id)
                    .map(|files| (source_id.to_string(), files.output.clone()))
            })
            .collect();

        let outcome = merge::merge_normalized(&inputs)?;
        let derived = kpi::derive_metrics(outcome.rows);
        io::write_final_table(&self.config.merge.output, &derived)?;

        info!(
            "Merged {} rows from {} sources into {}",
            derived.len(),
            outcome.sources_merged.len(),
            self.config.merge.output.display()
        );

        Ok(MergeSummary {
            sources_merged: outcome.sources_merged,
            sources_skipped: outcome.sources_skipped,
            rows: derived.len(),
            output_file: self.config.merge.output.display().to_string(),
        })
    }

    /// Full pipeline: normalize every requested source, then merge and
    /// derive. Writes a JSON run summary next to the final table.
    pub fn run(&self, source_ids: &[String]) -> Result<RunSummary> {
        let normalized = self.normalize_sources(source_ids)?;
        let merge = self.merge()?;

        let summary = RunSummary { normalized, merge };
        self.write_run_summary(&summary)?;
        Ok(summary)
    }

    fn write_run_summary(&self, summary: &RunSummary) -> Result<()> {
        let path = &self.config.merge.summary;
        io::ensure_parent_dir(path)?;
        std::fs::write(path, serde_json::to_string_pretty(summary)?)?;
        Ok(())
    }
}
