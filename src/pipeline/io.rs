//! CSV read/write helpers for the pipeline's file hand-offs.

use std::fs;
use std::path::Path;

use crate::constants;
use crate::error::Result;
use crate::pipeline::kpi::DerivedRecord;
use crate::types::{CanonicalRecord, RawRow};

/// Read a raw source table into rows keyed by the source's own headers
pub fn read_raw_table(path: &Path) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Read a normalized table back in. Missing metric cells read as 0, which
/// is the merge stage's defensive fill.
pub fn read_normalized_table(path: &Path) -> Result<Vec<CanonicalRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Write a normalized table. The header row is always present, so an
/// empty table is still a valid, auditable file.
pub fn write_normalized_table(path: &Path, rows: &[CanonicalRecord]) -> Result<()> {
    ensure_parent_dir(path)?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(constants::CANONICAL_COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the final merged table: canonical columns plus the derived metrics
pub fn write_final_table(path: &Path, rows: &[DerivedRecord]) -> Result<()> {
    ensure_parent_dir(path)?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(
        constants::CANONICAL_COLUMNS
            .iter()
            .chain(constants::DERIVED_COLUMNS.iter()),
    )?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
