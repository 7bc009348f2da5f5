use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("source file for '{source_name}' not found: {path}")]
    MissingSourceFile { source_name: String, path: PathBuf },

    #[error("no input data: none of the normalized source files exist")]
    NoInputData,

    #[error("unknown source: {0}")]
    UnknownSource(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
