use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::constants;
use crate::error::{PipelineError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub sources: SourcesConfig,
    pub align: AlignConfig,
    pub merge: MergeConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub search: SourceFiles,
    pub social: SourceFiles,
    pub video: SourceFiles,
}

/// Raw input file and normalized output file for one source
#[derive(Debug, Clone, Deserialize)]
pub struct SourceFiles {
    pub input: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AlignConfig {
    /// Most recent date the sibling datasets span. The social source's
    /// historical window is shifted so its maximum date lands here.
    pub anchor_date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    pub output: PathBuf,
    pub summary: PathBuf,
}

impl PipelineConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: PipelineConfig = toml::from_str(&config_content)?;
        Ok(config)
    }

    /// An explicit path must exist; otherwise `config.toml` is used when
    /// present, and built-in defaults apply when it is not.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let fallback = Path::new("config.toml");
                if fallback.exists() {
                    Self::load(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

impl SourcesConfig {
    /// Look up the file pair for a source name
    pub fn files_for(&self, source_id: &str) -> Option<&SourceFiles> {
        match source_id {
            constants::SEARCH_SOURCE => Some(&self.search),
            constants::SOCIAL_SOURCE => Some(&self.social),
            constants::VIDEO_SOURCE => Some(&self.video),
            _ => None,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sources: SourcesConfig::default(),
            align: AlignConfig::default(),
            merge: MergeConfig::default(),
        }
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            search: SourceFiles {
                input: PathBuf::from("data/raw/search_ads.csv"),
                output: PathBuf::from("data/clean/search_clean.csv"),
            },
            social: SourceFiles {
                input: PathBuf::from("data/raw/social_ads.csv"),
                output: PathBuf::from("data/clean/social_clean.csv"),
            },
            video: SourceFiles {
                input: PathBuf::from("data/raw/video.csv"),
                output: PathBuf::from("data/clean/video_clean.csv"),
            },
        }
    }
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            anchor_date: NaiveDate::from_ymd_opt(2024, 11, 30).unwrap(),
        }
    }
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("data/final/ads_combined.csv"),
            summary: PathBuf::from("data/final/run_summary.json"),
        }
    }
}
