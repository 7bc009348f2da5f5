use std::collections::HashMap;

use chrono::NaiveDate;

use super::normalizers::{SearchAdsNormalizer, SocialAdsNormalizer, VideoNormalizer};
use super::SourceNormalizer;
use crate::constants;

/// Registry for source-specific normalization strategies
pub struct NormalizerRegistry {
    normalizers: HashMap<String, Box<dyn SourceNormalizer>>,
}

impl NormalizerRegistry {
    /// Create a registry with the three built-in platform normalizers.
    /// The anchor date parameterizes the social source's realignment.
    pub fn new(anchor_date: NaiveDate) -> Self {
        let mut normalizers: HashMap<String, Box<dyn SourceNormalizer>> = HashMap::new();

        normalizers.insert(
            constants::SEARCH_SOURCE.to_string(),
            Box::new(SearchAdsNormalizer::new()),
        );
        normalizers.insert(
            constants::SOCIAL_SOURCE.to_string(),
            Box::new(SocialAdsNormalizer::new(anchor_date)),
        );
        normalizers.insert(
            constants::VIDEO_SOURCE.to_string(),
            Box::new(VideoNormalizer::new()),
        );

        Self { normalizers }
    }

    /// Register a normalizer for a specific source
    pub fn register(&mut self, source_id: String, normalizer: Box<dyn SourceNormalizer>) {
        self.normalizers.insert(source_id, normalizer);
    }

    /// Get the normalizer for a source
    pub fn get(&self, source_id: &str) -> Option<&dyn SourceNormalizer> {
        self.normalizers.get(source_id).map(|n| n.as_ref())
    }

    /// List all registered source IDs
    pub fn list_sources(&self) -> Vec<&str> {
        self.normalizers.keys().map(|k| k.as_str()).collect()
    }
}
