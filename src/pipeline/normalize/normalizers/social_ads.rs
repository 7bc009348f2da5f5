use chrono::NaiveDate;

use crate::constants;
use crate::pipeline::align::TemporalAligner;
use crate::pipeline::normalize::fields::{cell, parse_date_any, parse_numeric};
use crate::pipeline::normalize::SourceNormalizer;
use crate::types::{Platform, RawRow, StagedRecord};

/// The social export uses one consistent day-first layout; only the
/// separator varies between exports.
const DATE_LAYOUTS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y"];

/// Normalizer for the social-ads platform export.
///
/// The export is a historical snapshot, so after staging, the whole date
/// column is shifted so its maximum lands on the configured anchor. This
/// keeps day-of-week patterns and spacing between campaigns intact while
/// moving the window onto the same reporting timeline as the sibling
/// sources.
pub struct SocialAdsNormalizer {
    aligner: TemporalAligner,
}

impl SocialAdsNormalizer {
    pub fn new(anchor_date: NaiveDate) -> Self {
        Self {
            aligner: TemporalAligner::new(anchor_date),
        }
    }
}

impl SourceNormalizer for SocialAdsNormalizer {
    fn source_id(&self) -> &'static str {
        constants::SOCIAL_SOURCE
    }

    fn name(&self) -> &str {
        "Social Ads Normalizer"
    }

    fn platform(&self) -> Platform {
        Platform::Social
    }

    fn stage(&self, row: &RawRow) -> StagedRecord {
        StagedRecord {
            date: parse_date_any(cell(row, "reporting_start"), DATE_LAYOUTS),
            campaign_id: cell(row, "campaign_id").to_string(),
            impressions: parse_numeric(cell(row, "impressions")),
            clicks: parse_numeric(cell(row, "clicks")),
            spend: parse_numeric(cell(row, "spent")),
            conversions: parse_numeric(cell(row, "approved_conversion")),
            // The platform reports no revenue; synthesized as a constant
            revenue: Some(0.0),
        }
    }

    fn align(&self, staged: &mut [StagedRecord]) -> Option<i64> {
        self.aligner.apply(staged)
    }
}
