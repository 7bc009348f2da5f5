use crate::constants;
use crate::pipeline::normalize::fields::{cell, parse_date_any, parse_numeric};
use crate::pipeline::normalize::SourceNormalizer;
use crate::types::{Platform, RawRow, StagedRecord};

const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d"];

/// Normalizer for the video platform export. Views and likes map onto
/// impressions and clicks; the paid-media columns do not exist on this
/// platform and are synthesized as constants so the canonical schema has
/// no optional columns.
pub struct VideoNormalizer;

impl VideoNormalizer {
    pub fn new() -> Self {
        Self
    }
}

impl SourceNormalizer for VideoNormalizer {
    fn source_id(&self) -> &'static str {
        constants::VIDEO_SOURCE
    }

    fn name(&self) -> &str {
        "Video Normalizer"
    }

    fn platform(&self) -> Platform {
        Platform::Video
    }

    fn stage(&self, row: &RawRow) -> StagedRecord {
        StagedRecord {
            date: parse_date_any(cell(row, "trending_date"), DATE_LAYOUTS),
            campaign_id: cell(row, "video_id").to_string(),
            impressions: parse_numeric(cell(row, "views")),
            clicks: parse_numeric(cell(row, "likes")),
            spend: Some(0.0),
            conversions: Some(0.0),
            revenue: Some(0.0),
        }
    }
}

impl Default for VideoNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::pipeline::normalize::run_normalizer;

    fn raw(date: &str, video_id: &str, views: &str, likes: &str) -> RawRow {
        RawRow::from([
            ("trending_date".to_string(), date.to_string()),
            ("video_id".to_string(), video_id.to_string()),
            ("views".to_string(), views.to_string()),
            ("likes".to_string(), likes.to_string()),
        ])
    }

    #[test]
    fn test_views_and_likes_map_to_impressions_and_clicks() {
        let outcome = run_normalizer(
            &VideoNormalizer::new(),
            &[raw("2024-11-01", "vid001", "100000", "2500")],
        );

        let record = &outcome.records[0];
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 11, 1).unwrap());
        assert_eq!(record.campaign_id, "vid001");
        assert_eq!(record.impressions, 100000.0);
        assert_eq!(record.clicks, 2500.0);
    }

    #[test]
    fn test_paid_media_columns_are_constant_zero() {
        let outcome = run_normalizer(
            &VideoNormalizer::new(),
            &[raw("2024-11-01", "vid001", "100000", "2500")],
        );

        let record = &outcome.records[0];
        assert_eq!(record.spend, 0.0);
        assert_eq!(record.conversions, 0.0);
        assert_eq!(record.revenue, 0.0);
    }

    #[test]
    fn test_day_first_dates_are_rejected() {
        // The video export is strictly ISO; a day-first cell is a bad row
        let outcome = run_normalizer(
            &VideoNormalizer::new(),
            &[raw("01-11-2024", "vid002", "10", "1")],
        );

        assert!(outcome.records.is_empty());
        assert_eq!(outcome.rows_dropped, 1);
    }
}
