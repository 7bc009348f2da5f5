use std::collections::HashMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Raw row as read from a source file, keyed by the source's own column names
pub type RawRow = HashMap<String, String>;

/// Advertising platforms feeding the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Search,
    Social,
    Video,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Search => "Search",
            Platform::Social => "Social",
            Platform::Video => "Video",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Intermediate row shape between column remap and gap filling.
///
/// `None` marks a missing field: absent from the source or rejected during
/// coercion. Missing metrics become 0.0 only at the fill step; a missing
/// date drops the row instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StagedRecord {
    pub date: Option<NaiveDate>,
    pub campaign_id: String,
    pub impressions: Option<f64>,
    pub clicks: Option<f64>,
    pub spend: Option<f64>,
    pub conversions: Option<f64>,
    pub revenue: Option<f64>,
}

impl StagedRecord {
    /// Project onto the canonical schema: derive the calendar fields and
    /// fill missing metrics with 0. Rows without a parsed date are not
    /// representable canonically and come back as `None`.
    pub fn into_canonical(self, platform: Platform) -> Option<CanonicalRecord> {
        let date = self.date?;

        Some(CanonicalRecord {
            date,
            month: date.month(),
            day_of_week: date.weekday().num_days_from_monday(),
            day: date.day(),
            platform,
            campaign_id: self.campaign_id,
            impressions: fill_metric(self.impressions),
            clicks: fill_metric(self.clicks),
            spend: fill_metric(self.spend),
            conversions: fill_metric(self.conversions),
            revenue: fill_metric(self.revenue),
        })
    }
}

/// Metric cells must end up finite and non-negative; anything else counts
/// as missing and fills to 0.
fn fill_metric(value: Option<f64>) -> f64 {
    value
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0)
}

/// A fully normalized row conforming to the unified schema.
/// Field order is the canonical column order of the normalized tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Month")]
    pub month: u32,
    #[serde(rename = "DayOfWeek")]
    pub day_of_week: u32,
    #[serde(rename = "Day")]
    pub day: u32,
    #[serde(rename = "Platform")]
    pub platform: Platform,
    #[serde(rename = "Campaign_ID")]
    pub campaign_id: String,
    #[serde(rename = "Impressions", deserialize_with = "metric_or_zero")]
    pub impressions: f64,
    #[serde(rename = "Clicks", deserialize_with = "metric_or_zero")]
    pub clicks: f64,
    #[serde(rename = "Spend", deserialize_with = "metric_or_zero")]
    pub spend: f64,
    #[serde(rename = "Conversions", deserialize_with = "metric_or_zero")]
    pub conversions: f64,
    #[serde(rename = "Revenue", deserialize_with = "metric_or_zero")]
    pub revenue: f64,
}

/// Lenient metric deserialization for reading normalized tables back in:
/// an empty or non-finite cell reads as 0. Date and identity columns get
/// no such leniency; a malformed one is a hard error.
fn metric_or_zero<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.filter(|v| v.is_finite() && *v >= 0.0).unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staged_with_date(date: Option<NaiveDate>) -> StagedRecord {
        StagedRecord {
            date,
            campaign_id: "camp_01".to_string(),
            impressions: Some(100.0),
            clicks: Some(5.0),
            spend: Some(12.5),
            conversions: None,
            revenue: None,
        }
    }

    #[test]
    fn test_calendar_fields_derive_from_date() {
        let date = NaiveDate::from_ymd_opt(2024, 11, 30).unwrap();
        let record = staged_with_date(Some(date))
            .into_canonical(Platform::Search)
            .unwrap();

        assert_eq!(record.month, 11);
        assert_eq!(record.day, 30);
        // 2024-11-30 is a Saturday; Monday is 0
        assert_eq!(record.day_of_week, 5);
    }

    #[test]
    fn test_missing_date_drops_row() {
        assert!(staged_with_date(None).into_canonical(Platform::Video).is_none());
    }

    #[test]
    fn test_platform_literals() {
        assert_eq!(Platform::Search.to_string(), "Search");
        assert_eq!(Platform::Social.as_str(), "Social");
        assert_eq!(Platform::Video.as_str(), "Video");
    }

    #[test]
    fn test_missing_metrics_fill_to_zero() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let record = staged_with_date(Some(date))
            .into_canonical(Platform::Social)
            .unwrap();

        assert_eq!(record.conversions, 0.0);
        assert_eq!(record.revenue, 0.0);
        assert_eq!(record.spend, 12.5);
    }

    #[test]
    fn test_negative_and_non_finite_metrics_fill_to_zero() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let staged = StagedRecord {
            date: Some(date),
            campaign_id: "camp_02".to_string(),
            impressions: Some(-10.0),
            clicks: Some(f64::NAN),
            spend: Some(f64::INFINITY),
            conversions: Some(3.0),
            revenue: None,
        };

        let record = staged.into_canonical(Platform::Search).unwrap();
        assert_eq!(record.impressions, 0.0);
        assert_eq!(record.clicks, 0.0);
        assert_eq!(record.spend, 0.0);
        assert_eq!(record.conversions, 3.0);
    }
}
