//! Derived performance ratios appended to the merged table.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{CanonicalRecord, Platform};

/// A merged row with the four derived ratio columns appended.
/// Field order matches the final table's column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedRecord {
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
    #[serde(rename = "Impressions")]
    pub impressions: f64,
    #[serde(rename = "Clicks")]
    pub clicks: f64,
    #[serde(rename = "Spend")]
    pub spend: f64,
    #[serde(rename = "Conversions")]
    pub conversions: f64,
    #[serde(rename = "Revenue")]
    pub revenue: f64,
    #[serde(rename = "CTR")]
    pub ctr: f64,
    #[serde(rename = "CPC")]
    pub cpc: f64,
    #[serde(rename = "CPA")]
    pub cpa: f64,
    #[serde(rename = "ROAS")]
    pub roas: f64,
}

impl DerivedRecord {
    /// Each ratio is guarded against its own row's denominator only
    fn from_canonical(record: CanonicalRecord) -> Self {
        let ctr = guarded_ratio(record.clicks, record.impressions) * 100.0;
        let cpc = guarded_ratio(record.spend, record.clicks);
        let cpa = guarded_ratio(record.spend, record.conversions);
        let roas = guarded_ratio(record.revenue, record.spend);

        Self {
            date: record.date,
            month: record.month,
            day_of_week: record.day_of_week,
            day: record.day,
            platform: record.platform,
            campaign_id: record.campaign_id,
            impressions: record.impressions,
            clicks: record.clicks,
            spend: record.spend,
            conversions: record.conversions,
            revenue: record.revenue,
            ctr,
            cpc,
            cpa,
            roas,
        }
    }
}

/// Ratio defined to return 0 instead of an undefined value when the
/// denominator is not strictly positive
pub fn guarded_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Append CTR, CPC, CPA, and ROAS to every merged row
pub fn derive_metrics(rows: Vec<CanonicalRecord>) -> Vec<DerivedRecord> {
    rows.into_iter().map(DerivedRecord::from_canonical).collect()
}
