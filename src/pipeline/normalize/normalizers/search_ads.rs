use crate::constants;
use crate::pipeline::normalize::fields::{cell, clean_currency, parse_date_any, parse_numeric};
use crate::pipeline::normalize::SourceNormalizer;
use crate::types::{Platform, RawRow, StagedRecord};

/// Candidate date layouts tried per cell, in priority order. The search
/// platform's exports interleave ISO and day-first orderings row by row,
/// so a single layout for the whole column would silently lose rows.
const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y"];

/// Normalizer for the search-ads platform export
pub struct SearchAdsNormalizer;

impl SearchAdsNormalizer {
    pub fn new() -> Self {
        Self
    }
}

impl SourceNormalizer for SearchAdsNormalizer {
    fn source_id(&self) -> &'static str {
        constants::SEARCH_SOURCE
    }

    fn name(&self) -> &str {
        "Search Ads Normalizer"
    }

    fn platform(&self) -> Platform {
        Platform::Search
    }

    fn stage(&self, row: &RawRow) -> StagedRecord {
        StagedRecord {
            date: parse_date_any(cell(row, "Ad_Date"), DATE_LAYOUTS),
            campaign_id: cell(row, "Campaign_Name").to_string(),
            impressions: parse_numeric(cell(row, "Impressions")),
            clicks: parse_numeric(cell(row, "Clicks")),
            // Monetary columns carry currency symbols and group separators
            spend: clean_currency(cell(row, "Cost")),
            conversions: parse_numeric(cell(row, "Conversions")),
            revenue: clean_currency(cell(row, "Sale_Amount")),
        }
    }
}

impl Default for SearchAdsNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn raw(entries: &[(&str, &str)]) -> RawRow {
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_stage_remaps_and_cleans() {
        let normalizer = SearchAdsNormalizer::new();
        let row = raw(&[
            ("Ad_Date", "2024-01-15"),
            ("Campaign_Name", "brand_search"),
            ("Impressions", "1000"),
            ("Clicks", "50"),
            ("Cost", "$1,234.56"),
            ("Conversions", "10"),
            ("Sale_Amount", "$5,000.00"),
        ]);

        let staged = normalizer.stage(&row);

        assert_eq!(staged.date, NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(staged.campaign_id, "brand_search");
        assert_eq!(staged.spend, Some(1234.56));
        assert_eq!(staged.revenue, Some(5000.0));
    }

    #[test]
    fn test_stage_accepts_day_first_dates() {
        let normalizer = SearchAdsNormalizer::new();
        let row = raw(&[("Ad_Date", "15-01-2024"), ("Campaign_Name", "generic")]);

        let staged = normalizer.stage(&row);

        assert_eq!(staged.date, NaiveDate::from_ymd_opt(2024, 1, 15));
        // Columns absent from the row stay missing until the fill step
        assert_eq!(staged.impressions, None);
        assert_eq!(staged.spend, None);
    }

    #[test]
    fn test_unparseable_cost_stays_missing() {
        let normalizer = SearchAdsNormalizer::new();
        let row = raw(&[("Ad_Date", "2024-01-15"), ("Cost", "pending")]);

        assert_eq!(normalizer.stage(&row).spend, None);
    }
}
