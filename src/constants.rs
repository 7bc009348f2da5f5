/// Source name constants to ensure consistency across the codebase
/// These names key the config sections, the registry, and the CLI

pub const SEARCH_SOURCE: &str = "search";
pub const SOCIAL_SOURCE: &str = "social";
pub const VIDEO_SOURCE: &str = "video";

/// Canonical column order for every normalized table
pub const CANONICAL_COLUMNS: [&str; 11] = [
    "Date",
    "Month",
    "DayOfWeek",
    "Day",
    "Platform",
    "Campaign_ID",
    "Impressions",
    "Clicks",
    "Spend",
    "Conversions",
    "Revenue",
];

/// Derived metric columns appended by the merge stage, in output order
pub const DERIVED_COLUMNS: [&str; 4] = ["CTR", "CPC", "CPA", "ROAS"];

/// Get all supported source names, in merge order
pub fn supported_sources() -> Vec<&'static str> {
    vec![SEARCH_SOURCE, SOCIAL_SOURCE, VIDEO_SOURCE]
}
