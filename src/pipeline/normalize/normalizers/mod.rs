// Individual normalizer implementations, one per platform
pub mod search_ads;
pub mod social_ads;
pub mod video;

// Re-export the main components
pub use search_ads::SearchAdsNormalizer;
pub use social_ads::SocialAdsNormalizer;
pub use video::VideoNormalizer;
