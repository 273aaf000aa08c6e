use serde::{Deserialize, Serialize};

/// Feeds offered without typing a URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum FeedPreset {
    #[default]
    Slashdot,
    #[cfg_attr(feature = "cli", value(name = "techcrunch"))]
    TechCrunch,
}

impl FeedPreset {
    pub const ALL: [FeedPreset; 2] = [FeedPreset::Slashdot, FeedPreset::TechCrunch];

    pub fn url(self) -> &'static str {
        match self {
            Self::Slashdot => "https://rss.slashdot.org/Slashdot/slashdotMain",
            Self::TechCrunch => "http://feeds.feedburner.com/TechCrunch/",
        }
    }
}

/// A non-blank custom URL always beats the preset.
pub fn resolve_feed_url(preset: FeedPreset, custom: Option<&str>) -> String {
    match custom.map(str::trim).filter(|url| !url.is_empty()) {
        Some(url) => url.to_string(),
        None => preset.url().to_string(),
    }
}
