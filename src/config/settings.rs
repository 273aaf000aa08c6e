use crate::config::presets::{resolve_feed_url, FeedPreset};
use crate::domain::model::{Credential, DEFAULT_ARTICLES, MAX_ARTICLES, MIN_ARTICLES};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_SECRETS_PATH: &str = ".secrets.toml";
pub const DEFAULT_OUTPUT_DIR: &str = "./output";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Html,
    Json,
    Csv,
}

impl ExportFormat {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Html => "summaries.html",
            Self::Json => "summaries.json",
            Self::Csv => "summaries.csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Html => "html",
            Self::Json => "json",
            Self::Csv => "csv",
        };
        f.write_str(name)
    }
}

/// Fully layered settings: defaults, then the settings file, then flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_key: Option<Credential>,
    pub source: FeedPreset,
    pub feed_url: Option<String>,
    pub max_articles: usize,
    pub model: String,
    pub api_base_url: String,
    pub secrets_path: String,
    pub output_dir: String,
    pub formats: Vec<ExportFormat>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            source: FeedPreset::default(),
            feed_url: None,
            max_articles: DEFAULT_ARTICLES,
            model: DEFAULT_MODEL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            secrets_path: DEFAULT_SECRETS_PATH.to_string(),
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            formats: Vec::new(),
        }
    }
}

impl ConfigProvider for Settings {
    fn api_key(&self) -> Option<&Credential> {
        self.api_key.as_ref()
    }

    fn feed_url(&self) -> String {
        resolve_feed_url(self.source, self.feed_url.as_deref())
    }

    fn max_articles(&self) -> usize {
        self.max_articles
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_range("max_articles", self.max_articles, MIN_ARTICLES, MAX_ARTICLES)?;
        validate_non_empty_string("model", &self.model)?;
        validate_url("api_base_url", &self.api_base_url)?;
        validate_path("secrets_path", &self.secrets_path)?;

        if !self.formats.is_empty() {
            validate_path("output_dir", &self.output_dir)?;
        }

        Ok(())
    }
}
