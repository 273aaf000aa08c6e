use crate::domain::ports::{ConfigProvider, SecretStore};
use crate::utils::error::{Result, SummarizerError};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const GEMINI_API_KEY_SECRET: &str = "GEMINI_API_KEY";
pub const NO_DATE: &str = "No date available";
pub const SUMMARY_ERROR_PREFIX: &str = "Error generating summary";

pub const MIN_ARTICLES: usize = 1;
pub const MAX_ARTICLES: usize = 20;
pub const DEFAULT_ARTICLES: usize = 5;

/// One item of a parsed feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    pub published: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
}

impl FeedEntry {
    /// `summary` wins over `description` unless it is blank.
    pub fn body(&self) -> &str {
        [self.summary.as_deref(), self.description.as_deref()]
            .into_iter()
            .flatten()
            .find(|text| !text.trim().is_empty())
            .unwrap_or("")
    }

    pub fn published_or_default(&self) -> &str {
        self.published
            .as_deref()
            .filter(|date| !date.trim().is_empty())
            .unwrap_or(NO_DATE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum SummaryResult {
    Summary(String),
    Failed(String),
}

impl SummaryResult {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Text shown in the summary slot of a card.
    pub fn display_text(&self) -> String {
        match self {
            Self::Summary(text) => text.clone(),
            Self::Failed(reason) => format!("{}: {}", SUMMARY_ERROR_PREFIX, reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleCard {
    pub entry: FeedEntry,
    pub summary: SummaryResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Notice {
    MissingCredential,
    FeedError(String),
    NoArticles,
    Unexpected(String),
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Self::MissingCredential => "Please enter your Gemini API key.".to_string(),
            Self::FeedError(reason) => format!("Error fetching RSS feed: {}", reason),
            Self::NoArticles => "No articles found in the RSS feed.".to_string(),
            Self::Unexpected(reason) => format!("An error occurred: {}", reason),
        }
    }
}

/// Everything a renderer needs to draw one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Page {
    pub notices: Vec<Notice>,
    pub articles: Vec<ArticleCard>,
}

impl Page {
    pub fn with_notice(notice: Notice) -> Self {
        Self {
            notices: vec![notice],
            articles: Vec::new(),
        }
    }

    pub fn failed_summaries(&self) -> usize {
        self.articles
            .iter()
            .filter(|card| card.summary.is_failure())
            .count()
    }
}

/// API key for the summarization service. Never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Immutable settings for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub credential: Credential,
    pub feed_url: String,
    pub max_articles: usize,
    pub model: String,
    pub api_base_url: String,
}

impl RunConfig {
    /// Explicit key first, then the secret store. Blank keys count as absent.
    pub fn resolve<C>(provider: &C, secrets: &dyn SecretStore) -> Result<Self>
    where
        C: ConfigProvider + ?Sized,
    {
        let credential = provider
            .api_key()
            .filter(|key| !key.is_blank())
            .cloned()
            .or_else(|| {
                secrets
                    .get(GEMINI_API_KEY_SECRET)
                    .map(Credential::new)
                    .filter(|key| !key.is_blank())
            })
            .ok_or(SummarizerError::MissingCredential)?;

        Ok(Self {
            credential,
            feed_url: provider.feed_url(),
            max_articles: provider.max_articles().clamp(MIN_ARTICLES, MAX_ARTICLES),
            model: provider.model().to_string(),
            api_base_url: provider.api_base_url().trim_end_matches('/').to_string(),
        })
    }
}
