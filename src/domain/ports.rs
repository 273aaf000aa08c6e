use crate::domain::model::{Credential, FeedEntry, RunConfig};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_key(&self) -> Option<&Credential>;
    /// Feed to read, already chosen between the preset and a custom URL.
    fn feed_url(&self) -> String;
    fn max_articles(&self) -> usize;
    fn model(&self) -> &str;
    fn api_base_url(&self) -> &str;
}

/// Read-only key/value lookup for secrets such as the API key.
pub trait SecretStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Entries in the order the feed lists them.
    async fn fetch(&self, url: &str) -> Result<Vec<FeedEntry>>;
}

#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String>;
}

/// Builds a summarizer bound to the credential and model of a run.
pub trait SummarizerConnector: Send + Sync {
    type Client: Summarizer;

    fn connect(&self, config: &RunConfig) -> Result<Self::Client>;
}

/// Loading indicator shown while a slow step runs.
pub trait Progress: Send + Sync {
    fn start(&self, label: &str);
}

pub struct NoProgress;

impl Progress for NoProgress {
    fn start(&self, _label: &str) {}
}
