use crate::domain::model::{ArticleCard, Notice, Page, RunConfig, SummaryResult};
use crate::domain::ports::{
    ConfigProvider, FeedSource, NoProgress, Progress, SecretStore, Summarizer,
    SummarizerConnector,
};

/// One "fetch and summarize" run: resolve settings, fetch the feed,
/// summarize the first entries in order, and describe the outcome as a `Page`.
pub struct DigestEngine<F: FeedSource, C: SummarizerConnector> {
    feeds: F,
    connector: C,
    secrets: Box<dyn SecretStore>,
    progress: Box<dyn Progress>,
}

impl<F: FeedSource, C: SummarizerConnector> DigestEngine<F, C> {
    pub fn new(feeds: F, connector: C, secrets: impl SecretStore + 'static) -> Self {
        Self {
            feeds,
            connector,
            secrets: Box::new(secrets),
            progress: Box::new(NoProgress),
        }
    }

    pub fn with_progress(mut self, progress: impl Progress + 'static) -> Self {
        self.progress = Box::new(progress);
        self
    }

    /// Never fails: every outcome, including errors, is part of the returned page.
    pub async fn run<P>(&self, settings: &P) -> Page
    where
        P: ConfigProvider + ?Sized,
    {
        tracing::info!("Starting feed summarizer run");

        let config = match RunConfig::resolve(settings, self.secrets.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("❌ {}", e);
                return Page::with_notice(Notice::MissingCredential);
            }
        };
        tracing::debug!("Run config: {:?}", config);

        let summarizer = match self.connector.connect(&config) {
            Ok(summarizer) => summarizer,
            Err(e) => {
                tracing::error!("❌ Failed to build summarizer: {}", e);
                return Page::with_notice(Notice::Unexpected(e.to_string()));
            }
        };

        let mut page = Page::default();

        self.progress.start("Fetching articles...");
        tracing::info!("📡 Fetching feed: {}", config.feed_url);
        let entries = match self.feeds.fetch(&config.feed_url).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!("❌ Feed retrieval failed: {}", e);
                page.notices.push(Notice::FeedError(e.to_string()));
                Vec::new()
            }
        };

        if entries.is_empty() {
            tracing::warn!("No articles found in {}", config.feed_url);
            page.notices.push(Notice::NoArticles);
            return page;
        }

        let total = entries.len().min(config.max_articles);
        tracing::info!(
            "Fetched {} entries, summarizing {}",
            entries.len(),
            total
        );

        for (index, entry) in entries.into_iter().take(config.max_articles).enumerate() {
            self.progress.start("Generating summary...");
            let summary = summarize_entry(&summarizer, entry.body()).await;

            match &summary {
                SummaryResult::Summary(_) => {
                    tracing::debug!("Summarized {}/{}: {}", index + 1, total, entry.title)
                }
                SummaryResult::Failed(reason) => tracing::warn!(
                    "Summary {}/{} failed for '{}': {}",
                    index + 1,
                    total,
                    entry.title,
                    reason
                ),
            }

            page.articles.push(ArticleCard { entry, summary });
        }

        tracing::info!(
            "✅ Summarized {} articles ({} failed)",
            page.articles.len(),
            page.failed_summaries()
        );
        page
    }
}

/// A failed call becomes `SummaryResult::Failed` so later entries still run.
pub async fn summarize_entry<S: Summarizer + ?Sized>(summarizer: &S, body: &str) -> SummaryResult {
    match summarizer.summarize(body).await {
        Ok(text) => SummaryResult::Summary(text),
        Err(e) => SummaryResult::Failed(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::presets::FeedPreset;
    use crate::config::secrets::TomlSecretStore;
    use crate::config::settings::Settings;
    use crate::domain::model::{Credential, FeedEntry, SUMMARY_ERROR_PREFIX};
    use crate::utils::error::{Result, SummarizerError};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    fn entry(i: usize) -> FeedEntry {
        FeedEntry {
            title: format!("Story {}", i),
            link: format!("https://example.com/{}", i),
            published: Some(format!("Mon, {} Jan 2024 10:00:00 +0000", i + 1)),
            summary: Some(format!("Body {}", i)),
            description: None,
        }
    }

    #[derive(Clone, Default)]
    struct CallLog {
        fetched: Arc<Mutex<Vec<String>>>,
        summarized: Arc<Mutex<Vec<String>>>,
        connects: Arc<Mutex<usize>>,
        progress: Arc<Mutex<Vec<String>>>,
    }

    struct FakeFeed {
        result: std::result::Result<Vec<FeedEntry>, String>,
        log: CallLog,
    }

    #[async_trait]
    impl FeedSource for FakeFeed {
        async fn fetch(&self, url: &str) -> Result<Vec<FeedEntry>> {
            self.log.fetched.lock().unwrap().push(url.to_string());
            self.result
                .clone()
                .map_err(|message| {
                    SummarizerError::IoError(std::io::Error::new(
                        std::io::ErrorKind::ConnectionRefused,
                        message,
                    ))
                })
        }
    }

    struct FakeSummarizer {
        fail_on: Option<String>,
        log: CallLog,
    }

    #[async_trait]
    impl Summarizer for FakeSummarizer {
        async fn summarize(&self, text: &str) -> Result<String> {
            self.log.summarized.lock().unwrap().push(text.to_string());
            if self.fail_on.as_deref() == Some(text) {
                return Err(SummarizerError::SummarizationError {
                    message: "quota exceeded".to_string(),
                });
            }
            Ok(format!("Summary of {}", text))
        }
    }

    struct FakeConnector {
        fail_on: Option<String>,
        broken: bool,
        log: CallLog,
    }

    impl SummarizerConnector for FakeConnector {
        type Client = FakeSummarizer;

        fn connect(&self, config: &RunConfig) -> Result<FakeSummarizer> {
            assert!(!config.credential.is_blank());
            *self.log.connects.lock().unwrap() += 1;
            if self.broken {
                return Err(SummarizerError::SummarizationError {
                    message: "client build failed".to_string(),
                });
            }
            Ok(FakeSummarizer {
                fail_on: self.fail_on.clone(),
                log: self.log.clone(),
            })
        }
    }

    struct RecordingProgress(CallLog);

    impl Progress for RecordingProgress {
        fn start(&self, label: &str) {
            self.0.progress.lock().unwrap().push(label.to_string());
        }
    }

    fn engine(
        feed: std::result::Result<Vec<FeedEntry>, String>,
        fail_on: Option<&str>,
        log: &CallLog,
    ) -> DigestEngine<FakeFeed, FakeConnector> {
        DigestEngine::new(
            FakeFeed {
                result: feed,
                log: log.clone(),
            },
            FakeConnector {
                fail_on: fail_on.map(str::to_string),
                broken: false,
                log: log.clone(),
            },
            TomlSecretStore::default(),
        )
        .with_progress(RecordingProgress(log.clone()))
    }

    fn settings(max_articles: usize) -> Settings {
        Settings {
            api_key: Some(Credential::new("key")),
            max_articles,
            ..Settings::default()
        }
    }

    #[tokio::test]
    async fn test_missing_credential_does_nothing() {
        let log = CallLog::default();
        let engine = engine(Ok(vec![entry(0)]), None, &log);
        let settings = Settings::default();

        let page = engine.run(&settings).await;

        assert_eq!(page, Page::with_notice(Notice::MissingCredential));
        assert!(log.fetched.lock().unwrap().is_empty());
        assert!(log.summarized.lock().unwrap().is_empty());
        assert_eq!(*log.connects.lock().unwrap(), 0);
        assert!(log.progress.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_credential_from_secret_store() {
        let log = CallLog::default();
        let secrets = TomlSecretStore::from_toml_str(r#"GEMINI_API_KEY = "stored""#).unwrap();
        let engine = DigestEngine::new(
            FakeFeed {
                result: Ok(vec![entry(0)]),
                log: log.clone(),
            },
            FakeConnector {
                fail_on: None,
                broken: false,
                log: log.clone(),
            },
            secrets,
        );

        let page = engine.run(&Settings::default()).await;

        assert!(page.notices.is_empty());
        assert_eq!(page.articles.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_feed_shows_only_no_articles() {
        let log = CallLog::default();
        let engine = engine(Ok(vec![]), None, &log);

        let page = engine.run(&settings(5)).await;

        assert_eq!(page.notices, vec![Notice::NoArticles]);
        assert!(page.articles.is_empty());
        assert!(log.summarized.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_feed_error_reports_and_stops() {
        let log = CallLog::default();
        let engine = engine(Err("connection refused".to_string()), None, &log);

        let page = engine.run(&settings(5)).await;

        assert_eq!(page.notices.len(), 2);
        assert!(matches!(&page.notices[0], Notice::FeedError(reason) if reason.contains("connection refused")));
        assert_eq!(page.notices[1], Notice::NoArticles);
        assert!(log.summarized.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_summarizes_min_of_entries_and_limit_in_order() {
        for (available, limit) in [(7, 3), (2, 5), (5, 5), (20, 20)] {
            let log = CallLog::default();
            let entries: Vec<FeedEntry> = (0..available).map(entry).collect();
            let engine = engine(Ok(entries), None, &log);

            let page = engine.run(&settings(limit)).await;

            let expected: Vec<String> = (0..available.min(limit))
                .map(|i| format!("Body {}", i))
                .collect();
            assert_eq!(*log.summarized.lock().unwrap(), expected);
            assert_eq!(page.articles.len(), available.min(limit));
            for (i, card) in page.articles.iter().enumerate() {
                assert_eq!(card.entry.title, format!("Story {}", i));
            }
        }
    }

    #[tokio::test]
    async fn test_one_failure_does_not_stop_the_run() {
        let log = CallLog::default();
        let entries: Vec<FeedEntry> = (0..5).map(entry).collect();
        let engine = engine(Ok(entries), Some("Body 2"), &log);

        let page = engine.run(&settings(5)).await;

        assert_eq!(page.articles.len(), 5);
        assert_eq!(page.failed_summaries(), 1);
        for (i, card) in page.articles.iter().enumerate() {
            assert_eq!(card.entry.title, format!("Story {}", i));
            assert_eq!(card.entry.link, format!("https://example.com/{}", i));
            assert!(card.entry.published.is_some());
            if i == 2 {
                assert!(card.summary.is_failure());
                assert!(card.summary.display_text().starts_with(SUMMARY_ERROR_PREFIX));
            } else {
                assert_eq!(
                    card.summary,
                    SummaryResult::Summary(format!("Summary of Body {}", i))
                );
            }
        }
    }

    #[tokio::test]
    async fn test_description_used_when_summary_missing() {
        let log = CallLog::default();
        let only_description = FeedEntry {
            summary: None,
            description: Some("Described body".to_string()),
            ..entry(0)
        };
        let engine = engine(Ok(vec![only_description]), None, &log);

        engine.run(&settings(5)).await;

        assert_eq!(*log.summarized.lock().unwrap(), vec!["Described body".to_string()]);
    }

    #[tokio::test]
    async fn test_custom_url_beats_preset() {
        let log = CallLog::default();
        let engine = engine(Ok(vec![entry(0)]), None, &log);
        let settings = Settings {
            source: FeedPreset::TechCrunch,
            feed_url: Some("https://custom.example.com/rss".to_string()),
            ..settings(1)
        };

        engine.run(&settings).await;

        assert_eq!(
            *log.fetched.lock().unwrap(),
            vec!["https://custom.example.com/rss".to_string()]
        );
    }

    #[tokio::test]
    async fn test_progress_labels() {
        let log = CallLog::default();
        let entries: Vec<FeedEntry> = (0..2).map(entry).collect();
        let engine = engine(Ok(entries), None, &log);

        engine.run(&settings(5)).await;

        assert_eq!(
            *log.progress.lock().unwrap(),
            vec![
                "Fetching articles...".to_string(),
                "Generating summary...".to_string(),
                "Generating summary...".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_connector_failure_is_unexpected_error() {
        let log = CallLog::default();
        let engine = DigestEngine::new(
            FakeFeed {
                result: Ok(vec![entry(0)]),
                log: log.clone(),
            },
            FakeConnector {
                fail_on: None,
                broken: true,
                log: log.clone(),
            },
            TomlSecretStore::default(),
        );

        let page = engine.run(&settings(5)).await;

        assert_eq!(page.notices.len(), 1);
        assert!(page.notices[0].message().starts_with("An error occurred: "));
        assert!(log.fetched.lock().unwrap().is_empty());
    }
}
