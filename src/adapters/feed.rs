use crate::domain::model::FeedEntry;
use crate::domain::ports::FeedSource;
use crate::utils::error::{Result, SummarizerError};
use async_trait::async_trait;
use feed_rs::model::Entry;
use reqwest::Client;

const UNTITLED: &str = "(untitled)";

/// Fetches a feed over HTTP and parses it with `feed-rs` (RSS 0.9x/1.0/2.0, Atom, JSON Feed).
pub struct HttpFeedSource {
    client: Client,
}

impl HttpFeedSource {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(default_user_agent())
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self, url: &str) -> Result<Vec<FeedEntry>> {
        tracing::debug!("Requesting feed: {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        tracing::debug!("Feed response status: {}", status);
        if !status.is_success() {
            return Err(SummarizerError::FeedStatusError {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        parse_feed(&bytes)
    }
}

/// Parses raw feed bytes, keeping the feed's own entry order.
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<FeedEntry>> {
    let feed = feed_rs::parser::parse(bytes)?;

    let mut raw_dates = rss_pub_dates(bytes);
    if raw_dates.len() != feed.entries.len() {
        raw_dates.clear();
    }

    Ok(feed
        .entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let raw_date = raw_dates.get_mut(index).and_then(Option::take);
            to_feed_entry(entry, raw_date)
        })
        .collect())
}

/// `<pubDate>` of each RSS item exactly as written. Empty when the document is not RSS.
fn rss_pub_dates(bytes: &[u8]) -> Vec<Option<String>> {
    match rss::Channel::read_from(bytes) {
        Ok(channel) => channel
            .items()
            .iter()
            .map(|item| {
                item.pub_date()
                    .map(str::trim)
                    .filter(|date| !date.is_empty())
                    .map(str::to_string)
            })
            .collect(),
        Err(e) => {
            tracing::trace!("Not an RSS channel, dates come from feed-rs: {}", e);
            Vec::new()
        }
    }
}

/// Raw date text wins; parsed timestamps are only used when the feed gave none.
fn to_feed_entry(entry: Entry, raw_date: Option<String>) -> FeedEntry {
    let title = entry
        .title
        .map(|t| t.content.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string());

    let link = entry
        .links
        .into_iter()
        .next()
        .map(|l| l.href)
        .unwrap_or_default();

    let published = raw_date.or_else(|| {
        entry
            .published
            .or(entry.updated)
            .map(|date| date.to_rfc2822())
    });

    FeedEntry {
        title,
        link,
        published,
        summary: entry.summary.map(|s| s.content),
        description: entry.content.and_then(|c| c.body),
    }
}

fn default_user_agent() -> String {
    format!(
        "feed-summarizer/{} (rust; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    )
}
