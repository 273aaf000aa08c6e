pub mod digest;

pub use crate::domain::model::{ArticleCard, FeedEntry, Notice, Page, RunConfig, SummaryResult};
pub use crate::domain::ports::{
    ConfigProvider, FeedSource, Progress, SecretStore, Storage, Summarizer, SummarizerConnector,
};
pub use crate::utils::error::Result;
