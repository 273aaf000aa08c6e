pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{
    feed::HttpFeedSource, gemini::GeminiConnector, progress::TerminalProgress,
    storage::LocalStorage,
};
pub use app::{export::Exporter, render::TerminalRenderer};
pub use config::settings::Settings;
pub use core::digest::DigestEngine;
pub use utils::error::{Result, SummarizerError};
