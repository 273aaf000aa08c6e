//! Turns a `Page` into something a person can read.

pub mod html;
pub mod terminal;

pub const PAGE_TITLE: &str = "📰 RSS Feed News Summarizer";
pub const PAGE_SUBTITLE: &str =
    "Get AI-powered summaries of your favorite RSS feeds using Google's Gemini";
pub const SUMMARY_HEADING: &str = "Summary";
pub const LINK_LABEL: &str = "Read original article";

pub use html::render_html;
pub use terminal::TerminalRenderer;
