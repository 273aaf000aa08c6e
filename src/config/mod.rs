pub mod presets;
pub mod secrets;
pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::config::presets::FeedPreset;
#[cfg(feature = "cli")]
use crate::config::settings::{ExportFormat, Settings};
#[cfg(feature = "cli")]
use crate::config::toml_config::TomlConfig;
#[cfg(feature = "cli")]
use crate::domain::model::{Credential, MAX_ARTICLES, MIN_ARTICLES};
#[cfg(feature = "cli")]
use crate::utils::{error::Result, validation::Validate};
#[cfg(feature = "cli")]
use clap::Parser;

/// Flags left unset fall through to the settings file, then to defaults.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "feed-summarizer")]
#[command(about = "Summarize the latest items of an RSS or Atom feed with Google's Gemini")]
pub struct CliConfig {
    /// Gemini API key (falls back to GEMINI_API_KEY in the environment or secrets file)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Pre-filled feed to summarize
    #[arg(long, value_enum)]
    pub source: Option<FeedPreset>,

    /// Custom feed URL; overrides --source when non-empty
    #[arg(long)]
    pub feed_url: Option<String>,

    /// Maximum articles to summarize
    #[arg(long, value_parser = clap::value_parser!(u8).range(MIN_ARTICLES as i64..=MAX_ARTICLES as i64))]
    pub max_articles: Option<u8>,

    /// Path to a TOML settings file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Path to a TOML secrets file
    #[arg(long)]
    pub secrets: Option<String>,

    /// Gemini model identifier
    #[arg(long)]
    pub model: Option<String>,

    /// Base URL of the Gemini REST API
    #[arg(long)]
    pub api_base_url: Option<String>,

    /// Directory that receives exported pages
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Export formats written to the output directory
    #[arg(long, value_enum, value_delimiter = ',')]
    pub format: Vec<ExportFormat>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(api_key) = self.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            settings.api_key = Some(Credential::new(api_key));
        }
        if let Some(source) = self.source {
            settings.source = source;
        }
        if let Some(url) = &self.feed_url {
            settings.feed_url = Some(url.clone());
        }
        if let Some(max_articles) = self.max_articles {
            settings.max_articles = usize::from(max_articles);
        }
        if let Some(secrets) = &self.secrets {
            settings.secrets_path = secrets.clone();
        }
        if let Some(model) = &self.model {
            settings.model = model.clone();
        }
        if let Some(base_url) = &self.api_base_url {
            settings.api_base_url = base_url.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            settings.output_dir = output_dir.clone();
        }
        if !self.format.is_empty() {
            settings.formats = self.format.clone();
        }
    }

    /// Defaults, then `--config`, then flags; the result is validated.
    pub fn load_settings(&self) -> Result<Settings> {
        let mut settings = Settings::default();

        if let Some(path) = &self.config {
            tracing::info!("📁 Loading settings from: {}", path);
            TomlConfig::from_file(path)?.apply_to(&mut settings);
        }

        self.apply_to(&mut settings);
        settings.validate()?;

        Ok(settings)
    }
}
