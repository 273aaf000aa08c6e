use crate::config::presets::FeedPreset;
use crate::config::settings::{ExportFormat, Settings};
use crate::domain::model::Credential;
use crate::utils::error::{Result, SummarizerError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Optional settings file. Every key may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub summarizer: SummarizerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeedConfig {
    pub source: Option<FeedPreset>,
    pub url: Option<String>,
    pub max_articles: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SummarizerConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub api_base_url: Option<String>,
    pub secrets_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub directory: Option<String>,
    pub formats: Option<Vec<ExportFormat>>,
}

fn env_placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid")
    })
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| SummarizerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables become empty.
    fn substitute_env_vars(content: &str) -> String {
        env_placeholder()
            .replace_all(content, |caps: &regex::Captures| {
                std::env::var(&caps[1]).unwrap_or_default()
            })
            .into_owned()
    }

    /// Overlays every key present in the file onto `settings`.
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(source) = self.feed.source {
            settings.source = source;
        }
        if let Some(url) = &self.feed.url {
            settings.feed_url = Some(url.clone());
        }
        if let Some(max_articles) = self.feed.max_articles {
            settings.max_articles = max_articles;
        }
        if let Some(api_key) = self.summarizer.api_key.as_deref().filter(|k| !k.trim().is_empty())
        {
            settings.api_key = Some(Credential::new(api_key));
        }
        if let Some(model) = &self.summarizer.model {
            settings.model = model.clone();
        }
        if let Some(base_url) = &self.summarizer.api_base_url {
            settings.api_base_url = base_url.clone();
        }
        if let Some(secrets_path) = &self.summarizer.secrets_path {
            settings.secrets_path = secrets_path.clone();
        }
        if let Some(directory) = &self.output.directory {
            settings.output_dir = directory.clone();
        }
        if let Some(formats) = &self.output.formats {
            settings.formats = formats.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::Validate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[feed]
source = "techcrunch"
url = "https://example.com/feed.xml"
max_articles = 3

[summarizer]
api_key = "file-key"
model = "gemini-1.5-flash"

[output]
directory = "./digest"
formats = ["html", "csv"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let mut settings = Settings::default();
        config.apply_to(&mut settings);

        assert_eq!(settings.source, FeedPreset::TechCrunch);
        assert_eq!(settings.feed_url.as_deref(), Some("https://example.com/feed.xml"));
        assert_eq!(settings.max_articles, 3);
        assert_eq!(settings.api_key.as_ref().unwrap().expose(), "file-key");
        assert_eq!(settings.model, "gemini-1.5-flash");
        assert_eq!(settings.output_dir, "./digest");
        assert_eq!(settings.formats, vec![ExportFormat::Html, ExportFormat::Csv]);
    }

    #[test]
    fn test_empty_file_keeps_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        let mut settings = Settings::default();
        config.apply_to(&mut settings);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FEED_SUMMARIZER_TEST_URL", "https://env.example.com/rss");

        let config = TomlConfig::from_toml_str(
            r#"
[feed]
url = "${FEED_SUMMARIZER_TEST_URL}"
"#,
        )
        .unwrap();
        assert_eq!(config.feed.url.as_deref(), Some("https://env.example.com/rss"));

        std::env::remove_var("FEED_SUMMARIZER_TEST_URL");
    }

    #[test]
    fn test_unset_env_var_leaves_key_absent() {
        let config = TomlConfig::from_toml_str(
            r#"
[summarizer]
api_key = "${FEED_SUMMARIZER_TEST_UNSET_KEY}"
"#,
        )
        .unwrap();

        let mut settings = Settings::default();
        config.apply_to(&mut settings);
        assert!(settings.api_key.is_none());
    }

    #[test]
    fn test_out_of_range_count_fails_validation() {
        let config = TomlConfig::from_toml_str("[feed]\nmax_articles = 42\n").unwrap();
        let mut settings = Settings::default();
        config.apply_to(&mut settings);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = TomlConfig::from_toml_str("[feed]\nlimit = 3\n").unwrap_err();
        assert!(matches!(err, SummarizerError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[feed]\nsource = \"slashdot\"\nmax_articles = 7\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.feed.source, Some(FeedPreset::Slashdot));
        assert_eq!(config.feed.max_articles, Some(7));
    }
}
