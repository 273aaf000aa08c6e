use thiserror::Error;

#[derive(Error, Debug)]
pub enum SummarizerError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Feed parsing failed: {0}")]
    FeedParseError(#[from] feed_rs::parser::ParseFeedError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Feed request failed with status {status}")]
    FeedStatusError { status: u16 },

    #[error("Gemini API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Summarization failed: {message}")]
    SummarizationError { message: String },

    #[error("Missing Gemini API credential")]
    MissingCredential,

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Parsing,
    Configuration,
    Storage,
    Summarization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SummarizerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::HttpError(_) | Self::FeedStatusError { .. } => ErrorCategory::Network,
            Self::FeedParseError(_) | Self::CsvError(_) | Self::SerializationError(_) => {
                ErrorCategory::Parsing
            }
            Self::IoError(_) => ErrorCategory::Storage,
            Self::ApiError { .. } | Self::SummarizationError { .. } => {
                ErrorCategory::Summarization
            }
            Self::MissingCredential
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Summarization => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Parsing => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MissingCredential => "Please enter your Gemini API key.".to_string(),
            Self::FeedStatusError { status } => {
                format!("The feed server answered with HTTP status {}", status)
            }
            Self::ConfigValidationError { field, message } => {
                format!("Invalid setting '{}': {}", field, message)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::MissingCredential => {
                "Pass --api-key, set GEMINI_API_KEY, or add GEMINI_API_KEY to the secrets file"
            }
            Self::HttpError(_) | Self::FeedStatusError { .. } => {
                "Check the feed URL and your network connection"
            }
            Self::FeedParseError(_) => "Make sure the URL points to an RSS or Atom feed",
            Self::ApiError { .. } | Self::SummarizationError { .. } => {
                "Check the API key and model name, then try again"
            }
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                "Review the settings file and command-line flags"
            }
            Self::IoError(_) => "Check that the output directory is writable",
            Self::CsvError(_) | Self::SerializationError(_) => {
                "Retry the export; if it keeps failing, report the feed URL"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SummarizerError>;
