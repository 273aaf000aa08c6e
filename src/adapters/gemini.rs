//! Gemini `generateContent` REST client.
//!
//! Only plain-text prompts are sent; the reply text is the concatenation of the
//! first candidate's text parts.

use crate::domain::model::{Credential, RunConfig};
use crate::domain::ports::{Summarizer, SummarizerConnector};
use crate::utils::error::{Result, SummarizerError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const PROMPT_TEMPLATE: &str =
    "Please provide a concise 2-3 sentence summary of the following article:\n";

pub fn build_prompt(article_text: &str) -> String {
    format!("{}{}", PROMPT_TEMPLATE, article_text)
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl GenerateContentResponse {
    fn into_text(self) -> Result<String> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(SummarizerError::SummarizationError {
                message: format!("prompt was blocked ({})", reason),
            });
        }

        let candidate = self.candidates.into_iter().next().ok_or_else(|| {
            SummarizerError::SummarizationError {
                message: "response contained no candidates".to_string(),
            }
        })?;

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            let reason = candidate
                .finish_reason
                .unwrap_or_else(|| "UNKNOWN".to_string());
            return Err(SummarizerError::SummarizationError {
                message: format!("response contained no text (finish reason: {})", reason),
            });
        }

        Ok(text.trim().to_string())
    }
}

/// Client bound to one credential and one model.
pub struct GeminiClient {
    client: Client,
    api_key: Credential,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(client: Client, api_key: Credential, base_url: &str, model: &str) -> Self {
        Self {
            client,
            api_key,
            endpoint: format!(
                "{}/v1beta/models/{}:generateContent",
                base_url.trim_end_matches('/'),
                model
            ),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn generate_content(&self, prompt: &str) -> Result<String> {
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", self.api_key.expose())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Gemini response status: {}", status);

        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&raw)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            return Err(SummarizerError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        parsed.into_text()
    }
}

#[async_trait]
impl Summarizer for GeminiClient {
    async fn summarize(&self, text: &str) -> Result<String> {
        self.generate_content(&build_prompt(text)).await
    }
}

/// Builds a `GeminiClient` for each run. Construction performs no network I/O.
#[derive(Debug, Clone, Default)]
pub struct GeminiConnector;

impl SummarizerConnector for GeminiConnector {
    type Client = GeminiClient;

    fn connect(&self, config: &RunConfig) -> Result<GeminiClient> {
        let client = Client::builder()
            .user_agent(concat!("feed-summarizer/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(GeminiClient::new(
            client,
            config.credential.clone(),
            &config.api_base_url,
            &config.model,
        ))
    }
}
