use crate::core::parse::parse_analysis;
use crate::core::prompt::{build_prompt, response_schema};
use crate::core::{AnalysisClient, AnalysisResult, ConfigProvider};
use crate::utils::error::{AnalysisFailure, DetectorError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
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
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate.
    fn into_text(self) -> Result<String> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(DetectorError::malformed(format!("prompt blocked: {}", reason)));
        }

        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| DetectorError::malformed("response has no candidates"))?;

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect::<String>())
            .unwrap_or_default();

        if text.trim().is_empty() {
            let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
            return Err(DetectorError::malformed(format!(
                "candidate has no text (finish reason: {})",
                reason
            )));
        }

        Ok(text)
    }
}

/// Analysis client backed by the Gemini `generateContent` REST endpoint.
pub struct GeminiClient<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> GeminiClient<C> {
    pub fn new(config: C) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_base_url().trim_end_matches('/'),
            self.config.model()
        )
    }

    fn usable_key(&self) -> Option<&str> {
        self.config.api_key().filter(|key| is_usable_key(key))
    }

    async fn request_analysis(&self, text: &str) -> Result<AnalysisResult> {
        if text.trim().is_empty() {
            return Err(DetectorError::ValidationError {
                message: "text to analyze is empty".to_string(),
            });
        }

        let api_key = self
            .usable_key()
            .ok_or_else(|| DetectorError::MissingConfigError {
                field: "API_KEY".to_string(),
            })?;

        let body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(build_prompt(text, self.config.locale())),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema(),
            },
        };

        let endpoint = self.endpoint();
        tracing::debug!("Making API request to: {}", endpoint);

        let response = self
            .client
            .post(&endpoint)
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DetectorError::ApiStatusError {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GenerateContentResponse = response.json().await?;
        let raw = payload.into_text()?;
        tracing::debug!("Model returned {} bytes of text", raw.len());

        parse_analysis(&raw)
    }
}

/// A key is usable when it is non-blank and not a `${VAR}` placeholder left
/// behind by config substitution.
pub fn is_usable_key(key: &str) -> bool {
    let key = key.trim();
    !key.is_empty() && !(key.starts_with("${") && key.ends_with('}'))
}

#[async_trait::async_trait]
impl<C: ConfigProvider> AnalysisClient for GeminiClient<C> {
    fn is_configured(&self) -> bool {
        self.usable_key().is_some()
    }

    async fn analyze(&self, text: &str) -> std::result::Result<AnalysisResult, AnalysisFailure> {
        self.request_analysis(text).await.map_err(AnalysisFailure::from)
    }
}
