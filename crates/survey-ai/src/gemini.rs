//! Gemini `generateContent` client.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use survey_config::GeminiConfig;

use crate::error::AiError;
use crate::generator::TextGenerator;
use crate::http::check_response;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// HTTP client for a single Gemini model.
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
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

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    fn into_text(self) -> Result<String, AiError> {
        let content = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .ok_or_else(|| AiError::Parse("response has no candidates".into()))?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        if text.is_empty() {
            return Err(AiError::Parse("first candidate has no text parts".into()));
        }
        Ok(text)
    }
}

impl GeminiClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AiError::NotConfigured`] without an API key, or
    /// [`AiError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &GeminiConfig) -> Result<Self, AiError> {
        if !config.is_configured() {
            return Err(AiError::NotConfigured);
        }
        let http = reqwest::Client::builder()
            .user_agent(concat!("survey/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.trim().to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn id(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        let body = GenerateRequest {
            contents: [Content {
                parts: [RequestPart { text: prompt }],
            }],
        };
        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "calling generateContent");

        let resp = self
            .http
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;
        let resp = check_response(resp).await?;

        let data: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| AiError::Parse(e.to_string()))?;
        data.into_text()
    }
}
