//! REST client for the Gemini `generateContent` endpoint.
//!
//! Sends the rendered transcript as a single user turn together with the
//! configured sampling parameters, using [`reqwest`].

use serde::{Deserialize, Serialize};

use crate::config::{AssistantConfig, GenerationConfig};
use crate::error::AssistantError;
use crate::model::GenerativeModel;

/// HTTP client for one Gemini model.
#[derive(Debug, Clone)]
pub struct GeminiApi {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    generation: GenerationConfig,
}

// ---- wire types ----

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: WireGenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

impl From<GenerationConfig> for WireGenerationConfig {
    fn from(config: GenerationConfig) -> Self {
        Self {
            temperature: config.temperature,
            top_k: config.top_k,
            top_p: config.top_p,
            max_output_tokens: config.max_output_tokens,
        }
    }
}

/// Response of `generateContent`.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateResponse {
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
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate, if it has any.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl GeminiApi {
    /// Build a client from configuration.
    ///
    /// Fails with [`AssistantError::Configuration`] when no API key is set.
    pub fn new(config: &AssistantConfig) -> Result<Self, AssistantError> {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Build a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        config: &AssistantConfig,
    ) -> Result<Self, AssistantError> {
        if !config.is_configured() {
            return Err(AssistantError::Configuration(
                "GEMINI_API_KEY is not set".to_string(),
            ));
        }
        let api_key = config.api_key.clone().unwrap_or_default();
        let endpoint = format!(
            "{}/models/{}:generateContent",
            config.api_base.trim_end_matches('/'),
            config.model
        );
        Ok(Self {
            client,
            api_key,
            endpoint,
            generation: config.generation,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_body<'a>(&self, prompt: &'a str) -> GenerateRequest<'a> {
        GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: self.generation.into(),
        }
    }
}

impl GenerativeModel for GeminiApi {
    async fn generate(&self, prompt: &str) -> Result<String, AssistantError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(status = status.as_u16(), "Gemini request rejected");
            return Err(AssistantError::from_status(status.as_u16(), body));
        }

        let parsed: GenerateResponse = response.json().await?;
        parsed.text().ok_or(AssistantError::EmptyResponse)
    }
}
