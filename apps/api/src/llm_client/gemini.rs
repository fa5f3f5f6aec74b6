//! Google Gemini `generateContent` backend.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{api_error, send_with_retry, GenerationParams, LlmError, LlmProvider, TextGenerator};

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(rename = "topP", skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

impl GeminiResponse {
    /// Text of the first part of the first candidate.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.as_deref())
    }
}

/// Calls Gemini, walking `models` in order and skipping any that 404.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    models: Vec<String>,
}

impl GeminiClient {
    pub fn new(client: Client, api_key: String, base_url: String, models: Vec<String>) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            models,
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{model}:generateContent", self.base_url)
    }
}

fn request_body<'a>(prompt: &'a str, params: &GenerationParams) -> GeminiRequest<'a> {
    GeminiRequest {
        contents: vec![GeminiContent {
            parts: vec![GeminiPart { text: prompt }],
        }],
        generation_config: GenerationConfig {
            max_output_tokens: params.max_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
        },
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn provider(&self) -> LlmProvider {
        LlmProvider::Google
    }

    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, LlmError> {
        let body = request_body(prompt, params);

        for model in &self.models {
            let url = self.endpoint(model);
            let response = send_with_retry("Gemini", || {
                self.client
                    .post(&url)
                    .query(&[("key", self.api_key.as_str())])
                    .json(&body)
            })
            .await?;

            if response.status() == StatusCode::NOT_FOUND {
                warn!("Gemini model {model} is not available, trying the next one");
                continue;
            }
            if !response.status().is_success() {
                return Err(api_error(response).await);
            }

            let parsed: GeminiResponse = response.json().await?;
            debug!("Gemini call succeeded with model {model}");
            return parsed
                .text()
                .filter(|t| !t.trim().is_empty())
                .map(String::from)
                .ok_or(LlmError::EmptyContent);
        }

        Err(LlmError::NoModelAvailable)
    }
}
