//! LLM Client: the single point of entry for all generative-language API calls.
//!
//! ARCHITECTURAL RULE: No other module may call Gemini or NVIDIA directly.
//! Handlers pick a provider through `LlmRouter` and only see `TextGenerator`.
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::LlmConfig;

pub mod gemini;
pub mod nvidia;
pub mod output;
pub mod prompts;

pub use gemini::GeminiClient;
pub use nvidia::NvidiaClient;

const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("None of the configured models are available")]
    NoModelAvailable,

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Which generative-language backend a request should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    Google,
    Nvidia,
}

#[derive(Debug, Error)]
#[error("Invalid API provider '{0}'")]
pub struct UnknownProvider(pub String);

impl FromStr for LlmProvider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" | "gemini" => Ok(LlmProvider::Google),
            "nvidia" => Ok(LlmProvider::Nvidia),
            _ => Err(UnknownProvider(s.to_string())),
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmProvider::Google => f.write_str("google"),
            LlmProvider::Nvidia => f.write_str("nvidia"),
        }
    }
}

/// Sampling parameters shared by both providers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
}

impl GenerationParams {
    pub const fn new(max_tokens: u32, temperature: f32, top_p: f32) -> Self {
        Self {
            max_tokens,
            temperature: Some(temperature),
            top_p: Some(top_p),
        }
    }
}

/// A backend that turns a single user prompt into text.
///
/// Carried in `LlmRouter` as `Arc<dyn TextGenerator>` so tests can swap in stubs.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn provider(&self) -> LlmProvider;

    /// Returns the first candidate's text. `LlmError::EmptyContent` when the
    /// API answered successfully but produced nothing usable.
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, LlmError>;
}

/// Provider → generator lookup. Providers without an API key are absent.
#[derive(Clone, Default)]
pub struct LlmRouter {
    google: Option<Arc<dyn TextGenerator>>,
    nvidia: Option<Arc<dyn TextGenerator>>,
}

impl LlmRouter {
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let mut router = LlmRouter::default();
        if let Some(key) = &config.google_api_key {
            router = router.with_generator(Arc::new(GeminiClient::new(
                http.clone(),
                key.clone(),
                config.gemini_base_url.clone(),
                config.gemini_models.clone(),
            )));
        }
        if let Some(key) = &config.nvidia_api_key {
            router = router.with_generator(Arc::new(NvidiaClient::new(
                http,
                key.clone(),
                config.nvidia_base_url.clone(),
                config.nvidia_model.clone(),
            )));
        }

        info!("LLM providers configured: {:?}", router.configured());
        Ok(router)
    }

    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        match generator.provider() {
            LlmProvider::Google => self.google = Some(generator),
            LlmProvider::Nvidia => self.nvidia = Some(generator),
        }
        self
    }

    pub fn generator(&self, provider: LlmProvider) -> Option<Arc<dyn TextGenerator>> {
        match provider {
            LlmProvider::Google => self.google.clone(),
            LlmProvider::Nvidia => self.nvidia.clone(),
        }
    }

    pub fn configured(&self) -> Vec<LlmProvider> {
        [LlmProvider::Google, LlmProvider::Nvidia]
            .into_iter()
            .filter(|p| self.generator(*p).is_some())
            .collect()
    }
}

/// Sends a request, retrying on transport errors, 429 and 5xx with
/// exponential backoff. Any other status is handed back to the caller.
pub(crate) async fn send_with_retry<F>(label: &str, mut build: F) -> Result<Response, LlmError>
where
    F: FnMut() -> RequestBuilder,
{
    let mut last_error: Option<LlmError> = None;

    for attempt in 0..MAX_RETRIES {
        if attempt > 0 {
            // Exponential backoff: 1s, 2s
            let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
            warn!(
                "{label} call attempt {} failed, retrying after {}ms...",
                attempt,
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;
        }

        let response = match build().send().await {
            Ok(r) => r,
            Err(e) => {
                last_error = Some(LlmError::Http(e));
                continue;
            }
        };

        let status = response.status();
        if status.as_u16() == 429 || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            warn!("{label} API returned {}: {}", status, body);
            last_error = Some(LlmError::Api {
                status: status.as_u16(),
                message: body,
            });
            continue;
        }

        return Ok(response);
    }

    Err(last_error.unwrap_or(LlmError::RateLimited {
        retries: MAX_RETRIES,
    }))
}

/// Converts a non-success response into `LlmError::Api`, pulling the
/// provider's `error.message` out of the body when present.
pub(crate) async fn api_error(response: Response) -> LlmError {
    #[derive(Deserialize)]
    struct ErrorEnvelope {
        error: ErrorBody,
    }

    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    LlmError::Api { status, message }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use axum::extract::State;
    use axum::http::{StatusCode, Uri};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use super::*;

    type Replies = Arc<Mutex<VecDeque<(u16, Value)>>>;

    /// Local HTTP server answering every request with the next scripted
    /// `(status, body)` and recording the paths it was asked for.
    pub struct ScriptedServer {
        pub base_url: String,
        hits: Arc<Mutex<Vec<String>>>,
    }

    impl ScriptedServer {
        pub async fn start(replies: Vec<(u16, Value)>) -> Self {
            let replies: Replies = Arc::new(Mutex::new(replies.into()));
            let hits = Arc::new(Mutex::new(Vec::new()));

            let app = Router::new()
                .fallback(scripted_reply)
                .with_state((replies, hits.clone()));
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move { axum::serve(listener, app).await });

            Self {
                base_url: format!("http://{addr}"),
                hits,
            }
        }

        pub fn hits(&self) -> Vec<String> {
            self.hits.lock().unwrap().clone()
        }
    }

    async fn scripted_reply(
        State((replies, hits)): State<(Replies, Arc<Mutex<Vec<String>>>)>,
        uri: Uri,
    ) -> (StatusCode, Json<Value>) {
        hits.lock().unwrap().push(uri.path().to_string());
        let (status, body) = replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or((500, json!({ "error": { "message": "no scripted reply left" } })));
        (StatusCode::from_u16(status).unwrap(), Json(body))
    }

    /// Canned generator for handler tests. `None` simulates a failing backend.
    pub struct StubGenerator {
        pub provider: LlmProvider,
        pub reply: Option<String>,
    }

    impl StubGenerator {
        pub fn replying(provider: LlmProvider, reply: &str) -> Arc<dyn TextGenerator> {
            Arc::new(Self {
                provider,
                reply: Some(reply.to_string()),
            })
        }

        pub fn failing(provider: LlmProvider) -> Arc<dyn TextGenerator> {
            Arc::new(Self {
                provider,
                reply: None,
            })
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        fn provider(&self) -> LlmProvider {
            self.provider
        }

        async fn generate(&self, _prompt: &str, _params: &GenerationParams) -> Result<String, LlmError> {
            match &self.reply {
                Some(text) if text.trim().is_empty() => Err(LlmError::EmptyContent),
                Some(text) => Ok(text.clone()),
                None => Err(LlmError::Api {
                    status: 503,
                    message: "stub backend unavailable".to_string(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::testing::{ScriptedServer, StubGenerator};
    use super::*;

    #[test]
    fn test_provider_from_str() {
        assert_eq!("google".parse::<LlmProvider>().unwrap(), LlmProvider::Google);
        assert_eq!("NVIDIA".parse::<LlmProvider>().unwrap(), LlmProvider::Nvidia);
        assert!("openai".parse::<LlmProvider>().is_err());
    }

    #[test]
    fn test_provider_serde_lowercase() {
        assert_eq!(serde_json::to_string(&LlmProvider::Nvidia).unwrap(), "\"nvidia\"");
    }

    #[test]
    fn test_router_without_keys_has_no_providers() {
        let router = LlmRouter::from_config(&LlmConfig::default()).unwrap();
        assert!(router.configured().is_empty());
        assert!(router.generator(LlmProvider::Google).is_none());
    }

    #[test]
    fn test_router_from_config_registers_keyed_providers() {
        let config = LlmConfig {
            nvidia_api_key: Some("nvapi-test".to_string()),
            ..LlmConfig::default()
        };
        let router = LlmRouter::from_config(&config).unwrap();
        assert_eq!(router.configured(), vec![LlmProvider::Nvidia]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_with_retry_recovers_after_rate_limit() {
        let server = ScriptedServer::start(vec![
            (429, json!({ "error": { "message": "slow down" } })),
            (200, json!({ "ok": true })),
        ])
        .await;
        let client = Client::new();
        let url = format!("{}/ping", server.base_url);

        let start = tokio::time::Instant::now();
        let response = send_with_retry("test", || client.get(&url)).await.unwrap();
        assert_eq!(response.status(), 200);
        assert!(start.elapsed() >= Duration::from_secs(1));
        assert_eq!(server.hits().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_with_retry_gives_up_after_three_server_errors() {
        let server = ScriptedServer::start(vec![
            (503, json!({})),
            (503, json!({})),
            (503, json!({})),
            (200, json!({ "ok": true })),
        ])
        .await;
        let client = Client::new();
        let url = format!("{}/ping", server.base_url);

        let start = tokio::time::Instant::now();
        let err = send_with_retry("test", || client.get(&url)).await.unwrap_err();
        assert!(matches!(err, LlmError::Api { status: 503, .. }));
        assert!(start.elapsed() >= Duration::from_secs(3));
        assert_eq!(server.hits().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_with_retry_returns_client_errors_untouched() {
        let server = ScriptedServer::start(vec![(400, json!({ "error": { "message": "bad prompt" } }))]).await;
        let client = Client::new();
        let url = format!("{}/ping", server.base_url);

        let response = send_with_retry("test", || client.get(&url)).await.unwrap();
        assert_eq!(response.status(), 400);
        match api_error(response).await {
            LlmError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "bad prompt");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(server.hits().len(), 1);
    }

    #[test]
    fn test_router_with_generator_routes_by_provider() {
        let router = LlmRouter::default()
            .with_generator(StubGenerator::replying(LlmProvider::Google, "hi"));
        assert!(router.generator(LlmProvider::Google).is_some());
        assert!(router.generator(LlmProvider::Nvidia).is_none());
    }
}
