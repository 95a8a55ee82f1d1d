//! Generation backend abstraction.
//!
//! Provides a generic interface for calling the generation API with a
//! structured-output schema. `GeminiClient` talks to the real
//! `generateContent` endpoint; `FakeGenerationBackend` serves canned text for
//! testing.

use crate::config::ApiSettings;
use crate::error::StrategyError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::Notify;

/// Generic generation backend
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Issue exactly one generation call and return the raw response text
    async fn generate(&self, prompt: &str, schema: &Value) -> Result<String, StrategyError>;
}

// ============================================================================
// Gemini (Production)
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
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

impl GenerateContentResponse {
    /// Text of the first candidate, all parts concatenated
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Client for the Gemini `generateContent` API
pub struct GeminiClient {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(settings: ApiSettings) -> Result<Self, StrategyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self { settings, client })
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.model
        )
    }

    /// Read the credential at call time
    fn api_key(&self) -> Result<String, StrategyError> {
        match std::env::var(&self.settings.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(StrategyError::Configuration(
                self.settings.api_key_env.clone(),
            )),
        }
    }
}

#[async_trait]
impl GenerationBackend for GeminiClient {
    async fn generate(&self, prompt: &str, schema: &Value) -> Result<String, StrategyError> {
        let api_key = self.api_key()?;

        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            },
        };

        tracing::debug!(model = %self.settings.model, "Sending generateContent request");

        let body = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let envelope: GenerateContentResponse = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::error!(raw = %body, "Unreadable generateContent envelope");
                return Err(StrategyError::MalformedResponse {
                    raw: body,
                    reason: e.to_string(),
                });
            }
        };

        match envelope.text() {
            Some(text) => Ok(text),
            None => {
                tracing::error!(raw = %body, "generateContent returned no candidate text");
                Err(StrategyError::MalformedResponse {
                    raw: body,
                    reason: "response contained no candidate text".to_string(),
                })
            }
        }
    }
}

// ============================================================================
// Fake Backend (Testing)
// ============================================================================

/// Canned outcome for [`FakeGenerationBackend`]
#[derive(Debug, Clone)]
pub enum FakeResponse {
    /// Return this text as the model output
    Text(String),
    /// Fail as if the named credential were missing
    MissingCredential(String),
}

/// Fake backend for testing
pub struct FakeGenerationBackend {
    responses: Mutex<Vec<FakeResponse>>,
    prompts: Mutex<Vec<String>>,
    call_count: Mutex<usize>,
    delay: Option<Duration>,
    gate: Option<Arc<Notify>>,
}

impl FakeGenerationBackend {
    /// Create a fake backend with pre-defined responses
    pub fn new(responses: Vec<FakeResponse>) -> Self {
        Self {
            responses: Mutex::new(responses),
            prompts: Mutex::new(Vec::new()),
            call_count: Mutex::new(0),
            delay: None,
            gate: None,
        }
    }

    /// Create a fake backend that always returns the same text
    pub fn always_text(text: impl Into<String>) -> Self {
        Self::new(vec![FakeResponse::Text(text.into())])
    }

    /// Sleep this long (tokio time) before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Hold every call until the returned handle is notified
    pub fn with_gate(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gate = Some(gate.clone());
        (self, gate)
    }

    /// Get the number of calls made
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Prompts received, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn next_response(&self) -> Option<FakeResponse> {
        let mut responses = self.responses.lock().unwrap_or_else(PoisonError::into_inner);
        match responses.len() {
            0 => None,
            // Keep returning the same response
            1 => Some(responses[0].clone()),
            _ => Some(responses.remove(0)),
        }
    }
}

#[async_trait]
impl GenerationBackend for FakeGenerationBackend {
    async fn generate(&self, prompt: &str, _schema: &Value) -> Result<String, StrategyError> {
        *self.call_count.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        self.prompts.lock().unwrap_or_else(PoisonError::into_inner).push(prompt.to_string());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.next_response() {
            Some(FakeResponse::Text(text)) => Ok(text),
            Some(FakeResponse::MissingCredential(name)) => Err(StrategyError::Configuration(name)),
            None => Err(StrategyError::MalformedResponse {
                raw: String::new(),
                reason: "no canned response left".to_string(),
            }),
        }
    }
}
