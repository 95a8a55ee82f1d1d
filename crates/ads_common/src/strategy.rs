//! Strategy request client.
//!
//! One request, one backend call, no retry. The response text is trimmed and
//! parsed into a [`Report`]; anything that does not match the contract is a
//! `MalformedResponse` and the raw text goes to the diagnostic log only.

use crate::config::ApiSettings;
use crate::error::StrategyError;
use crate::llm_client::{GeminiClient, GenerationBackend};
use crate::prompt::build_prompt;
use crate::report::Report;
use crate::schema::report_schema;
use serde_json::Value;

pub struct StrategyService<B> {
    backend: B,
    schema: Value,
}

impl StrategyService<GeminiClient> {
    /// Service backed by the real Gemini API
    pub fn gemini(settings: ApiSettings) -> Result<Self, StrategyError> {
        Ok(Self::new(GeminiClient::new(settings)?))
    }
}

impl<B: GenerationBackend> StrategyService<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            schema: report_schema(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Generate one report. Callers guarantee the three inputs are non-blank.
    pub async fn request(
        &self,
        product: &str,
        location: &str,
        budget: &str,
    ) -> Result<Report, StrategyError> {
        let prompt = build_prompt(product, location, budget);
        tracing::debug!(prompt_len = prompt.len(), "Requesting strategy report");

        let text = self.backend.generate(&prompt, &self.schema).await?;
        let raw = text.trim();

        Report::from_json(raw).map_err(|e| {
            tracing::error!(raw = %raw, "Failed to parse generation response: {}", e);
            StrategyError::MalformedResponse {
                raw: raw.to_string(),
                reason: e.to_string(),
            }
        })
    }
}
