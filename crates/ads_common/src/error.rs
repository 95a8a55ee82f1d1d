//! Error types for the strategy pipeline.

use thiserror::Error;

/// Failure of one strategy request
#[derive(Error, Debug)]
pub enum StrategyError {
    /// Credential missing from the environment; raised before any network call
    #[error("{0} environment variable not set")]
    Configuration(String),

    /// Response text is not valid JSON or does not match the report contract
    #[error("The AI returned an invalid response format: {reason}")]
    MalformedResponse { raw: String, reason: String },

    /// Any failure from the API call itself, propagated as-is
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Stable classification of [`StrategyError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyErrorKind {
    Configuration,
    MalformedResponse,
    Transport,
}

impl StrategyErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyErrorKind::Configuration => "configuration",
            StrategyErrorKind::MalformedResponse => "malformed_response",
            StrategyErrorKind::Transport => "transport",
        }
    }
}

impl StrategyError {
    pub fn kind(&self) -> StrategyErrorKind {
        match self {
            StrategyError::Configuration(_) => StrategyErrorKind::Configuration,
            StrategyError::MalformedResponse { .. } => StrategyErrorKind::MalformedResponse,
            StrategyError::Transport(_) => StrategyErrorKind::Transport,
        }
    }
}
