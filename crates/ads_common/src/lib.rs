//! Ads Common - Shared types and logic for the Meta Ads Expert tool
//!
//! Builds the expert prompt, calls the structured-output generation API,
//! validates the report and exports it. No terminal I/O lives here.

pub mod clipboard;
pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod form;
pub mod llm_client;
pub mod prompt;
pub mod render;
pub mod report;
pub mod schema;
pub mod strategy;
pub mod ticker;

pub use config::AdsConfig;
pub use controller::{AppState, Phase, StrategyController, GENERIC_FAILURE_MESSAGE};
pub use error::{StrategyError, StrategyErrorKind};
pub use form::{FormError, FormField, StrategyForm};
pub use llm_client::{GeminiClient, GenerationBackend};
pub use report::*;
pub use strategy::StrategyService;
