//! Application state controller.
//!
//! Owns the `Idle | Loading | Success | Failed` state and is the only thing
//! that mutates it. `submit` takes `&mut self`, so a second submission cannot
//! start while one is in flight. Every failure kind collapses into one fixed
//! user-facing message; the technical error goes to the log.

use crate::error::StrategyErrorKind;
use crate::form::{FormError, StrategyForm};
use crate::llm_client::GenerationBackend;
use crate::report::Report;
use crate::strategy::StrategyService;
use crate::ticker::{StatusSender, StatusTicker};
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

/// Message shown for any generation failure
pub const GENERIC_FAILURE_MESSAGE: &str =
    "An error occurred while generating the report. Please check the logs for details and try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    Idle,
    Loading,
    Success(Report),
    Failed(String),
}

/// State tag without payload, for observers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Idle => write!(f, "idle"),
            Phase::Loading => write!(f, "loading"),
            Phase::Success => write!(f, "success"),
            Phase::Failed => write!(f, "failed"),
        }
    }
}

impl AppState {
    pub fn phase(&self) -> Phase {
        match self {
            AppState::Idle => Phase::Idle,
            AppState::Loading => Phase::Loading,
            AppState::Success(_) => Phase::Success,
            AppState::Failed(_) => Phase::Failed,
        }
    }

    pub fn report(&self) -> Option<&Report> {
        match self {
            AppState::Success(report) => Some(report),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            AppState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

pub struct StrategyController<B> {
    service: StrategyService<B>,
    state: AppState,
    phase: watch::Sender<Phase>,
    status: StatusSender,
    last_error: Option<StrategyErrorKind>,
}

impl<B: GenerationBackend> StrategyController<B> {
    pub fn new(service: StrategyService<B>) -> Self {
        let (phase, _) = watch::channel(Phase::Idle);
        let (status, _) = watch::channel(None);
        Self {
            service,
            state: AppState::Idle,
            phase,
            status: Arc::new(status),
            last_error: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn service(&self) -> &StrategyService<B> {
        &self.service
    }

    /// Observe state transitions
    pub fn subscribe_phase(&self) -> watch::Receiver<Phase> {
        self.phase.subscribe()
    }

    /// Observe the rotating loading message
    pub fn subscribe_status(&self) -> watch::Receiver<Option<&'static str>> {
        self.status.subscribe()
    }

    /// Kind of the last failure, for exit codes. Never shown to the user.
    pub fn last_error_kind(&self) -> Option<StrategyErrorKind> {
        self.last_error
    }

    /// Drop any report or error and return to `Idle`
    pub fn reset(&mut self) {
        self.last_error = None;
        self.transition(AppState::Idle);
    }

    /// Validate the form and, if complete, run one generation request.
    ///
    /// An incomplete form is rejected without touching state or the network.
    pub async fn submit(&mut self, form: &StrategyForm) -> Result<&AppState, FormError> {
        form.validate()?;

        self.last_error = None;
        self.transition(AppState::Loading);

        let outcome = {
            let _ticker = StatusTicker::start(self.status.clone());
            self.service
                .request(&form.product, &form.location, &form.budget)
                .await
        };

        match outcome {
            Ok(report) => self.transition(AppState::Success(report)),
            Err(e) => {
                tracing::error!(kind = e.kind().as_str(), "Report generation failed: {}", e);
                self.last_error = Some(e.kind());
                self.transition(AppState::Failed(GENERIC_FAILURE_MESSAGE.to_string()));
            }
        }

        Ok(&self.state)
    }

    fn transition(&mut self, next: AppState) {
        tracing::info!(from = %self.state.phase(), to = %next.phase(), "State transition");
        self.phase.send_replace(next.phase());
        self.state = next;
    }
}
