//! Error codes and exit status for adsctl
//!
//! Generation failures are reported to the user with one fixed message; the
//! exit code is the only place the failure kind surfaces.

use crate::logging::ErrorDetails;
use ads_common::StrategyErrorKind;

/// Exit code for success
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for general errors
pub const EXIT_GENERAL_ERROR: i32 = 1;

/// Exit code when a required field is blank
pub const EXIT_INVALID_INPUT: i32 = 64;

/// Exit code when the model output is not a valid report
pub const EXIT_MALFORMED_RESPONSE: i32 = 65;

/// Exit code when the API call itself failed
pub const EXIT_TRANSPORT_FAILURE: i32 = 70;

/// Exit code when the API credential is not configured
pub const EXIT_CONFIG_ERROR: i32 = 78;

pub fn exit_code_for(kind: StrategyErrorKind) -> i32 {
    match kind {
        StrategyErrorKind::Configuration => EXIT_CONFIG_ERROR,
        StrategyErrorKind::MalformedResponse => EXIT_MALFORMED_RESPONSE,
        StrategyErrorKind::Transport => EXIT_TRANSPORT_FAILURE,
    }
}

/// Result of one command, recorded in the invocation log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub exit_code: i32,
    pub error: Option<ErrorDetails>,
}

impl Outcome {
    pub fn ok() -> Self {
        Self {
            exit_code: EXIT_SUCCESS,
            error: None,
        }
    }

    pub fn failed(exit_code: i32, code: &str, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            error: Some(ErrorDetails {
                code: code.to_string(),
                message: message.into(),
            }),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.exit_code == EXIT_SUCCESS
    }
}
