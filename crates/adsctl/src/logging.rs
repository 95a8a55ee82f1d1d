//! Logging for adsctl
//!
//! Diagnostics go through `tracing` into a log file under the XDG state
//! directory so raw model output never reaches the terminal. Each invocation
//! also appends one JSON line to `adsctl.jsonl` next to it.

use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const STATE_DIR_NAME: &str = "meta-ads-expert";
const DIAGNOSTIC_LOG: &str = "adsctl.log";
const INVOCATION_LOG: &str = "adsctl.jsonl";

/// Explicit override for the diagnostic log file
pub const LOG_FILE_ENV: &str = "ADSCTL_LOG_FILE";

/// Discover the diagnostic log path with fallback chain
///
/// Priority:
/// 1. $ADSCTL_LOG_FILE
/// 2. $XDG_STATE_HOME/meta-ads-expert/adsctl.log
/// 3. ~/.local/state/meta-ads-expert/adsctl.log
pub fn diagnostic_log_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(LOG_FILE_ENV) {
        return Some(PathBuf::from(path));
    }

    if let Ok(xdg_state) = std::env::var("XDG_STATE_HOME") {
        return Some(
            PathBuf::from(xdg_state)
                .join(STATE_DIR_NAME)
                .join(DIAGNOSTIC_LOG),
        );
    }

    std::env::var("HOME").ok().map(|home| {
        PathBuf::from(home)
            .join(".local/state")
            .join(STATE_DIR_NAME)
            .join(DIAGNOSTIC_LOG)
    })
}

fn open_append(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Where diagnostics end up
#[derive(Debug)]
enum LogSink {
    File(PathBuf, File),
    Stderr,
}

/// Verbose runs and runs without a writable log file log to stderr
fn select_sink(verbose: bool, path: Option<PathBuf>) -> LogSink {
    if verbose {
        return LogSink::Stderr;
    }
    let Some(path) = path else {
        return LogSink::Stderr;
    };
    match open_append(&path) {
        Ok(file) => LogSink::File(path, file),
        Err(e) => {
            crate::output::display_warning(&format!(
                "Cannot open log file {}: {}",
                path.display(),
                e
            ));
            LogSink::Stderr
        }
    }
}

/// Install the global tracing subscriber.
///
/// `--verbose` logs to stderr at debug level; otherwise everything goes to
/// the diagnostic log file. Without a usable log file, warnings and errors
/// still reach stderr. Returns the file path when one is in use.
pub fn init_tracing(verbose: bool) -> Option<PathBuf> {
    let sink = select_sink(verbose, diagnostic_log_path());

    let default_filter = match (&sink, verbose) {
        (_, true) => "warn,ads_common=debug,adsctl=debug",
        (LogSink::File(..), false) => "warn,ads_common=info,adsctl=info",
        (LogSink::Stderr, false) => "warn",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    match sink {
        LogSink::File(path, file) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init();
            Some(path)
        }
        LogSink::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init();
            None
        }
    }
}

/// Log entry for each adsctl invocation
#[derive(Debug, Serialize, Deserialize)]
pub struct LogEntry {
    /// ISO 8601 timestamp
    pub ts: String,

    /// Request ID (UUID)
    pub req_id: String,

    /// Command name
    pub command: String,

    pub exit_code: i32,

    pub duration_ms: u64,

    pub ok: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

impl LogEntry {
    /// Invocation log lives next to the diagnostic log
    pub fn log_path() -> Option<PathBuf> {
        let diagnostic = diagnostic_log_path()?;
        let dir = diagnostic.parent().map(Path::to_path_buf).unwrap_or_default();
        Some(dir.join(INVOCATION_LOG))
    }

    /// Append to the invocation log. Nothing is written when no location is
    /// available.
    pub fn write(&self) -> std::io::Result<()> {
        match Self::log_path() {
            Some(path) => self.write_to(&path),
            None => Ok(()),
        }
    }

    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string(self)?;
        let mut file = open_append(path)?;
        writeln!(file, "{}", json)
    }

    /// Generate request ID
    pub fn generate_req_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// Get current timestamp in ISO 8601 format
    pub fn now() -> String {
        chrono::Utc::now().to_rfc3339()
    }
}
