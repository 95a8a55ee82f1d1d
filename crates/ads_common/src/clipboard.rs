//! Copy-to-clipboard for the copy-paste targeting block.
//!
//! The system clipboard is reached through `arboard`. `CopyFeedback` tracks
//! the transient "copied" state shown after a successful copy.

use crate::report::Report;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

/// How long the copy confirmation stays visible
pub const COPY_CONFIRMATION: Duration = Duration::from_secs(2);

#[derive(Error, Debug)]
pub enum ClipboardError {
    /// No clipboard could be opened (no display server, unsupported platform)
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    /// The clipboard was opened but refused the text
    #[error("clipboard rejected the text: {0}")]
    Rejected(String),
}

impl ClipboardError {
    pub fn code(&self) -> &'static str {
        match self {
            ClipboardError::Unavailable(_) => "clipboard_unavailable",
            ClipboardError::Rejected(_) => "clipboard_rejected",
        }
    }

    fn opening(err: arboard::Error) -> Self {
        ClipboardError::Unavailable(err.to_string())
    }

    fn writing(err: arboard::Error) -> Self {
        ClipboardError::Rejected(err.to_string())
    }
}

/// Write-only clipboard
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The platform clipboard, opened on first use.
///
/// On X11 the copied text is served by this process, so it stays available
/// only while the handle lives unless a clipboard manager takes it over.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Option<arboard::Clipboard>,
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.handle.is_none() {
            self.handle = Some(arboard::Clipboard::new().map_err(ClipboardError::opening)?);
        }
        if let Some(clipboard) = self.handle.as_mut() {
            clipboard.set_text(text).map_err(ClipboardError::writing)?;
        }
        tracing::debug!(bytes = text.len(), "Copied to clipboard");
        Ok(())
    }
}

/// In-memory clipboard for tests and headless use
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl ClipboardSink for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Transient "copied" confirmation.
///
/// Uses tokio's clock so paused-time tests are exact.
#[derive(Debug, Default)]
pub struct CopyFeedback {
    confirmed_until: Option<Instant>,
}

impl CopyFeedback {
    /// Start (or restart) the confirmation window
    pub fn confirm(&mut self) {
        self.confirmed_until = Some(Instant::now() + COPY_CONFIRMATION);
    }

    /// Time left until the confirmation reverts, `None` once it has
    pub fn remaining(&self) -> Option<Duration> {
        let until = self.confirmed_until?;
        let now = Instant::now();
        if now < until {
            Some(until - now)
        } else {
            None
        }
    }
}

/// Copy the targeting block verbatim and start the confirmation window
pub fn copy_targeting(
    report: &Report,
    sink: &mut dyn ClipboardSink,
    feedback: &mut CopyFeedback,
) -> Result<(), ClipboardError> {
    sink.set_text(&report.copy_paste_targeting)?;
    feedback.confirm();
    Ok(())
}
