//! Rotating status messages shown while a report is being generated.
//!
//! The ticker is a scoped guard: it publishes the first message on start,
//! advances every [`STATUS_INTERVAL`] and wraps, and stops for good when it
//! is dropped. Updates are published under the `live` lock, so none can land
//! after release even on a multi-threaded runtime.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

/// Fixed loading messages, in display order
pub const STATUS_MESSAGES: [&str; 6] = [
    "Analyzing your product...",
    "Building buyer persona...",
    "Finding best competitors...",
    "Researching audience behaviours...",
    "Cross-referencing market data...",
    "Finalizing expert strategy...",
];

pub const STATUS_INTERVAL: Duration = Duration::from_millis(2500);

/// Current loading message, `None` outside of loading
pub type StatusSender = Arc<watch::Sender<Option<&'static str>>>;

pub struct StatusTicker {
    status: StatusSender,
    live: Arc<Mutex<bool>>,
    handle: JoinHandle<()>,
}

impl StatusTicker {
    /// Publish the first message and start cycling. Requires a tokio runtime.
    pub fn start(status: StatusSender) -> Self {
        status.send_replace(Some(STATUS_MESSAGES[0]));

        let live = Arc::new(Mutex::new(true));
        let handle = tokio::spawn({
            let status = status.clone();
            let live = live.clone();
            async move {
                let mut interval = interval_at(Instant::now() + STATUS_INTERVAL, STATUS_INTERVAL);
                let mut index = 0;
                loop {
                    interval.tick().await;
                    index = (index + 1) % STATUS_MESSAGES.len();
                    {
                        let live = live.lock().unwrap_or_else(PoisonError::into_inner);
                        if !*live {
                            break;
                        }
                        status.send_replace(Some(STATUS_MESSAGES[index]));
                    }
                }
            }
        });

        tracing::debug!("Status ticker started");
        Self {
            status,
            live,
            handle,
        }
    }
}

impl Drop for StatusTicker {
    fn drop(&mut self) {
        {
            let mut live = self.live.lock().unwrap_or_else(PoisonError::into_inner);
            *live = false;
            self.status.send_replace(None);
        }
        self.handle.abort();
        tracing::debug!("Status ticker released");
    }
}
