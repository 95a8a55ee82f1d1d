//! Loading spinner that follows the controller's rotating status message.
//!
//! Only drawn when stderr is a terminal and NO_COLOR is unset. Spinner
//! failures never affect the request.

use ads_common::ticker::STATUS_MESSAGES;
use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub struct LoadingSpinner {
    spinner: Option<ProgressBar>,
    follower: Option<JoinHandle<()>>,
    start_time: Instant,
}

fn spinner_enabled() -> bool {
    Term::stderr().is_term() && std::env::var_os("NO_COLOR").is_none()
}

impl LoadingSpinner {
    /// Start a spinner showing whatever `status` publishes
    pub fn follow(status: watch::Receiver<Option<&'static str>>) -> Self {
        let start_time = Instant::now();
        if !spinner_enabled() {
            return Self {
                spinner: None,
                follower: None,
                start_time,
            };
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", " "])
            .template("{spinner} {msg}")
        {
            pb.set_style(style);
        }
        let initial = (*status.borrow()).unwrap_or(STATUS_MESSAGES[0]);
        pb.set_message(initial);
        pb.enable_steady_tick(Duration::from_millis(80));

        let follower = tokio::spawn(follow_status(pb.clone(), status));

        Self {
            spinner: Some(pb),
            follower: Some(follower),
            start_time,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.spinner.is_some()
    }

    /// Clear the spinner line and return the elapsed time
    pub fn finish(mut self) -> Duration {
        self.stop();
        self.start_time.elapsed()
    }

    fn stop(&mut self) {
        if let Some(follower) = self.follower.take() {
            follower.abort();
        }
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl Drop for LoadingSpinner {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn follow_status(pb: ProgressBar, mut status: watch::Receiver<Option<&'static str>>) {
    while status.changed().await.is_ok() {
        let current = *status.borrow_and_update();
        if let Some(message) = current {
            pb.set_message(message);
        }
    }
}
