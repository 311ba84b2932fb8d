//! Indeterminate progress indicator for long-running calls.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// A spinner that is cleared when dropped.
///
/// Hold it for the duration of the slow call; every exit path, including `?`
/// and panics, removes it from the terminal.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    /// Start a spinner on stderr with `message`.
    pub fn start(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    /// A spinner that draws nothing.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}
