//! Completed/total indicator for the sweep.
//!
//! Workers bump an atomic counter after each grid point; the runner polls it
//! and redraws the bar. The counter is advisory only, results never travel
//! through it.

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared count of finished grid points.
#[derive(Debug, Clone, Default)]
pub struct ProgressCounter {
    completed: Arc<AtomicUsize>,
}

impl ProgressCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one finished grid point and returns the new total.
    pub fn increment(&self) -> usize {
        self.completed.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn get(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }
}

/// Terminal rendering of a [`ProgressCounter`].
pub struct ProgressReporter {
    bar: ProgressBar,
    last_seen: usize,
}

impl ProgressReporter {
    pub fn new(total: usize, visible: bool) -> Self {
        let bar = if visible { ProgressBar::new(total as u64) } else { ProgressBar::hidden() };
        if let Ok(style) = ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}") {
            bar.set_style(style.progress_chars("+>-"));
        }
        bar.set_length(total as u64);
        Self { bar, last_seen: 0 }
    }

    /// Redraws if the counter moved since the last poll. Returns the observed value.
    pub fn poll(&mut self, counter: &ProgressCounter) -> usize {
        let completed = counter.get();
        if completed != self.last_seen {
            self.last_seen = completed;
            self.bar.set_position(completed as u64);
        }
        completed
    }

    pub fn set_message(&self, message: String) {
        self.bar.set_message(message);
    }

    pub fn finish(&self, message: String) {
        self.bar.finish_with_message(message);
    }
}
