//! Progress tracking utilities
//!
//! A counter that logs a line each time it crosses a multiple of its interval,
//! used to report long-running simulation loops.

use crate::logging::{format_count, format_duration};
use log::info;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Logs progress at regular intervals.
///
/// # Example
/// ```
/// use perfect_aligner_lib::progress::ProgressTracker;
///
/// let tracker = ProgressTracker::new("Tiled spots").with_interval(100);
/// for _ in 0..250 {
///     tracker.log_if_needed(1); // Logs at 100, 200
/// }
/// tracker.log_final(); // Logs "Tiled spots 250 (complete in 0s)"
/// assert_eq!(tracker.count(), 250);
/// ```
pub struct ProgressTracker {
    /// Progress is logged when the count crosses multiples of this.
    interval: u64,
    message: String,
    count: AtomicU64,
    started: Instant,
}

impl ProgressTracker {
    /// Create a tracker with an interval of 10,000.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            interval: 10_000,
            message: message.into(),
            count: AtomicU64::new(0),
            started: Instant::now(),
        }
    }

    /// Set the logging interval. Zero is treated as one.
    #[must_use]
    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval.max(1);
        self
    }

    /// Add to the count, logging once for every interval boundary crossed.
    ///
    /// Returns `true` if the count now sits exactly on a boundary.
    ///
    /// ```
    /// use perfect_aligner_lib::progress::ProgressTracker;
    ///
    /// let tracker = ProgressTracker::new("Items").with_interval(100);
    /// assert!(!tracker.log_if_needed(50));  // count=50, no log
    /// assert!(!tracker.log_if_needed(60));  // count=110, logs "Items 100"
    /// assert!(tracker.log_if_needed(90));   // count=200, logs "Items 200"
    /// ```
    pub fn log_if_needed(&self, additional: u64) -> bool {
        let prev = self.count.fetch_add(additional, Ordering::Relaxed);
        let now = prev + additional;
        for boundary in (prev / self.interval + 1)..=(now / self.interval) {
            info!("{} {}", self.message, format_count(boundary * self.interval));
        }
        now > 0 && now.is_multiple_of(self.interval)
    }

    /// Log the final count with elapsed time, unless nothing was counted.
    pub fn log_final(&self) {
        let count = self.count();
        if count > 0 {
            info!(
                "{} {} (complete in {})",
                self.message,
                format_count(count),
                format_duration(self.started.elapsed())
            );
        }
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}
