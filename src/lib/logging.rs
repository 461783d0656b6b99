//! Logging utilities for formatted output.
//!
//! Number and time formatting shared by progress messages, plus the summary
//! logged at the end of a simulation.

use std::time::{Duration, Instant};

use crate::reconcile::Reconciliation;
use crate::sam::SamSummary;

/// Formats a count with thousands separators.
///
/// # Examples
///
/// ```
/// use perfect_aligner_lib::logging::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(1234567), "1,234,567");
/// ```
#[must_use]
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Formats a fraction as a percentage with `decimals` places.
///
/// # Examples
///
/// ```
/// use perfect_aligner_lib::logging::format_percent;
///
/// assert_eq!(format_percent(0.9543, 2), "95.43%");
/// assert_eq!(format_percent(1.0, 0), "100%");
/// ```
#[must_use]
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.decimals$}%", value * 100.0, decimals = decimals)
}

/// Formats a duration in human-readable form ("45s", "2m 15s", "1h 30m").
///
/// # Examples
///
/// ```
/// use perfect_aligner_lib::logging::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_secs(135)), "2m 15s");
/// ```
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        let mins = secs / 60;
        let remaining_secs = secs % 60;
        if remaining_secs == 0 { format!("{mins}m") } else { format!("{mins}m {remaining_secs}s") }
    } else {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        if mins == 0 { format!("{hours}h") } else { format!("{hours}h {mins}m") }
    }
}

/// Logs what a simulation produced: both tiling passes, the reconciled
/// reference, and the records written.
#[allow(clippy::cast_precision_loss)]
pub fn log_simulation_summary(reconciliation: &Reconciliation, sam: &SamSummary) {
    let stats = &reconciliation.stats;
    let reference_length = reconciliation.reference.len();
    let resolved = reconciliation.resolved();

    log::info!("Simulation Summary:");
    log::info!("  Primary alignments: {}", format_count(reconciliation.primary.len() as u64));
    log::info!("  Secondary alignments: {}", format_count(reconciliation.secondary.len() as u64));
    log::info!(
        "  Common reads: {} ({} overlapping, left as is)",
        format_count(stats.common as u64),
        format_count(stats.overlapping as u64)
    );
    log::info!("  Reference length: {}", format_count(reference_length as u64));
    if reference_length > 0 {
        log::info!(
            "  Resolved bases: {} ({})",
            format_count(resolved as u64),
            format_percent(resolved as f64 / reference_length as f64, 2)
        );
    }
    log::info!("  Records written: {}", format_count(sam.total_records()));
    if sam.suppressed_secondaries > 0 {
        log::info!(
            "  Suppressed {} secondary alignments with too many mismatches.",
            format_count(sam.suppressed_secondaries)
        );
    }
}

/// Operation timing helper.
///
/// ```no_run
/// use perfect_aligner_lib::logging::OperationTimer;
///
/// let timer = OperationTimer::new("Simulating");
/// // ... do work ...
/// timer.log_completion(10_000);
/// ```
pub struct OperationTimer {
    operation: String,
    start_time: Instant,
}

impl OperationTimer {
    /// Creates a new operation timer and logs the start.
    #[must_use]
    pub fn new(operation: &str) -> Self {
        log::info!("{operation} ...");
        Self { operation: operation.to_string(), start_time: Instant::now() }
    }

    /// Logs completion with the number of records produced.
    pub fn log_completion(&self, count: u64) {
        log::info!(
            "{} completed: {} records in {}",
            self.operation,
            format_count(count),
            format_duration(self.start_time.elapsed())
        );
    }
}
