//! Logging utilities for formatted output.
//!
//! Consistent formatting for counts, durations, and rates, plus the
//! crosscheck run summary.

use std::time::{Duration, Instant};

use crate::compare::FingerprintResult;
use crate::crosscheck::CrosscheckOutcome;

/// Formats a count with thousands separators.
///
/// # Example
/// ```
/// use fgcross::logging::format_count;
///
/// assert_eq!(format_count(1_234_567), "1,234,567");
/// assert_eq!(format_count(123), "123");
/// ```
#[must_use]
pub fn format_count(n: u64) -> String {
    let s = n.to_string();
    let bytes = s.as_bytes();

    bytes
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap())
        .collect::<Vec<_>>()
        .join(",")
}

/// Formats a duration in human-readable form.
///
/// # Example
/// ```
/// use fgcross::logging::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_secs(45)), "45s");
/// assert_eq!(format_duration(Duration::from_secs(135)), "2m 15s");
/// assert_eq!(format_duration(Duration::from_secs(5400)), "1h 30m");
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

/// Formats a rate (items per second) with appropriate units.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_rate(count: u64, duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 0.001 {
        return format!("{} items/s", format_count(count));
    }

    let rate = count as f64 / secs;
    if rate >= 1.0 {
        format!("{} items/s", format_count(rate as u64))
    } else {
        let items_per_min = count as f64 / (secs / 60.0);
        format!("{items_per_min:.1} items/min")
    }
}

/// Logs a formatted summary of a crosscheck run: how many pairs were
/// reported, the breakdown by outcome, and the unexpected total.
pub fn log_crosscheck_summary(outcome: &CrosscheckOutcome) {
    use crate::compare::FingerprintResult::{
        ExpectedMatch, ExpectedMismatch, Inconclusive, UnexpectedMatch, UnexpectedMismatch,
    };

    log::info!("Crosscheck Summary:");
    log::info!("  Comparisons reported: {}", format_count(outcome.metrics.len() as u64));
    for result in
        [ExpectedMatch, ExpectedMismatch, UnexpectedMatch, UnexpectedMismatch, Inconclusive]
    {
        let count = outcome.metrics.iter().filter(|m| m.result == result).count();
        if count > 0 {
            log::info!("  {result}: {}", format_count(count as u64));
        }
    }
    log::info!("  Unexpected results: {}", format_count(outcome.unexpected_count as u64));
}

/// Operation timing and summary helper.
///
/// # Examples
///
/// ```no_run
/// use fgcross::logging::OperationTimer;
///
/// let timer = OperationTimer::new("Fingerprinting input files");
///
/// // ... do work ...
///
/// timer.log_completion(27); // Log with item count
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

    /// Logs the completion with item count and rate.
    pub fn log_completion(&self, count: u64) {
        let duration = self.start_time.elapsed();
        log::info!(
            "{} completed: {} in {} ({})",
            self.operation,
            format_count(count),
            format_duration(duration),
            format_rate(count, duration)
        );
    }
}
