//! Utilities for writing metrics files.
//!
//! Thin wrappers around `DelimFile::write_tsv` that give every command-level
//! caller the same error messages.

use anyhow::{Context, Result};
use fgoxide::io::DelimFile;
use serde::Serialize;
use std::path::Path;

use super::Metric;

/// Write metrics to a TSV file with consistent error handling.
///
/// # Arguments
/// * `path` - Path to the output TSV file
/// * `metrics` - The metrics to write (must implement Serialize)
/// * `description` - Human-readable description of the metrics for error messages
///
/// # Errors
/// Returns an error if the file cannot be created or written to
pub fn write_metrics<P: AsRef<Path>, T: Serialize>(
    path: P,
    metrics: &[T],
    description: &str,
) -> Result<()> {
    let path_ref = path.as_ref();
    DelimFile::default()
        .write_tsv(&path_ref, metrics)
        .with_context(|| format!("Failed to write {} metrics: {}", description, path_ref.display()))
}

/// Write metrics implementing the [`Metric`] trait to a TSV file, using the
/// metric's own name for error messages.
///
/// # Errors
/// Returns an error if the file cannot be created or written to
pub fn write_metrics_auto<P: AsRef<Path>, T: Metric>(path: P, metrics: &[T]) -> Result<()> {
    write_metrics(path, metrics, T::metric_name())
}
