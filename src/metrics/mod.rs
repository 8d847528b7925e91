//! Metric records and metrics file I/O.
//!
//! - [`crosscheck`] - The per-pair crosscheck metric record
//! - [`writer`] - Metrics file I/O utilities
//!
//! All metric types implement [`Metric`], providing a consistent interface
//! for serialization and identification.

pub mod crosscheck;
pub mod writer;

use serde::{Deserialize, Serialize};

/// A metric type that can be serialized to TSV files.
pub trait Metric: Serialize + for<'de> Deserialize<'de> + Clone {
    /// Human-readable name for this metric type.
    ///
    /// Used in error messages and logging when writing metrics files.
    fn metric_name() -> &'static str;
}

// Re-export commonly used types
pub use crosscheck::{CrosscheckMetric, DataType};
pub use writer::{write_metrics, write_metrics_auto};
