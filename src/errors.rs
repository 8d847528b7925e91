//! Custom error types for fgcross operations.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for fgcross operations
pub type Result<T> = std::result::Result<T, CrosscheckError>;

/// Error type for fgcross operations
#[derive(Error, Debug)]
pub enum CrosscheckError {
    /// Mutually exclusive grouping options were both requested
    #[error("Options '{first}' and '{second}' are mutually exclusive")]
    ConflictingGroupingModes {
        /// The first option name
        first: String,
        /// The second option name
        second: String,
    },

    /// An input file or the haplotype database cannot be read
    #[error("Cannot read {description} '{path}': {reason}")]
    UnreadableInput {
        /// What kind of file was expected (e.g., "input", "haplotype map")
        description: String,
        /// Path to the file
        path: String,
        /// Explanation of the problem
        reason: String,
    },

    /// Invalid parameter value provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name
        parameter: String,
        /// Explanation of why it's invalid
        reason: String,
    },

    /// Fingerprint generation did not finish within its time budget.
    /// Partial results are discarded, never returned.
    #[error("Fingerprint generation exceeded its time budget of {}s", .timeout.as_secs())]
    GenerationTimeout {
        /// The configured time budget
        timeout: Duration,
    },

    /// A fingerprinting task failed; the whole generation phase aborts
    #[error("Fingerprinting failed for '{path}': {message}")]
    FingerprintingFailed {
        /// Path to the file the failing task was fingerprinting
        path: String,
        /// Rendered error chain from the fingerprinting collaborator
        message: String,
    },

    /// Every fingerprinting worker exited before all results were collected
    #[error("All fingerprinting workers stopped before results were collected")]
    WorkerPoolStopped,

    /// Two fingerprints were produced under the same identity key, which
    /// indicates malformed read-group metadata in the inputs
    #[error(
        "Duplicate fingerprint identity '{key}' (samples '{existing_sample}' and '{incoming_sample}')"
    )]
    IdentityCollision {
        /// String form of the colliding identity key
        key: String,
        /// Sample owning the fingerprint already in the store
        existing_sample: String,
        /// Sample owning the fingerprint being inserted
        incoming_sample: String,
    },
}
