//! Input validation utilities
//!
//! Validation failures use the structured error types from [`crate::errors`]
//! so callers get contextual information about what was wrong.

use crate::errors::{CrosscheckError, Result};
use std::path::Path;

/// Validate that a file exists
///
/// # Arguments
/// * `path` - Path to validate
/// * `description` - Human-readable description of the file (e.g., "input", "haplotype map")
///
/// # Errors
/// Returns an error if the file does not exist
///
/// # Example
/// ```
/// use fgcross::validation::validate_file_exists;
///
/// let result = validate_file_exists("/nonexistent/file.bam", "input");
/// assert!(result.is_err());
/// ```
pub fn validate_file_exists<P: AsRef<Path>>(path: P, description: &str) -> Result<()> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        return Err(CrosscheckError::UnreadableInput {
            description: description.to_string(),
            path: path_ref.display().to_string(),
            reason: "file does not exist".to_string(),
        });
    }
    Ok(())
}
