//! Options for configuring a crosscheck run.
//!
//! [`CrosscheckOptions`] is a clap `Args` struct so a thin binary wrapper can
//! compose it into a command with `#[command(flatten)]`; it can equally be
//! built directly for programmatic use. CLI-level conflicts are declared on
//! the arguments, and [`CrosscheckOptions::validate`] re-checks everything so
//! programmatic construction gets the same guarantees.

use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

use crate::aggregate::GroupingMode;
use crate::errors::{CrosscheckError, Result};
use crate::validation::validate_file_exists;

/// Options for checking that groups of sequencing data appear to come from
/// the same individual.
#[derive(Debug, Clone, Args)]
pub struct CrosscheckOptions {
    /// Input sequencing files to compare fingerprints for
    #[arg(short = 'i', long = "input", required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Output file for crosscheck metrics
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Haplotype database used to pick the sites to fingerprint
    #[arg(short = 'H', long = "haplotype-map")]
    pub haplotype_map: PathBuf,

    /// LOD threshold splitting matches from mismatches. A LOD of 0 means
    /// equal likelihood; negative scores favor different individuals and
    /// positive scores the same individual. Scores between the threshold and
    /// its negation are inconclusive.
    #[arg(
        short = 'L',
        long = "lod-threshold",
        default_value_t = 0.0,
        allow_negative_numbers = true
    )]
    pub lod_threshold: f64,

    /// Roll fingerprints up to the library level and compare libraries
    #[arg(long = "crosscheck-libraries", conflicts_with = "crosscheck_samples")]
    pub crosscheck_libraries: bool,

    /// Roll fingerprints up to the sample level and compare samples
    #[arg(long = "crosscheck-samples")]
    pub crosscheck_samples: bool,

    /// Number of threads used to fingerprint input files
    #[arg(long = "threads", default_value_t = 1)]
    pub threads: usize,

    /// Time budget in seconds for fingerprint generation
    #[arg(long = "timeout-secs", default_value_t = 86_400)]
    pub timeout_secs: u64,

    /// Expect all groups to match irrespective of their sample names. By
    /// default groups with different sample names are expected to mismatch
    /// and groups with the same sample name to match.
    #[arg(long = "expect-all-groups-to-match")]
    pub expect_all_groups_to_match: bool,

    /// Only report pairs that do not relate to each other as expected
    #[arg(long = "output-errors-only")]
    pub output_errors_only: bool,

    /// Rate at which a heterozygous genotype in a normal sample turns
    /// homozygous in the tumor via loss of heterozygosity
    #[arg(long = "loss-of-het-rate", default_value_t = 0.5)]
    pub loss_of_het_rate: f64,

    /// Exit code to use when one or more unexpected results are found
    #[arg(long = "exit-code-when-mismatch", default_value_t = 1)]
    pub exit_code_when_mismatch: i32,
}

impl CrosscheckOptions {
    /// Creates options with defaults for everything beyond the three paths.
    #[must_use]
    pub fn new(inputs: Vec<PathBuf>, output: PathBuf, haplotype_map: PathBuf) -> Self {
        Self {
            inputs,
            output,
            haplotype_map,
            lod_threshold: 0.0,
            crosscheck_libraries: false,
            crosscheck_samples: false,
            threads: 1,
            timeout_secs: 86_400,
            expect_all_groups_to_match: false,
            output_errors_only: false,
            loss_of_het_rate: 0.5,
            exit_code_when_mismatch: 1,
        }
    }

    /// Checks option consistency and input readability, resolving the
    /// grouping mode to crosscheck at.
    ///
    /// # Errors
    /// Returns an error when both grouping modes are requested, an input or
    /// the haplotype map is unreadable, or a parameter is out of range.
    pub fn validate(&self) -> Result<GroupingMode> {
        if self.crosscheck_libraries && self.crosscheck_samples {
            return Err(CrosscheckError::ConflictingGroupingModes {
                first: "crosscheck-libraries".to_string(),
                second: "crosscheck-samples".to_string(),
            });
        }
        if self.inputs.is_empty() {
            return Err(CrosscheckError::InvalidParameter {
                parameter: "input".to_string(),
                reason: "at least one input file is required".to_string(),
            });
        }
        for input in &self.inputs {
            validate_file_exists(input, "input")?;
        }
        validate_file_exists(&self.haplotype_map, "haplotype map")?;
        if self.threads == 0 {
            return Err(CrosscheckError::InvalidParameter {
                parameter: "threads".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.loss_of_het_rate) {
            return Err(CrosscheckError::InvalidParameter {
                parameter: "loss-of-het-rate".to_string(),
                reason: format!("{} is not between 0 and 1", self.loss_of_het_rate),
            });
        }
        if self.exit_code_when_mismatch == 0 {
            return Err(CrosscheckError::InvalidParameter {
                parameter: "exit-code-when-mismatch".to_string(),
                reason: "must be non-zero to distinguish mismatches from success".to_string(),
            });
        }
        Ok(self.grouping_mode())
    }

    /// The grouping mode selected by the flags (read group when neither
    /// grouping flag is set).
    #[must_use]
    pub fn grouping_mode(&self) -> GroupingMode {
        if self.crosscheck_samples {
            GroupingMode::BySample
        } else if self.crosscheck_libraries {
            GroupingMode::ByLibrary
        } else {
            GroupingMode::None
        }
    }

    /// The generation time budget as a `Duration`.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Options whose paths all exist inside `dir`.
    fn valid_options(dir: &TempDir) -> CrosscheckOptions {
        let input = dir.path().join("s1.bam");
        let haplotype_map = dir.path().join("haplotypes.txt");
        std::fs::write(&input, b"bam").unwrap();
        std::fs::write(&haplotype_map, b"map").unwrap();
        CrosscheckOptions::new(vec![input], dir.path().join("metrics.txt"), haplotype_map)
    }

    #[test]
    fn test_defaults_validate_to_read_group_mode() {
        let dir = TempDir::new().unwrap();
        let options = valid_options(&dir);
        assert_eq!(options.validate().unwrap(), GroupingMode::None);
        assert_eq!(options.timeout(), Duration::from_secs(86_400));
    }

    #[test]
    fn test_grouping_flags_resolve_modes() {
        let dir = TempDir::new().unwrap();
        let mut options = valid_options(&dir);
        options.crosscheck_libraries = true;
        assert_eq!(options.validate().unwrap(), GroupingMode::ByLibrary);

        options.crosscheck_libraries = false;
        options.crosscheck_samples = true;
        assert_eq!(options.validate().unwrap(), GroupingMode::BySample);
    }

    #[test]
    fn test_both_grouping_flags_conflict() {
        let dir = TempDir::new().unwrap();
        let mut options = valid_options(&dir);
        options.crosscheck_libraries = true;
        options.crosscheck_samples = true;
        let err = options.validate().unwrap_err();
        assert!(matches!(err, CrosscheckError::ConflictingGroupingModes { .. }));
    }

    #[test]
    fn test_missing_input_fails() {
        let dir = TempDir::new().unwrap();
        let mut options = valid_options(&dir);
        options.inputs.push(dir.path().join("missing.bam"));
        let err = options.validate().unwrap_err();
        assert!(err.to_string().contains("missing.bam"));
    }

    #[test]
    fn test_missing_haplotype_map_fails() {
        let dir = TempDir::new().unwrap();
        let mut options = valid_options(&dir);
        options.haplotype_map = dir.path().join("missing.txt");
        let err = options.validate().unwrap_err();
        assert!(err.to_string().contains("haplotype map"));
    }

    #[test]
    fn test_out_of_range_parameters_fail() {
        let dir = TempDir::new().unwrap();

        let mut options = valid_options(&dir);
        options.threads = 0;
        assert!(matches!(
            options.validate().unwrap_err(),
            CrosscheckError::InvalidParameter { .. }
        ));

        let mut options = valid_options(&dir);
        options.loss_of_het_rate = 1.5;
        assert!(options.validate().unwrap_err().to_string().contains("loss-of-het-rate"));

        let mut options = valid_options(&dir);
        options.exit_code_when_mismatch = 0;
        assert!(options
            .validate()
            .unwrap_err()
            .to_string()
            .contains("exit-code-when-mismatch"));
    }

    #[test]
    fn test_no_inputs_fails() {
        let dir = TempDir::new().unwrap();
        let mut options = valid_options(&dir);
        options.inputs.clear();
        let err = options.validate().unwrap_err();
        assert!(err.to_string().contains("at least one input file"));
    }
}
