#![deny(unsafe_code)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # fgcross - genotype fingerprint crosschecking
//!
//! Checks whether groups of sequencing data (read groups, libraries, or
//! samples) appear to come from the same individual, by comparing
//! genotype-likelihood fingerprints pairwise and classifying each pair's LOD
//! score against an identity-derived expectation. Used as a quality-control
//! gate to catch sample swaps, mislabeling, and contamination before
//! downstream analysis.
//!
//! ## Overview
//!
//! - **[`fingerprint`]** - Identity keys, fingerprint values, and the store
//!   mapping one to the other
//! - **[`generate`]** - Concurrent per-file fingerprint generation behind the
//!   [`Fingerprinter`] collaborator seam
//! - **[`aggregate`]** - Rolling fingerprints up to library or sample level
//! - **[`compare`]** - LOD scores, the [`FingerprintComparator`] collaborator
//!   seam, and the five-outcome classifier
//! - **[`crosscheck`]** - The all-pairs comparison driver
//! - **[`run`]** - End-to-end orchestration returning the process exit code
//!
//! ### Utilities
//!
//! - **[`metrics`]** - Metric records and TSV output
//! - **[`options`]** - Composable CLI option struct with validation
//! - **[`logging`]** - Formatted progress and summary logging
//! - **[`validation`]** - Input validation helpers
//!
//! The genotype-likelihood math itself (turning aligned bases at known
//! variant sites into fingerprints, and fingerprint pairs into LOD scores)
//! lives in external collaborators; this crate orchestrates generation,
//! merges and aggregates results, and classifies outcomes against policy.

pub mod aggregate;
pub mod compare;
pub mod crosscheck;
pub mod errors;
pub mod fingerprint;
pub mod generate;
pub mod logging;
pub mod metrics;
pub mod options;
pub mod run;
pub mod validation;

pub use aggregate::{aggregate, GroupingMode};
pub use compare::{FingerprintComparator, FingerprintResult, MatchResults};
pub use crosscheck::{
    crosscheck_fingerprints, CrosscheckConfig, CrosscheckOutcome, GENOTYPING_ERROR_RATE,
};
pub use errors::{CrosscheckError, Result};
pub use fingerprint::{Evidence, Fingerprint, FingerprintId, FingerprintStore};
pub use generate::{generate_fingerprints, Fingerprinter};
pub use metrics::{CrosscheckMetric, DataType, Metric};
pub use options::CrosscheckOptions;
pub use run::run_crosscheck;
