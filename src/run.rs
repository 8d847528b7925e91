//! End-to-end crosscheck orchestration.

use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;

use crate::aggregate::aggregate;
use crate::compare::FingerprintComparator;
use crate::crosscheck::{crosscheck_fingerprints, CrosscheckConfig, GENOTYPING_ERROR_RATE};
use crate::fingerprint::Evidence;
use crate::generate::{generate_fingerprints, Fingerprinter};
use crate::logging::{log_crosscheck_summary, OperationTimer};
use crate::metrics::write_metrics_auto;
use crate::options::CrosscheckOptions;

/// Runs the full crosscheck flow: validate options, fingerprint the inputs
/// concurrently, roll fingerprints up to the configured granularity, compare
/// all pairs, and write the metric records.
///
/// Returns the process exit code the caller should terminate with: `0` when
/// every pair related as expected, the configured mismatch code otherwise.
/// Fatal errors surface before any metric record is written.
///
/// # Errors
/// Returns an error for invalid options, a generation-phase failure
/// (timeout, task failure, identity collision), or an unwritable output.
pub fn run_crosscheck<E, F, C>(
    options: &CrosscheckOptions,
    fingerprinter: Arc<F>,
    comparator: &C,
) -> Result<i32>
where
    E: Evidence + Send + 'static,
    F: Fingerprinter<E> + ?Sized + 'static,
    C: FingerprintComparator<E>,
{
    let mode = options.validate()?;
    info!("Done checking input files; fingerprinting {} files", options.inputs.len());

    let timer = OperationTimer::new("Fingerprinting input files");
    let store =
        generate_fingerprints(fingerprinter, &options.inputs, options.threads, options.timeout())?;
    timer.log_completion(store.len() as u64);

    let store = aggregate(&store, mode);
    let data_type = mode.data_type();
    info!("Crosschecking {} {} fingerprints", store.len(), data_type);

    let config = CrosscheckConfig {
        lod_threshold: options.lod_threshold,
        expect_all_groups_to_match: options.expect_all_groups_to_match,
        output_errors_only: options.output_errors_only,
        genotyping_error_rate: GENOTYPING_ERROR_RATE,
        loss_of_het_rate: options.loss_of_het_rate,
    };
    let outcome = crosscheck_fingerprints(&store, data_type, comparator, &config);

    write_metrics_auto(&options.output, &outcome.metrics)?;
    log_crosscheck_summary(&outcome);

    if outcome.is_clean() {
        info!("All groups related as expected.");
    } else {
        warn!("At least two groups did not relate as expected.");
    }
    Ok(outcome.exit_code(options.exit_code_when_mismatch))
}
