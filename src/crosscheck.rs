//! The all-pairs crosscheck driver.
//!
//! Enumerates every unordered pair of store entries in a frozen order,
//! obtains LOD scores from the comparator, classifies each pair against its
//! identity-derived expectation, and collects one metric record per reported
//! pair. The loop is deliberately single-threaded and strictly sequential:
//! the emitted record order and the unexpected count must be reproducible
//! for identical input.

use crate::compare::{FingerprintComparator, FingerprintResult};
use crate::fingerprint::{Evidence, FingerprintStore};
use crate::metrics::{CrosscheckMetric, DataType};

/// The rate at which a given genotype is expected to change for an
/// individual (exceedingly small).
pub const GENOTYPING_ERROR_RATE: f64 = 1e-6;

/// Policy knobs for one crosscheck run.
#[derive(Debug, Clone)]
pub struct CrosscheckConfig {
    /// LOD threshold splitting matches from mismatches. A mismatch needs
    /// `lod < lod_threshold`, a match `lod > -lod_threshold`; scores in
    /// between are inconclusive.
    pub lod_threshold: f64,
    /// Expect every pair to match, irrespective of sample names. When unset,
    /// pairs with equal sample names are expected to match and pairs with
    /// different sample names to mismatch.
    pub expect_all_groups_to_match: bool,
    /// Only emit records for pairs that did not relate as expected.
    /// Inconclusive pairs are never the expected outcome, so they are
    /// always emitted.
    pub output_errors_only: bool,
    /// Genotyping error rate handed through to the comparator.
    pub genotyping_error_rate: f64,
    /// Loss-of-heterozygosity rate handed through to the comparator.
    pub loss_of_het_rate: f64,
}

impl Default for CrosscheckConfig {
    fn default() -> Self {
        Self {
            lod_threshold: 0.0,
            expect_all_groups_to_match: false,
            output_errors_only: false,
            genotyping_error_rate: GENOTYPING_ERROR_RATE,
            loss_of_het_rate: 0.5,
        }
    }
}

/// Result of crosschecking a store: the number of conclusive pairs that did
/// not relate as expected, and one metric record per reported pair in pair
/// enumeration order.
#[derive(Debug, Clone, Default)]
pub struct CrosscheckOutcome {
    /// Conclusive pairs whose outcome was not the expected one.
    pub unexpected_count: usize,
    /// Metric records, in enumeration order.
    pub metrics: Vec<CrosscheckMetric>,
}

impl CrosscheckOutcome {
    /// True when every conclusive pair related as expected.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.unexpected_count == 0
    }

    /// The process exit code for this outcome: `0` when clean, otherwise the
    /// caller-configured mismatch code.
    #[must_use]
    pub fn exit_code(&self, exit_code_when_mismatch: i32) -> i32 {
        if self.is_clean() { 0 } else { exit_code_when_mismatch }
    }
}

/// Crosschecks every unordered pair of entries in `store`.
///
/// Emits `N * (N - 1) / 2` records for `N` entries, or the unexpected subset
/// of those when [`CrosscheckConfig::output_errors_only`] is set. Inconclusive
/// pairs count neither as expected nor as unexpected.
pub fn crosscheck_fingerprints<E, C>(
    store: &FingerprintStore<E>,
    data_type: DataType,
    comparator: &C,
    config: &CrosscheckConfig,
) -> CrosscheckOutcome
where
    E: Evidence,
    C: FingerprintComparator<E>,
{
    // Freeze the enumeration order before comparing.
    let entries: Vec<_> = store.iter().collect();
    let mut outcome = CrosscheckOutcome::default();

    for i in 0..entries.len() {
        let (lhs_id, lhs_fingerprint) = entries[i];
        for &(rhs_id, rhs_fingerprint) in &entries[i + 1..] {
            let expected_to_match =
                config.expect_all_groups_to_match || lhs_id.sample == rhs_id.sample;

            let scores = comparator.compare(
                lhs_fingerprint,
                rhs_fingerprint,
                config.genotyping_error_rate,
                config.loss_of_het_rate,
            );
            let result = FingerprintResult::classify(expected_to_match, scores.lod, config.lod_threshold);

            if !config.output_errors_only || result.is_expected() != Some(true) {
                outcome.metrics.push(CrosscheckMetric::from_pair(
                    result, &scores, lhs_id, rhs_id, data_type,
                ));
            }
            if result.is_expected() == Some(false) {
                outcome.unexpected_count += 1;
            }
        }
    }

    outcome
}
