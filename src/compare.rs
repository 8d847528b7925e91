//! Pairwise comparison scores and the outcome classifier.
//!
//! The numeric LOD computation lives in the external likelihood collaborator
//! behind [`FingerprintComparator`]; this module owns the policy that turns a
//! score plus an identity-derived expectation into one of five outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::fingerprint::Fingerprint;

/// Log-odds scores from comparing two fingerprints.
///
/// `lod` is the log10 odds that the two fingerprints come from the same
/// individual under the general model; the two directional scores interpret
/// the pair asymmetrically as a tumor/normal duo. Produced fresh per pair and
/// consumed by exactly one metric record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResults {
    /// LOD for same individual vs. different individuals.
    pub lod: f64,
    /// Directional LOD treating the left side as the tumor.
    pub lod_tumor_normal: f64,
    /// Directional LOD treating the left side as the normal.
    pub lod_normal_tumor: f64,
}

impl MatchResults {
    /// Creates a result from the three model scores.
    #[must_use]
    pub fn new(lod: f64, lod_tumor_normal: f64, lod_normal_tumor: f64) -> Self {
        Self { lod, lod_tumor_normal, lod_normal_tumor }
    }
}

/// Comparison collaborator: computes LOD scores for a pair of fingerprints.
///
/// Implementations hold whatever genotype-likelihood state they need (e.g.,
/// the haplotype panel); this crate only routes fingerprints and policy
/// parameters through.
pub trait FingerprintComparator<E> {
    /// Compares two fingerprints under the given genotyping error rate and
    /// tumor loss-of-heterozygosity rate.
    fn compare(
        &self,
        lhs: &Fingerprint<E>,
        rhs: &Fingerprint<E>,
        genotyping_error_rate: f64,
        loss_of_het_rate: f64,
    ) -> MatchResults;
}

/// Classified outcome of one pairwise fingerprint comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FingerprintResult {
    /// The pair was expected to match and did.
    ExpectedMatch,
    /// The pair was expected to mismatch and did.
    ExpectedMismatch,
    /// The pair was expected to mismatch but matched.
    UnexpectedMatch,
    /// The pair was expected to match but mismatched.
    UnexpectedMismatch,
    /// The score fell inside the dead zone; neither match nor mismatch can
    /// be called.
    Inconclusive,
}

impl FingerprintResult {
    /// Classifies a LOD score against the expectation for the pair.
    ///
    /// A mismatch needs `lod < threshold` and a match needs `lod > -threshold`,
    /// so a negative threshold leaves the band `(threshold, -threshold)`
    /// inconclusive. The disqualifying branch is checked before the
    /// confirming one; when the two conditions overlap (positive threshold)
    /// the pair is classified against its expectation rather than waved
    /// through.
    ///
    /// # Example
    /// ```
    /// use fgcross::compare::FingerprintResult;
    ///
    /// let result = FingerprintResult::classify(true, 5.0, 0.0);
    /// assert_eq!(result, FingerprintResult::ExpectedMatch);
    /// assert_eq!(FingerprintResult::classify(true, 1.0, -2.0), FingerprintResult::Inconclusive);
    /// ```
    #[must_use]
    pub fn classify(expected_to_match: bool, lod: f64, threshold: f64) -> Self {
        if expected_to_match {
            if lod < threshold {
                Self::UnexpectedMismatch
            } else if lod > -threshold {
                Self::ExpectedMatch
            } else {
                Self::Inconclusive
            }
        } else if lod > -threshold {
            Self::UnexpectedMatch
        } else if lod < threshold {
            Self::ExpectedMismatch
        } else {
            Self::Inconclusive
        }
    }

    /// Whether the pair related as expected; `None` when inconclusive.
    #[must_use]
    pub fn is_expected(&self) -> Option<bool> {
        match self {
            Self::ExpectedMatch | Self::ExpectedMismatch => Some(true),
            Self::UnexpectedMatch | Self::UnexpectedMismatch => Some(false),
            Self::Inconclusive => None,
        }
    }

    /// Whether the outcome denotes a match; `None` when inconclusive.
    #[must_use]
    pub fn is_match(&self) -> Option<bool> {
        match self {
            Self::ExpectedMatch | Self::UnexpectedMatch => Some(true),
            Self::ExpectedMismatch | Self::UnexpectedMismatch => Some(false),
            Self::Inconclusive => None,
        }
    }
}

impl fmt::Display for FingerprintResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ExpectedMatch => "EXPECTED_MATCH",
            Self::ExpectedMismatch => "EXPECTED_MISMATCH",
            Self::UnexpectedMatch => "UNEXPECTED_MATCH",
            Self::UnexpectedMismatch => "UNEXPECTED_MISMATCH",
            Self::Inconclusive => "INCONCLUSIVE",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::FingerprintResult::{
        ExpectedMatch, ExpectedMismatch, Inconclusive, UnexpectedMatch, UnexpectedMismatch,
    };

    #[test]
    fn test_classify_with_zero_threshold() {
        assert_eq!(FingerprintResult::classify(true, 5.0, 0.0), ExpectedMatch);
        assert_eq!(FingerprintResult::classify(true, -5.0, 0.0), UnexpectedMismatch);
        assert_eq!(FingerprintResult::classify(false, 5.0, 0.0), UnexpectedMatch);
        assert_eq!(FingerprintResult::classify(false, -5.0, 0.0), ExpectedMismatch);
    }

    // With a zero threshold only a LOD of exactly zero is inconclusive.
    #[test]
    fn test_zero_threshold_dead_zone_is_a_point() {
        assert_eq!(FingerprintResult::classify(true, 0.0, 0.0), Inconclusive);
        assert_eq!(FingerprintResult::classify(false, 0.0, 0.0), Inconclusive);
        for lod in [-1e-9, 1e-9, -3.0, 3.0] {
            assert_ne!(FingerprintResult::classify(true, lod, 0.0), Inconclusive);
            assert_ne!(FingerprintResult::classify(false, lod, 0.0), Inconclusive);
        }
    }

    // A negative threshold widens the dead zone to (threshold, -threshold).
    #[test]
    fn test_negative_threshold_dead_zone() {
        assert_eq!(FingerprintResult::classify(true, 1.0, -2.0), Inconclusive);
        assert_eq!(FingerprintResult::classify(true, -1.0, -2.0), Inconclusive);
        assert_eq!(FingerprintResult::classify(false, 1.0, -2.0), Inconclusive);
        assert_eq!(FingerprintResult::classify(true, 3.0, -2.0), ExpectedMatch);
        assert_eq!(FingerprintResult::classify(true, -3.0, -2.0), UnexpectedMismatch);
        assert_eq!(FingerprintResult::classify(false, 3.0, -2.0), UnexpectedMatch);
        assert_eq!(FingerprintResult::classify(false, -3.0, -2.0), ExpectedMismatch);
    }

    // With a positive threshold the match and mismatch conditions overlap;
    // the expectation-disqualifying branch must win.
    #[test]
    fn test_positive_threshold_checks_disqualifying_branch_first() {
        assert_eq!(FingerprintResult::classify(true, 1.0, 2.0), UnexpectedMismatch);
        assert_eq!(FingerprintResult::classify(false, 1.0, 2.0), UnexpectedMatch);
    }

    // Outside the dead zone the match call depends only on the LOD, never on
    // the expectation.
    #[test]
    fn test_match_call_depends_only_on_lod() {
        for threshold in [0.0, -2.0] {
            for lod in [-10.0, -3.0, 3.0, 10.0] {
                let expected = FingerprintResult::classify(true, lod, threshold);
                let unexpected = FingerprintResult::classify(false, lod, threshold);
                assert_eq!(expected.is_match(), unexpected.is_match());
                assert_eq!(expected.is_match(), Some(lod > 0.0));
            }
        }
    }

    #[test]
    fn test_tri_state_accessors() {
        assert_eq!(ExpectedMatch.is_expected(), Some(true));
        assert_eq!(ExpectedMatch.is_match(), Some(true));
        assert_eq!(ExpectedMismatch.is_expected(), Some(true));
        assert_eq!(ExpectedMismatch.is_match(), Some(false));
        assert_eq!(UnexpectedMatch.is_expected(), Some(false));
        assert_eq!(UnexpectedMatch.is_match(), Some(true));
        assert_eq!(UnexpectedMismatch.is_expected(), Some(false));
        assert_eq!(UnexpectedMismatch.is_match(), Some(false));
        assert_eq!(Inconclusive.is_expected(), None);
        assert_eq!(Inconclusive.is_match(), None);
    }

    #[test]
    fn test_display_matches_serialized_form() {
        for (result, name) in [
            (ExpectedMatch, "EXPECTED_MATCH"),
            (ExpectedMismatch, "EXPECTED_MISMATCH"),
            (UnexpectedMatch, "UNEXPECTED_MATCH"),
            (UnexpectedMismatch, "UNEXPECTED_MISMATCH"),
            (Inconclusive, "INCONCLUSIVE"),
        ] {
            assert_eq!(result.to_string(), name);
        }
    }
}
