//! The per-pair crosscheck metric record.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Metric;
use crate::compare::{FingerprintResult, MatchResults};
use crate::fingerprint::FingerprintId;

/// Granularity at which a crosscheck comparison was performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataType {
    /// Fingerprints compared per read group, as generated.
    Readgroup,
    /// Fingerprints rolled up to the library level.
    Library,
    /// Fingerprints rolled up to the sample level.
    Sample,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Readgroup => "read group",
            Self::Library => "library",
            Self::Sample => "sample",
        };
        write!(f, "{name}")
    }
}

/// The result of crosschecking one pair of fingerprints.
///
/// The same record shape is used whether read groups, libraries, or samples
/// were compared; `data_type` tags the granularity. One record is written
/// per reported pair, in pair enumeration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrosscheckMetric {
    /// Classified outcome for the pair.
    pub result: FingerprintResult,
    /// Granularity the comparison was run at.
    pub data_type: DataType,
    /// LOD that both sides come from the same individual.
    pub lod_score: f64,
    /// LOD under the model treating the left side as the tumor.
    pub lod_score_tumor_normal: f64,
    /// LOD under the model treating the left side as the normal.
    pub lod_score_normal_tumor: f64,
    /// Run barcode of the left side.
    pub left_run_barcode: Option<String>,
    /// Lane of the left side.
    pub left_lane: Option<u32>,
    /// Molecular barcode sequence of the left side.
    pub left_molecular_barcode_sequence: Option<String>,
    /// Library of the left side.
    pub left_library: Option<String>,
    /// Sample of the left side.
    pub left_sample: String,
    /// Run barcode of the right side.
    pub right_run_barcode: Option<String>,
    /// Lane of the right side.
    pub right_lane: Option<u32>,
    /// Molecular barcode sequence of the right side.
    pub right_molecular_barcode_sequence: Option<String>,
    /// Library of the right side.
    pub right_library: Option<String>,
    /// Sample of the right side.
    pub right_sample: String,
}

impl CrosscheckMetric {
    /// Builds the record for one compared pair. Each column is filled from
    /// its own identity field on its own side.
    #[must_use]
    pub fn from_pair(
        result: FingerprintResult,
        scores: &MatchResults,
        lhs: &FingerprintId,
        rhs: &FingerprintId,
        data_type: DataType,
    ) -> Self {
        Self {
            result,
            data_type,
            lod_score: scores.lod,
            lod_score_tumor_normal: scores.lod_tumor_normal,
            lod_score_normal_tumor: scores.lod_normal_tumor,
            left_run_barcode: lhs.run_barcode.clone(),
            left_lane: lhs.lane,
            left_molecular_barcode_sequence: lhs.molecular_barcode.clone(),
            left_library: lhs.library.clone(),
            left_sample: lhs.sample.clone(),
            right_run_barcode: rhs.run_barcode.clone(),
            right_lane: rhs.lane,
            right_molecular_barcode_sequence: rhs.molecular_barcode.clone(),
            right_library: rhs.library.clone(),
            right_sample: rhs.sample.clone(),
        }
    }
}

impl Metric for CrosscheckMetric {
    fn metric_name() -> &'static str {
        "crosscheck"
    }
}
