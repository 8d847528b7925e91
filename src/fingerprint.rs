//! Fingerprint identity keys, fingerprint values, and the store mapping one
//! to the other.
//!
//! A [`FingerprintId`] records where a fingerprint came from (sample,
//! library, run barcode, lane, molecular barcode). A [`Fingerprint`] wraps
//! the opaque likelihood evidence produced by the external genotyping
//! collaborator together with the owning sample name and an optional group
//! label. A [`FingerprintStore`] is an insertion-ordered map from id to
//! fingerprint; its frozen iteration order is what makes downstream pair
//! enumeration reproducible.

use ahash::AHashMap;
use std::fmt;

use crate::errors::{CrosscheckError, Result};

/// Identifies the provenance of a single fingerprint.
///
/// Created once per read group during fingerprint generation; mutated only by
/// [`merge`](FingerprintId::merge) during aggregation; immutable afterward.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FingerprintId {
    /// Sample name. Required at creation. Cleared to the empty string only
    /// when a merge sees disagreeing sample names, which is a caller contract
    /// violation that is deliberately not rejected here.
    pub sample: String,
    /// Library name, if known.
    pub library: Option<String>,
    /// Run/flowcell barcode, if known.
    pub run_barcode: Option<String>,
    /// Lane number, if known.
    pub lane: Option<u32>,
    /// Molecular barcode sequence, if known.
    pub molecular_barcode: Option<String>,
}

/// Keeps a field only when both sources carry the same value.
fn merge_field<T: Clone + PartialEq>(a: &Option<T>, b: &Option<T>) -> Option<T> {
    match (a, b) {
        (Some(x), Some(y)) if x == y => Some(x.clone()),
        _ => None,
    }
}

impl FingerprintId {
    /// Creates an identity key for `sample` with every other field unknown.
    #[must_use]
    pub fn new(sample: impl Into<String>) -> Self {
        Self {
            sample: sample.into(),
            library: None,
            run_barcode: None,
            lane: None,
            molecular_barcode: None,
        }
    }

    /// Merges two identity keys into the key describing both sources at a
    /// coarser granularity.
    ///
    /// Fields present and equal across both keys are kept; fields absent or
    /// disagreeing are cleared. The operation is commutative and associative,
    /// so folding any ordering of a group's keys yields the same merged key.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            sample: if self.sample == other.sample {
                self.sample.clone()
            } else {
                String::new()
            },
            library: merge_field(&self.library, &other.library),
            run_barcode: merge_field(&self.run_barcode, &other.run_barcode),
            lane: merge_field(&self.lane, &other.lane),
            molecular_barcode: merge_field(&self.molecular_barcode, &other.molecular_barcode),
        }
    }
}

impl fmt::Display for FingerprintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sample)?;
        if let Some(library) = &self.library {
            write!(f, "/{library}")?;
        }
        if let Some(run_barcode) = &self.run_barcode {
            write!(f, "/{run_barcode}")?;
        }
        if let Some(lane) = self.lane {
            write!(f, ".{lane}")?;
        }
        if let Some(molecular_barcode) = &self.molecular_barcode {
            write!(f, "+{molecular_barcode}")?;
        }
        Ok(())
    }
}

/// Per-site likelihood evidence underlying a fingerprint.
///
/// Opaque to this crate; produced and interpreted by the external
/// genotype-likelihood collaborator. Value equality is used to deduplicate
/// group members before accumulation, so accumulation is idempotent per
/// distinct value rather than per occurrence.
pub trait Evidence: Clone + PartialEq {
    /// Folds another unit's evidence into this one. Implementations must be
    /// order-insensitive (commutative and associative) for merged group
    /// results to be independent of member ordering.
    fn accumulate(&mut self, other: &Self);
}

/// A per-unit genotype-likelihood summary attributed to one sample.
///
/// Produced by generation, optionally merged once by aggregation, and read by
/// comparison; never mutated after comparison begins.
#[derive(Debug, Clone, PartialEq)]
pub struct Fingerprint<E> {
    sample: String,
    info: Option<String>,
    evidence: E,
}

impl<E> Fingerprint<E> {
    /// Creates a fingerprint owned by `sample`. The sample name must be
    /// non-empty for identity expectations to be meaningful.
    pub fn new(sample: impl Into<String>, evidence: E) -> Self {
        Self { sample: sample.into(), info: None, evidence }
    }

    /// The owning sample name.
    #[must_use]
    pub fn sample(&self) -> &str {
        &self.sample
    }

    /// The group label this fingerprint was merged under, if any.
    #[must_use]
    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }

    /// The underlying likelihood evidence.
    pub fn evidence(&self) -> &E {
        &self.evidence
    }
}

impl<E: Evidence> Fingerprint<E> {
    /// Merges a group of fingerprints that share the group `label` into one.
    ///
    /// Members are first deduplicated by value equality, then the first
    /// distinct member's sample and evidence seed the result and the
    /// remaining distinct members' evidence is accumulated in. The merged
    /// fingerprint is tagged with `label` as its info field. Returns `None`
    /// for an empty group.
    pub fn merge_all<'a, I>(label: &str, members: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Fingerprint<E>>,
        E: 'a,
    {
        let mut distinct: Vec<&Fingerprint<E>> = Vec::new();
        for fingerprint in members {
            if !distinct.iter().any(|seen| **seen == *fingerprint) {
                distinct.push(fingerprint);
            }
        }
        let (first, rest) = distinct.split_first()?;
        let mut merged = Self {
            sample: first.sample.clone(),
            info: Some(label.to_string()),
            evidence: first.evidence.clone(),
        };
        for fingerprint in rest {
            merged.evidence.accumulate(&fingerprint.evidence);
        }
        Some(merged)
    }
}

/// An insertion-ordered map from [`FingerprintId`] to [`Fingerprint`].
///
/// Keys are unique; inserting a duplicate key is an identity-collision error
/// because it indicates malformed read-group metadata. Iteration yields
/// entries in insertion order, frozen for the lifetime of the store.
#[derive(Debug, Clone)]
pub struct FingerprintStore<E> {
    entries: Vec<(FingerprintId, Fingerprint<E>)>,
    index: AHashMap<FingerprintId, usize>,
}

impl<E> Default for FingerprintStore<E> {
    fn default() -> Self {
        Self { entries: Vec::new(), index: AHashMap::new() }
    }
}

impl<E> FingerprintStore<E> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fingerprints in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the store holds no fingerprints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up the fingerprint stored under `id`.
    pub fn get(&self, id: &FingerprintId) -> Option<&Fingerprint<E>> {
        self.index.get(id).map(|&pos| &self.entries[pos].1)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&FingerprintId, &Fingerprint<E>)> {
        self.entries.iter().map(|(id, fingerprint)| (id, fingerprint))
    }

    /// Inserts a fingerprint under `id`.
    ///
    /// # Errors
    /// Returns [`CrosscheckError::IdentityCollision`] when `id` is already
    /// present; the caller must abort rather than silently overwrite.
    pub fn insert(&mut self, id: FingerprintId, fingerprint: Fingerprint<E>) -> Result<()> {
        if let Some(&pos) = self.index.get(&id) {
            let existing = &self.entries[pos].1;
            return Err(CrosscheckError::IdentityCollision {
                key: id.to_string(),
                existing_sample: existing.sample.clone(),
                incoming_sample: fingerprint.sample,
            });
        }
        self.index.insert(id.clone(), self.entries.len());
        self.entries.push((id, fingerprint));
        Ok(())
    }

    /// Insert for callers that have already guaranteed key uniqueness, such
    /// as the aggregation stage whose group labels are injective over keys.
    pub(crate) fn insert_unique(&mut self, id: FingerprintId, fingerprint: Fingerprint<E>) {
        debug_assert!(!self.index.contains_key(&id), "duplicate fingerprint identity {id}");
        self.index.insert(id.clone(), self.entries.len());
        self.entries.push((id, fingerprint));
    }
}
