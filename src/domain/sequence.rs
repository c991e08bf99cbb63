//! Issued-number types and the registry capability supplied by callers.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A formatted sequential identifier: a fixed prefix followed by a
/// fixed-width, zero-padded numeric suffix (e.g. `"0170001"`).
///
/// For one prefix and width the derived lexicographic ordering matches the
/// numeric ordering of the suffix, so `MAX(col)` on the stored column and
/// [`Ord`] on this type agree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct IssuedNumber(String);

impl IssuedNumber {
    /// Only the allocator constructs these; it has already validated `raw`.
    pub(crate) fn new_unchecked(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for IssuedNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for IssuedNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Lookup capability over already-issued numbers.
///
/// Production implementations are backed by the persistence layer
/// (`SELECT MAX(col)`, `SELECT MIN(col)`, an existence probe, a row count);
/// tests and tooling use the in-memory [`BTreeSet`] implementation. True
/// uniqueness is still enforced by a unique constraint on the stored column,
/// with callers retrying allocation on conflict.
pub trait NumberRegistry {
    /// The greatest issued number for the allocator's prefix, if any.
    fn current_max(&self) -> Option<String>;

    /// The smallest issued number for the allocator's prefix, if any.
    fn current_min(&self) -> Option<String>;

    /// Whether the candidate has already been issued.
    fn contains(&self, candidate: &str) -> bool;

    /// Total issued numbers on record.
    fn total_issued(&self) -> usize;
}

impl NumberRegistry for BTreeSet<String> {
    fn current_max(&self) -> Option<String> {
        self.iter().next_back().cloned()
    }

    fn current_min(&self) -> Option<String> {
        self.iter().next().cloned()
    }

    fn contains(&self, candidate: &str) -> bool {
        BTreeSet::contains(self, candidate)
    }

    fn total_issued(&self) -> usize {
        self.len()
    }
}

/// Point-in-time allocation statistics over a registry snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SequenceStats {
    pub total_issued: usize,
    pub next_available: IssuedNumber,
    pub last_issued: Option<IssuedNumber>,
    pub range_min: IssuedNumber,
    pub range_max: IssuedNumber,
}
