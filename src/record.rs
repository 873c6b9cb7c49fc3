//! Core record types for single-nucleotide BED features.

use std::cmp::Ordering;
use std::fmt;

/// The label column of a BED record.
///
/// Parsed records always carry a `Single` name. A merge-join that pairs two
/// records at the same position produces a `Merged` name holding the left
/// and right labels in that order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeatureName {
    Single(String),
    Merged(String, String),
}

impl FeatureName {
    /// Combine a left and a right name into a merged pair.
    ///
    /// A side that is itself already merged is flattened to its rendered
    /// `a,b` form, so the result is always exactly one pair.
    pub fn pair(left: &FeatureName, right: &FeatureName) -> Self {
        FeatureName::Merged(left.to_string(), right.to_string())
    }

    /// Returns true if this name came out of a merge.
    #[inline]
    pub fn is_merged(&self) -> bool {
        matches!(self, FeatureName::Merged(..))
    }
}

impl From<&str> for FeatureName {
    fn from(s: &str) -> Self {
        FeatureName::Single(s.to_string())
    }
}

impl From<String> for FeatureName {
    fn from(s: String) -> Self {
        FeatureName::Single(s)
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureName::Single(name) => write!(f, "{}", name),
            FeatureName::Merged(a, b) => write!(f, "{},{}", a, b),
        }
    }
}

/// A BED4 record: chromosome, 0-based half-open coordinates and a name.
///
/// Records in this crate are expected to be one base wide
/// (`end == start + 1`); all positional logic keys on `start` alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BedRecord {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub name: FeatureName,
}

impl BedRecord {
    /// Create a new record.
    #[inline]
    pub fn new(
        chrom: impl Into<String>,
        start: u64,
        end: u64,
        name: impl Into<FeatureName>,
    ) -> Self {
        Self {
            chrom: chrom.into(),
            start,
            end,
            name: name.into(),
        }
    }

    /// Create a one-base record at `start`.
    #[inline]
    pub fn point(chrom: impl Into<String>, start: u64, name: impl Into<FeatureName>) -> Self {
        Self::new(chrom, start, start + 1, name)
    }

    /// Get the chromosome.
    #[inline]
    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    /// Get the start position.
    #[inline]
    pub fn start(&self) -> u64 {
        self.start
    }

}

impl fmt::Display for BedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.chrom, self.start, self.end, self.name
        )
    }
}

/// Records order by (chrom, start, end); names only break exact ties.
impl Ord for BedRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.chrom
            .cmp(&other.chrom)
            .then(self.start.cmp(&other.start))
            .then(self.end.cmp(&other.end))
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for BedRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
