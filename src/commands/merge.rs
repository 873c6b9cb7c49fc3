//! Merge command implementation.
//!
//! Merge-joins two sorted tables into one (chrom, start) ordered stream.
//! Chromosomes are visited in the union of both tables' key order and each
//! pair of per-chromosome sequences is walked with two cursors, so the
//! whole merge is O(n + m) and needs no final sort.
//!
//! Matching is by start position only. A position present on both sides
//! becomes one record whose name pairs the left and right names; every
//! other record passes through unchanged (outer join).

use crate::bed::Result;
use crate::format::BedWriter;
use crate::index::IntervalTable;
use crate::record::{BedRecord, FeatureName};
use std::cmp::Ordering;
use std::fmt;
use std::io::Write;

/// Statistics from a merge.
///
/// Always satisfies
/// `records_written == left_records + right_records - matched_pairs`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub left_records: usize,
    pub right_records: usize,
    pub matched_pairs: usize,
    pub records_written: usize,
}

impl MergeStats {
    /// Left-side records that had no partner.
    pub fn unmatched_left(&self) -> usize {
        self.left_records - self.matched_pairs
    }

    /// Right-side records that had no partner.
    pub fn unmatched_right(&self) -> usize {
        self.right_records - self.matched_pairs
    }
}

impl fmt::Display for MergeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Left: {}, Right: {}, Matched: {}, Written: {}",
            self.left_records, self.right_records, self.matched_pairs, self.records_written
        )
    }
}

/// Merge-join two sorted tables into a single sorted record sequence.
pub fn merge(a: &IntervalTable, b: &IntervalTable) -> Vec<BedRecord> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    merge_into(a, b, &mut out);
    out
}

/// Merge-join two sorted tables, appending to `out`.
///
/// Returns the merge statistics; `records_written` counts records appended.
pub fn merge_into(
    a: &IntervalTable,
    b: &IntervalTable,
    out: &mut Vec<BedRecord>,
) -> MergeStats {
    let mut stats = MergeStats {
        left_records: a.len(),
        right_records: b.len(),
        ..MergeStats::default()
    };
    let before = out.len();

    // Walk both key sets in lexicographic order, visiting each chromosome once
    let none: &[BedRecord] = &[];
    let mut left = a.iter().peekable();
    let mut right = b.iter().peekable();
    loop {
        let order = match (left.peek(), right.peek()) {
            (None, None) => break,
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some((l, _)), Some((r, _))) => l.cmp(r),
        };
        let (chrom, l_records, r_records) = match order {
            Ordering::Less => match left.next() {
                Some((chrom, records)) => (chrom, records, none),
                None => break,
            },
            Ordering::Greater => match right.next() {
                Some((chrom, records)) => (chrom, none, records),
                None => break,
            },
            Ordering::Equal => match (left.next(), right.next()) {
                (Some((chrom, l_records)), Some((_, r_records))) => {
                    (chrom, l_records, r_records)
                }
                _ => break,
            },
        };
        stats.matched_pairs += merge_chrom(chrom, l_records, r_records, out);
    }

    stats.records_written = out.len() - before;
    debug_assert_eq!(
        stats.records_written,
        stats.left_records + stats.right_records - stats.matched_pairs
    );
    stats
}

/// Merge one chromosome's sorted sequences, returning the matched pair count.
///
/// Assumes at most one record per start on each side; with duplicates the
/// output is still sorted, pairing them off in order.
pub fn merge_chrom(
    chrom: &str,
    left: &[BedRecord],
    right: &[BedRecord],
    out: &mut Vec<BedRecord>,
) -> usize {
    let mut i = 0;
    let mut j = 0;
    let mut pairs = 0;

    while i < left.len() && j < right.len() {
        let (a, b) = (&left[i], &right[j]);
        match a.start.cmp(&b.start) {
            Ordering::Equal => {
                out.push(BedRecord::point(
                    chrom,
                    a.start,
                    FeatureName::pair(&a.name, &b.name),
                ));
                i += 1;
                j += 1;
                pairs += 1;
            }
            Ordering::Less => {
                out.push(a.clone());
                i += 1;
            }
            Ordering::Greater => {
                out.push(b.clone());
                j += 1;
            }
        }
    }

    out.extend_from_slice(&left[i..]);
    out.extend_from_slice(&right[j..]);
    pairs
}

/// Merge command: join two sorted BED4 tables and write the result.
#[derive(Debug, Clone, Default)]
pub struct MergeCommand;

impl MergeCommand {
    pub fn new() -> Self {
        Self
    }

    /// Merge two loaded tables and write the combined stream.
    pub fn run<W: Write>(
        &self,
        a: &IntervalTable,
        b: &IntervalTable,
        output: W,
    ) -> Result<MergeStats> {
        let mut merged = Vec::with_capacity(a.len() + b.len());
        let stats = merge_into(a, b, &mut merged);

        let mut writer = BedWriter::new(output);
        writer.write_all(&merged)?;
        writer.flush()?;

        log::debug!("merge: {}", stats);
        Ok(stats)
    }
}
