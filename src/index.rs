//! Per-chromosome record table.

use crate::record::BedRecord;
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Records grouped by chromosome, each group ordered by start.
///
/// Chromosomes iterate in lexicographic order, so anything written from a
/// table comes out in (chrom, start) order once every group is sorted.
/// The table does not enforce the start order itself: the reader validates
/// it at ingestion, or [`sort_table`](crate::commands::sort::sort_table)
/// restores it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntervalTable {
    by_chrom: BTreeMap<String, Vec<BedRecord>>,
}

impl IntervalTable {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self {
            by_chrom: BTreeMap::new(),
        }
    }

    /// Build a table from records, keeping their relative order within
    /// each chromosome.
    pub fn from_records(records: impl IntoIterator<Item = BedRecord>) -> Self {
        let mut table = Self::new();
        for record in records {
            table.push(record);
        }
        table
    }

    /// Append a record to the end of its chromosome's sequence.
    #[inline]
    pub fn push(&mut self, record: BedRecord) {
        match self.by_chrom.get_mut(record.chrom()) {
            Some(records) => records.push(record),
            None => {
                self.by_chrom.insert(record.chrom.clone(), vec![record]);
            }
        }
    }

    /// Records for a chromosome; empty if the chromosome is absent.
    #[inline]
    pub fn get_chrom(&self, chrom: &str) -> &[BedRecord] {
        self.by_chrom
            .get(chrom)
            .map(|records| records.as_slice())
            .unwrap_or(&[])
    }

    /// Replace the record sequence of a chromosome.
    pub fn set_chrom(&mut self, chrom: impl Into<String>, records: Vec<BedRecord>) {
        self.by_chrom.insert(chrom.into(), records);
    }

    /// Chromosome names in lexicographic order.
    pub fn chromosomes(&self) -> impl Iterator<Item = &str> {
        self.by_chrom.keys().map(|chrom| chrom.as_str())
    }

    /// (chromosome, records) pairs in lexicographic chromosome order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[BedRecord])> {
        self.by_chrom
            .iter()
            .map(|(chrom, records)| (chrom.as_str(), records.as_slice()))
    }

    /// Every record, chromosome by chromosome.
    pub fn records(&self) -> impl Iterator<Item = &BedRecord> {
        self.by_chrom.values().flatten()
    }

    /// Returns true if every chromosome's records are ordered by start.
    pub fn is_sorted(&self) -> bool {
        self.by_chrom
            .values()
            .all(|records| records.windows(2).all(|w| w[0].start <= w[1].start))
    }

    /// Number of chromosomes.
    pub fn num_chromosomes(&self) -> usize {
        self.by_chrom.len()
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.by_chrom.values().map(Vec::len).sum()
    }

    /// Check if the table holds no records.
    pub fn is_empty(&self) -> bool {
        self.by_chrom.values().all(Vec::is_empty)
    }
}

impl IntoIterator for IntervalTable {
    type Item = (String, Vec<BedRecord>);
    type IntoIter = btree_map::IntoIter<String, Vec<BedRecord>>;

    fn into_iter(self) -> Self::IntoIter {
        self.by_chrom.into_iter()
    }
}

impl FromIterator<BedRecord> for IntervalTable {
    fn from_iter<I: IntoIterator<Item = BedRecord>>(iter: I) -> Self {
        Self::from_records(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> IntervalTable {
        IntervalTable::from_records(vec![
            BedRecord::point("chr1", 20100, "foo"),
            BedRecord::point("chr1", 600, "baz"),
            BedRecord::point("chr3", 0, "bar"),
            BedRecord::point("chr2", 200, "qux"),
            BedRecord::point("chr2", 199, "qax"),
        ])
    }

    #[test]
    fn test_build_table() {
        let table = sample_table();
        assert_eq!(table.len(), 5);
        assert_eq!(table.num_chromosomes(), 3);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_get_chrom_keeps_input_order() {
        let table = sample_table();
        let starts: Vec<u64> = table.get_chrom("chr1").iter().map(|r| r.start).collect();
        assert_eq!(starts, vec![20100, 600]);
        assert!(!table.is_sorted());
    }

    #[test]
    fn test_get_missing_chrom() {
        let table = sample_table();
        assert!(table.get_chrom("chrX").is_empty());
        assert!(table.chromosomes().all(|chrom| chrom != "chrX"));
    }

    #[test]
    fn test_chromosomes_lexicographic() {
        let table = IntervalTable::from_records(vec![
            BedRecord::point("chr9", 1, "a"),
            BedRecord::point("chr10", 1, "b"),
            BedRecord::point("chr1", 1, "c"),
        ]);
        let chroms: Vec<&str> = table.chromosomes().collect();
        assert_eq!(chroms, vec!["chr1", "chr10", "chr9"]);
    }

    #[test]
    fn test_set_chrom() {
        let mut table = sample_table();
        table.set_chrom(
            "chr1",
            vec![
                BedRecord::point("chr1", 600, "baz"),
                BedRecord::point("chr1", 20100, "foo"),
            ],
        );
        table.set_chrom(
            "chr2",
            vec![
                BedRecord::point("chr2", 199, "qax"),
                BedRecord::point("chr2", 200, "qux"),
            ],
        );
        assert!(table.is_sorted());
        assert_eq!(table.get_chrom("chr1")[0].start, 600);
    }

    #[test]
    fn test_records_in_output_order() {
        let table = IntervalTable::from_records(vec![
            BedRecord::point("chr2", 5, "b"),
            BedRecord::point("chr1", 7, "a"),
        ]);
        let chroms: Vec<&str> = table.records().map(|r| r.chrom()).collect();
        assert_eq!(chroms, vec!["chr1", "chr2"]);
    }

    #[test]
    fn test_into_iter_and_collect() {
        let table: IntervalTable = vec![
            BedRecord::point("chr1", 1, "a"),
            BedRecord::point("chr2", 2, "b"),
        ]
        .into_iter()
        .collect();

        let pairs: Vec<(String, usize)> = table
            .into_iter()
            .map(|(chrom, records)| (chrom, records.len()))
            .collect();
        assert_eq!(pairs, vec![("chr1".to_string(), 1), ("chr2".to_string(), 1)]);
    }

    #[test]
    fn test_empty_table() {
        let table = IntervalTable::new();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert!(table.is_sorted());
        assert_eq!(table.chromosomes().count(), 0);
    }
}
