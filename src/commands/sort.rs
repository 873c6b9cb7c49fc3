//! Sort command implementation.
//!
//! Sort order (matches `LC_ALL=C sort -k1,1 -k2,2n`):
//! 1. Primary: chromosome (lexicographic, via the table's key order)
//! 2. Secondary: start coordinate (ascending, numeric)
//! 3. Ties: input order preserved (stable sort)

use crate::bed::{read_table, BedError, BedReader, TableLoad};
use crate::format::BedWriter;
use crate::index::IntervalTable;
use std::fmt;
use std::io::{Read, Write};

/// Sort every chromosome's records by start position.
///
/// Takes the table by value and hands back the sorted table; chromosome
/// membership never changes. The sort is stable, so records sharing a
/// start keep their input order.
pub fn sort_table(table: IntervalTable) -> IntervalTable {
    let mut sorted = IntervalTable::new();
    for (chrom, mut records) in table {
        records.sort_by_key(|r| r.start);
        sorted.set_chrom(chrom, records);
    }
    debug_assert!(sorted.is_sorted());
    sorted
}

/// Statistics from a sort run.
#[derive(Debug, Clone, Default)]
pub struct SortStats {
    pub records: usize,
    pub chromosomes: usize,
    /// Chromosomes whose records were already in start order on input.
    pub presorted_chromosomes: usize,
}

impl fmt::Display for SortStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Records: {}, Chromosomes: {}, Already sorted: {}",
            self.records, self.chromosomes, self.presorted_chromosomes
        )
    }
}

/// Sort command: read any BED4 input, write it in (chrom, start) order.
#[derive(Debug, Clone, Default)]
pub struct SortCommand;

impl SortCommand {
    pub fn new() -> Self {
        Self
    }

    /// Sort a table, collecting statistics along the way.
    pub fn sort(&self, table: IntervalTable) -> (IntervalTable, SortStats) {
        let stats = SortStats {
            records: table.len(),
            chromosomes: table.num_chromosomes(),
            presorted_chromosomes: table
                .iter()
                .filter(|(_, records)| records.windows(2).all(|w| w[0].start <= w[1].start))
                .count(),
        };
        (sort_table(table), stats)
    }

    /// Execute sort from a reader to a writer.
    pub fn run<R: Read, W: Write>(
        &self,
        reader: BedReader<R>,
        source: &str,
        output: W,
    ) -> Result<SortStats, BedError> {
        let table = read_table(reader, TableLoad::Unchecked, source)?;
        let (sorted, stats) = self.sort(table);

        let mut writer = BedWriter::new(output);
        writer.write_all(sorted.records())?;
        writer.flush()?;

        log::debug!("sort: {}", stats);
        Ok(stats)
    }
}
