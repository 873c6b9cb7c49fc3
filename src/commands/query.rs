//! Region query implementation.
//!
//! Records on a chromosome are sorted by start, so the hits for a
//! half-open range `[start, end)` form one contiguous run. Two lower-bound
//! searches over the start column find that run in O(log n) regardless of
//! how wide the range is.

use crate::bed::{BedError, Result};
use crate::bounds::lower_bound;
use crate::format::parsing::{parse_u64_fast, should_skip_line, split_whitespace, trim_line_end};
use crate::format::BedWriter;
use crate::index::IntervalTable;
use crate::record::BedRecord;
use std::collections::BTreeMap;
use std::fmt;
use std::io::{BufRead, Write};

/// A half-open query range on one chromosome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
}

impl Region {
    pub fn new(chrom: impl Into<String>, start: u64, end: u64) -> Self {
        Self {
            chrom: chrom.into(),
            start,
            end,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chrom, self.start, self.end)
    }
}

/// Parse a `chrom start end` query line (any whitespace between fields).
///
/// `start >= end` is accepted and simply matches nothing.
pub fn parse_region(line: &[u8]) -> Result<Region> {
    let fields: Vec<&[u8]> = split_whitespace(line).collect();
    let [chrom, start, end] = fields[..] else {
        return Err(BedError::InvalidFormat(format!(
            "Query '{}' must have 3 fields (chrom start end), got {}",
            String::from_utf8_lossy(line).trim(),
            fields.len()
        )));
    };

    let position = |bytes: &[u8], field_name: &str| {
        parse_u64_fast(bytes).ok_or_else(|| {
            BedError::InvalidFormat(format!(
                "Invalid query {}: '{}'",
                field_name,
                String::from_utf8_lossy(bytes)
            ))
        })
    };

    let chrom = std::str::from_utf8(chrom)
        .map_err(|_| BedError::InvalidFormat("Query chromosome is not valid UTF-8".to_string()))?;
    Ok(Region::new(
        chrom,
        position(start, "start")?,
        position(end, "end")?,
    ))
}

/// Records whose start lies in `[start, end)`, in their original order.
///
/// `records` must be sorted by start. Builds the start column on every
/// call; use [`RegionExtractor`] to answer many queries against one table.
pub fn extract_region(records: &[BedRecord], start: u64, end: u64) -> &[BedRecord] {
    let starts: Vec<u64> = records.iter().map(|r| r.start).collect();
    extract_with_starts(records, &starts, start, end)
}

/// Range extraction over a precomputed start column.
///
/// `starts[i]` must equal `records[i].start`.
#[inline]
pub fn extract_with_starts<'a>(
    records: &'a [BedRecord],
    starts: &[u64],
    start: u64,
    end: u64,
) -> &'a [BedRecord] {
    debug_assert_eq!(records.len(), starts.len());
    if start >= end {
        return &[];
    }
    let lb = lower_bound(starts, start);
    let ub = lower_bound(starts, end);
    &records[lb..ub]
}

/// Answers region queries against a sorted table.
///
/// The start column of every chromosome is extracted once up front, so
/// each query costs two binary searches.
pub struct RegionExtractor<'a> {
    table: &'a IntervalTable,
    starts: BTreeMap<&'a str, Vec<u64>>,
}

impl<'a> RegionExtractor<'a> {
    /// Index a table whose chromosomes are all sorted by start.
    pub fn new(table: &'a IntervalTable) -> Self {
        debug_assert!(table.is_sorted());
        let starts = table
            .iter()
            .map(|(chrom, records)| (chrom, records.iter().map(|r| r.start).collect()))
            .collect();
        Self { table, starts }
    }

    /// Records of `region.chrom` starting inside the region.
    pub fn extract(&self, region: &Region) -> &'a [BedRecord] {
        match self.starts.get(region.chrom.as_str()) {
            Some(starts) => extract_with_starts(
                self.table.get_chrom(&region.chrom),
                starts,
                region.start,
                region.end,
            ),
            None => &[],
        }
    }
}

/// Statistics from a query run.
#[derive(Debug, Clone, Default)]
pub struct QueryStats {
    pub queries: usize,
    pub empty_queries: usize,
    pub records_written: usize,
}

impl fmt::Display for QueryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Queries: {}, Without hits: {}, Records written: {}",
            self.queries, self.empty_queries, self.records_written
        )
    }
}

/// Query command: extract the records of each region in a query file.
#[derive(Debug, Clone, Default)]
pub struct QueryCommand;

impl QueryCommand {
    pub fn new() -> Self {
        Self
    }

    /// Resolve every region in order, writing hits for each in turn.
    ///
    /// Blank lines, `#` comments and `track`/`browser` headers in the query
    /// input are skipped.
    /// `table` must be sorted.
    pub fn run<R: BufRead, W: Write>(
        &self,
        table: &IntervalTable,
        mut queries: R,
        output: W,
    ) -> Result<QueryStats> {
        let extractor = RegionExtractor::new(table);
        let mut writer = BedWriter::new(output);
        let mut stats = QueryStats::default();

        let mut buffer = Vec::with_capacity(128);
        let mut line_number = 0;
        loop {
            buffer.clear();
            if queries.read_until(b'\n', &mut buffer)? == 0 {
                break;
            }
            line_number += 1;

            let line = trim_line_end(&buffer);
            if should_skip_line(line) {
                continue;
            }
            let region = parse_region(line).map_err(|e| match e {
                BedError::InvalidFormat(message) => BedError::Parse {
                    line: line_number,
                    message,
                },
                other => other,
            })?;

            let hits = extractor.extract(&region);
            log::trace!("{} -> {} records", region, hits.len());
            stats.queries += 1;
            if hits.is_empty() {
                stats.empty_queries += 1;
            }
            writer.write_all(hits)?;
        }

        writer.flush()?;
        stats.records_written = writer.records_written();
        log::debug!("query: {}", stats);
        Ok(stats)
    }
}
