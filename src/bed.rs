//! BED4 reader, line parser and the crate error type.

use crate::config::width_allowed;
use crate::format::parsing::{parse_u64_fast, should_skip_line, split_bed4, trim_line_end};
use crate::format::SortValidator;
use crate::index::IntervalTable;
use crate::record::{BedRecord, FeatureName};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while reading, validating or writing BED data.
#[derive(Error, Debug)]
pub enum BedError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Order error at record {record}: {message}")]
    Order { record: usize, message: String },

    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

pub type Result<T> = std::result::Result<T, BedError>;

/// How strictly a table is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableLoad {
    /// Records must arrive sorted by (chrom, start); violations are errors.
    Validated,
    /// Records are grouped as they come; the caller will sort the table.
    Unchecked,
}

/// A BED4 reader yielding records in file order.
pub struct BedReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    buffer: Vec<u8>,
}

impl BedReader<File> {
    /// Open a BED file from a path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(file))
    }
}

impl<R: Read> BedReader<R> {
    /// Create a new BED reader from any readable source.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
            buffer: Vec::with_capacity(256),
        }
    }

    /// Read the next BED record, skipping blank, comment and header lines.
    pub fn read_record(&mut self) -> Result<Option<BedRecord>> {
        loop {
            self.buffer.clear();
            let bytes_read = self.reader.read_until(b'\n', &mut self.buffer)?;
            if bytes_read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let line = trim_line_end(&self.buffer);
            if should_skip_line(line) {
                continue;
            }

            return parse_bed4(line, self.line_number).map(Some);
        }
    }

    /// Get an iterator over all records.
    pub fn records(self) -> BedRecordIter<R> {
        BedRecordIter { reader: self }
    }
}

/// Iterator over BED records.
pub struct BedRecordIter<R: Read> {
    reader: BedReader<R>,
}

impl<R: Read> Iterator for BedRecordIter<R> {
    type Item = Result<BedRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_record().transpose()
    }
}

/// Parse one BED4 line into a record.
///
/// Fails on a wrong field count, an empty chromosome, non-integer
/// coordinates, or `end <= start`. In strict single-base mode any width
/// other than one is rejected as well.
pub fn parse_line(text: &str) -> Result<BedRecord> {
    parse_bed4(trim_line_end(text.as_bytes()), 1)
}

fn parse_bed4(line: &[u8], line_number: usize) -> Result<BedRecord> {
    let parse_error = |message: String| BedError::Parse {
        line: line_number,
        message,
    };

    let [chrom, start, end, name] = split_bed4(line)
        .map_err(|n| parse_error(format!("Expected 4 tab-separated fields, got {}", n)))?;

    if chrom.is_empty() {
        return Err(parse_error("Empty chromosome name".to_string()));
    }
    let chrom = std::str::from_utf8(chrom)
        .map_err(|_| parse_error("Chromosome name is not valid UTF-8".to_string()))?;
    let name = std::str::from_utf8(name)
        .map_err(|_| parse_error("Feature name is not valid UTF-8".to_string()))?;

    let position = |bytes: &[u8], field_name: &str| {
        parse_u64_fast(bytes).ok_or_else(|| {
            parse_error(format!(
                "Invalid {} position: '{}'",
                field_name,
                String::from_utf8_lossy(bytes)
            ))
        })
    };
    let start = position(start, "start")?;
    let end = position(end, "end")?;

    if end <= start {
        return Err(parse_error(format!(
            "End ({}) must be greater than start ({})",
            end, start
        )));
    }
    if !width_allowed(start, end) {
        return Err(parse_error(format!(
            "Record {}:{}-{} is not a single base (strict width mode)",
            chrom, start, end
        )));
    }

    Ok(BedRecord::new(chrom, start, end, FeatureName::from(name)))
}

/// Write one record as a tab-separated line.
pub fn print_line<W: Write>(record: &BedRecord, sink: &mut W) -> io::Result<()> {
    writeln!(sink, "{}", record)
}

/// Read all BED records from a file, in file order.
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<BedRecord>> {
    let reader = BedReader::from_path(path)?;
    reader.records().collect()
}

/// Parse records from a string (useful for testing).
pub fn parse_records(content: &str) -> Result<Vec<BedRecord>> {
    let reader = BedReader::new(content.as_bytes());
    reader.records().collect()
}

/// Open a path for reading, treating `-` (or no path) as stdin.
pub fn open_input(path: Option<&Path>) -> Result<BedReader<Box<dyn Read>>> {
    let source: Box<dyn Read> = match path {
        Some(p) if p.as_os_str() != "-" => Box::new(File::open(p)?),
        _ => Box::new(io::stdin().lock()),
    };
    Ok(BedReader::new(source))
}

/// Build an interval table from a reader.
///
/// With [`TableLoad::Validated`] the records must already be ordered by
/// (chrom, start); the first violation is returned as [`BedError::Order`]
/// and no table is produced.
pub fn read_table<R: Read>(
    reader: BedReader<R>,
    mode: TableLoad,
    source: &str,
) -> Result<IntervalTable> {
    let mut validator = SortValidator::for_source(source);
    let mut table = IntervalTable::new();

    for result in reader.records() {
        let record = result?;
        if mode == TableLoad::Validated {
            validator.validate(record.chrom(), record.start())?;
        }
        table.push(record);
    }

    log::debug!(
        "loaded {} records on {} chromosomes from {} ({} order-checked)",
        table.len(),
        table.num_chromosomes(),
        source,
        validator.record_count()
    );
    Ok(table)
}

/// Open `path` and build an interval table from it.
pub fn load_table(path: Option<&Path>, mode: TableLoad) -> Result<IntervalTable> {
    let source = match path {
        Some(p) if p.as_os_str() != "-" => p.display().to_string(),
        _ => "stdin".to_string(),
    };
    read_table(open_input(path)?, mode, &source)
}
