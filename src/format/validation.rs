//! Sort-order validation at the ingestion boundary.
//!
//! Queries and merges require their input ordered by chromosome name
//! (byte-wise lexicographic, as `LC_ALL=C sort -k1,1`) and then by start
//! position. The order is checked once while records are read; the core
//! operations never re-check it.
//!
//! Validation checks that:
//! 1. Chromosome names never decrease (which also makes them contiguous)
//! 2. Within a chromosome, start positions are non-decreasing

use crate::bed::BedError;

/// Inline sort validator, fed one record at a time by the reader.
#[derive(Debug, Default)]
pub struct SortValidator {
    prev_chrom: Option<String>,
    prev_start: u64,
    record_count: usize,
    source: Option<String>,
}

impl SortValidator {
    /// Create a validator whose errors name the input they came from.
    pub fn for_source(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            ..Self::default()
        }
    }

    /// Validate that the given record maintains sort order.
    ///
    /// Returns Ok(()) if valid, `BedError::Order` if out of order.
    #[inline]
    pub fn validate(&mut self, chrom: &str, start: u64) -> Result<(), BedError> {
        self.record_count += 1;

        if let Some(ref pc) = self.prev_chrom {
            if chrom == pc {
                if start < self.prev_start {
                    return Err(self.order_error(format!(
                        "position {} comes after {} on {}",
                        start, self.prev_start, chrom
                    )));
                }
                self.prev_start = start;
                return Ok(());
            }
            if chrom < pc.as_str() {
                return Err(self.order_error(format!(
                    "chromosome '{}' comes after '{}'",
                    chrom, pc
                )));
            }
        }

        self.prev_chrom = Some(chrom.to_string());
        self.prev_start = start;

        Ok(())
    }

    fn order_error(&self, detail: String) -> BedError {
        let message = match self.source {
            Some(ref source) => format!("{} not sorted: {}", source, detail),
            None => format!("not sorted: {}", detail),
        };
        BedError::Order {
            record: self.record_count,
            message,
        }
    }

    /// Get the number of records validated.
    pub fn record_count(&self) -> usize {
        self.record_count
    }
}
