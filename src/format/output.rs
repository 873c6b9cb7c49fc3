//! Buffered BED4 output.
//!
//! Uses itoa for coordinate formatting so writing a record never allocates.

use crate::bed::BedError;
use crate::record::{BedRecord, FeatureName};
use std::io::{BufWriter, Write};

/// Buffer size for BedWriter (1MB default).
const DEFAULT_BUFFER_SIZE: usize = 1024 * 1024;

/// Buffered BED4 writer.
pub struct BedWriter<W: Write> {
    writer: BufWriter<W>,
    itoa_buf: itoa::Buffer,
    records_written: usize,
}

impl<W: Write> BedWriter<W> {
    /// Create a new BedWriter with the default buffer.
    pub fn new(output: W) -> Self {
        Self::with_capacity(DEFAULT_BUFFER_SIZE, output)
    }

    /// Create a new BedWriter with specified buffer size.
    pub fn with_capacity(capacity: usize, output: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, output),
            itoa_buf: itoa::Buffer::new(),
            records_written: 0,
        }
    }

    /// Write one record as `chrom\tstart\tend\tname\n`.
    #[inline]
    pub fn write_record(&mut self, record: &BedRecord) -> Result<(), BedError> {
        self.writer.write_all(record.chrom.as_bytes())?;
        self.writer.write_all(b"\t")?;
        self.writer
            .write_all(self.itoa_buf.format(record.start).as_bytes())?;
        self.writer.write_all(b"\t")?;
        self.writer
            .write_all(self.itoa_buf.format(record.end).as_bytes())?;
        self.writer.write_all(b"\t")?;
        self.write_name(&record.name)?;
        self.writer.write_all(b"\n")?;
        self.records_written += 1;
        Ok(())
    }

    /// Write every record in order.
    pub fn write_all<'a, I>(&mut self, records: I) -> Result<(), BedError>
    where
        I: IntoIterator<Item = &'a BedRecord>,
    {
        for record in records {
            self.write_record(record)?;
        }
        Ok(())
    }

    #[inline]
    fn write_name(&mut self, name: &FeatureName) -> Result<(), BedError> {
        match name {
            FeatureName::Single(label) => self.writer.write_all(label.as_bytes())?,
            FeatureName::Merged(a, b) => {
                self.writer.write_all(a.as_bytes())?;
                self.writer.write_all(b",")?;
                self.writer.write_all(b.as_bytes())?;
            }
        }
        Ok(())
    }

    /// Number of records written so far.
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flush the output buffer.
    pub fn flush(&mut self) -> Result<(), BedError> {
        self.writer.flush()?;
        Ok(())
    }
}
