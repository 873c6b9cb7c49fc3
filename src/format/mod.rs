//! Text-format utilities shared by the reader and the commands:
//! - Allocation-free BED4 field splitting
//! - Sort-order validation at ingestion
//! - Buffered output formatting

pub mod output;
pub mod parsing;
pub mod validation;

pub use output::BedWriter;
pub use parsing::{parse_u64_fast, should_skip_line, split_bed4, trim_line_end};
pub use validation::SortValidator;
