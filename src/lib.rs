//! bedq: sorted single-nucleotide BED queries
//!
//! This library answers positional queries over BED4 records that are one
//! base wide, grouped by chromosome and sorted by start.
//!
//! # Features
//!
//! - **Range extraction**: two binary searches per query, independent of
//!   the range width
//! - **Merge-join**: outer join of two sorted tables in one linear pass
//! - **Sorting**: restores per-chromosome start order of any input
//!
//! # Example
//!
//! ```rust,no_run
//! use bedq::bed::{load_table, TableLoad};
//! use bedq::commands::{extract_region, merge};
//! use std::path::Path;
//!
//! let a = load_table(Some(Path::new("a.bed")), TableLoad::Validated).unwrap();
//! let b = load_table(Some(Path::new("b.bed")), TableLoad::Validated).unwrap();
//!
//! let hits = extract_region(a.get_chrom("chr2"), 199, 201);
//! let merged = merge(&a, &b);
//! ```

pub mod bed;
pub mod bounds;
pub mod commands;
pub mod config;
pub mod format;
pub mod index;
pub mod record;

// Re-export commonly used types
pub use bed::{parse_line, print_line, read_records, BedError, BedReader, TableLoad};
pub use bounds::{lower_bound, upper_bound};
pub use index::IntervalTable;
pub use record::{BedRecord, FeatureName};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bed::{load_table, parse_records, read_records, BedReader, TableLoad};
    pub use crate::bounds::{lower_bound, upper_bound};
    pub use crate::commands::{
        extract_region, merge, sort_table, MergeCommand, QueryCommand, Region, SortCommand,
    };
    pub use crate::index::IntervalTable;
    pub use crate::record::{BedRecord, FeatureName};
}
