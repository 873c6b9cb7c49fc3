//! Command implementations for bedq.

pub mod merge;
pub mod query;
pub mod sort;

pub use crate::format::SortValidator;
pub use merge::{merge, merge_chrom, merge_into, MergeCommand, MergeStats};
pub use query::{
    extract_region, extract_with_starts, parse_region, QueryCommand, QueryStats, Region,
    RegionExtractor,
};
pub use sort::{sort_table, SortCommand, SortStats};
