//! Reports for fairshare
//!
//! Spending statistics for an occasion and summaries of what a single
//! person or subgroup paid, owes and settled.

pub mod stats;
pub mod summary;

pub use stats::{CategoryTotal, OccasionStats, PayerTotal};
pub use summary::PartySummary;
