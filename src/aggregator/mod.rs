//! Aggregation of wallet and collection records into summary metrics.
//!
//! This module transforms validated records into:
//! - Headline summary metrics (totals, counts, average)
//! - Per-collection performance rows (grouped sums and shares)
//!
//! Everything here is a pure function of its inputs: no I/O, no hidden
//! state, so the same record set always produces the same output.

pub mod performance;
pub mod summary;

// Re-export main functions
pub use performance::{compute_collection_performance, UNASSIGNED_ID};
pub use summary::compute_summary;
