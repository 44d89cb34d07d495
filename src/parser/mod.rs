//! Payload parsing, record validation, and schema definitions.
//!
//! This module handles:
//! - Normalizing loosely shaped API payloads
//! - Constructing validated wallet and collection records
//! - Defining the snapshot output schema

pub mod payload;
pub mod records;
pub mod schema;

// Re-export main types
pub use payload::{collect_addresses, collection_from_stats, parse_entities, parse_user_page, parse_wei};
pub use records::{Collection, WalletRecord};
pub use schema::{to_snapshot, CollectionPerformance, Snapshot, SummaryMetrics};
