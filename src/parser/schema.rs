//! Output JSON schema definitions for snapshot data.
//!
//! This module defines the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use super::records::{Collection, WalletRecord};
use crate::utils::config::SCHEMA_VERSION;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Headline metrics for a single refresh
///
/// Always recomputed from the current record set; never treated as
/// authoritative state across refreshes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    /// Number of unique wallets
    pub total_wallets: u64,

    /// Exact sum of all wallet balances (ETH)
    pub total_value: Decimal,

    /// Number of fetched collections
    pub collection_count: u64,

    /// total_value / total_wallets, or zero when there are no wallets
    pub average_wallet_value: Decimal,
}

/// Per-collection breakdown for a single refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionPerformance {
    /// The collection this row describes
    pub collection: Collection,

    /// Wallets attributed to this collection
    pub wallet_count: u64,

    /// Sum of attributed wallet balances (ETH); also the sort key
    pub total_value: Decimal,

    /// Fraction of the grand total held by this collection (0 when the
    /// grand total is zero)
    pub share: Decimal,
}

/// Top-level snapshot structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Schema version for compatibility checking
    pub version: String,

    /// Base URL of the API the data came from
    pub source: String,

    /// Headline metrics
    pub summary: SummaryMetrics,

    /// Per-collection rows, ordered by descending total value
    pub collections: Vec<CollectionPerformance>,

    /// All wallet records included in the aggregates
    pub wallets: Vec<WalletRecord>,

    /// Timestamp when the snapshot was generated (RFC 3339)
    pub generated_at: String,
}

/// Assemble the versioned snapshot for this refresh
///
/// **Public** - used by commands to create final output
pub fn to_snapshot(
    source: &str,
    summary: SummaryMetrics,
    collections: Vec<CollectionPerformance>,
    wallets: Vec<WalletRecord>,
) -> Snapshot {
    use chrono::Utc;

    Snapshot {
        version: SCHEMA_VERSION.to_string(),
        source: source.to_string(),
        summary,
        collections,
        wallets,
        generated_at: Utc::now().to_rfc3339(),
    }
}
