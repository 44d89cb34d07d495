//! HTTP clients for the external data sources.
//!
//! Both clients are blocking: a refresh is a sequential pipeline and the
//! aggregator only ever runs over fully materialized data.

pub mod client;
pub mod etherscan;
pub mod types;

// Re-export main types
pub use client::FastProtocolClient;
pub use etherscan::EtherscanClient;
pub use types::{BalanceEntry, EtherscanResponse, RawPayload};
