//! Types for the FAST Protocol and Etherscan HTTP APIs.

use serde::Deserialize;

/// Raw payload from the FAST Protocol API (opaque for now, parsed later)
///
/// We keep this as `serde_json::Value` because the exact shape has varied
/// between deployments (bare arrays vs. envelopes, two wallet key names).
/// The parser handles normalization and validation.
pub type RawPayload = serde_json::Value;

/// Etherscan API response envelope
///
/// Every account-module response carries this shape: `status` is "1" on
/// success and "0" on error, with `message` describing the failure.
#[derive(Debug, Deserialize)]
pub struct EtherscanResponse<T> {
    pub status: String,
    pub message: String,
    #[serde(default)]
    pub result: Option<T>,
}

/// One entry from a balancemulti result
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceEntry {
    pub account: String,
    /// Balance in wei, as a decimal string
    pub balance: String,
}
