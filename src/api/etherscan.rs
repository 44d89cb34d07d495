//! HTTP client for Etherscan account balance lookups.
//!
//! Uses the `balancemulti` action, which accepts up to 20 comma-separated
//! addresses per call and returns wei balances as decimal strings.

use super::types::{BalanceEntry, EtherscanResponse};
use crate::parser::payload::parse_wei;
use crate::utils::config::{AppConfig, DEFAULT_API_TIMEOUT, ETHERSCAN_BATCH_SIZE, RATE_LIMIT_DELAY};
use crate::utils::error::ApiError;
use log::{debug, info, warn};
use reqwest::blocking::Client;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Client for fetching wallet balances from the Etherscan API
pub struct EtherscanClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl EtherscanClient {
    /// Create a new Etherscan client from the application configuration
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(DEFAULT_API_TIMEOUT)
            .build()
            .map_err(ApiError::RequestFailed)?;

        Ok(Self {
            client,
            api_url: config.etherscan_api_url.clone(),
            api_key: config.etherscan_api_key.clone(),
        })
    }

    /// Fetch ETH balances for a set of addresses
    ///
    /// **Public** - one call per refresh, batching internally
    ///
    /// # Arguments
    /// * `addresses` - wallet addresses (any case; matched back lower-cased)
    ///
    /// # Returns
    /// Map from lower-cased address to ETH balance. Addresses the API did
    /// not echo back are absent from the map (the caller decides the
    /// default).
    ///
    /// # Errors
    /// * `ApiError::RequestFailed` - transport failure
    /// * `ApiError::EtherscanStatus` - API-level error status
    /// * `ApiError::InvalidResponse` - unparseable wei value
    pub fn fetch_balances(
        &self,
        addresses: &[String],
    ) -> Result<HashMap<String, Decimal>, ApiError> {
        let mut balances = HashMap::with_capacity(addresses.len());

        info!(
            "Fetching balances for {} addresses in batches of {}",
            addresses.len(),
            ETHERSCAN_BATCH_SIZE
        );

        for (i, batch) in addresses.chunks(ETHERSCAN_BATCH_SIZE).enumerate() {
            if i > 0 {
                std::thread::sleep(RATE_LIMIT_DELAY);
            }

            for entry in self.fetch_batch(batch)? {
                let eth = parse_wei(&entry.balance).map_err(|e| {
                    ApiError::InvalidResponse(format!(
                        "Bad balance for {}: {}",
                        entry.account, e
                    ))
                })?;
                balances.insert(entry.account.to_lowercase(), eth);
            }
        }

        let missing = addresses
            .iter()
            .filter(|a| !balances.contains_key(&a.to_lowercase()))
            .count();
        if missing > 0 {
            warn!("{} addresses missing from balance responses", missing);
        }

        Ok(balances)
    }

    /// Fetch one balancemulti batch
    ///
    /// **Private** - internal helper for fetch_balances
    fn fetch_batch(&self, batch: &[String]) -> Result<Vec<BalanceEntry>, ApiError> {
        let joined = batch.join(",");
        debug!("balancemulti batch of {}", batch.len());

        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("module", "account"),
                ("action", "balancemulti"),
                ("address", joined.as_str()),
                ("tag", "latest"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .map_err(ApiError::RequestFailed)?;

        if !response.status().is_success() {
            return Err(ApiError::InvalidResponse(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().unwrap_or_default()
            )));
        }

        let envelope: EtherscanResponse<Vec<BalanceEntry>> =
            response.json().map_err(ApiError::RequestFailed)?;

        if envelope.status != "1" {
            return Err(ApiError::EtherscanStatus(envelope.message));
        }

        envelope
            .result
            .ok_or_else(|| ApiError::InvalidResponse("Missing result field".to_string()))
    }
}
