//! Configuration and constants for the CLI.

use std::path::PathBuf;
use std::time::Duration;

/// Default timeout for API requests
pub const DEFAULT_API_TIMEOUT: Duration = Duration::from_secs(30);

/// Delay between paginated requests to the same endpoint
pub const RATE_LIMIT_DELAY: Duration = Duration::from_millis(500);

/// Current snapshot schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Page size for the entity user listing endpoint (API maximum is 200)
pub const USER_PAGE_LIMIT: usize = 200;

/// Maximum addresses per Etherscan balancemulti call
pub const ETHERSCAN_BATCH_SIZE: usize = 20;

// Wei/ETH conversion
// Etherscan reports balances in wei; a Decimal with scale 18 is the ETH value.
pub const WEI_DECIMALS: u32 = 18;
// Largest mantissa a Decimal can carry (96 bits); wei values above this are rejected
pub const MAX_WEI: i128 = 79_228_162_514_264_337_593_543_950_335;

// Field names for wallet extraction (the API has returned both spellings)
pub const WALLET_FIELD_NAMES: &[&str] = &["wallet", "walletAddress"];
// Field names for user page extraction
pub const USER_LIST_FIELD_NAMES: &[&str] = &["users", "data"];

/// Runtime configuration, constructed once at startup and passed by
/// reference into the fetch clients. The aggregator never sees it.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the FAST Protocol API
    pub api_base_url: String,

    /// Base URL of the Etherscan API
    pub etherscan_api_url: String,

    /// Etherscan API key (required for balance lookups)
    pub etherscan_api_key: String,

    /// Seconds between refreshes in watch mode
    pub refresh_interval_seconds: u64,

    /// Directory for snapshot, dashboard, and CSV outputs
    pub output_dir: PathBuf,

    /// Cap on users fetched per entity (keeps large collections manageable)
    pub max_users_per_entity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://www.fastprotocol.io".to_string(),
            etherscan_api_url: "https://api.etherscan.io/api".to_string(),
            etherscan_api_key: String::new(),
            refresh_interval_seconds: 300,
            output_dir: PathBuf::from("output"),
            max_users_per_entity: 1000,
        }
    }
}
