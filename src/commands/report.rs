//! Report command implementation.
//!
//! The report command:
//! 1. Fetches the entity list from the FAST Protocol API
//! 2. Fetches stats and users per entity
//! 3. Fetches wallet balances from Etherscan
//! 4. Builds validated records
//! 5. Computes summary metrics and the collection breakdown
//! 6. Writes the snapshot, dashboard, and CSV outputs

use crate::aggregator::{compute_collection_performance, compute_summary};
use crate::api::{EtherscanClient, FastProtocolClient};
use crate::dashboard::{render_dashboard, render_text_summary, DashboardConfig};
use crate::output::{write_html, write_snapshot, write_wallet_csv};
use crate::parser::payload::{collect_addresses, collection_from_stats, parse_entities};
use crate::parser::records::{Collection, WalletRecord};
use crate::parser::schema::to_snapshot;
use crate::utils::config::AppConfig;
use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Snapshot output file name
pub const SNAPSHOT_FILE: &str = "fast_protocol_snapshot.json";
/// Dashboard output file name
pub const DASHBOARD_FILE: &str = "fast_protocol_dashboard.html";
/// Wallet list output file name
pub const WALLET_CSV_FILE: &str = "fast_protocol_wallet_list.csv";

/// Arguments for the report command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ReportArgs {
    /// Runtime configuration (API endpoints, key, output directory)
    pub config: AppConfig,

    /// Dashboard configuration
    pub dashboard_config: Option<DashboardConfig>,

    /// Skip the wallet CSV export
    pub skip_csv: bool,

    /// Print text summary to stdout
    pub print_summary: bool,

    /// Refresh repeatedly instead of running once
    pub watch: bool,
}

impl Default for ReportArgs {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            dashboard_config: None,
            skip_csv: false,
            print_summary: false,
            watch: false,
        }
    }
}

/// Execute the report command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - Report command arguments
///
/// # Returns
/// Ok when the refresh succeeds; in watch mode only a Ctrl-C ends the
/// process, and a failed refresh is logged and retried on the next tick.
///
/// # Errors
/// * API connection failures
/// * Payload parsing errors
/// * File write errors
pub fn execute_report(args: ReportArgs) -> Result<()> {
    if !args.watch {
        return run_refresh(&args);
    }

    let interval = Duration::from_secs(args.config.refresh_interval_seconds);
    loop {
        if let Err(e) = run_refresh(&args) {
            error!("Refresh failed: {:#}", e);
        }
        info!(
            "Next refresh in {}s",
            args.config.refresh_interval_seconds
        );
        std::thread::sleep(interval);
    }
}

/// Run a single refresh cycle
///
/// **Private** - one fetch-aggregate-render pass
fn run_refresh(args: &ReportArgs) -> Result<()> {
    let start_time = Instant::now();
    let config = &args.config;

    info!("Starting refresh from: {}", config.api_base_url);

    // Step 1: Fetch entity list
    info!("Step 1/6: Fetching entity list...");
    let client = FastProtocolClient::new(config).context("Failed to create API client")?;
    let raw_entities = client
        .fetch_entities()
        .context("Failed to fetch entity list")?;
    let entities = parse_entities(&raw_entities).context("Failed to parse entity list")?;

    info!("Found {} entities", entities.len());

    // Step 2: Fetch stats and users per entity
    info!("Step 2/6: Fetching per-entity data...");
    let (collections, assignments) =
        fetch_entity_data(&client, &entities).context("Failed to fetch entity data")?;

    debug!(
        "Fetched {} collections, {} unique wallets",
        collections.len(),
        assignments.len()
    );

    // Step 3: Fetch wallet balances
    info!("Step 3/6: Fetching balances for {} wallets...", assignments.len());
    let addresses: Vec<String> = assignments.iter().map(|(addr, _)| addr.clone()).collect();
    let etherscan = EtherscanClient::new(config).context("Failed to create Etherscan client")?;
    let balances = etherscan
        .fetch_balances(&addresses)
        .context("Failed to fetch wallet balances")?;

    // Step 4: Build validated records
    info!("Step 4/6: Building wallet records...");
    let wallets =
        build_wallet_records(assignments, &balances).context("Failed to build wallet records")?;

    // Step 5: Aggregate
    info!("Step 5/6: Computing metrics...");
    let summary = compute_summary(&wallets, &collections);
    let rows = compute_collection_performance(&wallets, &collections);

    info!(
        "Summary: {} wallets | {} ETH total | {} collections",
        summary.total_wallets, summary.total_value, summary.collection_count
    );

    // Step 6: Write outputs
    info!("Step 6/6: Writing output files...");
    let snapshot = to_snapshot(&config.api_base_url, summary, rows, wallets);

    let snapshot_path = config.output_dir.join(SNAPSHOT_FILE);
    write_snapshot(&snapshot, &snapshot_path).context("Failed to write snapshot JSON")?;
    info!("✓ Snapshot written to: {}", snapshot_path.display());

    let dashboard_path = config.output_dir.join(DASHBOARD_FILE);
    let html = render_dashboard(&snapshot, args.dashboard_config.as_ref());
    write_html(&html, &dashboard_path).context("Failed to write dashboard HTML")?;
    info!("✓ Dashboard written to: {}", dashboard_path.display());

    if !args.skip_csv {
        let csv_path = config.output_dir.join(WALLET_CSV_FILE);
        write_wallet_csv(&snapshot.wallets, &csv_path).context("Failed to write wallet CSV")?;
        info!("✓ Wallet list written to: {}", csv_path.display());
    }

    if args.print_summary {
        println!("\n{}", "=".repeat(72));
        println!("REFRESH SUMMARY");
        println!("{}", "=".repeat(72));
        println!("{}", render_text_summary(&snapshot, 10));
        println!("{}", "=".repeat(72));
    }

    let elapsed = start_time.elapsed();
    info!("Refresh completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Fetch stats and users for every entity
///
/// **Private** - internal helper for run_refresh
///
/// Returns the fetched collections and the wallet-to-entity assignments.
/// An address seen under several entities is kept once; the first entity
/// in API order wins.
fn fetch_entity_data(
    client: &FastProtocolClient,
    entities: &[String],
) -> Result<(Vec<Collection>, Vec<(String, String)>)> {
    let mut collections = Vec::with_capacity(entities.len());
    let mut assignments: Vec<(String, String)> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for entity in entities {
        let stats = client.fetch_entity_stats(entity);
        let users = client
            .fetch_entity_users(entity)
            .with_context(|| format!("Failed to fetch users for entity {}", entity))?;

        let addresses = collect_addresses(&users);
        debug!("{}: {} unique addresses", entity, addresses.len());

        let collection = collection_from_stats(entity, &stats, addresses.len() as u64)
            .with_context(|| format!("Failed to build collection record for {}", entity))?;
        collections.push(collection);

        for address in addresses {
            if seen.insert(address.clone()) {
                assignments.push((address, entity.clone()));
            }
        }
    }

    Ok((collections, assignments))
}

/// Combine address assignments with fetched balances into records
///
/// **Private** - internal helper for run_refresh
///
/// Addresses missing from the balance map get a zero balance; they stay in
/// the record set so the wallet count is honest about what was fetched.
fn build_wallet_records(
    assignments: Vec<(String, String)>,
    balances: &HashMap<String, Decimal>,
) -> Result<Vec<WalletRecord>> {
    let mut records = Vec::with_capacity(assignments.len());

    for (address, entity) in assignments {
        let balance = match balances.get(&address) {
            Some(balance) => *balance,
            None => {
                warn!("No balance returned for {}, recording zero", address);
                Decimal::ZERO
            }
        };

        let record = WalletRecord::new(address, balance, Some(entity))?;
        records.push(record);
    }

    Ok(records)
}

/// Validate report arguments
///
/// **Public** - can be called before execute_report for early validation
///
/// # Arguments
/// * `args` - Arguments to validate
///
/// # Returns
/// Ok if arguments are valid, Err with message if not
pub fn validate_args(args: &ReportArgs) -> Result<()> {
    let config = &args.config;

    if config.api_base_url.is_empty() {
        anyhow::bail!("API base URL cannot be empty");
    }

    if !config.api_base_url.starts_with("http://") && !config.api_base_url.starts_with("https://") {
        anyhow::bail!("API base URL must start with http:// or https://");
    }

    if config.etherscan_api_key.trim().is_empty() {
        anyhow::bail!("Etherscan API key is required (set --etherscan-api-key or ETHERSCAN_API_KEY)");
    }

    if config.max_users_per_entity == 0 {
        anyhow::bail!("max-users-per-entity must be greater than 0");
    }

    if args.watch && config.refresh_interval_seconds == 0 {
        anyhow::bail!("refresh-interval must be greater than 0 in watch mode");
    }

    Ok(())
}

/// Resolve the snapshot path for the configured output directory
///
/// **Public** - shared with the validate command's default lookup
pub fn snapshot_path(config: &AppConfig) -> PathBuf {
    config.output_dir.join(SNAPSHOT_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_args() -> ReportArgs {
        ReportArgs {
            config: AppConfig {
                etherscan_api_key: "key".to_string(),
                ..AppConfig::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_args_valid() {
        assert!(validate_args(&valid_args()).is_ok());
    }

    #[test]
    fn test_validate_args_empty_base_url() {
        let mut args = valid_args();
        args.config.api_base_url = String::new();
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_invalid_scheme() {
        let mut args = valid_args();
        args.config.api_base_url = "ftp://example.test".to_string();
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_missing_api_key() {
        let mut args = valid_args();
        args.config.etherscan_api_key = String::new();
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_zero_user_cap() {
        let mut args = valid_args();
        args.config.max_users_per_entity = 0;
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_watch_requires_interval() {
        let mut args = valid_args();
        args.watch = true;
        args.config.refresh_interval_seconds = 0;
        assert!(validate_args(&args).is_err());

        args.config.refresh_interval_seconds = 60;
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_build_wallet_records_zero_fill() {
        let assignments = vec![
            ("0xa".to_string(), "c1".to_string()),
            ("0xb".to_string(), "c1".to_string()),
        ];
        let mut balances = HashMap::new();
        balances.insert("0xa".to_string(), Decimal::from(5));

        let records = build_wallet_records(assignments, &balances).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].balance, Decimal::from(5));
        assert_eq!(records[1].balance, Decimal::ZERO);
    }
}
