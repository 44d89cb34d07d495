//! FAST Protocol Analytics CLI
//!
//! Fetches community activity and wallet balances, aggregates them into
//! summary metrics, and renders a static HTML dashboard.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use fast_protocol_analytics::commands::{execute_report, snapshot_path, validate_args, ReportArgs};
use fast_protocol_analytics::dashboard::DashboardConfig;
use fast_protocol_analytics::utils::config::{AppConfig, SCHEMA_VERSION};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// FAST Protocol Analytics - community metrics and dashboards
#[derive(Parser, Debug)]
#[command(name = "fast-analytics")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch data, compute metrics, and write the dashboard
    Report {
        /// FAST Protocol API base URL
        #[arg(long, default_value = "https://www.fastprotocol.io")]
        api_url: String,

        /// Etherscan API base URL
        #[arg(long, default_value = "https://api.etherscan.io/api")]
        etherscan_url: String,

        /// Etherscan API key
        #[arg(long, env = "ETHERSCAN_API_KEY", default_value = "")]
        etherscan_api_key: String,

        /// Output directory for snapshot, dashboard, and CSV
        #[arg(short, long, default_value = "output")]
        output: PathBuf,

        /// Maximum users fetched per entity
        #[arg(long, default_value = "1000")]
        max_users: usize,

        /// Dashboard title
        #[arg(long)]
        title: Option<String>,

        /// Skip the wallet CSV export
        #[arg(long)]
        no_csv: bool,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,

        /// Refresh repeatedly at the configured interval
        #[arg(long)]
        watch: bool,

        /// Seconds between refreshes in watch mode
        #[arg(long, default_value = "300")]
        refresh_interval: u64,
    },

    /// Validate a snapshot JSON file
    Validate {
        /// Path to snapshot JSON file (defaults to the standard output path)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Report {
            api_url,
            etherscan_url,
            etherscan_api_key,
            output,
            max_users,
            title,
            no_csv,
            summary,
            watch,
            refresh_interval,
        } => {
            let config = AppConfig {
                api_base_url: api_url,
                etherscan_api_url: etherscan_url,
                etherscan_api_key,
                refresh_interval_seconds: refresh_interval,
                output_dir: output,
                max_users_per_entity: max_users,
            };

            let dashboard_config = title.map(|t| DashboardConfig::new().with_title(t));

            let args = ReportArgs {
                config,
                dashboard_config,
                skip_csv: no_csv,
                print_summary: summary,
                watch,
            };

            // Validate args first
            validate_args(&args)?;

            // Execute report
            execute_report(args)?;
        }

        Commands::Validate { file } => {
            let path = file.unwrap_or_else(|| snapshot_path(&AppConfig::default()));
            validate_snapshot_file(path)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Validate a snapshot JSON file
///
/// **Private** - internal command implementation
fn validate_snapshot_file(file_path: PathBuf) -> Result<()> {
    use fast_protocol_analytics::output::read_snapshot;

    println!("Validating snapshot: {}", file_path.display());

    let snapshot = read_snapshot(&file_path)?;

    // Recompute the balance sum and check it against the stored total
    let balance_sum: Decimal = snapshot.wallets.iter().map(|w| w.balance).sum();
    if balance_sum != snapshot.summary.total_value {
        anyhow::bail!(
            "Invariant violation: stored total {} != recomputed sum {}",
            snapshot.summary.total_value,
            balance_sum
        );
    }

    println!("✓ Valid snapshot JSON");
    println!("  Version: {}", snapshot.version);
    println!("  Source: {}", snapshot.source);
    println!("  Wallets: {}", snapshot.summary.total_wallets);
    println!("  Total Value: {} ETH", snapshot.summary.total_value);
    println!("  Collections: {}", snapshot.summary.collection_count);
    println!("  Performance Rows: {}", snapshot.collections.len());

    Ok(())
}

/// Display schema information
///
/// **Private** - internal command implementation
fn display_schema(show_details: bool) {
    println!("FAST Protocol Analytics Snapshot Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string           - Schema version (e.g., '1.0.0')");
        println!("  source: string            - API base URL the data came from");
        println!("  summary: object           - Headline metrics");
        println!("    total_wallets: number   - Unique wallets");
        println!("    total_value: decimal    - Exact sum of balances (ETH)");
        println!("    collection_count: number - All fetched collections");
        println!("    average_wallet_value: decimal - total / wallets (0 when empty)");
        println!("  collections: array        - Per-collection rows, value-descending");
        println!("    collection: object      - id, name, item_count, total_value");
        println!("    wallet_count: number    - Wallets attributed to the row");
        println!("    total_value: decimal    - Attributed balance sum (ETH)");
        println!("    share: decimal          - Fraction of the grand total");
        println!("  wallets: array            - address, balance, collection_id");
        println!("  generated_at: string      - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
///
/// **Private** - internal command implementation
fn display_version() {
    println!("FAST Protocol Analytics v{}", env!("CARGO_PKG_VERSION"));
    println!("Snapshot Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Community analytics and dashboard generation for the FAST Protocol API.");
}
