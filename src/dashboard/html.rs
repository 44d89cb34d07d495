//! Static HTML dashboard generation.
//!
//! Builds a single self-contained page: a stat-tile row, a Chart.js bar
//! chart of collection performance, a collection table, and a wallet
//! balance table with explorer links. No template engine; the markup is
//! assembled directly, the same way the SVG output used to be.

use super::format::{
    escape_html, etherscan_address_link, format_count, format_eth, format_share, short_address,
};
use crate::parser::schema::Snapshot;
use log::info;

/// Number of collections shown in the bar chart
const CHART_TOP_N: usize = 10;

/// Number of wallet rows shown in the balance table
const WALLET_TABLE_ROWS: usize = 50;

/// Dashboard configuration
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub title: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "FAST Protocol Community Analytics".to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Render the dashboard HTML from a snapshot
///
/// **Public** - main entry point for dashboard generation
///
/// # Arguments
/// * `snapshot` - aggregated snapshot for this refresh
/// * `config` - optional dashboard configuration (title)
///
/// # Returns
/// Complete HTML document as a string. An empty snapshot renders a valid
/// page with zeroed tiles and empty tables.
pub fn render_dashboard(snapshot: &Snapshot, config: Option<&DashboardConfig>) -> String {
    let config = config.cloned().unwrap_or_default();
    info!(
        "Rendering dashboard with {} collection rows, {} wallets",
        snapshot.collections.len(),
        snapshot.wallets.len()
    );

    let mut html = String::new();
    let title = escape_html(&config.title);

    // Document head
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", title));
    html.push_str("<script src=\"https://cdn.jsdelivr.net/npm/chart.js@4\"></script>\n");
    html.push_str(STYLE);
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str(&format!("<h1>{}</h1>\n", title));
    html.push_str(&format!(
        "<p class=\"meta\">Generated {} &middot; Source: {}</p>\n",
        escape_html(&snapshot.generated_at),
        escape_html(&snapshot.source)
    ));

    render_tiles(snapshot, &mut html);
    render_chart(snapshot, &mut html);
    render_collection_table(snapshot, &mut html);
    render_wallet_table(snapshot, &mut html);

    html.push_str("</body>\n</html>\n");

    info!("Dashboard rendered ({} bytes)", html.len());
    html
}

/// Stat tiles row
///
/// **Private** - internal section renderer
fn render_tiles(snapshot: &Snapshot, out: &mut String) {
    let summary = &snapshot.summary;

    out.push_str("<div class=\"tiles\">\n");

    let tiles = [
        ("Unique Wallets", format_count(summary.total_wallets)),
        ("Total Value (ETH)", format_eth(summary.total_value)),
        ("Collections", format_count(summary.collection_count)),
        (
            "Avg Wallet Value (ETH)",
            format_eth(summary.average_wallet_value),
        ),
    ];

    for (label, value) in tiles {
        out.push_str(&format!(
            "<div class=\"tile\"><div class=\"tile-value\">{}</div><div class=\"tile-label\">{}</div></div>\n",
            value, label
        ));
    }

    out.push_str("</div>\n");
}

/// Horizontal bar chart of top collections by total value
///
/// **Private** - internal section renderer
fn render_chart(snapshot: &Snapshot, out: &mut String) {
    let top: Vec<_> = snapshot.collections.iter().take(CHART_TOP_N).collect();

    let labels: Vec<String> = top
        .iter()
        .map(|r| escape_html(&r.collection.name))
        .collect();
    let values: Vec<String> = top.iter().map(|r| r.total_value.to_string()).collect();

    out.push_str("<h2>Collection Performance</h2>\n");
    out.push_str("<div class=\"chart\"><canvas id=\"collections-chart\"></canvas></div>\n");
    out.push_str("<script>\n");
    out.push_str(&format!(
        "const labels = {};\nconst values = [{}];\n",
        serde_json::to_string(&labels).unwrap_or_else(|_| "[]".to_string()),
        values.join(",")
    ));
    out.push_str(
        "new Chart(document.getElementById('collections-chart'), {\n\
         type: 'bar',\n\
         data: { labels: labels, datasets: [{ label: 'Total Value (ETH)', data: values, backgroundColor: '#4682b4' }] },\n\
         options: { indexAxis: 'y', plugins: { legend: { display: false } }, scales: { x: { beginAtZero: true } } }\n\
         });\n",
    );
    out.push_str("</script>\n");
}

/// Collection breakdown table
///
/// **Private** - internal section renderer
fn render_collection_table(snapshot: &Snapshot, out: &mut String) {
    out.push_str("<table>\n<thead><tr>");
    out.push_str("<th>#</th><th>Collection</th><th>Wallets</th><th>Value (ETH)</th><th>Share</th>");
    out.push_str("</tr></thead>\n<tbody>\n");

    for (rank, row) in snapshot.collections.iter().enumerate() {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            rank + 1,
            escape_html(&row.collection.name),
            format_count(row.wallet_count),
            format_eth(row.total_value),
            format_share(row.share)
        ));
    }

    out.push_str("</tbody>\n</table>\n");
}

/// Wallet balance table with explorer links
///
/// **Private** - internal section renderer
fn render_wallet_table(snapshot: &Snapshot, out: &mut String) {
    out.push_str("<h2>Wallet Balances</h2>\n");

    // Sort by balance descending for display; the snapshot order is
    // whatever the fetch produced
    let mut wallets: Vec<_> = snapshot.wallets.iter().collect();
    wallets.sort_by(|a, b| b.balance.cmp(&a.balance));

    out.push_str("<table>\n<thead><tr>");
    out.push_str("<th>Wallet</th><th>Balance (ETH)</th><th>Collection</th><th>Explorer</th>");
    out.push_str("</tr></thead>\n<tbody>\n");

    for wallet in wallets.iter().take(WALLET_TABLE_ROWS) {
        let collection = wallet.collection_id.as_deref().unwrap_or("—");
        out.push_str(&format!(
            "<tr><td class=\"mono\">{}</td><td>{}</td><td>{}</td><td><a href=\"{}\">View</a></td></tr>\n",
            escape_html(&short_address(&wallet.address)),
            format_eth(wallet.balance),
            escape_html(collection),
            etherscan_address_link(&wallet.address)
        ));
    }

    out.push_str("</tbody>\n</table>\n");

    if snapshot.wallets.len() > WALLET_TABLE_ROWS {
        out.push_str(&format!(
            "<p class=\"meta\">Showing top {} of {} wallets</p>\n",
            WALLET_TABLE_ROWS,
            snapshot.wallets.len()
        ));
    }
}

/// Inline stylesheet
const STYLE: &str = "<style>\n\
body { font-family: sans-serif; margin: 2rem auto; max-width: 960px; color: #1a1a2e; }\n\
h1 { margin-bottom: 0.25rem; }\n\
.meta { color: #666; font-size: 0.85rem; }\n\
.tiles { display: flex; gap: 1rem; margin: 1.5rem 0; }\n\
.tile { flex: 1; background: #f0f2f6; border-radius: 0.5rem; padding: 1rem; text-align: center; }\n\
.tile-value { font-size: 1.6rem; font-weight: bold; color: #1f77b4; }\n\
.tile-label { font-size: 0.8rem; color: #555; margin-top: 0.25rem; }\n\
.chart { max-height: 420px; }\n\
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }\n\
th, td { text-align: left; padding: 0.4rem 0.6rem; border-bottom: 1px solid #ddd; }\n\
th { background: #f0f2f6; }\n\
.mono { font-family: monospace; }\n\
</style>\n";
