//! Terminal summary output for the `--summary` flag.

use super::format::{format_count, format_eth, format_share};
use crate::parser::schema::Snapshot;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Create a rich text summary with a table and share bars
pub fn render_text_summary(snapshot: &Snapshot, max_lines: usize) -> String {
    let mut lines = Vec::new();
    let summary = &snapshot.summary;

    lines.push("  COLLECTION PERFORMANCE".to_string());
    lines.push("  ┏━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┳━━━━━━━━━━┳━━━━━━━━━━━━━━┳━━━━━━━━┓".to_string());
    lines.push(format!(
        "  ┃ {:<28} ┃ {:^8} ┃ {:^12} ┃ {:^6} ┃",
        "Collection", "Wallets", "Value (ETH)", "Share"
    ));
    lines.push("  ┣━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━╋━━━━━━━━━━╋━━━━━━━━━━━━━━╋━━━━━━━━┫".to_string());

    for row in snapshot.collections.iter().take(max_lines) {
        // Truncate names that would break the table
        let name = if row.collection.name.chars().count() > 28 {
            let head: String = row.collection.name.chars().take(27).collect();
            format!("{}…", head)
        } else {
            row.collection.name.clone()
        };

        lines.push(format!(
            "  ┃ {:<28} ┃ {:>8} ┃ {:>12} ┃ {:>6} ┃",
            name,
            format_count(row.wallet_count),
            format_eth(row.total_value),
            format_share(row.share)
        ));
    }

    lines.push("  ┗━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┻━━━━━━━━━━┻━━━━━━━━━━━━━━┻━━━━━━━━┛".to_string());

    lines.push(String::new());
    for row in snapshot.collections.iter().take(5) {
        let percent = row.share * Decimal::from(100);
        let bar_width = percent.round().to_usize().unwrap_or(0) / 2; // Max 50 chars
        let bar = "█".repeat(bar_width);
        lines.push(format!(
            "  └─ {:<20} {:<50} {:>6}",
            row.collection.name,
            bar,
            format_share(row.share)
        ));
    }

    if snapshot.collections.len() > max_lines {
        lines.push(String::new());
        lines.push(format!(
            "   (Showing top {} of {} collections)",
            max_lines,
            snapshot.collections.len()
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "  Wallets: {}  Total: {} ETH  Avg: {} ETH",
        format_count(summary.total_wallets),
        format_eth(summary.total_value),
        format_eth(summary.average_wallet_value)
    ));

    lines.join("\n")
}
