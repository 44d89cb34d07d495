//! CSV wallet list export.
//!
//! Flat export of every wallet with its balance, sorted by balance
//! descending, for spreadsheet analysis alongside the dashboard.

use super::json::{create_parent_dirs, validate_output_path};
use crate::parser::records::WalletRecord;
use crate::utils::error::OutputError;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write the wallet list as CSV
///
/// **Public** - main entry point for CSV output
///
/// # Arguments
/// * `wallets` - wallet records (copied and sorted internally)
/// * `output_path` - Path to output CSV file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is invalid
pub fn write_wallet_csv(
    wallets: &[WalletRecord],
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!(
        "Writing {} wallets to CSV: {}",
        wallets.len(),
        output_path.display()
    );

    validate_output_path(output_path)?;
    create_parent_dirs(output_path)?;

    let mut sorted: Vec<&WalletRecord> = wallets.iter().collect();
    sorted.sort_by(|a, b| b.balance.cmp(&a.balance));

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "Address,Balance ETH,Collection").map_err(OutputError::WriteFailed)?;

    for wallet in sorted {
        writeln!(
            writer,
            "{},{},{}",
            csv_field(&wallet.address),
            wallet.balance,
            csv_field(wallet.collection_id.as_deref().unwrap_or(""))
        )
        .map_err(OutputError::WriteFailed)?;
    }

    writer.flush().map_err(OutputError::WriteFailed)?;

    Ok(())
}

/// Quote a field when it contains a separator or quote
///
/// **Private** - addresses and slugs are normally plain, but the ids come
/// from a remote API and are not trusted
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_wallet_csv_sorted() {
        let wallets = vec![
            WalletRecord::new("0xlow", Decimal::from(1), Some("c1".to_string())).unwrap(),
            WalletRecord::new("0xhigh", Decimal::from(9), None).unwrap(),
        ];

        let temp_file = NamedTempFile::new().unwrap();
        write_wallet_csv(&wallets, temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines[0], "Address,Balance ETH,Collection");
        assert_eq!(lines[1], "0xhigh,9,");
        assert_eq!(lines[2], "0xlow,1,c1");
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("with,comma"), "\"with,comma\"");
        assert_eq!(csv_field("with\"quote"), "\"with\"\"quote\"");
    }
}
