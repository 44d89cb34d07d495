//! Headline summary metrics over the full wallet set.
//!
//! All value arithmetic uses Decimal so financial totals are exact; the
//! results carry no floating-point drift regardless of input order.

use crate::parser::records::{Collection, WalletRecord};
use crate::parser::schema::SummaryMetrics;
use log::debug;
use rust_decimal::Decimal;

/// Compute headline metrics from the current record set
///
/// **Public** - main entry point for summary calculation
///
/// # Arguments
/// * `wallets` - all wallet records for this refresh
/// * `collections` - all fetched collections (the collection count covers
///   every fetched collection, with or without wallets)
///
/// # Returns
/// Summary metrics with the average defined as zero when there are no
/// wallets, so the empty refresh is not an error case.
pub fn compute_summary(wallets: &[WalletRecord], collections: &[Collection]) -> SummaryMetrics {
    debug!(
        "Computing summary over {} wallets, {} collections",
        wallets.len(),
        collections.len()
    );

    let total_wallets = wallets.len() as u64;
    let total_value: Decimal = wallets.iter().map(|w| w.balance).sum();

    let average_wallet_value = if total_wallets > 0 {
        total_value / Decimal::from(total_wallets)
    } else {
        Decimal::ZERO
    };

    SummaryMetrics {
        total_wallets,
        total_value,
        collection_count: collections.len() as u64,
        average_wallet_value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallet(address: &str, balance: i64) -> WalletRecord {
        WalletRecord::new(address, Decimal::from(balance), None).unwrap()
    }

    #[test]
    fn test_compute_summary() {
        let wallets = vec![wallet("0xa", 10), wallet("0xb", 30), wallet("0xc", 60)];
        let collections = vec![
            Collection::new("c1", "c1", 2, Decimal::ZERO).unwrap(),
            Collection::new("c2", "c2", 1, Decimal::ZERO).unwrap(),
        ];

        let summary = compute_summary(&wallets, &collections);

        assert_eq!(summary.total_wallets, 3);
        assert_eq!(summary.total_value, Decimal::from(100));
        assert_eq!(summary.collection_count, 2);
        // 100 / 3 at Decimal precision
        assert_eq!(
            summary.average_wallet_value.round_dp(4),
            Decimal::new(333_333, 4)
        );
    }

    #[test]
    fn test_compute_summary_empty() {
        let summary = compute_summary(&[], &[]);

        assert_eq!(summary.total_wallets, 0);
        assert_eq!(summary.total_value, Decimal::ZERO);
        assert_eq!(summary.collection_count, 0);
        assert_eq!(summary.average_wallet_value, Decimal::ZERO);
    }

    #[test]
    fn test_total_value_is_order_independent() {
        let mut wallets = vec![wallet("0xa", 7), wallet("0xb", 11), wallet("0xc", 13)];
        let forward = compute_summary(&wallets, &[]);
        wallets.reverse();
        let reversed = compute_summary(&wallets, &[]);

        assert_eq!(forward.total_value, reversed.total_value);
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_collection_count_includes_empty_collections() {
        let wallets = vec![wallet("0xa", 1)];
        let collections = vec![
            Collection::new("busy", "busy", 1, Decimal::ZERO).unwrap(),
            Collection::new("idle", "idle", 0, Decimal::ZERO).unwrap(),
        ];

        let summary = compute_summary(&wallets, &collections);
        assert_eq!(summary.collection_count, 2);
    }
}
