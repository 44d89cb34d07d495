//! Per-collection performance breakdown.
//!
//! Groups wallets by their collection reference, sums balances per group,
//! and computes each group's share of the grand total. Wallets that carry
//! no reference, or reference an id absent from the fetched collection
//! list, are grouped under an `unassigned` pseudo-collection so that no
//! balance ever drops out of the breakdown.

use crate::parser::records::{Collection, WalletRecord};
use crate::parser::schema::CollectionPerformance;
use log::debug;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Id used for the pseudo-collection that absorbs unmatched wallets
pub const UNASSIGNED_ID: &str = "unassigned";

/// Compute the per-collection breakdown
///
/// **Public** - main entry point for the breakdown
///
/// # Arguments
/// * `wallets` - all wallet records for this refresh
/// * `collections` - all fetched collections
///
/// # Returns
/// One row per collection with at least one attributed wallet, ordered by
/// descending total value, ties broken by collection name ascending
/// (case-insensitive). Shares sum to 1 (to Decimal precision) when the
/// grand total is positive, and are all zero when it is zero.
pub fn compute_collection_performance(
    wallets: &[WalletRecord],
    collections: &[Collection],
) -> Vec<CollectionPerformance> {
    debug!(
        "Computing collection performance over {} wallets, {} collections",
        wallets.len(),
        collections.len()
    );

    let known: HashMap<&str, &Collection> =
        collections.iter().map(|c| (c.id.as_str(), c)).collect();

    // Map to aggregate groups: collection id -> (wallet count, balance sum)
    let mut groups: HashMap<String, (u64, Decimal)> = HashMap::new();

    for wallet in wallets {
        let group_id = match wallet.collection_id.as_deref() {
            Some(id) if known.contains_key(id) => id,
            _ => UNASSIGNED_ID,
        };

        let entry = groups.entry(group_id.to_string()).or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 += wallet.balance;
    }

    let grand_total: Decimal = groups.values().map(|(_, sum)| *sum).sum();

    let mut rows: Vec<CollectionPerformance> = groups
        .into_iter()
        .map(|(id, (wallet_count, total_value))| {
            let collection = known
                .get(id.as_str())
                .map(|c| (*c).clone())
                .unwrap_or_else(unassigned_collection);

            let share = if grand_total > Decimal::ZERO {
                total_value / grand_total
            } else {
                Decimal::ZERO
            };

            CollectionPerformance {
                collection,
                wallet_count,
                total_value,
                share,
            }
        })
        .collect();

    // Descending by value, then name ascending for a deterministic order
    rows.sort_by(|a, b| {
        b.total_value.cmp(&a.total_value).then_with(|| {
            a.collection
                .name
                .to_lowercase()
                .cmp(&b.collection.name.to_lowercase())
        })
    });

    debug!("Built {} performance rows", rows.len());

    rows
}

/// The pseudo-collection row for unmatched wallets
///
/// **Private** - internal constructor
fn unassigned_collection() -> Collection {
    Collection {
        id: UNASSIGNED_ID.to_string(),
        name: "Unassigned".to_string(),
        item_count: 0,
        total_value: Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallet(address: &str, balance: i64, collection: &str) -> WalletRecord {
        WalletRecord::new(address, Decimal::from(balance), Some(collection.to_string())).unwrap()
    }

    fn collection(id: &str) -> Collection {
        Collection::new(id, id, 0, Decimal::ZERO).unwrap()
    }

    #[test]
    fn test_groups_and_shares() {
        let wallets = vec![
            wallet("0xa", 10, "c1"),
            wallet("0xb", 30, "c1"),
            wallet("0xc", 60, "c2"),
        ];
        let collections = vec![collection("c1"), collection("c2")];

        let rows = compute_collection_performance(&wallets, &collections);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].collection.id, "c2");
        assert_eq!(rows[0].wallet_count, 1);
        assert_eq!(rows[0].total_value, Decimal::from(60));
        assert_eq!(rows[0].share, Decimal::new(6, 1));
        assert_eq!(rows[1].collection.id, "c1");
        assert_eq!(rows[1].wallet_count, 2);
        assert_eq!(rows[1].share, Decimal::new(4, 1));
    }

    #[test]
    fn test_unknown_reference_goes_to_unassigned() {
        let wallets = vec![wallet("0xa", 25, "c1"), wallet("0xb", 75, "ghost")];
        let collections = vec![collection("c1")];

        let rows = compute_collection_performance(&wallets, &collections);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].collection.id, UNASSIGNED_ID);
        assert_eq!(rows[0].total_value, Decimal::from(75));

        let share_sum: Decimal = rows.iter().map(|r| r.share).sum();
        assert_eq!(share_sum, Decimal::ONE);
    }

    #[test]
    fn test_zero_total_yields_zero_shares() {
        let wallets = vec![wallet("0xa", 0, "c1"), wallet("0xb", 0, "c2")];
        let collections = vec![collection("c1"), collection("c2")];

        let rows = compute_collection_performance(&wallets, &collections);

        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert_eq!(row.share, Decimal::ZERO);
        }
    }

    #[test]
    fn test_sort_order_ties_break_by_name() {
        let wallets = vec![
            wallet("0xa", 100, "Delta"),
            wallet("0xb", 50, "echo"),
            wallet("0xc", 100, "alpha"),
        ];
        let collections = vec![collection("Delta"), collection("echo"), collection("alpha")];

        let rows = compute_collection_performance(&wallets, &collections);

        let order: Vec<&str> = rows.iter().map(|r| r.collection.id.as_str()).collect();
        assert_eq!(order, vec!["alpha", "Delta", "echo"]);
    }

    #[test]
    fn test_collections_without_wallets_produce_no_row() {
        let wallets = vec![wallet("0xa", 5, "c1")];
        let collections = vec![collection("c1"), collection("empty")];

        let rows = compute_collection_performance(&wallets, &collections);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].collection.id, "c1");
    }

    #[test]
    fn test_empty_input() {
        let rows = compute_collection_performance(&[], &[]);
        assert!(rows.is_empty());
    }
}
