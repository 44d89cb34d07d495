use fast_protocol_analytics::aggregator::{
    compute_collection_performance, compute_summary, UNASSIGNED_ID,
};
use fast_protocol_analytics::parser::records::{Collection, WalletRecord};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;

fn wallet(address: &str, balance: &str, collection: Option<&str>) -> WalletRecord {
    WalletRecord::new(
        address,
        balance.parse::<Decimal>().unwrap(),
        collection.map(|c| c.to_string()),
    )
    .unwrap()
}

fn collection(id: &str) -> Collection {
    Collection::new(id, id, 0, Decimal::ZERO).unwrap()
}

#[test]
fn test_scenario_three_wallets_two_collections() {
    let wallets = vec![
        wallet("0xA", "10", Some("C1")),
        wallet("0xB", "30", Some("C1")),
        wallet("0xC", "60", Some("C2")),
    ];
    let collections = vec![collection("C1"), collection("C2")];

    let summary = compute_summary(&wallets, &collections);
    assert_eq!(summary.total_value, Decimal::from(100));
    assert_eq!(summary.total_wallets, 3);
    assert_eq!(summary.collection_count, 2);
    assert_eq!(
        summary.average_wallet_value.round_dp(2),
        "33.33".parse::<Decimal>().unwrap()
    );

    let rows = compute_collection_performance(&wallets, &collections);
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0].collection.id, "C2");
    assert_eq!(rows[0].wallet_count, 1);
    assert_eq!(rows[0].share, "0.6".parse::<Decimal>().unwrap());

    assert_eq!(rows[1].collection.id, "C1");
    assert_eq!(rows[1].wallet_count, 2);
    assert_eq!(rows[1].share, "0.4".parse::<Decimal>().unwrap());
}

#[test]
fn test_empty_input_has_no_division_by_zero() {
    let summary = compute_summary(&[], &[]);

    assert_eq!(summary.total_wallets, 0);
    assert_eq!(summary.average_wallet_value, Decimal::ZERO);

    let rows = compute_collection_performance(&[], &[]);
    assert!(rows.is_empty());
}

#[test]
fn test_total_is_reorder_invariant() {
    let a = wallet("0xA", "0.1", None);
    let b = wallet("0xB", "0.2", None);
    let c = wallet("0xC", "0.7", None);

    let forward = compute_summary(&[a.clone(), b.clone(), c.clone()], &[]);
    let backward = compute_summary(&[c, b, a], &[]);

    assert_eq!(forward.total_value, backward.total_value);
    // Decimal keeps the sum exact; no binary float drift
    assert_eq!(forward.total_value, Decimal::ONE);
}

#[test]
fn test_shares_sum_to_one() {
    let wallets = vec![
        wallet("0xA", "12.5", Some("alpha")),
        wallet("0xB", "3.33", Some("beta")),
        wallet("0xC", "84.17", Some("gamma")),
        wallet("0xD", "0.005", Some("alpha")),
    ];
    let collections = vec![collection("alpha"), collection("beta"), collection("gamma")];

    let rows = compute_collection_performance(&wallets, &collections);
    let share_sum: Decimal = rows.iter().map(|r| r.share).sum();

    assert_eq!(share_sum.round_dp(20), Decimal::ONE);
}

#[test]
fn test_shares_are_zero_when_total_is_zero() {
    let wallets = vec![wallet("0xA", "0", Some("c1")), wallet("0xB", "0", Some("c2"))];
    let collections = vec![collection("c1"), collection("c2")];

    let rows = compute_collection_performance(&wallets, &collections);

    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.share == Decimal::ZERO));
}

#[test]
fn test_sort_order_value_then_name() {
    // Two groups tied at 100, one at 50
    let wallets = vec![
        wallet("0xA", "100", Some("zeta")),
        wallet("0xB", "50", Some("mid")),
        wallet("0xC", "100", Some("Alpha")),
    ];
    let collections = vec![collection("zeta"), collection("mid"), collection("Alpha")];

    let rows = compute_collection_performance(&wallets, &collections);

    let order: Vec<&str> = rows.iter().map(|r| r.collection.id.as_str()).collect();
    assert_eq!(order, vec!["Alpha", "zeta", "mid"]);
}

#[test]
fn test_unknown_reference_is_counted_somewhere() {
    let wallets = vec![
        wallet("0xA", "40", Some("known")),
        wallet("0xB", "60", Some("never-fetched")),
    ];
    let collections = vec![collection("known")];

    let summary = compute_summary(&wallets, &collections);
    assert_eq!(summary.total_value, Decimal::from(100));

    let rows = compute_collection_performance(&wallets, &collections);
    let unassigned = rows
        .iter()
        .find(|r| r.collection.id == UNASSIGNED_ID)
        .expect("unmatched wallet must land in the unassigned row");

    assert_eq!(unassigned.total_value, Decimal::from(60));

    let share_sum: Decimal = rows.iter().map(|r| r.share).sum();
    assert_eq!(share_sum, Decimal::ONE);
}

#[test]
fn test_aggregation_is_idempotent() {
    let wallets = vec![
        wallet("0xA", "1.25", Some("c1")),
        wallet("0xB", "2.75", Some("c2")),
    ];
    let collections = vec![collection("c1"), collection("c2")];

    let first_summary = compute_summary(&wallets, &collections);
    let second_summary = compute_summary(&wallets, &collections);
    assert_eq!(first_summary, second_summary);

    let first_rows = compute_collection_performance(&wallets, &collections);
    let second_rows = compute_collection_performance(&wallets, &collections);

    assert_eq!(first_rows.len(), second_rows.len());
    for (a, b) in first_rows.iter().zip(second_rows.iter()) {
        assert_eq!(a.collection.id, b.collection.id);
        assert_eq!(a.wallet_count, b.wallet_count);
        assert_eq!(a.total_value, b.total_value);
        assert_eq!(a.share, b.share);
    }
}
