//! Validated record types for wallets and collections.
//!
//! Records are constructed once from fetched API data, validated at
//! construction time, and treated as immutable afterwards. The aggregator
//! assumes it only ever sees records that passed these checks.

use crate::utils::error::ValidationError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A wallet address with its balance and optional collection membership
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletRecord {
    /// Ethereum-style address, lower-cased (hex format expected, not
    /// cryptographically validated)
    pub address: String,

    /// Balance in ETH
    pub balance: Decimal,

    /// Collection this wallet was first seen in, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<String>,
}

impl WalletRecord {
    /// Construct a validated wallet record
    ///
    /// # Errors
    /// * `ValidationError::EmptyAddress` - address is empty
    /// * `ValidationError::NegativeBalance` - balance is below zero
    pub fn new(
        address: impl Into<String>,
        balance: Decimal,
        collection_id: Option<String>,
    ) -> Result<Self, ValidationError> {
        let address = address.into();

        if address.trim().is_empty() {
            return Err(ValidationError::EmptyAddress);
        }

        if balance < Decimal::ZERO {
            return Err(ValidationError::NegativeBalance {
                address,
                balance: balance.to_string(),
            });
        }

        Ok(Self {
            address: address.to_lowercase(),
            balance,
            collection_id,
        })
    }
}

/// A named collection (entity) with its claim count and any aggregate
/// value the stats endpoint reported for it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    /// Entity slug used by the API
    pub id: String,

    /// Display name
    pub name: String,

    /// Number of claim records for this collection
    pub item_count: u64,

    /// Aggregate value reported by the API (zero when not reported)
    pub total_value: Decimal,
}

impl Collection {
    /// Construct a validated collection record
    ///
    /// # Errors
    /// * `ValidationError::EmptyCollectionId` - id or name is empty
    /// * `ValidationError::NegativeValue` - reported value is below zero
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        item_count: u64,
        total_value: Decimal,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        let name = name.into();

        if id.trim().is_empty() || name.trim().is_empty() {
            return Err(ValidationError::EmptyCollectionId);
        }

        if total_value < Decimal::ZERO {
            return Err(ValidationError::NegativeValue {
                id,
                value: total_value.to_string(),
            });
        }

        Ok(Self {
            id,
            name,
            item_count,
            total_value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_record_valid() {
        let record = WalletRecord::new("0xAbC123", Decimal::new(105, 1), None).unwrap();
        assert_eq!(record.address, "0xabc123");
        assert_eq!(record.balance, Decimal::new(105, 1));
        assert!(record.collection_id.is_none());
    }

    #[test]
    fn test_wallet_record_empty_address() {
        let result = WalletRecord::new("  ", Decimal::ONE, None);
        assert!(matches!(result, Err(ValidationError::EmptyAddress)));
    }

    #[test]
    fn test_wallet_record_negative_balance() {
        let result = WalletRecord::new("0xabc", Decimal::new(-1, 0), None);
        assert!(matches!(
            result,
            Err(ValidationError::NegativeBalance { .. })
        ));
    }

    #[test]
    fn test_collection_valid() {
        let collection = Collection::new("pudgy", "pudgy", 42, Decimal::ZERO).unwrap();
        assert_eq!(collection.id, "pudgy");
        assert_eq!(collection.item_count, 42);
    }

    #[test]
    fn test_collection_empty_id() {
        let result = Collection::new("", "name", 0, Decimal::ZERO);
        assert!(matches!(result, Err(ValidationError::EmptyCollectionId)));
    }

    #[test]
    fn test_collection_negative_value() {
        let result = Collection::new("c1", "c1", 0, Decimal::new(-5, 0));
        assert!(matches!(result, Err(ValidationError::NegativeValue { .. })));
    }
}
