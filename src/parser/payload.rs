//! Parse-and-validate boundary for raw API payloads.
//!
//! The FAST Protocol endpoints are loosely shaped: lists arrive either bare
//! or wrapped in an envelope, and wallet entries have shipped under two
//! different key names. Everything is normalized here into validated
//! records so the aggregator never sees untyped data.

use super::records::Collection;
use crate::utils::config::{MAX_WEI, USER_LIST_FIELD_NAMES, WALLET_FIELD_NAMES, WEI_DECIMALS};
use crate::utils::error::ParseError;
use log::{debug, warn};
use rust_decimal::Decimal;

/// Parse the entity list response
///
/// **Public** - first step of every refresh
///
/// Accepts either a bare JSON array of entity names or an object with an
/// `entities` array.
///
/// # Errors
/// * `ParseError::InvalidShape` - neither accepted shape matched
pub fn parse_entities(raw: &serde_json::Value) -> Result<Vec<String>, ParseError> {
    let items = match raw {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(obj) => obj
            .get("entities")
            .and_then(|v| v.as_array())
            .ok_or_else(|| {
                ParseError::InvalidShape("Entity response object has no 'entities' array".to_string())
            })?,
        _ => {
            return Err(ParseError::InvalidShape(
                "Entity response must be an array or object".to_string(),
            ))
        }
    };

    let entities: Vec<String> = items
        .iter()
        .filter_map(|item| match item.as_str() {
            Some(name) if !name.is_empty() => Some(name.to_string()),
            _ => {
                warn!("Skipping non-string entity entry: {}", item);
                None
            }
        })
        .collect();

    debug!("Parsed {} entities", entities.len());
    Ok(entities)
}

/// Extract the user entries from one page of an entity user listing
///
/// **Public** - called by the client's pagination loop
///
/// Accepts a bare array, or an object keyed `users` or `data`.
///
/// # Errors
/// * `ParseError::InvalidShape` - no user array found
pub fn parse_user_page(raw: &serde_json::Value) -> Result<Vec<serde_json::Value>, ParseError> {
    if let Some(items) = raw.as_array() {
        return Ok(items.clone());
    }

    if let Some(obj) = raw.as_object() {
        for field in USER_LIST_FIELD_NAMES {
            if let Some(items) = obj.get(*field).and_then(|v| v.as_array()) {
                return Ok(items.clone());
            }
        }
        return Err(ParseError::InvalidShape(format!(
            "User page object has none of the expected keys (found: {:?})",
            obj.keys().collect::<Vec<_>>()
        )));
    }

    Err(ParseError::InvalidShape(
        "User page must be an array or object".to_string(),
    ))
}

/// Pull the wallet address out of a single user entry
///
/// **Public** - used when flattening user pages into addresses
///
/// Entries are either bare address strings or objects keyed `wallet` /
/// `walletAddress`. Returns None (and logs) for anything else.
pub fn extract_wallet_address(user: &serde_json::Value) -> Option<String> {
    if let Some(addr) = user.as_str() {
        return Some(addr.to_lowercase());
    }

    if let Some(obj) = user.as_object() {
        for field in WALLET_FIELD_NAMES {
            if let Some(addr) = obj.get(*field).and_then(|v| v.as_str()) {
                return Some(addr.to_lowercase());
            }
        }
    }

    warn!("User entry has no recognizable wallet address: {}", user);
    None
}

/// Flatten user entries into deduplicated wallet addresses
///
/// **Public** - order-preserving; first occurrence wins
pub fn collect_addresses(users: &[serde_json::Value]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    users
        .iter()
        .filter_map(extract_wallet_address)
        .filter(|addr| seen.insert(addr.clone()))
        .collect()
}

/// Build a collection record from the stats payload for an entity
///
/// **Public** - tolerant of missing fields: the stats endpoint is best
/// effort and an empty object still yields a usable record.
///
/// # Arguments
/// * `entity` - entity slug from the entity list
/// * `stats` - raw stats payload (may be an empty object)
/// * `claim_count` - number of user records fetched for this entity
///
/// # Errors
/// * `ParseError::Validation` - reported value fails record validation
pub fn collection_from_stats(
    entity: &str,
    stats: &serde_json::Value,
    claim_count: u64,
) -> Result<Collection, ParseError> {
    let name = stats
        .get("name")
        .and_then(|v| v.as_str())
        .unwrap_or(entity);

    let item_count = stats
        .get("totalActivities")
        .or_else(|| stats.get("totalRecords"))
        .and_then(|v| v.as_u64())
        .unwrap_or(claim_count);

    let total_value = match stats.get("totalValue").or_else(|| stats.get("value")) {
        Some(value) => parse_decimal_value(value)?,
        None => Decimal::ZERO,
    };

    Ok(Collection::new(entity, name, item_count, total_value)?)
}

/// Parse a JSON number or numeric string into a Decimal
///
/// **Private** - internal utility
fn parse_decimal_value(value: &serde_json::Value) -> Result<Decimal, ParseError> {
    if let Some(n) = value.as_u64() {
        return Ok(Decimal::from(n));
    }

    if let Some(s) = value.as_str() {
        return s
            .parse::<Decimal>()
            .map_err(|_| ParseError::InvalidBalance(s.to_string()));
    }

    if let Some(f) = value.as_f64() {
        return Decimal::try_from(f).map_err(|_| ParseError::InvalidBalance(f.to_string()));
    }

    Err(ParseError::InvalidShape(format!(
        "Expected number or string, found {}",
        value
    )))
}

/// Convert a wei string from Etherscan into an ETH Decimal
///
/// **Public** - used by the Etherscan client
///
/// A wei integer interpreted at scale 18 is exactly the ETH amount, so no
/// division is involved and no precision is lost.
///
/// # Errors
/// * `ParseError::InvalidBalance` - not an integer, negative, or too large
///   for a Decimal mantissa
pub fn parse_wei(wei: &str) -> Result<Decimal, ParseError> {
    let raw: i128 = wei
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidBalance(wei.to_string()))?;

    if !(0..=MAX_WEI).contains(&raw) {
        return Err(ParseError::InvalidBalance(wei.to_string()));
    }

    Ok(Decimal::from_i128_with_scale(raw, WEI_DECIMALS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_entities_bare_array() {
        let raw = json!(["pudgy", "hyperliquid"]);
        let entities = parse_entities(&raw).unwrap();
        assert_eq!(entities, vec!["pudgy", "hyperliquid"]);
    }

    #[test]
    fn test_parse_entities_wrapped() {
        let raw = json!({ "entities": ["azuki"] });
        let entities = parse_entities(&raw).unwrap();
        assert_eq!(entities, vec!["azuki"]);
    }

    #[test]
    fn test_parse_entities_bad_shape() {
        let raw = json!("not a list");
        assert!(parse_entities(&raw).is_err());
    }

    #[test]
    fn test_parse_entities_skips_non_strings() {
        let raw = json!(["pudgy", 42, "azuki"]);
        let entities = parse_entities(&raw).unwrap();
        assert_eq!(entities.len(), 2);
    }

    #[test]
    fn test_parse_user_page_shapes() {
        let bare = json!([{ "wallet": "0xA" }]);
        assert_eq!(parse_user_page(&bare).unwrap().len(), 1);

        let users = json!({ "users": [{ "wallet": "0xA" }, { "wallet": "0xB" }] });
        assert_eq!(parse_user_page(&users).unwrap().len(), 2);

        let data = json!({ "data": ["0xA"] });
        assert_eq!(parse_user_page(&data).unwrap().len(), 1);

        let unknown = json!({ "results": [] });
        assert!(parse_user_page(&unknown).is_err());
    }

    #[test]
    fn test_extract_wallet_address_variants() {
        assert_eq!(
            extract_wallet_address(&json!("0xABC")),
            Some("0xabc".to_string())
        );
        assert_eq!(
            extract_wallet_address(&json!({ "wallet": "0xDEF" })),
            Some("0xdef".to_string())
        );
        assert_eq!(
            extract_wallet_address(&json!({ "walletAddress": "0x123" })),
            Some("0x123".to_string())
        );
        assert_eq!(extract_wallet_address(&json!({ "id": 7 })), None);
    }

    #[test]
    fn test_collect_addresses_dedupes() {
        let users = vec![json!("0xA"), json!({ "wallet": "0xa" }), json!("0xB")];
        let addresses = collect_addresses(&users);
        assert_eq!(addresses, vec!["0xa", "0xb"]);
    }

    #[test]
    fn test_collection_from_stats_defaults() {
        let collection = collection_from_stats("pudgy", &json!({}), 12).unwrap();
        assert_eq!(collection.name, "pudgy");
        assert_eq!(collection.item_count, 12);
        assert_eq!(collection.total_value, Decimal::ZERO);
    }

    #[test]
    fn test_collection_from_stats_reported_fields() {
        let stats = json!({ "name": "Pudgy Penguins", "totalActivities": 99, "totalValue": "12.5" });
        let collection = collection_from_stats("pudgy", &stats, 12).unwrap();
        assert_eq!(collection.name, "Pudgy Penguins");
        assert_eq!(collection.item_count, 99);
        assert_eq!(collection.total_value, Decimal::new(125, 1));
    }

    #[test]
    fn test_parse_wei() {
        // 1.5 ETH
        let eth = parse_wei("1500000000000000000").unwrap();
        assert_eq!(eth, Decimal::new(15, 1));

        assert_eq!(parse_wei("0").unwrap(), Decimal::ZERO);
        assert!(parse_wei("-1").is_err());
        assert!(parse_wei("0x10").is_err());
        assert!(parse_wei("not-a-number").is_err());
    }
}
