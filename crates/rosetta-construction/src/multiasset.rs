// Copyright 2026 PRAGMA
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Token bundle ↔ ledger multi-asset map. Parsing merges repeated policy and
//! asset entries (distinct inputs may each carry the same asset) and yields a
//! deterministic ordering: bundle items by policy id, tokens by asset symbol.

use crate::validate::{is_valid_policy_id, is_valid_token_name, parse_nonnegative_amount};
use rosetta_kernel::{
    Amount, Bytes, EMPTY_SYMBOL, Hash, KeyValuePairs, Multiasset, PolicyId, TokenBundleItem, size,
};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InvalidTokenBundle {
    #[error("policy id '{0}' is not valid")]
    InvalidPolicyId(String),

    #[error("token name '{0}' is not valid")]
    InvalidTokenName(String),

    #[error("token name '{name}' has already been added for policy '{policy}'")]
    DuplicateAssetName { name: String, policy: String },

    #[error("asset '{name}' has missing, negative or invalid value '{value}'")]
    InvalidAssetValue { name: String, value: String },

    #[error("no value found for asset '{0}'")]
    TokenAssetValueMissing(String),
}

/// Canonicalise an asset symbol to its binary name: the empty-name marker and
/// the empty string both mean "no name".
fn asset_name_bytes(symbol: &str) -> Result<Vec<u8>, InvalidTokenBundle> {
    if symbol == EMPTY_SYMBOL || symbol.is_empty() {
        return Ok(vec![]);
    }
    hex::decode(symbol).map_err(|_| InvalidTokenBundle::InvalidTokenName(symbol.to_string()))
}

fn asset_name_symbol(name: &[u8]) -> String {
    if name.is_empty() {
        EMPTY_SYMBOL.to_string()
    } else {
        hex::encode(name)
    }
}

/// Validate a token bundle and turn it into a ledger multi-asset map.
pub fn token_bundle_to_multiasset(
    token_bundle: &[TokenBundleItem],
) -> Result<Multiasset, InvalidTokenBundle> {
    let mut policies = Vec::with_capacity(token_bundle.len());

    for item in token_bundle {
        if !is_valid_policy_id(&item.policy_id) {
            return Err(InvalidTokenBundle::InvalidPolicyId(item.policy_id.clone()));
        }

        let policy: PolicyId = hex::decode(&item.policy_id)
            .ok()
            .and_then(|bytes| <[u8; size::SCRIPT]>::try_from(bytes.as_slice()).ok())
            .map(Hash::new)
            .ok_or_else(|| InvalidTokenBundle::InvalidPolicyId(item.policy_id.clone()))?;

        let mut assets = Vec::with_capacity(item.tokens.len());
        let mut seen = Vec::with_capacity(item.tokens.len());

        for token in &item.tokens {
            let symbol = token.currency.symbol.as_str();
            if !is_valid_token_name(symbol) {
                return Err(InvalidTokenBundle::InvalidTokenName(symbol.to_string()));
            }

            let name = asset_name_bytes(symbol)?;
            if seen.contains(&name) {
                return Err(InvalidTokenBundle::DuplicateAssetName {
                    name: symbol.to_string(),
                    policy: item.policy_id.clone(),
                });
            }

            let quantity = parse_nonnegative_amount(&token.value).ok_or_else(|| {
                InvalidTokenBundle::InvalidAssetValue {
                    name: symbol.to_string(),
                    value: token.value.clone(),
                }
            })?;

            assets.push((Bytes::from(name.clone()), quantity));
            seen.push(name);
        }

        policies.push((policy, KeyValuePairs::Def(assets)));
    }

    Ok(KeyValuePairs::Def(policies))
}

/// Collapse a ledger multi-asset map into a token bundle, merging repeated
/// entries and ordering deterministically.
pub fn multiasset_to_token_bundle(
    multiasset: &Multiasset,
) -> Result<Vec<TokenBundleItem>, InvalidTokenBundle> {
    let mut merged: BTreeMap<PolicyId, BTreeMap<Vec<u8>, u128>> = BTreeMap::new();

    for (policy, assets) in multiasset.iter() {
        let policy_entry = merged.entry(*policy).or_default();
        for (name, quantity) in assets.iter() {
            *policy_entry.entry(name.to_vec()).or_default() += u128::from(*quantity);
        }
    }

    let mut token_bundle = Vec::with_capacity(merged.len());

    for (policy, assets) in merged {
        let mut tokens = Vec::with_capacity(assets.len());
        for (name, quantity) in assets {
            let symbol = asset_name_symbol(&name);
            if quantity == 0 {
                return Err(InvalidTokenBundle::TokenAssetValueMissing(symbol));
            }
            tokens.push(Amount::asset(quantity.to_string(), symbol));
        }
        token_bundle.push(TokenBundleItem {
            policy_id: hex::encode(policy),
            tokens,
        });
    }

    Ok(token_bundle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item(policy: &str, tokens: &[(&str, &str)]) -> TokenBundleItem {
        TokenBundleItem {
            policy_id: policy.to_string(),
            tokens: tokens
                .iter()
                .map(|(symbol, value)| Amount::asset(value.to_string(), symbol.to_string()))
                .collect(),
        }
    }

    #[test]
    fn roundtrip_simple_bundle() {
        let bundle = vec![item(&"aa".repeat(28), &[("01", "5")])];
        let multiasset = token_bundle_to_multiasset(&bundle)
            .map_err(|e| e.to_string())
            .unwrap();
        let decoded = multiasset_to_token_bundle(&multiasset)
            .map_err(|e| e.to_string())
            .unwrap();
        assert_eq!(decoded, bundle);
    }

    #[test]
    fn duplicate_asset_names_are_rejected() {
        let bundle = vec![item(&"aa".repeat(28), &[("cafe", "3"), ("cafe", "4")])];
        assert!(matches!(
            token_bundle_to_multiasset(&bundle),
            Err(InvalidTokenBundle::DuplicateAssetName { .. })
        ));
    }

    #[test]
    fn empty_marker_and_empty_string_are_the_same_name() {
        let bundle = vec![item(&"aa".repeat(28), &[("", "1"), ("\\x", "1")])];
        assert!(matches!(
            token_bundle_to_multiasset(&bundle),
            Err(InvalidTokenBundle::DuplicateAssetName { .. })
        ));
    }

    #[test]
    fn negative_or_garbage_values_are_rejected() {
        for value in ["-5", "", "abc"] {
            let bundle = vec![item(&"aa".repeat(28), &[("01", value)])];
            assert!(
                matches!(
                    token_bundle_to_multiasset(&bundle),
                    Err(InvalidTokenBundle::InvalidAssetValue { .. })
                ),
                "{value}"
            );
        }
    }

    #[test]
    fn bad_policy_id_is_rejected() {
        let bundle = vec![item("cafe", &[("01", "5")])];
        assert!(matches!(
            token_bundle_to_multiasset(&bundle),
            Err(InvalidTokenBundle::InvalidPolicyId(_))
        ));
    }

    #[test]
    fn merges_repeated_ledger_entries() {
        let policy = Hash::new([0xaa; 28]);
        let name = Bytes::from(vec![0x01]);
        let multiasset: Multiasset = KeyValuePairs::Def(vec![
            (policy, KeyValuePairs::Def(vec![(name.clone(), 3u64)])),
            (policy, KeyValuePairs::Def(vec![(name, 4u64)])),
        ]);

        let bundle = multiasset_to_token_bundle(&multiasset)
            .map_err(|e| e.to_string())
            .unwrap();
        assert_eq!(bundle.len(), 1);
        assert_eq!(bundle[0].tokens.len(), 1);
        assert_eq!(bundle[0].tokens[0].value, "7");
    }

    #[test]
    fn zero_sum_asset_is_an_error() {
        let policy = Hash::new([0xaa; 28]);
        let multiasset: Multiasset = KeyValuePairs::Def(vec![(
            policy,
            KeyValuePairs::Def(vec![(Bytes::from(vec![0x01]), 0u64)]),
        )]);

        assert!(matches!(
            multiasset_to_token_bundle(&multiasset),
            Err(InvalidTokenBundle::TokenAssetValueMissing(_))
        ));
    }

    #[test]
    fn ordering_is_deterministic() {
        let first = Hash::new([0x00; 28]);
        let last = Hash::new([0xff; 28]);
        let multiasset: Multiasset = KeyValuePairs::Def(vec![
            (
                last,
                KeyValuePairs::Def(vec![
                    (Bytes::from(vec![0x02]), 1u64),
                    (Bytes::from(vec![0x01]), 1u64),
                ]),
            ),
            (first, KeyValuePairs::Def(vec![(Bytes::from(vec![]), 1u64)])),
        ]);

        let bundle = multiasset_to_token_bundle(&multiasset)
            .map_err(|e| e.to_string())
            .unwrap();
        assert_eq!(bundle[0].policy_id, "00".repeat(28));
        assert_eq!(bundle[1].policy_id, "ff".repeat(28));
        assert_eq!(bundle[1].tokens[0].currency.symbol, "01");
        assert_eq!(bundle[1].tokens[1].currency.symbol, "02");
        assert_eq!(bundle[0].tokens[0].currency.symbol, EMPTY_SYMBOL);
    }
}
