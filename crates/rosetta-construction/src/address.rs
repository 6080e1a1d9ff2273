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

//! Address resolution: deriving reward/base/enterprise addresses from public
//! key material, decoding address text, and checking network consistency.
//!
//! The canonical prefix of a derived address is purely network-determined
//! (mainnet vs. any testnet); nothing here ever infers a network from address
//! byte content beyond the explicit tag byte.

use rosetta_kernel::{
    Address, ByronAddress, CurveType, Hash, Hasher, NetworkName, PublicKey, ShelleyAddress,
    ShelleyDelegationPart, ShelleyPaymentPart, StakeAddress, StakePayload, size, to_network_id,
};
use thiserror::Error;

/// Ed25519 public keys are 32 bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

const HEADER_REWARD_KEY: u8 = 0b1110_0000;
const HEADER_REWARD_SCRIPT: u8 = 0b1111_0000;

#[derive(Debug, Error)]
pub enum InvalidAddress {
    #[error("malformed address '{address}': {reason}")]
    Malformed { address: String, reason: String },

    #[error("invalid public key: expected {expected} bytes, got {got}")]
    InvalidKey { expected: usize, got: usize },

    #[error("invalid public key: not a hexadecimal string")]
    InvalidKeyEncoding,

    #[error("unsupported curve type '{0}'")]
    UnsupportedCurve(CurveType),

    #[error("address network mismatch: expected {expected}, found {found}")]
    NetworkMismatch { expected: u8, found: u8 },

    #[error("expected a reward address, got '{0}'")]
    NotARewardAddress(String),
}

fn malformed(address: &str, reason: impl ToString) -> InvalidAddress {
    InvalidAddress::Malformed {
        address: address.to_string(),
        reason: reason.to_string(),
    }
}

/// Check that a public key is a well-formed Ed25519 point carrier: 32 hex
/// bytes on the declared curve. Returns the raw key bytes.
pub fn validate_public_key(key: &PublicKey) -> Result<[u8; PUBLIC_KEY_LENGTH], InvalidAddress> {
    if key.curve_type != CurveType::Edwards25519 {
        return Err(InvalidAddress::UnsupportedCurve(key.curve_type));
    }

    let bytes = hex::decode(&key.hex_bytes).map_err(|_| InvalidAddress::InvalidKeyEncoding)?;

    <[u8; PUBLIC_KEY_LENGTH]>::try_from(bytes.as_slice()).map_err(|_| {
        InvalidAddress::InvalidKey {
            expected: PUBLIC_KEY_LENGTH,
            got: bytes.len(),
        }
    })
}

/// The blake2b-224 digest of a public key, i.e. its credential hash.
pub fn key_hash(key: &[u8]) -> Hash<{ size::KEY }> {
    Hasher::<224>::hash(key)
}

/// Assemble a stake (reward) address from a credential, stamping the tag of
/// the *requested* network.
pub fn new_stake_address(
    network: NetworkName,
    payload: StakePayload,
) -> Result<StakeAddress, InvalidAddress> {
    let (header, hash) = match payload {
        StakePayload::Stake(hash) => (HEADER_REWARD_KEY, hash),
        StakePayload::Script(hash) => (HEADER_REWARD_SCRIPT, hash),
    };

    let mut bytes = Vec::with_capacity(1 + size::CREDENTIAL);
    bytes.push(header | network.network_id());
    bytes.extend_from_slice(hash.as_ref());

    match Address::from_bytes(&bytes).map_err(|e| malformed(&hex::encode(&bytes), e))? {
        Address::Stake(stake_address) => Ok(stake_address),
        Address::Byron(_) | Address::Shelley(_) => {
            Err(malformed(&hex::encode(&bytes), "not a stake address"))
        }
    }
}

/// Derive the reward address of a staking key.
pub fn derive_reward_address(
    network: NetworkName,
    key: &PublicKey,
) -> Result<StakeAddress, InvalidAddress> {
    let key = validate_public_key(key)?;
    new_stake_address(network, StakePayload::Stake(key_hash(&key)))
}

/// Derive a base address from a payment key and a staking key.
pub fn derive_base_address(
    network: NetworkName,
    payment_key: &PublicKey,
    staking_key: &PublicKey,
) -> Result<ShelleyAddress, InvalidAddress> {
    let payment = key_hash(&validate_public_key(payment_key)?);
    let delegation = key_hash(&validate_public_key(staking_key)?);

    Ok(ShelleyAddress::new(
        network.into(),
        ShelleyPaymentPart::Key(payment),
        ShelleyDelegationPart::Key(delegation),
    ))
}

/// Derive an enterprise (payment-only) address from a payment key.
pub fn derive_enterprise_address(
    network: NetworkName,
    payment_key: &PublicKey,
) -> Result<ShelleyAddress, InvalidAddress> {
    let payment = key_hash(&validate_public_key(payment_key)?);

    Ok(ShelleyAddress::new(
        network.into(),
        ShelleyPaymentPart::Key(payment),
        ShelleyDelegationPart::Null,
    ))
}

/// Decode address text: bech32 for Shelley-era addresses (`addr…`,
/// `stake…`), base58 for Byron-era ones.
pub fn decode_address(text: &str) -> Result<Address, InvalidAddress> {
    if text.starts_with("addr") || text.starts_with("stake") {
        Address::from_bech32(text).map_err(|e| malformed(text, e))
    } else {
        ByronAddress::from_base58(text)
            .map(Address::Byron)
            .map_err(|e| malformed(text, e))
    }
}

/// Decode address text and require the reward (stake) form.
pub fn decode_reward_address(text: &str) -> Result<StakeAddress, InvalidAddress> {
    match decode_address(text)? {
        Address::Stake(stake_address) => Ok(stake_address),
        Address::Byron(_) | Address::Shelley(_) => {
            Err(InvalidAddress::NotARewardAddress(text.to_string()))
        }
    }
}

/// Render an address back to its canonical text form.
pub fn address_to_text(address: &Address) -> Result<String, InvalidAddress> {
    match address {
        Address::Byron(byron) => Ok(byron.to_base58()),
        Address::Shelley(_) | Address::Stake(_) => address
            .to_bech32()
            .map_err(|e| malformed(&hex::encode(address.to_vec()), e)),
    }
}

/// The network tag carried by an address, when it carries one (Byron
/// addresses do not).
pub fn network_tag(address: &Address) -> Option<u8> {
    match address {
        Address::Byron(_) => None,
        Address::Shelley(shelley) => Some(to_network_id(&shelley.network())),
        Address::Stake(stake) => Some(to_network_id(&stake.network())),
    }
}

/// Check that an address belongs to the expected network.
pub fn assert_network_matches(
    address: &Address,
    network: NetworkName,
) -> Result<(), InvalidAddress> {
    match network_tag(address) {
        Some(found) if found != network.network_id() => Err(InvalidAddress::NetworkMismatch {
            expected: network.network_id(),
            found,
        }),
        Some(_) | None => Ok(()),
    }
}

/// The stake credential hash reachable from an address: the delegation part
/// of a base address, or the payload of a stake address.
pub fn stake_credential_hash(address: &Address) -> Option<Hash<{ size::CREDENTIAL }>> {
    match address {
        Address::Byron(_) => None,
        Address::Shelley(shelley) => match shelley.delegation() {
            ShelleyDelegationPart::Key(hash) => Some(*hash),
            ShelleyDelegationPart::Script(hash) => Some(*hash),
            ShelleyDelegationPart::Pointer(_) | ShelleyDelegationPart::Null => None,
        },
        Address::Stake(stake) => match stake.payload() {
            StakePayload::Stake(hash) => Some(*hash),
            StakePayload::Script(hash) => Some(*hash),
        },
    }
}

/// Rebuild the displayable reward address embedded in certificate or
/// withdrawal bytes, re-stamped with the requested network's tag.
pub fn reward_address_from_account_bytes(
    network: NetworkName,
    bytes: &[u8],
) -> Result<StakeAddress, InvalidAddress> {
    match Address::from_bytes(bytes).map_err(|e| malformed(&hex::encode(bytes), e))? {
        Address::Stake(stake_address) => {
            new_stake_address(network, stake_address.payload().clone())
        }
        Address::Byron(_) | Address::Shelley(_) => {
            Err(InvalidAddress::NotARewardAddress(hex::encode(bytes)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rosetta_kernel::any_hash28;
    use test_case::test_case;

    // 32 bytes of 0x01; its blake2b-224 hash is stable.
    fn some_key() -> PublicKey {
        PublicKey::new("01".repeat(32))
    }

    #[test]
    fn reject_short_key() {
        let result = derive_reward_address(NetworkName::Preprod, &PublicKey::new("0101"));
        assert!(matches!(
            result,
            Err(InvalidAddress::InvalidKey { expected: 32, got: 2 })
        ));
    }

    #[test]
    fn reject_non_hex_key() {
        let result = derive_reward_address(NetworkName::Preprod, &PublicKey::new("zz".repeat(32)));
        assert!(matches!(result, Err(InvalidAddress::InvalidKeyEncoding)));
    }

    #[test]
    fn reject_unsupported_curve() {
        let key = PublicKey {
            hex_bytes: "01".repeat(32),
            curve_type: CurveType::Secp256k1,
        };
        assert!(matches!(
            derive_reward_address(NetworkName::Preprod, &key),
            Err(InvalidAddress::UnsupportedCurve(CurveType::Secp256k1))
        ));
    }

    #[test_case(NetworkName::Mainnet, "stake1" ; "mainnet prefix")]
    #[test_case(NetworkName::Preprod, "stake_test1" ; "preprod prefix")]
    #[test_case(NetworkName::Preview, "stake_test1" ; "preview prefix")]
    #[test_case(NetworkName::Testnet(42), "stake_test1" ; "testnet prefix")]
    fn reward_address_prefix_is_network_determined(network: NetworkName, prefix: &str) {
        let address = derive_reward_address(network, &some_key())
            .map_err(|e| e.to_string())
            .unwrap();
        let text = address.to_bech32().unwrap();
        assert!(text.starts_with(prefix), "{text}");
    }

    #[test]
    fn reward_address_roundtrips_through_text() {
        let address = derive_reward_address(NetworkName::Preprod, &some_key())
            .map_err(|e| e.to_string())
            .unwrap();
        let text = address.to_bech32().unwrap();
        let decoded = decode_reward_address(&text).map_err(|e| e.to_string()).unwrap();
        assert_eq!(decoded.to_vec(), address.to_vec());
    }

    #[test]
    fn payment_address_is_not_a_reward_address() {
        let base = derive_base_address(NetworkName::Preprod, &some_key(), &some_key())
            .map_err(|e| e.to_string())
            .unwrap();
        let text = base.to_bech32().unwrap();
        assert!(text.starts_with("addr_test1"), "{text}");
        assert!(matches!(
            decode_reward_address(&text),
            Err(InvalidAddress::NotARewardAddress(_))
        ));
    }

    #[test]
    fn network_mismatch_is_detected() {
        let address = derive_reward_address(NetworkName::Mainnet, &some_key())
            .map_err(|e| e.to_string())
            .unwrap();
        let address = Address::Stake(address);
        assert!(assert_network_matches(&address, NetworkName::Mainnet).is_ok());
        assert!(matches!(
            assert_network_matches(&address, NetworkName::Preprod),
            Err(InvalidAddress::NetworkMismatch { expected: 0, found: 1 })
        ));
    }

    proptest::proptest! {
        #[test]
        fn embedded_account_bytes_are_restamped(hash in any_hash28(), mainnet_tagged in any::<bool>()) {
            // An account embedded with the *wrong* network tag still renders
            // with the requested network's prefix.
            let mut bytes = vec![if mainnet_tagged { 0xe1 } else { 0xe0 }];
            bytes.extend_from_slice(hash.as_ref());

            let address = reward_address_from_account_bytes(NetworkName::Preprod, &bytes)
                .map_err(|e| proptest::test_runner::TestCaseError::fail(e.to_string()))?;
            prop_assert!(address.to_bech32().unwrap().starts_with("stake_test1"));
        }
    }
}
