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

//! Per-certificate-type build and parse. The build direction turns a typed
//! operation into a ledger certificate; the parse direction dispatches on the
//! certificate discriminant and reuses the matched envelope operation to
//! restore what the ledger bytes do not carry (status, account, public keys).

use crate::address::{
    InvalidAddress, decode_address, decode_reward_address, derive_reward_address, key_hash,
    new_stake_address, reward_address_from_account_bytes, stake_credential_hash,
    validate_public_key,
};
use crate::validate::{is_valid_port, parse_nonnegative_amount};
use rosetta_kernel::{
    AccountIdentifier, Bytes, Certificate, Hash, NetworkName, Nullable, Operation,
    OperationKind, OperationMetadata, PoolId, PoolMargin, PoolMetadata, PoolMetadataParams,
    PoolParams, PoolRegistrationParams, PoolRelay, PublicKey, RationalNumber, Relay, RelayKind,
    StakeAddress, StakeCredential, StakePayload, size, to_cbor,
};
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InvalidCertificate {
    #[error("staking credential is missing from the operation metadata")]
    MissingStakingCredential,

    #[error("pool key hash is missing")]
    MissingPoolKey,

    #[error("invalid pool key hash '{0}'")]
    InvalidPoolKey(String),

    #[error("epoch is missing from the operation metadata")]
    MissingEpoch,

    #[error("pool registration parameters are missing")]
    MissingPoolParameters,

    #[error("invalid pool registration parameters: {0}")]
    InvalidPoolParameters(String),

    #[error("invalid pool owners: {0}")]
    InvalidPoolOwners(String),

    #[error("invalid pool relays: {0}")]
    InvalidPoolRelays(String),

    #[error("dns name is missing")]
    MissingDnsName,

    #[error("invalid pool metadata: {0}")]
    InvalidPoolMetadata(String),

    #[error("pool registration certificate is missing")]
    MissingPoolCert,

    #[error("invalid pool registration certificate: {0}")]
    InvalidPoolRegistrationCert(String),

    #[error(transparent)]
    Address(#[from] InvalidAddress),
}

/// A built pool certificate along with every address expected to witness it.
#[derive(Debug, Clone)]
pub struct PoolCertificate {
    pub certificate: Certificate,
    pub signers: Vec<String>,
}

fn staking_key(operation: &Operation) -> Result<&PublicKey, InvalidCertificate> {
    operation
        .metadata
        .as_ref()
        .and_then(|metadata| metadata.staking_credential.as_ref())
        .ok_or(InvalidCertificate::MissingStakingCredential)
}

fn staking_credential(operation: &Operation) -> Result<StakeCredential, InvalidCertificate> {
    let key = validate_public_key(staking_key(operation)?)?;
    Ok(StakeCredential::AddrKeyhash(key_hash(&key)))
}

fn pool_key_hash(address: Option<&str>) -> Result<PoolId, InvalidCertificate> {
    let address = address.ok_or(InvalidCertificate::MissingPoolKey)?;
    hex::decode(address)
        .ok()
        .and_then(|bytes| <[u8; size::POOL_COLD_KEY]>::try_from(bytes.as_slice()).ok())
        .map(Hash::new)
        .ok_or_else(|| InvalidCertificate::InvalidPoolKey(address.to_string()))
}

// Build direction
// ----------------------------------------------------------------------------

pub fn stake_key_registration(operation: &Operation) -> Result<Certificate, InvalidCertificate> {
    Ok(Certificate::StakeRegistration(staking_credential(
        operation,
    )?))
}

/// Deregistration also yields the reward address being emptied; the caller
/// records it as a required signer and credits the deposit refund in fee
/// accounting (the refund is data, not ledger content).
pub fn stake_key_deregistration(
    network: NetworkName,
    operation: &Operation,
) -> Result<(Certificate, StakeAddress), InvalidCertificate> {
    let credential = staking_credential(operation)?;
    let reward_address = derive_reward_address(network, staking_key(operation)?)?;
    Ok((Certificate::StakeDeregistration(credential), reward_address))
}

pub fn stake_delegation(
    network: NetworkName,
    operation: &Operation,
) -> Result<(Certificate, StakeAddress), InvalidCertificate> {
    let credential = staking_credential(operation)?;
    let reward_address = derive_reward_address(network, staking_key(operation)?)?;

    let pool = operation
        .metadata
        .as_ref()
        .and_then(|metadata| metadata.pool_key_hash.as_deref());
    let pool = pool_key_hash(pool)?;

    Ok((
        Certificate::StakeDelegation(credential, pool),
        reward_address,
    ))
}

pub fn pool_registration(operation: &Operation) -> Result<PoolCertificate, InvalidCertificate> {
    let params = operation
        .metadata
        .as_ref()
        .and_then(|metadata| metadata.pool_registration_params.as_ref())
        .ok_or(InvalidCertificate::MissingPoolParameters)?;

    let id = pool_key_hash(operation.address())?;

    let vrf = hex::decode(&params.vrf_key_hash)
        .ok()
        .and_then(|bytes| <[u8; size::VRF_KEY]>::try_from(bytes.as_slice()).ok())
        .map(Hash::new)
        .ok_or_else(|| {
            InvalidCertificate::InvalidPoolParameters(format!(
                "invalid vrf key hash '{}'",
                params.vrf_key_hash
            ))
        })?;

    let margin = params
        .margin
        .as_ref()
        .ok_or_else(|| {
            InvalidCertificate::InvalidPoolParameters(
                "missing margin parameter at pool registration parameters".to_string(),
            )
        })?;

    let decimal = |field: &str, value: &str| {
        parse_nonnegative_amount(value).ok_or_else(|| {
            InvalidCertificate::InvalidPoolParameters(format!(
                "given {field} {value} is invalid"
            ))
        })
    };

    let pledge = decimal("pledge", &params.pledge)?;
    let cost = decimal("cost", &params.cost)?;
    let numerator = decimal("numerator", &margin.numerator)?;
    let denominator = decimal("denominator", &margin.denominator)?;

    let reward_address = decode_reward_address(&params.reward_address)?;

    let owners = validate_pool_owners(&params.pool_owners)?;
    let relays = validate_pool_relays(&params.relays)?;
    let metadata = validate_pool_metadata(params.pool_metadata.as_ref())?;

    let mut signers = Vec::with_capacity(2 + params.pool_owners.len());
    signers.extend(params.pool_owners.iter().cloned());
    signers.push(params.reward_address.clone());
    if let Some(address) = operation.address() {
        signers.push(address.to_string());
    }

    let certificate = Certificate::PoolRegistration(PoolParams {
        id,
        vrf,
        pledge,
        cost,
        margin: RationalNumber {
            numerator,
            denominator,
        },
        reward_account: Bytes::from(reward_address.to_vec()),
        owners,
        relays,
        metadata: match metadata {
            Some(metadata) => Nullable::Some(metadata),
            None => Nullable::Null,
        },
    });

    Ok(PoolCertificate {
        certificate,
        signers,
    })
}

/// Resolve each owner address (base or stake) to its stake credential. A
/// resolved set smaller than the input list signals a duplicate or an
/// unresolvable owner.
fn validate_pool_owners(owners: &[String]) -> Result<Vec<Hash<28>>, InvalidCertificate> {
    let mut resolved = Vec::with_capacity(owners.len());

    for owner in owners {
        let address = decode_address(owner)
            .map_err(|e| InvalidCertificate::InvalidPoolOwners(e.to_string()))?;
        let hash = stake_credential_hash(&address).ok_or_else(|| {
            InvalidCertificate::InvalidPoolOwners(format!(
                "address '{owner}' has no stake credential"
            ))
        })?;
        if !resolved.contains(&hash) {
            resolved.push(hash);
        }
    }

    if resolved.len() != owners.len() {
        return Err(InvalidCertificate::InvalidPoolOwners(
            "invalid pool owners addresses provided".to_string(),
        ));
    }

    Ok(resolved)
}

fn validate_pool_relays(relays: &[PoolRelay]) -> Result<Vec<Relay>, InvalidCertificate> {
    if relays.is_empty() {
        return Err(InvalidCertificate::InvalidPoolRelays(
            "no relays provided".to_string(),
        ));
    }

    relays.iter().map(validate_pool_relay).collect()
}

fn validate_port(port: Option<&str>) -> Result<Nullable<u32>, InvalidCertificate> {
    match port {
        None => Ok(Nullable::Null),
        Some(port) if is_valid_port(port) => {
            let port = port.trim_start_matches('+').parse::<u16>().map_err(|e| {
                InvalidCertificate::InvalidPoolRelays(format!("invalid port {port}: {e}"))
            })?;
            Ok(Nullable::Some(u32::from(port)))
        }
        Some(port) => Err(InvalidCertificate::InvalidPoolRelays(format!(
            "invalid port {port} received"
        ))),
    }
}

fn validate_dns_name(dns_name: Option<&str>) -> Result<String, InvalidCertificate> {
    match dns_name {
        None | Some("") => Err(InvalidCertificate::MissingDnsName),
        Some(dns_name) => Ok(dns_name.to_string()),
    }
}

fn validate_pool_relay(relay: &PoolRelay) -> Result<Relay, InvalidCertificate> {
    match relay.kind {
        RelayKind::SingleHostAddr => {
            let ipv4 = relay
                .ipv4
                .as_deref()
                .map(parse_ipv4)
                .transpose()?
                .map(|bytes| Bytes::from(bytes.to_vec()));
            let ipv6 = relay
                .ipv6
                .as_deref()
                .map(parse_ipv6)
                .transpose()?
                .map(|bytes| Bytes::from(bytes.to_vec()));
            Ok(Relay::SingleHostAddr(
                validate_port(relay.port.as_deref())?,
                ipv4.map_or(Nullable::Null, Nullable::Some),
                ipv6.map_or(Nullable::Null, Nullable::Some),
            ))
        }
        RelayKind::SingleHostName => Ok(Relay::SingleHostName(
            validate_port(relay.port.as_deref())?,
            validate_dns_name(relay.dns_name.as_deref())?,
        )),
        RelayKind::MultiHostName => Ok(Relay::MultiHostName(validate_dns_name(
            relay.dns_name.as_deref(),
        )?)),
    }
}

fn parse_ipv4(ip: &str) -> Result<[u8; 4], InvalidCertificate> {
    ip.parse::<std::net::Ipv4Addr>()
        .map(|ip| ip.octets())
        .map_err(|_| InvalidCertificate::InvalidPoolRelays(format!("invalid ipv4 {ip}")))
}

fn parse_ipv6(ip: &str) -> Result<[u8; 16], InvalidCertificate> {
    // Accepted in both the standard textual form and the raw-hex form the
    // wire uses (colons optional).
    if let Ok(ip) = ip.parse::<std::net::Ipv6Addr>() {
        return Ok(ip.octets());
    }

    hex::decode(ip.replace(':', ""))
        .ok()
        .and_then(|bytes| <[u8; 16]>::try_from(bytes.as_slice()).ok())
        .ok_or_else(|| InvalidCertificate::InvalidPoolRelays(format!("invalid ipv6 {ip}")))
}

fn validate_pool_metadata(
    metadata: Option<&PoolMetadataParams>,
) -> Result<Option<PoolMetadata>, InvalidCertificate> {
    match metadata {
        None => Ok(None),
        Some(metadata) => {
            let hash = hex::decode(&metadata.hash)
                .map_err(|e| InvalidCertificate::InvalidPoolMetadata(e.to_string()))?;
            Ok(Some(PoolMetadata {
                url: metadata.url.clone(),
                hash: Bytes::from(hash),
            }))
        }
    }
}

/// Validate a caller-supplied raw registration certificate against its cold
/// key, and recover every signer address embedded in it (owners and reward
/// account, re-encoded for the requested network).
pub fn validate_pool_registration_cert(
    network: NetworkName,
    certificate_hex: Option<&str>,
    cold_key: Option<&str>,
) -> Result<(Certificate, BTreeSet<String>), InvalidCertificate> {
    let cold_key = cold_key.ok_or(InvalidCertificate::MissingPoolKey)?;
    let certificate_hex = certificate_hex.ok_or(InvalidCertificate::MissingPoolCert)?;

    let bytes = hex::decode(certificate_hex)
        .map_err(|e| InvalidCertificate::InvalidPoolRegistrationCert(e.to_string()))?;
    let certificate = rosetta_kernel::from_cbor_no_leftovers::<Certificate>(&bytes)
        .map_err(|e| InvalidCertificate::InvalidPoolRegistrationCert(e.to_string()))?;

    let params = match &certificate {
        Certificate::PoolRegistration(params) => params,
        Certificate::StakeRegistration(_)
        | Certificate::StakeDeregistration(_)
        | Certificate::StakeDelegation(..)
        | Certificate::PoolRetirement(..) => {
            return Err(InvalidCertificate::InvalidPoolRegistrationCert(
                "not a pool registration certificate".to_string(),
            ));
        }
    };

    let mut addresses = BTreeSet::new();
    addresses.insert(cold_key.to_string());
    for owner in parse_pool_owners(network, params)? {
        addresses.insert(owner);
    }
    addresses.insert(parse_pool_reward_account(network, params)?);

    Ok((certificate, addresses))
}

pub fn pool_registration_with_cert(
    network: NetworkName,
    operation: &Operation,
) -> Result<PoolCertificate, InvalidCertificate> {
    let certificate_hex = operation
        .metadata
        .as_ref()
        .and_then(|metadata| metadata.pool_registration_cert.as_deref());

    let (certificate, addresses) =
        validate_pool_registration_cert(network, certificate_hex, operation.address())?;

    Ok(PoolCertificate {
        certificate,
        signers: addresses.into_iter().collect(),
    })
}

pub fn pool_retirement(
    operation: &Operation,
) -> Result<(Certificate, String), InvalidCertificate> {
    let epoch = operation
        .metadata
        .as_ref()
        .and_then(|metadata| metadata.epoch)
        .ok_or(InvalidCertificate::MissingEpoch)?;

    let cold_key = operation
        .address()
        .ok_or(InvalidCertificate::MissingPoolKey)?;
    let pool = pool_key_hash(Some(cold_key))?;

    Ok((
        Certificate::PoolRetirement(pool, epoch),
        cold_key.to_string(),
    ))
}

// Parse direction
// ----------------------------------------------------------------------------

/// Each embedded owner key hash, rendered as a reward address of the
/// requested network.
pub fn parse_pool_owners(
    network: NetworkName,
    params: &PoolParams,
) -> Result<Vec<String>, InvalidCertificate> {
    params
        .owners
        .iter()
        .map(|owner| {
            let address = new_stake_address(network, StakePayload::Stake(*owner))?;
            address
                .to_bech32()
                .map_err(|e| InvalidCertificate::Address(crate::address::InvalidAddress::Malformed {
                    address: hex::encode(owner),
                    reason: e.to_string(),
                }))
        })
        .collect()
}

/// The embedded reward account, rendered as a reward address of the requested
/// network.
pub fn parse_pool_reward_account(
    network: NetworkName,
    params: &PoolParams,
) -> Result<String, InvalidCertificate> {
    let address = reward_address_from_account_bytes(network, &params.reward_account)?;
    address.to_bech32().map_err(|e| {
        InvalidCertificate::Address(crate::address::InvalidAddress::Malformed {
            address: hex::encode(params.reward_account.as_slice()),
            reason: e.to_string(),
        })
    })
}

fn parse_pool_relay(relay: &Relay) -> PoolRelay {
    fn nullable<T: Clone>(value: &Nullable<T>) -> Option<&T> {
        match value {
            Nullable::Some(value) => Some(value),
            Nullable::Null | Nullable::Undefined => None,
        }
    }

    match relay {
        Relay::SingleHostAddr(port, ipv4, ipv6) => PoolRelay {
            kind: RelayKind::SingleHostAddr,
            ipv4: nullable(ipv4).map(|bytes| {
                bytes
                    .iter()
                    .map(|byte| byte.to_string())
                    .collect::<Vec<_>>()
                    .join(".")
            }),
            ipv6: nullable(ipv6).and_then(|bytes| {
                <[u8; 16]>::try_from(bytes.as_slice())
                    .ok()
                    .map(|octets| std::net::Ipv6Addr::from(octets).to_string())
            }),
            dns_name: None,
            port: nullable(port).map(|port| port.to_string()),
        },
        Relay::SingleHostName(port, dns_name) => PoolRelay {
            kind: RelayKind::SingleHostName,
            ipv4: None,
            ipv6: None,
            dns_name: Some(dns_name.clone()),
            port: nullable(port).map(|port| port.to_string()),
        },
        Relay::MultiHostName(dns_name) => PoolRelay {
            kind: RelayKind::MultiHostName,
            ipv4: None,
            ipv6: None,
            dns_name: Some(dns_name.clone()),
            port: None,
        },
    }
}

/// The structured view of an embedded registration certificate.
pub fn parse_pool_registration_params(
    network: NetworkName,
    params: &PoolParams,
) -> Result<PoolRegistrationParams, InvalidCertificate> {
    Ok(PoolRegistrationParams {
        vrf_key_hash: hex::encode(params.vrf),
        reward_address: parse_pool_reward_account(network, params)?,
        pledge: params.pledge.to_string(),
        cost: params.cost.to_string(),
        pool_owners: parse_pool_owners(network, params)?,
        relays: params.relays.iter().map(parse_pool_relay).collect(),
        margin: Some(PoolMargin {
            numerator: params.margin.numerator.to_string(),
            denominator: params.margin.denominator.to_string(),
        }),
        margin_percentage: None,
        pool_metadata: match &params.metadata {
            Nullable::Some(metadata) => Some(PoolMetadataParams {
                url: metadata.url.clone(),
                hash: hex::encode(metadata.hash.as_slice()),
            }),
            Nullable::Null | Nullable::Undefined => None,
        },
    })
}

/// Rebuild the operation behind a ledger certificate. `matched` is the
/// positionally-corresponding envelope operation, when the envelope and the
/// transaction agree 1:1; `fallback_index` numbers freshly-derived
/// operations.
pub fn certificate_to_operation(
    network: NetworkName,
    certificate: &Certificate,
    matched: Option<&Operation>,
    fallback_index: u64,
) -> Result<Operation, InvalidCertificate> {
    let index = matched.map_or(fallback_index, Operation::index);

    let staking = |kind: OperationKind,
                   credential: &StakeCredential|
     -> Result<Operation, InvalidCertificate> {
        let staking_credential = matched.and_then(|operation| {
            operation
                .metadata
                .as_ref()
                .and_then(|metadata| metadata.staking_credential.clone())
        });

        // The reward address shown to the caller is recomputed, not stored in
        // the certificate: from the public key when the envelope carries one,
        // from the credential hash otherwise.
        let address = match &staking_credential {
            Some(key) => derive_reward_address(network, key)?,
            None => new_stake_address(
                network,
                match credential {
                    StakeCredential::AddrKeyhash(hash) => StakePayload::Stake(*hash),
                    StakeCredential::ScriptHash(hash) => StakePayload::Script(*hash),
                },
            )?,
        };
        let address = address.to_bech32().map_err(|e| {
            InvalidCertificate::Address(crate::address::InvalidAddress::Malformed {
                address: String::new(),
                reason: e.to_string(),
            })
        })?;

        Ok(Operation {
            account: Some(AccountIdentifier::new(address)),
            metadata: staking_credential.map(OperationMetadata::staking_credential),
            ..Operation::new(index, kind)
        })
    };

    match certificate {
        Certificate::StakeRegistration(credential) => {
            staking(OperationKind::StakeKeyRegistration, credential)
        }
        Certificate::StakeDeregistration(credential) => {
            staking(OperationKind::StakeKeyDeregistration, credential)
        }
        Certificate::StakeDelegation(credential, pool) => {
            let mut operation = staking(OperationKind::StakeDelegation, credential)?;
            let metadata = operation.metadata.get_or_insert_with(Default::default);
            metadata.pool_key_hash = Some(hex::encode(pool));
            Ok(operation)
        }
        Certificate::PoolRegistration(params) => {
            let as_raw_cert = matched
                .map(|operation| operation.kind == OperationKind::PoolRegistrationWithCert)
                .unwrap_or(false);

            let (kind, metadata) = if as_raw_cert {
                (
                    OperationKind::PoolRegistrationWithCert,
                    OperationMetadata {
                        pool_registration_cert: Some(hex::encode(to_cbor(certificate))),
                        ..Default::default()
                    },
                )
            } else {
                (
                    OperationKind::PoolRegistration,
                    OperationMetadata {
                        pool_registration_params: Some(parse_pool_registration_params(
                            network, params,
                        )?),
                        ..Default::default()
                    },
                )
            };

            Ok(Operation {
                account: matched.and_then(|operation| operation.account.clone()),
                metadata: Some(metadata),
                ..Operation::new(index, kind)
            })
        }
        Certificate::PoolRetirement(pool, epoch) => Ok(Operation {
            account: matched
                .and_then(|operation| operation.account.clone())
                .or_else(|| Some(AccountIdentifier::new(hex::encode(pool)))),
            metadata: Some(OperationMetadata {
                epoch: Some(*epoch),
                ..Default::default()
            }),
            ..Operation::new(index, OperationKind::PoolRetirement)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rosetta_kernel::{OperationId, any_pool_params};
    use proptest::prelude::*;
    use test_case::test_case;

    const NETWORK: NetworkName = NetworkName::Preprod;

    fn staking_operation(kind: OperationKind) -> Operation {
        Operation {
            metadata: Some(OperationMetadata::staking_credential(PublicKey::new(
                "01".repeat(32),
            ))),
            ..Operation::new(0, kind)
        }
    }

    #[test]
    fn stake_key_registration_builds_a_key_credential() {
        let certificate =
            stake_key_registration(&staking_operation(OperationKind::StakeKeyRegistration))
                .map_err(|e| e.to_string())
                .unwrap();
        assert!(matches!(
            certificate,
            Certificate::StakeRegistration(StakeCredential::AddrKeyhash(_))
        ));
    }

    #[test]
    fn missing_staking_credential_is_rejected() {
        let operation = Operation::new(0, OperationKind::StakeKeyRegistration);
        assert!(matches!(
            stake_key_registration(&operation),
            Err(InvalidCertificate::MissingStakingCredential)
        ));
    }

    #[test]
    fn stake_delegation_requires_a_pool_key() {
        let operation = staking_operation(OperationKind::StakeDelegation);
        assert!(matches!(
            stake_delegation(NETWORK, &operation),
            Err(InvalidCertificate::MissingPoolKey)
        ));
    }

    #[test]
    fn stake_delegation_roundtrip() {
        let pool = [0x2a; 28];
        let mut operation = staking_operation(OperationKind::StakeDelegation);
        if let Some(metadata) = operation.metadata.as_mut() {
            metadata.pool_key_hash = Some(hex::encode(pool));
        }
        operation.operation_identifier = OperationId::new(3);

        let (certificate, reward_address) = stake_delegation(NETWORK, &operation)
            .map_err(|e| e.to_string())
            .unwrap();

        let parsed = certificate_to_operation(NETWORK, &certificate, Some(&operation), 99)
            .map_err(|e| e.to_string())
            .unwrap();

        assert_eq!(parsed.index(), 3);
        assert_eq!(parsed.kind, OperationKind::StakeDelegation);
        assert_eq!(
            parsed.metadata.as_ref().and_then(|m| m.pool_key_hash.clone()),
            Some(hex::encode(pool))
        );
        assert_eq!(
            parsed.address(),
            Some(reward_address.to_bech32().unwrap().as_str())
        );
    }

    #[test]
    fn pool_retirement_requires_an_epoch() {
        let operation = Operation {
            account: Some(AccountIdentifier::new("2b".repeat(28))),
            ..Operation::new(0, OperationKind::PoolRetirement)
        };
        assert!(matches!(
            pool_retirement(&operation),
            Err(InvalidCertificate::MissingEpoch)
        ));
    }

    #[test]
    fn pool_retirement_roundtrip() {
        let operation = Operation {
            account: Some(AccountIdentifier::new("2b".repeat(28))),
            metadata: Some(OperationMetadata {
                epoch: Some(210),
                ..Default::default()
            }),
            ..Operation::new(5, OperationKind::PoolRetirement)
        };

        let (certificate, cold_key) = pool_retirement(&operation)
            .map_err(|e| e.to_string())
            .unwrap();
        assert_eq!(cold_key, "2b".repeat(28));

        let parsed = certificate_to_operation(NETWORK, &certificate, Some(&operation), 99)
            .map_err(|e| e.to_string())
            .unwrap();
        assert_eq!(parsed.metadata.as_ref().and_then(|m| m.epoch), Some(210));
        assert_eq!(parsed.address(), Some("2b".repeat(28).as_str()));
    }

    fn pool_registration_operation() -> Operation {
        let reward_address = new_stake_address(NETWORK, StakePayload::Stake(Hash::new([7; 28])))
            .map_err(|e| e.to_string())
            .unwrap()
            .to_bech32()
            .unwrap();
        let owner = new_stake_address(NETWORK, StakePayload::Stake(Hash::new([8; 28])))
            .map_err(|e| e.to_string())
            .unwrap()
            .to_bech32()
            .unwrap();

        Operation {
            account: Some(AccountIdentifier::new("2b".repeat(28))),
            metadata: Some(OperationMetadata {
                pool_registration_params: Some(PoolRegistrationParams {
                    vrf_key_hash: "99".repeat(32),
                    reward_address,
                    pledge: "5000000".to_string(),
                    cost: "3000000".to_string(),
                    pool_owners: vec![owner],
                    relays: vec![PoolRelay {
                        kind: RelayKind::SingleHostAddr,
                        ipv4: Some("127.0.0.1".to_string()),
                        ipv6: None,
                        dns_name: None,
                        port: Some("3001".to_string()),
                    }],
                    margin: Some(PoolMargin {
                        numerator: "1".to_string(),
                        denominator: "2".to_string(),
                    }),
                    margin_percentage: None,
                    pool_metadata: None,
                }),
                ..Default::default()
            }),
            ..Operation::new(2, OperationKind::PoolRegistration)
        }
    }

    #[test]
    fn pool_registration_builds_and_reports_signers() {
        let operation = pool_registration_operation();
        let built = pool_registration(&operation)
            .map_err(|e| e.to_string())
            .unwrap();

        // owner + reward address + cold key
        assert_eq!(built.signers.len(), 3);

        match &built.certificate {
            Certificate::PoolRegistration(params) => {
                assert_eq!(params.pledge, 5000000);
                assert_eq!(params.cost, 3000000);
                assert_eq!(params.margin.numerator, 1);
                assert_eq!(params.owners.len(), 1);
                assert_eq!(params.reward_account.len(), 29);
            }
            certificate => panic!("unexpected certificate {certificate:?}"),
        }
    }

    #[test]
    fn pool_registration_roundtrip() {
        let operation = pool_registration_operation();
        let built = pool_registration(&operation)
            .map_err(|e| e.to_string())
            .unwrap();

        let parsed =
            certificate_to_operation(NETWORK, &built.certificate, Some(&operation), 99)
                .map_err(|e| e.to_string())
                .unwrap();

        let params = parsed
            .metadata
            .and_then(|m| m.pool_registration_params)
            .unwrap();
        let original = operation
            .metadata
            .as_ref()
            .and_then(|m| m.pool_registration_params.as_ref())
            .unwrap();

        assert_eq!(params.vrf_key_hash, original.vrf_key_hash);
        assert_eq!(params.reward_address, original.reward_address);
        assert_eq!(params.pledge, original.pledge);
        assert_eq!(params.cost, original.cost);
        assert_eq!(params.pool_owners, original.pool_owners);
        assert_eq!(params.margin, original.margin);
    }

    #[test]
    fn empty_relay_list_is_rejected() {
        let mut operation = pool_registration_operation();
        if let Some(params) = operation
            .metadata
            .as_mut()
            .and_then(|m| m.pool_registration_params.as_mut())
        {
            params.relays.clear();
        }
        assert!(matches!(
            pool_registration(&operation),
            Err(InvalidCertificate::InvalidPoolRelays(_))
        ));
    }

    #[test_case("70000" ; "port out of range")]
    #[test_case("http" ; "port not numeric")]
    fn invalid_relay_port_is_rejected(port: &str) {
        let mut operation = pool_registration_operation();
        if let Some(params) = operation
            .metadata
            .as_mut()
            .and_then(|m| m.pool_registration_params.as_mut())
        {
            params.relays[0].port = Some(port.to_string());
        }
        assert!(matches!(
            pool_registration(&operation),
            Err(InvalidCertificate::InvalidPoolRelays(_))
        ));
    }

    #[test]
    fn duplicate_owner_is_rejected() {
        let mut operation = pool_registration_operation();
        if let Some(params) = operation
            .metadata
            .as_mut()
            .and_then(|m| m.pool_registration_params.as_mut())
        {
            let owner = params.pool_owners[0].clone();
            params.pool_owners.push(owner);
        }
        assert!(matches!(
            pool_registration(&operation),
            Err(InvalidCertificate::InvalidPoolOwners(_))
        ));
    }

    #[test]
    fn payment_reward_address_is_rejected() {
        let mut operation = pool_registration_operation();
        let payment =
            crate::address::derive_enterprise_address(NETWORK, &PublicKey::new("01".repeat(32)))
                .map_err(|e| e.to_string())
                .unwrap()
                .to_bech32()
                .unwrap();
        if let Some(params) = operation
            .metadata
            .as_mut()
            .and_then(|m| m.pool_registration_params.as_mut())
        {
            params.reward_address = payment;
        }
        assert!(matches!(
            pool_registration(&operation),
            Err(InvalidCertificate::Address(
                InvalidAddress::NotARewardAddress(_)
            ))
        ));
    }

    proptest::proptest! {
        #[test]
        fn raw_certificates_validate_and_recover_signers(params in any_pool_params()) {
            let certificate = Certificate::PoolRegistration(params.clone());
            let hex = hex::encode(to_cbor(&certificate));

            let (decoded, addresses) =
                validate_pool_registration_cert(NETWORK, Some(&hex), Some(&"2b".repeat(28)))
                    .map_err(|e| proptest::test_runner::TestCaseError::fail(e.to_string()))?;

            prop_assert_eq!(decoded, certificate);
            // cold key + reward account + deduplicated owners
            prop_assert!(addresses.len() >= 2);
            prop_assert!(addresses.contains(&"2b".repeat(28)));
        }
    }

    #[test]
    fn non_pool_certificates_are_rejected_as_raw_certs() {
        let certificate =
            Certificate::StakeRegistration(StakeCredential::AddrKeyhash(Hash::new([1; 28])));
        let hex = hex::encode(to_cbor(&certificate));
        assert!(matches!(
            validate_pool_registration_cert(NETWORK, Some(&hex), Some("cold")),
            Err(InvalidCertificate::InvalidPoolRegistrationCert(_))
        ));
    }

    #[test]
    fn missing_cold_key_is_rejected() {
        assert!(matches!(
            validate_pool_registration_cert(NETWORK, Some("8200"), None),
            Err(InvalidCertificate::MissingPoolKey)
        ));
    }
}
