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

//! Resolution of the unique set of addresses that must witness a
//! transaction, from its (envelope) operations.

use crate::{
    address::{InvalidAddress, derive_reward_address},
    certificates::{InvalidCertificate, validate_pool_registration_cert},
};
use rosetta_kernel::{AccountIdentifier, NetworkName, Operation, OperationKind};
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InvalidSigner {
    #[error("operation {0} carries no address or staking credential to sign with")]
    MissingCredential(u64),

    #[error(transparent)]
    Certificate(#[from] InvalidCertificate),

    #[error(transparent)]
    Address(#[from] InvalidAddress),
}

/// The addresses one operation obliges to sign, possibly none (a vote
/// registration is authenticated by its voting signature, out of band).
pub fn signers_of_operation(
    network: NetworkName,
    operation: &Operation,
) -> Result<Vec<String>, InvalidSigner> {
    if operation.kind.is_pool() {
        return pool_signers(network, operation);
    }

    if let Some(address) = operation.address() {
        return Ok(vec![address.to_string()]);
    }

    if operation.kind == OperationKind::VoteRegistration {
        return Ok(vec![]);
    }

    let key = operation
        .metadata
        .as_ref()
        .and_then(|metadata| metadata.staking_credential.as_ref())
        .ok_or_else(|| InvalidSigner::MissingCredential(operation.index()))?;

    let reward_address = derive_reward_address(network, key)?;
    let reward_address = reward_address.to_bech32().map_err(|e| {
        InvalidSigner::Address(InvalidAddress::Malformed {
            address: String::new(),
            reason: e.to_string(),
        })
    })?;

    Ok(vec![reward_address])
}

fn pool_signers(
    network: NetworkName,
    operation: &Operation,
) -> Result<Vec<String>, InvalidSigner> {
    let mut signers = Vec::new();

    match operation.kind {
        OperationKind::PoolRegistration => {
            if let Some(address) = operation.address() {
                signers.push(address.to_string());
            }
            if let Some(params) = operation
                .metadata
                .as_ref()
                .and_then(|metadata| metadata.pool_registration_params.as_ref())
            {
                signers.push(params.reward_address.clone());
                signers.extend(params.pool_owners.iter().cloned());
            }
        }
        OperationKind::PoolRegistrationWithCert => {
            let certificate_hex = operation
                .metadata
                .as_ref()
                .and_then(|metadata| metadata.pool_registration_cert.as_deref());
            let (_, addresses) =
                validate_pool_registration_cert(network, certificate_hex, operation.address())?;
            signers.extend(addresses);
        }
        OperationKind::PoolRetirement => {
            if let Some(address) = operation.address() {
                signers.push(address.to_string());
            }
        }
        OperationKind::Input
        | OperationKind::Output
        | OperationKind::StakeKeyRegistration
        | OperationKind::StakeKeyDeregistration
        | OperationKind::StakeDelegation
        | OperationKind::Withdrawal
        | OperationKind::VoteRegistration => (),
    }

    tracing::debug!(
        kind = %operation.kind,
        count = signers.len(),
        "resolved pool signers"
    );

    Ok(signers)
}

/// The de-duplicated, deterministically ordered signer set of a whole
/// operation list.
pub fn required_signers(
    network: NetworkName,
    operations: &[Operation],
) -> Result<Vec<AccountIdentifier>, InvalidSigner> {
    let mut unique = BTreeSet::new();

    for operation in operations {
        unique.extend(signers_of_operation(network, operation)?);
    }

    Ok(unique.into_iter().map(AccountIdentifier::new).collect())
}
