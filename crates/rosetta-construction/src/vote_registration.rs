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

//! Catalyst (CIP-36 style) vote registrations. The payload lives in the
//! transaction's auxiliary metadata under two fixed labels, not in any
//! per-operation map: a data record (voting key, stake key, reward address,
//! nonce) and a signature record.

use crate::address::{decode_reward_address, validate_public_key};
use rosetta_kernel::{
    Address, AuxiliaryData, KeyValuePairs, Metadatum, Operation, OperationKind,
    OperationMetadata, PublicKey, VoteRegistrationMetadata, cbor,
};
use thiserror::Error;

pub const CATALYST_LABEL_DATA: u64 = 61284;
pub const CATALYST_LABEL_SIG: u64 = 61285;

const DATA_VOTING_KEY: u64 = 1;
const DATA_STAKE_KEY: u64 = 2;
const DATA_REWARD_ADDRESS: u64 = 3;
const DATA_VOTING_NONCE: u64 = 4;
const SIG_VOTING_SIGNATURE: u64 = 1;

/// Ed25519 signatures are exactly 64 bytes.
pub const VOTING_SIGNATURE_LENGTH: usize = 64;

#[derive(Debug, Error)]
pub enum InvalidVoteRegistration {
    #[error("vote registration metadata is missing")]
    MissingVoteRegistrationMetadata,

    #[error("voting key is missing")]
    MissingVotingKey,

    #[error("invalid voting key format")]
    InvalidVotingKey,

    #[error("staking key is missing")]
    MissingStakingKey,

    #[error("invalid staking key format")]
    InvalidStakingKey,

    #[error("invalid reward address in vote registration")]
    InvalidRewardAddress,

    #[error("voting nonce {0} is not valid")]
    VotingNonceNotValid(u64),

    #[error("invalid voting signature")]
    InvalidVotingSignature,

    #[error("malformed vote registration metadata: {0}")]
    Malformed(String),
}

fn validated_key(
    key: &PublicKey,
    missing: InvalidVoteRegistration,
    invalid: InvalidVoteRegistration,
) -> Result<Vec<u8>, InvalidVoteRegistration> {
    if key.hex_bytes.is_empty() {
        return Err(missing);
    }
    validate_public_key(key)
        .map(|key| key.to_vec())
        .map_err(|_| invalid)
}

/// Validate a vote registration and produce the auxiliary data to embed in
/// the transaction.
pub fn build_vote_registration(
    metadata: Option<&VoteRegistrationMetadata>,
) -> Result<AuxiliaryData, InvalidVoteRegistration> {
    let metadata = metadata.ok_or(InvalidVoteRegistration::MissingVoteRegistrationMetadata)?;

    tracing::debug!(nonce = metadata.voting_nonce, "building vote registration");

    let voting_key = validated_key(
        &metadata.voting_key,
        InvalidVoteRegistration::MissingVotingKey,
        InvalidVoteRegistration::InvalidVotingKey,
    )?;

    let stake_key = validated_key(
        &metadata.stake_key,
        InvalidVoteRegistration::MissingStakingKey,
        InvalidVoteRegistration::InvalidStakingKey,
    )?;

    // The registration rewards a *stake* address; the payment form is not
    // acceptable here.
    let reward_address = decode_reward_address(&metadata.reward_address)
        .map_err(|_| InvalidVoteRegistration::InvalidRewardAddress)?;

    if metadata.voting_nonce == 0 {
        return Err(InvalidVoteRegistration::VotingNonceNotValid(
            metadata.voting_nonce,
        ));
    }

    if metadata.voting_signature.is_empty() {
        return Err(InvalidVoteRegistration::InvalidVotingSignature);
    }
    let signature = hex::decode(&metadata.voting_signature)
        .map_err(|_| InvalidVoteRegistration::InvalidVotingSignature)?;
    if signature.len() != VOTING_SIGNATURE_LENGTH {
        return Err(InvalidVoteRegistration::InvalidVotingSignature);
    }

    let int = |n: u64| Metadatum::Int(cbor::Int::from(n));

    let data = Metadatum::Map(KeyValuePairs::Def(vec![
        (int(DATA_VOTING_KEY), Metadatum::Bytes(voting_key)),
        (int(DATA_STAKE_KEY), Metadatum::Bytes(stake_key)),
        (
            int(DATA_REWARD_ADDRESS),
            Metadatum::Bytes(reward_address.to_vec()),
        ),
        (
            int(DATA_VOTING_NONCE),
            Metadatum::Int(cbor::Int::from(metadata.voting_nonce)),
        ),
    ]));

    let sig = Metadatum::Map(KeyValuePairs::Def(vec![(
        int(SIG_VOTING_SIGNATURE),
        Metadatum::Bytes(signature),
    )]));

    Ok(AuxiliaryData::new(vec![
        (CATALYST_LABEL_DATA, data),
        (CATALYST_LABEL_SIG, sig),
    ]))
}

/// Rebuild the vote registration operation from the auxiliary metadata blob
/// carried in the extra data. Only the operation index comes from the
/// envelope; everything else lives in the blob.
pub fn parse_vote_registration(
    index: u64,
    transaction_metadata_hex: Option<&str>,
) -> Result<Operation, InvalidVoteRegistration> {
    let hex = transaction_metadata_hex
        .filter(|hex| !hex.is_empty())
        .ok_or(InvalidVoteRegistration::MissingVoteRegistrationMetadata)?;

    let bytes =
        hex::decode(hex).map_err(|e| InvalidVoteRegistration::Malformed(e.to_string()))?;
    let auxiliary_data = rosetta_kernel::from_cbor_no_leftovers::<AuxiliaryData>(&bytes)
        .map_err(|e| InvalidVoteRegistration::Malformed(e.to_string()))?;

    let data = auxiliary_data
        .label(CATALYST_LABEL_DATA)
        .ok_or(InvalidVoteRegistration::MissingVoteRegistrationMetadata)?;
    let sig = auxiliary_data
        .label(CATALYST_LABEL_SIG)
        .ok_or(InvalidVoteRegistration::InvalidVotingSignature)?;

    let data_bytes = |key: u64| {
        data.lookup(key)
            .and_then(Metadatum::as_bytes)
            .ok_or(InvalidVoteRegistration::MissingVoteRegistrationMetadata)
    };

    let voting_key = data_bytes(DATA_VOTING_KEY)?;
    let stake_key = data_bytes(DATA_STAKE_KEY)?;
    let reward_address_bytes = data_bytes(DATA_REWARD_ADDRESS)?;

    let voting_nonce = data
        .lookup(DATA_VOTING_NONCE)
        .and_then(Metadatum::as_int)
        .and_then(|nonce| u64::try_from(nonce).ok())
        .ok_or(InvalidVoteRegistration::MissingVoteRegistrationMetadata)?;

    let signature = sig
        .lookup(SIG_VOTING_SIGNATURE)
        .and_then(Metadatum::as_bytes)
        .ok_or(InvalidVoteRegistration::InvalidVotingSignature)?;

    let reward_address = match Address::from_bytes(reward_address_bytes) {
        Ok(Address::Stake(stake_address)) => stake_address
            .to_bech32()
            .map_err(|_| InvalidVoteRegistration::InvalidRewardAddress)?,
        Ok(Address::Byron(_) | Address::Shelley(_)) | Err(_) => {
            return Err(InvalidVoteRegistration::InvalidRewardAddress);
        }
    };

    let metadata = VoteRegistrationMetadata {
        stake_key: PublicKey::new(hex::encode(stake_key)),
        voting_key: PublicKey::new(hex::encode(voting_key)),
        reward_address,
        voting_nonce,
        voting_signature: hex::encode(signature),
    };

    Ok(Operation {
        metadata: Some(OperationMetadata {
            vote_registration_metadata: Some(metadata),
            ..Default::default()
        }),
        ..Operation::new(index, OperationKind::VoteRegistration)
    })
}
