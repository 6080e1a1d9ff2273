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

//! End-to-end build → parse round trips over the full operation surface.

use pretty_assertions::assert_eq;
use rosetta_construction::{
    DepositParameters, address::{derive_enterprise_address, derive_reward_address},
    build_transaction, parse_transaction,
};
use rosetta_kernel::{
    AccountIdentifier, Amount, CoinChange, NetworkName, Operation, OperationId, OperationKind,
    OperationMetadata, PublicKey, TokenBundleItem, VoteRegistrationMetadata,
};

const NETWORK: NetworkName = NetworkName::Preprod;
const TTL: u64 = 1000;

fn payment_address(seed: u8) -> String {
    derive_enterprise_address(NETWORK, &PublicKey::new(hex::encode([seed; 32])))
        .map_err(|e| e.to_string())
        .unwrap()
        .to_bech32()
        .unwrap()
}

fn reward_address(seed: u8) -> String {
    derive_reward_address(NETWORK, &PublicKey::new(hex::encode([seed; 32])))
        .map_err(|e| e.to_string())
        .unwrap()
        .to_bech32()
        .unwrap()
}

fn input(index: u64, seed: u8, value: &str) -> Operation {
    Operation {
        account: Some(AccountIdentifier::new(payment_address(seed))),
        amount: Some(Amount::lovelace(value)),
        coin_change: Some(CoinChange::spent(format!("{}:{index}", "2f".repeat(32)))),
        ..Operation::new(index, OperationKind::Input)
    }
}

fn output(
    index: u64,
    seed: u8,
    value: &str,
    related: &[u64],
    token_bundle: Option<Vec<TokenBundleItem>>,
) -> Operation {
    Operation {
        related_operations: Some(related.iter().copied().map(OperationId::new).collect()),
        account: Some(AccountIdentifier::new(payment_address(seed))),
        amount: Some(Amount::lovelace(value)),
        metadata: token_bundle.map(OperationMetadata::token_bundle),
        ..Operation::new(index, OperationKind::Output)
    }
}

fn staking_operation(index: u64, kind: OperationKind, seed: u8) -> Operation {
    Operation {
        account: Some(AccountIdentifier::new(reward_address(seed))),
        metadata: Some(OperationMetadata::staking_credential(PublicKey::new(
            hex::encode([seed; 32]),
        ))),
        ..Operation::new(index, kind)
    }
}

#[test]
fn full_round_trip_preserves_operations() {
    let token_bundle = vec![TokenBundleItem {
        policy_id: "aa".repeat(28),
        tokens: vec![Amount::asset("5", "01")],
    }];

    let mut delegation = staking_operation(5, OperationKind::StakeDelegation, 0x01);
    if let Some(metadata) = delegation.metadata.as_mut() {
        metadata.pool_key_hash = Some("0b".repeat(28));
    }

    let withdrawal = Operation {
        amount: Some(Amount::lovelace("-2000000")),
        ..staking_operation(6, OperationKind::Withdrawal, 0x04)
    };

    let vote_registration = Operation {
        metadata: Some(OperationMetadata {
            vote_registration_metadata: Some(VoteRegistrationMetadata {
                stake_key: PublicKey::new("01".repeat(32)),
                voting_key: PublicKey::new("02".repeat(32)),
                reward_address: reward_address(0x05),
                voting_nonce: 1234,
                voting_signature: "0a".repeat(64),
            }),
            ..Default::default()
        }),
        ..Operation::new(7, OperationKind::VoteRegistration)
    };

    let operations = vec![
        input(0, 0x07, "-10000000"),
        input(1, 0x08, "-5000000"),
        output(2, 0x09, "4000000", &[0, 1], Some(token_bundle)),
        output(3, 0x0a, "1000000", &[0, 1], None),
        staking_operation(4, OperationKind::StakeKeyRegistration, 0x03),
        delegation,
        withdrawal,
        vote_registration,
    ];

    let unsigned = build_transaction(NETWORK, &operations, TTL, &DepositParameters::default())
        .map_err(|e| e.to_string())
        .unwrap();

    // inputs 15M + withdrawal 2M − outputs 5M − key deposit 2M
    let body = rosetta_kernel::from_cbor::<rosetta_kernel::TransactionBody>(&unsigned.body)
        .unwrap();
    assert_eq!(body.fee, 10_000_000);
    assert!(body.auxiliary_data_hash.is_some());

    let parsed = parse_transaction(NETWORK, &unsigned.body, &unsigned.envelope, false)
        .map_err(|e| e.to_string())
        .unwrap();

    assert_eq!(parsed.operations, operations);
    assert!(parsed.signers.is_empty());
}

#[test]
fn signed_round_trip_reports_required_signers() {
    let operations = vec![
        input(0, 0x07, "-10000000"),
        output(1, 0x09, "4000000", &[0], None),
        Operation {
            amount: Some(Amount::lovelace("-2000000")),
            ..staking_operation(2, OperationKind::Withdrawal, 0x04)
        },
    ];

    let unsigned = build_transaction(NETWORK, &operations, TTL, &DepositParameters::default())
        .map_err(|e| e.to_string())
        .unwrap();

    // [body, {}, true] — a minimal signed wrapper; witnesses are opaque to
    // the parse direction.
    let mut signed = vec![0x83];
    signed.extend_from_slice(&unsigned.body);
    signed.extend_from_slice(&[0xa0, 0xf5]);

    let parsed = parse_transaction(NETWORK, &signed, &unsigned.envelope, true)
        .map_err(|e| e.to_string())
        .unwrap();

    let mut expected = vec![payment_address(0x07), reward_address(0x04)];
    expected.sort();
    assert_eq!(
        parsed
            .signers
            .iter()
            .map(|signer| signer.address.clone())
            .collect::<Vec<_>>(),
        expected
    );

    // Same addresses the build direction promised.
    assert_eq!(parsed.signers.len(), unsigned.signers.len());
    for signer in &parsed.signers {
        assert!(unsigned.signers.contains(&signer.address));
    }
}

#[test]
fn token_bundle_ordering_is_canonical_after_parse() {
    // Deliberately unsorted: policy ff… before 00…, token 02 before 01.
    let token_bundle = vec![
        TokenBundleItem {
            policy_id: "ff".repeat(28),
            tokens: vec![Amount::asset("1", "02"), Amount::asset("1", "01")],
        },
        TokenBundleItem {
            policy_id: "00".repeat(28),
            tokens: vec![Amount::asset("7", "")],
        },
    ];

    let operations = vec![
        input(0, 0x07, "-10000000"),
        output(1, 0x09, "4000000", &[0], Some(token_bundle)),
    ];

    let unsigned = build_transaction(NETWORK, &operations, TTL, &DepositParameters::default())
        .map_err(|e| e.to_string())
        .unwrap();
    let parsed = parse_transaction(NETWORK, &unsigned.body, &unsigned.envelope, false)
        .map_err(|e| e.to_string())
        .unwrap();

    let bundle = parsed.operations[1]
        .metadata
        .as_ref()
        .and_then(|metadata| metadata.token_bundle.as_ref())
        .unwrap();

    assert_eq!(bundle[0].policy_id, "00".repeat(28));
    assert_eq!(bundle[1].policy_id, "ff".repeat(28));
    assert_eq!(bundle[0].tokens[0].currency.symbol, "\\x");
    assert_eq!(bundle[1].tokens[0].currency.symbol, "01");
    assert_eq!(bundle[1].tokens[1].currency.symbol, "02");
}

#[test]
fn negative_output_is_rejected_at_build() {
    let operations = vec![
        input(0, 0x07, "-10000000"),
        output(1, 0x09, "-5", &[0], None),
    ];

    let error = build_transaction(NETWORK, &operations, TTL, &DepositParameters::default())
        .map_err(|e| e.to_string())
        .unwrap_err();
    assert!(error.contains("negative or invalid value"), "{error}");
}

#[test]
fn larger_ledger_than_envelope_derives_fresh_inputs() {
    // Build with two inputs, then strip one input operation from the
    // envelope: parsing falls back to deriving every input from the bytes.
    let operations = vec![
        input(0, 0x07, "-10000000"),
        input(1, 0x08, "-5000000"),
        output(2, 0x09, "4000000", &[0, 1], None),
    ];

    let unsigned = build_transaction(NETWORK, &operations, TTL, &DepositParameters::default())
        .map_err(|e| e.to_string())
        .unwrap();

    let mut envelope =
        rosetta_kernel::from_cbor::<rosetta_kernel::TransactionEnvelope>(&unsigned.envelope)
            .unwrap();
    envelope.extra_data.operations.truncate(1);

    let parsed = parse_transaction(
        NETWORK,
        &unsigned.body,
        &rosetta_kernel::to_cbor(&envelope),
        false,
    )
    .map_err(|e| e.to_string())
    .unwrap();

    // The surviving envelope input is reused; the second is derived fresh
    // (no account, just the coin reference).
    assert_eq!(parsed.operations[0].address(), Some(payment_address(0x07).as_str()));
    assert_eq!(parsed.operations[1].address(), None);
    assert_eq!(
        parsed.operations[1]
            .coin_change
            .as_ref()
            .map(|coin_change| coin_change.coin_identifier.identifier.clone()),
        Some(format!("{}:1", "2f".repeat(32)))
    );
}
