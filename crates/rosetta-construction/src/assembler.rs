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

//! The operation ↔ transaction assembler. The build direction partitions an
//! operation list into the ledger's structural sections and serialises the
//! transaction body next to its extra-data envelope; the parse direction
//! walks the sections back into operations, reusing the envelope wherever
//! the binary format under-specifies a field.

use crate::{
    address::{InvalidAddress, address_to_text, reward_address_from_account_bytes},
    certificates::{self, InvalidCertificate},
    inputs::{self, InvalidInput},
    multiasset::{InvalidTokenBundle, multiasset_to_token_bundle},
    outputs::{self, InvalidOutput},
    signers::{InvalidSigner, required_signers},
    vote_registration::{InvalidVoteRegistration, build_vote_registration, parse_vote_registration},
    withdrawals::{self, InvalidWithdrawal},
};
use rosetta_kernel::{
    AccountIdentifier, Address, Amount, AuxiliaryData, Bytes, Certificate, CoinChange, Hasher,
    KeyValuePairs, Lovelace, NetworkName, Operation, OperationId, OperationKind,
    OperationMetadata, RewardAccount, Transaction, TransactionBody, TransactionEnvelope,
    TransactionExtraData, TransactionId, TransactionInput, TransactionOutput, from_cbor_no_leftovers,
    to_cbor,
};
use std::collections::BTreeSet;
use thiserror::Error;

pub const DEFAULT_KEY_DEPOSIT: Lovelace = 2_000_000;
pub const DEFAULT_POOL_DEPOSIT: Lovelace = 500_000_000;

/// The protocol deposits in force, needed to account for certificate
/// deposits and refunds when deriving the implied fee.
#[derive(Debug, Clone, Copy)]
pub struct DepositParameters {
    pub key_deposit: Lovelace,
    pub pool_deposit: Lovelace,
}

impl Default for DepositParameters {
    fn default() -> Self {
        DepositParameters {
            key_deposit: DEFAULT_KEY_DEPOSIT,
            pool_deposit: DEFAULT_POOL_DEPOSIT,
        }
    }
}

/// A built (yet unsigned) transaction: the serialised body, its blake2b-256
/// digest (the payload to sign), the extra-data envelope, and the addresses
/// expected to witness.
#[derive(Debug, Clone)]
pub struct UnsignedTransaction {
    pub id: TransactionId,
    pub body: Vec<u8>,
    pub envelope: Vec<u8>,
    pub signers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTransaction {
    pub operations: Vec<Operation>,
    pub signers: Vec<AccountIdentifier>,
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid input operation: {0}")]
    Input(#[from] InvalidInput),

    #[error("invalid output operation: {0}")]
    Output(#[from] InvalidOutput),

    #[error("invalid certificate operation: {0}")]
    Certificate(#[from] InvalidCertificate),

    #[error("invalid withdrawal operation: {0}")]
    Withdrawal(#[from] InvalidWithdrawal),

    #[error("invalid vote registration operation: {0}")]
    VoteRegistration(#[from] InvalidVoteRegistration),

    #[error("transaction outputs and deposits exceed inputs by {0}")]
    OutputsExceedInputs(i128),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("can't decode transaction from bytes: {0}")]
    MalformedTransaction(String),

    #[error("can't decode transaction extra data from bytes: {0}")]
    MalformedEnvelope(String),

    #[error(transparent)]
    Address(#[from] InvalidAddress),

    #[error(transparent)]
    Certificate(#[from] InvalidCertificate),

    #[error(transparent)]
    TokenBundle(#[from] InvalidTokenBundle),

    #[error(transparent)]
    VoteRegistration(#[from] InvalidVoteRegistration),

    #[error(transparent)]
    Signer(#[from] InvalidSigner),
}

// Build direction
// ----------------------------------------------------------------------------

/// The ledger sections accumulated from one pass over the operations. Every
/// section is freshly built; nothing borrows from the caller's list.
#[derive(Default)]
struct ProcessedOperations {
    inputs: Vec<TransactionInput>,
    outputs: Vec<TransactionOutput>,
    certificates: Vec<Certificate>,
    withdrawals: Vec<(RewardAccount, Lovelace)>,
    vote_registration: Option<AuxiliaryData>,
    addresses: BTreeSet<String>,
    spent: u128,
    produced: u128,
    withdrawn: u128,
    stake_key_registrations: u64,
    stake_key_deregistrations: u64,
    pool_registrations: u64,
}

impl ProcessedOperations {
    /// Fees are implied: everything flowing in (inputs, withdrawals, deposit
    /// refunds) minus everything flowing out (outputs, deposits).
    fn fee(&self, deposits: &DepositParameters) -> Result<Lovelace, BuildError> {
        let refunds =
            u128::from(self.stake_key_deregistrations) * u128::from(deposits.key_deposit);
        let deposited = u128::from(self.stake_key_registrations)
            * u128::from(deposits.key_deposit)
            + u128::from(self.pool_registrations) * u128::from(deposits.pool_deposit);

        let fee = i128::try_from(self.spent + self.withdrawn + refunds)
            .unwrap_or(i128::MAX)
            - i128::try_from(self.produced + deposited).unwrap_or(i128::MAX);

        if fee < 0 {
            return Err(BuildError::OutputsExceedInputs(-fee));
        }

        u64::try_from(fee).map_err(|_| BuildError::OutputsExceedInputs(i128::MAX))
    }
}

fn process_operations(
    network: NetworkName,
    operations: &[Operation],
) -> Result<ProcessedOperations, BuildError> {
    let mut processed = ProcessedOperations::default();

    for operation in operations {
        match operation.kind {
            OperationKind::Input => {
                let (input, spent) = inputs::transaction_input(operation)?;
                processed.inputs.push(input);
                processed.spent += u128::from(spent);
                if let Some(address) = operation.address() {
                    processed.addresses.insert(address.to_string());
                }
            }
            OperationKind::Output => {
                let (output, produced) = outputs::transaction_output(operation)?;
                processed.outputs.push(output);
                processed.produced += u128::from(produced);
            }
            OperationKind::StakeKeyRegistration => {
                processed
                    .certificates
                    .push(certificates::stake_key_registration(operation)?);
                processed.stake_key_registrations += 1;
            }
            OperationKind::StakeKeyDeregistration => {
                let (certificate, reward_address) =
                    certificates::stake_key_deregistration(network, operation)?;
                processed.certificates.push(certificate);
                processed
                    .addresses
                    .insert(stake_address_text(&reward_address)?);
                processed.stake_key_deregistrations += 1;
            }
            OperationKind::StakeDelegation => {
                let (certificate, reward_address) =
                    certificates::stake_delegation(network, operation)?;
                processed.certificates.push(certificate);
                processed
                    .addresses
                    .insert(stake_address_text(&reward_address)?);
            }
            OperationKind::PoolRegistration => {
                let built = certificates::pool_registration(operation)?;
                processed.certificates.push(built.certificate);
                processed.addresses.extend(built.signers);
                processed.pool_registrations += 1;
            }
            OperationKind::PoolRegistrationWithCert => {
                let built = certificates::pool_registration_with_cert(network, operation)?;
                processed.certificates.push(built.certificate);
                processed.addresses.extend(built.signers);
                processed.pool_registrations += 1;
            }
            OperationKind::PoolRetirement => {
                let (certificate, cold_key) = certificates::pool_retirement(operation)?;
                processed.certificates.push(certificate);
                processed.addresses.insert(cold_key);
            }
            OperationKind::Withdrawal => {
                let withdrawal = withdrawals::withdrawal(network, operation)?;
                processed.withdrawn += u128::from(withdrawal.amount);
                processed
                    .withdrawals
                    .push((withdrawal.account, withdrawal.amount));
                processed
                    .addresses
                    .insert(stake_address_text(&withdrawal.address)?);
            }
            OperationKind::VoteRegistration => {
                let metadata = operation
                    .metadata
                    .as_ref()
                    .and_then(|metadata| metadata.vote_registration_metadata.as_ref());
                processed.vote_registration = Some(build_vote_registration(metadata)?);
            }
        }
    }

    Ok(processed)
}

fn stake_address_text(
    address: &rosetta_kernel::StakeAddress,
) -> Result<String, InvalidCertificate> {
    address.to_bech32().map_err(|e| {
        InvalidCertificate::Address(InvalidAddress::Malformed {
            address: hex::encode(address.to_vec()),
            reason: e.to_string(),
        })
    })
}

/// Which operations travel in the envelope: the binary format cannot
/// reconstruct spent inputs (address, value), certificate operations
/// (status, keys), withdrawals, or the vote registration marker.
fn retained_in_envelope(operation: &Operation) -> bool {
    let spends_a_coin = operation
        .coin_change
        .as_ref()
        .map(|coin_change| coin_change.coin_action == rosetta_kernel::CoinAction::Spent)
        .unwrap_or(false);

    spends_a_coin
        || operation.kind.is_certificate()
        || operation.kind == OperationKind::Withdrawal
        || operation.kind == OperationKind::VoteRegistration
}

/// Build an unsigned transaction from an ordered operation list. Indices are
/// trusted as assigned by the caller; only per-type content is validated.
pub fn build_transaction(
    network: NetworkName,
    operations: &[Operation],
    ttl: u64,
    deposits: &DepositParameters,
) -> Result<UnsignedTransaction, BuildError> {
    tracing::debug!(count = operations.len(), %network, "building transaction");

    let processed = process_operations(network, operations)?;
    let fee = processed.fee(deposits)?;

    let auxiliary_data = processed.vote_registration.as_ref().map(to_cbor);
    let auxiliary_data_hash = auxiliary_data
        .as_deref()
        .map(|bytes| Bytes::from(Hasher::<256>::hash(bytes).as_ref().to_vec()));

    let body = TransactionBody {
        inputs: processed.inputs,
        outputs: processed.outputs,
        fee,
        ttl: Some(ttl),
        certificates: (!processed.certificates.is_empty()).then_some(processed.certificates),
        withdrawals: (!processed.withdrawals.is_empty())
            .then(|| KeyValuePairs::Def(processed.withdrawals)),
        auxiliary_data_hash,
    };

    let body = to_cbor(&body);
    let id = Hasher::<256>::hash(&body);

    let envelope = TransactionEnvelope {
        transaction: hex::encode(&body),
        extra_data: TransactionExtraData {
            operations: operations
                .iter()
                .filter(|operation| retained_in_envelope(operation))
                .cloned()
                .collect(),
            transaction_metadata_hex: auxiliary_data.map(hex::encode),
        },
    };

    Ok(UnsignedTransaction {
        id,
        body,
        envelope: to_cbor(&envelope),
        signers: processed.addresses.into_iter().collect(),
    })
}

// Parse direction
// ----------------------------------------------------------------------------

fn input_operation(input: &TransactionInput, index: u64) -> Operation {
    Operation {
        coin_change: Some(CoinChange::spent(format!(
            "{}:{}",
            hex::encode(input.transaction_id),
            input.index
        ))),
        ..Operation::new(index, OperationKind::Input)
    }
}

fn output_operation(
    output: &TransactionOutput,
    index: u64,
    related_operations: Vec<OperationId>,
) -> Result<Operation, ParseError> {
    let address = Address::from_bytes(&output.address).map_err(|e| {
        ParseError::Address(InvalidAddress::Malformed {
            address: hex::encode(output.address.as_slice()),
            reason: e.to_string(),
        })
    })?;

    let token_bundle = output
        .value
        .multiasset()
        .map(multiasset_to_token_bundle)
        .transpose()?
        .filter(|token_bundle| !token_bundle.is_empty());

    Ok(Operation {
        related_operations: Some(related_operations),
        account: Some(AccountIdentifier::new(address_to_text(&address)?)),
        amount: Some(Amount::lovelace(output.value.coin().to_string())),
        metadata: token_bundle.map(OperationMetadata::token_bundle),
        ..Operation::new(index, OperationKind::Output)
    })
}

fn withdrawal_operation(
    network: NetworkName,
    account: &RewardAccount,
    coin: Lovelace,
    matched: Option<&Operation>,
    fallback_index: u64,
) -> Result<Operation, ParseError> {
    let staking_credential = matched.and_then(|operation| {
        operation
            .metadata
            .as_ref()
            .and_then(|metadata| metadata.staking_credential.clone())
    });

    // The displayed reward address is recomputed from the staking key when
    // the envelope carries one, from the raw account bytes otherwise.
    let address = match &staking_credential {
        Some(key) => crate::address::derive_reward_address(network, key)?,
        None => reward_address_from_account_bytes(network, account)?,
    };
    let address = stake_address_text(&address).map_err(ParseError::Certificate)?;

    let amount = matched
        .and_then(|operation| operation.amount.clone())
        .unwrap_or_else(|| Amount::lovelace(format!("-{coin}")));

    Ok(Operation {
        account: Some(AccountIdentifier::new(address)),
        amount: Some(amount),
        metadata: staking_credential.map(OperationMetadata::staking_credential),
        ..Operation::new(
            matched.map_or(fallback_index, Operation::index),
            OperationKind::Withdrawal,
        )
    })
}

fn operations_from_body(
    network: NetworkName,
    body: &TransactionBody,
    extra_data: &TransactionExtraData,
) -> Result<Vec<Operation>, ParseError> {
    let mut operations: Vec<Operation> = Vec::new();

    // (1) Inputs. Envelope operations are reused verbatim while available —
    // a raw input is only `txid:index`, the address and value live in the
    // envelope. A surplus of envelope operations means the envelope does not
    // describe this transaction: fall back to the ledger bytes alone.
    let envelope_inputs: Vec<&Operation> = extra_data
        .operations
        .iter()
        .filter(|operation| operation.kind == OperationKind::Input)
        .collect();
    let reuse_inputs =
        !envelope_inputs.is_empty() && envelope_inputs.len() <= body.inputs.len();

    tracing::debug!(
        count = body.inputs.len(),
        from_envelope = reuse_inputs,
        "parsing inputs"
    );

    for (position, input) in body.inputs.iter().enumerate() {
        if reuse_inputs && position < envelope_inputs.len() {
            operations.push(Operation {
                status: Some(String::new()),
                ..envelope_inputs[position].clone()
            });
        } else {
            let index = operations.len() as u64;
            operations.push(input_operation(input, index));
        }
    }

    // (2) Outputs, each pointing back at every input.
    let related_operations: Vec<OperationId> = operations
        .iter()
        .map(|operation| OperationId::new(operation.index()))
        .collect();

    tracing::debug!(count = body.outputs.len(), "parsing outputs");

    for output in &body.outputs {
        let index = operations.len() as u64;
        operations.push(output_operation(output, index, related_operations.clone())?);
    }

    // (3) Certificates, matched positionally against the envelope's
    // certificate operations when the counts line up; re-derived from the
    // ledger bytes alone otherwise.
    let certificates = body.certificates.as_deref().unwrap_or(&[]);
    let envelope_certificates: Vec<&Operation> = extra_data
        .operations
        .iter()
        .filter(|operation| operation.kind.is_certificate())
        .collect();
    let certificates_matched = envelope_certificates.len() == certificates.len();

    tracing::debug!(
        count = certificates.len(),
        from_envelope = certificates_matched,
        "parsing certificates"
    );

    for (position, certificate) in certificates.iter().enumerate() {
        let matched = certificates_matched.then(|| envelope_certificates[position]);
        let index = operations.len() as u64;
        operations.push(certificates::certificate_to_operation(
            network,
            certificate,
            matched,
            index,
        )?);
    }

    // (4) Withdrawals, same positional rule.
    let withdrawals: &[(RewardAccount, Lovelace)] = body
        .withdrawals
        .as_ref()
        .map(|withdrawals| &withdrawals[..])
        .unwrap_or(&[]);
    let envelope_withdrawals: Vec<&Operation> = extra_data
        .operations
        .iter()
        .filter(|operation| operation.kind == OperationKind::Withdrawal)
        .collect();
    let withdrawals_matched = envelope_withdrawals.len() == withdrawals.len();

    tracing::debug!(
        count = withdrawals.len(),
        from_envelope = withdrawals_matched,
        "parsing withdrawals"
    );

    for (position, (account, coin)) in withdrawals.iter().enumerate() {
        let matched = withdrawals_matched.then(|| envelope_withdrawals[position]);
        let index = operations.len() as u64;
        operations.push(withdrawal_operation(
            network, account, *coin, matched, index,
        )?);
    }

    // (5) At most one vote registration, declared by the envelope and
    // carried by the auxiliary metadata blob.
    if let Some(vote_operation) = extra_data
        .operations
        .iter()
        .find(|operation| operation.kind == OperationKind::VoteRegistration)
    {
        operations.push(parse_vote_registration(
            vote_operation.index(),
            extra_data.transaction_metadata_hex.as_deref(),
        )?);
    }

    Ok(operations)
}

/// Parse a transaction (signed or not) back into its operations. Signed
/// transactions additionally report the signer set implied by the envelope's
/// operations.
pub fn parse_transaction(
    network: NetworkName,
    transaction: &[u8],
    envelope: &[u8],
    signed: bool,
) -> Result<ParsedTransaction, ParseError> {
    let envelope = from_cbor_no_leftovers::<TransactionEnvelope>(envelope)
        .map_err(|e| ParseError::MalformedEnvelope(e.to_string()))?;

    let body = if signed {
        from_cbor_no_leftovers::<Transaction>(transaction)
            .map_err(|e| ParseError::MalformedTransaction(e.to_string()))?
            .body
    } else {
        from_cbor_no_leftovers::<TransactionBody>(transaction)
            .map_err(|e| ParseError::MalformedTransaction(e.to_string()))?
    };

    let operations = operations_from_body(network, &body, &envelope.extra_data)?;

    let signers = if signed {
        required_signers(network, &envelope.extra_data.operations)?
    } else {
        vec![]
    };

    Ok(ParsedTransaction {
        operations,
        signers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rosetta_kernel::{PublicKey, from_cbor};

    const NETWORK: NetworkName = NetworkName::Preprod;

    fn address(seed: u8) -> String {
        crate::address::derive_enterprise_address(NETWORK, &PublicKey::new(hex::encode([seed; 32])))
            .map_err(|e| e.to_string())
            .unwrap()
            .to_bech32()
            .unwrap()
    }

    fn input_operation_fixture(index: u64, value: &str) -> Operation {
        Operation {
            account: Some(AccountIdentifier::new(address(7))),
            amount: Some(Amount::lovelace(value)),
            coin_change: Some(CoinChange::spent(format!("{}:{index}", "2f".repeat(32)))),
            ..Operation::new(index, OperationKind::Input)
        }
    }

    fn output_operation_fixture(index: u64, value: &str) -> Operation {
        Operation {
            account: Some(AccountIdentifier::new(address(9))),
            amount: Some(Amount::lovelace(value)),
            ..Operation::new(index, OperationKind::Output)
        }
    }

    #[test]
    fn implied_fee_is_inputs_minus_outputs() {
        let operations = vec![
            input_operation_fixture(0, "-600"),
            output_operation_fixture(1, "400"),
        ];

        let unsigned = build_transaction(NETWORK, &operations, 1000, &Default::default())
            .map_err(|e| e.to_string())
            .unwrap();

        let body = from_cbor::<TransactionBody>(&unsigned.body).unwrap();
        assert_eq!(body.fee, 200);
        assert_eq!(body.ttl, Some(1000));
    }

    #[test]
    fn outputs_exceeding_inputs_are_rejected() {
        let operations = vec![
            input_operation_fixture(0, "-400"),
            output_operation_fixture(1, "600"),
        ];

        assert!(matches!(
            build_transaction(NETWORK, &operations, 1000, &Default::default()),
            Err(BuildError::OutputsExceedInputs(200))
        ));
    }

    #[test]
    fn deposits_count_against_the_fee() {
        let deposits = DepositParameters {
            key_deposit: 100,
            pool_deposit: 1000,
        };
        let operations = vec![
            input_operation_fixture(0, "-600"),
            output_operation_fixture(1, "400"),
            Operation {
                metadata: Some(OperationMetadata::staking_credential(PublicKey::new(
                    "01".repeat(32),
                ))),
                ..Operation::new(2, OperationKind::StakeKeyRegistration)
            },
        ];

        let unsigned = build_transaction(NETWORK, &operations, 1000, &deposits)
            .map_err(|e| e.to_string())
            .unwrap();
        let body = from_cbor::<TransactionBody>(&unsigned.body).unwrap();
        assert_eq!(body.fee, 100);
        assert_eq!(body.certificates.map(|certs| certs.len()), Some(1));
    }

    #[test]
    fn refunds_count_towards_the_fee() {
        let deposits = DepositParameters {
            key_deposit: 100,
            pool_deposit: 1000,
        };
        let operations = vec![
            input_operation_fixture(0, "-600"),
            output_operation_fixture(1, "650"),
            Operation {
                metadata: Some(OperationMetadata::staking_credential(PublicKey::new(
                    "01".repeat(32),
                ))),
                ..Operation::new(2, OperationKind::StakeKeyDeregistration)
            },
        ];

        let unsigned = build_transaction(NETWORK, &operations, 1000, &deposits)
            .map_err(|e| e.to_string())
            .unwrap();
        let body = from_cbor::<TransactionBody>(&unsigned.body).unwrap();
        assert_eq!(body.fee, 50);
    }

    #[test]
    fn envelope_excludes_outputs() {
        let operations = vec![
            input_operation_fixture(0, "-600"),
            output_operation_fixture(1, "400"),
        ];

        let unsigned = build_transaction(NETWORK, &operations, 1000, &Default::default())
            .map_err(|e| e.to_string())
            .unwrap();

        let envelope = from_cbor::<TransactionEnvelope>(&unsigned.envelope).unwrap();
        assert_eq!(envelope.extra_data.operations.len(), 1);
        assert_eq!(
            envelope.extra_data.operations[0].kind,
            OperationKind::Input
        );
        assert_eq!(envelope.transaction, hex::encode(&unsigned.body));
    }

    #[test]
    fn parse_reuses_envelope_inputs_and_numbers_outputs() {
        let operations = vec![
            input_operation_fixture(0, "-600"),
            output_operation_fixture(1, "400"),
        ];

        let unsigned = build_transaction(NETWORK, &operations, 1000, &Default::default())
            .map_err(|e| e.to_string())
            .unwrap();

        let parsed = parse_transaction(NETWORK, &unsigned.body, &unsigned.envelope, false)
            .map_err(|e| e.to_string())
            .unwrap();

        assert_eq!(parsed.operations.len(), 2);
        assert_eq!(parsed.operations[0].address(), Some(address(7).as_str()));
        assert_eq!(
            parsed.operations[1].related_operations,
            Some(vec![OperationId::new(0)])
        );
        assert!(parsed.signers.is_empty());
    }

    #[test]
    fn parse_derives_inputs_without_envelope_help() {
        let operations = vec![
            input_operation_fixture(0, "-600"),
            output_operation_fixture(1, "400"),
        ];

        let unsigned = build_transaction(NETWORK, &operations, 1000, &Default::default())
            .map_err(|e| e.to_string())
            .unwrap();

        // An envelope with no input operations at all.
        let empty = TransactionEnvelope {
            transaction: hex::encode(&unsigned.body),
            extra_data: TransactionExtraData::default(),
        };

        let parsed =
            parse_transaction(NETWORK, &unsigned.body, &to_cbor(&empty), false)
                .map_err(|e| e.to_string())
                .unwrap();

        assert_eq!(parsed.operations.len(), 2);
        assert_eq!(parsed.operations[0].address(), None);
        assert_eq!(
            parsed.operations[0]
                .coin_change
                .as_ref()
                .map(|c| c.coin_identifier.identifier.clone()),
            Some(format!("{}:0", "2f".repeat(32)))
        );
    }

    #[test]
    fn garbage_envelope_is_rejected() {
        assert!(matches!(
            parse_transaction(NETWORK, &[0x80], &[0xff, 0x00], false),
            Err(ParseError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn garbage_transaction_is_rejected() {
        let envelope = TransactionEnvelope {
            transaction: String::new(),
            extra_data: TransactionExtraData::default(),
        };
        assert!(matches!(
            parse_transaction(NETWORK, &[0xff], &to_cbor(&envelope), false),
            Err(ParseError::MalformedTransaction(_))
        ));
    }
}
