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

use crate::{
    address::{InvalidAddress, decode_address},
    multiasset::{InvalidTokenBundle, token_bundle_to_multiasset},
    validate::parse_nonnegative_amount,
};
use rosetta_kernel::{Bytes, Lovelace, Operation, TransactionOutput, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InvalidOutput {
    #[error("output has missing address field")]
    MissingAddress,

    #[error("output has missing amount field")]
    MissingAmount,

    #[error("output has negative or invalid value '{0}'")]
    InvalidAmount(String),

    #[error(transparent)]
    Address(#[from] InvalidAddress),

    #[error(transparent)]
    TokenBundle(#[from] InvalidTokenBundle),
}

/// Turn an output operation into a ledger output, also returning the produced
/// amount of the base currency.
pub fn transaction_output(
    operation: &Operation,
) -> Result<(TransactionOutput, Lovelace), InvalidOutput> {
    let address = operation.address().ok_or(InvalidOutput::MissingAddress)?;
    let address = decode_address(address)?;

    let value = operation
        .amount
        .as_ref()
        .map(|amount| amount.value.as_str())
        .ok_or(InvalidOutput::MissingAmount)?;

    let coin = parse_nonnegative_amount(value)
        .ok_or_else(|| InvalidOutput::InvalidAmount(value.to_string()))?;

    let token_bundle = operation
        .metadata
        .as_ref()
        .and_then(|metadata| metadata.token_bundle.as_deref());

    let value = match token_bundle {
        None | Some([]) => Value::Coin(coin),
        Some(token_bundle) => {
            Value::Multiasset(coin, token_bundle_to_multiasset(token_bundle)?)
        }
    };

    Ok((
        TransactionOutput {
            address: Bytes::from(address.to_vec()),
            value,
        },
        coin,
    ))
}
