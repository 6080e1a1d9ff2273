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

use crate::validate::parse_negative_amount;
use rosetta_kernel::{Hash, Lovelace, Operation, TransactionInput, size};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InvalidInput {
    #[error("input has missing coin_change field")]
    MissingCoinChange,

    #[error("input has invalid coin identifier '{0}'")]
    InvalidCoinIdentifier(String),

    #[error("input has missing amount value field")]
    MissingAmount,

    #[error("input amount '{0}' must be a negative integer")]
    NonNegativeAmount(String),
}

/// Turn an input operation into a ledger input, also returning the spent
/// amount (as a magnitude; input operation values are negative).
pub fn transaction_input(
    operation: &Operation,
) -> Result<(TransactionInput, Lovelace), InvalidInput> {
    let coin_change = operation
        .coin_change
        .as_ref()
        .ok_or(InvalidInput::MissingCoinChange)?;

    let identifier = coin_change.coin_identifier.identifier.as_str();
    let input = parse_coin_identifier(identifier)
        .ok_or_else(|| InvalidInput::InvalidCoinIdentifier(identifier.to_string()))?;

    let value = operation
        .amount
        .as_ref()
        .map(|amount| amount.value.as_str())
        .ok_or(InvalidInput::MissingAmount)?;

    let spent = parse_negative_amount(value)
        .ok_or_else(|| InvalidInput::NonNegativeAmount(value.to_string()))?;

    Ok((input, spent))
}

/// Parse a `{transaction_id}:{index}` coin identifier.
pub fn parse_coin_identifier(identifier: &str) -> Option<TransactionInput> {
    let (transaction_id, index) = identifier.split_once(':')?;

    let transaction_id = hex::decode(transaction_id)
        .ok()
        .and_then(|bytes| <[u8; size::TRANSACTION_BODY]>::try_from(bytes.as_slice()).ok())
        .map(Hash::new)?;

    let index = index.parse().ok()?;

    Some(TransactionInput {
        transaction_id,
        index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosetta_kernel::{Amount, CoinChange, OperationKind};
    use test_case::test_case;

    fn input_operation(identifier: &str, value: &str) -> Operation {
        Operation {
            coin_change: Some(CoinChange::spent(identifier.to_string())),
            amount: Some(Amount::lovelace(value)),
            ..Operation::new(0, OperationKind::Input)
        }
    }

    #[test]
    fn accepts_well_formed_input() {
        let identifier = format!("{}:4", "2f".repeat(32));
        let (input, spent) = transaction_input(&input_operation(&identifier, "-90000"))
            .map_err(|e| e.to_string())
            .unwrap();
        assert_eq!(input.index, 4);
        assert_eq!(input.transaction_id.as_ref(), &[0x2f; 32]);
        assert_eq!(spent, 90000);
    }

    #[test]
    fn missing_coin_change_is_rejected() {
        let operation = Operation {
            amount: Some(Amount::lovelace("-1")),
            ..Operation::new(0, OperationKind::Input)
        };
        assert!(matches!(
            transaction_input(&operation),
            Err(InvalidInput::MissingCoinChange)
        ));
    }

    #[test]
    fn missing_amount_is_rejected() {
        let operation = Operation {
            coin_change: Some(CoinChange::spent(format!("{}:0", "00".repeat(32)))),
            ..Operation::new(0, OperationKind::Input)
        };
        assert!(matches!(
            transaction_input(&operation),
            Err(InvalidInput::MissingAmount)
        ));
    }

    #[test_case("90000" ; "positive")]
    #[test_case("0" ; "zero")]
    #[test_case("-12a" ; "not a number")]
    fn non_negative_amounts_are_rejected(value: &str) {
        let identifier = format!("{}:0", "00".repeat(32));
        assert!(matches!(
            transaction_input(&input_operation(&identifier, value)),
            Err(InvalidInput::NonNegativeAmount(_))
        ));
    }

    #[test_case("cafe:1" ; "short transaction id")]
    #[test_case("nope" ; "no separator")]
    #[test_case("" ; "empty")]
    fn malformed_coin_identifiers_are_rejected(identifier: &str) {
        assert!(matches!(
            transaction_input(&input_operation(identifier, "-1")),
            Err(InvalidInput::InvalidCoinIdentifier(_))
        ));
    }
}
