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
    address::{InvalidAddress, derive_reward_address},
    validate::parse_negative_amount,
};
use rosetta_kernel::{Bytes, Lovelace, NetworkName, Operation, RewardAccount, StakeAddress};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InvalidWithdrawal {
    #[error("withdrawal has missing staking credential")]
    MissingStakingCredential,

    #[error("withdrawal has missing amount value field")]
    MissingAmount,

    #[error("withdrawal amount '{0}' must be a negative integer")]
    NonNegativeAmount(String),

    #[error(transparent)]
    Address(#[from] InvalidAddress),
}

/// A validated withdrawal: the raw reward account for the ledger map, the
/// withdrawn quantity (a magnitude; the operation value is negative, funds
/// flow into the transaction), and the displayable reward address.
#[derive(Debug, Clone)]
pub struct Withdrawal {
    pub account: RewardAccount,
    pub amount: Lovelace,
    pub address: StakeAddress,
}

pub fn withdrawal(
    network: NetworkName,
    operation: &Operation,
) -> Result<Withdrawal, InvalidWithdrawal> {
    let key = operation
        .metadata
        .as_ref()
        .and_then(|metadata| metadata.staking_credential.as_ref())
        .ok_or(InvalidWithdrawal::MissingStakingCredential)?;

    let address = derive_reward_address(network, key)?;

    let value = operation
        .amount
        .as_ref()
        .map(|amount| amount.value.as_str())
        .ok_or(InvalidWithdrawal::MissingAmount)?;

    let amount = parse_negative_amount(value)
        .ok_or_else(|| InvalidWithdrawal::NonNegativeAmount(value.to_string()))?;

    Ok(Withdrawal {
        account: Bytes::from(address.to_vec()),
        amount,
        address,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosetta_kernel::{Amount, OperationKind, OperationMetadata, PublicKey};

    fn withdrawal_operation(value: &str) -> Operation {
        Operation {
            metadata: Some(OperationMetadata::staking_credential(PublicKey::new(
                "01".repeat(32),
            ))),
            amount: Some(Amount::lovelace(value)),
            ..Operation::new(0, OperationKind::Withdrawal)
        }
    }

    #[test]
    fn accepts_well_formed_withdrawal() {
        let withdrawal = withdrawal(NetworkName::Preprod, &withdrawal_operation("-5000000"))
            .map_err(|e| e.to_string())
            .unwrap();
        assert_eq!(withdrawal.amount, 5000000);
        assert_eq!(withdrawal.account.len(), 29);
        assert!(
            withdrawal
                .address
                .to_bech32()
                .unwrap()
                .starts_with("stake_test1")
        );
    }

    #[test]
    fn positive_amount_is_rejected() {
        assert!(matches!(
            withdrawal(NetworkName::Preprod, &withdrawal_operation("5000000")),
            Err(InvalidWithdrawal::NonNegativeAmount(_))
        ));
    }

    #[test]
    fn missing_credential_is_rejected() {
        let operation = Operation {
            amount: Some(Amount::lovelace("-1")),
            ..Operation::new(0, OperationKind::Withdrawal)
        };
        assert!(matches!(
            withdrawal(NetworkName::Preprod, &operation),
            Err(InvalidWithdrawal::MissingStakingCredential)
        ));
    }
}
