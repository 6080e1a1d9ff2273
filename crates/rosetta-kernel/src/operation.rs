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
    AccountIdentifier, Amount, CoinChange, OperationId, OperationKind, OperationMetadata, cbor,
};

/// One typed state change of a transaction. Operations are immutable once
/// produced: both directions of the codec always build fresh operations
/// instead of patching a caller's.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Operation {
    pub operation_identifier: OperationId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_operations: Option<Vec<OperationId>>,
    #[serde(rename = "type")]
    pub kind: OperationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<AccountIdentifier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coin_change: Option<CoinChange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<OperationMetadata>,
}

impl Operation {
    /// A bare operation of the given kind, with an empty (unsigned) status.
    pub fn new(index: u64, kind: OperationKind) -> Self {
        Operation {
            operation_identifier: OperationId::new(index),
            related_operations: None,
            kind,
            status: Some(String::new()),
            account: None,
            amount: None,
            coin_change: None,
            metadata: None,
        }
    }

    pub fn index(&self) -> u64 {
        self.operation_identifier.index
    }

    pub fn address(&self) -> Option<&str> {
        self.account
            .as_ref()
            .map(|account| account.address.as_str())
    }

    pub fn staking_credential_hex(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|metadata| metadata.staking_credential.as_ref())
            .map(|key| key.hex_bytes.as_str())
    }
}

impl<C> cbor::encode::Encode<C> for Operation {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        let len = 2
            + u64::from(self.related_operations.is_some())
            + u64::from(self.status.is_some())
            + u64::from(self.account.is_some())
            + u64::from(self.amount.is_some())
            + u64::from(self.coin_change.is_some())
            + u64::from(self.metadata.is_some());
        e.map(len)?;
        e.str("operation_identifier")?;
        e.encode_with(self.operation_identifier, ctx)?;
        if let Some(related_operations) = &self.related_operations {
            e.str("related_operations")?;
            e.encode_with(related_operations, ctx)?;
        }
        e.str("type")?;
        e.encode_with(self.kind, ctx)?;
        if let Some(status) = &self.status {
            e.str("status")?;
            e.str(status)?;
        }
        if let Some(account) = &self.account {
            e.str("account")?;
            e.encode_with(account, ctx)?;
        }
        if let Some(amount) = &self.amount {
            e.str("amount")?;
            e.encode_with(amount, ctx)?;
        }
        if let Some(coin_change) = &self.coin_change {
            e.str("coin_change")?;
            e.encode_with(coin_change, ctx)?;
        }
        if let Some(metadata) = &self.metadata {
            e.str("metadata")?;
            e.encode_with(metadata, ctx)?;
        }
        Ok(())
    }
}

type OperationFields = (
    Option<OperationId>,
    Option<Vec<OperationId>>,
    Option<OperationKind>,
    Option<String>,
    Option<AccountIdentifier>,
    Option<Amount>,
    Option<CoinChange>,
    Option<OperationMetadata>,
);

impl<'b, C> cbor::decode::Decode<'b, C> for Operation {
    fn decode(d: &mut cbor::Decoder<'b>, ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        let fields = cbor::heterogeneous_map(
            d,
            OperationFields::default(),
            |d| d.str().map(|s| s.to_owned()),
            |d, state: &mut OperationFields, key| {
                match key.as_str() {
                    "operation_identifier" => state.0 = Some(d.decode_with(ctx)?),
                    "related_operations" => state.1 = Some(d.decode_with(ctx)?),
                    "type" => state.2 = Some(d.decode_with(ctx)?),
                    "status" => state.3 = Some(d.str()?.to_owned()),
                    "account" => state.4 = Some(d.decode_with(ctx)?),
                    "amount" => state.5 = Some(d.decode_with(ctx)?),
                    "coin_change" => state.6 = Some(d.decode_with(ctx)?),
                    "metadata" => state.7 = Some(d.decode_with(ctx)?),
                    _ => d.skip()?,
                }
                Ok(())
            },
        )?;

        Ok(Operation {
            operation_identifier: fields
                .0
                .ok_or_else(|| cbor::missing_field::<Self>("operation_identifier"))?,
            related_operations: fields.1,
            kind: fields.2.ok_or_else(|| cbor::missing_field::<Self>("type"))?,
            status: fields.3,
            account: fields.4,
            amount: fields.5,
            coin_change: fields.6,
            metadata: fields.7,
        })
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use tests::*;

#[cfg(any(test, feature = "test-utils"))]
mod tests {
    use super::*;
    use crate::{
        any_account_identifier, any_coin_change, any_lovelace_amount, any_operation_kind,
    };
    use proptest::{prelude::*, prop_compose};

    prop_compose! {
        pub fn any_operation()(
            index in 0u64..=100,
            kind in any_operation_kind(),
            account in proptest::option::of(any_account_identifier()),
            amount in proptest::option::of(any_lovelace_amount()),
            coin_change in proptest::option::of(any_coin_change()),
        ) -> Operation {
            Operation {
                account,
                amount,
                coin_change,
                ..Operation::new(index, kind)
            }
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::tests::any_operation;
    use super::*;
    use crate::prop_cbor_roundtrip;

    prop_cbor_roundtrip!(Operation, any_operation());

    #[test]
    fn json_view_uses_wire_field_names() {
        let operation = Operation::new(1, OperationKind::StakeDelegation);
        let json = serde_json::to_value(&operation)
            .map_err(|e| e.to_string())
            .unwrap();

        assert_eq!(json["type"], "stakeDelegation");
        assert_eq!(json["operation_identifier"]["index"], 1);
        assert_eq!(json["status"], "");
        assert_eq!(json.get("coin_change"), None);
    }

    #[test]
    fn mandatory_fields_are_enforced() {
        // {"type": "input"} — no operation_identifier
        let bytes = crate::to_cbor(&{
            struct JustType;
            impl<C> cbor::encode::Encode<C> for JustType {
                fn encode<W: cbor::encode::Write>(
                    &self,
                    e: &mut cbor::Encoder<W>,
                    _ctx: &mut C,
                ) -> Result<(), cbor::encode::Error<W::Error>> {
                    e.map(1)?;
                    e.str("type")?;
                    e.str("input")?;
                    Ok(())
                }
            }
            JustType
        });

        assert!(crate::from_cbor_no_leftovers::<Operation>(&bytes).is_err());
    }
}
