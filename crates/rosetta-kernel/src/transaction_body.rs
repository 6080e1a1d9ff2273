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
    Certificate, Lovelace, RewardAccount, TransactionInput, TransactionOutput, cbor,
};
use pallas_codec::utils::{Bytes, KeyValuePairs};

/// A transaction body, as a CBOR map keyed by small integers. Only the fields
/// a constructed transaction can carry are materialised; the decoder skips
/// any other key (script data, collateral, minting, ...) so that signed
/// transactions coming back from a wallet still parse.
#[derive(Debug, Clone, PartialEq, cbor::Encode)]
#[cbor(map)]
pub struct TransactionBody {
    #[n(0)]
    pub inputs: Vec<TransactionInput>,

    #[n(1)]
    pub outputs: Vec<TransactionOutput>,

    #[n(2)]
    pub fee: Lovelace,

    #[n(3)]
    pub ttl: Option<u64>,

    #[n(4)]
    pub certificates: Option<Vec<Certificate>>,

    #[n(5)]
    pub withdrawals: Option<KeyValuePairs<RewardAccount, Lovelace>>,

    #[n(7)]
    pub auxiliary_data_hash: Option<Bytes>,
}

#[derive(Default)]
struct Fields {
    inputs: Option<Vec<TransactionInput>>,
    outputs: Option<Vec<TransactionOutput>>,
    fee: Option<Lovelace>,
    ttl: Option<u64>,
    certificates: Option<Vec<Certificate>>,
    withdrawals: Option<KeyValuePairs<RewardAccount, Lovelace>>,
    auxiliary_data_hash: Option<Bytes>,
}

impl<'b, C> cbor::decode::Decode<'b, C> for TransactionBody {
    fn decode(d: &mut cbor::Decoder<'b>, ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        let fields = cbor::heterogeneous_map(
            d,
            Fields::default(),
            |d| d.u32(),
            |d, fields: &mut Fields, key| {
                match key {
                    0 => fields.inputs = Some(d.decode_with(ctx)?),
                    1 => fields.outputs = Some(d.decode_with(ctx)?),
                    2 => fields.fee = Some(d.decode_with(ctx)?),
                    3 => fields.ttl = Some(d.decode_with(ctx)?),
                    4 => fields.certificates = Some(d.decode_with(ctx)?),
                    5 => fields.withdrawals = Some(d.decode_with(ctx)?),
                    7 => fields.auxiliary_data_hash = Some(d.decode_with(ctx)?),
                    _ => d.skip()?,
                }
                Ok(())
            },
        )?;

        Ok(TransactionBody {
            inputs: fields
                .inputs
                .ok_or_else(|| cbor::missing_field::<Self>("inputs"))?,
            outputs: fields
                .outputs
                .ok_or_else(|| cbor::missing_field::<Self>("outputs"))?,
            fee: fields
                .fee
                .ok_or_else(|| cbor::missing_field::<Self>("fee"))?,
            ttl: fields.ttl,
            certificates: fields.certificates,
            withdrawals: fields.withdrawals,
            auxiliary_data_hash: fields.auxiliary_data_hash,
        })
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use tests::*;

#[cfg(any(test, feature = "test-utils"))]
mod tests {
    use super::*;
    use crate::{any_certificate, any_transaction_input, any_transaction_output};
    use proptest::{collection, prelude::*, prop_compose};

    prop_compose! {
        pub fn any_transaction_body()(
            inputs in collection::vec(any_transaction_input(), 1..=3),
            outputs in collection::vec(any_transaction_output(), 0..=3),
            fee in any::<u64>(),
            ttl in proptest::option::of(any::<u64>()),
            certificates in proptest::option::of(collection::vec(any_certificate(), 1..=2)),
            auxiliary_data_hash in proptest::option::of(any::<[u8; 32]>()),
        ) -> TransactionBody {
            TransactionBody {
                inputs,
                outputs,
                fee,
                ttl,
                certificates,
                withdrawals: None,
                auxiliary_data_hash: auxiliary_data_hash.map(|hash| Bytes::from(hash.to_vec())),
            }
        }
    }
}
