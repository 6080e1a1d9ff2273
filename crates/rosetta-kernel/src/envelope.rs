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

use crate::{Operation, cbor};

/// The out-of-band side channel travelling with every constructed
/// transaction: the original operations (those the binary format cannot fully
/// reconstruct) and the hex-encoded auxiliary metadata blob of a vote
/// registration, if any: `{operations, transaction_metadata_hex}`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransactionExtraData {
    pub operations: Vec<Operation>,
    pub transaction_metadata_hex: Option<String>,
}

/// The wire shape tying a transaction to its side channel:
/// `[transaction_hex, extra_data]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionEnvelope {
    pub transaction: String,
    pub extra_data: TransactionExtraData,
}

impl<C> cbor::encode::Encode<C> for TransactionExtraData {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        e.map(2)?;
        e.str("operations")?;
        e.encode_with(&self.operations, ctx)?;
        e.str("transaction_metadata_hex")?;
        e.str(self.transaction_metadata_hex.as_deref().unwrap_or(""))?;
        Ok(())
    }
}

impl<'b, C> cbor::decode::Decode<'b, C> for TransactionExtraData {
    fn decode(d: &mut cbor::Decoder<'b>, ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        let (operations, transaction_metadata_hex) = cbor::heterogeneous_map(
            d,
            (None, None),
            |d| d.str().map(|s| s.to_owned()),
            |d, state: &mut (Option<Vec<Operation>>, Option<String>), key| {
                match key.as_str() {
                    "operations" => state.0 = Some(d.decode_with(ctx)?),
                    "transaction_metadata_hex" => {
                        let hex = d.str()?;
                        state.1 = (!hex.is_empty()).then(|| hex.to_owned());
                    }
                    _ => d.skip()?,
                }
                Ok(())
            },
        )?;

        Ok(TransactionExtraData {
            operations: operations
                .ok_or_else(|| cbor::missing_field::<Self>("operations"))?,
            transaction_metadata_hex,
        })
    }
}

impl<C> cbor::encode::Encode<C> for TransactionEnvelope {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        e.array(2)?;
        e.str(&self.transaction)?;
        e.encode_with(&self.extra_data, ctx)?;
        Ok(())
    }
}

impl<'b, C> cbor::decode::Decode<'b, C> for TransactionEnvelope {
    fn decode(d: &mut cbor::Decoder<'b>, ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        cbor::heterogeneous_array(d, |d, assert_len| {
            assert_len(2)?;
            Ok(TransactionEnvelope {
                transaction: d.str()?.to_owned(),
                extra_data: d.decode_with(ctx)?,
            })
        })
    }
}
