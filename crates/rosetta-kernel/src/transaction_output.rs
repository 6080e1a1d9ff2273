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

use crate::{Value, cbor};
use pallas_codec::utils::Bytes;

/// A produced output: `[address, value]`. The decoder also accepts the
/// three-element form carrying a datum hash and drops the hash: constructed
/// transactions never produce one.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionOutput {
    pub address: Bytes,
    pub value: Value,
}

impl<C> cbor::encode::Encode<C> for TransactionOutput {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        e.array(2)?;
        e.encode_with(&self.address, ctx)?;
        e.encode_with(&self.value, ctx)?;
        Ok(())
    }
}

impl<'b, C> cbor::decode::Decode<'b, C> for TransactionOutput {
    fn decode(d: &mut cbor::Decoder<'b>, ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        let len = d.array()?;

        if let Some(len) = len {
            if !(2..=3).contains(&len) {
                return Err(cbor::decode::Error::message(format!(
                    "invalid transaction output: expected 2 or 3 elements, got {len}"
                )));
            }
        }

        let output = TransactionOutput {
            address: d.decode_with(ctx)?,
            value: d.decode_with(ctx)?,
        };

        match len {
            Some(2) => (),
            Some(_) => d.skip()?,
            None => {
                if !cbor::decode_break(d, len)? {
                    d.skip()?;
                    cbor::decode_break(d, len)?;
                }
            }
        }

        Ok(output)
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use tests::*;

#[cfg(any(test, feature = "test-utils"))]
mod tests {
    use super::*;
    use crate::any_value;
    use proptest::{collection, prelude::*, prop_compose};

    prop_compose! {
        pub fn any_transaction_output()(
            address in collection::vec(any::<u8>(), 29),
            value in any_value(),
        ) -> TransactionOutput {
            TransactionOutput { address: Bytes::from(address), value }
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::tests::any_transaction_output;
    use super::*;
    use crate::prop_cbor_roundtrip;

    prop_cbor_roundtrip!(TransactionOutput, any_transaction_output());

    #[test]
    fn drops_trailing_datum_hash() {
        let bytes = {
            let mut buffer = Vec::new();
            let mut e = minicbor::Encoder::new(&mut buffer);
            e.array(3)
                .and_then(|e| e.bytes(&[0xe0; 29]))
                .and_then(|e| e.u64(42))
                .and_then(|e| e.bytes(&[0; 32]))
                .map(|_| ())
                .ok();
            buffer
        };

        let output = crate::from_cbor_no_leftovers::<TransactionOutput>(&bytes)
            .map_err(|e| e.to_string())
            .unwrap();
        assert_eq!(output.value, Value::Coin(42));
    }
}
