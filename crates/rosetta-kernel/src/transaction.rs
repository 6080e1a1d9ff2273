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

use crate::{TransactionBody, cbor};

/// A (possibly signed) transaction: `[body, witness_set, ?is_valid, ?auxiliary_data]`.
///
/// Decode-only: this codec reads the body and skips everything after it. It
/// never re-serialises a signed transaction, so no `Encode` instance exists.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub body: TransactionBody,
}

impl<'b, C> cbor::decode::Decode<'b, C> for Transaction {
    fn decode(d: &mut cbor::Decoder<'b>, ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        let len = d.array()?;

        if len == Some(0) {
            return Err(cbor::decode::Error::message(
                "empty array when decoding a transaction",
            ));
        }

        let body = d.decode_with(ctx)?;

        match len {
            Some(len) => {
                for _ in 1..len {
                    d.skip()?;
                }
            }
            None => {
                while !cbor::decode_break(d, len)? {
                    d.skip()?;
                }
            }
        }

        Ok(Transaction { body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::any_transaction_body;
    use proptest::prelude::*;

    proptest::proptest! {
        #[test]
        fn extracts_body_from_signed_wrapper(body in any_transaction_body()) {
            // [body, {}, true]
            let mut bytes = vec![0x83];
            bytes.extend(crate::to_cbor(&body));
            bytes.extend([0xa0, 0xf5]);

            let transaction = crate::from_cbor_no_leftovers::<Transaction>(&bytes)
                .map_err(|e| e.to_string());
            prop_assert_eq!(transaction.map(|transaction| transaction.body), Ok(body));
        }
    }
}
