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

use crate::{TransactionId, cbor};

/// A reference to an unspent output: `[transaction_id, index]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransactionInput {
    pub transaction_id: TransactionId,
    pub index: u64,
}

impl<C> cbor::encode::Encode<C> for TransactionInput {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        e.array(2)?;
        e.encode_with(self.transaction_id, ctx)?;
        e.encode_with(self.index, ctx)?;
        Ok(())
    }
}

impl<'b, C> cbor::decode::Decode<'b, C> for TransactionInput {
    fn decode(d: &mut cbor::Decoder<'b>, ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        cbor::heterogeneous_array(d, |d, assert_len| {
            assert_len(2)?;
            Ok(TransactionInput {
                transaction_id: d.decode_with(ctx)?,
                index: d.decode_with(ctx)?,
            })
        })
    }
}

impl std::fmt::Display for TransactionInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.transaction_id, self.index)
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use tests::*;

#[cfg(any(test, feature = "test-utils"))]
mod tests {
    use super::TransactionInput;
    use crate::any_hash32;
    use proptest::{prelude::*, prop_compose};

    prop_compose! {
        pub fn any_transaction_input()(
            transaction_id in any_hash32(),
            index in 0u64..=u16::MAX as u64,
        ) -> TransactionInput {
            TransactionInput { transaction_id, index }
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::tests::any_transaction_input;
    use super::*;
    use crate::prop_cbor_roundtrip;

    prop_cbor_roundtrip!(TransactionInput, any_transaction_input());
}
