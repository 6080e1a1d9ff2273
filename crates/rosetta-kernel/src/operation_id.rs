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

use crate::cbor;

/// The unique identifier of an operation within a transaction:
/// `{index, ?network_index}`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct OperationId {
    pub index: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_index: Option<u64>,
}

impl OperationId {
    pub fn new(index: u64) -> Self {
        OperationId {
            index,
            network_index: None,
        }
    }
}

impl<C> cbor::encode::Encode<C> for OperationId {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        e.map(1 + u64::from(self.network_index.is_some()))?;
        e.str("index")?;
        e.encode_with(self.index, ctx)?;
        if let Some(network_index) = self.network_index {
            e.str("network_index")?;
            e.encode_with(network_index, ctx)?;
        }
        Ok(())
    }
}

impl<'b, C> cbor::decode::Decode<'b, C> for OperationId {
    fn decode(d: &mut cbor::Decoder<'b>, ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        let (index, network_index) = cbor::heterogeneous_map(
            d,
            (None, None),
            |d| d.str().map(|s| s.to_owned()),
            |d, state: &mut (Option<u64>, Option<u64>), key| {
                match key.as_str() {
                    "index" => state.0 = Some(d.decode_with(ctx)?),
                    "network_index" => state.1 = Some(d.decode_with(ctx)?),
                    _ => d.skip()?,
                }
                Ok(())
            },
        )?;

        Ok(OperationId {
            index: index.ok_or_else(|| cbor::missing_field::<Self>("index"))?,
            network_index,
        })
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use tests::*;

#[cfg(any(test, feature = "test-utils"))]
mod tests {
    use super::OperationId;
    use proptest::{prelude::*, prop_compose};

    prop_compose! {
        pub fn any_operation_id()(
            index in 0u64..=1_000,
            network_index in proptest::option::of(0u64..=10),
        ) -> OperationId {
            OperationId { index, network_index }
        }
    }
}
