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

use crate::{Lovelace, PolicyId, cbor};
use pallas_codec::utils::{Bytes, KeyValuePairs};

/// The binary name of an asset, within a policy. May be empty.
pub type AssetName = Bytes;

/// A multi-asset value map. Quantities are plain unsigned integers: the wire
/// format can carry zero quantities and repeated policy or asset entries, and
/// callers are expected to normalise (or reject) them.
pub type Multiasset = KeyValuePairs<PolicyId, KeyValuePairs<AssetName, u64>>;

/// An output value: either a bare amount of Lovelace, or an amount paired with
/// a multi-asset map: `coin / [coin, multiasset]`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Coin(Lovelace),
    Multiasset(Lovelace, Multiasset),
}

impl Value {
    pub fn coin(&self) -> Lovelace {
        match self {
            Self::Coin(coin) => *coin,
            Self::Multiasset(coin, _) => *coin,
        }
    }

    pub fn multiasset(&self) -> Option<&Multiasset> {
        match self {
            Self::Coin(_) => None,
            Self::Multiasset(_, assets) => Some(assets),
        }
    }
}

impl<C> cbor::encode::Encode<C> for Value {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        match self {
            Value::Coin(coin) => {
                e.encode_with(coin, ctx)?;
            }
            Value::Multiasset(coin, assets) => {
                e.array(2)?;
                e.encode_with(coin, ctx)?;
                e.encode_with(assets, ctx)?;
            }
        };

        Ok(())
    }
}

impl<'b, C> cbor::decode::Decode<'b, C> for Value {
    fn decode(d: &mut cbor::Decoder<'b>, ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        use cbor::Type::*;

        #[allow(clippy::wildcard_enum_match_arm)]
        match d.datatype()? {
            U8 | U16 | U32 | U64 => Ok(Value::Coin(d.decode_with(ctx)?)),
            Array | ArrayIndef => cbor::heterogeneous_array(d, |d, assert_len| {
                assert_len(2)?;
                Ok(Value::Multiasset(
                    d.decode_with(ctx)?,
                    d.decode_with(ctx)?,
                ))
            }),
            any => Err(cbor::decode::Error::message(format!(
                "unexpected CBOR datatype {any:?} when decoding a value"
            ))),
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use tests::*;

#[cfg(any(test, feature = "test-utils"))]
mod tests {
    use super::*;
    use crate::any_hash28;
    use proptest::{collection, prelude::*};

    pub fn any_asset_name() -> impl Strategy<Value = AssetName> {
        collection::vec(any::<u8>(), 0..=8).prop_map(Bytes::from)
    }

    pub fn any_multiasset() -> impl Strategy<Value = Multiasset> {
        collection::vec(
            (
                any_hash28(),
                collection::vec((any_asset_name(), 1u64..=1_000_000), 1..=3)
                    .prop_map(KeyValuePairs::Def),
            ),
            1..=3,
        )
        .prop_map(KeyValuePairs::Def)
    }

    pub fn any_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            any::<u64>().prop_map(Value::Coin),
            (any::<u64>(), any_multiasset())
                .prop_map(|(coin, assets)| Value::Multiasset(coin, assets)),
        ]
    }
}

#[cfg(test)]
mod unit_tests {
    use super::tests::any_value;
    use super::*;
    use crate::prop_cbor_roundtrip;

    prop_cbor_roundtrip!(Value, any_value());

    #[test]
    fn bare_coin_encodes_as_uint() {
        assert_eq!(crate::to_cbor(&Value::Coin(42)), vec![0x18, 0x2a]);
    }
}
