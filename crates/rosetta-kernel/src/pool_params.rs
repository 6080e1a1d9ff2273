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
    Hash, Lovelace, PoolId, PoolMetadata, RationalNumber, Relay, RewardAccount, cbor,
    size::{KEY, VRF_KEY},
};
use pallas_codec::utils::Nullable;

/// The operating parameters of a stake pool, as carried by a registration
/// certificate. In a certificate the nine fields are inlined in the enclosing
/// array (a CDDL group); the standalone codec below wraps them in their own
/// array.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolParams {
    pub id: PoolId,
    pub vrf: Hash<VRF_KEY>,
    pub pledge: Lovelace,
    pub cost: Lovelace,
    pub margin: RationalNumber,
    pub reward_account: RewardAccount,
    pub owners: Vec<Hash<KEY>>,
    pub relays: Vec<Relay>,
    pub metadata: Nullable<PoolMetadata>,
}

impl PoolParams {
    pub const FIELDS: u64 = 9;

    pub(crate) fn encode_fields<C, W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        e.encode_with(self.id, ctx)?;
        e.encode_with(self.vrf, ctx)?;
        e.encode_with(self.pledge, ctx)?;
        e.encode_with(self.cost, ctx)?;
        e.encode_with(&self.margin, ctx)?;
        e.encode_with(&self.reward_account, ctx)?;
        e.encode_with(&self.owners, ctx)?;
        e.encode_with(&self.relays, ctx)?;
        e.encode_with(&self.metadata, ctx)?;
        Ok(())
    }

    pub(crate) fn decode_fields<C>(
        d: &mut cbor::Decoder<'_>,
        ctx: &mut C,
    ) -> Result<Self, cbor::decode::Error> {
        Ok(PoolParams {
            id: d.decode_with(ctx)?,
            vrf: d.decode_with(ctx)?,
            pledge: d.decode_with(ctx)?,
            cost: d.decode_with(ctx)?,
            margin: d.decode_with(ctx)?,
            reward_account: d.decode_with(ctx)?,
            owners: d.decode_with(ctx)?,
            relays: d.decode_with(ctx)?,
            metadata: d.decode_with(ctx)?,
        })
    }
}

impl<C> cbor::encode::Encode<C> for PoolParams {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        e.array(Self::FIELDS)?;
        self.encode_fields(e, ctx)
    }
}

impl<'b, C> cbor::decode::Decode<'b, C> for PoolParams {
    fn decode(d: &mut cbor::Decoder<'b>, ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        cbor::heterogeneous_array(d, |d, assert_len| {
            assert_len(Self::FIELDS)?;
            Self::decode_fields(d, ctx)
        })
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use tests::*;

#[cfg(any(test, feature = "test-utils"))]
mod tests {
    use super::*;
    use crate::{any_hash28, any_hash32, any_pool_metadata, any_relay};
    use pallas_codec::utils::Bytes;
    use proptest::{collection, prelude::*, prop_compose};

    pub fn any_rational_number() -> impl Strategy<Value = RationalNumber> {
        (0u64..=1_000, 1u64..=1_000).prop_map(|(numerator, denominator)| RationalNumber {
            numerator,
            denominator,
        })
    }

    pub fn any_reward_account() -> impl Strategy<Value = RewardAccount> {
        (any::<bool>(), any::<[u8; 28]>()).prop_map(|(mainnet, hash)| {
            let mut bytes = Vec::with_capacity(29);
            bytes.push(if mainnet { 0xe1 } else { 0xe0 });
            bytes.extend_from_slice(&hash);
            Bytes::from(bytes)
        })
    }

    prop_compose! {
        pub fn any_pool_params()(
            id in any_hash28(),
            vrf in any_hash32(),
            pledge in any::<u64>(),
            cost in any::<u64>(),
            margin in any_rational_number(),
            reward_account in any_reward_account(),
            owners in collection::vec(any_hash28(), 0..=3),
            relays in collection::vec(any_relay(), 0..=3),
            metadata in proptest::option::of(any_pool_metadata()),
        ) -> PoolParams {
            PoolParams {
                id,
                vrf,
                pledge,
                cost,
                margin,
                reward_account,
                owners,
                relays,
                metadata: match metadata {
                    Some(metadata) => Nullable::Some(metadata),
                    None => Nullable::Null,
                },
            }
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::tests::any_pool_params;
    use super::*;
    use crate::prop_cbor_roundtrip;

    prop_cbor_roundtrip!(PoolParams, any_pool_params());
}
