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

use crate::{PublicKey, cbor};

/// The operation-side description of a Catalyst vote registration:
/// `{stake_key, voting_key, reward_address, voting_nonce, voting_signature}`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VoteRegistrationMetadata {
    pub stake_key: PublicKey,
    pub voting_key: PublicKey,
    pub reward_address: String,
    pub voting_nonce: u64,
    pub voting_signature: String,
}

impl<C> cbor::encode::Encode<C> for VoteRegistrationMetadata {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        e.map(5)?;
        e.str("stake_key")?;
        e.encode_with(&self.stake_key, ctx)?;
        e.str("voting_key")?;
        e.encode_with(&self.voting_key, ctx)?;
        e.str("reward_address")?;
        e.str(&self.reward_address)?;
        e.str("voting_nonce")?;
        e.encode_with(self.voting_nonce, ctx)?;
        e.str("voting_signature")?;
        e.str(&self.voting_signature)?;
        Ok(())
    }
}

type VoteRegistrationMetadataFields = (
    Option<PublicKey>,
    Option<PublicKey>,
    Option<String>,
    Option<u64>,
    Option<String>,
);

impl<'b, C> cbor::decode::Decode<'b, C> for VoteRegistrationMetadata {
    fn decode(d: &mut cbor::Decoder<'b>, ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        let fields = cbor::heterogeneous_map(
            d,
            VoteRegistrationMetadataFields::default(),
            |d| d.str().map(|s| s.to_owned()),
            |d, state: &mut VoteRegistrationMetadataFields, key| {
                match key.as_str() {
                    "stake_key" => state.0 = Some(d.decode_with(ctx)?),
                    "voting_key" => state.1 = Some(d.decode_with(ctx)?),
                    "reward_address" => state.2 = Some(d.str()?.to_owned()),
                    "voting_nonce" => state.3 = Some(d.decode_with(ctx)?),
                    "voting_signature" => state.4 = Some(d.str()?.to_owned()),
                    _ => d.skip()?,
                }
                Ok(())
            },
        )?;

        Ok(VoteRegistrationMetadata {
            stake_key: fields
                .0
                .ok_or_else(|| cbor::missing_field::<Self>("stake_key"))?,
            voting_key: fields
                .1
                .ok_or_else(|| cbor::missing_field::<Self>("voting_key"))?,
            reward_address: fields
                .2
                .ok_or_else(|| cbor::missing_field::<Self>("reward_address"))?,
            voting_nonce: fields
                .3
                .ok_or_else(|| cbor::missing_field::<Self>("voting_nonce"))?,
            voting_signature: fields
                .4
                .ok_or_else(|| cbor::missing_field::<Self>("voting_signature"))?,
        })
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use tests::*;

#[cfg(any(test, feature = "test-utils"))]
mod tests {
    use super::VoteRegistrationMetadata;
    use crate::any_public_key;
    use proptest::{prelude::*, prop_compose};

    prop_compose! {
        pub fn any_vote_registration_metadata()(
            stake_key in any_public_key(),
            voting_key in any_public_key(),
            reward_hash in any::<[u8; 28]>(),
            voting_nonce in 1u64..=10_000_000,
            voting_signature in any::<[u8; 32]>(),
        ) -> VoteRegistrationMetadata {
            let reward_address = {
                let mut bytes = vec![0xe0];
                bytes.extend_from_slice(&reward_hash);
                pallas_addresses::Address::from_bytes(&bytes)
                    .ok()
                    .and_then(|address| address.to_bech32().ok())
                    .unwrap_or_default()
            };
            // NOTE: a structurally valid (64-byte) signature, not a verifiable one.
            let voting_signature = hex::encode([voting_signature, voting_signature].concat());
            VoteRegistrationMetadata {
                stake_key,
                voting_key,
                reward_address,
                voting_nonce,
                voting_signature,
            }
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::tests::any_vote_registration_metadata;
    use super::*;
    use crate::prop_cbor_roundtrip;

    prop_cbor_roundtrip!(VoteRegistrationMetadata, any_vote_registration_metadata());
}
