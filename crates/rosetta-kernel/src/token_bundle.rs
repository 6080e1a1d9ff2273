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

use crate::{Amount, cbor};

/// All the assets of one policy attached to an output:
/// `{policy_id, tokens[...]}`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TokenBundleItem {
    pub policy_id: String,
    pub tokens: Vec<Amount>,
}

impl<C> cbor::encode::Encode<C> for TokenBundleItem {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        e.map(2)?;
        e.str("policy_id")?;
        e.str(&self.policy_id)?;
        e.str("tokens")?;
        e.encode_with(&self.tokens, ctx)?;
        Ok(())
    }
}

impl<'b, C> cbor::decode::Decode<'b, C> for TokenBundleItem {
    fn decode(d: &mut cbor::Decoder<'b>, ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        let (policy_id, tokens) = cbor::heterogeneous_map(
            d,
            (None, None),
            |d| d.str().map(|s| s.to_owned()),
            |d, state: &mut (Option<String>, Option<Vec<Amount>>), key| {
                match key.as_str() {
                    "policy_id" => state.0 = Some(d.str()?.to_owned()),
                    "tokens" => state.1 = Some(d.decode_with(ctx)?),
                    _ => d.skip()?,
                }
                Ok(())
            },
        )?;

        Ok(TokenBundleItem {
            policy_id: policy_id.ok_or_else(|| cbor::missing_field::<Self>("policy_id"))?,
            tokens: tokens.ok_or_else(|| cbor::missing_field::<Self>("tokens"))?,
        })
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use tests::*;

#[cfg(any(test, feature = "test-utils"))]
mod tests {
    use super::TokenBundleItem;
    use crate::any_asset_amount;
    use proptest::{collection, prelude::*, prop_compose};

    prop_compose! {
        pub fn any_token_bundle_item()(
            policy_id in any::<[u8; 28]>(),
            tokens in collection::vec(any_asset_amount(), 1..=3),
        ) -> TokenBundleItem {
            TokenBundleItem { policy_id: hex::encode(policy_id), tokens }
        }
    }
}
