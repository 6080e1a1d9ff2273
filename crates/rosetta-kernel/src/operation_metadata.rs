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
    Amount, PoolRegistrationParams, PublicKey, TokenBundleItem, VoteRegistrationMetadata, cbor,
};

/// The per-type payload of an operation. Which fields are set depends on the
/// operation kind; validation happens in the construction rules, not here.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct OperationMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub withdrawal_amount: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit_amount: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_amount: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staking_credential: Option<PublicKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_key_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epoch: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_bundle: Option<Vec<TokenBundleItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_registration_cert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_registration_params: Option<PoolRegistrationParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_registration_metadata: Option<VoteRegistrationMetadata>,
}

impl OperationMetadata {
    pub fn staking_credential(key: PublicKey) -> Self {
        OperationMetadata {
            staking_credential: Some(key),
            ..Default::default()
        }
    }

    pub fn token_bundle(token_bundle: Vec<TokenBundleItem>) -> Self {
        OperationMetadata {
            token_bundle: Some(token_bundle),
            ..Default::default()
        }
    }
}

impl<C> cbor::encode::Encode<C> for OperationMetadata {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        let len = u64::from(self.withdrawal_amount.is_some())
            + u64::from(self.deposit_amount.is_some())
            + u64::from(self.refund_amount.is_some())
            + u64::from(self.staking_credential.is_some())
            + u64::from(self.pool_key_hash.is_some())
            + u64::from(self.epoch.is_some())
            + u64::from(self.token_bundle.is_some())
            + u64::from(self.pool_registration_cert.is_some())
            + u64::from(self.pool_registration_params.is_some())
            + u64::from(self.vote_registration_metadata.is_some());
        e.map(len)?;
        if let Some(withdrawal_amount) = &self.withdrawal_amount {
            e.str("withdrawal_amount")?;
            e.encode_with(withdrawal_amount, ctx)?;
        }
        if let Some(deposit_amount) = &self.deposit_amount {
            e.str("deposit_amount")?;
            e.encode_with(deposit_amount, ctx)?;
        }
        if let Some(refund_amount) = &self.refund_amount {
            e.str("refund_amount")?;
            e.encode_with(refund_amount, ctx)?;
        }
        if let Some(staking_credential) = &self.staking_credential {
            e.str("staking_credential")?;
            e.encode_with(staking_credential, ctx)?;
        }
        if let Some(pool_key_hash) = &self.pool_key_hash {
            e.str("pool_key_hash")?;
            e.str(pool_key_hash)?;
        }
        if let Some(epoch) = &self.epoch {
            e.str("epoch")?;
            e.encode_with(epoch, ctx)?;
        }
        if let Some(token_bundle) = &self.token_bundle {
            e.str("token_bundle")?;
            e.encode_with(token_bundle, ctx)?;
        }
        if let Some(pool_registration_cert) = &self.pool_registration_cert {
            e.str("pool_registration_cert")?;
            e.str(pool_registration_cert)?;
        }
        if let Some(pool_registration_params) = &self.pool_registration_params {
            e.str("pool_registration_params")?;
            e.encode_with(pool_registration_params, ctx)?;
        }
        if let Some(vote_registration_metadata) = &self.vote_registration_metadata {
            e.str("vote_registration_metadata")?;
            e.encode_with(vote_registration_metadata, ctx)?;
        }
        Ok(())
    }
}

impl<'b, C> cbor::decode::Decode<'b, C> for OperationMetadata {
    fn decode(d: &mut cbor::Decoder<'b>, ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        cbor::heterogeneous_map(
            d,
            OperationMetadata::default(),
            |d| d.str().map(|s| s.to_owned()),
            |d, state: &mut OperationMetadata, key| {
                match key.as_str() {
                    "withdrawal_amount" => state.withdrawal_amount = Some(d.decode_with(ctx)?),
                    "deposit_amount" => state.deposit_amount = Some(d.decode_with(ctx)?),
                    "refund_amount" => state.refund_amount = Some(d.decode_with(ctx)?),
                    "staking_credential" => {
                        state.staking_credential = Some(d.decode_with(ctx)?)
                    }
                    "pool_key_hash" => state.pool_key_hash = Some(d.str()?.to_owned()),
                    "epoch" => state.epoch = Some(d.decode_with(ctx)?),
                    "token_bundle" => state.token_bundle = Some(d.decode_with(ctx)?),
                    "pool_registration_cert" => {
                        state.pool_registration_cert = Some(d.str()?.to_owned())
                    }
                    "pool_registration_params" => {
                        state.pool_registration_params = Some(d.decode_with(ctx)?)
                    }
                    "vote_registration_metadata" => {
                        state.vote_registration_metadata = Some(d.decode_with(ctx)?)
                    }
                    _ => d.skip()?,
                }
                Ok(())
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        any_public_key, any_token_bundle_item, prop_cbor_roundtrip,
    };
    use proptest::{collection, prelude::*};

    fn any_operation_metadata() -> impl Strategy<Value = OperationMetadata> {
        prop_oneof![
            any_public_key().prop_map(OperationMetadata::staking_credential),
            collection::vec(any_token_bundle_item(), 1..=2)
                .prop_map(OperationMetadata::token_bundle),
            (any_public_key(), any::<[u8; 28]>()).prop_map(|(key, pool)| OperationMetadata {
                staking_credential: Some(key),
                pool_key_hash: Some(hex::encode(pool)),
                ..Default::default()
            }),
            (0u64..=1_000).prop_map(|epoch| OperationMetadata {
                epoch: Some(epoch),
                ..Default::default()
            }),
        ]
    }

    prop_cbor_roundtrip!(OperationMetadata, any_operation_metadata());
}
