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

use crate::{Metadatum, cbor};

/// An account: `{address, ?sub_account, ?metadata}`. The address is either a
/// bech32 Shelley/stake address, a base58 Byron address, or — for pool
/// retirements — a bare hex-encoded pool key hash.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AccountIdentifier {
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_account: Option<SubAccountIdentifier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<AccountIdentifierMetadata>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SubAccountIdentifier {
    pub address: String,
    #[serde(skip)]
    pub metadata: Option<Metadatum>,
}

/// Byron addresses need their chain code next to the public key to
/// reconstruct witnesses; it travels here.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AccountIdentifierMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_code: Option<String>,
}

impl AccountIdentifier {
    pub fn new(address: impl Into<String>) -> Self {
        AccountIdentifier {
            address: address.into(),
            sub_account: None,
            metadata: None,
        }
    }
}

impl<C> cbor::encode::Encode<C> for AccountIdentifier {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        let len = 1
            + u64::from(self.sub_account.is_some())
            + u64::from(self.metadata.is_some());
        e.map(len)?;
        e.str("address")?;
        e.str(&self.address)?;
        if let Some(sub_account) = &self.sub_account {
            e.str("sub_account")?;
            e.encode_with(sub_account, ctx)?;
        }
        if let Some(metadata) = &self.metadata {
            e.str("metadata")?;
            e.map(u64::from(metadata.chain_code.is_some()))?;
            if let Some(chain_code) = &metadata.chain_code {
                e.str("chain_code")?;
                e.str(chain_code)?;
            }
        }
        Ok(())
    }
}

impl<'b, C> cbor::decode::Decode<'b, C> for AccountIdentifier {
    fn decode(d: &mut cbor::Decoder<'b>, ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        let (address, sub_account, metadata) = cbor::heterogeneous_map(
            d,
            (None, None, None),
            |d| d.str().map(|s| s.to_owned()),
            |d,
             state: &mut (
                Option<String>,
                Option<SubAccountIdentifier>,
                Option<AccountIdentifierMetadata>,
            ),
             key| {
                match key.as_str() {
                    "address" => state.0 = Some(d.str()?.to_owned()),
                    "sub_account" => state.1 = Some(d.decode_with(ctx)?),
                    "metadata" => {
                        let chain_code = cbor::heterogeneous_map(
                            d,
                            None,
                            |d| d.str().map(|s| s.to_owned()),
                            |d, chain_code: &mut Option<String>, key| {
                                match key.as_str() {
                                    "chain_code" => *chain_code = Some(d.str()?.to_owned()),
                                    _ => d.skip()?,
                                }
                                Ok(())
                            },
                        )?;
                        state.2 = Some(AccountIdentifierMetadata { chain_code });
                    }
                    _ => d.skip()?,
                }
                Ok(())
            },
        )?;

        Ok(AccountIdentifier {
            address: address.ok_or_else(|| cbor::missing_field::<Self>("address"))?,
            sub_account,
            metadata,
        })
    }
}

impl<C> cbor::encode::Encode<C> for SubAccountIdentifier {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        e.map(1 + u64::from(self.metadata.is_some()))?;
        e.str("address")?;
        e.str(&self.address)?;
        if let Some(metadata) = &self.metadata {
            e.str("metadata")?;
            e.encode_with(metadata, ctx)?;
        }
        Ok(())
    }
}

impl<'b, C> cbor::decode::Decode<'b, C> for SubAccountIdentifier {
    fn decode(d: &mut cbor::Decoder<'b>, ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        let (address, metadata) = cbor::heterogeneous_map(
            d,
            (None, None),
            |d| d.str().map(|s| s.to_owned()),
            |d, state: &mut (Option<String>, Option<Metadatum>), key| {
                match key.as_str() {
                    "address" => state.0 = Some(d.str()?.to_owned()),
                    "metadata" => state.1 = Some(d.decode_with(ctx)?),
                    _ => d.skip()?,
                }
                Ok(())
            },
        )?;

        Ok(SubAccountIdentifier {
            address: address.ok_or_else(|| cbor::missing_field::<Self>("address"))?,
            metadata,
        })
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use tests::*;

#[cfg(any(test, feature = "test-utils"))]
mod tests {
    use super::AccountIdentifier;
    use proptest::prelude::*;

    pub fn any_account_identifier() -> impl Strategy<Value = AccountIdentifier> {
        "addr_test1[a-z0-9]{16}".prop_map(AccountIdentifier::new)
    }
}
