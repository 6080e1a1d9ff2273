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

pub const ADA: &str = "ADA";
pub const ADA_DECIMALS: u32 = 6;
pub const MULTI_ASSET_DECIMALS: u32 = 0;

/// The canonical symbol of the unnamed asset (an empty binary asset name).
pub const EMPTY_SYMBOL: &str = "\\x";

/// A signed decimal-string amount of some currency:
/// `{value, currency{symbol, decimals, ?metadata{policy_id}}, ?metadata}`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Amount {
    pub value: String,
    pub currency: Currency,
    #[serde(skip)]
    pub metadata: Option<Metadatum>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Currency {
    pub symbol: String,
    pub decimals: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<CurrencyMetadata>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CurrencyMetadata {
    pub policy_id: String,
}

impl Amount {
    /// An amount of the base currency.
    pub fn lovelace(value: impl Into<String>) -> Self {
        Amount {
            value: value.into(),
            currency: Currency {
                symbol: ADA.to_string(),
                decimals: ADA_DECIMALS,
                metadata: None,
            },
            metadata: None,
        }
    }

    /// An amount of a native asset; an empty symbol names the unnamed asset.
    pub fn asset(value: impl Into<String>, symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        Amount {
            value: value.into(),
            currency: Currency {
                symbol: if symbol.is_empty() {
                    EMPTY_SYMBOL.to_string()
                } else {
                    symbol
                },
                decimals: MULTI_ASSET_DECIMALS,
                metadata: None,
            },
            metadata: None,
        }
    }
}

impl<C> cbor::encode::Encode<C> for Amount {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        e.map(2 + u64::from(self.metadata.is_some()))?;
        e.str("value")?;
        e.str(&self.value)?;
        e.str("currency")?;
        e.encode_with(&self.currency, ctx)?;
        if let Some(metadata) = &self.metadata {
            e.str("metadata")?;
            e.encode_with(metadata, ctx)?;
        }
        Ok(())
    }
}

impl<'b, C> cbor::decode::Decode<'b, C> for Amount {
    fn decode(d: &mut cbor::Decoder<'b>, ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        let (value, currency, metadata) = cbor::heterogeneous_map(
            d,
            (None, None, None),
            |d| d.str().map(|s| s.to_owned()),
            |d, state: &mut (Option<String>, Option<Currency>, Option<Metadatum>), key| {
                match key.as_str() {
                    "value" => state.0 = Some(d.str()?.to_owned()),
                    "currency" => state.1 = Some(d.decode_with(ctx)?),
                    "metadata" => state.2 = Some(d.decode_with(ctx)?),
                    _ => d.skip()?,
                }
                Ok(())
            },
        )?;

        Ok(Amount {
            value: value.ok_or_else(|| cbor::missing_field::<Self>("value"))?,
            currency: currency.ok_or_else(|| cbor::missing_field::<Self>("currency"))?,
            metadata,
        })
    }
}

impl<C> cbor::encode::Encode<C> for Currency {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        e.map(2 + u64::from(self.metadata.is_some()))?;
        e.str("symbol")?;
        e.str(&self.symbol)?;
        e.str("decimals")?;
        e.encode_with(self.decimals, ctx)?;
        if let Some(metadata) = &self.metadata {
            e.str("metadata")?;
            e.map(1)?;
            e.str("policy_id")?;
            e.str(&metadata.policy_id)?;
        }
        Ok(())
    }
}

impl<'b, C> cbor::decode::Decode<'b, C> for Currency {
    fn decode(d: &mut cbor::Decoder<'b>, ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        let (symbol, decimals, metadata) = cbor::heterogeneous_map(
            d,
            (None, None, None),
            |d| d.str().map(|s| s.to_owned()),
            |d, state: &mut (Option<String>, Option<u32>, Option<CurrencyMetadata>), key| {
                match key.as_str() {
                    "symbol" => state.0 = Some(d.str()?.to_owned()),
                    "decimals" => state.1 = Some(d.decode_with(ctx)?),
                    "metadata" => {
                        let policy_id = cbor::heterogeneous_map(
                            d,
                            None,
                            |d| d.str().map(|s| s.to_owned()),
                            |d, policy_id: &mut Option<String>, key| {
                                match key.as_str() {
                                    "policy_id" => *policy_id = Some(d.str()?.to_owned()),
                                    _ => d.skip()?,
                                }
                                Ok(())
                            },
                        )?;
                        state.2 = policy_id.map(|policy_id| CurrencyMetadata { policy_id });
                    }
                    _ => d.skip()?,
                }
                Ok(())
            },
        )?;

        Ok(Currency {
            symbol: symbol.ok_or_else(|| cbor::missing_field::<Self>("symbol"))?,
            decimals: decimals.ok_or_else(|| cbor::missing_field::<Self>("decimals"))?,
            metadata,
        })
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use tests::*;

#[cfg(any(test, feature = "test-utils"))]
mod tests {
    use super::Amount;
    use proptest::prelude::*;

    pub fn any_lovelace_amount() -> impl Strategy<Value = Amount> {
        (-1_000_000i64..=1_000_000).prop_map(|value| Amount::lovelace(value.to_string()))
    }

    pub fn any_asset_amount() -> impl Strategy<Value = Amount> {
        (0u64..=1_000_000, proptest::collection::vec(any::<u8>(), 0..=8))
            .prop_map(|(value, name)| Amount::asset(value.to_string(), hex::encode(name)))
    }
}

#[cfg(test)]
mod unit_tests {
    use super::tests::{any_asset_amount, any_lovelace_amount};
    use super::*;
    use crate::prop_cbor_roundtrip;
    use proptest::prelude::*;

    prop_cbor_roundtrip!(
        prop_cbor_roundtrip_amount,
        Amount,
        prop_oneof![any_lovelace_amount(), any_asset_amount()]
    );

    #[test]
    fn empty_symbol_is_normalised() {
        assert_eq!(Amount::asset("1", "").currency.symbol, EMPTY_SYMBOL);
    }
}
