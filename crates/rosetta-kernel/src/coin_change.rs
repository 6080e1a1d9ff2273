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

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CoinAction {
    #[serde(rename = "coin_spent")]
    Spent,
    #[serde(rename = "coin_created")]
    Created,
}

impl CoinAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spent => "coin_spent",
            Self::Created => "coin_created",
        }
    }
}

impl std::fmt::Display for CoinAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CoinAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "coin_spent" => Ok(Self::Spent),
            "coin_created" => Ok(Self::Created),
            _ => Err(format!("invalid coin action {}", s)),
        }
    }
}

/// A coin identifier, formatted as `{transaction_id}:{index}`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CoinIdentifier {
    pub identifier: String,
}

/// The consumption or production of a coin: `{coin_identifier, coin_action}`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CoinChange {
    pub coin_identifier: CoinIdentifier,
    pub coin_action: CoinAction,
}

impl CoinChange {
    pub fn spent(identifier: String) -> Self {
        CoinChange {
            coin_identifier: CoinIdentifier { identifier },
            coin_action: CoinAction::Spent,
        }
    }
}

impl<C> cbor::encode::Encode<C> for CoinChange {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        _ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        e.map(2)?;
        e.str("coin_identifier")?;
        e.map(1)?;
        e.str("identifier")?;
        e.str(&self.coin_identifier.identifier)?;
        e.str("coin_action")?;
        e.str(self.coin_action.as_str())?;
        Ok(())
    }
}

impl<'b, C> cbor::decode::Decode<'b, C> for CoinChange {
    fn decode(d: &mut cbor::Decoder<'b>, _ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        let (identifier, coin_action) = cbor::heterogeneous_map(
            d,
            (None, None),
            |d| d.str().map(|s| s.to_owned()),
            |d, state: &mut (Option<String>, Option<CoinAction>), key| {
                match key.as_str() {
                    "coin_identifier" => {
                        state.0 = cbor::heterogeneous_map(
                            d,
                            None,
                            |d| d.str().map(|s| s.to_owned()),
                            |d, identifier: &mut Option<String>, key| {
                                match key.as_str() {
                                    "identifier" => *identifier = Some(d.str()?.to_owned()),
                                    _ => d.skip()?,
                                }
                                Ok(())
                            },
                        )?;
                    }
                    "coin_action" => {
                        state.1 =
                            Some(d.str()?.parse().map_err(cbor::decode::Error::message)?)
                    }
                    _ => d.skip()?,
                }
                Ok(())
            },
        )?;

        Ok(CoinChange {
            coin_identifier: CoinIdentifier {
                identifier: identifier
                    .ok_or_else(|| cbor::missing_field::<Self>("coin_identifier"))?,
            },
            coin_action: coin_action
                .ok_or_else(|| cbor::missing_field::<Self>("coin_action"))?,
        })
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use tests::*;

#[cfg(any(test, feature = "test-utils"))]
mod tests {
    use super::*;
    use proptest::{prelude::*, prop_compose};

    prop_compose! {
        pub fn any_coin_change()(
            transaction_id in any::<[u8; 32]>(),
            index in 0u64..=100,
            spent in any::<bool>(),
        ) -> CoinChange {
            CoinChange {
                coin_identifier: CoinIdentifier {
                    identifier: format!("{}:{}", hex::encode(transaction_id), index),
                },
                coin_action: if spent { CoinAction::Spent } else { CoinAction::Created },
            }
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::tests::any_coin_change;
    use super::*;
    use crate::prop_cbor_roundtrip;

    prop_cbor_roundtrip!(CoinChange, any_coin_change());
}
