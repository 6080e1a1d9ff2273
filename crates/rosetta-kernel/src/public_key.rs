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
pub enum CurveType {
    #[serde(rename = "edwards25519")]
    Edwards25519,
    #[serde(rename = "secp256k1")]
    Secp256k1,
    #[serde(rename = "secp256r1")]
    Secp256r1,
    #[serde(rename = "tweedle")]
    Tweedle,
}

impl CurveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Edwards25519 => "edwards25519",
            Self::Secp256k1 => "secp256k1",
            Self::Secp256r1 => "secp256r1",
            Self::Tweedle => "tweedle",
        }
    }
}

impl std::fmt::Display for CurveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CurveType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "edwards25519" => Ok(Self::Edwards25519),
            "secp256k1" => Ok(Self::Secp256k1),
            "secp256r1" => Ok(Self::Secp256r1),
            "tweedle" => Ok(Self::Tweedle),
            _ => Err(format!("invalid curve type {}", s)),
        }
    }
}

/// A public key, given as hex bytes along with its declared curve:
/// `{hex_bytes, curve_type}`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PublicKey {
    pub hex_bytes: String,
    pub curve_type: CurveType,
}

impl PublicKey {
    pub fn new(hex_bytes: impl Into<String>) -> Self {
        PublicKey {
            hex_bytes: hex_bytes.into(),
            curve_type: CurveType::Edwards25519,
        }
    }
}

impl<C> cbor::encode::Encode<C> for PublicKey {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        _ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        e.map(2)?;
        e.str("hex_bytes")?;
        e.str(&self.hex_bytes)?;
        e.str("curve_type")?;
        e.str(self.curve_type.as_str())?;
        Ok(())
    }
}

impl<'b, C> cbor::decode::Decode<'b, C> for PublicKey {
    fn decode(d: &mut cbor::Decoder<'b>, _ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        let (hex_bytes, curve_type) = cbor::heterogeneous_map(
            d,
            (None, None),
            |d| d.str().map(|s| s.to_owned()),
            |d, state: &mut (Option<String>, Option<CurveType>), key| {
                match key.as_str() {
                    "hex_bytes" => state.0 = Some(d.str()?.to_owned()),
                    "curve_type" => {
                        state.1 =
                            Some(d.str()?.parse().map_err(cbor::decode::Error::message)?)
                    }
                    _ => d.skip()?,
                }
                Ok(())
            },
        )?;

        Ok(PublicKey {
            hex_bytes: hex_bytes.ok_or_else(|| cbor::missing_field::<Self>("hex_bytes"))?,
            curve_type: curve_type.ok_or_else(|| cbor::missing_field::<Self>("curve_type"))?,
        })
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use tests::*;

#[cfg(any(test, feature = "test-utils"))]
mod tests {
    use super::PublicKey;
    use proptest::prelude::*;

    pub fn any_public_key() -> impl Strategy<Value = PublicKey> {
        any::<[u8; 32]>().prop_map(|key| PublicKey::new(hex::encode(key)))
    }
}

#[cfg(test)]
mod unit_tests {
    use super::tests::any_public_key;
    use super::*;
    use crate::prop_cbor_roundtrip;

    prop_cbor_roundtrip!(PublicKey, any_public_key());
}
