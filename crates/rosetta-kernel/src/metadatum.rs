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
use pallas_codec::utils::KeyValuePairs;

/// A piece of (structured) metadata found in a transaction's auxiliary data.
///
// NOTE: CBOR (signed) integers
//
// We use CBOR's Int here and not a Rust's i64 because CBOR's signed integers are encoded next
// to their signs, meaning that they range from -2^64 to 2^64 - 1; unlike Rust's i64 which
// ranges from -2^63 .. 2^63 - 1.
#[derive(Debug, PartialEq, Clone)]
pub enum Metadatum {
    Int(cbor::Int),
    Bytes(Vec<u8>),
    Text(String),
    Array(Vec<Metadatum>),
    Map(KeyValuePairs<Metadatum, Metadatum>),
}

impl Metadatum {
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            Self::Int(_) | Self::Text(_) | Self::Array(_) | Self::Map(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<i128> {
        match self {
            Self::Int(int) => Some(i128::from(*int)),
            Self::Bytes(_) | Self::Text(_) | Self::Array(_) | Self::Map(_) => None,
        }
    }

    /// Lookup a value in a map-shaped metadatum, by unsigned-integer key.
    pub fn lookup(&self, key: u64) -> Option<&Metadatum> {
        match self {
            Self::Map(entries) => entries.iter().find_map(|(k, v)| match k {
                Metadatum::Int(int) if i128::from(*int) == i128::from(key) => Some(v),
                Metadatum::Int(_)
                | Metadatum::Bytes(_)
                | Metadatum::Text(_)
                | Metadatum::Array(_)
                | Metadatum::Map(_) => None,
            }),
            Self::Int(_) | Self::Bytes(_) | Self::Text(_) | Self::Array(_) => None,
        }
    }
}

impl<'b, C> cbor::Decode<'b, C> for Metadatum {
    fn decode(d: &mut cbor::Decoder<'b>, ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        use cbor::Type::*;

        #[allow(clippy::wildcard_enum_match_arm)]
        match d.datatype()? {
            U8 | U16 | U32 | U64 | I8 | I16 | I32 | I64 | Int => {
                let i = d.decode()?;
                Ok(Metadatum::Int(i))
            }
            Bytes => Ok(Metadatum::Bytes(Vec::from(
                d.decode_with::<C, cbor::bytes::ByteVec>(ctx)?,
            ))),
            String => Ok(Metadatum::Text(d.decode_with(ctx)?)),
            Array | ArrayIndef => Ok(Metadatum::Array(d.decode_with(ctx)?)),
            Map | MapIndef => Ok(Metadatum::Map(d.decode_with(ctx)?)),
            any => Err(cbor::decode::Error::message(format!(
                "unexpected CBOR datatype {any:?} when decoding metadatum"
            ))),
        }
    }
}

impl<C> cbor::Encode<C> for Metadatum {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        match self {
            Metadatum::Int(a) => {
                e.encode_with(a, ctx)?;
            }
            Metadatum::Bytes(a) => {
                e.encode_with(<&cbor::bytes::ByteSlice>::from(a.as_slice()), ctx)?;
            }
            Metadatum::Text(a) => {
                e.encode_with(a, ctx)?;
            }
            Metadatum::Array(a) => {
                e.encode_with(a, ctx)?;
            }
            Metadatum::Map(a) => {
                e.encode_with(a, ctx)?;
            }
        };

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Metadatum;
    use crate::{from_cbor_no_leftovers, to_cbor};
    use pallas_codec::utils::KeyValuePairs;
    use test_case::test_case;

    fn int(n: i64) -> Metadatum {
        Metadatum::Int(crate::cbor::Int::from(n))
    }

    fn bytes(b: &[u8]) -> Metadatum {
        Metadatum::Bytes(b.to_vec())
    }

    #[test_case(int(42))]
    #[test_case(int(-14))]
    #[test_case(bytes(&[1, 2, 3]))]
    #[test_case(Metadatum::Text("catalyst".to_string()))]
    #[test_case(Metadatum::Array(vec![int(1), bytes(&[0xca, 0xfe])]))]
    #[test_case(Metadatum::Map(KeyValuePairs::Def(vec![(int(1), bytes(&[0x00]))])))]
    fn roundtrip(metadatum: Metadatum) {
        let encoded = to_cbor(&metadatum);
        assert_eq!(
            from_cbor_no_leftovers::<Metadatum>(&encoded).map_err(|e| e.to_string()),
            Ok(metadatum)
        );
    }

    #[test]
    fn lookup_finds_integer_keys() {
        let map = Metadatum::Map(KeyValuePairs::Def(vec![
            (int(1), bytes(&[0xaa])),
            (int(2), bytes(&[0xbb])),
        ]));

        assert_eq!(map.lookup(2), Some(&bytes(&[0xbb])));
        assert_eq!(map.lookup(3), None);
    }
}
