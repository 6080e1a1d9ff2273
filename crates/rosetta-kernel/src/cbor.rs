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

//! A thin facade over `minicbor`, plus a handful of decoding combinators for
//! heterogeneous CBOR structures (definite or indefinite arrays and maps with
//! fields of distinct types). Decoders in this workspace are schema-driven:
//! they declare which fields they expect and fail with a field-identified
//! error instead of walking maps positionally.

pub use minicbor::{
    CborLen, Decode, Decoder, Encode, Encoder, bytes,
    data::{self, IanaTag, Int, Tag, Type},
    decode, display, encode, to_vec,
};

use std::{convert::Infallible, fmt::Display};

#[allow(clippy::unwrap_used)]
/// Encode any serialisable value `T` into bytes.
pub fn to_cbor<T: Encode<()>>(value: &T) -> Vec<u8> {
    let mut buffer = Vec::new();
    let result: Result<(), encode::Error<Infallible>> = minicbor::encode(value, &mut buffer);
    result.unwrap(); // Infallible
    buffer
}

/// Decode raw bytes into a structured type `T`, assuming no context.
pub fn from_cbor<T: for<'d> Decode<'d, ()>>(bytes: &[u8]) -> Option<T> {
    minicbor::decode(bytes).ok()
}

/// Decode a CBOR input, ensuring that there are no bytes leftovers once decoded. This is handy to
/// test standalone decoders and ensures that they entirely consume their inputs.
pub fn from_cbor_no_leftovers<T: for<'d> Decode<'d, ()>>(
    bytes: &[u8],
) -> Result<T, decode::Error> {
    minicbor::decode(bytes).map(|NoLeftovers(inner)| inner)
}

#[repr(transparent)]
struct NoLeftovers<A>(A);

impl<'a, C, A: Decode<'a, C>> Decode<'a, C> for NoLeftovers<A> {
    fn decode(d: &mut Decoder<'a>, ctx: &mut C) -> Result<Self, decode::Error> {
        let inner = d.decode_with(ctx)?;

        if !d.datatype().is_err_and(|e| e.is_end_of_input()) {
            return Err(decode::Error::message(format!(
                "leftovers bytes after decoding after position {}",
                d.position()
            )));
        }

        Ok(NoLeftovers(inner))
    }
}

/// Consume a `Break` token, if any. Rogue breaks inside definite structures are an error.
pub fn decode_break(d: &mut Decoder<'_>, len: Option<u64>) -> Result<bool, decode::Error> {
    if d.datatype()? == Type::Break {
        if len.is_some() {
            return Err(decode::Error::type_mismatch(Type::Break));
        }

        d.skip()?;

        return Ok(true);
    }

    Ok(false)
}

/// Decode any heterogeneous CBOR array, irrespective of whether it is indefinite or definite.
///
/// The callback receives the decoder and an assertion on the advertised length, so that
/// fixed-shape decoders can check they are given the number of elements they expect.
pub fn heterogeneous_array<'d, A>(
    d: &mut Decoder<'d>,
    elems: impl FnOnce(
        &mut Decoder<'d>,
        &dyn Fn(u64) -> Result<(), decode::Error>,
    ) -> Result<A, decode::Error>,
) -> Result<A, decode::Error> {
    let len = d.array()?;

    match len {
        None => {
            let result = elems(d, &|_| Ok(()))?;
            decode_break(d, len)?;
            Ok(result)
        }
        Some(len) => elems(
            d,
            &(move |expected_len| {
                if len != expected_len {
                    return Err(decode::Error::message(format!(
                        "CBOR array length mismatch: expected {} got {}",
                        expected_len, len
                    )));
                }

                Ok(())
            }),
        ),
    }
}

/// Decode any heterogeneous CBOR map, irrespective of whether it is indefinite or definite.
///
/// A good choice for `S` is generally a tuple of `Option` for each field that needs
/// decoding; `decode_value` fills the state as keys come in, and the caller checks
/// mandatory fields afterwards with [`missing_field`].
pub fn heterogeneous_map<K, S>(
    d: &mut Decoder<'_>,
    mut state: S,
    decode_key: impl Fn(&mut Decoder<'_>) -> Result<K, decode::Error>,
    mut decode_value: impl FnMut(&mut Decoder<'_>, &mut S, K) -> Result<(), decode::Error>,
) -> Result<S, decode::Error> {
    let len = d.map()?;

    let mut n = 0;
    while len.is_none() || Some(n) < len {
        if decode_break(d, len)? {
            break;
        }

        let k = decode_key(d)?;
        decode_value(d, &mut state, k)?;

        n += 1;
    }

    Ok(state)
}

/// Yield a comprehensible error message when an expected field is missing from a map.
pub fn missing_field<C: ?Sized>(field: impl Display) -> decode::Error {
    decode::Error::message(format!(
        "missing mandatory field '{field}' in <{}> CBOR map",
        std::any::type_name::<C>(),
    ))
}

/// Yield a `Result<_, decode::Error>` that always fails with a comprehensible error message when a
/// map key is unexpected.
pub fn unexpected_field<C: ?Sized, A>(field: impl Display) -> Result<A, decode::Error> {
    Err(decode::Error::message(format!(
        "unexpected field '{field}' in <{}> CBOR map",
        std::any::type_name::<C>(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Pair {
        left: u8,
        right: u8,
    }

    impl<C> Encode<C> for Pair {
        fn encode<W: encode::Write>(
            &self,
            e: &mut Encoder<W>,
            ctx: &mut C,
        ) -> Result<(), encode::Error<W::Error>> {
            e.array(2)?;
            e.encode_with(self.left, ctx)?;
            e.encode_with(self.right, ctx)?;
            Ok(())
        }
    }

    impl<'d, C> Decode<'d, C> for Pair {
        fn decode(d: &mut Decoder<'d>, ctx: &mut C) -> Result<Self, decode::Error> {
            heterogeneous_array(d, |d, assert_len| {
                assert_len(2)?;
                Ok(Pair {
                    left: d.decode_with(ctx)?,
                    right: d.decode_with(ctx)?,
                })
            })
        }
    }

    #[test]
    fn roundtrip_definite_array() {
        let pair = Pair { left: 14, right: 42 };
        assert_eq!(Some(pair), from_cbor(&to_cbor(&pair)));
    }

    #[test]
    fn decode_indefinite_array() {
        // 9f 0e 18 2a ff := [_ 14, 42]
        let bytes = [0x9f, 0x0e, 0x18, 0x2a, 0xff];
        assert_eq!(
            Some(Pair { left: 14, right: 42 }),
            from_cbor::<Pair>(&bytes)
        );
    }

    #[test]
    fn reject_array_length_mismatch() {
        // 83 0e 18 2a 00 := [14, 42, 0]
        let bytes = [0x83, 0x0e, 0x18, 0x2a, 0x00];
        assert!(from_cbor_no_leftovers::<Pair>(&bytes).is_err());
    }

    #[test]
    fn from_cbor_no_leftovers_catches_trailing_bytes() {
        let mut bytes = to_cbor(&Pair { left: 1, right: 2 });
        bytes.push(0x00);
        assert!(from_cbor_no_leftovers::<Pair>(&bytes).is_err());
    }

    #[test]
    fn heterogeneous_map_collects_known_keys_and_skips_unknown() {
        // a3 617802 617905 617a07 := {"x": 2, "y": 5, "z": 7}
        let bytes = [
            0xa3, 0x61, 0x78, 0x02, 0x61, 0x79, 0x05, 0x61, 0x7a, 0x07,
        ];
        let mut d = Decoder::new(&bytes);
        let (x, y) = heterogeneous_map(
            &mut d,
            (None, None),
            |d| d.str().map(|s| s.to_owned()),
            |d, state: &mut (Option<u8>, Option<u8>), key| {
                match key.as_str() {
                    "x" => state.0 = Some(d.decode()?),
                    "y" => state.1 = Some(d.decode()?),
                    _ => d.skip()?,
                }
                Ok(())
            },
        )
        .map_err(|e| e.to_string())
        .unwrap();

        assert_eq!((x, y), (Some(2), Some(5)));
    }
}
