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
use pallas_codec::utils::{Bytes, Nullable};

pub type Port = u32;

/// A stake pool relay:
///
/// ```text
/// [0, port / nil, ipv4 / nil, ipv6 / nil]
/// [1, port / nil, dns_name]
/// [2, dns_name]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relay {
    SingleHostAddr(Nullable<Port>, Nullable<Bytes>, Nullable<Bytes>),
    SingleHostName(Nullable<Port>, String),
    MultiHostName(String),
}

impl<C> cbor::encode::Encode<C> for Relay {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        match self {
            Relay::SingleHostAddr(port, ipv4, ipv6) => {
                e.array(4)?;
                e.u8(0)?;
                e.encode_with(port, ctx)?;
                e.encode_with(ipv4, ctx)?;
                e.encode_with(ipv6, ctx)?;
            }
            Relay::SingleHostName(port, dns_name) => {
                e.array(3)?;
                e.u8(1)?;
                e.encode_with(port, ctx)?;
                e.encode_with(dns_name, ctx)?;
            }
            Relay::MultiHostName(dns_name) => {
                e.array(2)?;
                e.u8(2)?;
                e.encode_with(dns_name, ctx)?;
            }
        };

        Ok(())
    }
}

impl<'b, C> cbor::decode::Decode<'b, C> for Relay {
    fn decode(d: &mut cbor::Decoder<'b>, ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        cbor::heterogeneous_array(d, |d, assert_len| match d.u8()? {
            0 => {
                assert_len(4)?;
                Ok(Relay::SingleHostAddr(
                    d.decode_with(ctx)?,
                    d.decode_with(ctx)?,
                    d.decode_with(ctx)?,
                ))
            }
            1 => {
                assert_len(3)?;
                Ok(Relay::SingleHostName(
                    d.decode_with(ctx)?,
                    d.decode_with(ctx)?,
                ))
            }
            2 => {
                assert_len(2)?;
                Ok(Relay::MultiHostName(d.decode_with(ctx)?))
            }
            tag => Err(cbor::decode::Error::message(format!(
                "unknown relay discriminant {tag}"
            ))),
        })
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use tests::*;

#[cfg(any(test, feature = "test-utils"))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    pub fn any_nullable_port() -> impl Strategy<Value = Nullable<Port>> {
        prop_oneof![
            Just(Nullable::Null),
            (0u32..=u16::MAX as u32).prop_map(Nullable::Some),
        ]
    }

    fn any_nullable_ipv4() -> impl Strategy<Value = Nullable<Bytes>> {
        prop_oneof![
            Just(Nullable::Null),
            any::<[u8; 4]>().prop_map(|a| Nullable::Some(Vec::from(a).into())),
        ]
    }

    fn any_nullable_ipv6() -> impl Strategy<Value = Nullable<Bytes>> {
        prop_oneof![
            Just(Nullable::Null),
            any::<[u8; 16]>().prop_map(|a| Nullable::Some(Vec::from(a).into())),
        ]
    }

    pub fn any_relay() -> impl Strategy<Value = Relay> {
        prop_oneof![
            (any_nullable_port(), any_nullable_ipv4(), any_nullable_ipv6())
                .prop_map(|(port, ipv4, ipv6)| Relay::SingleHostAddr(port, ipv4, ipv6)),
            (any_nullable_port(), "[a-z]{1,12}\\.example")
                .prop_map(|(port, dns)| Relay::SingleHostName(port, dns)),
            "[a-z]{1,12}\\.example".prop_map(Relay::MultiHostName),
        ]
    }
}
