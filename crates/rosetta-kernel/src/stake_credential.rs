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

use crate::{Hash, cbor, size};

/// A staking credential: `[0, addr_keyhash] / [1, script_hash]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StakeCredential {
    AddrKeyhash(Hash<{ size::KEY }>),
    ScriptHash(Hash<{ size::SCRIPT }>),
}

impl StakeCredential {
    pub fn hash(&self) -> Hash<{ size::CREDENTIAL }> {
        match self {
            Self::AddrKeyhash(hash) => *hash,
            Self::ScriptHash(hash) => *hash,
        }
    }
}

impl<C> cbor::encode::Encode<C> for StakeCredential {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        e.array(2)?;
        match self {
            StakeCredential::AddrKeyhash(hash) => {
                e.u8(0)?;
                e.encode_with(hash, ctx)?;
            }
            StakeCredential::ScriptHash(hash) => {
                e.u8(1)?;
                e.encode_with(hash, ctx)?;
            }
        };

        Ok(())
    }
}

impl<'b, C> cbor::decode::Decode<'b, C> for StakeCredential {
    fn decode(d: &mut cbor::Decoder<'b>, ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        cbor::heterogeneous_array(d, |d, assert_len| {
            assert_len(2)?;
            match d.u8()? {
                0 => Ok(StakeCredential::AddrKeyhash(d.decode_with(ctx)?)),
                1 => Ok(StakeCredential::ScriptHash(d.decode_with(ctx)?)),
                tag => Err(cbor::decode::Error::message(format!(
                    "unknown stake credential discriminant {tag}"
                ))),
            }
        })
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use tests::*;

#[cfg(any(test, feature = "test-utils"))]
mod tests {
    use crate::{Hash, StakeCredential};
    use proptest::prelude::*;

    pub fn any_stake_credential() -> impl Strategy<Value = StakeCredential> {
        prop_oneof![
            any::<[u8; 28]>().prop_map(|hash| StakeCredential::AddrKeyhash(Hash::new(hash))),
            any::<[u8; 28]>().prop_map(|hash| StakeCredential::ScriptHash(Hash::new(hash))),
        ]
    }
}

#[cfg(test)]
mod unit_tests {
    use super::tests::any_stake_credential;
    use super::*;
    use crate::prop_cbor_roundtrip;

    prop_cbor_roundtrip!(StakeCredential, any_stake_credential());
}
