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

use crate::{Epoch, PoolId, PoolParams, StakeCredential, cbor};

/// The certificates a transaction can carry. Each variant maps to one wire
/// discriminant:
///
/// ```text
/// [0, stake_credential]
/// [1, stake_credential]
/// [2, stake_credential, pool_keyhash]
/// [3, ...pool_params]
/// [4, pool_keyhash, epoch]
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Certificate {
    StakeRegistration(StakeCredential),
    StakeDeregistration(StakeCredential),
    StakeDelegation(StakeCredential, PoolId),
    PoolRegistration(PoolParams),
    PoolRetirement(PoolId, Epoch),
}

impl<C> cbor::encode::Encode<C> for Certificate {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        match self {
            Certificate::StakeRegistration(credential) => {
                e.array(2)?;
                e.u8(0)?;
                e.encode_with(credential, ctx)?;
            }
            Certificate::StakeDeregistration(credential) => {
                e.array(2)?;
                e.u8(1)?;
                e.encode_with(credential, ctx)?;
            }
            Certificate::StakeDelegation(credential, pool_id) => {
                e.array(3)?;
                e.u8(2)?;
                e.encode_with(credential, ctx)?;
                e.encode_with(pool_id, ctx)?;
            }
            Certificate::PoolRegistration(params) => {
                e.array(1 + PoolParams::FIELDS)?;
                e.u8(3)?;
                params.encode_fields(e, ctx)?;
            }
            Certificate::PoolRetirement(pool_id, epoch) => {
                e.array(3)?;
                e.u8(4)?;
                e.encode_with(pool_id, ctx)?;
                e.encode_with(epoch, ctx)?;
            }
        };

        Ok(())
    }
}

impl<'b, C> cbor::decode::Decode<'b, C> for Certificate {
    fn decode(d: &mut cbor::Decoder<'b>, ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        cbor::heterogeneous_array(d, |d, assert_len| match d.u8()? {
            0 => {
                assert_len(2)?;
                Ok(Certificate::StakeRegistration(d.decode_with(ctx)?))
            }
            1 => {
                assert_len(2)?;
                Ok(Certificate::StakeDeregistration(d.decode_with(ctx)?))
            }
            2 => {
                assert_len(3)?;
                Ok(Certificate::StakeDelegation(
                    d.decode_with(ctx)?,
                    d.decode_with(ctx)?,
                ))
            }
            3 => {
                assert_len(1 + PoolParams::FIELDS)?;
                Ok(Certificate::PoolRegistration(PoolParams::decode_fields(
                    d, ctx,
                )?))
            }
            4 => {
                assert_len(3)?;
                Ok(Certificate::PoolRetirement(
                    d.decode_with(ctx)?,
                    d.decode_with(ctx)?,
                ))
            }
            tag => Err(cbor::decode::Error::message(format!(
                "unknown certificate discriminant {tag}"
            ))),
        })
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use tests::*;

#[cfg(any(test, feature = "test-utils"))]
mod tests {
    use super::*;
    use crate::{any_hash28, any_pool_params, any_stake_credential};
    use proptest::prelude::*;

    pub fn any_certificate() -> impl Strategy<Value = Certificate> {
        prop_oneof![
            any_stake_credential().prop_map(Certificate::StakeRegistration),
            any_stake_credential().prop_map(Certificate::StakeDeregistration),
            (any_stake_credential(), any_hash28())
                .prop_map(|(credential, pool)| Certificate::StakeDelegation(credential, pool)),
            any_pool_params().prop_map(Certificate::PoolRegistration),
            (any_hash28(), any::<u64>())
                .prop_map(|(pool, epoch)| Certificate::PoolRetirement(pool, epoch)),
        ]
    }
}

#[cfg(test)]
mod unit_tests {
    use super::tests::any_certificate;
    use super::*;
    use crate::prop_cbor_roundtrip;

    prop_cbor_roundtrip!(Certificate, any_certificate());
}
