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
use pallas_codec::utils::Bytes;

/// Off-chain pool metadata reference: `[url, metadata_hash]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolMetadata {
    pub url: String,
    pub hash: Bytes,
}

impl<C> cbor::encode::Encode<C> for PoolMetadata {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        e.array(2)?;
        e.encode_with(&self.url, ctx)?;
        e.encode_with(&self.hash, ctx)?;
        Ok(())
    }
}

impl<'b, C> cbor::decode::Decode<'b, C> for PoolMetadata {
    fn decode(d: &mut cbor::Decoder<'b>, ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        cbor::heterogeneous_array(d, |d, assert_len| {
            assert_len(2)?;
            Ok(PoolMetadata {
                url: d.decode_with(ctx)?,
                hash: d.decode_with(ctx)?,
            })
        })
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use tests::*;

#[cfg(any(test, feature = "test-utils"))]
mod tests {
    use super::*;
    use proptest::{collection, prelude::*, prop_compose};

    prop_compose! {
        pub fn any_pool_metadata()(
            url in "https://[a-z]{1,12}\\.example",
            hash in collection::vec(any::<u8>(), 32),
        ) -> PoolMetadata {
            PoolMetadata { url, hash: Bytes::from(hash) }
        }
    }
}
