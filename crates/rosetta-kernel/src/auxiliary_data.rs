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
use pallas_codec::utils::KeyValuePairs;

pub type MetadatumLabel = u64;

pub type Metadata = KeyValuePairs<MetadatumLabel, Metadatum>;

/// Transaction auxiliary data. Constructed transactions only ever carry
/// labelled metadata, serialised in the `[metadata, auxiliary_scripts]` array
/// form with an empty script list. The decoder additionally accepts the bare
/// metadata map of the earliest era, and the tagged map of later eras (label
/// 0 holding the metadata).
#[derive(Debug, Clone, PartialEq)]
pub struct AuxiliaryData {
    pub metadata: Metadata,
}

impl AuxiliaryData {
    pub fn new(metadata: Vec<(MetadatumLabel, Metadatum)>) -> Self {
        AuxiliaryData {
            metadata: KeyValuePairs::Def(metadata),
        }
    }

    /// The metadatum registered under a given label, if any.
    pub fn label(&self, label: MetadatumLabel) -> Option<&Metadatum> {
        self.metadata
            .iter()
            .find_map(|(k, v)| (*k == label).then_some(v))
    }
}

impl<C> cbor::encode::Encode<C> for AuxiliaryData {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        e.array(2)?;
        e.encode_with(&self.metadata, ctx)?;
        e.array(0)?;
        Ok(())
    }
}

impl<'b, C> cbor::decode::Decode<'b, C> for AuxiliaryData {
    fn decode(d: &mut cbor::Decoder<'b>, ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        use cbor::Type::*;

        #[allow(clippy::wildcard_enum_match_arm)]
        match d.datatype()? {
            Map | MapIndef => Ok(AuxiliaryData {
                metadata: d.decode_with(ctx)?,
            }),
            Array | ArrayIndef => {
                let len = d.array()?;

                if len == Some(0) {
                    return Err(cbor::decode::Error::message(
                        "empty array when decoding auxiliary data",
                    ));
                }

                let metadata = d.decode_with(ctx)?;

                match len {
                    Some(len) => {
                        for _ in 1..len {
                            d.skip()?;
                        }
                    }
                    None => {
                        while !cbor::decode_break(d, len)? {
                            d.skip()?;
                        }
                    }
                }

                Ok(AuxiliaryData { metadata })
            }
            Tag => {
                let _tag = d.tag()?;
                let metadata = cbor::heterogeneous_map(
                    d,
                    None,
                    |d| d.u8(),
                    |d, metadata: &mut Option<Metadata>, key| {
                        match key {
                            0 => *metadata = Some(d.decode_with(ctx)?),
                            _ => d.skip()?,
                        }
                        Ok(())
                    },
                )?;

                Ok(AuxiliaryData {
                    metadata: metadata.unwrap_or(KeyValuePairs::Def(vec![])),
                })
            }
            any => Err(cbor::decode::Error::message(format!(
                "unexpected CBOR datatype {any:?} when decoding auxiliary data"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{from_cbor_no_leftovers, to_cbor};

    fn fixture() -> AuxiliaryData {
        AuxiliaryData::new(vec![(
            674,
            Metadatum::Text("msg".to_string()),
        )])
    }

    #[test]
    fn roundtrip_array_form() {
        let aux = fixture();
        assert_eq!(
            from_cbor_no_leftovers::<AuxiliaryData>(&to_cbor(&aux)).map_err(|e| e.to_string()),
            Ok(aux)
        );
    }

    #[test]
    fn decodes_bare_metadata_map() {
        let aux = fixture();
        let bytes = to_cbor(&aux.metadata);
        assert_eq!(
            from_cbor_no_leftovers::<AuxiliaryData>(&bytes).map_err(|e| e.to_string()),
            Ok(aux)
        );
    }

    #[test]
    fn label_lookup() {
        let aux = fixture();
        assert!(aux.label(674).is_some());
        assert!(aux.label(675).is_none());
    }
}
