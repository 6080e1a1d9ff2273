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

/// The structured (non-certificate-hex) form of a pool registration:
/// `{vrf_key_hash, reward_address, pledge, cost, pool_owners, relays,
/// ?margin, ?margin_percentage, ?pool_metadata}`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PoolRegistrationParams {
    pub vrf_key_hash: String,
    pub reward_address: String,
    pub pledge: String,
    pub cost: String,
    pub pool_owners: Vec<String>,
    pub relays: Vec<PoolRelay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<PoolMargin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_percentage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_metadata: Option<PoolMetadataParams>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PoolMargin {
    pub numerator: String,
    pub denominator: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PoolMetadataParams {
    pub url: String,
    pub hash: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RelayKind {
    #[serde(rename = "single_host_addr")]
    SingleHostAddr,
    #[serde(rename = "single_host_name")]
    SingleHostName,
    #[serde(rename = "multi_host_name")]
    MultiHostName,
}

impl RelayKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SingleHostAddr => "single_host_addr",
            Self::SingleHostName => "single_host_name",
            Self::MultiHostName => "multi_host_name",
        }
    }
}

impl std::str::FromStr for RelayKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single_host_addr" => Ok(Self::SingleHostAddr),
            "single_host_name" => Ok(Self::SingleHostName),
            "multi_host_name" => Ok(Self::MultiHostName),
            _ => Err(format!("invalid relay type {}", s)),
        }
    }
}

/// A relay declaration: `{type, ?ipv4, ?ipv6, ?dns_name, ?port}`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PoolRelay {
    #[serde(rename = "type")]
    pub kind: RelayKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv4: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
}

impl<C> cbor::encode::Encode<C> for PoolRegistrationParams {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        let len = 6
            + u64::from(self.margin.is_some())
            + u64::from(self.margin_percentage.is_some())
            + u64::from(self.pool_metadata.is_some());
        e.map(len)?;
        e.str("vrf_key_hash")?;
        e.str(&self.vrf_key_hash)?;
        e.str("reward_address")?;
        e.str(&self.reward_address)?;
        e.str("pledge")?;
        e.str(&self.pledge)?;
        e.str("cost")?;
        e.str(&self.cost)?;
        e.str("pool_owners")?;
        e.encode_with(&self.pool_owners, ctx)?;
        e.str("relays")?;
        e.encode_with(&self.relays, ctx)?;
        if let Some(margin) = &self.margin {
            e.str("margin")?;
            e.encode_with(margin, ctx)?;
        }
        if let Some(margin_percentage) = &self.margin_percentage {
            e.str("margin_percentage")?;
            e.str(margin_percentage)?;
        }
        if let Some(pool_metadata) = &self.pool_metadata {
            e.str("pool_metadata")?;
            e.encode_with(pool_metadata, ctx)?;
        }
        Ok(())
    }
}

type PoolRegistrationParamsFields = (
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<Vec<String>>,
    Option<Vec<PoolRelay>>,
    Option<PoolMargin>,
    Option<String>,
    Option<PoolMetadataParams>,
);

impl<'b, C> cbor::decode::Decode<'b, C> for PoolRegistrationParams {
    fn decode(d: &mut cbor::Decoder<'b>, ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        let fields = cbor::heterogeneous_map(
            d,
            PoolRegistrationParamsFields::default(),
            |d| d.str().map(|s| s.to_owned()),
            |d, state: &mut PoolRegistrationParamsFields, key| {
                match key.as_str() {
                    "vrf_key_hash" => state.0 = Some(d.str()?.to_owned()),
                    "reward_address" => state.1 = Some(d.str()?.to_owned()),
                    "pledge" => state.2 = Some(d.str()?.to_owned()),
                    "cost" => state.3 = Some(d.str()?.to_owned()),
                    "pool_owners" => state.4 = Some(d.decode_with(ctx)?),
                    "relays" => state.5 = Some(d.decode_with(ctx)?),
                    "margin" => state.6 = Some(d.decode_with(ctx)?),
                    "margin_percentage" => state.7 = Some(d.str()?.to_owned()),
                    "pool_metadata" => state.8 = Some(d.decode_with(ctx)?),
                    _ => d.skip()?,
                }
                Ok(())
            },
        )?;

        Ok(PoolRegistrationParams {
            vrf_key_hash: fields
                .0
                .ok_or_else(|| cbor::missing_field::<Self>("vrf_key_hash"))?,
            reward_address: fields
                .1
                .ok_or_else(|| cbor::missing_field::<Self>("reward_address"))?,
            pledge: fields.2.ok_or_else(|| cbor::missing_field::<Self>("pledge"))?,
            cost: fields.3.ok_or_else(|| cbor::missing_field::<Self>("cost"))?,
            pool_owners: fields.4.unwrap_or_default(),
            relays: fields.5.unwrap_or_default(),
            margin: fields.6,
            margin_percentage: fields.7,
            pool_metadata: fields.8,
        })
    }
}

impl<C> cbor::encode::Encode<C> for PoolMargin {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        _ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        e.map(2)?;
        e.str("numerator")?;
        e.str(&self.numerator)?;
        e.str("denominator")?;
        e.str(&self.denominator)?;
        Ok(())
    }
}

impl<'b, C> cbor::decode::Decode<'b, C> for PoolMargin {
    fn decode(d: &mut cbor::Decoder<'b>, _ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        let (numerator, denominator) = cbor::heterogeneous_map(
            d,
            (None, None),
            |d| d.str().map(|s| s.to_owned()),
            |d, state: &mut (Option<String>, Option<String>), key| {
                match key.as_str() {
                    "numerator" => state.0 = Some(d.str()?.to_owned()),
                    "denominator" => state.1 = Some(d.str()?.to_owned()),
                    _ => d.skip()?,
                }
                Ok(())
            },
        )?;

        Ok(PoolMargin {
            numerator: numerator.ok_or_else(|| cbor::missing_field::<Self>("numerator"))?,
            denominator: denominator
                .ok_or_else(|| cbor::missing_field::<Self>("denominator"))?,
        })
    }
}

impl<C> cbor::encode::Encode<C> for PoolMetadataParams {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        _ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        e.map(2)?;
        e.str("url")?;
        e.str(&self.url)?;
        e.str("hash")?;
        e.str(&self.hash)?;
        Ok(())
    }
}

impl<'b, C> cbor::decode::Decode<'b, C> for PoolMetadataParams {
    fn decode(d: &mut cbor::Decoder<'b>, _ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        let (url, hash) = cbor::heterogeneous_map(
            d,
            (None, None),
            |d| d.str().map(|s| s.to_owned()),
            |d, state: &mut (Option<String>, Option<String>), key| {
                match key.as_str() {
                    "url" => state.0 = Some(d.str()?.to_owned()),
                    "hash" => state.1 = Some(d.str()?.to_owned()),
                    _ => d.skip()?,
                }
                Ok(())
            },
        )?;

        Ok(PoolMetadataParams {
            url: url.ok_or_else(|| cbor::missing_field::<Self>("url"))?,
            hash: hash.ok_or_else(|| cbor::missing_field::<Self>("hash"))?,
        })
    }
}

impl<C> cbor::encode::Encode<C> for PoolRelay {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        _ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        let len = 1
            + u64::from(self.ipv4.is_some())
            + u64::from(self.ipv6.is_some())
            + u64::from(self.dns_name.is_some())
            + u64::from(self.port.is_some());
        e.map(len)?;
        e.str("type")?;
        e.str(self.kind.as_str())?;
        if let Some(ipv4) = &self.ipv4 {
            e.str("ipv4")?;
            e.str(ipv4)?;
        }
        if let Some(ipv6) = &self.ipv6 {
            e.str("ipv6")?;
            e.str(ipv6)?;
        }
        if let Some(dns_name) = &self.dns_name {
            e.str("dns_name")?;
            e.str(dns_name)?;
        }
        if let Some(port) = &self.port {
            e.str("port")?;
            e.str(port)?;
        }
        Ok(())
    }
}

type PoolRelayFields = (
    Option<RelayKind>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
);

impl<'b, C> cbor::decode::Decode<'b, C> for PoolRelay {
    fn decode(d: &mut cbor::Decoder<'b>, _ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        let fields = cbor::heterogeneous_map(
            d,
            PoolRelayFields::default(),
            |d| d.str().map(|s| s.to_owned()),
            |d, state: &mut PoolRelayFields, key| {
                match key.as_str() {
                    "type" => {
                        state.0 =
                            Some(d.str()?.parse().map_err(cbor::decode::Error::message)?)
                    }
                    "ipv4" => state.1 = Some(d.str()?.to_owned()),
                    "ipv6" => state.2 = Some(d.str()?.to_owned()),
                    "dns_name" => state.3 = Some(d.str()?.to_owned()),
                    "port" => state.4 = Some(d.str()?.to_owned()),
                    _ => d.skip()?,
                }
                Ok(())
            },
        )?;

        Ok(PoolRelay {
            kind: fields.0.ok_or_else(|| cbor::missing_field::<Self>("type"))?,
            ipv4: fields.1,
            ipv6: fields.2,
            dns_name: fields.3,
            port: fields.4,
        })
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use tests::*;

#[cfg(any(test, feature = "test-utils"))]
mod tests {
    use super::*;
    use proptest::{collection, prelude::*, prop_compose};

    pub fn any_pool_relay() -> impl Strategy<Value = PoolRelay> {
        prop_oneof![
            (any::<[u8; 4]>(), 1u16..=u16::MAX).prop_map(|(ip, port)| PoolRelay {
                kind: RelayKind::SingleHostAddr,
                ipv4: Some(format!("{}.{}.{}.{}", ip[0], ip[1], ip[2], ip[3])),
                ipv6: None,
                dns_name: None,
                port: Some(port.to_string()),
            }),
            ("[a-z]{1,12}\\.example", 1u16..=u16::MAX).prop_map(|(dns, port)| PoolRelay {
                kind: RelayKind::SingleHostName,
                ipv4: None,
                ipv6: None,
                dns_name: Some(dns),
                port: Some(port.to_string()),
            }),
            "[a-z]{1,12}\\.example".prop_map(|dns| PoolRelay {
                kind: RelayKind::MultiHostName,
                ipv4: None,
                ipv6: None,
                dns_name: Some(dns),
                port: None,
            }),
        ]
    }

    prop_compose! {
        pub fn any_pool_registration_params()(
            vrf_key_hash in any::<[u8; 32]>(),
            reward_hash in any::<[u8; 28]>(),
            pledge in 0u64..=1_000_000_000,
            cost in 0u64..=1_000_000_000,
            owners in collection::vec(any::<[u8; 28]>(), 0..=2),
            relays in collection::vec(any_pool_relay(), 1..=2),
            numerator in 0u64..=100,
            denominator in 1u64..=100,
        ) -> PoolRegistrationParams {
            // NOTE: addresses here are structurally valid reward addresses of the
            // test network; strategies composing full operations re-derive them.
            let reward_address = {
                let mut bytes = vec![0xe0];
                bytes.extend_from_slice(&reward_hash);
                pallas_addresses::Address::from_bytes(&bytes)
                    .ok()
                    .and_then(|address| address.to_bech32().ok())
                    .unwrap_or_default()
            };
            PoolRegistrationParams {
                vrf_key_hash: hex::encode(vrf_key_hash),
                reward_address,
                pledge: pledge.to_string(),
                cost: cost.to_string(),
                pool_owners: owners.iter().map(hex::encode).collect(),
                relays,
                margin: Some(PoolMargin {
                    numerator: numerator.to_string(),
                    denominator: denominator.to_string(),
                }),
                margin_percentage: None,
                pool_metadata: None,
            }
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::tests::any_pool_registration_params;
    use super::*;
    use crate::prop_cbor_roundtrip;

    prop_cbor_roundtrip!(PoolRegistrationParams, any_pool_registration_params());
}
