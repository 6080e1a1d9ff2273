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

pub use pallas_addresses::Network;

/// The set of networks this codec knows about. Address prefixes are purely
/// network-determined: mainnet uses the mainnet tag, every testnet (whatever
/// its magic) uses the testnet tag.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum NetworkName {
    Mainnet,
    Preprod,
    Preview,
    Testnet(u32),
}

pub const MAINNET_NETWORK_MAGIC: u32 = 764824073;
pub const PREPROD_NETWORK_MAGIC: u32 = 1;
pub const PREVIEW_NETWORK_MAGIC: u32 = 2;
pub const TESTNET_NETWORK_MAGIC: u32 = 1097911063;

impl NetworkName {
    /// The single-byte network discriminant found in address headers.
    pub fn network_id(&self) -> u8 {
        match self {
            Self::Mainnet => 1,
            Self::Preprod | Self::Preview | Self::Testnet(_) => 0,
        }
    }

    pub fn network_magic(&self) -> u32 {
        match self {
            Self::Mainnet => MAINNET_NETWORK_MAGIC,
            Self::Preprod => PREPROD_NETWORK_MAGIC,
            Self::Preview => PREVIEW_NETWORK_MAGIC,
            Self::Testnet(magic) => *magic,
        }
    }
}

impl std::fmt::Display for NetworkName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mainnet => write!(f, "mainnet"),
            Self::Preprod => write!(f, "preprod"),
            Self::Preview => write!(f, "preview"),
            Self::Testnet(magic) => write!(f, "testnet_{}", magic),
        }
    }
}

impl std::str::FromStr for NetworkName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(Self::Mainnet),
            "preprod" => Ok(Self::Preprod),
            "preview" => Ok(Self::Preview),
            _ => {
                let magic = s
                    .strip_prefix("testnet_")
                    .ok_or(format!("Invalid network name {}", s))?;

                magic
                    .parse::<u32>()
                    .map(NetworkName::Testnet)
                    .map_err(|e| e.to_string())
            }
        }
    }
}

impl From<NetworkName> for Network {
    fn from(value: NetworkName) -> Self {
        if value == NetworkName::Mainnet {
            Network::Mainnet
        } else {
            Network::Testnet
        }
    }
}

pub fn to_network_id(network: &Network) -> u8 {
    match network {
        Network::Mainnet => 1,
        Network::Testnet => 0,
        Network::Other(id) => *id,
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use tests::*;

#[cfg(any(test, feature = "test-utils"))]
mod tests {
    use super::NetworkName;
    use proptest::prelude::*;

    pub fn any_network_name() -> impl Strategy<Value = NetworkName> {
        prop_oneof![
            Just(NetworkName::Mainnet),
            Just(NetworkName::Preprod),
            Just(NetworkName::Preview),
            any::<u32>().prop_map(NetworkName::Testnet),
        ]
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use std::str::FromStr;
    use test_case::test_case;

    #[test_case(NetworkName::Mainnet, 1)]
    #[test_case(NetworkName::Preprod, 0)]
    #[test_case(NetworkName::Preview, 0)]
    #[test_case(NetworkName::Testnet(42), 0)]
    fn network_id(network: NetworkName, expected: u8) {
        assert_eq!(network.network_id(), expected);
    }

    #[test]
    fn display_roundtrip() {
        for network in [
            NetworkName::Mainnet,
            NetworkName::Preprod,
            NetworkName::Preview,
            NetworkName::Testnet(1097911063),
        ] {
            assert_eq!(
                NetworkName::from_str(&network.to_string()),
                Ok(network),
                "{network}"
            );
        }
    }
}
