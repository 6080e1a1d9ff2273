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

/// The closed set of operation types this codec understands. Dispatching on
/// this enum is always exhaustive: a new operation type is a compile-time
/// change, not a default-branch fallthrough.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum OperationKind {
    #[serde(rename = "input")]
    Input,
    #[serde(rename = "output")]
    Output,
    #[serde(rename = "stakeKeyRegistration")]
    StakeKeyRegistration,
    #[serde(rename = "stakeKeyDeregistration")]
    StakeKeyDeregistration,
    #[serde(rename = "stakeDelegation")]
    StakeDelegation,
    #[serde(rename = "withdrawal")]
    Withdrawal,
    #[serde(rename = "poolRegistration")]
    PoolRegistration,
    #[serde(rename = "poolRegistrationWithCert")]
    PoolRegistrationWithCert,
    #[serde(rename = "poolRetirement")]
    PoolRetirement,
    #[serde(rename = "voteRegistration")]
    VoteRegistration,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
            Self::StakeKeyRegistration => "stakeKeyRegistration",
            Self::StakeKeyDeregistration => "stakeKeyDeregistration",
            Self::StakeDelegation => "stakeDelegation",
            Self::Withdrawal => "withdrawal",
            Self::PoolRegistration => "poolRegistration",
            Self::PoolRegistrationWithCert => "poolRegistrationWithCert",
            Self::PoolRetirement => "poolRetirement",
            Self::VoteRegistration => "voteRegistration",
        }
    }

    /// Operations whose metadata carries a staking credential.
    pub fn is_staking(&self) -> bool {
        matches!(
            self,
            Self::StakeKeyRegistration
                | Self::StakeKeyDeregistration
                | Self::StakeDelegation
                | Self::Withdrawal
        )
    }

    /// Operations acting on a stake pool (cold-key signed).
    pub fn is_pool(&self) -> bool {
        matches!(
            self,
            Self::PoolRegistration | Self::PoolRegistrationWithCert | Self::PoolRetirement
        )
    }

    /// Operations materialised as a certificate in the transaction body.
    pub fn is_certificate(&self) -> bool {
        matches!(
            self,
            Self::StakeKeyRegistration
                | Self::StakeKeyDeregistration
                | Self::StakeDelegation
                | Self::PoolRegistration
                | Self::PoolRegistrationWithCert
                | Self::PoolRetirement
        )
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OperationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "input" => Ok(Self::Input),
            "output" => Ok(Self::Output),
            "stakeKeyRegistration" => Ok(Self::StakeKeyRegistration),
            "stakeKeyDeregistration" => Ok(Self::StakeKeyDeregistration),
            "stakeDelegation" => Ok(Self::StakeDelegation),
            "withdrawal" => Ok(Self::Withdrawal),
            "poolRegistration" => Ok(Self::PoolRegistration),
            "poolRegistrationWithCert" => Ok(Self::PoolRegistrationWithCert),
            "poolRetirement" => Ok(Self::PoolRetirement),
            "voteRegistration" => Ok(Self::VoteRegistration),
            _ => Err(format!("invalid operation type {}", s)),
        }
    }
}

impl<C> cbor::encode::Encode<C> for OperationKind {
    fn encode<W: cbor::encode::Write>(
        &self,
        e: &mut cbor::Encoder<W>,
        _ctx: &mut C,
    ) -> Result<(), cbor::encode::Error<W::Error>> {
        e.str(self.as_str())?;
        Ok(())
    }
}

impl<'b, C> cbor::decode::Decode<'b, C> for OperationKind {
    fn decode(d: &mut cbor::Decoder<'b>, _ctx: &mut C) -> Result<Self, cbor::decode::Error> {
        d.str()?.parse().map_err(cbor::decode::Error::message)
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use tests::*;

#[cfg(any(test, feature = "test-utils"))]
mod tests {
    use super::OperationKind;
    use proptest::prelude::*;

    pub fn any_operation_kind() -> impl Strategy<Value = OperationKind> {
        prop_oneof![
            Just(OperationKind::Input),
            Just(OperationKind::Output),
            Just(OperationKind::StakeKeyRegistration),
            Just(OperationKind::StakeKeyDeregistration),
            Just(OperationKind::StakeDelegation),
            Just(OperationKind::Withdrawal),
            Just(OperationKind::PoolRegistration),
            Just(OperationKind::PoolRegistrationWithCert),
            Just(OperationKind::PoolRetirement),
            Just(OperationKind::VoteRegistration),
        ]
    }
}
