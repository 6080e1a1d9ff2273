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

//! The data model shared by the construction codec: the Rosetta operation
//! types and their wire (CBOR map) encoding, and the subset of the ledger's
//! binary transaction shapes a constructed transaction can carry.

pub use pallas_addresses::{
    Address, ByronAddress, Error as AddressDecodingError, ShelleyAddress, ShelleyDelegationPart,
    ShelleyPaymentPart, StakeAddress, StakePayload,
};

pub use pallas_codec::utils::{Bytes, KeyValuePairs, Nullable};

pub use pallas_primitives::conway::RationalNumber;

pub mod cbor;
pub use cbor::{from_cbor, from_cbor_no_leftovers, to_cbor};

pub mod macros;

pub mod account;
pub use account::{AccountIdentifier, AccountIdentifierMetadata, SubAccountIdentifier};

pub mod amount;
pub use amount::{
    ADA, ADA_DECIMALS, Amount, Currency, CurrencyMetadata, EMPTY_SYMBOL, MULTI_ASSET_DECIMALS,
};

pub mod auxiliary_data;
pub use auxiliary_data::{AuxiliaryData, Metadata, MetadatumLabel};

pub mod certificate;
pub use certificate::Certificate;

pub mod coin_change;
pub use coin_change::{CoinAction, CoinChange, CoinIdentifier};

pub mod envelope;
pub use envelope::{TransactionEnvelope, TransactionExtraData};

pub mod epoch;
pub use epoch::Epoch;

pub mod hash;
pub use hash::{Hash, Hasher, PolicyId, PoolId, TransactionId, size};

pub mod lovelace;
pub use lovelace::Lovelace;

pub mod metadatum;
pub use metadatum::Metadatum;

pub mod network;
pub use network::{
    MAINNET_NETWORK_MAGIC, Network, NetworkName, PREPROD_NETWORK_MAGIC, PREVIEW_NETWORK_MAGIC,
    TESTNET_NETWORK_MAGIC, to_network_id,
};

pub mod operation;
pub use operation::Operation;

pub mod operation_id;
pub use operation_id::OperationId;

pub mod operation_kind;
pub use operation_kind::OperationKind;

pub mod operation_metadata;
pub use operation_metadata::OperationMetadata;

pub mod pool_metadata;
pub use pool_metadata::PoolMetadata;

pub mod pool_params;
pub use pool_params::PoolParams;

pub mod pool_registration_params;
pub use pool_registration_params::{
    PoolMargin, PoolMetadataParams, PoolRegistrationParams, PoolRelay, RelayKind,
};

pub mod public_key;
pub use public_key::{CurveType, PublicKey};

pub mod relay;
pub use relay::{Port, Relay};

pub mod reward_account;
pub use reward_account::RewardAccount;

pub mod stake_credential;
pub use stake_credential::StakeCredential;

pub mod token_bundle;
pub use token_bundle::TokenBundleItem;

pub mod transaction;
pub use transaction::Transaction;

pub mod transaction_body;
pub use transaction_body::TransactionBody;

pub mod transaction_input;
pub use transaction_input::TransactionInput;

pub mod transaction_output;
pub use transaction_output::TransactionOutput;

pub mod value;
pub use value::{AssetName, Multiasset, Value};

pub mod vote_registration_metadata;
pub use vote_registration_metadata::VoteRegistrationMetadata;

#[cfg(any(test, feature = "test-utils"))]
pub use {
    account::any_account_identifier,
    amount::{any_asset_amount, any_lovelace_amount},
    certificate::any_certificate,
    coin_change::any_coin_change,
    hash::{any_hash28, any_hash32},
    network::any_network_name,
    operation::any_operation,
    operation_id::any_operation_id,
    operation_kind::any_operation_kind,
    pool_metadata::any_pool_metadata,
    pool_params::{any_pool_params, any_rational_number, any_reward_account},
    pool_registration_params::{any_pool_registration_params, any_pool_relay},
    public_key::any_public_key,
    relay::{any_nullable_port, any_relay},
    stake_credential::any_stake_credential,
    token_bundle::any_token_bundle_item,
    transaction_body::any_transaction_body,
    transaction_input::any_transaction_input,
    transaction_output::any_transaction_output,
    value::{any_asset_name, any_multiasset, any_value},
    vote_registration_metadata::any_vote_registration_metadata,
};
