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

//! The Rosetta Construction codec for Cardano: a bidirectional mapping
//! between operation lists and the ledger's binary transaction encoding.
//!
//! The build direction validates every operation field, assembles the
//! transaction body sections in ledger order, and emits the body bytes next
//! to an extra-data envelope (the information the binary format cannot
//! carry). The parse direction walks a transaction back into operations,
//! reusing the envelope to restore addresses and statuses, and resolves the
//! set of addresses required to sign.
//!
//! Everything in this crate is a synchronous pure function over immutable
//! inputs; failures are terminal typed errors and partial results are never
//! produced.

pub mod address;
pub mod assembler;
pub mod certificates;
pub mod inputs;
pub mod multiasset;
pub mod outputs;
pub mod signers;
pub mod validate;
pub mod vote_registration;
pub mod withdrawals;

pub use assembler::{
    BuildError, DepositParameters, ParseError, ParsedTransaction, UnsignedTransaction,
    build_transaction, parse_transaction,
};
pub use signers::required_signers;
