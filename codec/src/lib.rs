// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Lumen Codec
//!
//! The binary core of a ledger client: it turns typed operations into the
//! exact bytes validators expect, and turns those bytes back into types.
//! Everything else a wallet does (signing, submission, sequence numbers)
//! sits on top of this crate and hands it values it has already checked.
//!
//! One wrong byte here does not fail locally. It produces a transaction the
//! network rejects, or worse, a signed one that says something other than
//! what the user meant. So the codec is strict: amounts never round,
//! unknown discriminants are errors, and trailing bytes are refused.
//!
//! ## Architecture
//!
//! - **config** — Wire constants, discriminants, limits, flag masks.
//! - **error** — The single [`CodecError`] taxonomy.
//! - **xdr** — Reader/writer primitives and the [`WriteXdr`]/[`ReadXdr`] traits.
//! - **amount** — Decimal text <-> stroops (`i64` scaled by `10^7`).
//! - **account** — `G...` account ids and `G...`/`M...` muxed accounts.
//! - **asset** — Native and credit assets, prices, pool parameters.
//! - **operation** — The operation union, every payload, and the builder.
//!
//! ## Thread Safety
//!
//! Every value is immutable after construction. The only interior state is
//! the memoized text form of a muxed account, written once through a
//! `OnceLock`. All public types are `Send + Sync`.

pub mod account;
pub mod amount;
pub mod asset;
pub mod config;
pub mod error;
pub mod operation;
pub mod xdr;

pub use account::{AccountId, MuxedAccount};
pub use amount::Amount;
pub use asset::Asset;
pub use error::{CodecError, Result};
pub use operation::{Operation, OperationBody, OperationBuilder, OperationType};
pub use xdr::{ReadXdr, WriteXdr};
