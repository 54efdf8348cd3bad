//! # Account Identifiers
//!
//! Two shapes of account identity travel through operations:
//!
//! - [`AccountId`] — a bare ed25519 public key. Textual form `G...`.
//! - [`MuxedAccount`] — the same key, optionally paired with a 64-bit
//!   sub-account id so one key can front many logical accounts (exchanges
//!   and custodians rely on this). Textual form `G...` without a sub-id,
//!   `M...` with one.
//!
//! The base32 + CRC16 strkey encoding is delegated to the `stellar-strkey`
//! crate. A checksum mismatch there fails the whole parse.
//!
//! ## Wire layout
//!
//! ```text
//! AccountId            : i32 0      | key[32]
//! MuxedAccount simple  : i32 0      | key[32]
//! MuxedAccount muxed   : i32 0x100  | id u64 | key[32]
//! ```

use ed25519_dalek::VerifyingKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::OnceLock;
use stellar_strkey::ed25519::{MuxedAccount as StrkeyMuxedAccount, PublicKey as StrkeyPublicKey};

use crate::config::{
    ED25519_KEY_LENGTH, KEY_TYPE_ED25519, KEY_TYPE_MUXED_ED25519, PUBLIC_KEY_TYPE_ED25519,
};
use crate::error::{CodecError, Result};
use crate::xdr::{ReadXdr, WriteXdr, XdrReader, XdrWriter};

// ---------------------------------------------------------------------------
// AccountId
// ---------------------------------------------------------------------------

/// A plain ed25519 account identity (`G...`).
///
/// Ordering compares raw key bytes, which is what canonical asset ordering
/// needs for issuers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId([u8; 32]);

impl AccountId {
    /// Wraps a raw 32-byte ed25519 public key.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parses a `G...` strkey.
    pub fn from_text(text: &str) -> Result<Self> {
        if !text.starts_with('G') {
            return Err(CodecError::invalid_account(text, "expected a 'G' account id"));
        }
        let key = StrkeyPublicKey::from_string(text)
            .map_err(|e| CodecError::invalid_account(text, e.to_string()))?;
        Ok(Self(key.0))
    }

    /// The `G...` strkey form.
    pub fn to_text(&self) -> String {
        StrkeyPublicKey(self.0).to_string()
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<&VerifyingKey> for AccountId {
    fn from(key: &VerifyingKey) -> Self {
        Self(key.to_bytes())
    }
}

impl FromStr for AccountId {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_text(s)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self.to_text())
    }
}

impl WriteXdr for AccountId {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        w.write_i32(PUBLIC_KEY_TYPE_ED25519);
        w.write_fixed_opaque(&self.0);
        Ok(())
    }
}

impl ReadXdr for AccountId {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        match r.read_i32()? {
            PUBLIC_KEY_TYPE_ED25519 => Ok(Self(r.read_fixed::<ED25519_KEY_LENGTH>()?)),
            other => Err(CodecError::UnsupportedKeyType(other)),
        }
    }
}

impl Serialize for AccountId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_text())
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_text(&s).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// MuxedAccount
// ---------------------------------------------------------------------------

/// An account identity that may carry a sub-account id.
///
/// The textual address is computed on first use and cached. It is a pure
/// function of the key and sub-id, so concurrent first calls race to store
/// the same string and whichever wins is correct. Equality and hashing
/// never look at the cache.
///
/// # Examples
///
/// ```
/// use lumen_codec::account::{AccountId, MuxedAccount};
///
/// let key = AccountId::from_bytes([7u8; 32]);
/// let muxed = MuxedAccount::muxed(key, 42);
/// assert!(muxed.address().starts_with('M'));
///
/// let parsed = MuxedAccount::from_text(muxed.address()).unwrap();
/// assert_eq!(parsed.sub_id(), Some(42));
/// assert_eq!(parsed.account_id(), key);
/// ```
#[derive(Clone)]
pub struct MuxedAccount {
    ed25519: [u8; 32],
    id: Option<u64>,
    address: OnceLock<String>,
}

impl MuxedAccount {
    /// A simple (non-multiplexed) account.
    pub fn new(account: AccountId) -> Self {
        Self {
            ed25519: account.0,
            id: None,
            address: OnceLock::new(),
        }
    }

    /// A multiplexed account carrying sub-account `id`.
    pub fn muxed(account: AccountId, id: u64) -> Self {
        Self {
            ed25519: account.0,
            id: Some(id),
            address: OnceLock::new(),
        }
    }

    /// Parses either textual form, dispatching on the first character.
    pub fn from_text(text: &str) -> Result<Self> {
        match text.chars().next() {
            Some('G') => Ok(Self::new(AccountId::from_text(text)?)),
            Some('M') => {
                let muxed = StrkeyMuxedAccount::from_string(text)
                    .map_err(|e| CodecError::invalid_account(text, e.to_string()))?;
                Ok(Self::muxed(AccountId(muxed.ed25519), muxed.id))
            }
            _ => Err(CodecError::invalid_account(
                text,
                "expected a 'G' or 'M' account id",
            )),
        }
    }

    /// The textual address, `G...` or `M...`.
    pub fn address(&self) -> &str {
        self.address.get_or_init(|| match self.id {
            None => StrkeyPublicKey(self.ed25519).to_string(),
            Some(id) => StrkeyMuxedAccount {
                ed25519: self.ed25519,
                id,
            }
            .to_string(),
        })
    }

    /// The underlying plain account, sub-id dropped.
    pub fn account_id(&self) -> AccountId {
        AccountId(self.ed25519)
    }

    /// The sub-account id, if this is a multiplexed account.
    pub fn sub_id(&self) -> Option<u64> {
        self.id
    }

    pub fn is_muxed(&self) -> bool {
        self.id.is_some()
    }

    pub fn ed25519(&self) -> &[u8; 32] {
        &self.ed25519
    }
}

impl From<AccountId> for MuxedAccount {
    fn from(account: AccountId) -> Self {
        Self::new(account)
    }
}

impl PartialEq for MuxedAccount {
    fn eq(&self, other: &Self) -> bool {
        self.ed25519 == other.ed25519 && self.id == other.id
    }
}

impl Eq for MuxedAccount {}

impl Hash for MuxedAccount {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Must agree with PartialEq: the cached address is excluded.
        self.ed25519.hash(state);
        self.id.hash(state);
    }
}

impl FromStr for MuxedAccount {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_text(s)
    }
}

impl fmt::Display for MuxedAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.address())
    }
}

impl fmt::Debug for MuxedAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MuxedAccount({})", self.address())
    }
}

impl WriteXdr for MuxedAccount {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        match self.id {
            None => {
                w.write_i32(KEY_TYPE_ED25519);
                w.write_fixed_opaque(&self.ed25519);
            }
            Some(id) => {
                w.write_i32(KEY_TYPE_MUXED_ED25519);
                w.write_u64(id);
                w.write_fixed_opaque(&self.ed25519);
            }
        }
        Ok(())
    }
}

impl ReadXdr for MuxedAccount {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        match r.read_i32()? {
            KEY_TYPE_ED25519 => Ok(Self::new(AccountId(r.read_fixed::<ED25519_KEY_LENGTH>()?))),
            KEY_TYPE_MUXED_ED25519 => {
                let id = r.read_u64()?;
                let key = r.read_fixed::<ED25519_KEY_LENGTH>()?;
                Ok(Self::muxed(AccountId(key), id))
            }
            other => {
                tracing::debug!(discriminant = other, "rejecting muxed account key type");
                Err(CodecError::UnsupportedKeyType(other))
            }
        }
    }
}

impl Serialize for MuxedAccount {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.address())
    }
}

impl<'de> Deserialize<'de> for MuxedAccount {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_text(&s).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
