//! # XDR Primitives
//!
//! The ledger network speaks XDR (RFC 4506): big-endian integers, every
//! item padded to a 4-byte boundary, unions as a 4-byte discriminant
//! followed by the selected arm, optionals as a 0/1 word followed by the
//! value.
//!
//! ```text
//! writer.rs — XdrWriter, append-only encoder over bytes::BytesMut
//! reader.rs — XdrReader, bounds-checked decoder over a borrowed slice
//! ```
//!
//! Codec types implement [`WriteXdr`] and [`ReadXdr`]; the provided
//! methods handle the buffer plumbing (fresh writer per encode, trailing
//! byte check per decode, base64 transport).

pub mod reader;
pub mod writer;

pub use reader::XdrReader;
pub use writer::XdrWriter;

use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::DecodeLimits;
use crate::error::{CodecError, Result};

/// Number of zero bytes that follow `len` bytes of opaque data.
pub(crate) fn padding(len: usize) -> usize {
    (4 - len % 4) % 4
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Types with a canonical XDR encoding.
pub trait WriteXdr {
    /// Appends this value to `w`.
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()>;

    /// Encodes this value into a standalone buffer.
    ///
    /// Either the whole value is encoded or an error is returned; no
    /// partial buffer escapes.
    fn to_xdr(&self) -> Result<Vec<u8>> {
        let mut w = XdrWriter::new();
        self.write_xdr(&mut w)?;
        Ok(w.into_vec())
    }

    /// Encodes this value as standard base64 XDR.
    fn to_xdr_base64(&self) -> Result<String> {
        Ok(base64::engine::general_purpose::STANDARD.encode(self.to_xdr()?))
    }
}

/// Types that can be decoded from their canonical XDR encoding.
pub trait ReadXdr: Sized {
    /// Reads one value from `r`.
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self>;

    /// Decodes a buffer that must contain exactly one value.
    fn from_xdr(bytes: &[u8]) -> Result<Self> {
        Self::from_xdr_with_limits(bytes, DecodeLimits::default())
    }

    /// Decodes a buffer under explicit [`DecodeLimits`].
    fn from_xdr_with_limits(bytes: &[u8], limits: DecodeLimits) -> Result<Self> {
        let mut r = XdrReader::with_limits(bytes, limits)?;
        let value = Self::read_xdr(&mut r)?;
        r.finish()?;
        Ok(value)
    }

    /// Decodes standard base64 XDR.
    fn from_xdr_base64(encoded: &str) -> Result<Self> {
        Self::from_xdr(&decode_base64(encoded)?)
    }
}

/// Decodes standard base64 text into raw XDR bytes.
pub fn decode_base64(encoded: &str) -> Result<Vec<u8>> {
    base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| CodecError::malformed(format!("invalid base64: {}", e)))
}

impl WriteXdr for u32 {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        w.write_u32(*self);
        Ok(())
    }
}

impl ReadXdr for u32 {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        r.read_u32()
    }
}

/// Serde adapter that writes byte blobs as lowercase hex strings.
pub(crate) mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s).map_err(serde::de::Error::custom)
    }
}

/// [`hex_bytes`] for optional blobs.
pub(crate) mod hex_bytes_opt {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        bytes: &Option<Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match bytes {
            Some(b) => serializer.serialize_some(&hex::encode(b)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) => hex::decode(s).map(Some).map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

// ---------------------------------------------------------------------------
// Hash
// ---------------------------------------------------------------------------

/// A 32-byte opaque value: pool ids, balance ids, pre-auth transaction
/// hashes. Displayed as lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Hash(pub [u8; 32]);

impl Hash {
    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; 32]> for Hash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl FromStr for Hash {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        let bytes =
            hex::decode(s).map_err(|e| CodecError::malformed(format!("invalid hash hex: {}", e)))?;
        let arr: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
            CodecError::malformed(format!("hash must be 32 bytes, got {}", bytes.len()))
        })?;
        Ok(Self(arr))
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self.to_hex())
    }
}

impl WriteXdr for Hash {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        w.write_fixed_opaque(&self.0);
        Ok(())
    }
}

impl ReadXdr for Hash {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        Ok(Self(r.read_fixed::<32>()?))
    }
}

impl Serialize for Hash {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(serde::de::Error::custom)
        } else {
            let bytes = <Vec<u8>>::deserialize(deserializer)?;
            let arr: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
                serde::de::Error::custom(format!("expected 32-byte hash, got {}", bytes.len()))
            })?;
            Ok(Self(arr))
        }
    }
}

// ---------------------------------------------------------------------------
// Void extension point
// ---------------------------------------------------------------------------

/// The schema's reserved `ExtensionPoint` union. Only arm 0 (void) exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ExtensionPoint;

impl WriteXdr for ExtensionPoint {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        w.write_i32(0);
        Ok(())
    }
}

impl ReadXdr for ExtensionPoint {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        match r.read_i32()? {
            0 => Ok(Self),
            other => Err(CodecError::malformed(format!(
                "unknown extension point arm {}",
                other
            ))),
        }
    }
}
