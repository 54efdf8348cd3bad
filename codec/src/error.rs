//! Error types for the operation codec.
//!
//! Every fallible codec call returns a [`CodecError`]. Failures are plain
//! values: nothing in the codec panics on bad input, and no call hands back
//! a half-decoded value or a truncated buffer alongside an error.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors that can occur while building, encoding, or decoding operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// A decimal amount is malformed, too precise, or out of `i64` range.
    #[error("invalid amount '{input}': {reason}")]
    InvalidAmount {
        /// The text that failed to parse.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Asset wire data is truncated, carries an unknown discriminant, or an
    /// unusable code.
    #[error("malformed asset: {0}")]
    MalformedAsset(String),

    /// The operation discriminant names no variant this codec knows.
    #[error("unknown operation type: {0}")]
    UnknownOperationType(i32),

    /// A key-type discriminant is not one of the defined arms.
    #[error("unsupported key type: {0}")]
    UnsupportedKeyType(i32),

    /// Textual account id has the wrong prefix or fails its checksum.
    #[error("invalid account id '{input}': {reason}")]
    InvalidAccountId {
        /// The text that failed to parse.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A builder-time structural limit was exceeded.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// Wire data outside an asset is structurally invalid.
    #[error("malformed xdr: {0}")]
    MalformedXdr(String),
}

impl CodecError {
    pub(crate) fn invalid_amount(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidAmount {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_account(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidAccountId {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn constraint(reason: impl Into<String>) -> Self {
        Self::ConstraintViolation(reason.into())
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedXdr(reason.into())
    }
}
