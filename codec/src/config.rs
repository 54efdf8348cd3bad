//! # Codec Configuration & Constants
//!
//! Every wire constant the codec depends on lives here: discriminants,
//! structural limits, flag masks, and the decode limits applied to
//! untrusted buffers.
//!
//! The discriminant values are fixed by the ledger network's published XDR
//! schema. They are not ours to change. A wrong number here does not fail
//! locally, it gets the transaction rejected by every validator.

// ---------------------------------------------------------------------------
// Amount Scale
// ---------------------------------------------------------------------------

/// Number of fractional decimal digits an amount may carry.
pub const AMOUNT_DECIMALS: u32 = 7;

/// Fixed-point scale: one whole unit is `10^7` stroops.
pub const AMOUNT_SCALE: i64 = 10_000_000;

// ---------------------------------------------------------------------------
// Structural Limits
// ---------------------------------------------------------------------------

/// Maximum number of intermediate hops in a path payment.
pub const MAX_PATH_LENGTH: usize = 5;

/// Maximum number of claimants on a claimable balance.
pub const MAX_CLAIMANTS: usize = 10;

/// Maximum nesting depth of a claim predicate tree.
pub const MAX_PREDICATE_DEPTH: usize = 4;

/// Maximum length of a manage-data entry name, in bytes.
pub const MAX_DATA_NAME_LENGTH: usize = 64;

/// Maximum length of a manage-data entry value, in bytes.
pub const MAX_DATA_VALUE_LENGTH: usize = 64;

/// Maximum length of an account's home domain, in bytes.
pub const MAX_HOME_DOMAIN_LENGTH: usize = 32;

/// Maximum payload carried by an ed25519 signed-payload signer key.
pub const MAX_SIGNED_PAYLOAD_LENGTH: usize = 64;

/// Largest weight or threshold an account accepts.
pub const MAX_WEIGHT: u32 = 255;

/// Only fee the constant-product liquidity pool supports, in basis points.
pub const LIQUIDITY_POOL_FEE_BPS: i32 = 30;

/// Length of an ed25519 public key on the wire.
pub const ED25519_KEY_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Key Type Discriminants
// ---------------------------------------------------------------------------

/// `PublicKey` arm for a plain ed25519 key.
pub const PUBLIC_KEY_TYPE_ED25519: i32 = 0;

/// `MuxedAccount` arm for a plain ed25519 key.
pub const KEY_TYPE_ED25519: i32 = 0;

/// `MuxedAccount` arm for an ed25519 key plus a 64-bit sub-account id.
pub const KEY_TYPE_MUXED_ED25519: i32 = 0x100;

/// `SignerKey` arms.
pub const SIGNER_KEY_TYPE_ED25519: i32 = 0;
pub const SIGNER_KEY_TYPE_PRE_AUTH_TX: i32 = 1;
pub const SIGNER_KEY_TYPE_HASH_X: i32 = 2;
pub const SIGNER_KEY_TYPE_ED25519_SIGNED_PAYLOAD: i32 = 3;

// ---------------------------------------------------------------------------
// Asset Discriminants
// ---------------------------------------------------------------------------

pub const ASSET_TYPE_NATIVE: i32 = 0;
pub const ASSET_TYPE_CREDIT_ALPHANUM4: i32 = 1;
pub const ASSET_TYPE_CREDIT_ALPHANUM12: i32 = 2;
pub const ASSET_TYPE_POOL_SHARE: i32 = 3;

/// `LiquidityPoolParameters` arm for the constant-product pool.
pub const LIQUIDITY_POOL_CONSTANT_PRODUCT: i32 = 0;

// ---------------------------------------------------------------------------
// Flag Masks
// ---------------------------------------------------------------------------

/// Account flag: trust lines require issuer authorization.
pub const AUTH_REQUIRED_FLAG: u32 = 0x1;
/// Account flag: the issuer may revoke authorization.
pub const AUTH_REVOCABLE_FLAG: u32 = 0x2;
/// Account flag: no authorization flags may ever change again.
pub const AUTH_IMMUTABLE_FLAG: u32 = 0x4;
/// Account flag: trust lines created from now on allow clawback.
pub const AUTH_CLAWBACK_ENABLED_FLAG: u32 = 0x8;
/// Every account flag the network knows.
pub const MASK_ACCOUNT_FLAGS: u32 = 0xF;

/// Trust-line flag: fully authorized.
pub const TRUSTLINE_AUTHORIZED_FLAG: u32 = 0x1;
/// Trust-line flag: authorized to maintain existing liabilities only.
pub const TRUSTLINE_AUTHORIZED_TO_MAINTAIN_LIABILITIES_FLAG: u32 = 0x2;
/// Trust-line flag: the issuer may claw back this balance.
pub const TRUSTLINE_CLAWBACK_ENABLED_FLAG: u32 = 0x4;
/// Every trust-line flag the network knows.
pub const MASK_TRUSTLINE_FLAGS: u32 = 0x7;

// ---------------------------------------------------------------------------
// Decode Limits
// ---------------------------------------------------------------------------

/// Default recursion budget for nested unions (claim predicates).
pub const DEFAULT_MAX_DEPTH: u32 = 64;

/// Default cap on the size of a buffer handed to the decoder.
pub const DEFAULT_MAX_INPUT_LENGTH: usize = 256 * 1024;

/// Limits applied while decoding untrusted buffers.
///
/// Decoding never allocates more than the input it was given, but recursive
/// types can still be made arbitrarily deep. These bounds keep a hostile
/// buffer from blowing the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Maximum nesting of recursive unions.
    pub max_depth: u32,
    /// Maximum accepted input length, in bytes.
    pub max_input_length: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_input_length: DEFAULT_MAX_INPUT_LENGTH,
        }
    }
}

impl DecodeLimits {
    /// Limits with a custom recursion budget and the default input cap.
    pub fn with_max_depth(max_depth: u32) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }
}
