//! # Asset Model & Codec
//!
//! Assets are a closed set:
//!
//! ```text
//! 0  Native             (no code, no issuer)
//! 1  CreditAlphaNum4    code 1-4 chars  | issuer
//! 2  CreditAlphaNum12   code 5-12 chars | issuer
//! ```
//!
//! On the wire the code is zero-padded to exactly 4 or 12 bytes; in memory
//! it is the trimmed text. Constructors pick the variant from the code
//! length, so `"USD"` is always AlphaNum4 and `"USDCOIN"` always
//! AlphaNum12. Derived equality, hashing and ordering therefore give the
//! network's canonical asset order for free: native first, then alphanum4,
//! then alphanum12, each by code bytes and then issuer key.
//!
//! The trust-line and change-trust unions reuse the three asset arms and add
//! a fourth for liquidity pool shares.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::account::AccountId;
use crate::config::{
    ASSET_TYPE_CREDIT_ALPHANUM12, ASSET_TYPE_CREDIT_ALPHANUM4, ASSET_TYPE_NATIVE,
    ASSET_TYPE_POOL_SHARE, LIQUIDITY_POOL_CONSTANT_PRODUCT, LIQUIDITY_POOL_FEE_BPS,
};
use crate::error::{CodecError, Result};
use crate::xdr::{Hash, ReadXdr, WriteXdr, XdrReader, XdrWriter};

/// Identifier of a liquidity pool: SHA-256 of its parameters' XDR.
pub type PoolId = Hash;

// ---------------------------------------------------------------------------
// Asset codes
// ---------------------------------------------------------------------------

pub(crate) fn check_code(code: &str, min: usize, max: usize) -> Result<()> {
    if !(min..=max).contains(&code.len()) {
        return Err(CodecError::constraint(format!(
            "asset code '{}' must be {}-{} characters",
            code, min, max
        )));
    }
    if !code.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(CodecError::constraint(format!(
            "asset code '{}' must be ASCII alphanumeric",
            code
        )));
    }
    Ok(())
}

fn write_code(w: &mut XdrWriter, code: &str, width: usize) {
    let mut padded = [0u8; 12];
    padded[..code.len()].copy_from_slice(code.as_bytes());
    w.write_fixed_opaque(&padded[..width]);
}

/// Reads a zero-padded code of width `N` and returns the trimmed text.
fn read_code<const N: usize>(r: &mut XdrReader<'_>) -> Result<String> {
    let raw = r.read_fixed::<N>()?;
    let len = raw.iter().position(|&b| b == 0).unwrap_or(N);
    if raw[len..].iter().any(|&b| b != 0) {
        return Err(CodecError::MalformedAsset(
            "asset code has bytes after its zero padding".into(),
        ));
    }
    let code = std::str::from_utf8(&raw[..len])
        .map_err(|_| CodecError::MalformedAsset("asset code is not ASCII".into()))?;
    check_code(code, 1, N).map_err(|e| CodecError::MalformedAsset(e.to_string()))?;
    Ok(code.to_string())
}

#[derive(Deserialize)]
struct RawAlphaNum {
    code: String,
    issuer: AccountId,
}

macro_rules! alphanum {
    ($name:ident, $width:expr, $min:expr) => {
        /// A credit asset code paired with its issuer.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "RawAlphaNum")]
        pub struct $name {
            code: String,
            issuer: AccountId,
        }

        impl $name {
            /// Builds the asset, enforcing this variant's code length class.
            pub fn new(code: &str, issuer: AccountId) -> Result<Self> {
                check_code(code, $min, $width)?;
                Ok(Self {
                    code: code.to_string(),
                    issuer,
                })
            }

            /// The trimmed code text.
            pub fn code(&self) -> &str {
                &self.code
            }

            pub fn issuer(&self) -> &AccountId {
                &self.issuer
            }

            fn put(&self, w: &mut XdrWriter) {
                write_code(w, &self.code, $width);
                w.write_i32(crate::config::PUBLIC_KEY_TYPE_ED25519);
                w.write_fixed_opaque(self.issuer.as_bytes());
            }

            fn take(r: &mut XdrReader<'_>) -> Result<Self> {
                let code = read_code::<$width>(r)?;
                let issuer = AccountId::read_xdr(r)?;
                Ok(Self { code, issuer })
            }
        }

        impl TryFrom<RawAlphaNum> for $name {
            type Error = CodecError;

            // Accepts anything the wire can carry so decoded values survive a
            // JSON round trip.
            fn try_from(raw: RawAlphaNum) -> Result<Self> {
                check_code(&raw.code, 1, $width)?;
                Ok(Self {
                    code: raw.code,
                    issuer: raw.issuer,
                })
            }
        }
    };
}

alphanum!(AlphaNum4, 4, 1);
alphanum!(AlphaNum12, 12, 5);

// ---------------------------------------------------------------------------
// Asset
// ---------------------------------------------------------------------------

/// A ledger asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Asset {
    /// The network's native currency.
    Native,
    /// Credit asset with a 1-4 character code.
    CreditAlphanum4(AlphaNum4),
    /// Credit asset with a 5-12 character code.
    CreditAlphanum12(AlphaNum12),
}

impl Asset {
    pub fn native() -> Self {
        Self::Native
    }

    /// A credit asset; the variant follows from the code length.
    pub fn credit(code: &str, issuer: AccountId) -> Result<Self> {
        if code.len() <= 4 {
            Ok(Self::CreditAlphanum4(AlphaNum4::new(code, issuer)?))
        } else {
            Ok(Self::CreditAlphanum12(AlphaNum12::new(code, issuer)?))
        }
    }

    /// A credit asset from a textual `G...` issuer.
    pub fn credit_from_text(code: &str, issuer: &str) -> Result<Self> {
        Self::credit(code, AccountId::from_text(issuer)?)
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native)
    }

    /// The trimmed code, `None` for native.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Native => None,
            Self::CreditAlphanum4(a) => Some(a.code()),
            Self::CreditAlphanum12(a) => Some(a.code()),
        }
    }

    /// The issuer, `None` for native.
    pub fn issuer(&self) -> Option<&AccountId> {
        match self {
            Self::Native => None,
            Self::CreditAlphanum4(a) => Some(a.issuer()),
            Self::CreditAlphanum12(a) => Some(a.issuer()),
        }
    }

    /// The wire discriminant of this variant.
    pub fn discriminant(&self) -> i32 {
        match self {
            Self::Native => ASSET_TYPE_NATIVE,
            Self::CreditAlphanum4(_) => ASSET_TYPE_CREDIT_ALPHANUM4,
            Self::CreditAlphanum12(_) => ASSET_TYPE_CREDIT_ALPHANUM12,
        }
    }

    fn put(&self, w: &mut XdrWriter) {
        w.write_i32(self.discriminant());
        match self {
            Self::Native => {}
            Self::CreditAlphanum4(a) => a.put(w),
            Self::CreditAlphanum12(a) => a.put(w),
        }
    }

    /// Reads the arm selected by an already-consumed discriminant.
    fn take_arm(discriminant: i32, r: &mut XdrReader<'_>) -> Result<Option<Self>> {
        Ok(match discriminant {
            ASSET_TYPE_NATIVE => Some(Self::Native),
            ASSET_TYPE_CREDIT_ALPHANUM4 => Some(Self::CreditAlphanum4(AlphaNum4::take(r)?)),
            ASSET_TYPE_CREDIT_ALPHANUM12 => Some(Self::CreditAlphanum12(AlphaNum12::take(r)?)),
            _ => None,
        })
    }
}

/// Any failure inside an asset is reported as a malformed asset.
fn as_asset_error(err: CodecError) -> CodecError {
    match err {
        CodecError::MalformedAsset(_) => err,
        other => CodecError::MalformedAsset(other.to_string()),
    }
}

impl WriteXdr for Asset {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        self.put(w);
        Ok(())
    }
}

impl ReadXdr for Asset {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        let discriminant = r.read_i32().map_err(as_asset_error)?;
        match Self::take_arm(discriminant, r).map_err(as_asset_error)? {
            Some(asset) => Ok(asset),
            None => Err(CodecError::MalformedAsset(format!(
                "unknown asset type {}",
                discriminant
            ))),
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => f.write_str("native"),
            Self::CreditAlphanum4(a) => write!(f, "{}:{}", a.code(), a.issuer()),
            Self::CreditAlphanum12(a) => write!(f, "{}:{}", a.code(), a.issuer()),
        }
    }
}

impl FromStr for Asset {
    type Err = CodecError;

    /// Parses `native` or `CODE:GISSUER...`.
    fn from_str(s: &str) -> Result<Self> {
        if s == "native" {
            return Ok(Self::Native);
        }
        match s.split_once(':') {
            Some((code, issuer)) => Self::credit_from_text(code, issuer),
            None => Err(CodecError::constraint(format!(
                "asset '{}' must be 'native' or 'CODE:ISSUER'",
                s
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// AssetCode
// ---------------------------------------------------------------------------

/// A bare asset code, as allow-trust names the asset it authorizes. The
/// issuer is implied: it is the operation's source account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetCode {
    CreditAlphanum4(String),
    CreditAlphanum12(String),
}

impl AssetCode {
    /// Picks the arm from the code length.
    pub fn new(code: &str) -> Result<Self> {
        if code.len() <= 4 {
            check_code(code, 1, 4)?;
            Ok(Self::CreditAlphanum4(code.to_string()))
        } else {
            check_code(code, 5, 12)?;
            Ok(Self::CreditAlphanum12(code.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::CreditAlphanum4(code) | Self::CreditAlphanum12(code) => code,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Self::CreditAlphanum4(code) => check_code(code, 1, 4),
            Self::CreditAlphanum12(code) => check_code(code, 1, 12),
        }
    }
}

impl WriteXdr for AssetCode {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        self.validate()?;
        match self {
            Self::CreditAlphanum4(code) => {
                w.write_i32(ASSET_TYPE_CREDIT_ALPHANUM4);
                write_code(w, code, 4);
            }
            Self::CreditAlphanum12(code) => {
                w.write_i32(ASSET_TYPE_CREDIT_ALPHANUM12);
                write_code(w, code, 12);
            }
        }
        Ok(())
    }
}

impl ReadXdr for AssetCode {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        let discriminant = r.read_i32().map_err(as_asset_error)?;
        match discriminant {
            ASSET_TYPE_CREDIT_ALPHANUM4 => Ok(Self::CreditAlphanum4(
                read_code::<4>(r).map_err(as_asset_error)?,
            )),
            ASSET_TYPE_CREDIT_ALPHANUM12 => Ok(Self::CreditAlphanum12(
                read_code::<12>(r).map_err(as_asset_error)?,
            )),
            other => Err(CodecError::MalformedAsset(format!(
                "unknown asset code type {}",
                other
            ))),
        }
    }
}

impl fmt::Display for AssetCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Price
// ---------------------------------------------------------------------------

/// An exact price as a fraction `n / d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Price {
    pub n: i32,
    pub d: i32,
}

impl Price {
    /// Builds a price; both terms must be positive.
    pub fn new(n: i32, d: i32) -> Result<Self> {
        let price = Self { n, d };
        price.validate()?;
        Ok(price)
    }

    pub fn validate(&self) -> Result<()> {
        if self.n <= 0 || self.d <= 0 {
            return Err(CodecError::constraint(format!(
                "price {}/{} must have positive terms",
                self.n, self.d
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.n, self.d)
    }
}

impl WriteXdr for Price {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        w.write_i32(self.n);
        w.write_i32(self.d);
        Ok(())
    }
}

impl ReadXdr for Price {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        Ok(Self {
            n: r.read_i32()?,
            d: r.read_i32()?,
        })
    }
}

// ---------------------------------------------------------------------------
// Liquidity pool parameters
// ---------------------------------------------------------------------------

/// Parameters of a constant-product liquidity pool, the only pool kind the
/// network defines (wire arm 0).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LiquidityPoolParameters {
    pub asset_a: Asset,
    pub asset_b: Asset,
    /// Fee in basis points.
    pub fee: i32,
}

impl LiquidityPoolParameters {
    /// Builds pool parameters with the standard fee.
    pub fn constant_product(asset_a: Asset, asset_b: Asset) -> Result<Self> {
        let params = Self {
            asset_a,
            asset_b,
            fee: LIQUIDITY_POOL_FEE_BPS,
        };
        params.validate()?;
        Ok(params)
    }

    /// Assets must be distinct and in canonical order; the fee is fixed.
    pub fn validate(&self) -> Result<()> {
        if self.asset_a >= self.asset_b {
            return Err(CodecError::constraint(format!(
                "pool assets must be distinct and ordered: {} then {}",
                self.asset_a, self.asset_b
            )));
        }
        if self.fee != LIQUIDITY_POOL_FEE_BPS {
            return Err(CodecError::constraint(format!(
                "pool fee must be {} bps, got {}",
                LIQUIDITY_POOL_FEE_BPS, self.fee
            )));
        }
        Ok(())
    }

    /// SHA-256 of the parameters' XDR, the id the network assigns the pool.
    pub fn pool_id(&self) -> PoolId {
        let mut w = XdrWriter::new();
        self.put(&mut w);
        Hash(Sha256::digest(w.into_vec()).into())
    }

    fn put(&self, w: &mut XdrWriter) {
        w.write_i32(LIQUIDITY_POOL_CONSTANT_PRODUCT);
        self.asset_a.put(w);
        self.asset_b.put(w);
        w.write_i32(self.fee);
    }
}

impl WriteXdr for LiquidityPoolParameters {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        self.put(w);
        Ok(())
    }
}

impl ReadXdr for LiquidityPoolParameters {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        match r.read_i32()? {
            LIQUIDITY_POOL_CONSTANT_PRODUCT => Ok(Self {
                asset_a: Asset::read_xdr(r)?,
                asset_b: Asset::read_xdr(r)?,
                fee: r.read_i32()?,
            }),
            other => Err(CodecError::malformed(format!(
                "unknown liquidity pool type {}",
                other
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// TrustLineAsset / ChangeTrustAsset
// ---------------------------------------------------------------------------

/// Asset of an existing trust line: a plain asset or a pool share by id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TrustLineAsset {
    Native,
    CreditAlphanum4(AlphaNum4),
    CreditAlphanum12(AlphaNum12),
    PoolShare { pool_id: PoolId },
}

impl From<Asset> for TrustLineAsset {
    fn from(asset: Asset) -> Self {
        match asset {
            Asset::Native => Self::Native,
            Asset::CreditAlphanum4(a) => Self::CreditAlphanum4(a),
            Asset::CreditAlphanum12(a) => Self::CreditAlphanum12(a),
        }
    }
}

impl WriteXdr for TrustLineAsset {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        match self {
            Self::Native => w.write_i32(ASSET_TYPE_NATIVE),
            Self::CreditAlphanum4(a) => {
                w.write_i32(ASSET_TYPE_CREDIT_ALPHANUM4);
                a.put(w);
            }
            Self::CreditAlphanum12(a) => {
                w.write_i32(ASSET_TYPE_CREDIT_ALPHANUM12);
                a.put(w);
            }
            Self::PoolShare { pool_id } => {
                w.write_i32(ASSET_TYPE_POOL_SHARE);
                pool_id.write_xdr(w)?;
            }
        }
        Ok(())
    }
}

impl ReadXdr for TrustLineAsset {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        let discriminant = r.read_i32().map_err(as_asset_error)?;
        if discriminant == ASSET_TYPE_POOL_SHARE {
            let pool_id = Hash::read_xdr(r).map_err(as_asset_error)?;
            return Ok(Self::PoolShare { pool_id });
        }
        match Asset::take_arm(discriminant, r).map_err(as_asset_error)? {
            Some(asset) => Ok(asset.into()),
            None => Err(CodecError::MalformedAsset(format!(
                "unknown trust line asset type {}",
                discriminant
            ))),
        }
    }
}

/// Asset named by a change-trust operation: a plain asset or the full
/// parameters of the pool whose shares are trusted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeTrustAsset {
    Native,
    CreditAlphanum4(AlphaNum4),
    CreditAlphanum12(AlphaNum12),
    PoolShare(LiquidityPoolParameters),
}

impl ChangeTrustAsset {
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::PoolShare(params) => params.validate(),
            _ => Ok(()),
        }
    }
}

impl From<Asset> for ChangeTrustAsset {
    fn from(asset: Asset) -> Self {
        match asset {
            Asset::Native => Self::Native,
            Asset::CreditAlphanum4(a) => Self::CreditAlphanum4(a),
            Asset::CreditAlphanum12(a) => Self::CreditAlphanum12(a),
        }
    }
}

impl WriteXdr for ChangeTrustAsset {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        match self {
            Self::Native => w.write_i32(ASSET_TYPE_NATIVE),
            Self::CreditAlphanum4(a) => {
                w.write_i32(ASSET_TYPE_CREDIT_ALPHANUM4);
                a.put(w);
            }
            Self::CreditAlphanum12(a) => {
                w.write_i32(ASSET_TYPE_CREDIT_ALPHANUM12);
                a.put(w);
            }
            Self::PoolShare(params) => {
                w.write_i32(ASSET_TYPE_POOL_SHARE);
                params.put(w);
            }
        }
        Ok(())
    }
}

impl ReadXdr for ChangeTrustAsset {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        let discriminant = r.read_i32().map_err(as_asset_error)?;
        if discriminant == ASSET_TYPE_POOL_SHARE {
            let params = LiquidityPoolParameters::read_xdr(r).map_err(as_asset_error)?;
            return Ok(Self::PoolShare(params));
        }
        match Asset::take_arm(discriminant, r).map_err(as_asset_error)? {
            Some(asset) => Ok(asset.into()),
            None => Err(CodecError::MalformedAsset(format!(
                "unknown change trust asset type {}",
                discriminant
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn issuer(seed: u8) -> AccountId {
        AccountId::from_bytes([seed; 32])
    }

    #[test]
    fn code_length_selects_variant() {
        assert!(matches!(
            Asset::credit("USD", issuer(1)).unwrap(),
            Asset::CreditAlphanum4(_)
        ));
        assert!(matches!(
            Asset::credit("USDC", issuer(1)).unwrap(),
            Asset::CreditAlphanum4(_)
        ));
        assert!(matches!(
            Asset::credit("USDCOIN", issuer(1)).unwrap(),
            Asset::CreditAlphanum12(_)
        ));
    }

    #[test]
    fn bad_codes_rejected() {
        for bad in ["", "THIRTEENCHARS", "US$", "ü"] {
            assert!(matches!(
                Asset::credit(bad, issuer(1)),
                Err(CodecError::ConstraintViolation(_))
            ));
        }
        assert!(AlphaNum12::new("USD", issuer(1)).is_err());
        assert!(AlphaNum4::new("USDCO", issuer(1)).is_err());
    }

    #[test]
    fn bad_issuer_text_rejected() {
        assert!(matches!(
            Asset::credit_from_text("USD", "not-an-account"),
            Err(CodecError::InvalidAccountId { .. })
        ));
    }

    #[test]
    fn native_wire_is_single_word() {
        assert_eq!(Asset::Native.to_xdr().unwrap(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn alphanum4_wire_layout() {
        let asset = Asset::credit("USD", issuer(0x11)).unwrap();
        let wire = asset.to_xdr().unwrap();
        assert_eq!(wire.len(), 4 + 4 + 4 + 32);
        assert_eq!(&wire[..4], &[0, 0, 0, 1]);
        assert_eq!(&wire[4..8], b"USD\0");
        assert_eq!(&wire[8..12], &[0, 0, 0, 0]);
        assert!(wire[12..].iter().all(|&b| b == 0x11));
    }

    #[test]
    fn alphanum12_wire_layout() {
        let asset = Asset::credit("LONGASSET", issuer(3)).unwrap();
        let wire = asset.to_xdr().unwrap();
        assert_eq!(wire.len(), 4 + 12 + 4 + 32);
        assert_eq!(&wire[..4], &[0, 0, 0, 2]);
        assert_eq!(&wire[4..16], b"LONGASSET\0\0\0");
    }

    #[test]
    fn wire_roundtrip_preserves_equality_and_hash() {
        let assets = vec![
            Asset::Native,
            Asset::credit("A", issuer(1)).unwrap(),
            Asset::credit("EURT", issuer(2)).unwrap(),
            Asset::credit("ABCDEFGHIJKL", issuer(3)).unwrap(),
        ];
        let mut set = HashSet::new();
        for asset in &assets {
            set.insert(asset.clone());
        }
        for asset in &assets {
            let decoded = Asset::from_xdr(&asset.to_xdr().unwrap()).unwrap();
            assert_eq!(&decoded, asset);
            assert!(set.contains(&decoded));
        }
    }

    #[test]
    fn variant_participates_in_equality() {
        let four = Asset::CreditAlphanum4(AlphaNum4::new("ABC", issuer(1)).unwrap());
        let twelve = Asset::CreditAlphanum12(
            AlphaNum12::try_from(RawAlphaNum {
                code: "ABC".into(),
                issuer: issuer(1),
            })
            .unwrap(),
        );
        assert_ne!(four, twelve);
        assert_eq!(four, Asset::credit("ABC", issuer(1)).unwrap());
    }

    #[test]
    fn unknown_discriminant_is_malformed_asset() {
        let err = Asset::from_xdr(&[0, 0, 0, 7]).unwrap_err();
        assert!(matches!(err, CodecError::MalformedAsset(_)));
        // Pool shares are not plain assets.
        assert!(matches!(
            Asset::from_xdr(&[0, 0, 0, 3]),
            Err(CodecError::MalformedAsset(_))
        ));
    }

    #[test]
    fn truncated_asset_is_malformed_asset() {
        let wire = Asset::credit("USD", issuer(1)).unwrap().to_xdr().unwrap();
        for cut in [2, 6, 10, wire.len() - 1] {
            assert!(matches!(
                Asset::from_xdr(&wire[..cut]),
                Err(CodecError::MalformedAsset(_))
            ));
        }
    }

    #[test]
    fn code_with_inner_zero_rejected() {
        let mut wire = Asset::credit("USD", issuer(1)).unwrap().to_xdr().unwrap();
        wire[5] = 0; // "U\0D\0"
        assert!(matches!(
            Asset::from_xdr(&wire),
            Err(CodecError::MalformedAsset(_))
        ));
    }

    #[test]
    fn canonical_ordering() {
        let native = Asset::Native;
        let a4_low = Asset::credit("AAA", issuer(9)).unwrap();
        let a4_high = Asset::credit("AAB", issuer(1)).unwrap();
        let a4_same_code = Asset::credit("AAB", issuer(2)).unwrap();
        let a12 = Asset::credit("AAAAA", issuer(0)).unwrap();
        assert!(native < a4_low);
        assert!(a4_low < a4_high);
        assert!(a4_high < a4_same_code);
        assert!(a4_same_code < a12);
    }

    #[test]
    fn text_form_roundtrip() {
        let asset = Asset::credit("USDC", issuer(5)).unwrap();
        let text = asset.to_string();
        assert!(text.starts_with("USDC:G"));
        assert_eq!(text.parse::<Asset>().unwrap(), asset);
        assert_eq!("native".parse::<Asset>().unwrap(), Asset::Native);
        assert!("USDC".parse::<Asset>().is_err());
    }

    #[test]
    fn asset_json_format() {
        let asset = Asset::credit("USDC", issuer(0)).unwrap();
        let json = serde_json::to_value(&asset).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "credit_alphanum4",
                "code": "USDC",
                "issuer": "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF"
            })
        );
        let back: Asset = serde_json::from_value(json).unwrap();
        assert_eq!(back, asset);
        assert_eq!(
            serde_json::to_value(&Asset::Native).unwrap(),
            serde_json::json!({"type": "native"})
        );
    }

    #[test]
    fn asset_code_arms() {
        let short = AssetCode::new("EUR").unwrap();
        let wire = short.to_xdr().unwrap();
        assert_eq!(wire, vec![0, 0, 0, 1, b'E', b'U', b'R', 0]);
        assert_eq!(AssetCode::from_xdr(&wire).unwrap(), short);

        let long = AssetCode::new("EUROCOIN").unwrap();
        assert_eq!(long.to_xdr().unwrap().len(), 16);
        assert!(AssetCode::new("").is_err());

        // Hand-built oversize codes fail instead of overrunning the field.
        let bogus = AssetCode::CreditAlphanum4("TOOLONG".into());
        assert!(matches!(
            bogus.to_xdr(),
            Err(CodecError::ConstraintViolation(_))
        ));
    }

    #[test]
    fn price_requires_positive_terms() {
        assert!(Price::new(1, 2).is_ok());
        assert!(Price::new(0, 2).is_err());
        assert!(Price::new(3, -1).is_err());
        let price = Price::new(7, 3).unwrap();
        assert_eq!(Price::from_xdr(&price.to_xdr().unwrap()).unwrap(), price);
    }

    #[test]
    fn pool_parameters_require_ordered_assets() {
        let usd = Asset::credit("USD", issuer(1)).unwrap();
        assert!(LiquidityPoolParameters::constant_product(Asset::Native, usd.clone()).is_ok());
        assert!(LiquidityPoolParameters::constant_product(usd.clone(), Asset::Native).is_err());
        assert!(LiquidityPoolParameters::constant_product(usd.clone(), usd).is_err());
    }

    #[test]
    fn pool_id_is_deterministic() {
        let usd = Asset::credit("USD", issuer(1)).unwrap();
        let eur = Asset::credit("EUR", issuer(1)).unwrap();
        let a = LiquidityPoolParameters::constant_product(Asset::Native, usd.clone()).unwrap();
        let b = LiquidityPoolParameters::constant_product(Asset::Native, usd).unwrap();
        let c = LiquidityPoolParameters::constant_product(Asset::Native, eur).unwrap();
        assert_eq!(a.pool_id(), b.pool_id());
        assert_ne!(a.pool_id(), c.pool_id());

        let expected: [u8; 32] = Sha256::digest(a.to_xdr().unwrap()).into();
        assert_eq!(a.pool_id().0, expected);
    }

    #[test]
    fn change_trust_pool_share_roundtrip() {
        let params = LiquidityPoolParameters::constant_product(
            Asset::Native,
            Asset::credit("USD", issuer(4)).unwrap(),
        )
        .unwrap();
        let line = ChangeTrustAsset::PoolShare(params);
        let wire = line.to_xdr().unwrap();
        assert_eq!(&wire[..8], &[0, 0, 0, 3, 0, 0, 0, 0]);
        assert_eq!(ChangeTrustAsset::from_xdr(&wire).unwrap(), line);
    }

    #[test]
    fn trust_line_pool_share_roundtrip() {
        let asset = TrustLineAsset::PoolShare {
            pool_id: Hash([9; 32]),
        };
        let wire = asset.to_xdr().unwrap();
        assert_eq!(wire.len(), 36);
        assert_eq!(TrustLineAsset::from_xdr(&wire).unwrap(), asset);
        let plain: TrustLineAsset = Asset::credit("XLMX", issuer(2)).unwrap().into();
        assert_eq!(
            TrustLineAsset::from_xdr(&plain.to_xdr().unwrap()).unwrap(),
            plain
        );
    }
}
