//! Trust line operations: opening and sizing a trust line, and the issuer's
//! two ways of adjusting one (the legacy allow-trust and its replacement,
//! set-trustline-flags).

use serde::{Deserialize, Serialize};

use super::options::check_flags;
use crate::account::AccountId;
use crate::amount::Amount;
use crate::asset::{Asset, AssetCode, ChangeTrustAsset};
use crate::config::MASK_TRUSTLINE_FLAGS;
use crate::error::{CodecError, Result};
use crate::xdr::{ReadXdr, WriteXdr, XdrReader, XdrWriter};

/// Creates, resizes or (with a zero limit) removes a trust line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangeTrustOp {
    pub line: ChangeTrustAsset,
    pub limit: Amount,
}

impl ChangeTrustOp {
    pub fn validate(&self) -> Result<()> {
        if self.limit.is_negative() {
            return Err(CodecError::constraint(format!(
                "trust line limit {} is negative",
                self.limit
            )));
        }
        self.line.validate()
    }
}

impl WriteXdr for ChangeTrustOp {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        self.line.write_xdr(w)?;
        self.limit.write_xdr(w)
    }
}

impl ReadXdr for ChangeTrustOp {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        Ok(Self {
            line: ChangeTrustAsset::read_xdr(r)?,
            limit: Amount::read_xdr(r)?,
        })
    }
}

/// Legacy issuer authorization of `trustor`'s trust line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AllowTrustOp {
    pub trustor: AccountId,
    pub asset: AssetCode,
    /// Trust-line flags to leave set; zero deauthorizes.
    pub authorize: u32,
}

impl AllowTrustOp {
    pub fn validate(&self) -> Result<()> {
        if self.authorize & !MASK_TRUSTLINE_FLAGS != 0 {
            return Err(CodecError::constraint(format!(
                "authorize flags {:#x} outside mask {:#x}",
                self.authorize, MASK_TRUSTLINE_FLAGS
            )));
        }
        self.asset.validate()
    }
}

impl WriteXdr for AllowTrustOp {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        self.trustor.write_xdr(w)?;
        self.asset.write_xdr(w)?;
        w.write_u32(self.authorize);
        Ok(())
    }
}

impl ReadXdr for AllowTrustOp {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        Ok(Self {
            trustor: AccountId::read_xdr(r)?,
            asset: AssetCode::read_xdr(r)?,
            authorize: r.read_u32()?,
        })
    }
}

/// Issuer sets and clears flags on `trustor`'s trust line for `asset`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SetTrustLineFlagsOp {
    pub trustor: AccountId,
    pub asset: Asset,
    pub clear_flags: u32,
    pub set_flags: u32,
}

impl SetTrustLineFlagsOp {
    /// The same bit in both masks is ambiguous and is refused.
    pub fn validate(&self) -> Result<()> {
        check_flags(
            self.clear_flags,
            self.set_flags,
            MASK_TRUSTLINE_FLAGS,
            "trust line",
        )
    }
}

impl WriteXdr for SetTrustLineFlagsOp {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        self.trustor.write_xdr(w)?;
        self.asset.write_xdr(w)?;
        w.write_u32(self.clear_flags);
        w.write_u32(self.set_flags);
        Ok(())
    }
}

impl ReadXdr for SetTrustLineFlagsOp {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        Ok(Self {
            trustor: AccountId::read_xdr(r)?,
            asset: Asset::read_xdr(r)?,
            clear_flags: r.read_u32()?,
            set_flags: r.read_u32()?,
        })
    }
}
