//! Value-moving operations: account creation, payments, path payments and
//! clawback.
//!
//! Path payments route through up to [`MAX_PATH_LENGTH`] intermediate
//! assets. The path excludes the send and destination assets themselves.

use serde::{Deserialize, Serialize};

use crate::account::{AccountId, MuxedAccount};
use crate::amount::Amount;
use crate::asset::Asset;
use crate::config::MAX_PATH_LENGTH;
use crate::error::{CodecError, Result};
use crate::xdr::{ReadXdr, WriteXdr, XdrReader, XdrWriter};

fn check_path(path: &[Asset]) -> Result<()> {
    if path.len() > MAX_PATH_LENGTH {
        return Err(CodecError::constraint(format!(
            "payment path has {} hops, limit is {}",
            path.len(),
            MAX_PATH_LENGTH
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CreateAccount
// ---------------------------------------------------------------------------

/// Funds a new account with `starting_balance` of the native asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreateAccountOp {
    pub destination: AccountId,
    pub starting_balance: Amount,
}

impl WriteXdr for CreateAccountOp {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        self.destination.write_xdr(w)?;
        self.starting_balance.write_xdr(w)
    }
}

impl ReadXdr for CreateAccountOp {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        Ok(Self {
            destination: AccountId::read_xdr(r)?,
            starting_balance: Amount::read_xdr(r)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Payment
// ---------------------------------------------------------------------------

/// Sends `amount` of `asset` to `destination`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaymentOp {
    pub destination: MuxedAccount,
    pub asset: Asset,
    pub amount: Amount,
}

impl WriteXdr for PaymentOp {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        self.destination.write_xdr(w)?;
        self.asset.write_xdr(w)?;
        self.amount.write_xdr(w)
    }
}

impl ReadXdr for PaymentOp {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        Ok(Self {
            destination: MuxedAccount::read_xdr(r)?,
            asset: Asset::read_xdr(r)?,
            amount: Amount::read_xdr(r)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Path payments
// ---------------------------------------------------------------------------

/// Delivers exactly `dest_amount`, spending at most `send_max`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathPaymentStrictReceiveOp {
    pub send_asset: Asset,
    pub send_max: Amount,
    pub destination: MuxedAccount,
    pub dest_asset: Asset,
    pub dest_amount: Amount,
    pub path: Vec<Asset>,
}

impl PathPaymentStrictReceiveOp {
    pub fn validate(&self) -> Result<()> {
        check_path(&self.path)
    }
}

impl WriteXdr for PathPaymentStrictReceiveOp {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        check_path(&self.path)?;
        self.send_asset.write_xdr(w)?;
        self.send_max.write_xdr(w)?;
        self.destination.write_xdr(w)?;
        self.dest_asset.write_xdr(w)?;
        self.dest_amount.write_xdr(w)?;
        w.write_array(&self.path, MAX_PATH_LENGTH)
    }
}

impl ReadXdr for PathPaymentStrictReceiveOp {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        Ok(Self {
            send_asset: Asset::read_xdr(r)?,
            send_max: Amount::read_xdr(r)?,
            destination: MuxedAccount::read_xdr(r)?,
            dest_asset: Asset::read_xdr(r)?,
            dest_amount: Amount::read_xdr(r)?,
            path: r.read_array(MAX_PATH_LENGTH)?,
        })
    }
}

/// Spends exactly `send_amount`, requiring at least `dest_min` delivered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathPaymentStrictSendOp {
    pub send_asset: Asset,
    pub send_amount: Amount,
    pub destination: MuxedAccount,
    pub dest_asset: Asset,
    pub dest_min: Amount,
    pub path: Vec<Asset>,
}

impl PathPaymentStrictSendOp {
    pub fn validate(&self) -> Result<()> {
        check_path(&self.path)
    }
}

impl WriteXdr for PathPaymentStrictSendOp {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        check_path(&self.path)?;
        self.send_asset.write_xdr(w)?;
        self.send_amount.write_xdr(w)?;
        self.destination.write_xdr(w)?;
        self.dest_asset.write_xdr(w)?;
        self.dest_min.write_xdr(w)?;
        w.write_array(&self.path, MAX_PATH_LENGTH)
    }
}

impl ReadXdr for PathPaymentStrictSendOp {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        Ok(Self {
            send_asset: Asset::read_xdr(r)?,
            send_amount: Amount::read_xdr(r)?,
            destination: MuxedAccount::read_xdr(r)?,
            dest_asset: Asset::read_xdr(r)?,
            dest_min: Amount::read_xdr(r)?,
            path: r.read_array(MAX_PATH_LENGTH)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Clawback
// ---------------------------------------------------------------------------

/// Issuer burns `amount` of `asset` out of `from`'s trust line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClawbackOp {
    pub asset: Asset,
    pub from: MuxedAccount,
    pub amount: Amount,
}

impl WriteXdr for ClawbackOp {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        self.asset.write_xdr(w)?;
        self.from.write_xdr(w)?;
        self.amount.write_xdr(w)
    }
}

impl ReadXdr for ClawbackOp {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        Ok(Self {
            asset: Asset::read_xdr(r)?,
            from: MuxedAccount::read_xdr(r)?,
            amount: Amount::read_xdr(r)?,
        })
    }
}
