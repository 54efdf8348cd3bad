//! Liquidity pool deposit and withdrawal.

use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::asset::{PoolId, Price};
use crate::error::{CodecError, Result};
use crate::xdr::{Hash, ReadXdr, WriteXdr, XdrReader, XdrWriter};

/// Deposits up to the given amounts of both pool assets, provided the pool
/// price sits within `[min_price, max_price]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LiquidityPoolDepositOp {
    pub liquidity_pool_id: PoolId,
    pub max_amount_a: Amount,
    pub max_amount_b: Amount,
    pub min_price: Price,
    pub max_price: Price,
}

impl LiquidityPoolDepositOp {
    pub fn validate(&self) -> Result<()> {
        self.min_price.validate()?;
        self.max_price.validate()?;
        // Cross-multiplied in i64 so neither side rounds.
        let min = i64::from(self.min_price.n) * i64::from(self.max_price.d);
        let max = i64::from(self.max_price.n) * i64::from(self.min_price.d);
        if min > max {
            return Err(CodecError::constraint(format!(
                "min price {} is above max price {}",
                self.min_price, self.max_price
            )));
        }
        Ok(())
    }
}

impl WriteXdr for LiquidityPoolDepositOp {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        self.liquidity_pool_id.write_xdr(w)?;
        self.max_amount_a.write_xdr(w)?;
        self.max_amount_b.write_xdr(w)?;
        self.min_price.write_xdr(w)?;
        self.max_price.write_xdr(w)
    }
}

impl ReadXdr for LiquidityPoolDepositOp {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        Ok(Self {
            liquidity_pool_id: Hash::read_xdr(r)?,
            max_amount_a: Amount::read_xdr(r)?,
            max_amount_b: Amount::read_xdr(r)?,
            min_price: Price::read_xdr(r)?,
            max_price: Price::read_xdr(r)?,
        })
    }
}

/// Redeems `amount` pool shares for at least the given amounts of each asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LiquidityPoolWithdrawOp {
    pub liquidity_pool_id: PoolId,
    pub amount: Amount,
    pub min_amount_a: Amount,
    pub min_amount_b: Amount,
}

impl WriteXdr for LiquidityPoolWithdrawOp {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        self.liquidity_pool_id.write_xdr(w)?;
        self.amount.write_xdr(w)?;
        self.min_amount_a.write_xdr(w)?;
        self.min_amount_b.write_xdr(w)
    }
}

impl ReadXdr for LiquidityPoolWithdrawOp {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        Ok(Self {
            liquidity_pool_id: Hash::read_xdr(r)?,
            amount: Amount::read_xdr(r)?,
            min_amount_a: Amount::read_xdr(r)?,
            min_amount_b: Amount::read_xdr(r)?,
        })
    }
}
