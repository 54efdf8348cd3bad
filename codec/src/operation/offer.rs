//! Order book operations.
//!
//! An `offer_id` of zero creates a new offer; any other id updates or (with
//! a zero amount) deletes the existing one.

use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::asset::{Asset, Price};
use crate::error::Result;
use crate::xdr::{ReadXdr, WriteXdr, XdrReader, XdrWriter};

/// Sell `amount` of `selling` at `price` (in units of `buying` per `selling`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManageSellOfferOp {
    pub selling: Asset,
    pub buying: Asset,
    pub amount: Amount,
    pub price: Price,
    pub offer_id: i64,
}

impl ManageSellOfferOp {
    pub fn validate(&self) -> Result<()> {
        self.price.validate()
    }
}

impl WriteXdr for ManageSellOfferOp {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        self.selling.write_xdr(w)?;
        self.buying.write_xdr(w)?;
        self.amount.write_xdr(w)?;
        self.price.write_xdr(w)?;
        w.write_i64(self.offer_id);
        Ok(())
    }
}

impl ReadXdr for ManageSellOfferOp {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        Ok(Self {
            selling: Asset::read_xdr(r)?,
            buying: Asset::read_xdr(r)?,
            amount: Amount::read_xdr(r)?,
            price: Price::read_xdr(r)?,
            offer_id: r.read_i64()?,
        })
    }
}

/// Buy `buy_amount` of `buying`; `price` is in units of `selling` per
/// `buying`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManageBuyOfferOp {
    pub selling: Asset,
    pub buying: Asset,
    pub buy_amount: Amount,
    pub price: Price,
    pub offer_id: i64,
}

impl ManageBuyOfferOp {
    pub fn validate(&self) -> Result<()> {
        self.price.validate()
    }
}

impl WriteXdr for ManageBuyOfferOp {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        self.selling.write_xdr(w)?;
        self.buying.write_xdr(w)?;
        self.buy_amount.write_xdr(w)?;
        self.price.write_xdr(w)?;
        w.write_i64(self.offer_id);
        Ok(())
    }
}

impl ReadXdr for ManageBuyOfferOp {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        Ok(Self {
            selling: Asset::read_xdr(r)?,
            buying: Asset::read_xdr(r)?,
            buy_amount: Amount::read_xdr(r)?,
            price: Price::read_xdr(r)?,
            offer_id: r.read_i64()?,
        })
    }
}

/// A sell offer that never takes an opposing offer at the same price.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreatePassiveSellOfferOp {
    pub selling: Asset,
    pub buying: Asset,
    pub amount: Amount,
    pub price: Price,
}

impl CreatePassiveSellOfferOp {
    pub fn validate(&self) -> Result<()> {
        self.price.validate()
    }
}

impl WriteXdr for CreatePassiveSellOfferOp {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        self.selling.write_xdr(w)?;
        self.buying.write_xdr(w)?;
        self.amount.write_xdr(w)?;
        self.price.write_xdr(w)
    }
}

impl ReadXdr for CreatePassiveSellOfferOp {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        Ok(Self {
            selling: Asset::read_xdr(r)?,
            buying: Asset::read_xdr(r)?,
            amount: Amount::read_xdr(r)?,
            price: Price::read_xdr(r)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::AccountId;
    use crate::error::CodecError;

    #[test]
    fn zero_price_rejected() {
        let op = ManageSellOfferOp {
            selling: Asset::Native,
            buying: Asset::credit("USD", AccountId::from_bytes([1; 32])).unwrap(),
            amount: Amount::from_stroops(5),
            price: Price { n: 0, d: 1 },
            offer_id: 0,
        };
        assert!(matches!(op.validate(), Err(CodecError::ConstraintViolation(_))));
    }

    #[test]
    fn sell_offer_ends_with_offer_id() {
        let op = ManageSellOfferOp {
            selling: Asset::Native,
            buying: Asset::Native,
            amount: Amount::from_stroops(5),
            price: Price { n: 1, d: 2 },
            offer_id: 77,
        };
        let wire = op.to_xdr().unwrap();
        assert_eq!(wire.len(), 4 + 4 + 8 + 8 + 8);
        assert_eq!(&wire[wire.len() - 8..], &77i64.to_be_bytes());
        assert_eq!(ManageSellOfferOp::from_xdr(&wire).unwrap(), op);
    }
}
