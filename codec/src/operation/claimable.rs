//! # Claimable Balances
//!
//! A claimable balance parks funds on the ledger for up to ten claimants,
//! each gated by a predicate tree:
//!
//! ```text
//! 0 Unconditional
//! 1 And(a, b)              two-element array on the wire
//! 2 Or(a, b)               two-element array on the wire
//! 3 Not(p)                 optional on the wire, must be present
//! 4 BeforeAbsoluteTime(t)  unix seconds
//! 5 BeforeRelativeTime(s)  seconds since the balance was created
//! ```
//!
//! The tree is recursive, so decoding runs each level through
//! [`XdrReader::nested`] and a hostile buffer cannot blow the stack.
//! Building additionally caps the tree at [`MAX_PREDICATE_DEPTH`] levels,
//! which is what validators accept.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::account::AccountId;
use crate::amount::Amount;
use crate::asset::Asset;
use crate::config::{MAX_CLAIMANTS, MAX_PREDICATE_DEPTH};
use crate::error::{CodecError, Result};
use crate::xdr::{Hash, ReadXdr, WriteXdr, XdrReader, XdrWriter};

const PREDICATE_UNCONDITIONAL: i32 = 0;
const PREDICATE_AND: i32 = 1;
const PREDICATE_OR: i32 = 2;
const PREDICATE_NOT: i32 = 3;
const PREDICATE_BEFORE_ABSOLUTE_TIME: i32 = 4;
const PREDICATE_BEFORE_RELATIVE_TIME: i32 = 5;

const CLAIMANT_TYPE_V0: i32 = 0;
const CLAIMABLE_BALANCE_ID_TYPE_V0: i32 = 0;

// ---------------------------------------------------------------------------
// ClaimPredicate
// ---------------------------------------------------------------------------

/// Condition under which a claimant may take the balance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimPredicate {
    Unconditional,
    And(Box<ClaimPredicate>, Box<ClaimPredicate>),
    Or(Box<ClaimPredicate>, Box<ClaimPredicate>),
    Not(Box<ClaimPredicate>),
    BeforeAbsoluteTime(i64),
    BeforeRelativeTime(i64),
}

impl ClaimPredicate {
    pub fn and(a: ClaimPredicate, b: ClaimPredicate) -> Self {
        Self::And(Box::new(a), Box::new(b))
    }

    pub fn or(a: ClaimPredicate, b: ClaimPredicate) -> Self {
        Self::Or(Box::new(a), Box::new(b))
    }

    pub fn not(p: ClaimPredicate) -> Self {
        Self::Not(Box::new(p))
    }

    /// Levels in the tree; a lone leaf is depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Self::And(a, b) | Self::Or(a, b) => 1 + a.depth().max(b.depth()),
            Self::Not(p) => 1 + p.depth(),
            _ => 1,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let depth = self.depth();
        if depth > MAX_PREDICATE_DEPTH {
            return Err(CodecError::constraint(format!(
                "claim predicate is {} levels deep, limit is {}",
                depth, MAX_PREDICATE_DEPTH
            )));
        }
        Ok(())
    }

    fn read_pair(r: &mut XdrReader<'_>) -> Result<(Box<Self>, Box<Self>)> {
        let len = r.read_u32()?;
        if len != 2 {
            return Err(CodecError::malformed(format!(
                "compound predicate must have 2 children, got {}",
                len
            )));
        }
        let a = r.nested(Self::read_xdr)?;
        let b = r.nested(Self::read_xdr)?;
        Ok((Box::new(a), Box::new(b)))
    }
}

impl WriteXdr for ClaimPredicate {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        match self {
            Self::Unconditional => w.write_i32(PREDICATE_UNCONDITIONAL),
            Self::And(a, b) | Self::Or(a, b) => {
                let discriminant = if matches!(self, Self::And(..)) {
                    PREDICATE_AND
                } else {
                    PREDICATE_OR
                };
                w.write_i32(discriminant);
                w.write_u32(2);
                a.write_xdr(w)?;
                b.write_xdr(w)?;
            }
            Self::Not(p) => {
                w.write_i32(PREDICATE_NOT);
                w.write_bool(true);
                p.write_xdr(w)?;
            }
            Self::BeforeAbsoluteTime(t) => {
                w.write_i32(PREDICATE_BEFORE_ABSOLUTE_TIME);
                w.write_i64(*t);
            }
            Self::BeforeRelativeTime(s) => {
                w.write_i32(PREDICATE_BEFORE_RELATIVE_TIME);
                w.write_i64(*s);
            }
        }
        Ok(())
    }
}

impl ReadXdr for ClaimPredicate {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        match r.read_i32()? {
            PREDICATE_UNCONDITIONAL => Ok(Self::Unconditional),
            PREDICATE_AND => {
                let (a, b) = Self::read_pair(r)?;
                Ok(Self::And(a, b))
            }
            PREDICATE_OR => {
                let (a, b) = Self::read_pair(r)?;
                Ok(Self::Or(a, b))
            }
            PREDICATE_NOT => {
                if !r.read_bool()? {
                    return Err(CodecError::malformed("negated predicate is absent"));
                }
                Ok(Self::Not(Box::new(r.nested(Self::read_xdr)?)))
            }
            PREDICATE_BEFORE_ABSOLUTE_TIME => Ok(Self::BeforeAbsoluteTime(r.read_i64()?)),
            PREDICATE_BEFORE_RELATIVE_TIME => Ok(Self::BeforeRelativeTime(r.read_i64()?)),
            other => Err(CodecError::malformed(format!(
                "unknown claim predicate type {}",
                other
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Claimant
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Claimant {
    pub destination: AccountId,
    pub predicate: ClaimPredicate,
}

impl WriteXdr for Claimant {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        w.write_i32(CLAIMANT_TYPE_V0);
        self.destination.write_xdr(w)?;
        self.predicate.write_xdr(w)
    }
}

impl ReadXdr for Claimant {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        match r.read_i32()? {
            CLAIMANT_TYPE_V0 => Ok(Self {
                destination: AccountId::read_xdr(r)?,
                predicate: ClaimPredicate::read_xdr(r)?,
            }),
            other => Err(CodecError::malformed(format!(
                "unknown claimant type {}",
                other
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// ClaimableBalanceId
// ---------------------------------------------------------------------------

/// Id of a claimable balance.
///
/// The text form is the hex of the whole XDR union, type word included
/// (`00000000` followed by the hash), matching what network tooling prints.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClaimableBalanceId(pub Hash);

impl ClaimableBalanceId {
    pub fn to_hex(&self) -> String {
        format!("{:08x}{}", CLAIMABLE_BALANCE_ID_TYPE_V0, self.0.to_hex())
    }
}

impl WriteXdr for ClaimableBalanceId {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        w.write_i32(CLAIMABLE_BALANCE_ID_TYPE_V0);
        self.0.write_xdr(w)
    }
}

impl ReadXdr for ClaimableBalanceId {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        match r.read_i32()? {
            CLAIMABLE_BALANCE_ID_TYPE_V0 => Ok(Self(Hash::read_xdr(r)?)),
            other => Err(CodecError::malformed(format!(
                "unknown claimable balance id type {}",
                other
            ))),
        }
    }
}

impl FromStr for ClaimableBalanceId {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = hex::decode(s)
            .map_err(|e| CodecError::malformed(format!("invalid balance id hex: {}", e)))?;
        Self::from_xdr(&bytes)
    }
}

impl fmt::Display for ClaimableBalanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ClaimableBalanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClaimableBalanceId({})", self.to_hex())
    }
}

impl Serialize for ClaimableBalanceId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ClaimableBalanceId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Parks `amount` of `asset` for one to ten claimants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreateClaimableBalanceOp {
    pub asset: Asset,
    pub amount: Amount,
    pub claimants: Vec<Claimant>,
}

impl CreateClaimableBalanceOp {
    pub fn validate(&self) -> Result<()> {
        if self.claimants.is_empty() || self.claimants.len() > MAX_CLAIMANTS {
            return Err(CodecError::constraint(format!(
                "claimable balance needs 1-{} claimants, got {}",
                MAX_CLAIMANTS,
                self.claimants.len()
            )));
        }
        self.claimants
            .iter()
            .try_for_each(|claimant| claimant.predicate.validate())
    }
}

impl WriteXdr for CreateClaimableBalanceOp {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        self.asset.write_xdr(w)?;
        self.amount.write_xdr(w)?;
        w.write_array(&self.claimants, MAX_CLAIMANTS)
    }
}

impl ReadXdr for CreateClaimableBalanceOp {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        Ok(Self {
            asset: Asset::read_xdr(r)?,
            amount: Amount::read_xdr(r)?,
            claimants: r.read_array(MAX_CLAIMANTS)?,
        })
    }
}

/// Claims a balance; also the payload shape of clawback-claimable-balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClaimClaimableBalanceOp {
    pub balance_id: ClaimableBalanceId,
}

impl WriteXdr for ClaimClaimableBalanceOp {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        self.balance_id.write_xdr(w)
    }
}

impl ReadXdr for ClaimClaimableBalanceOp {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        Ok(Self {
            balance_id: ClaimableBalanceId::read_xdr(r)?,
        })
    }
}

/// Issuer reclaims a balance holding its asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClawbackClaimableBalanceOp {
    pub balance_id: ClaimableBalanceId,
}

impl WriteXdr for ClawbackClaimableBalanceOp {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        self.balance_id.write_xdr(w)
    }
}

impl ReadXdr for ClawbackClaimableBalanceOp {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        Ok(Self {
            balance_id: ClaimableBalanceId::read_xdr(r)?,
        })
    }
}
