//! # Operations
//!
//! An operation is one state change inside a transaction. On the wire:
//!
//! ```text
//! +-----------------------+----------+---------------------------+
//! | source: MuxedAccount? | type i32 | payload (per type)        |
//! | 0/1 word [+ account]  |          | fields in schema order    |
//! +-----------------------+----------+---------------------------+
//! ```
//!
//! An absent source means "the transaction's own source account".
//!
//! The body is a closed [`OperationBody`] enum, one variant per discriminant
//! the network defines. Host-function invocation (24) carries smart-contract
//! payloads this codec does not model, so decoding it fails with
//! [`CodecError::UnknownOperationType`] exactly like a discriminant nobody
//! has heard of.
//!
//! ## Validation
//!
//! [`Operation::validate`] enforces the limits validators apply (path hops,
//! claimant counts, data sizes, flag overlap, price signs). It runs in
//! [`OperationBuilder::build`] and again at the top of every encode, so a
//! value assembled by hand cannot reach the wire in a shape the network
//! would reject. Decoding trusts its input beyond the structural rules of
//! the format.
//!
//! ## Module Organization
//!
//! ```text
//! payment.rs     — create account, payment, path payments, clawback
//! offer.rs       — manage sell/buy offer, passive sell offer
//! options.rs     — set options, signer keys, manage data, bump sequence
//! trust.rs       — change trust, allow trust, set trust line flags
//! claimable.rs   — claim predicates, claimants, claimable balance ops
//! sponsorship.rs — begin sponsoring, ledger keys, revoke sponsorship
//! pool.rs        — liquidity pool deposit / withdraw
//! footprint.rs   — extend footprint TTL, restore footprint
//! builder.rs     — OperationBuilder
//! ```

pub mod builder;
pub mod claimable;
pub mod footprint;
pub mod offer;
pub mod options;
pub mod payment;
pub mod pool;
pub mod sponsorship;
pub mod trust;

pub use builder::OperationBuilder;
pub use claimable::{
    ClaimClaimableBalanceOp, ClaimPredicate, ClaimableBalanceId, Claimant,
    ClawbackClaimableBalanceOp, CreateClaimableBalanceOp,
};
pub use footprint::{ExtendFootprintTtlOp, RestoreFootprintOp};
pub use offer::{CreatePassiveSellOfferOp, ManageBuyOfferOp, ManageSellOfferOp};
pub use options::{BumpSequenceOp, ManageDataOp, SetOptionsOp, Signer, SignerKey};
pub use payment::{
    ClawbackOp, CreateAccountOp, PathPaymentStrictReceiveOp, PathPaymentStrictSendOp, PaymentOp,
};
pub use pool::{LiquidityPoolDepositOp, LiquidityPoolWithdrawOp};
pub use sponsorship::{BeginSponsoringFutureReservesOp, LedgerKey, RevokeSponsorshipOp};
pub use trust::{AllowTrustOp, ChangeTrustOp, SetTrustLineFlagsOp};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::account::MuxedAccount;
use crate::error::{CodecError, Result};
use crate::xdr::{ReadXdr, WriteXdr, XdrReader, XdrWriter};

// ---------------------------------------------------------------------------
// OperationType
// ---------------------------------------------------------------------------

/// Wire discriminant of every operation this codec models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    CreateAccount = 0,
    Payment = 1,
    PathPaymentStrictReceive = 2,
    ManageSellOffer = 3,
    CreatePassiveSellOffer = 4,
    SetOptions = 5,
    ChangeTrust = 6,
    AllowTrust = 7,
    AccountMerge = 8,
    Inflation = 9,
    ManageData = 10,
    BumpSequence = 11,
    ManageBuyOffer = 12,
    PathPaymentStrictSend = 13,
    CreateClaimableBalance = 14,
    ClaimClaimableBalance = 15,
    BeginSponsoringFutureReserves = 16,
    EndSponsoringFutureReserves = 17,
    RevokeSponsorship = 18,
    Clawback = 19,
    ClawbackClaimableBalance = 20,
    SetTrustLineFlags = 21,
    LiquidityPoolDeposit = 22,
    LiquidityPoolWithdraw = 23,
    ExtendFootprintTtl = 25,
    RestoreFootprint = 26,
}

impl OperationType {
    /// Every modelled type in discriminant order.
    pub const ALL: [OperationType; 26] = [
        Self::CreateAccount,
        Self::Payment,
        Self::PathPaymentStrictReceive,
        Self::ManageSellOffer,
        Self::CreatePassiveSellOffer,
        Self::SetOptions,
        Self::ChangeTrust,
        Self::AllowTrust,
        Self::AccountMerge,
        Self::Inflation,
        Self::ManageData,
        Self::BumpSequence,
        Self::ManageBuyOffer,
        Self::PathPaymentStrictSend,
        Self::CreateClaimableBalance,
        Self::ClaimClaimableBalance,
        Self::BeginSponsoringFutureReserves,
        Self::EndSponsoringFutureReserves,
        Self::RevokeSponsorship,
        Self::Clawback,
        Self::ClawbackClaimableBalance,
        Self::SetTrustLineFlags,
        Self::LiquidityPoolDeposit,
        Self::LiquidityPoolWithdraw,
        Self::ExtendFootprintTtl,
        Self::RestoreFootprint,
    ];

    /// Maps a wire discriminant back to its type.
    pub fn from_i32(discriminant: i32) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|ty| ty.discriminant() == discriminant)
    }

    pub fn discriminant(self) -> i32 {
        self as i32
    }

    /// Schema name, e.g. `path_payment_strict_send`.
    pub fn name(self) -> &'static str {
        match self {
            Self::CreateAccount => "create_account",
            Self::Payment => "payment",
            Self::PathPaymentStrictReceive => "path_payment_strict_receive",
            Self::ManageSellOffer => "manage_sell_offer",
            Self::CreatePassiveSellOffer => "create_passive_sell_offer",
            Self::SetOptions => "set_options",
            Self::ChangeTrust => "change_trust",
            Self::AllowTrust => "allow_trust",
            Self::AccountMerge => "account_merge",
            Self::Inflation => "inflation",
            Self::ManageData => "manage_data",
            Self::BumpSequence => "bump_sequence",
            Self::ManageBuyOffer => "manage_buy_offer",
            Self::PathPaymentStrictSend => "path_payment_strict_send",
            Self::CreateClaimableBalance => "create_claimable_balance",
            Self::ClaimClaimableBalance => "claim_claimable_balance",
            Self::BeginSponsoringFutureReserves => "begin_sponsoring_future_reserves",
            Self::EndSponsoringFutureReserves => "end_sponsoring_future_reserves",
            Self::RevokeSponsorship => "revoke_sponsorship",
            Self::Clawback => "clawback",
            Self::ClawbackClaimableBalance => "clawback_claimable_balance",
            Self::SetTrustLineFlags => "set_trust_line_flags",
            Self::LiquidityPoolDeposit => "liquidity_pool_deposit",
            Self::LiquidityPoolWithdraw => "liquidity_pool_withdraw",
            Self::ExtendFootprintTtl => "extend_footprint_ttl",
            Self::RestoreFootprint => "restore_footprint",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// OperationBody
// ---------------------------------------------------------------------------

/// Typed payload of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "body", rename_all = "snake_case")]
pub enum OperationBody {
    CreateAccount(CreateAccountOp),
    Payment(PaymentOp),
    PathPaymentStrictReceive(PathPaymentStrictReceiveOp),
    ManageSellOffer(ManageSellOfferOp),
    CreatePassiveSellOffer(CreatePassiveSellOfferOp),
    SetOptions(SetOptionsOp),
    ChangeTrust(ChangeTrustOp),
    AllowTrust(AllowTrustOp),
    /// Merges the source account into the destination.
    AccountMerge(MuxedAccount),
    Inflation,
    ManageData(ManageDataOp),
    BumpSequence(BumpSequenceOp),
    ManageBuyOffer(ManageBuyOfferOp),
    PathPaymentStrictSend(PathPaymentStrictSendOp),
    CreateClaimableBalance(CreateClaimableBalanceOp),
    ClaimClaimableBalance(ClaimClaimableBalanceOp),
    BeginSponsoringFutureReserves(BeginSponsoringFutureReservesOp),
    EndSponsoringFutureReserves,
    RevokeSponsorship(RevokeSponsorshipOp),
    Clawback(ClawbackOp),
    ClawbackClaimableBalance(ClawbackClaimableBalanceOp),
    SetTrustLineFlags(SetTrustLineFlagsOp),
    LiquidityPoolDeposit(LiquidityPoolDepositOp),
    LiquidityPoolWithdraw(LiquidityPoolWithdrawOp),
    ExtendFootprintTtl(ExtendFootprintTtlOp),
    RestoreFootprint(RestoreFootprintOp),
}

impl OperationBody {
    pub fn operation_type(&self) -> OperationType {
        match self {
            Self::CreateAccount(_) => OperationType::CreateAccount,
            Self::Payment(_) => OperationType::Payment,
            Self::PathPaymentStrictReceive(_) => OperationType::PathPaymentStrictReceive,
            Self::ManageSellOffer(_) => OperationType::ManageSellOffer,
            Self::CreatePassiveSellOffer(_) => OperationType::CreatePassiveSellOffer,
            Self::SetOptions(_) => OperationType::SetOptions,
            Self::ChangeTrust(_) => OperationType::ChangeTrust,
            Self::AllowTrust(_) => OperationType::AllowTrust,
            Self::AccountMerge(_) => OperationType::AccountMerge,
            Self::Inflation => OperationType::Inflation,
            Self::ManageData(_) => OperationType::ManageData,
            Self::BumpSequence(_) => OperationType::BumpSequence,
            Self::ManageBuyOffer(_) => OperationType::ManageBuyOffer,
            Self::PathPaymentStrictSend(_) => OperationType::PathPaymentStrictSend,
            Self::CreateClaimableBalance(_) => OperationType::CreateClaimableBalance,
            Self::ClaimClaimableBalance(_) => OperationType::ClaimClaimableBalance,
            Self::BeginSponsoringFutureReserves(_) => OperationType::BeginSponsoringFutureReserves,
            Self::EndSponsoringFutureReserves => OperationType::EndSponsoringFutureReserves,
            Self::RevokeSponsorship(_) => OperationType::RevokeSponsorship,
            Self::Clawback(_) => OperationType::Clawback,
            Self::ClawbackClaimableBalance(_) => OperationType::ClawbackClaimableBalance,
            Self::SetTrustLineFlags(_) => OperationType::SetTrustLineFlags,
            Self::LiquidityPoolDeposit(_) => OperationType::LiquidityPoolDeposit,
            Self::LiquidityPoolWithdraw(_) => OperationType::LiquidityPoolWithdraw,
            Self::ExtendFootprintTtl(_) => OperationType::ExtendFootprintTtl,
            Self::RestoreFootprint(_) => OperationType::RestoreFootprint,
        }
    }

    /// Checks the payload against the network's structural limits.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::PathPaymentStrictReceive(op) => op.validate(),
            Self::PathPaymentStrictSend(op) => op.validate(),
            Self::ManageSellOffer(op) => op.validate(),
            Self::ManageBuyOffer(op) => op.validate(),
            Self::CreatePassiveSellOffer(op) => op.validate(),
            Self::SetOptions(op) => op.validate(),
            Self::ChangeTrust(op) => op.validate(),
            Self::AllowTrust(op) => op.validate(),
            Self::ManageData(op) => op.validate(),
            Self::CreateClaimableBalance(op) => op.validate(),
            Self::RevokeSponsorship(op) => op.validate(),
            Self::SetTrustLineFlags(op) => op.validate(),
            Self::LiquidityPoolDeposit(op) => op.validate(),
            Self::CreateAccount(_)
            | Self::Payment(_)
            | Self::AccountMerge(_)
            | Self::Inflation
            | Self::BumpSequence(_)
            | Self::ClaimClaimableBalance(_)
            | Self::BeginSponsoringFutureReserves(_)
            | Self::EndSponsoringFutureReserves
            | Self::Clawback(_)
            | Self::ClawbackClaimableBalance(_)
            | Self::LiquidityPoolWithdraw(_)
            | Self::ExtendFootprintTtl(_)
            | Self::RestoreFootprint(_) => Ok(()),
        }
    }

    fn write_payload(&self, w: &mut XdrWriter) -> Result<()> {
        match self {
            Self::CreateAccount(op) => op.write_xdr(w),
            Self::Payment(op) => op.write_xdr(w),
            Self::PathPaymentStrictReceive(op) => op.write_xdr(w),
            Self::ManageSellOffer(op) => op.write_xdr(w),
            Self::CreatePassiveSellOffer(op) => op.write_xdr(w),
            Self::SetOptions(op) => op.write_xdr(w),
            Self::ChangeTrust(op) => op.write_xdr(w),
            Self::AllowTrust(op) => op.write_xdr(w),
            Self::AccountMerge(destination) => destination.write_xdr(w),
            Self::Inflation | Self::EndSponsoringFutureReserves => Ok(()),
            Self::ManageData(op) => op.write_xdr(w),
            Self::BumpSequence(op) => op.write_xdr(w),
            Self::ManageBuyOffer(op) => op.write_xdr(w),
            Self::PathPaymentStrictSend(op) => op.write_xdr(w),
            Self::CreateClaimableBalance(op) => op.write_xdr(w),
            Self::ClaimClaimableBalance(op) => op.write_xdr(w),
            Self::BeginSponsoringFutureReserves(op) => op.write_xdr(w),
            Self::RevokeSponsorship(op) => op.write_xdr(w),
            Self::Clawback(op) => op.write_xdr(w),
            Self::ClawbackClaimableBalance(op) => op.write_xdr(w),
            Self::SetTrustLineFlags(op) => op.write_xdr(w),
            Self::LiquidityPoolDeposit(op) => op.write_xdr(w),
            Self::LiquidityPoolWithdraw(op) => op.write_xdr(w),
            Self::ExtendFootprintTtl(op) => op.write_xdr(w),
            Self::RestoreFootprint(op) => op.write_xdr(w),
        }
    }

    fn read_payload(ty: OperationType, r: &mut XdrReader<'_>) -> Result<Self> {
        Ok(match ty {
            OperationType::CreateAccount => Self::CreateAccount(ReadXdr::read_xdr(r)?),
            OperationType::Payment => Self::Payment(ReadXdr::read_xdr(r)?),
            OperationType::PathPaymentStrictReceive => {
                Self::PathPaymentStrictReceive(ReadXdr::read_xdr(r)?)
            }
            OperationType::ManageSellOffer => Self::ManageSellOffer(ReadXdr::read_xdr(r)?),
            OperationType::CreatePassiveSellOffer => {
                Self::CreatePassiveSellOffer(ReadXdr::read_xdr(r)?)
            }
            OperationType::SetOptions => Self::SetOptions(ReadXdr::read_xdr(r)?),
            OperationType::ChangeTrust => Self::ChangeTrust(ReadXdr::read_xdr(r)?),
            OperationType::AllowTrust => Self::AllowTrust(ReadXdr::read_xdr(r)?),
            OperationType::AccountMerge => Self::AccountMerge(ReadXdr::read_xdr(r)?),
            OperationType::Inflation => Self::Inflation,
            OperationType::ManageData => Self::ManageData(ReadXdr::read_xdr(r)?),
            OperationType::BumpSequence => Self::BumpSequence(ReadXdr::read_xdr(r)?),
            OperationType::ManageBuyOffer => Self::ManageBuyOffer(ReadXdr::read_xdr(r)?),
            OperationType::PathPaymentStrictSend => {
                Self::PathPaymentStrictSend(ReadXdr::read_xdr(r)?)
            }
            OperationType::CreateClaimableBalance => {
                Self::CreateClaimableBalance(ReadXdr::read_xdr(r)?)
            }
            OperationType::ClaimClaimableBalance => {
                Self::ClaimClaimableBalance(ReadXdr::read_xdr(r)?)
            }
            OperationType::BeginSponsoringFutureReserves => {
                Self::BeginSponsoringFutureReserves(ReadXdr::read_xdr(r)?)
            }
            OperationType::EndSponsoringFutureReserves => Self::EndSponsoringFutureReserves,
            OperationType::RevokeSponsorship => Self::RevokeSponsorship(ReadXdr::read_xdr(r)?),
            OperationType::Clawback => Self::Clawback(ReadXdr::read_xdr(r)?),
            OperationType::ClawbackClaimableBalance => {
                Self::ClawbackClaimableBalance(ReadXdr::read_xdr(r)?)
            }
            OperationType::SetTrustLineFlags => Self::SetTrustLineFlags(ReadXdr::read_xdr(r)?),
            OperationType::LiquidityPoolDeposit => {
                Self::LiquidityPoolDeposit(ReadXdr::read_xdr(r)?)
            }
            OperationType::LiquidityPoolWithdraw => {
                Self::LiquidityPoolWithdraw(ReadXdr::read_xdr(r)?)
            }
            OperationType::ExtendFootprintTtl => Self::ExtendFootprintTtl(ReadXdr::read_xdr(r)?),
            OperationType::RestoreFootprint => Self::RestoreFootprint(ReadXdr::read_xdr(r)?),
        })
    }
}

impl WriteXdr for OperationBody {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        w.write_i32(self.operation_type().discriminant());
        self.write_payload(w)
    }
}

impl ReadXdr for OperationBody {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        let discriminant = r.read_i32()?;
        let ty = OperationType::from_i32(discriminant).ok_or_else(|| {
            tracing::debug!(discriminant, "unknown operation type on the wire");
            CodecError::UnknownOperationType(discriminant)
        })?;
        Self::read_payload(ty, r)
    }
}

macro_rules! body_from {
    ($($op:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$op> for OperationBody {
                fn from(op: $op) -> Self {
                    Self::$variant(op)
                }
            }
        )*
    };
}

body_from! {
    CreateAccountOp => CreateAccount,
    PaymentOp => Payment,
    PathPaymentStrictReceiveOp => PathPaymentStrictReceive,
    ManageSellOfferOp => ManageSellOffer,
    CreatePassiveSellOfferOp => CreatePassiveSellOffer,
    SetOptionsOp => SetOptions,
    ChangeTrustOp => ChangeTrust,
    AllowTrustOp => AllowTrust,
    ManageDataOp => ManageData,
    BumpSequenceOp => BumpSequence,
    ManageBuyOfferOp => ManageBuyOffer,
    PathPaymentStrictSendOp => PathPaymentStrictSend,
    CreateClaimableBalanceOp => CreateClaimableBalance,
    ClaimClaimableBalanceOp => ClaimClaimableBalance,
    BeginSponsoringFutureReservesOp => BeginSponsoringFutureReserves,
    RevokeSponsorshipOp => RevokeSponsorship,
    ClawbackOp => Clawback,
    ClawbackClaimableBalanceOp => ClawbackClaimableBalance,
    SetTrustLineFlagsOp => SetTrustLineFlags,
    LiquidityPoolDepositOp => LiquidityPoolDeposit,
    LiquidityPoolWithdrawOp => LiquidityPoolWithdraw,
    ExtendFootprintTtlOp => ExtendFootprintTtl,
    RestoreFootprintOp => RestoreFootprint,
}

// ---------------------------------------------------------------------------
// Operation
// ---------------------------------------------------------------------------

/// A single ledger operation.
///
/// Build through [`OperationBuilder`] to get validation up front; values
/// assembled directly are validated when encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Operation {
    /// Account the operation acts on; `None` defers to the transaction's
    /// source.
    pub source_account: Option<MuxedAccount>,
    pub body: OperationBody,
}

impl Operation {
    pub fn operation_type(&self) -> OperationType {
        self.body.operation_type()
    }

    pub fn validate(&self) -> Result<()> {
        self.body.validate()
    }
}

impl WriteXdr for Operation {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        if let Err(e) = self.validate() {
            tracing::debug!(operation = %self.operation_type(), error = %e, "refusing to encode");
            return Err(e);
        }
        w.write_optional(self.source_account.as_ref())?;
        self.body.write_xdr(w)
    }
}

impl ReadXdr for Operation {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        Ok(Self {
            source_account: r.read_optional()?,
            body: OperationBody::read_xdr(r)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
