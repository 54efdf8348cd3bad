//! Operation construction via the builder pattern.
//!
//! [`OperationBuilder`] collects a body and an optional source account,
//! then `build()` runs every limit check at once. Callers either get a
//! finished [`Operation`] or an error; there is no half-built value to
//! observe.

use super::{Operation, OperationBody};
use crate::account::MuxedAccount;
use crate::error::Result;

/// Fluent builder for [`Operation`].
///
/// ```
/// use lumen_codec::account::{AccountId, MuxedAccount};
/// use lumen_codec::amount::Amount;
/// use lumen_codec::asset::Asset;
/// use lumen_codec::operation::{OperationBuilder, PaymentOp};
///
/// let destination = MuxedAccount::new(AccountId::from_bytes([7; 32]));
/// let op = OperationBuilder::new(PaymentOp {
///     destination,
///     asset: Asset::native(),
///     amount: Amount::from_decimal("12.5").unwrap(),
/// })
/// .build()
/// .unwrap();
/// assert!(op.source_account.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct OperationBuilder {
    source_account: Option<MuxedAccount>,
    body: OperationBody,
}

impl OperationBuilder {
    /// Starts a builder for `body`, with no source account override.
    pub fn new(body: impl Into<OperationBody>) -> Self {
        Self {
            source_account: None,
            body: body.into(),
        }
    }

    /// Runs the operation on behalf of `account` instead of the
    /// transaction's source.
    pub fn source_account(mut self, account: MuxedAccount) -> Self {
        self.source_account = Some(account);
        self
    }

    /// Validates and produces the finished [`Operation`].
    pub fn build(self) -> Result<Operation> {
        let op = Operation {
            source_account: self.source_account,
            body: self.body,
        };
        op.validate()?;
        Ok(op)
    }
}
