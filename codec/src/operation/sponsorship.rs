//! Reserve sponsorship: begin/end bracket a sponsored sequence of
//! operations, and revoke hands a sponsored entry or signer back.

use serde::{Deserialize, Serialize};

use super::claimable::ClaimableBalanceId;
use super::options::SignerKey;
use crate::account::AccountId;
use crate::asset::{PoolId, TrustLineAsset};
use crate::config::MAX_DATA_NAME_LENGTH;
use crate::error::{CodecError, Result};
use crate::xdr::{Hash, ReadXdr, WriteXdr, XdrReader, XdrWriter};

const LEDGER_ENTRY_ACCOUNT: i32 = 0;
const LEDGER_ENTRY_TRUSTLINE: i32 = 1;
const LEDGER_ENTRY_OFFER: i32 = 2;
const LEDGER_ENTRY_DATA: i32 = 3;
const LEDGER_ENTRY_CLAIMABLE_BALANCE: i32 = 4;
const LEDGER_ENTRY_LIQUIDITY_POOL: i32 = 5;
const LEDGER_ENTRY_CONTRACT_DATA: i32 = 6;
const LEDGER_ENTRY_CONTRACT_CODE: i32 = 7;
const LEDGER_ENTRY_CONFIG_SETTING: i32 = 8;
const LEDGER_ENTRY_TTL: i32 = 9;

const REVOKE_SPONSORSHIP_LEDGER_ENTRY: i32 = 0;
const REVOKE_SPONSORSHIP_SIGNER: i32 = 1;

/// Starts sponsoring reserves for `sponsored_id` until the matching end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BeginSponsoringFutureReservesOp {
    pub sponsored_id: AccountId,
}

impl WriteXdr for BeginSponsoringFutureReservesOp {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        self.sponsored_id.write_xdr(w)
    }
}

impl ReadXdr for BeginSponsoringFutureReservesOp {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        Ok(Self {
            sponsored_id: AccountId::read_xdr(r)?,
        })
    }
}

// ---------------------------------------------------------------------------
// LedgerKey
// ---------------------------------------------------------------------------

/// Key of a ledger entry whose sponsorship can be revoked.
///
/// Contract data keys (arm 6) embed contract values this codec does not
/// model and decode as malformed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LedgerKey {
    Account { account_id: AccountId },
    Trustline { account_id: AccountId, asset: TrustLineAsset },
    Offer { seller_id: AccountId, offer_id: i64 },
    Data { account_id: AccountId, data_name: String },
    ClaimableBalance { balance_id: ClaimableBalanceId },
    LiquidityPool { liquidity_pool_id: PoolId },
    ContractCode { hash: Hash },
    ConfigSetting { config_setting_id: i32 },
    Ttl { key_hash: Hash },
}

impl LedgerKey {
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Data { data_name, .. }
                if data_name.is_empty() || data_name.len() > MAX_DATA_NAME_LENGTH =>
            {
                Err(CodecError::constraint(format!(
                    "data name must be 1-{} bytes, got {}",
                    MAX_DATA_NAME_LENGTH,
                    data_name.len()
                )))
            }
            _ => Ok(()),
        }
    }
}

impl WriteXdr for LedgerKey {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        match self {
            Self::Account { account_id } => {
                w.write_i32(LEDGER_ENTRY_ACCOUNT);
                account_id.write_xdr(w)
            }
            Self::Trustline { account_id, asset } => {
                w.write_i32(LEDGER_ENTRY_TRUSTLINE);
                account_id.write_xdr(w)?;
                asset.write_xdr(w)
            }
            Self::Offer { seller_id, offer_id } => {
                w.write_i32(LEDGER_ENTRY_OFFER);
                seller_id.write_xdr(w)?;
                w.write_i64(*offer_id);
                Ok(())
            }
            Self::Data {
                account_id,
                data_name,
            } => {
                w.write_i32(LEDGER_ENTRY_DATA);
                account_id.write_xdr(w)?;
                w.write_string(data_name, MAX_DATA_NAME_LENGTH)
            }
            Self::ClaimableBalance { balance_id } => {
                w.write_i32(LEDGER_ENTRY_CLAIMABLE_BALANCE);
                balance_id.write_xdr(w)
            }
            Self::LiquidityPool { liquidity_pool_id } => {
                w.write_i32(LEDGER_ENTRY_LIQUIDITY_POOL);
                liquidity_pool_id.write_xdr(w)
            }
            Self::ContractCode { hash } => {
                w.write_i32(LEDGER_ENTRY_CONTRACT_CODE);
                hash.write_xdr(w)
            }
            Self::ConfigSetting { config_setting_id } => {
                w.write_i32(LEDGER_ENTRY_CONFIG_SETTING);
                w.write_i32(*config_setting_id);
                Ok(())
            }
            Self::Ttl { key_hash } => {
                w.write_i32(LEDGER_ENTRY_TTL);
                key_hash.write_xdr(w)
            }
        }
    }
}

impl ReadXdr for LedgerKey {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        match r.read_i32()? {
            LEDGER_ENTRY_ACCOUNT => Ok(Self::Account {
                account_id: AccountId::read_xdr(r)?,
            }),
            LEDGER_ENTRY_TRUSTLINE => Ok(Self::Trustline {
                account_id: AccountId::read_xdr(r)?,
                asset: TrustLineAsset::read_xdr(r)?,
            }),
            LEDGER_ENTRY_OFFER => Ok(Self::Offer {
                seller_id: AccountId::read_xdr(r)?,
                offer_id: r.read_i64()?,
            }),
            LEDGER_ENTRY_DATA => Ok(Self::Data {
                account_id: AccountId::read_xdr(r)?,
                data_name: r.read_string(MAX_DATA_NAME_LENGTH)?,
            }),
            LEDGER_ENTRY_CLAIMABLE_BALANCE => Ok(Self::ClaimableBalance {
                balance_id: ClaimableBalanceId::read_xdr(r)?,
            }),
            LEDGER_ENTRY_LIQUIDITY_POOL => Ok(Self::LiquidityPool {
                liquidity_pool_id: Hash::read_xdr(r)?,
            }),
            LEDGER_ENTRY_CONTRACT_CODE => Ok(Self::ContractCode {
                hash: Hash::read_xdr(r)?,
            }),
            LEDGER_ENTRY_CONFIG_SETTING => Ok(Self::ConfigSetting {
                config_setting_id: r.read_i32()?,
            }),
            LEDGER_ENTRY_TTL => Ok(Self::Ttl {
                key_hash: Hash::read_xdr(r)?,
            }),
            LEDGER_ENTRY_CONTRACT_DATA => {
                tracing::debug!("contract data ledger keys are not modelled");
                Err(CodecError::malformed("contract data ledger key is not supported"))
            }
            other => Err(CodecError::malformed(format!(
                "unknown ledger entry type {}",
                other
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// RevokeSponsorship
// ---------------------------------------------------------------------------

/// Revokes sponsorship of a ledger entry or of one signer on an account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevokeSponsorshipOp {
    LedgerEntry(LedgerKey),
    Signer {
        account_id: AccountId,
        signer_key: SignerKey,
    },
}

impl RevokeSponsorshipOp {
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::LedgerEntry(key) => key.validate(),
            Self::Signer { signer_key, .. } => signer_key.validate(),
        }
    }
}

impl WriteXdr for RevokeSponsorshipOp {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        match self {
            Self::LedgerEntry(key) => {
                w.write_i32(REVOKE_SPONSORSHIP_LEDGER_ENTRY);
                key.write_xdr(w)
            }
            Self::Signer {
                account_id,
                signer_key,
            } => {
                w.write_i32(REVOKE_SPONSORSHIP_SIGNER);
                account_id.write_xdr(w)?;
                signer_key.write_xdr(w)
            }
        }
    }
}

impl ReadXdr for RevokeSponsorshipOp {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        match r.read_i32()? {
            REVOKE_SPONSORSHIP_LEDGER_ENTRY => Ok(Self::LedgerEntry(LedgerKey::read_xdr(r)?)),
            REVOKE_SPONSORSHIP_SIGNER => Ok(Self::Signer {
                account_id: AccountId::read_xdr(r)?,
                signer_key: SignerKey::read_xdr(r)?,
            }),
            other => Err(CodecError::malformed(format!(
                "unknown revoke sponsorship type {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::Asset;

    fn account(seed: u8) -> AccountId {
        AccountId::from_bytes([seed; 32])
    }

    #[test]
    fn ledger_keys_roundtrip() {
        let keys = vec![
            LedgerKey::Account {
                account_id: account(1),
            },
            LedgerKey::Trustline {
                account_id: account(1),
                asset: Asset::credit("USD", account(2)).unwrap().into(),
            },
            LedgerKey::Offer {
                seller_id: account(3),
                offer_id: 12345,
            },
            LedgerKey::Data {
                account_id: account(4),
                data_name: "config".into(),
            },
            LedgerKey::ClaimableBalance {
                balance_id: ClaimableBalanceId(Hash([5; 32])),
            },
            LedgerKey::LiquidityPool {
                liquidity_pool_id: Hash([6; 32]),
            },
            LedgerKey::ContractCode { hash: Hash([7; 32]) },
            LedgerKey::ConfigSetting {
                config_setting_id: 3,
            },
            LedgerKey::Ttl {
                key_hash: Hash([9; 32]),
            },
        ];
        for key in keys {
            let op = RevokeSponsorshipOp::LedgerEntry(key);
            op.validate().unwrap();
            assert_eq!(RevokeSponsorshipOp::from_xdr(&op.to_xdr().unwrap()).unwrap(), op);
        }
    }

    #[test]
    fn contract_data_key_is_malformed() {
        let wire = [0, 0, 0, 0, 0, 0, 0, 6];
        assert!(matches!(
            RevokeSponsorshipOp::from_xdr(&wire),
            Err(CodecError::MalformedXdr(_))
        ));
    }

    #[test]
    fn signer_arm_roundtrip() {
        let op = RevokeSponsorshipOp::Signer {
            account_id: account(1),
            signer_key: SignerKey::HashX { hash: Hash([2; 32]) },
        };
        let wire = op.to_xdr().unwrap();
        assert_eq!(&wire[..4], &[0, 0, 0, 1]);
        assert_eq!(RevokeSponsorshipOp::from_xdr(&wire).unwrap(), op);
    }
}
