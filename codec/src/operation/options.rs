//! # Account Configuration Operations
//!
//! `SetOptions` is the widest payload in the catalogue: nine independent
//! optional fields, each its own XDR optional on the wire. A field left as
//! `None` means "leave unchanged", not "reset".
//!
//! Also here: signer keys, manage-data entries and sequence bumps.

use serde::{Deserialize, Serialize};

use crate::account::AccountId;
use crate::config::{
    ED25519_KEY_LENGTH, MASK_ACCOUNT_FLAGS, MAX_DATA_NAME_LENGTH, MAX_DATA_VALUE_LENGTH,
    MAX_HOME_DOMAIN_LENGTH, MAX_SIGNED_PAYLOAD_LENGTH, MAX_WEIGHT, SIGNER_KEY_TYPE_ED25519,
    SIGNER_KEY_TYPE_ED25519_SIGNED_PAYLOAD, SIGNER_KEY_TYPE_HASH_X, SIGNER_KEY_TYPE_PRE_AUTH_TX,
};
use crate::error::{CodecError, Result};
use crate::xdr::{hex_bytes, hex_bytes_opt, Hash, ReadXdr, WriteXdr, XdrReader, XdrWriter};

/// Rejects flag pairs that both set and clear a bit, or touch unknown bits.
pub(crate) fn check_flags(clear: u32, set: u32, mask: u32, what: &str) -> Result<()> {
    if clear & set != 0 {
        return Err(CodecError::constraint(format!(
            "{} flags {:#x} are both set and cleared",
            what,
            clear & set
        )));
    }
    if (clear | set) & !mask != 0 {
        return Err(CodecError::constraint(format!(
            "{} flags {:#x} outside mask {:#x}",
            what,
            (clear | set) & !mask,
            mask
        )));
    }
    Ok(())
}

fn check_weight(value: Option<u32>, field: &str) -> Result<()> {
    match value {
        Some(v) if v > MAX_WEIGHT => Err(CodecError::constraint(format!(
            "{} {} exceeds {}",
            field, v, MAX_WEIGHT
        ))),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// SignerKey / Signer
// ---------------------------------------------------------------------------

/// Something that can sign for an account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SignerKey {
    /// An ed25519 key.
    Ed25519 { key: AccountId },
    /// Hash of a pre-authorized transaction.
    PreAuthTx { hash: Hash },
    /// SHA-256 hash of a secret preimage.
    HashX { hash: Hash },
    /// An ed25519 key that signs a specific payload.
    Ed25519SignedPayload {
        key: AccountId,
        #[serde(with = "hex_bytes")]
        payload: Vec<u8>,
    },
}

impl SignerKey {
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Ed25519SignedPayload { payload, .. } if payload.len() > MAX_SIGNED_PAYLOAD_LENGTH => {
                Err(CodecError::constraint(format!(
                    "signed payload is {} bytes, limit is {}",
                    payload.len(),
                    MAX_SIGNED_PAYLOAD_LENGTH
                )))
            }
            _ => Ok(()),
        }
    }
}

impl WriteXdr for SignerKey {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        match self {
            Self::Ed25519 { key } => {
                w.write_i32(SIGNER_KEY_TYPE_ED25519);
                w.write_fixed_opaque(key.as_bytes());
            }
            Self::PreAuthTx { hash } => {
                w.write_i32(SIGNER_KEY_TYPE_PRE_AUTH_TX);
                hash.write_xdr(w)?;
            }
            Self::HashX { hash } => {
                w.write_i32(SIGNER_KEY_TYPE_HASH_X);
                hash.write_xdr(w)?;
            }
            Self::Ed25519SignedPayload { key, payload } => {
                w.write_i32(SIGNER_KEY_TYPE_ED25519_SIGNED_PAYLOAD);
                w.write_fixed_opaque(key.as_bytes());
                w.write_var_opaque(payload, MAX_SIGNED_PAYLOAD_LENGTH)?;
            }
        }
        Ok(())
    }
}

impl ReadXdr for SignerKey {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        match r.read_i32()? {
            SIGNER_KEY_TYPE_ED25519 => Ok(Self::Ed25519 {
                key: AccountId::from_bytes(r.read_fixed::<ED25519_KEY_LENGTH>()?),
            }),
            SIGNER_KEY_TYPE_PRE_AUTH_TX => Ok(Self::PreAuthTx {
                hash: Hash::read_xdr(r)?,
            }),
            SIGNER_KEY_TYPE_HASH_X => Ok(Self::HashX {
                hash: Hash::read_xdr(r)?,
            }),
            SIGNER_KEY_TYPE_ED25519_SIGNED_PAYLOAD => Ok(Self::Ed25519SignedPayload {
                key: AccountId::from_bytes(r.read_fixed::<ED25519_KEY_LENGTH>()?),
                payload: r.read_var_opaque(MAX_SIGNED_PAYLOAD_LENGTH)?,
            }),
            other => Err(CodecError::UnsupportedKeyType(other)),
        }
    }
}

/// A signer key and its weight. Weight zero removes the signer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signer {
    pub key: SignerKey,
    pub weight: u32,
}

impl WriteXdr for Signer {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        self.key.write_xdr(w)?;
        w.write_u32(self.weight);
        Ok(())
    }
}

impl ReadXdr for Signer {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        Ok(Self {
            key: SignerKey::read_xdr(r)?,
            weight: r.read_u32()?,
        })
    }
}

// ---------------------------------------------------------------------------
// SetOptions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SetOptionsOp {
    pub inflation_dest: Option<AccountId>,
    pub clear_flags: Option<u32>,
    pub set_flags: Option<u32>,
    pub master_weight: Option<u32>,
    pub low_threshold: Option<u32>,
    pub med_threshold: Option<u32>,
    pub high_threshold: Option<u32>,
    pub home_domain: Option<String>,
    pub signer: Option<Signer>,
}

impl SetOptionsOp {
    pub fn validate(&self) -> Result<()> {
        check_flags(
            self.clear_flags.unwrap_or(0),
            self.set_flags.unwrap_or(0),
            MASK_ACCOUNT_FLAGS,
            "account",
        )?;
        check_weight(self.master_weight, "master weight")?;
        check_weight(self.low_threshold, "low threshold")?;
        check_weight(self.med_threshold, "medium threshold")?;
        check_weight(self.high_threshold, "high threshold")?;
        if let Some(domain) = &self.home_domain {
            if domain.len() > MAX_HOME_DOMAIN_LENGTH {
                return Err(CodecError::constraint(format!(
                    "home domain is {} bytes, limit is {}",
                    domain.len(),
                    MAX_HOME_DOMAIN_LENGTH
                )));
            }
        }
        if let Some(signer) = &self.signer {
            check_weight(Some(signer.weight), "signer weight")?;
            signer.key.validate()?;
        }
        Ok(())
    }
}

impl WriteXdr for SetOptionsOp {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        w.write_optional(self.inflation_dest.as_ref())?;
        w.write_optional(self.clear_flags.as_ref())?;
        w.write_optional(self.set_flags.as_ref())?;
        w.write_optional(self.master_weight.as_ref())?;
        w.write_optional(self.low_threshold.as_ref())?;
        w.write_optional(self.med_threshold.as_ref())?;
        w.write_optional(self.high_threshold.as_ref())?;
        match &self.home_domain {
            Some(domain) => {
                w.write_bool(true);
                w.write_string(domain, MAX_HOME_DOMAIN_LENGTH)?;
            }
            None => w.write_bool(false),
        }
        w.write_optional(self.signer.as_ref())
    }
}

impl ReadXdr for SetOptionsOp {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        Ok(Self {
            inflation_dest: r.read_optional()?,
            clear_flags: r.read_optional()?,
            set_flags: r.read_optional()?,
            master_weight: r.read_optional()?,
            low_threshold: r.read_optional()?,
            med_threshold: r.read_optional()?,
            high_threshold: r.read_optional()?,
            home_domain: if r.read_bool()? {
                Some(r.read_string(MAX_HOME_DOMAIN_LENGTH)?)
            } else {
                None
            },
            signer: r.read_optional()?,
        })
    }
}

// ---------------------------------------------------------------------------
// ManageData
// ---------------------------------------------------------------------------

/// Sets, replaces or (with no value) deletes a named data entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManageDataOp {
    pub data_name: String,
    #[serde(with = "hex_bytes_opt")]
    pub data_value: Option<Vec<u8>>,
}

impl ManageDataOp {
    pub fn validate(&self) -> Result<()> {
        if self.data_name.is_empty() || self.data_name.len() > MAX_DATA_NAME_LENGTH {
            return Err(CodecError::constraint(format!(
                "data name must be 1-{} bytes, got {}",
                MAX_DATA_NAME_LENGTH,
                self.data_name.len()
            )));
        }
        if let Some(value) = &self.data_value {
            if value.len() > MAX_DATA_VALUE_LENGTH {
                return Err(CodecError::constraint(format!(
                    "data value is {} bytes, limit is {}",
                    value.len(),
                    MAX_DATA_VALUE_LENGTH
                )));
            }
        }
        Ok(())
    }
}

impl WriteXdr for ManageDataOp {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        w.write_string(&self.data_name, MAX_DATA_NAME_LENGTH)?;
        match &self.data_value {
            Some(value) => {
                w.write_bool(true);
                w.write_var_opaque(value, MAX_DATA_VALUE_LENGTH)
            }
            None => {
                w.write_bool(false);
                Ok(())
            }
        }
    }
}

impl ReadXdr for ManageDataOp {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        let data_name = r.read_string(MAX_DATA_NAME_LENGTH)?;
        let data_value = if r.read_bool()? {
            Some(r.read_var_opaque(MAX_DATA_VALUE_LENGTH)?)
        } else {
            None
        };
        Ok(Self {
            data_name,
            data_value,
        })
    }
}

// ---------------------------------------------------------------------------
// BumpSequence
// ---------------------------------------------------------------------------

/// Raises the source account's sequence number to `bump_to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BumpSequenceOp {
    pub bump_to: i64,
}

impl WriteXdr for BumpSequenceOp {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        w.write_i64(self.bump_to);
        Ok(())
    }
}

impl ReadXdr for BumpSequenceOp {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        Ok(Self {
            bump_to: r.read_i64()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AUTH_REQUIRED_FLAG, AUTH_REVOCABLE_FLAG};

    #[test]
    fn empty_set_options_is_nine_absent_words() {
        let wire = SetOptionsOp::default().to_xdr().unwrap();
        assert_eq!(wire, vec![0u8; 36]);
        assert_eq!(SetOptionsOp::from_xdr(&wire).unwrap(), SetOptionsOp::default());
    }

    #[test]
    fn overlapping_account_flags_rejected() {
        let op = SetOptionsOp {
            clear_flags: Some(AUTH_REQUIRED_FLAG | AUTH_REVOCABLE_FLAG),
            set_flags: Some(AUTH_REVOCABLE_FLAG),
            ..Default::default()
        };
        assert!(matches!(op.validate(), Err(CodecError::ConstraintViolation(_))));

        let unknown_bit = SetOptionsOp {
            set_flags: Some(0x10),
            ..Default::default()
        };
        assert!(unknown_bit.validate().is_err());
    }

    #[test]
    fn thresholds_capped() {
        let op = SetOptionsOp {
            high_threshold: Some(256),
            ..Default::default()
        };
        assert!(op.validate().is_err());
        let ok = SetOptionsOp {
            high_threshold: Some(255),
            home_domain: Some("example.com".into()),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn full_set_options_roundtrip() {
        let op = SetOptionsOp {
            inflation_dest: Some(AccountId::from_bytes([3; 32])),
            clear_flags: Some(AUTH_REVOCABLE_FLAG),
            set_flags: Some(AUTH_REQUIRED_FLAG),
            master_weight: Some(1),
            low_threshold: Some(2),
            med_threshold: Some(3),
            high_threshold: Some(4),
            home_domain: Some("lumen.example".into()),
            signer: Some(Signer {
                key: SignerKey::Ed25519SignedPayload {
                    key: AccountId::from_bytes([9; 32]),
                    payload: vec![1, 2, 3, 4, 5],
                },
                weight: 10,
            }),
        };
        op.validate().unwrap();
        assert_eq!(SetOptionsOp::from_xdr(&op.to_xdr().unwrap()).unwrap(), op);
    }

    #[test]
    fn signed_payload_capped() {
        let key = SignerKey::Ed25519SignedPayload {
            key: AccountId::from_bytes([9; 32]),
            payload: vec![0; 65],
        };
        assert!(key.validate().is_err());
        assert!(key.to_xdr().is_err());
    }

    #[test]
    fn unknown_signer_key_type() {
        assert!(matches!(
            SignerKey::from_xdr(&[0, 0, 0, 9]),
            Err(CodecError::UnsupportedKeyType(9))
        ));
    }

    #[test]
    fn manage_data_limits() {
        let name_at_limit = ManageDataOp {
            data_name: "n".repeat(64),
            data_value: Some(vec![0xAB; 64]),
        };
        assert!(name_at_limit.validate().is_ok());

        let long_value = ManageDataOp {
            data_name: "config".into(),
            data_value: Some(vec![0; 65]),
        };
        assert!(matches!(
            long_value.validate(),
            Err(CodecError::ConstraintViolation(_))
        ));

        let empty_name = ManageDataOp {
            data_name: String::new(),
            data_value: None,
        };
        assert!(empty_name.validate().is_err());
    }

    #[test]
    fn manage_data_delete_has_absent_value() {
        let op = ManageDataOp {
            data_name: "key".into(),
            data_value: None,
        };
        let wire = op.to_xdr().unwrap();
        assert_eq!(wire, vec![0, 0, 0, 3, b'k', b'e', b'y', 0, 0, 0, 0, 0]);
        assert_eq!(ManageDataOp::from_xdr(&wire).unwrap(), op);
    }

    #[test]
    fn manage_data_json_uses_hex() {
        let op = ManageDataOp {
            data_name: "k".into(),
            data_value: Some(vec![0xde, 0xad]),
        };
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["data_value"], "dead");
        let back: ManageDataOp = serde_json::from_value(json).unwrap();
        assert_eq!(back, op);
    }
}
