//! # Amount Codec
//!
//! Humans write amounts as decimals (`"12.5"`); the wire carries a signed
//! 64-bit count of stroops, where one whole unit is `10^7` stroops.
//!
//! ```text
//! "12.5"       -> 125_000_000
//! "-0.0000001" -> -1
//! ```
//!
//! Encoding never rounds. An eighth fractional digit is an error, not
//! something to shave off quietly, because the amount ends up inside a
//! signed transaction and there is no taking it back.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::{AMOUNT_DECIMALS, AMOUNT_SCALE};
use crate::error::{CodecError, Result};
use crate::xdr::{ReadXdr, WriteXdr, XdrReader, XdrWriter};

/// Parses a decimal string into stroops.
///
/// Accepts an optional `+`/`-` sign, one or more integer digits, and an
/// optional `.` followed by one to seven fractional digits. Anything else,
/// including exponents, whitespace and results outside `i64`, fails with
/// [`CodecError::InvalidAmount`].
pub fn encode(input: &str) -> Result<i64> {
    let (negative, body) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (body, None),
    };

    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CodecError::invalid_amount(input, "not a decimal number"));
    }

    let frac_digits = frac_part.unwrap_or("");
    if frac_part.is_some() {
        if frac_digits.is_empty() || !frac_digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CodecError::invalid_amount(input, "not a decimal number"));
        }
        if frac_digits.len() > AMOUNT_DECIMALS as usize {
            return Err(CodecError::invalid_amount(
                input,
                format!("more than {} fractional digits", AMOUNT_DECIMALS),
            ));
        }
    }

    let out_of_range = || CodecError::invalid_amount(input, "out of 64-bit range");

    let mut whole: i128 = 0;
    for digit in int_part.bytes() {
        whole = whole
            .checked_mul(10)
            .and_then(|v| v.checked_add(i128::from(digit - b'0')))
            .ok_or_else(out_of_range)?;
    }

    let mut frac: i128 = 0;
    for digit in frac_digits.bytes() {
        frac = frac * 10 + i128::from(digit - b'0');
    }
    frac *= 10i128.pow(AMOUNT_DECIMALS - frac_digits.len() as u32);

    let magnitude = whole
        .checked_mul(i128::from(AMOUNT_SCALE))
        .and_then(|v| v.checked_add(frac))
        .ok_or_else(out_of_range)?;
    let scaled = if negative { -magnitude } else { magnitude };

    i64::try_from(scaled).map_err(|_| out_of_range())
}

/// Formats stroops as a decimal string.
///
/// Whole values print without a fractional part (`"100"`); otherwise the
/// fraction keeps only the digits it needs (`"1.5"`).
pub fn decode(raw: i64) -> String {
    let scale = AMOUNT_SCALE as u64;
    let magnitude = raw.unsigned_abs();
    let whole = magnitude / scale;
    let frac = magnitude % scale;
    let sign = if raw < 0 { "-" } else { "" };

    if frac == 0 {
        format!("{}{}", sign, whole)
    } else {
        let digits = format!("{:0width$}", frac, width = AMOUNT_DECIMALS as usize);
        format!("{}{}.{}", sign, whole, digits.trim_end_matches('0'))
    }
}

// ---------------------------------------------------------------------------
// Amount
// ---------------------------------------------------------------------------

/// A ledger amount held as raw stroops.
///
/// Serializes as its decimal string in human-readable formats so JSON
/// never passes through a float.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Amount(i64);

impl Amount {
    /// Wraps a raw stroop count.
    pub const fn from_stroops(stroops: i64) -> Self {
        Self(stroops)
    }

    /// Parses a decimal string. See [`encode`].
    pub fn from_decimal(input: &str) -> Result<Self> {
        encode(input).map(Self)
    }

    /// The raw stroop count carried on the wire.
    pub const fn stroops(&self) -> i64 {
        self.0
    }

    /// Decimal text form. See [`decode`].
    pub fn to_decimal(&self) -> String {
        decode(self.0)
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl From<i64> for Amount {
    fn from(stroops: i64) -> Self {
        Self(stroops)
    }
}

impl FromStr for Amount {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_decimal(s)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal())
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amount({})", self.to_decimal())
    }
}

impl WriteXdr for Amount {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        w.write_i64(self.0);
        Ok(())
    }
}

impl ReadXdr for Amount {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        Ok(Self(r.read_i64()?))
    }
}

impl Serialize for Amount {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_decimal())
        } else {
            serializer.serialize_i64(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Self::from_decimal(&s).map_err(serde::de::Error::custom)
        } else {
            i64::deserialize(deserializer).map(Self)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_scales_by_ten_million() {
        assert_eq!(encode("1").unwrap(), 10_000_000);
        assert_eq!(encode("12.5").unwrap(), 125_000_000);
        assert_eq!(encode("0.0000001").unwrap(), 1);
        assert_eq!(encode("-0.0000001").unwrap(), -1);
        assert_eq!(encode("+3.25").unwrap(), 32_500_000);
        assert_eq!(encode("007.10").unwrap(), 71_000_000);
    }

    #[test]
    fn eight_fractional_digits_rejected() {
        let err = encode("0.12345678").unwrap_err();
        assert!(matches!(err, CodecError::InvalidAmount { .. }));
    }

    #[test]
    fn malformed_strings_rejected() {
        for bad in ["", "-", ".", "1.", ".5", "1e5", " 1", "1 ", "1,5", "abc", "1.2.3", "--1", "0x10"] {
            assert!(
                matches!(encode(bad), Err(CodecError::InvalidAmount { .. })),
                "expected rejection for {:?}",
                bad
            );
        }
    }

    #[test]
    fn range_limits() {
        assert_eq!(encode("922337203685.4775807").unwrap(), i64::MAX);
        assert_eq!(encode("-922337203685.4775808").unwrap(), i64::MIN);
        assert!(encode("922337203685.4775808").is_err());
        assert!(encode("-922337203685.4775809").is_err());
        assert!(encode("99999999999999999999999999999999999999999999").is_err());
    }

    #[test]
    fn decode_trims_trailing_zeros() {
        assert_eq!(decode(0), "0");
        assert_eq!(decode(1_000_000_000), "100");
        assert_eq!(decode(15_000_000), "1.5");
        assert_eq!(decode(1), "0.0000001");
        assert_eq!(decode(-1), "-0.0000001");
        assert_eq!(decode(-125_000_000), "-12.5");
    }

    #[test]
    fn extremes_roundtrip() {
        for raw in [i64::MIN, i64::MIN + 1, -1, 0, 1, i64::MAX] {
            assert_eq!(encode(&decode(raw)).unwrap(), raw);
        }
        assert_eq!(decode(i64::MIN), "-922337203685.4775808");
    }

    #[test]
    fn trailing_zero_formatting_is_not_preserved() {
        let raw = encode("5.1000000").unwrap();
        assert_eq!(decode(raw), "5.1");
        assert_eq!(encode(&decode(raw)).unwrap(), raw);
    }

    #[test]
    fn amount_wire_is_signed_big_endian() {
        let amount = Amount::from_stroops(-2);
        assert_eq!(
            amount.to_xdr().unwrap(),
            vec![0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE]
        );
        assert_eq!(Amount::from_xdr(&amount.to_xdr().unwrap()).unwrap(), amount);
    }

    #[test]
    fn amount_serde_uses_decimal_string() {
        let amount: Amount = "42.25".parse().unwrap();
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "\"42.25\"");
        let back: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, amount);
        assert!(serde_json::from_str::<Amount>("\"1.123456789\"").is_err());
    }
}
