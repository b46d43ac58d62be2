//! # Fixed-Point Formatting
//!
//! On-chain values are signed integers scaled by `10^decimals`. These helpers
//! move between the scaled integer and its exact decimal string without ever
//! going through floating point.

use crate::domain::CodecError;
use num_bigint::{BigInt, BigUint, Sign};

/// Decimals used by every stream value on the settlement bridge.
pub const STREAM_VALUE_DECIMALS: u32 = 18;

/// Render `value / 10^decimals` as a plain decimal string.
///
/// Trailing fractional zeros are stripped and a zero fraction drops the
/// decimal point entirely, so `format_fixed_point(0, d) == "0"`.
pub fn format_fixed_point(value: &BigInt, decimals: u32) -> String {
    let negative = value.sign() == Sign::Minus;
    let magnitude = value.magnitude();
    let scale = BigUint::from(10u32).pow(decimals);

    let integer_part = magnitude / &scale;
    let fractional_part = magnitude % &scale;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&integer_part.to_string());

    if decimals > 0 {
        let padded = format!(
            "{:0>width$}",
            fractional_part.to_string(),
            width = decimals as usize
        );
        let fraction = padded.trim_end_matches('0');
        if !fraction.is_empty() {
            out.push('.');
            out.push_str(fraction);
        }
    }
    out
}

/// Parse a decimal string back to its integer scaled by `10^decimals`.
///
/// Accepts `[-]digits[.digits]` with at most `decimals` fraction digits.
/// Exponents, signs other than a leading `-`, and whitespace are rejected.
pub fn parse_fixed_point(text: &str, decimals: u32) -> Result<BigInt, CodecError> {
    let invalid = |reason: &str| CodecError::validation("value", format!("{reason}: {text:?}"));

    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (int_digits, frac_digits) = match body.split_once('.') {
        Some((int_digits, frac_digits)) => {
            if frac_digits.is_empty() {
                return Err(invalid("empty fraction"));
            }
            (int_digits, frac_digits)
        }
        None => (body, ""),
    };

    if int_digits.is_empty() {
        return Err(invalid("missing integer digits"));
    }
    if !int_digits.bytes().all(|b| b.is_ascii_digit())
        || !frac_digits.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid("not a decimal number"));
    }
    if frac_digits.len() > decimals as usize {
        return Err(invalid("too many fraction digits"));
    }

    let scaled = format!(
        "{int_digits}{frac_digits:0<width$}",
        width = decimals as usize
    );
    let magnitude =
        BigUint::parse_bytes(scaled.as_bytes(), 10).ok_or_else(|| invalid("not a decimal number"))?;
    let sign = if negative { Sign::Minus } else { Sign::Plus };
    Ok(BigInt::from_biguint(sign, magnitude))
}
