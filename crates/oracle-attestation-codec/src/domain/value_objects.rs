//! # Domain Value Objects
//!
//! Immutable value types carried by attestation payloads.

use super::errors::CodecError;
use crate::algorithms::fixed_point::format_fixed_point;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Length of an EVM address in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Length of a `0x`-prefixed hex address string.
pub const ADDRESS_HEX_LEN: usize = 2 + ADDRESS_LEN * 2;

/// Action id: value strictly above a threshold.
pub const ACTION_PRICE_ABOVE_THRESHOLD: u16 = 6;
/// Action id: value strictly below a threshold.
pub const ACTION_PRICE_BELOW_THRESHOLD: u16 = 7;
/// Action id: value inside a range.
pub const ACTION_VALUE_IN_RANGE: u16 = 8;
/// Action id: value equals a target.
pub const ACTION_VALUE_EQUALS: u16 = 9;

/// Binary-outcome action ids registered with the settlement bridge.
pub const BINARY_ACTION_IDS: [u16; 4] = [
    ACTION_PRICE_ABOVE_THRESHOLD,
    ACTION_PRICE_BELOW_THRESHOLD,
    ACTION_VALUE_IN_RANGE,
    ACTION_VALUE_EQUALS,
];

/// A self-describing scalar or array produced by the oracle's value codec.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CanonicalValue {
    /// SQL-style null.
    Null,
    /// Signed 64-bit integer.
    Int64(i64),
    /// UTF-8 text.
    Text(String),
    /// Opaque bytes.
    Bytes(Vec<u8>),
    /// Boolean.
    Bool(bool),
    /// RFC 4122 UUID.
    Uuid(Uuid),
    /// Fixed-point decimal: `unscaled * 10^-scale`.
    Decimal {
        /// Unscaled integer.
        unscaled: BigInt,
        /// Number of implied fraction digits.
        scale: u16,
    },
    /// Homogeneous list of scalars.
    Array(Vec<CanonicalValue>),
}

impl CanonicalValue {
    /// Short type name, used in logs and error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            CanonicalValue::Null => "null",
            CanonicalValue::Int64(_) => "int8",
            CanonicalValue::Text(_) => "text",
            CanonicalValue::Bytes(_) => "bytea",
            CanonicalValue::Bool(_) => "bool",
            CanonicalValue::Uuid(_) => "uuid",
            CanonicalValue::Decimal { .. } => "numeric",
            CanonicalValue::Array(_) => "array",
        }
    }

    /// Returns true for `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, CanonicalValue::Null)
    }
}

impl fmt::Display for CanonicalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanonicalValue::Null => write!(f, "null"),
            CanonicalValue::Int64(v) => write!(f, "{v}"),
            CanonicalValue::Text(s) => write!(f, "{s}"),
            CanonicalValue::Bytes(b) => write!(f, "0x{}", hex::encode(b)),
            CanonicalValue::Bool(b) => write!(f, "{b}"),
            CanonicalValue::Uuid(u) => write!(f, "{u}"),
            CanonicalValue::Decimal { unscaled, scale } => {
                write!(f, "{}", format_fixed_point(unscaled, u32::from(*scale)))
            }
            CanonicalValue::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<i64> for CanonicalValue {
    fn from(v: i64) -> Self {
        CanonicalValue::Int64(v)
    }
}

impl From<bool> for CanonicalValue {
    fn from(v: bool) -> Self {
        CanonicalValue::Bool(v)
    }
}

impl From<&str> for CanonicalValue {
    fn from(v: &str) -> Self {
        CanonicalValue::Text(v.to_string())
    }
}

impl From<String> for CanonicalValue {
    fn from(v: String) -> Self {
        CanonicalValue::Text(v)
    }
}

impl From<Vec<u8>> for CanonicalValue {
    fn from(v: Vec<u8>) -> Self {
        CanonicalValue::Bytes(v)
    }
}

impl From<Uuid> for CanonicalValue {
    fn from(v: Uuid) -> Self {
        CanonicalValue::Uuid(v)
    }
}

/// How an action's result blob is laid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultKind {
    /// `ABI(bool)`, exactly one 32-byte word.
    BinaryOutcome,
    /// `ABI(uint256[] timestamps, int256[] values)`.
    NumericSeries,
}

impl ResultKind {
    /// Classify an action id against the registered binary-outcome set.
    pub fn for_action(action_id: u16, binary_action_ids: &[u16]) -> Self {
        if binary_action_ids.contains(&action_id) {
            ResultKind::BinaryOutcome
        } else {
            ResultKind::NumericSeries
        }
    }
}

/// Parse a `0x`-prefixed, 40-hex-digit address.
pub fn parse_address(field: &'static str, text: &str) -> Result<[u8; ADDRESS_LEN], CodecError> {
    if text.len() != ADDRESS_HEX_LEN {
        return Err(CodecError::validation(
            field,
            format!("expected {ADDRESS_HEX_LEN} characters, got {}", text.len()),
        ));
    }
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .ok_or_else(|| CodecError::validation(field, "missing 0x prefix"))?;
    let mut out = [0u8; ADDRESS_LEN];
    hex::decode_to_slice(digits, &mut out)
        .map_err(|e| CodecError::validation(field, format!("invalid hex: {e}")))?;
    Ok(out)
}

/// Render address bytes as lowercase `0x` hex.
pub fn format_address(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Returns true if `text` is a well-formed hex address.
pub fn is_hex_address(text: &str) -> bool {
    parse_address("address", text).is_ok()
}
