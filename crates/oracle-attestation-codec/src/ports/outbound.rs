//! # Outbound Ports
//!
//! Narrow traits for the two external codecs the framing logic delegates to:
//! the per-value canonical codec and the Ethereum ABI library.

use crate::domain::CanonicalValue;
use ethereum_types::U256;
use thiserror::Error;

/// Failure reported by a [`ValueCodec`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ValueCodecError(pub String);

/// Failure reported by an [`AbiCodec`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct AbiError(pub String);

/// Per-value canonical codec - outbound port.
///
/// Every encoding must be self-describing and length-determinable from its own
/// bytes. The framing layer never inspects a value's type, only its length.
pub trait ValueCodec: Send + Sync {
    /// Encode one value.
    fn encode(&self, value: &CanonicalValue) -> Result<Vec<u8>, ValueCodecError>;

    /// Decode exactly one value occupying all of `bytes`.
    fn decode(&self, bytes: &[u8]) -> Result<CanonicalValue, ValueCodecError>;
}

/// ABI parameter kinds the codec packs and unpacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbiKind {
    /// `address`
    Address,
    /// `bytes32`
    FixedBytes32,
    /// `string`
    String,
    /// `bytes`
    Bytes,
    /// `bool`
    Bool,
    /// `uint256[]`
    Uint256Array,
    /// `int256[]`
    Int256Array,
    /// `bytes[][]`
    BytesMatrix,
}

/// A typed ABI value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AbiValue {
    /// `address`
    Address([u8; 20]),
    /// `bytes32`
    FixedBytes32([u8; 32]),
    /// `string`
    String(String),
    /// `bytes`
    Bytes(Vec<u8>),
    /// `bool`
    Bool(bool),
    /// `uint256[]`
    Uint256Array(Vec<U256>),
    /// `int256[]`, each word in two's complement.
    Int256Array(Vec<U256>),
    /// `bytes[][]`
    BytesMatrix(Vec<Vec<Vec<u8>>>),
}

impl AbiValue {
    /// Kind of this value.
    pub fn kind(&self) -> AbiKind {
        match self {
            AbiValue::Address(_) => AbiKind::Address,
            AbiValue::FixedBytes32(_) => AbiKind::FixedBytes32,
            AbiValue::String(_) => AbiKind::String,
            AbiValue::Bytes(_) => AbiKind::Bytes,
            AbiValue::Bool(_) => AbiKind::Bool,
            AbiValue::Uint256Array(_) => AbiKind::Uint256Array,
            AbiValue::Int256Array(_) => AbiKind::Int256Array,
            AbiValue::BytesMatrix(_) => AbiKind::BytesMatrix,
        }
    }
}

/// Ethereum ABI codec - outbound port.
///
/// `pack` produces the standard head/tail layout of a top-level parameter list;
/// `unpack` is its inverse for the given kinds.
pub trait AbiCodec: Send + Sync {
    /// Encode a parameter list.
    fn pack(&self, values: &[AbiValue]) -> Vec<u8>;

    /// Decode a parameter list of the given kinds.
    fn unpack(&self, kinds: &[AbiKind], data: &[u8]) -> Result<Vec<AbiValue>, AbiError>;
}
