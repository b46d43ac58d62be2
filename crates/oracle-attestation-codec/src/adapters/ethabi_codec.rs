//! Ethereum ABI Adapter
//!
//! Implements the `AbiCodec` port on top of the `ethabi` crate. Only the
//! mapping between port values and `ethabi::Token` lives here; head/tail
//! layout is entirely the library's.

use crate::ports::outbound::{AbiCodec, AbiError, AbiKind, AbiValue};
use ethabi::{ParamType, Token};
use ethereum_types::{H160, U256};

/// `ethabi`-backed ABI codec.
#[derive(Clone, Copy, Debug, Default)]
pub struct EthAbiCodec;

impl AbiCodec for EthAbiCodec {
    fn pack(&self, values: &[AbiValue]) -> Vec<u8> {
        let tokens: Vec<Token> = values.iter().map(to_token).collect();
        ethabi::encode(&tokens)
    }

    fn unpack(&self, kinds: &[AbiKind], data: &[u8]) -> Result<Vec<AbiValue>, AbiError> {
        let types: Vec<ParamType> = kinds.iter().map(|k| param_type(*k)).collect();
        let tokens = ethabi::decode(&types, data).map_err(|e| AbiError(e.to_string()))?;
        kinds
            .iter()
            .zip(tokens)
            .map(|(kind, token)| from_token(*kind, token))
            .collect()
    }
}

fn param_type(kind: AbiKind) -> ParamType {
    match kind {
        AbiKind::Address => ParamType::Address,
        AbiKind::FixedBytes32 => ParamType::FixedBytes(32),
        AbiKind::String => ParamType::String,
        AbiKind::Bytes => ParamType::Bytes,
        AbiKind::Bool => ParamType::Bool,
        AbiKind::Uint256Array => ParamType::Array(Box::new(ParamType::Uint(256))),
        AbiKind::Int256Array => ParamType::Array(Box::new(ParamType::Int(256))),
        AbiKind::BytesMatrix => {
            ParamType::Array(Box::new(ParamType::Array(Box::new(ParamType::Bytes))))
        }
    }
}

fn to_token(value: &AbiValue) -> Token {
    match value {
        AbiValue::Address(bytes) => Token::Address(H160::from(*bytes)),
        AbiValue::FixedBytes32(bytes) => Token::FixedBytes(bytes.to_vec()),
        AbiValue::String(s) => Token::String(s.clone()),
        AbiValue::Bytes(b) => Token::Bytes(b.clone()),
        AbiValue::Bool(b) => Token::Bool(*b),
        AbiValue::Uint256Array(words) => {
            Token::Array(words.iter().copied().map(Token::Uint).collect())
        }
        AbiValue::Int256Array(words) => {
            Token::Array(words.iter().copied().map(Token::Int).collect())
        }
        AbiValue::BytesMatrix(rows) => Token::Array(
            rows.iter()
                .map(|row| Token::Array(row.iter().cloned().map(Token::Bytes).collect()))
                .collect(),
        ),
    }
}

fn mismatch(kind: AbiKind, token: &Token) -> AbiError {
    AbiError(format!("expected {kind:?}, decoded {token:?}"))
}

fn words(kind: AbiKind, token: Token) -> Result<Vec<U256>, AbiError> {
    match token {
        Token::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Token::Uint(word) | Token::Int(word) => Ok(word),
                other => Err(mismatch(kind, &other)),
            })
            .collect(),
        other => Err(mismatch(kind, &other)),
    }
}

fn from_token(kind: AbiKind, token: Token) -> Result<AbiValue, AbiError> {
    match (kind, token) {
        (AbiKind::Address, Token::Address(addr)) => Ok(AbiValue::Address(addr.0)),
        (AbiKind::FixedBytes32, Token::FixedBytes(bytes)) => {
            let fixed: [u8; 32] = bytes
                .as_slice()
                .try_into()
                .map_err(|_| AbiError(format!("bytes32 has {} bytes", bytes.len())))?;
            Ok(AbiValue::FixedBytes32(fixed))
        }
        (AbiKind::String, Token::String(s)) => Ok(AbiValue::String(s)),
        (AbiKind::Bytes, Token::Bytes(b)) => Ok(AbiValue::Bytes(b)),
        (AbiKind::Bool, Token::Bool(b)) => Ok(AbiValue::Bool(b)),
        (AbiKind::Uint256Array, token) => Ok(AbiValue::Uint256Array(words(kind, token)?)),
        (AbiKind::Int256Array, token) => Ok(AbiValue::Int256Array(words(kind, token)?)),
        (AbiKind::BytesMatrix, Token::Array(rows)) => {
            let rows = rows
                .into_iter()
                .map(|row| match row {
                    Token::Array(cells) => cells
                        .into_iter()
                        .map(|cell| match cell {
                            Token::Bytes(b) => Ok(b),
                            other => Err(mismatch(kind, &other)),
                        })
                        .collect::<Result<Vec<_>, _>>(),
                    other => Err(mismatch(kind, &other)),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(AbiValue::BytesMatrix(rows))
        }
        (kind, other) => Err(mismatch(kind, &other)),
    }
}
