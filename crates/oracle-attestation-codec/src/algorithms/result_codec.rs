//! # ABI Result Codec
//!
//! The action id alone decides the result schema:
//!
//! | Kind | Layout |
//! |------|--------|
//! | `BinaryOutcome` | `ABI(bool)`, exactly 32 bytes |
//! | `NumericSeries` | `ABI(uint256[] timestamps, int256[] values)` |
//!
//! Series values are int256 fixed-point numbers rendered through
//! [`format_fixed_point`].

use super::abi_head::{peek_array_len, WORD};
use super::fixed_point::{format_fixed_point, parse_fixed_point};
use crate::config::CodecConfig;
use crate::domain::{
    invariant_result_matches_action, CodecError, DatapointRow, Field, ResultKind, ResultPayload,
    ValueLocation,
};
use crate::ports::outbound::{AbiCodec, AbiKind, AbiValue};
use ethereum_types::U256;
use num_bigint::{BigInt, Sign};
use tracing::debug;

/// Reinterpret a two's-complement int256 word as a signed integer.
pub fn int256_to_bigint(word: U256) -> BigInt {
    let mut buf = [0u8; WORD];
    word.to_big_endian(&mut buf);
    BigInt::from_signed_bytes_be(&buf)
}

/// Two's-complement int256 word for `value`; fails outside the int256 range.
pub fn bigint_to_int256(value: &BigInt) -> Result<U256, CodecError> {
    let bytes = value.to_signed_bytes_be();
    if bytes.len() > WORD {
        return Err(CodecError::validation(
            "value",
            format!("{value} does not fit in int256"),
        ));
    }
    let fill = if value.sign() == Sign::Minus { 0xFF } else { 0x00 };
    let mut buf = [fill; WORD];
    buf[WORD - bytes.len()..].copy_from_slice(&bytes);
    Ok(U256::from_big_endian(&buf))
}

fn malformed(reason: String) -> CodecError {
    CodecError::MalformedValue {
        location: ValueLocation::Field(Field::Result),
        reason,
    }
}

/// Decode a result blob for `action_id`.
pub fn decode_result(
    action_id: u16,
    bytes: &[u8],
    abi: &dyn AbiCodec,
    config: &CodecConfig,
) -> Result<ResultPayload, CodecError> {
    match config.result_kind(action_id) {
        ResultKind::BinaryOutcome => decode_boolean(action_id, bytes, abi),
        ResultKind::NumericSeries => decode_series(action_id, bytes, abi, config),
    }
}

fn decode_boolean(
    action_id: u16,
    bytes: &[u8],
    abi: &dyn AbiCodec,
) -> Result<ResultPayload, CodecError> {
    if bytes.len() != WORD {
        return Err(CodecError::SchemaMismatch {
            action_id,
            reason: format!("boolean result must be {WORD} bytes, got {}", bytes.len()),
        });
    }
    if bytes[..WORD - 1].iter().any(|b| *b != 0) || bytes[WORD - 1] > 1 {
        return Err(malformed(format!(
            "non-canonical bool word 0x{}",
            hex::encode(bytes)
        )));
    }
    match abi
        .unpack(&[AbiKind::Bool], bytes)
        .map_err(|e| malformed(e.to_string()))?
        .as_slice()
    {
        [AbiValue::Bool(outcome)] => Ok(ResultPayload::BooleanOutcome(*outcome)),
        other => Err(malformed(format!("expected one bool, got {other:?}"))),
    }
}

fn decode_series(
    action_id: u16,
    bytes: &[u8],
    abi: &dyn AbiCodec,
    config: &CodecConfig,
) -> Result<ResultPayload, CodecError> {
    if bytes.is_empty() {
        return Ok(ResultPayload::DatapointSeries(Vec::new()));
    }
    if bytes.len() < 2 * WORD || bytes.len() % WORD != 0 {
        return Err(CodecError::SchemaMismatch {
            action_id,
            reason: format!(
                "series result must be a whole number of words with two heads, got {} bytes",
                bytes.len()
            ),
        });
    }

    let timestamps_len = config
        .limits
        .check_rows(peek_array_len(bytes, 0, "timestamps")?)?;
    let values_len = config.limits.check_rows(peek_array_len(bytes, 1, "values")?)?;
    if timestamps_len != values_len {
        return Err(CodecError::SchemaMismatch {
            action_id,
            reason: format!("{timestamps_len} timestamps but {values_len} values"),
        });
    }

    let decoded = abi
        .unpack(&[AbiKind::Uint256Array, AbiKind::Int256Array], bytes)
        .map_err(|e| malformed(e.to_string()))?;
    let (timestamps, values) = match decoded.as_slice() {
        [AbiValue::Uint256Array(timestamps), AbiValue::Int256Array(values)] => {
            (timestamps, values)
        }
        other => return Err(malformed(format!("expected two arrays, got {other:?}"))),
    };
    if timestamps.len() != values.len() {
        return Err(CodecError::SchemaMismatch {
            action_id,
            reason: format!(
                "{} timestamps but {} values",
                timestamps.len(),
                values.len()
            ),
        });
    }

    let rows: Vec<DatapointRow> = timestamps
        .iter()
        .zip(values)
        .map(|(timestamp, value)| DatapointRow {
            timestamp: timestamp.to_string(),
            value: format_fixed_point(&int256_to_bigint(*value), config.fixed_point_decimals),
        })
        .collect();

    debug!(
        "[attestation] Decoded {} datapoints for action {}",
        rows.len(),
        action_id
    );
    Ok(ResultPayload::DatapointSeries(rows))
}

/// Encode a result for `action_id`.
///
/// The variant must match the action id. Series rows are parsed back to
/// uint256 timestamps and int256 fixed-point values.
pub fn encode_result(
    action_id: u16,
    result: &ResultPayload,
    abi: &dyn AbiCodec,
    config: &CodecConfig,
) -> Result<Vec<u8>, CodecError> {
    invariant_result_matches_action(action_id, result, &config.binary_action_ids)?;

    match result {
        ResultPayload::BooleanOutcome(outcome) => Ok(abi.pack(&[AbiValue::Bool(*outcome)])),
        ResultPayload::DatapointSeries(rows) => {
            if rows.len() > config.limits.max_rows {
                return Err(CodecError::validation(
                    "result",
                    format!(
                        "{} rows exceeds maximum of {}",
                        rows.len(),
                        config.limits.max_rows
                    ),
                ));
            }
            let mut timestamps = Vec::with_capacity(rows.len());
            let mut values = Vec::with_capacity(rows.len());
            for row in rows {
                let timestamp = U256::from_dec_str(&row.timestamp).map_err(|e| {
                    CodecError::validation(
                        "timestamp",
                        format!("{:?} is not a uint256: {e:?}", row.timestamp),
                    )
                })?;
                let value = parse_fixed_point(&row.value, config.fixed_point_decimals)?;
                timestamps.push(timestamp);
                values.push(bigint_to_int256(&value)?);
            }
            Ok(abi.pack(&[
                AbiValue::Uint256Array(timestamps),
                AbiValue::Int256Array(values),
            ]))
        }
    }
}
