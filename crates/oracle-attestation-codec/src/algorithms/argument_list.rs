//! # Argument List Codec
//!
//! ```text
//! argsBlob := count:u32LE (len(arg):u32LE arg:bytes){count}
//! ```
//!
//! Each `arg` is one canonical value encoding produced by the [`ValueCodec`]
//! port. The framing never looks inside a value, only at its length.

use super::framing::{write_le_prefixed, ByteCursor, LENGTH_PREFIX_LEN};
use crate::domain::{CanonicalValue, CodecError, Field, SecurityLimits, ValueLocation};
use crate::ports::outbound::ValueCodec;
use tracing::debug;

/// Encode values into an argument blob.
pub fn encode_arguments(
    values: &[CanonicalValue],
    codec: &dyn ValueCodec,
    limits: &SecurityLimits,
) -> Result<Vec<u8>, CodecError> {
    if values.len() > limits.max_arguments {
        return Err(CodecError::validation(
            "arguments",
            format!(
                "{} arguments exceeds maximum of {}",
                values.len(),
                limits.max_arguments
            ),
        ));
    }

    let mut out = Vec::with_capacity(LENGTH_PREFIX_LEN);
    // Bounded by max_arguments above.
    out.extend_from_slice(&(values.len() as u32).to_le_bytes());
    for (index, value) in values.iter().enumerate() {
        let encoded = codec
            .encode(value)
            .map_err(|e| CodecError::MalformedValue {
                location: ValueLocation::Argument(index),
                reason: e.to_string(),
            })?;
        write_le_prefixed(&mut out, "arguments", &encoded)?;
    }
    Ok(out)
}

/// Decode an argument blob.
///
/// The declared count is checked against `limits.max_arguments` before the
/// result vector is allocated.
pub fn decode_arguments(
    bytes: &[u8],
    codec: &dyn ValueCodec,
    limits: &SecurityLimits,
) -> Result<Vec<CanonicalValue>, CodecError> {
    let mut cursor = ByteCursor::new(bytes);
    let declared = cursor.read_u32_le(Field::ArgumentCount)?;
    let count = limits.check_arguments(u64::from(declared))?;

    let mut values = Vec::with_capacity(count);
    for index in 0..count {
        let chunk =
            cursor.read_le_prefixed(Field::ArgumentLength(index), Field::ArgumentValue(index))?;
        let value = codec
            .decode(chunk)
            .map_err(|e| CodecError::MalformedValue {
                location: ValueLocation::Argument(index),
                reason: e.to_string(),
            })?;
        values.push(value);
    }
    cursor.finish(Field::Arguments)?;

    debug!("[attestation] Decoded {} arguments", values.len());
    Ok(values)
}

/// Walk the argument framing without decoding any value.
///
/// Used by the fast-path parser: lengths and the argument cap are still
/// enforced, but no value is materialized.
pub fn validate_argument_framing(bytes: &[u8], limits: &SecurityLimits) -> Result<usize, CodecError> {
    let mut cursor = ByteCursor::new(bytes);
    let declared = cursor.read_u32_le(Field::ArgumentCount)?;
    let count = limits.check_arguments(u64::from(declared))?;
    for index in 0..count {
        cursor.read_le_prefixed(Field::ArgumentLength(index), Field::ArgumentValue(index))?;
    }
    cursor.finish(Field::Arguments)?;
    Ok(count)
}
