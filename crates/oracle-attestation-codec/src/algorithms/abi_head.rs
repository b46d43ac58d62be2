//! # ABI Head Inspection
//!
//! Reads declared lengths and offsets straight from ABI heads, so caps can be
//! enforced before the ABI library materializes anything.

use crate::domain::{invariant_within_buffer, CodecError, Field};
use ethereum_types::U256;

/// ABI word size.
pub const WORD: usize = 32;

fn read_word(data: &[u8], offset: usize, field: Field) -> Result<U256, CodecError> {
    invariant_within_buffer(field, offset, WORD, data.len())?;
    Ok(U256::from_big_endian(&data[offset..offset + WORD]))
}

/// Read an offset or length word that must not exceed `data.len()`.
pub fn read_offset(data: &[u8], offset: usize, field: Field) -> Result<usize, CodecError> {
    let value = read_word(data, offset, field.clone())?;
    if value > U256::from(data.len()) {
        return Err(CodecError::TruncatedPayload {
            field,
            needed: WORD,
            available: 0,
        });
    }
    Ok(value.as_usize())
}

/// Read a declared element count. Counts that do not fit in a u64 saturate to
/// `u64::MAX`; they are rejected by any cap downstream.
pub fn read_count(data: &[u8], offset: usize, field: Field) -> Result<u64, CodecError> {
    let declared = read_word(data, offset, field)?;
    if declared > U256::from(u64::MAX) {
        Ok(u64::MAX)
    } else {
        Ok(declared.as_u64())
    }
}

/// Declared element count of the dynamic array whose head sits at `slot`.
pub fn peek_array_len(data: &[u8], slot: usize, name: &'static str) -> Result<u64, CodecError> {
    let head_offset = slot.checked_mul(WORD).ok_or(CodecError::TruncatedPayload {
        field: Field::AbiHead(slot),
        needed: WORD,
        available: 0,
    })?;
    let tail = read_word(data, head_offset, Field::AbiHead(slot))?;

    let length_field = Field::AbiArrayLength(name);
    if tail > U256::from(data.len()) {
        return Err(CodecError::TruncatedPayload {
            field: length_field,
            needed: WORD,
            available: 0,
        });
    }
    read_count(data, tail.as_usize(), length_field)
}
