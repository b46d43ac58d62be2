//! # Domain Invariants
//!
//! Rules every decode and encode path must hold.

use super::entities::ResultPayload;
use super::errors::{CodecError, Field};
use super::value_objects::ResultKind;

/// Invariant: no overread.
///
/// `offset + declared` must fit inside the buffer. Overflow of the sum counts
/// as a violation.
pub fn invariant_within_buffer(
    field: Field,
    offset: usize,
    declared: usize,
    buffer_len: usize,
) -> Result<(), CodecError> {
    let available = buffer_len.saturating_sub(offset);
    match offset.checked_add(declared) {
        Some(end) if end <= buffer_len => Ok(()),
        _ => Err(CodecError::TruncatedPayload {
            field,
            needed: declared,
            available,
        }),
    }
}

/// Invariant: the action id fixes the result variant.
pub fn invariant_result_matches_action(
    action_id: u16,
    result: &ResultPayload,
    binary_action_ids: &[u16],
) -> Result<(), CodecError> {
    let kind = ResultKind::for_action(action_id, binary_action_ids);
    match (kind, result) {
        (ResultKind::BinaryOutcome, ResultPayload::BooleanOutcome(_))
        | (ResultKind::NumericSeries, ResultPayload::DatapointSeries(_)) => Ok(()),
        (ResultKind::BinaryOutcome, ResultPayload::DatapointSeries(_)) => {
            Err(CodecError::SchemaMismatch {
                action_id,
                reason: "binary-outcome action carries a datapoint series".to_string(),
            })
        }
        (ResultKind::NumericSeries, ResultPayload::BooleanOutcome(_)) => {
            Err(CodecError::SchemaMismatch {
                action_id,
                reason: "series action carries a boolean outcome".to_string(),
            })
        }
    }
}
