//! # Query Components ABI Codec
//!
//! "What was queried", packed as the ABI parameter list
//! `(address dataProvider, bytes32 streamId, string actionId, bytes args)`.
//! The settlement contract hashes this encoding, so the field order and the
//! bytes32 padding must never change.

use crate::domain::{
    format_address, parse_address, CodecError, Field, QueryComponents, ValueLocation,
};
use crate::ports::outbound::{AbiCodec, AbiKind, AbiValue};
use sha3::{Digest, Keccak256};

/// Exact stream id length in bytes.
pub const STREAM_ID_LEN: usize = 32;

const QUERY_KINDS: [AbiKind; 4] = [
    AbiKind::Address,
    AbiKind::FixedBytes32,
    AbiKind::String,
    AbiKind::Bytes,
];

/// Encode query components.
///
/// `stream_id` must be exactly 32 bytes; it is never truncated or padded to
/// fit. The address is accepted in any hex case.
pub fn encode_query_components(
    data_provider: &str,
    stream_id: &str,
    action_id: &str,
    args: &[u8],
    abi: &dyn AbiCodec,
) -> Result<Vec<u8>, CodecError> {
    let address = parse_address("data_provider", data_provider)?;
    if stream_id.len() != STREAM_ID_LEN {
        return Err(CodecError::validation(
            "stream_id",
            format!(
                "expected {STREAM_ID_LEN} bytes, got {}",
                stream_id.len()
            ),
        ));
    }
    if action_id.is_empty() {
        return Err(CodecError::validation("action_id", "must not be empty"));
    }

    let mut stream_word = [0u8; 32];
    stream_word[..stream_id.len()].copy_from_slice(stream_id.as_bytes());

    Ok(abi.pack(&[
        AbiValue::Address(address),
        AbiValue::FixedBytes32(stream_word),
        AbiValue::String(action_id.to_string()),
        AbiValue::Bytes(args.to_vec()),
    ]))
}

/// Decode query components.
///
/// Trailing zero bytes of the bytes32 stream id are stripped before UTF-8
/// conversion, so an all-zero field decodes to the empty string.
pub fn decode_query_components(
    bytes: &[u8],
    abi: &dyn AbiCodec,
) -> Result<QueryComponents, CodecError> {
    let malformed = |reason: String| CodecError::MalformedValue {
        location: ValueLocation::Field(Field::QueryComponents),
        reason,
    };

    let values = abi
        .unpack(&QUERY_KINDS, bytes)
        .map_err(|e| malformed(e.to_string()))?;

    match values.as_slice() {
        [AbiValue::Address(address), AbiValue::FixedBytes32(stream_word), AbiValue::String(action_id), AbiValue::Bytes(args)] =>
        {
            let used = stream_word
                .iter()
                .rposition(|b| *b != 0)
                .map_or(0, |last| last + 1);
            let stream_id = std::str::from_utf8(&stream_word[..used])
                .map_err(|e| malformed(format!("stream id is not UTF-8: {e}")))?;
            Ok(QueryComponents {
                data_provider: format_address(address),
                stream_id: stream_id.to_string(),
                action_id: action_id.clone(),
                args: args.clone(),
            })
        }
        other => Err(malformed(format!("unexpected ABI values: {other:?}"))),
    }
}

/// Keccak-256 over the ABI encoding of `components`.
pub fn query_hash(
    components: &QueryComponents,
    abi: &dyn AbiCodec,
) -> Result<[u8; 32], CodecError> {
    let encoded = encode_query_components(
        &components.data_provider,
        &components.stream_id,
        &components.action_id,
        &components.args,
        abi,
    )?;
    let mut hasher = Keccak256::new();
    hasher.update(&encoded);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    Ok(output)
}
