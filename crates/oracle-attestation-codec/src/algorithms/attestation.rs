//! # Attestation Payload Codec
//!
//! ```text
//! AttestationPayload := version:u8 algorithm:u8 blockHeight:u64BE
//!                       len(dp):u32BE dp:bytes
//!                       len(sid):u32BE sid:bytes
//!                       actionId:u16BE
//!                       len(argsBlob):u32BE argsBlob:bytes
//!                       len(result):u32BE result:bytes
//! ```
//!
//! `argsBlob` is framed little-endian inside its big-endian outer prefix. That
//! asymmetry is part of the deployed wire format and must be preserved.
//!
//! Parsing is strictly forward-only. The field framing is walked once by
//! [`split_attestation`]; the full parser and the fast-path parser both start
//! from that split, so they reject exactly the same framing errors.

use super::argument_list::{decode_arguments, encode_arguments, validate_argument_framing};
use super::framing::{write_be_prefixed, ByteCursor};
use super::result_codec::{decode_result, encode_result};
use crate::config::CodecConfig;
use crate::domain::{
    format_address, invariant_result_matches_action, is_hex_address, parse_address,
    AttestationPayload, AttestationResult, CodecError, Field, ValueLocation, ADDRESS_LEN,
};
use crate::ports::outbound::{AbiCodec, ValueCodec};
use tracing::debug;

/// Fixed-width prefix: version, algorithm, block height.
const FIXED_HEADER_LEN: usize = 1 + 1 + 8;

/// Field slices of a payload whose framing has been validated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawAttestation<'a> {
    /// Version byte.
    pub version: u8,
    /// Algorithm tag.
    pub algorithm: u8,
    /// Block height.
    pub block_height: u64,
    /// Undecoded data provider bytes.
    pub data_provider: &'a [u8],
    /// Undecoded stream id bytes.
    pub stream_id: &'a [u8],
    /// Action id.
    pub action_id: u16,
    /// Undecoded argument blob.
    pub arguments: &'a [u8],
    /// Undecoded ABI result blob.
    pub result: &'a [u8],
}

/// Walk the field sequence, checking every declared length before slicing.
pub fn split_attestation(bytes: &[u8]) -> Result<RawAttestation<'_>, CodecError> {
    let mut cursor = ByteCursor::new(bytes);
    let version = cursor.read_u8(Field::Version)?;
    let algorithm = cursor.read_u8(Field::Algorithm)?;
    let block_height = cursor.read_u64_be(Field::BlockHeight)?;
    let data_provider = cursor.read_be_prefixed(Field::DataProvider)?;
    let stream_id = cursor.read_be_prefixed(Field::StreamId)?;
    let action_id = cursor.read_u16_be(Field::ActionId)?;
    let arguments = cursor.read_be_prefixed(Field::Arguments)?;
    let result = cursor.read_be_prefixed(Field::Result)?;
    cursor.finish(Field::Result)?;

    Ok(RawAttestation {
        version,
        algorithm,
        block_height,
        data_provider,
        stream_id,
        action_id,
        arguments,
        result,
    })
}

fn utf8_field(field: Field, bytes: &[u8]) -> Result<String, CodecError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| CodecError::MalformedValue {
            location: ValueLocation::Field(field),
            reason: format!("not UTF-8: {e}"),
        })
}

/// Render a data provider: 20 bytes are an address, anything else is text.
pub fn decode_data_provider(bytes: &[u8]) -> Result<String, CodecError> {
    if bytes.len() == ADDRESS_LEN {
        Ok(format_address(bytes))
    } else {
        utf8_field(Field::DataProvider, bytes)
    }
}

/// Parse every field of an attestation payload.
pub fn parse_attestation(
    bytes: &[u8],
    values: &dyn ValueCodec,
    abi: &dyn AbiCodec,
    config: &CodecConfig,
) -> Result<AttestationPayload, CodecError> {
    let raw = split_attestation(bytes)?;

    let data_provider = decode_data_provider(raw.data_provider)?;
    let stream_id = utf8_field(Field::StreamId, raw.stream_id)?;
    let arguments = decode_arguments(raw.arguments, values, &config.limits)?;
    let result = decode_result(raw.action_id, raw.result, abi, config)?;

    debug!(
        "[attestation] Parsed payload v{} stream={} action={} height={}",
        raw.version, stream_id, raw.action_id, raw.block_height
    );

    Ok(AttestationPayload {
        version: raw.version,
        algorithm: raw.algorithm,
        block_height: raw.block_height,
        data_provider,
        stream_id,
        action_id: raw.action_id,
        arguments,
        result,
    })
}

/// Fast path: decode only the action id and the result.
///
/// Data provider and stream id are skipped and the argument blob is only
/// framing-checked, but every length along the way is still validated.
pub fn parse_attestation_result(
    bytes: &[u8],
    abi: &dyn AbiCodec,
    config: &CodecConfig,
) -> Result<AttestationResult, CodecError> {
    let raw = split_attestation(bytes)?;
    validate_argument_framing(raw.arguments, &config.limits)?;
    let result = decode_result(raw.action_id, raw.result, abi, config)?;
    Ok(AttestationResult {
        action_id: raw.action_id,
        result,
    })
}

fn data_provider_bytes(data_provider: &str) -> Result<Vec<u8>, CodecError> {
    if is_hex_address(data_provider) {
        return Ok(parse_address("data_provider", data_provider)?.to_vec());
    }
    if data_provider.len() == ADDRESS_LEN {
        return Err(CodecError::validation(
            "data_provider",
            "a 20-byte non-address provider would decode as an address",
        ));
    }
    Ok(data_provider.as_bytes().to_vec())
}

/// Serialize an attestation payload.
pub fn encode_attestation(
    payload: &AttestationPayload,
    values: &dyn ValueCodec,
    abi: &dyn AbiCodec,
    config: &CodecConfig,
) -> Result<Vec<u8>, CodecError> {
    invariant_result_matches_action(payload.action_id, &payload.result, &config.binary_action_ids)?;

    let data_provider = data_provider_bytes(&payload.data_provider)?;
    let arguments = encode_arguments(&payload.arguments, values, &config.limits)?;
    let result = encode_result(payload.action_id, &payload.result, abi, config)?;

    let mut out = Vec::with_capacity(
        FIXED_HEADER_LEN
            + 4
            + data_provider.len()
            + 4
            + payload.stream_id.len()
            + 2
            + 4
            + arguments.len()
            + 4
            + result.len(),
    );
    out.push(payload.version);
    out.push(payload.algorithm);
    out.extend_from_slice(&payload.block_height.to_be_bytes());
    write_be_prefixed(&mut out, "data_provider", &data_provider)?;
    write_be_prefixed(&mut out, "stream_id", payload.stream_id.as_bytes())?;
    out.extend_from_slice(&payload.action_id.to_be_bytes());
    write_be_prefixed(&mut out, "arguments", &arguments)?;
    write_be_prefixed(&mut out, "result", &result)?;
    Ok(out)
}
