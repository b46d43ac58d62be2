//! # Inbound Ports
//!
//! API trait defining what the attestation codec can do.

use crate::domain::{
    AttestationPayload, AttestationResult, CanonicalValue, CodecError, QueryComponents,
    QueryResult, ResultPayload,
};

/// Attestation codec API - inbound port.
///
/// Every operation is a pure function of its input.
pub trait AttestationCodecApi: Send + Sync {
    /// Encode an argument list (u32 LE count, u32 LE length-prefixed values).
    fn encode_arguments(&self, values: &[CanonicalValue]) -> Result<Vec<u8>, CodecError>;

    /// Decode an argument list.
    fn decode_arguments(&self, bytes: &[u8]) -> Result<Vec<CanonicalValue>, CodecError>;

    /// ABI-encode `(address, bytes32, string, bytes)` query components.
    fn encode_query_components(
        &self,
        data_provider: &str,
        stream_id: &str,
        action_id: &str,
        args: &[u8],
    ) -> Result<Vec<u8>, CodecError>;

    /// Decode ABI query components.
    fn decode_query_components(&self, bytes: &[u8]) -> Result<QueryComponents, CodecError>;

    /// Keccak-256 of the ABI-encoded query components.
    fn query_hash(&self, components: &QueryComponents) -> Result<[u8; 32], CodecError>;

    /// Fully parse an attestation payload.
    fn parse_attestation(&self, bytes: &[u8]) -> Result<AttestationPayload, CodecError>;

    /// Parse only the action id and result of an attestation payload.
    fn parse_attestation_result(&self, bytes: &[u8]) -> Result<AttestationResult, CodecError>;

    /// Serialize an attestation payload.
    fn encode_attestation(&self, payload: &AttestationPayload) -> Result<Vec<u8>, CodecError>;

    /// Decode an ABI result blob for an action.
    fn decode_result(&self, action_id: u16, bytes: &[u8]) -> Result<ResultPayload, CodecError>;

    /// Encode a result for an action.
    fn encode_result(&self, action_id: u16, result: &ResultPayload)
        -> Result<Vec<u8>, CodecError>;

    /// Decode a generic row/column query result.
    fn decode_query_result(&self, bytes: &[u8]) -> Result<QueryResult, CodecError>;
}
