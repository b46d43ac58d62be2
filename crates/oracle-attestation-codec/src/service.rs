//! # Attestation Codec Service
//!
//! Wires the codec algorithms to a configuration and the two outbound ports.
//! Stateless apart from its configuration, so one instance can be shared
//! across threads.

use crate::adapters::{CanonicalValueCodec, EthAbiCodec};
use crate::algorithms;
use crate::config::CodecConfig;
use crate::domain::{
    AttestationPayload, AttestationResult, CanonicalValue, CodecError, QueryComponents,
    QueryResult, ResultPayload, SignedAttestation, SIGNATURE_LEN,
};
use crate::ports::{AbiCodec, AttestationCodecApi, ValueCodec};
use tracing::warn;

/// Attestation codec service.
pub struct AttestationCodecService<V: ValueCodec, A: AbiCodec> {
    /// Configuration.
    config: CodecConfig,
    /// Per-value canonical codec.
    values: V,
    /// ABI codec.
    abi: A,
}

impl AttestationCodecService<CanonicalValueCodec, EthAbiCodec> {
    /// Service over the bundled canonical value and `ethabi` adapters.
    pub fn with_default_codecs(config: CodecConfig) -> Self {
        Self::new(config, CanonicalValueCodec, EthAbiCodec)
    }
}

impl Default for AttestationCodecService<CanonicalValueCodec, EthAbiCodec> {
    fn default() -> Self {
        Self::with_default_codecs(CodecConfig::default())
    }
}

impl<V: ValueCodec, A: AbiCodec> AttestationCodecService<V, A> {
    /// Create a service.
    pub fn new(config: CodecConfig, values: V, abi: A) -> Self {
        Self {
            config,
            values,
            abi,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode `args` and pack them with the other query components.
    pub fn build_query_components(
        &self,
        data_provider: &str,
        stream_id: &str,
        action_id: &str,
        args: &[CanonicalValue],
    ) -> Result<Vec<u8>, CodecError> {
        let encoded_args = self.encode_arguments(args)?;
        self.encode_query_components(data_provider, stream_id, action_id, &encoded_args)
    }

    /// Split off the signature trailer and fully parse the payload.
    pub fn parse_signed_attestation(
        &self,
        bytes: &[u8],
    ) -> Result<(AttestationPayload, [u8; SIGNATURE_LEN]), CodecError> {
        let signed =
            SignedAttestation::split(bytes).map_err(|e| rejected("signed attestation", e))?;
        let payload = self.parse_attestation(signed.payload)?;
        Ok((payload, *signed.signature))
    }
}

fn rejected(what: &str, err: CodecError) -> CodecError {
    warn!("[attestation] Rejected {} at {}: {}", what, err.location(), err);
    err
}

impl<V: ValueCodec, A: AbiCodec> AttestationCodecApi for AttestationCodecService<V, A> {
    fn encode_arguments(&self, values: &[CanonicalValue]) -> Result<Vec<u8>, CodecError> {
        algorithms::encode_arguments(values, &self.values, &self.config.limits)
    }

    fn decode_arguments(&self, bytes: &[u8]) -> Result<Vec<CanonicalValue>, CodecError> {
        algorithms::decode_arguments(bytes, &self.values, &self.config.limits)
            .map_err(|e| rejected("arguments", e))
    }

    fn encode_query_components(
        &self,
        data_provider: &str,
        stream_id: &str,
        action_id: &str,
        args: &[u8],
    ) -> Result<Vec<u8>, CodecError> {
        algorithms::encode_query_components(data_provider, stream_id, action_id, args, &self.abi)
    }

    fn decode_query_components(&self, bytes: &[u8]) -> Result<QueryComponents, CodecError> {
        algorithms::decode_query_components(bytes, &self.abi)
            .map_err(|e| rejected("query components", e))
    }

    fn query_hash(&self, components: &QueryComponents) -> Result<[u8; 32], CodecError> {
        algorithms::query_hash(components, &self.abi)
    }

    fn parse_attestation(&self, bytes: &[u8]) -> Result<AttestationPayload, CodecError> {
        algorithms::parse_attestation(bytes, &self.values, &self.abi, &self.config)
            .map_err(|e| rejected("attestation", e))
    }

    fn parse_attestation_result(&self, bytes: &[u8]) -> Result<AttestationResult, CodecError> {
        algorithms::parse_attestation_result(bytes, &self.abi, &self.config)
            .map_err(|e| rejected("attestation", e))
    }

    fn encode_attestation(&self, payload: &AttestationPayload) -> Result<Vec<u8>, CodecError> {
        algorithms::encode_attestation(payload, &self.values, &self.abi, &self.config)
    }

    fn decode_result(&self, action_id: u16, bytes: &[u8]) -> Result<ResultPayload, CodecError> {
        algorithms::decode_result(action_id, bytes, &self.abi, &self.config)
            .map_err(|e| rejected("result", e))
    }

    fn encode_result(
        &self,
        action_id: u16,
        result: &ResultPayload,
    ) -> Result<Vec<u8>, CodecError> {
        algorithms::encode_result(action_id, result, &self.abi, &self.config)
    }

    fn decode_query_result(&self, bytes: &[u8]) -> Result<QueryResult, CodecError> {
        algorithms::decode_query_result(bytes, &self.values, &self.abi, &self.config.limits)
            .map_err(|e| rejected("query result", e))
    }
}
