//! # Oracle Attestation Codec
//!
//! Byte-level codecs that carry an oracle query and its signed answer between
//! an off-chain signer and an EVM contract.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! - Canonical argument lists (u32 LE count, u32 LE length-prefixed values)
//! - ABI query components `(address, bytes32, string, bytes)` and their hash
//! - Attestation payload framing (big-endian outer fields)
//! - ABI result decoding selected by action id, with 18-decimal fixed point
//! - Generic `bytes[][]` query results
//!
//! ## Security Limits
//!
//! Every declared length or count is checked against the remaining buffer or
//! a resource cap before anything is allocated.
//!
//! | Limit | Default |
//! |-------|---------|
//! | Result rows | 100,000 |
//! | Result columns | 2 |
//! | Arguments | 10 |
//!
//! ## Module Structure
//!
//! ```text
//! oracle-attestation-codec/
//! ├── domain/          # Values, payload entities, errors, limits
//! ├── algorithms/      # Framing, argument list, ABI result, fixed point
//! ├── ports/           # AttestationCodecApi, ValueCodec, AbiCodec
//! ├── adapters/        # CanonicalValueCodec, EthAbiCodec
//! ├── config.rs        # CodecConfig
//! └── service.rs       # AttestationCodecService
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{CanonicalValueCodec, EthAbiCodec};
pub use algorithms::{
    decode_arguments, decode_query_components, decode_query_result, decode_result,
    encode_arguments, encode_attestation, encode_query_components, encode_query_result,
    encode_result, format_fixed_point, parse_attestation, parse_attestation_result,
    parse_fixed_point, query_hash, STREAM_VALUE_DECIMALS,
};
pub use config::CodecConfig;
pub use domain::{
    AttestationPayload, AttestationResult, CanonicalValue, CodecError, DatapointRow, Field,
    QueryComponents, QueryResult, Resource, ResultKind, ResultPayload, SecurityLimits,
    SignedAttestation, ValueLocation,
};
pub use ports::{AbiCodec, AttestationCodecApi, ValueCodec};
pub use service::AttestationCodecService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
