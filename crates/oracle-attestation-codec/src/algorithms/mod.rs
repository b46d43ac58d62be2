//! # Algorithms Module
//!
//! Framing, fixed-point and ABI codecs that make up the attestation wire
//! format.

pub mod abi_head;
pub mod argument_list;
pub mod attestation;
pub mod fixed_point;
pub mod framing;
pub mod query_components;
pub mod query_result;
pub mod result_codec;

pub use argument_list::{decode_arguments, encode_arguments, validate_argument_framing};
pub use attestation::{
    decode_data_provider, encode_attestation, parse_attestation, parse_attestation_result,
    split_attestation, RawAttestation,
};
pub use fixed_point::{format_fixed_point, parse_fixed_point, STREAM_VALUE_DECIMALS};
pub use framing::{write_be_prefixed, write_le_prefixed, ByteCursor};
pub use query_components::{
    decode_query_components, encode_query_components, query_hash, STREAM_ID_LEN,
};
pub use query_result::{decode_query_result, encode_query_result};
pub use result_codec::{bigint_to_int256, decode_result, encode_result, int256_to_bigint};
