//! # Adapters Layer (Hexagonal Architecture)
//!
//! Default implementations of the outbound codec ports.

mod canonical_value;
mod ethabi_codec;

pub use canonical_value::CanonicalValueCodec;
pub use ethabi_codec::EthAbiCodec;
