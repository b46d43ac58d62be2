//! # Domain Module
//!
//! Core types for the attestation codec: values, entities, errors, limits.

pub mod entities;
pub mod errors;
pub mod invariants;
pub mod limits;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use limits::*;
pub use value_objects::*;
