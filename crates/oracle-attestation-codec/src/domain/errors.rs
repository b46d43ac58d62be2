//! # Domain Errors
//!
//! Error taxonomy for the attestation codec. Every variant names the field or
//! position that failed so callers never need to re-derive byte offsets.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A wire field, or a position inside a nested structure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Field {
    /// Payload version byte.
    Version,
    /// Signature algorithm tag.
    Algorithm,
    /// Block height (u64 BE).
    BlockHeight,
    /// Data provider (BE length-prefixed).
    DataProvider,
    /// Stream id (BE length-prefixed).
    StreamId,
    /// Action id (u16 BE).
    ActionId,
    /// Arguments blob (BE length-prefixed).
    Arguments,
    /// Result blob (BE length-prefixed).
    Result,
    /// Argument count inside the arguments blob (u32 LE).
    ArgumentCount,
    /// Length prefix of one argument (u32 LE).
    ArgumentLength(usize),
    /// Bytes of one argument.
    ArgumentValue(usize),
    /// ABI head word at the given slot.
    AbiHead(usize),
    /// Length word of an ABI dynamic array.
    AbiArrayLength(&'static str),
    /// Signature trailer of a signed attestation.
    Signature,
    /// ABI-encoded query components.
    QueryComponents,
    /// ABI-encoded query result rows.
    QueryResult,
    /// Caller-supplied input for encoding.
    Input(&'static str),
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Version => write!(f, "version"),
            Field::Algorithm => write!(f, "algorithm"),
            Field::BlockHeight => write!(f, "block_height"),
            Field::DataProvider => write!(f, "data_provider"),
            Field::StreamId => write!(f, "stream_id"),
            Field::ActionId => write!(f, "action_id"),
            Field::Arguments => write!(f, "arguments"),
            Field::Result => write!(f, "result"),
            Field::ArgumentCount => write!(f, "arguments.count"),
            Field::ArgumentLength(i) => write!(f, "arguments[{i}].length"),
            Field::ArgumentValue(i) => write!(f, "arguments[{i}]"),
            Field::AbiHead(slot) => write!(f, "abi.head[{slot}]"),
            Field::AbiArrayLength(name) => write!(f, "abi.{name}.length"),
            Field::Signature => write!(f, "signature"),
            Field::QueryComponents => write!(f, "query_components"),
            Field::QueryResult => write!(f, "query_result"),
            Field::Input(name) => write!(f, "{name}"),
        }
    }
}

/// Where an embedded value that failed to decode was found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueLocation {
    /// Argument at this index.
    Argument(usize),
    /// Query result cell.
    Cell {
        /// Row index.
        row: usize,
        /// Column index.
        column: usize,
    },
    /// A named top-level field.
    Field(Field),
}

impl fmt::Display for ValueLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueLocation::Argument(i) => write!(f, "argument {i}"),
            ValueLocation::Cell { row, column } => write!(f, "row {row}, column {column}"),
            ValueLocation::Field(field) => write!(f, "{field}"),
        }
    }
}

/// Resource guarded by [`SecurityLimits`](super::limits::SecurityLimits).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resource {
    /// Rows in a query result or datapoint series.
    Rows,
    /// Columns in one row.
    Columns,
    /// Arguments in one call.
    Arguments,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Rows => write!(f, "rows"),
            Resource::Columns => write!(f, "columns"),
            Resource::Arguments => write!(f, "arguments"),
        }
    }
}

/// Codec error types.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Buffer shorter than a declared or fixed-size field requires.
    #[error("Truncated payload at {field}: need {needed} bytes, {available} available")]
    TruncatedPayload {
        /// Field being read.
        field: Field,
        /// Bytes the field requires.
        needed: usize,
        /// Bytes left in the buffer.
        available: usize,
    },

    /// Declared count exceeds a hard cap.
    #[error("Resource limit exceeded: {declared} {resource} > {max}")]
    ResourceLimitExceeded {
        /// Guarded resource.
        resource: Resource,
        /// Count declared by the input.
        declared: u64,
        /// Configured cap.
        max: u64,
    },

    /// An embedded canonical value or ABI blob failed its own decode.
    #[error("Malformed value at {location}: {reason}")]
    MalformedValue {
        /// Position of the value.
        location: ValueLocation,
        /// Decoder message.
        reason: String,
    },

    /// Result schema does not fit the action id.
    #[error("Schema mismatch for action {action_id}: {reason}")]
    SchemaMismatch {
        /// Action id in force.
        action_id: u16,
        /// What did not match.
        reason: String,
    },

    /// Encode-time input violates a documented precondition.
    #[error("Validation error on {field}: {reason}")]
    ValidationError {
        /// Offending input.
        field: Field,
        /// Violated precondition.
        reason: String,
    },

    /// Bytes left over after the last field of a strictly framed structure.
    #[error("Trailing bytes after {field}: {count}")]
    TrailingBytes {
        /// Last field read.
        field: Field,
        /// Unconsumed byte count.
        count: usize,
    },
}

impl CodecError {
    /// Shorthand for a validation failure on a named input.
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            field: Field::Input(field),
            reason: reason.into(),
        }
    }

    /// Codec errors are pure functions of the input; retrying never helps.
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Field or position the error refers to, rendered for logs.
    pub fn location(&self) -> String {
        match self {
            Self::TruncatedPayload { field, .. }
            | Self::ValidationError { field, .. }
            | Self::TrailingBytes { field, .. } => field.to_string(),
            Self::ResourceLimitExceeded { resource, .. } => resource.to_string(),
            Self::MalformedValue { location, .. } => location.to_string(),
            Self::SchemaMismatch { .. } => Field::Result.to_string(),
        }
    }
}
