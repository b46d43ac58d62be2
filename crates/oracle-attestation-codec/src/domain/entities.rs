//! # Domain Entities
//!
//! What was queried (`QueryComponents`) and what was attested
//! (`AttestationPayload`).

use super::errors::{CodecError, Field};
use super::value_objects::CanonicalValue;
use serde::{Deserialize, Serialize};

/// Length of the signature trailer appended to a signed payload.
pub const SIGNATURE_LEN: usize = 65;

/// One `(timestamp, value)` datapoint, both rendered as decimal strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatapointRow {
    /// Unix timestamp (uint256, base-10).
    pub timestamp: String,
    /// Fixed-point value rendered at the configured decimals.
    pub value: String,
}

impl DatapointRow {
    /// Create a row.
    pub fn new(timestamp: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            value: value.into(),
        }
    }
}

/// Attested result; the variant is fixed by the action id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultPayload {
    /// Ordered datapoints for ordinary actions.
    DatapointSeries(Vec<DatapointRow>),
    /// Outcome of a binary-market action.
    BooleanOutcome(bool),
}

impl ResultPayload {
    /// Boolean outcome of a binary action.
    ///
    /// A series payload never yields a boolean: reading the first datapoint of
    /// a series as an outcome produces plausible but wrong answers, so it fails
    /// with `SchemaMismatch` instead.
    pub fn boolean_outcome(&self, action_id: u16) -> Result<bool, CodecError> {
        match self {
            ResultPayload::BooleanOutcome(outcome) => Ok(*outcome),
            ResultPayload::DatapointSeries(_) => Err(CodecError::SchemaMismatch {
                action_id,
                reason: "result was decoded as a datapoint series, not a boolean".to_string(),
            }),
        }
    }

    /// Datapoints of a series payload.
    pub fn datapoints(&self, action_id: u16) -> Result<&[DatapointRow], CodecError> {
        match self {
            ResultPayload::DatapointSeries(rows) => Ok(rows),
            ResultPayload::BooleanOutcome(_) => Err(CodecError::SchemaMismatch {
                action_id,
                reason: "result is a boolean outcome, not a datapoint series".to_string(),
            }),
        }
    }
}

/// A parsed attestation payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationPayload {
    /// Payload format version (recorded, not validated).
    pub version: u8,
    /// Signature algorithm tag.
    pub algorithm: u8,
    /// Chain height the query was evaluated at.
    pub block_height: u64,
    /// Data provider; lowercase `0x` hex when it was a 20-byte address.
    pub data_provider: String,
    /// Stream identifier.
    pub stream_id: String,
    /// Action id selecting the result schema.
    pub action_id: u16,
    /// Query arguments.
    pub arguments: Vec<CanonicalValue>,
    /// Attested result.
    pub result: ResultPayload,
}

/// Output of the fast-path parser.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationResult {
    /// Action id.
    pub action_id: u16,
    /// Attested result.
    pub result: ResultPayload,
}

impl From<&AttestationPayload> for AttestationResult {
    fn from(payload: &AttestationPayload) -> Self {
        Self {
            action_id: payload.action_id,
            result: payload.result.clone(),
        }
    }
}

/// "What was queried", hashed on-chain by the settlement contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryComponents {
    /// `0x`-prefixed 20-byte address.
    pub data_provider: String,
    /// 32-byte stream identifier.
    pub stream_id: String,
    /// Action name.
    pub action_id: String,
    /// Encoded arguments.
    pub args: Vec<u8>,
}

/// Generic row/column query result.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Rows of cells.
    pub rows: Vec<Vec<CanonicalValue>>,
}

impl QueryResult {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A payload with its signature trailer split off. The signature is not verified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignedAttestation<'a> {
    /// Canonical payload bytes (the signed message).
    pub payload: &'a [u8],
    /// Signature trailer.
    pub signature: &'a [u8; SIGNATURE_LEN],
}

impl<'a> SignedAttestation<'a> {
    /// Split a signed attestation buffer into payload and signature.
    pub fn split(bytes: &'a [u8]) -> Result<Self, CodecError> {
        let payload_len =
            bytes
                .len()
                .checked_sub(SIGNATURE_LEN)
                .ok_or(CodecError::TruncatedPayload {
                    field: Field::Signature,
                    needed: SIGNATURE_LEN,
                    available: bytes.len(),
                })?;
        let (payload, trailer) = bytes.split_at(payload_len);
        let signature =
            <&[u8; SIGNATURE_LEN]>::try_from(trailer).map_err(|_| CodecError::TruncatedPayload {
                field: Field::Signature,
                needed: SIGNATURE_LEN,
                available: trailer.len(),
            })?;
        Ok(Self { payload, signature })
    }
}
