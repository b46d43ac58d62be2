//! # Security Limits
//!
//! Hard caps on counts declared by untrusted input. Every check runs before the
//! allocation the count would size.

use super::errors::{CodecError, Resource};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Maximum rows in a query result or datapoint series.
pub const MAX_ROWS: usize = 100_000;

/// Maximum columns per query result row.
pub const MAX_COLUMNS: usize = 2;

/// Maximum arguments per call.
pub const MAX_ARGUMENTS: usize = 10;

/// Resource caps applied while decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityLimits {
    /// Maximum rows.
    pub max_rows: usize,
    /// Maximum columns per row.
    pub max_columns: usize,
    /// Maximum arguments per call.
    pub max_arguments: usize,
}

impl Default for SecurityLimits {
    fn default() -> Self {
        Self {
            max_rows: MAX_ROWS,
            max_columns: MAX_COLUMNS,
            max_arguments: MAX_ARGUMENTS,
        }
    }
}

impl SecurityLimits {
    /// Reject a declared row count above the cap.
    pub fn check_rows(&self, declared: u64) -> Result<usize, CodecError> {
        check(Resource::Rows, declared, self.max_rows)
    }

    /// Reject a declared column count above the cap.
    pub fn check_columns(&self, declared: u64) -> Result<usize, CodecError> {
        check(Resource::Columns, declared, self.max_columns)
    }

    /// Reject a declared argument count above the cap.
    pub fn check_arguments(&self, declared: u64) -> Result<usize, CodecError> {
        check(Resource::Arguments, declared, self.max_arguments)
    }
}

fn check(resource: Resource, declared: u64, max: usize) -> Result<usize, CodecError> {
    match usize::try_from(declared) {
        Ok(count) if count <= max => Ok(count),
        _ => {
            warn!(
                "[attestation] Rejecting declared {} count {} (max {})",
                resource, declared, max
            );
            Err(CodecError::ResourceLimitExceeded {
                resource,
                declared,
                max: max as u64,
            })
        }
    }
}
