//! # Codec Configuration
//!
//! Externally defined data the codec needs: resource caps, the fixed-point
//! scale of stream values and the registered binary-outcome action ids.

use crate::algorithms::fixed_point::STREAM_VALUE_DECIMALS;
use crate::domain::{ResultKind, SecurityLimits, BINARY_ACTION_IDS};
use serde::{Deserialize, Serialize};

/// Attestation codec configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Caps on untrusted declared counts.
    pub limits: SecurityLimits,

    /// Implied decimals of int256 stream values.
    pub fixed_point_decimals: u32,

    /// Action ids whose result is `ABI(bool)`.
    pub binary_action_ids: Vec<u16>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            limits: SecurityLimits::default(),
            fixed_point_decimals: STREAM_VALUE_DECIMALS,
            binary_action_ids: BINARY_ACTION_IDS.to_vec(),
        }
    }
}

impl CodecConfig {
    /// Create a config for testing (small caps so limit paths are cheap to hit).
    pub fn for_testing() -> Self {
        Self {
            limits: SecurityLimits {
                max_rows: 16,
                max_columns: 2,
                max_arguments: 4,
            },
            ..Self::default()
        }
    }

    /// Load a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Result layout for an action id.
    pub fn result_kind(&self, action_id: u16) -> ResultKind {
        ResultKind::for_action(action_id, &self.binary_action_ids)
    }
}
