//! # Oracle Attestation Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── exploits/         # Hostile inputs
//! │   └── adversarial.rs
//! │
//! └── integration/      # End-to-end wire conformance
//!     └── conformance.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p oracle-tests
//!
//! # By category
//! cargo test -p oracle-tests integration::
//! cargo test -p oracle-tests exploits::
//!
//! # Benchmarks
//! cargo bench -p oracle-tests
//! ```

#![allow(unused_variables)]
#![allow(unused_imports)]
#![allow(dead_code)]

pub mod exploits;

/// Install a `RUST_LOG`-driven subscriber once per test binary.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
