//! # Exploit Simulations
//!
//! Truncated, oversized and random payloads. Every one must be rejected with
//! a typed error and none may panic or allocate from an untrusted count.

pub mod adversarial;
