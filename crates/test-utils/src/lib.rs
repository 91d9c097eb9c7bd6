//! Common utilities for testing option order components.
//!
//! In-memory stand-ins for the verifier, nonce counter and order store,
//! deterministic signers, and fixtures. Every backend here is a value owned
//! by the test that creates it.

#![warn(missing_debug_implementations, missing_docs, unreachable_pub, rustdoc::all)]
#![deny(unused_must_use, rust_2018_idioms)]

pub mod fixtures;
pub mod mocks;
pub mod users;

pub use lop_options_constants::test_utils as test_constants;

/// Install a test `tracing` subscriber honouring `RUST_LOG`. Safe to call
/// from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
