//! Option order creation for the limit order protocol.
//!
//! Contains the salt search and digest checks against the options NFT
//! verifier, the dual-signature order builder, the legacy nonce manager and
//! the backend traits they run against.

#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
pub use builder::{BuilderError, CompleteOptionRequest, OptionOrderBuilder, ReplayProtection};

mod hash_manager;
pub use hash_manager::{
    HashManagerOptions, OrderConfig, OrderHashError, OrderHashManager, SaltStatus,
};

mod impls;

mod nonce;
pub use nonce::{NonceError, NonceManager, MAX_NONCE};

mod salt;
pub use salt::{KeccakSaltGenerator, SaltGenerator};

pub mod store;

mod traits;
pub use traits::{NonceCounter, OptionHashVerifier, OrderStore};
