//! Order, option and signing types for the options relayer.
//!
//! A maker offering an option signs two EIP-712 structs: a limit order under
//! the limit order protocol's domain, and the option params under the
//! options NFT verifier's domain. The option params travel to the verifier
//! inside the fill's taker interaction. This crate holds the value types
//! for both, their wire formats, the bitfield codecs for maker and taker
//! traits, and the signing functions.

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
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod codec;
pub use codec::{decode_address, encode_address, encode_address_word, parse_address, CodecError};

mod complete;
pub use complete::{CompleteOrder, FillArgs, FillError, ReplayScheme};

pub mod config;
pub use config::{ConfigError, RelayerConfig};

mod interaction;
pub use interaction::{
    build_interaction_payload, decode_interaction, decode_interaction_for, interaction_schema,
    interaction_schema_id, option_interaction, INTERACTION_BODY_LENGTH, INTERACTION_LENGTH,
};

mod maker_traits;
pub use maker_traits::MakerTraits;

mod option;
pub use option::{parse_salt, InvalidParameter, OptionTerms};

mod order;
pub use order::{build_order, BuiltOrder, LimitOrder, OrderAddresses, OrderRequest};

pub mod signing;

mod stored;
pub use stored::{OrderFilter, OrderStatus, StatusTransitionError, StoredOrder};

mod taker_traits;
pub use taker_traits::{TakerTraits, TraitsError, MAX_ARGS_LENGTH};

mod utils;
pub use utils::{decimal_u256, parse_decimal_u256};
