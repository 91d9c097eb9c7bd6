use crate::{
    decode_interaction, signing::EcdsaSignature, utils::decimal_u256, CodecError, LimitOrder,
    OptionTerms, TakerTraits, TraitsError,
};
use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, B256, U256},
    rpc::types::TransactionRequest,
    sol_types::SolCall,
};
use lop_options_bindings::{
    ILimitOrderProtocol::{fillOrderArgsCall, OrderTuple},
    OptionInteraction, OptionParams, Order,
};
use serde::{Deserialize, Serialize};

/// The replay protection scheme an option was created under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReplayScheme {
    /// Verifier-checked random salt.
    Salt,
    /// Legacy sequential nonce.
    SequentialNonce,
}

/// Errors preparing a fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FillError {
    /// The fill amount is zero.
    #[error("fill amount must be positive")]
    ZeroAmount,
    /// The fill amount is more than the order offers.
    #[error("fill amount {amount} exceeds the order's taking amount {available}")]
    ExceedsOrder {
        /// Requested amount.
        amount: U256,
        /// The order's taking amount.
        available: U256,
    },
    /// The order forbids partial fills and the amount is not the full
    /// taking amount.
    #[error("order does not allow partial fills, fill amount must be {required}")]
    PartialFill {
        /// The full taking amount.
        required: U256,
    },
    /// The taker traits could not be packed.
    #[error(transparent)]
    Traits(#[from] TraitsError),
}

/// Everything produced when a maker creates an option: the signed order, the
/// signed option params and the interaction payload that carries the latter
/// into the fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteOrder {
    /// The limit order.
    pub order: LimitOrder,
    /// The order's EIP-712 hash.
    pub order_hash: B256,
    /// The maker's signature over the order hash.
    pub order_signature: EcdsaSignature,
    /// The option terms.
    pub terms: OptionTerms,
    /// The replay-protection salt bound into the option params.
    #[serde(with = "decimal_u256")]
    pub option_salt: U256,
    /// The option digest.
    pub option_digest: B256,
    /// The maker's signature over the option digest.
    pub option_signature: EcdsaSignature,
    /// The taker interaction payload.
    pub interaction: Bytes,
    /// The replay protection scheme.
    pub scheme: ReplayScheme,
}

impl CompleteOrder {
    /// The maker.
    pub const fn maker(&self) -> Address {
        self.order.maker
    }

    /// The signed option params.
    pub fn option_params(&self) -> OptionParams {
        self.terms.to_params(self.order.maker, self.option_salt)
    }

    /// The order in signing form.
    pub fn eip712_order(&self) -> Order {
        self.order.into()
    }

    /// The order in calldata form.
    pub fn order_tuple(&self) -> OrderTuple {
        self.eip712_order().to_tuple()
    }

    /// Decode the interaction payload into its target and body.
    pub fn decode_interaction(&self) -> Result<(Address, OptionInteraction), CodecError> {
        decode_interaction(&self.interaction)
    }

    /// Prepare the arguments for `fillOrderArgs`, taking `amount` of the
    /// taker asset.
    ///
    /// The interaction payload is passed as the whole of `args`, its length
    /// packed into the taker traits.
    pub fn prepare_fill(&self, amount: U256) -> Result<FillArgs, FillError> {
        let available = self.order.taking_amount;
        if amount.is_zero() {
            return Err(FillError::ZeroAmount);
        }
        if amount > available {
            return Err(FillError::ExceedsOrder { amount, available });
        }
        if crate::MakerTraits::decode(self.order.maker_traits).no_partial_fills
            && amount != available
        {
            return Err(FillError::PartialFill { required: available });
        }

        let taker_traits = TakerTraits::for_interaction(&self.interaction).encode()?;
        let compact = self.order_signature.compact();

        Ok(FillArgs {
            order: self.order_tuple(),
            r: compact.r,
            vs: compact.vs,
            amount,
            taker_traits,
            args: self.interaction.clone(),
        })
    }
}

/// Arguments for the protocol's `fillOrderArgs` entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillArgs {
    /// The order in calldata form.
    pub order: OrderTuple,
    /// Order signature `r`.
    pub r: B256,
    /// Order signature `vs`.
    pub vs: B256,
    /// Fill amount.
    pub amount: U256,
    /// Packed taker traits.
    pub taker_traits: U256,
    /// Fill args, here the interaction payload.
    pub args: Bytes,
}

impl FillArgs {
    /// The decoded taker traits.
    pub fn taker_traits(&self) -> TakerTraits {
        TakerTraits::decode(self.taker_traits)
    }

    /// Build the contract call.
    pub fn to_call(&self) -> fillOrderArgsCall {
        fillOrderArgsCall {
            order: self.order,
            r: self.r,
            vs: self.vs,
            amount: self.amount,
            takerTraits: self.taker_traits,
            args: self.args.clone(),
        }
    }

    /// Generate a [`TransactionRequest`] filling the order at the protocol
    /// deployed at `limit_order_protocol`.
    pub fn to_fill_tx(&self, limit_order_protocol: Address) -> TransactionRequest {
        TransactionRequest::default()
            .with_input(self.to_call().abi_encode())
            .with_to(limit_order_protocol)
    }
}
