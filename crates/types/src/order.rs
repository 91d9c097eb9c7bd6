use crate::{utils::decimal_u256, MakerTraits};
use alloy::primitives::{Address, U256};
use lop_options_bindings::{ILimitOrderProtocol::OrderTuple, Order};
use serde::{Deserialize, Serialize};

/// Wire form of a limit order. Amounts, salt and traits are decimal strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitOrder {
    /// Order salt.
    #[serde(with = "decimal_u256")]
    pub salt: U256,
    /// Maker address.
    pub maker: Address,
    /// Receiver of the taker asset. Zero means the maker.
    pub receiver: Address,
    /// Asset the maker gives.
    pub maker_asset: Address,
    /// Asset the maker receives.
    pub taker_asset: Address,
    /// Amount of the maker asset.
    #[serde(with = "decimal_u256")]
    pub making_amount: U256,
    /// Amount of the taker asset.
    #[serde(with = "decimal_u256")]
    pub taking_amount: U256,
    /// Packed maker traits.
    #[serde(with = "decimal_u256")]
    pub maker_traits: U256,
}

impl From<Order> for LimitOrder {
    fn from(order: Order) -> Self {
        Self {
            salt: order.salt,
            maker: order.maker,
            receiver: order.receiver,
            maker_asset: order.makerAsset,
            taker_asset: order.takerAsset,
            making_amount: order.makingAmount,
            taking_amount: order.takingAmount,
            maker_traits: order.makerTraits,
        }
    }
}

impl From<LimitOrder> for Order {
    fn from(order: LimitOrder) -> Self {
        Self {
            salt: order.salt,
            maker: order.maker,
            receiver: order.receiver,
            makerAsset: order.maker_asset,
            takerAsset: order.taker_asset,
            makingAmount: order.making_amount,
            takingAmount: order.taking_amount,
            makerTraits: order.maker_traits,
        }
    }
}

/// The four unpadded addresses of an order, kept apart from the padded
/// calldata words so signing always sees canonical addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAddresses {
    /// Maker address.
    pub maker: Address,
    /// Receiver address.
    pub receiver: Address,
    /// Maker asset.
    pub maker_asset: Address,
    /// Taker asset.
    pub taker_asset: Address,
}

/// Inputs for [`build_order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderRequest {
    /// Maker address.
    pub maker: Address,
    /// Receiver address. Zero means the maker.
    pub receiver: Address,
    /// Asset the maker gives.
    pub maker_asset: Address,
    /// Asset the maker receives.
    pub taker_asset: Address,
    /// Amount of the maker asset.
    pub making_amount: U256,
    /// Amount of the taker asset.
    pub taking_amount: U256,
    /// Order salt. Random when unset.
    pub salt: Option<U256>,
    /// Maker traits.
    pub traits: MakerTraits,
}

/// A built order in both its signing and calldata forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltOrder {
    /// Order with canonical addresses, for EIP-712 signing.
    pub order: Order,
    /// Order with padded address words, for calldata.
    pub tuple: OrderTuple,
    /// The addresses before padding.
    pub original_addresses: OrderAddresses,
}

impl BuiltOrder {
    /// The wire form of the order.
    pub fn limit_order(&self) -> LimitOrder {
        self.order.into()
    }
}

/// Build an order from a request, encoding the maker traits.
///
/// The order salt only makes the LOP order hash unique. It is unrelated to
/// the option salt.
pub fn build_order(request: OrderRequest) -> BuiltOrder {
    let salt = request.salt.unwrap_or_else(|| U256::from(rand::random::<u64>()));

    let order = Order {
        salt,
        maker: request.maker,
        receiver: request.receiver,
        makerAsset: request.maker_asset,
        takerAsset: request.taker_asset,
        makingAmount: request.making_amount,
        takingAmount: request.taking_amount,
        makerTraits: request.traits.encode(),
    };

    BuiltOrder {
        tuple: order.to_tuple(),
        order,
        original_addresses: OrderAddresses {
            maker: request.maker,
            receiver: request.receiver,
            maker_asset: request.maker_asset,
            taker_asset: request.taker_asset,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode_address_word;

    fn request() -> OrderRequest {
        OrderRequest {
            maker: Address::repeat_byte(0xaa),
            receiver: Address::ZERO,
            maker_asset: Address::repeat_byte(0x33),
            taker_asset: Address::repeat_byte(0x44),
            making_amount: U256::from(1_000u64),
            taking_amount: U256::from(50u64),
            salt: Some(U256::from(7)),
            traits: MakerTraits::new().with_no_partial_fills(true).with_nonce(9),
        }
    }

    #[test]
    fn tuple_uses_padded_words() {
        let built = build_order(request());
        assert_eq!(built.tuple.maker, encode_address_word(Address::repeat_byte(0xaa)));
        assert_eq!(built.tuple.makerAsset, encode_address_word(Address::repeat_byte(0x33)));
        assert_eq!(built.tuple.maker_address(), built.original_addresses.maker);
        assert_eq!(built.order.maker, Address::repeat_byte(0xaa));
        assert_eq!(MakerTraits::decode(built.order.makerTraits).nonce, 9);
    }

    #[test]
    fn random_salt_when_unset() {
        let a = build_order(OrderRequest { salt: None, ..request() });
        let b = build_order(OrderRequest { salt: None, ..request() });
        assert_ne!(a.order.salt, b.order.salt);
    }

    #[test]
    fn wire_round_trip() {
        let built = build_order(request());
        let json = serde_json::to_value(built.limit_order()).unwrap();
        assert_eq!(json["makingAmount"], "1000");
        assert_eq!(json["salt"], "7");

        let back: LimitOrder = serde_json::from_value(json).unwrap();
        assert_eq!(Order::from(back), built.order);
    }
}
