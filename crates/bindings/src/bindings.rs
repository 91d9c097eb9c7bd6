#![allow(clippy::too_many_arguments)]
#![allow(missing_docs)]
use alloy::primitives::{Address, B256, U256};

mod lop {
    use super::*;

    alloy::sol!(
        /// Limit order as hashed under the limit order protocol EIP-712 domain.
        ///
        /// Addresses are typed `address` here. The on-chain call takes the
        /// same words typed as `uint256`, see [`ILimitOrderProtocol::OrderTuple`].
        #[derive(Debug, PartialEq, Eq)]
        struct Order {
            uint256 salt;
            address maker;
            address receiver;
            address makerAsset;
            address takerAsset;
            uint256 makingAmount;
            uint256 takingAmount;
            uint256 makerTraits;
        }

        #[derive(Debug, PartialEq, Eq)]
        #[sol(rpc)]
        interface ILimitOrderProtocol {
            /// Calldata form of [`Order`]. Addresses are left-padded words.
            struct OrderTuple {
                uint256 salt;
                uint256 maker;
                uint256 receiver;
                uint256 makerAsset;
                uint256 takerAsset;
                uint256 makingAmount;
                uint256 takingAmount;
                uint256 makerTraits;
            }

            function fillOrderArgs(
                OrderTuple order,
                bytes32 r,
                bytes32 vs,
                uint256 amount,
                uint256 takerTraits,
                bytes args
            ) external payable returns (uint256 makingAmount, uint256 takingAmount, bytes32 orderHash);

            function hashOrder(OrderTuple order) external view returns (bytes32);

            function cancelOrder(uint256 makerTraits, bytes32 orderHash) external;

            function bitInvalidatorForOrder(address maker, uint256 slot) external view returns (uint256);

            function remainingInvalidatorForOrder(address maker, bytes32 orderHash) external view returns (uint256);

            function DOMAIN_SEPARATOR() external view returns (bytes32);
        }
    );

    impl Copy for Order {}
    impl Copy for ILimitOrderProtocol::OrderTuple {}

    impl Order {
        /// Word form of an address, as the protocol's `Address` type stores it.
        fn word(address: Address) -> U256 {
            U256::from_be_bytes(address.into_word().0)
        }

        /// Convert to the calldata tuple.
        pub fn to_tuple(&self) -> ILimitOrderProtocol::OrderTuple {
            ILimitOrderProtocol::OrderTuple {
                salt: self.salt,
                maker: Self::word(self.maker),
                receiver: Self::word(self.receiver),
                makerAsset: Self::word(self.makerAsset),
                takerAsset: Self::word(self.takerAsset),
                makingAmount: self.makingAmount,
                takingAmount: self.takingAmount,
                makerTraits: self.makerTraits,
            }
        }
    }

    impl From<&Order> for ILimitOrderProtocol::OrderTuple {
        fn from(order: &Order) -> Self {
            order.to_tuple()
        }
    }

    impl ILimitOrderProtocol::OrderTuple {
        /// Get the maker address, discarding the high bytes of the word.
        pub fn maker_address(&self) -> Address {
            Address::from_word(B256::from(self.maker))
        }
    }
}
pub use lop::{ILimitOrderProtocol, Order};

mod options {
    alloy::sol!(
        /// Option payload signed by the maker under the options EIP-712 domain.
        ///
        /// Field order follows the verifier's `generateOptionHash` arguments.
        #[derive(Debug, PartialEq, Eq)]
        struct OptionParams {
            address underlyingAsset;
            address strikeAsset;
            address maker;
            uint256 strikePrice;
            uint256 expiry;
            uint256 amount;
            uint256 salt;
        }

        /// Body of the taker interaction consumed by the verifier's fill
        /// callback, after the 20-byte target address.
        #[derive(Debug, PartialEq, Eq)]
        struct OptionInteraction {
            address maker;
            address underlyingAsset;
            address strikeAsset;
            uint256 strikePrice;
            uint256 expiry;
            uint256 optionAmount;
            uint256 salt;
            uint8 v;
            bytes32 r;
            bytes32 s;
        }

        #[derive(Debug, PartialEq, Eq)]
        #[sol(rpc)]
        interface IOptionsNFT {
            function isOptionHashAvailable(
                address underlyingAsset,
                address strikeAsset,
                address maker,
                uint256 strikePrice,
                uint256 expiry,
                uint256 amount,
                uint256 salt
            ) external view returns (bool);

            function generateOptionHash(
                address underlyingAsset,
                address strikeAsset,
                address maker,
                uint256 strikePrice,
                uint256 expiry,
                uint256 amount,
                uint256 salt
            ) external view returns (bytes32);

            event OptionMinted(uint256 indexed tokenId, address indexed maker, address indexed taker, bytes32 optionHash);
        }
    );

    impl Copy for OptionParams {}
    impl Copy for OptionInteraction {}

    impl OptionInteraction {
        /// Recover the signed [`OptionParams`] from the interaction body.
        pub const fn option_params(&self) -> OptionParams {
            OptionParams {
                underlyingAsset: self.underlyingAsset,
                strikeAsset: self.strikeAsset,
                maker: self.maker,
                strikePrice: self.strikePrice,
                expiry: self.expiry,
                amount: self.optionAmount,
                salt: self.salt,
            }
        }
    }
}
pub use options::{IOptionsNFT, OptionInteraction, OptionParams};
