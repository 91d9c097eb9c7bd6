use crate::CompleteOrder;
use alloy::primitives::{Address, B256};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a stored order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Waiting for a taker.
    Open,
    /// Filled on-chain.
    Filled,
    /// Cancelled by the maker.
    Cancelled,
    /// Past its expiry.
    Expired,
}

impl OrderStatus {
    /// True if no further transition is possible.
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Open)
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            Self::Open => "open",
            Self::Filled => "filled",
            Self::Cancelled => "cancelled",
            Self::Expired => "expired",
        };
        f.write_str(s)
    }
}

/// A rejected status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot move order from {from} to {to}")]
pub struct StatusTransitionError {
    /// Current status.
    pub from: OrderStatus,
    /// Requested status.
    pub to: OrderStatus,
}

/// A persisted option order, keyed by its order hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredOrder {
    /// The order and option, with both signatures.
    #[serde(flatten)]
    pub complete: CompleteOrder,
    /// Stored status. See [`StoredOrder::effective_status`].
    pub status: OrderStatus,
    /// Unix timestamp the order was stored at.
    pub created_at: u64,
}

impl StoredOrder {
    /// Wrap a freshly created order as open.
    pub const fn from_complete(complete: CompleteOrder, created_at: u64) -> Self {
        Self { complete, status: OrderStatus::Open, created_at }
    }

    /// The storage key.
    pub const fn order_hash(&self) -> B256 {
        self.complete.order_hash
    }

    /// The maker.
    pub const fn maker(&self) -> Address {
        self.complete.order.maker
    }

    /// Status as seen at `now`. Open orders past their option expiry read as
    /// expired without being rewritten.
    pub const fn effective_status(&self, now: u64) -> OrderStatus {
        match self.status {
            OrderStatus::Open if self.complete.terms.is_expired(now) => OrderStatus::Expired,
            status => status,
        }
    }

    /// Move to `to`. Only open orders change status.
    pub fn transition(&mut self, to: OrderStatus) -> Result<(), StatusTransitionError> {
        if self.status.is_terminal() || to == OrderStatus::Open {
            return Err(StatusTransitionError { from: self.status, to });
        }
        self.status = to;
        Ok(())
    }
}

/// Filters for listing stored orders. Unset fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFilter {
    /// Only orders by this maker.
    pub maker: Option<Address>,
    /// Only orders with this effective status.
    pub status: Option<OrderStatus>,
    /// Only options on this underlying asset.
    pub underlying_asset: Option<Address>,
    /// Only options struck in this asset.
    pub strike_asset: Option<Address>,
}

impl OrderFilter {
    /// Filter on maker.
    pub const fn with_maker(mut self, maker: Address) -> Self {
        self.maker = Some(maker);
        self
    }

    /// Filter on effective status.
    pub const fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// True if `order` passes the filter at time `now`.
    pub fn matches(&self, order: &StoredOrder, now: u64) -> bool {
        let terms = &order.complete.terms;
        self.maker.map_or(true, |m| m == order.maker())
            && self.status.map_or(true, |s| s == order.effective_status(now))
            && self.underlying_asset.map_or(true, |a| a == terms.underlying_asset)
            && self.strike_asset.map_or(true, |a| a == terms.strike_asset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{signing::EcdsaSignature, LimitOrder, OptionTerms, ReplayScheme};
    use alloy::primitives::U256;

    fn stored(expiry: u64) -> StoredOrder {
        let sig =
            EcdsaSignature::new(B256::repeat_byte(0x02), B256::repeat_byte(0x03), 27).unwrap();
        let terms = OptionTerms {
            underlying_asset: Address::repeat_byte(0x33),
            strike_asset: Address::repeat_byte(0x44),
            strike_price: U256::from(2_000u64),
            option_amount: U256::from(1u64),
            premium: U256::from(5u64),
            expiry,
        };
        let complete = CompleteOrder {
            order: LimitOrder {
                salt: U256::from(1),
                maker: Address::repeat_byte(0xaa),
                receiver: Address::ZERO,
                maker_asset: terms.underlying_asset,
                taker_asset: terms.strike_asset,
                making_amount: terms.option_amount,
                taking_amount: terms.premium,
                maker_traits: U256::ZERO,
            },
            order_hash: B256::repeat_byte(0x05),
            order_signature: sig,
            terms,
            option_salt: U256::from(42),
            option_digest: B256::repeat_byte(0x06),
            option_signature: sig,
            interaction: Default::default(),
            scheme: ReplayScheme::Salt,
        };
        StoredOrder::from_complete(complete, 100)
    }

    #[test]
    fn expiry_is_read_time() {
        let order = stored(1_000);
        assert_eq!(order.effective_status(999), OrderStatus::Open);
        assert_eq!(order.effective_status(1_000), OrderStatus::Expired);
        assert_eq!(order.status, OrderStatus::Open);
    }

    #[test]
    fn transitions_only_from_open() {
        let mut order = stored(1_000);
        order.transition(OrderStatus::Filled).unwrap();
        assert_eq!(
            order.transition(OrderStatus::Cancelled),
            Err(StatusTransitionError { from: OrderStatus::Filled, to: OrderStatus::Cancelled })
        );

        let mut order = stored(1_000);
        assert!(order.transition(OrderStatus::Open).is_err());
    }

    #[test]
    fn filter_matching() {
        let order = stored(1_000);
        let maker = order.maker();
        assert!(OrderFilter::default().matches(&order, 0));
        assert!(OrderFilter::default().with_maker(maker).matches(&order, 0));
        assert!(!OrderFilter::default().with_maker(Address::ZERO).matches(&order, 0));
        assert!(OrderFilter::default().with_status(OrderStatus::Expired).matches(&order, 2_000));
        assert!(!OrderFilter::default().with_status(OrderStatus::Open).matches(&order, 2_000));
    }

    #[test]
    fn wire_format() {
        let json = serde_json::to_value(stored(1_000)).unwrap();
        assert_eq!(json["status"], "open");
        assert_eq!(json["orderHash"], format!("{:#x}", B256::repeat_byte(0x05)));
        assert_eq!(json["createdAt"], 100);

        let back: StoredOrder = serde_json::from_value(json).unwrap();
        assert_eq!(back, stored(1_000));
    }
}
