//! Lifecycle rules over an [`OrderStore`].

use crate::OrderStore;
use alloy::primitives::B256;
use lop_options_types::{CompleteOrder, OrderStatus, StatusTransitionError, StoredOrder};
use tracing::{debug, instrument};

/// Errors returned by the store helpers.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// Store backend error.
    #[error("order store error: {0}")]
    Backend(#[source] Box<dyn core::error::Error + Send + Sync>),
    /// An order with the same hash is already stored.
    #[error("order {0} already exists")]
    Duplicate(B256),
    /// No order with the hash is stored.
    #[error("order {0} not found")]
    NotFound(B256),
    /// The status change is not allowed.
    #[error(transparent)]
    Transition(#[from] StatusTransitionError),
}

fn backend<E: core::error::Error + Send + Sync + 'static>(error: E) -> StoreError {
    StoreError::Backend(Box::new(error))
}

/// Store a freshly created order as open.
#[instrument(skip_all, fields(order_hash = %complete.order_hash))]
pub async fn insert_order<S>(
    store: &S,
    complete: CompleteOrder,
    now: u64,
) -> Result<StoredOrder, StoreError>
where
    S: OrderStore + Sync,
{
    let order_hash = complete.order_hash;
    let stored = StoredOrder::from_complete(complete, now);
    if !store.insert(stored.clone()).await.map_err(backend)? {
        return Err(StoreError::Duplicate(order_hash));
    }
    debug!("stored order");
    Ok(stored)
}

/// Move a stored order to `to`. Only open orders change status.
#[instrument(skip_all, fields(%order_hash, %to))]
pub async fn transition_order<S>(
    store: &S,
    order_hash: B256,
    to: OrderStatus,
) -> Result<StoredOrder, StoreError>
where
    S: OrderStore + Sync,
{
    let mut order =
        store.get_by_hash(order_hash).await.map_err(backend)?.ok_or(StoreError::NotFound(order_hash))?;
    order.transition(to)?;

    if !store.update_status(order_hash, to).await.map_err(backend)? {
        return Err(StoreError::NotFound(order_hash));
    }
    debug!("order status updated");
    Ok(order)
}

/// Cancel an open order.
pub async fn cancel_order<S>(store: &S, order_hash: B256) -> Result<StoredOrder, StoreError>
where
    S: OrderStore + Sync,
{
    transition_order(store, order_hash, OrderStatus::Cancelled).await
}

/// Record an observed on-chain fill.
pub async fn mark_filled<S>(store: &S, order_hash: B256) -> Result<StoredOrder, StoreError>
where
    S: OrderStore + Sync,
{
    transition_order(store, order_hash, OrderStatus::Filled).await
}
