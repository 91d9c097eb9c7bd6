use lop_options_orders::{NonceCounter, NonceError, NonceManager, MAX_NONCE};
use lop_options_test_utils::{mocks::InMemoryNonceCounter, users::TEST_USERS};

#[tokio::test]
async fn sequential_nonces() {
    let manager = NonceManager::new(InMemoryNonceCounter::new());
    let maker = TEST_USERS[0];

    assert_eq!(manager.get_current_nonce(maker).await.unwrap(), 0);
    assert_eq!(manager.get_next_nonce(maker).await.unwrap(), 1);
    assert!(manager.is_nonce_available(maker, 1).await.unwrap());

    assert_eq!(manager.advance_nonce(maker).await.unwrap(), 1);
    assert_eq!(manager.get_current_nonce(maker).await.unwrap(), 1);
    assert!(!manager.is_nonce_available(maker, 1).await.unwrap());
    assert!(manager.is_nonce_available(maker, 2).await.unwrap());

    assert_eq!(manager.advance_nonce(maker).await.unwrap(), 2);
    manager.reset_nonce(maker).await.unwrap();
    assert_eq!(manager.get_current_nonce(maker).await.unwrap(), 0);
}

#[tokio::test]
async fn makers_are_independent() {
    let counter = InMemoryNonceCounter::new();
    let manager = NonceManager::new(counter.clone());

    manager.advance_nonce(TEST_USERS[0]).await.unwrap();
    manager.advance_nonce(TEST_USERS[0]).await.unwrap();
    assert_eq!(manager.get_current_nonce(TEST_USERS[1]).await.unwrap(), 0);

    // The counter is the injected value, not a global.
    assert_eq!(counter.current_nonce(TEST_USERS[0]).await.unwrap(), 2);
    let other = NonceManager::new(InMemoryNonceCounter::new());
    assert_eq!(other.get_current_nonce(TEST_USERS[0]).await.unwrap(), 0);
}

#[tokio::test]
async fn exhausted_at_forty_bits() {
    let counter = InMemoryNonceCounter::new();
    let maker = TEST_USERS[0];
    counter.set_nonce(maker, MAX_NONCE).await.unwrap();
    let manager = NonceManager::new(counter);

    let err = manager.get_next_nonce(maker).await.unwrap_err();
    assert!(matches!(err, NonceError::Exhausted(m) if m == maker));
    assert!(!err.is_retryable());
    assert!(!manager.is_nonce_available(maker, MAX_NONCE + 1).await.unwrap());
}
