use alloy::primitives::U256;
use futures_util::future::try_join_all;
use lop_options_bindings::ILimitOrderProtocol::fillOrderArgsCall;
use lop_options_constants::ChainConstants;
use lop_options_orders::{
    store::{insert_order, StoreError},
    BuilderError, CompleteOptionRequest, OptionOrderBuilder, OrderHashError, ReplayProtection,
    MAX_NONCE,
};
use lop_options_test_utils::{
    fixtures::{builder, fresh_terms, hash_manager, now, option_terms, verifier},
    init_tracing,
    mocks::{InMemoryOrderStore, StalledSigner},
    test_constants,
    users::{TEST_SIGNERS, TEST_USERS},
};
use lop_options_types::{
    signing::{order_hash, OrderDomain},
    InvalidParameter, MakerTraits, OrderStatus, ReplayScheme,
};
use std::{collections::HashSet, time::Duration};

#[tokio::test]
async fn fresh_option() {
    init_tracing();
    let maker = TEST_USERS[0];
    let terms = fresh_terms();
    let builder = builder(TEST_SIGNERS[0].clone(), hash_manager(verifier()));

    let complete = builder.build_complete_option(CompleteOptionRequest::new(terms)).await.unwrap();
    assert_eq!(complete.maker(), maker);
    assert_eq!(complete.scheme, ReplayScheme::Salt);

    // The verifier, with nothing consumed, reports the digest available.
    let manager = builder.hash_manager();
    assert!(manager.is_available(maker, &terms, complete.option_salt).await.unwrap());
    assert_eq!(complete.option_digest, manager.compute_digest(maker, &terms, complete.option_salt));

    // The payload decodes back to the seven params and the signature.
    let (target, interaction) = complete.decode_interaction().unwrap();
    assert_eq!(target, test_constants::OPTIONS_NFT);
    assert_eq!(interaction.option_params(), complete.option_params());
    assert_eq!(interaction.maker, maker);
    assert_eq!(interaction.underlyingAsset, terms.underlying_asset);
    assert_eq!(interaction.strikeAsset, terms.strike_asset);
    assert_eq!(interaction.strikePrice, terms.strike_price);
    assert_eq!(interaction.expiry, U256::from(terms.expiry));
    assert_eq!(interaction.optionAmount, terms.option_amount);
    assert_eq!(interaction.salt, complete.option_salt);
    assert_eq!(interaction.v, complete.option_signature.v);
    assert_eq!(interaction.r, complete.option_signature.r);
    assert_eq!(interaction.s, complete.option_signature.s);

    // Both signatures recover the maker.
    assert_eq!(complete.option_signature.recover(&complete.option_digest).unwrap(), maker);
    assert_eq!(complete.order_signature.recover(&complete.order_hash).unwrap(), maker);

    let domain = OrderDomain::from_constants(&ChainConstants::test());
    assert_eq!(complete.order_hash, order_hash(&complete.eip712_order(), &domain));
}

#[tokio::test]
async fn order_shape() {
    let terms = fresh_terms();
    let builder = builder(TEST_SIGNERS[1].clone(), hash_manager(verifier()));

    let complete = builder
        .build_complete_option(
            CompleteOptionRequest::new(terms).with_order_salt(U256::from(99)),
        )
        .await
        .unwrap();

    let order = complete.order;
    assert_eq!(order.salt, U256::from(99));
    assert_eq!(order.maker_asset, terms.underlying_asset);
    assert_eq!(order.taker_asset, terms.strike_asset);
    assert_eq!(order.making_amount, terms.option_amount);
    assert_eq!(order.taking_amount, terms.premium);

    let traits = MakerTraits::decode(order.maker_traits);
    assert!(traits.no_partial_fills);
    assert_eq!(U256::from(traits.nonce), complete.option_salt & U256::from((1u64 << 40) - 1));
}

#[tokio::test]
async fn supplied_salt_checked() {
    let maker = TEST_USERS[0];
    let terms = fresh_terms();
    let verifier = verifier();
    verifier.consume(maker, &terms, U256::from(42));
    let builder = builder(TEST_SIGNERS[0].clone(), hash_manager(verifier));

    let request = CompleteOptionRequest::new(terms);
    let err = builder
        .build_complete_option(request.with_replay(ReplayProtection::Salt(Some(U256::from(42)))))
        .await
        .unwrap_err();
    assert!(matches!(err, BuilderError::Hash(OrderHashError::DigestCollision { .. })));
    assert!(!err.is_retryable());

    let complete = builder
        .build_complete_option(request.with_replay(ReplayProtection::Salt(Some(U256::from(43)))))
        .await
        .unwrap();
    assert_eq!(complete.option_salt, U256::from(43));
}

#[tokio::test]
async fn sequential_nonce_is_salt_and_traits_nonce() {
    let builder = builder(TEST_SIGNERS[2].clone(), hash_manager(verifier()));
    let request =
        CompleteOptionRequest::new(fresh_terms()).with_replay(ReplayProtection::SequentialNonce(7));

    let complete = builder.build_complete_option(request).await.unwrap();
    assert_eq!(complete.scheme, ReplayScheme::SequentialNonce);
    assert_eq!(complete.option_salt, U256::from(7));
    assert_eq!(MakerTraits::decode(complete.order.maker_traits).nonce, 7);
    // One availability read, no salt search.
    assert_eq!(builder.hash_manager().verifier().calls(), 1);
}

#[tokio::test]
async fn consumed_sequential_nonce_rejected() {
    let verifier = verifier();
    let terms = fresh_terms();
    let digest = verifier.consume(TEST_USERS[0], &terms, U256::from(7));
    let builder = builder(TEST_SIGNERS[0].clone(), hash_manager(verifier));

    let request = CompleteOptionRequest::new(terms).with_replay(ReplayProtection::SequentialNonce(7));
    let err = builder.build_complete_option(request).await.unwrap_err();
    assert!(matches!(
        err,
        BuilderError::Hash(OrderHashError::DigestCollision { digest: d, salt })
            if d == digest && salt == U256::from(7)
    ));
    assert!(!err.is_retryable());

    // The next nonce is free.
    let request = CompleteOptionRequest::new(terms).with_replay(ReplayProtection::SequentialNonce(8));
    assert_eq!(builder.build_complete_option(request).await.unwrap().option_salt, U256::from(8));
}

#[tokio::test]
async fn sequential_nonce_must_fit_traits() {
    let builder = builder(TEST_SIGNERS[0].clone(), hash_manager(verifier()));

    let request = CompleteOptionRequest::new(fresh_terms())
        .with_replay(ReplayProtection::SequentialNonce(MAX_NONCE + 2));
    let err = builder.build_complete_option(request).await.unwrap_err();
    assert!(matches!(
        err,
        BuilderError::InvalidParameter(InvalidParameter::NonceOutOfRange { nonce, max })
            if nonce == MAX_NONCE + 2 && max == MAX_NONCE
    ));
    assert_eq!(builder.hash_manager().verifier().calls(), 0);

    let request = CompleteOptionRequest::new(fresh_terms())
        .with_replay(ReplayProtection::SequentialNonce(MAX_NONCE));
    let complete = builder.build_complete_option(request).await.unwrap();
    assert_eq!(complete.option_salt, U256::from(MAX_NONCE));
    assert_eq!(MakerTraits::decode(complete.order.maker_traits).nonce, MAX_NONCE);
}

#[tokio::test(start_paused = true)]
async fn stalled_signer_times_out() {
    let builder = OptionOrderBuilder::new(
        StalledSigner::new(TEST_SIGNERS[0].clone()),
        hash_manager(verifier()),
        ChainConstants::test(),
    )
    .with_signing_timeout(Duration::from_secs(3));

    let err =
        builder.build_complete_option(CompleteOptionRequest::new(fresh_terms())).await.unwrap_err();
    assert!(matches!(err, BuilderError::SigningTimeout(t) if t == Duration::from_secs(3)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn expired_terms_rejected() {
    let builder = builder(TEST_SIGNERS[0].clone(), hash_manager(verifier()));
    let request = CompleteOptionRequest::new(option_terms(now() - 1));

    let err = builder.build_complete_option(request).await.unwrap_err();
    assert!(matches!(err, BuilderError::InvalidParameter(InvalidParameter::ExpiryPassed { .. })));
    assert_eq!(builder.hash_manager().verifier().calls(), 0);
}

#[tokio::test]
async fn unavailable_verifier_is_retryable() {
    let verifier = verifier();
    verifier.set_failing(true);
    let builder = builder(TEST_SIGNERS[0].clone(), hash_manager(verifier));

    let err =
        builder.build_complete_option(CompleteOptionRequest::new(fresh_terms())).await.unwrap_err();
    assert!(err.is_retryable());
}

#[tokio::test]
async fn prepare_fill_call() {
    let builder = builder(TEST_SIGNERS[0].clone(), hash_manager(verifier()));
    let complete =
        builder.build_complete_option(CompleteOptionRequest::new(fresh_terms())).await.unwrap();

    let args = complete.prepare_fill(complete.terms.premium).unwrap();
    assert_eq!(args.taker_traits().interaction_length, complete.interaction.len());
    assert_eq!(args.order, complete.order_tuple());

    let compact = complete.order_signature.compact();
    let call: fillOrderArgsCall = args.to_call();
    assert_eq!(call.r, compact.r);
    assert_eq!(call.vs, compact.vs);
    assert_eq!(call.amount, complete.terms.premium);
    assert_eq!(call.args, complete.interaction);

    let tx = args.to_fill_tx(test_constants::LIMIT_ORDER_PROTOCOL);
    assert_eq!(tx.to, Some(test_constants::LIMIT_ORDER_PROTOCOL.into()));
}

#[tokio::test]
async fn concurrent_builds_do_not_collide() {
    let builder = builder(TEST_SIGNERS[0].clone(), hash_manager(verifier()));
    let terms = fresh_terms();

    let built = try_join_all(
        (0..4).map(|_| builder.build_complete_option(CompleteOptionRequest::new(terms))),
    )
    .await
    .unwrap();

    let salts: HashSet<_> = built.iter().map(|c| c.option_salt).collect();
    let digests: HashSet<_> = built.iter().map(|c| c.option_digest).collect();
    let hashes: HashSet<_> = built.iter().map(|c| c.order_hash).collect();
    assert_eq!(salts.len(), 4);
    assert_eq!(digests.len(), 4);
    assert_eq!(hashes.len(), 4);
}

#[tokio::test]
async fn persist_and_reject_duplicate() {
    let store = InMemoryOrderStore::new();
    let builder = builder(TEST_SIGNERS[0].clone(), hash_manager(verifier()));

    let stored = builder
        .persist_complete_option(&store, CompleteOptionRequest::new(fresh_terms()))
        .await
        .unwrap();
    assert_eq!(stored.status, OrderStatus::Open);
    assert_eq!(store.len(), 1);

    let err = insert_order(&store, stored.complete.clone(), now()).await.unwrap_err();
    assert!(matches!(err, StoreError::Duplicate(hash) if hash == stored.order_hash()));
}
