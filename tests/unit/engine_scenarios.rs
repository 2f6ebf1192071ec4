//! End-to-end matching scenarios through the public engine API.

use dexsim::{
    EngineError, MatchingEngine, OrderRequest, OrderStatus, Side, VenueConfig,
};

const PAIR: &str = "ETH/USDC";

fn setup_engine() -> MatchingEngine {
    MatchingEngine::new(VenueConfig::default().with_pair(PAIR, 2_500))
}

#[test]
fn test_partial_fill_against_resting_ask() {
    let engine = setup_engine();
    let ask = engine
        .submit(OrderRequest::limit(PAIR, Side::Sell, 2_500, 10, "maker"))
        .unwrap();

    let result = engine
        .submit(OrderRequest::limit(PAIR, Side::Buy, 2_500, 4, "taker"))
        .unwrap();

    assert_eq!(result.fills.len(), 1);
    assert_eq!(result.fills[0].price, 2_500);
    assert_eq!(result.fills[0].amount, 4);
    assert_eq!(result.order.status, OrderStatus::Filled);

    // The resting ask mutated in place.
    let resting = engine.get_order(PAIR, ask.order.id).unwrap();
    assert_eq!(resting.filled_amount, 4);
    assert_eq!(resting.status, OrderStatus::Partial);
    assert_eq!(resting.remaining(), 6);
}

#[test]
fn test_market_buy_walks_the_ask_ladder() {
    let engine = setup_engine();
    engine
        .submit(OrderRequest::limit(PAIR, Side::Sell, 2_500, 10, "maker_a"))
        .unwrap();
    engine
        .submit(OrderRequest::limit(PAIR, Side::Sell, 2_501, 10, "maker_b"))
        .unwrap();

    let result = engine
        .submit(OrderRequest::market(PAIR, Side::Buy, 20, "taker"))
        .unwrap();

    assert_eq!(result.fills.len(), 2);
    assert_eq!(result.fills[0].price, 2_500);
    assert_eq!(result.fills[1].price, 2_501);
    assert_eq!(result.order.status, OrderStatus::Filled);

    // Both asks fully consumed and removed.
    let snapshot = engine.book_snapshot(PAIR, 10).unwrap();
    assert_eq!(snapshot.best_ask(), None);
    assert_eq!(engine.open_orders(PAIR).unwrap().len(), 0);
}

#[test]
fn test_fill_amounts_are_conserved() {
    let engine = setup_engine();
    for (price, amount) in [(2_500u64, 3u64), (2_500, 5), (2_501, 7), (2_502, 11)] {
        engine
            .submit(OrderRequest::limit(PAIR, Side::Sell, price, amount, "maker"))
            .unwrap();
    }

    let result = engine
        .submit(OrderRequest::market(PAIR, Side::Buy, 20, "taker"))
        .unwrap();

    let taker_total: u64 = result.fills.iter().map(|trade| trade.amount).sum();
    assert_eq!(taker_total, result.order.filled_amount);
    assert_eq!(taker_total, 20);
    // Maker side lost exactly what the taker gained.
    let (_, asks) = engine.resting_volume(PAIR).unwrap();
    assert_eq!(asks, 3 + 5 + 7 + 11 - 20);
}

#[test]
fn test_fill_bounds_invariant_on_every_order() {
    let engine = setup_engine();
    for i in 0..20u64 {
        let side = if i % 2 == 0 { Side::Buy } else { Side::Sell };
        let price = 2_495 + (i % 11);
        engine
            .submit(OrderRequest::limit(PAIR, side, price, 5 + i, "trader"))
            .unwrap();
    }

    for order in engine.open_orders(PAIR).unwrap() {
        assert!(order.filled_amount <= order.amount);
        match order.status {
            OrderStatus::Open => assert_eq!(order.filled_amount, 0),
            OrderStatus::Partial => assert!(order.filled_amount > 0),
            status => panic!("unexpected resting status {:?}", status),
        }
    }
}

#[test]
fn test_limit_price_caps_the_walk() {
    let engine = setup_engine();
    engine
        .submit(OrderRequest::limit(PAIR, Side::Sell, 2_500, 10, "maker_a"))
        .unwrap();
    engine
        .submit(OrderRequest::limit(PAIR, Side::Sell, 2_510, 10, "maker_b"))
        .unwrap();

    // Willing to pay up to 2_505: fills the first ask, rests the rest.
    let result = engine
        .submit(OrderRequest::limit(PAIR, Side::Buy, 2_505, 15, "taker"))
        .unwrap();
    assert_eq!(result.fills.len(), 1);
    assert_eq!(result.order.status, OrderStatus::Partial);

    let snapshot = engine.book_snapshot(PAIR, 10).unwrap();
    assert_eq!(snapshot.best_bid(), Some((2_505, 5)));
    assert_eq!(snapshot.best_ask(), Some((2_510, 10)));
}

#[test]
fn test_cancellation_is_idempotent() {
    let engine = setup_engine();
    let submitted = engine
        .submit(OrderRequest::limit(PAIR, Side::Buy, 2_490, 10, "alice"))
        .unwrap();

    engine.cancel(PAIR, submitted.order.id).unwrap();
    for _ in 0..3 {
        assert!(matches!(
            engine.cancel(PAIR, submitted.order.id),
            Err(EngineError::OrderNotFound(_))
        ));
    }

    // The book stayed consistent throughout.
    let (bids, asks) = engine.resting_volume(PAIR).unwrap();
    assert_eq!((bids, asks), (0, 0));
}

#[test]
fn test_cancelling_filled_order_reports_not_found() {
    let engine = setup_engine();
    let ask = engine
        .submit(OrderRequest::limit(PAIR, Side::Sell, 2_500, 10, "maker"))
        .unwrap();
    engine
        .submit(OrderRequest::market(PAIR, Side::Buy, 10, "taker"))
        .unwrap();

    assert!(matches!(
        engine.cancel(PAIR, ask.order.id),
        Err(EngineError::OrderNotFound(_))
    ));
}

#[test]
fn test_failed_submission_leaves_book_untouched() {
    let engine = setup_engine();
    engine
        .submit(OrderRequest::limit(PAIR, Side::Buy, 2_490, 10, "alice"))
        .unwrap();
    let before = engine.book_snapshot(PAIR, 10).unwrap();

    assert!(engine
        .submit(OrderRequest::limit(PAIR, Side::Sell, 0, 10, "bob"))
        .is_err());
    assert!(engine
        .submit(OrderRequest::limit("NOPE/USDC", Side::Sell, 2_510, 10, "bob"))
        .is_err());

    let after = engine.book_snapshot(PAIR, 10).unwrap();
    assert_eq!(before.bids, after.bids);
    assert_eq!(before.asks, after.asks);
}

#[test]
fn test_snapshot_serializes_for_broadcast() {
    let engine = setup_engine();
    engine
        .submit(OrderRequest::limit(PAIR, Side::Buy, 2_490, 10, "alice"))
        .unwrap();

    let snapshot = engine.publish_pair_snapshot(PAIR).unwrap();
    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["pair"], PAIR);
    assert_eq!(json["reference_price"], 2_500);
    assert!(json["book"]["bids"].is_array());
}
