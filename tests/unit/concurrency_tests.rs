//! Concurrent submission tests: per-pair serialization must keep book
//! invariants intact under parallel callers.

use dexsim::{MatchingEngine, OrderRequest, OrderStatus, Side, VenueConfig};
use std::sync::Arc;
use std::thread;

const THREADS: usize = 8;
const ORDERS_PER_THREAD: u64 = 200;

fn setup_engine() -> Arc<MatchingEngine> {
    Arc::new(MatchingEngine::new(
        VenueConfig::default()
            .with_pair("ETH/USDC", 2_500)
            .with_pair("SOL/USDC", 150)
            .with_pair("BTC/USDC", 60_000),
    ))
}

#[test]
fn test_parallel_non_crossing_submissions_all_rest() {
    let engine = setup_engine();

    thread::scope(|scope| {
        for worker in 0..THREADS {
            let engine = Arc::clone(&engine);
            scope.spawn(move || {
                for i in 0..ORDERS_PER_THREAD {
                    // Buys strictly below and sells strictly above the
                    // reference, so nothing ever crosses.
                    let (side, price) = if (worker + i as usize) % 2 == 0 {
                        (Side::Buy, 2_400 - (i % 50))
                    } else {
                        (Side::Sell, 2_600 + (i % 50))
                    };
                    engine
                        .submit(OrderRequest::limit(
                            "ETH/USDC",
                            side,
                            price,
                            1,
                            &format!("worker-{}", worker),
                        ))
                        .unwrap();
                }
            });
        }
    });

    assert_eq!(engine.total_trades(), 0);
    let (bids, asks) = engine.resting_volume("ETH/USDC").unwrap();
    assert_eq!(bids + asks, THREADS as u64 * ORDERS_PER_THREAD);
}

#[test]
fn test_parallel_crossing_flow_conserves_amounts() {
    let engine = setup_engine();

    thread::scope(|scope| {
        for worker in 0..THREADS {
            let engine = Arc::clone(&engine);
            scope.spawn(move || {
                let side = if worker % 2 == 0 { Side::Buy } else { Side::Sell };
                for _ in 0..ORDERS_PER_THREAD {
                    // Everyone quotes the same price, so flow crosses
                    // constantly.
                    engine
                        .submit(OrderRequest::limit(
                            "ETH/USDC",
                            side,
                            2_500,
                            1,
                            &format!("worker-{}", worker),
                        ))
                        .unwrap();
                }
            });
        }
    });

    let submitted = THREADS as u64 * ORDERS_PER_THREAD;
    let (bids, asks) = engine.resting_volume("ETH/USDC").unwrap();
    // Every unit either traded (once on each side) or still rests.
    assert_eq!(bids + asks + 2 * engine.total_trades(), submitted);

    for order in engine.open_orders("ETH/USDC").unwrap() {
        assert!(order.filled_amount <= order.amount);
        assert!(matches!(
            order.status,
            OrderStatus::Open | OrderStatus::Partial
        ));
    }
}

#[test]
fn test_pairs_are_independent_under_parallel_load() {
    let engine = setup_engine();
    let pairs = ["ETH/USDC", "SOL/USDC", "BTC/USDC"];

    thread::scope(|scope| {
        for pair in pairs {
            let engine = Arc::clone(&engine);
            scope.spawn(move || {
                let reference = engine.reference_price(pair).unwrap();
                for i in 0..ORDERS_PER_THREAD {
                    engine
                        .submit(OrderRequest::limit(
                            pair,
                            Side::Buy,
                            reference - 1 - (i % 10),
                            2,
                            "bot",
                        ))
                        .unwrap();
                }
            });
        }
    });

    for pair in pairs {
        let (bids, _) = engine.resting_volume(pair).unwrap();
        assert_eq!(bids, ORDERS_PER_THREAD * 2);
    }
}

#[test]
fn test_concurrent_cancel_and_submit_on_same_pair() {
    let engine = setup_engine();
    let mut ids = Vec::new();
    for i in 0..100u64 {
        let result = engine
            .submit(OrderRequest::limit(
                "ETH/USDC",
                Side::Buy,
                2_400 - (i % 20),
                1,
                "maker",
            ))
            .unwrap();
        ids.push(result.order.id);
    }

    thread::scope(|scope| {
        let canceller = Arc::clone(&engine);
        let cancel_ids = ids.clone();
        scope.spawn(move || {
            for id in cancel_ids {
                // Half of these race with fills; both outcomes are legal.
                let _ = canceller.cancel("ETH/USDC", id);
            }
        });

        let seller = Arc::clone(&engine);
        scope.spawn(move || {
            for _ in 0..50 {
                seller
                    .submit(OrderRequest::market("ETH/USDC", Side::Sell, 1, "taker"))
                    .unwrap();
            }
        });
    });

    // Whatever interleaving happened, the book is internally consistent:
    // every remaining order is untouched or partially filled, never over.
    for order in engine.open_orders("ETH/USDC").unwrap() {
        assert!(order.filled_amount <= order.amount);
    }
}
