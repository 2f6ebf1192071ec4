//! Burst benchmark scenarios through the public API.

use dexsim::{run_stress_test, MatchingEngine, StressConfig, VenueConfig};
use dexsim::sim::run_stress_test_with;
use std::time::Duration;

fn setup_engine() -> MatchingEngine {
    MatchingEngine::new(
        VenueConfig::default()
            .with_pair("ETH/USDC", 2_500)
            .with_pair("SOL/USDC", 150),
    )
}

#[test]
fn test_stress_reports_throughput() {
    let engine = setup_engine();
    let report = run_stress_test(&engine, 1_000);

    assert_eq!(report.order_count, 1_000);
    assert_eq!(report.skipped, 0);
    assert!(report.achieved_tps > 0.0);
    // Non-crossing generation: every order rests, nothing trades.
    assert_eq!(engine.total_trades(), 0);
    let open: usize = engine
        .pairs()
        .iter()
        .map(|pair| engine.open_orders(pair).unwrap().len())
        .sum();
    assert_eq!(open, 1_000);
}

#[test]
fn test_stress_report_serializes() {
    let engine = setup_engine();
    let report = run_stress_test_with(
        &engine,
        StressConfig {
            order_count: 200,
            batch_size: 50,
            workers: 2,
            inter_batch_pause: Duration::from_millis(1),
            seed: 9,
        },
    );

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["order_count"], 200);
    assert!(json["achieved_tps"].is_number());
}

#[test]
fn test_stress_runs_are_reproducible() {
    let first = setup_engine();
    let second = setup_engine();
    let config = StressConfig {
        order_count: 500,
        batch_size: 100,
        workers: 4,
        inter_batch_pause: Duration::from_millis(1),
        seed: 42,
    };

    run_stress_test_with(&first, config.clone());
    run_stress_test_with(&second, config);

    // Same seed, same resting state, regardless of thread interleaving
    // (nothing crosses, so ordering cannot matter).
    for pair in ["ETH/USDC", "SOL/USDC"] {
        assert_eq!(
            first.resting_volume(pair).unwrap(),
            second.resting_volume(pair).unwrap()
        );
        let a = first.book_snapshot(pair, 100).unwrap();
        let b = second.book_snapshot(pair, 100).unwrap();
        assert_eq!(a.bids, b.bids);
        assert_eq!(a.asks, b.asks);
    }
}
