use criterion::{BenchmarkId, Criterion};
use dexsim::sim::run_stress_test_with;
use dexsim::{MatchingEngine, OrderRequest, Side, StressConfig, VenueConfig};
use std::hint::black_box;
use std::time::Duration;

fn engine_with_asks(levels: u64, per_level: u64) -> MatchingEngine {
    let engine = MatchingEngine::new(VenueConfig::default().with_pair("ETH/USDC", 2_500));
    for i in 0..levels {
        let _ = engine.submit(OrderRequest::limit(
            "ETH/USDC",
            Side::Sell,
            2_501 + i,
            per_level,
            "maker",
        ));
    }
    engine
}

/// Register benchmarks for the matching path
pub fn register_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("Engine - Match Orders");

    // Market order sweeping a ladder of resting asks
    for depth in [1u64, 10, 50] {
        group.bench_with_input(
            BenchmarkId::new("market_sweep_levels", depth),
            &depth,
            |b, &depth| {
                b.iter_batched(
                    || engine_with_asks(depth, 10),
                    |engine| {
                        let _ = black_box(engine.submit(OrderRequest::market(
                            "ETH/USDC",
                            Side::Buy,
                            depth * 10,
                            "taker",
                        )));
                    },
                    criterion::BatchSize::SmallInput,
                )
            },
        );
    }

    // Crossing limit orders trading one-for-one
    group.bench_function("crossing_limit_orders", |b| {
        b.iter_batched(
            || engine_with_asks(1, 1_000),
            |engine| {
                for _ in 0..100 {
                    let _ = black_box(engine.submit(OrderRequest::limit(
                        "ETH/USDC",
                        Side::Buy,
                        2_501,
                        10,
                        "taker",
                    )));
                }
            },
            criterion::BatchSize::SmallInput,
        )
    });

    // The burst stress entry point end to end
    group.bench_function("burst_1000_orders", |b| {
        b.iter_batched(
            || MatchingEngine::new(VenueConfig::default().with_pair("ETH/USDC", 2_500)),
            |engine| {
                black_box(run_stress_test_with(
                    &engine,
                    StressConfig {
                        order_count: 1_000,
                        batch_size: 250,
                        workers: 4,
                        inter_batch_pause: Duration::from_micros(10),
                        seed: 42,
                    },
                ));
            },
            criterion::BatchSize::SmallInput,
        )
    });

    group.finish();
}
