use criterion::Criterion;
use dexsim::{MatchingEngine, OrderRequest, Side, VenueConfig};
use std::hint::black_box;

/// Register benchmarks for conditional promotion sweeps
pub fn register_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("Engine - Conditional Monitor");

    // Reference update scanning a deep parked set with no trigger
    group.bench_function("sweep_100_parked_no_trigger", |b| {
        b.iter_batched(
            || {
                let engine =
                    MatchingEngine::new(VenueConfig::default().with_pair("ETH/USDC", 2_500));
                for i in 0..100u64 {
                    let _ = engine.submit(OrderRequest::stop_loss(
                        "ETH/USDC",
                        Side::Sell,
                        2_000 - (i % 100),
                        10,
                        "bench",
                    ));
                }
                engine
            },
            |engine| {
                let _ = black_box(engine.update_reference_price("ETH/USDC", 2_499));
            },
            criterion::BatchSize::SmallInput,
        )
    });

    // Reference update promoting an entire parked set into liquidity
    group.bench_function("promote_100_parked", |b| {
        b.iter_batched(
            || {
                let engine =
                    MatchingEngine::new(VenueConfig::default().with_pair("ETH/USDC", 2_500));
                let _ = engine.submit(OrderRequest::limit(
                    "ETH/USDC",
                    Side::Buy,
                    2_300,
                    10_000,
                    "bidder",
                ));
                for _ in 0..100 {
                    let _ = engine.submit(OrderRequest::stop_loss(
                        "ETH/USDC",
                        Side::Sell,
                        2_400,
                        10,
                        "bench",
                    ));
                }
                engine
            },
            |engine| {
                let _ = black_box(engine.update_reference_price("ETH/USDC", 2_395));
            },
            criterion::BatchSize::SmallInput,
        )
    });

    group.finish();
}
