//! Burst stress benchmark: a fixed count of randomized orders in
//! concurrent batches, reporting achieved throughput.

use crate::engine::MatchingEngine;
use crate::types::{OrderRequest, Side};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

/// Parameters for a stress run.
#[derive(Debug, Clone)]
pub struct StressConfig {
    /// Total orders to submit
    pub order_count: usize,
    /// Orders per concurrent batch
    pub batch_size: usize,
    /// Threads submitting each batch
    pub workers: usize,
    /// Pause between batches
    pub inter_batch_pause: Duration,
    /// RNG seed; the same seed generates the same order sequence
    pub seed: u64,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            order_count: 10_000,
            batch_size: 200,
            workers: 4,
            inter_batch_pause: Duration::from_millis(1),
            seed: 42,
        }
    }
}

/// Result of a stress run.
#[derive(Debug, Clone, Serialize)]
pub struct StressReport {
    /// Orders the run attempted to submit
    pub order_count: usize,
    /// Submissions rejected by the engine
    pub skipped: usize,
    /// Wall-clock duration of the whole run in milliseconds
    pub duration_ms: u64,
    /// Successful submissions per second of wall-clock time
    pub achieved_tps: f64,
}

/// Run the stress benchmark with default parameters.
pub fn run_stress_test(engine: &MatchingEngine, count: usize) -> StressReport {
    run_stress_test_with(
        engine,
        StressConfig {
            order_count: count,
            ..StressConfig::default()
        },
    )
}

/// Run the stress benchmark with explicit parameters.
///
/// Batches are split across worker threads so submissions overlap at the
/// call level; the engine's per-pair locks still serialize book mutation.
pub fn run_stress_test_with(engine: &MatchingEngine, config: StressConfig) -> StressReport {
    let mut pairs = engine.pairs();
    // Map iteration order is arbitrary; sort so a seed maps to the same
    // order sequence on every run.
    pairs.sort();
    let references: Vec<(String, u64)> = pairs
        .iter()
        .filter_map(|pair| {
            engine
                .reference_price(pair)
                .ok()
                .map(|price| (pair.clone(), price))
        })
        .collect();
    let orders = generate_stress_orders(&references, config.order_count, config.seed);

    info!(
        "Stress test: {} orders in batches of {} across {} workers",
        config.order_count, config.batch_size, config.workers
    );

    let skipped = AtomicU64::new(0);
    let workers = config.workers.max(1);
    let started = Instant::now();

    for batch in orders.chunks(config.batch_size.max(1)) {
        thread::scope(|scope| {
            for slice in batch.chunks(batch.len().div_ceil(workers)) {
                let skipped = &skipped;
                scope.spawn(move || {
                    for request in slice {
                        if engine.submit(request.clone()).is_err() {
                            skipped.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                });
            }
        });
        thread::sleep(config.inter_batch_pause);
    }

    let elapsed = started.elapsed();
    let skipped = skipped.load(Ordering::Relaxed) as usize;
    let succeeded = orders.len() - skipped;
    let achieved_tps = if elapsed.as_secs_f64() > 0.0 {
        succeeded as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    };

    let report = StressReport {
        order_count: orders.len(),
        skipped,
        duration_ms: elapsed.as_millis() as u64,
        achieved_tps,
    };
    info!(
        "Stress test done: {} orders ({} skipped) in {} ms, {:.0} tps",
        report.order_count, report.skipped, report.duration_ms, report.achieved_tps
    );
    report
}

/// Deterministic order generation: the same seed and pair set produce the
/// same sequence. Buys price below each pair's reference and sells above,
/// so stress orders rest as liquidity instead of trading against each
/// other and the add path dominates the measurement.
pub(crate) fn generate_stress_orders(
    references: &[(String, u64)],
    count: usize,
    seed: u64,
) -> Vec<OrderRequest> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut orders = Vec::with_capacity(count);
    if references.is_empty() {
        return orders;
    }

    for _ in 0..count {
        let (pair, reference) = &references[rng.gen_range(0..references.len())];
        let side = if rng.gen_bool(0.5) {
            Side::Buy
        } else {
            Side::Sell
        };
        let max_offset = (reference / 100).max(1);
        let offset = rng.gen_range(1..=max_offset);
        let price = match side {
            Side::Buy => reference.saturating_sub(offset).max(1),
            Side::Sell => reference + offset,
        };
        let amount = rng.gen_range(1..=100u64);
        let trader = format!("stress-{}", rng.gen_range(0..64));
        orders.push(OrderRequest::limit(pair, side, price, amount, &trader));
    }
    orders
}
