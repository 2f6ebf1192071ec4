//! Continuous synthetic traffic at a live-adjustable rate.

use crate::engine::MatchingEngine;
use crate::types::{OrderRequest, Side};
use rand::Rng;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

/// Tuning knobs for the continuous generator.
#[derive(Debug, Clone)]
pub struct FlowConfig {
    /// Submission rate in orders per second; adjustable live via the handle
    pub orders_per_sec: u64,
    /// Maximum distance of generated limit prices from the reference
    /// price, in basis points
    pub spread_bps: u64,
    /// Fraction of generated orders submitted as market orders
    pub market_ratio: f64,
    /// Number of distinct synthetic trader identities
    pub trader_count: usize,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            orders_per_sec: 20,
            spread_bps: 50,
            market_ratio: 0.2,
            trader_count: 8,
        }
    }
}

/// Spawns and owns the background bot thread.
pub struct FlowGenerator;

impl FlowGenerator {
    /// Start generating traffic against the engine. The returned handle
    /// controls the rate and stops the thread.
    pub fn start(engine: Arc<MatchingEngine>, config: FlowConfig) -> FlowHandle {
        let rate = Arc::new(AtomicU64::new(config.orders_per_sec));
        let running = Arc::new(AtomicBool::new(true));
        let submitted = Arc::new(AtomicU64::new(0));

        info!(
            "Starting synthetic flow at {} orders/sec across {} pairs",
            config.orders_per_sec,
            engine.pairs().len()
        );

        let handle = {
            let rate = Arc::clone(&rate);
            let running = Arc::clone(&running);
            let submitted = Arc::clone(&submitted);
            thread::spawn(move || {
                run_flow_loop(&engine, &config, &rate, &running, &submitted);
            })
        };

        FlowHandle {
            rate,
            running,
            submitted,
            handle,
        }
    }
}

/// Control handle for a running [`FlowGenerator`].
pub struct FlowHandle {
    rate: Arc<AtomicU64>,
    running: Arc<AtomicBool>,
    submitted: Arc<AtomicU64>,
    handle: thread::JoinHandle<()>,
}

impl FlowHandle {
    /// Change the submission rate without restarting the generator. A rate
    /// of zero pauses traffic.
    pub fn set_rate(&self, orders_per_sec: u64) {
        self.rate.store(orders_per_sec, Ordering::Relaxed);
    }

    /// Current submission rate in orders per second
    pub fn rate(&self) -> u64 {
        self.rate.load(Ordering::Relaxed)
    }

    /// Orders successfully submitted so far
    pub fn submitted(&self) -> u64 {
        self.submitted.load(Ordering::Relaxed)
    }

    /// Stop the generator and wait for its thread to exit
    pub fn stop(self) {
        self.running.store(false, Ordering::Relaxed);
        if self.handle.join().is_err() {
            warn!("Synthetic flow thread panicked");
        }
    }
}

fn run_flow_loop(
    engine: &MatchingEngine,
    config: &FlowConfig,
    rate: &AtomicU64,
    running: &AtomicBool,
    submitted: &AtomicU64,
) {
    let mut rng = rand::thread_rng();

    while running.load(Ordering::Relaxed) {
        // Re-read every tick so rate changes take effect immediately.
        let orders_per_sec = rate.load(Ordering::Relaxed);
        if orders_per_sec == 0 {
            thread::sleep(Duration::from_millis(50));
            continue;
        }

        let pairs = engine.pairs();
        if pairs.is_empty() {
            thread::sleep(Duration::from_millis(50));
            continue;
        }
        let pair = &pairs[rng.gen_range(0..pairs.len())];

        match generate_request(engine, config, pair, &mut rng) {
            Some(request) => match engine.submit(request) {
                Ok(_) => {
                    submitted.fetch_add(1, Ordering::Relaxed);
                }
                Err(err) => {
                    // Best-effort traffic: log and keep going.
                    warn!("Synthetic order rejected: {}", err);
                }
            },
            None => {
                thread::sleep(Duration::from_millis(50));
                continue;
            }
        }

        thread::sleep(Duration::from_micros(1_000_000 / orders_per_sec));
    }
}

/// Build one randomized order near the pair's reference price.
fn generate_request(
    engine: &MatchingEngine,
    config: &FlowConfig,
    pair: &str,
    rng: &mut impl Rng,
) -> Option<OrderRequest> {
    let reference = engine.reference_price(pair).ok()?;
    let side = if rng.gen_bool(0.5) {
        Side::Buy
    } else {
        Side::Sell
    };
    let trader = format!("bot-{}", rng.gen_range(0..config.trader_count));
    let amount = rng.gen_range(1..=100u64);

    if rng.gen_bool(config.market_ratio.clamp(0.0, 1.0)) {
        return Some(OrderRequest::market(pair, side, amount, &trader));
    }

    // Jitter around the reference; offsets straddle it so some limits
    // cross and trade while others rest as liquidity.
    let max_offset = (reference * config.spread_bps / 10_000).max(1);
    let offset = rng.gen_range(0..=max_offset) as i64;
    let signed = if rng.gen_bool(0.5) { offset } else { -offset };
    let price = (reference as i64 + signed).max(1) as u64;
    Some(OrderRequest::limit(pair, side, price, amount, &trader))
}
