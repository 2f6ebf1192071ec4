//! The matching engine: validation, matching, conditional promotion and
//! statistics routing behind a single `submit` chokepoint.

use super::conditional::{ConditionalMonitor, is_triggered, ratchet_trailing};
use super::error::EngineError;
use super::events::{EngineEvent, EventSink};
use crate::book::{OrderBook, OrderBookSnapshot};
use crate::stats::{
    Candle, CandleSeries, FlatPnl, Leaderboard, LeaderboardEntry, PnlModel, StatsRecorder,
};
use crate::types::{Order, OrderId, OrderKind, OrderRequest, OrderStatus, Side, Trade};
use crate::utils::current_time_millis;
use dashmap::DashMap;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use tracing::{debug, trace};
use uuid::Uuid;

/// One trading pair to configure on the venue.
#[derive(Debug, Clone)]
pub struct PairConfig {
    /// Pair symbol, e.g. `"ETH/USDC"`
    pub symbol: String,
    /// Seed reference price, so conditional triggers and synthetic flow
    /// have a price before the first trade
    pub reference_price: u64,
}

impl PairConfig {
    /// Configure a pair with a seed reference price
    pub fn new(symbol: &str, reference_price: u64) -> Self {
        Self {
            symbol: symbol.to_string(),
            reference_price,
        }
    }
}

/// Venue-wide configuration.
#[derive(Debug, Clone)]
pub struct VenueConfig {
    /// Trading pairs available at startup; more can be added live
    pub pairs: Vec<PairConfig>,
    /// Candle bucket width in milliseconds
    pub candle_interval_ms: u64,
    /// Candles retained per pair
    pub candle_history: usize,
    /// Trades retained in the venue-wide log
    pub trade_retention: usize,
    /// Rows kept on the leaderboard
    pub leaderboard_size: usize,
    /// Book depth included in pair snapshots
    pub snapshot_depth: usize,
}

impl Default for VenueConfig {
    fn default() -> Self {
        Self {
            pairs: Vec::new(),
            candle_interval_ms: 60_000,
            candle_history: 500,
            trade_retention: 1_000,
            leaderboard_size: 10,
            snapshot_depth: 10,
        }
    }
}

impl VenueConfig {
    /// Add a pair to the configuration
    pub fn with_pair(mut self, symbol: &str, reference_price: u64) -> Self {
        self.pairs.push(PairConfig::new(symbol, reference_price));
        self
    }
}

/// Outcome of a successful submission.
#[derive(Debug, Clone)]
pub struct SubmitResult {
    /// The submitted order with its final fill state. Market remainders are
    /// discarded, so a `Partial` market order here is terminal, not resting.
    pub order: Order,
    /// Fills produced by this submission, in execution order
    pub fills: Vec<Trade>,
    /// For OCO submissions, the parked stop leg
    pub linked_stop: Option<Order>,
}

/// Aggregate view of one pair for dashboard polling or snapshot events.
#[derive(Debug, Clone, Serialize)]
pub struct PairSnapshot {
    /// Pair symbol
    pub pair: String,
    /// Snapshot time, milliseconds since epoch
    pub timestamp: u64,
    /// Current reference price
    pub reference_price: u64,
    /// Depth-limited book state
    pub book: OrderBookSnapshot,
    /// Parked conditional orders on this pair
    pub parked_orders: usize,
    /// Venue-wide operations per second
    pub throughput_ops_per_sec: u64,
    /// Latency of the most recent submit, fractional milliseconds
    pub last_latency_ms: f64,
    /// Most recent candles, oldest first
    pub candles: Vec<Candle>,
}

/// Everything the engine tracks for one pair, guarded by a single lock so
/// submissions on the same pair serialize while pairs match in parallel.
#[derive(Debug)]
struct PairState {
    book: OrderBook,
    monitor: ConditionalMonitor,
    reference_price: u64,
    candles: CandleSeries,
}

/// Trades and events produced while a pair lock is held, recorded and
/// emitted only after it is released.
#[derive(Default)]
struct Outputs {
    trades: Vec<Trade>,
    events: Vec<EngineEvent>,
}

/// The venue's matching engine.
///
/// All order flow (dashboard submissions, synthetic bots, promoted
/// conditional orders) enters through [`MatchingEngine::submit`], so book
/// invariants hold for every source of traffic.
pub struct MatchingEngine {
    pairs: DashMap<String, Mutex<PairState>>,
    stats: StatsRecorder,
    leaderboard: Mutex<Leaderboard>,
    pnl_model: Box<dyn PnlModel>,
    sinks: Mutex<Vec<Arc<dyn EventSink>>>,
    candle_interval_ms: u64,
    candle_history: usize,
    snapshot_depth: usize,
}

impl MatchingEngine {
    /// Create an engine with the default accounting rule ([`FlatPnl`])
    pub fn new(config: VenueConfig) -> Self {
        Self::with_pnl_model(config, Box::new(FlatPnl))
    }

    /// Create an engine routing trade facts through a caller-provided
    /// P&L accounting rule
    pub fn with_pnl_model(config: VenueConfig, pnl_model: Box<dyn PnlModel>) -> Self {
        let engine = Self {
            pairs: DashMap::new(),
            stats: StatsRecorder::new(config.trade_retention),
            leaderboard: Mutex::new(Leaderboard::new(config.leaderboard_size)),
            pnl_model,
            sinks: Mutex::new(Vec::new()),
            candle_interval_ms: config.candle_interval_ms,
            candle_history: config.candle_history,
            snapshot_depth: config.snapshot_depth,
        };
        for pair in config.pairs {
            engine.add_pair(pair);
        }
        engine
    }

    /// Configure an additional trading pair at runtime
    pub fn add_pair(&self, config: PairConfig) {
        debug!(
            "Configuring pair {} with reference price {}",
            config.symbol, config.reference_price
        );
        self.pairs.insert(
            config.symbol.clone(),
            Mutex::new(PairState {
                book: OrderBook::new(&config.symbol),
                monitor: ConditionalMonitor::default(),
                reference_price: config.reference_price,
                candles: CandleSeries::new(self.candle_interval_ms, self.candle_history),
            }),
        );
    }

    /// Symbols of all configured pairs
    pub fn pairs(&self) -> Vec<String> {
        self.pairs.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Register a sink for outbound events
    pub fn subscribe(&self, sink: Arc<dyn EventSink>) {
        lock_or_recover(&self.sinks).push(sink);
    }

    /// Submit an order. This is the single chokepoint for all order flow.
    ///
    /// Returns the order with its final fill state plus the trades it
    /// produced. Conditional orders whose trigger has not been reached park
    /// with no trades; a triggered conditional (and any order it cascades
    /// into) executes before this call returns.
    pub fn submit(&self, request: OrderRequest) -> Result<SubmitResult, EngineError> {
        let started = Instant::now();
        validate_request(&request)?;
        let entry = self
            .pairs
            .get(&request.pair)
            .ok_or_else(|| EngineError::UnknownPair(request.pair.clone()))?;

        let mut outputs = Outputs::default();
        let result = {
            let mut state = lock_or_recover(entry.value());
            let result = self.submit_locked(&mut state, request, &mut outputs);
            self.sweep_conditionals(&mut state, &mut outputs);
            result
        };
        drop(entry);

        self.stats.record_operation();
        self.stats.record_latency(started.elapsed());
        self.publish(outputs);
        Ok(result)
    }

    /// Cancel a resting or parked order. Cancelling an OCO leg cancels its
    /// sibling in the same step. Filled, already-cancelled or unknown ids
    /// return [`EngineError::OrderNotFound`] and leave the book untouched.
    pub fn cancel(&self, pair: &str, order_id: OrderId) -> Result<Order, EngineError> {
        let entry = self
            .pairs
            .get(pair)
            .ok_or_else(|| EngineError::UnknownPair(pair.to_string()))?;

        let mut outputs = Outputs::default();
        let cancelled = {
            let mut state = lock_or_recover(entry.value());
            let Some(mut order) = state
                .book
                .remove(order_id)
                .or_else(|| state.monitor.remove(order_id))
            else {
                return Err(EngineError::OrderNotFound(order_id));
            };
            order.mark_cancelled();
            outputs.events.push(EngineEvent::OrderRemoved {
                pair: pair.to_string(),
                order_id,
                status: order.status,
            });
            if let Some(sibling) = state.monitor.take_link(order_id) {
                self.cancel_leg(&mut state, sibling, &mut outputs);
            }
            order
        };
        drop(entry);

        self.publish(outputs);
        Ok(cancelled)
    }

    /// Modify a resting order: change its price (the order is re-queued and
    /// loses time priority) and/or reduce its amount in place. Parked
    /// conditional orders cannot be modified; cancel and resubmit instead.
    pub fn modify_order(
        &self,
        pair: &str,
        order_id: OrderId,
        new_price: Option<u64>,
        new_amount: Option<u64>,
    ) -> Result<Order, EngineError> {
        if new_price.is_none() && new_amount.is_none() {
            return Err(EngineError::InvalidOrder(
                "modification must change price or amount".to_string(),
            ));
        }
        if new_price == Some(0) || new_amount == Some(0) {
            return Err(EngineError::InvalidOrder(
                "price and amount must be positive".to_string(),
            ));
        }
        let entry = self
            .pairs
            .get(pair)
            .ok_or_else(|| EngineError::UnknownPair(pair.to_string()))?;

        let mut outputs = Outputs::default();
        let updated = {
            let mut state = lock_or_recover(entry.value());
            let Some(resting) = state.book.get_order(order_id) else {
                return Err(EngineError::OrderNotFound(order_id));
            };
            match new_price {
                Some(price) => {
                    // Validate against the resting order before touching the
                    // book, so a rejected modification cannot cost it its
                    // queue position.
                    if let Some(amount) = new_amount {
                        if amount <= resting.filled_amount {
                            return Err(EngineError::InvalidOrder(
                                "new amount must exceed filled amount".to_string(),
                            ));
                        }
                    }
                    // Price changes are cancel + resubmit: the order goes
                    // back through matching (it may now cross) and any
                    // remainder re-queues behind existing liquidity.
                    let Some(mut order) = state.book.remove(order_id) else {
                        return Err(EngineError::OrderNotFound(order_id));
                    };
                    if let Some(amount) = new_amount {
                        order.amount = amount;
                    }
                    order.kind = match order.kind {
                        OrderKind::Oco { stop_price, .. } => OrderKind::Oco {
                            limit_price: price,
                            stop_price,
                        },
                        _ => OrderKind::Limit { price },
                    };
                    order.timestamp = current_time_millis();
                    outputs.events.push(EngineEvent::OrderRemoved {
                        pair: pair.to_string(),
                        order_id,
                        status: order.status,
                    });
                    let result =
                        self.execute_marketable(&mut state, order, Some(price), &mut outputs);
                    if result.order.status == OrderStatus::Filled {
                        // A fully filled OCO leg takes its sibling with it.
                        if let Some(sibling) = state.monitor.take_link(order_id) {
                            self.cancel_leg(&mut state, sibling, &mut outputs);
                        }
                    }
                    self.sweep_conditionals(&mut state, &mut outputs);
                    result.order
                }
                None => {
                    let amount = new_amount.unwrap_or(0);
                    let Some(order) = state.book.reduce_amount(order_id, amount) else {
                        return Err(EngineError::InvalidOrder(
                            "amount can only be reduced, and not below the filled amount"
                                .to_string(),
                        ));
                    };
                    if order.remaining() == 0 {
                        // Reduction consumed the remainder; the order left
                        // the book as filled.
                        outputs.events.push(EngineEvent::OrderRemoved {
                            pair: pair.to_string(),
                            order_id,
                            status: order.status,
                        });
                    } else {
                        outputs.events.push(EngineEvent::OrderPartiallyFilled {
                            pair: pair.to_string(),
                            order_id,
                            remaining: order.remaining(),
                        });
                    }
                    order
                }
            }
        };
        drop(entry);

        self.publish(outputs);
        Ok(updated)
    }

    /// Update the reference price for a pair (e.g. from an external feed)
    /// and re-evaluate parked conditional orders against it. Returns the
    /// trades produced by promoted orders.
    pub fn update_reference_price(
        &self,
        pair: &str,
        price: u64,
    ) -> Result<Vec<Trade>, EngineError> {
        if price == 0 {
            return Err(EngineError::InvalidOrder(
                "reference price must be positive".to_string(),
            ));
        }
        let entry = self
            .pairs
            .get(pair)
            .ok_or_else(|| EngineError::UnknownPair(pair.to_string()))?;

        let mut outputs = Outputs::default();
        {
            let mut state = lock_or_recover(entry.value());
            state.reference_price = price;
            self.sweep_conditionals(&mut state, &mut outputs);
        }
        drop(entry);

        let trades = outputs.trades.clone();
        self.publish(outputs);
        Ok(trades)
    }

    /// Current reference price of a pair
    pub fn reference_price(&self, pair: &str) -> Result<u64, EngineError> {
        let entry = self
            .pairs
            .get(pair)
            .ok_or_else(|| EngineError::UnknownPair(pair.to_string()))?;
        let state = lock_or_recover(entry.value());
        Ok(state.reference_price)
    }

    /// Depth-limited book snapshot for a pair
    pub fn book_snapshot(
        &self,
        pair: &str,
        depth: usize,
    ) -> Result<OrderBookSnapshot, EngineError> {
        let entry = self
            .pairs
            .get(pair)
            .ok_or_else(|| EngineError::UnknownPair(pair.to_string()))?;
        let state = lock_or_recover(entry.value());
        Ok(state.book.snapshot(depth))
    }

    /// Aggregate snapshot of one pair, also pushed to event sinks so the
    /// broadcast layer can forward periodic snapshots.
    pub fn publish_pair_snapshot(&self, pair: &str) -> Result<PairSnapshot, EngineError> {
        let entry = self
            .pairs
            .get(pair)
            .ok_or_else(|| EngineError::UnknownPair(pair.to_string()))?;
        let snapshot = {
            let state = lock_or_recover(entry.value());
            PairSnapshot {
                pair: pair.to_string(),
                timestamp: current_time_millis(),
                reference_price: state.reference_price,
                book: state.book.snapshot(self.snapshot_depth),
                parked_orders: state.monitor.len(),
                throughput_ops_per_sec: self.stats.throughput_ops_per_sec(),
                last_latency_ms: self.stats.last_latency_ms(),
                candles: state.candles.recent(50),
            }
        };
        drop(entry);

        self.publish(Outputs {
            trades: Vec::new(),
            events: vec![EngineEvent::Snapshot(snapshot.clone())],
        });
        Ok(snapshot)
    }

    /// Look up an order that is resting or parked on a pair
    pub fn get_order(&self, pair: &str, order_id: OrderId) -> Result<Order, EngineError> {
        let entry = self
            .pairs
            .get(pair)
            .ok_or_else(|| EngineError::UnknownPair(pair.to_string()))?;
        let state = lock_or_recover(entry.value());
        state
            .book
            .get_order(order_id)
            .cloned()
            .or_else(|| state.monitor.get(order_id).cloned())
            .ok_or(EngineError::OrderNotFound(order_id))
    }

    /// All open orders on a pair: resting ones first, then parked
    pub fn open_orders(&self, pair: &str) -> Result<Vec<Order>, EngineError> {
        let entry = self
            .pairs
            .get(pair)
            .ok_or_else(|| EngineError::UnknownPair(pair.to_string()))?;
        let state = lock_or_recover(entry.value());
        let mut orders = state.book.all_orders();
        orders.extend(state.monitor.orders());
        Ok(orders)
    }

    /// Total resting quantity per side of a pair's book: `(bids, asks)`
    pub fn resting_volume(&self, pair: &str) -> Result<(u64, u64), EngineError> {
        let entry = self
            .pairs
            .get(pair)
            .ok_or_else(|| EngineError::UnknownPair(pair.to_string()))?;
        let state = lock_or_recover(entry.value());
        Ok((
            state.book.side_volume(Side::Buy),
            state.book.side_volume(Side::Sell),
        ))
    }

    /// Most recent candles for a pair, oldest first
    pub fn candles(&self, pair: &str, n: usize) -> Result<Vec<Candle>, EngineError> {
        let entry = self
            .pairs
            .get(pair)
            .ok_or_else(|| EngineError::UnknownPair(pair.to_string()))?;
        let state = lock_or_recover(entry.value());
        Ok(state.candles.recent(n))
    }

    /// Top leaderboard rows, sorted descending by P&L
    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        lock_or_recover(&self.leaderboard).top()
    }

    /// Most recent trades across all pairs, oldest first
    pub fn recent_trades(&self, n: usize) -> Vec<Trade> {
        self.stats.recent_trades(n)
    }

    /// Venue-wide operations per second
    pub fn throughput_ops_per_sec(&self) -> u64 {
        self.stats.throughput_ops_per_sec()
    }

    /// Latency of the most recent submit in fractional milliseconds
    pub fn last_latency_ms(&self) -> f64 {
        self.stats.last_latency_ms()
    }

    /// Total trades matched since startup
    pub fn total_trades(&self) -> u64 {
        self.stats.total_trades()
    }

    // ------------------------------------------------------------------
    // Internals: everything below runs with the pair lock held.
    // ------------------------------------------------------------------

    fn submit_locked(
        &self,
        state: &mut PairState,
        request: OrderRequest,
        outputs: &mut Outputs,
    ) -> SubmitResult {
        let mut order = Order {
            id: OrderId::new(),
            pair: request.pair,
            side: request.side,
            kind: request.kind,
            amount: request.amount,
            filled_amount: 0,
            status: OrderStatus::Open,
            trader: request.trader,
            timestamp: current_time_millis(),
        };

        if order.kind.is_conditional() {
            ratchet_trailing(&mut order.kind, order.side, state.reference_price);
            if is_triggered(&order, state.reference_price) {
                // Already marketable at submission; execute as market.
                return self.execute_marketable(state, order, None, outputs);
            }
            state.monitor.park(order.clone());
            outputs.events.push(EngineEvent::OrderAdded {
                pair: order.pair.clone(),
                order: order.clone(),
            });
            return SubmitResult {
                order,
                fills: Vec::new(),
                linked_stop: None,
            };
        }

        if let OrderKind::Oco {
            limit_price,
            stop_price,
        } = order.kind
        {
            let stop_leg = Order {
                id: OrderId::new(),
                pair: order.pair.clone(),
                side: order.side,
                kind: OrderKind::StopLoss { stop_price },
                amount: order.amount,
                filled_amount: 0,
                status: OrderStatus::Open,
                trader: order.trader.clone(),
                timestamp: order.timestamp,
            };
            state.monitor.link(order.id, stop_leg.id);
            state.monitor.park(stop_leg.clone());
            outputs.events.push(EngineEvent::OrderAdded {
                pair: stop_leg.pair.clone(),
                order: stop_leg.clone(),
            });

            let mut result = self.execute_marketable(state, order, Some(limit_price), outputs);
            let linked_stop = if result.order.status == OrderStatus::Filled {
                // The limit leg filled on arrival; the stop leg dies with it.
                state
                    .monitor
                    .take_link(result.order.id)
                    .and_then(|sibling| self.cancel_leg(state, sibling, outputs))
            } else {
                Some(stop_leg)
            };
            result.linked_stop = linked_stop;
            return result;
        }

        match order.kind {
            OrderKind::Market => self.execute_marketable(state, order, None, outputs),
            OrderKind::Limit { price } => self.execute_marketable(state, order, Some(price), outputs),
            // Conditional and OCO kinds were dispatched above.
            _ => unreachable!("conditional kinds handled before marketable dispatch"),
        }
    }

    /// Match an order against the book, create trades, rest limit
    /// remainders and discard market remainders.
    fn execute_marketable(
        &self,
        state: &mut PairState,
        mut order: Order,
        limit_price: Option<u64>,
        outputs: &mut Outputs,
    ) -> SubmitResult {
        let outcome = state
            .book
            .match_incoming(order.side, order.remaining(), limit_price);
        let now = current_time_millis();
        let mut fills = Vec::with_capacity(outcome.fills.len());

        for fill in &outcome.fills {
            order.apply_fill(fill.amount);
            let (buyer, seller) = match order.side {
                Side::Buy => (order.trader.clone(), fill.maker_trader.clone()),
                Side::Sell => (fill.maker_trader.clone(), order.trader.clone()),
            };
            let trade = Trade {
                id: Uuid::new_v4(),
                pair: order.pair.clone(),
                price: fill.price,
                amount: fill.amount,
                taker_side: order.side,
                buyer,
                seller,
                maker_order_id: fill.maker_order_id,
                taker_order_id: order.id,
                timestamp: now,
            };
            state.candles.record(now, fill.price, fill.amount);
            outputs.events.push(EngineEvent::Trade(trade.clone()));

            if fill.maker_filled {
                outputs.events.push(EngineEvent::OrderRemoved {
                    pair: order.pair.clone(),
                    order_id: fill.maker_order_id,
                    status: OrderStatus::Filled,
                });
                // A filled maker takes its OCO sibling with it.
                if let Some(sibling) = state.monitor.take_link(fill.maker_order_id) {
                    self.cancel_leg(state, sibling, outputs);
                }
            } else {
                outputs.events.push(EngineEvent::OrderPartiallyFilled {
                    pair: order.pair.clone(),
                    order_id: fill.maker_order_id,
                    remaining: fill.maker_remaining,
                });
            }

            outputs.trades.push(trade.clone());
            fills.push(trade);
        }

        if let Some(last) = fills.last() {
            state.reference_price = last.price;
        }

        if order.remaining() > 0 {
            if let Some(price) = limit_price {
                state.book.insert(price, order.clone());
                outputs.events.push(EngineEvent::OrderAdded {
                    pair: order.pair.clone(),
                    order: order.clone(),
                });
            } else {
                // Market orders never rest; the remainder is discarded.
                trace!(
                    "Discarding unfilled market remainder {} of order {}",
                    order.remaining(),
                    order.id
                );
            }
        }

        SubmitResult {
            order,
            fills,
            linked_stop: None,
        }
    }

    /// Promote every parked order whose trigger fires at the current
    /// reference price, looping because promoted market orders can move the
    /// price and trigger further orders.
    fn sweep_conditionals(&self, state: &mut PairState, outputs: &mut Outputs) {
        loop {
            let fired = state.monitor.drain_triggered(state.reference_price);
            if fired.is_empty() {
                break;
            }
            for parked in fired {
                // A triggered OCO leg cancels its sibling before executing.
                if let Some(sibling) = state.monitor.take_link(parked.id) {
                    self.cancel_leg(state, sibling, outputs);
                }
                debug!(
                    "Promoting conditional order {} on {} at reference price {}",
                    parked.id, parked.pair, state.reference_price
                );
                let _ = self.execute_marketable(state, parked, None, outputs);
            }
        }
    }

    /// Remove an OCO sibling wherever it lives (book or monitor) and mark
    /// it cancelled.
    fn cancel_leg(
        &self,
        state: &mut PairState,
        order_id: OrderId,
        outputs: &mut Outputs,
    ) -> Option<Order> {
        let mut order = state
            .book
            .remove(order_id)
            .or_else(|| state.monitor.remove(order_id))?;
        order.mark_cancelled();
        outputs.events.push(EngineEvent::OrderRemoved {
            pair: order.pair.clone(),
            order_id,
            status: order.status,
        });
        Some(order)
    }

    /// Record trades into the stats/leaderboard and fan events out to the
    /// sinks. Runs strictly after all pair locks are released.
    fn publish(&self, outputs: Outputs) {
        if !outputs.trades.is_empty() {
            let mut leaderboard = lock_or_recover(&self.leaderboard);
            for trade in &outputs.trades {
                self.stats.record_trade(trade);
                let (buyer_delta, seller_delta) = self.pnl_model.pnl_deltas(trade);
                leaderboard.record(&trade.buyer, buyer_delta, trade.amount);
                leaderboard.record(&trade.seller, seller_delta, trade.amount);
            }
        }
        if outputs.events.is_empty() {
            return;
        }
        let sinks = lock_or_recover(&self.sinks);
        for event in &outputs.events {
            for sink in sinks.iter() {
                sink.on_event(event);
            }
        }
    }
}

fn validate_request(request: &OrderRequest) -> Result<(), EngineError> {
    if request.amount == 0 {
        return Err(EngineError::InvalidOrder(
            "amount must be positive".to_string(),
        ));
    }
    match request.kind {
        OrderKind::Market => Ok(()),
        OrderKind::Limit { price } => {
            if price == 0 {
                Err(EngineError::InvalidOrder(
                    "limit price must be positive".to_string(),
                ))
            } else {
                Ok(())
            }
        }
        OrderKind::StopLoss { stop_price } | OrderKind::TakeProfit { stop_price } => {
            if stop_price == 0 {
                Err(EngineError::InvalidOrder(
                    "stop price must be positive".to_string(),
                ))
            } else {
                Ok(())
            }
        }
        OrderKind::TrailingStop {
            trailing_percent, ..
        } => {
            if !trailing_percent.is_finite() || trailing_percent <= 0.0 || trailing_percent >= 100.0
            {
                Err(EngineError::InvalidOrder(
                    "trailing percent must be between 0 and 100".to_string(),
                ))
            } else {
                Ok(())
            }
        }
        OrderKind::Oco {
            limit_price,
            stop_price,
        } => {
            if limit_price == 0 || stop_price == 0 {
                Err(EngineError::InvalidOrder(
                    "OCO prices must be positive".to_string(),
                ))
            } else {
                Ok(())
            }
        }
    }
}

fn lock_or_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
