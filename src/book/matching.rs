//! Contains the core matching walk over the resting side of the book.

use super::book::OrderBook;
use crate::types::{OrderId, Side};
use tracing::trace;

/// One fill against a single resting (maker) order.
#[derive(Debug, Clone, PartialEq)]
pub struct MakerFill {
    /// Id of the resting order that was matched
    pub maker_order_id: OrderId,
    /// Identity of the resting order's trader
    pub maker_trader: String,
    /// Execution price: always the resting order's price
    pub price: u64,
    /// Filled quantity
    pub amount: u64,
    /// Remaining quantity on the maker after this fill
    pub maker_remaining: u64,
    /// Whether the maker was fully consumed and removed from the book
    pub maker_filled: bool,
}

/// Result of walking the book with one incoming order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatchOutcome {
    /// Fills in execution order (best price first, FIFO within a level)
    pub fills: Vec<MakerFill>,
    /// Unfilled remainder of the incoming order
    pub remaining: u64,
}

impl MatchOutcome {
    /// Total filled quantity across all makers
    pub fn filled(&self) -> u64 {
        self.fills.iter().map(|f| f.amount).sum()
    }
}

impl OrderBook {
    /// Walk the opposing side in price priority, filling the incoming
    /// order against resting liquidity.
    ///
    /// A buy matches asks with `price <= limit`, a sell matches bids with
    /// `price >= limit`; `None` (market) accepts any price. Fills execute
    /// at the resting order's price. Fully consumed makers and emptied
    /// levels are removed before returning; partially consumed makers stay
    /// with their `filled_amount` advanced.
    pub fn match_incoming(
        &mut self,
        side: Side,
        amount: u64,
        limit_price: Option<u64>,
    ) -> MatchOutcome {
        let mut fills: Vec<MakerFill> = Vec::new();
        let mut remaining = amount;

        {
            let levels = match side {
                Side::Buy => &mut self.asks,
                Side::Sell => &mut self.bids,
            };

            while remaining > 0 {
                // Best opposing price: lowest ask for buys, highest bid for sells.
                let best_price = match side {
                    Side::Buy => levels.keys().next().copied(),
                    Side::Sell => levels.keys().next_back().copied(),
                };
                let Some(price) = best_price else {
                    break; // Opposing side exhausted
                };

                // Stop once no resting order satisfies the price condition.
                if let Some(limit) = limit_price {
                    match side {
                        Side::Buy if price > limit => break,
                        Side::Sell if price < limit => break,
                        _ => {}
                    }
                }

                let mut level_empty = false;
                if let Some(level) = levels.get_mut(&price) {
                    while remaining > 0 {
                        let (take, maker_id, maker_trader, maker_remaining) = {
                            let Some(maker) = level.front_mut() else {
                                break;
                            };
                            let take = remaining.min(maker.remaining());
                            maker.apply_fill(take);
                            (take, maker.id, maker.trader.clone(), maker.remaining())
                        };
                        remaining -= take;
                        level.reduce_total(take);

                        let maker_filled = maker_remaining == 0;
                        fills.push(MakerFill {
                            maker_order_id: maker_id,
                            maker_trader,
                            price,
                            amount: take,
                            maker_remaining,
                            maker_filled,
                        });

                        if maker_filled {
                            level.pop_front();
                        } else {
                            // Maker outlasted the incoming order; its
                            // remainder keeps the front of the queue.
                            break;
                        }
                    }
                    level_empty = level.order_count() == 0;
                }
                if level_empty {
                    levels.remove(&price);
                }
            }
        }

        // Detach fully consumed makers from the location index.
        for fill in fills.iter().filter(|f| f.maker_filled) {
            self.order_locations.remove(&fill.maker_order_id);
        }

        if let Some(last) = fills.last() {
            self.set_last_trade_price(last.price);
            trace!(
                "Order book {}: matched {} of {} {} across {} maker(s), last price {}",
                self.symbol(),
                amount - remaining,
                amount,
                side,
                fills.len(),
                last.price
            );
        }

        MatchOutcome { fills, remaining }
    }
}
