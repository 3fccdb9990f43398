//! Matching engine core
//!
//! Owns the buy and sell books and performs single-step matching: each
//! call pairs at most the best buy with the best sell of one token pair.

use serde::{Deserialize, Serialize};
use types::numeric::Amount;
use types::order::{Order, OrderType};
use types::pair::OrderPair;

use crate::book::SideBook;
use crate::ranking;

/// A matched buy/sell pair carrying the filled order copies
///
/// The buy copy's `amount_in` and the sell copy's `amount_out` both
/// record the traded amount; the remaining fields keep their quoted
/// values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedPair {
    pub buy: Order,
    pub sell: Order,
}

impl MatchedPair {
    /// The amount that changed hands, denominated in the buy's in token
    pub fn traded_amount(&self) -> Amount {
        self.buy.amount_in
    }
}

/// Order matching engine
///
/// Keeps one side book per direction. Matched orders leave their books
/// as part of the match, so the books only ever hold live orders.
#[derive(Debug, Clone)]
pub struct OrderMatchingEngine {
    buy_orders: SideBook,
    sell_orders: SideBook,
}

impl OrderMatchingEngine {
    /// Create a new engine with empty books
    pub fn new() -> Self {
        Self {
            buy_orders: SideBook::new(),
            sell_orders: SideBook::new(),
        }
    }

    /// Add an order to the book named by its direction
    ///
    /// Duplicate ids are a no-op. Returns whether the order was added.
    pub fn add_order(&mut self, order: Order) -> bool {
        match order.order_type {
            OrderType::Buy => self.buy_orders.insert(order),
            OrderType::Sell => self.sell_orders.insert(order),
        }
    }

    /// Remove an order from its book, if present
    pub fn remove_order(&mut self, order: &Order) -> Option<Order> {
        match order.order_type {
            OrderType::Buy => self.buy_orders.remove(order),
            OrderType::Sell => self.sell_orders.remove(order),
        }
    }

    /// Check if an order is resting in its book
    pub fn contains(&self, order: &Order) -> bool {
        match order.order_type {
            OrderType::Buy => self.buy_orders.contains(order),
            OrderType::Sell => self.sell_orders.contains(order),
        }
    }

    /// Match the best buy against the best sell of a pair
    ///
    /// Collects the pair's pending orders, ranks each side, and tests
    /// only the best candidate from each. On a match both source orders
    /// are removed from their books and filled copies are returned;
    /// otherwise the books are untouched and the call has no effect.
    pub fn match_orders(&mut self, pair: &OrderPair) -> Option<MatchedPair> {
        let mut buys: Vec<Order> = self
            .buy_orders
            .orders(pair)
            .into_iter()
            .filter(Order::is_pending)
            .collect();
        let mut sells: Vec<Order> = self
            .sell_orders
            .orders(pair)
            .into_iter()
            .filter(Order::is_pending)
            .collect();

        if buys.is_empty() || sells.is_empty() {
            return None;
        }

        buys.sort_by(ranking::compare_buys);
        sells.sort_by(ranking::compare_sells);

        let best_buy = &buys[0];
        let best_sell = &sells[0];
        if !ranking::can_match(best_buy, best_sell) {
            return None;
        }

        let traded = best_buy.amount_in.min(best_sell.amount_out);
        let matched = MatchedPair {
            buy: best_buy.filled(traded),
            sell: best_sell.filled(traded),
        };

        // A matched order never matches again
        self.buy_orders.remove(best_buy);
        self.sell_orders.remove(best_sell);

        Some(matched)
    }

    /// Resting orders for a pair, buys then sells
    pub fn pending_orders(&self, pair: &OrderPair) -> Vec<Order> {
        let mut orders = self.buy_orders.orders(pair);
        orders.extend(self.sell_orders.orders(pair));
        orders
    }

    /// Total number of resting orders across both books
    pub fn order_count(&self) -> usize {
        self.buy_orders.order_count() + self.sell_orders.order_count()
    }
}

impl Default for OrderMatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}
