//! Side book infrastructure
//!
//! One side of the order book: orders grouped into buckets by canonical
//! token pair, keyed by order id. Uses BTreeMap at both levels for
//! deterministic iteration order.

use std::collections::BTreeMap;

use types::ids::OrderId;
use types::order::Order;
use types::pair::OrderPair;

/// One side (buy or sell) of the order book
///
/// An order appears at most once. The bucket an order lands in depends
/// only on its canonical pair, not on which token it names as input, so
/// opposite orientations of the same market share a bucket.
#[derive(Debug, Clone)]
pub struct SideBook {
    /// Pair bucket -> (order id -> order)
    /// Using BTreeMap ensures deterministic iteration
    buckets: BTreeMap<OrderPair, BTreeMap<OrderId, Order>>,
}

impl SideBook {
    /// Create a new empty side book
    pub fn new() -> Self {
        Self {
            buckets: BTreeMap::new(),
        }
    }

    /// Insert an order into its pair bucket
    ///
    /// Returns false and leaves the book unchanged when an order with
    /// the same id is already present.
    pub fn insert(&mut self, order: Order) -> bool {
        let bucket = self.buckets.entry(order.pair()).or_default();
        if bucket.contains_key(&order.id) {
            return false;
        }
        bucket.insert(order.id, order);
        true
    }

    /// Remove an order by pair and id
    ///
    /// Returns the removed order if it was present. Empty pair buckets
    /// are pruned so iteration never visits dead pairs.
    pub fn remove(&mut self, order: &Order) -> Option<Order> {
        let pair = order.pair();
        let bucket = self.buckets.get_mut(&pair)?;
        let removed = bucket.remove(&order.id);
        if removed.is_some() && bucket.is_empty() {
            self.buckets.remove(&pair);
        }
        removed
    }

    /// Check if an order is present
    pub fn contains(&self, order: &Order) -> bool {
        self.buckets
            .get(&order.pair())
            .map(|bucket| bucket.contains_key(&order.id))
            .unwrap_or(false)
    }

    /// Snapshot of a pair bucket's orders, in id order
    pub fn orders(&self, pair: &OrderPair) -> Vec<Order> {
        self.buckets
            .get(pair)
            .map(|bucket| bucket.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Total number of orders across all buckets
    pub fn order_count(&self) -> usize {
        self.buckets.values().map(BTreeMap::len).sum()
    }

    /// Check if the book holds no orders
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of live pair buckets
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}

impl Default for SideBook {
    fn default() -> Self {
        Self::new()
    }
}
