//! Exchange controller
//!
//! Coordinates the order store, the matching engine, and the ledger:
//! validates incoming orders, keeps the stored history authoritative,
//! and settles matched pairs as two token transfers.

use chrono::Utc;
use tracing::{debug, info, warn};

use ledger::Ledger;
use matching_engine::{MatchedPair, OrderMatchingEngine};
use types::errors::ExchangeError;
use types::ids::{AccountId, OrderId, TokenId};
use types::numeric::Amount;
use types::order::{Order, OrderType};
use types::pair::OrderPair;

use crate::store::StateMap;

/// Orderbook exchange controller.
///
/// The store holds every order ever accepted and is the source of truth
/// for status; the engine's books are derived working state holding only
/// pending orders. Balances are checked at creation and again at
/// settlement, never escrowed.
#[derive(Debug)]
pub struct Exchange {
    orders: StateMap<OrderId, Order>,
    engine: OrderMatchingEngine,
    ledger: Ledger,
}

impl Exchange {
    /// Create an exchange over a fresh ledger.
    pub fn new() -> Self {
        Self::with_ledger(Ledger::new())
    }

    /// Create an exchange over an existing ledger.
    pub fn with_ledger(ledger: Ledger) -> Self {
        Self {
            orders: StateMap::new(),
            engine: OrderMatchingEngine::new(),
            ledger,
        }
    }

    /// The underlying ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Mutable access to the underlying ledger.
    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    // ───────────────────────── Order Lifecycle ─────────────────────────

    /// Accept a new order under a caller-supplied id.
    ///
    /// The order is created `Pending`, added to the engine's book, and
    /// written to the store. Ids stay taken for the store's lifetime, so
    /// reusing one fails even after the original order is cancelled.
    pub fn create_order(
        &mut self,
        order_id: OrderId,
        order_type: OrderType,
        token_id_in: TokenId,
        token_id_out: TokenId,
        amount_in: Amount,
        amount_out: Amount,
        sender: AccountId,
    ) -> Result<Order, ExchangeError> {
        // 1. Sender must hold the quoted input
        let available = self.ledger.balance(&token_id_in, &sender);
        if available < amount_in {
            warn!(
                sender = %sender,
                token = %token_id_in,
                required = %amount_in,
                available = %available,
                "Order rejected: insufficient balance"
            );
            return Err(ExchangeError::InsufficientBalance {
                token: token_id_in,
                required: amount_in,
                available,
            });
        }

        // 2. The id must be unused in stored history
        if self.orders.contains(&order_id) {
            warn!(order_id = %order_id, "Order rejected: id already exists");
            return Err(ExchangeError::DuplicateOrderId { order_id });
        }

        // 3. Book and record
        let order = Order::new(
            order_id,
            order_type,
            token_id_in,
            token_id_out,
            amount_in,
            amount_out,
            sender,
            Utc::now().timestamp_millis() as u64,
        );
        self.engine.add_order(order.clone());
        self.orders.set(order.id, order.clone());
        info!(
            order_id = %order.id,
            order_type = ?order.order_type,
            pair = %order.pair(),
            amount_in = %order.amount_in,
            amount_out = %order.amount_out,
            "Order created"
        );
        Ok(order)
    }

    /// Cancel a pending order.
    ///
    /// The stored order is replaced by a cancelled copy and the original
    /// leaves the engine's book. Returns the cancelled copy.
    pub fn cancel_order(&mut self, order_id: &OrderId) -> Result<Order, ExchangeError> {
        let order = self
            .orders
            .get(order_id)
            .ok_or(ExchangeError::OrderNotFound {
                order_id: *order_id,
            })?;
        if !order.is_pending() {
            return Err(ExchangeError::OrderAlreadyProcessed {
                order_id: *order_id,
                status: order.status,
            });
        }

        let cancelled = order.cancelled();
        self.engine.remove_order(&cancelled);
        self.orders.set(cancelled.id, cancelled.clone());
        info!(order_id = %cancelled.id, "Order cancelled");
        Ok(cancelled)
    }

    // ───────────────────────── Matching & Settlement ─────────────────────────

    /// Match and settle one order pair for the given tokens.
    ///
    /// `Ok(None)` means the book had no compatible pair and nothing
    /// changed. On a match two transfers settle the trade and then both
    /// fills are recorded. If a payer can no longer cover a leg, the
    /// match is unwound: the pending orders return to the book and the
    /// call fails with `InsufficientBalance`.
    pub fn match_orders(
        &mut self,
        token_a: TokenId,
        token_b: TokenId,
    ) -> Result<Option<MatchedPair>, ExchangeError> {
        let pair = OrderPair::new(token_a, token_b);
        let matched = match self.engine.match_orders(&pair) {
            Some(matched) => matched,
            None => {
                debug!(pair = %pair, "No matchable order pair");
                return Ok(None);
            }
        };

        let buyer = matched.buy.sender;
        let seller = matched.sell.sender;

        // Settlement prechecks. Creation checked balances without
        // escrowing them, so both payers must still cover their legs now.
        for (token, payer, required) in [
            (&matched.buy.token_id_in, buyer, matched.buy.amount_in),
            (&matched.sell.token_id_in, seller, matched.sell.amount_in),
        ] {
            let available = self.ledger.balance(token, &payer);
            if available < required {
                warn!(
                    buy_order = %matched.buy.id,
                    sell_order = %matched.sell.id,
                    account = %payer,
                    token = %token,
                    required = %required,
                    available = %available,
                    "Settlement aborted: payer cannot cover leg"
                );
                self.requeue(&matched);
                return Err(ExchangeError::InsufficientBalance {
                    token: token.clone(),
                    required,
                    available,
                });
            }
        }

        // Both legs settle before the fills are recorded, so stored
        // history never shows a filled order the ledger has not paid.
        if let Err(err) = self.settle(&matched) {
            self.requeue(&matched);
            return Err(err);
        }
        self.orders.set(matched.buy.id, matched.buy.clone());
        self.orders.set(matched.sell.id, matched.sell.clone());

        info!(
            buy_order = %matched.buy.id,
            sell_order = %matched.sell.id,
            pair = %pair,
            traded = %matched.traded_amount(),
            "Matched and settled order pair"
        );
        Ok(Some(matched))
    }

    /// Match and settle until the book yields no further pair.
    ///
    /// Returns the settled matches in order. A settlement failure
    /// propagates; matches settled before it stay settled.
    pub fn match_all_orders(
        &mut self,
        token_a: TokenId,
        token_b: TokenId,
    ) -> Result<Vec<MatchedPair>, ExchangeError> {
        let mut settled = Vec::new();
        while let Some(matched) = self.match_orders(token_a.clone(), token_b.clone())? {
            settled.push(matched);
        }
        Ok(settled)
    }

    /// Execute both settlement legs of a matched pair.
    ///
    /// Leg 1: the buyer pays the traded amount in their in token.
    /// Leg 2: the seller pays their full quoted input; the pairing step
    /// only adjusts a sell's out side.
    fn settle(&mut self, matched: &MatchedPair) -> Result<(), ExchangeError> {
        self.ledger.transfer(
            &matched.buy.token_id_in,
            matched.buy.sender,
            matched.sell.sender,
            matched.buy.amount_in,
        )?;
        self.ledger.transfer(
            &matched.sell.token_id_in,
            matched.sell.sender,
            matched.buy.sender,
            matched.sell.amount_in,
        )?;
        Ok(())
    }

    /// Put the stored pending copies of an unwound match back on the book.
    fn requeue(&mut self, matched: &MatchedPair) {
        if let Some(buy) = self.orders.get(&matched.buy.id) {
            self.engine.add_order(buy.clone());
        }
        if let Some(sell) = self.orders.get(&matched.sell.id) {
            self.engine.add_order(sell.clone());
        }
    }

    // ───────────────────────── Queries ─────────────────────────

    /// Look up an order by id in stored history.
    pub fn get_order(&self, order_id: &OrderId) -> Option<&Order> {
        self.orders.get(order_id)
    }

    /// Pending orders resting on the book for a pair, buys then sells.
    pub fn get_orders(&self, token_a: TokenId, token_b: TokenId) -> Vec<Order> {
        let pair = OrderPair::new(token_a, token_b);
        self.engine.pending_orders(&pair)
    }

    /// Number of orders ever accepted, regardless of status.
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }
}

impl Default for Exchange {
    fn default() -> Self {
        Self::new()
    }
}
