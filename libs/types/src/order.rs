//! Order lifecycle types
//!
//! An order quotes an exact input amount the sender pays and an exact
//! output amount the sender demands. Orders are immutable values: status
//! changes produce adjusted copies, never in-place mutation, so stored
//! history is only ever replaced wholesale.

use crate::ids::{AccountId, OrderId, TokenId};
use crate::numeric::Amount;
use crate::pair::OrderPair;
use serde::{Deserialize, Serialize};

/// Order direction (which book the order rests in)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    /// Buy order (bid)
    Buy,
    /// Sell order (ask)
    Sell,
}

impl OrderType {
    /// Get the opposite direction
    pub fn opposite(&self) -> Self {
        match self {
            OrderType::Buy => OrderType::Sell,
            OrderType::Sell => OrderType::Buy,
        }
    }
}

/// Order status
///
/// `Pending` is the only state with outgoing transitions: an order becomes
/// `Filled` when matched or `Cancelled` by its sender. Terminal states
/// never change again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    /// Accepted and awaiting matching
    Pending,
    /// Matched (terminal)
    Filled,
    /// Cancelled by the sender (terminal)
    Cancelled,
}

impl OrderStatus {
    /// Check if status is terminal (no further transitions possible)
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Filled | OrderStatus::Cancelled)
    }
}

/// Complete order record
///
/// `amount_in` is what the sender pays in `token_id_in`; `amount_out` is
/// what the sender demands in `token_id_out`. A filled copy carries the
/// amount actually exchanged on the adjusted side, which can be below the
/// quoted amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub order_type: OrderType,
    pub token_id_in: TokenId,
    pub token_id_out: TokenId,
    pub amount_in: Amount,
    pub amount_out: Amount,
    pub sender: AccountId,
    pub status: OrderStatus,
    /// Creation time in milliseconds since the Unix epoch
    pub timestamp: u64,
}

impl Order {
    /// Create a new pending order under the given id
    pub fn new(
        id: OrderId,
        order_type: OrderType,
        token_id_in: TokenId,
        token_id_out: TokenId,
        amount_in: Amount,
        amount_out: Amount,
        sender: AccountId,
        timestamp: u64,
    ) -> Self {
        Self {
            id,
            order_type,
            token_id_in,
            token_id_out,
            amount_in,
            amount_out,
            sender,
            status: OrderStatus::Pending,
            timestamp,
        }
    }

    /// The canonical token pair this order trades
    pub fn pair(&self) -> OrderPair {
        OrderPair::new(self.token_id_in.clone(), self.token_id_out.clone())
    }

    /// Check if the order is still eligible for matching
    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    /// Filled copy of this order with the traded amount recorded
    ///
    /// For a buy the traded amount replaces `amount_in` (the amount
    /// actually paid); for a sell it replaces `amount_out` (the amount
    /// actually received). The other side of the quote is untouched.
    ///
    /// # Panics
    /// Panics if the order is terminal or the traded amount exceeds the
    /// quoted amount on the adjusted side
    pub fn filled(&self, traded: Amount) -> Self {
        assert!(!self.status.is_terminal(), "Cannot fill terminal order");

        let mut filled = self.clone();
        filled.status = OrderStatus::Filled;
        match self.order_type {
            OrderType::Buy => {
                assert!(traded <= self.amount_in, "Fill exceeds quoted amount");
                filled.amount_in = traded;
            }
            OrderType::Sell => {
                assert!(traded <= self.amount_out, "Fill exceeds quoted amount");
                filled.amount_out = traded;
            }
        }
        filled
    }

    /// Cancelled copy of this order
    ///
    /// # Panics
    /// Panics if the order is already in a terminal state
    pub fn cancelled(&self) -> Self {
        assert!(!self.status.is_terminal(), "Cannot cancel terminal order");
        Self {
            status: OrderStatus::Cancelled,
            ..self.clone()
        }
    }
}
