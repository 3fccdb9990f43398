//! Error taxonomy for the exchange
//!
//! Ledger errors cover balance and supply bookkeeping; exchange errors
//! cover order validation and settlement. Settlement failures chain the
//! underlying ledger error via `#[from]`.

use crate::ids::{OrderId, TokenId};
use crate::numeric::Amount;
use crate::order::OrderStatus;
use thiserror::Error;

/// Ledger-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Insufficient balance for token {token}: required {required}, available {available}")]
    InsufficientBalance {
        token: TokenId,
        required: Amount,
        available: Amount,
    },

    #[error("Supply cap exceeded for token {token}: cap {cap}")]
    SupplyCapExceeded { token: TokenId, cap: Amount },

    #[error("Balance overflow for token {token}")]
    BalanceOverflow { token: TokenId },
}

/// Exchange-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExchangeError {
    #[error("Insufficient balance for token {token}: required {required}, available {available}")]
    InsufficientBalance {
        token: TokenId,
        required: Amount,
        available: Amount,
    },

    #[error("Order already exists: {order_id}")]
    DuplicateOrderId { order_id: OrderId },

    #[error("Order not found: {order_id}")]
    OrderNotFound { order_id: OrderId },

    #[error("Order already processed: {order_id} is {status:?}")]
    OrderAlreadyProcessed {
        order_id: OrderId,
        status: OrderStatus,
    },

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}
