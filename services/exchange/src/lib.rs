//! Exchange Service
//!
//! The orderbook controller: validates incoming orders against ledger
//! balances, keeps stored order history authoritative, drives the
//! matching engine, and settles matched pairs as paired token transfers.
//!
//! **Key Invariants:**
//! - Stored status transitions are monotonic (`Pending` never returns)
//! - Settlement conserves value: every debit has an equal credit
//! - A failed operation leaves the store, books, and ledger untouched

pub mod exchange;
pub mod store;

pub use exchange::Exchange;
pub use store::StateMap;
