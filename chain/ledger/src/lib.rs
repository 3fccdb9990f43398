//! Token Balance Ledger
//!
//! This crate implements the balance layer the exchange settles against,
//! covering per-account token balances, per-token supply tracking, and
//! conserving transfers.
//!
//! # Modules
//! - `events`: Ledger events (mint, burn, transfer records)
//! - `ledger`: Balance storage, supply bookkeeping, transfer logic

pub mod events;
pub mod ledger;

pub use events::LedgerEvent;
pub use ledger::{Ledger, LedgerConfig};
