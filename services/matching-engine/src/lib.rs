//! Matching Engine Service
//!
//! Pairs resting buy and sell orders of a token pair, one match per call.
//!
//! **Key Invariants:**
//! - Deterministic matching (same books → same match)
//! - Each side book holds at most one order per id
//! - Matched orders are removed from their books
//! - Traded amount never exceeds either side's quote

pub mod book;
pub mod engine;
pub mod ranking;

pub use engine::{MatchedPair, OrderMatchingEngine};
