//! Order ranking and compatibility
//!
//! Determines which order on each side matches first and when a buy and
//! a sell can trade against each other.

use std::cmp::Ordering;

use types::order::Order;

/// Compare two buy orders, best first
///
/// The buy demanding the most of its out token ranks first. Ties break
/// by order id so the ordering is total and deterministic.
pub fn compare_buys(a: &Order, b: &Order) -> Ordering {
    b.amount_out.cmp(&a.amount_out).then_with(|| a.id.cmp(&b.id))
}

/// Compare two sell orders, best first
///
/// The sell offering the least of its in token ranks first. Ties break
/// by order id.
pub fn compare_sells(a: &Order, b: &Order) -> Ordering {
    a.amount_in.cmp(&b.amount_in).then_with(|| a.id.cmp(&b.id))
}

/// Check if a buy and a sell can trade
///
/// The orders must face each other: the sell pays the token the buy
/// demands, and demands the token the buy pays. Given that, they are
/// compatible when the buy demands no more than the sell offers:
/// `buy.amount_out >= sell.amount_in`.
pub fn can_match(buy: &Order, sell: &Order) -> bool {
    sell.token_id_in == buy.token_id_out
        && sell.token_id_out == buy.token_id_in
        && buy.amount_out >= sell.amount_in
}
