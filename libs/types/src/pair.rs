//! Canonical unordered token pair
//!
//! A buy order paying A for B and a sell order paying B for A trade the
//! same market. `OrderPair` erases orientation: the constructor stores the
//! lexicographically smaller token first, so both orders key the same
//! book bucket.

use crate::ids::TokenId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unordered pair of tokens in canonical form
///
/// Fields are private so the canonical ordering (`token_a <= token_b`)
/// cannot be violated after construction. Implements `Ord` and can key
/// ordered maps directly.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderPair {
    token_a: TokenId,
    token_b: TokenId,
}

impl OrderPair {
    /// Create a canonical pair from two tokens in either order
    pub fn new(token_x: TokenId, token_y: TokenId) -> Self {
        if token_x <= token_y {
            Self {
                token_a: token_x,
                token_b: token_y,
            }
        } else {
            Self {
                token_a: token_y,
                token_b: token_x,
            }
        }
    }

    /// The lexicographically smaller token
    pub fn token_a(&self) -> &TokenId {
        &self.token_a
    }

    /// The lexicographically larger token
    pub fn token_b(&self) -> &TokenId {
        &self.token_b
    }
}

impl fmt::Display for OrderPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.token_a, self.token_b)
    }
}
