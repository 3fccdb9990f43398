//! Integer amount type for token quantities
//!
//! Balances and order sizes are denominated in indivisible base units of
//! their token, so amounts are plain unsigned integers. All arithmetic is
//! checked; overflow and underflow are reported, never wrapped.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Token amount in base units
///
/// Wraps `u64` and exposes only checked arithmetic. Derives `Ord`, so
/// callers compare amounts and take minima directly.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    /// Create an amount from base units
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Zero amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the raw base-unit value
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition, `None` on overflow
    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    /// Checked subtraction, `None` on underflow
    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(value)
    }
}
