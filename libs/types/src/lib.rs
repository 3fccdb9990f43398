//! Types library for the on-ledger exchange
//!
//! This library provides all core type definitions shared across the
//! exchange system, ensuring type safety and deterministic behavior.
//!
//! # Modules
//! - `ids`: Unique identifiers (OrderId, AccountId, TokenId)
//! - `numeric`: Integer amount type with checked arithmetic
//! - `order`: Order lifecycle types
//! - `pair`: Canonical unordered token pair
//! - `errors`: Error taxonomy

// Public modules
pub mod ids;
pub mod numeric;
pub mod order;
pub mod pair;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::errors::*;
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::order::*;
    pub use crate::pair::*;
}
