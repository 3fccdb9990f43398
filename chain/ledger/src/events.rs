//! Ledger events
//!
//! Immutable records appended by state-changing ledger operations.
//! Callers can inspect or drain the log to observe settlement activity.

use serde::{Deserialize, Serialize};
use types::ids::{AccountId, TokenId};
use types::numeric::Amount;

/// A state-changing ledger operation that completed successfully
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// New supply credited to an account
    Minted {
        token: TokenId,
        account: AccountId,
        amount: Amount,
    },
    /// Supply debited from an account and destroyed
    Burned {
        token: TokenId,
        account: AccountId,
        amount: Amount,
    },
    /// Value moved between two accounts
    Transferred {
        token: TokenId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    },
}
