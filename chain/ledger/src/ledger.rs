//! Ledger — Balance storage, supply tracking, and conserving transfers
//!
//! Implements the balance layer the exchange settles against:
//! - Per-account balances, nested by token
//! - Per-token total supply with a configurable cap
//! - Mint and burn with supply bookkeeping
//! - Transfers that validate both legs before mutating either

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use types::errors::LedgerError;
use types::ids::{AccountId, TokenId};
use types::numeric::Amount;

use crate::events::LedgerEvent;

/// Ledger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Per-token supply cap; mints beyond it are rejected
    pub max_supply: Amount,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_supply: Amount::new(1_000_000_000),
        }
    }
}

/// Core ledger managing token balances and supply.
///
/// Balances are stored as `BTreeMap<TokenId, BTreeMap<AccountId, Amount>>`
/// so iteration order is deterministic. Every state-changing operation
/// computes all new values with checked arithmetic before writing any of
/// them; a failed operation leaves the ledger untouched.
#[derive(Debug, Default)]
pub struct Ledger {
    /// Balances: token -> (account -> amount)
    balances: BTreeMap<TokenId, BTreeMap<AccountId, Amount>>,
    /// Total minted supply per token
    supply: BTreeMap<TokenId, Amount>,
    /// Configuration
    config: LedgerConfig,
    /// Emitted events log (append-only)
    events: Vec<LedgerEvent>,
}

impl Ledger {
    /// Create a ledger with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger with a custom configuration.
    pub fn with_config(config: LedgerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    // ───────────────────────── Balance Queries ─────────────────────────

    /// Get the balance for a token and account. Zero when absent.
    pub fn balance(&self, token: &TokenId, account: &AccountId) -> Amount {
        self.balances
            .get(token)
            .and_then(|accounts| accounts.get(account))
            .copied()
            .unwrap_or(Amount::zero())
    }

    /// Get the total minted supply of a token. Zero when absent.
    pub fn total_supply(&self, token: &TokenId) -> Amount {
        self.supply.get(token).copied().unwrap_or(Amount::zero())
    }

    /// Get all account balances for a token.
    pub fn token_balances(&self, token: &TokenId) -> Option<&BTreeMap<AccountId, Amount>> {
        self.balances.get(token)
    }

    // ───────────────────────── Mint & Burn ─────────────────────────

    /// Mint new supply into an account.
    ///
    /// Validates the supply cap before crediting: fails with
    /// `SupplyCapExceeded` when the new total supply would pass the
    /// configured cap.
    pub fn mint(
        &mut self,
        token: &TokenId,
        account: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let cap = self.config.max_supply;
        let new_supply = self
            .total_supply(token)
            .checked_add(amount)
            .ok_or_else(|| LedgerError::SupplyCapExceeded {
                token: token.clone(),
                cap,
            })?;
        if new_supply > cap {
            return Err(LedgerError::SupplyCapExceeded {
                token: token.clone(),
                cap,
            });
        }

        let new_balance = self
            .balance(token, &account)
            .checked_add(amount)
            .ok_or_else(|| LedgerError::BalanceOverflow {
                token: token.clone(),
            })?;

        self.supply.insert(token.clone(), new_supply);
        self.balances
            .entry(token.clone())
            .or_default()
            .insert(account, new_balance);
        self.events.push(LedgerEvent::Minted {
            token: token.clone(),
            account,
            amount,
        });
        Ok(())
    }

    /// Burn supply out of an account.
    ///
    /// Fails with `InsufficientBalance` when the account holds less than
    /// the burn amount.
    pub fn burn(
        &mut self,
        token: &TokenId,
        account: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let available = self.balance(token, &account);
        let new_balance =
            available
                .checked_sub(amount)
                .ok_or_else(|| LedgerError::InsufficientBalance {
                    token: token.clone(),
                    required: amount,
                    available,
                })?;

        let supply = self.total_supply(token);
        // Supply covers every balance, so this cannot underflow once the
        // balance check passed; the error payload reports the account
        // balance, matching the check above.
        let new_supply =
            supply
                .checked_sub(amount)
                .ok_or_else(|| LedgerError::InsufficientBalance {
                    token: token.clone(),
                    required: amount,
                    available,
                })?;

        self.balances
            .entry(token.clone())
            .or_default()
            .insert(account, new_balance);
        self.supply.insert(token.clone(), new_supply);
        self.events.push(LedgerEvent::Burned {
            token: token.clone(),
            account,
            amount,
        });
        Ok(())
    }

    // ───────────────────────── Transfer ─────────────────────────

    /// Move value between two accounts.
    ///
    /// Validates the debit and the credit before touching either balance;
    /// a failed transfer changes nothing. A self-transfer nets to zero but
    /// still requires a sufficient balance.
    pub fn transfer(
        &mut self,
        token: &TokenId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let from_balance = self.balance(token, &from);
        let new_from =
            from_balance
                .checked_sub(amount)
                .ok_or_else(|| LedgerError::InsufficientBalance {
                    token: token.clone(),
                    required: amount,
                    available: from_balance,
                })?;

        if from == to {
            self.events.push(LedgerEvent::Transferred {
                token: token.clone(),
                from,
                to,
                amount,
            });
            return Ok(());
        }

        let to_balance = self.balance(token, &to);
        let new_to =
            to_balance
                .checked_add(amount)
                .ok_or_else(|| LedgerError::BalanceOverflow {
                    token: token.clone(),
                })?;

        let accounts = self.balances.entry(token.clone()).or_default();
        accounts.insert(from, new_from);
        accounts.insert(to, new_to);
        self.events.push(LedgerEvent::Transferred {
            token: token.clone(),
            from,
            to,
            amount,
        });
        Ok(())
    }

    // ───────────────────────── Events ─────────────────────────

    /// Get all emitted events.
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }
}
