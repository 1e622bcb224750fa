//! The pair's own fungible share table.

use std::collections::BTreeMap;

use crate::domain::{AccountId, Shares};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;

/// Allowance value that is never decremented.
pub const UNLIMITED_ALLOWANCE: Shares = Shares::new(u128::MAX);

/// Ownership shares of one pair.
///
/// A plain balance table with ERC-20-like delegation.  Only the pair
/// mints and burns; holders move shares with
/// [`transfer`](Self::transfer) and [`transfer_from`](Self::transfer_from).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareLedger {
    total_supply: Shares,
    balances: BTreeMap<AccountId, Shares>,
    allowances: BTreeMap<(AccountId, AccountId), Shares>,
}

impl ShareLedger {
    /// Outstanding shares, locked ones included.
    #[must_use]
    pub const fn total_supply(&self) -> Shares {
        self.total_supply
    }

    /// Shares held by `account`.
    #[must_use]
    pub fn balance_of(&self, account: &AccountId) -> Shares {
        self.balances.get(account).copied().unwrap_or(Shares::ZERO)
    }

    /// Shares `spender` may still move on behalf of `owner`.
    #[must_use]
    pub fn allowance(&self, owner: &AccountId, spender: &AccountId) -> Shares {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(Shares::ZERO)
    }

    pub(crate) fn mint(&mut self, to: &AccountId, amount: Shares) -> Result<(), AmmError> {
        let total = self.total_supply.safe_add(&amount, "share supply")?;
        let balance = self.balance_of(to).safe_add(&amount, "share balance")?;
        self.total_supply = total;
        self.set_balance(*to, balance);
        Ok(())
    }

    pub(crate) fn burn(&mut self, from: &AccountId, amount: Shares) -> Result<(), AmmError> {
        let balance = self
            .balance_of(from)
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientBalance("shares"))?;
        let total = self.total_supply.safe_sub(&amount, "share supply")?;
        self.total_supply = total;
        self.set_balance(*from, balance);
        Ok(())
    }

    /// Moves `amount` shares from `from` to `to`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientBalance`] if `from` holds fewer shares.
    pub fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: Shares,
    ) -> Result<(), AmmError> {
        let from_balance = self
            .balance_of(from)
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientBalance("shares"))?;
        if from == to {
            return Ok(());
        }
        // cannot overflow: both balances are bounded by the total supply
        let to_balance = self.balance_of(to).safe_add(&amount, "share balance")?;
        self.set_balance(*from, from_balance);
        self.set_balance(*to, to_balance);
        Ok(())
    }

    /// Lets `spender` move up to `amount` of `owner`'s shares.
    ///
    /// Overwrites any previous allowance.  [`UNLIMITED_ALLOWANCE`] is
    /// never consumed.
    pub fn approve(&mut self, owner: &AccountId, spender: &AccountId, amount: Shares) {
        if amount.is_zero() {
            self.allowances.remove(&(*owner, *spender));
        } else {
            self.allowances.insert((*owner, *spender), amount);
        }
    }

    /// Moves `amount` of `from`'s shares to `to` on behalf of `spender`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientAllowance`] if the allowance is too small.
    /// - [`AmmError::InsufficientBalance`] if `from` holds fewer shares.
    pub fn transfer_from(
        &mut self,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: Shares,
    ) -> Result<(), AmmError> {
        let allowed = self.allowance(from, spender);
        let remaining = if allowed == UNLIMITED_ALLOWANCE {
            allowed
        } else {
            allowed
                .checked_sub(&amount)
                .ok_or(AmmError::InsufficientAllowance)?
        };
        self.transfer(from, to, amount)?;
        self.approve(from, spender, remaining);
        Ok(())
    }

    fn set_balance(&mut self, account: AccountId, balance: Shares) {
        if balance.is_zero() {
            self.balances.remove(&account);
        } else {
            self.balances.insert(account, balance);
        }
    }
}
