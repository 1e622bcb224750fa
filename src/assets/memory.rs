//! Journaled in-memory asset ledger.

use std::collections::BTreeMap;

use crate::domain::{AccountId, Amount, AssetId};
use crate::error::AmmError;
use crate::traits::{AssetLedger, Checkpoint};

#[derive(Debug, Clone)]
struct JournalEntry {
    asset: AssetId,
    account: AccountId,
    previous: Amount,
}

/// An [`AssetLedger`] backed by a map, for tests, demos and simulations.
///
/// Each balance write made while a checkpoint is open records the
/// previous value in a journal; rolling back replays the journal in
/// reverse.  With no checkpoint open nothing is journaled.
///
/// # Examples
///
/// ```
/// use pairswap::assets::InMemoryAssetLedger;
/// use pairswap::domain::{AccountId, Amount, AssetId};
/// use pairswap::traits::AssetLedger;
///
/// let usdc = AssetId::from_bytes([1u8; 32]);
/// let alice = AccountId::from_bytes([0xa1; 32]);
/// let bob = AccountId::from_bytes([0xb0; 32]);
///
/// let mut ledger = InMemoryAssetLedger::new();
/// ledger.credit(&usdc, &alice, Amount::new(100)).expect("fits");
///
/// let cp = ledger.checkpoint();
/// ledger.transfer(&usdc, &alice, &bob, Amount::new(40)).expect("funded");
/// ledger.rollback(cp);
///
/// assert_eq!(ledger.balance_of(&usdc, &alice), Amount::new(100));
/// assert_eq!(ledger.balance_of(&usdc, &bob), Amount::ZERO);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssetLedger {
    balances: BTreeMap<(AssetId, AccountId), Amount>,
    journal: Vec<JournalEntry>,
    open: usize,
}

impl InMemoryAssetLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues `amount` of `asset` to `account` out of thin air.
    ///
    /// Journaled like a transfer, so it is undone by a rollback.
    ///
    /// # Errors
    ///
    /// [`AmmError::Overflow`] if the balance would exceed `u128::MAX`.
    pub fn credit(
        &mut self,
        asset: &AssetId,
        account: &AccountId,
        amount: Amount,
    ) -> Result<(), AmmError> {
        let balance = self
            .balance_of(asset, account)
            .checked_add(&amount)
            .ok_or(AmmError::Overflow("asset balance"))?;
        self.write(*asset, *account, balance);
        Ok(())
    }

    /// Number of checkpoints currently open.
    #[must_use]
    pub const fn open_checkpoints(&self) -> usize {
        self.open
    }

    fn write(&mut self, asset: AssetId, account: AccountId, balance: Amount) {
        let previous = self
            .balances
            .insert((asset, account), balance)
            .unwrap_or(Amount::ZERO);
        if self.open > 0 {
            self.journal.push(JournalEntry {
                asset,
                account,
                previous,
            });
        }
    }

    fn close(&mut self) {
        self.open = self.open.saturating_sub(1);
        if self.open == 0 {
            self.journal.clear();
        }
    }
}

impl AssetLedger for InMemoryAssetLedger {
    fn balance_of(&self, asset: &AssetId, account: &AccountId) -> Amount {
        self.balances
            .get(&(*asset, *account))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn transfer(
        &mut self,
        asset: &AssetId,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), AmmError> {
        let from_balance = self
            .balance_of(asset, from)
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientBalance("asset"))?;
        if amount.is_zero() || from == to {
            return Ok(());
        }
        let to_balance = self
            .balance_of(asset, to)
            .checked_add(&amount)
            .ok_or(AmmError::Overflow("asset balance"))?;
        self.write(*asset, *from, from_balance);
        self.write(*asset, *to, to_balance);
        Ok(())
    }

    fn checkpoint(&mut self) -> Checkpoint {
        self.open += 1;
        Checkpoint::new(self.journal.len())
    }

    fn rollback(&mut self, checkpoint: Checkpoint) {
        while self.journal.len() > checkpoint.depth() {
            let Some(entry) = self.journal.pop() else {
                break;
            };
            if entry.previous.is_zero() {
                self.balances.remove(&(entry.asset, entry.account));
            } else {
                self.balances
                    .insert((entry.asset, entry.account), entry.previous);
            }
        }
        self.close();
    }

    fn release(&mut self, _checkpoint: Checkpoint) {
        self.close();
    }
}
