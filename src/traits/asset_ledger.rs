//! The asset ledger collaborator a pair moves assets through.
//!
//! A pair never stores asset balances itself.  It asks an
//! [`AssetLedger`] what it holds and instructs it to transfer.  Every
//! mutating pair call brackets its transfers with a checkpoint so that a
//! failed call leaves no transfer behind:
//!
//! ```text
//! let cp = ledger.checkpoint();
//! ... transfers ...
//! on success: ledger.release(cp)
//! on failure: ledger.rollback(cp)
//! ```
//!
//! Checkpoints nest.  Releasing an inner checkpoint keeps its transfers
//! subject to any enclosing checkpoint's rollback.

use crate::domain::{AccountId, Amount, AssetId};
use crate::error::AmmError;

/// Opaque marker for a position in an [`AssetLedger`]'s undo history.
///
/// Consumed by exactly one of [`AssetLedger::rollback`] or
/// [`AssetLedger::release`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a checkpoint must be released or rolled back"]
pub struct Checkpoint(usize);

impl Checkpoint {
    /// Creates a checkpoint at the given journal depth.
    #[must_use]
    pub const fn new(depth: usize) -> Self {
        Self(depth)
    }

    /// Returns the journal depth the checkpoint was taken at.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.0
    }
}

/// Balance queries and atomic transfers for every asset a pair holds.
///
/// # Contract
///
/// - `transfer` either moves the full amount or fails without effect.
/// - `balance_of` reflects every transfer performed so far, including
///   those not yet released.
/// - `rollback` restores exactly the balances seen when the checkpoint
///   was taken.
pub trait AssetLedger {
    /// Balance of `account` in `asset`.
    fn balance_of(&self, asset: &AssetId, account: &AccountId) -> Amount;

    /// Moves `amount` of `asset` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientBalance`] if `from` holds less than
    ///   `amount`.
    /// - [`AmmError::Overflow`] if `to`'s balance would overflow.
    fn transfer(
        &mut self,
        asset: &AssetId,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), AmmError>;

    /// Marks the current state so it can be restored.
    fn checkpoint(&mut self) -> Checkpoint;

    /// Undoes every transfer made since `checkpoint` was taken.
    fn rollback(&mut self, checkpoint: Checkpoint);

    /// Accepts every transfer made since `checkpoint` was taken.
    fn release(&mut self, checkpoint: Checkpoint);
}
