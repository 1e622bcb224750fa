//! Borrow-then-repay capability for flash swaps.
//!
//! When a swap carries non-empty callback data, the pair transfers the
//! requested outputs first and then calls the initiator's
//! [`SwapCallee`] before it checks the invariant.  The callee may use
//! the received assets freely, as long as enough has been paid back into
//! the pair by the time it returns.

use crate::domain::{AccountId, Amount};
use crate::error::AmmError;

/// What a [`SwapCallee`] is told about the swap it is inside of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashSwap<'a> {
    /// Address of the pair performing the swap; repay into this account.
    pub pair: AccountId,
    /// Caller of the swap.
    pub initiator: AccountId,
    /// Asset A already transferred to the recipient.
    pub amount_a_out: Amount,
    /// Asset B already transferred to the recipient.
    pub amount_b_out: Amount,
    /// Opaque data supplied by the initiator.
    pub data: &'a [u8],
}

/// Receives control in the middle of a flash swap.
///
/// The callee gets the same ledger the pair is using, so its repayments
/// are part of the swap's transaction: if the swap fails afterwards,
/// they are rolled back with everything else.
pub trait SwapCallee<L: ?Sized> {
    /// Called after outputs are transferred and before the invariant is
    /// checked.
    ///
    /// # Errors
    ///
    /// Any error aborts the swap; the pair reports it wrapped in
    /// [`AmmError::CallbackFailed`].
    fn on_swap(&mut self, ledger: &mut L, swap: &FlashSwap<'_>) -> Result<(), AmmError>;
}
