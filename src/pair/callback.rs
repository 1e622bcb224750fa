//! Flash-swap callback dispatch.

use tracing::trace;

use crate::error::AmmError;
use crate::traits::{FlashSwap, SwapCallee};

/// Hands control to the callee if the swap carries callback data.
///
/// Empty data means a plain swap: the callee, if any, is not called.
///
/// # Errors
///
/// - [`AmmError::CallbackUnavailable`] if data was supplied without a
///   callee.
/// - [`AmmError::CallbackFailed`] wrapping whatever the callee returned.
pub fn dispatch<L: ?Sized>(
    callee: Option<&mut dyn SwapCallee<L>>,
    ledger: &mut L,
    swap: &FlashSwap<'_>,
) -> Result<(), AmmError> {
    if swap.data.is_empty() {
        return Ok(());
    }
    let Some(callee) = callee else {
        return Err(AmmError::CallbackUnavailable);
    };
    trace!(pair = %swap.pair, initiator = %swap.initiator, len = swap.data.len(), "dispatching swap callback");
    callee
        .on_swap(ledger, swap)
        .map_err(|err| AmmError::CallbackFailed(Box::new(err)))
}
