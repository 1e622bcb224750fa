//! Collaborator seams of a pair.
//!
//! A pair depends on three things it does not own: an [`AssetLedger`]
//! holding the actual balances, a [`FeePolicy`] answering the live fee
//! lookup, and optionally a [`SwapCallee`] that runs inside a flash swap.

mod asset_ledger;
mod fee_policy;
mod swap_callee;

pub use asset_ledger::{AssetLedger, Checkpoint};
pub use fee_policy::{FeePolicy, FixedFeePolicy};
pub use swap_callee::{FlashSwap, SwapCallee};
