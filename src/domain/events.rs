//! Events emitted for external indexers.
//!
//! The engine never reads its own events back.  A pair collects the
//! events of each committed call and the host drains them with
//! [`Pair::drain_events`](crate::pair::Pair::drain_events); a call that is
//! rolled back leaves no events behind.

use serde::{Deserialize, Serialize};

use super::{AccountId, Amount, Timestamp};

/// Something observable happened to a pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PairEvent {
    /// Liquidity was deposited.
    Mint {
        /// Caller of `mint`.
        sender: AccountId,
        /// Asset A deposited.
        amount_a: Amount,
        /// Asset B deposited.
        amount_b: Amount,
    },
    /// Liquidity was withdrawn.
    Burn {
        /// Caller of `burn`.
        sender: AccountId,
        /// Asset A withdrawn.
        amount_a: Amount,
        /// Asset B withdrawn.
        amount_b: Amount,
        /// Recipient of the withdrawn assets.
        to: AccountId,
    },
    /// A swap was committed.
    Swap {
        /// Caller of `swap`.
        sender: AccountId,
        /// Asset A paid in.
        amount_a_in: Amount,
        /// Asset B paid in.
        amount_b_in: Amount,
        /// Asset A paid out.
        amount_a_out: Amount,
        /// Asset B paid out.
        amount_b_out: Amount,
        /// Recipient of the outputs.
        to: AccountId,
    },
    /// Reserves were overwritten from balances.
    Sync {
        /// New reserve of asset A.
        reserve_a: Amount,
        /// New reserve of asset B.
        reserve_b: Amount,
    },
    /// An account's authorization changed.
    AuthorizationChanged {
        /// Affected account.
        account: AccountId,
        /// New authorization flag.
        authorized: bool,
    },
    /// The per-swap output limit changed.
    MaxSwapAmountChanged {
        /// New limit.
        amount: Amount,
    },
    /// The per-caller swap cooldown changed.
    SwapCooldownChanged {
        /// New cooldown in seconds.
        seconds: u64,
    },
    /// The pair was paused.
    Paused {
        /// Time of the pause.
        at: Timestamp,
    },
    /// The pair was unpaused.
    Unpaused {
        /// Time of the unpause.
        at: Timestamp,
    },
}
