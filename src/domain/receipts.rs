//! Outcomes returned by the pair's mutating operations.

use serde::{Deserialize, Serialize};

use super::{Amount, Shares};

/// Result of a committed deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MintReceipt {
    /// Asset A paid in since the last sync.
    pub amount_a: Amount,
    /// Asset B paid in since the last sync.
    pub amount_b: Amount,
    /// Shares credited to the depositor's recipient.
    pub shares: Shares,
    /// Shares permanently locked in the burn sink (bootstrap only).
    pub locked: Shares,
    /// Shares minted to the protocol-fee recipient before the deposit.
    pub protocol_fee: Shares,
}

/// Result of a committed withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BurnReceipt {
    /// Shares destroyed.
    pub shares: Shares,
    /// Asset A sent to the recipient.
    pub amount_a: Amount,
    /// Asset B sent to the recipient.
    pub amount_b: Amount,
    /// Shares minted to the protocol-fee recipient before the withdrawal.
    pub protocol_fee: Shares,
}

/// Result of a committed swap.
///
/// At least one `*_in` and one `*_out` field is non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapReceipt {
    /// Asset A paid into the pair.
    pub amount_a_in: Amount,
    /// Asset B paid into the pair.
    pub amount_b_in: Amount,
    /// Asset A sent out.
    pub amount_a_out: Amount,
    /// Asset B sent out.
    pub amount_b_out: Amount,
}
