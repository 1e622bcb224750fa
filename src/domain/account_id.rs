//! Account identity for callers, recipients and pairs.

use core::fmt;

use serde::{Deserialize, Serialize};

/// An account on the asset ledger.
///
/// Callers, recipients, the controlling factory and every pair itself
/// are all accounts.  [`AccountId::BURN_SINK`] is the all-zero account
/// that permanently holds the locked minimum liquidity; nothing can ever
/// spend from it because no caller can act as it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId([u8; 32]);

impl AccountId {
    /// Permanent sink for locked shares.
    pub const BURN_SINK: Self = Self([0u8; 32]);

    /// Creates an `AccountId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns `true` for [`AccountId::BURN_SINK`].
    #[must_use]
    pub fn is_burn_sink(&self) -> bool {
        *self == Self::BURN_SINK
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0[..8] {
            write!(f, "{b:02x}")?;
        }
        write!(f, "..")
    }
}
