//! Wall-clock time supplied by the caller.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Seconds since an arbitrary epoch, as seen by the surrounding host.
///
/// The engine has no clock of its own; every entry point receives the
/// current time through [`CallContext`](crate::pair::CallContext).
///
/// The price accumulator only keeps the low 32 bits
/// ([`Timestamp::truncated`]) and measures elapsed time with wrapping
/// subtraction, so it stays correct across the 2^32-second rollover.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Creates a timestamp from whole seconds.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Returns the timestamp in whole seconds.
    #[must_use]
    pub const fn as_secs(&self) -> u64 {
        self.0
    }

    /// Returns the low 32 bits, as recorded by the reserve ledger.
    #[must_use]
    pub const fn truncated(&self) -> u32 {
        (self.0 & 0xffff_ffff) as u32
    }

    /// Adds `secs`, clamping at the maximum representable time.
    #[must_use]
    pub const fn saturating_add_secs(&self, secs: u64) -> Self {
        Self(self.0.saturating_add(secs))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}
