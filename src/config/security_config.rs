//! Security limits applied by a pair's gate.

use serde::{Deserialize, Serialize};

use crate::domain::Amount;
use crate::error::AmmError;

/// Initial values for a pair's security gate.
///
/// Both values can be changed later by the controlling factory through
/// the pair's administrative setters.
///
/// # Defaults
///
/// - `max_swap_amount` = [`Amount::MAX_RESERVE`] (no practical limit)
/// - `cooldown_seconds` = 0 (consecutive swaps allowed)
///
/// # Examples
///
/// ```
/// use pairswap::config::SecurityConfig;
/// use pairswap::domain::Amount;
///
/// let cfg = SecurityConfig::new(Amount::new(1_000_000), 60).expect("valid");
/// assert_eq!(cfg.cooldown_seconds(), 60);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    max_swap_amount: Amount,
    cooldown_seconds: u64,
}

impl SecurityConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `max_swap_amount` is
    /// zero (no swap could ever succeed) or exceeds a reserve.
    pub fn new(max_swap_amount: Amount, cooldown_seconds: u64) -> Result<Self, AmmError> {
        let config = Self {
            max_swap_amount,
            cooldown_seconds,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// See [`SecurityConfig::new`].
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.max_swap_amount.is_zero() {
            return Err(AmmError::InvalidConfiguration(
                "max swap amount must be non-zero",
            ));
        }
        if !self.max_swap_amount.fits_reserve() {
            return Err(AmmError::InvalidConfiguration(
                "max swap amount exceeds reserve range",
            ));
        }
        Ok(())
    }

    /// Returns the largest output a single swap may request per asset.
    #[must_use]
    pub const fn max_swap_amount(&self) -> Amount {
        self.max_swap_amount
    }

    /// Returns the minimum interval between two swaps of one caller.
    #[must_use]
    pub const fn cooldown_seconds(&self) -> u64 {
        self.cooldown_seconds
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_swap_amount: Amount::MAX_RESERVE,
            cooldown_seconds: 0,
        }
    }
}
