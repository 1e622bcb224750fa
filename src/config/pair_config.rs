//! Configuration for a constant-product pair.

use serde::{Deserialize, Serialize};

use super::SecurityConfig;
use crate::domain::{AssetPair, FeeTier};
use crate::error::AmmError;

/// Immutable parameters a pair is created with.
///
/// The asset pair never changes after creation.  The fee tier is the
/// initial tier registered with the factory, which answers the live
/// per-swap fee lookups.  `security` seeds the pair's gate.
///
/// # Validation
///
/// - The asset pair must be distinct, non-zero and canonically ordered.
/// - The fee tier must be one of the standard tiers (1, 5, 30, 100 bps).
/// - The security limits must be valid.
///
/// # Examples
///
/// ```
/// use pairswap::config::{PairConfig, SecurityConfig};
/// use pairswap::domain::{AssetId, AssetPair, FeeTier};
///
/// let assets = AssetPair::new(
///     AssetId::from_bytes([1u8; 32]),
///     AssetId::from_bytes([2u8; 32]),
/// )
/// .expect("distinct");
/// let cfg = PairConfig::new(assets, FeeTier::TIER_0_30_PERCENT, SecurityConfig::default())
///     .expect("valid");
/// assert_eq!(cfg.fee_tier(), FeeTier::TIER_0_30_PERCENT);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairConfig {
    assets: AssetPair,
    fee_tier: FeeTier,
    #[serde(default)]
    security: SecurityConfig,
}

impl PairConfig {
    /// Creates a validated `PairConfig`.
    ///
    /// # Errors
    ///
    /// See [`PairConfig::validate`].
    pub fn new(
        assets: AssetPair,
        fee_tier: FeeTier,
        security: SecurityConfig,
    ) -> Result<Self, AmmError> {
        let config = Self {
            assets,
            fee_tier,
            security,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// - Anything [`AssetPair::validate`] reports.
    /// - [`AmmError::InvalidFee`] for a non-standard fee tier.
    /// - Anything [`SecurityConfig::validate`] reports.
    pub fn validate(&self) -> Result<(), AmmError> {
        self.assets.validate()?;
        if !self.fee_tier.is_standard() {
            return Err(AmmError::InvalidFee("fee tier must be 1, 5, 30 or 100 bps"));
        }
        self.security.validate()
    }

    /// Returns the asset pair.
    #[must_use]
    pub const fn assets(&self) -> &AssetPair {
        &self.assets
    }

    /// Returns the initial fee tier.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    /// Returns the initial security limits.
    #[must_use]
    pub const fn security(&self) -> &SecurityConfig {
        &self.security
    }
}
