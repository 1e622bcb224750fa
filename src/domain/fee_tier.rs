//! Swap fee tiers built on [`BasisPoints`].

use core::fmt;

use serde::{Deserialize, Serialize};

use super::BasisPoints;
use crate::error::AmmError;

/// A swap fee tier.
///
/// Pairs only accept the four standard tiers; [`FeeTier::standard`]
/// enforces that at every construction site that reaches a pair.
///
/// # Examples
///
/// ```
/// use pairswap::domain::FeeTier;
///
/// let tier = FeeTier::standard(30).expect("standard tier");
/// assert_eq!(tier, FeeTier::TIER_0_30_PERCENT);
/// assert!(FeeTier::standard(25).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeeTier(BasisPoints);

impl FeeTier {
    /// 0.01% fee (1 bp).
    pub const TIER_0_01_PERCENT: Self = Self(BasisPoints::new(1));

    /// 0.05% fee (5 bp).
    pub const TIER_0_05_PERCENT: Self = Self(BasisPoints::new(5));

    /// 0.30% fee (30 bp).
    pub const TIER_0_30_PERCENT: Self = Self(BasisPoints::new(30));

    /// 1.00% fee (100 bp).
    pub const TIER_1_00_PERCENT: Self = Self(BasisPoints::new(100));

    /// All supported tiers, lowest first.
    pub const STANDARD: [Self; 4] = [
        Self::TIER_0_01_PERCENT,
        Self::TIER_0_05_PERCENT,
        Self::TIER_0_30_PERCENT,
        Self::TIER_1_00_PERCENT,
    ];

    /// Creates a tier from a raw basis-point value.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] unless `bps` is 1, 5, 30 or 100.
    pub fn standard(bps: u32) -> Result<Self, AmmError> {
        let tier = Self(BasisPoints::new(bps));
        if !tier.is_standard() {
            return Err(AmmError::InvalidFee("fee tier must be 1, 5, 30 or 100 bps"));
        }
        Ok(tier)
    }

    /// Returns the underlying [`BasisPoints`].
    #[must_use]
    pub const fn basis_points(&self) -> BasisPoints {
        self.0
    }

    /// Returns `true` if this tier is one of [`FeeTier::STANDARD`].
    #[must_use]
    pub const fn is_standard(&self) -> bool {
        matches!(self.0.get(), 1 | 5 | 30 | 100)
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeeTier({})", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn standard_tiers_accepted() {
        for bps in [1, 5, 30, 100] {
            let Ok(tier) = FeeTier::standard(bps) else {
                panic!("{bps} should be standard");
            };
            assert_eq!(tier.basis_points().get(), bps);
        }
    }

    #[test]
    fn non_standard_rejected() {
        for bps in [0, 2, 25, 10_000] {
            let Err(AmmError::InvalidFee(_)) = FeeTier::standard(bps) else {
                panic!("{bps} should be rejected");
            };
        }
    }

    #[test]
    fn preset_list_is_sorted() {
        assert!(FeeTier::STANDARD.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn serde_is_transparent() {
        let Ok(json) = serde_json::to_string(&FeeTier::TIER_0_30_PERCENT) else {
            panic!("serialize");
        };
        assert_eq!(json, "30");
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", FeeTier::TIER_0_05_PERCENT), "FeeTier(5bp)");
    }
}
