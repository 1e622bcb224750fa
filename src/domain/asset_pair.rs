//! Canonically ordered pair of distinct assets.

use serde::{Deserialize, Serialize};

use super::AssetId;
use crate::error::AmmError;

/// The two assets a pair trades, fixed for the pair's lifetime.
///
/// The canonical ordering guarantees `asset_a < asset_b`, so `(A, B)` and
/// `(B, A)` describe the same pair.
///
/// # Examples
///
/// ```
/// use pairswap::domain::{AssetId, AssetPair};
///
/// let a = AssetId::from_bytes([1u8; 32]);
/// let b = AssetId::from_bytes([2u8; 32]);
///
/// let pair = AssetPair::new(b, a).expect("distinct assets");
/// assert_eq!(pair.asset_a(), a);
/// assert_eq!(pair.asset_b(), b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetPair {
    asset_a: AssetId,
    asset_b: AssetId,
}

impl AssetPair {
    /// Creates a canonically-ordered pair.
    ///
    /// # Errors
    ///
    /// - [`AmmError::IdenticalAssets`] if both identifiers are equal.
    /// - [`AmmError::ZeroAsset`] if either identifier is the zero sentinel.
    pub fn new(first: AssetId, second: AssetId) -> Result<Self, AmmError> {
        if first == second {
            return Err(AmmError::IdenticalAssets);
        }
        let (asset_a, asset_b) = if first < second {
            (first, second)
        } else {
            (second, first)
        };
        // the zero id sorts first, so only asset_a can be it
        if asset_a.is_zero() {
            return Err(AmmError::ZeroAsset);
        }
        Ok(Self { asset_a, asset_b })
    }

    /// Returns the lower-ordered asset.
    #[must_use]
    pub const fn asset_a(&self) -> AssetId {
        self.asset_a
    }

    /// Returns the higher-ordered asset.
    #[must_use]
    pub const fn asset_b(&self) -> AssetId {
        self.asset_b
    }

    /// Returns `true` if `asset` is one side of the pair.
    #[must_use]
    pub fn contains(&self, asset: &AssetId) -> bool {
        self.asset_a == *asset || self.asset_b == *asset
    }

    /// Re-checks the construction invariants.
    ///
    /// Needed after deserialization, which bypasses [`AssetPair::new`].
    ///
    /// # Errors
    ///
    /// Same as [`AssetPair::new`]; additionally
    /// [`AmmError::InvalidConfiguration`] if the order is not canonical.
    pub fn validate(&self) -> Result<(), AmmError> {
        let checked = Self::new(self.asset_a, self.asset_b)?;
        if checked != *self {
            return Err(AmmError::InvalidConfiguration(
                "asset pair is not canonically ordered",
            ));
        }
        Ok(())
    }
}
