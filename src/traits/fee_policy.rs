//! Fee lookups a pair performs against its factory.

use crate::domain::{AccountId, FeeTier};
use crate::error::AmmError;

/// Source of the swap fee and of the protocol-fee recipient.
///
/// A pair queries this on every swap rather than caching the tier at
/// creation, so a factory can retune a pair's fee without touching the
/// pair itself.  [`PairRegistry`](crate::factory::PairRegistry) is the
/// production implementor; [`FixedFeePolicy`] serves standalone pairs.
pub trait FeePolicy {
    /// Swap fee currently in force for the pair at `pair`.
    ///
    /// # Errors
    ///
    /// [`AmmError::PairNotFound`] if the policy does not know the pair.
    fn swap_fee(&self, pair: &AccountId) -> Result<FeeTier, AmmError>;

    /// Account credited with protocol-fee shares, if the skim is enabled.
    fn protocol_fee_recipient(&self) -> Option<AccountId>;
}

/// A [`FeePolicy`] with one tier for every pair.
///
/// # Examples
///
/// ```
/// use pairswap::domain::{AccountId, FeeTier};
/// use pairswap::traits::{FeePolicy, FixedFeePolicy};
///
/// let policy = FixedFeePolicy::new(FeeTier::TIER_0_30_PERCENT);
/// let pair = AccountId::from_bytes([7u8; 32]);
/// assert_eq!(policy.swap_fee(&pair), Ok(FeeTier::TIER_0_30_PERCENT));
/// assert_eq!(policy.protocol_fee_recipient(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedFeePolicy {
    fee_tier: FeeTier,
    fee_to: Option<AccountId>,
}

impl FixedFeePolicy {
    /// Policy with `fee_tier` and the protocol fee switched off.
    #[must_use]
    pub const fn new(fee_tier: FeeTier) -> Self {
        Self {
            fee_tier,
            fee_to: None,
        }
    }

    /// Routes protocol-fee shares to `fee_to`.
    #[must_use]
    pub const fn with_fee_to(mut self, fee_to: AccountId) -> Self {
        self.fee_to = Some(fee_to);
        self
    }
}

impl FeePolicy for FixedFeePolicy {
    fn swap_fee(&self, _pair: &AccountId) -> Result<FeeTier, AmmError> {
        Ok(self.fee_tier)
    }

    fn protocol_fee_recipient(&self) -> Option<AccountId> {
        self.fee_to
    }
}
