//! Cumulative price sums and the consumer-side TWAP helpers.
//!
//! The pair only ever adds to two running sums:
//!
//! ```text
//! price_a_cumulative += (reserve_b / reserve_a) × elapsed
//! price_b_cumulative += (reserve_a / reserve_b) × elapsed
//! ```
//!
//! where the ratios are [`Uq112x112`] values of the reserves *before* the
//! update and `elapsed` is the number of seconds since the previous
//! update.  Both sums are 256-bit and wrap on overflow; consumers
//! difference two reads with wrapping subtraction, which stays correct
//! across one wrap.
//!
//! Nothing is accumulated when no time has passed or either reserve is
//! zero.

use super::Pair;
use crate::domain::{Amount, Timestamp};
use crate::error::AmmError;
use crate::math::{Uq112x112, U256};

/// The two running price sums of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceAccumulator {
    price_a_cumulative: U256,
    price_b_cumulative: U256,
}

impl PriceAccumulator {
    /// Sum of `reserve_b / reserve_a` over time (price of A in B).
    #[must_use]
    pub const fn price_a_cumulative(&self) -> U256 {
        self.price_a_cumulative
    }

    /// Sum of `reserve_a / reserve_b` over time (price of B in A).
    #[must_use]
    pub const fn price_b_cumulative(&self) -> U256 {
        self.price_b_cumulative
    }

    /// Adds `elapsed` seconds at the prior reserves' prices.
    ///
    /// # Errors
    ///
    /// [`AmmError::Overflow`] if a prior reserve exceeds the reserve range,
    /// which a committed reserve never does.
    pub fn accumulate(
        &mut self,
        prior_a: Amount,
        prior_b: Amount,
        elapsed: u32,
    ) -> Result<(), AmmError> {
        *self = self.advanced(prior_a, prior_b, elapsed)?;
        Ok(())
    }

    /// The sums as they would be after [`accumulate`](Self::accumulate),
    /// without writing them.
    ///
    /// # Errors
    ///
    /// See [`accumulate`](Self::accumulate).
    pub fn advanced(
        &self,
        prior_a: Amount,
        prior_b: Amount,
        elapsed: u32,
    ) -> Result<Self, AmmError> {
        if elapsed == 0 || prior_a.is_zero() || prior_b.is_zero() {
            return Ok(*self);
        }
        let secs = U256::from(elapsed);
        let price_a = Uq112x112::ratio(prior_b, prior_a)?.raw();
        let price_b = Uq112x112::ratio(prior_a, prior_b)?.raw();
        // ratio < 2^224 and elapsed < 2^32, so the products never wrap
        let (step_a, _) = price_a.overflowing_mul(secs);
        let (step_b, _) = price_b.overflowing_mul(secs);
        Ok(Self {
            price_a_cumulative: self.price_a_cumulative.overflowing_add(step_a).0,
            price_b_cumulative: self.price_b_cumulative.overflowing_add(step_b).0,
        })
    }
}

/// A read of a pair's cumulative prices at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceObservation {
    /// When the read was taken.
    pub timestamp: Timestamp,
    /// Cumulative price of A in B.
    pub price_a_cumulative: U256,
    /// Cumulative price of B in A.
    pub price_b_cumulative: U256,
}

/// Time-weighted average prices over an observation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwapPrices {
    /// Average price of A in B.
    pub price_a: Uq112x112,
    /// Average price of B in A.
    pub price_b: Uq112x112,
    /// Window length in seconds.
    pub window: u32,
}

/// The cumulative prices the pair would report at `now`.
///
/// Extends the stored sums counterfactually from the last sync to `now`
/// using the current reserves, so an observer need not trigger a
/// `sync` (and pay for a write) to get an up-to-date read.
///
/// # Errors
///
/// - [`AmmError::StaleTimestamp`] if `now` is earlier than the pair's
///   last reserve update.
/// - See [`PriceAccumulator::accumulate`].
///
/// # Examples
///
/// ```
/// use pairswap::pair::{current_cumulative_prices, twap};
/// # use pairswap::assets::InMemoryAssetLedger;
/// # use pairswap::config::{PairConfig, SecurityConfig};
/// # use pairswap::domain::{AccountId, Amount, AssetId, AssetPair, FeeTier, Timestamp};
/// # use pairswap::pair::{CallContext, Pair};
/// # use pairswap::traits::{AssetLedger, FixedFeePolicy};
/// # let (a, b) = (AssetId::from_bytes([1; 32]), AssetId::from_bytes([2; 32]));
/// # let factory = AccountId::from_bytes([0xfa; 32]);
/// # let lp = AccountId::from_bytes([0x11; 32]);
/// # let addr = AccountId::from_bytes([0xcc; 32]);
/// # let cfg = PairConfig::new(AssetPair::new(a, b).expect("ok"), FeeTier::TIER_0_30_PERCENT,
/// #     SecurityConfig::default()).expect("ok");
/// # let ctx0 = CallContext::new(factory, Timestamp::from_secs(0));
/// # let mut pair = Pair::initialize(&ctx0, addr, cfg).expect("ok");
/// # let mut ledger = InMemoryAssetLedger::new();
/// # ledger.credit(&a, &addr, Amount::new(1_000)).expect("ok");
/// # ledger.credit(&b, &addr, Amount::new(4_000)).expect("ok");
/// # let fees = FixedFeePolicy::new(FeeTier::TIER_0_30_PERCENT);
/// # pair.mint(&ctx0, &mut ledger, &fees, lp).expect("ok");
/// let t10 = current_cumulative_prices(&pair, Timestamp::from_secs(10)).expect("ok");
/// let t20 = current_cumulative_prices(&pair, Timestamp::from_secs(20)).expect("ok");
/// let avg = twap(&t10, &t20).expect("ok");
/// assert_eq!(avg.price_a.integer_part(), 4);
/// ```
pub fn current_cumulative_prices(pair: &Pair, now: Timestamp) -> Result<PriceObservation, AmmError> {
    let reserves = pair.reserves();
    if now < reserves.last_sync() {
        return Err(AmmError::StaleTimestamp {
            now,
            last_sync: reserves.last_sync(),
        });
    }
    let elapsed = now.truncated().wrapping_sub(reserves.last_sync().truncated());
    let advanced = pair
        .price_accumulator()
        .advanced(reserves.reserve_a(), reserves.reserve_b(), elapsed)?;
    Ok(PriceObservation {
        timestamp: now,
        price_a_cumulative: advanced.price_a_cumulative(),
        price_b_cumulative: advanced.price_b_cumulative(),
    })
}

/// Average prices between two observations of the same pair.
///
/// # Errors
///
/// [`AmmError::InvalidConfiguration`] if `later` is not strictly after
/// `earlier`.
pub fn twap(earlier: &PriceObservation, later: &PriceObservation) -> Result<TwapPrices, AmmError> {
    if later.timestamp <= earlier.timestamp {
        return Err(AmmError::InvalidConfiguration(
            "twap window must be positive",
        ));
    }
    let window = later
        .timestamp
        .truncated()
        .wrapping_sub(earlier.timestamp.truncated());
    if window == 0 {
        return Err(AmmError::InvalidConfiguration(
            "twap window must be positive",
        ));
    }
    let secs = U256::from(window);
    let delta_a = later
        .price_a_cumulative
        .overflowing_sub(earlier.price_a_cumulative)
        .0;
    let delta_b = later
        .price_b_cumulative
        .overflowing_sub(earlier.price_b_cumulative)
        .0;
    Ok(TwapPrices {
        price_a: Uq112x112::from_raw(delta_a / secs),
        price_b: Uq112x112::from_raw(delta_b / secs),
        window,
    })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn observation(secs: u64, a: U256, b: U256) -> PriceObservation {
        PriceObservation {
            timestamp: Timestamp::from_secs(secs),
            price_a_cumulative: a,
            price_b_cumulative: b,
        }
    }

    #[test]
    fn skips_zero_elapsed() {
        let mut acc = PriceAccumulator::default();
        let Ok(()) = acc.accumulate(Amount::new(10), Amount::new(20), 0) else {
            panic!("expected Ok");
        };
        assert_eq!(acc, PriceAccumulator::default());
    }

    #[test]
    fn skips_zero_reserves() {
        let mut acc = PriceAccumulator::default();
        let Ok(()) = acc.accumulate(Amount::ZERO, Amount::new(20), 60) else {
            panic!("expected Ok");
        };
        let Ok(()) = acc.accumulate(Amount::new(20), Amount::ZERO, 60) else {
            panic!("expected Ok");
        };
        assert_eq!(acc, PriceAccumulator::default());
    }

    #[test]
    fn accumulates_ratio_times_elapsed() {
        let mut acc = PriceAccumulator::default();
        let Ok(()) = acc.accumulate(Amount::new(1_000), Amount::new(2_000), 10) else {
            panic!("expected Ok");
        };
        let Ok(two) = Uq112x112::encode(Amount::new(2)) else {
            panic!("expected Ok");
        };
        assert_eq!(acc.price_a_cumulative(), two.raw() * U256::from(10u32));
        let Ok(half) = Uq112x112::ratio(Amount::new(1), Amount::new(2)) else {
            panic!("expected Ok");
        };
        assert_eq!(acc.price_b_cumulative(), half.raw() * U256::from(10u32));
    }

    #[test]
    fn wraps_instead_of_failing() {
        let mut acc = PriceAccumulator {
            price_a_cumulative: U256::MAX,
            price_b_cumulative: U256::MAX,
        };
        let Ok(()) = acc.accumulate(Amount::new(1), Amount::new(1), 1) else {
            panic!("expected Ok");
        };
        let Ok(one) = Uq112x112::encode(Amount::new(1)) else {
            panic!("expected Ok");
        };
        assert_eq!(acc.price_a_cumulative(), one.raw() - U256::one());
    }

    #[test]
    fn twap_differences_two_reads() {
        let Ok(three) = Uq112x112::encode(Amount::new(3)) else {
            panic!("expected Ok");
        };
        let start = observation(100, U256::from(7u32), U256::zero());
        let end = observation(
            160,
            U256::from(7u32) + three.raw() * U256::from(60u32),
            U256::zero(),
        );
        let Ok(avg) = twap(&start, &end) else {
            panic!("expected Ok");
        };
        assert_eq!(avg.price_a, three);
        assert_eq!(avg.price_b, Uq112x112::ZERO);
        assert_eq!(avg.window, 60);
    }

    #[test]
    fn twap_survives_accumulator_wrap() {
        let Ok(one) = Uq112x112::encode(Amount::new(1)) else {
            panic!("expected Ok");
        };
        let start = observation(0, U256::MAX, U256::zero());
        let end = observation(5, one.raw() * U256::from(5u32) - U256::one(), U256::zero());
        let Ok(avg) = twap(&start, &end) else {
            panic!("expected Ok");
        };
        assert_eq!(avg.price_a, one);
    }

    #[test]
    fn twap_rejects_empty_window() {
        let obs = observation(10, U256::zero(), U256::zero());
        assert!(twap(&obs, &obs).is_err());
    }
}
