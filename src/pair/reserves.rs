//! Recorded reserves and the single point that overwrites them.

use tracing::trace;

use super::oracle::PriceAccumulator;
use crate::domain::{Amount, Timestamp};
use crate::error::AmmError;

/// The pair's recorded reserves and the time they were last written.
///
/// Reserves only change through [`ReserveLedger::update`], which also
/// advances the price accumulator, so the two can never drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReserveLedger {
    reserve_a: Amount,
    reserve_b: Amount,
    last_sync: Timestamp,
}

impl ReserveLedger {
    /// Empty reserves, last written at `now`.
    #[must_use]
    pub const fn new(now: Timestamp) -> Self {
        Self {
            reserve_a: Amount::ZERO,
            reserve_b: Amount::ZERO,
            last_sync: now,
        }
    }

    /// Recorded reserve of asset A.
    #[must_use]
    pub const fn reserve_a(&self) -> Amount {
        self.reserve_a
    }

    /// Recorded reserve of asset B.
    #[must_use]
    pub const fn reserve_b(&self) -> Amount {
        self.reserve_b
    }

    /// Time of the last update.
    #[must_use]
    pub const fn last_sync(&self) -> Timestamp {
        self.last_sync
    }

    /// `true` once any liquidity has been recorded.
    #[must_use]
    pub const fn is_funded(&self) -> bool {
        !self.reserve_a.is_zero() && !self.reserve_b.is_zero()
    }

    /// Overwrites the reserves with the pair's current balances.
    ///
    /// Before writing, feeds the accumulator with the prior reserves for
    /// the seconds elapsed since the last update.  Elapsed time is taken
    /// on the low 32 bits of the clock with wrapping subtraction, which
    /// only holds while `now` never runs behind the last update.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Overflow`] if either balance exceeds
    ///   [`Amount::MAX_RESERVE`].
    /// - [`AmmError::StaleTimestamp`] if `now` is earlier than
    ///   [`last_sync`](Self::last_sync).
    ///
    /// Nothing is written on error.
    pub fn update(
        &mut self,
        oracle: &mut PriceAccumulator,
        balance_a: Amount,
        balance_b: Amount,
        now: Timestamp,
    ) -> Result<(), AmmError> {
        if !balance_a.fits_reserve() || !balance_b.fits_reserve() {
            return Err(AmmError::Overflow("reserve exceeds 112 bits"));
        }
        if now < self.last_sync {
            return Err(AmmError::StaleTimestamp {
                now,
                last_sync: self.last_sync,
            });
        }
        let elapsed = now.truncated().wrapping_sub(self.last_sync.truncated());
        oracle.accumulate(self.reserve_a, self.reserve_b, elapsed)?;
        trace!(
            reserve_a = %balance_a,
            reserve_b = %balance_b,
            elapsed,
            "reserves updated"
        );
        self.reserve_a = balance_a;
        self.reserve_b = balance_b;
        self.last_sync = now;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::math::Uq112x112;

    #[test]
    fn update_overwrites_and_stamps() {
        let mut ledger = ReserveLedger::new(Timestamp::from_secs(5));
        let mut oracle = PriceAccumulator::default();
        let Ok(()) = ledger.update(
            &mut oracle,
            Amount::new(10),
            Amount::new(30),
            Timestamp::from_secs(9),
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(ledger.reserve_a(), Amount::new(10));
        assert_eq!(ledger.reserve_b(), Amount::new(30));
        assert_eq!(ledger.last_sync(), Timestamp::from_secs(9));
        assert!(ledger.is_funded());
        // prior reserves were empty
        assert_eq!(oracle, PriceAccumulator::default());
    }

    #[test]
    fn second_update_feeds_oracle_with_prior_reserves() {
        let mut ledger = ReserveLedger::new(Timestamp::from_secs(0));
        let mut oracle = PriceAccumulator::default();
        let Ok(()) = ledger.update(&mut oracle, Amount::new(10), Amount::new(30), Timestamp::from_secs(0))
        else {
            panic!("expected Ok");
        };
        let Ok(()) = ledger.update(&mut oracle, Amount::new(1), Amount::new(1), Timestamp::from_secs(4))
        else {
            panic!("expected Ok");
        };
        let Ok(three) = Uq112x112::encode(Amount::new(3)) else {
            panic!("expected Ok");
        };
        assert_eq!(oracle.price_a_cumulative(), three.raw() * crate::math::U256::from(4u32));
    }

    #[test]
    fn elapsed_wraps_across_u32_boundary() {
        let before = Timestamp::from_secs(u64::from(u32::MAX) - 1);
        let mut ledger = ReserveLedger::new(before);
        let mut oracle = PriceAccumulator::default();
        let Ok(()) = ledger.update(&mut oracle, Amount::new(2), Amount::new(2), before) else {
            panic!("expected Ok");
        };
        let after = Timestamp::from_secs(u64::from(u32::MAX) + 2);
        let Ok(()) = ledger.update(&mut oracle, Amount::new(2), Amount::new(2), after) else {
            panic!("expected Ok");
        };
        let Ok(one) = Uq112x112::encode(Amount::new(1)) else {
            panic!("expected Ok");
        };
        assert_eq!(oracle.price_a_cumulative(), one.raw() * crate::math::U256::from(3u32));
    }

    #[test]
    fn clock_running_backwards_rejected_without_write() {
        let mut ledger = ReserveLedger::new(Timestamp::from_secs(0));
        let mut oracle = PriceAccumulator::default();
        let Ok(()) = ledger.update(&mut oracle, Amount::new(10), Amount::new(10), Timestamp::from_secs(100))
        else {
            panic!("expected Ok");
        };
        let Ok(()) = ledger.update(&mut oracle, Amount::new(10), Amount::new(10), Timestamp::from_secs(101))
        else {
            panic!("expected Ok");
        };
        let (before, accumulated) = (ledger, oracle);
        assert_eq!(
            ledger.update(&mut oracle, Amount::new(20), Amount::new(20), Timestamp::from_secs(99)),
            Err(AmmError::StaleTimestamp {
                now: Timestamp::from_secs(99),
                last_sync: Timestamp::from_secs(101),
            })
        );
        assert_eq!(ledger, before);
        assert_eq!(oracle, accumulated);
        let Ok(one) = Uq112x112::encode(Amount::new(1)) else {
            panic!("expected Ok");
        };
        assert_eq!(oracle.price_a_cumulative(), one.raw());
    }

    #[test]
    fn oversized_balance_rejected_without_write() {
        let mut ledger = ReserveLedger::new(Timestamp::from_secs(0));
        let mut oracle = PriceAccumulator::default();
        let too_big = Amount::new(1u128 << 112);
        assert_eq!(
            ledger.update(&mut oracle, too_big, Amount::new(1), Timestamp::from_secs(1)),
            Err(AmmError::Overflow("reserve exceeds 112 bits"))
        );
        assert_eq!(ledger, ReserveLedger::new(Timestamp::from_secs(0)));
        assert!(ledger
            .update(&mut oracle, Amount::MAX_RESERVE, Amount::MAX_RESERVE, Timestamp::from_secs(1))
            .is_ok());
    }
}
