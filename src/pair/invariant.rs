//! Swap validation against the fee-adjusted constant product.
//!
//! The pair does not price swaps.  The caller requests outputs and pays
//! inputs however it likes; afterwards the pair derives what was paid in
//! from its balances and accepts the swap only if
//!
//! ```text
//! (balance_a × 10 000 − in_a × fee) × (balance_b × 10 000 − in_b × fee)
//!     ≥ reserve_a × reserve_b × 10 000²
//! ```
//!
//! Each factor is below `2^126`, so both sides fit in [`U256`].

use crate::domain::{Amount, BasisPoints, FeeTier, BPS_DENOMINATOR};
use crate::error::AmmError;
use crate::math::{widen, U256};

/// Rejects requests that ask for nothing or would drain a reserve.
///
/// # Errors
///
/// - [`AmmError::InsufficientOutputAmount`] if both outputs are zero.
/// - [`AmmError::InsufficientLiquidity`] if an output reaches its
///   reserve.
pub fn check_request(
    amount_a_out: Amount,
    amount_b_out: Amount,
    reserve_a: Amount,
    reserve_b: Amount,
) -> Result<(), AmmError> {
    if amount_a_out.is_zero() && amount_b_out.is_zero() {
        return Err(AmmError::InsufficientOutputAmount);
    }
    if amount_a_out >= reserve_a || amount_b_out >= reserve_b {
        return Err(AmmError::InsufficientLiquidity);
    }
    Ok(())
}

/// Input paid into one side: `max(0, balance − (reserve − out))`.
#[must_use]
pub fn amount_in(balance: Amount, reserve: Amount, out: Amount) -> Amount {
    let kept = reserve.saturating_sub(&out);
    balance.saturating_sub(&kept)
}

/// Checks the fee-adjusted invariant for post-swap balances.
///
/// # Errors
///
/// - [`AmmError::Overflow`] if a balance exceeds [`Amount::MAX_RESERVE`].
/// - [`AmmError::InvalidFee`] if the fee is 100% or more.
/// - [`AmmError::InvariantViolation`] if the product would shrink.
pub fn check_invariant(
    balance_a: Amount,
    balance_b: Amount,
    amount_a_in: Amount,
    amount_b_in: Amount,
    reserve_a: Amount,
    reserve_b: Amount,
    fee: FeeTier,
) -> Result<(), AmmError> {
    if !balance_a.fits_reserve() || !balance_b.fits_reserve() {
        return Err(AmmError::Overflow("balance exceeds 112 bits"));
    }
    let fee_bps = fee.basis_points();
    if fee_bps >= BasisPoints::MAX_PERCENT {
        return Err(AmmError::InvalidFee("fee must be below 100%"));
    }
    let adjusted_a = adjusted(balance_a, amount_a_in, fee_bps.get())?;
    let adjusted_b = adjusted(balance_b, amount_b_in, fee_bps.get())?;
    let lhs = adjusted_a
        .checked_mul(adjusted_b)
        .ok_or(AmmError::Overflow("adjusted product"))?;
    let scale = U256::from(BPS_DENOMINATOR);
    let rhs = widen(reserve_a.get())
        .checked_mul(widen(reserve_b.get()))
        .and_then(|k| k.checked_mul(scale * scale))
        .ok_or(AmmError::Overflow("reserve product"))?;
    if lhs < rhs {
        return Err(AmmError::InvariantViolation);
    }
    Ok(())
}

fn adjusted(balance: Amount, amount_in: Amount, fee_bps: u32) -> Result<U256, AmmError> {
    let scale = U256::from(BPS_DENOMINATOR);
    let fee_part = widen(amount_in.get()) * U256::from(fee_bps);
    (widen(balance.get()) * scale)
        .checked_sub(fee_part)
        .ok_or(AmmError::Underflow("fee-adjusted balance"))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const FEE: FeeTier = FeeTier::TIER_0_30_PERCENT;

    #[test]
    fn request_bounds() {
        let (ra, rb) = (Amount::new(100), Amount::new(100));
        assert_eq!(
            check_request(Amount::ZERO, Amount::ZERO, ra, rb),
            Err(AmmError::InsufficientOutputAmount)
        );
        assert_eq!(
            check_request(Amount::new(100), Amount::ZERO, ra, rb),
            Err(AmmError::InsufficientLiquidity)
        );
        assert!(check_request(Amount::new(99), Amount::ZERO, ra, rb).is_ok());
    }

    #[test]
    fn amount_in_clamps_at_zero() {
        assert_eq!(
            amount_in(Amount::new(9_000), Amount::new(10_000), Amount::new(1_000)),
            Amount::ZERO
        );
        assert_eq!(
            amount_in(Amount::new(9_500), Amount::new(10_000), Amount::new(1_000)),
            Amount::new(500)
        );
        assert_eq!(
            amount_in(Amount::new(8_000), Amount::new(10_000), Amount::new(1_000)),
            Amount::ZERO
        );
    }

    #[test]
    fn quoted_output_passes() {
        // 100 in, 98 out at 30 bps on 10k / 10k
        let result = check_invariant(
            Amount::new(10_100),
            Amount::new(9_902),
            Amount::new(100),
            Amount::ZERO,
            Amount::new(10_000),
            Amount::new(10_000),
            FEE,
        );
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn one_more_unit_fails() {
        let result = check_invariant(
            Amount::new(10_100),
            Amount::new(9_901),
            Amount::new(100),
            Amount::ZERO,
            Amount::new(10_000),
            Amount::new(10_000),
            FEE,
        );
        assert_eq!(result, Err(AmmError::InvariantViolation));
    }

    #[test]
    fn output_without_input_fails() {
        let result = check_invariant(
            Amount::new(10_000),
            Amount::new(9_999),
            Amount::ZERO,
            Amount::ZERO,
            Amount::new(10_000),
            Amount::new(10_000),
            FeeTier::TIER_0_01_PERCENT,
        );
        assert_eq!(result, Err(AmmError::InvariantViolation));
    }

    #[test]
    fn fee_applies_to_both_inputs() {
        // 50 in on each side, 1 out of each: fees on 100 units of input
        let result = check_invariant(
            Amount::new(10_049),
            Amount::new(10_049),
            Amount::new(50),
            Amount::new(50),
            Amount::new(10_000),
            Amount::new(10_000),
            FeeTier::TIER_1_00_PERCENT,
        );
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn oversized_balance_is_overflow() {
        let result = check_invariant(
            Amount::new(1u128 << 112),
            Amount::new(1),
            Amount::new(1),
            Amount::ZERO,
            Amount::new(1),
            Amount::new(1),
            FEE,
        );
        assert_eq!(result, Err(AmmError::Overflow("balance exceeds 112 bits")));
    }

    #[test]
    fn max_reserves_do_not_overflow() {
        let max = Amount::MAX_RESERVE;
        let result = check_invariant(max, max, Amount::ZERO, Amount::ZERO, max, max, FEE);
        assert_eq!(result, Ok(()));
    }
}
