//! Off-engine quoting helpers.
//!
//! The pair itself never prices a trade: it only checks that the
//! fee-adjusted invariant holds after the caller has moved assets.
//! Callers simulate with these helpers first so they know what to pay in
//! and what to request out.
//!
//! # Exact-in (asset X → asset Y)
//!
//! ```text
//! in_with_fee = amount_in × (10 000 − fee_bps)
//! amount_out  = in_with_fee × reserve_out / (reserve_in × 10 000 + in_with_fee)
//! ```
//!
//! # Exact-out
//!
//! ```text
//! amount_in = reserve_in × amount_out × 10 000 / ((reserve_out − amount_out) × (10 000 − fee_bps)) + 1
//! ```

use super::wide::{narrow, widen, U256};
use crate::domain::{Amount, FeeTier, BPS_DENOMINATOR};
use crate::error::AmmError;

fn fee_complement(fee: FeeTier) -> Result<U256, AmmError> {
    fee.basis_points()
        .complement()
        .map(U256::from)
        .ok_or(AmmError::InvalidFee("fee exceeds 100%"))
}

/// Maximum output for an exact input.
///
/// # Errors
///
/// - [`AmmError::InsufficientInputAmount`] if `amount_in` is zero.
/// - [`AmmError::InsufficientLiquidity`] if either reserve is zero.
/// - [`AmmError::Overflow`] if an operand exceeds a reserve.
///
/// # Examples
///
/// ```
/// use pairswap::domain::{Amount, FeeTier};
/// use pairswap::math::amount_out;
///
/// let out = amount_out(
///     Amount::new(100),
///     Amount::new(10_000),
///     Amount::new(10_000),
///     FeeTier::TIER_0_30_PERCENT,
/// )
/// .expect("quotable");
/// assert_eq!(out, Amount::new(98));
/// ```
pub fn amount_out(
    amount_in: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee: FeeTier,
) -> Result<Amount, AmmError> {
    if amount_in.is_zero() {
        return Err(AmmError::InsufficientInputAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::InsufficientLiquidity);
    }
    let in_with_fee = widen(amount_in.get())
        .checked_mul(fee_complement(fee)?)
        .ok_or(AmmError::Overflow("quote input with fee"))?;
    let numerator = in_with_fee
        .checked_mul(widen(reserve_out.get()))
        .ok_or(AmmError::Overflow("quote numerator"))?;
    let denominator = widen(reserve_in.get())
        .checked_mul(U256::from(BPS_DENOMINATOR))
        .and_then(|scaled| scaled.checked_add(in_with_fee))
        .ok_or(AmmError::Overflow("quote denominator"))?;
    Ok(Amount::new(narrow(numerator / denominator, "quote output")?))
}

/// Minimum input required for an exact output.
///
/// # Errors
///
/// - [`AmmError::InsufficientOutputAmount`] if `amount_out` is zero.
/// - [`AmmError::InsufficientLiquidity`] if a reserve is zero or
///   `amount_out` would drain `reserve_out`.
/// - [`AmmError::Overflow`] if the result does not fit.
pub fn amount_in(
    amount_out: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee: FeeTier,
) -> Result<Amount, AmmError> {
    if amount_out.is_zero() {
        return Err(AmmError::InsufficientOutputAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() || amount_out >= reserve_out {
        return Err(AmmError::InsufficientLiquidity);
    }
    let numerator = widen(reserve_in.get())
        .checked_mul(widen(amount_out.get()))
        .and_then(|v| v.checked_mul(U256::from(BPS_DENOMINATOR)))
        .ok_or(AmmError::Overflow("quote numerator"))?;
    let remaining = reserve_out.get() - amount_out.get();
    let denominator = widen(remaining)
        .checked_mul(fee_complement(fee)?)
        .ok_or(AmmError::Overflow("quote denominator"))?;
    if denominator.is_zero() {
        return Err(AmmError::DivisionByZero);
    }
    let required = narrow(numerator / denominator, "quote input")?;
    required
        .checked_add(1)
        .map(Amount::new)
        .ok_or(AmmError::Overflow("quote input"))
}

/// Amount of the other asset worth `amount_a` at the current reserve ratio.
///
/// Used to size a balanced deposit; no fee is involved.
///
/// # Errors
///
/// - [`AmmError::InsufficientInputAmount`] if `amount_a` is zero.
/// - [`AmmError::InsufficientLiquidity`] if either reserve is zero.
pub fn quote(amount_a: Amount, reserve_a: Amount, reserve_b: Amount) -> Result<Amount, AmmError> {
    if amount_a.is_zero() {
        return Err(AmmError::InsufficientInputAmount);
    }
    if reserve_a.is_zero() || reserve_b.is_zero() {
        return Err(AmmError::InsufficientLiquidity);
    }
    super::wide::mul_div(amount_a.get(), reserve_b.get(), reserve_a.get(), "quote").map(Amount::new)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn amount_out_matches_closed_form() {
        // floor(10000 * 100 * 9970 / (10000 * 10000 + 100 * 9970))
        let expected = 10_000u128 * 100 * 9_970 / (10_000 * 10_000 + 100 * 9_970);
        let Ok(out) = amount_out(
            Amount::new(100),
            Amount::new(10_000),
            Amount::new(10_000),
            FeeTier::TIER_0_30_PERCENT,
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(out.get(), expected);
    }

    #[test]
    fn amount_in_covers_amount_out() {
        let fee = FeeTier::TIER_0_05_PERCENT;
        let (rin, rout) = (Amount::new(5_000_000), Amount::new(2_000_000));
        let Ok(needed) = amount_in(Amount::new(12_345), rin, rout, fee) else {
            panic!("expected Ok");
        };
        let Ok(out) = amount_out(needed, rin, rout, fee) else {
            panic!("expected Ok");
        };
        assert!(out >= Amount::new(12_345));
    }

    #[test]
    fn amount_in_rejects_draining() {
        assert_eq!(
            amount_in(
                Amount::new(10),
                Amount::new(10),
                Amount::new(10),
                FeeTier::TIER_0_30_PERCENT
            ),
            Err(AmmError::InsufficientLiquidity)
        );
    }

    #[test]
    fn zero_inputs_rejected() {
        let fee = FeeTier::TIER_0_30_PERCENT;
        assert_eq!(
            amount_out(Amount::ZERO, Amount::new(1), Amount::new(1), fee),
            Err(AmmError::InsufficientInputAmount)
        );
        assert_eq!(
            amount_out(Amount::new(1), Amount::ZERO, Amount::new(1), fee),
            Err(AmmError::InsufficientLiquidity)
        );
        assert_eq!(
            amount_in(Amount::ZERO, Amount::new(1), Amount::new(1), fee),
            Err(AmmError::InsufficientOutputAmount)
        );
    }

    #[test]
    fn quote_is_proportional() {
        assert_eq!(
            quote(Amount::new(50), Amount::new(100), Amount::new(300)),
            Ok(Amount::new(150))
        );
    }
}
