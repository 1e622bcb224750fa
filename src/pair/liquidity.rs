//! Share accounting: bootstrap, proportional mint, burn and the
//! protocol-fee skim.
//!
//! Every function here is pure.  The pair feeds in reserves, balances
//! and supply, and applies the result to its share ledger itself.
//!
//! # Formulas
//!
//! ```text
//! bootstrap:     shares = floor(sqrt(a × b)) − MINIMUM_LIQUIDITY
//! steady state:  shares = min(a × total / reserve_a, b × total / reserve_b)
//! burn:          out_x  = shares × balance_x / total
//! protocol fee:  skim   = total × (√k − √k_last) / (5√k + √k_last)
//! ```
//!
//! All divisions floor, so rounding always favours the pair.

use crate::domain::{Amount, Shares};
use crate::error::AmmError;
use crate::math::{isqrt, mul_div, narrow, sqrt_product, widen, U256};

/// Shares permanently locked in the burn sink by the first deposit.
pub const MINIMUM_LIQUIDITY: Shares = Shares::new(1_000);

/// Result of [`settle_protocol_fee`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSkim {
    /// Shares to mint to the fee recipient before the liquidity event.
    pub shares_to_mint: Shares,
    /// Prior invariant product to carry into the liquidity event.
    pub k_last: U256,
}

/// Computes the protocol-fee share mint owed since the last liquidity
/// event.
///
/// With the fee switched off nothing is minted and `k_last` is cleared.
/// With it on and a non-zero `k_last`, roughly one sixth of the growth in
/// `sqrt(k)` is minted as new shares.
///
/// # Errors
///
/// [`AmmError::Overflow`] if the result does not fit in `u128`, which
/// cannot happen for reserves within range.
///
/// # Examples
///
/// ```
/// use pairswap::domain::{Amount, Shares};
/// use pairswap::math::U256;
/// use pairswap::pair::settle_protocol_fee;
///
/// // sqrt(k) grew from 1000 to 1100 over a supply of 1000 shares
/// let skim = settle_protocol_fee(
///     Amount::new(1_100),
///     Amount::new(1_100),
///     U256::from(1_000_000u64),
///     Shares::new(1_000),
///     true,
/// )
/// .expect("fits");
/// assert_eq!(skim.shares_to_mint, Shares::new(15)); // 1000 × 100 / 6500
/// ```
pub fn settle_protocol_fee(
    reserve_a: Amount,
    reserve_b: Amount,
    k_last: U256,
    total: Shares,
    fee_on: bool,
) -> Result<FeeSkim, AmmError> {
    if !fee_on {
        return Ok(FeeSkim {
            shares_to_mint: Shares::ZERO,
            k_last: U256::zero(),
        });
    }
    let untouched = FeeSkim {
        shares_to_mint: Shares::ZERO,
        k_last,
    };
    if k_last.is_zero() {
        return Ok(untouched);
    }
    let root_k = widen(sqrt_product(reserve_a.get(), reserve_b.get()));
    let root_k_last = isqrt(k_last);
    if root_k <= root_k_last {
        return Ok(untouched);
    }
    let numerator = widen(total.get())
        .checked_mul(root_k - root_k_last)
        .ok_or(AmmError::Overflow("protocol fee numerator"))?;
    let denominator = root_k
        .checked_mul(U256::from(5u8))
        .and_then(|scaled| scaled.checked_add(root_k_last))
        .ok_or(AmmError::Overflow("protocol fee denominator"))?;
    let minted = narrow(numerator / denominator, "protocol fee")?;
    Ok(FeeSkim {
        shares_to_mint: Shares::new(minted),
        k_last,
    })
}

/// `reserve_a × reserve_b` when the protocol fee is on, zero otherwise.
///
/// Recorded after every mint and burn.
#[must_use]
pub fn next_k_last(reserve_a: Amount, reserve_b: Amount, fee_on: bool) -> U256 {
    if !fee_on {
        return U256::zero();
    }
    // both reserves are below 2^112, the product fits
    widen(reserve_a.get()).overflowing_mul(widen(reserve_b.get())).0
}

/// Splits the first deposit into depositor shares and locked shares.
///
/// Returns `(to_depositor, locked)`; together they equal
/// `floor(sqrt(a × b))`.
///
/// # Errors
///
/// [`AmmError::InsufficientLiquidityMinted`] if the root does not
/// exceed [`MINIMUM_LIQUIDITY`].
pub fn bootstrap_shares(amount_a: Amount, amount_b: Amount) -> Result<(Shares, Shares), AmmError> {
    let root = sqrt_product(amount_a.get(), amount_b.get());
    if root <= MINIMUM_LIQUIDITY.get() {
        return Err(AmmError::InsufficientLiquidityMinted);
    }
    Ok((
        Shares::new(root - MINIMUM_LIQUIDITY.get()),
        MINIMUM_LIQUIDITY,
    ))
}

/// Shares owed for a deposit into a funded pair.
///
/// Taking the smaller side means an unbalanced deposit donates its excess
/// to existing holders.
///
/// # Errors
///
/// - [`AmmError::InsufficientLiquidityMinted`] if the result is zero.
/// - [`AmmError::DivisionByZero`] if a reserve is zero.
pub fn proportional_shares(
    amount_a: Amount,
    amount_b: Amount,
    reserve_a: Amount,
    reserve_b: Amount,
    total: Shares,
) -> Result<Shares, AmmError> {
    let via_a = mul_div(amount_a.get(), total.get(), reserve_a.get(), "shares for asset a")?;
    let via_b = mul_div(amount_b.get(), total.get(), reserve_b.get(), "shares for asset b")?;
    let shares = via_a.min(via_b);
    if shares == 0 {
        return Err(AmmError::InsufficientLiquidityMinted);
    }
    Ok(Shares::new(shares))
}

/// Assets released by burning `shares` out of `total`.
///
/// Uses the pair's balances, not its reserves, so donations since the
/// last update go to the burner pro rata.
///
/// # Errors
///
/// [`AmmError::InsufficientLiquidityBurned`] if either amount is zero.
pub fn burn_amounts(
    shares: Shares,
    balance_a: Amount,
    balance_b: Amount,
    total: Shares,
) -> Result<(Amount, Amount), AmmError> {
    if total.is_zero() {
        return Err(AmmError::InsufficientLiquidityBurned);
    }
    let amount_a = mul_div(shares.get(), balance_a.get(), total.get(), "burn amount a")?;
    let amount_b = mul_div(shares.get(), balance_b.get(), total.get(), "burn amount b")?;
    if amount_a == 0 || amount_b == 0 {
        return Err(AmmError::InsufficientLiquidityBurned);
    }
    Ok((Amount::new(amount_a), Amount::new(amount_b)))
}
