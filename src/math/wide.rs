//! 256-bit intermediates for products of reserves and share supplies.
//!
//! Reserves fit in 112 bits and share supplies in 128, so every product
//! the engine forms fits in [`U256`].  Results are narrowed back to
//! `u128` with [`narrow`], which reports overflow instead of truncating.

use crate::error::AmmError;

#[allow(missing_docs, clippy::all)]
mod u256 {
    use uint::construct_uint;

    construct_uint! {
        /// 256-bit unsigned integer for overflow-free intermediate products.
        pub struct U256(4);
    }
}

pub use u256::U256;

/// Widens a `u128` into a [`U256`].
#[inline]
#[must_use]
pub fn widen(value: u128) -> U256 {
    U256::from(value)
}

/// Narrows a [`U256`] back to `u128`.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] with `context` if `value` needs more
/// than 128 bits.
#[inline]
pub fn narrow(value: U256, context: &'static str) -> Result<u128, AmmError> {
    if value.bits() > 128 {
        return Err(AmmError::Overflow(context));
    }
    Ok(value.low_u128())
}

/// `floor(a * b / d)` with a 256-bit intermediate.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `d` is zero.
/// - [`AmmError::Overflow`] if the quotient needs more than 128 bits.
pub fn mul_div(a: u128, b: u128, d: u128, context: &'static str) -> Result<u128, AmmError> {
    if d == 0 {
        return Err(AmmError::DivisionByZero);
    }
    let product = widen(a)
        .checked_mul(widen(b))
        .ok_or(AmmError::Overflow(context))?;
    narrow(product / widen(d), context)
}

/// Integer square root via Newton's method: `floor(sqrt(n))`.
#[must_use]
pub fn isqrt(n: U256) -> U256 {
    if n.is_zero() {
        return U256::zero();
    }
    let mut x = n;
    let mut y = (x >> 1usize) + U256::one();
    while y < x {
        x = y;
        y = (x + n / x) >> 1usize;
    }
    x
}

/// `floor(sqrt(a * b))`, the geometric mean used for share accounting.
///
/// The root of a product of two `u128` values always fits in `u128`.
#[must_use]
pub fn sqrt_product(a: u128, b: u128) -> u128 {
    // (2^128 - 1)^2 < 2^256: the product never wraps
    let (product, _) = widen(a).overflowing_mul(widen(b));
    isqrt(product).low_u128()
}
