//! Unsigned 112.112 fixed-point ratios.
//!
//! A [`Uq112x112`] stores `value × 2^112` in a [`U256`].  Dividing two
//! reserves (each below `2^112`) this way keeps 112 fractional bits, so
//! a price of `reserve_b / reserve_a` loses at most `2^-112` per read.
//! The price accumulator multiplies these ratios by elapsed seconds and
//! lets the 256-bit sum wrap.

use core::fmt;

use super::wide::U256;
use crate::domain::Amount;
use crate::error::AmmError;

/// Number of fractional bits.
pub const RESOLUTION: usize = 112;

/// `2^112` as a [`U256`] (bit 48 of the second limb).
const Q112: U256 = U256([0, 1 << 48, 0, 0]);

/// An unsigned fixed-point number with 112 fractional bits.
///
/// # Examples
///
/// ```
/// use pairswap::domain::Amount;
/// use pairswap::math::Uq112x112;
///
/// let price = Uq112x112::ratio(Amount::new(3_000), Amount::new(1_000)).expect("non-zero");
/// assert_eq!(price.integer_part(), 3);
/// assert_eq!(price.mul_floor(Amount::new(10)).expect("fits"), Amount::new(30));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Uq112x112(U256);

impl Uq112x112 {
    /// Zero.
    pub const ZERO: Self = Self(U256([0, 0, 0, 0]));

    /// Wraps a raw `value × 2^112` representation.
    #[must_use]
    pub const fn from_raw(raw: U256) -> Self {
        Self(raw)
    }

    /// Returns the raw `value × 2^112` representation.
    #[must_use]
    pub const fn raw(&self) -> U256 {
        self.0
    }

    /// Encodes a reserve-sized integer.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if `value` exceeds
    /// [`Amount::MAX_RESERVE`].
    pub fn encode(value: Amount) -> Result<Self, AmmError> {
        if !value.fits_reserve() {
            return Err(AmmError::Overflow("uq112x112 encode"));
        }
        Ok(Self(U256::from(value.get()) << RESOLUTION))
    }

    /// `numerator / denominator` as a fixed-point ratio (floor).
    ///
    /// # Errors
    ///
    /// - [`AmmError::DivisionByZero`] if `denominator` is zero.
    /// - [`AmmError::Overflow`] if `numerator` exceeds a reserve.
    pub fn ratio(numerator: Amount, denominator: Amount) -> Result<Self, AmmError> {
        if denominator.is_zero() {
            return Err(AmmError::DivisionByZero);
        }
        let encoded = Self::encode(numerator)?;
        Ok(Self(encoded.0 / U256::from(denominator.get())))
    }

    /// Returns the integer part, saturating at `u128::MAX`.
    #[must_use]
    pub fn integer_part(&self) -> u128 {
        let whole = self.0 >> RESOLUTION;
        if whole.bits() > 128 {
            return u128::MAX;
        }
        whole.low_u128()
    }

    /// `floor(self × amount)`, e.g. converting an amount at a price.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the product does not fit.
    pub fn mul_floor(&self, amount: Amount) -> Result<Amount, AmmError> {
        let product = self
            .0
            .checked_mul(U256::from(amount.get()))
            .ok_or(AmmError::Overflow("uq112x112 mul"))?;
        let whole = product >> RESOLUTION;
        if whole.bits() > 128 {
            return Err(AmmError::Overflow("uq112x112 mul"));
        }
        Ok(Amount::new(whole.low_u128()))
    }

    /// Converts to a [`fixed::types::U64F64`], keeping 64 fractional bits.
    ///
    /// Returns `None` if the integer part needs more than 64 bits.
    #[cfg(feature = "fixed-point")]
    #[must_use]
    pub fn to_fixed(&self) -> Option<fixed::types::U64F64> {
        let bits = self.0 >> (RESOLUTION - 64);
        if bits.bits() > 128 {
            return None;
        }
        Some(fixed::types::U64F64::from_bits(bits.low_u128()))
    }
}

impl fmt::Display for Uq112x112 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frac = (self.0 & (Q112 - U256::one())).low_u128();
        // six decimal places are enough for logs
        let micros = (U256::from(frac) * U256::from(1_000_000u32)) >> RESOLUTION;
        write!(f, "{}.{:06}", self.integer_part(), micros.low_u128())
    }
}
