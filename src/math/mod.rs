//! Arithmetic utilities for pair accounting.
//!
//! This module provides [`CheckedArithmetic`] for overflow-safe
//! operations on domain types, 256-bit intermediates ([`U256`]) with
//! integer square roots, the [`Uq112x112`] fixed-point ratio used by the
//! price accumulator, and quoting helpers for callers that simulate
//! before they trade.
//!
//! # Feature-gated conversions
//!
//! | Feature | Adds |
//! |---------|------|
//! | `fixed-point` | `Uq112x112::to_fixed` returning `fixed::types::U64F64` |

mod checked;
mod quote;
mod uq112x112;
mod wide;

pub use checked::CheckedArithmetic;
pub use quote::{amount_in, amount_out, quote};
pub use uq112x112::{Uq112x112, RESOLUTION};
pub use wide::{isqrt, mul_div, narrow, sqrt_product, widen, U256};
