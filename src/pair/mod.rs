//! The constant-product pair and its building blocks.
//!
//! [`Pair`] is the aggregate; the sibling modules hold the pieces it is
//! made of, each usable and testable on its own.
//!
//! | Module | Concern |
//! |--------|---------|
//! | `reserves` | Recorded reserves and last sync time |
//! | `oracle` | Cumulative price accumulators and TWAP helpers |
//! | `liquidity` | Share minting, redemption and the protocol-fee skim |
//! | `invariant` | Swap request and fee-adjusted product checks |
//! | `shares` | The pair's share table |
//! | `security` | Pause switch, authorization, limits, cooldown, reentrancy |
//! | `callback` | Flash-swap callback dispatch |

mod callback;
mod constant_product;
mod invariant;
mod liquidity;
mod oracle;
mod reserves;
mod security;
mod shares;

#[cfg(test)]
mod proptest_properties;

pub use callback::dispatch;
pub use constant_product::{CallContext, Pair, SwapRequest};
pub use invariant::{amount_in, check_invariant, check_request};
pub use liquidity::{
    bootstrap_shares, burn_amounts, next_k_last, proportional_shares, settle_protocol_fee,
    FeeSkim, MINIMUM_LIQUIDITY,
};
pub use oracle::{current_cumulative_prices, twap, PriceAccumulator, PriceObservation, TwapPrices};
pub use reserves::ReserveLedger;
pub use security::{lock, GateState, SecurityGate};
pub use shares::{ShareLedger, UNLIMITED_ALLOWANCE};
