//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use pairswap::prelude::*;
//! ```

pub use crate::assets::InMemoryAssetLedger;
pub use crate::config::{PairConfig, SecurityConfig};
pub use crate::domain::{
    AccountId, Amount, AssetId, AssetPair, BasisPoints, BurnReceipt, FeeTier, MintReceipt,
    PairEvent, Shares, SwapReceipt, Timestamp,
};
pub use crate::error::{AmmError, ErrorKind, Result};
pub use crate::factory::PairRegistry;
pub use crate::math::{CheckedArithmetic, Uq112x112};
pub use crate::pair::{CallContext, Pair, SwapRequest, MINIMUM_LIQUIDITY};
pub use crate::traits::{AssetLedger, FeePolicy, FixedFeePolicy, FlashSwap, SwapCallee};
