//! Fundamental domain value types used throughout the engine.
//!
//! Assets, accounts, amounts, shares, fee tiers, time, call receipts and
//! indexer events.  All types are newtypes with validated constructors
//! where an invariant exists.

mod account_id;
mod amount;
mod asset_id;
mod asset_pair;
mod basis_points;
mod events;
mod fee_tier;
mod receipts;
mod shares;
mod timestamp;

pub use account_id::AccountId;
pub use amount::{Amount, RESERVE_BITS};
pub use asset_id::AssetId;
pub use asset_pair::AssetPair;
pub use basis_points::{BasisPoints, BPS_DENOMINATOR};
pub use events::PairEvent;
pub use fee_tier::FeeTier;
pub use receipts::{BurnReceipt, MintReceipt, SwapReceipt};
pub use shares::Shares;
pub use timestamp::Timestamp;
