//! Asset ledger implementations.
//!
//! Production hosts implement [`AssetLedger`](crate::traits::AssetLedger)
//! over their own balance store.  [`InMemoryAssetLedger`] is the
//! reference implementation the tests and demos run against.

mod memory;

pub use memory::InMemoryAssetLedger;
