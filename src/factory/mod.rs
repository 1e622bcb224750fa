//! Pair creation and hosting.
//!
//! The [`PairRegistry`] is the factory side of every pair it hosts: it
//! creates each asset pair at most once at a deterministic address,
//! answers the fee lookups pairs make on every swap, holds the optional
//! protocol-fee recipient, and routes calls into its pairs through one
//! registry-wide reentrancy scope.
//!
//! # Usage
//!
//! ```rust
//! use pairswap::config::{PairConfig, SecurityConfig};
//! use pairswap::domain::{AccountId, AssetId, AssetPair, FeeTier, Timestamp};
//! use pairswap::factory::{derive_pair_address, PairRegistry};
//! use pairswap::pair::CallContext;
//!
//! let account = AccountId::from_bytes([0xfa; 32]);
//! let mut registry = PairRegistry::new(account, AccountId::from_bytes([0xad; 32]));
//!
//! let assets = AssetPair::new(AssetId::from_bytes([2; 32]), AssetId::from_bytes([1; 32]))
//!     .expect("distinct");
//! let cfg = PairConfig::new(assets, FeeTier::TIER_0_30_PERCENT, SecurityConfig::default())
//!     .expect("valid");
//!
//! let ctx = CallContext::new(AccountId::from_bytes([0x01; 32]), Timestamp::from_secs(0));
//! let address = registry.create_pair(&ctx, cfg).expect("created");
//! assert_eq!(address, derive_pair_address(&account, &assets));
//! ```

mod pair_registry;

pub use pair_registry::{derive_pair_address, PairRegistry, PAIR_ADDRESS_DOMAIN};
