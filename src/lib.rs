//! # pairswap
//!
//! Constant-product liquidity pair engine: a pool of two assets that
//! issues fungible shares to liquidity providers, settles swaps against a
//! fee-adjusted `x × y ≥ k` invariant, records time-weighted price
//! accumulators for external oracles, and guards every mutating call
//! behind a security gate.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `fixed-point` | no | `U64F64` view of the UQ112x112 price ratios |
//!
//! # Quick Start
//!
//! ```rust
//! use pairswap::assets::InMemoryAssetLedger;
//! use pairswap::config::{PairConfig, SecurityConfig};
//! use pairswap::domain::{AccountId, Amount, AssetId, AssetPair, FeeTier, Timestamp};
//! use pairswap::factory::PairRegistry;
//! use pairswap::math::amount_out;
//! use pairswap::pair::{CallContext, SwapRequest};
//! use pairswap::traits::AssetLedger;
//!
//! let admin = AccountId::from_bytes([0xad; 32]);
//! let lp = AccountId::from_bytes([0x11; 32]);
//! let (usdc, weth) = (AssetId::from_bytes([1; 32]), AssetId::from_bytes([2; 32]));
//!
//! // 1. Create the pair through the registry
//! let mut registry = PairRegistry::new(AccountId::from_bytes([0xfa; 32]), admin);
//! let assets = AssetPair::new(usdc, weth).expect("distinct assets");
//! let config = PairConfig::new(assets, FeeTier::TIER_0_30_PERCENT, SecurityConfig::default())
//!     .expect("valid config");
//! let t0 = CallContext::new(admin, Timestamp::from_secs(1_000));
//! let pair = registry.create_pair(&t0, config).expect("created");
//! registry.set_authorization(&t0, &pair, lp, true).expect("authorized");
//!
//! // 2. Deposit-then-mint
//! let mut ledger = InMemoryAssetLedger::new();
//! ledger.credit(&usdc, &lp, Amount::new(1_000_000)).expect("fits");
//! ledger.credit(&weth, &lp, Amount::new(1_000_000)).expect("fits");
//! ledger.transfer(&usdc, &lp, &pair, Amount::new(100_000)).expect("funded");
//! ledger.transfer(&weth, &lp, &pair, Amount::new(100_000)).expect("funded");
//! let ctx = CallContext::new(lp, Timestamp::from_secs(1_010));
//! let minted = registry.mint(&ctx, &mut ledger, &pair, lp).expect("minted");
//! assert_eq!(minted.shares.get(), 99_000);
//!
//! // 3. Deposit-then-swap at the quoted output
//! let out = amount_out(
//!     Amount::new(1_000),
//!     Amount::new(100_000),
//!     Amount::new(100_000),
//!     FeeTier::TIER_0_30_PERCENT,
//! )
//! .expect("quotable");
//! ledger.transfer(&usdc, &lp, &pair, Amount::new(1_000)).expect("funded");
//! let request = SwapRequest::new(Amount::ZERO, out, lp);
//! let receipt = registry.swap(&ctx, &mut ledger, &pair, request, None).expect("swapped");
//! assert_eq!(receipt.amount_a_in.get(), 1_000);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │     Host     │  owns the AssetLedger, supplies CallContext
//! └──────┬───────┘
//!        │ create_pair / mint / burn / swap / sync / skim
//!        ▼
//! ┌──────────────┐
//! │ PairRegistry │  factory account, fee lookups, reentrancy scope
//! └──────┬───────┘
//!        │ &dyn FeePolicy
//!        ▼
//! ┌──────────────┐
//! │     Pair     │  gate → reserves → shares → invariant → oracle
//! └──────┬───────┘
//!        │ AssetLedger + optional SwapCallee
//!        ▼
//! ┌──────────────┐
//! │    Domain    │  Amount, Shares, AccountId, FeeTier, Timestamp, …
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types, receipts and [`PairEvent`](domain::PairEvent) |
//! | [`traits`] | Collaborator seams: [`AssetLedger`](traits::AssetLedger), [`FeePolicy`](traits::FeePolicy), [`SwapCallee`](traits::SwapCallee) |
//! | [`config`] | [`PairConfig`](config::PairConfig) and [`SecurityConfig`](config::SecurityConfig) |
//! | [`pair`] | The [`Pair`](pair::Pair) aggregate and its building blocks |
//! | [`factory`] | [`PairRegistry`](factory::PairRegistry) |
//! | [`assets`] | [`InMemoryAssetLedger`](assets::InMemoryAssetLedger) |
//! | [`math`] | Checked arithmetic, 256-bit intermediates, UQ112x112, quotes |
//! | [`error`] | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod assets;
pub mod config;
pub mod domain;
pub mod error;
pub mod factory;
pub mod math;
pub mod pair;
pub mod prelude;
pub mod traits;
