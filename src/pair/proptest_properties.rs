//! Property-based tests for the pair engine.
//!
//! 1. **Invariant non-regression**: a quoted swap commits and never
//!    shrinks the reserve product; one unit more is rejected.  For
//!    arbitrary `(in, out)` pairs at any reserve magnitude up to
//!    [`Amount::MAX_RESERVE`], a swap commits exactly when `out` is within
//!    the quote, and a committed swap satisfies the fee-adjusted product.
//! 2. **Swap reversibility**: A→B→A returns at most the original input.
//! 3. **Liquidity round trip**: deposit then withdraw never returns more
//!    than was deposited.
//! 4. **Bootstrap lock**: the first deposit always locks exactly the
//!    minimum liquidity.
//! 5. **Accumulator monotonicity**: without wrap, cumulative prices never
//!    decrease.
//! 6. **Cooldown boundary**: a second swap is rejected until exactly
//!    `last + cooldown`.

#![allow(clippy::panic)]

use proptest::prelude::*;

use super::{CallContext, Pair, SwapRequest, MINIMUM_LIQUIDITY};
use crate::assets::InMemoryAssetLedger;
use crate::config::{PairConfig, SecurityConfig};
use crate::domain::{AccountId, Amount, AssetId, AssetPair, FeeTier, Shares, Timestamp};
use crate::error::AmmError;
use crate::math::{amount_out, widen, U256};
use crate::traits::{AssetLedger, FixedFeePolicy};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn asset_a() -> AssetId {
    AssetId::from_bytes([1u8; 32])
}

fn asset_b() -> AssetId {
    AssetId::from_bytes([2u8; 32])
}

fn factory() -> AccountId {
    AccountId::from_bytes([0xfa; 32])
}

fn holder() -> AccountId {
    AccountId::from_bytes([0x33; 32])
}

fn address() -> AccountId {
    AccountId::from_bytes([0xcc; 32])
}

fn at(secs: u64) -> CallContext {
    CallContext::new(factory(), Timestamp::from_secs(secs))
}

fn send(ledger: &mut InMemoryAssetLedger, asset: AssetId, amount: u128) {
    let Ok(()) = ledger.credit(&asset, &address(), Amount::new(amount)) else {
        panic!("credit");
    };
}

fn seeded(fee: FeeTier, cooldown: u64, ra: u128, rb: u128) -> (Pair, InMemoryAssetLedger) {
    let Ok(assets) = AssetPair::new(asset_a(), asset_b()) else {
        panic!("valid assets");
    };
    let Ok(security) = SecurityConfig::new(Amount::MAX_RESERVE, cooldown) else {
        panic!("valid security");
    };
    let Ok(config) = PairConfig::new(assets, fee, security) else {
        panic!("valid config");
    };
    let Ok(mut pair) = Pair::initialize(&at(0), address(), config) else {
        panic!("initialize");
    };
    let mut ledger = InMemoryAssetLedger::new();
    send(&mut ledger, asset_a(), ra);
    send(&mut ledger, asset_b(), rb);
    let Ok(_) = pair.mint(&at(0), &mut ledger, &FixedFeePolicy::new(fee), holder()) else {
        panic!("bootstrap");
    };
    (pair, ledger)
}

fn product(pair: &Pair) -> U256 {
    widen(pair.reserves().reserve_a().get()) * widen(pair.reserves().reserve_b().get())
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserves in [10_000, 10^15].
fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=1_000_000_000_000_000u128
}

/// Reserves from 10_000 up to the full 112-bit range, spread across
/// magnitudes.
fn wide_reserve_strategy() -> impl Strategy<Value = u128> {
    prop_oneof![
        10_000u128..=1_000_000_000_000_000u128,
        1_000_000_000_000_000u128..=(1u128 << 80),
        (1u128 << 80)..=Amount::MAX_RESERVE.get(),
        Just(Amount::MAX_RESERVE.get() - 1),
    ]
}

fn fee_strategy() -> impl Strategy<Value = FeeTier> {
    prop::sample::select(FeeTier::STANDARD.to_vec())
}

/// Input as a share of the input-side reserve, in basis points.
fn input_fraction_strategy() -> impl Strategy<Value = u128> {
    1u128..=5_000u128
}

// ---------------------------------------------------------------------------
// Property 1: Invariant non-regression
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_quoted_swap_never_shrinks_product(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        fee in fee_strategy(),
        fraction in input_fraction_strategy(),
    ) {
        let (mut pair, mut ledger) = seeded(fee, 0, ra, rb);
        let fees = FixedFeePolicy::new(fee);
        let input = (ra * fraction / 10_000).max(1);
        let Ok(out) = amount_out(Amount::new(input), Amount::new(ra), Amount::new(rb), fee) else {
            return Ok(());
        };
        if out.is_zero() { return Ok(()); }
        let k_before = product(&pair);
        send(&mut ledger, asset_a(), input);

        let greedy = SwapRequest::new(Amount::ZERO, Amount::new(out.get() + 1), holder());
        let rejected = pair.swap(&at(1), &mut ledger, &fees, greedy, None);
        prop_assert!(
            matches!(rejected, Err(AmmError::InvariantViolation | AmmError::InsufficientLiquidity)),
            "one unit above the quote must fail, got {:?}", rejected
        );

        let request = SwapRequest::new(Amount::ZERO, out, holder());
        prop_assert!(pair.swap(&at(1), &mut ledger, &fees, request, None).is_ok());
        prop_assert!(product(&pair) >= k_before);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_arbitrary_swap_commits_iff_within_quote(
        ra in wide_reserve_strategy(),
        rb in wide_reserve_strategy(),
        fee in fee_strategy(),
        in_seed in any::<u128>(),
        out_seed in any::<u128>(),
    ) {
        let headroom = Amount::MAX_RESERVE.get() - ra;
        prop_assume!(headroom > 0);
        let input = 1 + in_seed % headroom;
        let out = 1 + out_seed % (rb - 1);

        let (mut pair, mut ledger) = seeded(fee, 0, ra, rb);
        let fees = FixedFeePolicy::new(fee);
        let Ok(quote) = amount_out(Amount::new(input), Amount::new(ra), Amount::new(rb), fee) else {
            panic!("quote within range");
        };
        let k_before = product(&pair);
        send(&mut ledger, asset_a(), input);

        let request = SwapRequest::new(Amount::ZERO, Amount::new(out), holder());
        let result = pair.swap(&at(1), &mut ledger, &fees, request, None);
        if out <= quote.get() {
            prop_assert!(result.is_ok(), "out {} within quote {} rejected: {:?}", out, quote, result);
            let scale = U256::from(10_000u32);
            let balance_a = widen(pair.reserves().reserve_a().get());
            let balance_b = widen(pair.reserves().reserve_b().get());
            let adjusted_a = balance_a * scale - widen(input) * U256::from(fee.basis_points().get());
            prop_assert!(adjusted_a * balance_b * scale >= k_before * scale * scale);
            prop_assert!(product(&pair) >= k_before);
            prop_assert_eq!(ledger.balance_of(&asset_b(), &holder()), Amount::new(out));
        } else {
            prop_assert_eq!(result.map(|r| r.amount_b_out), Err(AmmError::InvariantViolation));
            prop_assert_eq!(pair.reserves().reserve_a(), Amount::new(ra));
            prop_assert_eq!(pair.reserves().reserve_b(), Amount::new(rb));
            prop_assert_eq!(ledger.balance_of(&asset_b(), &address()), Amount::new(rb));
            prop_assert_eq!(ledger.balance_of(&asset_b(), &holder()), Amount::ZERO);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2: Swap reversibility
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_round_trip_loses_value(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        fee in fee_strategy(),
    ) {
        let (mut pair, mut ledger) = seeded(fee, 0, ra, rb);
        let fees = FixedFeePolicy::new(fee);
        let input = (ra / 1_000).max(1);

        let Ok(received) = amount_out(Amount::new(input), Amount::new(ra), Amount::new(rb), fee) else {
            return Ok(());
        };
        if received.is_zero() { return Ok(()); }
        send(&mut ledger, asset_a(), input);
        let Ok(_) = pair.swap(&at(1), &mut ledger, &fees, SwapRequest::new(Amount::ZERO, received, holder()), None) else {
            return Ok(());
        };

        let reserves = *pair.reserves();
        let Ok(back) = amount_out(received, reserves.reserve_b(), reserves.reserve_a(), fee) else {
            return Ok(());
        };
        prop_assert!(back.get() <= input, "round trip gained: {} > {}", back, input);
    }
}

// ---------------------------------------------------------------------------
// Property 3: Liquidity round trip
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_deposit_then_withdraw_never_profits(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        fraction in input_fraction_strategy(),
    ) {
        let fee = FeeTier::TIER_0_30_PERCENT;
        let (mut pair, mut ledger) = seeded(fee, 0, ra, rb);
        let fees = FixedFeePolicy::new(fee);
        let deposit_a = (ra * fraction / 10_000).max(1);
        let deposit_b = (rb * fraction / 10_000).max(1);
        let depositor = AccountId::from_bytes([0x44; 32]);

        send(&mut ledger, asset_a(), deposit_a);
        send(&mut ledger, asset_b(), deposit_b);
        let Ok(minted) = pair.mint(&at(1), &mut ledger, &fees, depositor) else {
            return Ok(());
        };
        let Ok(()) = pair.transfer_shares(&CallContext::new(depositor, Timestamp::from_secs(1)), address(), minted.shares) else {
            panic!("share transfer");
        };
        let Ok(burned) = pair.burn(&at(2), &mut ledger, &fees, depositor) else {
            return Ok(());
        };
        prop_assert!(burned.amount_a.get() <= deposit_a);
        prop_assert!(burned.amount_b.get() <= deposit_b);
        prop_assert_eq!(ledger.balance_of(&asset_a(), &depositor), burned.amount_a);
    }
}

// ---------------------------------------------------------------------------
// Property 4: Bootstrap lock
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_bootstrap_locks_minimum(
        ra in wide_reserve_strategy(),
        rb in wide_reserve_strategy(),
    ) {
        let (pair, _) = seeded(FeeTier::TIER_0_30_PERCENT, 0, ra, rb);
        prop_assert_eq!(pair.shares().balance_of(&AccountId::BURN_SINK), MINIMUM_LIQUIDITY);
        let Some(expected) = pair.total_shares().checked_sub(&MINIMUM_LIQUIDITY) else {
            panic!("supply below lock");
        };
        prop_assert_eq!(pair.shares().balance_of(&holder()), expected);
        prop_assert!(expected > Shares::ZERO);
    }
}

// ---------------------------------------------------------------------------
// Property 5: Accumulator monotonicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_accumulators_non_decreasing(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        steps in prop::collection::vec(1u64..=86_400u64, 1..8),
    ) {
        let (mut pair, mut ledger) = seeded(FeeTier::TIER_0_30_PERCENT, 0, ra, rb);
        let mut now = 0u64;
        let mut last = (pair.price_a_cumulative(), pair.price_b_cumulative());
        for step in steps {
            now += step;
            let Ok(()) = pair.sync(&at(now), &mut ledger) else {
                panic!("sync");
            };
            let current = (pair.price_a_cumulative(), pair.price_b_cumulative());
            prop_assert!(current.0 > last.0);
            prop_assert!(current.1 >= last.1);
            last = current;
        }
    }
}

// ---------------------------------------------------------------------------
// Property 6: Cooldown boundary
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_cooldown_boundary(
        cooldown in 1u64..=3_600u64,
        start in 1u64..=1_000_000u64,
    ) {
        let fee = FeeTier::TIER_0_30_PERCENT;
        let (mut pair, mut ledger) = seeded(fee, cooldown, 1_000_000, 1_000_000);
        let fees = FixedFeePolicy::new(fee);
        let request = SwapRequest::new(Amount::ZERO, Amount::new(90), holder());

        send(&mut ledger, asset_a(), 100);
        prop_assert!(pair.swap(&at(start), &mut ledger, &fees, request, None).is_ok());

        send(&mut ledger, asset_a(), 100);
        let early = pair.swap(&at(start + cooldown - 1), &mut ledger, &fees, request, None);
        prop_assert_eq!(
            early.map(|r| r.amount_b_out),
            Err(AmmError::CooldownActive { retry_at: Timestamp::from_secs(start + cooldown) })
        );
        prop_assert!(pair.swap(&at(start + cooldown), &mut ledger, &fees, request, None).is_ok());
    }
}
