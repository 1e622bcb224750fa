//! Pair lifecycle example.
//!
//! Creates a pair through the registry, bootstraps liquidity, trades
//! against it, reads a TWAP, switches the protocol fee on and finally
//! withdraws.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=pairswap=debug cargo run --example pair_lifecycle
//! ```

use pairswap::assets::InMemoryAssetLedger;
use pairswap::config::{PairConfig, SecurityConfig};
use pairswap::domain::{AccountId, Amount, AssetId, AssetPair, FeeTier, Timestamp};
use pairswap::factory::PairRegistry;
use pairswap::math::amount_out;
use pairswap::pair::{current_cumulative_prices, twap, CallContext, SwapRequest};
use pairswap::traits::AssetLedger;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Constant-product pair lifecycle ===\n");

    // ── 1. Accounts and assets ──────────────────────────────────────────
    let admin = AccountId::from_bytes([0xad; 32]);
    let lp = AccountId::from_bytes([0x11; 32]);
    let trader = AccountId::from_bytes([0x22; 32]);
    let treasury = AccountId::from_bytes([0x7e; 32]);
    let usdc = AssetId::from_bytes([1u8; 32]);
    let weth = AssetId::from_bytes([2u8; 32]);

    let mut ledger = InMemoryAssetLedger::new();
    for account in [lp, trader] {
        ledger.credit(&usdc, &account, Amount::new(10_000_000))?;
        ledger.credit(&weth, &account, Amount::new(10_000_000))?;
    }

    // ── 2. Create the pair ──────────────────────────────────────────────
    let mut registry = PairRegistry::new(AccountId::from_bytes([0xfa; 32]), admin);
    let security = SecurityConfig::new(Amount::new(500_000), 30)?;
    let config = PairConfig::new(AssetPair::new(usdc, weth)?, FeeTier::TIER_0_30_PERCENT, security)?;
    let t0 = CallContext::new(admin, Timestamp::from_secs(1_700_000_000));
    let pair = registry.create_pair(&t0, config)?;
    registry.set_authorization(&t0, &pair, lp, true)?;
    registry.set_authorization(&t0, &pair, trader, true)?;
    registry.set_fee_to(&t0, Some(treasury))?;
    println!("Pair created at {pair}");

    // ── 3. Bootstrap liquidity (deposit, then mint) ─────────────────────
    ledger.transfer(&usdc, &lp, &pair, Amount::new(2_000_000))?;
    ledger.transfer(&weth, &lp, &pair, Amount::new(1_000_000))?;
    let minted = registry.mint(&CallContext::new(lp, t0.now), &mut ledger, &pair, lp)?;
    println!(
        "Minted {} shares ({} locked forever)",
        minted.shares, minted.locked
    );

    // ── 4. Trade: quote, deposit, swap ──────────────────────────────────
    let observed_from = {
        let view = registry.pair(&pair)?;
        current_cumulative_prices(&view, Timestamp::from_secs(1_700_000_060))?
    };
    let mut now = 1_700_000_060;
    for round in 0..3u64 {
        let (ra, rb) = {
            let view = registry.pair(&pair)?;
            (view.reserves().reserve_a(), view.reserves().reserve_b())
        };
        let input = Amount::new(10_000);
        let out = amount_out(input, ra, rb, FeeTier::TIER_0_30_PERCENT)?;
        ledger.transfer(&usdc, &trader, &pair, input)?;
        let ctx = CallContext::new(trader, Timestamp::from_secs(now));
        let request = SwapRequest::new(Amount::ZERO, out, trader);
        let receipt = registry.swap(&ctx, &mut ledger, &pair, request, None)?;
        println!(
            "Swap {round}: {} USDC in -> {} WETH out",
            receipt.amount_a_in, receipt.amount_b_out
        );
        now += 60;
    }

    // ── 5. Read a TWAP over the trading window ──────────────────────────
    let observed_to = {
        let view = registry.pair(&pair)?;
        current_cumulative_prices(&view, Timestamp::from_secs(now))?
    };
    let prices = twap(&observed_from, &observed_to)?;
    println!(
        "TWAP over {}s: {} WETH per USDC, {} USDC per WETH",
        prices.window, prices.price_a, prices.price_b
    );

    // ── 6. Withdraw; the protocol fee is settled first ──────────────────
    let exit = CallContext::new(lp, Timestamp::from_secs(now));
    registry.transfer_shares(&exit, &pair, pair, minted.shares)?;
    let burned = registry.burn(&exit, &mut ledger, &pair, lp)?;
    println!(
        "Burned {} shares -> {} USDC + {} WETH",
        burned.shares, burned.amount_a, burned.amount_b
    );
    println!("Protocol fee minted to treasury: {} shares", burned.protocol_fee);

    for event in registry.drain_events(&pair)? {
        println!("event: {}", serde_json::to_string(&event)?);
    }
    Ok(())
}
