//! Flash swap example.
//!
//! Borrows WETH from a pair, uses it inside the callback, and repays in
//! the other asset before the pair checks its invariant.  A second
//! attempt repays half and is rolled back in full.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=pairswap=debug cargo run --example flash_swap
//! ```

use pairswap::assets::InMemoryAssetLedger;
use pairswap::config::{PairConfig, SecurityConfig};
use pairswap::domain::{AccountId, Amount, AssetId, AssetPair, FeeTier, Timestamp};
use pairswap::error::AmmError;
use pairswap::math::amount_in;
use pairswap::pair::{CallContext, Pair, SwapRequest};
use pairswap::traits::{AssetLedger, FixedFeePolicy, FlashSwap, SwapCallee};
use tracing_subscriber::EnvFilter;

/// Repays a WETH loan in USDC from its own inventory.
struct Borrower {
    account: AccountId,
    usdc: AssetId,
    repayment: Amount,
}

impl SwapCallee<InMemoryAssetLedger> for Borrower {
    fn on_swap(
        &mut self,
        ledger: &mut InMemoryAssetLedger,
        swap: &FlashSwap<'_>,
    ) -> Result<(), AmmError> {
        println!(
            "  callback: holding {} WETH borrowed from {}, repaying {} USDC",
            swap.amount_b_out, swap.pair, self.repayment
        );
        ledger.transfer(&self.usdc, &self.account, &swap.pair, self.repayment)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Flash swap ===\n");

    let factory = AccountId::from_bytes([0xfa; 32]);
    let address = AccountId::from_bytes([0xcc; 32]);
    let borrower = AccountId::from_bytes([0xb0; 32]);
    let usdc = AssetId::from_bytes([1u8; 32]);
    let weth = AssetId::from_bytes([2u8; 32]);
    let fee = FeeTier::TIER_0_30_PERCENT;
    let fees = FixedFeePolicy::new(fee);

    // ── 1. Standalone pair seeded with 1 000 000 / 1 000 000 ────────────
    let config = PairConfig::new(AssetPair::new(usdc, weth)?, fee, SecurityConfig::default())?;
    let t0 = CallContext::new(factory, Timestamp::from_secs(0));
    let mut pair = Pair::initialize(&t0, address, config)?;
    pair.set_authorization(&t0, borrower, true)?;

    let mut ledger = InMemoryAssetLedger::new();
    ledger.credit(&usdc, &address, Amount::new(1_000_000))?;
    ledger.credit(&weth, &address, Amount::new(1_000_000))?;
    ledger.credit(&usdc, &borrower, Amount::new(100_000))?;
    pair.mint(&t0, &mut ledger, &fees, factory)?;

    // ── 2. Borrow 10 000 WETH, repay the quoted USDC ────────────────────
    let loan = Amount::new(10_000);
    let reserves = *pair.reserves();
    let owed = amount_in(loan, reserves.reserve_a(), reserves.reserve_b(), fee)?;
    let mut callee = Borrower {
        account: borrower,
        usdc,
        repayment: owed,
    };
    let ctx = CallContext::new(borrower, Timestamp::from_secs(12));
    let request = SwapRequest::new(Amount::ZERO, loan, borrower).with_data(b"flash");
    let handler: &mut dyn SwapCallee<InMemoryAssetLedger> = &mut callee;
    let receipt = pair.swap(&ctx, &mut ledger, &fees, request, Some(handler))?;
    println!(
        "Committed: {} USDC in, {} WETH out",
        receipt.amount_a_in, receipt.amount_b_out
    );

    // ── 3. Repay half: everything is rolled back ────────────────────────
    let reserves = *pair.reserves();
    let owed = amount_in(loan, reserves.reserve_a(), reserves.reserve_b(), fee)?;
    let mut stingy = Borrower {
        account: borrower,
        usdc,
        repayment: Amount::new(owed.get() / 2),
    };
    let before = ledger.balance_of(&usdc, &borrower);
    let ctx = CallContext::new(borrower, Timestamp::from_secs(24));
    let handler: &mut dyn SwapCallee<InMemoryAssetLedger> = &mut stingy;
    match pair.swap(&ctx, &mut ledger, &fees, request, Some(handler)) {
        Ok(_) => println!("Unexpected success"),
        Err(err) => println!("Rejected: {err}"),
    }
    assert_eq!(ledger.balance_of(&usdc, &borrower), before);
    println!("Borrower USDC unchanged at {before}");
    Ok(())
}
