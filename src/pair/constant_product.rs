//! The constant-product pair aggregate.
//!
//! A [`Pair`] owns the bookkeeping of one asset pair: recorded reserves,
//! price accumulators, share table, protocol-fee anchor and security
//! gate.  Assets themselves live in an external
//! [`AssetLedger`]; the pair reads its own balances there and instructs
//! transfers out.
//!
//! # Deposit-then-call
//!
//! Mint and swap never pull assets.  The caller transfers assets to the
//! pair's address first, then calls; the pair measures what arrived by
//! comparing balances with recorded reserves.  Burn works the same way
//! with shares: transfer shares to the pair, then call `burn`.
//!
//! # Atomicity
//!
//! Every mutating call runs against a staged copy of the pair and a
//! ledger checkpoint.  On success both are committed and the call's
//! events become visible; on failure the ledger is rolled back and the
//! staged copy is dropped, so no partial effect survives.
//!
//! # Example
//!
//! ```
//! use pairswap::assets::InMemoryAssetLedger;
//! use pairswap::config::{PairConfig, SecurityConfig};
//! use pairswap::domain::{AccountId, Amount, AssetId, AssetPair, FeeTier, Timestamp};
//! use pairswap::math::amount_out;
//! use pairswap::pair::{CallContext, Pair, SwapRequest};
//! use pairswap::traits::{AssetLedger, FixedFeePolicy};
//!
//! let (usdc, weth) = (AssetId::from_bytes([1; 32]), AssetId::from_bytes([2; 32]));
//! let factory = AccountId::from_bytes([0xfa; 32]);
//! let address = AccountId::from_bytes([0xcc; 32]);
//! let fees = FixedFeePolicy::new(FeeTier::TIER_0_30_PERCENT);
//! let assets = AssetPair::new(usdc, weth).expect("distinct");
//! let config = PairConfig::new(assets, FeeTier::TIER_0_30_PERCENT, SecurityConfig::default())
//!     .expect("valid");
//!
//! let ctx = CallContext::new(factory, Timestamp::from_secs(1_000));
//! let mut pair = Pair::initialize(&ctx, address, config).expect("initialized");
//! let mut ledger = InMemoryAssetLedger::new();
//!
//! // seed 10 000 / 10 000
//! ledger.credit(&usdc, &address, Amount::new(10_000)).expect("fits");
//! ledger.credit(&weth, &address, Amount::new(10_000)).expect("fits");
//! let minted = pair.mint(&ctx, &mut ledger, &fees, factory).expect("bootstrap");
//! assert_eq!(minted.shares.get(), 9_000);
//!
//! // pay 100 USDC in, take the quoted WETH out
//! ledger.credit(&usdc, &address, Amount::new(100)).expect("fits");
//! let out = amount_out(
//!     Amount::new(100),
//!     Amount::new(10_000),
//!     Amount::new(10_000),
//!     FeeTier::TIER_0_30_PERCENT,
//! )
//! .expect("quotable");
//! let request = SwapRequest::new(Amount::ZERO, out, factory);
//! pair.swap(&ctx, &mut ledger, &fees, request, None).expect("swap");
//! assert_eq!(ledger.balance_of(&weth, &factory), out);
//! ```

use std::mem;

use tracing::{debug, info, warn};

use super::callback;
use super::invariant::{amount_in, check_invariant, check_request};
use super::liquidity::{
    bootstrap_shares, burn_amounts, next_k_last, proportional_shares, settle_protocol_fee,
};
use super::oracle::PriceAccumulator;
use super::reserves::ReserveLedger;
use super::security::{GateState, SecurityGate};
use super::shares::ShareLedger;
use crate::config::PairConfig;
use crate::domain::{
    AccountId, Amount, AssetPair, BurnReceipt, MintReceipt, PairEvent, Shares, SwapReceipt,
    Timestamp,
};
use crate::error::AmmError;
use crate::math::{CheckedArithmetic, U256};
use crate::traits::{AssetLedger, FeePolicy, FlashSwap, SwapCallee};

/// Who is calling and when.
///
/// The engine has no ambient clock or sender; every entry point is told
/// both explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    /// Account performing the call.
    pub caller: AccountId,
    /// Current time.
    pub now: Timestamp,
}

impl CallContext {
    /// Creates a context.
    #[must_use]
    pub const fn new(caller: AccountId, now: Timestamp) -> Self {
        Self { caller, now }
    }
}

/// Parameters of a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapRequest<'a> {
    /// Asset A to send to `to`.
    pub amount_a_out: Amount,
    /// Asset B to send to `to`.
    pub amount_b_out: Amount,
    /// Recipient of the outputs.
    pub to: AccountId,
    /// Callback data; non-empty turns the swap into a flash swap.
    pub data: &'a [u8],
}

impl<'a> SwapRequest<'a> {
    /// A plain swap without callback.
    #[must_use]
    pub const fn new(amount_a_out: Amount, amount_b_out: Amount, to: AccountId) -> Self {
        Self {
            amount_a_out,
            amount_b_out,
            to,
            data: &[],
        }
    }

    /// Attaches callback data.
    #[must_use]
    pub const fn with_data(mut self, data: &'a [u8]) -> Self {
        self.data = data;
        self
    }
}

#[derive(Debug, Clone)]
struct PairCore {
    address: AccountId,
    assets: AssetPair,
    reserves: ReserveLedger,
    oracle: PriceAccumulator,
    k_last: U256,
    shares: ShareLedger,
    gate: SecurityGate,
}

impl PairCore {
    fn balances<L: AssetLedger + ?Sized>(&self, ledger: &L) -> (Amount, Amount) {
        (
            ledger.balance_of(&self.assets.asset_a(), &self.address),
            ledger.balance_of(&self.assets.asset_b(), &self.address),
        )
    }

    fn pay_out<L: AssetLedger + ?Sized>(
        &self,
        ledger: &mut L,
        to: &AccountId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<(), AmmError> {
        if !amount_a.is_zero() {
            ledger.transfer(&self.assets.asset_a(), &self.address, to, amount_a)?;
        }
        if !amount_b.is_zero() {
            ledger.transfer(&self.assets.asset_b(), &self.address, to, amount_b)?;
        }
        Ok(())
    }

    fn update(
        &mut self,
        balance_a: Amount,
        balance_b: Amount,
        now: Timestamp,
        events: &mut Vec<PairEvent>,
    ) -> Result<(), AmmError> {
        self.reserves
            .update(&mut self.oracle, balance_a, balance_b, now)?;
        events.push(PairEvent::Sync {
            reserve_a: balance_a,
            reserve_b: balance_b,
        });
        Ok(())
    }

    fn mint_fee(&mut self, fee_to: Option<AccountId>) -> Result<Shares, AmmError> {
        let skim = settle_protocol_fee(
            self.reserves.reserve_a(),
            self.reserves.reserve_b(),
            self.k_last,
            self.shares.total_supply(),
            fee_to.is_some(),
        )?;
        self.k_last = skim.k_last;
        match fee_to {
            Some(recipient) if !skim.shares_to_mint.is_zero() => {
                self.shares.mint(&recipient, skim.shares_to_mint)?;
                Ok(skim.shares_to_mint)
            }
            _ => Ok(Shares::ZERO),
        }
    }

    fn is_own_account(&self, account: &AccountId) -> bool {
        *account == self.address
            || account.as_bytes() == self.assets.asset_a().as_bytes()
            || account.as_bytes() == self.assets.asset_b().as_bytes()
    }
}

/// One constant-product pair.
///
/// Created once by its factory through [`Pair::initialize`]; the asset
/// pair is fixed from then on.  Every state-changing method takes a
/// [`CallContext`] and is vetted by the pair's [`SecurityGate`].
#[derive(Debug, Clone)]
pub struct Pair {
    core: PairCore,
    events: Vec<PairEvent>,
}

impl Pair {
    /// Creates the pair at `address`.
    ///
    /// The caller becomes the controlling factory.  There is no other
    /// constructor, so a pair is initialized exactly once.
    ///
    /// # Errors
    ///
    /// - Anything [`PairConfig::validate`] reports.
    /// - [`AmmError::InvalidConfiguration`] if `address` is the burn sink.
    pub fn initialize(
        ctx: &CallContext,
        address: AccountId,
        config: PairConfig,
    ) -> Result<Self, AmmError> {
        config.validate()?;
        if address.is_burn_sink() {
            return Err(AmmError::InvalidConfiguration(
                "pair address must be non-zero",
            ));
        }
        let assets = *config.assets();
        info!(
            pair = %address,
            asset_a = %assets.asset_a(),
            asset_b = %assets.asset_b(),
            fee = %config.fee_tier(),
            factory = %ctx.caller,
            "pair initialized"
        );
        Ok(Self {
            core: PairCore {
                address,
                assets,
                reserves: ReserveLedger::new(ctx.now),
                oracle: PriceAccumulator::default(),
                k_last: U256::zero(),
                shares: ShareLedger::default(),
                gate: SecurityGate::new(ctx.caller, config.security()),
            },
            events: Vec::new(),
        })
    }

    fn transact<L, T, F>(&mut self, op: &'static str, ledger: &mut L, body: F) -> Result<T, AmmError>
    where
        L: AssetLedger + ?Sized,
        F: FnOnce(&mut PairCore, &mut L, &mut Vec<PairEvent>) -> Result<T, AmmError>,
    {
        let checkpoint = ledger.checkpoint();
        let mut staged = self.core.clone();
        let mut events = Vec::new();
        match body(&mut staged, ledger, &mut events) {
            Ok(out) => {
                ledger.release(checkpoint);
                self.core = staged;
                self.events.append(&mut events);
                Ok(out)
            }
            Err(err) => {
                ledger.rollback(checkpoint);
                warn!(pair = %self.core.address, op, error = %err, "call rolled back");
                Err(err)
            }
        }
    }

    // -- liquidity ----------------------------------------------------------

    /// Issues shares for the assets deposited since the last update.
    ///
    /// The first deposit mints `floor(sqrt(a × b))` shares and locks
    /// [`MINIMUM_LIQUIDITY`](super::MINIMUM_LIQUIDITY) of them in the burn
    /// sink; later deposits mint pro rata to the smaller side.  Protocol
    /// fees owed since the last liquidity event are settled first.
    ///
    /// # Errors
    ///
    /// - Gate rejections ([`AmmError::PoolPaused`], [`AmmError::Unauthorized`]).
    /// - [`AmmError::InsufficientLiquidityMinted`] if no shares would be
    ///   minted.
    /// - [`AmmError::Underflow`] if a balance is below its reserve.
    /// - [`AmmError::Overflow`] if a balance exceeds the reserve range.
    pub fn mint<L: AssetLedger + ?Sized>(
        &mut self,
        ctx: &CallContext,
        ledger: &mut L,
        fees: &dyn FeePolicy,
        to: AccountId,
    ) -> Result<MintReceipt, AmmError> {
        let receipt = self.transact("mint", ledger, |core, ledger, events| {
            core.gate.check_access(&ctx.caller)?;
            let (balance_a, balance_b) = core.balances(ledger);
            let amount_a = balance_a.safe_sub(&core.reserves.reserve_a(), "deposit of asset a")?;
            let amount_b = balance_b.safe_sub(&core.reserves.reserve_b(), "deposit of asset b")?;
            let fee_to = fees.protocol_fee_recipient();
            let protocol_fee = core.mint_fee(fee_to)?;

            let total = core.shares.total_supply();
            let (shares, locked) = if total.is_zero() {
                let (shares, locked) = bootstrap_shares(amount_a, amount_b)?;
                core.shares.mint(&AccountId::BURN_SINK, locked)?;
                (shares, locked)
            } else {
                let shares = proportional_shares(
                    amount_a,
                    amount_b,
                    core.reserves.reserve_a(),
                    core.reserves.reserve_b(),
                    total,
                )?;
                (shares, Shares::ZERO)
            };
            core.shares.mint(&to, shares)?;

            core.update(balance_a, balance_b, ctx.now, events)?;
            core.k_last = next_k_last(balance_a, balance_b, fee_to.is_some());
            events.push(PairEvent::Mint {
                sender: ctx.caller,
                amount_a,
                amount_b,
            });
            Ok(MintReceipt {
                amount_a,
                amount_b,
                shares,
                locked,
                protocol_fee,
            })
        })?;
        debug!(
            pair = %self.core.address,
            to = %to,
            amount_a = %receipt.amount_a,
            amount_b = %receipt.amount_b,
            shares = %receipt.shares,
            "mint committed"
        );
        Ok(receipt)
    }

    /// Redeems every share the pair holds for its pro-rata assets.
    ///
    /// The holder transfers shares to the pair's address first; `burn`
    /// then pays both assets to `to`.
    ///
    /// # Errors
    ///
    /// - Gate rejections.
    /// - [`AmmError::InsufficientLiquidityBurned`] if either payout is zero.
    pub fn burn<L: AssetLedger + ?Sized>(
        &mut self,
        ctx: &CallContext,
        ledger: &mut L,
        fees: &dyn FeePolicy,
        to: AccountId,
    ) -> Result<BurnReceipt, AmmError> {
        let receipt = self.transact("burn", ledger, |core, ledger, events| {
            core.gate.check_access(&ctx.caller)?;
            let (balance_a, balance_b) = core.balances(ledger);
            let address = core.address;
            let liquidity = core.shares.balance_of(&address);
            let fee_to = fees.protocol_fee_recipient();
            let protocol_fee = core.mint_fee(fee_to)?;

            let (amount_a, amount_b) =
                burn_amounts(liquidity, balance_a, balance_b, core.shares.total_supply())?;
            core.shares.burn(&address, liquidity)?;
            core.pay_out(ledger, &to, amount_a, amount_b)?;

            let (balance_a, balance_b) = core.balances(ledger);
            core.update(balance_a, balance_b, ctx.now, events)?;
            core.k_last = next_k_last(balance_a, balance_b, fee_to.is_some());
            events.push(PairEvent::Burn {
                sender: ctx.caller,
                amount_a,
                amount_b,
                to,
            });
            Ok(BurnReceipt {
                shares: liquidity,
                amount_a,
                amount_b,
                protocol_fee,
            })
        })?;
        debug!(
            pair = %self.core.address,
            to = %to,
            shares = %receipt.shares,
            amount_a = %receipt.amount_a,
            amount_b = %receipt.amount_b,
            "burn committed"
        );
        Ok(receipt)
    }

    // -- swap ---------------------------------------------------------------

    /// Sends the requested outputs and accepts the swap if the inputs
    /// found afterwards keep the fee-adjusted product from shrinking.
    ///
    /// # Flow
    ///
    /// 1. Gate: pause, authorization, output limit, cooldown.
    /// 2. Outputs must be non-zero and below the reserves; `to` must not
    ///    be the pair or one of its assets.
    /// 3. Outputs are transferred to `to`.
    /// 4. With non-empty `request.data`, `callee` runs (flash swap).
    /// 5. Inputs are derived from balances; the fee tier is fetched from
    ///    `fees` and the invariant is checked.
    /// 6. Reserves are updated and the caller's cooldown is stamped.
    ///
    /// # Errors
    ///
    /// - Gate rejections, including [`AmmError::MaxSwapAmountExceeded`]
    ///   and [`AmmError::CooldownActive`].
    /// - [`AmmError::InsufficientOutputAmount`],
    ///   [`AmmError::InsufficientLiquidity`],
    ///   [`AmmError::InvalidRecipient`],
    ///   [`AmmError::InsufficientInputAmount`].
    /// - [`AmmError::CallbackUnavailable`], [`AmmError::CallbackFailed`].
    /// - [`AmmError::InvariantViolation`], [`AmmError::Overflow`].
    pub fn swap<L: AssetLedger + ?Sized>(
        &mut self,
        ctx: &CallContext,
        ledger: &mut L,
        fees: &dyn FeePolicy,
        request: SwapRequest<'_>,
        callee: Option<&mut dyn SwapCallee<L>>,
    ) -> Result<SwapReceipt, AmmError> {
        let SwapRequest {
            amount_a_out,
            amount_b_out,
            to,
            data,
        } = request;
        let receipt = self.transact("swap", ledger, |core, ledger, events| {
            core.gate
                .check_swap(&ctx.caller, amount_a_out, amount_b_out, ctx.now)?;
            let reserve_a = core.reserves.reserve_a();
            let reserve_b = core.reserves.reserve_b();
            check_request(amount_a_out, amount_b_out, reserve_a, reserve_b)?;
            if core.is_own_account(&to) {
                return Err(AmmError::InvalidRecipient);
            }

            core.pay_out(ledger, &to, amount_a_out, amount_b_out)?;
            let flash = FlashSwap {
                pair: core.address,
                initiator: ctx.caller,
                amount_a_out,
                amount_b_out,
                data,
            };
            callback::dispatch(callee, &mut *ledger, &flash)?;

            let (balance_a, balance_b) = core.balances(ledger);
            let amount_a_in = amount_in(balance_a, reserve_a, amount_a_out);
            let amount_b_in = amount_in(balance_b, reserve_b, amount_b_out);
            if amount_a_in.is_zero() && amount_b_in.is_zero() {
                return Err(AmmError::InsufficientInputAmount);
            }
            let fee = fees.swap_fee(&core.address)?;
            check_invariant(
                balance_a,
                balance_b,
                amount_a_in,
                amount_b_in,
                reserve_a,
                reserve_b,
                fee,
            )?;

            core.update(balance_a, balance_b, ctx.now, events)?;
            core.gate.record_swap(ctx.caller, ctx.now);
            events.push(PairEvent::Swap {
                sender: ctx.caller,
                amount_a_in,
                amount_b_in,
                amount_a_out,
                amount_b_out,
                to,
            });
            Ok(SwapReceipt {
                amount_a_in,
                amount_b_in,
                amount_a_out,
                amount_b_out,
            })
        })?;
        debug!(
            pair = %self.core.address,
            sender = %ctx.caller,
            a_in = %receipt.amount_a_in,
            b_in = %receipt.amount_b_in,
            a_out = %receipt.amount_a_out,
            b_out = %receipt.amount_b_out,
            flash = !data.is_empty(),
            "swap committed"
        );
        Ok(receipt)
    }

    // -- reconciliation -----------------------------------------------------

    /// Overwrites the reserves with the current balances.
    ///
    /// # Errors
    ///
    /// Gate rejections, or [`AmmError::Overflow`] if a balance exceeds the
    /// reserve range (use [`skim`](Self::skim) first).
    pub fn sync<L: AssetLedger + ?Sized>(
        &mut self,
        ctx: &CallContext,
        ledger: &mut L,
    ) -> Result<(), AmmError> {
        self.transact("sync", ledger, |core, ledger, events| {
            core.gate.check_access(&ctx.caller)?;
            let (balance_a, balance_b) = core.balances(ledger);
            core.update(balance_a, balance_b, ctx.now, events)
        })?;
        debug!(pair = %self.core.address, "sync committed");
        Ok(())
    }

    /// Sends any balance above the recorded reserves to `to`.
    ///
    /// Returns the amounts sent.
    ///
    /// # Errors
    ///
    /// Gate rejections.
    pub fn skim<L: AssetLedger + ?Sized>(
        &mut self,
        ctx: &CallContext,
        ledger: &mut L,
        to: AccountId,
    ) -> Result<(Amount, Amount), AmmError> {
        let (excess_a, excess_b) = self.transact("skim", ledger, |core, ledger, _events| {
            core.gate.check_access(&ctx.caller)?;
            let (balance_a, balance_b) = core.balances(ledger);
            let excess_a = balance_a.saturating_sub(&core.reserves.reserve_a());
            let excess_b = balance_b.saturating_sub(&core.reserves.reserve_b());
            core.pay_out(ledger, &to, excess_a, excess_b)?;
            Ok((excess_a, excess_b))
        })?;
        debug!(pair = %self.core.address, to = %to, %excess_a, %excess_b, "skim committed");
        Ok((excess_a, excess_b))
    }

    // -- administration -----------------------------------------------------

    /// Grants or revokes `account`'s access to the mutating entry points.
    ///
    /// # Errors
    ///
    /// [`AmmError::Unauthorized`] unless called by the factory.
    pub fn set_authorization(
        &mut self,
        ctx: &CallContext,
        account: AccountId,
        authorized: bool,
    ) -> Result<(), AmmError> {
        self.core
            .gate
            .set_authorization(&ctx.caller, account, authorized)?;
        self.events.push(PairEvent::AuthorizationChanged {
            account,
            authorized,
        });
        info!(pair = %self.core.address, %account, authorized, "authorization changed");
        Ok(())
    }

    /// Changes the largest output a single swap may take of either asset.
    ///
    /// # Errors
    ///
    /// [`AmmError::Unauthorized`] unless called by the factory;
    /// [`AmmError::InvalidConfiguration`] for a zero or oversized limit.
    pub fn set_max_swap_amount(&mut self, ctx: &CallContext, amount: Amount) -> Result<(), AmmError> {
        self.core.gate.set_max_swap_amount(&ctx.caller, amount)?;
        self.events.push(PairEvent::MaxSwapAmountChanged { amount });
        info!(pair = %self.core.address, %amount, "max swap amount changed");
        Ok(())
    }

    /// Changes the minimum interval between two swaps of one caller.
    ///
    /// # Errors
    ///
    /// [`AmmError::Unauthorized`] unless called by the factory.
    pub fn set_swap_cooldown(&mut self, ctx: &CallContext, seconds: u64) -> Result<(), AmmError> {
        self.core.gate.set_swap_cooldown(&ctx.caller, seconds)?;
        self.events.push(PairEvent::SwapCooldownChanged { seconds });
        info!(pair = %self.core.address, seconds, "swap cooldown changed");
        Ok(())
    }

    /// Freezes mint, burn, swap, sync and skim.  No-op if already paused.
    ///
    /// # Errors
    ///
    /// [`AmmError::Unauthorized`] unless called by the factory.
    pub fn pause(&mut self, ctx: &CallContext) -> Result<(), AmmError> {
        if self.core.gate.transition(&ctx.caller, GateState::Paused)? {
            self.events.push(PairEvent::Paused { at: ctx.now });
            info!(pair = %self.core.address, at = %ctx.now, "pair paused");
        }
        Ok(())
    }

    /// Lifts a pause.  No-op if not paused.
    ///
    /// # Errors
    ///
    /// [`AmmError::Unauthorized`] unless called by the factory.
    pub fn unpause(&mut self, ctx: &CallContext) -> Result<(), AmmError> {
        if self.core.gate.transition(&ctx.caller, GateState::Active)? {
            self.events.push(PairEvent::Unpaused { at: ctx.now });
            info!(pair = %self.core.address, at = %ctx.now, "pair unpaused");
        }
        Ok(())
    }

    // -- shares -------------------------------------------------------------

    /// Moves the caller's shares to `to`.  Not affected by pause.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientBalance`] if the caller holds fewer shares.
    pub fn transfer_shares(
        &mut self,
        ctx: &CallContext,
        to: AccountId,
        amount: Shares,
    ) -> Result<(), AmmError> {
        self.core.shares.transfer(&ctx.caller, &to, amount)
    }

    /// Lets `spender` move up to `amount` of the caller's shares.
    pub fn approve(&mut self, ctx: &CallContext, spender: AccountId, amount: Shares) {
        self.core.shares.approve(&ctx.caller, &spender, amount);
    }

    /// Moves `from`'s shares to `to` using the caller's allowance.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientAllowance`] or
    /// [`AmmError::InsufficientBalance`].
    pub fn transfer_shares_from(
        &mut self,
        ctx: &CallContext,
        from: AccountId,
        to: AccountId,
        amount: Shares,
    ) -> Result<(), AmmError> {
        self.core
            .shares
            .transfer_from(&ctx.caller, &from, &to, amount)
    }

    // -- views --------------------------------------------------------------

    /// The pair's account on the asset ledger.
    #[must_use]
    pub const fn address(&self) -> AccountId {
        self.core.address
    }

    /// The traded assets.
    #[must_use]
    pub const fn assets(&self) -> &AssetPair {
        &self.core.assets
    }

    /// The controlling factory.
    #[must_use]
    pub const fn factory(&self) -> AccountId {
        self.core.gate.factory()
    }

    /// Recorded reserves and last sync time.
    #[must_use]
    pub const fn reserves(&self) -> &ReserveLedger {
        &self.core.reserves
    }

    /// Both price accumulators.
    #[must_use]
    pub const fn price_accumulator(&self) -> &PriceAccumulator {
        &self.core.oracle
    }

    /// Cumulative price of A in B as of the last update.
    #[must_use]
    pub const fn price_a_cumulative(&self) -> U256 {
        self.core.oracle.price_a_cumulative()
    }

    /// Cumulative price of B in A as of the last update.
    #[must_use]
    pub const fn price_b_cumulative(&self) -> U256 {
        self.core.oracle.price_b_cumulative()
    }

    /// Reserve product after the last liquidity event (zero with the
    /// protocol fee off).
    #[must_use]
    pub const fn k_last(&self) -> U256 {
        self.core.k_last
    }

    /// Outstanding shares.
    #[must_use]
    pub const fn total_shares(&self) -> Shares {
        self.core.shares.total_supply()
    }

    /// The share table.
    #[must_use]
    pub const fn shares(&self) -> &ShareLedger {
        &self.core.shares
    }

    /// The security gate.
    #[must_use]
    pub const fn gate(&self) -> &SecurityGate {
        &self.core.gate
    }

    /// `true` while paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.core.gate.is_paused()
    }

    /// `true` if `account` was explicitly authorized by the factory.
    #[must_use]
    pub fn is_authorized(&self, account: &AccountId) -> bool {
        self.core.gate.is_authorized(account)
    }

    /// Time of `caller`'s last committed swap.
    #[must_use]
    pub fn last_swap_time(&self, caller: &AccountId) -> Option<Timestamp> {
        self.core.gate.last_swap_time(caller)
    }

    /// Events of committed calls not yet drained.
    #[must_use]
    pub fn events(&self) -> &[PairEvent] {
        &self.events
    }

    /// Takes the pending events.
    pub fn drain_events(&mut self) -> Vec<PairEvent> {
        mem::take(&mut self.events)
    }
}
