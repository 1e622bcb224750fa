//! The registry that creates pairs and routes calls to them.

use std::cell::{Ref, RefCell};
use std::collections::BTreeMap;

use tracing::info;

use crate::config::PairConfig;
use crate::domain::{
    AccountId, Amount, AssetPair, BurnReceipt, FeeTier, MintReceipt, PairEvent, Shares,
    SwapReceipt,
};
use crate::error::AmmError;
use crate::pair::{lock, CallContext, Pair, SwapRequest};
use crate::traits::{AssetLedger, FeePolicy, SwapCallee};

/// Domain separator for pair address derivation.
pub const PAIR_ADDRESS_DOMAIN: &[u8] = b"PAIRSWAP_PAIR_V1";

/// Derives the address of the pair for `assets` hosted by `registry`.
///
/// `blake3(domain || registry || asset_a || asset_b)`; the asset pair is
/// canonical, so argument order never changes the address.
#[must_use]
pub fn derive_pair_address(registry: &AccountId, assets: &AssetPair) -> AccountId {
    use blake3::Hasher;

    let mut hasher = Hasher::new();
    hasher.update(PAIR_ADDRESS_DOMAIN);
    hasher.update(registry.as_bytes());
    hasher.update(assets.asset_a().as_bytes());
    hasher.update(assets.asset_b().as_bytes());

    let hash = hasher.finalize();
    AccountId::from_bytes(*hash.as_bytes())
}

#[derive(Debug)]
struct Entry {
    pair: RefCell<Pair>,
    fee_tier: FeeTier,
}

/// Hosts pairs keyed by address and acts as their factory.
///
/// The registry's own account controls every pair it creates: it is the
/// account the pairs' security gates recognise as factory.  Administrative
/// calls arrive with the registry admin as caller and are forwarded with
/// the registry account.
///
/// Routed calls take `&self` and share one reentrancy scope across every
/// hosted pair.  While a call is in progress, including a flash-swap
/// callback, any further routed call on any pair fails with
/// [`AmmError::ReentrantCall`], so a failed swap never leaves committed
/// changes behind in another pair.  [`pair`](Self::pair) reads remain
/// available for pairs other than the one being called.
///
/// # Example
///
/// ```
/// use pairswap::assets::InMemoryAssetLedger;
/// use pairswap::config::{PairConfig, SecurityConfig};
/// use pairswap::domain::{AccountId, Amount, AssetId, AssetPair, FeeTier, Timestamp};
/// use pairswap::factory::PairRegistry;
/// use pairswap::pair::CallContext;
///
/// let admin = AccountId::from_bytes([0xad; 32]);
/// let mut registry = PairRegistry::new(AccountId::from_bytes([0xfa; 32]), admin);
/// let assets = AssetPair::new(AssetId::from_bytes([1; 32]), AssetId::from_bytes([2; 32]))
///     .expect("distinct");
/// let config = PairConfig::new(assets, FeeTier::TIER_0_05_PERCENT, SecurityConfig::default())
///     .expect("valid");
///
/// let ctx = CallContext::new(admin, Timestamp::from_secs(0));
/// let address = registry.create_pair(&ctx, config).expect("created");
/// assert_eq!(registry.pair_address(&assets), Some(address));
/// assert_eq!(registry.fee_tier(&address), Ok(FeeTier::TIER_0_05_PERCENT));
///
/// let mut ledger = InMemoryAssetLedger::new();
/// ledger.credit(&assets.asset_a(), &address, Amount::new(5_000)).expect("fits");
/// ledger.credit(&assets.asset_b(), &address, Amount::new(5_000)).expect("fits");
/// let minted = registry.mint(&ctx, &mut ledger, &address, admin);
/// // the admin is not an authorized liquidity provider on the pair itself
/// assert!(minted.is_err());
/// ```
#[derive(Debug)]
pub struct PairRegistry {
    account: AccountId,
    admin: AccountId,
    fee_to: Option<AccountId>,
    pairs: BTreeMap<AccountId, Entry>,
    by_assets: BTreeMap<AssetPair, AccountId>,
    scope: RefCell<()>,
}

impl PairRegistry {
    /// An empty registry acting as `account`, administered by `admin`.
    #[must_use]
    pub const fn new(account: AccountId, admin: AccountId) -> Self {
        Self {
            account,
            admin,
            fee_to: None,
            pairs: BTreeMap::new(),
            by_assets: BTreeMap::new(),
            scope: RefCell::new(()),
        }
    }

    /// The registry's own account, the factory of every hosted pair.
    #[must_use]
    pub const fn account(&self) -> AccountId {
        self.account
    }

    /// The administrator.
    #[must_use]
    pub const fn admin(&self) -> AccountId {
        self.admin
    }

    /// Protocol-fee recipient, if the skim is on.
    #[must_use]
    pub const fn fee_to(&self) -> Option<AccountId> {
        self.fee_to
    }

    /// Number of hosted pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// `true` if no pair has been created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Address of the pair trading `assets`, if created.
    #[must_use]
    pub fn pair_address(&self, assets: &AssetPair) -> Option<AccountId> {
        self.by_assets.get(assets).copied()
    }

    /// Addresses of all hosted pairs.
    #[must_use]
    pub fn pair_addresses(&self) -> impl Iterator<Item = &AccountId> + '_ {
        self.pairs.keys()
    }

    /// Creates the pair described by `config`.
    ///
    /// Creation is open to any caller.  The pair is initialized with the
    /// registry account as its factory.
    ///
    /// # Errors
    ///
    /// - Anything [`PairConfig::validate`] reports.
    /// - [`AmmError::PairExists`] if the assets already have a pair.
    pub fn create_pair(&mut self, ctx: &CallContext, config: PairConfig) -> Result<AccountId, AmmError> {
        config.validate()?;
        let assets = *config.assets();
        if self.by_assets.contains_key(&assets) {
            return Err(AmmError::PairExists);
        }
        let address = derive_pair_address(&self.account, &assets);
        if self.pairs.contains_key(&address) {
            return Err(AmmError::PairExists);
        }
        let fee_tier = config.fee_tier();
        let pair = Pair::initialize(&self.as_factory(ctx), address, config)?;
        self.pairs.insert(
            address,
            Entry {
                pair: RefCell::new(pair),
                fee_tier,
            },
        );
        self.by_assets.insert(assets, address);
        info!(pair = %address, creator = %ctx.caller, fee = %fee_tier, "pair created");
        Ok(address)
    }

    /// Swap fee currently charged by `pair`.
    ///
    /// # Errors
    ///
    /// [`AmmError::PairNotFound`].
    pub fn fee_tier(&self, pair: &AccountId) -> Result<FeeTier, AmmError> {
        self.entry(pair).map(|entry| entry.fee_tier)
    }

    /// Retunes the fee of `pair`; takes effect on the next swap.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Unauthorized`] unless called by the admin.
    /// - [`AmmError::InvalidFee`] for a non-standard tier.
    /// - [`AmmError::PairNotFound`].
    pub fn set_fee_tier(
        &mut self,
        ctx: &CallContext,
        pair: &AccountId,
        fee_tier: FeeTier,
    ) -> Result<(), AmmError> {
        self.require_admin(ctx)?;
        if !fee_tier.is_standard() {
            return Err(AmmError::InvalidFee("fee tier must be 1, 5, 30 or 100 bps"));
        }
        let entry = self.pairs.get_mut(pair).ok_or(AmmError::PairNotFound)?;
        entry.fee_tier = fee_tier;
        info!(pair = %pair, fee = %fee_tier, "fee tier changed");
        Ok(())
    }

    /// Switches the protocol-fee skim on (`Some`) or off (`None`).
    ///
    /// # Errors
    ///
    /// [`AmmError::Unauthorized`] unless called by the admin.
    pub fn set_fee_to(&mut self, ctx: &CallContext, fee_to: Option<AccountId>) -> Result<(), AmmError> {
        self.require_admin(ctx)?;
        self.fee_to = fee_to;
        info!(fee_to = ?fee_to, "protocol fee recipient changed");
        Ok(())
    }

    // -- routed pair calls --------------------------------------------------

    /// [`Pair::mint`] on `pair`.
    ///
    /// # Errors
    ///
    /// [`AmmError::PairNotFound`], [`AmmError::ReentrantCall`], or
    /// anything the pair reports.
    pub fn mint<L: AssetLedger + ?Sized>(
        &self,
        ctx: &CallContext,
        ledger: &mut L,
        pair: &AccountId,
        to: AccountId,
    ) -> Result<MintReceipt, AmmError> {
        self.with_pair(pair, |p| p.mint(ctx, ledger, self, to))
    }

    /// [`Pair::burn`] on `pair`.
    ///
    /// # Errors
    ///
    /// As [`mint`](Self::mint).
    pub fn burn<L: AssetLedger + ?Sized>(
        &self,
        ctx: &CallContext,
        ledger: &mut L,
        pair: &AccountId,
        to: AccountId,
    ) -> Result<BurnReceipt, AmmError> {
        self.with_pair(pair, |p| p.burn(ctx, ledger, self, to))
    }

    /// [`Pair::swap`] on `pair`, with the fee looked up here.
    ///
    /// # Errors
    ///
    /// As [`mint`](Self::mint).
    pub fn swap<L: AssetLedger + ?Sized>(
        &self,
        ctx: &CallContext,
        ledger: &mut L,
        pair: &AccountId,
        request: SwapRequest<'_>,
        callee: Option<&mut dyn SwapCallee<L>>,
    ) -> Result<SwapReceipt, AmmError> {
        self.with_pair(pair, |p| p.swap(ctx, ledger, self, request, callee))
    }

    /// [`Pair::sync`] on `pair`.
    ///
    /// # Errors
    ///
    /// As [`mint`](Self::mint).
    pub fn sync<L: AssetLedger + ?Sized>(
        &self,
        ctx: &CallContext,
        ledger: &mut L,
        pair: &AccountId,
    ) -> Result<(), AmmError> {
        self.with_pair(pair, |p| p.sync(ctx, ledger))
    }

    /// [`Pair::skim`] on `pair`.
    ///
    /// # Errors
    ///
    /// As [`mint`](Self::mint).
    pub fn skim<L: AssetLedger + ?Sized>(
        &self,
        ctx: &CallContext,
        ledger: &mut L,
        pair: &AccountId,
        to: AccountId,
    ) -> Result<(Amount, Amount), AmmError> {
        self.with_pair(pair, |p| p.skim(ctx, ledger, to))
    }

    /// [`Pair::transfer_shares`] on `pair`.
    ///
    /// # Errors
    ///
    /// As [`mint`](Self::mint).
    pub fn transfer_shares(
        &self,
        ctx: &CallContext,
        pair: &AccountId,
        to: AccountId,
        amount: Shares,
    ) -> Result<(), AmmError> {
        self.with_pair(pair, |p| p.transfer_shares(ctx, to, amount))
    }

    /// [`Pair::approve`] on `pair`.
    ///
    /// # Errors
    ///
    /// [`AmmError::PairNotFound`] or [`AmmError::ReentrantCall`].
    pub fn approve(
        &self,
        ctx: &CallContext,
        pair: &AccountId,
        spender: AccountId,
        amount: Shares,
    ) -> Result<(), AmmError> {
        self.with_pair(pair, |p| {
            p.approve(ctx, spender, amount);
            Ok(())
        })
    }

    /// [`Pair::transfer_shares_from`] on `pair`.
    ///
    /// # Errors
    ///
    /// As [`mint`](Self::mint).
    pub fn transfer_shares_from(
        &self,
        ctx: &CallContext,
        pair: &AccountId,
        from: AccountId,
        to: AccountId,
        amount: Shares,
    ) -> Result<(), AmmError> {
        self.with_pair(pair, |p| p.transfer_shares_from(ctx, from, to, amount))
    }

    // -- pair administration ------------------------------------------------

    /// [`Pair::set_authorization`], admin only.
    ///
    /// # Errors
    ///
    /// [`AmmError::Unauthorized`] unless called by the admin, or
    /// anything the pair reports.
    pub fn set_authorization(
        &self,
        ctx: &CallContext,
        pair: &AccountId,
        account: AccountId,
        authorized: bool,
    ) -> Result<(), AmmError> {
        self.require_admin(ctx)?;
        let factory = self.as_factory(ctx);
        self.with_pair(pair, |p| p.set_authorization(&factory, account, authorized))
    }

    /// [`Pair::set_max_swap_amount`], admin only.
    ///
    /// # Errors
    ///
    /// As [`set_authorization`](Self::set_authorization).
    pub fn set_max_swap_amount(
        &self,
        ctx: &CallContext,
        pair: &AccountId,
        amount: Amount,
    ) -> Result<(), AmmError> {
        self.require_admin(ctx)?;
        let factory = self.as_factory(ctx);
        self.with_pair(pair, |p| p.set_max_swap_amount(&factory, amount))
    }

    /// [`Pair::set_swap_cooldown`], admin only.
    ///
    /// # Errors
    ///
    /// As [`set_authorization`](Self::set_authorization).
    pub fn set_swap_cooldown(&self, ctx: &CallContext, pair: &AccountId, seconds: u64) -> Result<(), AmmError> {
        self.require_admin(ctx)?;
        let factory = self.as_factory(ctx);
        self.with_pair(pair, |p| p.set_swap_cooldown(&factory, seconds))
    }

    /// [`Pair::pause`], admin only.
    ///
    /// # Errors
    ///
    /// As [`set_authorization`](Self::set_authorization).
    pub fn pause(&self, ctx: &CallContext, pair: &AccountId) -> Result<(), AmmError> {
        self.require_admin(ctx)?;
        let factory = self.as_factory(ctx);
        self.with_pair(pair, |p| p.pause(&factory))
    }

    /// [`Pair::unpause`], admin only.
    ///
    /// # Errors
    ///
    /// As [`set_authorization`](Self::set_authorization).
    pub fn unpause(&self, ctx: &CallContext, pair: &AccountId) -> Result<(), AmmError> {
        self.require_admin(ctx)?;
        let factory = self.as_factory(ctx);
        self.with_pair(pair, |p| p.unpause(&factory))
    }

    // -- views --------------------------------------------------------------

    /// Read access to `pair`.
    ///
    /// # Errors
    ///
    /// [`AmmError::PairNotFound`], or [`AmmError::ReentrantCall`] while
    /// the pair is inside a call.
    pub fn pair(&self, pair: &AccountId) -> Result<Ref<'_, Pair>, AmmError> {
        self.entry(pair)?
            .pair
            .try_borrow()
            .map_err(|_| AmmError::ReentrantCall)
    }

    /// Takes the pending events of `pair`.
    ///
    /// # Errors
    ///
    /// [`AmmError::PairNotFound`] or [`AmmError::ReentrantCall`].
    pub fn drain_events(&self, pair: &AccountId) -> Result<Vec<PairEvent>, AmmError> {
        self.with_pair(pair, |p| Ok(p.drain_events()))
    }

    fn entry(&self, pair: &AccountId) -> Result<&Entry, AmmError> {
        self.pairs.get(pair).ok_or(AmmError::PairNotFound)
    }

    fn with_pair<T>(
        &self,
        pair: &AccountId,
        call: impl FnOnce(&mut Pair) -> Result<T, AmmError>,
    ) -> Result<T, AmmError> {
        let entry = self.entry(pair)?;
        let _scope = lock(&self.scope)?;
        let mut guard = lock(&entry.pair)?;
        call(&mut guard)
    }

    fn as_factory(&self, ctx: &CallContext) -> CallContext {
        CallContext::new(self.account, ctx.now)
    }

    fn require_admin(&self, ctx: &CallContext) -> Result<(), AmmError> {
        if ctx.caller != self.admin {
            return Err(AmmError::Unauthorized);
        }
        Ok(())
    }
}

impl FeePolicy for PairRegistry {
    fn swap_fee(&self, pair: &AccountId) -> Result<FeeTier, AmmError> {
        self.fee_tier(pair)
    }

    fn protocol_fee_recipient(&self) -> Option<AccountId> {
        self.fee_to
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::assets::InMemoryAssetLedger;
    use crate::config::SecurityConfig;
    use crate::domain::{AssetId, Timestamp};

    fn admin() -> AccountId {
        AccountId::from_bytes([0xad; 32])
    }

    fn lp() -> AccountId {
        AccountId::from_bytes([0x11; 32])
    }

    fn ctx(caller: AccountId) -> CallContext {
        CallContext::new(caller, Timestamp::from_secs(10))
    }

    fn assets(x: u8, y: u8) -> AssetPair {
        let Ok(pair) = AssetPair::new(AssetId::from_bytes([x; 32]), AssetId::from_bytes([y; 32]))
        else {
            panic!("valid assets");
        };
        pair
    }

    fn config(assets: AssetPair) -> PairConfig {
        let Ok(config) = PairConfig::new(assets, FeeTier::TIER_0_30_PERCENT, SecurityConfig::default())
        else {
            panic!("valid config");
        };
        config
    }

    fn registry_with_pair() -> (PairRegistry, AccountId) {
        let mut registry = PairRegistry::new(AccountId::from_bytes([0xfa; 32]), admin());
        let Ok(address) = registry.create_pair(&ctx(lp()), config(assets(1, 2))) else {
            panic!("create");
        };
        (registry, address)
    }

    #[test]
    fn address_is_deterministic_and_order_free() {
        let registry = AccountId::from_bytes([0xfa; 32]);
        let forward = derive_pair_address(&registry, &assets(1, 2));
        let reverse = derive_pair_address(&registry, &assets(2, 1));
        assert_eq!(forward, reverse);
        assert_ne!(forward, derive_pair_address(&registry, &assets(1, 3)));
        assert_ne!(
            forward,
            derive_pair_address(&AccountId::from_bytes([0xfb; 32]), &assets(1, 2))
        );
    }

    #[test]
    fn create_once_per_asset_pair() {
        let (mut registry, address) = registry_with_pair();
        assert_eq!(
            registry.create_pair(&ctx(lp()), config(assets(2, 1))),
            Err(AmmError::PairExists)
        );
        assert_eq!(registry.len(), 1);
        let Ok(pair) = registry.pair(&address) else {
            panic!("pair present");
        };
        assert_eq!(pair.factory(), registry.account());
        assert_eq!(pair.address(), address);
    }

    #[test]
    fn unknown_pair() {
        let (registry, _) = registry_with_pair();
        let missing = AccountId::from_bytes([0x99; 32]);
        assert_eq!(registry.fee_tier(&missing), Err(AmmError::PairNotFound));
        assert!(matches!(registry.pair(&missing), Err(AmmError::PairNotFound)));
    }

    #[test]
    fn fee_tier_changes_are_admin_only_and_standard() {
        let (mut registry, address) = registry_with_pair();
        assert_eq!(
            registry.set_fee_tier(&ctx(lp()), &address, FeeTier::TIER_0_05_PERCENT),
            Err(AmmError::Unauthorized)
        );
        let Ok(tier) = FeeTier::standard(5) else {
            panic!("standard tier");
        };
        assert_eq!(registry.set_fee_tier(&ctx(admin()), &address, tier), Ok(()));
        assert_eq!(registry.swap_fee(&address), Ok(FeeTier::TIER_0_05_PERCENT));
        // deserialization is the only way to a non-standard tier
        let Ok(odd) = serde_json::from_str::<FeeTier>("25") else {
            panic!("deserialize");
        };
        assert!(matches!(
            registry.set_fee_tier(&ctx(admin()), &address, odd),
            Err(AmmError::InvalidFee(_))
        ));
    }

    #[test]
    fn admin_calls_are_forwarded_as_factory() {
        let (mut registry, address) = registry_with_pair();
        assert_eq!(
            registry.set_authorization(&ctx(lp()), &address, lp(), true),
            Err(AmmError::Unauthorized)
        );
        assert_eq!(registry.set_authorization(&ctx(admin()), &address, lp(), true), Ok(()));

        let mut ledger = InMemoryAssetLedger::new();
        let Ok(pair_assets) = registry.pair(&address).map(|p| *p.assets()) else {
            panic!("pair present");
        };
        for asset in [pair_assets.asset_a(), pair_assets.asset_b()] {
            let Ok(()) = ledger.credit(&asset, &address, Amount::new(4_000)) else {
                panic!("credit");
            };
        }
        let Ok(receipt) = registry.mint(&ctx(lp()), &mut ledger, &address, lp()) else {
            panic!("mint");
        };
        assert_eq!(receipt.shares, Shares::new(3_000));

        let Ok(()) = registry.set_fee_to(&ctx(admin()), Some(admin())) else {
            panic!("fee_to");
        };
        assert_eq!(registry.protocol_fee_recipient(), Some(admin()));
        assert!(matches!(
            registry.drain_events(&address).as_deref(),
            Ok([
                PairEvent::AuthorizationChanged { .. },
                PairEvent::Sync { .. },
                PairEvent::Mint { .. }
            ])
        ));
    }
}
