//! Access control, pause switch, swap limits and per-caller cooldown.
//!
//! # Check order
//!
//! Every mutating pair call is vetted in this order, and the first
//! failing check decides the error:
//!
//! 1. reentrancy: the pair is not already inside a call ([`lock`])
//! 2. pause: the gate is [`GateState::Active`]
//! 3. authorization: the caller is authorized or is the factory
//! 4. swap limits: each output is at most the configured maximum
//! 5. cooldown: `now >= last_swap + cooldown`
//!
//! Steps 4 and 5 apply to swaps only.
//!
//! # State machine
//!
//! ```text
//!          pause()
//! Active ──────────▶ Paused
//!    ▲                  │
//!    └──────────────────┘
//!          unpause()
//! ```

use std::cell::{RefCell, RefMut};
use std::collections::{BTreeMap, BTreeSet};

use crate::config::SecurityConfig;
use crate::domain::{AccountId, Amount, Timestamp};
use crate::error::AmmError;

/// Whether a pair accepts mutating calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GateState {
    /// Normal operation.
    #[default]
    Active,
    /// Mint, burn, swap, sync and skim are rejected.
    Paused,
}

/// Enters the reentrancy scope guarded by `cell`.
///
/// The scope lasts as long as the returned guard; a second attempt while
/// it is held fails.
///
/// # Errors
///
/// [`AmmError::ReentrantCall`] if the scope is already held.
pub fn lock<T>(cell: &RefCell<T>) -> Result<RefMut<'_, T>, AmmError> {
    cell.try_borrow_mut().map_err(|_| AmmError::ReentrantCall)
}

/// The security state of one pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityGate {
    factory: AccountId,
    state: GateState,
    authorized: BTreeSet<AccountId>,
    max_swap_amount: Amount,
    cooldown_seconds: u64,
    last_swap: BTreeMap<AccountId, Timestamp>,
}

impl SecurityGate {
    /// An active gate controlled by `factory`.
    #[must_use]
    pub fn new(factory: AccountId, config: &SecurityConfig) -> Self {
        Self {
            factory,
            state: GateState::Active,
            authorized: BTreeSet::new(),
            max_swap_amount: config.max_swap_amount(),
            cooldown_seconds: config.cooldown_seconds(),
            last_swap: BTreeMap::new(),
        }
    }

    /// The controlling factory account.
    #[must_use]
    pub const fn factory(&self) -> AccountId {
        self.factory
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> GateState {
        self.state
    }

    /// `true` while paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.state == GateState::Paused
    }

    /// `true` if `account` is explicitly authorized.
    #[must_use]
    pub fn is_authorized(&self, account: &AccountId) -> bool {
        self.authorized.contains(account)
    }

    /// Largest output a single swap may take of either asset.
    #[must_use]
    pub const fn max_swap_amount(&self) -> Amount {
        self.max_swap_amount
    }

    /// Minimum seconds between two swaps of one caller.
    #[must_use]
    pub const fn cooldown_seconds(&self) -> u64 {
        self.cooldown_seconds
    }

    /// Time of `caller`'s last committed swap.
    #[must_use]
    pub fn last_swap_time(&self, caller: &AccountId) -> Option<Timestamp> {
        self.last_swap.get(caller).copied()
    }

    /// Vets a mint, burn, sync or skim.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolPaused`] or [`AmmError::Unauthorized`].
    pub fn check_access(&self, caller: &AccountId) -> Result<(), AmmError> {
        if self.is_paused() {
            return Err(AmmError::PoolPaused);
        }
        if *caller != self.factory && !self.authorized.contains(caller) {
            return Err(AmmError::Unauthorized);
        }
        Ok(())
    }

    /// Vets a swap.
    ///
    /// # Errors
    ///
    /// Anything [`check_access`](Self::check_access) reports, then
    /// [`AmmError::MaxSwapAmountExceeded`] or
    /// [`AmmError::CooldownActive`].
    pub fn check_swap(
        &self,
        caller: &AccountId,
        amount_a_out: Amount,
        amount_b_out: Amount,
        now: Timestamp,
    ) -> Result<(), AmmError> {
        self.check_access(caller)?;
        if amount_a_out > self.max_swap_amount || amount_b_out > self.max_swap_amount {
            return Err(AmmError::MaxSwapAmountExceeded);
        }
        if let Some(last) = self.last_swap.get(caller) {
            let retry_at = last.saturating_add_secs(self.cooldown_seconds);
            if now < retry_at {
                return Err(AmmError::CooldownActive { retry_at });
            }
        }
        Ok(())
    }

    /// Stamps a committed swap for the cooldown.
    pub fn record_swap(&mut self, caller: AccountId, now: Timestamp) {
        self.last_swap.insert(caller, now);
    }

    /// Grants or revokes access for `account`.
    ///
    /// # Errors
    ///
    /// [`AmmError::Unauthorized`] unless `caller` is the factory.
    pub fn set_authorization(
        &mut self,
        caller: &AccountId,
        account: AccountId,
        authorized: bool,
    ) -> Result<(), AmmError> {
        self.require_factory(caller)?;
        if authorized {
            self.authorized.insert(account);
        } else {
            self.authorized.remove(&account);
        }
        Ok(())
    }

    /// Changes the per-swap output limit.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Unauthorized`] unless `caller` is the factory.
    /// - [`AmmError::InvalidConfiguration`] for a zero or out-of-range
    ///   limit.
    pub fn set_max_swap_amount(&mut self, caller: &AccountId, amount: Amount) -> Result<(), AmmError> {
        self.require_factory(caller)?;
        SecurityConfig::new(amount, self.cooldown_seconds)?;
        self.max_swap_amount = amount;
        Ok(())
    }

    /// Changes the swap cooldown.
    ///
    /// # Errors
    ///
    /// [`AmmError::Unauthorized`] unless `caller` is the factory.
    pub fn set_swap_cooldown(&mut self, caller: &AccountId, seconds: u64) -> Result<(), AmmError> {
        self.require_factory(caller)?;
        self.cooldown_seconds = seconds;
        Ok(())
    }

    /// Moves to `target`; returns `true` if the state changed.
    ///
    /// # Errors
    ///
    /// [`AmmError::Unauthorized`] unless `caller` is the factory.
    pub fn transition(&mut self, caller: &AccountId, target: GateState) -> Result<bool, AmmError> {
        self.require_factory(caller)?;
        let changed = self.state != target;
        self.state = target;
        Ok(changed)
    }

    fn require_factory(&self, caller: &AccountId) -> Result<(), AmmError> {
        if *caller != self.factory {
            return Err(AmmError::Unauthorized);
        }
        Ok(())
    }
}
