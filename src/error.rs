//! Unified error types for the pairswap engine.
//!
//! All fallible operations across the crate return [`AmmError`].  Every
//! variant belongs to exactly one [`ErrorKind`]; only policy rejections
//! can succeed later without the caller changing its inputs.

use thiserror::Error;

use crate::domain::Timestamp;

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, AmmError>;

/// Coarse classification of an [`AmmError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad pair or registry setup.  Fatal, raised once at creation.
    Configuration,
    /// Per-call input problem the caller must correct.
    Validation,
    /// Attempted exploit or logic defect.  Always fatal to the call.
    Invariant,
    /// Rejection that may succeed later with identical inputs.
    Policy,
}

/// Every error the engine can raise.
///
/// Any error aborts the whole call: no partial mutation of pair state or
/// asset balances survives it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmmError {
    // -- configuration ------------------------------------------------------
    /// Both sides of a pair name the same asset.
    #[error("pair requires two distinct assets")]
    IdenticalAssets,

    /// An asset identifier is the all-zero sentinel.
    #[error("asset identifier must be non-zero")]
    ZeroAsset,

    /// The fee tier is not one of the supported tiers.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// A configuration value is out of range or inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// A pair for these assets already exists in the registry.
    #[error("pair already exists")]
    PairExists,

    /// No pair is registered under the given address.
    #[error("pair not found")]
    PairNotFound,

    // -- validation ---------------------------------------------------------
    /// A swap requested no output at all.
    #[error("insufficient output amount")]
    InsufficientOutputAmount,

    /// A swap would drain (or exceed) a reserve.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// The swap recipient is the pair itself or one of its assets.
    #[error("invalid recipient")]
    InvalidRecipient,

    /// Nothing was paid into the pair during a swap.
    #[error("insufficient input amount")]
    InsufficientInputAmount,

    /// A deposit would mint zero shares.
    #[error("insufficient liquidity minted")]
    InsufficientLiquidityMinted,

    /// A withdrawal would return zero of either asset.
    #[error("insufficient liquidity burned")]
    InsufficientLiquidityBurned,

    /// An account does not hold enough of an asset or of shares.
    #[error("insufficient balance: {0}")]
    InsufficientBalance(&'static str),

    /// A delegated share transfer exceeds the approved allowance.
    #[error("insufficient share allowance")]
    InsufficientAllowance,

    /// The call's clock reads earlier than the pair's last reserve update.
    #[error("timestamp {now} precedes last sync at {last_sync}")]
    StaleTimestamp {
        /// Time supplied with the call.
        now: Timestamp,
        /// Time of the last reserve update.
        last_sync: Timestamp,
    },

    // -- invariant ----------------------------------------------------------
    /// The fee-adjusted constant product would decrease.
    #[error("constant-product invariant violated")]
    InvariantViolation,

    /// Arithmetic or reserve-range overflow.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    // -- policy -------------------------------------------------------------
    /// The caller is neither authorized nor the controlling factory.
    #[error("caller is not authorized")]
    Unauthorized,

    /// The pair is paused.
    #[error("pair is paused")]
    PoolPaused,

    /// The caller swapped too recently.
    #[error("swap cooldown active until {retry_at}")]
    CooldownActive {
        /// Earliest time at which the caller may swap again.
        retry_at: Timestamp,
    },

    /// A requested output exceeds the configured per-swap limit.
    #[error("swap amount exceeds configured maximum")]
    MaxSwapAmountExceeded,

    /// A mutating entry point was re-entered while the pair was locked.
    #[error("reentrant call")]
    ReentrantCall,

    // -- callback -----------------------------------------------------------
    /// Callback data was supplied without a callee to receive it.
    #[error("swap callback data supplied without a callee")]
    CallbackUnavailable,

    /// The flash-swap callee failed; the whole swap is aborted.
    #[error("swap callback failed: {0}")]
    CallbackFailed(Box<AmmError>),
}

impl AmmError {
    /// Returns the [`ErrorKind`] this error belongs to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::IdenticalAssets
            | Self::ZeroAsset
            | Self::InvalidFee(_)
            | Self::InvalidConfiguration(_)
            | Self::PairExists
            | Self::PairNotFound => ErrorKind::Configuration,
            Self::InsufficientOutputAmount
            | Self::InsufficientLiquidity
            | Self::InvalidRecipient
            | Self::InsufficientInputAmount
            | Self::InsufficientLiquidityMinted
            | Self::InsufficientLiquidityBurned
            | Self::InsufficientBalance(_)
            | Self::InsufficientAllowance
            | Self::StaleTimestamp { .. }
            | Self::CallbackUnavailable => ErrorKind::Validation,
            Self::InvariantViolation
            | Self::Overflow(_)
            | Self::Underflow(_)
            | Self::DivisionByZero => ErrorKind::Invariant,
            Self::Unauthorized
            | Self::PoolPaused
            | Self::CooldownActive { .. }
            | Self::MaxSwapAmountExceeded
            | Self::ReentrantCall => ErrorKind::Policy,
            Self::CallbackFailed(inner) => inner.kind(),
        }
    }

    /// Returns `true` if the same call may succeed later unchanged.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Policy
    }
}
