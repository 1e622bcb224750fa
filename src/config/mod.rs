//! Declarative pair blueprints.
//!
//! [`PairConfig`] describes everything a pair is created with; its
//! [`SecurityConfig`] seeds the pair's gate.  Both are serde-friendly so
//! hosts can load them from JSON or TOML; call `validate()` after
//! deserializing, since that path bypasses the validating constructors
//! (the registry always does).

mod pair_config;
mod security_config;

pub use pair_config::PairConfig;
pub use security_config::SecurityConfig;
