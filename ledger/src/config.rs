//! # Ledger Constants
//!
//! Every magic number in the ledger lives here. The unit-of-account
//! precision is part of the external contract of the system — cap values
//! and event payloads are all expressed in it — so changing these after
//! deployment silently re-prices every configured ceiling. Don't.

/// Decimal places of the common unit of account (USD).
///
/// All valuations and the configurable ceiling are integers scaled by
/// `10^USD_DECIMALS`: `1_000_000` is exactly one dollar.
pub const USD_DECIMALS: u8 = 6;

/// Decimal places of the native asset's smallest unit.
///
/// Fixed for the chain the vault custodies; not queried from anywhere.
pub const NATIVE_DECIMALS: u8 = 18;

/// Fallback decimal precision for tokens whose `decimals()` query fails
/// or reports zero.
///
/// This is a deliberate policy, not error swallowing: most fungible-token
/// deployments use 18, and a token that cannot report its precision is
/// still depositable — it just gets valued as if it were 18-decimal.
/// The one blind spot: a token whose real precision is genuinely 0 is
/// indistinguishable from a failed query and will be normalized as
/// 18-decimal.
pub const DEFAULT_TOKEN_DECIMALS: u8 = 18;

/// Multiplier that scales a raw quotient into the common unit of account.
pub const USD_SCALE: u128 = 1_000_000;
