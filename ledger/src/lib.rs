// Copyright (c) 2026 Strongroom Labs. MIT License.
// See LICENSE for details.

//! # Strongroom — Multi-Asset Vault Ledger
//!
//! A custodial ledger that tracks per-owner, per-asset balances for a
//! native asset and an open set of fungible tokens, enforces a global
//! valuation ceiling denominated in USD, and gates every configuration
//! mutation behind a two-role access model.
//!
//! ## Architecture
//!
//! The crate is split into modules that mirror the actual concerns of a
//! custody system:
//!
//! - **asset** — Asset identifiers: the native sentinel and token addresses.
//! - **balance** — The authoritative (asset, owner) → amount table.
//! - **price** — Price-feed boundary and fixed-point USD conversion.
//! - **external** — Transfer collaborator traits (native + token standard).
//! - **roles** — Two-role registry: admin (superset) and pauser (reserved).
//! - **events** — Serializable audit records for off-chain consumers.
//! - **ledger** — The [`VaultLedger`] itself: deposits, withdrawals,
//!   cap enforcement, and the admin surface.
//! - **config** — Unit-of-account constants.
//!
//! ## Design Philosophy
//!
//! 1. All amounts are `u128` in smallest-unit denomination. No floating
//!    point anywhere near money.
//! 2. Checked arithmetic everywhere — overflow fails loudly, never wraps.
//! 3. Checks-effects-interactions: internal state is fully settled before
//!    any collaborator is called, and withdrawals run under a
//!    single-entry guard so re-entrant calls cannot double-spend.
//! 4. Every failure is a typed error carrying the values a caller (or a
//!    test) needs to diagnose it.

pub mod asset;
pub mod balance;
pub mod config;
pub mod events;
pub mod external;
pub mod ledger;
pub mod price;
pub mod roles;

pub use asset::{AccountId, AssetId, TokenAddress};
pub use balance::{BalanceError, BalanceTable};
pub use events::{EventRecord, LedgerEvent};
pub use external::{NativeTransfer, TokenCallError, TokenContract, TransferFailure};
pub use ledger::{LedgerConfig, LedgerError, VaultLedger};
pub use price::{PriceError, PriceFeed, PriceFeedError, PriceQuote};
pub use roles::{Role, RoleRegistry};
