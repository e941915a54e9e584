//! # Balance Store
//!
//! The authoritative mapping of (asset, owner) → amount, in each asset's
//! smallest native unit. This is the leaf of the whole system: it never
//! calls a collaborator, never consults a price, never checks a role. It
//! only enforces the two local invariants that make everything above it
//! sound — credits cannot overflow, and debits cannot exceed the stored
//! balance.
//!
//! Entries spring into existence on first credit (default zero) and are
//! never removed, only decremented back toward zero. The invariant the
//! [`VaultLedger`](crate::ledger::VaultLedger) maintains on top: the sum
//! of owner balances for an asset never exceeds the vault's actually
//! custodied amount of that asset.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::asset::{AccountId, AssetId};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur during balance-table operations.
#[derive(Debug, Error)]
pub enum BalanceError {
    /// Attempted to debit more than the available balance.
    #[error("insufficient balance: available {available}, requested {requested} (asset {asset})")]
    InsufficientBalance {
        /// The asset being debited.
        asset: AssetId,
        /// The owner's current balance.
        available: u128,
        /// The amount that was requested.
        requested: u128,
    },

    /// Arithmetic overflow during a credit operation.
    #[error("balance overflow: current {current}, credit {credit} (asset {asset})")]
    Overflow {
        /// The asset being credited.
        asset: AssetId,
        /// The balance before the failed credit.
        current: u128,
        /// The amount that caused the overflow.
        credit: u128,
    },
}

// ---------------------------------------------------------------------------
// BalanceTable
// ---------------------------------------------------------------------------

/// Per-asset, per-owner balance table.
///
/// Internally `asset → (owner → amount)`. All mutation goes through
/// [`credit`](Self::credit) and [`debit`](Self::debit); reads default to
/// zero for unknown pairs. Synchronization is handled by the owning
/// ledger — the table itself is plain data.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BalanceTable {
    /// Balances keyed by asset, then owner.
    #[serde(with = "crate::asset::asset_id_map")]
    balances: HashMap<AssetId, HashMap<AccountId, u128>>,
}

impl BalanceTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `amount` to `(asset, owner)`, creating the entry if needed.
    ///
    /// Returns the new balance.
    ///
    /// # Errors
    ///
    /// Returns [`BalanceError::Overflow`] if the credit would exceed
    /// `u128::MAX`.
    pub fn credit(
        &mut self,
        asset: AssetId,
        owner: &AccountId,
        amount: u128,
    ) -> Result<u128, BalanceError> {
        let entry = self
            .balances
            .entry(asset)
            .or_default()
            .entry(owner.clone())
            .or_insert(0);

        let new_amount = entry.checked_add(amount).ok_or(BalanceError::Overflow {
            asset,
            current: *entry,
            credit: amount,
        })?;

        *entry = new_amount;
        Ok(new_amount)
    }

    /// Debits `amount` from `(asset, owner)`.
    ///
    /// Returns the remaining balance.
    ///
    /// # Errors
    ///
    /// Returns [`BalanceError::InsufficientBalance`] if `amount` exceeds
    /// the stored balance (a missing entry counts as zero).
    pub fn debit(
        &mut self,
        asset: AssetId,
        owner: &AccountId,
        amount: u128,
    ) -> Result<u128, BalanceError> {
        let available = self.read(asset, owner);
        if amount > available {
            return Err(BalanceError::InsufficientBalance {
                asset,
                available,
                requested: amount,
            });
        }

        // The entry exists whenever available > 0; a zero-amount debit of
        // a missing entry is a no-op.
        if let Some(entry) = self
            .balances
            .get_mut(&asset)
            .and_then(|owners| owners.get_mut(owner))
        {
            *entry -= amount;
            Ok(*entry)
        } else {
            Ok(0)
        }
    }

    /// Returns the balance for `(asset, owner)`, zero for unknown pairs.
    pub fn read(&self, asset: AssetId, owner: &AccountId) -> u128 {
        self.balances
            .get(&asset)
            .and_then(|owners| owners.get(owner))
            .copied()
            .unwrap_or(0)
    }

    /// Returns the sum of all owner balances for one asset.
    ///
    /// This is the internally-accounted total, which must never exceed
    /// the vault's custodied amount of the asset.
    pub fn total_for_asset(&self, asset: AssetId) -> u128 {
        self.balances
            .get(&asset)
            .map(|owners| owners.values().sum())
            .unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
