//! # Transfer Collaborators
//!
//! Trait boundaries for the two asset-movement mechanisms the vault
//! depends on but does not implement: the chain's native-asset transfer
//! primitive and the fungible-token standard. Both are synchronous and
//! may call back into the ledger before returning — the ledger's entry
//! guard and debit-before-transfer ordering exist because of exactly
//! that.

use thiserror::Error;

use crate::asset::{AccountId, TokenAddress};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// The native transfer primitive reported failure.
#[derive(Debug, Error)]
#[error("native transfer of {amount} to {dest} failed")]
pub struct TransferFailure {
    /// Intended destination.
    pub dest: AccountId,
    /// Amount that was being sent.
    pub amount: u128,
}

/// A token-contract call reverted or otherwise failed.
///
/// The token's own failure is propagated as-is; the ledger does not
/// translate or classify it.
#[derive(Debug, Error)]
#[error("token {token} call failed: {reason}")]
pub struct TokenCallError {
    /// The token contract that failed.
    pub token: TokenAddress,
    /// Collaborator-supplied failure description.
    pub reason: String,
}

impl TokenCallError {
    /// Convenience constructor.
    pub fn new(token: TokenAddress, reason: impl Into<String>) -> Self {
        Self {
            token,
            reason: reason.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// NativeTransfer
// ---------------------------------------------------------------------------

/// The chain's native-asset send primitive, from the vault's account.
pub trait NativeTransfer: Send + Sync {
    /// Sends `amount` native units to `dest`.
    fn transfer(&self, dest: &AccountId, amount: u128) -> Result<(), TransferFailure>;
}

// ---------------------------------------------------------------------------
// TokenContract
// ---------------------------------------------------------------------------

/// A fungible-token contract with transfer/transferFrom/balanceOf
/// semantics.
///
/// The ledger binds one handle per token address and treats the handle
/// as the authority over that token's custody: the vault's token holdings
/// live inside the token contract, not in the ledger.
pub trait TokenContract: Send + Sync {
    /// The contract's address; also the token's [`AssetId`](crate::asset::AssetId).
    fn address(&self) -> TokenAddress;

    /// Pulls `amount` from `owner` to `recipient` using a prior
    /// allowance. Used for deposits.
    fn transfer_from(
        &self,
        owner: &AccountId,
        recipient: &AccountId,
        amount: u128,
    ) -> Result<(), TokenCallError>;

    /// Sends `amount` from the vault's holding to `dest`. Used for
    /// withdrawals and recovery.
    fn transfer(&self, dest: &AccountId, amount: u128) -> Result<(), TokenCallError>;

    /// Returns `owner`'s balance of this token.
    fn balance_of(&self, owner: &AccountId) -> u128;

    /// The token's decimal precision, if the contract can report it.
    ///
    /// Token contracts may lack the query entirely or revert on it —
    /// `None` covers both. The ledger resolves `None` and `Some(0)` to
    /// [`DEFAULT_TOKEN_DECIMALS`](crate::config::DEFAULT_TOKEN_DECIMALS).
    fn decimals(&self) -> Option<u8>;
}
