//! # Vault Ledger
//!
//! The component everything else in this crate exists to serve: a
//! custodial vault tracking per-owner balances for the native asset and
//! any bound fungible token, enforcing a global USD valuation ceiling on
//! deposits, and gating configuration behind the admin role.
//!
//! ## Operation ordering
//!
//! Deposits: validate → value → cap check → credit → (tokens) pull
//! transfer-in. Withdrawals: validate → debit → transfer-out. Internal
//! state is always settled before a transfer collaborator runs, with
//! deposit's pull-transfer as the one documented exception — it must
//! follow the credit, and a pull failure rolls the credit back, so the
//! call as a whole is still atomic.
//!
//! ## Re-entrancy
//!
//! Transfer collaborators are synchronous and may call back into the
//! ledger before returning. A single [`AtomicBool`] entry flag covers
//! the whole external-call surface (deposits, withdrawals, recoveries);
//! a nested call into any guarded operation fails with
//! [`LedgerError::ReentrantCall`]. Combined with debit-before-transfer,
//! a re-entrant withdrawal can only ever observe the already-debited
//! balance.
//!
//! ## Valuation policy (narrow, intentional)
//!
//! The running total values only the vault's actually-held native
//! quantity. A token sitting in the vault without a price source
//! contributes nothing; a token with a source is valued only at the
//! moment of its own deposit, never swept into the running total. This
//! mirrors the deployed system's behavior and is preserved as-is rather
//! than silently widened.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use thiserror::Error;
use tracing::info;

use crate::asset::{AccountId, AssetId, TokenAddress};
use crate::balance::{BalanceError, BalanceTable};
use crate::config::{DEFAULT_TOKEN_DECIMALS, NATIVE_DECIMALS};
use crate::events::{EventRecord, LedgerEvent};
use crate::external::{NativeTransfer, TokenCallError, TokenContract, TransferFailure};
use crate::price::{to_usd, PriceError, PriceFeed};
use crate::roles::{Role, RoleRegistry};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur during vault-ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Zero-amount deposits are rejected up front.
    #[error("zero-amount deposits are not permitted")]
    ZeroDeposit,

    /// A balance-table operation failed (insufficient balance, overflow).
    #[error(transparent)]
    Balance(#[from] BalanceError),

    /// A token was asked to convert to USD without a registered source.
    #[error("no price source registered for token {token}")]
    NoPriceSource {
        /// The unpriced token.
        token: TokenAddress,
    },

    /// Valuation failed: feed unavailable, non-positive price, overflow.
    #[error(transparent)]
    Price(#[from] PriceError),

    /// The deposit would push total vault valuation over the ceiling.
    #[error("bank cap exceeded: attempted valuation {attempted}, ceiling {ceiling} (6-decimal USD)")]
    BankCapExceeded {
        /// Current valuation plus the deposit's valuation.
        attempted: u128,
        /// The configured ceiling.
        ceiling: u128,
    },

    /// A native withdrawal exceeded the configured per-call limit.
    #[error("per-call withdrawal limit exceeded: requested {requested}, limit {limit}")]
    PerCallLimitExceeded {
        /// The requested native amount.
        requested: u128,
        /// The configured limit.
        limit: u128,
    },

    /// The caller does not hold the admin role.
    #[error("caller {caller} does not hold the admin role")]
    NotAdmin {
        /// The rejected caller.
        caller: AccountId,
    },

    /// A guarded operation was re-entered from a transfer callback.
    #[error("re-entrant call into a guarded vault operation")]
    ReentrantCall,

    /// The native transfer primitive reported failure.
    #[error(transparent)]
    TransferFailed(#[from] TransferFailure),

    /// A token-contract call failed; the collaborator's own failure is
    /// propagated.
    #[error(transparent)]
    TokenCall(#[from] TokenCallError),

    /// No token contract is bound at this address.
    #[error("no token contract bound at {token}")]
    UnknownToken {
        /// The unbound address.
        token: TokenAddress,
    },

    /// The native asset's price feed is fixed at construction.
    #[error("the native price feed is fixed at construction and cannot be reassigned")]
    NativeFeedFixed,
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Construction-time configuration for a [`VaultLedger`].
#[derive(Clone)]
pub struct LedgerConfig {
    /// Deployer identity; holds both roles from construction.
    pub deployer: AccountId,
    /// The vault's own account, used as the recipient of token pulls.
    pub vault_account: AccountId,
    /// Price feed for the native asset. Required and immutable.
    pub native_price_feed: Arc<dyn PriceFeed>,
    /// The chain's native-asset send primitive.
    pub native_transfer: Arc<dyn NativeTransfer>,
    /// Initial valuation ceiling in 6-decimal USD; 0 disables the cap.
    pub initial_ceiling_usd: u128,
}

/// Mutable interior state, kept behind one lock so cap checks and the
/// mutations they authorize cannot interleave with anything else.
#[derive(Default)]
struct LedgerState {
    balances: BalanceTable,
    /// The vault's actual native-asset holding — the analogue of the
    /// contract's own balance. Includes value received outside the
    /// accounted deposit path, which is exactly what recovery is for.
    native_held: u128,
    token_feeds: HashMap<TokenAddress, Arc<dyn PriceFeed>>,
    tokens: HashMap<TokenAddress, Arc<dyn TokenContract>>,
    decimals_cache: HashMap<TokenAddress, u8>,
    ceiling_usd: u128,
    per_call_limit: u128,
    deposit_count: u64,
    withdraw_count: u64,
}

// ---------------------------------------------------------------------------
// Entry guard
// ---------------------------------------------------------------------------

/// RAII guard for the single-entry flag; clears it on drop, including
/// on every early-return error path.
struct EntryGuard<'a>(&'a AtomicBool);

impl Drop for EntryGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

// ---------------------------------------------------------------------------
// VaultLedger
// ---------------------------------------------------------------------------

/// Multi-asset custodial ledger with USD cap enforcement and role-gated
/// administration.
///
/// Methods take `&self`: state lives behind interior locks so that a
/// collaborator holding a handle to the ledger can attempt a re-entrant
/// call and be refused by the entry guard instead of being made
/// unrepresentable (the refusal is part of the contract and is tested).
pub struct VaultLedger {
    state: RwLock<LedgerState>,
    roles: RwLock<RoleRegistry>,
    events: Mutex<Vec<EventRecord>>,
    entered: AtomicBool,
    native_feed: Arc<dyn PriceFeed>,
    native_transfer: Arc<dyn NativeTransfer>,
    vault_account: AccountId,
}

impl VaultLedger {
    /// Creates a ledger from construction-time configuration.
    pub fn new(config: LedgerConfig) -> Self {
        let state = LedgerState {
            ceiling_usd: config.initial_ceiling_usd,
            ..LedgerState::default()
        };
        Self {
            state: RwLock::new(state),
            roles: RwLock::new(RoleRegistry::bootstrap(&config.deployer)),
            events: Mutex::new(Vec::new()),
            entered: AtomicBool::new(false),
            native_feed: config.native_price_feed,
            native_transfer: config.native_transfer,
            vault_account: config.vault_account,
        }
    }

    // -----------------------------------------------------------------------
    // Deposits
    // -----------------------------------------------------------------------

    /// Deposits native asset. The value is treated as having arrived
    /// with the call itself (there is no pull step for the base
    /// currency).
    ///
    /// Returns the caller's new native balance.
    ///
    /// # Errors
    ///
    /// [`LedgerError::ZeroDeposit`], [`LedgerError::Price`] if the feed
    /// fails or the conversion overflows, [`LedgerError::BankCapExceeded`]
    /// when a nonzero ceiling would be crossed.
    pub fn deposit_native(&self, caller: &AccountId, amount: u128) -> Result<u128, LedgerError> {
        let _guard = self.enter()?;
        if amount == 0 {
            return Err(LedgerError::ZeroDeposit);
        }

        // Value first, then cap, then mutate — all before any external
        // transfer could run (native has none).
        let (held, ceiling) = {
            let state = self.state.read();
            (state.native_held, state.ceiling_usd)
        };
        let quote = self.native_feed.latest_price().map_err(PriceError::from)?;
        let delta_usd = to_usd(amount, quote, NATIVE_DECIMALS)?;
        if ceiling > 0 {
            Self::check_cap(to_usd(held, quote, NATIVE_DECIMALS)?, delta_usd, ceiling)?;
        }

        let new_balance = {
            let mut state = self.state.write();
            let new_held =
                state
                    .native_held
                    .checked_add(amount)
                    .ok_or(BalanceError::Overflow {
                        asset: AssetId::Native,
                        current: state.native_held,
                        credit: amount,
                    })?;
            let new_balance = state.balances.credit(AssetId::Native, caller, amount)?;
            state.native_held = new_held;
            state.deposit_count += 1;
            new_balance
        };

        self.record(LedgerEvent::DepositCompleted {
            actor: caller.clone(),
            asset: AssetId::Native,
            amount,
            usd_value: Some(delta_usd),
        });
        Ok(new_balance)
    }

    /// Deposits a token by pulling `amount` from the caller's allowance.
    ///
    /// If the token has a registered price source the deposit is valued
    /// and cap-checked; if it has none, the cap check is skipped entirely
    /// (the explicit baseline policy) and the deposit succeeds regardless
    /// of vault valuation.
    ///
    /// Returns the caller's new balance for the token.
    ///
    /// # Errors
    ///
    /// [`LedgerError::ZeroDeposit`], [`LedgerError::UnknownToken`],
    /// valuation and cap errors as for native, and the token's own
    /// failure if the pull transfer fails — in which case the credit and
    /// counter are rolled back and the call has no effect.
    pub fn deposit_token(
        &self,
        caller: &AccountId,
        token: TokenAddress,
        amount: u128,
    ) -> Result<u128, LedgerError> {
        let _guard = self.enter()?;
        if amount == 0 {
            return Err(LedgerError::ZeroDeposit);
        }

        let (contract, feed, cached_decimals, held, ceiling) = {
            let state = self.state.read();
            let contract = state
                .tokens
                .get(&token)
                .cloned()
                .ok_or(LedgerError::UnknownToken { token })?;
            (
                contract,
                state.token_feeds.get(&token).cloned(),
                state.decimals_cache.get(&token).copied(),
                state.native_held,
                state.ceiling_usd,
            )
        };

        // Collaborator queries happen with no lock held; the entry guard
        // keeps the snapshot above coherent.
        let valuation = match feed {
            Some(feed) => {
                let decimals = match cached_decimals {
                    Some(d) => d,
                    None => Self::query_decimals(contract.as_ref()),
                };
                let delta_usd =
                    to_usd(amount, feed.latest_price().map_err(PriceError::from)?, decimals)?;
                if ceiling > 0 {
                    let native_quote = self.native_feed.latest_price().map_err(PriceError::from)?;
                    let current = to_usd(held, native_quote, NATIVE_DECIMALS)?;
                    Self::check_cap(current, delta_usd, ceiling)?;
                }
                Some((delta_usd, decimals))
            }
            None => None,
        };

        let asset = AssetId::Token(token);
        let new_balance = {
            let mut state = self.state.write();
            if let (Some((_, decimals)), None) = (&valuation, cached_decimals) {
                state.decimals_cache.insert(token, *decimals);
            }
            let new_balance = state.balances.credit(asset, caller, amount)?;
            state.deposit_count += 1;
            new_balance
        };

        // Pull transfer-in: the one interaction that must follow the
        // credit. Failure aborts the whole call via compensation.
        if let Err(err) = contract.transfer_from(caller, &self.vault_account, amount) {
            let mut state = self.state.write();
            state.balances.debit(asset, caller, amount)?;
            state.deposit_count -= 1;
            return Err(err.into());
        }

        self.record(LedgerEvent::DepositCompleted {
            actor: caller.clone(),
            asset,
            amount,
            usd_value: valuation.map(|(usd, _)| usd),
        });
        Ok(new_balance)
    }

    // -----------------------------------------------------------------------
    // Withdrawals
    // -----------------------------------------------------------------------

    /// Withdraws native asset to the caller.
    ///
    /// The debit and counter update are fully applied before the
    /// transfer-out runs; a transfer failure rolls both back, so the call
    /// either completes entirely or leaves no trace.
    ///
    /// Returns the caller's remaining native balance.
    ///
    /// # Errors
    ///
    /// [`LedgerError::PerCallLimitExceeded`] when a nonzero limit is set
    /// and exceeded, [`LedgerError::Balance`] with
    /// [`BalanceError::InsufficientBalance`] payloads,
    /// [`LedgerError::TransferFailed`] if the primitive fails, and
    /// [`LedgerError::ReentrantCall`] for nested invocations.
    pub fn withdraw_native(&self, caller: &AccountId, amount: u128) -> Result<u128, LedgerError> {
        let _guard = self.enter()?;

        let remaining = {
            let mut state = self.state.write();
            let limit = state.per_call_limit;
            if limit > 0 && amount > limit {
                return Err(LedgerError::PerCallLimitExceeded {
                    requested: amount,
                    limit,
                });
            }

            let remaining = state.balances.debit(AssetId::Native, caller, amount)?;

            // Recovery can legitimately drain the vault below its
            // accounted balances; the transfer could never succeed then,
            // so refuse before interacting and undo the debit.
            match state.native_held.checked_sub(amount) {
                Some(new_held) => state.native_held = new_held,
                None => {
                    state.balances.credit(AssetId::Native, caller, amount)?;
                    return Err(TransferFailure {
                        dest: caller.clone(),
                        amount,
                    }
                    .into());
                }
            }
            state.withdraw_count += 1;
            remaining
        };

        // Interactions last, lock released, guard still held.
        if let Err(failure) = self.native_transfer.transfer(caller, amount) {
            let mut state = self.state.write();
            state.balances.credit(AssetId::Native, caller, amount)?;
            // Restoring the value subtracted above; cannot overflow.
            state.native_held += amount;
            state.withdraw_count -= 1;
            return Err(failure.into());
        }

        self.record(LedgerEvent::WithdrawalCompleted {
            actor: caller.clone(),
            asset: AssetId::Native,
            amount,
        });
        Ok(remaining)
    }

    /// Withdraws a token to the caller.
    ///
    /// No per-call limit applies (the limit is native-only policy). The
    /// token contract's own failure propagates, with the debit rolled
    /// back.
    ///
    /// Returns the caller's remaining balance for the token.
    pub fn withdraw_token(
        &self,
        caller: &AccountId,
        token: TokenAddress,
        amount: u128,
    ) -> Result<u128, LedgerError> {
        let _guard = self.enter()?;
        let asset = AssetId::Token(token);

        let (contract, remaining) = {
            let mut state = self.state.write();
            let contract = state
                .tokens
                .get(&token)
                .cloned()
                .ok_or(LedgerError::UnknownToken { token })?;
            let remaining = state.balances.debit(asset, caller, amount)?;
            state.withdraw_count += 1;
            (contract, remaining)
        };

        if let Err(err) = contract.transfer(caller, amount) {
            let mut state = self.state.write();
            state.balances.credit(asset, caller, amount)?;
            state.withdraw_count -= 1;
            return Err(err.into());
        }

        self.record(LedgerEvent::WithdrawalCompleted {
            actor: caller.clone(),
            asset,
            amount,
        });
        Ok(remaining)
    }

    // -----------------------------------------------------------------------
    // Admin surface
    // -----------------------------------------------------------------------

    /// Registers (or replaces) a token's price source.
    ///
    /// # Errors
    ///
    /// [`LedgerError::NotAdmin`] without the admin role;
    /// [`LedgerError::NativeFeedFixed`] for the native identifier — the
    /// native feed is supplied at construction and never changes.
    pub fn register_price_source(
        &self,
        caller: &AccountId,
        asset: AssetId,
        feed: Arc<dyn PriceFeed>,
    ) -> Result<(), LedgerError> {
        self.require_admin(caller)?;
        let token = match asset {
            AssetId::Native => return Err(LedgerError::NativeFeedFixed),
            AssetId::Token(addr) => addr,
        };

        self.state.write().token_feeds.insert(token, feed);
        self.record(LedgerEvent::PriceSourceAssigned {
            actor: caller.clone(),
            token,
        });
        Ok(())
    }

    /// Overwrites the valuation ceiling. Zero disables the cap.
    pub fn set_valuation_ceiling(
        &self,
        caller: &AccountId,
        new_ceiling_usd: u128,
    ) -> Result<(), LedgerError> {
        self.require_admin(caller)?;
        self.state.write().ceiling_usd = new_ceiling_usd;
        self.record(LedgerEvent::CeilingUpdated {
            actor: caller.clone(),
            ceiling_usd: new_ceiling_usd,
        });
        Ok(())
    }

    /// Overwrites the native per-call withdrawal limit. Zero disables it.
    pub fn set_per_call_withdrawal_limit(
        &self,
        caller: &AccountId,
        new_limit: u128,
    ) -> Result<(), LedgerError> {
        self.require_admin(caller)?;
        self.state.write().per_call_limit = new_limit;
        self.record(LedgerEvent::PerCallLimitUpdated {
            actor: caller.clone(),
            limit: new_limit,
        });
        Ok(())
    }

    /// Recovers native asset directly to `dest`, bypassing the balance
    /// table.
    ///
    /// Intended only for value sent to the vault outside the accounted
    /// deposit path. Nothing stops an admin from draining
    /// legitimately-owed balances with this — it is a privileged,
    /// trust-requiring escape hatch, not a safety feature.
    pub fn recover_native(
        &self,
        caller: &AccountId,
        dest: &AccountId,
        amount: u128,
    ) -> Result<(), LedgerError> {
        self.require_admin(caller)?;
        let _guard = self.enter()?;

        {
            let mut state = self.state.write();
            state.native_held =
                state
                    .native_held
                    .checked_sub(amount)
                    .ok_or_else(|| TransferFailure {
                        dest: dest.clone(),
                        amount,
                    })?;
        }

        if let Err(failure) = self.native_transfer.transfer(dest, amount) {
            self.state.write().native_held += amount;
            return Err(failure.into());
        }

        self.record(LedgerEvent::AssetRecovered {
            actor: caller.clone(),
            asset: AssetId::Native,
            dest: dest.clone(),
            amount,
        });
        Ok(())
    }

    /// Recovers a token directly to `dest`, bypassing the balance table.
    ///
    /// Same trust model as [`recover_native`](Self::recover_native): the
    /// token contract is the authority on whether the vault actually
    /// holds `amount`; the ledger's own table is neither consulted nor
    /// touched.
    pub fn recover_token(
        &self,
        caller: &AccountId,
        token: TokenAddress,
        dest: &AccountId,
        amount: u128,
    ) -> Result<(), LedgerError> {
        self.require_admin(caller)?;
        let _guard = self.enter()?;

        let contract = self
            .state
            .read()
            .tokens
            .get(&token)
            .cloned()
            .ok_or(LedgerError::UnknownToken { token })?;
        contract.transfer(dest, amount)?;

        self.record(LedgerEvent::AssetRecovered {
            actor: caller.clone(),
            asset: AssetId::Token(token),
            dest: dest.clone(),
            amount,
        });
        Ok(())
    }

    /// Grants `role` to `identity`. Admin-gated; idempotent.
    pub fn grant_role(
        &self,
        caller: &AccountId,
        role: Role,
        identity: &AccountId,
    ) -> Result<(), LedgerError> {
        self.require_admin(caller)?;
        self.roles.write().grant(role, identity);
        self.record(LedgerEvent::RoleGranted {
            actor: caller.clone(),
            role,
            identity: identity.clone(),
        });
        Ok(())
    }

    /// Revokes `role` from `identity`. Admin-gated; idempotent.
    pub fn revoke_role(
        &self,
        caller: &AccountId,
        role: Role,
        identity: &AccountId,
    ) -> Result<(), LedgerError> {
        self.require_admin(caller)?;
        self.roles.write().revoke(role, identity);
        self.record(LedgerEvent::RoleRevoked {
            actor: caller.clone(),
            role,
            identity: identity.clone(),
        });
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Host environment
    // -----------------------------------------------------------------------

    /// Binds a token-contract handle under its address.
    ///
    /// This models the chain resolving an address to a contract, not
    /// token discovery: the ledger never enumerates or sweeps bound
    /// tokens, and binding alone changes no balance and no valuation.
    pub fn bind_token(&self, contract: Arc<dyn TokenContract>) {
        let address = contract.address();
        self.state.write().tokens.insert(address, contract);
    }

    /// Receives bare native value sent to the vault outside the deposit
    /// path (the analogue of a plain value transfer to the contract).
    /// Increases the holding without crediting anyone; recovery exists
    /// to move such value back out.
    pub fn receive_native(&self, amount: u128) -> Result<(), LedgerError> {
        let mut state = self.state.write();
        state.native_held =
            state
                .native_held
                .checked_add(amount)
                .ok_or(BalanceError::Overflow {
                    asset: AssetId::Native,
                    current: state.native_held,
                    credit: amount,
                })?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Returns the balance for `(asset, owner)`, zero for unknown pairs.
    pub fn balance_of(&self, asset: AssetId, owner: &AccountId) -> u128 {
        self.state.read().balances.read(asset, owner)
    }

    /// Values the vault's held native quantity in 6-decimal USD.
    ///
    /// Token holdings are not included — see the module docs for why
    /// this narrow policy is deliberate.
    pub fn current_vault_valuation_usd(&self) -> Result<u128, LedgerError> {
        let held = self.state.read().native_held;
        let quote = self.native_feed.latest_price().map_err(PriceError::from)?;
        Ok(to_usd(held, quote, NATIVE_DECIMALS)?)
    }

    /// Converts a token amount to 6-decimal USD via its registered source.
    ///
    /// # Errors
    ///
    /// [`LedgerError::NoPriceSource`] when the token has no source;
    /// [`LedgerError::UnknownToken`] when no contract is bound (its
    /// decimals cannot be resolved); valuation errors otherwise.
    pub fn token_value_usd(&self, token: TokenAddress, amount: u128) -> Result<u128, LedgerError> {
        let (contract, feed, cached_decimals) = {
            let state = self.state.read();
            let contract = state
                .tokens
                .get(&token)
                .cloned()
                .ok_or(LedgerError::UnknownToken { token })?;
            let feed = state
                .token_feeds
                .get(&token)
                .cloned()
                .ok_or(LedgerError::NoPriceSource { token })?;
            (contract, feed, state.decimals_cache.get(&token).copied())
        };

        let decimals = match cached_decimals {
            Some(d) => d,
            None => {
                let d = Self::query_decimals(contract.as_ref());
                self.state.write().decimals_cache.insert(token, d);
                d
            }
        };
        Ok(to_usd(amount, feed.latest_price().map_err(PriceError::from)?, decimals)?)
    }

    /// The vault's actual native holding, including unaccounted value.
    pub fn native_held(&self) -> u128 {
        self.state.read().native_held
    }

    /// Cumulative completed deposits.
    pub fn deposit_count(&self) -> u64 {
        self.state.read().deposit_count
    }

    /// Cumulative completed withdrawals.
    pub fn withdraw_count(&self) -> u64 {
        self.state.read().withdraw_count
    }

    /// The configured valuation ceiling; 0 means no cap.
    pub fn valuation_ceiling_usd(&self) -> u128 {
        self.state.read().ceiling_usd
    }

    /// The configured native per-call withdrawal limit; 0 means none.
    pub fn per_call_withdrawal_limit(&self) -> u128 {
        self.state.read().per_call_limit
    }

    /// Membership check, with admin as a superset of pauser.
    pub fn has_role(&self, role: Role, identity: &AccountId) -> bool {
        self.roles.read().has_role(role, identity)
    }

    /// Drains and returns all accumulated event records, oldest first.
    pub fn drain_events(&self) -> Vec<EventRecord> {
        std::mem::take(&mut *self.events.lock())
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Claims the single-entry flag or refuses a nested invocation.
    fn enter(&self) -> Result<EntryGuard<'_>, LedgerError> {
        if self
            .entered
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            Ok(EntryGuard(&self.entered))
        } else {
            Err(LedgerError::ReentrantCall)
        }
    }

    /// Verifies the caller holds the admin role.
    fn require_admin(&self, caller: &AccountId) -> Result<(), LedgerError> {
        if self.roles.read().has_role(Role::Admin, caller) {
            Ok(())
        } else {
            Err(LedgerError::NotAdmin {
                caller: caller.clone(),
            })
        }
    }

    /// Enforces `current + delta <= ceiling`. Callers skip this entirely
    /// when the ceiling is zero (cap disabled).
    fn check_cap(current_usd: u128, delta_usd: u128, ceiling: u128) -> Result<(), LedgerError> {
        // Saturation can only understate a value that already dwarfs any
        // real ceiling; the comparison stays correct.
        let attempted = current_usd.saturating_add(delta_usd);
        if attempted > ceiling {
            return Err(LedgerError::BankCapExceeded { attempted, ceiling });
        }
        Ok(())
    }

    /// Resolves a token's decimals defensively: a failed query or a
    /// reported zero falls back to [`DEFAULT_TOKEN_DECIMALS`].
    fn query_decimals(contract: &dyn TokenContract) -> u8 {
        match contract.decimals() {
            Some(d) if d > 0 => d,
            _ => DEFAULT_TOKEN_DECIMALS,
        }
    }

    /// Appends an audit record and mirrors it to `tracing`.
    fn record(&self, event: LedgerEvent) {
        let record = EventRecord::new(event);
        info!(event_id = %record.event_id, event = ?record.event, "ledger event");
        self.events.lock().push(record);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
