//! # Observable Events
//!
//! Every completed operation leaves a serializable audit record for
//! off-chain consumers: indexers, reconciliation jobs, alerting. Records
//! are appended in operation order and drained by the consumer; the
//! ledger also mirrors each one to `tracing` so the host's log pipeline
//! sees them without polling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::asset::{AccountId, AssetId, TokenAddress};
use crate::roles::Role;

// ---------------------------------------------------------------------------
// LedgerEvent
// ---------------------------------------------------------------------------

/// The observable outcome of one completed ledger operation.
///
/// Amounts are in the asset's smallest unit; USD values are 6-decimal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// A deposit was credited (and, for tokens, pulled in).
    DepositCompleted {
        /// The depositing identity.
        actor: AccountId,
        /// The asset deposited.
        asset: AssetId,
        /// Amount credited, smallest units.
        amount: u128,
        /// USD valuation used for the cap check; `None` when the asset
        /// had no price source and the cap was skipped.
        usd_value: Option<u128>,
    },

    /// A withdrawal was debited and transferred out.
    WithdrawalCompleted {
        /// The withdrawing identity (also the destination).
        actor: AccountId,
        /// The asset withdrawn.
        asset: AssetId,
        /// Amount debited, smallest units.
        amount: u128,
    },

    /// A token's price source was created or replaced.
    PriceSourceAssigned {
        /// The admin who registered it.
        actor: AccountId,
        /// The token the source prices.
        token: TokenAddress,
    },

    /// The valuation ceiling was overwritten.
    CeilingUpdated {
        /// The admin who changed it.
        actor: AccountId,
        /// New ceiling in 6-decimal USD; 0 disables the cap.
        ceiling_usd: u128,
    },

    /// The native per-call withdrawal limit was overwritten.
    PerCallLimitUpdated {
        /// The admin who changed it.
        actor: AccountId,
        /// New limit in native smallest units; 0 disables the limit.
        limit: u128,
    },

    /// An unaccounted asset was recovered out of the vault.
    AssetRecovered {
        /// The admin who performed the recovery.
        actor: AccountId,
        /// The asset recovered.
        asset: AssetId,
        /// Where it was sent.
        dest: AccountId,
        /// Amount transferred, smallest units.
        amount: u128,
    },

    /// A role was granted.
    RoleGranted {
        /// The admin who granted it.
        actor: AccountId,
        /// The role in question.
        role: Role,
        /// The new member.
        identity: AccountId,
    },

    /// A role was revoked.
    RoleRevoked {
        /// The admin who revoked it.
        actor: AccountId,
        /// The role in question.
        role: Role,
        /// The removed member.
        identity: AccountId,
    },
}

// ---------------------------------------------------------------------------
// EventRecord
// ---------------------------------------------------------------------------

/// Envelope around a [`LedgerEvent`]: unique id plus emission time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventRecord {
    /// Unique id for downstream deduplication.
    pub event_id: Uuid,
    /// When the operation completed (UTC).
    pub timestamp: DateTime<Utc>,
    /// The event payload.
    pub event: LedgerEvent,
}

impl EventRecord {
    /// Wraps an event with a fresh id and the current time.
    pub fn new(event: LedgerEvent) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
