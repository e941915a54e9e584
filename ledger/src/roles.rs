//! # Role Registry
//!
//! Two roles, one subset relation. The administrative role can do
//! everything — configuration mutation, recovery, and granting/revoking
//! either role. The pauser role is reserved: it gates nothing today but
//! is carried so that membership can be assigned ahead of the feature
//! that will use it.
//!
//! The deployer holds both roles from construction. Beyond that, the
//! ledger's only concern is the membership check; who should hold what
//! is a policy question for whoever holds admin.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::asset::AccountId;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// The two roles the ledger recognizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Full administrative authority, including role management.
    /// A superset of every other role.
    Admin,
    /// Reserved for emergency-pause gating; currently checks-only.
    Pauser,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Pauser => write!(f, "pauser"),
        }
    }
}

// ---------------------------------------------------------------------------
// RoleRegistry
// ---------------------------------------------------------------------------

/// Membership sets for both roles.
///
/// Mutation happens only through the ledger's admin surface, which
/// performs the authorization check before delegating here.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RoleRegistry {
    admins: HashSet<AccountId>,
    pausers: HashSet<AccountId>,
}

impl RoleRegistry {
    /// Creates a registry with `deployer` holding both roles.
    pub fn bootstrap(deployer: &AccountId) -> Self {
        let mut registry = Self::default();
        registry.admins.insert(deployer.clone());
        registry.pausers.insert(deployer.clone());
        registry
    }

    /// Returns `true` if `identity` holds `role`.
    ///
    /// Admin is a superset: an admin satisfies a `Pauser` check even
    /// without explicit pauser membership.
    pub fn has_role(&self, role: Role, identity: &AccountId) -> bool {
        match role {
            Role::Admin => self.admins.contains(identity),
            Role::Pauser => self.pausers.contains(identity) || self.admins.contains(identity),
        }
    }

    /// Adds `identity` to `role`. Idempotent.
    pub fn grant(&mut self, role: Role, identity: &AccountId) {
        match role {
            Role::Admin => self.admins.insert(identity.clone()),
            Role::Pauser => self.pausers.insert(identity.clone()),
        };
    }

    /// Removes `identity` from `role`. Idempotent.
    pub fn revoke(&mut self, role: Role, identity: &AccountId) {
        match role {
            Role::Admin => self.admins.remove(identity),
            Role::Pauser => self.pausers.remove(identity),
        };
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
