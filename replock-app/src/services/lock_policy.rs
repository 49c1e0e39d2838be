//! Lock policy: turns unlock-gate decisions into persisted grants.
//!
//! The gate itself is a pure comparator in `replock-core`; this service
//! owns the surrounding bookkeeping (which apps are locked, how long an
//! unlock lasts, which grants are still in force).

use chrono::{DateTime, Utc};
use thiserror::Error;

use replock_core::unlock::{self, UnlockDecision};

use crate::models::{LockedApp, UnlockGrant};
use crate::storage::LockStore;

#[derive(Debug, Error)]
pub enum LockPolicyError {
    #[error("app {0} is not locked")]
    AppNotLocked(String),
    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

pub struct LockPolicyService {
    store: LockStore,
}

impl LockPolicyService {
    pub fn new(store: LockStore) -> Self {
        Self { store }
    }

    /// Register (or replace) a lock for an app
    pub fn lock_app(&self, app: LockedApp) -> Result<(), LockPolicyError> {
        tracing::info!(
            package = %app.package_name,
            required_reps = app.required_reps,
            unlock_minutes = app.unlock_minutes,
            "locking app"
        );
        self.store.save_locked_app(&app)?;
        Ok(())
    }

    /// Remove a lock entirely; returns false if none existed
    pub fn remove_lock(&self, package_name: &str) -> Result<bool, LockPolicyError> {
        let removed = self.store.delete_locked_app(package_name)?;
        if removed {
            tracing::info!(package = %package_name, "lock removed");
        }
        Ok(removed)
    }

    /// All registered locks
    pub fn locked_apps(&self) -> Result<Vec<LockedApp>, LockPolicyError> {
        Ok(self.store.list_locked_apps()?)
    }

    /// Evaluate the unlock gate for a package. On success a grant is
    /// persisted, valid for the app's configured unlock window.
    pub fn evaluate_unlock(
        &self,
        package_name: &str,
        rep_count: u32,
        now: DateTime<Utc>,
    ) -> Result<UnlockDecision, LockPolicyError> {
        let app = self
            .store
            .get_locked_app(package_name)?
            .ok_or_else(|| LockPolicyError::AppNotLocked(package_name.to_string()))?;

        let decision = unlock::evaluate(rep_count, app.required_reps);

        if decision.unlocked {
            let grant = UnlockGrant::new(
                app.package_name.clone(),
                rep_count,
                now,
                app.unlock_minutes,
            );
            tracing::info!(
                package = %app.package_name,
                reps = rep_count,
                expires_at = %grant.expires_at,
                "app unlocked"
            );
            self.store.save_grant(&grant)?;
        } else {
            tracing::debug!(
                package = %app.package_name,
                reps = rep_count,
                required = app.required_reps,
                "unlock denied"
            );
        }

        Ok(decision)
    }

    /// Whether the package may be opened at `now`. Packages without an
    /// enabled lock are always open.
    pub fn is_unlocked(
        &self,
        package_name: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, LockPolicyError> {
        let app = match self.store.get_locked_app(package_name)? {
            Some(app) => app,
            None => return Ok(true),
        };
        if !app.enabled {
            return Ok(true);
        }

        Ok(self
            .store
            .get_grant(package_name)?
            .map_or(false, |grant| grant.is_active(now)))
    }

    /// Drop grants that have expired as of `now`; returns how many
    pub fn prune_expired(&self, now: DateTime<Utc>) -> Result<usize, LockPolicyError> {
        let mut pruned = 0;
        for grant in self.store.list_grants()? {
            if !grant.is_active(now) {
                self.store.clear_grant(&grant.package_name)?;
                pruned += 1;
            }
        }

        if pruned > 0 {
            tracing::info!(count = pruned, "pruned expired grants");
        }
        Ok(pruned)
    }
}
