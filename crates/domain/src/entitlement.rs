//! Per-session entitlement state.
//!
//! Access is a pure function of the grant list and the instant being asked
//! about. Nothing is cached between calls, so a clock that jumps backwards
//! past an earlier check can turn an expired session active again; callers
//! that need monotonic behavior must supply a non-decreasing `now`.

use chrono::{DateTime, Duration, Utc};
use dealgate_core::AppResult;
use serde::{Deserialize, Serialize};

use crate::access::{AccessGrant, PlanDuration};

/// Observable lock state of a session at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum EntitlementStatus {
    /// No grant covers the instant.
    Locked,
    /// At least one grant covers the instant.
    Unlocked {
        /// Latest expiry across all grants.
        expires_at: DateTime<Utc>,
    },
}

impl EntitlementStatus {
    /// Returns whether protected listing fields are viewable.
    #[must_use]
    pub fn is_unlocked(&self) -> bool {
        matches!(self, Self::Unlocked { .. })
    }
}

/// Append-only grant history for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntitlementState {
    grants: Vec<AccessGrant>,
}

impl EntitlementState {
    /// Creates an empty (locked) state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds state from grants in purchase order.
    #[must_use]
    pub fn from_grants(grants: Vec<AccessGrant>) -> Self {
        Self { grants }
    }

    /// Returns the grants in purchase order.
    #[must_use]
    pub fn grants(&self) -> &[AccessGrant] {
        self.grants.as_slice()
    }

    /// Issues and appends a grant starting at `now`.
    ///
    /// The duration is validated before anything is appended, so a rejected
    /// plan leaves the state exactly as it was.
    pub fn grant_access(&mut self, duration_days: i64, now: DateTime<Utc>) -> AppResult<AccessGrant> {
        let duration = PlanDuration::new(duration_days)?;
        let grant = AccessGrant::issue(duration, now)?;
        self.grants.push(grant.clone());
        Ok(grant)
    }

    /// Latest expiry across all grants.
    #[must_use]
    pub fn effective_expiry(&self) -> Option<DateTime<Utc>> {
        self.grants.iter().map(AccessGrant::expires_at).max()
    }

    /// Returns whether any grant covers `now`. The expiry boundary is
    /// exclusive.
    #[must_use]
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.grants.iter().any(|grant| grant.covers(now))
    }

    /// Time left until the effective expiry, or `None` when locked.
    #[must_use]
    pub fn time_remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.effective_expiry()
            .map(|expires_at| expires_at - now)
            .filter(|remaining| *remaining > Duration::zero())
    }

    /// Returns the lock state at `now`.
    #[must_use]
    pub fn status(&self, now: DateTime<Utc>) -> EntitlementStatus {
        match self.effective_expiry() {
            Some(expires_at) if now < expires_at => EntitlementStatus::Unlocked { expires_at },
            _ => EntitlementStatus::Locked,
        }
    }
}
