//! Entitlement application service.
//!
//! Owns the purchase flow for access passes and answers "is access active
//! right now" for one session at a time. Expiry is recomputed from the
//! injected [`Clock`] on every query; nothing is scheduled.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use dealgate_core::{AppError, AppResult, SessionId};
use dealgate_domain::{AccessGrant, AccessPlan, EntitlementState, EntitlementStatus};

use crate::entitlement_ports::{Clock, EntitlementRepository, PlanPolicy};

#[cfg(test)]
mod tests;

/// Point-in-time view of a session's entitlement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitlementSnapshot {
    /// Instant the snapshot was evaluated at.
    pub evaluated_at: DateTime<Utc>,
    /// Lock state at `evaluated_at`.
    pub status: EntitlementStatus,
    /// Time left on the effective expiry, when unlocked.
    pub time_remaining: Option<Duration>,
    /// Grant history in purchase order.
    pub grants: Vec<AccessGrant>,
}

/// Application service for access pass entitlements.
#[derive(Clone)]
pub struct EntitlementService {
    repository: Arc<dyn EntitlementRepository>,
    clock: Arc<dyn Clock>,
    plan_policy: PlanPolicy,
}

impl EntitlementService {
    /// Creates a new entitlement service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn EntitlementRepository>,
        clock: Arc<dyn Clock>,
        plan_policy: PlanPolicy,
    ) -> Self {
        Self {
            repository,
            clock,
            plan_policy,
        }
    }

    /// Returns the plans buyers may choose from.
    #[must_use]
    pub fn offered_plans(&self) -> Vec<AccessPlan> {
        self.plan_policy.offered_plans()
    }

    /// Records a purchased pass for a session, starting now.
    pub async fn grant_access(
        &self,
        session_id: SessionId,
        duration_days: i64,
    ) -> AppResult<AccessGrant> {
        self.grant_access_at(session_id, duration_days, self.clock.now())
            .await
    }

    /// Records a purchased pass for a session, starting at `now`.
    ///
    /// The plan is checked against the policy, then the grant is issued by the
    /// session's [`EntitlementState`] before the repository is touched, so a
    /// rejected purchase leaves the session unchanged.
    pub async fn grant_access_at(
        &self,
        session_id: SessionId,
        duration_days: i64,
        now: DateTime<Utc>,
    ) -> AppResult<AccessGrant> {
        let reject = |error: &AppError| {
            warn!(%session_id, duration_days, %error, "rejected access purchase");
        };

        self.plan_policy.validate(duration_days).inspect_err(&reject)?;

        let mut state = self.entitlement_state(session_id).await?;
        let grant = state.grant_access(duration_days, now).inspect_err(&reject)?;

        self.repository.append_grant(session_id, &grant).await?;

        info!(
            %session_id,
            grant_id = %grant.grant_id(),
            duration_days = grant.duration().days(),
            expires_at = %grant.expires_at(),
            "granted access pass"
        );

        Ok(grant)
    }

    /// Loads the session's grant history.
    pub async fn entitlement_state(&self, session_id: SessionId) -> AppResult<EntitlementState> {
        self.repository
            .list_grants(session_id)
            .await
            .map(EntitlementState::from_grants)
    }

    /// Returns whether the session can currently see protected fields.
    pub async fn is_active(&self, session_id: SessionId) -> AppResult<bool> {
        let now = self.clock.now();
        Ok(self.entitlement_state(session_id).await?.is_active(now))
    }

    /// Returns the time left before the session locks again.
    pub async fn time_remaining(&self, session_id: SessionId) -> AppResult<Option<Duration>> {
        let now = self.clock.now();
        Ok(self.entitlement_state(session_id).await?.time_remaining(now))
    }

    /// Evaluates the session once and returns every derived value.
    pub async fn snapshot(&self, session_id: SessionId) -> AppResult<EntitlementSnapshot> {
        let now = self.clock.now();
        let state = self.entitlement_state(session_id).await?;

        Ok(EntitlementSnapshot {
            evaluated_at: now,
            status: state.status(now),
            time_remaining: state.time_remaining(now),
            grants: state.grants().to_vec(),
        })
    }

    /// Destroys the session's entitlement state.
    pub async fn end_session(&self, session_id: SessionId) -> AppResult<()> {
        let removed = self.repository.clear_session(session_id).await?;
        info!(%session_id, removed, "ended entitlement session");
        Ok(())
    }
}
