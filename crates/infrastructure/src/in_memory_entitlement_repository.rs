use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Duration;
use dealgate_application::EntitlementRepository;
use dealgate_core::{AppResult, SessionId};
use dealgate_domain::AccessGrant;
use tokio::sync::RwLock;

/// In-memory grant store for single-process hosts and tests.
///
/// Appends take the write lock, so a reader sees either the list before the
/// append or the list with the complete grant. Each append also evicts
/// sessions whose grants have all passed [`AccessGrant::retained_until`].
#[derive(Debug)]
pub struct InMemoryEntitlementRepository {
    grants: RwLock<HashMap<SessionId, Vec<AccessGrant>>>,
    session_idle: Duration,
}

impl InMemoryEntitlementRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new(session_idle: Duration) -> Self {
        Self {
            grants: RwLock::default(),
            session_idle,
        }
    }
}

#[async_trait]
impl EntitlementRepository for InMemoryEntitlementRepository {
    async fn list_grants(&self, session_id: SessionId) -> AppResult<Vec<AccessGrant>> {
        Ok(self
            .grants
            .read()
            .await
            .get(&session_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn append_grant(&self, session_id: SessionId, grant: &AccessGrant) -> AppResult<()> {
        let now = grant.granted_at();
        let mut sessions = self.grants.write().await;

        sessions.retain(|_, grants| {
            grants
                .iter()
                .any(|retained| retained.retained_until(self.session_idle) > now)
        });
        sessions.entry(session_id).or_default().push(grant.clone());
        Ok(())
    }

    async fn clear_session(&self, session_id: SessionId) -> AppResult<u64> {
        let removed = self.grants.write().await.remove(&session_id);
        Ok(removed.map_or(0, |grants| grants.len() as u64))
    }
}
