//! Redis-backed grant store.
//!
//! Each session maps to one list key holding JSON-encoded grant records in
//! purchase order. `RPUSH` is atomic, so concurrent readers never see a
//! partial record. The key expires once every grant in it has outlived
//! [`AccessGrant::retained_until`]; each append only ever extends the TTL.

use async_trait::async_trait;
use chrono::Duration;
use redis::AsyncCommands;
use tracing::debug;

use dealgate_application::EntitlementRepository;
use dealgate_core::{AppError, AppResult, SessionId};
use dealgate_domain::{AccessGrant, GrantRecord};

/// Redis implementation of the entitlement repository port.
#[derive(Clone)]
pub struct RedisEntitlementRepository {
    client: redis::Client,
    key_prefix: String,
    session_idle: Duration,
}

impl RedisEntitlementRepository {
    /// Creates a repository with a configured Redis client, key prefix and
    /// the idle timeout that bounds how long abandoned sessions are kept.
    #[must_use]
    pub fn new(
        client: redis::Client,
        key_prefix: impl Into<String>,
        session_idle: Duration,
    ) -> Self {
        Self {
            client,
            key_prefix: key_prefix.into(),
            session_idle,
        }
    }

    fn key_for(&self, session_id: SessionId) -> String {
        format!("{}:grants:{session_id}", self.key_prefix)
    }

    async fn connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|error| AppError::Internal(format!("failed to connect to redis: {error}")))
    }
}

#[async_trait]
impl EntitlementRepository for RedisEntitlementRepository {
    async fn list_grants(&self, session_id: SessionId) -> AppResult<Vec<AccessGrant>> {
        let mut connection = self.connection().await?;
        let encoded: Vec<String> = connection
            .lrange(self.key_for(session_id), 0, -1)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to read redis access grants: {error}"))
            })?;

        encoded
            .iter()
            .map(|value| {
                serde_json::from_str::<GrantRecord>(value)
                    .map_err(|error| {
                        AppError::Internal(format!("invalid redis access grant record: {error}"))
                    })
                    .and_then(AccessGrant::from_record)
            })
            .collect()
    }

    async fn append_grant(&self, session_id: SessionId, grant: &AccessGrant) -> AppResult<()> {
        let encoded = serde_json::to_string(&grant.to_record()).map_err(|error| {
            AppError::Internal(format!("failed to encode access grant: {error}"))
        })?;

        let key = self.key_for(session_id);
        let expire_at = grant.retained_until(self.session_idle).timestamp();

        // NX covers a freshly created key, GT only ever pushes the deadline out.
        let mut connection = self.connection().await?;
        redis::pipe()
            .atomic()
            .rpush(key.as_str(), encoded)
            .ignore()
            .cmd("EXPIREAT")
            .arg(key.as_str())
            .arg(expire_at)
            .arg("NX")
            .ignore()
            .cmd("EXPIREAT")
            .arg(key.as_str())
            .arg(expire_at)
            .arg("GT")
            .ignore()
            .query_async::<()>(&mut connection)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to append redis access grant: {error}"))
            })?;

        Ok(())
    }

    async fn clear_session(&self, session_id: SessionId) -> AppResult<u64> {
        let key = self.key_for(session_id);
        let mut connection = self.connection().await?;

        let (removed, _): (u64, i64) = redis::pipe()
            .atomic()
            .llen(key.as_str())
            .del(key.as_str())
            .query_async(&mut connection)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to clear redis access grants: {error}"))
            })?;

        debug!(%key, removed, "cleared redis access grants");
        Ok(removed)
    }
}
