//! PostgreSQL-backed grant store using the `entitlement_access_grants` table.
//!
//! Rows hold `{grant_id, granted_at, duration_days}` only. The expiry is
//! recomputed by the domain on load. Sessions end by going idle without
//! notice, so every append also prunes sessions whose grants have all
//! outlived [`AccessGrant::retained_until`].

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use dealgate_application::EntitlementRepository;
use dealgate_core::{AppError, AppResult, SessionId};
use dealgate_domain::{AccessGrant, GrantRecord};

/// PostgreSQL implementation of the entitlement repository port.
#[derive(Clone)]
pub struct PostgresEntitlementRepository {
    pool: PgPool,
    session_idle: Duration,
}

impl PostgresEntitlementRepository {
    /// Creates a repository with the provided connection pool and the idle
    /// timeout after which abandoned sessions may be pruned.
    #[must_use]
    pub fn new(pool: PgPool, session_idle: Duration) -> Self {
        Self { pool, session_idle }
    }

    /// Deletes every session whose grants were all retained until `now` or
    /// earlier.
    pub async fn prune_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM entitlement_access_grants
            WHERE session_id IN (
                SELECT session_id
                FROM entitlement_access_grants
                GROUP BY session_id
                HAVING MAX(GREATEST(
                    granted_at + make_interval(days => duration_days),
                    granted_at + $2::BIGINT * INTERVAL '1 second'
                )) <= $1
            )
            "#,
        )
        .bind(now)
        .bind(self.session_idle.num_seconds())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to prune expired access grants: {error}"))
        })?;

        if result.rows_affected() > 0 {
            debug!(removed = result.rows_affected(), "pruned expired access grant rows");
        }

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl EntitlementRepository for PostgresEntitlementRepository {
    async fn list_grants(&self, session_id: SessionId) -> AppResult<Vec<AccessGrant>> {
        let rows = sqlx::query_as::<_, GrantRow>(
            r#"
            SELECT grant_id, granted_at, duration_days
            FROM entitlement_access_grants
            WHERE session_id = $1
            ORDER BY purchase_seq ASC
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list access grants: {error}")))?;

        rows.into_iter()
            .map(|row| {
                AccessGrant::from_record(GrantRecord {
                    grant_id: row.grant_id,
                    granted_at: row.granted_at,
                    duration_days: i64::from(row.duration_days),
                })
            })
            .collect()
    }

    async fn append_grant(&self, session_id: SessionId, grant: &AccessGrant) -> AppResult<()> {
        let duration_days = i32::try_from(grant.duration().days()).map_err(|_| {
            AppError::InvalidPlan("duration_days exceeds supported storage range".to_owned())
        })?;

        sqlx::query(
            r#"
            INSERT INTO entitlement_access_grants (
                grant_id,
                session_id,
                granted_at,
                duration_days
            )
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(grant.grant_id().as_uuid())
        .bind(session_id.as_uuid())
        .bind(grant.granted_at())
        .bind(duration_days)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to append access grant: {error}")))?;

        self.prune_expired(grant.granted_at()).await?;

        Ok(())
    }

    async fn clear_session(&self, session_id: SessionId) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM entitlement_access_grants
            WHERE session_id = $1
            "#,
        )
        .bind(session_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to clear session access grants: {error}"))
        })?;

        debug!(%session_id, removed = result.rows_affected(), "cleared access grant rows");
        Ok(result.rows_affected())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct GrantRow {
    grant_id: Uuid,
    granted_at: DateTime<Utc>,
    duration_days: i32,
}
