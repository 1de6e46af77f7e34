use dealgate_core::AppError;
use sqlx::PgPool;
use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, SessionStore};
use tower_sessions_sqlx_store::PostgresStore;

use crate::api_config::ApiConfig;
use crate::redis_session_store::RedisSessionStore;

pub fn build_memory_session_layer(config: &ApiConfig) -> SessionManagerLayer<MemoryStore> {
    configure(MemoryStore::default(), config)
}

pub async fn build_postgres_session_layer(
    pool: PgPool,
    config: &ApiConfig,
) -> Result<SessionManagerLayer<PostgresStore>, AppError> {
    let session_store = PostgresStore::new(pool)
        .with_table_name("tower_sessions")
        .map_err(|error| {
            AppError::Validation(format!("invalid session table name configuration: {error}"))
        })?;

    session_store.migrate().await.map_err(|error| {
        AppError::Internal(format!("failed to initialize session store: {error}"))
    })?;

    Ok(configure(session_store, config))
}

pub fn build_redis_session_layer(
    redis_client: redis::Client,
    key_prefix: &str,
    config: &ApiConfig,
) -> SessionManagerLayer<RedisSessionStore> {
    let session_store = RedisSessionStore::new(redis_client, format!("{key_prefix}:session"));
    configure(session_store, config)
}

fn configure<S: SessionStore>(session_store: S, config: &ApiConfig) -> SessionManagerLayer<S> {
    SessionManagerLayer::new(session_store)
        .with_secure(config.cookie_secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(
            config.session_idle_minutes,
        )))
}
