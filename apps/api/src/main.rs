//! Dealgate API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod dev_seed;
mod dto;
mod error;
mod handlers;
mod middleware;
mod redis_session_store;
mod state;

use std::sync::Arc;

use dealgate_core::AppError;
use dealgate_infrastructure::{
    InMemoryEntitlementRepository, PostgresEntitlementRepository, RedisEntitlementRepository,
};
use tracing::info;

use crate::api_config::{ApiConfig, EntitlementStoreConfig, init_tracing};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    if config.migrate_only {
        if let EntitlementStoreConfig::Postgres { database_url } = &config.entitlement_store {
            api_services::connect_and_migrate(database_url).await?;
        }
        info!("database migrations applied successfully");
        return Ok(());
    }

    let listing_catalog = Arc::new(api_services::load_listing_catalog(&config)?);

    let app = match &config.entitlement_store {
        EntitlementStoreConfig::Memory => {
            let app_state = api_services::build_app_state(
                &config,
                Arc::new(InMemoryEntitlementRepository::new(config.session_idle())),
                listing_catalog,
            );
            api_router::build_router(app_state, api_services::build_memory_session_layer(&config))?
        }
        EntitlementStoreConfig::Postgres { database_url } => {
            let pool = api_services::connect_and_migrate(database_url).await?;
            let session_layer =
                api_services::build_postgres_session_layer(pool.clone(), &config).await?;
            let app_state = api_services::build_app_state(
                &config,
                Arc::new(PostgresEntitlementRepository::new(
                    pool,
                    config.session_idle(),
                )),
                listing_catalog,
            );
            api_router::build_router(app_state, session_layer)?
        }
        EntitlementStoreConfig::Redis {
            redis_url,
            key_prefix,
        } => {
            let redis_client = api_services::build_redis_client(redis_url)?;
            let session_layer = api_services::build_redis_session_layer(
                redis_client.clone(),
                key_prefix,
                &config,
            );
            let app_state = api_services::build_app_state(
                &config,
                Arc::new(RedisEntitlementRepository::new(
                    redis_client,
                    key_prefix.clone(),
                    config.session_idle(),
                )),
                listing_catalog,
            );
            api_router::build_router(app_state, session_layer)?
        }
    };

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(
        %address,
        entitlement_store = config.entitlement_store.name(),
        "dealgate-api listening"
    );

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
