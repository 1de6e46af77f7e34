use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use chrono::Duration;
use dealgate_application::PlanPolicy;
use dealgate_core::AppError;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntitlementStoreConfig {
    Memory,
    Postgres { database_url: String },
    Redis { redis_url: String, key_prefix: String },
}

impl EntitlementStoreConfig {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Postgres { .. } => "postgres",
            Self::Redis { .. } => "redis",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub api_host: String,
    pub api_port: u16,
    pub frontend_url: String,
    pub cookie_secure: bool,
    pub session_idle_minutes: i64,
    pub plan_policy: PlanPolicy,
    pub entitlement_store: EntitlementStoreConfig,
    pub listings_path: Option<PathBuf>,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");
        Self::from_lookup(migrate_only, |name| env::var(name).ok())
    }

    pub fn from_lookup(
        migrate_only: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let optional = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let required = |name: &str| {
            optional(name).ok_or_else(|| AppError::Validation(format!("{name} is required")))
        };

        let frontend_url =
            optional("FRONTEND_URL").unwrap_or_else(|| "http://localhost:3000".to_owned());
        Url::parse(&frontend_url)
            .map_err(|error| AppError::Validation(format!("invalid FRONTEND_URL: {error}")))?;

        let api_host = optional("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = optional("API_PORT")
            .map(|value| {
                value
                    .parse::<u16>()
                    .map_err(|error| AppError::Validation(format!("invalid API_PORT: {error}")))
            })
            .transpose()?
            .unwrap_or(3001);

        let cookie_secure = optional("SESSION_COOKIE_SECURE")
            .is_some_and(|value| value.eq_ignore_ascii_case("true"));
        let session_idle_minutes = optional("SESSION_IDLE_MINUTES")
            .map(|value| {
                value.parse::<i64>().map_err(|error| {
                    AppError::Validation(format!("invalid SESSION_IDLE_MINUTES: {error}"))
                })
            })
            .transpose()?
            .unwrap_or(30);
        if session_idle_minutes <= 0 {
            return Err(AppError::Validation(
                "SESSION_IDLE_MINUTES must be greater than zero".to_owned(),
            ));
        }

        let plan_policy = match lookup("ACCESS_PLAN_DAYS") {
            Some(value) => PlanPolicy::parse(value.as_str())?,
            None => PlanPolicy::standard(),
        };

        let entitlement_store = match optional("ENTITLEMENT_STORE")
            .unwrap_or_else(|| "memory".to_owned())
            .as_str()
        {
            "memory" => EntitlementStoreConfig::Memory,
            "postgres" => EntitlementStoreConfig::Postgres {
                database_url: required("DATABASE_URL")?,
            },
            "redis" => EntitlementStoreConfig::Redis {
                redis_url: required("REDIS_URL")?,
                key_prefix: optional("REDIS_KEY_PREFIX").unwrap_or_else(|| "dealgate".to_owned()),
            },
            other => {
                return Err(AppError::Validation(format!(
                    "ENTITLEMENT_STORE must be one of 'memory', 'postgres' or 'redis', got '{other}'"
                )));
            }
        };

        if migrate_only && !matches!(entitlement_store, EntitlementStoreConfig::Postgres { .. }) {
            return Err(AppError::Validation(
                "migrate requires ENTITLEMENT_STORE=postgres".to_owned(),
            ));
        }

        Ok(Self {
            migrate_only,
            api_host,
            api_port,
            frontend_url,
            cookie_secure,
            session_idle_minutes,
            plan_policy,
            entitlement_store,
            listings_path: optional("LISTINGS_PATH").map(PathBuf::from),
        })
    }

    pub fn session_idle(&self) -> Duration {
        Duration::minutes(self.session_idle_minutes)
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
