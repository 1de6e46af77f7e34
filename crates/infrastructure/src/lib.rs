//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_entitlement_repository;
mod in_memory_listing_catalog;
mod postgres_entitlement_repository;
mod redis_entitlement_repository;
mod system_clock;

pub use in_memory_entitlement_repository::InMemoryEntitlementRepository;
pub use in_memory_listing_catalog::InMemoryListingCatalog;
pub use postgres_entitlement_repository::PostgresEntitlementRepository;
pub use redis_entitlement_repository::RedisEntitlementRepository;
pub use system_clock::SystemClock;
