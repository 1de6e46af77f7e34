use async_trait::async_trait;
use dealgate_core::{AppResult, SessionId};
use dealgate_domain::{AccessGrant, Listing, ListingId};

/// Repository port for per-session access grants.
///
/// Grants are append-only. Appends for one session are serialized by the
/// adapter; readers receive a snapshot and never observe a half-written grant.
#[async_trait]
pub trait EntitlementRepository: Send + Sync {
    /// Lists grants for a session in purchase order.
    async fn list_grants(&self, session_id: SessionId) -> AppResult<Vec<AccessGrant>>;

    /// Appends a fully constructed grant to a session.
    async fn append_grant(&self, session_id: SessionId, grant: &AccessGrant) -> AppResult<()>;

    /// Drops every grant held by a session. Returns the number removed.
    async fn clear_session(&self, session_id: SessionId) -> AppResult<u64>;
}

/// Read-only listing lookup port.
#[async_trait]
pub trait ListingCatalog: Send + Sync {
    /// Finds one listing by id.
    async fn find_listing(&self, listing_id: &ListingId) -> AppResult<Option<Listing>>;

    /// Lists every listing in catalog order.
    async fn list_listings(&self) -> AppResult<Vec<Listing>>;
}
