use chrono::{DateTime, Utc};

/// Source of the current instant.
///
/// Implementations should be non-decreasing. Entitlement checks are
/// recomputed from this value on every call, so a clock that steps backwards
/// can re-activate a session that an earlier check reported as expired.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}
