use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session identifier used as the partition key for entitlement state.
///
/// Every session owns exactly one set of access grants; grants are never
/// shared between two identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Creates a random session identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a session identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for SessionId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::SessionId;

    #[test]
    fn session_id_wraps_its_uuid() {
        let value = Uuid::new_v4();
        let session_id = SessionId::from_uuid(value);

        assert_eq!(session_id.as_uuid(), value);
        assert_eq!(session_id.to_string(), value.to_string());
    }

    #[test]
    fn new_session_ids_are_distinct() {
        assert_ne!(SessionId::new(), SessionId::new());
    }
}
