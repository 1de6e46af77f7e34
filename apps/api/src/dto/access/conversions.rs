use chrono::{DateTime, SecondsFormat, Utc};
use dealgate_application::EntitlementSnapshot;
use dealgate_domain::{AccessGrant, AccessPlan, EntitlementStatus};

use super::types::{AccessGrantResponse, AccessPlanResponse, AccessStatusResponse};

fn rfc3339(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl From<AccessPlan> for AccessPlanResponse {
    fn from(value: AccessPlan) -> Self {
        Self {
            duration_days: value.duration().days(),
            label: value.label().to_owned(),
        }
    }
}

impl From<AccessGrant> for AccessGrantResponse {
    fn from(value: AccessGrant) -> Self {
        Self {
            grant_id: value.grant_id().to_string(),
            granted_at: rfc3339(value.granted_at()),
            duration_days: value.duration().days(),
            expires_at: rfc3339(value.expires_at()),
        }
    }
}

impl From<EntitlementSnapshot> for AccessStatusResponse {
    fn from(value: EntitlementSnapshot) -> Self {
        let expires_at = match value.status {
            EntitlementStatus::Unlocked { expires_at } => Some(rfc3339(expires_at)),
            EntitlementStatus::Locked => None,
        };

        Self {
            active: value.status.is_unlocked(),
            evaluated_at: rfc3339(value.evaluated_at),
            expires_at,
            seconds_remaining: value.time_remaining.map(|remaining| remaining.num_seconds()),
            grants: value
                .grants
                .into_iter()
                .map(AccessGrantResponse::from)
                .collect(),
        }
    }
}
