//! Access passes and the grants they produce.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use dealgate_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an access grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GrantId(Uuid);

impl GrantId {
    /// Creates a new random grant identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a grant identifier from an existing UUID value.
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

impl Default for GrantId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GrantId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Validated access pass length in whole days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct PlanDuration(u32);

impl PlanDuration {
    /// Validates a requested duration.
    ///
    /// Accepts a signed value so that zero and negative requests from
    /// transport layers are rejected here with [`AppError::InvalidPlan`].
    pub fn new(days: i64) -> AppResult<Self> {
        if days <= 0 {
            return Err(AppError::InvalidPlan(format!(
                "duration_days must be greater than zero, got {days}"
            )));
        }

        let days = u32::try_from(days).map_err(|_| {
            AppError::InvalidPlan(format!(
                "duration_days exceeds supported range, got {days}"
            ))
        })?;

        Ok(Self(days))
    }

    /// Returns the number of days.
    #[must_use]
    pub fn days(&self) -> u32 {
        self.0
    }

    /// Returns the duration as a time span.
    #[must_use]
    pub fn as_duration(&self) -> Duration {
        Duration::days(i64::from(self.0))
    }
}

impl TryFrom<i64> for PlanDuration {
    type Error = AppError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PlanDuration> for i64 {
    fn from(value: PlanDuration) -> Self {
        i64::from(value.0)
    }
}

/// Access pass tier offered to buyers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPlan {
    duration: PlanDuration,
    label: String,
}

impl AccessPlan {
    /// Creates a plan tier with a generated `"{n}-Day Access"` label.
    #[must_use]
    pub fn new(duration: PlanDuration) -> Self {
        Self {
            duration,
            label: format!("{}-Day Access", duration.days()),
        }
    }

    /// Returns the 3, 7 and 14 day tiers sold by the marketplace.
    #[must_use]
    pub fn standard_tiers() -> Vec<Self> {
        [3, 7, 14]
            .into_iter()
            .filter_map(|days| PlanDuration::new(days).ok())
            .map(Self::new)
            .collect()
    }

    /// Returns the tier duration.
    #[must_use]
    pub fn duration(&self) -> PlanDuration {
        self.duration
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }
}

/// Fractional-second digits kept on `granted_at`.
const GRANT_INSTANT_PRECISION: u16 = 6;

/// Immutable, time-bounded access pass purchased by a session.
///
/// `expires_at` is computed once from `granted_at + duration` and never
/// changes. Buying again produces a new grant rather than extending this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGrant {
    grant_id: GrantId,
    granted_at: DateTime<Utc>,
    duration: PlanDuration,
    expires_at: DateTime<Utc>,
}

impl AccessGrant {
    /// Issues a new grant starting at `granted_at`.
    pub fn issue(duration: PlanDuration, granted_at: DateTime<Utc>) -> AppResult<Self> {
        Self::with_id(GrantId::new(), duration, granted_at)
    }

    /// Rebuilds a grant from its persisted form, recomputing `expires_at`.
    pub fn from_record(record: GrantRecord) -> AppResult<Self> {
        let duration = PlanDuration::new(record.duration_days)?;
        Self::with_id(
            GrantId::from_uuid(record.grant_id),
            duration,
            record.granted_at,
        )
    }

    fn with_id(
        grant_id: GrantId,
        duration: PlanDuration,
        granted_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        // Storage keeps microseconds.
        let granted_at = granted_at.trunc_subsecs(GRANT_INSTANT_PRECISION);
        let expires_at = granted_at
            .checked_add_signed(duration.as_duration())
            .ok_or_else(|| {
                AppError::InvalidPlan(format!(
                    "a {}-day pass starting at {granted_at} cannot be represented",
                    duration.days()
                ))
            })?;

        Ok(Self {
            grant_id,
            granted_at,
            duration,
            expires_at,
        })
    }

    /// Returns the grant identifier.
    #[must_use]
    pub fn grant_id(&self) -> GrantId {
        self.grant_id
    }

    /// Returns the purchase instant.
    #[must_use]
    pub fn granted_at(&self) -> DateTime<Utc> {
        self.granted_at
    }

    /// Returns the purchased duration.
    #[must_use]
    pub fn duration(&self) -> PlanDuration {
        self.duration
    }

    /// Returns the first instant at which this grant no longer applies.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns whether the grant still covers `now`.
    #[must_use]
    pub fn covers(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// Returns the instant after which storage may drop this grant.
    ///
    /// That is the later of its expiry and the end of the idle window that
    /// started at purchase.
    #[must_use]
    pub fn retained_until(&self, session_idle: Duration) -> DateTime<Utc> {
        self.granted_at
            .checked_add_signed(session_idle)
            .map_or(self.expires_at, |idle_end| idle_end.max(self.expires_at))
    }

    /// Converts the grant into its storage form.
    #[must_use]
    pub fn to_record(&self) -> GrantRecord {
        GrantRecord {
            grant_id: self.grant_id.as_uuid(),
            granted_at: self.granted_at,
            duration_days: i64::from(self.duration),
        }
    }
}

/// Storage form of an [`AccessGrant`].
///
/// Carries no expiry. [`AccessGrant::from_record`] derives it from the
/// purchase instant and duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantRecord {
    /// Stable grant id.
    pub grant_id: Uuid,
    /// Purchase instant.
    pub granted_at: DateTime<Utc>,
    /// Purchased duration in days.
    pub duration_days: i64,
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, SubsecRound, TimeZone, Utc};
    use dealgate_core::AppError;

    use super::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
            .single()
            .unwrap_or_else(|| unreachable!())
    }

    #[test]
    fn zero_and_negative_durations_are_invalid_plans() {
        assert!(matches!(PlanDuration::new(0), Err(AppError::InvalidPlan(_))));
        assert!(matches!(
            PlanDuration::new(-3),
            Err(AppError::InvalidPlan(_))
        ));
    }

    #[test]
    fn oversized_duration_is_rejected() {
        assert!(matches!(
            PlanDuration::new(i64::from(u32::MAX) + 1),
            Err(AppError::InvalidPlan(_))
        ));
    }

    #[test]
    fn grant_expiry_is_start_plus_duration() {
        let duration = PlanDuration::new(7).unwrap_or_else(|_| unreachable!());
        let grant = AccessGrant::issue(duration, t0()).unwrap_or_else(|_| unreachable!());

        assert_eq!(grant.expires_at(), t0() + Duration::days(7));
        assert!(grant.expires_at() > grant.granted_at());
        assert!(grant.covers(t0()));
        assert!(!grant.covers(t0() + Duration::days(7)));
    }

    #[test]
    fn grant_past_the_calendar_limit_is_rejected() {
        let duration = PlanDuration::new(i64::from(u32::MAX)).unwrap_or_else(|_| unreachable!());
        assert!(matches!(
            AccessGrant::issue(duration, t0()),
            Err(AppError::InvalidPlan(_))
        ));
    }

    #[test]
    fn record_reload_recomputes_the_same_grant() {
        let duration = PlanDuration::new(14).unwrap_or_else(|_| unreachable!());
        let grant = AccessGrant::issue(duration, t0()).unwrap_or_else(|_| unreachable!());

        let encoded = serde_json::to_string(&grant.to_record()).unwrap_or_default();
        assert!(!encoded.contains("expires_at"));

        let record: GrantRecord =
            serde_json::from_str(encoded.as_str()).unwrap_or_else(|_| unreachable!());
        let restored = AccessGrant::from_record(record).unwrap_or_else(|_| unreachable!());
        assert_eq!(restored, grant);
    }

    #[test]
    fn purchase_instant_is_kept_to_the_microsecond() {
        let purchased = t0() + Duration::nanoseconds(783_744_257);
        let duration = PlanDuration::new(7).unwrap_or_else(|_| unreachable!());
        let grant = AccessGrant::issue(duration, purchased).unwrap_or_else(|_| unreachable!());

        assert_eq!(grant.granted_at(), t0() + Duration::microseconds(783_744));

        let mut record = grant.to_record();
        record.granted_at = record.granted_at.trunc_subsecs(6);
        let restored = AccessGrant::from_record(record).unwrap_or_else(|_| unreachable!());
        assert_eq!(restored, grant);
        assert_eq!(restored.expires_at(), grant.expires_at());
    }

    #[test]
    fn retention_covers_expiry_and_idle_window() {
        let duration = PlanDuration::new(3).unwrap_or_else(|_| unreachable!());
        let grant = AccessGrant::issue(duration, t0()).unwrap_or_else(|_| unreachable!());

        assert_eq!(grant.retained_until(Duration::minutes(30)), grant.expires_at());
        assert_eq!(
            grant.retained_until(Duration::days(5)),
            t0() + Duration::days(5)
        );
    }

    #[test]
    fn record_with_zero_duration_is_rejected_on_reload() {
        let record = GrantRecord {
            grant_id: Uuid::new_v4(),
            granted_at: t0(),
            duration_days: 0,
        };
        assert!(AccessGrant::from_record(record).is_err());
    }

    #[test]
    fn standard_tiers_are_three_seven_and_fourteen_days() {
        let tiers = AccessPlan::standard_tiers();
        let days: Vec<u32> = tiers.iter().map(|plan| plan.duration().days()).collect();
        assert_eq!(days, vec![3, 7, 14]);
        assert_eq!(tiers[1].label(), "7-Day Access");
    }
}
