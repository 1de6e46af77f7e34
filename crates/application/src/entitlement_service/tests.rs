use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use tokio::sync::Mutex;

use dealgate_core::{AppError, AppResult, SessionId};
use dealgate_domain::{AccessGrant, EntitlementStatus};

use crate::entitlement_ports::{Clock, EntitlementRepository, PlanPolicy};

use super::EntitlementService;

struct FakeClock {
    epoch_seconds: AtomicI64,
}

impl FakeClock {
    fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            epoch_seconds: AtomicI64::new(now.timestamp()),
        }
    }

    fn advance(&self, by: Duration) {
        self.epoch_seconds
            .fetch_add(by.num_seconds(), Ordering::SeqCst);
    }
}

impl Clock for FakeClock {
    fn now(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.epoch_seconds.load(Ordering::SeqCst), 0)
            .single()
            .unwrap_or_default()
    }
}

#[derive(Default)]
struct FakeEntitlementRepository {
    grants: Mutex<HashMap<SessionId, Vec<AccessGrant>>>,
    fail_appends: bool,
}

#[async_trait]
impl EntitlementRepository for FakeEntitlementRepository {
    async fn list_grants(&self, session_id: SessionId) -> AppResult<Vec<AccessGrant>> {
        Ok(self
            .grants
            .lock()
            .await
            .get(&session_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn append_grant(&self, session_id: SessionId, grant: &AccessGrant) -> AppResult<()> {
        if self.fail_appends {
            return Err(AppError::Internal("grant store unavailable".to_owned()));
        }

        self.grants
            .lock()
            .await
            .entry(session_id)
            .or_default()
            .push(grant.clone());
        Ok(())
    }

    async fn clear_session(&self, session_id: SessionId) -> AppResult<u64> {
        let removed = self.grants.lock().await.remove(&session_id);
        Ok(removed.map_or(0, |grants| grants.len() as u64))
    }
}

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 8, 0, 0)
        .single()
        .unwrap_or_default()
}

fn build_service(policy: PlanPolicy) -> (EntitlementService, Arc<FakeClock>) {
    let clock = Arc::new(FakeClock::starting_at(t0()));
    let service = EntitlementService::new(
        Arc::new(FakeEntitlementRepository::default()),
        clock.clone(),
        policy,
    );
    (service, clock)
}

#[tokio::test]
async fn new_session_is_locked() {
    let (service, _clock) = build_service(PlanPolicy::standard());
    let session_id = SessionId::new();

    assert!(matches!(service.is_active(session_id).await, Ok(false)));
    assert!(matches!(service.time_remaining(session_id).await, Ok(None)));

    let snapshot = service.snapshot(session_id).await;
    assert!(snapshot.is_ok());
    let snapshot = snapshot.unwrap_or_else(|_| unreachable!());
    assert_eq!(snapshot.status, EntitlementStatus::Locked);
    assert!(snapshot.grants.is_empty());
}

#[tokio::test]
async fn seven_day_pass_unlocks_until_the_exclusive_boundary() {
    let (service, clock) = build_service(PlanPolicy::standard());
    let session_id = SessionId::new();

    let grant = service.grant_access(session_id, 7).await;
    assert!(grant.is_ok());
    assert_eq!(
        grant.unwrap_or_else(|_| unreachable!()).expires_at(),
        t0() + Duration::days(7)
    );
    assert!(matches!(service.is_active(session_id).await, Ok(true)));

    clock.advance(Duration::days(7) - Duration::minutes(15));
    assert!(matches!(service.is_active(session_id).await, Ok(true)));

    clock.advance(Duration::minutes(15));
    assert!(matches!(service.is_active(session_id).await, Ok(false)));
}

#[tokio::test]
async fn later_fourteen_day_pass_drives_time_remaining() {
    let (service, clock) = build_service(PlanPolicy::standard());
    let session_id = SessionId::new();

    assert!(service.grant_access(session_id, 3).await.is_ok());
    clock.advance(Duration::days(1));
    assert!(service.grant_access(session_id, 14).await.is_ok());
    clock.advance(Duration::days(1));

    let remaining = service.time_remaining(session_id).await;
    assert!(remaining.is_ok());
    assert_eq!(
        remaining.unwrap_or_default(),
        Some(Duration::days(13))
    );

    let snapshot = service
        .snapshot(session_id)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(
        snapshot.status,
        EntitlementStatus::Unlocked {
            expires_at: t0() + Duration::days(15)
        }
    );
    assert_eq!(snapshot.grants.len(), 2);
}

#[tokio::test]
async fn zero_day_purchase_is_rejected_and_nothing_is_stored() {
    let (service, _clock) = build_service(PlanPolicy::any_positive());
    let session_id = SessionId::new();

    let result = service.grant_access(session_id, 0).await;
    assert!(matches!(result, Err(AppError::InvalidPlan(_))));

    let state = service.entitlement_state(session_id).await;
    assert!(state.is_ok());
    assert!(state.unwrap_or_default().grants().is_empty());
}

#[tokio::test]
async fn unoffered_tier_is_rejected() {
    let (service, _clock) = build_service(PlanPolicy::standard());
    let session_id = SessionId::new();

    let result = service.grant_access(session_id, 5).await;
    assert!(matches!(result, Err(AppError::InvalidPlan(_))));
    assert!(matches!(service.is_active(session_id).await, Ok(false)));
}

#[tokio::test]
async fn grants_do_not_leak_between_sessions() {
    let (service, _clock) = build_service(PlanPolicy::standard());
    let buyer = SessionId::new();
    let browser = SessionId::new();

    assert!(service.grant_access(buyer, 14).await.is_ok());

    assert!(matches!(service.is_active(buyer).await, Ok(true)));
    assert!(matches!(service.is_active(browser).await, Ok(false)));
}

#[tokio::test]
async fn ending_a_session_relocks_it() {
    let (service, _clock) = build_service(PlanPolicy::standard());
    let session_id = SessionId::new();

    assert!(service.grant_access(session_id, 3).await.is_ok());
    assert!(service.end_session(session_id).await.is_ok());
    assert!(matches!(service.is_active(session_id).await, Ok(false)));
}

#[tokio::test]
async fn explicit_purchase_instant_is_respected() {
    let (service, _clock) = build_service(PlanPolicy::standard());
    let session_id = SessionId::new();
    let earlier = t0() - Duration::days(5);

    let grant = service.grant_access_at(session_id, 3, earlier).await;
    assert!(grant.is_ok());
    assert!(matches!(service.is_active(session_id).await, Ok(false)));
}

#[tokio::test]
async fn purchased_grant_matches_the_stored_history() {
    let (service, _clock) = build_service(PlanPolicy::standard());
    let session_id = SessionId::new();
    let purchased = t0() + Duration::nanoseconds(120_450_999);

    let grant = service.grant_access_at(session_id, 7, purchased).await;
    assert!(grant.is_ok());
    let grant = grant.unwrap_or_else(|_| unreachable!());
    assert_eq!(grant.granted_at(), t0() + Duration::microseconds(120_450));

    let state = service.entitlement_state(session_id).await;
    assert!(state.is_ok());
    assert_eq!(state.unwrap_or_default().grants(), [grant].as_slice());
}

#[tokio::test]
async fn repository_failure_surfaces_as_internal_error() {
    let clock = Arc::new(FakeClock::starting_at(t0()));
    let service = EntitlementService::new(
        Arc::new(FakeEntitlementRepository {
            grants: Mutex::new(HashMap::new()),
            fail_appends: true,
        }),
        clock,
        PlanPolicy::standard(),
    );

    let result = service.grant_access(SessionId::new(), 7).await;
    assert!(matches!(result, Err(AppError::Internal(_))));
}

#[tokio::test]
async fn repeated_checks_are_stable() {
    let (service, _clock) = build_service(PlanPolicy::standard());
    let session_id = SessionId::new();
    assert!(service.grant_access(session_id, 3).await.is_ok());

    for _ in 0..5 {
        assert!(matches!(service.is_active(session_id).await, Ok(true)));
    }
}
