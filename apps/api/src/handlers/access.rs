use axum::Json;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use dealgate_core::{AppError, SessionId};
use tower_sessions::Session;

use crate::dto::{
    AccessGrantResponse, AccessPlanResponse, AccessStatusResponse, PurchaseAccessRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_access_plans_handler(
    State(state): State<AppState>,
) -> Json<Vec<AccessPlanResponse>> {
    Json(
        state
            .entitlement_service
            .offered_plans()
            .into_iter()
            .map(AccessPlanResponse::from)
            .collect(),
    )
}

pub async fn purchase_access_handler(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Json(payload): Json<PurchaseAccessRequest>,
) -> ApiResult<(StatusCode, Json<AccessGrantResponse>)> {
    let grant = state
        .entitlement_service
        .grant_access(session_id, payload.duration_days)
        .await?;

    Ok((StatusCode::CREATED, Json(AccessGrantResponse::from(grant))))
}

pub async fn access_status_handler(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> ApiResult<Json<AccessStatusResponse>> {
    let snapshot = state.entitlement_service.snapshot(session_id).await?;

    Ok(Json(AccessStatusResponse::from(snapshot)))
}

pub async fn end_access_session_handler(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    session: Session,
) -> ApiResult<StatusCode> {
    state.entitlement_service.end_session(session_id).await?;
    session
        .flush()
        .await
        .map_err(|error| AppError::Internal(format!("failed to end session: {error}")))?;

    Ok(StatusCode::NO_CONTENT)
}
