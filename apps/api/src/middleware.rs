use axum::extract::{Request, State};
use axum::http::{HeaderValue, Method, header};
use axum::middleware::Next;
use axum::response::Response;
use dealgate_core::{AppError, AppResult, SessionId};
use tower_sessions::Session;
use url::Url;

use crate::error::ApiResult;
use crate::state::AppState;

/// Session key holding the entitlement partition id.
pub const SESSION_ENTITLEMENT_KEY: &str = "entitlement_session_id";

/// Attaches the caller's [`SessionId`] to the request, creating one for new
/// visitors.
pub async fn resolve_entitlement_session(
    session: Session,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let session_id = entitlement_session_id(&session).await?;

    request.extensions_mut().insert(session_id);
    Ok(next.run(request).await)
}

pub(crate) async fn entitlement_session_id(session: &Session) -> AppResult<SessionId> {
    let existing = session
        .get::<SessionId>(SESSION_ENTITLEMENT_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read session state: {error}")))?;

    if let Some(session_id) = existing {
        return Ok(session_id);
    }

    let session_id = SessionId::new();
    session
        .insert(SESSION_ENTITLEMENT_KEY, session_id)
        .await
        .map_err(|error| AppError::Internal(format!("failed to write session state: {error}")))?;

    Ok(session_id)
}

pub async fn require_same_origin_for_mutations(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    if is_state_changing_method(request.method()) {
        let headers = request.headers();

        if let Some(fetch_site) = headers.get("sec-fetch-site") {
            if fetch_site == HeaderValue::from_static("cross-site") {
                return Err(AppError::Unauthorized("cross-site request blocked".to_owned()).into());
            }
        }

        let origin = headers
            .get(header::ORIGIN)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        let referer = headers
            .get(header::REFERER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        if !origin_is_allowed(origin, referer, state.frontend_url.as_str()) {
            return Err(AppError::Unauthorized("origin validation failed".to_owned()).into());
        }
    }

    Ok(next.run(request).await)
}

fn origin_is_allowed(origin: &str, referer: &str, frontend_url: &str) -> bool {
    let Ok(frontend_url) = Url::parse(frontend_url) else {
        return false;
    };
    let allowed_origin = frontend_url.origin();
    let matches_frontend =
        |value: &str| Url::parse(value).is_ok_and(|url| url.origin() == allowed_origin);

    matches_frontend(origin) || matches_frontend(referer)
}

fn is_state_changing_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}
