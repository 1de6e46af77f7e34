use axum::Router;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{delete, get, post};
use dealgate_core::AppError;
use tower_http::trace::TraceLayer;
use tower_sessions::{SessionManagerLayer, SessionStore};

use crate::state::AppState;
use crate::{handlers, middleware};

mod cors;

pub fn build_router<S>(
    app_state: AppState,
    session_layer: SessionManagerLayer<S>,
) -> Result<Router, AppError>
where
    S: SessionStore + Clone,
{
    let cors_layer = cors::build_cors_layer(app_state.frontend_url.as_str())?;

    let session_routes = Router::new()
        .route(
            "/api/access/plans",
            get(handlers::access::list_access_plans_handler),
        )
        .route(
            "/api/access/purchases",
            post(handlers::access::purchase_access_handler),
        )
        .route(
            "/api/access/status",
            get(handlers::access::access_status_handler),
        )
        .route(
            "/api/access/session",
            delete(handlers::access::end_access_session_handler),
        )
        .route(
            "/api/listings",
            get(handlers::listings::list_listings_handler),
        )
        .route(
            "/api/listings/{listing_id}",
            get(handlers::listings::get_listing_handler),
        )
        .route_layer(from_fn(middleware::resolve_entitlement_session));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(session_routes)
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_same_origin_for_mutations,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .layer(session_layer)
        .with_state(app_state))
}
