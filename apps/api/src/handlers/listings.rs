use axum::Json;
use axum::extract::{Extension, Path, State};
use dealgate_core::SessionId;

use crate::dto::GatedListingResponse;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_listings_handler(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> ApiResult<Json<Vec<GatedListingResponse>>> {
    let listings = state
        .listing_gate_service
        .browse(session_id)
        .await?
        .into_iter()
        .map(GatedListingResponse::from)
        .collect();

    Ok(Json(listings))
}

pub async fn get_listing_handler(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Path(listing_id): Path<String>,
) -> ApiResult<Json<GatedListingResponse>> {
    let listing = state
        .listing_gate_service
        .view_listing(session_id, listing_id.as_str())
        .await?;

    Ok(Json(GatedListingResponse::from(listing)))
}
