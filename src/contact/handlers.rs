use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{info, instrument, warn};

use crate::{
    contact::{dto::ContactRequest, repo_types::ContactInquiry, services::validate},
    errors::{bad_request, internal, ApiError},
    state::AppState,
};

pub fn contact_routes() -> Router<AppState> {
    Router::new().route("/contact", post(submit_inquiry))
}

#[instrument(skip(state, payload))]
pub async fn submit_inquiry(
    State(state): State<AppState>,
    Json(payload): Json<ContactRequest>,
) -> Result<(StatusCode, Json<ContactInquiry>), ApiError> {
    let inquiry = validate(payload).map_err(|e| {
        warn!(error = %e, "contact inquiry rejected");
        bad_request(e.to_string())
    })?;

    let stored = state
        .repo
        .create_contact_inquiry(inquiry)
        .await
        .map_err(internal)?;

    info!(inquiry_id = %stored.id, service = ?stored.service, "contact inquiry received");
    Ok((StatusCode::CREATED, Json(stored)))
}
