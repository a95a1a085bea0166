//! Waitlist signup endpoint

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use kwi_common::models::NewWaitlistEntry;
use serde::Serialize;
use tracing::{info, warn};

use crate::{ApiError, ApiResult, AppState};

/// Signup confirmation
#[derive(Debug, Serialize)]
pub struct WaitlistResponse {
    pub message: String,
    pub id: u64,
}

/// POST /api/waitlist
///
/// 201 on signup, 400 on invalid fields, 409 when the email is already registered.
pub async fn join_waitlist(
    State(state): State<AppState>,
    Json(request): Json<NewWaitlistEntry>,
) -> ApiResult<(StatusCode, Json<WaitlistResponse>)> {
    request.validate()?;

    if state.waitlist.find_by_email(&request.email).await.is_some() {
        warn!("Duplicate waitlist signup rejected");
        return Err(ApiError::Conflict(
            "Email already registered to waitlist".to_string(),
        ));
    }

    // create() re-checks under the write lock for racing signups
    let entry = state.waitlist.create(request).await?;
    info!("Waitlist signup {} recorded", entry.id);

    Ok((
        StatusCode::CREATED,
        Json(WaitlistResponse {
            message: "Successfully added to waitlist".to_string(),
            id: entry.id,
        }),
    ))
}

/// Build waitlist routes
pub fn waitlist_routes() -> Router<AppState> {
    Router::new().route("/api/waitlist", post(join_waitlist))
}
