//! Search history endpoints

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::service::SearchHistoryResponse;
use crate::AppState;

/// GET /api/keywords/history
///
/// All searches, newest first.
pub async fn get_search_history(State(state): State<AppState>) -> Json<SearchHistoryResponse> {
    Json(state.keywords.get_search_history().await)
}

/// GET /api/users/:user_id/history
///
/// Searches logged for one user, newest first.
pub async fn get_user_search_history(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Json<SearchHistoryResponse> {
    Json(state.keywords.get_user_search_history(user_id).await)
}

/// Build history routes
pub fn history_routes() -> Router<AppState> {
    Router::new()
        .route("/api/keywords/history", get(get_search_history))
        .route("/api/users/:user_id/history", get(get_user_search_history))
}
