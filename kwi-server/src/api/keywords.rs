//! Keyword search, data and export endpoints

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::api::UserId;
use crate::service::KeywordSearchResult;
use crate::view::RelatedView;
use crate::{ApiError, ApiResult, AppState};

/// Body of POST /api/keywords/search
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub keyword: Option<String>,
}

/// Query parameters for GET /api/keywords/export
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub keyword: Option<String>,
}

fn require_keyword(keyword: Option<String>, message: &str) -> ApiResult<String> {
    keyword
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest(message.to_string()))
}

/// POST /api/keywords/search
///
/// Logs the search (attributed to `X-User-Id` when present) and returns
/// overview + related keywords.
pub async fn search_keywords(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Json(request): Json<SearchRequest>,
) -> ApiResult<Json<KeywordSearchResult>> {
    let keyword = require_keyword(request.keyword, "Valid keyword is required")?;
    let result = state.keywords.search_keywords(&keyword, user_id).await?;
    Ok(Json(result))
}

/// GET /api/keywords/data/:keyword?sort_by=volume&min_volume=1000
///
/// Same as search (including the history entry); optional query
/// parameters filter and order the related list.
pub async fn get_keyword_data(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(keyword): Path<String>,
    Query(view): Query<RelatedView>,
) -> ApiResult<Json<KeywordSearchResult>> {
    let keyword = require_keyword(Some(keyword), "Keyword parameter is required")?;
    let mut result = state.keywords.search_keywords(&keyword, user_id).await?;
    result.related = view.apply(result.related);
    Ok(Json(result))
}

/// GET /api/keywords/export?keyword=...
///
/// CSV download of the related keywords.
pub async fn export_keywords(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> ApiResult<impl IntoResponse> {
    let keyword = require_keyword(query.keyword, "Valid keyword parameter is required")?;
    let csv = state.keywords.export_keywords(&keyword).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&keyword)),
        ],
        csv,
    ))
}

/// `attachment; filename="keyword-data-{keyword}.csv"` with header-unsafe
/// characters replaced by `_`
pub fn content_disposition(keyword: &str) -> String {
    let name: String = keyword
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect();
    format!("attachment; filename=\"keyword-data-{}.csv\"", name)
}

/// Build keyword routes
pub fn keyword_routes() -> Router<AppState> {
    Router::new()
        .route("/api/keywords/search", post(search_keywords))
        .route("/api/keywords/data/:keyword", get(get_keyword_data))
        .route("/api/keywords/export", get(export_keywords))
}
