//! kwi-server library - keyword research demo service
//!
//! Synthesizes keyword metrics for a seed phrase, caches them in memory and
//! serves search, history, CSV export and waitlist endpoints.

pub mod api;
pub mod error;
pub mod service;
pub mod store;
pub mod synth;
pub mod view;

pub use crate::error::{ApiError, ApiResult};

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};
use rand::RngCore;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::service::KeywordService;
use crate::store::{KeywordStore, SearchHistoryStore, WaitlistStore};
use crate::synth::MetricsSynthesizer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Keyword search, history and export
    pub keywords: Arc<KeywordService>,
    /// Waitlist signups
    pub waitlist: Arc<WaitlistStore>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(keywords: Arc<KeywordService>, waitlist: Arc<WaitlistStore>) -> Self {
        Self {
            keywords,
            waitlist,
            startup_time: Utc::now(),
        }
    }

    /// Fresh in-memory stores with an entropy-seeded synthesizer
    pub fn in_memory() -> Self {
        Self::with_synthesizer(MetricsSynthesizer::from_entropy())
    }

    /// Fresh in-memory stores drawing synthetic metrics from `rng`
    pub fn with_rng<R: RngCore + Send + 'static>(rng: R) -> Self {
        Self::with_synthesizer(MetricsSynthesizer::new(rng))
    }

    fn with_synthesizer(synthesizer: MetricsSynthesizer) -> Self {
        let service = KeywordService::new(
            Arc::new(KeywordStore::new()),
            Arc::new(SearchHistoryStore::new()),
            Arc::new(synthesizer),
        );
        Self::new(Arc::new(service), Arc::new(WaitlistStore::new()))
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::keyword_routes())
        .merge(api::history_routes())
        .merge(api::waitlist_routes())
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Enable CORS for local access
        .layer(CorsLayer::permissive())
}
