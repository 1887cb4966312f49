mod errors;
mod params;

use errors::ApiError;
use params::PageQuery;

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::{Method, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::mixpeek::SearchProvider;
use crate::search::{self, SearchRequest, SearchResponse};

/// Shared handler state. Immutable after startup.
pub struct AppState<P> {
    provider: Arc<P>,
    default_collection: Arc<str>,
}

impl<P> AppState<P> {
    pub fn new(provider: P, default_collection: &str) -> Self {
        Self {
            provider: Arc::new(provider),
            default_collection: Arc::from(default_collection),
        }
    }
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            default_collection: Arc::clone(&self.default_collection),
        }
    }
}

pub fn router<P: SearchProvider + 'static>(state: AppState<P>) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/health", get(health))
        .route("/search", post(search_handler::<P>))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]),
        )
        .layer(CatchPanicLayer::new())
        .with_state(state)
}

async fn hello() -> &'static str {
    "hello world!"
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn search_handler<P: SearchProvider>(
    State(state): State<AppState<P>>,
    query: Result<Query<PageQuery>, QueryRejection>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Query(page) = query.map_err(|e| {
        debug!(error = %e, "rejected search query string");
        ApiError::BadRequest("Invalid query parameters".into())
    })?;
    let Json(mut request) = body.map_err(|e| {
        debug!(error = %e, "rejected search body");
        ApiError::BadRequest("Invalid request body".into())
    })?;
    page.apply(&mut request);

    let response = search::run(&*state.provider, &state.default_collection, request).await?;
    Ok(Json(response))
}
