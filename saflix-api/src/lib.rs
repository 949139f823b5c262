//! HTTP surface for the Saflix backend.
//!
//! One endpoint, three actions. Every outcome — listing, stream descriptor,
//! or failure — leaves through the same `{success, data?, error?}` envelope,
//! and failures carry a human-readable message only. The endpoint is meant
//! to be called from any front-end origin, so CORS is wide open.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use saflix_common::SaflixError;
use saflix_scrape::catalog::Catalog;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::error;

/// Query parameters of the `/api` endpoint. Everything is optional at the
/// extractor level; validation happens in the dispatcher so a missing
/// companion parameter produces the fixed message instead of a 422.
#[derive(Debug, Deserialize)]
pub struct ActionParams {
    pub action: Option<String>,
    pub query: Option<String>,
    pub url: Option<String>,
}

/// Uniform response envelope.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl Envelope<()> {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Build the application router around a catalog.
pub fn router(catalog: Arc<Catalog>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api", get(handle_action).post(handle_action))
        .route("/health", get(health))
        .layer(cors)
        .with_state(catalog)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Dispatch on the `action` discriminator.
///
/// Parameter validation runs before any browser work: a request rejected
/// here never acquires a session.
async fn handle_action(
    State(catalog): State<Arc<Catalog>>,
    Query(params): Query<ActionParams>,
) -> Response {
    match params.action.as_deref() {
        Some("home") => respond(catalog.home().await),
        Some("search") => match params.query.as_deref().filter(|q| !q.is_empty()) {
            Some(query) => respond(catalog.search(query).await),
            None => rejection("Query parameter required"),
        },
        Some("stream") => match params.url.as_deref().filter(|u| !u.is_empty()) {
            Some(url) => respond(catalog.stream(url).await),
            None => rejection("URL parameter required"),
        },
        _ => rejection("Invalid action"),
    }
}

fn respond<T: Serialize>(result: saflix_common::Result<T>) -> Response {
    match result {
        Ok(data) => (StatusCode::OK, Json(Envelope::ok(data))).into_response(),
        Err(err) => {
            let status = match &err {
                SaflixError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            error!(target: "api", %status, error = %err, "request failed");
            (status, Json(Envelope::failure(err.to_string()))).into_response()
        }
    }
}

fn rejection(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(Envelope::failure(message)),
    )
        .into_response()
}
