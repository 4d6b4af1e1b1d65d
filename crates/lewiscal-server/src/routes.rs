//! HTTP routes.
//!
//! | Method | Path                     | Handler           |
//! |--------|--------------------------|-------------------|
//! | GET    | `/`                      | [`health`]        |
//! | GET    | `/api/refresh?url=`      | [`refresh_calendar`] |
//! | POST   | `/api/save-calendar-url` | [`save_calendar_url`] |

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::Method;
use axum::routing::{get, post};
use axum::{Json, Router};
use lewiscal_providers::{CalendarSource, ProviderResult, RefreshReport, refresh};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::error::ApiError;
use crate::state::AppState;

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/", get(health))
        .route("/api/refresh", get(refresh_calendar))
        .route("/api/save-calendar-url", post(save_calendar_url))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness text.
pub async fn health() -> &'static str {
    "LewisCal Backend is Running"
}

#[derive(Debug, Default, Deserialize)]
pub struct RefreshQuery {
    pub url: Option<String>,
}

/// Loads the linked (or local) calendar and returns the merged event list.
pub async fn refresh_calendar(
    State(state): State<AppState>,
    Query(query): Query<RefreshQuery>,
) -> Result<Json<RefreshReport>, ApiError> {
    let source = CalendarSource::resolve(query.url.as_deref(), &state.config().calendar_path);

    run_refresh(&state, source).await.map(Json).map_err(|e| {
        error!(error = %e, "Refresh failed");
        ApiError::refresh(&e)
    })
}

async fn run_refresh(state: &AppState, source: CalendarSource) -> ProviderResult<RefreshReport> {
    let source = source.into_source(state.client())?;
    refresh(source.as_ref(), state.curated()).await
}

#[derive(Debug, Default, Deserialize)]
struct SaveRequest {
    url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub success: bool,
    pub message: &'static str,
}

/// Stores the calendar link sent as `{"url": "..."}`.
///
/// The body is read leniently: anything that is not a JSON object with a
/// non-empty string `url` counts as a missing URL.
pub async fn save_calendar_url(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SaveResponse>, ApiError> {
    let request: SaveRequest = serde_json::from_slice(&body).unwrap_or_default();
    let url = request
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(ApiError::missing_calendar_url)?;

    state.store().save(&url).await.map_err(|e| {
        error!(error = %e, "Failed to save calendar URL");
        ApiError::save_failed()
    })?;

    info!(url = %url, "Calendar URL saved");
    Ok(Json(SaveResponse {
        success: true,
        message: "Calendar URL saved!",
    }))
}
