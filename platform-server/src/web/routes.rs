//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{SecondsFormat, Utc};
use tower_http::services::ServeDir;

use crate::board::build_board;
use crate::tfnsw::TfnswError;

use super::dto::*;
use super::state::AppState;

/// Journeys requested upstream when the query gives no count.
const DEFAULT_TRIP_COUNT: u32 = 10;

/// Create the application router.
///
/// `static_dir` is the path to the browser client's assets.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/departures", get(departures))
        .route("/api/stops", get(search_stops))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The departure board: plan trips upstream and normalize them into rows.
async fn departures(
    State(state): State<AppState>,
    Query(req): Query<DeparturesQuery>,
) -> Result<Json<DeparturesResponse>, AppError> {
    // One "now" per request: every countdown and the sort order are
    // derived from this single instant.
    let now = Utc::now();

    let origin = req.origin.unwrap_or_else(|| state.settings.origin.id.clone());
    let destination = req
        .destination
        .unwrap_or_else(|| state.settings.dest.id.clone());
    let count = req.count.unwrap_or(DEFAULT_TRIP_COUNT);

    let trip = state
        .tfnsw
        .plan_trip(&origin, &destination, count, now)
        .await?;

    let journeys = trip.journeys.as_deref().unwrap_or(&[]);
    let departures = build_board(journeys, now);

    tracing::debug!(
        origin = %origin,
        destination = %destination,
        journeys = journeys.len(),
        rows = departures.len(),
        "built departure board"
    );

    Ok(Json(DeparturesResponse {
        updated: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        departures,
    }))
}

/// Station search for the settings panel.
async fn search_stops(
    State(state): State<AppState>,
    Query(req): Query<StopsQuery>,
) -> Result<Json<StopsResponse>, AppError> {
    let query = req
        .q
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest {
            message: "Missing query param q".to_string(),
        })?;

    let response = state.tfnsw.find_stops(&query).await?;

    Ok(Json(StopsResponse::from_locations(response)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Upstream { message: String },
}

impl From<TfnswError> for AppError {
    fn from(e: TfnswError) -> Self {
        AppError::Upstream {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Upstream { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        tracing::error!("[{status}] {message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
