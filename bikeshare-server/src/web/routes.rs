//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::get,
};
use tracing::{debug, error};

use crate::service::QueryError;
use crate::stations::{FilterError, PartialStationRecord};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/live", get(health))
        .route("/ready", get(health))
        .route("/v1/stations", get(list_stations))
        .route("/v1/stations/:station_id", get(get_station))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn root() -> Redirect {
    Redirect::temporary("/v1/stations")
}

/// List stations, filtered, limited and projected per the query string.
async fn list_stations(
    State(state): State<AppState>,
    req: Result<Query<ListStationsRequest>, QueryRejection>,
) -> Result<Json<Vec<PartialStationRecord>>, AppError> {
    let Query(req) = req?;
    // Compile filters before spending two upstream requests
    let query = req.to_query()?;
    let stations = state.stations.list(&query).await?;
    Ok(Json(stations))
}

/// Look up one station by id.
async fn get_station(
    State(state): State<AppState>,
    Path(station_id): Path<String>,
    req: Result<Query<GetStationRequest>, QueryRejection>,
) -> Result<Json<PartialStationRecord>, AppError> {
    let Query(req) = req?;
    let selection = req.selection();
    let station = state.stations.get(&station_id, selection.as_ref()).await?;
    Ok(Json(station))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    ServiceUnavailable { message: String },
}

impl From<FilterError> for AppError {
    fn from(e: FilterError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::BadRequest {
            message: e.body_text(),
        }
    }
}

impl From<QueryError> for AppError {
    fn from(e: QueryError) -> Self {
        match e {
            QueryError::Filter(e) => e.into(),
            QueryError::NotFound { .. } => AppError::NotFound {
                message: e.to_string(),
            },
            QueryError::Fetch(_) => AppError::ServiceUnavailable {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::ServiceUnavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
        };

        if status.is_server_error() {
            error!(%status, "{message}");
        } else {
            debug!(%status, "{message}");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
