//! API routes for floodd

use crate::server::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use flood_common::{
    paths, DispatchResponse, ErrorResponse, ExportResponse, FloodError, HealthResponse,
    MessageResponse, ReportPayload, ReportResponse, StatusResponse, UndoResponse, VERSION,
};
use std::sync::Arc;
use tracing::{error, warn};

type AppStateArc = Arc<AppState>;

/// Maps service errors onto HTTP status codes and JSON bodies
pub struct ApiError(pub FloodError);

impl From<FloodError> for ApiError {
    fn from(err: FloodError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            FloodError::InvalidInput(_) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Invalid input".to_string(),
                }),
            )
                .into_response(),
            err @ (FloodError::QueueEmpty | FloodError::NothingToUndo) => (
                StatusCode::NOT_FOUND,
                Json(MessageResponse {
                    message: err.to_string(),
                }),
            )
                .into_response(),
            err => {
                error!("  Request failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: err.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

// ============================================================================
// Dispatch Routes
// ============================================================================

pub fn dispatch_routes() -> Router<AppStateArc> {
    Router::new()
        .route(paths::REPORT, post(report))
        .route(paths::DISPATCH, get(dispatch))
        .route(paths::UNDO, post(undo))
        .route(paths::GENERATE_DAILY_LOG, get(generate_daily_log))
}

async fn report(
    State(state): State<AppStateArc>,
    body: Bytes,
) -> Result<(StatusCode, Json<ReportResponse>), ApiError> {
    let payload = ReportPayload::from_body(&body).map_err(|e| {
        warn!("Rejected report body: {}", e);
        e
    })?;

    let mut service = state.service.lock().await;
    let new_request = service.report(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ReportResponse {
            message: "Request reported successfully".to_string(),
            new_request,
        }),
    ))
}

async fn dispatch(State(state): State<AppStateArc>) -> Result<Json<DispatchResponse>, ApiError> {
    let service = state.service.lock().await.dispatch()?;

    Ok(Json(DispatchResponse {
        message: "Service dispatched".to_string(),
        service,
    }))
}

async fn undo(State(state): State<AppStateArc>) -> Result<Json<UndoResponse>, ApiError> {
    let last_dispatched = state.service.lock().await.undo()?;

    Ok(Json(UndoResponse {
        message: "Dispatch undone".to_string(),
        last_dispatched,
    }))
}

async fn generate_daily_log(
    State(state): State<AppStateArc>,
) -> Result<Json<ExportResponse>, ApiError> {
    let service = state.service.lock().await;
    let file_path = service.generate_daily_log().await?;

    Ok(Json(ExportResponse {
        message: "Daily log generated".to_string(),
        file_path,
    }))
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new()
        .route(paths::HEALTH, get(health))
        .route(paths::STATUS, get(status))
}

async fn health(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: VERSION.to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}

async fn status(State(state): State<AppStateArc>) -> Json<StatusResponse> {
    Json(state.service.lock().await.snapshot())
}
