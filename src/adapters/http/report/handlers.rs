//! HTTP handlers for report cart endpoints.
//!
//! Every endpoint answers with the full cart in its current order, so
//! the front end can re-render without a follow-up fetch. Storage
//! failures never surface here; the store recovers them internally.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::domain::foundation::ReportItemId;
use crate::domain::report::ReportStore;

use super::dto::{AddReportItemRequest, ErrorResponse, MoveReportItemRequest, ReportCartResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state for the report endpoints.
#[derive(Clone)]
pub struct ReportAppState {
    pub store: Arc<ReportStore>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Report Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/report - Return the cart in its current order
pub async fn get_report(State(state): State<ReportAppState>) -> impl IntoResponse {
    Json(ReportCartResponse::from(state.store.snapshot()))
}

/// POST /api/report/items - Pin one fragment into the cart
pub async fn add_report_item(
    State(state): State<ReportAppState>,
    Json(request): Json<AddReportItemRequest>,
) -> impl IntoResponse {
    state
        .store
        .add_item(request.title, request.payload, request.comment)
        .await;

    (
        StatusCode::CREATED,
        Json(ReportCartResponse::from(state.store.snapshot())),
    )
}

/// DELETE /api/report/items/:id - Remove one item; unknown ids are a no-op
pub async fn remove_report_item(
    State(state): State<ReportAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ReportApiError> {
    let id = parse_item_id(&id)?;
    state.store.remove_item(id).await;

    Ok(Json(ReportCartResponse::from(state.store.snapshot())))
}

/// POST /api/report/items/:id/move - Shift one item up or down
pub async fn move_report_item(
    State(state): State<ReportAppState>,
    Path(id): Path<String>,
    Json(request): Json<MoveReportItemRequest>,
) -> Result<impl IntoResponse, ReportApiError> {
    let id = parse_item_id(&id)?;
    state.store.move_item(id, request.direction).await;

    Ok(Json(ReportCartResponse::from(state.store.snapshot())))
}

/// DELETE /api/report - Empty the cart
pub async fn clear_report(State(state): State<ReportAppState>) -> impl IntoResponse {
    state.store.clear().await;

    Json(ReportCartResponse::from(state.store.snapshot()))
}

fn parse_item_id(raw: &str) -> Result<ReportItemId, ReportApiError> {
    raw.parse()
        .map_err(|_| ReportApiError::InvalidItemId(raw.to_string()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type for the report endpoints.
#[derive(Debug)]
pub enum ReportApiError {
    /// The path carried something that is not an item id.
    InvalidItemId(String),
}

impl IntoResponse for ReportApiError {
    fn into_response(self) -> axum::response::Response {
        let ReportApiError::InvalidItemId(raw) = self;
        let body = ErrorResponse::bad_request(format!("'{raw}' is not a valid item id"));
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}
