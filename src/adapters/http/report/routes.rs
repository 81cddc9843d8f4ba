//! HTTP routes for report cart endpoints.

use axum::routing::{delete, get, post};
use axum::Router;

use super::handlers::{
    add_report_item, clear_report, get_report, move_report_item, remove_report_item,
    ReportAppState,
};

/// Creates the report router with all routes.
pub fn report_routes(state: ReportAppState) -> Router {
    Router::new()
        // GET /api/report, DELETE /api/report
        .route("/api/report", get(get_report).delete(clear_report))
        // POST /api/report/items
        .route("/api/report/items", post(add_report_item))
        // DELETE /api/report/items/:id
        .route("/api/report/items/:id", delete(remove_report_item))
        // POST /api/report/items/:id/move
        .route("/api/report/items/:id/move", post(move_report_item))
        .with_state(state)
}
