//! HTTP adapter for report cart endpoints.
//!
//! Exposes the report cart via REST API:
//! - `GET /api/report` - Return the cart in its current order
//! - `POST /api/report/items` - Pin one fragment into the cart
//! - `DELETE /api/report/items/:id` - Remove one item
//! - `POST /api/report/items/:id/move` - Shift one item up or down
//! - `DELETE /api/report` - Empty the cart

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::ReportAppState;
pub use routes::report_routes;
