//! HTTP DTOs for report cart endpoints.
//!
//! Cart items already serialize with the front-end vocabulary (a `type`
//! tag next to a `data` value), so responses re-export the domain types
//! and wrap them in a cart envelope.

pub use crate::domain::report::{MoveDirection, ReportItem, ReportPayload};

use serde::{Deserialize, Serialize};

use crate::domain::report::ReportSnapshot;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to pin one fragment into the report cart.
#[derive(Debug, Clone, Deserialize)]
pub struct AddReportItemRequest {
    pub title: String,
    /// Kind tag and data, flattened into the body as `type` + `data`.
    #[serde(flatten)]
    pub payload: ReportPayload,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Request to shift one item up or down within the cart.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveReportItemRequest {
    pub direction: MoveDirection,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// The full report cart in its current order.
#[derive(Debug, Clone, Serialize)]
pub struct ReportCartResponse {
    pub items: Vec<ReportItem>,
}

impl From<ReportSnapshot> for ReportCartResponse {
    fn from(snapshot: ReportSnapshot) -> Self {
        Self {
            items: snapshot.to_vec(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Response
// ════════════════════════════════════════════════════════════════════════════════

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::research::TrendPoint;
    use std::sync::Arc;

    #[test]
    fn add_request_parses_flattened_text_payload() {
        let json = r#"{
            "title": "Market Summary",
            "type": "text",
            "data": "Steady growth.",
            "comment": "from UK run"
        }"#;

        let request: AddReportItemRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.title, "Market Summary");
        assert_eq!(
            request.payload,
            ReportPayload::Text("Steady growth.".to_string())
        );
        assert_eq!(request.comment.as_deref(), Some("from UK run"));
    }

    #[test]
    fn add_request_parses_chart_payload_without_comment() {
        let json = r#"{
            "title": "Five Year Trend",
            "type": "chart-line",
            "data": [{"year": "2024", "marketSize": 75.0}]
        }"#;

        let request: AddReportItemRequest = serde_json::from_str(json).unwrap();
        assert!(request.comment.is_none());
        match request.payload {
            ReportPayload::LineChart(points) => {
                assert_eq!(points[0].year, "2024");
                assert_eq!(points[0].market_size, 75.0);
            }
            other => panic!("wrong payload kind: {other:?}"),
        }
    }

    #[test]
    fn add_request_rejects_unknown_kind_tags() {
        let json = r#"{"title": "Mystery", "type": "gif", "data": "nope"}"#;
        let result: Result<AddReportItemRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn move_request_parses_lowercase_directions() {
        let request: MoveReportItemRequest =
            serde_json::from_str(r#"{"direction": "up"}"#).unwrap();
        assert_eq!(request.direction, MoveDirection::Up);
    }

    #[test]
    fn cart_response_serializes_items_in_order() {
        let first = ReportItem::new("Summary", ReportPayload::Text("growing".into()), None);
        let second = ReportItem::new(
            "Trend",
            ReportPayload::LineChart(vec![TrendPoint {
                year: "2025".into(),
                market_size: 90.0,
            }]),
            None,
        );
        let snapshot: ReportSnapshot = Arc::from(vec![first, second]);

        let response = ReportCartResponse::from(snapshot);
        assert_eq!(response.items.len(), 2);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["items"][0]["type"], "text");
        assert_eq!(json["items"][1]["type"], "chart-line");
        assert_eq!(json["items"][1]["data"][0]["marketSize"], 90.0);
    }
}
