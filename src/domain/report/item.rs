//! Report cart items.
//!
//! An item is one fragment a user pinned from a research result: a
//! paragraph of text, a chart series, or a SWOT quadrant. The payload
//! variant fixes both the kind tag and the data it may carry, so a
//! line-chart item can never hold SWOT data.

use crate::domain::foundation::{ReportItemId, Timestamp};
use crate::domain::research::{SharePoint, SwotAnalysis, TrendPoint};
use serde::{Deserialize, Serialize};

/// Kind-tagged payload of a report item.
///
/// Serializes with the front-end vocabulary: a `type` tag of `text`,
/// `chart-line`, `chart-bar`, or `swot` next to a `data` value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ReportPayload {
    #[serde(rename = "text")]
    Text(String),
    #[serde(rename = "chart-line")]
    LineChart(Vec<TrendPoint>),
    #[serde(rename = "chart-bar")]
    BarChart(Vec<SharePoint>),
    #[serde(rename = "swot")]
    Swot(SwotAnalysis),
}

impl ReportPayload {
    /// Returns the wire tag for this payload's kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ReportPayload::Text(_) => "text",
            ReportPayload::LineChart(_) => "chart-line",
            ReportPayload::BarChart(_) => "chart-bar",
            ReportPayload::Swot(_) => "swot",
        }
    }
}

/// One pinned fragment in the report cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportItem {
    pub id: ReportItemId,
    #[serde(flatten)]
    pub payload: ReportPayload,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub created_at: Timestamp,
}

impl ReportItem {
    /// Creates an item with a fresh id and the current time.
    pub fn new(title: impl Into<String>, payload: ReportPayload, comment: Option<String>) -> Self {
        Self {
            id: ReportItemId::new(),
            payload,
            title: title.into(),
            comment,
            created_at: Timestamp::now(),
        }
    }
}

/// Direction an item moves within the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_items_get_distinct_ids() {
        let a = ReportItem::new("Summary", ReportPayload::Text("growing".into()), None);
        let b = ReportItem::new("Summary", ReportPayload::Text("growing".into()), None);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn text_item_serializes_with_kind_tag() {
        let item = ReportItem::new(
            "Market Summary",
            ReportPayload::Text("Steady growth.".into()),
            Some("from UK run".into()),
        );
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["type"], "text");
        assert_eq!(json["data"], "Steady growth.");
        assert_eq!(json["title"], "Market Summary");
        assert_eq!(json["comment"], "from UK run");
        assert!(json["id"].is_string());
        assert!(json["created_at"].is_string());
    }

    #[test]
    fn chart_kinds_use_dashed_tags() {
        let line = ReportPayload::LineChart(vec![TrendPoint {
            year: "2024".into(),
            market_size: 75.0,
        }]);
        let bar = ReportPayload::BarChart(vec![SharePoint {
            name: "Acme".into(),
            share: 30.0,
        }]);

        assert_eq!(line.kind(), "chart-line");
        assert_eq!(bar.kind(), "chart-bar");

        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["type"], "chart-line");
        assert_eq!(json["data"][0]["marketSize"], 75.0);
    }

    #[test]
    fn absent_comment_is_omitted() {
        let item = ReportItem::new("Trends", ReportPayload::Text("flat".into()), None);
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("comment").is_none());
    }

    #[test]
    fn items_round_trip_through_json() {
        let item = ReportItem::new(
            "SWOT",
            ReportPayload::Swot(SwotAnalysis {
                strengths: vec!["cheap".into()],
                ..SwotAnalysis::default()
            }),
            None,
        );
        let serialized = serde_json::to_string(&item).unwrap();
        let parsed: ReportItem = serde_json::from_str(&serialized).unwrap();
        assert_eq!(parsed, item);
    }

    #[test]
    fn move_direction_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&MoveDirection::Up).unwrap(), "\"up\"");
        let direction: MoveDirection = serde_json::from_str("\"down\"").unwrap();
        assert_eq!(direction, MoveDirection::Down);
    }
}
