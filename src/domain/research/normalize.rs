//! Field-by-field normalization of parsed reply payloads.
//!
//! Model output drifts: fields go missing and numbers arrive as
//! quoted strings. Each normalizer maps whatever JSON was parsed into
//! its fixed result shape instead of failing. The rules:
//!
//! - absent, `null`, or wrong-typed fields become the shape's default
//!   (empty string, empty list, or zero);
//! - numeric fields accept numeric strings ("85" coerces to 85.0),
//!   anything else non-numeric becomes zero;
//! - list elements of the wrong kind are dropped, never converted;
//! - unrecognized fields are ignored.

use super::shapes::{
    AirFreightCost, Buyer, ChartData, Competitor, Creator, LogisticsEstimate, MarketAnalysis,
    SeaFreightCost, SharePoint, SwotAnalysis, TradeEvaluation, TrendPoint,
};
use serde_json::Value;

pub(crate) fn market_analysis(value: &Value) -> MarketAnalysis {
    MarketAnalysis {
        market_summary: string_field(value, "marketSummary"),
        five_year_trend_analysis: string_field(value, "fiveYearTrendAnalysis"),
        swot: value.get("swot").map(swot).unwrap_or_default(),
        competitors: record_list(value, "competitors", competitor),
        chart_data: value.get("chartData").map(chart_data).unwrap_or_default(),
        consumer_sentiment: string_field(value, "consumerSentiment"),
        marketing_channels: string_list(value, "marketingChannels"),
        pricing_strategy: string_field(value, "pricingStrategy"),
        action_plan: string_list(value, "actionPlan"),
        search_links: Vec::new(),
    }
}

pub(crate) fn logistics_estimate(value: &Value) -> LogisticsEstimate {
    LogisticsEstimate {
        sea_freight_cost: value
            .get("seaFreightCost")
            .map(sea_freight)
            .unwrap_or_default(),
        air_freight_cost: value
            .get("airFreightCost")
            .map(air_freight)
            .unwrap_or_default(),
        advice: string_field(value, "advice"),
        warehouses: string_list(value, "warehouses"),
    }
}

pub(crate) fn trade_evaluation(value: &Value) -> TradeEvaluation {
    TradeEvaluation::from_scores(
        number_field(value, "matchScore"),
        number_field(value, "demandScore"),
        number_field(value, "developmentScore"),
        string_field(value, "reasoning"),
    )
}

/// Normalizes a reply whose root should be an array of buyer records.
/// A non-array root yields an empty list.
pub(crate) fn buyer_list(value: &Value) -> Vec<Buyer> {
    root_records(value, buyer)
}

/// Normalizes a reply whose root should be an array of creator records.
/// A non-array root yields an empty list.
pub(crate) fn creator_list(value: &Value) -> Vec<Creator> {
    root_records(value, creator)
}

fn swot(value: &Value) -> SwotAnalysis {
    SwotAnalysis {
        strengths: string_list(value, "strengths"),
        weaknesses: string_list(value, "weaknesses"),
        opportunities: string_list(value, "opportunities"),
        threats: string_list(value, "threats"),
    }
}

fn competitor(value: &Value) -> Competitor {
    Competitor {
        name: string_field(value, "name"),
        features: string_field(value, "features"),
        price: string_field(value, "price"),
        website: string_field(value, "website"),
    }
}

fn chart_data(value: &Value) -> ChartData {
    ChartData {
        trends: record_list(value, "trends", trend_point),
        shares: record_list(value, "shares", share_point),
    }
}

fn trend_point(value: &Value) -> TrendPoint {
    TrendPoint {
        year: string_field(value, "year"),
        market_size: number_field(value, "marketSize"),
    }
}

fn share_point(value: &Value) -> SharePoint {
    SharePoint {
        name: string_field(value, "name"),
        share: number_field(value, "share"),
    }
}

fn sea_freight(value: &Value) -> SeaFreightCost {
    SeaFreightCost {
        per_cbm: string_field(value, "perCbm"),
        per_unit: string_field(value, "perUnit"),
    }
}

fn air_freight(value: &Value) -> AirFreightCost {
    AirFreightCost {
        per_kg: string_field(value, "perKg"),
        per_unit: string_field(value, "perUnit"),
    }
}

fn buyer(value: &Value) -> Buyer {
    Buyer {
        name: string_field(value, "name"),
        company_type: string_field(value, "type"),
        description: string_field(value, "description"),
        website: string_field(value, "website"),
    }
}

fn creator(value: &Value) -> Creator {
    Creator {
        handle: string_field(value, "handle"),
        name: string_field(value, "name"),
        followers: string_field(value, "followers"),
        avg_views: string_field(value, "avgViews"),
        description: string_field(value, "description"),
    }
}

fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn number_field(value: &Value, key: &str) -> f64 {
    match value.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or_default(),
        Some(Value::String(s)) => s.trim().parse().unwrap_or_default(),
        _ => 0.0,
    }
}

fn string_list(value: &Value, key: &str) -> Vec<String> {
    elements(value.get(key), |element| {
        element.as_str().map(str::to_string)
    })
}

fn record_list<T>(value: &Value, key: &str, record: fn(&Value) -> T) -> Vec<T> {
    elements(value.get(key), |element| {
        element.is_object().then(|| record(element))
    })
}

fn root_records<T>(value: &Value, record: fn(&Value) -> T) -> Vec<T> {
    elements(Some(value), |element| {
        element.is_object().then(|| record(element))
    })
}

fn elements<T>(value: Option<&Value>, keep: impl Fn(&Value) -> Option<T>) -> Vec<T> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(&keep).collect())
        .unwrap_or_default()
}
