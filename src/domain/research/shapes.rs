//! Typed result shapes research replies normalize into.
//!
//! Every field is concrete: after normalization there are no optional
//! leaves, no absent keys, no wrong-typed values. Callers read these
//! structs without null checks. Wire casing stays camelCase so the
//! front-end vocabulary survives serialization unchanged.

use serde::{Deserialize, Serialize};

/// Tag selecting which result shape a reply normalizes into.
///
/// Dispatch happens on this tag alone; the payload is never inspected
/// to guess its shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    MarketAnalysis,
    Logistics,
    TradeEvaluation,
    BuyerList,
    CreatorList,
}

/// Fully-normalized go-to-market analysis for one product and market.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAnalysis {
    pub market_summary: String,
    pub five_year_trend_analysis: String,
    pub swot: SwotAnalysis,
    pub competitors: Vec<Competitor>,
    pub chart_data: ChartData,
    pub consumer_sentiment: String,
    pub marketing_channels: Vec<String>,
    pub pricing_strategy: String,
    pub action_plan: Vec<String>,
    /// Source links from the provider's search grounding. Always empty
    /// straight out of normalization; the caller that holds the reply
    /// metadata fills them in.
    pub search_links: Vec<String>,
}

/// Strengths / weaknesses / opportunities / threats quadrant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SwotAnalysis {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub opportunities: Vec<String>,
    pub threats: Vec<String>,
}

/// One competing product found during the market scan.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Competitor {
    pub name: String,
    pub features: String,
    /// Display price as found ("$29.99"), not a number.
    pub price: String,
    pub website: String,
}

/// Chartable series extracted alongside the written analysis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartData {
    pub trends: Vec<TrendPoint>,
    pub shares: Vec<SharePoint>,
}

/// Market size estimate for one year of the trend series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub year: String,
    pub market_size: f64,
}

/// Market share estimate for one competitor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SharePoint {
    pub name: String,
    pub share: f64,
}

/// Freight cost estimate with packaging and warehousing advice.
///
/// Costs stay display strings ("$180 - $220 USD") because the model
/// answers in ranges; nothing downstream computes with them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogisticsEstimate {
    pub sea_freight_cost: SeaFreightCost,
    pub air_freight_cost: AirFreightCost,
    pub advice: String,
    pub warehouses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeaFreightCost {
    pub per_cbm: String,
    pub per_unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirFreightCost {
    pub per_kg: String,
    pub per_unit: String,
}

/// Scored evaluation of one niche in one offline trade market.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeEvaluation {
    pub match_score: f64,
    pub demand_score: f64,
    pub development_score: f64,
    /// Mean of the three scores rounded to one decimal. Derived here,
    /// never read from the reply.
    pub average_score: f64,
    pub reasoning: String,
}

impl TradeEvaluation {
    /// Builds an evaluation from the three raw scores, deriving the
    /// rounded average.
    pub fn from_scores(
        match_score: f64,
        demand_score: f64,
        development_score: f64,
        reasoning: impl Into<String>,
    ) -> Self {
        let average = (match_score + demand_score + development_score) / 3.0;
        Self {
            match_score,
            demand_score,
            development_score,
            average_score: (average * 10.0).round() / 10.0,
            reasoning: reasoning.into(),
        }
    }
}

/// One potential B2B buyer, retailer, or distributor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Buyer {
    pub name: String,
    /// What kind of operation they run ("Supermarket Chain").
    #[serde(rename = "type")]
    pub company_type: String,
    pub description: String,
    pub website: String,
}

/// One short-video creator matched by the discovery filters.
///
/// Follower and view counts stay display strings ("12.5K"); they are
/// shown, never compared.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creator {
    pub handle: String,
    pub name: String,
    pub followers: String,
    pub avg_views: String,
    pub description: String,
}

/// Normalized outcome of one research reply, tagged by shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NormalizedResult {
    MarketAnalysis(MarketAnalysis),
    Logistics(LogisticsEstimate),
    TradeEvaluation(TradeEvaluation),
    BuyerList(Vec<Buyer>),
    CreatorList(Vec<Creator>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_score_rounds_to_one_decimal() {
        let eval = TradeEvaluation::from_scores(8.0, 6.0, 7.0, "solid niche");
        assert_eq!(eval.average_score, 7.0);

        let eval = TradeEvaluation::from_scores(7.0, 8.0, 8.0, "");
        assert_eq!(eval.average_score, 7.7);

        let eval = TradeEvaluation::from_scores(0.0, 0.0, 0.0, "");
        assert_eq!(eval.average_score, 0.0);
    }

    #[test]
    fn market_analysis_serializes_camel_case() {
        let analysis = MarketAnalysis {
            market_summary: "growing".to_string(),
            ..MarketAnalysis::default()
        };
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["marketSummary"], "growing");
        assert!(json["fiveYearTrendAnalysis"].is_string());
        assert!(json["chartData"]["trends"].is_array());
        assert!(json["searchLinks"].is_array());
    }

    #[test]
    fn trend_point_uses_camel_case_market_size() {
        let point = TrendPoint {
            year: "2024".to_string(),
            market_size: 75.0,
        };
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["marketSize"], 75.0);
    }

    #[test]
    fn buyer_company_type_serializes_as_type() {
        let buyer = Buyer {
            name: "Tesco".to_string(),
            company_type: "Supermarket Chain".to_string(),
            ..Buyer::default()
        };
        let json = serde_json::to_value(&buyer).unwrap();
        assert_eq!(json["type"], "Supermarket Chain");
    }

    #[test]
    fn creator_avg_views_serializes_camel_case() {
        let creator = Creator {
            handle: "@kitchenfinds".to_string(),
            avg_views: "20K".to_string(),
            ..Creator::default()
        };
        let json = serde_json::to_value(&creator).unwrap();
        assert_eq!(json["avgViews"], "20K");
    }

    #[test]
    fn normalized_buyer_list_serializes_as_bare_array() {
        let result = NormalizedResult::BuyerList(vec![Buyer::default()]);
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.is_array());
    }

    #[test]
    fn default_swot_has_four_empty_quadrants() {
        let swot = SwotAnalysis::default();
        assert!(swot.strengths.is_empty());
        assert!(swot.weaknesses.is_empty());
        assert!(swot.opportunities.is_empty());
        assert!(swot.threats.is_empty());
    }
}
