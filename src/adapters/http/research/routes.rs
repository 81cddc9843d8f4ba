//! HTTP routes for research endpoints.

use axum::routing::post;
use axum::Router;

use super::handlers::{
    analyze_market, calculate_logistics, discover_creators, evaluate_trade, find_buyers,
    search_shops, ResearchAppState,
};

/// Creates the research router with all routes.
pub fn research_routes(state: ResearchAppState) -> Router {
    Router::new()
        // POST /api/research/market
        .route("/api/research/market", post(analyze_market))
        // POST /api/research/logistics
        .route("/api/research/logistics", post(calculate_logistics))
        // POST /api/research/trade/evaluation
        .route("/api/research/trade/evaluation", post(evaluate_trade))
        // POST /api/research/trade/buyers
        .route("/api/research/trade/buyers", post(find_buyers))
        // POST /api/research/creators
        .route("/api/research/creators", post(discover_creators))
        // POST /api/research/shops
        .route("/api/research/shops", post(search_shops))
        .with_state(state)
}
