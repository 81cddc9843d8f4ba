//! HTTP adapter for research endpoints.
//!
//! Exposes the research flows via REST API:
//! - `POST /api/research/market` - Full go-to-market analysis
//! - `POST /api/research/logistics` - Freight cost estimate for one carton
//! - `POST /api/research/trade/evaluation` - Score a niche in one offline market
//! - `POST /api/research/trade/buyers` - Scout B2B buyers in one retail channel
//! - `POST /api/research/creators` - Match short-video creators to audience filters
//! - `POST /api/research/shops` - Curate shop links for a search term

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::ResearchAppState;
pub use routes::research_routes;
