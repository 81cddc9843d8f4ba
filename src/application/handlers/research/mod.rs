//! Research command handlers.
//!
//! One handler per research flow. Each validates its form, renders the
//! prompt, calls the generation port, and extracts the typed result.

mod analyze_market;
mod calculate_logistics;
mod discover_creators;
mod evaluate_trade;
mod find_buyers;
mod search_shops;

pub use analyze_market::{AnalyzeMarketCommand, AnalyzeMarketError, AnalyzeMarketHandler};
pub use calculate_logistics::{
    CalculateLogisticsCommand, CalculateLogisticsError, CalculateLogisticsHandler,
};
pub use discover_creators::{
    DiscoverCreatorsCommand, DiscoverCreatorsError, DiscoverCreatorsHandler,
};
pub use evaluate_trade::{
    EvaluateTradeMarketCommand, EvaluateTradeMarketError, EvaluateTradeMarketHandler,
};
pub use find_buyers::{FindBuyersCommand, FindBuyersError, FindBuyersHandler};
pub use search_shops::{SearchShopLinksCommand, SearchShopLinksError, SearchShopLinksHandler};
