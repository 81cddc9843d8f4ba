//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::research::{
    // Market analysis
    AnalyzeMarketCommand, AnalyzeMarketError, AnalyzeMarketHandler,
    // Logistics
    CalculateLogisticsCommand, CalculateLogisticsError, CalculateLogisticsHandler,
    // Creator discovery
    DiscoverCreatorsCommand, DiscoverCreatorsError, DiscoverCreatorsHandler,
    // Trade evaluation
    EvaluateTradeMarketCommand, EvaluateTradeMarketError, EvaluateTradeMarketHandler,
    // Buyer search
    FindBuyersCommand, FindBuyersError, FindBuyersHandler,
    // Shop link search
    SearchShopLinksCommand, SearchShopLinksError, SearchShopLinksHandler,
};
