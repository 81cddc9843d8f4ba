//! Market research domain module.
//!
//! A research flow renders a typed form into a prompt, sends it through
//! the generation port, and extracts the reply into a fixed result
//! shape. This module owns everything except the transport: the input
//! vocabulary and forms, prompt construction, and the extraction and
//! normalization pipeline.

mod extractor;
mod forms;
mod normalize;
mod prompts;
mod shapes;

pub use extractor::{ExtractionError, ResponseExtractor};
pub use forms::{
    BuyerInquiry, BuyerSize, CompanyType, CreatorFilters, Language, LogisticsForm,
    MarketResearchForm, ProductImage, TargetMarket, TradeChannel, TradeCountry, TradeInquiry,
};
pub use prompts::{
    buyer_search_prompt, creator_discovery_prompt, logistics_prompt, market_analysis_prompt,
    shop_search_prompt, trade_evaluation_prompt,
};
pub use shapes::{
    AirFreightCost, Buyer, ChartData, Competitor, Creator, LogisticsEstimate, MarketAnalysis,
    NormalizedResult, ResultShape, SeaFreightCost, SharePoint, SwotAnalysis, TradeEvaluation,
    TrendPoint,
};
