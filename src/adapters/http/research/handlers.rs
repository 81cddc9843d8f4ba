//! HTTP handlers for research endpoints.
//!
//! These handlers connect Axum routes to the application layer research
//! flows and translate flow errors into HTTP responses.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::research::{
    AnalyzeMarketCommand, AnalyzeMarketError, AnalyzeMarketHandler, CalculateLogisticsCommand,
    CalculateLogisticsError, CalculateLogisticsHandler, DiscoverCreatorsCommand,
    DiscoverCreatorsError, DiscoverCreatorsHandler, EvaluateTradeMarketCommand,
    EvaluateTradeMarketError, EvaluateTradeMarketHandler, FindBuyersCommand, FindBuyersError,
    FindBuyersHandler, SearchShopLinksCommand, SearchShopLinksError, SearchShopLinksHandler,
};
use crate::domain::research::{BuyerInquiry, CreatorFilters, TradeInquiry};
use crate::ports::{GenerationClient, GenerationError};

use super::dto::{
    BuyerSearchRequest, CreatorSearchRequest, ErrorResponse, LogisticsRequest,
    MarketAnalysisRequest, ShopLinkResponse, ShopSearchRequest, TradeEvaluationRequest,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state for the research endpoints.
///
/// This struct is cloned for each request and carries the Arc-wrapped
/// generation client every flow talks to.
#[derive(Clone)]
pub struct ResearchAppState {
    pub client: Arc<dyn GenerationClient>,
}

impl ResearchAppState {
    /// Create handlers on demand from the shared state.
    pub fn analyze_market_handler(&self) -> AnalyzeMarketHandler {
        AnalyzeMarketHandler::new(self.client.clone())
    }

    pub fn calculate_logistics_handler(&self) -> CalculateLogisticsHandler {
        CalculateLogisticsHandler::new(self.client.clone())
    }

    pub fn evaluate_trade_handler(&self) -> EvaluateTradeMarketHandler {
        EvaluateTradeMarketHandler::new(self.client.clone())
    }

    pub fn find_buyers_handler(&self) -> FindBuyersHandler {
        FindBuyersHandler::new(self.client.clone())
    }

    pub fn discover_creators_handler(&self) -> DiscoverCreatorsHandler {
        DiscoverCreatorsHandler::new(self.client.clone())
    }

    pub fn search_shops_handler(&self) -> SearchShopLinksHandler {
        SearchShopLinksHandler::new(self.client.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Research Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/research/market - Run the full go-to-market analysis
pub async fn analyze_market(
    State(state): State<ResearchAppState>,
    Json(request): Json<MarketAnalysisRequest>,
) -> Result<impl IntoResponse, ResearchApiError> {
    let language = request.language;
    let form = request
        .into_form()
        .map_err(|_| ResearchApiError::BadRequest("image data must be valid base64".to_string()))?;

    let handler = state.analyze_market_handler();
    let analysis = handler
        .handle(AnalyzeMarketCommand { form, language })
        .await?;

    Ok(Json(analysis))
}

/// POST /api/research/logistics - Estimate freight costs for one carton
pub async fn calculate_logistics(
    State(state): State<ResearchAppState>,
    Json(request): Json<LogisticsRequest>,
) -> Result<impl IntoResponse, ResearchApiError> {
    let language = request.language;
    let handler = state.calculate_logistics_handler();
    let estimate = handler
        .handle(CalculateLogisticsCommand {
            form: request.into_form(),
            language,
        })
        .await?;

    Ok(Json(estimate))
}

/// POST /api/research/trade/evaluation - Score one niche in one offline market
pub async fn evaluate_trade(
    State(state): State<ResearchAppState>,
    Json(request): Json<TradeEvaluationRequest>,
) -> Result<impl IntoResponse, ResearchApiError> {
    let handler = state.evaluate_trade_handler();
    let evaluation = handler
        .handle(EvaluateTradeMarketCommand {
            inquiry: TradeInquiry::new(request.country, request.niche),
            language: request.language,
        })
        .await?;

    Ok(Json(evaluation))
}

/// POST /api/research/trade/buyers - Scout B2B buyers in one retail channel
pub async fn find_buyers(
    State(state): State<ResearchAppState>,
    Json(request): Json<BuyerSearchRequest>,
) -> Result<impl IntoResponse, ResearchApiError> {
    let mut inquiry = BuyerInquiry::new(
        request.country,
        request.channel,
        request.niche,
        request.size,
    );
    if let Some(channels) = request.distribution_channels {
        inquiry = inquiry.with_distribution_channels(channels);
    }

    let handler = state.find_buyers_handler();
    let buyers = handler
        .handle(FindBuyersCommand {
            inquiry,
            language: request.language,
        })
        .await?;

    Ok(Json(buyers))
}

/// POST /api/research/creators - Match short-video creators to audience filters
pub async fn discover_creators(
    State(state): State<ResearchAppState>,
    Json(request): Json<CreatorSearchRequest>,
) -> Result<impl IntoResponse, ResearchApiError> {
    let handler = state.discover_creators_handler();
    let creators = handler
        .handle(DiscoverCreatorsCommand {
            filters: CreatorFilters::new(request.topic, request.views, request.followers),
            language: request.language,
        })
        .await?;

    Ok(Json(creators))
}

/// POST /api/research/shops - Curate shop links for a search term
pub async fn search_shops(
    State(state): State<ResearchAppState>,
    Json(request): Json<ShopSearchRequest>,
) -> Result<impl IntoResponse, ResearchApiError> {
    let handler = state.search_shops_handler();
    let links = handler
        .handle(SearchShopLinksCommand { term: request.term })
        .await?;

    let response: Vec<ShopLinkResponse> = links.into_iter().map(ShopLinkResponse::from).collect();
    Ok(Json(response))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// Notice returned when a reply could not be normalized into a result.
const UNUSABLE_REPLY_NOTICE: &str =
    "The research service returned an unusable reply. Please try again.";

/// API error type that converts research flow errors to HTTP responses.
#[derive(Debug)]
pub enum ResearchApiError {
    /// The request body failed validation.
    BadRequest(String),
    /// The provider throttled us.
    RateLimited { retry_after_secs: u64 },
    /// The provider failed or answered with something unusable.
    Upstream(String),
    /// A request we built was rejected by the provider.
    Internal(String),
}

impl ResearchApiError {
    fn from_generation(err: GenerationError) -> Self {
        match err {
            GenerationError::RateLimited { retry_after_secs } => {
                ResearchApiError::RateLimited { retry_after_secs }
            }
            GenerationError::InvalidRequest(message) => ResearchApiError::Internal(message),
            other => ResearchApiError::Upstream(other.to_string()),
        }
    }
}

impl From<AnalyzeMarketError> for ResearchApiError {
    fn from(err: AnalyzeMarketError) -> Self {
        match err {
            AnalyzeMarketError::EmptyField { .. } => ResearchApiError::BadRequest(err.to_string()),
            AnalyzeMarketError::Generation(e) => ResearchApiError::from_generation(e),
            AnalyzeMarketError::MalformedResponse => {
                ResearchApiError::Upstream(UNUSABLE_REPLY_NOTICE.to_string())
            }
        }
    }
}

impl From<CalculateLogisticsError> for ResearchApiError {
    fn from(err: CalculateLogisticsError) -> Self {
        match err {
            CalculateLogisticsError::InvalidDimensions => {
                ResearchApiError::BadRequest(err.to_string())
            }
            CalculateLogisticsError::Generation(e) => ResearchApiError::from_generation(e),
            CalculateLogisticsError::MalformedResponse => {
                ResearchApiError::Upstream(UNUSABLE_REPLY_NOTICE.to_string())
            }
        }
    }
}

impl From<EvaluateTradeMarketError> for ResearchApiError {
    fn from(err: EvaluateTradeMarketError) -> Self {
        match err {
            EvaluateTradeMarketError::EmptyField { .. } => {
                ResearchApiError::BadRequest(err.to_string())
            }
            EvaluateTradeMarketError::Generation(e) => ResearchApiError::from_generation(e),
            EvaluateTradeMarketError::MalformedResponse => {
                ResearchApiError::Upstream(UNUSABLE_REPLY_NOTICE.to_string())
            }
        }
    }
}

impl From<FindBuyersError> for ResearchApiError {
    fn from(err: FindBuyersError) -> Self {
        match err {
            FindBuyersError::EmptyField { .. } => ResearchApiError::BadRequest(err.to_string()),
            FindBuyersError::Generation(e) => ResearchApiError::from_generation(e),
            FindBuyersError::MalformedResponse => {
                ResearchApiError::Upstream(UNUSABLE_REPLY_NOTICE.to_string())
            }
        }
    }
}

impl From<DiscoverCreatorsError> for ResearchApiError {
    fn from(err: DiscoverCreatorsError) -> Self {
        match err {
            DiscoverCreatorsError::EmptyField { .. } => {
                ResearchApiError::BadRequest(err.to_string())
            }
            DiscoverCreatorsError::Generation(e) => ResearchApiError::from_generation(e),
            DiscoverCreatorsError::MalformedResponse => {
                ResearchApiError::Upstream(UNUSABLE_REPLY_NOTICE.to_string())
            }
        }
    }
}

impl From<SearchShopLinksError> for ResearchApiError {
    fn from(err: SearchShopLinksError) -> Self {
        match err {
            SearchShopLinksError::EmptyField { .. } => {
                ResearchApiError::BadRequest(err.to_string())
            }
            SearchShopLinksError::Generation(e) => ResearchApiError::from_generation(e),
        }
    }
}

impl IntoResponse for ResearchApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ResearchApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(message))
            }
            ResearchApiError::RateLimited { retry_after_secs } => (
                StatusCode::TOO_MANY_REQUESTS,
                ErrorResponse::rate_limited(retry_after_secs),
            ),
            ResearchApiError::Upstream(message) => {
                (StatusCode::BAD_GATEWAY, ErrorResponse::upstream(message))
            }
            ResearchApiError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::internal(message),
            ),
        };
        (status, Json(body)).into_response()
    }
}
