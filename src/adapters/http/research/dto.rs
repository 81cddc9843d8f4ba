//! HTTP DTOs for research endpoints.
//!
//! Request bodies mirror the research forms with camelCase keys and
//! base64-encoded image payloads. Responses are the normalized result
//! shapes themselves; those already serialize with the wire casing the
//! front end expects, so we re-export them directly.

pub use crate::domain::research::{
    AirFreightCost, Buyer, ChartData, Competitor, Creator, LogisticsEstimate, MarketAnalysis,
    SeaFreightCost, SharePoint, SwotAnalysis, TradeEvaluation, TrendPoint,
};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};

use crate::domain::research::{
    BuyerSize, CompanyType, Language, LogisticsForm, MarketResearchForm, ProductImage,
    TargetMarket, TradeChannel, TradeCountry,
};
use crate::ports::GroundingLink;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// One product image attached to a market analysis request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    /// Base64-encoded image bytes, without a data-URL prefix.
    pub data: String,
    /// MIME type as sent by the browser ("image/png").
    pub mime_type: String,
}

impl ImagePayload {
    /// Decodes the payload into domain image bytes.
    pub fn decode(self) -> Result<ProductImage, base64::DecodeError> {
        let bytes = BASE64.decode(self.data.as_bytes())?;
        Ok(ProductImage::new(bytes, self.mime_type))
    }
}

/// Request body for the full go-to-market analysis.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAnalysisRequest {
    pub company_name: String,
    #[serde(default)]
    pub company_website: Option<String>,
    pub company_type: CompanyType,
    pub product_name: String,
    pub market: TargetMarket,
    #[serde(default)]
    pub target_audience: Option<String>,
    #[serde(default)]
    pub usps: Option<String>,
    #[serde(default)]
    pub price_range: Option<String>,
    #[serde(default)]
    pub images: Vec<ImagePayload>,
    #[serde(default)]
    pub language: Language,
}

impl MarketAnalysisRequest {
    /// Assembles the domain form, decoding any attached images.
    pub fn into_form(self) -> Result<MarketResearchForm, base64::DecodeError> {
        let mut form = MarketResearchForm::new(
            self.company_name,
            self.company_type,
            self.product_name,
            self.market,
        );
        if let Some(website) = self.company_website {
            form = form.with_website(website);
        }
        if let Some(audience) = self.target_audience {
            form = form.with_target_audience(audience);
        }
        if let Some(usps) = self.usps {
            form = form.with_usps(usps);
        }
        if let Some(price_range) = self.price_range {
            form = form.with_price_range(price_range);
        }
        let images = self
            .images
            .into_iter()
            .map(ImagePayload::decode)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(form.with_images(images))
    }
}

/// Request body for a freight estimate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogisticsRequest {
    /// Carton length in centimetres.
    pub length: f64,
    /// Carton width in centimetres.
    pub width: f64,
    /// Carton height in centimetres.
    pub height: f64,
    /// Unit weight in kilograms.
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub units_per_cbm: Option<f64>,
    pub market: TargetMarket,
    #[serde(default)]
    pub language: Language,
}

impl LogisticsRequest {
    /// Assembles the domain form.
    pub fn into_form(self) -> LogisticsForm {
        let mut form = LogisticsForm::new(self.length, self.width, self.height, self.market);
        if let Some(weight) = self.weight {
            form = form.with_weight(weight);
        }
        if let Some(units) = self.units_per_cbm {
            form = form.with_units_per_cbm(units);
        }
        form
    }
}

/// Request body for scoring one niche in one offline trade market.
#[derive(Debug, Clone, Deserialize)]
pub struct TradeEvaluationRequest {
    pub country: TradeCountry,
    pub niche: String,
    #[serde(default)]
    pub language: Language,
}

/// Request body for scouting B2B buyers.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerSearchRequest {
    pub country: TradeCountry,
    pub channel: TradeChannel,
    pub niche: String,
    #[serde(default)]
    pub size: BuyerSize,
    #[serde(default)]
    pub distribution_channels: Option<String>,
    #[serde(default)]
    pub language: Language,
}

/// Request body for creator discovery.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatorSearchRequest {
    pub topic: String,
    pub views: String,
    pub followers: String,
    #[serde(default)]
    pub language: Language,
}

/// Request body for the shop link search.
#[derive(Debug, Clone, Deserialize)]
pub struct ShopSearchRequest {
    pub term: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// One curated shop link taken from search grounding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShopLinkResponse {
    pub title: String,
    pub url: String,
}

impl From<GroundingLink> for ShopLinkResponse {
    fn from(link: GroundingLink) -> Self {
        Self {
            title: link.title,
            url: link.uri,
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn rate_limited(retry_after_secs: u64) -> Self {
        Self {
            code: "RATE_LIMITED".to_string(),
            message: "The research service is handling too many requests. Try again shortly."
                .to_string(),
            details: Some(serde_json::json!({ "retryAfterSecs": retry_after_secs })),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self {
            code: "UPSTREAM_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }
}
