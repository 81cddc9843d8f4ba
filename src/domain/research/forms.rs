//! Research request vocabulary and input forms.
//!
//! Typed counterparts of the business inputs callers submit: which
//! market to study, what the company does, carton dimensions for
//! freight estimates. Prompt builders interpolate these values, so
//! each enum renders as the exact phrase the prompts expect.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Language the model is instructed to answer in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English output.
    #[default]
    En,
    /// Simplified Chinese output.
    Zh,
}

/// Consumer market a research flow targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetMarket {
    #[serde(rename = "United Kingdom")]
    Uk,
    #[serde(rename = "United States")]
    Us,
}

impl TargetMarket {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetMarket::Uk => "United Kingdom",
            TargetMarket::Us => "United States",
        }
    }
}

impl fmt::Display for TargetMarket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What kind of business the requesting company is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompanyType {
    Manufacturer,
    Trader,
    Agent,
}

impl CompanyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyType::Manufacturer => "Manufacturer",
            CompanyType::Trader => "Trader",
            CompanyType::Agent => "Agent",
        }
    }
}

impl fmt::Display for CompanyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Country evaluated by the offline trade flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeCountry {
    #[serde(rename = "United Kingdom")]
    Uk,
    #[serde(rename = "United States")]
    Us,
    #[serde(rename = "Germany")]
    De,
    #[serde(rename = "Italy")]
    It,
    #[serde(rename = "France")]
    Fr,
    #[serde(rename = "Spain")]
    Es,
}

impl TradeCountry {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeCountry::Uk => "United Kingdom",
            TradeCountry::Us => "United States",
            TradeCountry::De => "Germany",
            TradeCountry::It => "Italy",
            TradeCountry::Fr => "France",
            TradeCountry::Es => "Spain",
        }
    }
}

impl fmt::Display for TradeCountry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Offline retail channel a buyer search focuses on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeChannel {
    Supermarket,
    #[serde(rename = "Retail Store")]
    RetailStore,
    Hypermarket,
    #[serde(rename = "Vending Machine")]
    VendingMachine,
}

impl TradeChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeChannel::Supermarket => "Supermarket",
            TradeChannel::RetailStore => "Retail Store",
            TradeChannel::Hypermarket => "Hypermarket",
            TradeChannel::VendingMachine => "Vending Machine",
        }
    }
}

impl fmt::Display for TradeChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Size bracket of buyer companies to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BuyerSize {
    Small,
    Medium,
    Large,
    #[default]
    Any,
}

impl BuyerSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuyerSize::Small => "Small",
            BuyerSize::Medium => "Medium",
            BuyerSize::Large => "Large",
            BuyerSize::Any => "Any",
        }
    }
}

impl fmt::Display for BuyerSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product photo attached to a market analysis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ProductImage {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }
}

/// Inputs for a full go-to-market analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketResearchForm {
    pub company_name: String,
    pub company_website: Option<String>,
    pub company_type: CompanyType,
    pub product_name: String,
    pub market: TargetMarket,
    pub target_audience: Option<String>,
    pub usps: Option<String>,
    pub price_range: Option<String>,
    pub images: Vec<ProductImage>,
}

impl MarketResearchForm {
    /// Creates a form with the required fields; strategic inputs and
    /// images come in through the `with_*` builders.
    pub fn new(
        company_name: impl Into<String>,
        company_type: CompanyType,
        product_name: impl Into<String>,
        market: TargetMarket,
    ) -> Self {
        Self {
            company_name: company_name.into(),
            company_website: None,
            company_type,
            product_name: product_name.into(),
            market,
            target_audience: None,
            usps: None,
            price_range: None,
            images: Vec::new(),
        }
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.company_website = Some(website.into());
        self
    }

    pub fn with_target_audience(mut self, audience: impl Into<String>) -> Self {
        self.target_audience = Some(audience.into());
        self
    }

    pub fn with_usps(mut self, usps: impl Into<String>) -> Self {
        self.usps = Some(usps.into());
        self
    }

    pub fn with_price_range(mut self, price_range: impl Into<String>) -> Self {
        self.price_range = Some(price_range.into());
        self
    }

    pub fn with_images(mut self, images: Vec<ProductImage>) -> Self {
        self.images = images;
        self
    }
}

/// Carton dimensions and destination for a freight estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticsForm {
    pub length_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
    pub weight_kg: Option<f64>,
    pub units_per_cbm: Option<f64>,
    pub market: TargetMarket,
}

impl LogisticsForm {
    pub fn new(length_cm: f64, width_cm: f64, height_cm: f64, market: TargetMarket) -> Self {
        Self {
            length_cm,
            width_cm,
            height_cm,
            weight_kg: None,
            units_per_cbm: None,
            market,
        }
    }

    pub fn with_weight(mut self, weight_kg: f64) -> Self {
        self.weight_kg = Some(weight_kg);
        self
    }

    pub fn with_units_per_cbm(mut self, units: f64) -> Self {
        self.units_per_cbm = Some(units);
        self
    }
}

/// A niche to score for one offline trade market.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeInquiry {
    pub country: TradeCountry,
    pub niche: String,
}

impl TradeInquiry {
    pub fn new(country: TradeCountry, niche: impl Into<String>) -> Self {
        Self {
            country,
            niche: niche.into(),
        }
    }
}

/// Criteria for scouting B2B buyers in one channel of one country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyerInquiry {
    pub country: TradeCountry,
    pub channel: TradeChannel,
    pub niche: String,
    pub size: BuyerSize,
    pub distribution_channels: Option<String>,
}

impl BuyerInquiry {
    pub fn new(
        country: TradeCountry,
        channel: TradeChannel,
        niche: impl Into<String>,
        size: BuyerSize,
    ) -> Self {
        Self {
            country,
            channel,
            niche: niche.into(),
            size,
            distribution_channels: None,
        }
    }

    pub fn with_distribution_channels(mut self, channels: impl Into<String>) -> Self {
        self.distribution_channels = Some(channels.into());
        self
    }
}

/// Audience-size brackets for creator discovery.
///
/// `views` and `followers` stay display strings ("10K-100K"); they are
/// interpolated into the prompt, never computed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatorFilters {
    pub topic: String,
    pub views: String,
    pub followers: String,
}

impl CreatorFilters {
    pub fn new(
        topic: impl Into<String>,
        views: impl Into<String>,
        followers: impl Into<String>,
    ) -> Self {
        Self {
            topic: topic.into(),
            views: views.into(),
            followers: followers.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn market_names_render_in_full() {
        assert_eq!(TargetMarket::Uk.to_string(), "United Kingdom");
        assert_eq!(TradeCountry::De.to_string(), "Germany");
        assert_eq!(TradeChannel::VendingMachine.to_string(), "Vending Machine");
    }

    #[test]
    fn enums_serialize_with_display_vocabulary() {
        assert_eq!(
            serde_json::to_string(&TargetMarket::Uk).unwrap(),
            "\"United Kingdom\""
        );
        assert_eq!(
            serde_json::to_string(&TradeChannel::RetailStore).unwrap(),
            "\"Retail Store\""
        );
        assert_eq!(serde_json::to_string(&BuyerSize::Any).unwrap(), "\"Any\"");
    }

    #[test]
    fn enums_deserialize_from_display_vocabulary() {
        let country: TradeCountry = serde_json::from_str("\"Spain\"").unwrap();
        assert_eq!(country, TradeCountry::Es);
        let channel: TradeChannel = serde_json::from_str("\"Vending Machine\"").unwrap();
        assert_eq!(channel, TradeChannel::VendingMachine);
    }

    #[test]
    fn language_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Language::Zh).unwrap(), "\"zh\"");
        let lang: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(lang, Language::En);
    }

    #[test]
    fn market_form_builder_fills_optionals() {
        let form = MarketResearchForm::new(
            "Acme Ltd",
            CompanyType::Manufacturer,
            "Folding Kettle",
            TargetMarket::Uk,
        )
        .with_website("https://acme.example")
        .with_usps("Packs flat")
        .with_images(vec![ProductImage::new(vec![1, 2, 3], "image/png")]);

        assert_eq!(form.company_website.as_deref(), Some("https://acme.example"));
        assert_eq!(form.usps.as_deref(), Some("Packs flat"));
        assert!(form.target_audience.is_none());
        assert_eq!(form.images.len(), 1);
        assert_eq!(form.images[0].mime_type, "image/png");
    }

    #[test]
    fn logistics_form_defaults_leave_weight_unset() {
        let form = LogisticsForm::new(30.0, 20.0, 10.0, TargetMarket::Us);
        assert!(form.weight_kg.is_none());
        assert!(form.units_per_cbm.is_none());

        let form = form.with_weight(1.2).with_units_per_cbm(160.0);
        assert_eq!(form.weight_kg, Some(1.2));
        assert_eq!(form.units_per_cbm, Some(160.0));
    }

    #[test]
    fn buyer_inquiry_defaults_to_no_distribution_channels() {
        let inquiry = BuyerInquiry::new(
            TradeCountry::Uk,
            TradeChannel::Supermarket,
            "snack foods",
            BuyerSize::Large,
        );
        assert!(inquiry.distribution_channels.is_none());
    }
}
