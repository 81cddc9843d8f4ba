//! AnalyzeMarket - run the go-to-market research flow for one product.

use std::sync::Arc;

use tracing::warn;

use crate::domain::research::{
    market_analysis_prompt, ExtractionError, Language, MarketAnalysis, MarketResearchForm,
    ResponseExtractor,
};
use crate::ports::{GenerationClient, GenerationError, GenerationRequest, ImageAttachment};

/// Command to analyze a product's position in a target market.
#[derive(Debug, Clone)]
pub struct AnalyzeMarketCommand {
    pub form: MarketResearchForm,
    pub language: Language,
}

/// Error type for the market analysis flow.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeMarketError {
    /// A required form field was blank.
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
    /// The generation backend failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// The reply carried no usable JSON.
    #[error("the reply could not be interpreted as a market analysis")]
    MalformedResponse,
}

impl From<ExtractionError> for AnalyzeMarketError {
    fn from(_: ExtractionError) -> Self {
        AnalyzeMarketError::MalformedResponse
    }
}

/// Handler for the market analysis flow.
pub struct AnalyzeMarketHandler {
    client: Arc<dyn GenerationClient>,
    extractor: ResponseExtractor,
}

impl AnalyzeMarketHandler {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self {
            client,
            extractor: ResponseExtractor::new(),
        }
    }

    pub async fn handle(
        &self,
        cmd: AnalyzeMarketCommand,
    ) -> Result<MarketAnalysis, AnalyzeMarketError> {
        // 1. Reject blank required fields
        if cmd.form.company_name.trim().is_empty() {
            return Err(AnalyzeMarketError::EmptyField {
                field: "company name",
            });
        }
        if cmd.form.product_name.trim().is_empty() {
            return Err(AnalyzeMarketError::EmptyField {
                field: "product name",
            });
        }

        // 2. Build the grounded request; image parts precede the prompt text
        let prompt = market_analysis_prompt(&cmd.form, cmd.language);
        let attachments = cmd
            .form
            .images
            .into_iter()
            .map(|image| ImageAttachment::new(image.bytes, image.mime_type))
            .collect();
        let request = GenerationRequest::new(prompt)
            .with_attachments(attachments)
            .with_web_search(true);

        // 3. Call the model and extract the analysis
        let reply = self.client.generate(request).await?;
        let mut analysis = self
            .extractor
            .extract_market_analysis(&reply.text)
            .map_err(|err| {
                warn!(error = %err, "market analysis reply was not parseable");
                AnalyzeMarketError::from(err)
            })?;

        // 4. Attach the sources the model consulted
        analysis.search_links = reply
            .grounding_links
            .into_iter()
            .map(|link| link.uri)
            .collect();

        Ok(analysis)
    }
}
