//! EvaluateTradeMarket - score a niche's fit for one offline trade market.

use std::sync::Arc;

use tracing::warn;

use crate::domain::research::{
    trade_evaluation_prompt, ExtractionError, Language, ResponseExtractor, TradeEvaluation,
    TradeInquiry,
};
use crate::ports::{GenerationClient, GenerationError, GenerationRequest};

/// Command to evaluate a product niche against a trade country.
#[derive(Debug, Clone)]
pub struct EvaluateTradeMarketCommand {
    pub inquiry: TradeInquiry,
    pub language: Language,
}

/// Error type for the trade evaluation flow.
#[derive(Debug, thiserror::Error)]
pub enum EvaluateTradeMarketError {
    /// A required field was blank.
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
    /// The generation backend failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// The reply carried no usable JSON.
    #[error("the reply could not be interpreted as a trade evaluation")]
    MalformedResponse,
}

impl From<ExtractionError> for EvaluateTradeMarketError {
    fn from(_: ExtractionError) -> Self {
        EvaluateTradeMarketError::MalformedResponse
    }
}

/// Handler for the trade evaluation flow.
pub struct EvaluateTradeMarketHandler {
    client: Arc<dyn GenerationClient>,
    extractor: ResponseExtractor,
}

impl EvaluateTradeMarketHandler {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self {
            client,
            extractor: ResponseExtractor::new(),
        }
    }

    pub async fn handle(
        &self,
        cmd: EvaluateTradeMarketCommand,
    ) -> Result<TradeEvaluation, EvaluateTradeMarketError> {
        // 1. Reject blank niches
        if cmd.inquiry.niche.trim().is_empty() {
            return Err(EvaluateTradeMarketError::EmptyField { field: "niche" });
        }

        // 2. Build the request; this flow scores from model knowledge alone,
        //    without the search tool
        let request = GenerationRequest::new(trade_evaluation_prompt(&cmd.inquiry, cmd.language));

        // 3. Call the model and extract the scored evaluation
        let reply = self.client.generate(request).await?;
        self.extractor
            .extract_trade_evaluation(&reply.text)
            .map_err(|err| {
                warn!(error = %err, "trade evaluation reply was not parseable");
                EvaluateTradeMarketError::from(err)
            })
    }
}
