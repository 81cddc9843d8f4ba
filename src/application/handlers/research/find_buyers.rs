//! FindBuyers - scout B2B buyers for a niche in one trade channel.

use std::sync::Arc;

use tracing::warn;

use crate::domain::research::{
    buyer_search_prompt, Buyer, BuyerInquiry, ExtractionError, Language, ResponseExtractor,
};
use crate::ports::{GenerationClient, GenerationError, GenerationRequest};

/// Command to find potential buyers in a trade market.
#[derive(Debug, Clone)]
pub struct FindBuyersCommand {
    pub inquiry: BuyerInquiry,
    pub language: Language,
}

/// Error type for the buyer search flow.
#[derive(Debug, thiserror::Error)]
pub enum FindBuyersError {
    /// A required field was blank.
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
    /// The generation backend failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// The reply carried no usable JSON.
    #[error("the reply could not be interpreted as a buyer list")]
    MalformedResponse,
}

impl From<ExtractionError> for FindBuyersError {
    fn from(_: ExtractionError) -> Self {
        FindBuyersError::MalformedResponse
    }
}

/// Handler for the buyer search flow.
pub struct FindBuyersHandler {
    client: Arc<dyn GenerationClient>,
    extractor: ResponseExtractor,
}

impl FindBuyersHandler {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self {
            client,
            extractor: ResponseExtractor::new(),
        }
    }

    pub async fn handle(&self, cmd: FindBuyersCommand) -> Result<Vec<Buyer>, FindBuyersError> {
        // 1. Reject blank niches
        if cmd.inquiry.niche.trim().is_empty() {
            return Err(FindBuyersError::EmptyField { field: "niche" });
        }

        // 2. Build the grounded request
        let request = GenerationRequest::new(buyer_search_prompt(&cmd.inquiry, cmd.language))
            .with_web_search(true);

        // 3. Call the model and extract the buyer list
        let reply = self.client.generate(request).await?;
        self.extractor.extract_buyers(&reply.text).map_err(|err| {
            warn!(error = %err, "buyer search reply was not parseable");
            FindBuyersError::from(err)
        })
    }
}
