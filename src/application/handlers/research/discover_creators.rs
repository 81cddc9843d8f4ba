//! DiscoverCreators - match short-video creators against audience filters.

use std::sync::Arc;

use tracing::warn;

use crate::domain::research::{
    creator_discovery_prompt, Creator, CreatorFilters, ExtractionError, Language,
    ResponseExtractor,
};
use crate::ports::{GenerationClient, GenerationError, GenerationRequest};

/// Command to discover creators for a product topic.
#[derive(Debug, Clone)]
pub struct DiscoverCreatorsCommand {
    pub filters: CreatorFilters,
    pub language: Language,
}

/// Error type for the creator discovery flow.
#[derive(Debug, thiserror::Error)]
pub enum DiscoverCreatorsError {
    /// A required field was blank.
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
    /// The generation backend failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// The reply carried no usable JSON.
    #[error("the reply could not be interpreted as a creator list")]
    MalformedResponse,
}

impl From<ExtractionError> for DiscoverCreatorsError {
    fn from(_: ExtractionError) -> Self {
        DiscoverCreatorsError::MalformedResponse
    }
}

/// Handler for the creator discovery flow.
pub struct DiscoverCreatorsHandler {
    client: Arc<dyn GenerationClient>,
    extractor: ResponseExtractor,
}

impl DiscoverCreatorsHandler {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self {
            client,
            extractor: ResponseExtractor::new(),
        }
    }

    pub async fn handle(
        &self,
        cmd: DiscoverCreatorsCommand,
    ) -> Result<Vec<Creator>, DiscoverCreatorsError> {
        // 1. Reject blank topics
        if cmd.filters.topic.trim().is_empty() {
            return Err(DiscoverCreatorsError::EmptyField { field: "topic" });
        }

        // 2. Build the grounded request
        let request = GenerationRequest::new(creator_discovery_prompt(&cmd.filters, cmd.language))
            .with_web_search(true);

        // 3. Call the model and extract the creator list
        let reply = self.client.generate(request).await?;
        self.extractor.extract_creators(&reply.text).map_err(|err| {
            warn!(error = %err, "creator discovery reply was not parseable");
            DiscoverCreatorsError::from(err)
        })
    }
}
