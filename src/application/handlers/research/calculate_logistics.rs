//! CalculateLogistics - estimate freight costs for one carton size.

use std::sync::Arc;

use tracing::warn;

use crate::domain::research::{
    logistics_prompt, ExtractionError, Language, LogisticsEstimate, LogisticsForm,
    ResponseExtractor,
};
use crate::ports::{GenerationClient, GenerationError, GenerationRequest};

/// Command to estimate shipping costs from China to a target market.
#[derive(Debug, Clone)]
pub struct CalculateLogisticsCommand {
    pub form: LogisticsForm,
    pub language: Language,
}

/// Error type for the logistics flow.
#[derive(Debug, thiserror::Error)]
pub enum CalculateLogisticsError {
    /// Carton dimensions must all be positive.
    #[error("carton dimensions must be positive")]
    InvalidDimensions,
    /// The generation backend failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// The reply carried no usable JSON.
    #[error("the reply could not be interpreted as a logistics estimate")]
    MalformedResponse,
}

impl From<ExtractionError> for CalculateLogisticsError {
    fn from(_: ExtractionError) -> Self {
        CalculateLogisticsError::MalformedResponse
    }
}

/// Handler for the logistics estimate flow.
pub struct CalculateLogisticsHandler {
    client: Arc<dyn GenerationClient>,
    extractor: ResponseExtractor,
}

impl CalculateLogisticsHandler {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self {
            client,
            extractor: ResponseExtractor::new(),
        }
    }

    pub async fn handle(
        &self,
        cmd: CalculateLogisticsCommand,
    ) -> Result<LogisticsEstimate, CalculateLogisticsError> {
        // 1. Reject degenerate cartons
        if cmd.form.length_cm <= 0.0 || cmd.form.width_cm <= 0.0 || cmd.form.height_cm <= 0.0 {
            return Err(CalculateLogisticsError::InvalidDimensions);
        }

        // 2. Build the grounded request
        let request = GenerationRequest::new(logistics_prompt(&cmd.form, cmd.language))
            .with_web_search(true);

        // 3. Call the model and extract the estimate
        let reply = self.client.generate(request).await?;
        self.extractor
            .extract_logistics(&reply.text)
            .map_err(|err| {
                warn!(error = %err, "logistics reply was not parseable");
                CalculateLogisticsError::from(err)
            })
    }
}
