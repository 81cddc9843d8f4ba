//! JSON extraction from loosely-structured model replies.
//!
//! Replies usually wrap their JSON in a fenced code block, but models
//! drift between tagged fences, bare fences, and no fence at all. The
//! extractor tries each candidate location in turn and hands the first
//! parseable one to the shape's normalizer. Extraction is a pure
//! function of the reply text and the requested shape; transport
//! concerns like retries live with the generation client.

use super::normalize;
use super::shapes::{
    Buyer, Creator, LogisticsEstimate, MarketAnalysis, NormalizedResult, ResultShape,
    TradeEvaluation,
};
use thiserror::Error;

/// Errors that can occur while extracting structured data from a reply.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractionError {
    /// No candidate in the reply parsed as JSON. Carries the full reply
    /// text so callers can log what the model actually said.
    #[error("reply contained no parseable JSON")]
    MalformedResponse { raw: String },
}

impl ExtractionError {
    pub fn malformed(raw: impl Into<String>) -> Self {
        Self::MalformedResponse { raw: raw.into() }
    }
}

/// Extracts and normalizes the structured payload of a model reply.
#[derive(Debug, Clone, Default)]
pub struct ResponseExtractor;

impl ResponseExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extracts the reply's JSON payload and normalizes it into `shape`.
    ///
    /// Candidate locations, in order:
    /// 1. the first fenced block tagged `json`
    /// 2. the first untagged fenced block
    /// 3. the reply text itself
    ///
    /// A candidate that fails to parse falls through to the next one;
    /// only when every candidate fails is the reply malformed.
    pub fn extract(
        &self,
        raw: &str,
        shape: ResultShape,
    ) -> Result<NormalizedResult, ExtractionError> {
        let value = self.parse(raw)?;
        Ok(match shape {
            ResultShape::MarketAnalysis => {
                NormalizedResult::MarketAnalysis(normalize::market_analysis(&value))
            }
            ResultShape::Logistics => {
                NormalizedResult::Logistics(normalize::logistics_estimate(&value))
            }
            ResultShape::TradeEvaluation => {
                NormalizedResult::TradeEvaluation(normalize::trade_evaluation(&value))
            }
            ResultShape::BuyerList => NormalizedResult::BuyerList(normalize::buyer_list(&value)),
            ResultShape::CreatorList => {
                NormalizedResult::CreatorList(normalize::creator_list(&value))
            }
        })
    }

    /// Extracts a reply as a market analysis.
    pub fn extract_market_analysis(&self, raw: &str) -> Result<MarketAnalysis, ExtractionError> {
        Ok(normalize::market_analysis(&self.parse(raw)?))
    }

    /// Extracts a reply as a freight estimate.
    pub fn extract_logistics(&self, raw: &str) -> Result<LogisticsEstimate, ExtractionError> {
        Ok(normalize::logistics_estimate(&self.parse(raw)?))
    }

    /// Extracts a reply as a scored trade evaluation.
    pub fn extract_trade_evaluation(&self, raw: &str) -> Result<TradeEvaluation, ExtractionError> {
        Ok(normalize::trade_evaluation(&self.parse(raw)?))
    }

    /// Extracts a reply as a list of buyers.
    pub fn extract_buyers(&self, raw: &str) -> Result<Vec<Buyer>, ExtractionError> {
        Ok(normalize::buyer_list(&self.parse(raw)?))
    }

    /// Extracts a reply as a list of creators.
    pub fn extract_creators(&self, raw: &str) -> Result<Vec<Creator>, ExtractionError> {
        Ok(normalize::creator_list(&self.parse(raw)?))
    }

    fn parse(&self, raw: &str) -> Result<serde_json::Value, ExtractionError> {
        for candidate in self.candidates(raw) {
            if let Ok(value) = serde_json::from_str(&candidate) {
                return Ok(value);
            }
        }
        Err(ExtractionError::malformed(raw))
    }

    fn candidates(&self, raw: &str) -> Vec<String> {
        let mut candidates = Vec::with_capacity(3);
        if let Some(block) = fenced_block(raw, &["```json\n", "```json\r\n"]) {
            candidates.push(block);
        }
        if let Some(block) = fenced_block(raw, &["```\n", "```\r\n"]) {
            candidates.push(block);
        }
        candidates.push(raw.trim().to_string());
        candidates
    }
}

/// Returns the interior of the first fenced block opened by any of
/// `openers`, trimmed.
fn fenced_block(text: &str, openers: &[&str]) -> Option<String> {
    for opener in openers {
        if let Some(start) = text.find(opener) {
            let body_start = start + opener.len();
            if let Some(end) = text[body_start..].find("```") {
                return Some(text[body_start..body_start + end].trim().to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> ResponseExtractor {
        ResponseExtractor::new()
    }

    mod fences {
        use super::*;

        const PAYLOAD: &str = r#"{"matchScore": 8, "demandScore": 6, "developmentScore": 7, "reasoning": "Good fit."}"#;

        #[test]
        fn tagged_fence_bare_fence_and_raw_text_agree() {
            let tagged = format!("Here you go:\n```json\n{}\n```\nLet me know!", PAYLOAD);
            let bare = format!("```\n{}\n```", PAYLOAD);

            let from_tagged = extractor()
                .extract(&tagged, ResultShape::TradeEvaluation)
                .unwrap();
            let from_bare = extractor()
                .extract(&bare, ResultShape::TradeEvaluation)
                .unwrap();
            let from_raw = extractor()
                .extract(PAYLOAD, ResultShape::TradeEvaluation)
                .unwrap();

            assert_eq!(from_tagged, from_bare);
            assert_eq!(from_bare, from_raw);
        }

        #[test]
        fn tagged_fence_wins_over_later_bare_fence() {
            let reply = format!(
                "```json\n{}\n```\nAnd some shell output:\n```\nnot json\n```",
                PAYLOAD
            );
            let eval = extractor().extract_trade_evaluation(&reply).unwrap();
            assert_eq!(eval.match_score, 8.0);
        }

        #[test]
        fn unparseable_tagged_fence_falls_through_to_bare_fence() {
            let reply = format!("```\n{}\n```\nRaw attempt:\n```json\n{{broken\n```", PAYLOAD);
            let eval = extractor().extract_trade_evaluation(&reply).unwrap();
            assert_eq!(eval.average_score, 7.0);
        }

        #[test]
        fn unfenced_reply_parses_whole_text() {
            let eval = extractor().extract_trade_evaluation(PAYLOAD).unwrap();
            assert_eq!(eval.average_score, 7.0);
        }

        #[test]
        fn crlf_fences_are_recognized() {
            let reply = format!("```json\r\n{}\r\n```", PAYLOAD);
            let eval = extractor().extract_trade_evaluation(&reply).unwrap();
            assert_eq!(eval.match_score, 8.0);
        }

        #[test]
        fn empty_fence_never_parses_as_empty_object() {
            let reply = "```json\n\n```";
            let result = extractor().extract(reply, ResultShape::Logistics);
            assert!(matches!(
                result,
                Err(ExtractionError::MalformedResponse { .. })
            ));
        }
    }

    mod failures {
        use super::*;

        #[test]
        fn json_free_text_is_malformed_and_carries_raw() {
            let reply = "I could not find any relevant data for this product.";
            let err = extractor()
                .extract(reply, ResultShape::MarketAnalysis)
                .unwrap_err();

            match err {
                ExtractionError::MalformedResponse { raw } => assert_eq!(raw, reply),
            }
        }

        #[test]
        fn truncated_json_is_malformed() {
            let reply = r#"```json
{"marketSummary": "cut off"#;
            let result = extractor().extract(reply, ResultShape::MarketAnalysis);
            assert!(result.is_err());
        }
    }

    mod scenarios {
        use super::*;

        #[test]
        fn trade_reply_with_prose_scores_average_seven() {
            let reply = r#"I looked at current retail coverage.

```json
{
  "matchScore": 8,
  "demandScore": 6,
  "developmentScore": 7,
  "reasoning": "Established channel, moderate demand."
}
```

Happy to elaborate on any score."#;

            let eval = extractor().extract_trade_evaluation(reply).unwrap();
            assert_eq!(eval.match_score, 8.0);
            assert_eq!(eval.demand_score, 6.0);
            assert_eq!(eval.development_score, 7.0);
            assert_eq!(eval.average_score, 7.0);
        }

        #[test]
        fn empty_logistics_object_yields_defaults_not_errors() {
            let estimate = extractor().extract_logistics("{}").unwrap();
            assert_eq!(estimate.advice, "");
            assert!(estimate.warehouses.is_empty());
        }

        #[test]
        fn extraction_is_idempotent() {
            let reply = r#"```json
{"marketSummary": "Stable.", "chartData": {"trends": [{"year": "2024", "marketSize": "75"}]}}
```"#;
            let first = extractor().extract(reply, ResultShape::MarketAnalysis).unwrap();
            let second = extractor().extract(reply, ResultShape::MarketAnalysis).unwrap();
            assert_eq!(first, second);
        }

        #[test]
        fn shape_tag_decides_normalization_not_payload() {
            // A buyer-shaped payload requested as CreatorList normalizes
            // into creators with empty buyer-only fields.
            let reply = r#"[{"name": "Tesco", "type": "Supermarket Chain"}]"#;
            let creators = extractor().extract_creators(reply).unwrap();
            assert_eq!(creators.len(), 1);
            assert_eq!(creators[0].name, "Tesco");
            assert_eq!(creators[0].handle, "");
        }
    }
}
