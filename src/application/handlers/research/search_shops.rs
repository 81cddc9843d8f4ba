//! SearchShopLinks - surface TikTok shop and profile links for a keyword.
//!
//! This flow is grounded-search-only: the reply text is ignored and the
//! result is curated from the links the search tool actually visited.
//! That keeps every returned URL a real one the model saw, instead of a
//! hallucinated handle.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::research::shop_search_prompt;
use crate::ports::{GenerationClient, GenerationError, GenerationRequest, GroundingLink};

/// Hard cap on returned links.
const MAX_SHOP_LINKS: usize = 20;

/// Command to search for shop links matching a keyword.
#[derive(Debug, Clone)]
pub struct SearchShopLinksCommand {
    pub term: String,
}

/// Error type for the shop link search flow.
#[derive(Debug, thiserror::Error)]
pub enum SearchShopLinksError {
    /// A required field was blank.
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
    /// The generation backend failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// Handler for the shop link search flow.
pub struct SearchShopLinksHandler {
    client: Arc<dyn GenerationClient>,
}

impl SearchShopLinksHandler {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self { client }
    }

    pub async fn handle(
        &self,
        cmd: SearchShopLinksCommand,
    ) -> Result<Vec<GroundingLink>, SearchShopLinksError> {
        // 1. Reject blank search terms
        if cmd.term.trim().is_empty() {
            return Err(SearchShopLinksError::EmptyField {
                field: "search term",
            });
        }

        // 2. Run the grounded search; only the visited links matter
        let request = GenerationRequest::new(shop_search_prompt(&cmd.term)).with_web_search(true);
        let reply = self.client.generate(request).await?;

        // 3. Curate the grounding links into shop results
        Ok(curate_shop_links(reply.grounding_links))
    }
}

/// Filters grounding links down to deduplicated TikTok results, profile
/// pages first, capped at [`MAX_SHOP_LINKS`].
fn curate_shop_links(links: Vec<GroundingLink>) -> Vec<GroundingLink> {
    let mut seen = HashSet::new();
    let mut curated: Vec<GroundingLink> = links
        .into_iter()
        .filter(|link| link.uri.to_lowercase().contains("tiktok.com"))
        .filter(|link| seen.insert(link.uri.clone()))
        .collect();

    // Stable sort keeps the search relevance order within each group
    curated.sort_by_key(|link| !is_profile_link(&link.uri));
    curated.truncate(MAX_SHOP_LINKS);
    curated
}

/// A profile page rather than an individual video.
fn is_profile_link(uri: &str) -> bool {
    uri.contains("/@") && !uri.contains("/video/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::generation::MockGenerationClient;

    fn link(uri: &str) -> GroundingLink {
        GroundingLink::new(uri, uri)
    }

    mod curation {
        use super::*;

        #[test]
        fn drops_links_outside_tiktok() {
            let curated = curate_shop_links(vec![
                link("https://tiktok.com/@snackshop"),
                link("https://example.com/snacks"),
                link("https://instagram.com/snackshop"),
            ]);

            assert_eq!(curated.len(), 1);
            assert_eq!(curated[0].uri, "https://tiktok.com/@snackshop");
        }

        #[test]
        fn domain_match_is_case_insensitive() {
            let curated = curate_shop_links(vec![link("https://www.TikTok.com/@shop")]);
            assert_eq!(curated.len(), 1);
        }

        #[test]
        fn deduplicates_keeping_the_first_occurrence() {
            let first = GroundingLink::new("Snack Shop", "https://tiktok.com/@snackshop");
            let second = GroundingLink::new("duplicate", "https://tiktok.com/@snackshop");

            let curated = curate_shop_links(vec![first, second]);

            assert_eq!(curated.len(), 1);
            assert_eq!(curated[0].title, "Snack Shop");
        }

        #[test]
        fn profiles_sort_before_videos_preserving_order() {
            let curated = curate_shop_links(vec![
                link("https://tiktok.com/@a/video/111"),
                link("https://tiktok.com/@first"),
                link("https://tiktok.com/@b/video/222"),
                link("https://tiktok.com/@second"),
            ]);

            let uris: Vec<_> = curated.iter().map(|l| l.uri.as_str()).collect();
            assert_eq!(
                uris,
                vec![
                    "https://tiktok.com/@first",
                    "https://tiktok.com/@second",
                    "https://tiktok.com/@a/video/111",
                    "https://tiktok.com/@b/video/222",
                ]
            );
        }

        #[test]
        fn caps_the_result_at_twenty() {
            let links: Vec<_> = (0..30)
                .map(|i| link(&format!("https://tiktok.com/@shop{i}")))
                .collect();

            assert_eq!(curate_shop_links(links).len(), MAX_SHOP_LINKS);
        }
    }

    #[tokio::test]
    async fn search_shops_returns_curated_grounding_links() {
        let client = MockGenerationClient::new().with_grounded_reply(
            "Here are some shops I found.",
            vec![
                link("https://tiktok.com/@snackshop/video/999"),
                link("https://tiktok.com/@snackshop"),
                link("https://othersite.com/page"),
            ],
        );
        let handler = SearchShopLinksHandler::new(Arc::new(client.clone()));

        let links = handler
            .handle(SearchShopLinksCommand {
                term: "seaweed crisps".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].uri, "https://tiktok.com/@snackshop");

        let calls = client.get_calls();
        assert!(calls[0].web_search);
        assert!(calls[0].prompt.contains("seaweed crisps"));
    }

    #[tokio::test]
    async fn search_shops_ignores_the_reply_text() {
        let client = MockGenerationClient::new()
            .with_reply("no links were found, sorry about that");
        let handler = SearchShopLinksHandler::new(Arc::new(client));

        let links = handler
            .handle(SearchShopLinksCommand {
                term: "anything".to_string(),
            })
            .await
            .unwrap();

        assert!(links.is_empty());
    }

    #[tokio::test]
    async fn search_shops_rejects_blank_terms() {
        let client = MockGenerationClient::new();
        let handler = SearchShopLinksHandler::new(Arc::new(client.clone()));

        let result = handler
            .handle(SearchShopLinksCommand {
                term: "   ".to_string(),
            })
            .await;

        assert!(matches!(
            result,
            Err(SearchShopLinksError::EmptyField { field: "search term" })
        ));
        assert_eq!(client.call_count(), 0);
    }
}
