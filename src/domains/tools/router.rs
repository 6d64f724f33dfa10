//! Tool Router - builds the rmcp ToolRouter.
//!
//! This module builds the ToolRouter for STDIO/TCP transport by delegating
//! to the tool definitions themselves. Each tool knows how to create its own route.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::GetTranscriptTool;
use crate::domains::transcripts::TranscriptFetcher;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(fetcher: Arc<TranscriptFetcher>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new().with_route(GetTranscriptTool::create_route(fetcher))
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::*;
    use crate::domains::transcripts::test_support::MockSource;

    struct TestServer {}

    fn test_fetcher() -> Arc<TranscriptFetcher> {
        Arc::new(TranscriptFetcher::new(Arc::new(MockSource::with_texts(&[]))))
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_fetcher());
        let tools = router.list_all();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name.as_ref(), "get_youtube_transcript");
    }

    #[test]
    fn test_listing_is_stable() {
        let router: ToolRouter<TestServer> = build_tool_router(test_fetcher());
        let first = router.list_all();
        let second = router.list_all();
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_eq!(first[0].name, second[0].name);
        assert_eq!(first[0].input_schema, second[0].input_schema);
    }

    #[test]
    fn test_registry_matches_router() {
        // Ensure registry and router have the same tools
        let registry_names = ToolRegistry::tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(test_fetcher());
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }
}
