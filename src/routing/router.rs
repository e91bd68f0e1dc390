//! Route table and lookup.
//!
//! # Responsibilities
//! - Store routes in registration order
//! - Resolve a path to the first matching route
//! - Return an explicit no-match instead of a silent default
//!
//! # Design Decisions
//! - Filled at startup, read-only while serving (no locks)
//! - O(n) scan; the route table is small

use std::sync::Arc;

use crate::pipeline::step::{Handler, Step};
use crate::routing::matcher::Matcher;

/// A registered route: pattern, interrupters, terminal handler.
pub struct Route {
    matcher: Box<dyn Matcher>,
    interrupters: Vec<Arc<dyn Step>>,
    handler: Arc<dyn Handler>,
}

impl Route {
    pub fn pattern(&self) -> &str {
        self.matcher.pattern()
    }

    /// Steps run before the handler, in order.
    pub fn interrupters(&self) -> &[Arc<dyn Step>] {
        &self.interrupters
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern())
            .field("interrupters", &self.interrupters.len())
            .finish()
    }
}

/// Ordered route table.
#[derive(Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        matcher: Box<dyn Matcher>,
        interrupters: Vec<Arc<dyn Step>>,
        handler: Arc<dyn Handler>,
    ) {
        tracing::debug!(pattern = matcher.pattern(), interrupters = interrupters.len(), "Route registered");
        self.routes.push(Route {
            matcher,
            interrupters,
            handler,
        });
    }

    /// First registered route whose pattern matches `path`.
    pub fn resolve(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.matcher.matches(path))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use maud::{html, Markup};

    use crate::http::request::PageRequest;
    use crate::pipeline::{Context, PipelineError};
    use crate::routing::matcher::{ExactPathMatcher, SegmentMatcher};

    struct Label(&'static str);

    #[async_trait]
    impl Handler for Label {
        async fn handle(&self, _req: &PageRequest, _ctx: &mut Context) -> Result<Markup, PipelineError> {
            Ok(html! { (self.0) })
        }
    }

    #[test]
    fn test_resolve_exact() {
        let mut router = Router::new();
        router.register(Box::new(ExactPathMatcher::new("/")), vec![], Arc::new(Label("home")));
        router.register(Box::new(ExactPathMatcher::new("/ping")), vec![], Arc::new(Label("ping")));

        assert_eq!(router.resolve("/ping").map(Route::pattern), Some("/ping"));
        assert_eq!(router.resolve("/").map(Route::pattern), Some("/"));
        assert!(router.resolve("/missing").is_none());
        assert_eq!(router.len(), 2);
    }

    #[tokio::test]
    async fn test_first_registered_wins() {
        let mut router = Router::new();
        router.register(Box::new(SegmentMatcher::new("/notes/:id")), vec![], Arc::new(Label("param")));
        router.register(Box::new(ExactPathMatcher::new("/notes/new")), vec![], Arc::new(Label("literal")));

        let route = router.resolve("/notes/new").unwrap();
        assert_eq!(route.pattern(), "/notes/:id");

        let mut ctx = Context::new();
        let body = route.handler().handle(&PageRequest::get("/notes/new"), &mut ctx).await.unwrap();
        assert_eq!(body.into_string(), "param");
    }

    #[test]
    fn test_empty_router() {
        let router = Router::new();
        assert!(router.is_empty());
        assert!(router.resolve("/").is_none());
    }
}
