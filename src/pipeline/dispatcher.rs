//! Per-request orchestration.
//!
//! # State machine
//! ```text
//! START → GLOBAL_MIDDLEWARE ─terminate→ RESPOND
//!       → INIT_CHECK
//!       → ROUTING ─not found→ RESPOND (404)
//!       → ROUTE_STEPS ─terminate→ RESPOND
//!       → TERMINAL_HANDLER → RENDER → RESPOND
//! any fault ─────────────────────────→ RESPOND (500)
//! ```
//!
//! Transitions only move forward. Nothing is retried.

use std::sync::Arc;
use std::time::Instant;

use axum::response::{Html, IntoResponse, Response};

use crate::http::request::PageRequest;
use crate::http::response;
use crate::observability::metrics;
use crate::pipeline::chain::run_chain;
use crate::pipeline::context::Context;
use crate::pipeline::error::PipelineError;
use crate::pipeline::gate::InitGate;
use crate::pipeline::step::{Handler, Outcome, Step};
use crate::render::Shell;
use crate::routing::matcher::{ExactPathMatcher, Matcher};
use crate::routing::Router;

const NO_ROUTE: &str = "none";

/// The immutable request pipeline shared by all in-flight requests.
pub struct Pipeline {
    middleware: Vec<Arc<dyn Step>>,
    gate: InitGate,
    router: Router,
    shell: Arc<dyn Shell>,
}

impl Pipeline {
    pub fn builder(shell: Arc<dyn Shell>) -> PipelineBuilder {
        PipelineBuilder {
            middleware: Vec::new(),
            gate: InitGate::disabled(),
            router: Router::new(),
            shell,
        }
    }

    pub fn gate(&self) -> &InitGate {
        &self.gate
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Handle one request end to end. Always yields a response.
    pub async fn dispatch(&self, req: PageRequest) -> Response {
        let start = Instant::now();
        let mut ctx = Context::new();
        let mut route = NO_ROUTE;

        let response = match self.run(&req, &mut ctx, &mut route).await {
            Ok(res) => res,
            Err(e) => {
                tracing::error!(
                    request_id = %req.request_id,
                    method = %req.method,
                    path = %req.path,
                    route = %route,
                    error = %e,
                    "Request failed"
                );
                response::server_error()
            }
        };

        metrics::record_request(req.method.as_str(), response.status().as_u16(), route, start);
        response
    }

    async fn run<'a>(
        &'a self,
        req: &PageRequest,
        ctx: &mut Context,
        route_name: &mut &'a str,
    ) -> Result<Response, PipelineError> {
        if let Outcome::Terminate(res) = run_chain(&self.middleware, req, ctx).await? {
            metrics::record_short_circuit("global");
            return Ok(res);
        }

        self.gate.ensure_initialized();

        let Some(route) = self.router.resolve(&req.path) else {
            tracing::debug!(request_id = %req.request_id, path = %req.path, "No route matched");
            return Ok(response::not_found());
        };
        *route_name = route.pattern();

        if let Outcome::Terminate(res) = run_chain(route.interrupters(), req, ctx).await? {
            metrics::record_short_circuit("route");
            return Ok(res);
        }

        let content = route.handler().handle(req, ctx).await?;
        let document = self.shell.render(ctx, content);
        Ok(Html(document.into_string()).into_response())
    }
}

/// Startup-time assembly of a [`Pipeline`].
pub struct PipelineBuilder {
    middleware: Vec<Arc<dyn Step>>,
    gate: InitGate,
    router: Router,
    shell: Arc<dyn Shell>,
}

impl PipelineBuilder {
    /// Append a global middleware step. Order of calls is execution order.
    pub fn middleware(mut self, step: Arc<dyn Step>) -> Self {
        self.middleware.push(step);
        self
    }

    pub fn gate(mut self, gate: InitGate) -> Self {
        self.gate = gate;
        self
    }

    /// Register a literal path.
    pub fn route(self, path: &str, interrupters: Vec<Arc<dyn Step>>, handler: Arc<dyn Handler>) -> Self {
        self.route_with(ExactPathMatcher::new(path), interrupters, handler)
    }

    pub fn route_with(
        mut self,
        matcher: impl Matcher + 'static,
        interrupters: Vec<Arc<dyn Step>>,
        handler: Arc<dyn Handler>,
    ) -> Self {
        self.router.register(Box::new(matcher), interrupters, handler);
        self
    }

    pub fn build(self) -> Pipeline {
        tracing::debug!(
            middleware = self.middleware.len(),
            routes = self.router.len(),
            "Pipeline assembled"
        );
        Pipeline {
            middleware: self.middleware,
            gate: self.gate,
            router: self.router,
            shell: self.shell,
        }
    }
}
