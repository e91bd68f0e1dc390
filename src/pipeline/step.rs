//! Step and handler abstractions.

use async_trait::async_trait;
use axum::response::Response;
use maud::Markup;

use crate::http::request::PageRequest;
use crate::pipeline::context::Context;
use crate::pipeline::error::PipelineError;

/// Result of running a single step.
#[derive(Debug)]
pub enum Outcome {
    /// Proceed to the next step.
    Continue,
    /// Stop the chain and answer with this response.
    Terminate(Response),
}

impl Outcome {
    pub fn is_continue(&self) -> bool {
        matches!(self, Outcome::Continue)
    }
}

/// A unit of pipeline logic: global middleware or a route interrupter.
#[async_trait]
pub trait Step: Send + Sync {
    /// Name used in logs and metrics.
    fn name(&self) -> &'static str;

    async fn call(&self, req: &PageRequest, ctx: &mut Context) -> Result<Outcome, PipelineError>;
}

/// Terminal handler of a route. Produces page content, never `Continue`.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, req: &PageRequest, ctx: &mut Context) -> Result<Markup, PipelineError>;
}
