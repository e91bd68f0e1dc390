//! Sequential step execution with short-circuit.
//!
//! The same routine runs global middleware and route interrupters. A step
//! returning `Terminate` stops the chain; a step returning `Err` stops it
//! too and the error goes up untouched.

use std::sync::Arc;

use crate::http::request::PageRequest;
use crate::pipeline::context::Context;
use crate::pipeline::error::PipelineError;
use crate::pipeline::step::{Outcome, Step};

/// Run `steps` in order against one request.
pub async fn run_chain(
    steps: &[Arc<dyn Step>],
    req: &PageRequest,
    ctx: &mut Context,
) -> Result<Outcome, PipelineError> {
    for step in steps {
        match step.call(req, ctx).await? {
            Outcome::Continue => continue,
            terminate @ Outcome::Terminate(_) => {
                tracing::debug!(
                    request_id = %req.request_id,
                    step = step.name(),
                    "Chain short-circuited"
                );
                return Ok(terminate);
            }
        }
    }
    Ok(Outcome::Continue)
}
