//! Unexpected faults raised by pipeline steps.
//!
//! Deliberate short-circuits are not errors; they travel as
//! `Outcome::Terminate`. Anything here ends up as a generic 500.

use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("data store failure: {0}")]
    Store(#[from] StoreError),

    #[error("session lookup failed: {0}")]
    Session(String),

    /// A handler ran without a context slot it depends on.
    #[error("context slot `{0}` is not populated")]
    MissingContext(&'static str),

    #[error("{0}")]
    Step(String),
}
