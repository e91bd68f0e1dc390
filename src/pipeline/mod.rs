//! Request pipeline subsystem.
//!
//! # Data Flow
//! ```text
//! PageRequest
//!     → dispatcher.rs (fresh Context per request)
//!     → chain.rs (global middleware, in order)
//!     → gate.rs (one-shot seeding latch)
//!     → routing::Router (path → interrupters + handler)
//!     → chain.rs (route interrupters)
//!     → Handler (page content)
//!     → render::Shell (document)
//!     → Response
//! ```
//!
//! # Design Decisions
//! - Pipeline is built once at startup and never mutated afterwards
//! - Context is owned by a single request; nothing request-scoped is shared
//! - Step outcomes are an explicit enum, not a nullable response
//! - Every fault is converted to a response at exactly one place (dispatcher)

pub mod chain;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod gate;
pub mod step;

pub use chain::run_chain;
pub use context::Context;
pub use dispatcher::{Pipeline, PipelineBuilder};
pub use error::PipelineError;
pub use gate::{Bootstrap, BootstrapReport, InitGate};
pub use step::{Handler, Outcome, Step};
