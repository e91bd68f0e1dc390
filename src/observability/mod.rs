//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Pipeline, gate, server produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID is a field on every request-scoped event
//! - Metric calls are no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
