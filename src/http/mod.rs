//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, tower-http layers)
//!     → request.rs (read body, decode form, request ID)
//!     → pipeline::Pipeline::dispatch
//!     → response.rs (canonical status responses)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{PageRequest, RequestError, X_REQUEST_ID};
pub use server::HttpServer;
