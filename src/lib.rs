//! Notes worker: a small multi-page site driven by an explicit request pipeline.

pub mod app;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod pipeline;
pub mod render;
pub mod routing;
pub mod store;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use pipeline::Pipeline;
