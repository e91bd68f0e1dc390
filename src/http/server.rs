//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router that forwards every path to the pipeline
//! - Wire up middleware (tracing, timeout, request ID)
//! - Convert transport requests into `PageRequest`
//! - Serve until a shutdown signal arrives

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    routing::any,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::http::request::PageRequest;
use crate::http::response;
use crate::lifecycle::signals::shutdown_signal;
use crate::pipeline::Pipeline;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub max_body_bytes: usize,
}

/// HTTP front end for the page pipeline.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    pub fn new(config: AppConfig, pipeline: Arc<Pipeline>) -> Self {
        let state = AppState {
            pipeline,
            max_body_bytes: config.listener.max_body_bytes,
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(page_handler))
            .route("/", any(page_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires or Ctrl+C is received.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

/// Single entry point: every method and path goes through the pipeline.
async fn page_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let req = match PageRequest::from_http(request, state.max_body_bytes).await {
        Ok(req) => req,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected request");
            return response::rejected(e.status());
        }
    };

    tracing::debug!(
        request_id = %req.request_id,
        method = %req.method,
        path = %req.path,
        "Dispatching request"
    );
    state.pipeline.dispatch(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, Method, StatusCode};
    use tower::ServiceExt;

    use crate::app::build_pipeline;
    use crate::store::MemoryStore;

    fn server(config: AppConfig) -> HttpServer {
        let pipeline = Arc::new(build_pipeline(&config, Arc::new(MemoryStore::with_initial_schema())));
        HttpServer::new(config, pipeline)
    }

    #[tokio::test]
    async fn test_every_path_reaches_pipeline() {
        let router = server(AppConfig::default()).router();

        let res = router
            .clone()
            .oneshot(Request::builder().uri("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key("x-request-id"));

        let res = router
            .oneshot(Request::builder().uri("/a/b/c").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_request_id_is_preserved() {
        let res = server(AppConfig::default())
            .router()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header("x-request-id", "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.headers()["x-request-id"], "abc-123");
    }

    #[tokio::test]
    async fn test_body_limit() {
        let mut config = AppConfig::default();
        config.listener.max_body_bytes = 8;

        let res = server(config)
            .router()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/notes")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .header(header::CONTENT_LENGTH, "33")
                    .body(Body::from("title=aaaaaaaaaaaaaaaaaaaaaaaaaaa"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
