//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use maud::{html, Markup};
use tokio::net::TcpListener;

use notes_worker::config::AppConfig;
use notes_worker::http::PageRequest;
use notes_worker::pipeline::gate::BootstrapReport;
use notes_worker::pipeline::{Bootstrap, Context, Handler, Outcome, Pipeline, PipelineError, Step};
use notes_worker::{HttpServer, Shutdown};

/// Step that counts calls and then does what it was told.
pub struct CountingStep {
    pub hits: Arc<AtomicUsize>,
    pub behavior: Behavior,
}

#[derive(Clone, Copy)]
pub enum Behavior {
    Continue,
    Terminate(StatusCode),
    Fail,
}

impl CountingStep {
    pub fn new(behavior: Behavior) -> (Arc<Self>, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        (
            Arc::new(Self {
                hits: hits.clone(),
                behavior,
            }),
            hits,
        )
    }
}

#[async_trait]
impl Step for CountingStep {
    fn name(&self) -> &'static str {
        "counting"
    }

    async fn call(&self, _req: &PageRequest, _ctx: &mut Context) -> Result<Outcome, PipelineError> {
        self.hits.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            Behavior::Continue => Ok(Outcome::Continue),
            Behavior::Terminate(status) => Ok(Outcome::Terminate(status.into_response())),
            Behavior::Fail => Err(PipelineError::Step("collaborator exploded: secret detail".into())),
        }
    }
}

/// Handler that counts calls and renders a fixed paragraph.
pub struct CountingHandler {
    pub hits: Arc<AtomicUsize>,
}

impl CountingHandler {
    pub fn new() -> (Arc<Self>, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        (Arc::new(Self { hits: hits.clone() }), hits)
    }
}

#[async_trait]
impl Handler for CountingHandler {
    async fn handle(&self, _req: &PageRequest, _ctx: &mut Context) -> Result<Markup, PipelineError> {
        self.hits.fetch_add(1, Ordering::SeqCst);
        Ok(html! { p { "handled" } })
    }
}

/// Bootstrap that counts runs, optionally failing.
pub struct CountingBootstrap {
    pub runs: Arc<AtomicUsize>,
    pub fail: bool,
}

impl CountingBootstrap {
    pub fn new(fail: bool) -> (Arc<Self>, Arc<AtomicUsize>) {
        let runs = Arc::new(AtomicUsize::new(0));
        (Arc::new(Self { runs: runs.clone(), fail }), runs)
    }
}

#[async_trait]
impl Bootstrap for CountingBootstrap {
    fn name(&self) -> &'static str {
        "counting"
    }

    async fn run(&self) -> Result<BootstrapReport, Box<dyn std::error::Error + Send + Sync>> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        // Give racing requests a window to observe the gate mid-run.
        tokio::time::sleep(Duration::from_millis(10)).await;
        if self.fail {
            return Err("seeding failed".into());
        }
        Ok(BootstrapReport::Applied { rows: 0 })
    }
}

pub async fn body_text(res: Response) -> String {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Serve `pipeline` on an ephemeral local port.
pub async fn start_server(config: AppConfig, pipeline: Arc<Pipeline>) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, pipeline);
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}

