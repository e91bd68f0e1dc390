//! One-shot initialization gate.
//!
//! # Responsibilities
//! - Launch the bootstrap action before the first request reaches routing
//! - Never launch it twice, even when many first requests race
//!
//! # Design Decisions
//! - Latch is an `AtomicBool` flipped with compare-and-set; the single
//!   winner is the only caller that spawns the action
//! - The action is spawned and not awaited; the triggering request proceeds
//! - Action failures are logged inside the spawned task and never reach
//!   the request that triggered it

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::observability::metrics;

/// Bootstrap side effect guarded by the gate.
#[async_trait]
pub trait Bootstrap: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(&self) -> Result<BootstrapReport, Box<dyn std::error::Error + Send + Sync>>;
}

/// What a bootstrap run actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapReport {
    Applied { rows: usize },
    Skipped,
}

/// Process-wide latch in front of a bootstrap action.
pub struct InitGate {
    fired: AtomicBool,
    action: Option<Arc<dyn Bootstrap>>,
}

impl InitGate {
    pub fn new(action: Arc<dyn Bootstrap>) -> Self {
        Self {
            fired: AtomicBool::new(false),
            action: Some(action),
        }
    }

    /// A gate with nothing to run. It still latches on first use.
    pub fn disabled() -> Self {
        Self {
            fired: AtomicBool::new(false),
            action: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }

    /// Called once per request. Returns `true` for the one call that
    /// launched the bootstrap action.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn ensure_initialized(&self) -> bool {
        if self.fired.load(Ordering::Acquire) {
            return false;
        }
        if self
            .fired
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }

        let Some(action) = self.action.clone() else {
            return true;
        };

        tracing::info!(action = action.name(), "Launching bootstrap");
        tokio::spawn(async move {
            match action.run().await {
                Ok(BootstrapReport::Applied { rows }) => {
                    metrics::record_seed_run("applied");
                    tracing::info!(action = action.name(), rows, "Bootstrap finished");
                }
                Ok(BootstrapReport::Skipped) => {
                    metrics::record_seed_run("skipped");
                    tracing::info!(action = action.name(), "Bootstrap skipped");
                }
                Err(e) => {
                    metrics::record_seed_run("failed");
                    tracing::error!(action = action.name(), error = %e, "Bootstrap failed");
                }
            }
        });
        true
    }
}
