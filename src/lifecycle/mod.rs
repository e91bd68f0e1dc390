//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Build store and pipeline → Bind listener
//!
//! Shutdown (shutdown.rs, signals.rs):
//!     Ctrl+C or Shutdown::trigger → Stop accepting → Drain in-flight → Exit
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
