//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Request path
//!     → router.rs (ordered scan)
//!     → matcher.rs (exact or segment pattern)
//!     → Return: matched Route or None
//! ```
//!
//! # Design Decisions
//! - Routes registered at startup, immutable at runtime
//! - Deterministic: same path always resolves to the same route
//! - First match wins (registration order)

pub mod matcher;
pub mod router;

pub use matcher::{ExactPathMatcher, Matcher, SegmentMatcher};
pub use router::{Route, Router};
