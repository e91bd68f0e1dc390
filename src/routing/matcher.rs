//! Path matching logic.
//!
//! # Responsibilities
//! - Decide whether a route pattern accepts a request path
//! - Keep the pattern text around for logs and metric labels
//!
//! # Design Decisions
//! - Paths are compared case-sensitively
//! - A single trailing slash is ignored ("/ping/" matches "/ping")
//! - No regex; segment comparison is linear in path length

/// Trait for matching request paths against a route pattern.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the path matches this pattern.
    fn matches(&self, path: &str) -> bool;

    /// The pattern as registered.
    fn pattern(&self) -> &str;
}

fn normalize(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}

/// Matches one literal path.
#[derive(Debug, Clone)]
pub struct ExactPathMatcher {
    path: String,
}

impl ExactPathMatcher {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Matcher for ExactPathMatcher {
    fn matches(&self, path: &str) -> bool {
        normalize(path) == normalize(&self.path)
    }

    fn pattern(&self) -> &str {
        &self.path
    }
}

/// Matches paths segment by segment; `:name` segments accept any
/// non-empty value.
#[derive(Debug, Clone)]
pub struct SegmentMatcher {
    pattern: String,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

impl SegmentMatcher {
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let segments = split(&pattern)
            .map(|s| match s.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(s.to_string()),
            })
            .collect();
        Self { pattern, segments }
    }

    /// Names of the variable segments, in order.
    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }
}

fn split(path: &str) -> impl Iterator<Item = &str> {
    normalize(path).split('/').filter(|s| !s.is_empty())
}

impl Matcher for SegmentMatcher {
    fn matches(&self, path: &str) -> bool {
        let mut parts = split(path);
        for segment in &self.segments {
            let Some(part) = parts.next() else {
                return false;
            };
            if let Segment::Literal(lit) = segment {
                if lit != part {
                    return false;
                }
            }
        }
        parts.next().is_none()
    }

    fn pattern(&self) -> &str {
        &self.pattern
    }
}
