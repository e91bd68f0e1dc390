//! Session lookup and identity hydration.
//!
//! # Responsibilities
//! - Resolve an opaque session from the request (cookie, or configured fallback)
//! - Populate `Context::session`, then `Context::user` from the data store
//!
//! # Design Decisions
//! - A session whose user no longer exists leaves `user` empty; it is not a fault
//! - Lookup failures from the store are faults and surface as 500

use std::sync::Arc;

use async_trait::async_trait;

use crate::app::users;
use crate::config::SessionConfig;
use crate::http::request::PageRequest;
use crate::pipeline::{Context, Outcome, PipelineError, Step};
use crate::store::DataStore;

/// Opaque session descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
}

impl Session {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self { user_id: user_id.into() }
    }
}

/// Maps a request to its session, if any.
#[async_trait]
pub trait SessionResolver: Send + Sync {
    async fn lookup(&self, req: &PageRequest) -> Result<Option<Session>, PipelineError>;
}

/// Reads the user id from a cookie.
#[derive(Debug, Clone)]
pub struct CookieSessionResolver {
    cookie_name: String,
    fallback_user_id: Option<String>,
}

impl CookieSessionResolver {
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            fallback_user_id: None,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            cookie_name: config.cookie_name.clone(),
            fallback_user_id: config.fallback_user_id.clone(),
        }
    }

    /// Use `user_id` for requests that carry no session cookie.
    pub fn with_fallback(mut self, user_id: impl Into<String>) -> Self {
        self.fallback_user_id = Some(user_id.into());
        self
    }
}

#[async_trait]
impl SessionResolver for CookieSessionResolver {
    async fn lookup(&self, req: &PageRequest) -> Result<Option<Session>, PipelineError> {
        let user_id = req
            .cookie(&self.cookie_name)
            .filter(|v| !v.is_empty())
            .or(self.fallback_user_id.as_deref());
        Ok(user_id.map(Session::new))
    }
}

/// Global step: fills `Context::session`.
pub struct SessionMiddleware {
    resolver: Arc<dyn SessionResolver>,
}

impl SessionMiddleware {
    pub fn new(resolver: Arc<dyn SessionResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl Step for SessionMiddleware {
    fn name(&self) -> &'static str {
        "session"
    }

    async fn call(&self, req: &PageRequest, ctx: &mut Context) -> Result<Outcome, PipelineError> {
        let session = self.resolver.lookup(req).await?;
        ctx.set_session(session);
        Ok(Outcome::Continue)
    }
}

/// Global step: hydrates `Context::user` from the session.
pub struct LoadUser {
    store: Arc<dyn DataStore>,
}

impl LoadUser {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Step for LoadUser {
    fn name(&self) -> &'static str {
        "load_user"
    }

    async fn call(&self, req: &PageRequest, ctx: &mut Context) -> Result<Outcome, PipelineError> {
        let Some(user_id) = ctx.session().map(|s| s.user_id.clone()) else {
            return Ok(Outcome::Continue);
        };

        let user = users::find_user(self.store.as_ref(), &user_id).await?;
        if user.is_none() {
            tracing::debug!(request_id = %req.request_id, user_id = %user_id, "Session user not found");
        }
        ctx.set_user(user);
        Ok(Outcome::Continue)
    }
}
