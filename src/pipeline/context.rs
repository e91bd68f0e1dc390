//! Per-request context store.
//!
//! A `Context` is created empty for every request by the dispatcher and
//! dropped when the response has been produced. Steps receive it as
//! `&mut Context`, so mutations are visible to later steps of the same
//! chain and to nothing else.

use crate::app::session::Session;
use crate::app::users::User;

/// Mutable state threaded through one request's steps.
#[derive(Debug, Default)]
pub struct Context {
    session: Option<Session>,
    user: Option<User>,
}

impl Context {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn set_session(&mut self, session: Option<Session>) {
        self.session = session;
    }

    /// Identity hydrated from the session, if any middleware found one.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn set_user(&mut self, user: Option<User>) {
        self.user = user;
    }
}
