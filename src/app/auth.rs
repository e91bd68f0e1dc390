//! Route interrupters for authorization.

use async_trait::async_trait;

use crate::http::request::PageRequest;
use crate::http::response;
use crate::pipeline::{Context, Outcome, PipelineError, Step};

/// Short-circuits with 401 unless a user has been hydrated.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequireAuth;

#[async_trait]
impl Step for RequireAuth {
    fn name(&self) -> &'static str {
        "require_auth"
    }

    async fn call(&self, req: &PageRequest, ctx: &mut Context) -> Result<Outcome, PipelineError> {
        if ctx.user().is_some() {
            return Ok(Outcome::Continue);
        }
        tracing::debug!(request_id = %req.request_id, path = %req.path, "Unauthorized");
        Ok(Outcome::Terminate(response::unauthorized()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use chrono::Utc;

    use crate::app::users::User;

    #[tokio::test]
    async fn test_require_auth() {
        let req = PageRequest::get("/me");

        let mut ctx = Context::new();
        match RequireAuth.call(&req, &mut ctx).await.unwrap() {
            Outcome::Terminate(res) => assert_eq!(res.status(), StatusCode::UNAUTHORIZED),
            Outcome::Continue => panic!("expected 401"),
        }

        ctx.set_user(Some(User {
            id: "u_123".into(),
            username: "John".into(),
            created_at: Utc::now(),
        }));
        assert!(RequireAuth.call(&req, &mut ctx).await.unwrap().is_continue());
    }
}
