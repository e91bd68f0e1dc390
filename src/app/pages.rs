//! Terminal handlers for each page.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::Method;
use maud::{html, Markup};

use crate::app::notes::{self, NewNote};
use crate::http::request::PageRequest;
use crate::pipeline::{Context, Handler, PipelineError};
use crate::store::DataStore;

pub struct HomePage;

#[async_trait]
impl Handler for HomePage {
    async fn handle(&self, _req: &PageRequest, _ctx: &mut Context) -> Result<Markup, PipelineError> {
        Ok(html! { p { "Home (public)" } })
    }
}

pub struct PingPage;

#[async_trait]
impl Handler for PingPage {
    async fn handle(&self, _req: &PageRequest, _ctx: &mut Context) -> Result<Markup, PipelineError> {
        Ok(html! { p { "Pong (public)" } })
    }
}

/// Signed-in user's page. Expects `RequireAuth` in front of it.
pub struct MePage;

#[async_trait]
impl Handler for MePage {
    async fn handle(&self, _req: &PageRequest, ctx: &mut Context) -> Result<Markup, PipelineError> {
        let user = ctx.user().ok_or(PipelineError::MissingContext("user"))?;
        Ok(html! { p { "Hello " (user.username) " user page" } })
    }
}

/// Lists the current user's notes; a POST with a title adds one first.
pub struct NotesPage {
    store: Arc<dyn DataStore>,
}

impl NotesPage {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Handler for NotesPage {
    async fn handle(&self, req: &PageRequest, ctx: &mut Context) -> Result<Markup, PipelineError> {
        let Some(user) = ctx.user() else {
            return Ok(html! {
                h1 { "Notes" }
                p { "Sign in to see your notes." }
            });
        };

        if req.method == Method::POST {
            if let Some(new) = NewNote::from_form(req) {
                let note = notes::create_note(self.store.as_ref(), &user.id, new).await?;
                tracing::info!(request_id = %req.request_id, note_id = %note.id, user_id = %user.id, "Note created");
            }
        }

        let notes = notes::notes_for(self.store.as_ref(), &user.id).await?;
        Ok(html! {
            h1 { "Notes" }
            form method="post" action="/notes" {
                input name="title" placeholder="Title";
                textarea name="content" placeholder="Write a note…" {}
                button type="submit" { "Add" }
            }
            @if notes.is_empty() {
                p { "No notes yet." }
            } @else {
                ul {
                    @for note in &notes {
                        li {
                            strong { (note.title) }
                            @if let Some(content) = &note.content {
                                ": " (content)
                            }
                        }
                    }
                }
            }
        })
    }
}
