//! Document rendering.
//!
//! A `Shell` wraps a handler's page content into the full document. It is
//! a pure function of the final context and the content.

use maud::{html, Markup, DOCTYPE};

use crate::pipeline::Context;

pub trait Shell: Send + Sync {
    fn render(&self, ctx: &Context, content: Markup) -> Markup;
}

/// The site's HTML document with header navigation.
#[derive(Debug, Clone)]
pub struct Document {
    title: String,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into() }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("Notes")
    }
}

impl Shell for Document {
    fn render(&self, ctx: &Context, content: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { (self.title) }
                }
                body {
                    header {
                        a href="/" { "Home" } " · "
                        a href="/ping" { "Ping" } " · "
                        a href="/me" { "Me" } " · "
                        a href="/notes" { "Notes" }
                        @if let Some(user) = ctx.user() {
                            " · " span.user { "Signed in as " (user.username) }
                        }
                    }
                    div id="root" { (content) }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::app::users::User;

    #[test]
    fn test_document_wraps_content() {
        let ctx = Context::new();
        let doc = Document::default().render(&ctx, html! { p { "Pong (public)" } }).into_string();

        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>Notes</title>"));
        assert!(doc.contains(r#"<div id="root"><p>Pong (public)</p></div>"#));
        assert!(!doc.contains("Signed in as"));
    }

    #[test]
    fn test_document_shows_user() {
        let mut ctx = Context::new();
        ctx.set_user(Some(User {
            id: "u_123".into(),
            username: "John".into(),
            created_at: Utc::now(),
        }));
        let doc = Document::new("Demo").render(&ctx, html! {}).into_string();
        assert!(doc.contains("Signed in as John"));
        assert!(doc.contains("<title>Demo</title>"));
    }
}
