//! The notes demo application: middleware, interrupters, pages.
//!
//! # Route table
//! ```text
//! global: session → load_user → (init gate: seed users)
//! /        → HomePage
//! /ping    → PingPage
//! /me      → RequireAuth → MePage
//! /notes   → NotesPage (GET list, POST create)
//! ```

pub mod auth;
pub mod notes;
pub mod pages;
pub mod session;
pub mod users;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::pipeline::{InitGate, Pipeline};
use crate::render::Document;
use crate::store::DataStore;

use self::auth::RequireAuth;
use self::pages::{HomePage, MePage, NotesPage, PingPage};
use self::session::{CookieSessionResolver, LoadUser, SessionMiddleware};
use self::users::UserSeeder;

/// Assemble the application pipeline. Called once at startup.
pub fn build_pipeline(config: &AppConfig, store: Arc<dyn DataStore>) -> Pipeline {
    let resolver = Arc::new(CookieSessionResolver::from_config(&config.session));

    let gate = if config.seed.enabled {
        InitGate::new(Arc::new(UserSeeder::new(store.clone(), &config.seed)))
    } else {
        InitGate::disabled()
    };

    Pipeline::builder(Arc::new(Document::default()))
        .middleware(Arc::new(SessionMiddleware::new(resolver)))
        .middleware(Arc::new(LoadUser::new(store.clone())))
        .gate(gate)
        .route("/", vec![], Arc::new(HomePage))
        .route("/ping", vec![], Arc::new(PingPage))
        .route("/me", vec![Arc::new(RequireAuth)], Arc::new(MePage))
        .route("/notes", vec![], Arc::new(NotesPage::new(store)))
        .build()
}
