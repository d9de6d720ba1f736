//! HTTP surface for the corkboard auth collaborator.
//!
//! Exposes the single wire-level contract: `POST /api/auth/signup`.
//! Everything else in the system is consumed as a library through
//! `corkboard_core`.

use std::sync::{Arc, Mutex};

use axum::routing::post;
use axum::Router;
use rusqlite::Connection;

pub mod config;
pub mod password;
pub mod signup;

/// Shared application state.
///
/// SQLite connections are not `Sync`, so the single connection sits
/// behind a mutex; signup traffic is low enough that contention is not
/// a concern.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
}

impl AppState {
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
        }
    }
}

/// Builds the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/signup", post(signup::signup))
        .with_state(state)
}
