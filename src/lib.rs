// Task Service Library

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod security;
pub mod services;

pub use error::{AppError, Result};

use std::sync::Arc;

use crate::db::{AccountStore, TaskStore};
use crate::services::auth::AuthService;

/// Shared application state, constructed once in `main` (or a test harness)
/// and injected into handlers via `web::Data`. No module-scope singletons.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountStore>,
    pub tasks: Arc<dyn TaskStore>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        tasks: Arc<dyn TaskStore>,
        auth: Arc<AuthService>,
    ) -> Self {
        Self {
            accounts,
            tasks,
            auth,
        }
    }
}
