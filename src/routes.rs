/// Route definitions, shared between `main` and the HTTP test harness.
use actix_web::web;

use crate::handlers::{health, tasks, token, users};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health)).service(
        web::scope("/api/v1")
            .route("/token", web::post().to(token::issue_token))
            .route("/token/scopes", web::get().to(token::scope_catalog))
            .route("/users", web::get().to(users::list_users))
            .route("/users", web::post().to(users::create_user))
            .route("/users/me", web::get().to(users::me))
            .route("/users/{username}", web::delete().to(users::delete_user))
            .route("/tasks", web::get().to(tasks::list_tasks))
            .route("/tasks", web::post().to(tasks::create_task))
            .route("/tasks/{id}", web::get().to(tasks::get_task))
            .route("/tasks/{id}", web::put().to(tasks::update_task))
            .route("/tasks/{id}", web::delete().to(tasks::delete_task)),
    );
}
