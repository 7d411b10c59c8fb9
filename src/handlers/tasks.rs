/// Task CRUD handlers
use actix_web::{web, HttpResponse};
use chrono::Utc;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::middleware::BearerAuth;
use crate::models::{CreateTaskRequest, Task, TaskUpdate};
use crate::security::Scope;
use crate::AppState;

const TASK_NOT_FOUND_MSG: &str = "Task not found error";

/// List all tasks. Requires `task:read`.
pub async fn list_tasks(state: web::Data<AppState>, auth: BearerAuth) -> Result<HttpResponse> {
    state
        .auth
        .authorize(auth.token(), &[Scope::TaskRead])
        .await?;

    let tasks = state.tasks.get_all().await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Fetch one task. Requires `task:read`.
pub async fn get_task(
    state: web::Data<AppState>,
    auth: BearerAuth,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    state
        .auth
        .authorize(auth.token(), &[Scope::TaskRead])
        .await?;

    match state.tasks.get_by_id(*path).await? {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(AppError::NotFound(TASK_NOT_FOUND_MSG.to_string())),
    }
}

/// Create a task owned by the caller. Requires `task:write`.
pub async fn create_task(
    state: web::Data<AppState>,
    auth: BearerAuth,
    payload: web::Json<CreateTaskRequest>,
) -> Result<HttpResponse> {
    let account = state
        .auth
        .authorize(auth.token(), &[Scope::TaskWrite])
        .await?;

    let now = Utc::now();
    let task = Task {
        id: Uuid::new_v4(),
        title: payload.validated_title()?,
        user_id: account.id,
        status: payload.status,
        contributors: payload.contributors.clone(),
        created_at: now,
        updated_at: now,
    };

    let id = state.tasks.create(&task).await?;
    let created = state
        .tasks
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::Internal("Task vanished after insert".to_string()))?;

    Ok(HttpResponse::Created().json(created))
}

/// Partially update a task. Requires `task:write`.
pub async fn update_task(
    state: web::Data<AppState>,
    auth: BearerAuth,
    path: web::Path<Uuid>,
    payload: web::Json<TaskUpdate>,
) -> Result<HttpResponse> {
    state
        .auth
        .authorize(auth.token(), &[Scope::TaskWrite])
        .await?;

    let mut update = payload.into_inner();
    if let Some(title) = &update.title {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "Title value must be provided".to_string(),
            ));
        }
        update.title = Some(trimmed.to_string());
    }

    let matched = state.tasks.update_by_id(*path, &update).await?;
    if matched == 0 {
        return Err(AppError::NotFound(TASK_NOT_FOUND_MSG.to_string()));
    }

    let task = state
        .tasks
        .get_by_id(*path)
        .await?
        .ok_or_else(|| AppError::NotFound(TASK_NOT_FOUND_MSG.to_string()))?;

    Ok(HttpResponse::Ok().json(task))
}

/// Delete a task. Requires `task:delete`.
pub async fn delete_task(
    state: web::Data<AppState>,
    auth: BearerAuth,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    state
        .auth
        .authorize(auth.token(), &[Scope::TaskDelete])
        .await?;

    let id = *path;
    let deleted = state.tasks.remove_by_id(id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound(TASK_NOT_FOUND_MSG.to_string()));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Task {} had been deleted", id),
    })))
}
