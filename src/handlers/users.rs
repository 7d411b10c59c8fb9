/// User administration handlers
use actix_web::{web, HttpResponse};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::BearerAuth;
use crate::models::{Account, AccountResponse, CreateAccountRequest};
use crate::security::{password, Scope};
use crate::AppState;

const USER_NOT_FOUND_MSG: &str = "User not found error";

/// List every account. Requires `admin:user`.
pub async fn list_users(state: web::Data<AppState>, auth: BearerAuth) -> Result<HttpResponse> {
    state
        .auth
        .authorize(auth.token(), &[Scope::AdminUser])
        .await?;

    let accounts = state.accounts.get_all().await?;
    let accounts: Vec<AccountResponse> = accounts.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(accounts))
}

/// Return the calling account. Any valid token of an active account.
pub async fn me(state: web::Data<AppState>, auth: BearerAuth) -> Result<HttpResponse> {
    let account = state.auth.authorize(auth.token(), &[]).await?;
    Ok(HttpResponse::Ok().json(AccountResponse::from(account)))
}

/// Create an account. Requires `admin:user`; the caller becomes
/// `created_by`.
pub async fn create_user(
    state: web::Data<AppState>,
    auth: BearerAuth,
    payload: web::Json<CreateAccountRequest>,
) -> Result<HttpResponse> {
    let admin = state
        .auth
        .authorize(auth.token(), &[Scope::AdminUser])
        .await?;

    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    password::validate_password_strength(&payload.password)?;

    if state
        .accounts
        .get_by_username(&payload.username)
        .await?
        .is_some()
    {
        return Err(AppError::AlreadyExists);
    }

    let account = Account {
        id: Uuid::new_v4(),
        username: payload.username.clone(),
        email: payload.email.clone(),
        active: payload.active,
        scopes: payload.scopes.clone(),
        created_by: admin.username.clone(),
        password_hash: password::hash_password(&payload.password)?,
        created_at: Utc::now(),
    };

    let id = state.accounts.create(&account).await?;
    let created = state
        .accounts
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::Internal("Account vanished after insert".to_string()))?;

    tracing::info!(username = %created.username, created_by = %admin.username, "account created");

    Ok(HttpResponse::Created().json(AccountResponse::from(created)))
}

/// Delete an account by username. Requires `admin:user`.
pub async fn delete_user(
    state: web::Data<AppState>,
    auth: BearerAuth,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    state
        .auth
        .authorize(auth.token(), &[Scope::AdminUser])
        .await?;

    let username = path.into_inner();
    let deleted = state.accounts.remove_by_username(&username).await?;
    if deleted == 0 {
        return Err(AppError::NotFound(USER_NOT_FOUND_MSG.to_string()));
    }

    tracing::info!(%username, "account deleted");

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("User {} had been deleted", username),
    })))
}
