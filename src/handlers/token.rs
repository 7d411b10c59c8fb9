/// Token issuance handlers
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::security::scopes;
use crate::AppState;

/// OAuth2 password-grant shaped login form. `scope` is the usual
/// space-separated list.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub scope: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Authenticate and return a bearer token carrying the requested scopes.
pub async fn issue_token(
    state: web::Data<AppState>,
    form: web::Form<TokenRequest>,
) -> Result<HttpResponse> {
    let requested = scopes::parse_scope_list(&form.scope)?;

    let (account, access_token) = state
        .auth
        .authenticate(&form.username, &form.password, &requested)
        .await?;

    tracing::info!(username = %account.username, "issued access token");

    Ok(HttpResponse::Ok().json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// Advertise the scope catalog to clients building a token request.
pub async fn scope_catalog() -> HttpResponse {
    HttpResponse::Ok().json(scopes::catalog())
}
