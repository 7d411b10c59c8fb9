/// Authentication and authorization core
///
/// `authenticate` is the login path: credentials plus a requested scope list
/// produce a token carrying exactly those scopes. `authorize` is the
/// per-request guard: decode the bearer token, re-fetch the live account,
/// and require the endpoint's scopes to be a subset of the token's.
use std::str::FromStr;
use std::sync::Arc;

use crate::db::AccountStore;
use crate::error::{AppError, Result};
use crate::models::Account;
use crate::security::scopes::Scope;
use crate::security::token::TokenCodec;

pub struct AuthService {
    accounts: Arc<dyn AccountStore>,
    codec: TokenCodec,
}

impl AuthService {
    pub fn new(accounts: Arc<dyn AccountStore>, codec: TokenCodec) -> Self {
        Self { accounts, codec }
    }

    /// Verify credentials and issue a token for `requested` scopes.
    ///
    /// Unknown user and wrong password fail with the same value so login
    /// responses cannot be used to enumerate usernames. The requested
    /// scopes must all be granted to the account, but the token carries
    /// only what was requested: a client may downscope, never broaden.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
        requested: &[Scope],
    ) -> Result<(Account, String)> {
        let account = match self.accounts.get_by_username(username).await? {
            Some(account) => account,
            None => {
                tracing::debug!(username, "login for unknown username");
                return Err(AppError::InvalidCredentials);
            }
        };

        if !crate::security::password::verify_password(password, &account.password_hash) {
            tracing::debug!(username, "login with wrong password");
            return Err(AppError::InvalidCredentials);
        }

        for scope in requested {
            if !account.has_scope(*scope) {
                tracing::debug!(username, scope = %scope, "login requested ungranted scope");
                return Err(AppError::ScopeNotGranted);
            }
        }

        let token = self.codec.issue(&account.username, requested)?;
        Ok((account, token))
    }

    /// Validate a bearer token against the endpoint's required scopes.
    ///
    /// Decode failures of any kind collapse into one uniform 401 carrying
    /// the endpoint's challenge. The account is re-fetched on every call,
    /// so a deleted account is denied even with a valid signature, and a
    /// disabled one is rejected after the scope check with its own status.
    pub async fn authorize(&self, token: Option<&str>, required: &[Scope]) -> Result<Account> {
        let challenge = challenge_for(required);
        let unauthorized = || AppError::InvalidToken {
            challenge: challenge.clone(),
        };

        let token = token.ok_or_else(unauthorized)?;
        let claims = self.codec.decode(token).map_err(|_| unauthorized())?;
        if claims.sub.is_empty() {
            return Err(unauthorized());
        }

        let granted = claims
            .scopes
            .iter()
            .map(|s| Scope::from_str(s))
            .collect::<Result<Vec<Scope>>>()
            .map_err(|_| unauthorized())?;

        let account = self
            .accounts
            .get_by_username(&claims.sub)
            .await?
            .ok_or_else(unauthorized)?;

        for scope in required {
            if !granted.contains(scope) {
                return Err(AppError::InsufficientScope {
                    challenge: challenge.clone(),
                });
            }
        }

        if !account.active {
            return Err(AppError::AccountDisabled);
        }

        Ok(account)
    }
}

fn challenge_for(required: &[Scope]) -> String {
    if required.is_empty() {
        "Bearer".to_string()
    } else {
        let scope_str = required
            .iter()
            .map(Scope::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        format!("Bearer scope='{}'", scope_str)
    }
}
