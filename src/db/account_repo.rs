/// PostgreSQL-backed account store
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::db::AccountStore;
use crate::error::{AppError, Result};
use crate::models::Account;
use crate::security::scopes::Scope;

pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Raw row; scopes come back as TEXT[] and are parsed into the registry
/// enum so an unknown stored string fails loudly instead of being ignored.
#[derive(FromRow)]
struct AccountRow {
    id: Uuid,
    username: String,
    email: String,
    active: bool,
    scopes: Vec<String>,
    created_by: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AppError;

    fn try_from(row: AccountRow) -> Result<Self> {
        let scopes = row
            .scopes
            .iter()
            .map(|s| {
                Scope::from_str(s).map_err(|_| {
                    AppError::Internal(format!("Unknown scope in account record: {}", s))
                })
            })
            .collect::<Result<Vec<Scope>>>()?;

        Ok(Account {
            id: row.id,
            username: row.username,
            email: row.email,
            active: row.active,
            scopes,
            created_by: row.created_by,
            password_hash: row.password_hash,
            created_at: row.created_at,
        })
    }
}

fn scope_strings(scopes: &[Scope]) -> Vec<String> {
    scopes.iter().map(|s| s.as_str().to_string()).collect()
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn create(&self, account: &Account) -> Result<Uuid> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, username, email, active, scopes, created_by, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(account.id)
        .bind(&account.username)
        .bind(&account.email)
        .bind(account.active)
        .bind(scope_strings(&account.scopes))
        .bind(&account.created_by)
        .bind(&account.password_hash)
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.to_string().contains("unique constraint") {
                AppError::AlreadyExists
            } else {
                AppError::Database(e.to_string())
            }
        })?;

        Ok(account.id)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT * FROM accounts WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Account::try_from).transpose()
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT * FROM accounts WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Account::try_from).transpose()
    }

    async fn get_all(&self) -> Result<Vec<Account>> {
        let rows = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT * FROM accounts ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Account::try_from).collect()
    }

    async fn set_active(&self, id: Uuid, active: bool) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE accounts SET active = $2 WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(active)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn remove_by_username(&self, username: &str) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM accounts WHERE username = $1
            "#,
        )
        .bind(username)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
