/// In-memory stores
///
/// Back the test suites and local runs without a database. Same contract as
/// the Postgres stores, including matched/deleted counts.
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::{AccountStore, TaskStore};
use crate::error::{AppError, Result};
use crate::models::{Account, Task, TaskUpdate};

#[derive(Default)]
pub struct InMemoryAccountStore {
    inner: RwLock<HashMap<Uuid, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn create(&self, account: &Account) -> Result<Uuid> {
        let mut accounts = self.inner.write().await;
        if accounts
            .values()
            .any(|a| a.username == account.username)
        {
            return Err(AppError::AlreadyExists);
        }
        accounts.insert(account.id, account.clone());
        Ok(account.id)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        Ok(self.inner.read().await.get(&id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<Account>> {
        Ok(self
            .inner
            .read()
            .await
            .values()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn get_all(&self) -> Result<Vec<Account>> {
        let mut accounts: Vec<Account> = self.inner.read().await.values().cloned().collect();
        accounts.sort_by_key(|a| a.created_at);
        Ok(accounts)
    }

    async fn set_active(&self, id: Uuid, active: bool) -> Result<u64> {
        let mut accounts = self.inner.write().await;
        match accounts.get_mut(&id) {
            Some(account) => {
                account.active = active;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn remove_by_username(&self, username: &str) -> Result<u64> {
        let mut accounts = self.inner.write().await;
        let id = accounts
            .values()
            .find(|a| a.username == username)
            .map(|a| a.id);
        match id {
            Some(id) => {
                accounts.remove(&id);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[derive(Default)]
pub struct InMemoryTaskStore {
    inner: RwLock<HashMap<Uuid, Task>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn create(&self, task: &Task) -> Result<Uuid> {
        self.inner.write().await.insert(task.id, task.clone());
        Ok(task.id)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Task>> {
        Ok(self.inner.read().await.get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Task>> {
        let mut tasks: Vec<Task> = self.inner.read().await.values().cloned().collect();
        tasks.sort_by_key(|t| t.created_at);
        Ok(tasks)
    }

    async fn update_by_id(&self, id: Uuid, update: &TaskUpdate) -> Result<u64> {
        let mut tasks = self.inner.write().await;
        match tasks.get_mut(&id) {
            Some(task) => {
                if let Some(title) = &update.title {
                    task.title = title.clone();
                }
                if let Some(status) = update.status {
                    task.status = status;
                }
                if let Some(contributors) = &update.contributors {
                    task.contributors = contributors.clone();
                }
                task.updated_at = Utc::now();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn remove_by_id(&self, id: Uuid) -> Result<u64> {
        let mut tasks = self.inner.write().await;
        Ok(if tasks.remove(&id).is_some() { 1 } else { 0 })
    }
}
