/// Store traits and implementations
///
/// Each entity gets its own store trait over the capability set
/// {create, get_by_id, get_all, update, remove}; the auth core and handlers
/// only ever see the trait objects.
pub mod account_repo;
pub mod memory;
pub mod task_repo;

pub use account_repo::PgAccountStore;
pub use memory::{InMemoryAccountStore, InMemoryTaskStore};
pub use task_repo::PgTaskStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Account, Task, TaskUpdate};

#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn create(&self, account: &Account) -> Result<Uuid>;
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Account>>;
    async fn get_by_username(&self, username: &str) -> Result<Option<Account>>;
    async fn get_all(&self) -> Result<Vec<Account>>;
    /// Returns the number of matched rows (0 when the account is absent).
    async fn set_active(&self, id: Uuid, active: bool) -> Result<u64>;
    /// Returns the number of deleted rows.
    async fn remove_by_username(&self, username: &str) -> Result<u64>;
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn create(&self, task: &Task) -> Result<Uuid>;
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Task>>;
    async fn get_all(&self) -> Result<Vec<Task>>;
    /// Applies the partial update; returns the number of matched rows.
    async fn update_by_id(&self, id: Uuid, update: &TaskUpdate) -> Result<u64>;
    /// Returns the number of deleted rows.
    async fn remove_by_id(&self, id: Uuid) -> Result<u64>;
}
