pub mod account;
pub mod task;

pub use account::{Account, AccountResponse, CreateAccountRequest};
pub use task::{CreateTaskRequest, Task, TaskStatus, TaskUpdate};
