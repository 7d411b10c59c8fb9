pub mod health;
pub mod tasks;
pub mod token;
pub mod users;
