pub mod password;
pub mod scopes;
pub mod token;

pub use scopes::Scope;
pub use token::{Claims, TokenCodec};
