pub mod dispatch;
pub mod health;
pub mod query;
pub mod shared;
pub mod variables;
