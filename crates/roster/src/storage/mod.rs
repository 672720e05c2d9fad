//! Storage layer: the shared pool and the two record access implementations.
//!
//! `sql` executes hand-written statements; `orm` goes through typed table
//! mappings. Both normalize driver errors into `RepositoryError` and consume
//! the same `UserQuery`, so for equal store state they return the same
//! users in the same order.

pub mod error;
pub mod orm;
pub mod pool;
pub mod schema;
pub mod sql;
pub mod transaction;

pub use orm::OrmUserRepository;
pub use pool::{create_pool, migrate};
pub use sql::SqlUserRepository;
