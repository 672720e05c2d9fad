//! Raw-SQL record access.
//!
//! Hand-written statement text executed with `sqlx`. List statements are
//! assembled with `sqlx::QueryBuilder` from the shared `UserQuery`, so every
//! value reaches the store as a bound parameter.

mod conversions;
mod repository;
mod statements;

pub use repository::SqlUserRepository;
