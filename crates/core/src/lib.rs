//! Functional core for roster.
//!
//! Everything in this crate is pure data and pure functions: domain types,
//! the list query plan and its builder, request parameter parsing, the error
//! taxonomy and the repository traits implemented by the storage backends.

pub mod error;
pub mod query;
pub mod serde;
pub mod storage;
pub mod user;

pub use error::ValidationError;
