//! Mapped record access.
//!
//! Tables and columns are typed `sea-query` identifiers, rows decode into
//! `sqlx::FromRow` models, and statements are rendered and bound through
//! `sea-query-binder`. No statement text is written by hand here.

mod entity;
mod repository;

pub use repository::OrmUserRepository;
