//! Application state shared by all request handlers.
//!
//! Each route family is bound to one record access implementation. Both
//! implementations share the pool built by `main`.

use std::sync::Arc;

use sqlx::SqlitePool;

use roster_core::query::PageSize;
use roster_core::storage::{ProfileRepository, UserRepository};

use crate::config::Config;
use crate::storage::{OrmUserRepository, SqlUserRepository};

/// Repositories and list policy for one route family (`/sql` or `/orm`).
#[derive(Clone)]
pub struct UserFamily {
    pub users: Arc<dyn UserRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub page_size: PageSize,
}

impl UserFamily {
    /// Bind both traits to the same repository instance.
    pub fn new<R>(repository: R, page_size: PageSize) -> Self
    where
        R: UserRepository + ProfileRepository + 'static,
    {
        let repository = Arc::new(repository);
        Self {
            users: repository.clone(),
            profiles: repository,
            page_size,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    /// Shared pool, used directly by the health probes.
    pub pool: SqlitePool,
    /// Hand-written SQL family.
    pub sql: UserFamily,
    /// Mapped family.
    pub orm: UserFamily,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: &Config) -> Self {
        Self {
            sql: UserFamily::new(SqlUserRepository::new(pool.clone()), config.page_size),
            orm: UserFamily::new(OrmUserRepository::new(pool.clone()), config.page_size),
            pool,
        }
    }
}
