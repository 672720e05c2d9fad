//! Raw-SQL repository implementation.
//!
//! Implements the repository traits from `roster_core::storage` with
//! hand-written statements over the shared pool.

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

use roster_core::query::UserQuery;
use roster_core::storage::{ProfileRepository, RepositoryError, Result, UserRepository};
use roster_core::user::{NewUser, Profile, ProfilePatch, User, UserId, UserPatch};

use super::conversions::{row_to_profile, row_to_user, row_to_user_with_profile};
use super::statements;
use crate::storage::error::{map_sqlx_error, map_sqlx_error_with_id};
use crate::storage::transaction;

/// Builds the list statement for one page of users.
///
/// Column names come from `UserField`; the filter value, limit and offset
/// are bound parameters.
pub fn list_statement(query: &UserQuery) -> QueryBuilder<'static, Sqlite> {
    let mut builder = QueryBuilder::new(statements::SELECT_USERS);

    if let Some(filter) = query.filter {
        builder
            .push(" WHERE ")
            .push(filter.field.column())
            .push(" = ")
            .push_bind(filter.value);
    }

    builder.push(" ORDER BY ");
    let mut terms = builder.separated(", ");
    for term in query.order_terms() {
        terms.push(format!("{} {}", term.field.column(), term.direction.as_sql()));
    }

    builder
        .push(" LIMIT ")
        .push_bind(query.limit_param())
        .push(" OFFSET ")
        .push_bind(query.offset_param());

    builder
}

/// Repository over hand-written SQL.
#[derive(Clone)]
pub struct SqlUserRepository {
    pool: SqlitePool,
}

impl SqlUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Inserts a user and, when supplied, its profile on one connection.
async fn insert_user(conn: &mut SqliteConnection, user: &NewUser) -> Result<User> {
    let row = sqlx::query(statements::INSERT_USER)
        .bind(&user.name)
        .bind(i64::from(user.age))
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error(e, "User"))?;
    let created = row_to_user(&row)?;

    let Some(profile) = &user.profile else {
        return Ok(created);
    };

    let row = sqlx::query(statements::INSERT_PROFILE)
        .bind(created.id)
        .bind(&profile.bio)
        .bind(&profile.profile_picture_url)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error(e, "Profile"))?;

    Ok(created.with_profile(row_to_profile(&row)?))
}

async fn insert_users(conn: &mut SqliteConnection, users: &[NewUser]) -> Result<Vec<User>> {
    let mut created = Vec::with_capacity(users.len());
    for user in users {
        created.push(insert_user(conn, user).await?);
    }
    Ok(created)
}

async fn upsert_profile_row(
    conn: &mut SqliteConnection,
    user_id: UserId,
    patch: &ProfilePatch,
) -> Result<Profile> {
    let exists = sqlx::query(statements::USER_EXISTS)
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error_with_id(e, "User", user_id))?;
    if exists.is_none() {
        return Err(RepositoryError::not_found("User", user_id));
    }

    let row = sqlx::query(statements::UPSERT_PROFILE)
        .bind(user_id)
        .bind(patch.bio.as_deref())
        .bind(patch.profile_picture_url.as_deref())
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error_with_id(e, "Profile", user_id))?;

    row_to_profile(&row)
}

#[async_trait]
impl UserRepository for SqlUserRepository {
    async fn list_users(&self, query: &UserQuery) -> Result<Vec<User>> {
        let rows = list_statement(query)
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "User"))?;

        rows.iter().map(row_to_user).collect()
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        let row = sqlx::query(statements::SELECT_USER_WITH_PROFILE)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error_with_id(e, "User", id))?;

        row.as_ref().map(row_to_user_with_profile).transpose()
    }

    async fn create_user(&self, user: &NewUser) -> Result<User> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error(e, "User"))?;

        let result = insert_user(&mut *tx, user).await;
        transaction::finish(tx, result, "User").await
    }

    async fn create_users(&self, users: &[NewUser]) -> Result<Vec<User>> {
        if users.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error(e, "User"))?;

        let result = insert_users(&mut *tx, users).await;
        if let Err(err) = &result {
            tracing::debug!(error = %err, batch = users.len(), "Rolling back user batch");
        }
        transaction::finish(tx, result, "User").await
    }

    async fn update_user(&self, id: UserId, patch: &UserPatch) -> Result<User> {
        let row = sqlx::query(statements::UPDATE_USER)
            .bind(patch.name.as_deref())
            .bind(patch.age.map(i64::from))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error_with_id(e, "User", id))?;

        match row {
            Some(row) => row_to_user(&row),
            None => Err(RepositoryError::not_found("User", id)),
        }
    }

    async fn delete_user(&self, id: UserId) -> Result<()> {
        let result = sqlx::query(statements::DELETE_USER)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error_with_id(e, "User", id))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found("User", id));
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for SqlUserRepository {
    async fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>> {
        let row = sqlx::query(statements::SELECT_PROFILE)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error_with_id(e, "Profile", user_id))?;

        row.as_ref().map(row_to_profile).transpose()
    }

    async fn upsert_profile(&self, user_id: UserId, patch: &ProfilePatch) -> Result<Profile> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error(e, "Profile"))?;

        let result = upsert_profile_row(&mut *tx, user_id, patch).await;
        transaction::finish(tx, result, "Profile").await
    }
}
