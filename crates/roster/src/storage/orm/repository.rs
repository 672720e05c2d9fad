//! Mapped repository implementation.

use async_trait::async_trait;
use sea_query::{Expr, Query, SelectStatement, SimpleExpr, SqliteQueryBuilder};
use sea_query_binder::SqlxBinder;
use sqlx::{SqliteConnection, SqlitePool};

use roster_core::query::UserQuery;
use roster_core::storage::{ProfileRepository, RepositoryError, Result, UserRepository};
use roster_core::user::{NewUser, Profile, ProfilePatch, User, UserId, UserPatch};

use super::entity::{order, ProfileModel, Profiles, UserModel, Users, PROFILE_COLUMNS, USER_COLUMNS};
use crate::storage::error::{map_sea_query_error, map_sqlx_error, map_sqlx_error_with_id};
use crate::storage::transaction;

/// Builds the select for one page of users from the shared query.
pub fn list_statement(query: &UserQuery) -> SelectStatement {
    let mut select = Query::select();
    select.columns(USER_COLUMNS).from(Users::Table);

    if let Some(filter) = query.filter {
        select.and_where(Expr::col(Users::from(filter.field)).eq(filter.value));
    }

    for term in query.order_terms() {
        select.order_by(Users::from(term.field), order(term.direction));
    }

    select
        .limit(u64::from(query.limit))
        .offset(query.offset_param().unsigned_abs());

    select
}

/// Repository over typed table mappings.
#[derive(Clone)]
pub struct OrmUserRepository {
    pool: SqlitePool,
}

impl OrmUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn find_user(&self, id: UserId) -> Result<Option<UserModel>> {
        let (sql, values) = Query::select()
            .columns(USER_COLUMNS)
            .from(Users::Table)
            .and_where(Expr::col(Users::Id).eq(id))
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_as_with::<_, UserModel, _>(&sql, values)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error_with_id(e, "User", id))
    }
}

async fn find_profile(conn: &mut SqliteConnection, user_id: UserId) -> Result<Option<Profile>> {
    let (sql, values) = Query::select()
        .columns(PROFILE_COLUMNS)
        .from(Profiles::Table)
        .and_where(Expr::col(Profiles::UserId).eq(user_id))
        .build_sqlx(SqliteQueryBuilder);

    let model = sqlx::query_as_with::<_, ProfileModel, _>(&sql, values)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error_with_id(e, "Profile", user_id))?;

    Ok(model.map(Profile::from))
}

async fn insert_profile(
    conn: &mut SqliteConnection,
    user_id: UserId,
    bio: &str,
    profile_picture_url: &str,
) -> Result<Profile> {
    let (sql, values) = Query::insert()
        .into_table(Profiles::Table)
        .columns([Profiles::UserId, Profiles::Bio, Profiles::ProfilePictureUrl])
        .values([user_id.into(), bio.into(), profile_picture_url.into()])
        .map_err(map_sea_query_error)?
        .returning(Query::returning().columns(PROFILE_COLUMNS))
        .build_sqlx(SqliteQueryBuilder);

    let model = sqlx::query_as_with::<_, ProfileModel, _>(&sql, values)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error_with_id(e, "Profile", user_id))?;

    Ok(model.into())
}

async fn insert_user(conn: &mut SqliteConnection, user: &NewUser) -> Result<User> {
    let (sql, values) = Query::insert()
        .into_table(Users::Table)
        .columns([Users::Name, Users::Age])
        .values([user.name.as_str().into(), i64::from(user.age).into()])
        .map_err(map_sea_query_error)?
        .returning(Query::returning().columns(USER_COLUMNS))
        .build_sqlx(SqliteQueryBuilder);

    let model = sqlx::query_as_with::<_, UserModel, _>(&sql, values)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error(e, "User"))?;
    let created = User::try_from(model)?;

    match &user.profile {
        Some(profile) => {
            let profile =
                insert_profile(conn, created.id, &profile.bio, &profile.profile_picture_url)
                    .await?;
            Ok(created.with_profile(profile))
        }
        None => Ok(created),
    }
}

async fn insert_users(conn: &mut SqliteConnection, users: &[NewUser]) -> Result<Vec<User>> {
    let mut created = Vec::with_capacity(users.len());
    for user in users {
        created.push(insert_user(conn, user).await?);
    }
    Ok(created)
}

/// Loads the user, then updates or creates its profile.
async fn save_profile(
    conn: &mut SqliteConnection,
    user_id: UserId,
    patch: &ProfilePatch,
) -> Result<Profile> {
    let (sql, values) = Query::select()
        .column(Users::Id)
        .from(Users::Table)
        .and_where(Expr::col(Users::Id).eq(user_id))
        .build_sqlx(SqliteQueryBuilder);
    let owner: Option<(i64,)> = sqlx::query_as_with(&sql, values)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error_with_id(e, "User", user_id))?;
    if owner.is_none() {
        return Err(RepositoryError::not_found("User", user_id));
    }

    let Some(mut profile) = find_profile(conn, user_id).await? else {
        let new_profile = patch.to_new_profile();
        return insert_profile(
            conn,
            user_id,
            &new_profile.bio,
            &new_profile.profile_picture_url,
        )
        .await;
    };

    patch.apply_to(&mut profile);

    let (sql, values) = Query::update()
        .table(Profiles::Table)
        .values([
            (Profiles::Bio, profile.bio.as_str().into()),
            (
                Profiles::ProfilePictureUrl,
                profile.profile_picture_url.as_str().into(),
            ),
        ])
        .and_where(Expr::col(Profiles::Id).eq(profile.id))
        .build_sqlx(SqliteQueryBuilder);

    sqlx::query_with(&sql, values)
        .execute(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error_with_id(e, "Profile", user_id))?;

    Ok(profile)
}

#[async_trait]
impl UserRepository for OrmUserRepository {
    async fn list_users(&self, query: &UserQuery) -> Result<Vec<User>> {
        let (sql, values) = list_statement(query).build_sqlx(SqliteQueryBuilder);

        let models = sqlx::query_as_with::<_, UserModel, _>(&sql, values)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "User"))?;

        models.into_iter().map(User::try_from).collect()
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        let Some(model) = self.find_user(id).await? else {
            return Ok(None);
        };
        let user = User::try_from(model)?;

        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| map_sqlx_error(e, "Profile"))?;

        match find_profile(&mut conn, id).await? {
            Some(profile) => Ok(Some(user.with_profile(profile))),
            None => Ok(Some(user)),
        }
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
        let mut changes: Vec<(Users, SimpleExpr)> = Vec::new();
        if let Some(name) = &patch.name {
            changes.push((Users::Name, name.as_str().into()));
        }
        if let Some(age) = patch.age {
            changes.push((Users::Age, i64::from(age).into()));
        }

        if changes.is_empty() {
            let model = self
                .find_user(id)
                .await?
                .ok_or_else(|| RepositoryError::not_found("User", id))?;
            return User::try_from(model);
        }

        let (sql, values) = Query::update()
            .table(Users::Table)
            .values(changes)
            .and_where(Expr::col(Users::Id).eq(id))
            .returning(Query::returning().columns(USER_COLUMNS))
            .build_sqlx(SqliteQueryBuilder);

        let model = sqlx::query_as_with::<_, UserModel, _>(&sql, values)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error_with_id(e, "User", id))?
            .ok_or_else(|| RepositoryError::not_found("User", id))?;

        User::try_from(model)
    }

    async fn delete_user(&self, id: UserId) -> Result<()> {
        let (sql, values) = Query::delete()
            .from_table(Users::Table)
            .and_where(Expr::col(Users::Id).eq(id))
            .build_sqlx(SqliteQueryBuilder);

        let result = sqlx::query_with(&sql, values)
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
impl ProfileRepository for OrmUserRepository {
    async fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| map_sqlx_error(e, "Profile"))?;

        find_profile(&mut conn, user_id).await
    }

    async fn upsert_profile(&self, user_id: UserId, patch: &ProfilePatch) -> Result<Profile> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error(e, "Profile"))?;

        let result = save_profile(&mut *tx, user_id, patch).await;
        transaction::finish(tx, result, "Profile").await
    }
}
