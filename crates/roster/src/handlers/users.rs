use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use roster_core::query::{build_user_query, ListUsersParams, QueryPlan};
use roster_core::storage::RepositoryError;
use roster_core::user::{NewUser, User, UserPatch};

use super::extract::{UserIdPath, ValidJson, ValidQuery};
use super::AppError;
use crate::state::UserFamily;

/// List one page of users (GET /{family}/users?age=&sort=&page=).
///
/// The query string is validated before the repository is touched.
pub async fn list_users(
    State(family): State<UserFamily>,
    ValidQuery(params): ValidQuery<ListUsersParams>,
) -> Result<Json<Vec<User>>, AppError> {
    let plan = QueryPlan::try_from(params)?;
    let query = build_user_query(&plan, family.page_size);

    let users = family.users.list_users(&query).await?;

    tracing::debug!(
        count = users.len(),
        page = plan.page.get(),
        "Listed users"
    );
    Ok(Json(users))
}

/// Get a single user with its profile (GET /{family}/users/{id}).
pub async fn get_user(
    State(family): State<UserFamily>,
    UserIdPath(id): UserIdPath,
) -> Result<Json<User>, AppError> {
    let user = family
        .users
        .get_user(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("User", id))?;

    Ok(Json(user))
}

/// Create a user (POST /{family}/users).
pub async fn create_user(
    State(family): State<UserFamily>,
    ValidJson(payload): ValidJson<NewUser>,
) -> Result<(StatusCode, Json<User>), AppError> {
    payload.validate()?;

    let user = family.users.create_user(&payload).await?;

    tracing::info!(user_id = %user.id, user_name = %user.name, "Created new user");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Create several users atomically (POST /{family}/users/batch).
pub async fn create_users(
    State(family): State<UserFamily>,
    ValidJson(payload): ValidJson<Vec<NewUser>>,
) -> Result<(StatusCode, Json<Vec<User>>), AppError> {
    for user in &payload {
        user.validate()?;
    }

    let users = family.users.create_users(&payload).await?;

    tracing::info!(count = users.len(), "Created user batch");
    Ok((StatusCode::CREATED, Json(users)))
}

/// Apply a partial update (PUT /{family}/users/{id}).
pub async fn update_user(
    State(family): State<UserFamily>,
    UserIdPath(id): UserIdPath,
    ValidJson(patch): ValidJson<UserPatch>,
) -> Result<Json<User>, AppError> {
    patch.validate()?;

    let user = family.users.update_user(id, &patch).await?;

    tracing::info!(user_id = %id, "Updated user");
    Ok(Json(user))
}

/// Delete a user and its profile (DELETE /{family}/users/{id}).
pub async fn delete_user(
    State(family): State<UserFamily>,
    UserIdPath(id): UserIdPath,
) -> Result<StatusCode, AppError> {
    family.users.delete_user(id).await?;

    tracing::info!(user_id = %id, "Deleted user");
    Ok(StatusCode::NO_CONTENT)
}
