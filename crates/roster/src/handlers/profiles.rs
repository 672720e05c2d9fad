use axum::{extract::State, Json};

use roster_core::storage::RepositoryError;
use roster_core::user::{Profile, ProfilePatch};

use super::extract::{UserIdPath, ValidJson};
use super::AppError;
use crate::state::UserFamily;

/// Get a user's profile (GET /{family}/users/{id}/profile).
///
/// 404 both when the user is missing and when it has no profile.
pub async fn get_profile(
    State(family): State<UserFamily>,
    UserIdPath(user_id): UserIdPath,
) -> Result<Json<Profile>, AppError> {
    let profile = family
        .profiles
        .get_profile(user_id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Profile", user_id))?;

    Ok(Json(profile))
}

/// Create or update a user's profile (PUT /{family}/users/{id}/profile).
pub async fn upsert_profile(
    State(family): State<UserFamily>,
    UserIdPath(user_id): UserIdPath,
    ValidJson(patch): ValidJson<ProfilePatch>,
) -> Result<Json<Profile>, AppError> {
    let profile = family.profiles.upsert_profile(user_id, &patch).await?;

    tracing::info!(%user_id, profile_id = profile.id, "Saved profile");
    Ok(Json(profile))
}
