use async_trait::async_trait;

use crate::query::UserQuery;
use crate::user::{NewUser, Profile, ProfilePatch, User, UserId, UserPatch};

use super::Result;

/// Record access for users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Lists one page of users. Profiles are never loaded here.
    async fn list_users(&self, query: &UserQuery) -> Result<Vec<User>>;

    /// Gets a user by ID, with its profile when one exists.
    async fn get_user(&self, id: UserId) -> Result<Option<User>>;

    /// Creates a user (and its profile, when supplied) and returns the stored record.
    async fn create_user(&self, user: &NewUser) -> Result<User>;

    /// Creates all users or none of them.
    async fn create_users(&self, users: &[NewUser]) -> Result<Vec<User>>;

    /// Applies a partial update. Fails with `NotFound` when no row matched.
    async fn update_user(&self, id: UserId, patch: &UserPatch) -> Result<User>;

    /// Deletes a user and its profile. Fails with `NotFound` when no row matched.
    async fn delete_user(&self, id: UserId) -> Result<()>;
}

/// Record access for user profiles.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Gets the profile owned by a user.
    async fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>>;

    /// Creates or updates the profile owned by a user.
    /// Fails with `NotFound` when the user does not exist.
    async fn upsert_profile(&self, user_id: UserId, patch: &ProfilePatch) -> Result<Profile>;
}
