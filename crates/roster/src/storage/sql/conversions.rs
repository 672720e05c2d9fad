//! SQLite row conversion functions.
//!
//! Column access goes through `try_get`, so a value of the wrong type fails
//! the whole call with a decoding error.

use roster_core::storage::Result;
use roster_core::user::{Profile, User};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::storage::error::{decode_age, map_sqlx_error};

/// Convert a row to a User without its profile.
///
/// Expected columns: id, name, age
pub fn row_to_user(row: &SqliteRow) -> Result<User> {
    let id: i64 = get(row, "id", "User")?;
    let name: String = get(row, "name", "User")?;
    let age: i64 = get(row, "age", "User")?;

    Ok(User::new(id, name, decode_age(age)?))
}

/// Convert a row from the user/profile LEFT JOIN.
///
/// Expected columns: id, name, age, profile_id, bio, profile_picture_url.
/// The profile columns are NULL when the user has none.
pub fn row_to_user_with_profile(row: &SqliteRow) -> Result<User> {
    let user = row_to_user(row)?;
    let profile_id: Option<i64> = get(row, "profile_id", "Profile")?;

    match profile_id {
        Some(profile_id) => {
            let profile = Profile {
                id: profile_id,
                user_id: user.id,
                bio: get(row, "bio", "Profile")?,
                profile_picture_url: get(row, "profile_picture_url", "Profile")?,
            };
            Ok(user.with_profile(profile))
        }
        None => Ok(user),
    }
}

/// Convert a row to a Profile.
///
/// Expected columns: id, user_id, bio, profile_picture_url
pub fn row_to_profile(row: &SqliteRow) -> Result<Profile> {
    Ok(Profile {
        id: get(row, "id", "Profile")?,
        user_id: get(row, "user_id", "Profile")?,
        bio: get(row, "bio", "Profile")?,
        profile_picture_url: get(row, "profile_picture_url", "Profile")?,
    })
}

fn get<'r, T>(row: &'r SqliteRow, column: &str, entity_type: &'static str) -> Result<T>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(column).map_err(|e| map_sqlx_error(e, entity_type))
}
