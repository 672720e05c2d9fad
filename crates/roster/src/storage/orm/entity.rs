//! Table mappings and row models.

use roster_core::query::{SortDirection, UserField};
use roster_core::storage::RepositoryError;
use roster_core::user::{Profile, User};
use sea_query::{Iden, Order};

use crate::storage::error::decode_age;

#[derive(Debug, Clone, Copy, Iden)]
pub enum Users {
    Table,
    Id,
    Name,
    Age,
}

#[derive(Debug, Clone, Copy, Iden)]
pub enum Profiles {
    Table,
    Id,
    UserId,
    Bio,
    ProfilePictureUrl,
}

pub const USER_COLUMNS: [Users; 3] = [Users::Id, Users::Name, Users::Age];

pub const PROFILE_COLUMNS: [Profiles; 4] = [
    Profiles::Id,
    Profiles::UserId,
    Profiles::Bio,
    Profiles::ProfilePictureUrl,
];

impl From<UserField> for Users {
    fn from(field: UserField) -> Self {
        match field {
            UserField::Id => Self::Id,
            UserField::Name => Self::Name,
            UserField::Age => Self::Age,
        }
    }
}

pub fn order(direction: SortDirection) -> Order {
    match direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    }
}

/// A `users` row as stored.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserModel {
    pub id: i64,
    pub name: String,
    pub age: i64,
}

impl TryFrom<UserModel> for User {
    type Error = RepositoryError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        Ok(User::new(model.id, model.name, decode_age(model.age)?))
    }
}

/// A `profiles` row as stored.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileModel {
    pub id: i64,
    pub user_id: i64,
    pub bio: String,
    pub profile_picture_url: String,
}

impl From<ProfileModel> for Profile {
    fn from(model: ProfileModel) -> Self {
        Profile {
            id: model.id,
            user_id: model.user_id,
            bio: model.bio,
            profile_picture_url: model.profile_picture_url,
        }
    }
}
