use serde::{Deserialize, Serialize};

/// Store-assigned surrogate key of a user.
pub type UserId = i64;

/// A user record.
///
/// `profile` is only populated by single-record lookups; list results never
/// carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub age: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
}

impl User {
    /// Create a user without a loaded profile.
    pub fn new(id: UserId, name: impl Into<String>, age: u32) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            profile: None,
        }
    }

    /// Attach a loaded profile.
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = Some(profile);
        self
    }
}

/// One-to-one extension of a [`User`], owned through `user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub user_id: UserId,
    pub bio: String,
    pub profile_picture_url: String,
}
