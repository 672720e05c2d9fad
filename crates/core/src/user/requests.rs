//! Write payloads for user operations.
//!
//! These double as the JSON request bodies of the HTTP API.

use serde::{Deserialize, Serialize};

use super::operations::validate_name;
use super::types::{Profile, User};
use crate::error::ValidationError;

/// Payload for creating a user, optionally together with its profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub age: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<NewProfile>,
}

impl NewUser {
    /// Create a payload without a profile.
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            age,
            profile: None,
        }
    }

    /// Create the profile in the same write.
    pub fn with_profile(mut self, profile: NewProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)
    }
}

/// Profile fields supplied at user creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProfile {
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub profile_picture_url: String,
}

impl NewProfile {
    pub fn new(bio: impl Into<String>, profile_picture_url: impl Into<String>) -> Self {
        Self {
            bio: bio.into(),
            profile_picture_url: profile_picture_url.into(),
        }
    }
}

/// Partial update of a user. Absent fields keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

impl UserPatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the user name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the user age.
    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    /// True when the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.name {
            Some(name) => validate_name(name),
            None => Ok(()),
        }
    }

    /// Apply updates to an existing user.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(age) = self.age {
            user.age = age;
        }
    }
}

/// Upsert payload for a user's profile.
///
/// When the profile does not exist yet, absent fields are stored as empty
/// strings. When it exists, absent fields keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
}

impl ProfilePatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the biography.
    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    /// Set the picture reference.
    pub fn with_profile_picture_url(mut self, url: impl Into<String>) -> Self {
        self.profile_picture_url = Some(url.into());
        self
    }

    /// Apply updates to an existing profile.
    pub fn apply_to(&self, profile: &mut Profile) {
        if let Some(bio) = &self.bio {
            profile.bio = bio.clone();
        }
        if let Some(url) = &self.profile_picture_url {
            profile.profile_picture_url = url.clone();
        }
    }

    /// Fields for a profile that does not exist yet.
    pub fn to_new_profile(&self) -> NewProfile {
        NewProfile {
            bio: self.bio.clone().unwrap_or_default(),
            profile_picture_url: self.profile_picture_url.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_from_json_without_profile() {
        let user: NewUser = serde_json::from_str(r#"{"name": "Alice", "age": 25}"#).unwrap();

        assert_eq!(user, NewUser::new("Alice", 25));
    }

    #[test]
    fn test_new_user_rejects_negative_age() {
        let result = serde_json::from_str::<NewUser>(r#"{"name": "Alice", "age": -1}"#);

        assert!(result.is_err());
    }

    #[test]
    fn test_new_user_with_partial_profile_defaults_missing_fields() {
        let user: NewUser =
            serde_json::from_str(r#"{"name": "John", "age": 28, "profile": {"bio": "Engineer"}}"#)
                .unwrap();

        assert_eq!(
            user.profile,
            Some(NewProfile::new("Engineer", ""))
        );
    }

    #[test]
    fn test_new_user_validate_blank_name() {
        let user = NewUser::new("  ", 20);

        assert_eq!(
            user.validate(),
            Err(ValidationError::EmptyField { field: "name" })
        );
    }

    #[test]
    fn test_user_patch_apply_partial() {
        let mut user = User::new(1, "Alice", 25);

        UserPatch::new().with_age(28).apply_to(&mut user);

        assert_eq!(user.name, "Alice");
        assert_eq!(user.age, 28);
    }

    #[test]
    fn test_user_patch_is_empty() {
        assert!(UserPatch::new().is_empty());
        assert!(!UserPatch::new().with_name("Bob").is_empty());
    }

    #[test]
    fn test_user_patch_validates_present_name_only() {
        assert!(UserPatch::new().with_age(3).validate().is_ok());
        assert!(UserPatch::new().with_name("").validate().is_err());
    }

    #[test]
    fn test_profile_patch_apply_keeps_absent_fields() {
        let mut profile = Profile {
            id: 1,
            user_id: 1,
            bio: "Software Engineer".to_string(),
            profile_picture_url: "https://example.com/a.png".to_string(),
        };

        ProfilePatch::new()
            .with_bio("Senior Developer")
            .apply_to(&mut profile);

        assert_eq!(profile.bio, "Senior Developer");
        assert_eq!(profile.profile_picture_url, "https://example.com/a.png");
    }

    #[test]
    fn test_profile_patch_to_new_profile_defaults_empty() {
        let new_profile = ProfilePatch::new()
            .with_profile_picture_url("https://example.com/b.png")
            .to_new_profile();

        assert_eq!(new_profile, NewProfile::new("", "https://example.com/b.png"));
    }
}
