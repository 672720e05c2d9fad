//! SQL statement text.

/// Column list for the base user select; `WHERE`, `ORDER BY`, `LIMIT` are appended.
pub const SELECT_USERS: &str = "SELECT id, name, age FROM users";

pub const SELECT_USER_WITH_PROFILE: &str = r#"
SELECT u.id, u.name, u.age,
       p.id AS profile_id, p.bio, p.profile_picture_url
FROM users u
LEFT JOIN profiles p ON p.user_id = u.id
WHERE u.id = ?
"#;

pub const INSERT_USER: &str = r#"
INSERT INTO users (name, age) VALUES (?, ?)
RETURNING id, name, age
"#;

pub const INSERT_PROFILE: &str = r#"
INSERT INTO profiles (user_id, bio, profile_picture_url) VALUES (?, ?, ?)
RETURNING id, user_id, bio, profile_picture_url
"#;

/// Absent patch fields are bound as NULL and keep the stored value.
pub const UPDATE_USER: &str = r#"
UPDATE users
SET name = COALESCE(?1, name), age = COALESCE(?2, age)
WHERE id = ?3
RETURNING id, name, age
"#;

pub const DELETE_USER: &str = "DELETE FROM users WHERE id = ?";

pub const USER_EXISTS: &str = "SELECT 1 FROM users WHERE id = ?";

pub const SELECT_PROFILE: &str = r#"
SELECT id, user_id, bio, profile_picture_url
FROM profiles
WHERE user_id = ?
"#;

/// On insert absent fields become empty; on update they keep the stored value.
pub const UPSERT_PROFILE: &str = r#"
INSERT INTO profiles (user_id, bio, profile_picture_url)
VALUES (?1, COALESCE(?2, ''), COALESCE(?3, ''))
ON CONFLICT (user_id) DO UPDATE SET
    bio = COALESCE(?2, bio),
    profile_picture_url = COALESCE(?3, profile_picture_url)
RETURNING id, user_id, bio, profile_picture_url
"#;
