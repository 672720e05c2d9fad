mod operations;
mod requests;
mod types;

pub use operations::{validate_name, MAX_NAME_LEN};
pub use requests::{NewProfile, NewUser, ProfilePatch, UserPatch};
pub use types::{Profile, User, UserId};
