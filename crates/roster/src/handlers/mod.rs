pub mod error;
pub mod extract;
pub mod health;
pub mod profiles;
pub mod users;

pub use error::AppError;
