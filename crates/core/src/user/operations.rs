use crate::error::ValidationError;

/// Longest accepted user name.
pub const MAX_NAME_LEN: usize = 100;

/// Validates a user name before it reaches the store.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyField { field: "name" });
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::FieldTooLong {
            field: "name",
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}
