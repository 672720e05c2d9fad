use thiserror::Error;

/// Input rejected before any store access.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid page number: {0:?} (expected a positive integer)")]
    InvalidPage(String),
    #[error("Invalid age filter: {0:?} (expected a non-negative integer)")]
    InvalidAge(String),
    #[error("Invalid user id: {0:?}")]
    InvalidId(String),
    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },
    #[error("{field} too long (max {max} characters)")]
    FieldTooLong { field: &'static str, max: usize },
    #[error("Malformed request body: {0}")]
    MalformedBody(String),
    #[error("Malformed query string: {0}")]
    MalformedQuery(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_page_display() {
        assert_eq!(
            ValidationError::InvalidPage("abc".to_string()).to_string(),
            "Invalid page number: \"abc\" (expected a positive integer)"
        );
    }

    #[test]
    fn test_empty_field_display() {
        assert_eq!(
            ValidationError::EmptyField { field: "name" }.to_string(),
            "name cannot be empty"
        );
    }

    #[test]
    fn test_field_too_long_display() {
        assert_eq!(
            ValidationError::FieldTooLong {
                field: "name",
                max: 100
            }
            .to_string(),
            "name too long (max 100 characters)"
        );
    }
}
