use crate::core::domain::error::ValidationError;

const MAX_USERNAME_LENGTH: usize = 256;

/// A validated Orion username.
///
/// Active Directory accounts must be given as `DOMAIN\username`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrionUsername(String);

impl OrionUsername {
    /// Validates and wraps a username.
    pub fn new(username: impl Into<String>) -> Result<Self, ValidationError> {
        let username = username.into();
        validate_username(&username)?;
        Ok(Self(username))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validates a username.
pub(crate) fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(ValidationError::field("username", "Username cannot be empty"));
    }
    if username.len() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::Format(format!(
            "Username cannot exceed {} characters",
            MAX_USERNAME_LENGTH
        )));
    }
    if username.chars().any(char::is_control) {
        return Err(ValidationError::Format(
            "Username cannot contain control characters".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username_valid() {
        assert!(validate_username("admin").is_ok());
        assert!(validate_username("CORP\\svc_orion").is_ok());
        assert!(validate_username("svc.orion@corp.local").is_ok());
    }

    #[test]
    fn test_validate_username_invalid() {
        assert!(validate_username("").is_err());
        assert!(validate_username("   ").is_err());
        assert!(validate_username(&"a".repeat(257)).is_err());
        assert!(validate_username("user\nname").is_err());
    }
}
