use crate::core::domain::error::ValidationError;

/// The SWIS REST endpoint port used by default on Orion servers.
pub const DEFAULT_SWIS_PORT: u16 = 17778;

/// A validated SWIS port number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrionPort(u16);

impl OrionPort {
    /// Validates and wraps a port.
    pub fn new(port: u16) -> Result<Self, ValidationError> {
        validate_port(port)?;
        Ok(Self(port))
    }

    /// Returns the port number.
    pub fn get(&self) -> u16 {
        self.0
    }
}

impl Default for OrionPort {
    fn default() -> Self {
        Self(DEFAULT_SWIS_PORT)
    }
}

/// Validates a port number.
pub(crate) fn validate_port(port: u16) -> Result<(), ValidationError> {
    if port == 0 {
        return Err(ValidationError::field("port", "Port cannot be 0"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_port() {
        assert!(validate_port(17778).is_ok());
        assert!(validate_port(443).is_ok());
        assert!(validate_port(0).is_err());
    }

    #[test]
    fn test_default_port() {
        assert_eq!(OrionPort::default().get(), 17778);
    }
}
