use crate::core::domain::error::ValidationError;
use std::net::IpAddr;

const MAX_HOSTNAME_LENGTH: usize = 253;
const MAX_LABEL_LENGTH: usize = 63;

/// A validated Orion server host (DNS name or IP literal).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrionHost(String);

impl OrionHost {
    /// Validates and wraps a host.
    pub fn new(host: impl Into<String>) -> Result<Self, ValidationError> {
        let host = host.into();
        validate_host(&host)?;
        Ok(Self(host))
    }

    /// Returns the host as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn validate_label(label: &str) -> Result<(), ValidationError> {
    if label.is_empty() || label.len() > MAX_LABEL_LENGTH {
        return Err(ValidationError::Format(format!(
            "Label must be between 1 and {} characters",
            MAX_LABEL_LENGTH
        )));
    }

    if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ValidationError::Format(
            "Label can only contain alphanumeric characters and hyphens".to_string(),
        ));
    }

    if label.starts_with('-') || label.ends_with('-') {
        return Err(ValidationError::Format(
            "Label cannot start or end with hyphen".to_string(),
        ));
    }

    Ok(())
}

/// Validates a DNS name according to RFC 1035 label rules.
///
/// A single trailing dot (fully qualified form) is accepted.
pub(crate) fn validate_dns_name(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::field(field, "cannot be empty"));
    }

    if value.len() > MAX_HOSTNAME_LENGTH {
        return Err(ValidationError::ConstraintViolation(format!(
            "{} length exceeds maximum of {} characters",
            field, MAX_HOSTNAME_LENGTH
        )));
    }

    let trimmed = value.strip_suffix('.').unwrap_or(value);
    for label in trimmed.split('.') {
        validate_label(label)?;
    }
    Ok(())
}

/// Validates a host: either an IP literal or a DNS name.
pub(crate) fn validate_host(host: &str) -> Result<(), ValidationError> {
    if host.parse::<IpAddr>().is_ok() {
        return Ok(());
    }
    validate_dns_name("hostname", host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_hosts() {
        let valid_hosts = [
            "orion.example.com",
            "orion",
            "orion-01.corp.local",
            "10.20.30.40",
            "::1",
            "orion.example.com.",
        ];

        for host in valid_hosts {
            assert!(OrionHost::new(host).is_ok(), "Host {} should be valid", host);
        }
    }

    #[test]
    fn test_invalid_hosts() {
        let long_hostname = "a".repeat(254);
        let test_cases = [
            ("", "empty hostname"),
            (long_hostname.as_str(), "hostname too long"),
            ("-example.com", "starts with hyphen"),
            ("example-.com", "ends with hyphen"),
            ("exam@ple.com", "invalid character"),
            ("exam ple.com", "contains space"),
            (".example.com", "empty label"),
            ("example..com", "consecutive dots"),
            ("https://orion", "scheme included"),
        ];

        for (host, case) in test_cases {
            assert!(
                validate_host(host).is_err(),
                "Case '{}' should fail validation: {}",
                case,
                host
            );
        }
    }
}
