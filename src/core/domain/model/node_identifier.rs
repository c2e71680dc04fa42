//! The three ways a caller can point at an Orion node.

use crate::core::domain::{error::ValidationError, value_object::validate_dns_name};
use serde_json::Value;
use std::fmt;
use std::net::IpAddr;

/// Identifies exactly one node lookup path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeIdentifier {
    /// The Orion `NodeID`.
    Id(u64),
    /// The node's polling IP address (`IPAddress` column).
    IpAddress(IpAddr),
    /// The node's DNS name (`DNS` column).
    DnsName(String),
}

impl NodeIdentifier {
    /// Builds an identifier from the raw, mutually exclusive options.
    ///
    /// Blank strings count as absent. Exactly one option must remain.
    pub fn from_options(
        node_id: Option<&str>,
        ip_address: Option<&str>,
        dns_name: Option<&str>,
    ) -> Result<Self, ValidationError> {
        fn present(value: Option<&str>) -> Option<&str> {
            value.map(str::trim).filter(|v| !v.is_empty())
        }
        let node_id = present(node_id);
        let ip_address = present(ip_address);
        let dns_name = present(dns_name);

        let supplied = [node_id, ip_address, dns_name]
            .iter()
            .filter(|v| v.is_some())
            .count();
        if supplied == 0 {
            return Err(ValidationError::field(
                "node",
                "You must provide one of node_id, ip_address or dns_name",
            ));
        }
        if supplied > 1 {
            return Err(ValidationError::ConstraintViolation(
                "node_id, ip_address and dns_name are mutually exclusive; provide exactly one"
                    .to_string(),
            ));
        }

        if let Some(raw) = node_id {
            let id = raw
                .parse::<u64>()
                .ok()
                .filter(|id| *id > 0)
                .ok_or_else(|| {
                    ValidationError::field(
                        "node_id",
                        format!("'{}' is not a positive integer", raw),
                    )
                })?;
            return Ok(NodeIdentifier::Id(id));
        }

        if let Some(raw) = ip_address {
            let ip = raw.parse::<IpAddr>().map_err(|_| {
                ValidationError::field("ip_address", format!("'{}' is not an IP address", raw))
            })?;
            return Ok(NodeIdentifier::IpAddress(ip));
        }

        let name = dns_name.unwrap_or_default();
        validate_dns_name("dns_name", name)?;
        Ok(NodeIdentifier::DnsName(name.to_string()))
    }

    /// The `Orion.Nodes` column the lookup filters on.
    pub fn column(&self) -> &'static str {
        match self {
            NodeIdentifier::Id(_) => "NodeID",
            NodeIdentifier::IpAddress(_) => "IPAddress",
            NodeIdentifier::DnsName(_) => "DNS",
        }
    }

    /// The SWQL parameter name bound to the filter value.
    pub fn parameter(&self) -> &'static str {
        match self {
            NodeIdentifier::Id(_) => "node_id",
            NodeIdentifier::IpAddress(_) => "ip_addr",
            NodeIdentifier::DnsName(_) => "dns_name",
        }
    }

    /// The filter value as sent to SWIS.
    pub fn parameter_value(&self) -> Value {
        match self {
            NodeIdentifier::Id(id) => Value::from(*id),
            NodeIdentifier::IpAddress(ip) => Value::from(ip.to_string()),
            NodeIdentifier::DnsName(name) => Value::from(name.as_str()),
        }
    }
}

impl fmt::Display for NodeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeIdentifier::Id(id) => write!(f, "node_id {}", id),
            NodeIdentifier::IpAddress(ip) => write!(f, "ip_address {}", ip),
            NodeIdentifier::DnsName(name) => write!(f, "dns_name {}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_identifier_variants() {
        assert_eq!(
            NodeIdentifier::from_options(Some("123"), None, None).unwrap(),
            NodeIdentifier::Id(123)
        );
        assert_eq!(
            NodeIdentifier::from_options(None, Some("10.1.2.3"), None).unwrap(),
            NodeIdentifier::IpAddress("10.1.2.3".parse().unwrap())
        );
        assert_eq!(
            NodeIdentifier::from_options(None, None, Some("sw01.corp.local")).unwrap(),
            NodeIdentifier::DnsName("sw01.corp.local".to_string())
        );
    }

    #[test]
    fn test_missing_identifier_is_rejected() {
        let err = NodeIdentifier::from_options(None, None, None).unwrap_err();
        assert!(err.to_string().contains("node_id, ip_address or dns_name"));

        // Blank values count as absent.
        assert!(NodeIdentifier::from_options(Some(" "), Some(""), None).is_err());
    }

    #[test]
    fn test_blank_options_do_not_count_as_supplied() {
        // Surrounding whitespace is trimmed and empty values are ignored.
        assert_eq!(
            NodeIdentifier::from_options(Some(""), Some(" 10.1.2.3 "), Some("  ")).unwrap(),
            NodeIdentifier::IpAddress("10.1.2.3".parse().unwrap())
        );
    }

    #[test]
    fn test_multiple_identifiers_are_rejected() {
        let err = NodeIdentifier::from_options(Some("1"), Some("10.0.0.1"), None).unwrap_err();
        assert!(matches!(err, ValidationError::ConstraintViolation(_)));
    }

    #[test]
    fn test_malformed_values() {
        assert!(NodeIdentifier::from_options(Some("abc"), None, None).is_err());
        assert!(NodeIdentifier::from_options(Some("0"), None, None).is_err());
        assert!(NodeIdentifier::from_options(None, Some("10.0.0"), None).is_err());
        assert!(NodeIdentifier::from_options(None, None, Some("bad name")).is_err());
    }

    #[test]
    fn test_query_binding() {
        let id = NodeIdentifier::Id(42);
        assert_eq!((id.column(), id.parameter()), ("NodeID", "node_id"));
        assert_eq!(id.parameter_value(), Value::from(42));

        let ip = NodeIdentifier::IpAddress("192.168.0.1".parse().unwrap());
        assert_eq!((ip.column(), ip.parameter()), ("IPAddress", "ip_addr"));
        assert_eq!(ip.parameter_value(), Value::from("192.168.0.1"));
        assert_eq!(ip.to_string(), "ip_address 192.168.0.1");
    }
}
