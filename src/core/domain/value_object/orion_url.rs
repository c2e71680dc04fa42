use crate::core::domain::{
    error::ValidationError,
    value_object::{orion_host::OrionHost, orion_port::OrionPort},
};
use std::net::IpAddr;
use url::Url;

/// Path of the SWIS JSON API below the server root.
const SWIS_JSON_PATH: &str = "SolarWinds/InformationService/v3/Json/";

/// The validated base URL of a SWIS JSON endpoint.
///
/// Always ends with a trailing slash so that verb paths can be joined onto it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrionUrl(Url);

impl OrionUrl {
    /// Builds the SWIS base URL for a host and port.
    pub fn new(host: &OrionHost, port: &OrionPort, secure: bool) -> Result<Self, ValidationError> {
        let scheme = if secure { "https" } else { "http" };
        let authority = match host.as_str().parse::<IpAddr>() {
            Ok(IpAddr::V6(addr)) => format!("[{}]", addr),
            _ => host.as_str().trim_end_matches('.').to_string(),
        };
        let raw = format!("{}://{}:{}/{}", scheme, authority, port.get(), SWIS_JSON_PATH);
        let url = Url::parse(&raw)
            .map_err(|e| ValidationError::Format(format!("Invalid URL format: {}", e)))?;
        Ok(Self(url))
    }

    /// Joins a relative API path (for example `Query` or `Invoke/Orion.Nodes/Remanage`).
    pub fn join(&self, path: &str) -> Result<Url, ValidationError> {
        self.0
            .join(path.trim_start_matches('/'))
            .map_err(|e| ValidationError::Format(format!("Invalid API path '{}': {}", path, e)))
    }

    /// Returns the URL as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}
