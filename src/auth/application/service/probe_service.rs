use crate::core::{
    domain::error::{OrionError, OrionResult},
    infrastructure::swis_api::SwisApi,
};
use serde_json::Map;
use tracing::debug;

/// Cheapest query SWIS can answer; proves reachability and credentials.
pub const PROBE_QUERY: &str = "SELECT Uri FROM Orion.Environment";

/// Verifies that the Orion server is reachable and accepts the credentials.
///
/// SWIS authenticates every request with HTTP Basic credentials, so a
/// successful read-only query is the login.
#[derive(Debug, Default)]
pub struct ProbeService;

impl ProbeService {
    pub fn new() -> Self {
        Self
    }

    /// Runs the probe query.
    ///
    /// # Errors
    ///
    /// Any failure, including rejected credentials, is reported as
    /// `OrionError::Connection` so that it is never confused with a
    /// failed lookup.
    pub async fn execute<A>(&self, api: &A) -> OrionResult<()>
    where
        A: SwisApi + ?Sized,
    {
        match api.query(PROBE_QUERY, Map::new()).await {
            Ok(_) => {
                debug!("Orion connectivity probe succeeded");
                Ok(())
            }
            Err(e) => Err(OrionError::Connection(format!(
                "Failed to query Orion. Check hostname, username and password: {}",
                e
            ))),
        }
    }
}
