use std::time::Duration;

/// How the node locator treats a lookup that matches more than one node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LookupPolicy {
    /// Refuse to act; the caller must use a more specific identifier.
    #[default]
    Strict,
    /// Act on the first row SWIS returns and log the others.
    FirstMatch,
}

/// Tunables for one reconcile invocation.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Per-request timeout applied by the HTTP transport.
    pub request_timeout: Duration,
    pub lookup_policy: LookupPolicy,
    /// Report what would change without invoking any mutating verb.
    pub check_mode: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            lookup_policy: LookupPolicy::Strict,
            check_mode: false,
        }
    }
}
