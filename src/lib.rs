//! Idempotent unmanage/remanage of SolarWinds Orion nodes.
//!
//! A run looks a node up by NodeID, IP address or DNS name, compares its
//! management state with the requested one and invokes `Orion.Nodes.Remanage`
//! or `Orion.Nodes.Unmanage` only when they differ.

mod auth;
mod core;
mod node;


pub use crate::core::domain::{
    error::{ErrorKind, OrionError, OrionResult, ValidationError},
    model::{
        client_config::{ClientConfig, LookupPolicy},
        clock::{Clock, FixedClock, SystemClock},
        desired_state::{DesiredState, UnmanageWindow, default_unmanage_period},
        manage_outcome::ManageOutcome,
        node_identifier::NodeIdentifier,
        node_record::{NodeRecord, NodeSummary},
        orion_connection::OrionConnection,
    },
    value_object::{
        DEFAULT_SWIS_PORT, OrionHost, OrionPassword, OrionPort, OrionUrl, OrionUsername,
    },
};
pub use crate::core::infrastructure::{api_client::ApiClient, swis_api::SwisApi};
pub use crate::node::application::request::manage_request::{
    ManageOptions, ManageRequest, ManagementState,
};

use crate::{
    auth::application::service::probe_service::ProbeService,
    node::application::service::{
        locator_service::LocatorService, manage_service::ManageService,
        mutator_service::MutatorService,
    },
};
use std::time::Duration;
use tracing::{debug, instrument};

/// A client for managing nodes on one Orion server.
///
/// Built once per invocation and passed by reference to every step; there is
/// no process-wide connection handle.
///
/// # Examples
///
/// ```no_run
/// use orion_node_manage::{ManageOptions, ManagementState, OrionClient, OrionResult, SystemClock};
///
/// #[tokio::main]
/// async fn main() -> OrionResult<()> {
///     let client = OrionClient::builder()
///         .host("orion.example.com")
///         .credentials("CORP\\svc_orion", "password")
///         .accept_invalid_certs(true)
///         .build()?;
///
///     let options = ManageOptions {
///         node_id: Some("123".to_string()),
///         unmanage_until: Some("2030-02-21T12:00:00Z".to_string()),
///         ..ManageOptions::new(ManagementState::Unmanaged)
///     };
///     let request = options.into_request(&SystemClock)?;
///
///     client.probe().await?;
///     let outcome = client.ensure_state(&request).await?;
///     println!("changed: {}", outcome.changed);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct OrionClient {
    api_client: ApiClient,
    config: ClientConfig,
}

/// Builder for OrionClient configuration
#[derive(Debug, Default)]
pub struct OrionClientBuilder {
    host: Option<String>,
    port: Option<u16>,
    username: Option<String>,
    password: Option<String>,
    insecure_http: bool,
    accept_invalid_certs: bool,
    config: ClientConfig,
}

impl OrionClientBuilder {
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// SWIS port; defaults to 17778.
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Use `https` (the default) or plain `http`.
    pub fn secure(mut self, secure: bool) -> Self {
        self.insecure_http = !secure;
        self
    }

    /// Accept self-signed or otherwise unverifiable TLS certificates.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    pub fn lookup_policy(mut self, policy: LookupPolicy) -> Self {
        self.config.lookup_policy = policy;
        self
    }

    /// Report would-be changes without invoking any mutating verb.
    pub fn check_mode(mut self, check_mode: bool) -> Self {
        self.config.check_mode = check_mode;
        self
    }

    /// Validates the connection settings and builds the client.
    ///
    /// No network traffic happens here; call [`OrionClient::probe`] to verify
    /// reachability and credentials.
    pub fn build(self) -> OrionResult<OrionClient> {
        let host = OrionHost::new(required(self.host, "hostname", "Hostname is required")?)?;
        let port = match self.port {
            Some(port) => OrionPort::new(port)?,
            None => OrionPort::default(),
        };
        let username =
            OrionUsername::new(required(self.username, "username", "Username is required")?)?;
        let password =
            OrionPassword::new(required(self.password, "password", "Password is required")?)?;

        let connection = OrionConnection::new(
            host,
            port,
            username,
            password,
            !self.insecure_http,
            self.accept_invalid_certs,
        )?;
        debug!(url = connection.orion_url().as_str(), "Orion client configured");

        Ok(OrionClient {
            api_client: ApiClient::new(connection, &self.config)?,
            config: self.config,
        })
    }
}

fn required(value: Option<String>, field: &str, message: &str) -> OrionResult<String> {
    value.ok_or_else(|| ValidationError::field(field, message).into())
}

impl OrionClient {
    /// Creates a new builder for OrionClient configuration
    pub fn builder() -> OrionClientBuilder {
        OrionClientBuilder::default()
    }

    pub fn connection(&self) -> &OrionConnection {
        self.api_client.connection()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Verifies reachability and credentials with a read-only query.
    ///
    /// # Errors
    ///
    /// Returns `OrionError::Connection` if the server is unreachable, rejects
    /// the credentials, or answers with an error.
    pub async fn probe(&self) -> OrionResult<()> {
        ProbeService::new().execute(&self.api_client).await
    }

    /// Looks up the current management record of a node.
    pub async fn find_node(&self, identifier: &NodeIdentifier) -> OrionResult<NodeRecord> {
        LocatorService::new(self.config.lookup_policy)
            .execute(&self.api_client, identifier)
            .await
    }

    /// Unconditionally remanages a node; returns the confirmation message.
    pub async fn remanage(&self, node: &NodeRecord) -> OrionResult<String> {
        MutatorService::new().remanage(&self.api_client, node).await
    }

    /// Unconditionally (re-)arms an unmanage window; returns the confirmation message.
    pub async fn unmanage(&self, node: &NodeRecord, window: &UnmanageWindow) -> OrionResult<String> {
        MutatorService::new()
            .unmanage(&self.api_client, node, window)
            .await
    }

    /// Brings the node to the requested state, invoking a verb only when needed.
    pub async fn ensure_state(&self, request: &ManageRequest) -> OrionResult<ManageOutcome> {
        ManageService::new(&self.config)
            .ensure(&self.api_client, request)
            .await
    }
}

/// Runs one complete invocation: validate input, build the client, probe, reconcile.
///
/// Input is validated before any network traffic, so `InvalidInput` failures
/// never reach the server.
#[instrument(skip_all, fields(state = ?options.state))]
pub async fn run(
    builder: OrionClientBuilder,
    options: &ManageOptions,
    clock: &dyn Clock,
) -> OrionResult<ManageOutcome> {
    let request = options.into_request(clock)?;
    let client = builder.build()?;
    client.probe().await?;
    client.ensure_state(&request).await
}
