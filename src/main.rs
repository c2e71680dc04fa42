//! # orion-node-manage
//!
//! Puts one Orion node into the `managed` or `unmanaged` state, and only calls
//! the server's mutating verbs when the node is not already there.
//!
//! Connection settings can come from the environment:
//! - `ORION_HOSTNAME`, `ORION_USERNAME`, `ORION_PASSWORD`
//! - `ORION_LOG`: log filter (defaults to `warn`)
//!
//! The result is printed to stdout as one JSON object. Logs go to stderr.
//!
//! ```bash
//! export ORION_HOSTNAME=orion.corp.local ORION_USERNAME='CORP\svc' ORION_PASSWORD=...
//! orion-node-manage --state unmanaged --node-id 123 --unmanage-until 2030-02-21T12:00:00Z
//! ```

use anyhow::Context;
use clap::{Parser, ValueEnum};
use orion_node_manage::{
    DEFAULT_SWIS_PORT, ErrorKind, LookupPolicy, ManageOptions, ManagementState, OrionClient,
    OrionError, SystemClock, run,
};
use serde_json::json;
use std::process::ExitCode;
use std::time::Duration;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Exit codes for the possible outcomes
#[derive(Debug, Clone, Copy)]
enum ManageExitCode {
    /// Node is in the desired state (changed or not)
    Success = 0,
    /// Connection, lookup or remote operation failure
    Failed = 1,
    /// Invalid options; nothing was sent to the server
    InvalidInput = 2,
}

impl From<ManageExitCode> for ExitCode {
    fn from(code: ManageExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StateArg {
    Managed,
    Unmanaged,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AmbiguityArg {
    /// Fail when the identifier matches several nodes
    Strict,
    /// Act on the first matching node
    First,
}

#[derive(Debug, Parser)]
#[command(
    name = "orion-node-manage",
    version,
    about = "Unmanage or remanage a SolarWinds Orion node, idempotently"
)]
struct Cli {
    /// Orion server hostname or IP address
    #[arg(long, env = "ORION_HOSTNAME")]
    hostname: String,

    /// Orion username (Active Directory users: DOMAIN\username)
    #[arg(long, env = "ORION_USERNAME")]
    username: String,

    /// Orion password
    #[arg(long, env = "ORION_PASSWORD", hide_env_values = true)]
    password: String,

    /// SWIS REST port
    #[arg(long, default_value_t = DEFAULT_SWIS_PORT)]
    port: u16,

    /// Talk plain HTTP instead of HTTPS
    #[arg(long)]
    insecure_http: bool,

    /// Verify the server's TLS certificate (Orion defaults to a self-signed one)
    #[arg(long)]
    verify_certs: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Desired state of the node
    #[arg(long, value_enum)]
    state: StateArg,

    /// NodeID of the node
    #[arg(long, group = "node")]
    node_id: Option<String>,

    /// Polling IP address of the node
    #[arg(long, group = "node")]
    ip_address: Option<String>,

    /// DNS name of the node
    #[arg(long, group = "node")]
    dns_name: Option<String>,

    /// Start of the unmanage period (ISO 8601 UTC); defaults to now
    #[arg(long)]
    unmanage_from: Option<String>,

    /// End of the unmanage period (ISO 8601 UTC); defaults to 24 hours from now
    #[arg(long)]
    unmanage_until: Option<String>,

    /// Treat the time of day of --unmanage-until as a duration from --unmanage-from
    #[arg(long)]
    is_relative: bool,

    /// What to do when the identifier matches several nodes
    #[arg(long, value_enum, default_value = "strict")]
    on_ambiguous: AmbiguityArg,

    /// Report what would change without changing anything
    #[arg(long)]
    check: bool,

    /// Log filter, e.g. `info` or `orion_node_manage=debug`
    #[arg(long, env = "ORION_LOG", default_value = "warn")]
    log_level: String,
}

impl Cli {
    fn manage_options(&self) -> ManageOptions {
        let state = match self.state {
            StateArg::Managed => ManagementState::Managed,
            StateArg::Unmanaged => ManagementState::Unmanaged,
        };
        ManageOptions {
            state,
            node_id: self.node_id.clone(),
            ip_address: self.ip_address.clone(),
            dns_name: self.dns_name.clone(),
            unmanage_from: self.unmanage_from.clone(),
            unmanage_until: self.unmanage_until.clone(),
            is_relative: self.is_relative,
        }
    }

    fn lookup_policy(&self) -> LookupPolicy {
        match self.on_ambiguous {
            AmbiguityArg::Strict => LookupPolicy::Strict,
            AmbiguityArg::First => LookupPolicy::FirstMatch,
        }
    }
}

fn init_tracing(filter: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(filter)
        .with_context(|| format!("invalid log filter '{}'", filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {}", e))
}

fn failure_record(err: &OrionError) -> serde_json::Value {
    json!({
        "changed": false,
        "failed": true,
        "kind": err.kind(),
        "msg": err.to_string(),
        "detail": err.detail(),
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(&cli.log_level) {
        eprintln!("{:#}", e);
        return ManageExitCode::InvalidInput.into();
    }

    let builder = OrionClient::builder()
        .host(cli.hostname.clone())
        .port(cli.port)
        .credentials(cli.username.clone(), cli.password.clone())
        .secure(!cli.insecure_http)
        .accept_invalid_certs(!cli.verify_certs)
        .timeout(Duration::from_secs(cli.timeout_secs))
        .lookup_policy(cli.lookup_policy())
        .check_mode(cli.check);

    match run(builder, &cli.manage_options(), &SystemClock).await {
        Ok(outcome) => {
            println!("{}", json!(outcome));
            ManageExitCode::Success.into()
        }
        Err(err) => {
            error!(kind = %err.kind(), "{}", err);
            println!("{}", failure_record(&err));
            match err.kind() {
                ErrorKind::InvalidInput => ManageExitCode::InvalidInput.into(),
                _ => ManageExitCode::Failed.into(),
            }
        }
    }
}
