mod orion_host;
mod orion_password;
mod orion_port;
mod orion_url;
mod orion_username;
pub(crate) mod serde_helpers;

pub use orion_host::OrionHost;
pub use orion_password::OrionPassword;
pub use orion_port::{DEFAULT_SWIS_PORT, OrionPort};
pub use orion_url::OrionUrl;
pub use orion_username::OrionUsername;

// Re-export validation functions for internal use
pub(crate) use orion_host::validate_dns_name;
