use crate::core::domain::{
    error::OrionResult,
    value_object::{OrionHost, OrionPassword, OrionPort, OrionUrl, OrionUsername},
};

/// Everything needed to reach and authenticate against one Orion server.
#[derive(Debug, Clone)]
pub struct OrionConnection {
    orion_host: OrionHost,
    orion_port: OrionPort,
    orion_username: OrionUsername,
    orion_password: OrionPassword,
    orion_secure: bool,
    accept_invalid_certs: bool,
    orion_url: OrionUrl,
}

impl OrionConnection {
    pub fn new(
        orion_host: OrionHost,
        orion_port: OrionPort,
        orion_username: OrionUsername,
        orion_password: OrionPassword,
        orion_secure: bool,
        accept_invalid_certs: bool,
    ) -> OrionResult<Self> {
        let orion_url = OrionUrl::new(&orion_host, &orion_port, orion_secure)?;
        Ok(Self {
            orion_host,
            orion_port,
            orion_username,
            orion_password,
            orion_secure,
            accept_invalid_certs,
            orion_url,
        })
    }

    pub fn orion_host(&self) -> &OrionHost {
        &self.orion_host
    }

    pub fn orion_port(&self) -> &OrionPort {
        &self.orion_port
    }

    pub fn orion_username(&self) -> &OrionUsername {
        &self.orion_username
    }

    pub fn orion_password(&self) -> &OrionPassword {
        &self.orion_password
    }

    pub fn is_connection_secure(&self) -> bool {
        self.orion_secure
    }

    pub fn accepts_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }

    pub fn orion_url(&self) -> &OrionUrl {
        &self.orion_url
    }
}
