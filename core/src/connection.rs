//! Connection descriptor for a z/OSMF host.
//!
//! # Design
//! `ZosConnection` is immutable once built and is cloned into every request.
//! It carries credentials, so its `Debug` output masks the password.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// URL scheme used to reach z/OSMF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Protocol {
    #[default]
    Https,
    Http,
}

impl Protocol {
    pub fn scheme(self) -> &'static str {
        match self {
            Protocol::Https => "https",
            Protocol::Http => "http",
        }
    }
}

/// Host, port and credentials of a z/OSMF instance.
#[derive(Clone, PartialEq, Eq)]
pub struct ZosConnection {
    host: String,
    port: String,
    user: String,
    password: String,
    protocol: Protocol,
}

impl ZosConnection {
    pub fn new(host: &str, port: &str, user: &str, password: &str) -> Self {
        Self {
            host: host.trim_end_matches('/').to_string(),
            port: port.to_string(),
            user: user.to_string(),
            password: password.to_string(),
            protocol: Protocol::Https,
        }
    }

    /// Use `protocol` instead of the HTTPS default.
    pub fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// `scheme://host:port`, without a trailing slash.
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.protocol.scheme(), self.host, self.port)
    }

    /// Base64 of `user:password`, the payload of a Basic `Authorization` header.
    pub fn auth_encoding(&self) -> String {
        STANDARD.encode(format!("{}:{}", self.user, self.password))
    }
}

impl fmt::Debug for ZosConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZosConnection")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"****")
            .field("protocol", &self.protocol)
            .finish()
    }
}
