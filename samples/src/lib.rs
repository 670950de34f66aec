//! Shared command-line plumbing for the sample binaries.

use std::sync::Arc;

use clap::Args;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use zosmf_core::{Protocol, UreqTransport, ZosConnection, ZosmfClient};

/// Where the z/OSMF instance lives and who to log on as.
#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// z/OSMF host name
    #[clap(long, env = "ZOSMF_HOST")]
    pub host: String,

    /// z/OSMF port
    #[clap(long, env = "ZOSMF_PORT", default_value = "443")]
    pub port: String,

    /// User id
    #[clap(short = 'u', long, env = "ZOSMF_USER")]
    pub user: String,

    /// Password
    #[clap(long, env = "ZOSMF_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Accept any server certificate
    #[clap(long, env = "ZOSMF_INSECURE")]
    pub insecure: bool,

    /// Use plain HTTP, e.g. against the mock server
    #[clap(long, env = "ZOSMF_HTTP")]
    pub http: bool,
}

impl ConnectionArgs {
    pub fn connection(&self) -> ZosConnection {
        let protocol = if self.http { Protocol::Http } else { Protocol::Https };
        ZosConnection::new(&self.host, &self.port, &self.user, &self.password).with_protocol(protocol)
    }

    pub fn client(&self) -> ZosmfClient {
        let transport = if self.insecure {
            UreqTransport::insecure()
        } else {
            UreqTransport::new()
        };
        ZosmfClient::with_transport(self.connection(), Arc::new(transport))
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `info`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
