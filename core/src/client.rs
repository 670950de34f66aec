//! Shared handle that pairs a connection with a transport.

use std::sync::Arc;

use crate::connection::ZosConnection;
use crate::error::ApiError;
use crate::request::ZosmfRequest;
use crate::response::Response;
use crate::transport::{Transport, UreqTransport};

/// Connection plus transport, cloned into every facade.
///
/// Holds no mutable state; clones share the same transport.
#[derive(Clone)]
pub struct ZosmfClient {
    connection: ZosConnection,
    transport: Arc<dyn Transport>,
}

impl ZosmfClient {
    /// Client that talks to `connection` through a default `UreqTransport`.
    pub fn new(connection: ZosConnection) -> Self {
        Self::with_transport(connection, Arc::new(UreqTransport::new()))
    }

    pub fn with_transport(connection: ZosConnection, transport: Arc<dyn Transport>) -> Self {
        Self {
            connection,
            transport,
        }
    }

    pub fn connection(&self) -> &ZosConnection {
        &self.connection
    }

    /// `base_url()` of the connection followed by `path`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.connection.base_url(), path)
    }

    pub fn execute(&self, request: &ZosmfRequest) -> Result<Response, ApiError> {
        request.execute(&self.connection, self.transport.as_ref())
    }
}

impl std::fmt::Debug for ZosmfClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZosmfClient")
            .field("connection", &self.connection)
            .finish_non_exhaustive()
    }
}
