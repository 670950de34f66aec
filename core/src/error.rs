//! Error types for the z/OSMF client.
//!
//! # Design
//! HTTP error statuses and transport failures are first reported as data on
//! `Response` (see `request`). Facades turn those into `ApiError` values when
//! they need a typed payload, so callers of `GetJobs` or `IssueTso` only ever
//! see `Result<T, ApiError>`.

use thiserror::Error;

/// Errors returned by facades and by `ZosmfRequest::parse`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A lookup matched nothing on the host.
    #[error("not found: {0}")]
    NotFound(String),

    /// z/OSMF answered with a non-2xx status.
    #[error("HTTP {status}: {reason}")]
    Http { status: u16, reason: String },

    /// The transport failed and the request produced no response at all.
    #[error("no response received from z/OSMF")]
    NoResponse,

    /// A 2xx body could not be decoded into the expected shape.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// A request payload could not be encoded to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A required argument was missing or empty; no request was sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The host answered, but not with what the operation expects.
    #[error("unexpected result: {0}")]
    UnexpectedResult(String),

    /// A TSO address space could not be started or driven.
    #[error("TSO error: {0}")]
    Tso(String),
}

/// Failure to complete an HTTP round-trip (connect, TLS, IO).
#[derive(Debug, Error)]
#[error("transport error: {0}")]
pub struct TransportError(pub String);
