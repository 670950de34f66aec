//! Synchronous client for the z/OSMF REST interface of z/OS.
//!
//! # Overview
//! Submits and queries batch jobs, reads spool output and JCL, and drives
//! TSO address spaces. Every operation is one blocking HTTP call (or a short
//! fixed sequence of them) followed by mapping the JSON body onto typed data.
//!
//! # Design
//! - `ZosConnection` is an immutable descriptor shared read-only by all calls.
//! - `ZosmfRequest` builds an `HttpRequest` with the standard z/OSMF headers
//!   and classifies the `HttpResponse` into a `Response`. Both halves are
//!   plain data; a `Transport` performs the I/O in between.
//! - Facades (`GetJobs`, `SubmitJobs`, `IssueTso`, ...) compose requests into
//!   named operations and return `Result<T, ApiError>`.

pub mod client;
pub mod connection;
pub mod error;
pub mod http;
pub mod jobs;
pub mod request;
pub mod response;
pub mod transport;
pub mod tso;

#[cfg(test)]
mod test_support;

pub use client::ZosmfClient;
pub use connection::{Protocol, ZosConnection};
pub use error::{ApiError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use jobs::{CommonJobParms, GetJobParms, GetJobs, Job, JobFile, SubmitJobs};
pub use request::{is_http_error, VerbType, ZosmfRequest};
pub use response::{Response, ResponsePhrase};
pub use transport::{Transport, UreqTransport};
pub use tso::{IssueResponse, IssueTso, SendTso, StartTso, StartTsoParams, StopTso};
