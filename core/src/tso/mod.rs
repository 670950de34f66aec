//! Interactive TSO address spaces under `/zosmf/tsoApp/tso`.
//!
//! # Overview
//! A command is issued in three dependent calls: start an address space
//! (which yields a servlet key), send the command and read its output up to
//! the next prompt, then stop the address space. `IssueTso` strings the three
//! together and aggregates what each returned.

pub mod issue;
pub mod send;
pub mod start;
pub mod stop;
pub mod types;

pub use issue::IssueTso;
pub use send::SendTso;
pub use start::StartTso;
pub use stop::StopTso;
pub use types::{
    IssueResponse, SendResponse, StartStopResponse, StartStopResponses, StartTsoParams,
    TsoMessage, TsoMessages, TsoPromptMessage, TsoResponseMessage, ZosmfMessages,
    ZosmfTsoResponse,
};

use crate::client::ZosmfClient;
use crate::error::ApiError;
use crate::request::encode_segment;

/// Path of the TSO resource relative to the host.
pub const RESOURCE: &str = "/zosmf/tsoApp/tso";

/// Upper bound on follow-up reads while waiting for a prompt.
pub const DEFAULT_MAX_READS: usize = 10;

fn require(what: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidArgument(format!("{what} not specified")));
    }
    Ok(())
}

/// URL of the address space identified by `servlet_key`.
fn servlet_url(client: &ZosmfClient, servlet_key: &str) -> String {
    format!("{}/{}", client.url(RESOURCE), encode_segment(servlet_key))
}

/// Output lines of `responses` joined with `\n`.
fn join_messages(responses: &[ZosmfTsoResponse]) -> String {
    responses
        .iter()
        .flat_map(|r| r.messages())
        .collect::<Vec<_>>()
        .join("\n")
}
