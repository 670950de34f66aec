//! z/OSMF TSO documents and the aggregated results of TSO operations.

use serde::{Deserialize, Serialize};

/// Message format version z/OSMF uses for TSO messages.
pub const TSO_MESSAGE_VERSION: &str = "0100";

/// A line of TSO/E output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TsoMessage {
    #[serde(rename = "VERSION", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(rename = "DATA", default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

/// TSO is waiting for input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TsoPromptMessage {
    #[serde(rename = "VERSION", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// `"true"` when the input should not be echoed (passwords).
    #[serde(rename = "HIDDEN", default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<String>,
}

/// Input sent to the TSO address space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TsoResponseMessage {
    #[serde(rename = "VERSION")]
    pub version: String,
    #[serde(rename = "DATA")]
    pub data: String,
}

impl TsoResponseMessage {
    pub fn new(data: &str) -> Self {
        Self {
            version: TSO_MESSAGE_VERSION.to_string(),
            data: data.to_string(),
        }
    }
}

/// One entry of `tsoData`; z/OSMF sets exactly one of the three keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TsoMessages {
    #[serde(rename = "TSO MESSAGE", default, skip_serializing_if = "Option::is_none")]
    pub tso_message: Option<TsoMessage>,
    #[serde(rename = "TSO PROMPT", default, skip_serializing_if = "Option::is_none")]
    pub tso_prompt: Option<TsoPromptMessage>,
    #[serde(rename = "TSO RESPONSE", default, skip_serializing_if = "Option::is_none")]
    pub tso_response: Option<TsoResponseMessage>,
}

/// Error detail z/OSMF attaches to a failed TSO request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZosmfMessages {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
}

/// Body of every TSO endpoint response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZosmfTsoResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servlet_key: Option<String>,
    #[serde(rename = "queueID", default, skip_serializing_if = "Option::is_none")]
    pub queue_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ver: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reused: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tso_data: Vec<TsoMessages>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub msg_data: Vec<ZosmfMessages>,
}

impl ZosmfTsoResponse {
    /// `DATA` of every `TSO MESSAGE`, in order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.tso_data
            .iter()
            .filter_map(|m| m.tso_message.as_ref())
            .filter_map(|m| m.data.as_deref())
    }

    /// True when the response ends the current exchange with a prompt.
    pub fn has_prompt(&self) -> bool {
        self.tso_data.iter().any(|m| m.tso_prompt.is_some())
    }

    /// First z/OSMF error message, if any.
    pub fn first_error(&self) -> Option<&str> {
        self.msg_data.iter().find_map(|m| m.message_text.as_deref())
    }
}

/// Address space parameters for starting TSO.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTsoParams {
    /// Logon procedure.
    pub proc: String,
    /// Character set.
    pub chset: String,
    /// Code page.
    pub cpage: String,
    /// Screen rows.
    pub rows: String,
    /// Screen columns.
    pub cols: String,
    /// Region size.
    pub rsize: String,
    /// Accounting info; the `account` argument of a start call wins.
    pub account: Option<String>,
}

impl Default for StartTsoParams {
    fn default() -> Self {
        Self {
            proc: "IKJACCNT".to_string(),
            chset: "697".to_string(),
            cpage: "1047".to_string(),
            rows: "24".to_string(),
            cols: "80".to_string(),
            rsize: "4096".to_string(),
            account: None,
        }
    }
}

/// Outcome of a single start or stop request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartStopResponse {
    pub success: bool,
    pub zosmf_tso_response: Option<ZosmfTsoResponse>,
    /// Error text when `success` is false.
    pub failure_response: Option<String>,
    pub servlet_key: Option<String>,
}

/// Outcome of starting an address space, with its logon output collected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartStopResponses {
    pub success: bool,
    pub zosmf_tso_response: Option<ZosmfTsoResponse>,
    /// All responses read while collecting logon output.
    pub collected_responses: Vec<ZosmfTsoResponse>,
    pub failure_response: Option<String>,
    pub servlet_key: Option<String>,
    /// Logon output lines joined with `\n`.
    pub messages: String,
}

/// Outcome of sending one line of input and collecting its output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendResponse {
    pub success: bool,
    /// Every response read until the next prompt.
    pub zosmf_responses: Vec<ZosmfTsoResponse>,
    /// Output lines joined with `\n`.
    pub command_response: String,
}

/// Everything produced by start, send and stop for one TSO command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueResponse {
    /// True if the command was issued and its output collected.
    pub success: bool,
    pub start_response: Option<StartStopResponses>,
    /// Logon output contained `READY `.
    pub start_ready: bool,
    pub stop_response: Option<StartStopResponse>,
    pub zosmf_responses: Vec<ZosmfTsoResponse>,
    pub command_responses: Option<String>,
}
