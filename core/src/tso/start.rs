//! Starting a TSO address space.

use crate::client::ZosmfClient;
use crate::error::ApiError;
use crate::request::ZosmfRequest;
use crate::response::{Response, ResponsePhrase};
use crate::tso::send::SendTso;
use crate::tso::stop::StopTso;
use crate::tso::types::{StartStopResponses, StartTsoParams, ZosmfTsoResponse};
use crate::tso::{join_messages, require, DEFAULT_MAX_READS, RESOURCE};

/// Starts TSO address spaces and collects their logon output.
#[derive(Debug, Clone)]
pub struct StartTso {
    client: ZosmfClient,
    max_reads: usize,
}

impl StartTso {
    pub fn new(client: ZosmfClient) -> Self {
        Self {
            client,
            max_reads: DEFAULT_MAX_READS,
        }
    }

    /// Limit follow-up reads while waiting for the logon prompt.
    pub fn with_max_reads(mut self, max_reads: usize) -> Self {
        self.max_reads = max_reads;
        self
    }

    /// Start an address space charged to `account`.
    ///
    /// A rejected start is reported with `success == false` and the reason in
    /// `failure_response`. If the address space comes up but its logon output
    /// cannot be collected, it is stopped again and the collection error is
    /// returned.
    pub fn start(
        &self,
        account: &str,
        params: Option<&StartTsoParams>,
    ) -> Result<StartStopResponses, ApiError> {
        require("account number", account)?;
        let defaults = StartTsoParams::default();
        let params = params.unwrap_or(&defaults);

        let request = ZosmfRequest::post_json(self.client.url(RESOURCE))
            .query("acct", account)
            .query("proc", params.proc.as_str())
            .query("chset", params.chset.as_str())
            .query("cpage", params.cpage.as_str())
            .query("rows", params.rows.as_str())
            .query("cols", params.cols.as_str())
            .query("rsize", params.rsize.as_str());

        let response = self.client.execute(&request)?;
        if !response.is_success() {
            return Ok(StartStopResponses {
                failure_response: Some(failure_text(response)),
                ..StartStopResponses::default()
            });
        }

        let first: ZosmfTsoResponse = response.into_json()?;
        if let Some(message) = first.first_error() {
            return Ok(StartStopResponses {
                failure_response: Some(message.to_string()),
                zosmf_tso_response: Some(first),
                ..StartStopResponses::default()
            });
        }
        let Some(servlet_key) = first.servlet_key.clone() else {
            return Ok(StartStopResponses {
                failure_response: Some("z/OSMF returned no servlet key".to_string()),
                zosmf_tso_response: Some(first),
                ..StartStopResponses::default()
            });
        };
        tracing::info!(servlet_key = %servlet_key, "TSO address space started");

        let collected = match SendTso::new(self.client.clone())
            .with_max_reads(self.max_reads)
            .collect_until_prompt(&servlet_key, first.clone())
        {
            Ok(collected) => collected,
            Err(e) => {
                self.abandon(&servlet_key, &e);
                return Err(e);
            }
        };
        let messages = join_messages(&collected);

        Ok(StartStopResponses {
            success: true,
            zosmf_tso_response: Some(first),
            collected_responses: collected,
            failure_response: None,
            servlet_key: Some(servlet_key),
            messages,
        })
    }

    /// Stop an address space whose logon failed part way.
    fn abandon(&self, servlet_key: &str, cause: &ApiError) {
        tracing::warn!(servlet_key, error = %cause, "logon output not collected, stopping address space");
        match StopTso::new(self.client.clone()).stop(servlet_key) {
            Ok(stop) if stop.success => {}
            Ok(stop) => tracing::warn!(
                servlet_key,
                reason = stop.failure_response.as_deref().unwrap_or_default(),
                "TSO address space did not stop cleanly"
            ),
            Err(e) => tracing::warn!(servlet_key, error = %e, "TSO address space did not stop"),
        }
    }
}

/// Human-readable reason for a start or stop that did not succeed.
pub(crate) fn failure_text(response: Response) -> String {
    match (response.phrase, response.status_code) {
        (Some(ResponsePhrase::Text(reason)), Some(status)) => format!("HTTP {status}: {reason}"),
        (Some(ResponsePhrase::Json(value)), Some(status)) => format!("HTTP {status}: {value}"),
        (None, Some(status)) => format!("HTTP {status}"),
        (_, None) => "no response received from z/OSMF".to_string(),
    }
}
