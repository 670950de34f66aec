//! Sending input to a running TSO address space.

use crate::client::ZosmfClient;
use crate::error::ApiError;
use crate::request::ZosmfRequest;
use crate::tso::types::{SendResponse, TsoMessages, TsoResponseMessage, ZosmfTsoResponse};
use crate::tso::{join_messages, require, servlet_url, DEFAULT_MAX_READS};

/// Sends input to an address space and collects its output.
#[derive(Debug, Clone)]
pub struct SendTso {
    client: ZosmfClient,
    max_reads: usize,
}

impl SendTso {
    pub fn new(client: ZosmfClient) -> Self {
        Self {
            client,
            max_reads: DEFAULT_MAX_READS,
        }
    }

    /// Limit how many follow-up reads are made while waiting for a prompt.
    pub fn with_max_reads(mut self, max_reads: usize) -> Self {
        self.max_reads = max_reads;
        self
    }

    /// Send `data` and read output until TSO prompts again.
    pub fn send_data_to_tso_collect(
        &self,
        servlet_key: &str,
        data: &str,
    ) -> Result<SendResponse, ApiError> {
        require("servlet key", servlet_key)?;
        require("data", data)?;

        let body = TsoMessages {
            tso_response: Some(TsoResponseMessage::new(data)),
            ..TsoMessages::default()
        };
        let request = ZosmfRequest::put_json(servlet_url(&self.client, servlet_key)).json_body(&body)?;
        let first: ZosmfTsoResponse = self.client.execute(&request)?.into_json()?;
        check_messages(&first)?;

        let responses = self.collect_until_prompt(servlet_key, first)?;
        let command_response = join_messages(&responses);
        tracing::debug!(servlet_key, reads = responses.len(), "TSO output collected");

        Ok(SendResponse {
            success: true,
            zosmf_responses: responses,
            command_response,
        })
    }

    /// Read whatever output is queued for the address space.
    pub fn get_data_from_tso(&self, servlet_key: &str) -> Result<ZosmfTsoResponse, ApiError> {
        require("servlet key", servlet_key)?;
        let request = ZosmfRequest::get_json(servlet_url(&self.client, servlet_key));
        let response: ZosmfTsoResponse = self.client.execute(&request)?.into_json()?;
        check_messages(&response)?;
        Ok(response)
    }

    /// `first` plus every follow-up read, stopping at the first prompt.
    pub(crate) fn collect_until_prompt(
        &self,
        servlet_key: &str,
        first: ZosmfTsoResponse,
    ) -> Result<Vec<ZosmfTsoResponse>, ApiError> {
        let mut done = first.has_prompt();
        let mut responses = vec![first];
        let mut reads = 0;
        while !done {
            if reads == self.max_reads {
                return Err(ApiError::UnexpectedResult(format!(
                    "no TSO prompt after {reads} reads"
                )));
            }
            let next = self.get_data_from_tso(servlet_key)?;
            reads += 1;
            done = next.has_prompt();
            responses.push(next);
        }
        Ok(responses)
    }
}

fn check_messages(response: &ZosmfTsoResponse) -> Result<(), ApiError> {
    match response.first_error() {
        Some(message) => Err(ApiError::Tso(message.to_string())),
        None => Ok(()),
    }
}
