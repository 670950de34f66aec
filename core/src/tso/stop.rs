//! Stopping a TSO address space.

use crate::client::ZosmfClient;
use crate::error::ApiError;
use crate::request::ZosmfRequest;
use crate::response::ResponsePhrase;
use crate::tso::start::failure_text;
use crate::tso::types::{StartStopResponse, ZosmfTsoResponse};
use crate::tso::{require, servlet_url};

#[derive(Debug, Clone)]
pub struct StopTso {
    client: ZosmfClient,
}

impl StopTso {
    pub fn new(client: ZosmfClient) -> Self {
        Self { client }
    }

    /// End the address space identified by `servlet_key`.
    pub fn stop(&self, servlet_key: &str) -> Result<StartStopResponse, ApiError> {
        require("servlet key", servlet_key)?;
        let request = ZosmfRequest::delete_json(servlet_url(&self.client, servlet_key));
        let response = self.client.execute(&request)?;

        if !response.is_success() {
            return Ok(StartStopResponse {
                failure_response: Some(failure_text(response)),
                servlet_key: Some(servlet_key.to_string()),
                ..StartStopResponse::default()
            });
        }

        let body: Option<ZosmfTsoResponse> = match response.phrase {
            Some(ResponsePhrase::Json(value)) => Some(
                serde_json::from_value(value).map_err(|e| ApiError::Deserialization(e.to_string()))?,
            ),
            _ => None,
        };
        let failure = body
            .as_ref()
            .and_then(|b| b.first_error())
            .map(str::to_string);
        tracing::info!(servlet_key, stopped = failure.is_none(), "TSO address space stop requested");

        Ok(StartStopResponse {
            success: failure.is_none(),
            zosmf_tso_response: body,
            failure_response: failure,
            servlet_key: Some(servlet_key.to_string()),
        })
    }
}
