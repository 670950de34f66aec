//! One-shot TSO commands: start, send, stop.

use crate::client::ZosmfClient;
use crate::error::ApiError;
use crate::tso::send::SendTso;
use crate::tso::start::StartTso;
use crate::tso::stop::StopTso;
use crate::tso::types::{IssueResponse, StartTsoParams};
use crate::tso::require;

/// Issues a single TSO command in a fresh address space.
#[derive(Debug, Clone)]
pub struct IssueTso {
    start: StartTso,
    send: SendTso,
    stop: StopTso,
}

impl IssueTso {
    pub fn new(client: ZosmfClient) -> Self {
        Self {
            start: StartTso::new(client.clone()),
            send: SendTso::new(client.clone()),
            stop: StopTso::new(client),
        }
    }

    /// Limit follow-up reads while waiting for logon or command output.
    pub fn with_max_reads(mut self, max_reads: usize) -> Self {
        self.start = self.start.with_max_reads(max_reads);
        self.send = self.send.with_max_reads(max_reads);
        self
    }

    /// Start an address space for `account`, run `command`, and stop it.
    ///
    /// The address space is stopped even when collecting logon output or
    /// sending the command fails.
    pub fn issue_tso_command(
        &self,
        account: &str,
        command: &str,
        params: Option<&StartTsoParams>,
    ) -> Result<IssueResponse, ApiError> {
        require("command", command)?;

        let start = self.start.start(account, params)?;
        if !start.success {
            let reason = start.failure_response.as_deref().unwrap_or("unknown failure");
            return Err(ApiError::Tso(format!("TSO address space failed to start: {reason}")));
        }
        let servlet_key = start
            .servlet_key
            .clone()
            .ok_or_else(|| ApiError::Tso("TSO address space started without a servlet key".to_string()))?;
        let start_ready = start.messages.contains("READY ");

        let sent = self.send.send_data_to_tso_collect(&servlet_key, command);
        let stop = self.stop.stop(&servlet_key);
        let sent = sent?;
        let stop = stop?;
        if !stop.success {
            tracing::warn!(
                servlet_key = %servlet_key,
                reason = stop.failure_response.as_deref().unwrap_or_default(),
                "TSO address space did not stop cleanly"
            );
        }

        Ok(IssueResponse {
            success: sent.success,
            start_response: Some(start),
            start_ready,
            stop_response: Some(stop),
            zosmf_responses: sent.zosmf_responses,
            command_responses: Some(sent.command_response),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::connection::ZosConnection;
    use crate::http::{HttpMethod, HttpResponse};
    use crate::test_support::RecordingTransport;

    fn issue_tso(transport: &Arc<RecordingTransport>) -> IssueTso {
        let connection = ZosConnection::new("mvs.example.com", "443", "IBMUSER", "SYS1");
        IssueTso::new(ZosmfClient::with_transport(connection, transport.clone()))
    }

    fn tso_reply(lines: &[&str]) -> serde_json::Value {
        let mut data: Vec<serde_json::Value> = lines
            .iter()
            .map(|l| json!({"TSO MESSAGE": {"VERSION": "0100", "DATA": l}}))
            .collect();
        data.push(json!({"TSO PROMPT": {"VERSION": "0100", "HIDDEN": "FALSE"}}));
        json!({"servletKey": "IBMUSER-7-abcd", "ver": "0100", "tsoData": data})
    }

    #[test]
    fn issue_runs_start_send_stop() {
        let transport = Arc::new(RecordingTransport::new());
        transport.push_json(200, tso_reply(&["IKJ56455I IBMUSER LOGON IN PROGRESS", "READY "]));
        transport.push_json(200, tso_reply(&["IKJ56650I TIME-10:01:11 AM", "READY "]));
        transport.push_json(200, json!({"servletKey": "IBMUSER-7-abcd"}));

        let response = issue_tso(&transport)
            .issue_tso_command("IZUACCT", "TIME", None)
            .unwrap();

        assert!(response.success);
        assert!(response.start_ready);
        assert_eq!(
            response.command_responses.as_deref(),
            Some("IKJ56650I TIME-10:01:11 AM\nREADY ")
        );
        assert!(response.stop_response.unwrap().success);
        let methods: Vec<HttpMethod> = transport.requests().iter().map(|r| r.method).collect();
        assert_eq!(methods, vec![HttpMethod::Post, HttpMethod::Put, HttpMethod::Delete]);
    }

    #[test]
    fn issue_fails_when_start_fails() {
        let transport = Arc::new(RecordingTransport::new());
        transport.push_response(HttpResponse::new(401, "Unauthorized", ""));
        let err = issue_tso(&transport)
            .issue_tso_command("IZUACCT", "TIME", None)
            .unwrap_err();
        match err {
            ApiError::Tso(message) => assert!(message.contains("401")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn issue_stops_address_space_when_send_fails() {
        let transport = Arc::new(RecordingTransport::new());
        transport.push_json(200, tso_reply(&["READY "]));
        transport.push_response(HttpResponse::new(500, "Internal Server Error", ""));
        transport.push_json(200, json!({"servletKey": "IBMUSER-7-abcd"}));

        let err = issue_tso(&transport)
            .issue_tso_command("IZUACCT", "TIME", None)
            .unwrap_err();

        assert!(matches!(err, ApiError::Http { status: 500, .. }));
        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[2].method, HttpMethod::Delete);
    }

    #[test]
    fn issue_stops_address_space_when_logon_never_prompts() {
        let transport = Arc::new(RecordingTransport::new());
        let no_prompt = json!({"servletKey": "IBMUSER-7-abcd", "tsoData": [
            {"TSO MESSAGE": {"VERSION": "0100", "DATA": "IKJ56455I IBMUSER LOGON IN PROGRESS"}}
        ]});
        transport.push_json(200, no_prompt.clone());
        transport.push_json(200, no_prompt.clone());
        transport.push_json(200, no_prompt);
        transport.push_json(200, json!({"servletKey": "IBMUSER-7-abcd"}));

        let err = issue_tso(&transport)
            .with_max_reads(2)
            .issue_tso_command("IZUACCT", "TIME", None)
            .unwrap_err();

        assert!(matches!(err, ApiError::UnexpectedResult(_)));
        let requests = transport.requests();
        let methods: Vec<HttpMethod> = requests.iter().map(|r| r.method).collect();
        assert_eq!(
            methods,
            vec![HttpMethod::Post, HttpMethod::Get, HttpMethod::Get, HttpMethod::Delete]
        );
        assert!(requests[3].url.ends_with("/zosmf/tsoApp/tso/IBMUSER-7-abcd"));
    }

    #[test]
    fn issue_without_ready_reports_start_not_ready() {
        let transport = Arc::new(RecordingTransport::new());
        transport.push_json(200, tso_reply(&["IKJ56455I IBMUSER LOGON IN PROGRESS"]));
        transport.push_json(200, tso_reply(&["OK"]));
        transport.push_json(200, json!({}));
        let response = issue_tso(&transport)
            .issue_tso_command("IZUACCT", "PROFILE", None)
            .unwrap();
        assert!(!response.start_ready);
    }

    #[test]
    fn issue_requires_command() {
        let transport = Arc::new(RecordingTransport::new());
        let err = issue_tso(&transport)
            .issue_tso_command("IZUACCT", "", None)
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(_)));
        assert!(transport.requests().is_empty());
    }
}
