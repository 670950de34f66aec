//! Request builders for the z/OSMF REST interface.
//!
//! # Design
//! Every verb follows the same shape: build an `HttpRequest` carrying the
//! standard headers, run it through a `Transport`, and classify the
//! `HttpResponse` by status. `build` and `parse` are pure so they can be
//! tested without a server; `execute` glues them to a transport.
//!
//! Two failure channels exist and neither raises an error:
//! - a transport failure is logged and becomes `Response::empty()`;
//! - a non-2xx status becomes a `Response` holding the reason phrase.
//!
//! Only a 2xx JSON body that fails to parse is reported as `Err`.

use crate::connection::ZosConnection;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::response::{Response, ResponsePhrase};
use crate::transport::Transport;

/// Header z/OSMF requires on every request to bypass its CSRF filter.
pub const X_CSRF_ZOSMF_HEADER_KEY: &str = "X-CSRF-ZOSMF-HEADER";
pub const X_CSRF_ZOSMF_HEADER_VALUE: &str = "true";

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_TEXT: &str = "text/plain";

/// Verb and payload kind of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbType {
    GetJson,
    GetText,
    PostJson,
    PutJson,
    PutText,
    DeleteJson,
}

impl VerbType {
    pub fn method(self) -> HttpMethod {
        match self {
            VerbType::GetJson | VerbType::GetText => HttpMethod::Get,
            VerbType::PostJson => HttpMethod::Post,
            VerbType::PutJson | VerbType::PutText => HttpMethod::Put,
            VerbType::DeleteJson => HttpMethod::Delete,
        }
    }

    pub fn is_json(self) -> bool {
        !matches!(self, VerbType::GetText | VerbType::PutText)
    }

    fn content_type(self) -> &'static str {
        if self.is_json() {
            CONTENT_TYPE_JSON
        } else {
            CONTENT_TYPE_TEXT
        }
    }
}

/// True for any status outside the 2xx range.
pub fn is_http_error(status: u16) -> bool {
    !(200..=299).contains(&status)
}

/// Escape characters that cannot appear raw in a URL path segment.
///
/// JES names are limited to `A-Z 0-9 @ # $` and servlet keys to letters,
/// digits and `-`; of those only `#` needs escaping.
pub(crate) fn encode_segment(segment: &str) -> String {
    segment.replace('%', "%25").replace('#', "%23")
}

/// One z/OSMF request, described before it is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZosmfRequest {
    verb: VerbType,
    url: String,
    query: Vec<(String, String)>,
    body: Option<String>,
    additional_headers: Vec<(String, String)>,
}

impl ZosmfRequest {
    pub fn new(verb: VerbType, url: impl Into<String>) -> Self {
        Self {
            verb,
            url: url.into(),
            query: Vec::new(),
            body: None,
            additional_headers: Vec::new(),
        }
    }

    pub fn get_json(url: impl Into<String>) -> Self {
        Self::new(VerbType::GetJson, url)
    }

    pub fn get_text(url: impl Into<String>) -> Self {
        Self::new(VerbType::GetText, url)
    }

    pub fn post_json(url: impl Into<String>) -> Self {
        Self::new(VerbType::PostJson, url)
    }

    pub fn put_json(url: impl Into<String>) -> Self {
        Self::new(VerbType::PutJson, url)
    }

    pub fn put_text(url: impl Into<String>) -> Self {
        Self::new(VerbType::PutText, url)
    }

    pub fn delete_json(url: impl Into<String>) -> Self {
        Self::new(VerbType::DeleteJson, url)
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `value` as the JSON body.
    pub fn json_body<T: serde::Serialize>(self, value: &T) -> Result<Self, ApiError> {
        let body = serde_json::to_string(value).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.body(body))
    }

    /// Headers applied after the standard ones; same-named standard headers
    /// are replaced.
    pub fn additional_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.additional_headers = headers;
        self
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.additional_headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn verb(&self) -> VerbType {
        self.verb
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn build(&self, connection: &ZosConnection) -> HttpRequest {
        let mut headers = vec![
            (
                "Authorization".to_string(),
                format!("Basic {}", connection.auth_encoding()),
            ),
            ("Content-Type".to_string(), self.verb.content_type().to_string()),
            (
                X_CSRF_ZOSMF_HEADER_KEY.to_string(),
                X_CSRF_ZOSMF_HEADER_VALUE.to_string(),
            ),
        ];
        for (key, value) in &self.additional_headers {
            match headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(key)) {
                Some(existing) => existing.1 = value.clone(),
                None => headers.push((key.clone(), value.clone())),
            }
        }

        let body = match self.verb.method() {
            HttpMethod::Post | HttpMethod::Put => Some(self.body.clone().unwrap_or_default()),
            HttpMethod::Get | HttpMethod::Delete => self.body.clone(),
        };

        HttpRequest {
            method: self.verb.method(),
            url: self.url.clone(),
            query: self.query.clone(),
            headers,
            body,
        }
    }

    pub fn parse(&self, response: HttpResponse) -> Result<Response, ApiError> {
        let status = response.status;
        if is_http_error(status) {
            return Ok(Response::new(
                Some(ResponsePhrase::Text(response.reason)),
                Some(status),
            ));
        }

        if !self.verb.is_json() {
            return Ok(Response::new(Some(ResponsePhrase::Text(response.body)), Some(status)));
        }

        if response.body.trim().is_empty() {
            return Ok(Response::new(None, Some(status)));
        }

        let value = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;
        Ok(Response::new(Some(ResponsePhrase::Json(value)), Some(status)))
    }

    /// Send the request through `transport` and classify the outcome.
    pub fn execute(
        &self,
        connection: &ZosConnection,
        transport: &dyn Transport,
    ) -> Result<Response, ApiError> {
        let request = self.build(connection);
        let response = match transport.execute(&request) {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(method = request.method.as_str(), url = %request.url, error = %e, "request failed");
                return Ok(Response::empty());
            }
        };

        tracing::debug!(
            method = request.method.as_str(),
            url = %request.url,
            status = response.status,
            "response received"
        );
        if is_http_error(response.status) {
            tracing::warn!(
                method = request.method.as_str(),
                url = %request.url,
                status = response.status,
                reason = %response.reason,
                "z/OSMF returned an error status"
            );
        }

        self.parse(response)
    }
}
