//! Uniform result of a z/OSMF request, regardless of verb.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::request::is_http_error;

/// Body carried by a `Response`.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponsePhrase {
    /// Parsed body of a successful JSON request.
    Json(Value),
    /// Body of a successful text request, or the reason phrase of an error status.
    Text(String),
}

/// Optional payload plus optional status code.
///
/// | situation           | `phrase`            | `status_code` |
/// |---------------------|---------------------|---------------|
/// | 2xx                 | body (JSON or text) | status        |
/// | non-2xx             | reason phrase       | status        |
/// | transport failure   | `None`              | `None`        |
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Response {
    pub phrase: Option<ResponsePhrase>,
    pub status_code: Option<u16>,
}

impl Response {
    pub fn new(phrase: Option<ResponsePhrase>, status_code: Option<u16>) -> Self {
        Self { phrase, status_code }
    }

    /// The response produced when the transport failed.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.phrase.is_none() && self.status_code.is_none()
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status_code, Some(status) if !is_http_error(status))
    }

    /// Check the status and hand back the phrase of a successful response.
    pub fn into_result(self) -> Result<Option<ResponsePhrase>, ApiError> {
        match self.status_code {
            None => Err(ApiError::NoResponse),
            Some(status) if is_http_error(status) => {
                let reason = match self.phrase {
                    Some(ResponsePhrase::Text(reason)) => reason,
                    Some(ResponsePhrase::Json(value)) => value.to_string(),
                    None => String::new(),
                };
                Err(ApiError::Http { status, reason })
            }
            Some(_) => Ok(self.phrase),
        }
    }

    /// Successful JSON payload decoded into `T`.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        match self.into_result()? {
            Some(ResponsePhrase::Json(value)) => {
                serde_json::from_value(value).map_err(|e| ApiError::Deserialization(e.to_string()))
            }
            Some(ResponsePhrase::Text(text)) if !text.trim().is_empty() => {
                serde_json::from_str(&text).map_err(|e| ApiError::Deserialization(e.to_string()))
            }
            Some(ResponsePhrase::Text(_)) | None => {
                Err(ApiError::UnexpectedResult("empty response body".to_string()))
            }
        }
    }

    /// Successful payload as text. JSON payloads are rendered back to a string.
    pub fn into_text(self) -> Result<String, ApiError> {
        match self.into_result()? {
            Some(ResponsePhrase::Text(text)) => Ok(text),
            Some(ResponsePhrase::Json(value)) => Ok(value.to_string()),
            None => Ok(String::new()),
        }
    }
}
