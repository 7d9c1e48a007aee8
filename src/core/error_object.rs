//! OAuth 2.0 error objects.
//!
//! Endpoints reject requests with an error object carrying a registered (or
//! extension) error code, an optional human-readable description and an
//! optional documentation URI. The same object appears in two encodings:
//! a JSON response body, and URL-encoded parameters on a redirect. The
//! recommended HTTP status code travels with the object in memory but is not
//! part of either wire form.

use core::fmt;

use anyhow::{bail, Context, Error, Result};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use url::Url;

/// A registered or extension OAuth 2.0 error code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ErrorCode(String);

impl ErrorCode {
    pub fn new(code: impl Into<String>) -> Result<Self> {
        code.into().try_into()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ErrorCode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        if value.is_empty() {
            bail!("an error code must not be empty")
        }
        Ok(Self(value))
    }
}

impl From<ErrorCode> for String {
    fn from(value: ErrorCode) -> Self {
        value.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An OAuth 2.0 error object.
///
/// Equality is defined by the wire members; the associated HTTP status code
/// is advisory and does not survive parsing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorObject {
    error: ErrorCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_uri: Option<Url>,
    #[serde(skip)]
    http_status: Option<u16>,
}

impl PartialEq for ErrorObject {
    fn eq(&self, other: &Self) -> bool {
        self.error == other.error
            && self.error_description == other.error_description
            && self.error_uri == other.error_uri
    }
}

impl Eq for ErrorObject {}

impl ErrorObject {
    pub fn new(error: ErrorCode) -> Self {
        Self {
            error,
            error_description: None,
            error_uri: None,
            http_status: None,
        }
    }

    pub fn code(&self) -> &ErrorCode {
        &self.error
    }

    pub fn set_description(mut self, description: String) -> Self {
        self.error_description = Some(description);
        self
    }

    pub fn description(&self) -> Option<&str> {
        self.error_description.as_deref()
    }

    pub fn set_uri(mut self, uri: Url) -> Self {
        self.error_uri = Some(uri);
        self
    }

    pub fn uri(&self) -> Option<&Url> {
        self.error_uri.as_ref()
    }

    pub fn set_http_status(mut self, status: StatusCode) -> Self {
        self.http_status = Some(status.as_u16());
        self
    }

    /// The HTTP status code recommended for this error, if one is known.
    pub fn http_status(&self) -> Option<StatusCode> {
        self.http_status
            .and_then(|status| StatusCode::from_u16(status).ok())
    }

    /// Encode as URL-encoded parameters, for a redirect URI query or
    /// fragment. Absent members are omitted.
    pub fn to_query_params(&self) -> Result<String> {
        serde_urlencoded::to_string(self).context("unable to encode error object")
    }

    /// Parse from URL-encoded parameters.
    pub fn from_query_params(query_params: &str) -> Result<Self> {
        serde_urlencoded::from_str(query_params)
            .context("unable to parse error object from query params")
    }

    fn registered(code: &'static str, description: &'static str, status: StatusCode) -> Self {
        Self {
            error: ErrorCode(code.to_owned()),
            error_description: Some(description.to_owned()),
            error_uri: None,
            http_status: Some(status.as_u16()),
        }
    }

    pub fn invalid_request() -> Self {
        Self::registered("invalid_request", "Invalid request", StatusCode::BAD_REQUEST)
    }

    pub fn invalid_client() -> Self {
        Self::registered(
            "invalid_client",
            "Client authentication failed",
            StatusCode::UNAUTHORIZED,
        )
    }

    pub fn invalid_grant() -> Self {
        Self::registered("invalid_grant", "Invalid grant", StatusCode::BAD_REQUEST)
    }

    pub fn unauthorized_client() -> Self {
        Self::registered(
            "unauthorized_client",
            "Unauthorized client",
            StatusCode::BAD_REQUEST,
        )
    }

    pub fn unsupported_grant_type() -> Self {
        Self::registered(
            "unsupported_grant_type",
            "Unsupported grant type",
            StatusCode::BAD_REQUEST,
        )
    }

    pub fn invalid_scope() -> Self {
        Self::registered("invalid_scope", "Invalid scope", StatusCode::BAD_REQUEST)
    }

    pub fn access_denied() -> Self {
        Self::registered("access_denied", "Access denied", StatusCode::FORBIDDEN)
    }

    pub fn unsupported_response_type() -> Self {
        Self::registered(
            "unsupported_response_type",
            "Unsupported response type",
            StatusCode::BAD_REQUEST,
        )
    }

    pub fn server_error() -> Self {
        Self::registered(
            "server_error",
            "Unexpected server error",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
    }

    pub fn temporarily_unavailable() -> Self {
        Self::registered(
            "temporarily_unavailable",
            "The service is temporarily unavailable",
            StatusCode::SERVICE_UNAVAILABLE,
        )
    }
}

impl TryFrom<Json> for ErrorObject {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self> {
        serde_json::from_value(value).context("unable to parse error object")
    }
}

impl From<ErrorObject> for Json {
    fn from(value: ErrorObject) -> Self {
        serde_json::to_value(value)
            // SAFETY: by definition, an error object has a valid JSON
            //         representation.
            .unwrap()
    }
}
