//! Client error model.
//!
//! Every failure a caller can observe from the portal client is an
//! [`ApiError`]. Transport and refresh failures are handled once inside the
//! gateway; everything else propagates to the caller, which decides what to
//! show inline via [`ApiError::user_message`].

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Result type used across the client.
pub type ApiResult<T> = Result<T, ApiError>;

/// Inline text shown when the server gave nothing more specific.
pub const GENERIC_FAILURE: &str = "Operation failed. Please try again.";

/// Why an authentication step failed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// The login endpoint rejected the username/password pair.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// A refresh was needed but no refresh token is persisted.
    #[error("no refresh token available")]
    MissingRefreshToken,

    /// The refresh endpoint rejected the refresh token.
    #[error("refresh token was rejected")]
    RefreshRejected,

    /// The request was still unauthorized after its single replay.
    #[error("request is unauthorized")]
    Unauthorized,

    /// An identity was offered to the session without a persisted token pair.
    #[error("no active session")]
    NoSession,
}

/// Client-level error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    /// Authentication failure (credentials, refresh, or lingering 401).
    #[error("authentication failed: {0}")]
    Auth(AuthFailure),

    /// The server refused the action for this identity (403).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The payload was rejected (server 400 or a client-side form check).
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    /// The addressed record does not exist (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),

    /// The response did not match the endpoint's fixed contract.
    #[error("unexpected response shape from {endpoint}: {detail}")]
    Schema { endpoint: String, detail: String },

    /// Any other non-success status.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Persisting or clearing session tokens failed.
    #[error("token storage error: {0}")]
    Storage(String),
}

impl ApiError {
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn schema(endpoint: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Schema {
            endpoint: endpoint.into(),
            detail: detail.into(),
        }
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(FieldErrors::message(msg))
    }

    /// Map a non-success HTTP status and its body onto the taxonomy.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            400 => Self::Validation(FieldErrors::from_body(body)),
            401 => Self::Auth(AuthFailure::Unauthorized),
            403 => Self::Forbidden(FieldErrors::from_body(body).headline()),
            404 => Self::NotFound(FieldErrors::from_body(body).headline()),
            _ => Self::Server {
                status,
                message: FieldErrors::from_body(body).headline(),
            },
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    /// Text suitable for an inline form error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth(AuthFailure::InvalidCredentials) => "Invalid username or password".to_string(),
            Self::Auth(_) => "Your session has expired. Please log in again.".to_string(),
            Self::Validation(errors) => errors.headline(),
            Self::Forbidden(msg) | Self::NotFound(msg) if msg != GENERIC_FAILURE => msg.clone(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

/// Structured error payload returned by the backend.
///
/// The server either sends `{"error": "..."}` / `{"detail": "..."}` or a map
/// of field name to messages (`{"amount": ["Minimum investment amount is 100."]}`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    message: Option<String>,
    fields: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    /// A payload carrying a single top-level message.
    pub fn message(msg: impl Into<String>) -> Self {
        Self {
            message: Some(msg.into()),
            fields: BTreeMap::new(),
        }
    }

    /// Parse a response body. Bodies that are not JSON carry no detail.
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self::from_value(&value),
            Err(_) => Self::default(),
        }
    }

    pub fn from_value(value: &Value) -> Self {
        let mut out = Self::default();
        match value {
            Value::String(s) => out.message = Some(s.clone()),
            Value::Array(items) => {
                out.fields
                    .insert("non_field_errors".to_string(), collect_messages(items));
            }
            Value::Object(map) => {
                for (key, value) in map {
                    match (key.as_str(), value) {
                        ("error" | "detail", Value::String(s)) => out.message = Some(s.clone()),
                        (_, Value::Array(items)) => {
                            out.fields.insert(key.clone(), collect_messages(items));
                        }
                        (_, Value::String(s)) => {
                            out.fields.insert(key.clone(), vec![s.clone()]);
                        }
                        (_, other) => {
                            out.fields.insert(key.clone(), vec![other.to_string()]);
                        }
                    }
                }
            }
            _ => {}
        }
        out
    }

    /// The top-level `error`/`detail` message, if the server sent one.
    pub fn error(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Messages attached to a specific field.
    pub fn field(&self, name: &str) -> &[String] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.message.is_none() && self.fields.values().all(Vec::is_empty)
    }

    /// The single line to show: the top-level message verbatim, else the
    /// first field message, else the generic failure text.
    pub fn headline(&self) -> String {
        if let Some(msg) = &self.message {
            return msg.clone();
        }
        self.fields
            .values()
            .flat_map(|msgs| msgs.iter())
            .next()
            .cloned()
            .unwrap_or_else(|| GENERIC_FAILURE.to_string())
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.headline())
    }
}

fn collect_messages(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .map(|item| match item {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect()
}
