use crate::models::Envelope;
use crate::request::{RequestSnapshot, ResponseSnapshot};
use serde::Serialize;
use thiserror::Error;

/// The shared "host unreachable" error.
///
/// Every DNS / host-resolution failure surfaces as a reference to this one
/// value, so callers can test for it with [`Issue1Error::is_connection_error`]
/// or `std::ptr::eq`.
pub static CONNECTION_ERROR: ConnectionError = ConnectionError {
    message: "issue1 client: connection could not be made with issue1 REST",
};

#[derive(Error, Debug)]
#[error("{message}")]
pub struct ConnectionError {
    message: &'static str,
}

impl ConnectionError {
    pub fn message(&self) -> &'static str {
        self.message
    }
}

/// Transport-level failure, normalized into a single shape.
///
/// `description` always starts with the branch that produced it
/// (`there was a response; `, `no response was received; ` or
/// `setting up request failed; `), followed by whatever diagnostic text the
/// transport supplied.
#[derive(Error, Debug, Clone, Serialize)]
#[error("{name}: {message} ({description})")]
pub struct NormalizedError {
    pub message: String,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<ResponseSnapshot>,
    pub request: RequestSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Error, Debug)]
pub enum Issue1Error {
    /// The server answered with a `fail` (or `error`) envelope. The envelope
    /// carries `errorCode` set to the HTTP status that came with it.
    #[error("Issue#1 request failed with status code {}", .0.error_code.unwrap_or_default())]
    Application(Box<Envelope>),

    #[error("{0}")]
    Connection(&'static ConnectionError),

    #[error("Issue#1 request failed: {0}")]
    Transport(Box<NormalizedError>),

    #[error("Invalid input: unable to parse input. {0}")]
    InvalidInput(String),

    #[error("Response payload did not match the expected shape: {0}")]
    UnexpectedPayload(#[from] serde_json::Error),

    /// The request body could not be serialized to JSON.
    #[error("Could not encode the request body: {0}")]
    InvalidBody(serde_json::Error),

    #[error("Invalid authToken")]
    InvalidAuthToken,

    #[error("Invalid client configuration: {0}")]
    Config(String),

    #[error("Could not build the HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl Issue1Error {
    /// Returns `true` when this is the shared [`CONNECTION_ERROR`] sentinel.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Issue1Error::Connection(err) if std::ptr::eq(*err, &CONNECTION_ERROR))
    }

    /// The envelope of an application-level failure, if this is one.
    pub fn envelope(&self) -> Option<&Envelope> {
        match self {
            Issue1Error::Application(envelope) => Some(envelope.as_ref()),
            _ => None,
        }
    }

    /// The HTTP status code associated with this error, when the server replied.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Issue1Error::Application(envelope) => envelope.error_code,
            Issue1Error::Transport(err) => err.response.as_ref().map(|r| r.status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Issue1Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_sentinel_is_recognised_by_identity() {
        let err = Issue1Error::Connection(&CONNECTION_ERROR);
        assert!(err.is_connection_error());
        assert_eq!(err.to_string(), CONNECTION_ERROR.message());
    }

    #[test]
    fn other_errors_are_not_the_sentinel() {
        assert!(!Issue1Error::InvalidAuthToken.is_connection_error());
        assert!(Issue1Error::InvalidAuthToken.envelope().is_none());
    }
}
