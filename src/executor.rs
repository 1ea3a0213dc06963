//! The single request path every Issue#1 binding goes through.
//!
//! [`RequestExecutor`] sends one request through a [`Transport`] and folds
//! the outcome into one of three shapes:
//!
//! - the envelope's `data`, when the call succeeded;
//! - [`Issue1Error::Application`], when a 2xx reply carries a `fail`
//!   envelope or an error reply carries any envelope;
//! - a transport failure: the [`CONNECTION_ERROR`] sentinel for hosts that
//!   cannot be resolved, a [`NormalizedError`] for everything else.

use crate::error::{CONNECTION_ERROR, Issue1Error, NormalizedError, Result};
use crate::models::Envelope;
use crate::request::{RequestConfig, RequestSnapshot, ResponseSnapshot, ResponseType};
use crate::transport::{
    CODE_HOST_NOT_FOUND, FailureDetail, Transport, TransportFailure, TransportRequest,
    TransportResponse,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{Span, debug, instrument, warn};

const DESCRIPTION_RESPONSE: &str = "there was a response; ";
const DESCRIPTION_NO_RESPONSE: &str = "no response was received; ";
const DESCRIPTION_SETUP: &str = "setting up request failed; ";

/// Executes [`RequestConfig`]s against a [`Transport`].
///
/// Cloning is cheap; clones share the transport.
#[derive(Clone)]
pub struct RequestExecutor {
    transport: Arc<dyn Transport>,
    default_timeout: Option<Duration>,
}

impl fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("default_timeout", &self.default_timeout)
            .finish_non_exhaustive()
    }
}

impl RequestExecutor {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            default_timeout: None,
        }
    }

    /// Timeout used by requests whose config does not set one.
    pub fn with_default_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Runs the request and deserializes the envelope's `data` into `T`.
    pub async fn execute<T: DeserializeOwned>(&self, url: &str, config: RequestConfig) -> Result<T> {
        let payload = self.execute_raw(url, config).await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Runs the request for its effect only; whatever `data` came back is dropped.
    pub async fn execute_unit(&self, url: &str, config: RequestConfig) -> Result<()> {
        self.execute_raw(url, config).await.map(|_| ())
    }

    /// Runs the request and returns the envelope's `data` untouched.
    ///
    /// A missing `data` comes back as `Value::Null`. With
    /// [`ResponseType::Text`] the body is returned as a JSON string and no
    /// envelope handling takes place.
    #[instrument(
        name = "issue1_request",
        skip(self, url, config),
        fields(
            http.method = tracing::field::Empty,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
        )
    )]
    pub async fn execute_raw(&self, url: &str, config: RequestConfig) -> Result<Value> {
        let request = TransportRequest {
            url: url.to_string(),
            method: config.method,
            headers: config.headers,
            body: config.body,
            params: config.params,
            response_type: config.response_type,
            timeout: config.timeout.or(self.default_timeout),
        };

        let span = Span::current();
        span.record("http.method", request.method.to_string().as_str());
        span.record("http.url", url);
        debug!("sending request");

        match self.transport.send(&request).await {
            Ok(response) => {
                span.record("http.status_code", response.status);
                unwrap_success(&request, response)
            }
            Err(failure) => Err(normalize_failure(&request, failure)),
        }
    }
}

fn unwrap_success(request: &TransportRequest, response: TransportResponse) -> Result<Value> {
    if request.response_type == ResponseType::Text {
        return Ok(Value::String(
            String::from_utf8_lossy(&response.body).into_owned(),
        ));
    }
    if response.body.iter().all(u8::is_ascii_whitespace) {
        debug!(status = response.status, "empty response body");
        return Ok(Value::Null);
    }

    let body: Value = serde_json::from_slice(&response.body)
        .map_err(|e| Issue1Error::InvalidInput(e.to_string()))?;

    success_payload(body, response.status)
}

/// Reads a well-formed 2xx body. Only a `fail` status is an application
/// failure here; everything else hands back `data`, or `null` without one.
fn success_payload(mut body: Value, status_code: u16) -> Result<Value> {
    if body.get("status").and_then(Value::as_str) == Some("fail") {
        let envelope: Envelope = serde_json::from_value(body)?;
        return Err(application_failure(envelope, status_code));
    }
    debug!(status = status_code, "request succeeded");
    Ok(body
        .get_mut("data")
        .map(Value::take)
        .unwrap_or(Value::Null))
}

fn application_failure(mut envelope: Envelope, status_code: u16) -> Issue1Error {
    envelope.error_code = Some(status_code);
    let reason = envelope
        .fail_data()
        .and_then(|data| data.error_reason)
        .unwrap_or_default();
    warn!(
        error_code = status_code,
        status = ?envelope.status,
        reason = %reason,
        "application failure"
    );
    Issue1Error::Application(Box::new(envelope))
}

fn normalize_failure(request: &TransportRequest, failure: TransportFailure) -> Issue1Error {
    match failure {
        TransportFailure::Response { response, detail } => {
            Span::current().record("http.status_code", response.status);

            if let Ok(envelope) = serde_json::from_slice::<Envelope>(&response.body) {
                return application_failure(envelope, response.status);
            }

            let data = if response.body.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&response.body).unwrap_or_else(|_| {
                    Value::String(String::from_utf8_lossy(&response.body).into_owned())
                })
            };
            let snapshot = ResponseSnapshot {
                status: response.status,
                status_text: response.status_text,
                headers: response.headers,
                data,
            };
            transport_failure(request, DESCRIPTION_RESPONSE, detail, Some(snapshot))
        }
        TransportFailure::NoResponse(detail) => {
            if detail.code.as_deref() == Some(CODE_HOST_NOT_FOUND) {
                warn!(url = %request.url, "host could not be resolved");
                return Issue1Error::Connection(&CONNECTION_ERROR);
            }
            transport_failure(request, DESCRIPTION_NO_RESPONSE, detail, None)
        }
        TransportFailure::Setup(detail) => {
            transport_failure(request, DESCRIPTION_SETUP, detail, None)
        }
    }
}

fn transport_failure(
    request: &TransportRequest,
    branch: &str,
    detail: FailureDetail,
    response: Option<ResponseSnapshot>,
) -> Issue1Error {
    let mut description = branch.to_string();
    if let Some(native) = detail.native_description.as_deref() {
        description.push_str(native);
    }

    let error = NormalizedError {
        message: detail.message,
        name: detail.name,
        description,
        response,
        request: RequestSnapshot {
            url: request.url.clone(),
            method: request.method,
            headers: request.headers.clone(),
            data: request.body.snapshot(),
            timeout: request
                .timeout
                .map(|t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX)),
            response_type: request.response_type,
        },
        number: detail.number,
        code: detail.code,
    };
    warn!(
        name = %error.name,
        code = ?error.code,
        description = %error.description,
        "transport failure"
    );
    Issue1Error::Transport(Box::new(error))
}
