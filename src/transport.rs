use crate::error::{Issue1Error, Result};
use crate::request::{Headers, Method, QueryParams, RequestBody, ResponseType};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::multipart::{Form, Part};
use std::error::Error as StdError;
use std::time::Duration;

/// Failure code for a host that could not be resolved.
pub const CODE_HOST_NOT_FOUND: &str = "ENOTFOUND";
pub const CODE_TIMED_OUT: &str = "ETIMEDOUT";
pub const CODE_CONNECTION_REFUSED: &str = "ECONNREFUSED";

/// A fully resolved request, ready to go over the wire.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub url: String,
    pub method: Method,
    pub headers: Headers,
    pub body: RequestBody,
    pub params: QueryParams,
    pub response_type: ResponseType,
    pub timeout: Option<Duration>,
}

/// Whatever came back from the server, whatever its status.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: Headers,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Diagnostics a transport attaches to a failure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FailureDetail {
    pub name: String,
    pub message: String,
    pub code: Option<String>,
    pub number: Option<i64>,
    pub native_description: Option<String>,
}

impl FailureDetail {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_number(mut self, number: i64) -> Self {
        self.number = Some(number);
        self
    }

    pub fn with_native_description(mut self, description: impl Into<String>) -> Self {
        self.native_description = Some(description.into());
        self
    }
}

/// The three ways a call can fail below the envelope layer.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportFailure {
    /// The server replied, but with a status the transport treats as an error.
    Response {
        response: TransportResponse,
        detail: FailureDetail,
    },
    /// The request went out and nothing came back.
    NoResponse(FailureDetail),
    /// The request could not be built or sent.
    Setup(FailureDetail),
}

/// The HTTP layer under the request executor.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request. No retries.
    async fn send(
        &self,
        request: &TransportRequest,
    ) -> std::result::Result<TransportResponse, TransportFailure>;
}

/// [`Transport`] backed by `reqwest`. Non-2xx replies come back as
/// [`TransportFailure::Response`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(user_agent: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .map_err(|e| Issue1Error::Config(format!("invalid user agent: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }

    /// Wraps an already configured client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn build(
        &self,
        request: &TransportRequest,
    ) -> std::result::Result<reqwest::Request, TransportFailure> {
        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            let header_name = HeaderName::try_from(name.as_str()).map_err(|e| {
                TransportFailure::Setup(
                    FailureDetail::new("TypeError", format!("invalid header name `{name}`"))
                        .with_native_description(e.to_string()),
                )
            })?;
            let header_value = HeaderValue::try_from(value.as_str()).map_err(|e| {
                TransportFailure::Setup(
                    FailureDetail::new("TypeError", format!("invalid value for header `{name}`"))
                        .with_native_description(e.to_string()),
                )
            })?;
            headers.insert(header_name, header_value);
        }

        let mut builder = self
            .client
            .request(request.method.to_reqwest(), request.url.as_str())
            .headers(headers);

        if !request.params.is_empty() {
            builder = builder.query(&request.params);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart { image, fields } => {
                let part = Part::bytes(image.bytes.clone())
                    .file_name(image.file_name.clone())
                    .mime_str(&image.mime_type)
                    .map_err(|e| TransportFailure::Setup(classify(&e)))?;
                let form = fields
                    .iter()
                    .fold(Form::new(), |form, (name, value)| {
                        form.text(name.clone(), value.clone())
                    })
                    .part("image", part);
                builder.multipart(form)
            }
        };

        builder
            .build()
            .map_err(|e| TransportFailure::Setup(classify(&e)))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(
        &self,
        request: &TransportRequest,
    ) -> std::result::Result<TransportResponse, TransportFailure> {
        let built = self.build(request)?;
        let response = self.client.execute(built).await.map_err(|e| {
            if e.is_builder() {
                TransportFailure::Setup(classify(&e))
            } else {
                TransportFailure::NoResponse(classify(&e))
            }
        })?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect::<Headers>();

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportFailure::NoResponse(classify(&e)))?
            .to_vec();

        let response = TransportResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        };

        if response.is_success() {
            Ok(response)
        } else {
            let detail = FailureDetail::new(
                "HttpStatusError",
                format!("Request failed with status code {}", response.status),
            )
            .with_number(i64::from(response.status));
            Err(TransportFailure::Response { response, detail })
        }
    }
}

/// Turns a `reqwest` error into failure diagnostics, mapping the common
/// network conditions onto their errno-style codes.
fn classify(err: &reqwest::Error) -> FailureDetail {
    let chain = error_chain(err);
    let mut detail = FailureDetail::new(error_name(err), err.to_string())
        .with_native_description(chain.clone());

    let lowered = chain.to_lowercase();
    if err.is_timeout() {
        detail = detail.with_code(CODE_TIMED_OUT);
    } else if lowered.contains("dns error")
        || lowered.contains("failed to lookup address")
        || lowered.contains("name or service not known")
    {
        detail = detail.with_code(CODE_HOST_NOT_FOUND);
    } else if err.is_connect() {
        detail = detail.with_code(CODE_CONNECTION_REFUSED);
    }
    detail
}

fn error_name(err: &reqwest::Error) -> &'static str {
    if err.is_builder() {
        "BuilderError"
    } else if err.is_timeout() {
        "TimeoutError"
    } else if err.is_connect() {
        "ConnectError"
    } else if err.is_body() || err.is_decode() {
        "BodyError"
    } else {
        "RequestError"
    }
}

fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(inner) = source {
        parts.push(inner.to_string());
        source = inner.source();
    }
    parts.join(": ")
}
