use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use strum::{Display, EnumString};

/// Header and query-parameter maps. Ordered so requests are reproducible.
pub type Headers = BTreeMap<String, String>;
pub type QueryParams = BTreeMap<String, String>;

/// HTTP verbs the Issue#1 API uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

/// What the caller expects the response body to be.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    /// A JSend envelope; the executor unwraps its `data`.
    #[default]
    Json,
    /// Raw text, handed back as a JSON string without envelope handling.
    Text,
}

/// An image sent as the single `image` field of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageAttachment {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    /// A multipart form: the `image` file part plus plain text fields.
    Multipart {
        image: ImageAttachment,
        fields: BTreeMap<String, String>,
    },
}

impl RequestBody {
    /// How the body is echoed back in a [`RequestSnapshot`].
    pub fn snapshot(&self) -> Option<Value> {
        match self {
            RequestBody::Empty => None,
            RequestBody::Json(value) => Some(value.clone()),
            RequestBody::Multipart { image, fields } => {
                let mut snapshot = serde_json::Map::new();
                for (name, value) in fields {
                    snapshot.insert(name.clone(), Value::String(value.clone()));
                }
                snapshot.insert(
                    "image".to_string(),
                    serde_json::json!({
                        "fileName": image.file_name,
                        "mimeType": image.mime_type,
                        "size": image.bytes.len(),
                    }),
                );
                Some(Value::Object(snapshot))
            }
        }
    }
}

/// Description of a single call, built by a binding and consumed once by the
/// executor.
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    pub method: Method,
    pub headers: Headers,
    pub body: RequestBody,
    pub params: QueryParams,
    pub response_type: ResponseType,
    /// Overrides the executor's default timeout for this call.
    pub timeout: Option<Duration>,
}

impl RequestConfig {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Default::default()
        }
    }

    pub fn get() -> Self {
        Self::new(Method::Get)
    }

    pub fn post() -> Self {
        Self::new(Method::Post)
    }

    pub fn put() -> Self {
        Self::new(Method::Put)
    }

    pub fn patch() -> Self {
        Self::new(Method::Patch)
    }

    pub fn delete() -> Self {
        Self::new(Method::Delete)
    }

    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Serializes `body` as the JSON payload of the request.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> crate::error::Result<Self> {
        let value = serde_json::to_value(body).map_err(crate::error::Issue1Error::InvalidBody)?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    /// Sends `image` as the `image` part of a multipart form, next to `fields`.
    pub fn multipart(mut self, image: ImageAttachment, fields: BTreeMap<String, String>) -> Self {
        self.body = RequestBody::Multipart { image, fields };
        self
    }

    pub fn params(mut self, params: QueryParams) -> Self {
        self.params.extend(params);
        self
    }

    pub fn response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = response_type;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// What was actually sent, echoed on a [`NormalizedError`](crate::NormalizedError).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSnapshot {
    pub url: String,
    pub method: Method,
    pub headers: Headers,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Timeout in milliseconds, if one was set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    pub response_type: ResponseType,
}

/// The server's reply, kept when it could not be read as an envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSnapshot {
    pub status: u16,
    pub status_text: String,
    pub headers: Headers,
    pub data: Value,
}
