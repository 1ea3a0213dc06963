// Declare all our modules
pub mod auth;
mod client;
pub mod config;
mod error;
pub mod executor;
mod models;
pub mod query;
pub mod request;
pub mod services;
pub mod transport;

// Publicly export the parts of our library that users will need
pub use auth::{attach_auth_token, auth_headers};
pub use client::Issue1Client;
pub use config::ClientConfig;
pub use error::{CONNECTION_ERROR, ConnectionError, Issue1Error, NormalizedError, Result};
pub use executor::RequestExecutor;
pub use models::*; // Envelope, User, Channel, Release...
pub use query::{QueryOptions, SortingOrder, calculate_limit_offset, generate_query_params};
pub use request::{ImageAttachment, Method, RequestConfig, ResponseType};
pub use transport::{ReqwestTransport, Transport};
