//! Endpoint bindings, one client per Issue#1 service.

pub mod auth;
pub mod channel;
pub mod comment;
pub mod feed;
pub mod post;
pub mod release;
pub mod search;
pub mod user;

use crate::executor::RequestExecutor;
use std::sync::Arc;

pub use auth::AuthServiceClient;
pub use channel::ChannelServiceClient;
pub use comment::CommentServiceClient;
pub use feed::FeedServiceClient;
pub use post::PostServiceClient;
pub use release::ReleaseServiceClient;
pub use search::SearchServiceClient;
pub use user::UserServiceClient;

/// Base URL and executor shared by every service client of one [`Issue1Client`](crate::Issue1Client).
#[derive(Debug, Clone)]
pub struct ServiceContext {
    base_url: Arc<str>,
    executor: RequestExecutor,
}

impl ServiceContext {
    /// `base_url` is used as given; [`ClientConfig`](crate::ClientConfig) strips trailing slashes.
    pub fn new(base_url: &str, executor: RequestExecutor) -> Self {
        Self {
            base_url: Arc::from(base_url),
            executor,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn executor(&self) -> &RequestExecutor {
        &self.executor
    }

    /// `path` must start with `/`.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
