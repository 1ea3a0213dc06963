use crate::config::ClientConfig;
use crate::error::Result;
use crate::executor::RequestExecutor;
use crate::services::{
    AuthServiceClient, ChannelServiceClient, CommentServiceClient, FeedServiceClient,
    PostServiceClient, ReleaseServiceClient, SearchServiceClient, ServiceContext,
    UserServiceClient,
};
use crate::transport::{ReqwestTransport, Transport};
use std::sync::Arc;

/// Entry point to the Issue#1 REST API.
///
/// Every service client shares one transport and one base URL.
#[derive(Debug, Clone)]
pub struct Issue1Client {
    ctx: ServiceContext,
}

impl Issue1Client {
    /// A client for `base_url` with default settings.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(ClientConfig::new(base_url)?)
    }

    /// A client configured from `ISSUE1_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config.user_agent)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// A client that sends everything through `transport`.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        let executor = RequestExecutor::new(transport).with_default_timeout(config.timeout);
        Self {
            ctx: ServiceContext::new(config.base_url(), executor),
        }
    }

    pub fn base_url(&self) -> &str {
        self.ctx.base_url()
    }

    /// The executor behind every service, for endpoints without a binding.
    pub fn executor(&self) -> &RequestExecutor {
        self.ctx.executor()
    }

    pub fn auth(&self) -> AuthServiceClient {
        AuthServiceClient::new(self.ctx.clone())
    }

    pub fn users(&self) -> UserServiceClient {
        UserServiceClient::new(self.ctx.clone())
    }

    pub fn posts(&self) -> PostServiceClient {
        PostServiceClient::new(self.ctx.clone())
    }

    pub fn channels(&self) -> ChannelServiceClient {
        ChannelServiceClient::new(self.ctx.clone())
    }

    pub fn comments(&self) -> CommentServiceClient {
        CommentServiceClient::new(self.ctx.clone())
    }

    pub fn feed(&self) -> FeedServiceClient {
        FeedServiceClient::new(self.ctx.clone())
    }

    pub fn releases(&self) -> ReleaseServiceClient {
        ReleaseServiceClient::new(self.ctx.clone())
    }

    pub fn search(&self) -> SearchServiceClient {
        SearchServiceClient::new(self.ctx.clone())
    }
}
