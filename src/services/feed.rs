use super::ServiceContext;
use crate::auth::auth_headers;
use crate::error::Result;
use crate::models::Post;
use crate::query::QueryOptions;
use crate::request::RequestConfig;
use serde_json::json;

#[derive(Debug, Clone)]
pub struct FeedServiceClient {
    ctx: ServiceContext,
}

impl FeedServiceClient {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Posts from the channels `username` subscribes to.
    pub async fn get_feed_posts(
        &self,
        username: &str,
        auth_token: &str,
        options: QueryOptions,
    ) -> Result<Vec<Post>> {
        let config = RequestConfig::get()
            .headers(auth_headers(auth_token)?)
            .params(options.to_params());
        self.ctx
            .executor()
            .execute(&self.ctx.url(&format!("/users/{username}/feed/posts")), config)
            .await
    }

    pub async fn subscribe_to_channel(
        &self,
        username: &str,
        channelname: &str,
        auth_token: &str,
    ) -> Result<()> {
        let config = RequestConfig::post()
            .headers(auth_headers(auth_token)?)
            .json(&json!({ "channelname": channelname }))?;
        self.ctx
            .executor()
            .execute_unit(
                &self.ctx.url(&format!("/users/{username}/feed/channels")),
                config,
            )
            .await
    }
}
