use super::ServiceContext;
use crate::auth::auth_headers;
use crate::error::Result;
use crate::models::{Channel, Post, Release};
use crate::query::QueryOptions;
use crate::request::RequestConfig;
use serde::de::DeserializeOwned;
use serde_json::json;

/// Channels, their admins, catalogs and stickied posts.
///
/// Most mutating calls need the token of a channel admin; ownership transfer
/// needs the current owner's.
#[derive(Debug, Clone)]
pub struct ChannelServiceClient {
    ctx: ServiceContext,
}

impl ChannelServiceClient {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    fn channel_url(&self, channel: &str, rest: &str) -> String {
        self.ctx.url(&format!("/channels/{channel}{rest}"))
    }

    async fn get<T: DeserializeOwned>(&self, url: String, auth_token: &str) -> Result<T> {
        let config = RequestConfig::get().headers(auth_headers(auth_token)?);
        self.ctx.executor().execute(&url, config).await
    }

    async fn put_unit(&self, url: String, auth_token: &str) -> Result<()> {
        let config = RequestConfig::put().headers(auth_headers(auth_token)?);
        self.ctx.executor().execute_unit(&url, config).await
    }

    async fn delete_unit(&self, url: String, auth_token: &str) -> Result<()> {
        let config = RequestConfig::delete().headers(auth_headers(auth_token)?);
        self.ctx.executor().execute_unit(&url, config).await
    }

    /// The owner in `channel` must match the owner of the token.
    pub async fn add_channel(&self, channel: &Channel, auth_token: &str) -> Result<Channel> {
        let config = RequestConfig::post()
            .headers(auth_headers(auth_token)?)
            .json(channel)?;
        self.ctx
            .executor()
            .execute(&self.ctx.url("/channels"), config)
            .await
    }

    /// An admin's token also returns the channel's private fields.
    pub async fn get_channel(&self, channel: &str, auth_token: &str) -> Result<Channel> {
        self.get(self.channel_url(channel, ""), auth_token).await
    }

    /// Sort parameters: `creation_time`, `channelUsername`, `name`.
    pub async fn search_channels(
        &self,
        pattern: &str,
        options: QueryOptions,
    ) -> Result<Vec<Channel>> {
        let options = QueryOptions {
            pattern: Some(pattern.to_string()),
            ..options
        };
        let config = RequestConfig::get().params(options.to_params());
        self.ctx
            .executor()
            .execute(&self.ctx.url("/channels"), config)
            .await
    }

    pub async fn get_channels(&self, options: QueryOptions) -> Result<Vec<Channel>> {
        self.search_channels("", options).await
    }

    pub async fn update_channel(
        &self,
        channel_username: &str,
        channel: &Channel,
        auth_token: &str,
    ) -> Result<Channel> {
        let config = RequestConfig::put()
            .headers(auth_headers(auth_token)?)
            .json(channel)?;
        self.ctx
            .executor()
            .execute(&self.channel_url(channel_username, ""), config)
            .await
    }

    pub async fn delete_channel(&self, channel: &str, auth_token: &str) -> Result<()> {
        self.delete_unit(self.channel_url(channel, ""), auth_token)
            .await
    }

    pub async fn add_admin_to_channel(
        &self,
        channel: &str,
        admin_username: &str,
        auth_token: &str,
    ) -> Result<()> {
        let url = self.channel_url(channel, &format!("/admins/{admin_username}"));
        self.put_unit(url, auth_token).await
    }

    pub async fn remove_admin_from_channel(
        &self,
        channel: &str,
        admin_username: &str,
        auth_token: &str,
    ) -> Result<()> {
        let url = self.channel_url(channel, &format!("/admins/{admin_username}"));
        self.delete_unit(url, auth_token).await
    }

    pub async fn change_channel_owner(
        &self,
        channel: &str,
        new_owner: &str,
        auth_token: &str,
    ) -> Result<()> {
        let url = self.channel_url(channel, &format!("/owners/{new_owner}"));
        self.put_unit(url, auth_token).await
    }

    pub async fn remove_release_from_catalog(
        &self,
        channel: &str,
        release_id: u64,
        auth_token: &str,
    ) -> Result<()> {
        let url = self.channel_url(channel, &format!("/catalogs/{release_id}"));
        self.delete_unit(url, auth_token).await
    }

    /// `origin_post_id` is the post the release was published in.
    pub async fn add_release_to_official_catalog(
        &self,
        channel: &str,
        release_id: u64,
        origin_post_id: u64,
        auth_token: &str,
    ) -> Result<()> {
        let config = RequestConfig::put()
            .headers(auth_headers(auth_token)?)
            .json(&json!({ "postID": origin_post_id }))?;
        let url = self.channel_url(channel, &format!("/official/{release_id}"));
        self.ctx.executor().execute_unit(&url, config).await
    }

    pub async fn remove_release_from_official_catalog(
        &self,
        channel: &str,
        release_id: u64,
        auth_token: &str,
    ) -> Result<()> {
        let url = self.channel_url(channel, &format!("/official/{release_id}"));
        self.delete_unit(url, auth_token).await
    }

    pub async fn sticky_post(&self, channel: &str, post_id: u64, auth_token: &str) -> Result<()> {
        let url = self.channel_url(channel, &format!("/stickiedPosts/{post_id}"));
        self.put_unit(url, auth_token).await
    }

    pub async fn remove_stickied_post(
        &self,
        channel: &str,
        post_id: u64,
        auth_token: &str,
    ) -> Result<()> {
        let url = self.channel_url(channel, &format!("/stickiedPosts/{post_id}"));
        self.delete_unit(url, auth_token).await
    }

    /// The server does not paginate this route yet; `options` are forwarded anyway.
    pub async fn get_channel_posts(&self, channel: &str, options: QueryOptions) -> Result<Vec<Post>> {
        let config = RequestConfig::get().params(options.to_params());
        self.ctx
            .executor()
            .execute(&self.channel_url(channel, "/Posts"), config)
            .await
    }

    pub async fn get_channel_post(&self, channel: &str, post_id: u64) -> Result<Post> {
        self.get(self.channel_url(channel, &format!("/Posts/{post_id}")), "")
            .await
    }

    /// The full release catalog, official or not. Admins only.
    pub async fn get_catalog(
        &self,
        channel: &str,
        auth_token: &str,
        options: QueryOptions,
    ) -> Result<Vec<Release>> {
        let config = RequestConfig::get()
            .headers(auth_headers(auth_token)?)
            .params(options.to_params());
        self.ctx
            .executor()
            .execute(&self.channel_url(channel, "/catalog"), config)
            .await
    }

    pub async fn get_official_catalog(
        &self,
        channel: &str,
        options: QueryOptions,
    ) -> Result<Vec<Release>> {
        let config = RequestConfig::get().params(options.to_params());
        self.ctx
            .executor()
            .execute(&self.channel_url(channel, "/official"), config)
            .await
    }

    pub async fn get_release_from_catalog(
        &self,
        channel: &str,
        release_id: u64,
        auth_token: &str,
    ) -> Result<Release> {
        let url = self.channel_url(channel, &format!("/catalogs/{release_id}"));
        self.get(url, auth_token).await
    }

    /// Reads from `/official/{release_id}`, the official catalog's own route,
    /// rather than `/catalogs/{release_id}` which serves the unofficial one.
    pub async fn get_release_from_official_catalog(
        &self,
        channel: &str,
        release_id: u64,
    ) -> Result<Release> {
        let url = self.channel_url(channel, &format!("/official/{release_id}"));
        self.get(url, "").await
    }

    pub async fn get_stickied_posts(&self, channel: &str) -> Result<Vec<Post>> {
        self.get(self.channel_url(channel, "/stickiedPosts"), "")
            .await
    }

    /// Usernames of the channel's admins.
    pub async fn get_admins(&self, channel: &str, auth_token: &str) -> Result<Vec<String>> {
        self.get(self.channel_url(channel, "/admins"), auth_token)
            .await
    }

    /// Username of the channel's owner.
    pub async fn get_owner(&self, channel: &str, auth_token: &str) -> Result<String> {
        self.get(self.channel_url(channel, "/owners"), auth_token)
            .await
    }
}
