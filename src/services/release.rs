use super::ServiceContext;
use crate::auth::auth_headers;
use crate::error::{Issue1Error, Result};
use crate::models::{Release, ReleaseType};
use crate::query::QueryOptions;
use crate::request::{ImageAttachment, RequestConfig};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct ReleaseServiceClient {
    ctx: ServiceContext,
}

impl ReleaseServiceClient {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// A channel admin's token also unlocks the channel's unofficial releases.
    pub async fn get_release(&self, id: u64, auth_token: &str) -> Result<Release> {
        let config = RequestConfig::get().headers(auth_headers(auth_token)?);
        self.ctx
            .executor()
            .execute(&self.ctx.url(&format!("/releases/{id}")), config)
            .await
    }

    /// Creates a text release. `release.release_type` is overwritten.
    pub async fn add_text_release(&self, release: &Release, auth_token: &str) -> Result<Release> {
        let release = Release {
            release_type: ReleaseType::Text,
            ..release.clone()
        };
        let config = RequestConfig::post()
            .headers(auth_headers(auth_token)?)
            .json(&release)?;
        self.ctx
            .executor()
            .execute(&self.ctx.url("/releases"), config)
            .await
    }

    /// Creates an image release. `image` is uploaded as the `image` part of a
    /// multipart form; the other fields of `release` travel as text parts,
    /// with nested values such as `metadata` encoded as JSON. `type` is
    /// always `image` and `content` is left to the server.
    pub async fn add_image_release(
        &self,
        release: &Release,
        image: ImageAttachment,
        auth_token: &str,
    ) -> Result<Release> {
        let release = Release {
            release_type: ReleaseType::Image,
            content: None,
            ..release.clone()
        };
        let config = RequestConfig::post()
            .headers(auth_headers(auth_token)?)
            .multipart(image, form_fields(&release)?);
        self.ctx
            .executor()
            .execute(&self.ctx.url("/releases"), config)
            .await
    }

    /// Sort parameters: `creation_time`, `channel_from`, `posted_by`, `title`.
    pub async fn search_releases(
        &self,
        pattern: &str,
        options: QueryOptions,
    ) -> Result<Vec<Release>> {
        let options = QueryOptions {
            pattern: Some(pattern.to_string()),
            ..options
        };
        let config = RequestConfig::get().params(options.to_params());
        self.ctx
            .executor()
            .execute(&self.ctx.url("/releases"), config)
            .await
    }

    pub async fn get_releases(&self, options: QueryOptions) -> Result<Vec<Release>> {
        self.search_releases("", options).await
    }

    pub async fn update_release(
        &self,
        id: u64,
        release: &Release,
        auth_token: &str,
    ) -> Result<Release> {
        let config = RequestConfig::patch()
            .headers(auth_headers(auth_token)?)
            .json(release)?;
        self.ctx
            .executor()
            .execute(&self.ctx.url(&format!("/releases/{id}")), config)
            .await
    }

    pub async fn delete_release(&self, id: u64, auth_token: &str) -> Result<()> {
        let config = RequestConfig::delete().headers(auth_headers(auth_token)?);
        self.ctx
            .executor()
            .execute_unit(&self.ctx.url(&format!("/releases/{id}")), config)
            .await
    }
}

/// Flattens `release` into multipart text fields.
fn form_fields(release: &Release) -> Result<BTreeMap<String, String>> {
    let value = serde_json::to_value(release).map_err(Issue1Error::InvalidBody)?;
    let Value::Object(object) = value else {
        return Ok(BTreeMap::new());
    };
    Ok(object
        .into_iter()
        .map(|(name, value)| {
            let text = match value {
                Value::String(text) => text,
                other => other.to_string(),
            };
            (name, text)
        })
        .collect())
}
