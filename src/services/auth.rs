use super::ServiceContext;
use crate::error::Result;
use crate::models::TokenGrant;
use crate::request::RequestConfig;
use serde_json::json;

#[derive(Debug, Clone)]
pub struct AuthServiceClient {
    ctx: ServiceContext,
}

impl AuthServiceClient {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Exchanges credentials for a bearer token.
    pub async fn get_auth_token(&self, username: &str, password: &str) -> Result<String> {
        let config = RequestConfig::post().json(&json!({
            "username": username,
            "password": password,
        }))?;
        let grant: TokenGrant = self
            .ctx
            .executor()
            .execute(&self.ctx.url("/token-auth"), config)
            .await?;
        Ok(grant.token)
    }
}
