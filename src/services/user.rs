use super::ServiceContext;
use crate::auth::auth_headers;
use crate::error::Result;
use crate::models::User;
use crate::query::QueryOptions;
use crate::request::RequestConfig;

#[derive(Debug, Clone)]
pub struct UserServiceClient {
    ctx: ServiceContext,
}

impl UserServiceClient {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Fetches a user. With the user's own token the private fields come back too.
    pub async fn get_user(&self, username: &str, auth_token: &str) -> Result<User> {
        let config = RequestConfig::get().headers(auth_headers(auth_token)?);
        self.ctx
            .executor()
            .execute(&self.ctx.url(&format!("/users/{username}")), config)
            .await
    }

    /// Registers a new account.
    pub async fn add_user(&self, user: &User) -> Result<User> {
        let config = RequestConfig::post().json(user)?;
        self.ctx
            .executor()
            .execute(&self.ctx.url("/users"), config)
            .await
    }

    pub async fn update_user(&self, username: &str, user: &User, auth_token: &str) -> Result<User> {
        let config = RequestConfig::put()
            .headers(auth_headers(auth_token)?)
            .json(user)?;
        self.ctx
            .executor()
            .execute(&self.ctx.url(&format!("/users/{username}")), config)
            .await
    }

    pub async fn delete_user(&self, username: &str, auth_token: &str) -> Result<()> {
        let config = RequestConfig::delete().headers(auth_headers(auth_token)?);
        self.ctx
            .executor()
            .execute_unit(&self.ctx.url(&format!("/users/{username}")), config)
            .await
    }

    /// Sort parameters: `creation_time`, `username`, `first-name`, `last-name`.
    pub async fn search_users(&self, pattern: &str, options: QueryOptions) -> Result<Vec<User>> {
        let options = QueryOptions {
            pattern: Some(pattern.to_string()),
            ..options
        };
        let config = RequestConfig::get().params(options.to_params());
        self.ctx
            .executor()
            .execute(&self.ctx.url("/users"), config)
            .await
    }

    pub async fn get_users(&self, options: QueryOptions) -> Result<Vec<User>> {
        self.search_users("", options).await
    }
}
