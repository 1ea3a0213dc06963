use super::ServiceContext;
use crate::auth::auth_headers;
use crate::error::Result;
use crate::models::Comment;
use crate::query::QueryOptions;
use crate::request::RequestConfig;

/// Comments and replies under a post. Only `creation_time` sorts for now.
#[derive(Debug, Clone)]
pub struct CommentServiceClient {
    ctx: ServiceContext,
}

impl CommentServiceClient {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    fn comments_url(&self, post_id: u64) -> String {
        self.ctx.url(&format!("/posts/{post_id}/comments"))
    }

    fn comment_url(&self, post_id: u64, comment_id: u64) -> String {
        self.ctx.url(&format!("/posts/{post_id}/comments/{comment_id}"))
    }

    pub async fn add_comment(
        &self,
        comment: &Comment,
        post_id: u64,
        auth_token: &str,
    ) -> Result<Comment> {
        let config = RequestConfig::post()
            .headers(auth_headers(auth_token)?)
            .json(comment)?;
        self.ctx
            .executor()
            .execute(&self.comments_url(post_id), config)
            .await
    }

    pub async fn add_reply(
        &self,
        comment: &Comment,
        post_id: u64,
        comment_id: u64,
        auth_token: &str,
    ) -> Result<Comment> {
        let config = RequestConfig::post()
            .headers(auth_headers(auth_token)?)
            .json(comment)?;
        let url = format!("{}/replies", self.comment_url(post_id, comment_id));
        self.ctx.executor().execute(&url, config).await
    }

    pub async fn get_comment(&self, id: u64, post_id: u64) -> Result<Comment> {
        self.ctx
            .executor()
            .execute(&self.comment_url(post_id, id), RequestConfig::get())
            .await
    }

    pub async fn get_comments(&self, post_id: u64, options: QueryOptions) -> Result<Vec<Comment>> {
        let config = RequestConfig::get().params(options.to_params());
        self.ctx
            .executor()
            .execute(&self.comments_url(post_id), config)
            .await
    }

    pub async fn get_replies(
        &self,
        comment_id: u64,
        post_id: u64,
        options: QueryOptions,
    ) -> Result<Vec<Comment>> {
        let config = RequestConfig::get().params(options.to_params());
        let url = format!("{}/replies", self.comment_url(post_id, comment_id));
        self.ctx.executor().execute(&url, config).await
    }

    /// Only the commenter may update a comment.
    pub async fn update_comment(
        &self,
        id: u64,
        post_id: u64,
        comment: &Comment,
        auth_token: &str,
    ) -> Result<Comment> {
        let config = RequestConfig::patch()
            .headers(auth_headers(auth_token)?)
            .json(comment)?;
        self.ctx
            .executor()
            .execute(&self.comment_url(post_id, id), config)
            .await
    }

    pub async fn delete_comment(&self, id: u64, post_id: u64, auth_token: &str) -> Result<()> {
        let config = RequestConfig::delete().headers(auth_headers(auth_token)?);
        self.ctx
            .executor()
            .execute_unit(&self.comment_url(post_id, id), config)
            .await
    }
}
