use super::ServiceContext;
use crate::error::Result;
use crate::models::Post;
use crate::request::RequestConfig;

#[derive(Debug, Clone)]
pub struct PostServiceClient {
    ctx: ServiceContext,
}

impl PostServiceClient {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub async fn get_post(&self, id: u64) -> Result<Post> {
        self.ctx
            .executor()
            .execute(&self.ctx.url(&format!("/posts/{id}")), RequestConfig::get())
            .await
    }
}
