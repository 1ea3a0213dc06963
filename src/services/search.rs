use super::ServiceContext;
use crate::error::Result;
use crate::models::SearchResults;
use crate::query::QueryOptions;
use crate::request::RequestConfig;

#[derive(Debug, Clone)]
pub struct SearchServiceClient {
    ctx: ServiceContext,
}

impl SearchServiceClient {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Searches posts, releases, comments, channels and users at once.
    ///
    /// Sort parameters: `creation_time`, `rank`.
    pub async fn search(&self, pattern: &str, options: QueryOptions) -> Result<SearchResults> {
        let options = QueryOptions {
            pattern: Some(pattern.to_string()),
            ..options
        };
        let config = RequestConfig::get().params(options.to_params());
        self.ctx
            .executor()
            .execute(&self.ctx.url("/search"), config)
            .await
    }
}
