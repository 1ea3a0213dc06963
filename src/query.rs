use crate::request::QueryParams;
use strum::{Display, EnumString};

/// Items per page the server assumes when none is given.
pub const DEFAULT_PER_PAGE: u32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SortingOrder {
    Asc,
    Dsc,
}

/// Pagination, sorting and search options shared by the list endpoints.
///
/// `sort_parameter` is endpoint specific (`creation_time`, `name`,
/// `channel_from`, `rank`...), so it stays a plain string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub pattern: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub sorting_order: Option<SortingOrder>,
    pub sort_parameter: Option<String>,
    /// Ask the server for primary keys only.
    pub only_ids: bool,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sets limit and offset for a 1-based page, see [`calculate_limit_offset`].
    pub fn page(self, page: u32, per_page: u32) -> Self {
        let (limit, offset) = calculate_limit_offset(page, per_page);
        self.limit(limit).offset(offset)
    }

    pub fn sort_by(mut self, parameter: impl Into<String>, order: Option<SortingOrder>) -> Self {
        self.sort_parameter = Some(parameter.into());
        self.sorting_order = order;
        self
    }

    pub fn only_ids(mut self, only_ids: bool) -> Self {
        self.only_ids = only_ids;
        self
    }

    pub fn to_params(&self) -> QueryParams {
        generate_query_params(self)
    }
}

/// Builds the query string parameters for a list or search call.
///
/// `limit` and `offset` are sent only when set, so the server applies its own
/// default for a missing one. The sort key is
/// `<parameter>` or `<parameter>_<order>`; an order without a parameter is
/// dropped.
pub fn generate_query_params(options: &QueryOptions) -> QueryParams {
    let mut params = QueryParams::new();

    if let Some(limit) = options.limit {
        params.insert("limit".to_string(), limit.to_string());
    }
    if let Some(offset) = options.offset {
        params.insert("offset".to_string(), offset.to_string());
    }

    if let Some(parameter) = options.sort_parameter.as_deref().filter(|p| !p.is_empty()) {
        let sort = match options.sorting_order {
            Some(order) => format!("{parameter}_{order}"),
            None => parameter.to_string(),
        };
        params.insert("sort".to_string(), sort);
    }

    if let Some(pattern) = options.pattern.as_deref().filter(|p| !p.is_empty()) {
        params.insert("pattern".to_string(), pattern.to_string());
    }

    if options.only_ids {
        params.insert("onlyPKeys".to_string(), "true".to_string());
    }

    params
}

/// Converts a 1-based page number into `(limit, offset)`. Page 0 is read as page 1.
pub fn calculate_limit_offset(page: u32, per_page: u32) -> (u32, u32) {
    let page = page.max(1);
    (per_page, (page - 1).saturating_mul(per_page))
}
