use serde::Deserialize;
use utoipa::IntoParams;

use crate::server::model::page::PageParam;

const DEFAULT_PER_PAGE: u64 = 20;
const MAX_PER_PAGE: u64 = 100;

/// `?page&per_page` query of every paginated endpoint. Pages start at 0.
#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParam {
    /// Page number (default: 0)
    #[serde(default)]
    pub page: u64,
    /// Items per page (default: 20, max: 100)
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

fn default_per_page() -> u64 {
    DEFAULT_PER_PAGE
}

impl PaginationParam {
    pub fn into_page(self) -> PageParam {
        PageParam {
            page: self.page,
            per_page: self.per_page.clamp(1, MAX_PER_PAGE),
        }
    }
}
