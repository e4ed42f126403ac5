//! Pagination shared by every list endpoint.

use crate::model::api::PaginatedDto;

/// Zero-indexed page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParam {
    pub page: u64,
    pub per_page: u64,
}

/// One page of results with the total item count.
#[derive(Debug, Clone, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: u64, param: PageParam) -> Self {
        Self {
            items,
            total,
            page: param.page,
            per_page: param.per_page,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.per_page == 0 {
            0
        } else {
            self.total.div_ceil(self.per_page)
        }
    }

    /// Converts each item with `f` and attaches the page metadata.
    pub fn into_dto<D>(self, f: impl FnMut(T) -> D) -> PaginatedDto<D> {
        let total_pages = self.total_pages();
        PaginatedDto {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages,
        }
    }
}
