//! Client-side filtering and windowing over a fully fetched collection.
//!
//! Known limitation: the whole collection is held in memory for every list
//! call, so cost grows with collection size.

use models::Resource;

pub const DEFAULT_PAGE_LENGTH: u32 = 7;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    /// 1-based page index; 0 is treated as 1
    pub page: u32,
    /// items per page; 0 is treated as 1
    pub per_page: u32,
}

impl Page {
    pub fn new(page: u32, per_page: u32) -> Self { Self { page, per_page } }

    pub fn offset(self) -> usize {
        let (page, per_page) = self.clamped();
        (page as usize - 1) * per_page as usize
    }

    /// Slice out this page. Pages past the end are empty.
    pub fn window<T>(self, items: Vec<T>) -> Vec<T> {
        let (_, per_page) = self.clamped();
        items.into_iter().skip(self.offset()).take(per_page as usize).collect()
    }

    fn clamped(self) -> (u32, u32) { (self.page.max(1), self.per_page.max(1)) }
}

impl Default for Page {
    fn default() -> Self { Self { page: 1, per_page: DEFAULT_PAGE_LENGTH } }
}

pub fn page_count(total: usize, per_page: u32) -> usize {
    total.div_ceil(per_page.max(1) as usize)
}

/// Case-insensitive substring match on `key`; an empty filter keeps everything in order.
pub fn filter_by<T>(items: Vec<T>, filter: &str, key: impl Fn(&T) -> &str) -> Vec<T> {
    if filter.is_empty() {
        return items;
    }
    let needle = filter.to_lowercase();
    items.into_iter().filter(|item| key(item).to_lowercase().contains(&needle)).collect()
}

pub fn filter_by_display<R: Resource>(items: Vec<R>, filter: &str) -> Vec<R> {
    filter_by(items, filter, |r| r.display_field())
}
