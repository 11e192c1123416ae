use std::ops::Range;

pub const PAGE_SIZE: usize = 20;

pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size)
}

/// Index range of `page` (1-based) inside a collection of `len` items.
pub fn page_bounds(page: usize, page_size: usize, len: usize) -> Range<usize> {
    let start = page.saturating_sub(1).saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    start..end
}

/// Previous/next affordances for a page indicator. Holds no state of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    pub current_page: usize,
    pub total_pages: usize,
}

impl Paginator {
    pub fn new(current_page: usize, total_pages: usize) -> Self {
        Self {
            current_page,
            total_pages,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn previous(&self) -> Option<usize> {
        self.has_previous().then(|| self.current_page - 1)
    }

    pub fn next(&self) -> Option<usize> {
        self.has_next().then(|| self.current_page + 1)
    }

    pub fn indicator(&self) -> String {
        format!("{} of {}", self.current_page, self.total_pages.max(1))
    }
}
