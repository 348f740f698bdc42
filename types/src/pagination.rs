use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Client-side table paging. `page_index` is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PaginationState {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size: page_size.max(1),
        }
    }

    /// Back to the first page, keeping the page size.
    pub fn reset(&mut self) {
        self.page_index = 0;
    }

    pub fn set_page(&mut self, page_index: usize) {
        self.page_index = page_index;
    }

    /// Changing the page size invalidates the page index.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page_index = 0;
    }

    /// The one-based page number the remote listing expects.
    pub fn request_page(&self) -> usize {
        self.page_index + 1
    }
}

/// Paging metadata reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub total: u64,
    pub current_page: u64,
    pub per_page: u64,
}

impl PageMeta {
    pub fn page_count(&self) -> u64 {
        if self.per_page == 0 {
            return 0;
        }
        self.total.div_ceil(self.per_page)
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.page_count()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

/// One page of a remote listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: PageMeta,
}

impl<T> Paginated<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_size_change_resets_index() {
        let mut state = PaginationState::new(25);
        state.set_page(3);
        state.set_page_size(50);

        assert_eq!(state, PaginationState { page_index: 0, page_size: 50 });
    }

    #[test]
    fn reset_keeps_page_size() {
        let mut state = PaginationState::new(25);
        state.set_page(7);
        state.reset();

        assert_eq!(state.page_index, 0);
        assert_eq!(state.page_size, 25);
        assert_eq!(state.request_page(), 1);
    }

    #[test]
    fn page_count_rounds_up() {
        let meta = PageMeta { total: 41, current_page: 4, per_page: 10 };

        assert_eq!(meta.page_count(), 5);
        assert!(meta.has_next());
        assert!(meta.has_previous());
    }

    #[test]
    fn empty_listing_has_no_pages() {
        let meta = PageMeta { total: 0, current_page: 1, per_page: 10 };

        assert_eq!(meta.page_count(), 0);
        assert!(!meta.has_next());
        assert!(!meta.has_previous());
    }
}
