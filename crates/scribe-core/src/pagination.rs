//! Fixed-size pagination over an already-ordered sequence.
//!
//! Page numbers are 1-based. A page number outside the valid range is
//! clamped to the nearest valid page (0 or garbage means page 1, past
//! the end means the last page), never an error. An empty sequence
//! still yields one empty page.

use serde::Serialize;

/// Posts per page on every list endpoint.
pub const POSTS_PER_PAGE: usize = 10;

/// One window of an ordered sequence plus paging metadata.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based number of this page after clamping.
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub per_page: usize,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

/// Slice `items` into the requested page window.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page).max(1);
    let number = page.clamp(1, total_pages);

    let start = (number - 1) * per_page;
    let items: Vec<T> = items
        .into_iter()
        .skip(start)
        .take(per_page)
        .collect();

    Page {
        items,
        number,
        total_pages,
        total_items,
        per_page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_into_ceil_n_over_p_pages() {
        let page = paginate((0..23).collect::<Vec<_>>(), 1, 10);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_items, 23);
        assert_eq!(page.items, (0..10).collect::<Vec<_>>());
        assert!(!page.has_previous());
        assert!(page.has_next());
    }

    #[test]
    fn last_page_holds_the_remainder() {
        let page = paginate((0..23).collect::<Vec<_>>(), 3, 10);
        assert_eq!(page.items, vec![20, 21, 22]);
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn page_past_the_end_clamps_to_last() {
        let page = paginate((0..23).collect::<Vec<_>>(), 99, 10);
        assert_eq!(page.number, 3);
        assert_eq!(page.items, vec![20, 21, 22]);
    }

    #[test]
    fn page_zero_clamps_to_first() {
        let page = paginate(vec![1, 2, 3], 0, 10);
        assert_eq!(page.number, 1);
        assert_eq!(page.items, vec![1, 2, 3]);
    }

    #[test]
    fn empty_input_yields_one_empty_page() {
        let page = paginate(Vec::<u8>::new(), 1, 10);
        assert_eq!(page.number, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
        assert!(!page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn exact_multiple_has_no_phantom_page() {
        let page = paginate((0..20).collect::<Vec<_>>(), 2, 10);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 10);
        assert!(!page.has_next());
    }
}
