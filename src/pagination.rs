//! Pagination - Client-side page windows over a loaded list
//!
//! Companion to the `page`/`size` query parameters: given the full item
//! list and the (user-supplied, therefore untrusted) page settings,
//! [`paginate`] returns the visible window with clamped, 1-based numbers.
//! Out-of-range pages clamp instead of erroring, so a stale shared link
//! still renders the nearest valid page.

// =============================================================================
// PAGE
// =============================================================================

/// One page window over a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items visible on this page, in list order.
    pub items: Vec<T>,
    /// Effective page number (1-based, clamped).
    pub page: usize,
    /// Effective page size (at least 1).
    pub per_page: usize,
    /// Total items in the full list.
    pub total_items: usize,
    /// Total pages (at least 1, even for an empty list).
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// True when a previous page exists.
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// True when a further page exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Index of the first item on this page within the full list.
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.per_page
    }
}

// =============================================================================
// PAGINATE
// =============================================================================

/// Slice out one page of `items`.
///
/// `page` is 1-based and clamped into `1..=total_pages`; `per_page` is
/// raised to at least 1. The returned [`Page`] carries the effective
/// (clamped) numbers, which callers can write back to the URL so the
/// address bar reflects what is actually shown.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * per_page;
    let end = (start + per_page).min(total_items);
    let items = if start < total_items {
        items[start..end].to_vec()
    } else {
        Vec::new()
    };

    Page {
        items,
        page,
        per_page,
        total_items,
        total_pages,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    #[test]
    fn test_first_page() {
        let page = paginate(&items(12), 1, 5);
        assert_eq!(page.items, vec![1, 2, 3, 4, 5]);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_items, 12);
        assert!(!page.has_prev());
        assert!(page.has_next());
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_middle_and_last_page() {
        let page = paginate(&items(12), 2, 5);
        assert_eq!(page.items, vec![6, 7, 8, 9, 10]);
        assert!(page.has_prev());
        assert!(page.has_next());
        assert_eq!(page.offset(), 5);

        let last = paginate(&items(12), 3, 5);
        assert_eq!(last.items, vec![11, 12]);
        assert!(last.has_prev());
        assert!(!last.has_next());
    }

    #[test]
    fn test_page_clamps_into_range() {
        // Too far: clamp to the last page
        let page = paginate(&items(12), 99, 5);
        assert_eq!(page.page, 3);
        assert_eq!(page.items, vec![11, 12]);

        // Page zero: clamp to the first page
        let page = paginate(&items(12), 0, 5);
        assert_eq!(page.page, 1);
        assert_eq!(page.items, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_per_page_floor() {
        let page = paginate(&items(3), 1, 0);
        assert_eq!(page.per_page, 1);
        assert_eq!(page.items, vec![1]);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_empty_list() {
        let page = paginate(&items(0), 1, 5);
        assert!(page.items.is_empty());
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_prev());
        assert!(!page.has_next());
    }

    #[test]
    fn test_exact_fit() {
        let page = paginate(&items(10), 2, 5);
        assert_eq!(page.items, vec![6, 7, 8, 9, 10]);
        assert_eq!(page.total_pages, 2);
        assert!(!page.has_next());
    }
}
