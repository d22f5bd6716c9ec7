//! Page arithmetic for paginated lists

/// Position within a paginated list. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
}

impl Pagination {
    pub fn new(page: u32, page_size: u32, total: u64) -> Self {
        Self {
            page: page.max(1),
            page_size,
            total,
        }
    }

    /// `ceil(total / page_size)`, 0 for an empty list
    pub fn total_pages(&self) -> u32 {
        if self.page_size == 0 || self.total == 0 {
            return 0;
        }
        let pages = self.total.div_ceil(u64::from(self.page_size));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Whether the page bar is worth showing
    pub fn show_controls(&self) -> bool {
        self.total_pages() > 1
    }

    pub fn page_numbers(&self) -> Vec<u32> {
        (1..=self.total_pages()).collect()
    }

    /// Clamp a server page to what may be rendered
    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let limit = usize::try_from(self.page_size).unwrap_or(usize::MAX);
        &items[..items.len().min(limit)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 10, 0)]
    #[case(1, 10, 1)]
    #[case(10, 10, 1)]
    #[case(11, 10, 2)]
    #[case(25, 10, 3)]
    #[case(7, 3, 3)]
    fn test_total_pages(#[case] total: u64, #[case] size: u32, #[case] expected: u32) {
        assert_eq!(Pagination::new(1, size, total).total_pages(), expected);
    }

    #[test]
    fn test_zero_page_size() {
        let p = Pagination::new(1, 0, 50);
        assert_eq!(p.total_pages(), 0);
        assert!(p.visible(&[1, 2, 3]).is_empty());
    }

    #[test]
    fn test_empty_list_first_page() {
        let p = Pagination::new(1, 10, 0);
        assert!(p.is_empty());
        assert!(!p.show_controls());
        assert!(!p.has_prev());
        assert!(!p.has_next());
        assert!(p.page_numbers().is_empty());
    }

    #[test]
    fn test_navigation_flags() {
        let p = Pagination::new(2, 10, 25);
        assert!(p.has_prev());
        assert!(p.has_next());
        assert_eq!(p.page_numbers(), vec![1, 2, 3]);

        let last = Pagination::new(3, 10, 25);
        assert!(!last.has_next());
    }

    #[test]
    fn test_page_zero_is_first_page() {
        assert_eq!(Pagination::new(0, 10, 5).page, 1);
    }

    #[test]
    fn test_visible_caps_items() {
        let items: Vec<u32> = (0..15).collect();
        let p = Pagination::new(1, 10, 15);
        assert_eq!(p.visible(&items).len(), 10);
        assert_eq!(p.visible(&items[..4]).len(), 4);
    }
}
