//! A page of list results and the pagination arithmetic views need.

use serde::{Deserialize, Serialize};

/// Page sizes offered by list views.
pub const PAGE_SIZES: [u32; 4] = [10, 20, 50, 100];

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// The smallest offered size that fits `requested`, or the largest one.
pub fn offered_page_size(requested: u32) -> u32 {
    PAGE_SIZES
        .iter()
        .copied()
        .find(|&size| size >= requested)
        .unwrap_or(PAGE_SIZES[PAGE_SIZES.len() - 1])
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub list: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn empty(page: u32, size: u32) -> Self {
        Self {
            list: Vec::new(),
            page,
            size,
            total: 0,
        }
    }

    /// `list.len() <= size`, `list.len() <= total`, `page >= 1`.
    pub fn is_consistent(&self) -> bool {
        let len = self.list.len();
        self.page >= 1 && len <= self.size as usize && len as u64 <= self.total
    }

    pub fn total_pages(&self) -> u32 {
        if self.size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.size)) as u32
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// 1-based inclusive range of records shown, `None` for an empty page.
    pub fn showing(&self) -> Option<(u64, u64)> {
        if self.list.is_empty() {
            return None;
        }
        let start = u64::from(self.page.saturating_sub(1)) * u64::from(self.size) + 1;
        Some((start, start + self.list.len() as u64 - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(len: usize, page: u32, size: u32, total: u64) -> Page<usize> {
        Page {
            list: (0..len).collect(),
            page,
            size,
            total,
        }
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(page(10, 1, 10, 53).total_pages(), 6);
        assert_eq!(page(10, 1, 10, 50).total_pages(), 5);
        assert_eq!(page(0, 1, 10, 0).total_pages(), 0);
    }

    #[test]
    fn navigation_flags() {
        let first = page(10, 1, 10, 25);
        assert!(!first.has_prev());
        assert!(first.has_next());
        let last = page(5, 3, 10, 25);
        assert!(last.has_prev());
        assert!(!last.has_next());
    }

    #[test]
    fn showing_range() {
        assert_eq!(page(5, 3, 10, 25).showing(), Some((21, 25)));
        assert_eq!(page(0, 1, 10, 0).showing(), None);
    }

    #[test]
    fn consistency_checks() {
        assert!(page(10, 1, 10, 53).is_consistent());
        assert!(!page(11, 1, 10, 53).is_consistent());
        assert!(!page(3, 1, 10, 2).is_consistent());
        assert!(!page(0, 0, 10, 0).is_consistent());
    }

    #[test]
    fn requested_sizes_snap_to_offered_ones() {
        assert_eq!(offered_page_size(0), 10);
        assert_eq!(offered_page_size(7), 10);
        assert_eq!(offered_page_size(20), 20);
        assert_eq!(offered_page_size(21), 50);
        assert_eq!(offered_page_size(500), 100);
    }

    #[test]
    fn list_defaults_to_empty_when_absent() {
        let p: Page<u32> = serde_json::from_str(r#"{"page":1,"size":10,"total":0}"#).unwrap();
        assert!(p.list.is_empty());
    }
}
