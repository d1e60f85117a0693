use serde::Serialize;

/// Page size assumed until the server reports one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// The (page, pageSize, total) triple that drives back/forward navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageCursor {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total: 0,
        }
    }
}

impl PageCursor {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) * u64::from(self.page_size) < self.total
    }

    pub fn prev_page(&self) -> Option<u32> {
        self.has_prev().then(|| self.page - 1)
    }

    pub fn next_page(&self) -> Option<u32> {
        if self.has_next() {
            self.page.checked_add(1)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(page: u32, page_size: u32, total: u64) -> PageCursor {
        PageCursor {
            page,
            page_size,
            total,
        }
    }

    #[test]
    fn navigation_flags_follow_page_arithmetic() {
        for page in 1..=6u32 {
            for page_size in [1u32, 5, 10, 25] {
                for total in [0u64, 1, 9, 10, 11, 25, 50, 51] {
                    let cursor = cursor(page, page_size, total);
                    assert_eq!(cursor.has_prev(), page > 1);
                    assert_eq!(
                        cursor.has_next(),
                        u64::from(page * page_size) < total,
                        "page {page} size {page_size} total {total}"
                    );
                }
            }
        }
    }

    #[test]
    fn first_of_three_pages() {
        let cursor = cursor(1, 10, 25);
        assert!(!cursor.has_prev());
        assert_eq!(cursor.next_page(), Some(2));
    }

    #[test]
    fn single_partial_page_has_no_navigation() {
        let cursor = cursor(1, 10, 9);
        assert_eq!(cursor.prev_page(), None);
        assert_eq!(cursor.next_page(), None);
    }

    #[test]
    fn last_page_only_goes_back() {
        let cursor = cursor(3, 10, 25);
        assert_eq!(cursor.prev_page(), Some(2));
        assert_eq!(cursor.next_page(), None);
    }

    #[test]
    fn large_values_do_not_overflow() {
        let cursor = cursor(u32::MAX, u32::MAX, u64::MAX);
        assert!(cursor.has_next());
        assert_eq!(cursor.next_page(), None);
    }
}
