//! Page/offset arithmetic shared by list endpoints

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Normalize `page`/`per_page` query values and compute the row offset.
///
/// Returns `(page, per_page, offset)`. Pages start at 1 and the page size is
/// clamped to `1..=MAX_PAGE_SIZE`; the offset is widened before multiplying so
/// very large page numbers cannot wrap.
pub fn page_window(page: Option<u32>, per_page: Option<u32>) -> (u32, u32, i64) {
    let page = page.unwrap_or(1).max(1);
    let per_page = per_page.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let offset = i64::from(page - 1).saturating_mul(i64::from(per_page));
    (page, per_page, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_clamping() {
        assert_eq!(page_window(None, None), (1, DEFAULT_PAGE_SIZE, 0));
        assert_eq!(page_window(Some(0), Some(0)), (1, 1, 0));
        assert_eq!(page_window(Some(3), Some(10)), (3, 10, 20));
        assert_eq!(page_window(Some(2), Some(u32::MAX)).1, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_huge_page_does_not_wrap() {
        let (page, per_page, offset) = page_window(Some(u32::MAX), Some(MAX_PAGE_SIZE));
        assert_eq!(page, u32::MAX);
        assert_eq!(offset, (u32::MAX as i64 - 1) * per_page as i64);
        assert!(offset > 0);
    }
}
