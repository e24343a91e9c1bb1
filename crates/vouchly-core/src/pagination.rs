// ── Pagination helpers ──
//
// Pages are 1-based. A listing with no items still has one (empty) page
// as far as navigation is concerned.

/// `ceil(total / limit)`. Zero when there is nothing to page through.
pub fn page_count(total: u64, limit: u32) -> u32 {
    if limit == 0 {
        return 0;
    }
    u32::try_from(total.div_ceil(u64::from(limit))).unwrap_or(u32::MAX)
}

/// Clamp a requested page into `[1, max(pages, 1)]`.
pub fn clamp_page(page: u32, pages: u32) -> u32 {
    page.clamp(1, pages.max(1))
}

/// The 1-based inclusive item range shown on `page`, or `None` when the
/// listing is empty.
///
/// ```
/// use vouchly_core::pagination::display_range;
///
/// assert_eq!(display_range(2, 20, 45), Some((21, 40)));
/// assert_eq!(display_range(3, 20, 45), Some((41, 45)));
/// assert_eq!(display_range(1, 20, 0), None);
/// ```
pub fn display_range(page: u32, limit: u32, total: u64) -> Option<(u64, u64)> {
    if total == 0 || limit == 0 || page == 0 {
        return None;
    }
    let limit = u64::from(limit);
    let start = u64::from(page - 1) * limit + 1;
    let end = (u64::from(page) * limit).min(total);
    (start <= end).then_some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, 20), 0);
        assert_eq!(page_count(1, 20), 1);
        assert_eq!(page_count(20, 20), 1);
        assert_eq!(page_count(21, 20), 2);
        assert_eq!(page_count(100_000, 20), 5000);
        assert_eq!(page_count(10, 0), 0);
    }

    #[test]
    fn clamp_keeps_at_least_one_page() {
        assert_eq!(clamp_page(0, 0), 1);
        assert_eq!(clamp_page(5, 0), 1);
        assert_eq!(clamp_page(5, 3), 3);
        assert_eq!(clamp_page(2, 3), 2);
    }

    #[test]
    fn range_matches_page_window() {
        assert_eq!(display_range(1, 20, 5), Some((1, 5)));
        assert_eq!(display_range(1, 20, 20), Some((1, 20)));
        assert_eq!(display_range(2, 20, 21), Some((21, 21)));
    }

    #[test]
    fn range_past_the_end_is_empty() {
        assert_eq!(display_range(4, 20, 45), None);
    }
}
