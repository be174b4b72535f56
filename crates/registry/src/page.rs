//! Pagination over the ascending channel order.
//!
//! The arithmetic is pure so it can be verified independently of the
//! cursor walk that realizes it.

/// Half-open index range `[start, end)` of one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    /// First index of the page (inclusive).
    pub start: u64,
    /// One past the last index of the page (exclusive).
    pub end: u64,
}

/// Computes the index range of page `page` (1-indexed) with `per_page`
/// entries per page over `total` entries.
///
/// Returns `None` when the page lies beyond the last entry (an
/// out-of-range page, not an error) and for a zero `page` or `per_page`.
/// An in-range result satisfies `start < end`, `end - start <= per_page`
/// and `start == (page - 1) * per_page`.
pub fn page_range(total: u64, page: u64, per_page: u64) -> Option<PageRange> {
    if page == 0 || per_page == 0 {
        return None;
    }

    let start = (page - 1).checked_mul(per_page)?;
    if total <= start {
        return None;
    }

    let end = page.checked_mul(per_page).map_or(total, |end| end.min(total));
    Some(PageRange { start, end })
}

/// Number of pages a listing of `total` entries spans at `per_page`
/// entries per page. Zero for an empty listing or a zero `per_page`.
pub fn page_count(total: u64, per_page: u64) -> u64 {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page)
}
