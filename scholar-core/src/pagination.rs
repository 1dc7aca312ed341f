//! Pagination token generation.
//!
//! Maps `(current_page, total_pages)` to the page buttons and ellipses shown
//! under a result list. Pages are 1-indexed.

use std::fmt;

/// Totals up to this many pages are rendered without ellipses.
pub const MAX_UNCOLLAPSED_PAGES: u32 = 7;

/// One element of the rendered pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageToken {
    Page(u32),
    Ellipsis,
}

impl PageToken {
    pub fn page(&self) -> Option<u32> {
        match self {
            PageToken::Page(p) => Some(*p),
            PageToken::Ellipsis => None,
        }
    }
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageToken::Page(p) => write!(f, "{}", p),
            PageToken::Ellipsis => f.write_str("…"),
        }
    }
}

/// `max(1, ceil(total_results / page_size))`.
pub fn total_pages(total_results: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 1;
    }
    let pages = total_results.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX).max(1)
}

/// Build the token sequence for the given position.
///
/// A `total_pages` of zero is treated as one, and `current_page` is clamped
/// into `1..=total_pages`.
pub fn page_tokens(current_page: u32, total_pages: u32) -> Vec<PageToken> {
    let total = total_pages.max(1);
    if total <= MAX_UNCOLLAPSED_PAGES {
        return (1..=total).map(PageToken::Page).collect();
    }

    let current = current_page.clamp(1, total);
    let mut tokens = Vec::with_capacity(7);
    tokens.push(PageToken::Page(1));

    if current > 3 {
        tokens.push(PageToken::Ellipsis);
    }

    let start = current.saturating_sub(1).max(2);
    let end = current.saturating_add(1).min(total - 1);
    tokens.extend((start..=end).map(PageToken::Page));

    if current < total - 2 {
        tokens.push(PageToken::Ellipsis);
    }

    tokens.push(PageToken::Page(total));
    tokens
}


// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================
