//! Page selection and the page envelope returned by listings.
//!
//! Page 1 always exists, even for an empty listing. Any other page number
//! outside `1..=num_pages` is reported as not found, as is anything that is
//! neither a positive integer nor `last`.

use std::str::FromStr;

use serde::Serialize;

use crate::error::DomainError;

/// Which page of a listing the caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSelector {
    Number(u64),
    Last,
}

impl Default for PageSelector {
    fn default() -> Self {
        Self::Number(1)
    }
}

impl PageSelector {
    /// Parse the raw `page` query value; absent means the first page.
    pub fn parse(raw: Option<&str>) -> Result<Self, DomainError> {
        match raw {
            None => Ok(Self::default()),
            Some(value) => value.parse(),
        }
    }
}

impl FromStr for PageSelector {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "last" {
            return Ok(Self::Last);
        }
        match s.parse::<u64>() {
            Ok(n) if n >= 1 => Ok(Self::Number(n)),
            _ => Err(DomainError::not_found("page", s)),
        }
    }
}

/// Offset/limit pair handed to a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub number: u64,
    pub offset: u64,
    pub limit: u64,
}

/// Number of pages needed for `total_items`; never less than one.
pub fn num_pages(total_items: u64, per_page: u64) -> u64 {
    let per_page = per_page.max(1);
    total_items.div_ceil(per_page).max(1)
}

/// Resolve a selector against the listing size.
pub fn resolve(
    selector: PageSelector,
    total_items: u64,
    per_page: u64,
) -> Result<PageWindow, DomainError> {
    let per_page = per_page.max(1);
    let last = num_pages(total_items, per_page);
    let number = match selector {
        PageSelector::Last => last,
        PageSelector::Number(n) => n,
    };
    if number == 0 || number > last {
        return Err(DomainError::not_found("page", number));
    }

    Ok(PageWindow {
        number,
        offset: (number - 1) * per_page,
        limit: per_page,
    })
}

/// One page of a listing.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub num_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, window: PageWindow, total_items: u64) -> Self {
        Self {
            items,
            number: window.number,
            per_page: window.limit,
            total_items,
            num_pages: num_pages(total_items, window.limit),
        }
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_other_pages(&self) -> bool {
        self.num_pages > 1
    }

    pub fn previous_page_number(&self) -> Option<u64> {
        self.has_previous().then(|| self.number - 1)
    }

    pub fn next_page_number(&self) -> Option<u64> {
        self.has_next().then(|| self.number + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_not_found<T: std::fmt::Debug>(result: Result<T, DomainError>) -> bool {
        matches!(result, Err(DomainError::NotFound { entity: "page", .. }))
    }

    #[test]
    fn test_parse_defaults_to_first_page() {
        assert_eq!(PageSelector::parse(None).unwrap(), PageSelector::Number(1));
        assert_eq!(PageSelector::parse(Some("3")).unwrap(), PageSelector::Number(3));
        assert_eq!(PageSelector::parse(Some("last")).unwrap(), PageSelector::Last);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(is_not_found(PageSelector::parse(Some("0"))));
        assert!(is_not_found(PageSelector::parse(Some("-1"))));
        assert!(is_not_found(PageSelector::parse(Some("two"))));
        assert!(is_not_found(PageSelector::parse(Some(""))));
    }

    #[test]
    fn test_num_pages() {
        assert_eq!(num_pages(0, 5), 1);
        assert_eq!(num_pages(5, 5), 1);
        assert_eq!(num_pages(6, 5), 2);
        assert_eq!(num_pages(11, 5), 3);
    }

    #[test]
    fn test_resolve_windows() {
        let w = resolve(PageSelector::Number(2), 12, 5).unwrap();
        assert_eq!(w, PageWindow { number: 2, offset: 5, limit: 5 });

        let w = resolve(PageSelector::Last, 12, 5).unwrap();
        assert_eq!(w.number, 3);
        assert_eq!(w.offset, 10);
    }

    #[test]
    fn test_first_page_of_empty_listing_exists() {
        let w = resolve(PageSelector::Number(1), 0, 5).unwrap();
        assert_eq!(w.offset, 0);
        assert!(is_not_found(resolve(PageSelector::Number(2), 0, 5)));
    }

    #[test]
    fn test_out_of_range_is_not_found() {
        assert!(is_not_found(resolve(PageSelector::Number(4), 12, 5)));
        assert!(resolve(PageSelector::Number(3), 12, 5).is_ok());
    }

    #[test]
    fn test_page_navigation() {
        let window = resolve(PageSelector::Number(2), 12, 5).unwrap();
        let page = Page::new(vec![(); 5], window, 12);

        assert_eq!(page.num_pages, 3);
        assert_eq!(page.previous_page_number(), Some(1));
        assert_eq!(page.next_page_number(), Some(3));
        assert!(page.has_other_pages());

        let window = resolve(PageSelector::Last, 12, 5).unwrap();
        let last: Page<()> = Page::new(vec![(); 2], window, 12);
        assert!(!last.has_next());
        assert_eq!(last.next_page_number(), None);
    }
}
