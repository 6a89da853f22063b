//! Page-number pagination for list endpoints.
//!
//! Clients steer with `page` and `page_size` query parameters; responses are
//! wrapped in an envelope carrying the total count and relative links to the
//! adjacent pages. Unusable paging input falls back to defaults instead of
//! failing the request.

use axum::http::Uri;
use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Resolved paging window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub size: u32,
}

impl Page {
    /// Parse raw query values. Missing, malformed or non-positive values use
    /// the defaults; `page_size` is capped at [`MAX_PAGE_SIZE`].
    pub fn resolve(page: Option<&str>, page_size: Option<&str>) -> Self {
        let number = page
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|&n| n >= 1)
            .unwrap_or(1);

        let size = page_size
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|&s| s >= 1)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);

        Page { number, size }
    }

    pub fn limit(&self) -> i64 {
        self.size as i64
    }

    pub fn offset(&self) -> i64 {
        (self.number as i64 - 1) * self.size as i64
    }
}

impl Default for Page {
    fn default() -> Self {
        Page {
            number: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// List envelope: `{count, next, previous, results}`.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    /// Wrap one page of results. `uri` is the original request URI; the
    /// next/previous links keep its other query parameters intact.
    pub fn new(uri: &Uri, page: Page, count: i64, results: Vec<T>) -> Self {
        let has_next = (page.number as i64) * (page.size as i64) < count;
        let next = has_next.then(|| page_link(uri, page.number + 1));
        let previous = (page.number > 1).then(|| page_link(uri, page.number - 1));

        Paginated {
            count,
            next,
            previous,
            results,
        }
    }
}

/// Rebuild the request URI with the `page` parameter replaced.
fn page_link(uri: &Uri, page: u32) -> String {
    let mut params: Vec<String> = uri
        .query()
        .unwrap_or("")
        .split('&')
        .filter(|pair| !pair.is_empty() && pair.split('=').next() != Some("page"))
        .map(str::to_string)
        .collect();
    params.push(format!("page={page}"));

    format!("{}?{}", uri.path(), params.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let page = Page::resolve(None, None);
        assert_eq!(page.number, 1);
        assert_eq!(page.size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_resolve_explicit_values() {
        let page = Page::resolve(Some("3"), Some("25"));
        assert_eq!(page.number, 3);
        assert_eq!(page.size, 25);
        assert_eq!(page.limit(), 25);
        assert_eq!(page.offset(), 50);
    }

    #[test]
    fn test_resolve_caps_page_size() {
        let page = Page::resolve(None, Some("500"));
        assert_eq!(page.size, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_resolve_falls_back_on_garbage() {
        let page = Page::resolve(Some("abc"), Some("-1"));
        assert_eq!(page.number, 1);
        assert_eq!(page.size, DEFAULT_PAGE_SIZE);

        let page = Page::resolve(Some("0"), Some("0"));
        assert_eq!(page.number, 1);
        assert_eq!(page.size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_links_preserve_other_params() {
        let uri: Uri = "/api/ads?category=books&page=2&page_size=5"
            .parse()
            .unwrap();
        let page = Page::resolve(Some("2"), Some("5"));
        let envelope = Paginated::new(&uri, page, 20, vec![1, 2, 3, 4, 5]);

        assert_eq!(
            envelope.next.as_deref(),
            Some("/api/ads?category=books&page_size=5&page=3")
        );
        assert_eq!(
            envelope.previous.as_deref(),
            Some("/api/ads?category=books&page_size=5&page=1")
        );
    }

    #[test]
    fn test_no_next_on_last_page() {
        let uri: Uri = "/api/ads?page=2".parse().unwrap();
        let page = Page::resolve(Some("2"), None);
        let envelope = Paginated::new(&uri, page, 15, vec![0; 5]);

        assert!(envelope.next.is_none());
        assert_eq!(envelope.previous.as_deref(), Some("/api/ads?page=1"));
    }

    #[test]
    fn test_no_previous_on_first_page() {
        let uri: Uri = "/api/ads".parse().unwrap();
        let envelope = Paginated::new(&uri, Page::default(), 3, vec![0; 3]);

        assert!(envelope.next.is_none());
        assert!(envelope.previous.is_none());
        assert_eq!(envelope.count, 3);
    }
}
