//! Page-number pagination for the collection list endpoints.
//!
//! Pages are fixed at [`PAGE_SIZE`] items. A [`Page`] is computed from the total item count and
//! the requested page before anything is fetched, and tells the handler how many items to skip.
//! It serializes as the metadata half of a list envelope:
//!
//! ```json
//! { "pageNumber": 2, "totalPages": 3, "pageSize": 10, "totalCount": 25,
//!   "links": { "nextPage": "/businesses?page=3", "lastPage": "/businesses?page=3",
//!              "prevPage": "/businesses?page=1", "firstPage": "/businesses?page=1" } }
//! ```

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Number of items on every page.
pub const PAGE_SIZE: i64 = 10;

/// Query parameters for paged list endpoints.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct PageQuery {
    /// Page number, starting at 1. Values that do not start with a positive integer select page 1.
    #[param(default = "1", example = "2")]
    pub page: Option<String>,
}

impl PageQuery {
    /// The page to serve: the requested page if it starts with a positive integer, else 1.
    ///
    /// Only the leading digits count, so `2.5` and `2abc` both ask for page 2. There is no upper
    /// bound; a page past the end is served empty.
    pub fn effective_page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(leading_integer)
            .filter(|page| *page > 0)
            .unwrap_or(1)
    }
}

/// Integer formed by the optional sign and digits at the start of `raw`, ignoring leading whitespace
fn leading_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let sign_len = usize::from(raw.starts_with(['+', '-']));
    let digits_len = raw[sign_len..].bytes().take_while(u8::is_ascii_digit).count();
    raw[..sign_len + digits_len].parse().ok()
}

/// Navigation links between pages. Absent links are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "/businesses?page=3")]
    pub next_page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_page: Option<String>,
}

/// A window over a collection, with the metadata reported to clients.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// The page being served
    pub page_number: i64,
    /// `ceil(totalCount / pageSize)`; 0 for an empty collection
    pub total_pages: i64,
    pub page_size: i64,
    pub total_count: i64,
    pub links: PageLinks,
    /// Number of items before this page
    #[serde(skip)]
    pub skip: i64,
}

impl Page {
    /// Compute the page `page_number` of a collection holding `total_count` items, with links
    /// pointing at `collection_path` (e.g. `/businesses`).
    pub fn new(total_count: i64, page_size: i64, page_number: i64, collection_path: &str) -> Self {
        let page_size = page_size.max(1);
        let total_count = total_count.max(0);
        let page_number = page_number.max(1);

        let total_pages = (total_count + page_size - 1) / page_size;
        let href = |page: i64| format!("{collection_path}?page={page}");

        let mut links = PageLinks::default();
        if page_number < total_pages {
            links.next_page = Some(href(page_number + 1));
            links.last_page = Some(href(total_pages));
        }
        if page_number > 1 {
            links.prev_page = Some(href(page_number - 1));
            links.first_page = Some(href(1));
        }

        Self {
            page_number,
            total_pages,
            page_size,
            total_count,
            links,
            skip: (page_number - 1).saturating_mul(page_size),
        }
    }

    /// Maximum number of items on this page
    #[inline]
    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn query(page: &str) -> PageQuery {
        PageQuery {
            page: Some(page.to_string()),
        }
    }

    #[test]
    fn test_effective_page() {
        assert_eq!(PageQuery::default().effective_page(), 1);
        assert_eq!(query("3").effective_page(), 3);
        assert_eq!(query("0").effective_page(), 1);
        assert_eq!(query("-2").effective_page(), 1);
        assert_eq!(query("abc").effective_page(), 1);
        assert_eq!(query("").effective_page(), 1);
        // No upper clamp
        assert_eq!(query("999").effective_page(), 999);
    }

    #[test]
    fn test_effective_page_reads_leading_digits() {
        assert_eq!(query("2.5").effective_page(), 2);
        assert_eq!(query("2abc").effective_page(), 2);
        assert_eq!(query(" 4").effective_page(), 4);
        assert_eq!(query("+3").effective_page(), 3);
        assert_eq!(query("-3x").effective_page(), 1);
        assert_eq!(query("x2").effective_page(), 1);
        assert_eq!(query("99999999999999999999").effective_page(), 1);
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        for (count, expected) in [(0, 0), (1, 1), (9, 1), (10, 1), (11, 2), (25, 3), (100, 10), (101, 11)] {
            assert_eq!(Page::new(count, PAGE_SIZE, 1, "/reviews").total_pages, expected, "count {count}");
        }
    }

    #[test]
    fn test_skip_and_limit() {
        let total_pages = Page::new(95, PAGE_SIZE, 1, "/photos").total_pages;
        for p in 1..=total_pages {
            let page = Page::new(95, PAGE_SIZE, p, "/photos");
            assert_eq!(page.skip, (p - 1) * 10);
            assert_eq!(page.limit(), 10);
        }
    }

    #[test]
    fn test_link_presence() {
        for count in [0, 5, 10, 25, 31] {
            let total_pages = Page::new(count, PAGE_SIZE, 1, "/businesses").total_pages;
            for p in 1..=total_pages.max(1) + 1 {
                let page = Page::new(count, PAGE_SIZE, p, "/businesses");
                assert_eq!(page.links.next_page.is_some(), p < total_pages);
                assert_eq!(page.links.last_page.is_some(), p < total_pages);
                assert_eq!(page.links.prev_page.is_some(), p > 1);
                assert_eq!(page.links.first_page.is_some(), p > 1);
            }
        }
    }

    #[test]
    fn test_middle_page_links() {
        let page = Page::new(25, PAGE_SIZE, 2, "/businesses");
        assert_eq!(
            page.links,
            PageLinks {
                next_page: Some("/businesses?page=3".to_string()),
                last_page: Some("/businesses?page=3".to_string()),
                prev_page: Some("/businesses?page=1".to_string()),
                first_page: Some("/businesses?page=1".to_string()),
            }
        );
    }

    #[test]
    fn test_empty_collection() {
        let page = Page::new(0, PAGE_SIZE, 1, "/reviews");
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.skip, 0);
        assert_eq!(page.links, PageLinks::default());
    }

    #[test]
    fn test_beyond_last_page() {
        let page = Page::new(15, PAGE_SIZE, 5, "/reviews");
        assert_eq!(page.page_number, 5);
        assert_eq!(page.skip, 40);
        assert!(page.links.next_page.is_none());
        assert_eq!(page.links.prev_page.as_deref(), Some("/reviews?page=4"));
    }

    #[test]
    fn test_serialized_shape() {
        let page = Page::new(11, PAGE_SIZE, 1, "/photos");
        assert_eq!(
            serde_json::to_value(&page).unwrap(),
            json!({
                "pageNumber": 1,
                "totalPages": 2,
                "pageSize": 10,
                "totalCount": 11,
                "links": {"nextPage": "/photos?page=2", "lastPage": "/photos?page=2"}
            })
        );
    }
}
