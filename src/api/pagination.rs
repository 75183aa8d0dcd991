// src/api/pagination.rs
//! Cursor-following driver for listing endpoints.
//!
//! The caller supplies the transport as a closure; this module only decides
//! which query comes next and when the feed is done.

use super::requests::PaginationQuery;
use super::responses::PaginatedResponse;
use crate::types::PageSize;

/// Everything gathered from a paged feed.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationResult<T> {
    pub items: Vec<T>,
    pub pages_fetched: u32,
    /// True when the feed ended rather than the page limit.
    pub complete: bool,
}

/// Fetch pages until the feed is exhausted or `max_pages` is reached.
///
/// Items are concatenated in the order the pages arrived.
pub fn fetch_all_pages<T, E, F>(
    page_size: Option<PageSize>,
    max_pages: Option<u32>,
    mut fetch_page: F,
) -> Result<PaginationResult<T>, E>
where
    F: FnMut(&PaginationQuery) -> Result<PaginatedResponse<T>, E>,
{
    let mut items = Vec::new();
    let mut query = PaginationQuery::first_page(page_size);
    let mut pages_fetched = 0u32;

    loop {
        if max_pages.is_some_and(|max| pages_fetched >= max) {
            return Ok(PaginationResult {
                items,
                pages_fetched,
                complete: false,
            });
        }

        let page = fetch_page(&query)?;
        pages_fetched += 1;
        let next = page.next_query(page_size);
        items.extend(page.results);

        match next {
            Some(next) => query = next,
            None => {
                return Ok(PaginationResult {
                    items,
                    pages_fetched,
                    complete: true,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Cursor;

    fn page(results: Vec<u32>, next: Option<&str>) -> PaginatedResponse<u32> {
        PaginatedResponse {
            object: "list".to_string(),
            results,
            next_cursor: next.map(Cursor::new),
            has_more: next.is_some(),
        }
    }

    #[test]
    fn follows_cursors_in_order() {
        let mut seen = Vec::new();
        let result = fetch_all_pages::<_, (), _>(None, None, |query| {
            seen.push(query.start_cursor.clone());
            Ok(match query.start_cursor.as_ref().map(Cursor::as_str) {
                None => page(vec![1, 2], Some("c1")),
                Some("c1") => page(vec![3], Some("c2")),
                _ => page(vec![4, 5], None),
            })
        })
        .unwrap();
        assert_eq!(result.items, vec![1, 2, 3, 4, 5]);
        assert_eq!(result.pages_fetched, 3);
        assert!(result.complete);
        assert_eq!(
            seen,
            vec![None, Some(Cursor::new("c1")), Some(Cursor::new("c2"))]
        );
    }

    #[test]
    fn stops_at_page_limit() {
        let result =
            fetch_all_pages::<_, (), _>(None, Some(1), |_| Ok(page(vec![1], Some("more"))))
                .unwrap();
        assert_eq!(result.items, vec![1]);
        assert!(!result.complete);
    }

    #[test]
    fn propagates_transport_errors() {
        let result: Result<PaginationResult<u32>, &str> =
            fetch_all_pages(None, None, |_| Err("timeout"));
        assert_eq!(result.unwrap_err(), "timeout");
    }
}
