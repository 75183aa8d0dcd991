// src/api/responses.rs
//! Response shapes the codec decodes.

use super::requests::PaginationQuery;
use crate::constants::LIST_OBJECT;
use crate::model::Block;
use crate::types::PageSize;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque continuation token issued by the server.
///
/// Only meaningful when handed back verbatim as `start_cursor`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generic paginated response wrapper
///
/// Listings also carry `"type"` and a same-named empty object; those are
/// ignored. A body without `object` reads as `"list"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    #[serde(default = "list_object", skip_serializing_if = "String::is_empty")]
    pub object: String,
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<Cursor>,
    #[serde(default)]
    pub has_more: bool,
}

fn list_object() -> String {
    LIST_OBJECT.to_string()
}

/// Block children response
pub type BlockChildren = PaginatedResponse<Block>;

impl<T> PaginatedResponse<T> {
    /// No further page exists. A missing cursor ends the feed even if
    /// `has_more` claims otherwise.
    pub fn is_exhausted(&self) -> bool {
        !self.has_more || self.next_cursor.is_none()
    }

    /// The query for the page after this one, or `None` when exhausted.
    pub fn next_query(&self, page_size: Option<PageSize>) -> Option<PaginationQuery> {
        if self.is_exhausted() {
            return None;
        }
        Some(PaginationQuery {
            start_cursor: self.next_cursor.clone(),
            page_size,
        })
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Error object returned in place of the requested resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub status: u16,
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cursor_is_transparent() {
        let cursor: Cursor = serde_json::from_value(json!("abc==")).unwrap();
        assert_eq!(cursor.as_str(), "abc==");
        assert_eq!(serde_json::to_value(&cursor).unwrap(), json!("abc=="));
    }

    #[test]
    fn exhausted_without_cursor() {
        let page: PaginatedResponse<u8> = serde_json::from_value(json!({
            "results": [], "has_more": true, "next_cursor": null
        }))
        .unwrap();
        assert!(page.is_exhausted());
        assert!(page.next_query(None).is_none());
        assert_eq!(page.object, "list");
    }

    #[test]
    fn next_query_carries_cursor() {
        let page: PaginatedResponse<u8> = serde_json::from_value(json!({
            "object": "list", "results": [1], "has_more": true, "next_cursor": "c2"
        }))
        .unwrap();
        let query = page.next_query(Some(PageSize::saturating(10))).unwrap();
        assert_eq!(query.start_cursor, Some(Cursor::new("c2")));
        assert_eq!(query.page_size.map(|size| size.get()), Some(10));
    }
}
