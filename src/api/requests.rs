// src/api/requests.rs
//! Request bodies and query parameters handed to the transport layer.

use super::responses::Cursor;
use crate::constants::NOTION_API_APPEND_CHILDREN_MAX;
use crate::error::CodecError;
use crate::model::Block;
use crate::types::{BlockId, PageSize, ValidationError};
use serde::Serialize;
use serde_json::Value;

/// Body of an append-block-children request.
///
/// Children are always sent in write mode: server-assigned envelope fields
/// are stripped from every block in every subtree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppendBlockChildren {
    pub children: Vec<Block>,
    /// Insert after this sibling instead of at the end.
    pub after: Option<BlockId>,
}

impl AppendBlockChildren {
    pub fn new(children: Vec<Block>) -> Self {
        Self {
            children,
            after: None,
        }
    }

    pub fn after(mut self, sibling: BlockId) -> Self {
        self.after = Some(sibling);
        self
    }

    /// Check the request can be written: no unsupported blocks anywhere,
    /// and no more children than one request may carry.
    pub fn validate(&self) -> Result<(), CodecError> {
        if self.children.len() > NOTION_API_APPEND_CHILDREN_MAX {
            return Err(ValidationError::OutOfBounds {
                value: u32::try_from(self.children.len()).unwrap_or(u32::MAX),
                min: 0,
                max: NOTION_API_APPEND_CHILDREN_MAX as u32,
            }
            .into());
        }
        self.children.iter().try_for_each(Block::ensure_writable)
    }

    /// The wire body: validated, with every child converted to a draft.
    fn body(&self) -> Result<AppendBody<'_>, CodecError> {
        self.validate()?;
        let children = self
            .children
            .iter()
            .map(|block| block.clone().into_draft())
            .collect();
        Ok(AppendBody {
            children,
            after: self.after.as_ref(),
        })
    }
}

#[derive(Debug, Serialize)]
struct AppendBody<'a> {
    children: Vec<Block>,
    #[serde(skip_serializing_if = "Option::is_none")]
    after: Option<&'a BlockId>,
}

/// Encode an append request, reporting validation failures as typed errors.
pub fn encode_append_children(request: &AppendBlockChildren) -> Result<String, CodecError> {
    Ok(serde_json::to_string(&request.body()?)?)
}

pub fn encode_append_children_value(request: &AppendBlockChildren) -> Result<Value, CodecError> {
    Ok(serde_json::to_value(&request.body()?)?)
}

/// Query parameters for a listing request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PaginationQuery {
    pub start_cursor: Option<Cursor>,
    pub page_size: Option<PageSize>,
}

impl PaginationQuery {
    pub fn first_page(page_size: Option<PageSize>) -> Self {
        Self {
            start_cursor: None,
            page_size,
        }
    }

    /// Parameters as opaque key-value pairs, unset ones omitted.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(cursor) = &self.start_cursor {
            pairs.push(("start_cursor", cursor.as_str().to_string()));
        }
        if let Some(size) = self.page_size {
            pairs.push(("page_size", size.get().to_string()));
        }
        pairs
    }

    /// Percent-encoded query string, without the leading `?`.
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query_pairs())
            .finish()
    }
}
