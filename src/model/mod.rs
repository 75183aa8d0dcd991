mod block;
pub mod blocks;
mod codec;
pub mod common;
mod draft;
pub mod media;

pub use block::{Block, BlockType, TreeIter};
pub use blocks::*;
pub use common::*;
pub use codec::{decode_block, decode_block_value, encode_block, encode_block_value};
pub use draft::{write_block, write_block_value};
pub use media::*;

use crate::types::tagged::TYPE_KEY;
use crate::types::{BlockId, DatabaseId, PageId};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Parent reference with typed IDs
///
/// Workspace parents carry `"workspace": true` on the wire. Parent kinds
/// outside this set are kept as the raw object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parent {
    Page { page_id: PageId },
    Database { database_id: DatabaseId },
    Block { block_id: BlockId },
    Workspace,
    Unsupported(Map<String, Value>),
}

const PARENT_KINDS: [&str; 4] = ["page_id", "database_id", "block_id", "workspace"];

impl Parent {
    /// The parent's ID, or `None` for the workspace root.
    pub fn id(&self) -> Option<&str> {
        match self {
            Parent::Page { page_id } => Some(page_id.as_str()),
            Parent::Database { database_id } => Some(database_id.as_str()),
            Parent::Block { block_id } => Some(block_id.as_str()),
            Parent::Workspace => None,
            Parent::Unsupported(object) => object
                .get(TYPE_KEY)
                .and_then(Value::as_str)
                .and_then(|kind| object.get(kind))
                .and_then(Value::as_str),
        }
    }
}

impl Serialize for Parent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Parent::Page { page_id } => ParentRepr::PageId {
                page_id: page_id.clone(),
            }
            .serialize(serializer),
            Parent::Database { database_id } => ParentRepr::DatabaseId {
                database_id: database_id.clone(),
            }
            .serialize(serializer),
            Parent::Block { block_id } => ParentRepr::BlockId {
                block_id: block_id.clone(),
            }
            .serialize(serializer),
            Parent::Workspace => ParentRepr::Workspace { workspace: true }.serialize(serializer),
            Parent::Unsupported(object) => object.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Parent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let object = Map::deserialize(deserializer)?;
        let known = match object.get(TYPE_KEY) {
            Some(Value::String(kind)) => PARENT_KINDS.contains(&kind.as_str()),
            Some(_) => return Err(D::Error::custom("parent field `type` must be a string")),
            None => return Err(D::Error::missing_field(TYPE_KEY)),
        };
        if !known {
            return Ok(Parent::Unsupported(object));
        }
        serde_json::from_value::<ParentRepr>(Value::Object(object))
            .map(Parent::from)
            .map_err(D::Error::custom)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ParentRepr {
    PageId {
        page_id: PageId,
    },
    DatabaseId {
        database_id: DatabaseId,
    },
    BlockId {
        block_id: BlockId,
    },
    Workspace {
        #[serde(default)]
        workspace: bool,
    },
}

impl From<ParentRepr> for Parent {
    fn from(repr: ParentRepr) -> Self {
        match repr {
            ParentRepr::PageId { page_id } => Parent::Page { page_id },
            ParentRepr::DatabaseId { database_id } => Parent::Database { database_id },
            ParentRepr::BlockId { block_id } => Parent::Block { block_id },
            ParentRepr::Workspace { .. } => Parent::Workspace,
        }
    }
}

/// Represents either a page ID or database ID
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LinkTarget {
    PageId { page_id: PageId },
    DatabaseId { database_id: DatabaseId },
}

impl LinkTarget {
    /// Get the ID value regardless of type
    pub fn id(&self) -> &str {
        match self {
            LinkTarget::PageId { page_id } => page_id.as_str(),
            LinkTarget::DatabaseId { database_id } => database_id.as_str(),
        }
    }

    /// Get the object type
    pub fn object_type(&self) -> &str {
        match self {
            LinkTarget::PageId { .. } => "page",
            LinkTarget::DatabaseId { .. } => "database",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parent_wire_shapes() {
        let cases = [
            json!({"type": "page_id", "page_id": "p1"}),
            json!({"type": "database_id", "database_id": "d1"}),
            json!({"type": "block_id", "block_id": "b1"}),
            json!({"type": "workspace", "workspace": true}),
        ];
        for wire in cases {
            let parent: Parent = serde_json::from_value(wire.clone()).unwrap();
            assert_eq!(serde_json::to_value(&parent).unwrap(), wire);
        }
    }

    #[test]
    fn parent_id_accessor() {
        let parent = Parent::Block {
            block_id: BlockId::from_wire("b1"),
        };
        assert_eq!(parent.id(), Some("b1"));
        assert_eq!(Parent::Workspace.id(), None);
    }

    #[test]
    fn unknown_parent_kind_is_kept_verbatim() {
        let wire = json!({
            "type": "data_source_id",
            "data_source_id": "ds1",
            "database_id": "d1"
        });
        let parent: Parent = serde_json::from_value(wire.clone()).unwrap();
        assert!(matches!(parent, Parent::Unsupported(_)));
        assert_eq!(parent.id(), Some("ds1"));
        assert_eq!(serde_json::to_value(&parent).unwrap(), wire);
    }

    #[test]
    fn parent_without_type_is_rejected() {
        assert!(serde_json::from_value::<Parent>(json!({"page_id": "p1"})).is_err());
    }

    #[test]
    fn link_target_object_type() {
        let target: LinkTarget =
            serde_json::from_value(json!({"type": "database_id", "database_id": "d1"})).unwrap();
        assert_eq!(target.object_type(), "database");
        assert_eq!(target.id(), "d1");
    }
}
