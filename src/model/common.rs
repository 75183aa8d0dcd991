use super::Parent;
use crate::types::{BlockId, PartialUser, Timestamp};
use serde::{Deserialize, Serialize};

/// Common fields for all blocks
///
/// Every field but `parent` and the two flags is assigned by the server and
/// absent on locally built blocks. Unset fields are omitted on output.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockCommon {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<BlockId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Parent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_time: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<PartialUser>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_edited_time: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_edited_by: Option<PartialUser>,
    #[serde(skip_serializing_if = "is_false")]
    pub has_children: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub archived: bool,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

impl BlockCommon {
    pub fn new(id: BlockId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn with_parent(mut self, parent: Parent) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Drop the read-only fields the server assigns.
    pub fn into_draft(self) -> Self {
        Self {
            parent: self.parent,
            has_children: self.has_children,
            archived: self.archived,
            ..Self::default()
        }
    }

    /// True when none of the server-assigned fields are set.
    pub fn is_draft(&self) -> bool {
        self.id.is_none()
            && self.created_time.is_none()
            && self.created_by.is_none()
            && self.last_edited_time.is_none()
            && self.last_edited_by.is_none()
    }
}

/// Read-only view over the envelope every block carries.
///
/// Implementors only supply `common`; blocks decoded from the server have
/// every audit field populated, locally built blocks have none.
pub trait BlockMetadata {
    fn common(&self) -> &BlockCommon;

    fn id(&self) -> Option<&BlockId> {
        self.common().id.as_ref()
    }

    fn parent(&self) -> Option<&Parent> {
        self.common().parent.as_ref()
    }

    fn created_time(&self) -> Option<&Timestamp> {
        self.common().created_time.as_ref()
    }

    fn created_by(&self) -> Option<&PartialUser> {
        self.common().created_by.as_ref()
    }

    fn last_edited_time(&self) -> Option<&Timestamp> {
        self.common().last_edited_time.as_ref()
    }

    fn last_edited_by(&self) -> Option<&PartialUser> {
        self.common().last_edited_by.as_ref()
    }

    fn has_children(&self) -> bool {
        self.common().has_children
    }

    fn archived(&self) -> bool {
        self.common().archived
    }
}

impl BlockMetadata for BlockCommon {
    fn common(&self) -> &BlockCommon {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PageId, UserId};
    use serde_json::json;

    fn server_common() -> BlockCommon {
        serde_json::from_value(json!({
            "object": "block",
            "id": "b1",
            "parent": {"type": "page_id", "page_id": "p1"},
            "created_time": "2022-03-01T19:05:00.000Z",
            "created_by": {"object": "user", "id": "u1"},
            "last_edited_time": "2022-07-06T19:41:00.000Z",
            "last_edited_by": {"object": "user", "id": "u2"},
            "has_children": true,
            "archived": false
        }))
        .unwrap()
    }

    #[test]
    fn decodes_full_envelope() {
        let common = server_common();
        assert_eq!(common.id().map(|id| id.as_str()), Some("b1"));
        assert_eq!(
            common.parent(),
            Some(&Parent::Page {
                page_id: PageId::from_wire("p1")
            })
        );
        assert_eq!(
            common.last_edited_by().map(|u| u.id.clone()),
            Some(UserId::from_wire("u2"))
        );
        assert!(common.has_children());
        assert!(!common.archived());
        assert!(!common.is_draft());
    }

    #[test]
    fn zero_values_are_omitted() {
        let encoded = serde_json::to_value(BlockCommon::default()).unwrap();
        assert_eq!(encoded, json!({}));
    }

    #[test]
    fn draft_keeps_linkage_and_flags() {
        let draft = server_common().into_draft();
        assert!(draft.is_draft());
        assert!(draft.parent.is_some());
        assert!(draft.has_children);
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            json!({"parent": {"type": "page_id", "page_id": "p1"}, "has_children": true})
        );
    }
}
