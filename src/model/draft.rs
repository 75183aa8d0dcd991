//! Write mode.
//!
//! The server assigns IDs, timestamps and audit users and rejects writes
//! that carry them, so everything sent in a create or append request goes
//! through [`Block::into_draft`] first.

use super::block::Block;
use crate::error::CodecError;
use serde_json::Value;

impl Block {
    /// Strip server-assigned envelope fields from this block and every
    /// descendant. Parent linkage and the two flags are kept.
    pub fn into_draft(mut self) -> Block {
        let common = std::mem::take(self.common_mut());
        *self.common_mut() = common.into_draft();
        if let Some(children) = self.children_mut() {
            *children = std::mem::take(children)
                .into_iter()
                .map(Block::into_draft)
                .collect();
        }
        self
    }

    /// True when no block in the tree carries server-assigned fields.
    pub fn is_draft(&self) -> bool {
        self.iter_tree().all(|block| block.common().is_draft())
    }

    /// Fails on the first unsupported block anywhere in the tree.
    pub fn ensure_writable(&self) -> Result<(), CodecError> {
        match self
            .iter_tree()
            .find(|block| matches!(block, Block::Unsupported(_)))
        {
            Some(block) => Err(CodecError::UnsupportedInDraft {
                block_type: block.wire_tag().to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// Encode a block for a create or append request.
pub fn write_block_value(block: &Block) -> Result<Value, CodecError> {
    block.ensure_writable()?;
    Ok(serde_json::to_value(block.clone().into_draft())?)
}

pub fn write_block(block: &Block) -> Result<String, CodecError> {
    block.ensure_writable()?;
    Ok(serde_json::to_string(&block.clone().into_draft())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::decode_block_value;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn stored_tree() -> Block {
        decode_block_value(json!({
            "id": "root",
            "created_time": "2022-03-01T19:05:00.000Z",
            "last_edited_by": {"object": "user", "id": "u1"},
            "has_children": true,
            "type": "toggle",
            "toggle": {
                "rich_text": [],
                "children": [{
                    "id": "child",
                    "created_by": {"object": "user", "id": "u1"},
                    "type": "quote",
                    "quote": {
                        "rich_text": [],
                        "children": [{
                            "id": "grandchild",
                            "last_edited_time": "2022-03-01T19:05:00.000Z",
                            "type": "divider",
                            "divider": {}
                        }]
                    }
                }]
            }
        }))
        .unwrap()
    }

    #[test]
    fn draft_strips_every_depth() {
        let tree = stored_tree();
        assert!(!tree.is_draft());
        let draft = tree.into_draft();
        assert!(draft.is_draft());
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            json!({
                "has_children": true,
                "type": "toggle",
                "toggle": {
                    "rich_text": [],
                    "children": [{
                        "type": "quote",
                        "quote": {
                            "rich_text": [],
                            "children": [{"type": "divider", "divider": {}}]
                        }
                    }]
                }
            })
        );
    }

    #[test]
    fn write_mode_leaves_input_untouched() {
        let tree = stored_tree();
        let written = write_block_value(&tree).unwrap();
        assert!(written.get("id").is_none());
        assert!(tree.common().id.is_some());
    }

    #[test]
    fn nested_unsupported_blocks_cannot_be_written() {
        let tree = decode_block_value(json!({
            "type": "column",
            "column": {"children": [{"type": "ai_block", "ai_block": {}}]}
        }))
        .unwrap();
        match write_block(&tree).unwrap_err() {
            CodecError::UnsupportedInDraft { block_type } => assert_eq!(block_type, "ai_block"),
            other => panic!("unexpected error: {}", other),
        }
    }
}
