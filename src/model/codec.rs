//! Tagged-union codec for blocks.
//!
//! Wire form: envelope fields at the top level, `"type": "<kind>"` and the
//! payload under `"<kind>"`. Unset envelope fields are omitted.

use super::block::{match_all_blocks, Block, BlockType};
use super::blocks::*;
use super::common::BlockCommon;
use crate::error::CodecError;
use crate::types::tagged::{
    decode_payload, from_str_unbounded, from_value_unbounded, TaggedObject, TYPE_KEY,
};
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Top-level keys owned by the envelope. A kind that shares one of these
/// names never claims it as its payload.
const ENVELOPE_KEYS: [&str; 8] = [
    "id",
    "parent",
    "created_time",
    "created_by",
    "last_edited_time",
    "last_edited_by",
    "has_children",
    "archived",
];

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        serialize_envelope(self.common(), &mut map)?;
        let tag = self.wire_tag();
        map.serialize_entry(TYPE_KEY, tag)?;
        match self {
            Block::Unsupported(UnsupportedBlock { payload: None, .. }) => {}
            block => match_all_blocks!(block, payload => map.serialize_entry(tag, payload)?),
        }
        map.end()
    }
}

/// An unsupported block's payload is whatever raw JSON arrived with it.
impl Serialize for UnsupportedBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.payload.serialize(serializer)
    }
}

fn serialize_envelope<M: SerializeMap>(common: &BlockCommon, map: &mut M) -> Result<(), M::Error> {
    if let Some(id) = &common.id {
        map.serialize_entry("id", id)?;
    }
    if let Some(parent) = &common.parent {
        map.serialize_entry("parent", parent)?;
    }
    if let Some(created_time) = &common.created_time {
        map.serialize_entry("created_time", created_time)?;
    }
    if let Some(created_by) = &common.created_by {
        map.serialize_entry("created_by", created_by)?;
    }
    if let Some(last_edited_time) = &common.last_edited_time {
        map.serialize_entry("last_edited_time", last_edited_time)?;
    }
    if let Some(last_edited_by) = &common.last_edited_by {
        map.serialize_entry("last_edited_by", last_edited_by)?;
    }
    if common.has_children {
        map.serialize_entry("has_children", &true)?;
    }
    if common.archived {
        map.serialize_entry("archived", &true)?;
    }
    Ok(())
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let object = Map::deserialize(deserializer)?;
        block_from_object(object).map_err(D::Error::custom)
    }
}

fn block_from_object(object: Map<String, Value>) -> Result<Block, serde_json::Error> {
    let mut tagged = TaggedObject::split_reserved(object, &ENVELOPE_KEYS)?;
    let common: BlockCommon = serde_json::from_value(tagged.rest_value())?;
    let TaggedObject { kind, payload, .. } = tagged;

    let mut block = match BlockType::from_tag(&kind) {
        Some(block_type) => decode_known(block_type, &kind, payload)?,
        None => Block::Unsupported(UnsupportedBlock {
            common: BlockCommon::default(),
            block_type: kind,
            payload,
        }),
    };
    *block.common_mut() = common;
    Ok(block)
}

fn decode_known(
    block_type: BlockType,
    kind: &str,
    payload: Option<Value>,
) -> Result<Block, serde_json::Error> {
    let block = match block_type {
        BlockType::Paragraph => Block::Paragraph(decode_payload(kind, payload)?),
        BlockType::Heading1 => Block::Heading1(decode_payload(kind, payload)?),
        BlockType::Heading2 => Block::Heading2(decode_payload(kind, payload)?),
        BlockType::Heading3 => Block::Heading3(decode_payload(kind, payload)?),
        BlockType::BulletedListItem => Block::BulletedListItem(decode_payload(kind, payload)?),
        BlockType::NumberedListItem => Block::NumberedListItem(decode_payload(kind, payload)?),
        BlockType::ToDo => Block::ToDo(decode_payload(kind, payload)?),
        BlockType::Toggle => Block::Toggle(decode_payload(kind, payload)?),
        BlockType::ChildPage => Block::ChildPage(decode_payload(kind, payload)?),
        BlockType::ChildDatabase => Block::ChildDatabase(decode_payload(kind, payload)?),
        BlockType::Callout => Block::Callout(decode_payload(kind, payload)?),
        BlockType::Quote => Block::Quote(decode_payload(kind, payload)?),
        BlockType::Code => Block::Code(decode_payload(kind, payload)?),
        BlockType::Embed => Block::Embed(decode_payload(kind, payload)?),
        BlockType::Image => Block::Image(decode_payload(kind, payload)?),
        BlockType::Audio => Block::Audio(decode_payload(kind, payload)?),
        BlockType::Video => Block::Video(decode_payload(kind, payload)?),
        BlockType::File => Block::File(decode_payload(kind, payload)?),
        BlockType::Pdf => Block::Pdf(decode_payload(kind, payload)?),
        BlockType::Bookmark => Block::Bookmark(decode_payload(kind, payload)?),
        BlockType::Equation => Block::Equation(decode_payload(kind, payload)?),
        BlockType::Divider => Block::Divider(decode_payload(kind, payload)?),
        BlockType::TableOfContents => Block::TableOfContents(decode_payload(kind, payload)?),
        BlockType::Breadcrumb => Block::Breadcrumb(decode_payload(kind, payload)?),
        BlockType::ColumnList => Block::ColumnList(decode_payload(kind, payload)?),
        BlockType::Column => Block::Column(decode_payload(kind, payload)?),
        BlockType::Table => Block::Table(decode_payload(kind, payload)?),
        BlockType::TableRow => Block::TableRow(decode_payload(kind, payload)?),
        BlockType::LinkPreview => Block::LinkPreview(decode_payload(kind, payload)?),
        BlockType::LinkToPage => Block::LinkToPage(decode_payload(kind, payload)?),
        BlockType::SyncedBlock => Block::Synced(decode_payload(kind, payload)?),
        BlockType::Template => Block::Template(decode_payload(kind, payload)?),
        BlockType::Unsupported => Block::Unsupported(UnsupportedBlock {
            common: BlockCommon::default(),
            block_type: kind.to_string(),
            payload,
        }),
    };
    Ok(block)
}

/// Decode one block object.
///
/// Nesting depth is bounded only by memory.
pub fn decode_block(json: &str) -> Result<Block, CodecError> {
    Ok(from_str_unbounded(json)?)
}

pub fn decode_block_value(value: Value) -> Result<Block, CodecError> {
    Ok(from_value_unbounded(value)?)
}

/// Encode a block in stored mode: every envelope field that is set is
/// emitted, including the server-assigned ones.
pub fn encode_block(block: &Block) -> Result<String, CodecError> {
    Ok(serde_json::to_string(block)?)
}

pub fn encode_block_value(block: &Block) -> Result<Value, CodecError> {
    Ok(serde_json::to_value(block)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BlockMetadata;
    use crate::types::RichTextItem;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn bare_divider_gains_empty_payload() {
        let block = decode_block(r#"{"type":"divider"}"#).unwrap();
        assert_eq!(block.block_type(), BlockType::Divider);
        assert!(block.id().is_none());
        assert_eq!(encode_block(&block).unwrap(), r#"{"type":"divider","divider":{}}"#);
    }

    #[test]
    fn null_payload_decodes_as_empty() {
        let block = decode_block(r#"{"type":"breadcrumb","breadcrumb":null}"#).unwrap();
        assert_eq!(encode_block(&block).unwrap(), r#"{"type":"breadcrumb","breadcrumb":{}}"#);
    }

    #[test]
    fn to_do_with_id_and_checked() {
        let block =
            decode_block(r#"{"id":"abc","type":"to_do","to_do":{"rich_text":[],"checked":true}}"#)
                .unwrap();
        match &block {
            Block::ToDo(todo) => assert_eq!(todo.checked, Some(true)),
            other => panic!("expected to_do, got {:?}", other),
        }
        assert_eq!(block.id().map(|id| id.as_str()), Some("abc"));
        assert_eq!(
            encode_block(&block).unwrap(),
            r#"{"id":"abc","type":"to_do","to_do":{"rich_text":[],"checked":true}}"#
        );
    }

    #[test]
    fn unknown_kind_is_preserved() {
        let wire = json!({
            "id": "x1",
            "type": "ai_summary",
            "ai_summary": {"model": "v2", "tokens": [1, 2, 3]}
        });
        let block = decode_block_value(wire.clone()).unwrap();
        assert_eq!(block.block_type(), BlockType::Unsupported);
        assert_eq!(block.wire_tag(), "ai_summary");
        assert_eq!(encode_block_value(&block).unwrap(), wire);
    }

    #[test]
    fn unknown_kind_without_payload_stays_without() {
        let block = decode_block(r#"{"type":"unsupported"}"#).unwrap();
        assert_eq!(encode_block(&block).unwrap(), r#"{"type":"unsupported"}"#);
    }

    #[test]
    fn missing_type_is_malformed() {
        let err = decode_block(r#"{"id":"abc","paragraph":{"rich_text":[]}}"#).unwrap_err();
        assert!(matches!(err, CodecError::Malformed(_)));
    }

    #[test]
    fn wrong_payload_shape_is_malformed() {
        assert!(decode_block(r#"{"type":"paragraph","paragraph":[1,2]}"#).is_err());
        assert!(decode_block(r#"{"type":"to_do","to_do":{"checked":"yes"}}"#).is_err());
        assert!(decode_block(r#"[1]"#).is_err());
    }

    #[test]
    fn unrelated_top_level_fields_are_ignored() {
        let block = decode_block(
            r#"{"object":"block","id":"b","type":"paragraph","paragraph":{"rich_text":[]},"in_trash":false}"#,
        )
        .unwrap();
        assert_eq!(
            encode_block(&block).unwrap(),
            r#"{"id":"b","type":"paragraph","paragraph":{"rich_text":[]}}"#
        );
    }

    #[test]
    fn envelope_precedes_type_and_payload() {
        let mut block = Block::paragraph(vec![RichTextItem::text("hi")]);
        block.common_mut().archived = true;
        block.common_mut().has_children = true;
        assert_eq!(
            encode_block(&block).unwrap(),
            r#"{"has_children":true,"archived":true,"type":"paragraph","paragraph":{"rich_text":[{"type":"text","text":{"content":"hi"}}]}}"#
        );
    }

    #[test]
    fn nested_children_decode_recursively() {
        let block = decode_block_value(json!({
            "type": "toggle",
            "toggle": {
                "rich_text": [],
                "children": [{
                    "type": "bulleted_list_item",
                    "bulleted_list_item": {
                        "rich_text": [],
                        "children": [{"type": "divider", "divider": {}}]
                    }
                }]
            }
        }))
        .unwrap();
        assert_eq!(block.children().len(), 1);
        assert_eq!(
            block.children()[0].children()[0].block_type(),
            BlockType::Divider
        );
    }

    #[test]
    fn kind_named_like_an_envelope_key_keeps_the_envelope() {
        let wire = r#"{"id":"abc","archived":true,"type":"id"}"#;
        let block = decode_block(wire).unwrap();
        assert_eq!(block.id().map(|id| id.as_str()), Some("abc"));
        assert_eq!(block.wire_tag(), "id");
        assert_eq!(encode_block(&block).unwrap(), wire);
    }

    #[test]
    fn deep_toggle_chain_survives_the_round_trip() {
        let depth = 100;
        let mut wire = json!({"type": "divider", "divider": {}});
        for _ in 0..depth {
            wire = json!({"type": "toggle", "toggle": {"rich_text": [], "children": [wire]}});
        }
        let text = wire.to_string();

        let block = decode_block(&text).unwrap();
        let mut levels = 0;
        let mut cursor = &block;
        while let Some(child) = cursor.children().first() {
            cursor = child;
            levels += 1;
        }
        assert_eq!(levels, depth);
        assert_eq!(cursor.block_type(), BlockType::Divider);
        assert_eq!(encode_block(&block).unwrap(), text);
    }

    #[test]
    fn nested_errors_name_the_enclosing_kind() {
        let err = decode_block_value(json!({
            "type": "toggle",
            "toggle": {"rich_text": [], "children": [{"toggle": {}}]}
        }))
        .unwrap_err();
        assert!(err.to_string().contains("toggle"));
    }
}
