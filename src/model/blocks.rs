//! Payload records, one per block kind.
//!
//! Each record's serde derive describes exactly the object found under the
//! kind key on the wire (`"paragraph": {...}`). The envelope lives in
//! `common` and is (de)serialized at the top level by the block codec.
//!
//! Records are closed: a field the record does not declare is dropped on
//! decode, so a known kind re-encodes only its declared fields. Whole
//! unknown kinds are kept verbatim by `UnsupportedBlock` instead.

use super::common::{BlockCommon, BlockMetadata};
use super::media::{FileObject, Icon};
use super::{Block, LinkTarget};
use crate::types::{BlockId, Color, PageId, DatabaseId, RichTextItem};
use serde::{Deserialize, Serialize};

/// Text content shared by paragraph-like blocks.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextBlockContent {
    #[serde(default)]
    pub rich_text: Vec<RichTextItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl TextBlockContent {
    pub fn new(rich_text: Vec<RichTextItem>) -> Self {
        Self {
            rich_text,
            ..Self::default()
        }
    }

    /// Concatenated plain text of all spans.
    pub fn plain_text(&self) -> String {
        self.rich_text.iter().map(|item| item.display_text()).collect()
    }
}

/// Paragraph block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParagraphBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(flatten)]
    pub content: TextBlockContent,
}

/// Heading 1 block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Heading1Block {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(flatten)]
    pub content: TextBlockContent,
    #[serde(default)]
    pub is_toggleable: bool,
}

/// Heading 2 block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Heading2Block {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(flatten)]
    pub content: TextBlockContent,
    #[serde(default)]
    pub is_toggleable: bool,
}

/// Heading 3 block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Heading3Block {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(flatten)]
    pub content: TextBlockContent,
    #[serde(default)]
    pub is_toggleable: bool,
}

/// Bulleted list item block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BulletedListItemBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(flatten)]
    pub content: TextBlockContent,
}

/// Numbered list item block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NumberedListItemBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(flatten)]
    pub content: TextBlockContent,
}

/// Toggle block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ToggleBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(flatten)]
    pub content: TextBlockContent,
}

/// To-do block
///
/// `checked` is tri-state: `None` (omitted) and `Some(false)` are distinct.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ToDoBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(flatten)]
    pub content: TextBlockContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
}

/// Quote block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuoteBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(flatten)]
    pub content: TextBlockContent,
}

/// Callout block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CalloutBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    #[serde(flatten)]
    pub content: TextBlockContent,
}

/// Code block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CodeBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(default)]
    pub rich_text: Vec<RichTextItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub caption: Vec<RichTextItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Equation block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EquationBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(default)]
    pub expression: String,
}

/// Divider block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DividerBlock {
    #[serde(skip)]
    pub common: BlockCommon,
}

/// Breadcrumb block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BreadcrumbBlock {
    #[serde(skip)]
    pub common: BlockCommon,
}

/// Table of contents block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableOfContentsBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

/// Image block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(flatten)]
    pub image: FileObject,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub caption: Vec<RichTextItem>,
}

/// Audio block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(flatten)]
    pub audio: FileObject,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub caption: Vec<RichTextItem>,
}

/// Video block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(flatten)]
    pub video: FileObject,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub caption: Vec<RichTextItem>,
}

/// File block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(flatten)]
    pub file: FileObject,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub caption: Vec<RichTextItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// PDF block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(flatten)]
    pub pdf: FileObject,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub caption: Vec<RichTextItem>,
}

/// Bookmark block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BookmarkBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub caption: Vec<RichTextItem>,
}

/// Embed block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EmbedBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub caption: Vec<RichTextItem>,
}

/// Child page block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChildPageBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(default)]
    pub title: String,
}

impl ChildPageBlock {
    /// The embedded page shares the block's ID.
    pub fn page_id(&self) -> Option<PageId> {
        self.common.id.as_ref().map(BlockId::retag)
    }
}

/// Child database block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChildDatabaseBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(default)]
    pub title: String,
}

impl ChildDatabaseBlock {
    /// The embedded database shares the block's ID.
    pub fn database_id(&self) -> Option<DatabaseId> {
        self.common.id.as_ref().map(BlockId::retag)
    }
}

/// Link to page block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkToPageBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(flatten)]
    pub target: LinkTarget,
}

/// Table block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(default)]
    pub table_width: usize,
    #[serde(default)]
    pub has_column_header: bool,
    #[serde(default)]
    pub has_row_header: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

/// Table row block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableRowBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(default)]
    pub cells: Vec<Vec<RichTextItem>>,
}

/// Column list block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColumnListBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

/// Column block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColumnBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

/// Synced block
///
/// An original synced block has no `synced_from`; a duplicate points at its
/// original. The field is always emitted, as `null` for originals.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SyncedBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(default)]
    pub synced_from: Option<SyncedFrom>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

impl SyncedBlock {
    pub fn is_original(&self) -> bool {
        self.synced_from.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SyncedFrom {
    BlockId { block_id: BlockId },
}

/// Template block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TemplateBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(flatten)]
    pub content: TextBlockContent,
}

/// Link preview block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LinkPreviewBlock {
    #[serde(skip)]
    pub common: BlockCommon,
    #[serde(default)]
    pub url: String,
}

/// A block whose kind this crate does not know.
///
/// The original tag and raw payload are kept so the block re-encodes
/// unchanged. Such blocks are read-only.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnsupportedBlock {
    pub common: BlockCommon,
    pub block_type: String,
    pub payload: Option<serde_json::Value>,
}

macro_rules! impl_block_metadata {
    ($($record:ty),+ $(,)?) => {
        $(
            impl BlockMetadata for $record {
                fn common(&self) -> &BlockCommon {
                    &self.common
                }
            }
        )+
    };
}

impl_block_metadata!(
    ParagraphBlock,
    Heading1Block,
    Heading2Block,
    Heading3Block,
    BulletedListItemBlock,
    NumberedListItemBlock,
    ToggleBlock,
    ToDoBlock,
    QuoteBlock,
    CalloutBlock,
    CodeBlock,
    EquationBlock,
    DividerBlock,
    BreadcrumbBlock,
    TableOfContentsBlock,
    ImageBlock,
    AudioBlock,
    VideoBlock,
    FileBlock,
    PdfBlock,
    BookmarkBlock,
    EmbedBlock,
    ChildPageBlock,
    ChildDatabaseBlock,
    LinkToPageBlock,
    TableBlock,
    TableRowBlock,
    ColumnListBlock,
    ColumnBlock,
    SyncedBlock,
    TemplateBlock,
    LinkPreviewBlock,
    UnsupportedBlock,
);
