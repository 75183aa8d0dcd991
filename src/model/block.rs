use super::blocks::*;
use super::common::{BlockCommon, BlockMetadata};
use super::media::FileObject;
use super::LinkTarget;
use crate::types::{RichTextItem, ValidationError};
use std::fmt;

/// Macro to reduce boilerplate in Block enum methods
macro_rules! match_all_blocks {
    ($self:expr, $pattern:pat => $result:expr) => {
        match $self {
            Block::Paragraph($pattern) => $result,
            Block::Heading1($pattern) => $result,
            Block::Heading2($pattern) => $result,
            Block::Heading3($pattern) => $result,
            Block::BulletedListItem($pattern) => $result,
            Block::NumberedListItem($pattern) => $result,
            Block::ToDo($pattern) => $result,
            Block::Toggle($pattern) => $result,
            Block::Quote($pattern) => $result,
            Block::Callout($pattern) => $result,
            Block::Code($pattern) => $result,
            Block::Equation($pattern) => $result,
            Block::Divider($pattern) => $result,
            Block::Breadcrumb($pattern) => $result,
            Block::TableOfContents($pattern) => $result,
            Block::Image($pattern) => $result,
            Block::Audio($pattern) => $result,
            Block::Video($pattern) => $result,
            Block::File($pattern) => $result,
            Block::Pdf($pattern) => $result,
            Block::Bookmark($pattern) => $result,
            Block::Embed($pattern) => $result,
            Block::ChildPage($pattern) => $result,
            Block::ChildDatabase($pattern) => $result,
            Block::LinkToPage($pattern) => $result,
            Block::Table($pattern) => $result,
            Block::TableRow($pattern) => $result,
            Block::ColumnList($pattern) => $result,
            Block::Column($pattern) => $result,
            Block::Synced($pattern) => $result,
            Block::Template($pattern) => $result,
            Block::LinkPreview($pattern) => $result,
            Block::Unsupported($pattern) => $result,
        }
    };
}

pub(crate) use match_all_blocks;

/// Block represents all possible Notion block types
///
/// Exactly one payload exists per block; the enum makes a block with two
/// (or zero) payloads unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(ParagraphBlock),
    Heading1(Heading1Block),
    Heading2(Heading2Block),
    Heading3(Heading3Block),
    BulletedListItem(BulletedListItemBlock),
    NumberedListItem(NumberedListItemBlock),
    ToDo(ToDoBlock),
    Toggle(ToggleBlock),
    Quote(QuoteBlock),
    Callout(CalloutBlock),
    Code(CodeBlock),
    Equation(EquationBlock),
    Divider(DividerBlock),
    Breadcrumb(BreadcrumbBlock),
    TableOfContents(TableOfContentsBlock),
    Image(ImageBlock),
    Audio(AudioBlock),
    Video(VideoBlock),
    File(FileBlock),
    Pdf(PdfBlock),
    Bookmark(BookmarkBlock),
    Embed(EmbedBlock),
    ChildPage(ChildPageBlock),
    ChildDatabase(ChildDatabaseBlock),
    LinkToPage(LinkToPageBlock),
    Table(TableBlock),
    TableRow(TableRowBlock),
    ColumnList(ColumnListBlock),
    Column(ColumnBlock),
    Synced(SyncedBlock),
    Template(TemplateBlock),
    LinkPreview(LinkPreviewBlock),
    Unsupported(UnsupportedBlock),
}

/// The closed set of block kinds, keyed by their wire tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlockType {
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    BulletedListItem,
    NumberedListItem,
    ToDo,
    Toggle,
    ChildPage,
    ChildDatabase,
    Callout,
    Quote,
    Code,
    Embed,
    Image,
    Audio,
    Video,
    File,
    Pdf,
    Bookmark,
    Equation,
    Divider,
    TableOfContents,
    Breadcrumb,
    ColumnList,
    Column,
    Table,
    TableRow,
    LinkPreview,
    LinkToPage,
    SyncedBlock,
    Template,
    Unsupported,
}

impl BlockType {
    /// Every kind with a dedicated payload record.
    pub const KNOWN: [BlockType; 32] = [
        BlockType::Paragraph,
        BlockType::Heading1,
        BlockType::Heading2,
        BlockType::Heading3,
        BlockType::BulletedListItem,
        BlockType::NumberedListItem,
        BlockType::ToDo,
        BlockType::Toggle,
        BlockType::ChildPage,
        BlockType::ChildDatabase,
        BlockType::Callout,
        BlockType::Quote,
        BlockType::Code,
        BlockType::Embed,
        BlockType::Image,
        BlockType::Audio,
        BlockType::Video,
        BlockType::File,
        BlockType::Pdf,
        BlockType::Bookmark,
        BlockType::Equation,
        BlockType::Divider,
        BlockType::TableOfContents,
        BlockType::Breadcrumb,
        BlockType::ColumnList,
        BlockType::Column,
        BlockType::Table,
        BlockType::TableRow,
        BlockType::LinkPreview,
        BlockType::LinkToPage,
        BlockType::SyncedBlock,
        BlockType::Template,
    ];

    /// Look up a known kind by wire tag. Unknown tags, including the
    /// server's own `"unsupported"`, yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let block_type = match tag {
            "paragraph" => BlockType::Paragraph,
            "heading_1" => BlockType::Heading1,
            "heading_2" => BlockType::Heading2,
            "heading_3" => BlockType::Heading3,
            "bulleted_list_item" => BlockType::BulletedListItem,
            "numbered_list_item" => BlockType::NumberedListItem,
            "to_do" => BlockType::ToDo,
            "toggle" => BlockType::Toggle,
            "child_page" => BlockType::ChildPage,
            "child_database" => BlockType::ChildDatabase,
            "callout" => BlockType::Callout,
            "quote" => BlockType::Quote,
            "code" => BlockType::Code,
            "embed" => BlockType::Embed,
            "image" => BlockType::Image,
            "audio" => BlockType::Audio,
            "video" => BlockType::Video,
            "file" => BlockType::File,
            "pdf" => BlockType::Pdf,
            "bookmark" => BlockType::Bookmark,
            "equation" => BlockType::Equation,
            "divider" => BlockType::Divider,
            "table_of_contents" => BlockType::TableOfContents,
            "breadcrumb" => BlockType::Breadcrumb,
            "column_list" => BlockType::ColumnList,
            "column" => BlockType::Column,
            "table" => BlockType::Table,
            "table_row" => BlockType::TableRow,
            "link_preview" => BlockType::LinkPreview,
            "link_to_page" => BlockType::LinkToPage,
            "synced_block" => BlockType::SyncedBlock,
            "template" => BlockType::Template,
            _ => return None,
        };
        Some(block_type)
    }

    /// Get block type name
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Paragraph => "paragraph",
            BlockType::Heading1 => "heading_1",
            BlockType::Heading2 => "heading_2",
            BlockType::Heading3 => "heading_3",
            BlockType::BulletedListItem => "bulleted_list_item",
            BlockType::NumberedListItem => "numbered_list_item",
            BlockType::ToDo => "to_do",
            BlockType::Toggle => "toggle",
            BlockType::ChildPage => "child_page",
            BlockType::ChildDatabase => "child_database",
            BlockType::Callout => "callout",
            BlockType::Quote => "quote",
            BlockType::Code => "code",
            BlockType::Embed => "embed",
            BlockType::Image => "image",
            BlockType::Audio => "audio",
            BlockType::Video => "video",
            BlockType::File => "file",
            BlockType::Pdf => "pdf",
            BlockType::Bookmark => "bookmark",
            BlockType::Equation => "equation",
            BlockType::Divider => "divider",
            BlockType::TableOfContents => "table_of_contents",
            BlockType::Breadcrumb => "breadcrumb",
            BlockType::ColumnList => "column_list",
            BlockType::Column => "column",
            BlockType::Table => "table",
            BlockType::TableRow => "table_row",
            BlockType::LinkPreview => "link_preview",
            BlockType::LinkToPage => "link_to_page",
            BlockType::SyncedBlock => "synced_block",
            BlockType::Template => "template",
            BlockType::Unsupported => "unsupported",
        }
    }

    /// Whether payloads of this kind can nest child blocks.
    pub fn can_have_children(&self) -> bool {
        matches!(
            self,
            BlockType::Paragraph
                | BlockType::Heading1
                | BlockType::Heading2
                | BlockType::Heading3
                | BlockType::BulletedListItem
                | BlockType::NumberedListItem
                | BlockType::ToDo
                | BlockType::Toggle
                | BlockType::Callout
                | BlockType::Quote
                | BlockType::ColumnList
                | BlockType::Column
                | BlockType::Table
                | BlockType::SyncedBlock
                | BlockType::Template
        )
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Block {
    /// Get common block data
    pub fn common(&self) -> &BlockCommon {
        match_all_blocks!(self, b => &b.common)
    }

    /// Get mutable common block data
    pub fn common_mut(&mut self) -> &mut BlockCommon {
        match_all_blocks!(self, b => &mut b.common)
    }

    pub fn block_type(&self) -> BlockType {
        match self {
            Block::Paragraph(_) => BlockType::Paragraph,
            Block::Heading1(_) => BlockType::Heading1,
            Block::Heading2(_) => BlockType::Heading2,
            Block::Heading3(_) => BlockType::Heading3,
            Block::BulletedListItem(_) => BlockType::BulletedListItem,
            Block::NumberedListItem(_) => BlockType::NumberedListItem,
            Block::ToDo(_) => BlockType::ToDo,
            Block::Toggle(_) => BlockType::Toggle,
            Block::Quote(_) => BlockType::Quote,
            Block::Callout(_) => BlockType::Callout,
            Block::Code(_) => BlockType::Code,
            Block::Equation(_) => BlockType::Equation,
            Block::Divider(_) => BlockType::Divider,
            Block::Breadcrumb(_) => BlockType::Breadcrumb,
            Block::TableOfContents(_) => BlockType::TableOfContents,
            Block::Image(_) => BlockType::Image,
            Block::Audio(_) => BlockType::Audio,
            Block::Video(_) => BlockType::Video,
            Block::File(_) => BlockType::File,
            Block::Pdf(_) => BlockType::Pdf,
            Block::Bookmark(_) => BlockType::Bookmark,
            Block::Embed(_) => BlockType::Embed,
            Block::ChildPage(_) => BlockType::ChildPage,
            Block::ChildDatabase(_) => BlockType::ChildDatabase,
            Block::LinkToPage(_) => BlockType::LinkToPage,
            Block::Table(_) => BlockType::Table,
            Block::TableRow(_) => BlockType::TableRow,
            Block::ColumnList(_) => BlockType::ColumnList,
            Block::Column(_) => BlockType::Column,
            Block::Synced(_) => BlockType::SyncedBlock,
            Block::Template(_) => BlockType::Template,
            Block::LinkPreview(_) => BlockType::LinkPreview,
            Block::Unsupported(_) => BlockType::Unsupported,
        }
    }

    /// The tag this block carries on the wire. Unsupported blocks keep the
    /// tag they were decoded with.
    pub fn wire_tag(&self) -> &str {
        match self {
            Block::Unsupported(b) => &b.block_type,
            other => other.block_type().as_str(),
        }
    }

    /// Get the block's children, in document order.
    pub fn children(&self) -> &[Block] {
        match self {
            Block::Paragraph(b) => &b.content.children,
            Block::Heading1(b) => &b.content.children,
            Block::Heading2(b) => &b.content.children,
            Block::Heading3(b) => &b.content.children,
            Block::BulletedListItem(b) => &b.content.children,
            Block::NumberedListItem(b) => &b.content.children,
            Block::ToDo(b) => &b.content.children,
            Block::Toggle(b) => &b.content.children,
            Block::Quote(b) => &b.content.children,
            Block::Callout(b) => &b.content.children,
            Block::Template(b) => &b.content.children,
            Block::ColumnList(b) => &b.children,
            Block::Column(b) => &b.children,
            Block::Table(b) => &b.children,
            Block::Synced(b) => &b.children,
            _ => &[],
        }
    }

    /// Get mutable reference to children, for kinds that can nest.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Block>> {
        let children = match self {
            Block::Paragraph(b) => &mut b.content.children,
            Block::Heading1(b) => &mut b.content.children,
            Block::Heading2(b) => &mut b.content.children,
            Block::Heading3(b) => &mut b.content.children,
            Block::BulletedListItem(b) => &mut b.content.children,
            Block::NumberedListItem(b) => &mut b.content.children,
            Block::ToDo(b) => &mut b.content.children,
            Block::Toggle(b) => &mut b.content.children,
            Block::Quote(b) => &mut b.content.children,
            Block::Callout(b) => &mut b.content.children,
            Block::Template(b) => &mut b.content.children,
            Block::ColumnList(b) => &mut b.children,
            Block::Column(b) => &mut b.children,
            Block::Table(b) => &mut b.children,
            Block::Synced(b) => &mut b.children,
            _ => return None,
        };
        Some(children)
    }

    /// Replace the children of a nesting block. Kinds that cannot nest are
    /// returned unchanged.
    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        if let Some(slot) = self.children_mut() {
            *slot = children;
        }
        self
    }

    /// Depth-first, pre-order walk over this block and all descendants.
    pub fn iter_tree(&self) -> TreeIter<'_> {
        TreeIter { stack: vec![self] }
    }

    /// Rich text of text-bearing blocks.
    pub fn rich_text(&self) -> Option<&[RichTextItem]> {
        match self {
            Block::Paragraph(b) => Some(b.content.rich_text.as_slice()),
            Block::Heading1(b) => Some(b.content.rich_text.as_slice()),
            Block::Heading2(b) => Some(b.content.rich_text.as_slice()),
            Block::Heading3(b) => Some(b.content.rich_text.as_slice()),
            Block::BulletedListItem(b) => Some(b.content.rich_text.as_slice()),
            Block::NumberedListItem(b) => Some(b.content.rich_text.as_slice()),
            Block::ToDo(b) => Some(b.content.rich_text.as_slice()),
            Block::Toggle(b) => Some(b.content.rich_text.as_slice()),
            Block::Quote(b) => Some(b.content.rich_text.as_slice()),
            Block::Callout(b) => Some(b.content.rich_text.as_slice()),
            Block::Template(b) => Some(b.content.rich_text.as_slice()),
            Block::Code(b) => Some(b.rich_text.as_slice()),
            _ => None,
        }
    }

    // Constructors for locally built (draft) blocks.

    pub fn paragraph(rich_text: Vec<RichTextItem>) -> Self {
        Block::Paragraph(ParagraphBlock {
            content: TextBlockContent::new(rich_text),
            ..ParagraphBlock::default()
        })
    }

    /// A heading of level 1, 2 or 3; other levels clamp into that range.
    pub fn heading(level: u8, rich_text: Vec<RichTextItem>) -> Self {
        let content = TextBlockContent::new(rich_text);
        match level {
            0 | 1 => Block::Heading1(Heading1Block {
                content,
                ..Heading1Block::default()
            }),
            2 => Block::Heading2(Heading2Block {
                content,
                ..Heading2Block::default()
            }),
            _ => Block::Heading3(Heading3Block {
                content,
                ..Heading3Block::default()
            }),
        }
    }

    pub fn bulleted_list_item(rich_text: Vec<RichTextItem>) -> Self {
        Block::BulletedListItem(BulletedListItemBlock {
            content: TextBlockContent::new(rich_text),
            ..BulletedListItemBlock::default()
        })
    }

    pub fn numbered_list_item(rich_text: Vec<RichTextItem>) -> Self {
        Block::NumberedListItem(NumberedListItemBlock {
            content: TextBlockContent::new(rich_text),
            ..NumberedListItemBlock::default()
        })
    }

    pub fn to_do(rich_text: Vec<RichTextItem>, checked: Option<bool>) -> Self {
        Block::ToDo(ToDoBlock {
            content: TextBlockContent::new(rich_text),
            checked,
            ..ToDoBlock::default()
        })
    }

    pub fn toggle(rich_text: Vec<RichTextItem>) -> Self {
        Block::Toggle(ToggleBlock {
            content: TextBlockContent::new(rich_text),
            ..ToggleBlock::default()
        })
    }

    pub fn quote(rich_text: Vec<RichTextItem>) -> Self {
        Block::Quote(QuoteBlock {
            content: TextBlockContent::new(rich_text),
            ..QuoteBlock::default()
        })
    }

    pub fn callout(icon: Option<super::Icon>, rich_text: Vec<RichTextItem>) -> Self {
        Block::Callout(CalloutBlock {
            icon,
            content: TextBlockContent::new(rich_text),
            ..CalloutBlock::default()
        })
    }

    pub fn code(language: impl Into<String>, source: impl Into<String>) -> Self {
        Block::Code(CodeBlock {
            rich_text: vec![RichTextItem::text(source)],
            language: Some(language.into()),
            ..CodeBlock::default()
        })
    }

    pub fn equation(expression: impl Into<String>) -> Self {
        Block::Equation(EquationBlock {
            expression: expression.into(),
            ..EquationBlock::default()
        })
    }

    pub fn divider() -> Self {
        Block::Divider(DividerBlock::default())
    }

    pub fn breadcrumb() -> Self {
        Block::Breadcrumb(BreadcrumbBlock::default())
    }

    pub fn table_of_contents() -> Self {
        Block::TableOfContents(TableOfContentsBlock::default())
    }

    pub fn bookmark(url: impl Into<String>) -> Self {
        Block::Bookmark(BookmarkBlock {
            url: url.into(),
            ..BookmarkBlock::default()
        })
    }

    pub fn embed(url: impl Into<String>) -> Self {
        Block::Embed(EmbedBlock {
            url: url.into(),
            ..EmbedBlock::default()
        })
    }

    /// An image linked from an external `http(s)` URL.
    pub fn image(url: &str) -> Result<Self, ValidationError> {
        Ok(Block::Image(ImageBlock {
            common: BlockCommon::default(),
            image: FileObject::external(url)?,
            caption: Vec::new(),
        }))
    }

    pub fn link_to_page(target: LinkTarget) -> Self {
        Block::LinkToPage(LinkToPageBlock {
            common: BlockCommon::default(),
            target,
        })
    }

    /// A table whose width is taken from the first row.
    pub fn table(rows: Vec<Vec<Vec<RichTextItem>>>, has_column_header: bool) -> Self {
        let table_width = rows.first().map(Vec::len).unwrap_or(0);
        let children = rows
            .into_iter()
            .map(|cells| {
                Block::TableRow(TableRowBlock {
                    cells,
                    ..TableRowBlock::default()
                })
            })
            .collect();
        Block::Table(TableBlock {
            table_width,
            has_column_header,
            children,
            ..TableBlock::default()
        })
    }

    pub fn column_list(columns: Vec<Vec<Block>>) -> Self {
        let children = columns
            .into_iter()
            .map(|children| {
                Block::Column(ColumnBlock {
                    children,
                    ..ColumnBlock::default()
                })
            })
            .collect();
        Block::ColumnList(ColumnListBlock {
            children,
            ..ColumnListBlock::default()
        })
    }
}

impl BlockMetadata for Block {
    fn common(&self) -> &BlockCommon {
        Block::common(self)
    }
}

/// Pre-order iterator returned by [`Block::iter_tree`].
pub struct TreeIter<'a> {
    stack: Vec<&'a Block>,
}

impl<'a> Iterator for TreeIter<'a> {
    type Item = &'a Block;

    fn next(&mut self) -> Option<Self::Item> {
        let block = self.stack.pop()?;
        self.stack.extend(block.children().iter().rev());
        Some(block)
    }
}

macro_rules! impl_from_record {
    ($($variant:ident($record:ty)),+ $(,)?) => {
        $(
            impl From<$record> for Block {
                fn from(block: $record) -> Self {
                    Block::$variant(block)
                }
            }
        )+
    };
}

impl_from_record!(
    Paragraph(ParagraphBlock),
    Heading1(Heading1Block),
    Heading2(Heading2Block),
    Heading3(Heading3Block),
    BulletedListItem(BulletedListItemBlock),
    NumberedListItem(NumberedListItemBlock),
    ToDo(ToDoBlock),
    Toggle(ToggleBlock),
    Quote(QuoteBlock),
    Callout(CalloutBlock),
    Code(CodeBlock),
    Equation(EquationBlock),
    Divider(DividerBlock),
    Breadcrumb(BreadcrumbBlock),
    TableOfContents(TableOfContentsBlock),
    Image(ImageBlock),
    Audio(AudioBlock),
    Video(VideoBlock),
    File(FileBlock),
    Pdf(PdfBlock),
    Bookmark(BookmarkBlock),
    Embed(EmbedBlock),
    ChildPage(ChildPageBlock),
    ChildDatabase(ChildDatabaseBlock),
    LinkToPage(LinkToPageBlock),
    Table(TableBlock),
    TableRow(TableRowBlock),
    ColumnList(ColumnListBlock),
    Column(ColumnBlock),
    Synced(SyncedBlock),
    Template(TemplateBlock),
    LinkPreview(LinkPreviewBlock),
    Unsupported(UnsupportedBlock),
);
