// src/lib.rs
//! notion-blocks library: a lossless codec for Notion's content-block tree.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `CodecError`, `ValidationError`, `NotionErrorCode`
//! - **Domain model**: `Block` and its payload records, `BlockCommon`,
//!   the `BlockMetadata` capability trait, `Parent`
//! - **Domain types**: `BlockId`, `PageId`, `RichTextItem`, `Color`,
//!   `Timestamp`, etc.
//! - **API boundary**: listing/retrieval parsers, append request encoding,
//!   pagination queries
//!
//! The library performs no I/O and never logs.

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod types;

// --- Error Handling ---
pub use crate::error::{CodecError, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Domain Model ---
pub use crate::model::{
    decode_block, decode_block_value, encode_block, encode_block_value, write_block,
    write_block_value, Block, BlockCommon, BlockMetadata, BlockType, CustomEmoji, ExternalFile,
    FileObject, Icon, LinkTarget, NotionFile, Parent,
};

// --- Block Types ---
pub use crate::model::blocks::{
    AudioBlock, BookmarkBlock, BreadcrumbBlock, BulletedListItemBlock, CalloutBlock,
    ChildDatabaseBlock, ChildPageBlock, CodeBlock, ColumnBlock, ColumnListBlock, DividerBlock,
    EmbedBlock, EquationBlock, FileBlock, Heading1Block, Heading2Block, Heading3Block,
    ImageBlock, LinkPreviewBlock, LinkToPageBlock, NumberedListItemBlock, ParagraphBlock,
    PdfBlock, QuoteBlock, SyncedBlock, SyncedFrom, TableBlock, TableOfContentsBlock,
    TableRowBlock, TemplateBlock, TextBlockContent, ToDoBlock, ToggleBlock, UnsupportedBlock,
    VideoBlock,
};

// --- Domain Types ---
pub use crate::types::{
    Annotations, BlockId, Color, DatabaseId, DateValue, EquationData, Link, Mention, PageId,
    PageSize, PartialUser, RichTextItem, RichTextType, Timestamp, UserId,
};

// --- API Boundary ---
pub use crate::api::{
    encode_append_children, encode_append_children_value, fetch_all_pages, parse_block,
    parse_block_children, parse_block_children_value, AppendBlockChildren, BlockChildren, Cursor,
    PaginatedResponse, PaginationQuery,
};
