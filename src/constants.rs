// src/constants.rs
//! Domain constants that define the operational boundaries of the codec.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// The most objects the Notion API returns per page of results.
///
/// Also the default when `page_size` is absent from a listing request.
pub const NOTION_API_PAGE_SIZE_MAX: u32 = 100;

/// The most children a single append request may carry.
pub const NOTION_API_APPEND_CHILDREN_MAX: usize = 100;

/// Object tag of listing responses.
pub const LIST_OBJECT: &str = "list";

/// Object tag of error bodies.
pub const ERROR_OBJECT: &str = "error";

// ---------------------------------------------------------------------------
// CLI boundaries
// ---------------------------------------------------------------------------

/// Input path meaning "read from standard input".
pub const STDIN_PATH: &str = "-";

/// Log line layout for the console appender.
pub const LOG_PATTERN: &str = "{d(%H:%M:%S)} {h({l:<5})} {t} - {m}{n}";

/// Log file written under the system temp directory.
pub const LOG_FILE_NAME: &str = "notion_blocks.log";
