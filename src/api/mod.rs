// src/api/mod.rs
//! The codec's boundary with the transport layer.
//!
//! Nothing here performs I/O. Response bodies come in as strings or JSON
//! values, request bodies and query parameters go out the same way.

mod pagination;
pub mod parser;
mod requests;
mod responses;

pub use pagination::{fetch_all_pages, PaginationResult};
pub use parser::{parse_block, parse_block_children, parse_block_children_value};
pub use requests::{
    encode_append_children, encode_append_children_value, AppendBlockChildren, PaginationQuery,
};
pub use responses::{ApiErrorBody, BlockChildren, Cursor, PaginatedResponse};
