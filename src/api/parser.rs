// src/api/parser.rs
//! Decoding of retrieval and listing bodies.
//!
//! The transport hands over the raw body; error objects are recognized and
//! mapped before any block decoding happens.

use super::responses::{ApiErrorBody, BlockChildren, PaginatedResponse};
use crate::constants::ERROR_OBJECT;
use crate::error::{CodecError, NotionErrorCode};
use crate::model::Block;
use crate::types::tagged::{from_str_unbounded, from_value_unbounded};
use serde::Deserialize;
use serde_json::Value;

/// Decode a block-children listing.
///
/// Results keep server order. An element that fails to decode fails the
/// whole page with its index; unknown kinds are not failures.
pub fn parse_block_children(body: &str) -> Result<BlockChildren, CodecError> {
    let value: Value = from_str_unbounded(body)?;
    parse_block_children_value(value)
}

pub fn parse_block_children_value(value: Value) -> Result<BlockChildren, CodecError> {
    reject_error_object(&value)?;
    let raw: PaginatedResponse<Value> = from_value_unbounded(value)?;
    decode_listing(raw)
}

/// Decode a single-block retrieval response.
pub fn parse_block(body: &str) -> Result<Block, CodecError> {
    let value: Value = from_str_unbounded(body)?;
    reject_error_object(&value)?;
    Ok(from_value_unbounded(value)?)
}

fn decode_listing(raw: PaginatedResponse<Value>) -> Result<BlockChildren, CodecError> {
    let results = raw
        .results
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            from_value_unbounded::<Block>(element)
                .map_err(|source| CodecError::InvalidElement { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PaginatedResponse {
        object: raw.object,
        results,
        next_cursor: raw.next_cursor,
        has_more: raw.has_more,
    })
}

fn reject_error_object(value: &Value) -> Result<(), CodecError> {
    if value.get("object").and_then(Value::as_str) != Some(ERROR_OBJECT) {
        return Ok(());
    }
    let body = ApiErrorBody::deserialize(value)?;
    Err(CodecError::Api {
        code: NotionErrorCode::from_api_response(&body.code),
        status: body.status,
        message: body.message,
    })
}
