// tests/pagination.rs
//! Listing decoding and cursor following over a recorded response page.

use notion_blocks::{
    fetch_all_pages, parse_block_children, parse_block_children_value, Block, BlockMetadata,
    BlockType, CodecError, Cursor, Mention, NotionErrorCode, PageSize, PaginatedResponse,
    PaginationQuery, RichTextType,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

const LISTING: &str = include_str!("fixtures/block_children.json");

#[test]
fn fixture_page_decodes_in_server_order() {
    let page = parse_block_children(LISTING).unwrap();

    let kinds: Vec<&str> = page.results.iter().map(Block::wire_tag).collect();
    assert_eq!(
        kinds,
        vec!["heading_2", "toggle", "to_do", "image", "ai_block", "divider"]
    );
    assert!(page.has_more);
    assert_eq!(
        page.next_cursor,
        Some(Cursor::new("1a2b3c4d-5e6f-4a7b-8c9d-0e1f2a3b4c5e"))
    );
    assert_eq!(page.object, "list");
}

#[test]
fn fixture_envelopes_are_populated() {
    let page = parse_block_children(LISTING).unwrap();
    let heading = &page.results[0];

    assert_eq!(
        heading.id().map(|id| id.as_str()),
        Some("c02fc1d3-db8b-45c5-a222-27595b15aea7")
    );
    assert_eq!(
        heading.created_time().map(|t| t.to_wire()),
        Some("2022-03-01T19:05:00.000Z".to_string())
    );
    assert_eq!(
        heading.parent().and_then(|p| p.id()),
        Some("59833787-2cf9-4fdf-8782-e53db20768a5")
    );
    assert!(!heading.has_children());
    assert!(page.results[1].has_children());
}

#[test]
fn fixture_nested_children_decode() {
    let page = parse_block_children(LISTING).unwrap();
    let toggle = &page.results[1];

    let nested = toggle.children();
    assert_eq!(nested.len(), 1);
    let span = &nested[0].rich_text().unwrap()[0];
    match &span.text_type {
        RichTextType::Mention(Mention::Page(page_ref)) => {
            assert_eq!(page_ref.id.as_str(), "3c357473-a281-49a4-88c0-10d2b245a589")
        }
        other => panic!("expected page mention, got {:?}", other),
    }
    assert_eq!(span.plain_text, "Roadmap");
}

#[test]
fn fixture_unknown_kind_keeps_payload() {
    let page = parse_block_children(LISTING).unwrap();
    let unknown = &page.results[4];

    assert_eq!(unknown.block_type(), BlockType::Unsupported);
    let encoded = serde_json::to_value(unknown).unwrap();
    assert_eq!(encoded["ai_block"], json!({"prompt": "Summarize this page"}));
}

#[test]
fn bad_element_names_its_index_and_cause() {
    let mut listing: Value = serde_json::from_str(LISTING).unwrap();
    listing["results"][3]["image"] = json!({"caption": []});

    let err = parse_block_children_value(listing).unwrap_err();
    assert_eq!(err.element_index(), Some(3));
    assert!(err.to_string().contains("image"), "{}", err);
}

#[test]
fn deeply_nested_element_decodes() {
    let depth = 80;
    let mut element = json!({"type": "paragraph", "paragraph": {"rich_text": []}});
    for _ in 0..depth {
        element = json!({
            "type": "bulleted_list_item",
            "bulleted_list_item": {"rich_text": [], "children": [element]}
        });
    }
    let body = json!({"object": "list", "results": [element], "has_more": false}).to_string();

    let page = parse_block_children(&body).unwrap();
    let mut levels = 0;
    let mut block = &page.results[0];
    while let Some(child) = block.children().first() {
        block = child;
        levels += 1;
    }
    assert_eq!(levels, depth);
    assert_eq!(block.block_type(), BlockType::Paragraph);
}

#[test]
fn newer_discriminants_inside_known_blocks_survive() {
    let callout = json!({
        "id": "c1",
        "parent": {"type": "data_source_id", "data_source_id": "ds9", "database_id": "d9"},
        "type": "callout",
        "callout": {
            "rich_text": [],
            "icon": {"type": "custom_emoji", "custom_emoji": {"id": "e1", "name": "bufo"}},
            "color": "default_background"
        }
    });
    let body = json!({"object": "list", "results": [callout.clone()], "has_more": false});

    let page = parse_block_children_value(body).unwrap();
    let block = &page.results[0];
    assert_eq!(block.block_type(), BlockType::Callout);
    assert_eq!(block.parent().and_then(|p| p.id()), Some("ds9"));

    let encoded = serde_json::to_value(block).unwrap();
    assert_eq!(encoded["parent"], callout["parent"]);
    assert_eq!(encoded["callout"]["icon"], callout["callout"]["icon"]);
    assert_eq!(encoded["callout"]["color"], json!("default_background"));
}

#[test]
fn error_bodies_map_to_api_errors() {
    let body = r#"{
        "object": "error",
        "status": 429,
        "code": "rate_limited",
        "message": "You have been rate limited."
    }"#;
    match parse_block_children(body) {
        Err(CodecError::Api {
            code,
            status,
            message,
        }) => {
            assert_eq!(code, NotionErrorCode::RateLimited);
            assert!(code.is_retryable());
            assert_eq!(status, 429);
            assert_eq!(message, "You have been rate limited.");
        }
        other => panic!("expected api error, got {:?}", other),
    }
}

#[test]
fn exhausted_listing_yields_no_follow_up_query() {
    let page = parse_block_children(
        r#"{"object":"list","results":[],"next_cursor":null,"has_more":false}"#,
    )
    .unwrap();
    assert!(page.is_empty());
    assert!(page.next_query(None).is_none());
}

#[test]
fn follow_up_query_carries_cursor_verbatim() {
    let page = parse_block_children(LISTING).unwrap();
    let query = page.next_query(Some(PageSize::saturating(50))).unwrap();
    assert_eq!(
        query.to_query_string(),
        "start_cursor=1a2b3c4d-5e6f-4a7b-8c9d-0e1f2a3b4c5e&page_size=50"
    );
}

#[test]
fn driver_concatenates_pages_in_order() {
    let second = json!({
        "object": "list",
        "results": [
            {"type": "paragraph", "paragraph": {"rich_text": []}},
            {"type": "breadcrumb", "breadcrumb": {}}
        ],
        "next_cursor": null,
        "has_more": false
    });

    let mut queries: Vec<PaginationQuery> = Vec::new();
    let result = fetch_all_pages(None, None, |query: &PaginationQuery| {
        queries.push(query.clone());
        let body = match query.start_cursor {
            None => serde_json::from_str(LISTING)?,
            Some(_) => second.clone(),
        };
        parse_block_children_value(body)
    })
    .unwrap();

    assert!(result.complete);
    assert_eq!(result.pages_fetched, 2);
    assert_eq!(result.items.len(), 8);
    assert_eq!(result.items[7].block_type(), BlockType::Breadcrumb);
    assert_eq!(
        queries[1].start_cursor.as_ref().map(Cursor::as_str),
        Some("1a2b3c4d-5e6f-4a7b-8c9d-0e1f2a3b4c5e")
    );
}

#[test]
fn driver_stops_on_lying_has_more() {
    let result = fetch_all_pages::<Block, CodecError, _>(None, None, |_| {
        Ok(PaginatedResponse {
            object: "list".to_string(),
            results: vec![Block::divider()],
            next_cursor: None,
            has_more: true,
        })
    })
    .unwrap();
    assert_eq!(result.pages_fetched, 1);
    assert!(result.complete);
}
