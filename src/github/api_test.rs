use super::{
    decode_base64_text, decode_content_payload, is_rate_limited, likely_blocked_by_route_naming,
    parse_listing,
};
use crate::tree::EntryKind;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::json;

#[test]
fn test_parse_listing_happy_path() {
    let json = json!([
        { "name": "src", "path": "src", "type": "dir" },
        { "name": "index.ts", "path": "src/index.ts", "type": "file", "size": 120 }
    ]);
    let entries = parse_listing(&json).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].kind, EntryKind::Dir);
    assert_eq!(entries[1].path, "src/index.ts");
    assert_eq!(entries[1].size, Some(120));
}

#[test]
fn test_parse_listing_skips_symlinks_and_submodules() {
    let json = json!([
        { "name": "link", "path": "link", "type": "symlink" },
        { "name": "vendored", "path": "vendored", "type": "submodule" },
        { "name": "a.txt", "path": "a.txt", "type": "file" }
    ]);
    let entries = parse_listing(&json).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "a.txt");
}

#[test]
fn test_parse_listing_rejects_file_payload() {
    // Fetching a file path from the contents API returns an object, not an
    // array; the listing parser must not misread it.
    let json = json!({ "name": "a.txt", "path": "a.txt", "type": "file", "content": "aGk=" });
    assert!(parse_listing(&json).is_none());
}

#[test]
fn test_decode_content_payload_base64_roundtrip() {
    let original = "# Widgets\n\nA small library.\n";
    let encoded = STANDARD.encode(original);
    let json = json!({ "content": encoded, "encoding": "base64" });
    assert_eq!(decode_content_payload(&json).unwrap(), original);
}

#[test]
fn test_decode_base64_text_tolerates_newlines() {
    // GitHub splits base64 content into newline-separated chunks.
    let encoded = STANDARD.encode("hello world, this is chunked content");
    let chunked = format!("{}\n{}\n", &encoded[..10], &encoded[10..]);
    assert_eq!(
        decode_base64_text(&chunked).unwrap(),
        "hello world, this is chunked content"
    );
}

#[test]
fn test_decode_base64_text_rejects_garbage() {
    assert!(decode_base64_text("not base64 at all!!!").is_none());
}

#[test]
fn test_decode_content_payload_missing_content() {
    let json = json!({ "encoding": "base64" });
    assert!(decode_content_payload(&json).is_none());
}

#[test]
fn test_rate_limit_detection() {
    assert!(is_rate_limited(
        403,
        "{\"message\": \"API rate limit exceeded for 1.2.3.4\"}"
    ));
    assert!(is_rate_limited(429, "Rate Limit reached"));
    // 403 for other reasons is not a rate limit.
    assert!(!is_rate_limited(403, "{\"message\": \"Resource protected\"}"));
    // Rate-limit wording on a success is ignored.
    assert!(!is_rate_limited(200, "rate limit docs"));
}

#[test]
fn test_route_naming_heuristic() {
    assert!(likely_blocked_by_route_naming("src/app/[slug]/page.tsx"));
    assert!(likely_blocked_by_route_naming("src/app/(auth)/login/page.tsx"));
    assert!(!likely_blocked_by_route_naming("src/app/page.tsx"));
    // Brackets mid-segment are not route groups.
    assert!(!likely_blocked_by_route_naming("src/lib/array[0].ts"));
}
