use catalog_index_core::contract::RawRecord;
use catalog_index_core::entry::FALLBACK_NAME;
use catalog_index_core::normalize::{extension_from_url, normalize, normalize_record};
use serde_json::{json, Value};

fn rec(v: Value) -> RawRecord {
    RawRecord::new(v)
}

#[test]
fn test_name_falls_back_to_last_url_segment() {
    let entry = normalize_record(&rec(json!({"url": "a/b/c.pdf"}))).unwrap();
    assert_eq!(entry.name(), "c.pdf");
}

#[test]
fn test_name_falls_back_to_literal_when_url_ends_with_slash() {
    let entry = normalize_record(&rec(json!({"url": "/cours/"}))).unwrap();
    assert_eq!(entry.name(), FALLBACK_NAME);
}

#[test]
fn test_extension_parsed_from_url_stops_at_query_and_fragment() {
    assert_eq!(extension_from_url("/x/Slides.PPTX?x=1").as_deref(), Some("pptx"));
    assert_eq!(extension_from_url("/x/doc.pdf#page=2").as_deref(), Some("pdf"));
    assert_eq!(extension_from_url("/x/archive.tar.gz").as_deref(), Some("gz"));
    assert_eq!(extension_from_url("/x/README"), None);
    assert_eq!(extension_from_url("/x.d/file"), None);
}

#[test]
fn test_explicit_ext_wins_and_is_lowercased() {
    let entry = normalize_record(&rec(json!({"url": "/a.pdf", "ext": "PPT"}))).unwrap();
    assert_eq!(entry.ext(), "ppt");

    let empty_ext = normalize_record(&rec(json!({"url": "/a.PDF", "ext": ""}))).unwrap();
    assert_eq!(empty_ext.ext(), "pdf");
}

#[test]
fn test_invalid_fields_degrade_to_defaults() {
    let entry = normalize_record(&rec(json!({
        "url": "/c/m.pdf",
        "name": 7,
        "size": "huge",
        "year": null,
        "uploadedAt": 12
    })))
    .unwrap();
    assert_eq!(entry.name(), "m.pdf");
    assert_eq!(entry.size(), None);
    assert_eq!(entry.year(), "");
    assert_eq!(entry.uploaded_at(), None);
}

#[test]
fn test_negative_size_is_dropped() {
    let entry = normalize_record(&rec(json!({"url": "/a.pdf", "size": -5}))).unwrap();
    assert_eq!(entry.size(), None);
}

#[test]
fn test_legacy_uploaded_alias_is_used() {
    let entry =
        normalize_record(&rec(json!({"url": "/a.pdf", "uploaded": "2024-02-01"}))).unwrap();
    assert_eq!(entry.uploaded_at(), Some("2024-02-01"));
}

#[test]
fn test_records_without_url_are_skipped_in_order() {
    let raw = vec![
        rec(json!({"url": "/1.pdf"})),
        rec(json!({"name": "orphan"})),
        rec(json!(null)),
        rec(json!({"url": ""})),
        rec(json!({"url": "/2.pdf"})),
    ];
    let names: Vec<_> = normalize(&raw).iter().map(|e| e.name().to_string()).collect();
    assert_eq!(names, vec!["1.pdf", "2.pdf"]);
}

#[test]
fn test_canonical_form_omits_absent_fields() {
    let entry = normalize_record(&rec(json!({"url": "/c/m.pdf", "size": "huge"}))).unwrap();
    let raw = entry.to_raw();
    let fields = raw.fields().expect("canonical entry is an object");

    assert!(!fields.contains_key("size"));
    assert!(!fields.contains_key("uploadedAt"));
    assert_eq!(raw.str_field("name"), Some("m.pdf"));
    assert_eq!(raw.str_field("ext"), Some("pdf"));
    assert_eq!(raw.str_field("year"), Some(""));
}

#[test]
fn test_canonical_form_keeps_present_fields() {
    let entry = normalize_record(&rec(json!({
        "url": "/c/m.pdf",
        "size": 1024,
        "uploaded": "2025-01-01"
    })))
    .unwrap();
    let raw = entry.to_raw();
    assert_eq!(raw.number_field("size"), Some(1024.0));
    assert_eq!(raw.str_field("uploadedAt"), Some("2025-01-01"));
}
