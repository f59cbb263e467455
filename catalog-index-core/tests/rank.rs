use catalog_index_core::contract::RawRecord;
use catalog_index_core::entry::CatalogEntry;
use catalog_index_core::normalize::normalize;
use catalog_index_core::rank::{rank, DEFAULT_PREVIEW_LIMIT};
use serde_json::json;

fn entries(stamps: &[Option<&str>]) -> Vec<CatalogEntry> {
    let raw: Vec<RawRecord> = stamps
        .iter()
        .enumerate()
        .map(|(i, s)| match s {
            Some(ts) => json!({"url": format!("/f{i}.pdf"), "uploadedAt": ts}),
            None => json!({"url": format!("/f{i}.pdf")}),
        })
        .map(RawRecord::new)
        .collect();
    normalize(&raw)
}

fn urls(ranked: &[&CatalogEntry]) -> Vec<String> {
    ranked.iter().map(|e| e.url().to_string()).collect()
}

#[test]
fn test_newest_first_and_missing_last() {
    let list = entries(&[
        None,
        Some("2025-01-01T00:00:00Z"),
        Some("2025-03-01T00:00:00Z"),
        Some("2024-12-31"),
    ]);
    assert_eq!(
        urls(&rank(&list, 10)),
        vec!["/f2.pdf", "/f1.pdf", "/f3.pdf", "/f0.pdf"]
    );
}

#[test]
fn test_ties_keep_input_order() {
    let list = entries(&[
        None,
        Some("2025-01-01T00:00:00Z"),
        None,
        Some("2025-01-01T00:00:00Z"),
    ]);
    assert_eq!(
        urls(&rank(&list, 4)),
        vec!["/f1.pdf", "/f3.pdf", "/f0.pdf", "/f2.pdf"]
    );
}

#[test]
fn test_truncates_to_limit() {
    let list = entries(&[Some("2025-01-01"), Some("2025-01-02"), Some("2025-01-03"), None]);
    assert_eq!(rank(&list, DEFAULT_PREVIEW_LIMIT).len(), 3);
    assert_eq!(rank(&list, 0).len(), 0);
    assert_eq!(rank(&list[..2], 3).len(), 2);
}

#[test]
fn test_unparseable_timestamp_ranks_as_missing() {
    let list = entries(&[Some("not a date"), Some("2020-05-05")]);
    assert_eq!(urls(&rank(&list, 2)), vec!["/f1.pdf", "/f0.pdf"]);
}
