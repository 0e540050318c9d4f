use std::fs;

use blogsmith_engine::{ContentStore, StoreError};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn first_id_on_missing_or_empty_dir_is_one() {
    let temp = TempDir::new().unwrap();

    let missing = ContentStore::new(temp.path().join("not_there"));
    assert_eq!(missing.next_page_id().unwrap(), 1);

    let empty = ContentStore::new(temp.path().to_path_buf());
    assert_eq!(empty.next_page_id().unwrap(), 1);
}

#[test]
fn id_is_one_past_the_highest_page() {
    let temp = TempDir::new().unwrap();
    for id in 1..=3 {
        fs::write(temp.path().join(format!("{id}.html")), "x").unwrap();
    }
    let store = ContentStore::new(temp.path().to_path_buf());
    assert_eq!(store.next_page_id().unwrap(), 4);
}

#[test]
fn template_and_cover_files_do_not_skew_allocation() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("1.html"), "x").unwrap();
    fs::write(temp.path().join("bootsBlog_template.html"), "x").unwrap();
    fs::write(temp.path().join("BLOGPOST1.png"), "x").unwrap();

    let store = ContentStore::new(temp.path().to_path_buf());
    assert_eq!(store.next_page_id().unwrap(), 2);
}

#[test]
fn ids_stay_strictly_increasing_after_deletion() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("1.html"), "x").unwrap();
    fs::write(temp.path().join("5.html"), "x").unwrap();
    fs::remove_file(temp.path().join("1.html")).unwrap();

    let store = ContentStore::new(temp.path().to_path_buf());
    assert_eq!(store.next_page_id().unwrap(), 6);
}

#[test]
fn write_page_creates_missing_content_dir() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("content");
    let store = ContentStore::new(dir.clone());

    let path = store.write_page(1, "<html></html>").unwrap();
    assert_eq!(path, dir.join("1.html"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "<html></html>");
}

#[test]
fn write_page_never_overwrites() {
    let temp = TempDir::new().unwrap();
    let store = ContentStore::new(temp.path().to_path_buf());

    let path = store.write_page(7, "original").unwrap();
    let err = store.write_page(7, "overwrite attempt").unwrap_err();
    assert!(matches!(err, StoreError::PageExists(p) if p == path));
    assert_eq!(fs::read_to_string(&path).unwrap(), "original");
}

#[test]
fn cover_is_overwritten_each_run() {
    let temp = TempDir::new().unwrap();
    let store = ContentStore::new(temp.path().to_path_buf());

    let first = store.stage_cover("BLOGPOST1.png", b"one").unwrap();
    let second = store.stage_cover("BLOGPOST1.png", b"two").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), b"two");
}

#[test]
fn append_card_keeps_the_marker_for_future_runs() {
    let temp = TempDir::new().unwrap();
    let store = ContentStore::new(temp.path().to_path_buf());
    let template = temp.path().join("bootsBlog_template.html");
    fs::write(&template, "<div>\nstoryCode\n</div>").unwrap();

    store
        .append_card("bootsBlog_template.html", "storyCode", "<p>card one</p>")
        .unwrap();
    store
        .append_card("bootsBlog_template.html", "storyCode", "<p>card two</p>")
        .unwrap();

    let html = fs::read_to_string(&template).unwrap();
    assert_eq!(html, "<div>\n<p>card one</p>\n<p>card two</p>\nstoryCode\n</div>");
}

#[test]
fn card_text_containing_the_token_does_not_steal_the_marker() {
    let temp = TempDir::new().unwrap();
    let store = ContentStore::new(temp.path().to_path_buf());
    let template = temp.path().join("bootsBlog_template.html");
    fs::write(&template, "<div>\nstoryCode\n</div>").unwrap();

    store
        .append_card(
            "bootsBlog_template.html",
            "storyCode",
            "<h2>All about storyCode</h2>",
        )
        .unwrap();
    store
        .append_card("bootsBlog_template.html", "storyCode", "<p>card two</p>")
        .unwrap();

    let html = fs::read_to_string(&template).unwrap();
    assert_eq!(
        html,
        "<div>\n<h2>All about storyCode</h2>\n<p>card two</p>\nstoryCode\n</div>"
    );
}

#[test]
fn append_card_without_marker_fails_and_leaves_template_untouched() {
    let temp = TempDir::new().unwrap();
    let store = ContentStore::new(temp.path().to_path_buf());
    let template = temp.path().join("bootsBlog_template.html");
    fs::write(&template, "<div>no marker</div>").unwrap();

    let err = store
        .append_card("bootsBlog_template.html", "storyCode", "<p>card</p>")
        .unwrap_err();
    assert!(matches!(err, StoreError::Template(_)));
    assert_eq!(fs::read_to_string(&template).unwrap(), "<div>no marker</div>");
}
