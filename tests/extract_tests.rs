use transcript_stats::{extract_metadata, Dialect, Metadata};

const LABELED: &str = "Title: My Video\nVideo ID: abc123\nURL: https://www.youtube.com/watch?v=abc123\nView Count: 1234567 views\nLike Count: 12345\nFavorite Count: 0\nComment Count: 234\n\n========================================\n\nTranscript text here.\nSecond line.";

const MARKUP: &str = "# My Video\n\n**Video ID:** `abc123`\n**URL:** [link](https://www.youtube.com/watch?v=abc123)\n\n---\n\n## Transcript\n\nHello there\n[Music]\nfriends";

const PLAIN: &str = "My Video\nVideo ID: abc123\nURL: https://www.youtube.com/watch?v=abc123\n\nHello there\nfriends";

#[test]
fn labeled_header_populates_every_field() {
    let ex = extract_metadata(LABELED);
    assert_eq!(ex.dialect, Dialect::LabeledHeader);
    assert!(ex.boundary_found);
    assert_eq!(
        ex.metadata,
        Metadata {
            title: "My Video".into(),
            video_id: "abc123".into(),
            url: "https://www.youtube.com/watch?v=abc123".into(),
            view_count: 1234567,
            like_count: 12345,
            comment_count: 234,
        }
    );
    assert_eq!(ex.body, "Transcript text here.\nSecond line.");
}

#[test]
fn labeled_header_missing_fields_default() {
    let ex = extract_metadata("Title: Only title\n==========\nbody");
    assert_eq!(ex.dialect, Dialect::LabeledHeader);
    assert_eq!(ex.metadata.title, "Only title");
    assert_eq!(ex.metadata.video_id, "");
    assert_eq!(ex.metadata.view_count, 0);
    assert_eq!(ex.metadata.like_count, 0);
    assert_eq!(ex.body, "body");
}

#[test]
fn labels_after_boundary_stay_in_body() {
    let ex = extract_metadata("View Count: 5\n==========\nTitle: not a header");
    assert_eq!(ex.metadata.title, "");
    assert_eq!(ex.metadata.view_count, 5);
    assert_eq!(ex.body, "Title: not a header");
}

#[test]
fn short_equals_run_is_not_a_boundary() {
    let ex = extract_metadata("Title: t\n=========\nbody");
    assert!(!ex.boundary_found);
    assert_eq!(ex.body, "Title: t\n=========\nbody");
}

#[test]
fn markup_header_populates_every_field() {
    let ex = extract_metadata(MARKUP);
    assert_eq!(ex.dialect, Dialect::MarkupHeader);
    assert!(ex.boundary_found);
    assert_eq!(ex.metadata.title, "My Video");
    assert_eq!(ex.metadata.video_id, "abc123");
    assert_eq!(ex.metadata.url, "https://www.youtube.com/watch?v=abc123");
    assert_eq!(ex.metadata.view_count, 0);
    assert_eq!(ex.body, "Hello there\n[Music]\nfriends");
}

#[test]
fn markup_header_missing_fields_default() {
    let ex = extract_metadata("# Just a title\n## Transcript\ntext");
    assert_eq!(ex.metadata.title, "Just a title");
    assert_eq!(ex.metadata.video_id, "");
    assert_eq!(ex.metadata.url, "");
    assert_eq!(ex.body, "text");
}

#[test]
fn markup_url_requires_https_in_parens() {
    let ex = extract_metadata("# T\n**URL:** http://plain.example\n## Transcript\nx");
    assert_eq!(ex.metadata.url, "");
}

#[test]
fn plain_header_populates_every_field() {
    let ex = extract_metadata(PLAIN);
    assert_eq!(ex.dialect, Dialect::PlainHeader);
    assert!(ex.boundary_found);
    assert_eq!(ex.metadata.title, "My Video");
    assert_eq!(ex.metadata.video_id, "abc123");
    assert_eq!(ex.metadata.url, "https://www.youtube.com/watch?v=abc123");
    assert_eq!(ex.body, "Hello there\nfriends");
}

#[test]
fn plain_header_missing_fields_default() {
    let ex = extract_metadata("Some Title\nnot a label\n\nbody text");
    assert_eq!(ex.dialect, Dialect::PlainHeader);
    assert_eq!(ex.metadata.title, "Some Title");
    assert_eq!(ex.metadata.video_id, "");
    assert_eq!(ex.metadata.url, "");
    assert_eq!(ex.body, "body text");
}

#[test]
fn missing_boundary_takes_whole_document_in_every_dialect() {
    for (doc, dialect) in [
        ("Title: t\nView Count: 3\nno separator", Dialect::LabeledHeader),
        ("# t\n**Video ID:** `v`\nno transcript heading", Dialect::MarkupHeader),
        ("t\nVideo ID: v", Dialect::PlainHeader),
    ] {
        let ex = extract_metadata(doc);
        assert_eq!(ex.dialect, dialect);
        assert!(!ex.boundary_found);
        assert_eq!(ex.body, doc);
    }
}

#[test]
fn boundary_on_last_line_gives_empty_body() {
    let ex = extract_metadata("# t\n## Transcript");
    assert!(ex.boundary_found);
    assert_eq!(ex.body, "");
}

#[test]
fn markup_phrases_in_labeled_body_do_not_change_dialect() {
    let doc = "Title: Talk\nView Count: 500\nLike Count: 5\nComment Count: 2\n==========\nNext up, the ## Transcript section heading.\nThen **Video ID:** `zzz` and **URL:** (https://x.example).";
    let ex = extract_metadata(doc);
    assert_eq!(ex.dialect, Dialect::LabeledHeader);
    assert_eq!(ex.metadata.title, "Talk");
    assert_eq!(ex.metadata.view_count, 500);
    assert_eq!(ex.metadata.like_count, 5);
    assert_eq!(ex.metadata.comment_count, 2);
    assert_eq!(ex.metadata.video_id, "");
    assert!(ex.body.starts_with("Next up, the ## Transcript"));
}

#[test]
fn cues_in_plain_body_do_not_change_dialect() {
    let doc = "My Video\nVideo ID: abc123\n\nTitle: not a label\n## Transcript\n==========";
    let ex = extract_metadata(doc);
    assert_eq!(ex.dialect, Dialect::PlainHeader);
    assert_eq!(ex.metadata.title, "My Video");
    assert_eq!(ex.metadata.video_id, "abc123");
    assert_eq!(ex.body, "Title: not a label\n## Transcript\n==========");
}

#[test]
fn equals_run_with_trailing_text_is_not_a_boundary() {
    let ex = extract_metadata("Title: t\nView Count: 3\n========== end\nbody");
    assert_eq!(ex.dialect, Dialect::LabeledHeader);
    assert!(!ex.boundary_found);
    assert_eq!(ex.metadata.view_count, 3);
}
