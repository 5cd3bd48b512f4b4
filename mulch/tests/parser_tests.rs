// =============================================================================
// Document and fragment parsing
// =============================================================================

use mulch::{Error, NodeKind, ParseMode, parse_document_bytes, parse_fragment};

#[test]
fn test_body_element_present_for_full_document() {
    let doc = parse_document_bytes(b"<html><body><p>x</p></body></html>").unwrap();
    let body = doc.body().expect("full document should have a body");
    assert_eq!(doc.children(body).count(), 1);
}

#[test]
fn test_body_element_absent_for_fragment_document() {
    let doc = parse_fragment(b"<p>x</p>").unwrap();
    assert_eq!(doc.mode, ParseMode::Fragment);
    assert!(doc.body().is_none());
    assert!(doc.head().is_none());
}

#[test]
fn test_fragment_children_represent_the_markup() {
    let doc = parse_fragment(b"text <b>bold</b> tail").unwrap();

    let kinds: Vec<_> = doc
        .children(doc.root)
        .map(|id| {
            let data = doc.get(id);
            data.as_element()
                .map(|e| e.tag.to_string())
                .or_else(|| data.as_text().map(|t| format!("text:{t}")))
                .unwrap()
        })
        .collect();
    assert_eq!(kinds, ["text:text ", "b", "text: tail"]);
}

#[test]
fn test_fragment_recovers_malformed_markup() {
    // Unclosed tags are fine - html5ever recovery applies
    let doc = parse_fragment(b"<div><p>unclosed").unwrap();
    let div = doc.children(doc.root).next().unwrap();
    assert_eq!(
        doc.get(div).as_element().map(|e| e.tag.as_ref()),
        Some("div")
    );
    let p = doc.children(div).next().unwrap();
    assert_eq!(doc.get(p).as_element().map(|e| e.tag.as_ref()), Some("p"));
}

#[test]
fn test_fragment_head_routed_content_is_kept() {
    // <title> gets routed into <head> by the tree builder; the fragment
    // container still carries it
    let doc = parse_fragment(b"<title>t</title><p>x</p>").unwrap();
    let tags: Vec<_> = doc
        .children(doc.root)
        .filter_map(|id| doc.get(id).as_element().map(|e| e.tag.to_string()))
        .collect();
    assert_eq!(tags, ["title", "p"]);
}

#[test]
fn test_invalid_utf8_is_a_parse_failure() {
    let err = parse_fragment(b"<p>abc\x80</p>").unwrap_err();
    match err {
        Error::InvalidUtf8 { valid_up_to } => assert_eq!(valid_up_to, 6),
        other => panic!("expected InvalidUtf8, got {other:?}"),
    }

    assert!(matches!(
        parse_document_bytes(b"\xf0\x28\x8c\x28"),
        Err(Error::InvalidUtf8 { .. })
    ));
}

#[test]
fn test_leading_comment_does_not_displace_root() {
    // A document-level comment before <html> must not become the root:
    // body lookup has to keep working.
    let doc =
        parse_document_bytes(b"<!-- banner --><html><body><p>x</p></body></html>").unwrap();
    assert_eq!(
        doc.get(doc.root).as_element().map(|e| e.tag.as_ref()),
        Some("html")
    );
    let body = doc.body().expect("body should survive a leading comment");
    assert_eq!(doc.children(body).count(), 1);
}

#[test]
fn test_fragment_keeps_top_level_comments() {
    let doc = parse_fragment(b"<!-- note --><p>x</p>").unwrap();

    let kids: Vec<_> = doc.children(doc.root).collect();
    assert_eq!(kids.len(), 2);
    match &doc.get(kids[0]).kind {
        NodeKind::Comment(text) => assert_eq!(text.as_ref(), " note "),
        other => panic!("expected comment, got {other:?}"),
    }
    assert_eq!(
        doc.get(kids[1]).as_element().map(|e| e.tag.as_ref()),
        Some("p")
    );
}

#[test]
fn test_fragment_keeps_trailing_comments() {
    let doc = parse_fragment(b"<p>x</p><!-- tail -->").unwrap();

    let kids: Vec<_> = doc.children(doc.root).collect();
    assert_eq!(kids.len(), 2);
    assert_eq!(
        doc.get(kids[0]).as_element().map(|e| e.tag.as_ref()),
        Some("p")
    );
    assert!(matches!(doc.get(kids[1]).kind, NodeKind::Comment(_)));
}

#[test]
fn test_document_root_is_html_element() {
    let doc = parse_document_bytes(b"<!DOCTYPE html><html><body></body></html>").unwrap();
    assert_eq!(doc.mode, ParseMode::Document);
    assert_eq!(
        doc.get(doc.root).as_element().map(|e| e.tag.as_ref()),
        Some("html")
    );
    assert_eq!(doc.doctype.as_ref().map(|d| d.as_ref()), Some("html"));
}

#[test]
fn test_collections_accumulate_query_results() {
    let doc = parse_fragment(b"<li>a</li><li>b</li><li>c</li>").unwrap();

    let mut coll = doc.make_collection(4).unwrap();
    for id in doc.children(doc.root) {
        if doc.get(id).tag_matches(&mulch::local_name!("li")) {
            coll.append(id).unwrap();
        }
    }
    assert_eq!(coll.len(), 3);

    // Collections are non-owning: dropping one leaves the tree alone
    drop(coll);
    assert_eq!(doc.children(doc.root).count(), 3);
}
