// =============================================================================
// Cross-document import / clone
// =============================================================================

use mulch::{Document, parse_document_str};

fn sample() -> Document {
    parse_document_str(
        r#"<html><body><div class="outer"><p>one</p><p>two <b>bold</b></p><!-- note --></div></body></html>"#,
    )
}

#[test]
fn test_import_deep_reassigns_ownership() {
    let source = sample();
    let body = source.body().unwrap();
    let div = source.children(body).next().unwrap();

    let mut target = Document::new();
    let imported = target.import_node(&source, div, true);

    assert!(target.contains(imported));
    let elem = target.get(imported).as_element().unwrap();
    assert_eq!(elem.tag.as_ref(), "div");
    assert_eq!(elem.attrs.get("class").map(|v| v.as_ref()), Some("outer"));
}

#[test]
fn test_import_round_trip_structure() {
    let source = sample();
    let body = source.body().unwrap();
    let div = source.children(body).next().unwrap();

    let mut target = Document::new();
    let imported = target.import_node(&source, div, true);

    assert_eq!(
        source.dump(div).to_string(),
        target.dump(imported).to_string()
    );
}

#[test]
fn test_import_leaves_source_unmodified() {
    let source = sample();
    let body = source.body().unwrap();
    let div = source.children(body).next().unwrap();
    let before = source.dump(source.root).to_string();

    let mut target = Document::new();
    target.import_node(&source, div, true);

    assert_eq!(source.dump(source.root).to_string(), before);
    // Original is still attached where it was
    assert_eq!(source.children(body).next(), Some(div));
}

#[test]
fn test_import_is_detached_in_target() {
    let source = sample();
    let div = source.children(source.body().unwrap()).next().unwrap();

    let mut target = parse_document_str("<html><body></body></html>");
    let imported = target.import_node(&source, div, true);

    let target_body = target.body().unwrap();
    assert_eq!(target.children(target_body).count(), 0);

    // Splicing in is the caller's move
    target.append_child(target_body, imported);
    assert_eq!(target.children(target_body).next(), Some(imported));
}

#[test]
fn test_import_shallow_copies_no_children() {
    let source = sample();
    let div = source.children(source.body().unwrap()).next().unwrap();
    assert!(source.children(div).count() > 0);

    let mut target = Document::new();
    let imported = target.import_node(&source, div, false);

    assert_eq!(target.children(imported).count(), 0);
    let elem = target.get(imported).as_element().unwrap();
    assert_eq!(elem.attrs.get("class").map(|v| v.as_ref()), Some("outer"));
}

#[test]
fn test_same_document_clone_matches_import_semantics() {
    let mut doc = sample();
    let body = doc.body().unwrap();
    let div = doc.children(body).next().unwrap();

    let clone = doc.clone_node(div, true);

    assert_ne!(clone, div);
    assert_eq!(doc.dump(div).to_string(), doc.dump(clone).to_string());

    // Clone is detached; mutating it leaves the original alone
    let extra = doc.create_element("span");
    doc.append_child(clone, extra);
    assert_ne!(
        doc.children(clone).count(),
        doc.children(div).count()
    );
}

#[cfg(feature = "template-content")]
#[test]
fn test_import_deep_carries_template_content() {
    let mut source =
        parse_document_str("<html><body><template><p>inert</p></template></body></html>");
    let body = source.body().unwrap();
    let tpl = source.children(body).next().unwrap();
    let src_content = source.template_content(tpl).unwrap();

    let mut target = Document::new();
    let imported = target.import_node(&source, tpl, true);

    assert!(target.get(imported).is_template());
    let new_content = target.template_content(imported).unwrap();
    assert_eq!(
        source.dump(src_content).to_string(),
        target.dump(new_content).to_string()
    );

    // The two contents are independent trees
    let div = target.create_element("div");
    target.append_child(new_content, div);
    assert_eq!(source.children(src_content).count(), 1);
    assert_eq!(target.children(new_content).count(), 2);
}

#[cfg(feature = "template-content")]
#[test]
fn test_import_shallow_template_resets_content() {
    let mut source =
        parse_document_str("<html><body><template><p>inert</p></template></body></html>");
    let tpl = source.children(source.body().unwrap()).next().unwrap();
    source.template_content(tpl).unwrap();

    let mut target = Document::new();
    let imported = target.import_node(&source, tpl, false);

    // Shallow copy starts with unmaterialized content
    assert!(target.get(imported).as_template().unwrap().content.is_none());
    let fresh = target.template_content(imported).unwrap();
    assert_eq!(target.children(fresh).count(), 0);
}

#[test]
fn test_import_text_payload() {
    let source = parse_document_str("<html><body>payload &amp; more</body></html>");
    let body = source.body().unwrap();
    let text = source.children(body).next().unwrap();

    let mut target = Document::new();
    let imported = target.import_node(&source, text, true);

    assert_eq!(
        target.get(imported).as_text().map(|t| t.as_ref()),
        Some("payload & more")
    );
}

#[test]
fn test_import_from_fragment_document() {
    let frag = mulch::parse_fragment(b"<li>a</li><li>b</li>").unwrap();

    let mut target = parse_document_str("<html><body><ul></ul></body></html>");
    let imported = target.import_node(&frag, frag.root, true);

    assert!(target.get(imported).is_fragment());
    assert_eq!(target.children(imported).count(), 2);
}
