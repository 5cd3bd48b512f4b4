//! HTML parsing straight into the document arena.
//!
//! [`ArenaSink`] implements html5ever's `TreeSink`, so the HTML5 tree
//! construction algorithm (with full browser-compatible error recovery)
//! builds [`NodeData`] nodes directly into an `indextree` arena - no
//! intermediate tree. `<template>` elements get template-kind nodes and the
//! tree builder parses their children into the real content fragment.
//!
//! Input arrives as bytes with an explicit length and is decoded strictly:
//! undecodable bytes are the one parse failure this layer reports
//! (everything that decodes is recovered by html5ever).

use html5ever::tree_builder::{ElemName, ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{Attribute, LocalName, QualName, parse_document};
use html5ever::{local_name, namespace_url, ns};
use indexmap::IndexMap;
use indextree::{Arena, NodeId};
use smallvec::SmallVec;
use std::borrow::Cow;
use std::cell::RefCell;
use tendril::{StrTendril, TendrilSink};

use crate::document::{Document, ParseMode, materialize_template_content};
use crate::dom::{ElementData, Namespace, NodeData, NodeKind, TemplateData};
use crate::error::{Error, Result};

/// Parse a string as a full HTML document.
pub fn parse_document_str(html: &str) -> Document {
    let sink = ArenaSink::new();
    // html5ever creates subtendrils sharing this buffer via refcounting
    let tendril = StrTendril::from(html);
    parse_document(sink, Default::default()).one(tendril)
}

/// Parse bytes as a full HTML document. Strict UTF-8: undecodable input is
/// an [`Error::InvalidUtf8`] and no document is built.
pub fn parse_document_bytes(bytes: &[u8]) -> Result<Document> {
    let html = decode(bytes)?;
    Ok(parse_document_str(html))
}

/// Parse markup into a fresh standalone document used purely as a fragment
/// container.
///
/// The markup goes through a full HTML5 parse (so error recovery matches
/// browsers), then the parsed content is re-rooted under a Fragment node
/// and the synthesized `html`/`head`/`body` scaffolding is discarded. The
/// result is [`ParseMode::Fragment`]: its root's children are the fragment,
/// and [`Document::body`] is `None`.
///
/// On failure the partially built document is dropped before returning.
pub fn parse_fragment(bytes: &[u8]) -> Result<Document> {
    let html = decode(bytes)?;
    let mut doc = parse_document_str(html);

    let fragment = doc.arena.new_node(NodeData::html(NodeKind::Fragment));

    // Walk the document node's children in order: comments before/after the
    // <html> scaffold move over as-is; the scaffold contributes its own
    // children in order, with head and body flattened to their contents
    // (head first matches source order for markup the parser routes there:
    // meta, title, ...).
    let scaffold = doc.root;
    let document_node = doc.arena[scaffold].parent().unwrap_or(scaffold);
    let top_level: SmallVec<[NodeId; 4]> = document_node.children(&doc.arena).collect();
    for node in top_level {
        if node != scaffold {
            node.detach(&mut doc.arena);
            fragment.append(node, &mut doc.arena);
            continue;
        }
        let html_level: SmallVec<[NodeId; 4]> = scaffold.children(&doc.arena).collect();
        for child in html_level {
            let is_section = doc.get(child).tag_matches(&local_name!("head"))
                || doc.get(child).tag_matches(&local_name!("body"));
            if is_section {
                let content: SmallVec<[NodeId; 8]> = child.children(&doc.arena).collect();
                for item in content {
                    item.detach(&mut doc.arena);
                    fragment.append(item, &mut doc.arena);
                }
            } else {
                child.detach(&mut doc.arena);
                fragment.append(child, &mut doc.arena);
            }
        }
    }

    // Drop the scaffolding wholesale
    scaffold.remove_subtree(&mut doc.arena);

    doc.root = fragment;
    doc.mode = ParseMode::Fragment;
    Ok(doc)
}

fn decode(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| Error::InvalidUtf8 {
        valid_up_to: e.valid_up_to(),
    })
}

/// Owned element name wrapper
#[derive(Debug, Clone)]
struct OwnedElemName(QualName);

impl ElemName for OwnedElemName {
    fn ns(&self) -> &html5ever::Namespace {
        &self.0.ns
    }

    fn local_name(&self) -> &LocalName {
        &self.0.local
    }
}

/// TreeSink building straight into the document arena
struct ArenaSink {
    /// The arena - wrapped in RefCell for interior mutability (TreeSink
    /// methods take `&self`)
    arena: RefCell<Arena<NodeData>>,

    /// Document node (parent of `<html>`)
    document: NodeId,

    /// DOCTYPE encountered during parse
    doctype: RefCell<Option<StrTendril>>,
}

impl ArenaSink {
    fn new() -> Self {
        let mut arena = Arena::new();
        let document = arena.new_node(NodeData::html(NodeKind::Document));

        ArenaSink {
            arena: RefCell::new(arena),
            document,
            doctype: RefCell::new(None),
        }
    }
}

impl TreeSink for ArenaSink {
    type Handle = NodeId;
    type Output = Document;
    type ElemName<'a>
        = OwnedElemName
    where
        Self: 'a;

    fn finish(self) -> Self::Output {
        let arena = self.arena.into_inner();

        // Root is the document node's element child (`<html>`). Document-level
        // comments can precede it, so first-child isn't good enough.
        let root = self
            .document
            .children(&arena)
            .find(|&id| arena[id].get().is_element())
            .or_else(|| self.document.children(&arena).next())
            .unwrap_or(self.document);

        Document {
            arena,
            root,
            doctype: self.doctype.into_inner(),
            mode: ParseMode::Document,
        }
    }

    fn parse_error(&self, _msg: Cow<'static, str>) {
        // html5ever recovers automatically; recoverable errors are not
        // surfaced by this layer
    }

    fn get_document(&self) -> Self::Handle {
        self.document
    }

    fn set_quirks_mode(&self, _mode: QuirksMode) {}

    fn same_node(&self, a: &Self::Handle, b: &Self::Handle) -> bool {
        a == b
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> OwnedElemName {
        let arena = self.arena.borrow();
        let node = arena[*target].get();

        if let Some(elem) = node.as_element() {
            let local = LocalName::from(elem.tag.as_ref());
            let ns = match node.ns {
                Namespace::Html => ns!(html),
                Namespace::Svg => ns!(svg),
                Namespace::MathMl => ns!(mathml),
            };

            OwnedElemName(QualName {
                prefix: None,
                ns,
                local,
            })
        } else {
            OwnedElemName(QualName {
                prefix: None,
                ns: ns!(html),
                local: local_name!(""),
            })
        }
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Attribute>,
        _flags: ElementFlags,
    ) -> Self::Handle {
        let ns = Namespace::from_url(name.ns.as_ref());

        // IndexMap preserves attribute order from the source
        let attr_map: IndexMap<_, _> = attrs
            .into_iter()
            .map(|attr| (attr.name.local.to_string(), attr.value))
            .collect();

        let element = ElementData {
            tag: StrTendril::from(name.local.as_ref()),
            attrs: attr_map,
        };

        let kind = if ns == Namespace::Html && name.local == local_name!("template") {
            NodeKind::Template(TemplateData {
                element,
                content: None,
            })
        } else {
            NodeKind::Element(element)
        };

        self.arena.borrow_mut().new_node(NodeData { kind, ns })
    }

    fn create_comment(&self, text: StrTendril) -> Self::Handle {
        self.arena
            .borrow_mut()
            .new_node(NodeData::html(NodeKind::Comment(text)))
    }

    fn create_pi(&self, _target: StrTendril, data: StrTendril) -> Self::Handle {
        self.arena
            .borrow_mut()
            .new_node(NodeData::html(NodeKind::Comment(data)))
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        let mut arena = self.arena.borrow_mut();
        match child {
            NodeOrText::AppendNode(node) => {
                parent.append(node, &mut arena);
            }
            NodeOrText::AppendText(text) => {
                // Merge with a trailing text node (html5ever behavior)
                let last_child = parent.children(&arena).next_back();

                if let Some(last_child) = last_child
                    && let NodeKind::Text(existing) = &mut arena[last_child].get_mut().kind
                {
                    existing.push_tendril(&text);
                    return;
                }

                let text_node = arena.new_node(NodeData::html(NodeKind::Text(text)));
                parent.append(text_node, &mut arena);
            }
        }
    }

    fn append_before_sibling(&self, sibling: &Self::Handle, new_node: NodeOrText<Self::Handle>) {
        let mut arena = self.arena.borrow_mut();
        match new_node {
            NodeOrText::AppendNode(node) => {
                sibling.insert_before(node, &mut arena);
            }
            NodeOrText::AppendText(text) => {
                let text_node = arena.new_node(NodeData::html(NodeKind::Text(text)));
                sibling.insert_before(text_node, &mut arena);
            }
        }
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        let has_parent = self.arena.borrow()[*element].parent().is_some();
        if has_parent {
            self.append_before_sibling(element, child);
        } else {
            self.append(prev_element, child);
        }
    }

    fn append_doctype_to_document(
        &self,
        name: StrTendril,
        _public_id: StrTendril,
        _system_id: StrTendril,
    ) {
        *self.doctype.borrow_mut() = Some(name);
    }

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        if cfg!(feature = "template-content") {
            materialize_template_content(&mut self.arena.borrow_mut(), *target)
        } else {
            // Degraded mode: children land under the template element itself
            *target
        }
    }

    fn add_attrs_if_missing(&self, target: &Self::Handle, attrs: Vec<Attribute>) {
        let mut arena = self.arena.borrow_mut();
        if let Some(elem) = arena[*target].get_mut().as_element_mut() {
            for attr in attrs {
                elem.attrs
                    .entry(attr.name.local.to_string())
                    .or_insert(attr.value);
            }
        }
    }

    fn remove_from_parent(&self, target: &Self::Handle) {
        target.detach(&mut self.arena.borrow_mut());
    }

    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle) {
        let mut arena = self.arena.borrow_mut();
        let children: Vec<NodeId> = node.children(&arena).collect();
        for child in children {
            child.detach(&mut arena);
            new_parent.append(child, &mut arena);
        }
    }
}
