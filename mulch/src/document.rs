//! Arena-based document: the ownership root for a tree of nodes.
//!
//! A [`Document`] owns every node created through it - tree nodes, detached
//! nodes, and template content fragments alike - in one `indextree` arena.
//! Key consequences:
//! - **Single ownership**: a `NodeId` is only meaningful against the arena
//!   that issued it, so a node belongs to exactly one document for life.
//! - **Document-scoped teardown**: dropping the document drops every node
//!   and payload it owns; payload release goes through document methods
//!   ([`Document::take_text`], [`Document::remove_subtree`]), never behind
//!   the arena's back.
//! - **Cross-document import**: [`Document::import_node`] deep-copies a
//!   subtree from another document's arena into this one, reading the
//!   source immutably.

use html5ever::{LocalName, local_name};
use indextree::{Arena, NodeId};
use smallvec::SmallVec;
use tendril::StrTendril;

use crate::collection::Collection;
use crate::dom::{ElementData, NodeData, NodeKind, TemplateData};
use crate::error::{Error, Result};
use crate::tracing_macros::debug;

/// How a document came to be: built/parsed as a full HTML document, or as a
/// standalone fragment container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    #[default]
    Document,
    Fragment,
}

/// Document = Arena (strings are StrTendrils with refcounted sharing)
#[derive(Debug, Clone)]
pub struct Document {
    /// THE tree - all nodes live here
    pub arena: Arena<NodeData>,

    /// Root node (`<html>` for parsed documents, a Document node for
    /// freshly created ones, a Fragment node for fragment parses)
    pub root: NodeId,

    /// DOCTYPE if present (usually "html")
    pub doctype: Option<StrTendril>,

    /// Full document vs fragment container
    pub mode: ParseMode,
}

impl Document {
    /// Create an empty document: a fresh arena holding a single Document
    /// node as root.
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(NodeData::html(NodeKind::Document));
        Document {
            arena,
            root,
            doctype: None,
            mode: ParseMode::Document,
        }
    }

    /// Get immutable reference to node data
    pub fn get(&self, id: NodeId) -> &NodeData {
        self.arena[id].get()
    }

    /// Get mutable reference to node data
    pub fn get_mut(&mut self, id: NodeId) -> &mut NodeData {
        self.arena[id].get_mut()
    }

    /// Iterate children of a node
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        id.children(&self.arena)
    }

    /// Whether `id` names a live node in this document's arena.
    ///
    /// Best-effort: ids from *another* document may alias slots here, which
    /// is exactly why handles must not be mixed across documents.
    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.get(id).is_some_and(|node| !node.is_removed())
    }

    /// Get the `<body>` element if present.
    ///
    /// Fragment containers have no body section, so this is always `None`
    /// for [`ParseMode::Fragment`] documents.
    pub fn body(&self) -> Option<NodeId> {
        self.find_section(&local_name!("body"))
    }

    /// Get the `<head>` element if present. `None` for fragment containers.
    pub fn head(&self) -> Option<NodeId> {
        self.find_section(&local_name!("head"))
    }

    fn find_section(&self, name: &LocalName) -> Option<NodeId> {
        if self.mode == ParseMode::Fragment {
            return None;
        }
        let html = if self.get(self.root).tag_matches(&local_name!("html")) {
            Some(self.root)
        } else {
            self.children(self.root)
                .find(|&id| self.get(id).tag_matches(&local_name!("html")))
        }?;
        html.children(&self.arena)
            .find(|&id| self.get(id).tag_matches(name))
    }

    /// Create a detached element owned by this document. The caller splices
    /// it into the tree explicitly.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.arena
            .new_node(NodeData::html(NodeKind::Element(ElementData::new(tag))))
    }

    /// Create a detached `<template>` element. Identical to
    /// [`Document::create_element`] except the result is guaranteed to be
    /// template-kind (downcastable via [`NodeData::as_template`]).
    pub fn create_template_element(&mut self) -> NodeId {
        self.arena
            .new_node(NodeData::html(NodeKind::Template(TemplateData::new())))
    }

    /// The template's content fragment, materialized on first access.
    ///
    /// Idempotent: later calls return the same fragment id. The fragment
    /// lives in *this* document's arena, detached from the main tree.
    ///
    /// Errors with [`Error::TypeMismatch`] for non-template nodes and
    /// [`Error::TemplateContentUnavailable`] when the `template-content`
    /// feature is off (tag-identity detection keeps working either way).
    pub fn template_content(&mut self, id: NodeId) -> Result<NodeId> {
        if !self.get(id).is_template() {
            return Err(Error::TypeMismatch {
                expected: "template element",
            });
        }
        if cfg!(not(feature = "template-content")) {
            return Err(Error::TemplateContentUnavailable);
        }
        Ok(materialize_template_content(&mut self.arena, id))
    }

    /// Deep-copy a node (and its subtree when `deep`) from `source` into
    /// this document. The copy is detached and owned by `self`; `source`
    /// is only read. Kind, namespace, tag, attributes, and text payloads
    /// are preserved. Materialized template content is imported along with
    /// its template when `deep`; shallow copies start with unmaterialized
    /// content.
    ///
    /// For same-document copies use [`Document::clone_node`].
    pub fn import_node(&mut self, source: &Document, id: NodeId, deep: bool) -> NodeId {
        debug!("importing node {:?} (deep={})", id, deep);
        self.import_subtree(&source.arena, id, deep)
    }

    fn import_subtree(&mut self, src: &Arena<NodeData>, id: NodeId, deep: bool) -> NodeId {
        let mut data = src[id].get().clone();
        // The cloned template data still points at the source document's
        // content fragment. Reset it before the copy goes live.
        let src_content = match &mut data.kind {
            NodeKind::Template(tpl) => tpl.content.take(),
            _ => None,
        };
        let new_id = self.arena.new_node(data);

        if deep {
            if let Some(content) = src_content {
                let new_content = self.import_subtree(src, content, true);
                if let NodeKind::Template(tpl) = &mut self.arena[new_id].get_mut().kind {
                    tpl.content = Some(new_content);
                }
            }
            for child in id.children(src) {
                let new_child = self.import_subtree(src, child, true);
                new_id.append(new_child, &mut self.arena);
            }
        }

        new_id
    }

    /// Same-document counterpart of [`Document::import_node`]: deep-copy a
    /// node (and subtree when `deep`) within this document. The copy is
    /// detached; the original is untouched.
    pub fn clone_node(&mut self, id: NodeId, deep: bool) -> NodeId {
        let mut data = self.arena[id].get().clone();
        let src_content = match &mut data.kind {
            NodeKind::Template(tpl) => tpl.content.take(),
            _ => None,
        };
        let new_id = self.arena.new_node(data);

        if deep {
            if let Some(content) = src_content {
                let new_content = self.clone_node(content, true);
                if let NodeKind::Template(tpl) = &mut self.arena[new_id].get_mut().kind {
                    tpl.content = Some(new_content);
                }
            }
            let children: SmallVec<[NodeId; 8]> = id.children(&self.arena).collect();
            for child in children {
                let new_child = self.clone_node(child, true);
                new_id.append(new_child, &mut self.arena);
            }
        }

        new_id
    }

    /// Allocate an empty [`Collection`] pre-sized to `size_hint`.
    pub fn make_collection(&self, size_hint: usize) -> Result<Collection> {
        Collection::with_capacity(size_hint)
    }

    /// Append `child` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        parent.append(child, &mut self.arena);
    }

    /// Detach a node from its parent and siblings. The node stays owned by
    /// this document and can be reattached.
    pub fn detach(&mut self, id: NodeId) {
        id.detach(&mut self.arena);
    }

    /// Remove a node and its whole subtree from the arena. This is the
    /// document-scoped destructor: node payloads are only ever released
    /// here or when the document itself is dropped.
    pub fn remove_subtree(&mut self, id: NodeId) {
        id.remove_subtree(&mut self.arena);
    }

    /// Release a text node's payload through its owning document, leaving
    /// the node empty. Errors with [`Error::TypeMismatch`] for non-text
    /// nodes.
    pub fn take_text(&mut self, id: NodeId) -> Result<StrTendril> {
        match &mut self.arena[id].get_mut().kind {
            NodeKind::Text(text) => Ok(std::mem::replace(text, StrTendril::new())),
            _ => Err(Error::TypeMismatch {
                expected: "text node",
            }),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Return the template's content fragment id, creating the fragment (in the
/// same arena, detached) the first time.
///
/// `id` must be template-kind; the kind check lives with the public entry
/// points ([`Document::template_content`] and the parser sink).
pub(crate) fn materialize_template_content(arena: &mut Arena<NodeData>, id: NodeId) -> NodeId {
    if let NodeKind::Template(tpl) = &arena[id].get().kind
        && let Some(content) = tpl.content
    {
        return content;
    }

    let content = arena.new_node(NodeData::html(NodeKind::Fragment));
    if let NodeKind::Template(tpl) = &mut arena[id].get_mut().kind {
        tpl.content = Some(content);
    }
    content
}
