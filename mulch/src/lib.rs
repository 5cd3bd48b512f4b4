//! Document-scoped HTML DOM arena.
//!
//! mulch provides:
//! - **Arena documents**: a [`Document`] owns every node it creates in one
//!   `indextree` arena - the owning-document relationship is the arena
//!   itself, and teardown is strictly document-scoped
//! - **Typed nodes**: a closed [`NodeKind`] over document, fragment,
//!   element, template, text, and comment nodes with checked accessors
//! - **Template content**: `<template>` nodes own a lazily materialized
//!   content fragment, disjoint from the main tree
//! - **Cross-document import**: deep-clone a subtree into another document
//!   with ownership reassigned, the source left untouched
//! - **Parsing**: browser-compatible HTML5 parsing via html5ever, straight
//!   into the arena, including fragment-container parses
//!
//! # Example
//!
//! ```rust
//! use mulch::{Document, parse_fragment};
//!
//! // Build a document by hand
//! let mut doc = Document::new();
//! let tpl = doc.create_template_element();
//! let content = doc.template_content(tpl).unwrap();
//! let div = doc.create_element("div");
//! doc.append_child(content, div);
//!
//! // Same fragment on every access
//! assert_eq!(doc.template_content(tpl).unwrap(), content);
//!
//! // Parse markup as a standalone fragment container
//! let frag = parse_fragment(b"<p>Hello!</p>").unwrap();
//! assert!(frag.body().is_none());
//!
//! // Import the fragment's content into our document
//! let imported = doc.import_node(&frag, frag.root, true);
//! assert_eq!(doc.children(imported).count(), 1);
//! ```

mod tracing_macros;

pub mod collection;
pub mod document;
pub mod dom;
pub mod error;
pub mod parser;
mod tree_dump;

pub use collection::Collection;
pub use document::{Document, ParseMode};
pub use dom::{ElementData, Namespace, NodeData, NodeKind, TemplateData};
pub use error::{Error, Result};
pub use parser::{parse_document_bytes, parse_document_str, parse_fragment};
pub use tree_dump::TreeDump;

// The handle, string, and tag-name types callers hold
pub use html5ever::{LocalName, local_name};
pub use indextree::NodeId;
pub use tendril::StrTendril;
