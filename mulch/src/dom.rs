//! Node model: the tagged variants stored in a document's arena.
//!
//! Every node of a [`crate::Document`] is one arena slot holding a
//! [`NodeData`]. The kind tag is a closed enum - there is no open class
//! hierarchy to cast across, so the "downcasts" here are checked accessor
//! methods that return `None` on a kind mismatch. Tag identity checks go
//! through [`NodeData::tag_matches`] with interned [`LocalName`] values from
//! html5ever's tag table.

use html5ever::LocalName;
use indexmap::IndexMap;
use indextree::NodeId;
use tendril::StrTendril;

/// XML namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Namespace {
    /// HTML namespace (default)
    #[default]
    Html,
    /// SVG namespace
    Svg,
    /// MathML namespace
    MathMl,
}

impl Namespace {
    pub fn from_url(url: &str) -> Self {
        match url {
            "http://www.w3.org/2000/svg" => Namespace::Svg,
            "http://www.w3.org/1998/Math/MathML" => Namespace::MathMl,
            _ => Namespace::Html,
        }
    }

    /// Returns the namespace URI.
    pub fn url(&self) -> &'static str {
        match self {
            Namespace::Html => "http://www.w3.org/1999/xhtml",
            Namespace::Svg => "http://www.w3.org/2000/svg",
            Namespace::MathMl => "http://www.w3.org/1998/Math/MathML",
        }
    }
}

/// What goes in each arena slot
#[derive(Debug, Clone)]
pub struct NodeData {
    pub kind: NodeKind,
    pub ns: Namespace,
}

impl NodeData {
    /// Shorthand for an HTML-namespace node of the given kind.
    pub fn html(kind: NodeKind) -> Self {
        NodeData {
            kind,
            ns: Namespace::Html,
        }
    }

    /// Checked element view. Templates are elements too, so this succeeds
    /// for both `Element` and `Template` kinds.
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.kind {
            NodeKind::Element(elem) => Some(elem),
            NodeKind::Template(tpl) => Some(&tpl.element),
            _ => None,
        }
    }

    /// Mutable counterpart of [`NodeData::as_element`].
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.kind {
            NodeKind::Element(elem) => Some(elem),
            NodeKind::Template(tpl) => Some(&mut tpl.element),
            _ => None,
        }
    }

    /// Checked template view. `None` for every other kind, including plain
    /// elements that merely look template-ish.
    pub fn as_template(&self) -> Option<&TemplateData> {
        match &self.kind {
            NodeKind::Template(tpl) => Some(tpl),
            _ => None,
        }
    }

    /// Checked text view.
    pub fn as_text(&self) -> Option<&StrTendril> {
        match &self.kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_element(&self) -> bool {
        self.as_element().is_some()
    }

    pub fn is_template(&self) -> bool {
        matches!(self.kind, NodeKind::Template(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text(_))
    }

    pub fn is_fragment(&self) -> bool {
        matches!(self.kind, NodeKind::Fragment)
    }

    /// Tag identity check: true only for element-kind nodes in the HTML
    /// namespace whose tag equals `name`. This is the safe way to test
    /// "is this a template/body/..." before reaching for an accessor.
    pub fn tag_matches(&self, name: &LocalName) -> bool {
        self.ns == Namespace::Html
            && self
                .as_element()
                .is_some_and(|elem| elem.tag.as_ref() == name.as_ref())
    }
}

/// Node kinds
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Document root (invisible, parent of `<html>`)
    Document,
    /// Rootless container: fragment-parse results and template content
    Fragment,
    /// Element with tag and attributes
    Element(ElementData),
    /// `<template>` element with lazily materialized content
    Template(TemplateData),
    /// Text content (StrTendril is refcounted - cheap to clone)
    Text(StrTendril),
    /// HTML comment (also used for processing instructions)
    Comment(StrTendril),
}

/// Element data (tag + attributes)
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Tag name (StrTendril shares buffer with source via refcounting)
    pub tag: StrTendril,

    /// Attributes - keys are String, values are StrTendril.
    /// IndexMap preserves insertion order from HTML.
    pub attrs: IndexMap<String, StrTendril>,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        ElementData {
            tag: StrTendril::from(tag),
            attrs: IndexMap::new(),
        }
    }
}

/// Template data: the element part plus the content fragment, which is
/// created at most once per template and lives in the same arena as the
/// template itself (detached from the main tree).
#[derive(Debug, Clone)]
pub struct TemplateData {
    pub element: ElementData,

    /// `None` until content is first requested.
    pub content: Option<NodeId>,
}

impl TemplateData {
    pub fn new() -> Self {
        TemplateData {
            element: ElementData::new("template"),
            content: None,
        }
    }
}

impl Default for TemplateData {
    fn default() -> Self {
        Self::new()
    }
}
