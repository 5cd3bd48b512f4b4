//! Structural outlines for debugging and tests.
//!
//! [`TreeDump`] pretty-prints a subtree: kind, tag, attributes, and child
//! structure, recursively, including materialized template content. Two
//! subtrees with equal dumps are structurally equal, which is what the
//! import/clone tests compare.

use indextree::NodeId;

use crate::document::Document;
use crate::dom::{ElementData, NodeKind};

/// Display adapter over a document subtree.
#[derive(Debug)]
pub struct TreeDump<'a> {
    doc: &'a Document,
    root: NodeId,
}

impl Document {
    /// Structural outline of the subtree rooted at `id`.
    pub fn dump(&self, id: NodeId) -> TreeDump<'_> {
        TreeDump { doc: self, root: id }
    }
}

impl std::fmt::Display for TreeDump<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_node(f, self.root, 0)
    }
}

impl TreeDump<'_> {
    fn fmt_node(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        node: NodeId,
        depth: usize,
    ) -> std::fmt::Result {
        let indent = "  ".repeat(depth);
        let data = self.doc.get(node);

        match &data.kind {
            NodeKind::Document => {
                writeln!(f, "{indent}#document")?;
                self.fmt_children(f, node, depth + 1)?;
            }
            NodeKind::Fragment => {
                writeln!(f, "{indent}#fragment")?;
                self.fmt_children(f, node, depth + 1)?;
            }
            NodeKind::Element(elem) => {
                self.fmt_element(f, node, elem, depth, None)?;
            }
            NodeKind::Template(tpl) => {
                self.fmt_element(f, node, &tpl.element, depth, tpl.content)?;
            }
            NodeKind::Text(text) => {
                writeln!(f, "{indent}TEXT: {:?}", text.as_ref())?;
            }
            NodeKind::Comment(text) => {
                writeln!(f, "{indent}COMMENT: {:?}", text.as_ref())?;
            }
        }
        Ok(())
    }

    fn fmt_element(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        node: NodeId,
        elem: &ElementData,
        depth: usize,
        content: Option<NodeId>,
    ) -> std::fmt::Result {
        let indent = "  ".repeat(depth);
        let tag = elem.tag.as_ref();

        write!(f, "{indent}<{tag}")?;
        for (name, value) in &elem.attrs {
            write!(f, " {name}={:?}", value.as_ref())?;
        }
        writeln!(f, ">")?;

        if let Some(content) = content {
            writeln!(f, "{indent}  CONTENT:")?;
            self.fmt_node(f, content, depth + 2)?;
        }

        self.fmt_children(f, node, depth + 1)?;
        writeln!(f, "{indent}</{tag}>")
    }

    fn fmt_children(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        node: NodeId,
        depth: usize,
    ) -> std::fmt::Result {
        for child in self.doc.children(node) {
            self.fmt_node(f, child, depth)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse_document_str;

    #[test]
    fn test_dump_shape() {
        let doc = parse_document_str(
            r#"<html><body><div id="a">hi<!-- c --></div></body></html>"#,
        );
        let body = doc.body().unwrap();
        let dump = doc.dump(body).to_string();

        assert_eq!(
            dump,
            "<body>\n  <div id=\"a\">\n    TEXT: \"hi\"\n    COMMENT: \" c \"\n  </div>\n</body>\n"
        );
    }
}
