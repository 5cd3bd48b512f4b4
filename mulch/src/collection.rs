//! Ordered, non-owning lists of node references.
//!
//! A [`Collection`] accumulates query results: it refers to nodes by
//! [`NodeId`] without owning them, permits duplicates, and is created and
//! destroyed independently of the tree. Growth goes through `try_reserve`
//! so an allocation failure surfaces as [`Error::Alloc`] with the
//! collection left exactly as it was.

use indextree::NodeId;

use crate::error::{Error, Result};

/// An ordered, resizable sequence of node references.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    items: Vec<NodeId>,
}

impl Collection {
    /// Create an empty collection pre-sized to `size_hint` entries.
    pub fn with_capacity(size_hint: usize) -> Result<Self> {
        let mut items = Vec::new();
        items.try_reserve(size_hint)?;
        Ok(Collection { items })
    }

    /// Append a node reference. Amortized constant time; on allocation
    /// failure nothing is appended.
    pub fn append(&mut self, node: NodeId) -> Result<()> {
        self.items.try_reserve(1)?;
        self.items.push(node);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<NodeId> {
        self.items.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.items.iter().copied()
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.items
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl Extend<NodeId> for Collection {
    fn extend<I: IntoIterator<Item = NodeId>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}
