use std::fmt::Debug;
use std::hash::Hash;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Node identifier contract.
///
/// Keys are opaque to the engine: they only need equality, a total order
/// (for [`compare_items`](crate::compare_items)), hashing (for
/// [`TreeIndex`](crate::TreeIndex)) and `Debug` for log fields. Integers and
/// strings both qualify.
pub trait NodeKey: Clone + Ord + Hash + Debug {}

impl<K: Clone + Ord + Hash + Debug> NodeKey for K {}

/// One entry of a flat, parent-linked tree.
///
/// A tree is a slice of nodes; slice order is the render order the
/// reordering operations work on. `parent` is either another node's `id` or
/// the caller's root sentinel, which never appears as a node itself.
///
/// With the `serde` feature enabled, this type derives `Serialize`/`Deserialize`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node<K, T = ()> {
    /// Unique identifier within the tree.
    pub id: K,
    /// Identifier of the parent node, or the root sentinel.
    pub parent: K,
    /// Whether other nodes may be dropped into this node.
    pub droppable: bool,
    /// Display label.
    pub text: String,
    /// Caller payload.
    pub data: Option<T>,
}

impl<K, T> Node<K, T> {
    /// Creates a leaf node without payload.
    pub fn new(id: K, parent: K, text: impl Into<String>) -> Self {
        Self {
            id,
            parent,
            droppable: false,
            text: text.into(),
            data: None,
        }
    }

    /// Creates a container node (one that accepts children) without payload.
    pub fn container(id: K, parent: K, text: impl Into<String>) -> Self {
        Self {
            droppable: true,
            ..Self::new(id, parent, text)
        }
    }

    /// Sets whether the node accepts children.
    #[must_use]
    pub fn with_droppable(mut self, droppable: bool) -> Self {
        self.droppable = droppable;
        self
    }

    /// Attaches a payload.
    #[must_use]
    pub fn with_data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }
}

/// Decides whether a node's children are emitted by [`tree_rows`](crate::tree_rows).
///
/// This is the seam for an external open/closed state layer: it narrows what
/// gets rendered but never changes order or parent links.
pub trait TreeFilter<K> {
    /// Returns `true` if the children of `id` should be listed.
    fn is_expanded(&self, id: &K) -> bool;
}

impl<K, F> TreeFilter<K> for F
where
    F: Fn(&K) -> bool,
{
    #[inline]
    fn is_expanded(&self, id: &K) -> bool {
        self(id)
    }
}

/// Filter that expands every node.
#[derive(Clone, Copy, Debug)]
pub struct NoFilter;

impl<K> TreeFilter<K> for NoFilter {
    #[inline]
    fn is_expanded(&self, _id: &K) -> bool {
        true
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::Node;

    /// Seven-node sample: 1, 4, 7 under root 0; 2, 3 under 1; 5 under 4; 6 under 5.
    pub(crate) fn sample_tree() -> Vec<Node<u32>> {
        vec![
            Node::container(1, 0, "Folder 1"),
            Node::new(2, 1, "File 1-1"),
            Node::new(3, 1, "File 1-2"),
            Node::container(4, 0, "Folder 2"),
            Node::container(5, 4, "Folder 2-1"),
            Node::new(6, 5, "File 2-1-1"),
            Node::new(7, 0, "File 3"),
        ]
    }

    pub(crate) fn ids<T>(tree: &[Node<u32, T>]) -> Vec<u32> {
        tree.iter().map(|node| node.id).collect()
    }
}
