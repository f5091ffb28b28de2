use std::cmp::Ordering;

use smallvec::SmallVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::index::TreeIndex;
use crate::model::{Node, NodeKey};

/// Total order over nodes by `id`.
#[inline]
pub fn compare_items<K: Ord, T>(a: &Node<K, T>, b: &Node<K, T>) -> Ordering {
    a.id.cmp(&b.id)
}

/// Returns the node with `id`, or `None` if the tree has no such node.
pub fn get_tree_item<'a, K: PartialEq, T>(
    tree: &'a [Node<K, T>],
    id: &K,
) -> Option<&'a Node<K, T>> {
    tree.iter().find(|node| &node.id == id)
}

/// Returns the flat position of the node with `id`.
pub fn get_tree_index<K: PartialEq, T>(tree: &[Node<K, T>], id: &K) -> Option<usize> {
    tree.iter().position(|node| &node.id == id)
}

/// How siblings are ordered when listed for rendering.
///
/// With the `serde` feature enabled, this type derives `Serialize`/`Deserialize`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewOptions {
    /// Sort siblings with [`compare_items`] instead of keeping flat order.
    pub sort: bool,
    /// List container nodes before leaves.
    pub insert_droppable_first: bool,
}

impl ViewOptions {
    /// Siblings in flat-sequence order.
    pub const fn flat() -> Self {
        Self {
            sort: false,
            insert_droppable_first: false,
        }
    }

    /// Siblings sorted by id, containers first.
    pub const fn sorted() -> Self {
        Self {
            sort: true,
            insert_droppable_first: true,
        }
    }
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self::flat()
    }
}

impl<'a, K: NodeKey, T> TreeIndex<'a, K, T> {
    /// Children of `parent`, ordered according to `options`.
    pub fn children_of(&self, parent: &K, options: ViewOptions) -> SmallVec<[&'a Node<K, T>; 8]> {
        let tree = self.tree();
        let mut children: SmallVec<[&'a Node<K, T>; 8]> =
            self.children(parent).iter().map(|&pos| &tree[pos]).collect();
        if options.sort {
            children.sort_by(|a, b| compare_items(a, b));
        }
        if options.insert_droppable_first {
            // Stable, so the order chosen above holds within each group.
            children.sort_by_key(|node| !node.droppable);
        }
        children
    }
}

/// Children of `parent`, ordered according to `options`.
pub fn children_of<'a, K: NodeKey, T>(
    tree: &'a [Node<K, T>],
    parent: &K,
    options: ViewOptions,
) -> Vec<&'a Node<K, T>> {
    TreeIndex::new(tree)
        .children_of(parent, options)
        .into_vec()
}
