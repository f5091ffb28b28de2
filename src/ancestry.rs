use tracing::instrument;

use crate::error::TreeResult;
use crate::index::TreeIndex;
use crate::model::{Node, NodeKey};

/// Returns `true` if `ancestor` lies on the parent chain of `id`.
///
/// The root sentinel counts as an ancestor of every node, and no node is its
/// own ancestor. On a malformed tree, nodes on a shared parent-link cycle are
/// not ancestors of each other.
#[instrument(level = "trace", skip(tree))]
pub fn is_ancestor<K: NodeKey, T>(tree: &[Node<K, T>], ancestor: &K, id: &K) -> bool {
    TreeIndex::new(tree).is_ancestor(ancestor, id)
}

/// Every node that has `id` as an ancestor, in flat order. Never includes `id`.
#[instrument(level = "trace", skip(tree))]
pub fn get_descendants<'a, K: NodeKey, T>(
    tree: &'a [Node<K, T>],
    id: &K,
) -> Vec<&'a Node<K, T>> {
    TreeIndex::new(tree).descendants(id)
}

/// Parent ids of `id`, nearest first, ending with the root sentinel.
///
/// # Errors
///
/// [`TreeError::NodeNotFound`](crate::TreeError::NodeNotFound) if `id` is not in
/// the tree, [`TreeError::Cycle`](crate::TreeError::Cycle) if the parent links
/// loop before reaching a non-node parent.
pub fn ancestor_path<K: NodeKey, T>(tree: &[Node<K, T>], id: &K) -> TreeResult<Vec<K>> {
    TreeIndex::new(tree).ancestor_path(id)
}

/// Nesting depth of `id`; nodes directly under the root have depth 0.
///
/// # Errors
///
/// Same as [`ancestor_path`].
pub fn depth_of<K: NodeKey, T>(tree: &[Node<K, T>], id: &K) -> TreeResult<usize> {
    ancestor_path(tree, id).map(|path| path.len().saturating_sub(1))
}
