use rustc_hash::{FxBuildHasher, FxHashSet};
use smallvec::SmallVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::index::TreeIndex;
use crate::model::{Node, NodeKey, TreeFilter};
use crate::order::ViewOptions;

/// A rendered row: one node plus the metadata a renderer needs for indentation and guides.
///
/// With the `serde` feature enabled, this type derives `Serialize`/`Deserialize`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeRow<K> {
    /// Id of the node on this row.
    pub id: K,
    /// Its parent id (the root sentinel for top-level rows).
    pub parent: K,
    /// Nesting depth; children of the root are level 0.
    pub level: u16,
    /// Whether the node has any children, expanded or not.
    pub has_children: bool,
    /// For each level above and including this row, whether that ancestor is
    /// its parent's last child.
    pub is_tail_stack: SmallVec<[bool; 8]>,
}

/// Depth-first rows below `root`, siblings ordered by `options`.
///
/// `filter` decides whose children are listed; collapsed nodes still get
/// their own row. Every node appears at most once, even on malformed input.
pub fn tree_rows<K, T, F>(
    tree: &[Node<K, T>],
    root: &K,
    options: ViewOptions,
    filter: &F,
) -> Vec<TreeRow<K>>
where
    K: NodeKey,
    F: TreeFilter<K> + ?Sized,
{
    let index = TreeIndex::new(tree);
    let mut walker = RowWalker {
        index: &index,
        options,
        filter,
        seen: FxHashSet::with_capacity_and_hasher(tree.len(), FxBuildHasher),
        is_tail_stack: SmallVec::new(),
        rows: Vec::with_capacity(tree.len()),
    };
    walker.push_children(root, 0);
    walker.rows
}

struct RowWalker<'i, 'a, K, T, F: ?Sized> {
    index: &'i TreeIndex<'a, K, T>,
    options: ViewOptions,
    filter: &'i F,
    seen: FxHashSet<&'a K>,
    is_tail_stack: SmallVec<[bool; 8]>,
    rows: Vec<TreeRow<K>>,
}

impl<'a, K, T, F> RowWalker<'_, 'a, K, T, F>
where
    K: NodeKey,
    F: TreeFilter<K> + ?Sized,
{
    fn push_children(&mut self, parent: &K, level: u16) {
        let children = self.index.children_of(parent, self.options);
        let last = children.len().saturating_sub(1);
        for (i, node) in children.into_iter().enumerate() {
            if !self.seen.insert(&node.id) {
                continue;
            }
            self.is_tail_stack.push(i == last);
            let has_children = !self.index.children(&node.id).is_empty();
            self.rows.push(TreeRow {
                id: node.id.clone(),
                parent: node.parent.clone(),
                level,
                has_children,
                is_tail_stack: self.is_tail_stack.clone(),
            });
            if has_children && self.filter.is_expanded(&node.id) {
                self.push_children(&node.id, level.saturating_add(1));
            }
            self.is_tail_stack.pop();
        }
    }
}
