use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};
use smallvec::SmallVec;
use tracing::warn;

use crate::error::{TreeError, TreeResult};
use crate::model::{Node, NodeKey};

/// Lookup tables over a borrowed flat tree.
///
/// Built in one pass: id -> flat position, and parent id -> positions of its
/// children in flat order. Queries that need more than one lookup go through
/// this index so they stay linear in the tree size.
#[derive(Debug)]
pub struct TreeIndex<'a, K, T = ()> {
    tree: &'a [Node<K, T>],
    positions: FxHashMap<&'a K, usize>,
    children: FxHashMap<&'a K, SmallVec<[usize; 8]>>,
}

impl<'a, K: NodeKey, T> TreeIndex<'a, K, T> {
    /// Indexes `tree`. If ids repeat, the first occurrence wins.
    pub fn new(tree: &'a [Node<K, T>]) -> Self {
        let mut positions = FxHashMap::with_capacity_and_hasher(tree.len(), FxBuildHasher);
        let mut children: FxHashMap<&'a K, SmallVec<[usize; 8]>> =
            FxHashMap::with_capacity_and_hasher(tree.len(), FxBuildHasher);
        for (pos, node) in tree.iter().enumerate() {
            positions.entry(&node.id).or_insert(pos);
            children.entry(&node.parent).or_default().push(pos);
        }
        Self {
            tree,
            positions,
            children,
        }
    }

    /// The indexed tree.
    #[inline]
    pub const fn tree(&self) -> &'a [Node<K, T>] {
        self.tree
    }

    /// Flat position of the node with `id`.
    #[inline]
    pub fn position(&self, id: &K) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Returns `true` if a node with `id` exists.
    #[inline]
    pub fn contains(&self, id: &K) -> bool {
        self.positions.contains_key(id)
    }

    /// The node with `id`.
    #[inline]
    pub fn node(&self, id: &K) -> Option<&'a Node<K, T>> {
        self.position(id).map(|pos| &self.tree[pos])
    }

    /// Flat positions of the children of `parent`, in flat order.
    #[inline]
    pub fn children(&self, parent: &K) -> &[usize] {
        self.children
            .get(parent)
            .map(SmallVec::as_slice)
            .unwrap_or_default()
    }

    /// Returns `true` if `ancestor` is reached by following parent links up from `id`.
    ///
    /// The root sentinel is the ancestor of every node; no node is its own
    /// ancestor. On malformed input the answer is `false` for any pair that
    /// sits on one parent-link cycle, so the relation stays irreflexive and
    /// antisymmetric.
    pub fn is_ancestor(&self, ancestor: &K, id: &K) -> bool {
        ancestor != id && self.reaches(id, ancestor) && !self.reaches(ancestor, id)
    }

    /// Follows parent links up from `id` looking for `target`, for at most
    /// `tree.len()` steps.
    pub(crate) fn reaches(&self, id: &K, target: &K) -> bool {
        let Some(mut current) = self.node(id) else {
            return false;
        };
        for _ in 0..self.tree.len() {
            if &current.parent == target {
                return true;
            }
            match self.node(&current.parent) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
        warn!(?id, ?target, "parent links form a cycle");
        false
    }

    /// Flat positions of `id` and every node above it, stopping at the first
    /// repeat.
    fn upward_chain(&self, id: &K) -> FxHashSet<usize> {
        let mut chain = FxHashSet::default();
        let mut cursor = self.position(id);
        while let Some(pos) = cursor {
            if !chain.insert(pos) {
                break;
            }
            cursor = self.position(&self.tree[pos].parent);
        }
        chain
    }

    /// Parent ids from `id` upward, ending with the first parent that is not a node.
    pub fn ancestor_path(&self, id: &K) -> TreeResult<Vec<K>> {
        let mut current = self.node(id).ok_or_else(|| TreeError::not_found(id))?;
        let mut path = Vec::new();
        for _ in 0..self.tree.len() {
            path.push(current.parent.clone());
            match self.node(&current.parent) {
                Some(parent) => current = parent,
                None => return Ok(path),
            }
        }
        warn!(?id, "parent links form a cycle");
        Err(TreeError::cycle(id))
    }

    /// All nodes below `id`, in flat order.
    ///
    /// Each node's verdict is memoized along the chain that produced it, so
    /// the whole scan is linear. Nodes caught in a parent-link cycle are left
    /// out, and so is `id` itself.
    pub fn descendants(&self, id: &K) -> Vec<&'a Node<K, T>> {
        let len = self.tree.len();
        let mut memo: Vec<Option<bool>> = vec![None; len];
        let mut path: SmallVec<[usize; 16]> = SmallVec::new();

        for start in 0..len {
            path.clear();
            let mut cursor = start;
            let verdict = loop {
                if let Some(known) = memo[cursor] {
                    break known;
                }
                path.push(cursor);
                let node = &self.tree[cursor];
                if &node.parent == id {
                    break true;
                }
                match self.position(&node.parent) {
                    Some(_) if path.len() > len => {
                        warn!(?id, "parent links form a cycle");
                        break false;
                    }
                    Some(next) => cursor = next,
                    None => break false,
                }
            };
            for &pos in &path {
                memo[pos] = Some(verdict);
            }
        }

        // A node above `id` that also lies below it sits on a cycle through `id`.
        let above = self.upward_chain(id);
        self.tree
            .iter()
            .zip(memo)
            .enumerate()
            .filter_map(|(pos, (node, verdict))| {
                (verdict == Some(true) && !above.contains(&pos)).then_some(node)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::sample_tree;

    fn descendant_ids(index: &TreeIndex<'_, u32>, id: u32) -> Vec<u32> {
        index.descendants(&id).iter().map(|node| node.id).collect()
    }

    #[test]
    fn indexes_positions_and_children() {
        let tree = sample_tree();
        let index = TreeIndex::new(&tree);

        assert_eq!(index.position(&7), Some(6));
        assert_eq!(index.position(&0), None);
        assert!(index.contains(&5));
        assert_eq!(index.children(&0), &[0, 3, 6]);
        assert_eq!(index.children(&1), &[1, 2]);
        assert!(index.children(&7).is_empty());
    }

    #[test]
    fn ancestor_path_ends_at_root() {
        let tree = sample_tree();
        let index = TreeIndex::new(&tree);

        assert_eq!(index.ancestor_path(&6), Ok(vec![5, 4, 0]));
        assert_eq!(index.ancestor_path(&1), Ok(vec![0]));
        assert_eq!(
            index.ancestor_path(&9),
            Err(TreeError::NodeNotFound("9".to_string()))
        );
    }

    #[test]
    fn cycles_terminate() {
        let tree = vec![
            Node::<u32>::container(1, 2, "a"),
            Node::container(2, 1, "b"),
            Node::container(3, 0, "c"),
            Node::new(4, 1, "d"),
        ];
        let index = TreeIndex::new(&tree);

        assert!(!index.is_ancestor(&0, &1));
        assert!(!index.is_ancestor(&3, &4));
        assert!(matches!(index.ancestor_path(&4), Err(TreeError::Cycle(_))));
        assert!(index.descendants(&3).is_empty());
        assert_eq!(descendant_ids(&index, 0), vec![3]);
        assert_eq!(descendant_ids(&index, 1), vec![4]);
        assert_eq!(descendant_ids(&index, 2), vec![4]);
    }

    #[test]
    fn cycle_members_are_not_their_own_ancestors() {
        let tree = vec![Node::<u32>::container(1, 2, "a"), Node::container(2, 1, "b")];
        let index = TreeIndex::new(&tree);

        assert!(!index.is_ancestor(&1, &1));
        assert!(!index.is_ancestor(&2, &2));
        assert!(!index.is_ancestor(&1, &2));
        assert!(!index.is_ancestor(&2, &1));
        assert!(index.descendants(&1).is_empty());
        assert!(index.descendants(&2).is_empty());
    }

    #[test]
    fn nodes_hanging_off_a_cycle_keep_their_ancestry() {
        let tree = vec![
            Node::<u32>::container(1, 2, "a"),
            Node::container(2, 1, "b"),
            Node::new(4, 1, "d"),
        ];
        let index = TreeIndex::new(&tree);

        assert!(index.is_ancestor(&1, &4));
        assert!(index.is_ancestor(&2, &4));
        assert!(!index.is_ancestor(&4, &1));
        for candidate in [1, 2, 4] {
            let below = descendant_ids(&index, candidate);
            for node in &tree {
                assert_eq!(
                    below.contains(&node.id),
                    index.is_ancestor(&candidate, &node.id),
                    "{candidate} / {}",
                    node.id
                );
            }
        }
    }
}
