use tracing::instrument;

use crate::error::{TreeError, TreeResult};
use crate::model::{Node, NodeKey};
use crate::order::get_tree_index;
use crate::reorder::get_modified_index;

/// Returns a copy of `tree` with `drag_id` moved from `source_index` to
/// `destination_index` and re-parented under `new_parent`.
///
/// Every node is cloned; the input is left untouched and later edits to it
/// never reach the result. `destination_index` is relative to the sequence
/// with the dragged node removed, as produced by
/// [`get_modified_index`](crate::get_modified_index).
///
/// # Errors
///
/// - [`TreeError::NodeNotFound`] if `drag_id` is not in the tree.
/// - [`TreeError::IndexOutOfBounds`] if either index falls outside the tree.
/// - [`TreeError::IndexMismatch`] if `source_index` holds a different node.
#[instrument(level = "trace", skip(tree))]
pub fn mutate_tree_with_index<K: NodeKey, T: Clone>(
    tree: &[Node<K, T>],
    drag_id: &K,
    new_parent: K,
    source_index: usize,
    destination_index: usize,
) -> TreeResult<Vec<Node<K, T>>> {
    let len = tree.len();
    let source = tree.get(source_index).ok_or(TreeError::IndexOutOfBounds {
        index: source_index,
        len,
    })?;
    if &source.id != drag_id {
        if get_tree_index(tree, drag_id).is_none() {
            return Err(TreeError::not_found(drag_id));
        }
        return Err(TreeError::IndexMismatch {
            index: source_index,
            expected: format!("{drag_id:?}"),
            found: format!("{:?}", source.id),
        });
    }
    if destination_index >= len {
        return Err(TreeError::IndexOutOfBounds {
            index: destination_index,
            len,
        });
    }

    let mut next = tree.to_vec();
    let mut moved = next.remove(source_index);
    moved.parent = new_parent;
    next.insert(destination_index, moved);
    Ok(next)
}

/// Moves `drag_id` to child slot `index` of `drop_id` in one call.
///
/// Combines [`get_modified_index`] and [`mutate_tree_with_index`]; the move
/// is not validated.
///
/// # Errors
///
/// [`TreeError::NodeNotFound`] if `drag_id` is not in the tree.
pub fn move_node<K: NodeKey, T: Clone>(
    tree: &[Node<K, T>],
    drag_id: &K,
    drop_id: K,
    index: usize,
) -> TreeResult<Vec<Node<K, T>>> {
    let (source, destination) = get_modified_index(tree, drag_id, &drop_id, index)?;
    mutate_tree_with_index(tree, drag_id, drop_id, source, destination)
}

/// Re-parents `drag_id` under `new_parent` without changing sequence order.
///
/// Used when siblings are rendered sorted, where flat position carries no meaning.
///
/// # Errors
///
/// [`TreeError::NodeNotFound`] if `drag_id` is not in the tree.
#[instrument(level = "trace", skip(tree))]
pub fn mutate_tree<K: NodeKey, T: Clone>(
    tree: &[Node<K, T>],
    drag_id: &K,
    new_parent: K,
) -> TreeResult<Vec<Node<K, T>>> {
    let pos = get_tree_index(tree, drag_id).ok_or_else(|| TreeError::not_found(drag_id))?;
    let mut next = tree.to_vec();
    next[pos].parent = new_parent;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{ids, sample_tree};

    fn two_nodes() -> Vec<Node<u32>> {
        vec![Node::container(1, 0, "a"), Node::container(2, 0, "b")]
    }

    #[test]
    fn moves_into_leading_slot() {
        let before = two_nodes();
        let after = move_node(&before, &2, 1, 0).unwrap();

        assert_eq!(
            after,
            vec![Node::container(2, 1, "b"), Node::container(1, 0, "a")]
        );
    }

    #[test]
    fn result_is_detached_from_input() {
        let mut before = two_nodes();
        let after = mutate_tree_with_index(&before, &2, 1, 1, 0).unwrap();

        before[1].text = "c".to_string();
        before[0].parent = 9;

        assert_eq!(after[0].text, "b");
        assert_eq!(after[1].parent, 0);
        assert_eq!(before[1].parent, 0);
    }

    #[test]
    fn preserves_ids_and_other_parents() {
        let tree = sample_tree();
        let after = move_node(&tree, &7, 5, 1).unwrap();

        let mut before_ids = ids(&tree);
        let mut after_ids = ids(&after);
        before_ids.sort_unstable();
        after_ids.sort_unstable();
        assert_eq!(before_ids, after_ids);

        for node in &after {
            let original = tree.iter().find(|n| n.id == node.id).unwrap();
            if node.id == 7 {
                assert_eq!(node.parent, 5);
            } else {
                assert_eq!(node.parent, original.parent);
            }
        }
        assert_eq!(ids(&after), vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn moves_forward_and_backward() {
        let tree = sample_tree();

        let forward = move_node(&tree, &1, 0, 2).unwrap();
        assert_eq!(ids(&forward), vec![2, 3, 4, 5, 6, 1, 7]);

        let backward = move_node(&tree, &7, 1, 1).unwrap();
        assert_eq!(ids(&backward), vec![1, 2, 7, 3, 4, 5, 6]);
        let under_one: Vec<u32> = backward
            .iter()
            .filter(|n| n.parent == 1)
            .map(|n| n.id)
            .collect();
        assert_eq!(under_one, vec![2, 7, 3]);
    }

    #[test]
    fn rejects_bad_indices() {
        let tree = sample_tree();

        assert_eq!(
            mutate_tree_with_index(&tree, &7, 0, 9, 0),
            Err(TreeError::IndexOutOfBounds { index: 9, len: 7 })
        );
        assert_eq!(
            mutate_tree_with_index(&tree, &7, 0, 6, 7),
            Err(TreeError::IndexOutOfBounds { index: 7, len: 7 })
        );
        assert_eq!(
            mutate_tree_with_index(&tree, &7, 0, 0, 0),
            Err(TreeError::IndexMismatch {
                index: 0,
                expected: "7".into(),
                found: "1".into(),
            })
        );
        assert_eq!(
            mutate_tree_with_index(&tree, &42, 0, 0, 0),
            Err(TreeError::NodeNotFound("42".into()))
        );
    }

    #[test]
    fn reparents_in_place() {
        let tree = sample_tree();
        let after = mutate_tree(&tree, &6, 1).unwrap();

        assert_eq!(ids(&after), ids(&tree));
        assert_eq!(after[5].parent, 1);
        assert_eq!(tree[5].parent, 5);
        assert!(mutate_tree(&tree, &42, 1).is_err());
    }
}
