use tracing::{debug, instrument};

use crate::error::{DropRejection, TreeResult};
use crate::index::TreeIndex;
use crate::model::{Node, NodeKey};
use crate::mutate::mutate_tree_with_index;
use crate::validate::DropContext;

/// Moves a caller can request on the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeAction<K> {
    /// Place `drag` as child number `index` of `target`.
    Drop { drag: K, target: K, index: usize },
    /// Change the parent of `drag` without moving it in the sequence.
    Reparent { drag: K, target: K },
    /// Move the node one slot up within its siblings.
    ReorderUp(K),
    /// Move the node one slot down within its siblings.
    ReorderDown(K),
}

/// Result of handling a [`TreeAction`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeEvent<K, T = ()> {
    /// The move was applied; `tree` is the new sequence.
    Moved {
        tree: Vec<Node<K, T>>,
        source_index: usize,
        destination_index: usize,
    },
    /// The drop validator refused the move.
    Rejected(DropRejection),
    /// Nothing to do (e.g., first sibling moved up, or an unknown node).
    Unhandled,
}

impl<K: NodeKey, T: Clone> DropContext<'_, K, T> {
    /// Validates, translates and applies `action` against this context's tree.
    ///
    /// The context's tree is not modified; a successful move returns the new
    /// sequence in [`TreeEvent::Moved`].
    ///
    /// # Errors
    ///
    /// Only on internal inconsistency between the translated indices and the
    /// tree; validated actions do not fail.
    #[instrument(level = "trace", skip(self))]
    pub fn handle_action(&self, action: TreeAction<K>) -> TreeResult<TreeEvent<K, T>> {
        let index = TreeIndex::new(self.tree);
        match action {
            TreeAction::Drop {
                drag,
                target,
                index: slot,
            } => {
                if let Err(reason) = self.check_with(&index, &drag, &target) {
                    debug!(?drag, ?target, %reason, "drop rejected");
                    return Ok(TreeEvent::Rejected(reason));
                }
                let (source, destination) = index.modified_index(&drag, &target, slot)?;
                self.splice(&drag, target, source, destination)
            }
            TreeAction::Reparent { drag, target } => {
                if let Err(reason) = self.check_with(&index, &drag, &target) {
                    debug!(?drag, ?target, %reason, "reparent rejected");
                    return Ok(TreeEvent::Rejected(reason));
                }
                let Some(pos) = index.position(&drag) else {
                    return Ok(TreeEvent::Unhandled);
                };
                self.splice(&drag, target, pos, pos)
            }
            TreeAction::ReorderUp(id) => {
                let Some(slot) = index.sibling_slot(&id) else {
                    return Ok(TreeEvent::Unhandled);
                };
                if slot == 0 {
                    return Ok(TreeEvent::Unhandled);
                }
                self.shift(&index, &id, slot - 1)
            }
            TreeAction::ReorderDown(id) => {
                let (Some(node), Some(slot)) = (index.node(&id), index.sibling_slot(&id)) else {
                    return Ok(TreeEvent::Unhandled);
                };
                if slot + 1 >= index.children(&node.parent).len() {
                    return Ok(TreeEvent::Unhandled);
                }
                // Slots count the node itself, so skipping one sibling is +2.
                self.shift(&index, &id, slot + 2)
            }
        }
    }

    fn shift(
        &self,
        index: &TreeIndex<'_, K, T>,
        id: &K,
        slot: usize,
    ) -> TreeResult<TreeEvent<K, T>> {
        let Some(node) = index.node(id) else {
            return Ok(TreeEvent::Unhandled);
        };
        let parent = node.parent.clone();
        let (source, destination) = index.modified_index(id, &parent, slot)?;
        self.splice(id, parent, source, destination)
    }

    fn splice(
        &self,
        drag: &K,
        parent: K,
        source_index: usize,
        destination_index: usize,
    ) -> TreeResult<TreeEvent<K, T>> {
        let tree =
            mutate_tree_with_index(self.tree, drag, parent, source_index, destination_index)?;
        Ok(TreeEvent::Moved {
            tree,
            source_index,
            destination_index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{ids, sample_tree};

    fn moved(event: TreeEvent<u32>) -> Vec<Node<u32>> {
        match event {
            TreeEvent::Moved { tree, .. } => tree,
            other => panic!("expected a move, got {other:?}"),
        }
    }

    #[test]
    fn applies_valid_drop() {
        let tree = sample_tree();
        let ctx = DropContext::new(&tree, 0);

        let event = ctx
            .handle_action(TreeAction::Drop {
                drag: 7,
                target: 4,
                index: 1,
            })
            .unwrap();
        let TreeEvent::Moved {
            tree: after,
            source_index,
            destination_index,
        } = event
        else {
            panic!("expected a move");
        };

        assert_eq!((source_index, destination_index), (6, 5));
        assert_eq!(ids(&after), vec![1, 2, 3, 4, 5, 7, 6]);
        assert_eq!(after[5].parent, 4);
    }

    #[test]
    fn rejects_invalid_drop_without_moving() {
        let tree = sample_tree();
        let ctx = DropContext::new(&tree, 0);

        let into_leaf = ctx.handle_action(TreeAction::Drop {
            drag: 2,
            target: 7,
            index: 0,
        });
        assert_eq!(into_leaf, Ok(TreeEvent::Rejected(DropRejection::NotContainer)));

        let into_own_subtree = ctx.handle_action(TreeAction::Reparent { drag: 4, target: 5 });
        assert_eq!(into_own_subtree, Ok(TreeEvent::Rejected(DropRejection::Cycle)));
    }

    #[test]
    fn reparents_in_place() {
        let tree = sample_tree();
        let ctx = DropContext::new(&tree, 0);

        let after = moved(
            ctx.handle_action(TreeAction::Reparent { drag: 7, target: 1 })
                .unwrap(),
        );
        assert_eq!(ids(&after), ids(&tree));
        assert_eq!(after[6].parent, 1);
    }

    #[test]
    fn reorders_between_siblings() {
        let tree = sample_tree();
        let ctx = DropContext::new(&tree, 0);

        let up = moved(ctx.handle_action(TreeAction::ReorderUp(7)).unwrap());
        assert_eq!(ids(&up), vec![1, 2, 3, 7, 4, 5, 6]);

        let down = moved(ctx.handle_action(TreeAction::ReorderDown(1)).unwrap());
        let root_children: Vec<u32> = down
            .iter()
            .filter(|n| n.parent == 0)
            .map(|n| n.id)
            .collect();
        assert_eq!(root_children, vec![4, 1, 7]);

        let down_in_folder = moved(ctx.handle_action(TreeAction::ReorderDown(2)).unwrap());
        assert_eq!(ids(&down_in_folder), vec![1, 3, 2, 4, 5, 6, 7]);
    }

    #[test]
    fn boundary_reorders_are_unhandled() {
        let tree = sample_tree();
        let ctx = DropContext::new(&tree, 0);

        assert_eq!(ctx.handle_action(TreeAction::ReorderUp(1)), Ok(TreeEvent::Unhandled));
        assert_eq!(ctx.handle_action(TreeAction::ReorderDown(7)), Ok(TreeEvent::Unhandled));
        assert_eq!(ctx.handle_action(TreeAction::ReorderDown(6)), Ok(TreeEvent::Unhandled));
        assert_eq!(ctx.handle_action(TreeAction::ReorderUp(42)), Ok(TreeEvent::Unhandled));
    }
}
