use tracing::{debug, instrument};

use crate::error::{TreeError, TreeResult};
use crate::index::TreeIndex;
use crate::model::{Node, NodeKey};

impl<K: NodeKey, T> TreeIndex<'_, K, T> {
    /// Splice indices that place `drag_id` at child slot `index` of `drop_id`.
    ///
    /// `index` counts the current children of `drop_id` in flat order (the
    /// dragged node included, if it is one of them) and is clamped to
    /// `0..=children.len()`. Slot 0 maps to the start of the sequence, which
    /// is before any existing child. The returned destination is relative to
    /// the sequence with the dragged node already removed.
    pub fn modified_index(
        &self,
        drag_id: &K,
        drop_id: &K,
        index: usize,
    ) -> TreeResult<(usize, usize)> {
        let source = self
            .position(drag_id)
            .ok_or_else(|| TreeError::not_found(drag_id))?;
        let target = self.insertion_point(drop_id, index);
        let destination = if source < target { target - 1 } else { target };
        debug!(?drag_id, ?drop_id, index, source, destination, "splice indices");
        Ok((source, destination))
    }

    /// Flat position, in the unmodified sequence, in front of which the node goes.
    fn insertion_point(&self, drop_id: &K, index: usize) -> usize {
        if index == 0 {
            return 0;
        }
        let siblings = self.children(drop_id);
        match (siblings.get(index), siblings.last()) {
            (Some(&occupant), _) => occupant,
            (None, Some(&last)) => last + 1,
            (None, None) => self
                .position(drop_id)
                .map_or(self.tree().len(), |pos| pos + 1),
        }
    }

    /// Position of `id` among its parent's children, in flat order.
    pub fn sibling_slot(&self, id: &K) -> Option<usize> {
        let pos = self.position(id)?;
        let parent = &self.tree()[pos].parent;
        self.children(parent).iter().position(|&sibling| sibling == pos)
    }
}

/// Translates "make `drag_id` child number `index` of `drop_id`" into splice indices.
///
/// Returns `(source_index, destination_index)`: remove the node at
/// `source_index`, then insert it at `destination_index` of the shortened
/// sequence. Validate the move with [`is_droppable`](crate::is_droppable)
/// first; this function does not.
///
/// # Errors
///
/// [`TreeError::NodeNotFound`] if `drag_id` is not in the tree.
#[instrument(level = "trace", skip(tree))]
pub fn get_modified_index<K: NodeKey, T>(
    tree: &[Node<K, T>],
    drag_id: &K,
    drop_id: &K,
    index: usize,
) -> TreeResult<(usize, usize)> {
    TreeIndex::new(tree).modified_index(drag_id, drop_id, index)
}
