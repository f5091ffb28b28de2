use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::DropRejection;
use crate::index::TreeIndex;
use crate::model::{Node, NodeKey};

/// Caller override consulted by [`check_drop`] after the structural checks.
///
/// Receives `(drag_id, drop_id)`; `Some(verdict)` decides, `None` defers to
/// the built-in container rules.
pub type CanDrop<'a, K> = dyn Fn(&K, &K) -> Option<bool> + 'a;

/// Validity rules for targets the tree cannot vouch for.
///
/// With the `serde` feature enabled, this type derives `Serialize`/`Deserialize`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DropPolicy {
    /// Accept drops onto ids that are neither a node nor the root.
    pub allow_unknown_target: bool,
}

impl DropPolicy {
    /// Rejects unknown targets.
    pub const fn restrictive() -> Self {
        Self {
            allow_unknown_target: false,
        }
    }

    /// Accepts unknown targets.
    pub const fn permissive() -> Self {
        Self {
            allow_unknown_target: true,
        }
    }
}

/// Everything the drop validator needs: the tree, the root sentinel and policy.
pub struct DropContext<'a, K, T = ()> {
    /// Current flat tree.
    pub tree: &'a [Node<K, T>],
    /// Parent value meaning "no parent"; never a node id.
    pub root_id: K,
    /// Rules for unknown targets.
    pub policy: DropPolicy,
    can_drop: Option<Box<CanDrop<'a, K>>>,
}

impl<K: fmt::Debug, T> fmt::Debug for DropContext<'_, K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropContext")
            .field("len", &self.tree.len())
            .field("root_id", &self.root_id)
            .field("policy", &self.policy)
            .field("can_drop", &self.can_drop.is_some())
            .finish()
    }
}

impl<'a, K: NodeKey, T> DropContext<'a, K, T> {
    /// Creates a context with the restrictive policy and no override.
    pub fn new(tree: &'a [Node<K, T>], root_id: K) -> Self {
        Self {
            tree,
            root_id,
            policy: DropPolicy::restrictive(),
            can_drop: None,
        }
    }

    /// Replaces the policy.
    #[must_use]
    pub fn with_policy(mut self, policy: DropPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Installs a caller override. It cannot allow self-drops or cycles.
    #[must_use]
    pub fn with_can_drop<F>(mut self, can_drop: F) -> Self
    where
        F: Fn(&K, &K) -> Option<bool> + 'a,
    {
        self.can_drop = Some(Box::new(can_drop));
        self
    }

    fn consult(&self, drag_id: &K, drop_id: &K) -> Option<Result<(), DropRejection>> {
        let can_drop = self.can_drop.as_ref()?;
        can_drop(drag_id, drop_id).map(|allowed| {
            if allowed {
                Ok(())
            } else {
                Err(DropRejection::Vetoed)
            }
        })
    }

    pub(crate) fn check_with(
        &self,
        index: &TreeIndex<'_, K, T>,
        drag_id: &K,
        drop_id: &K,
    ) -> Result<(), DropRejection> {
        if drag_id == drop_id {
            return Err(DropRejection::SelfDrop);
        }
        if !index.contains(drag_id) {
            return Err(DropRejection::UnknownSource);
        }
        // Raw reachability: on a malformed tree the target may sit on a cycle
        // through the dragged node.
        if drop_id != &self.root_id && index.reaches(drop_id, drag_id) {
            return Err(DropRejection::Cycle);
        }
        if let Some(verdict) = self.consult(drag_id, drop_id) {
            return verdict;
        }
        if drop_id == &self.root_id {
            return Ok(());
        }
        match index.node(drop_id) {
            Some(target) if target.droppable => Ok(()),
            Some(_) => Err(DropRejection::NotContainer),
            None if self.policy.allow_unknown_target => Ok(()),
            None => Err(DropRejection::UnknownTarget),
        }
    }
}

/// Decides whether `drag_id` may become a child of `drop_id`, naming the reason if not.
///
/// Checked in order: self-drop, unknown source, cycle (target below the
/// dragged node), the caller override, then the target's container flag. The
/// root sentinel always accepts children.
///
/// # Errors
///
/// The first [`DropRejection`] that applies.
#[instrument(level = "trace", skip(ctx))]
pub fn check_drop<K: NodeKey, T>(
    drag_id: &K,
    drop_id: &K,
    ctx: &DropContext<'_, K, T>,
) -> Result<(), DropRejection> {
    let index = TreeIndex::new(ctx.tree);
    ctx.check_with(&index, drag_id, drop_id)
}

/// Returns `true` if `drag_id` may become a child of `drop_id`.
///
/// Pure; safe to call on every hover.
pub fn is_droppable<K: NodeKey, T>(
    drag_id: &K,
    drop_id: &K,
    ctx: &DropContext<'_, K, T>,
) -> bool {
    match check_drop(drag_id, drop_id, ctx) {
        Ok(()) => true,
        Err(reason) => {
            debug!(?drag_id, ?drop_id, %reason, "drop rejected");
            false
        }
    }
}
