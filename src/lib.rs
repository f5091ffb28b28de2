//! Drag-and-drop reordering engine for trees stored as one flat, parent-linked list.
//!
//! A tree is a `&[Node]` whose slice order is the render order. The crate
//! answers ancestry queries, decides whether a drop is allowed, turns "make
//! X child number K of Y" into splice indices, and applies the splice to a
//! fresh copy of the sequence. Inputs are never modified.
//!
//! ```
//! use treelist_dnd::{DropContext, Node, get_modified_index, is_droppable, mutate_tree_with_index};
//!
//! let tree: Vec<Node<u32>> = vec![Node::container(1, 0, "a"), Node::container(2, 0, "b")];
//! let ctx = DropContext::new(&tree, 0);
//! assert!(is_droppable(&2, &1, &ctx));
//!
//! let (from, to) = get_modified_index(&tree, &2, &1, 0)?;
//! let next = mutate_tree_with_index(&tree, &2, 1, from, to)?;
//! assert_eq!(next[0].id, 2);
//! assert_eq!(next[0].parent, 1);
//! # Ok::<(), treelist_dnd::TreeError>(())
//! ```
//!
//! Feature flags:
//! - `serde`: serde support for `Node`, `TreeRow`, `ViewOptions` and `DropPolicy`.

mod action;
mod ancestry;
mod error;
mod index;
mod model;
mod mutate;
mod order;
pub mod prelude;
mod reorder;
mod validate;
mod view;

pub use action::{TreeAction, TreeEvent};
pub use ancestry::{ancestor_path, depth_of, get_descendants, is_ancestor};
pub use error::{DropRejection, TreeError, TreeResult};
pub use index::TreeIndex;
pub use model::{NoFilter, Node, NodeKey, TreeFilter};
pub use mutate::{move_node, mutate_tree, mutate_tree_with_index};
pub use order::{ViewOptions, children_of, compare_items, get_tree_index, get_tree_item};
pub use reorder::get_modified_index;
pub use validate::{CanDrop, DropContext, DropPolicy, check_drop, is_droppable};
pub use view::{TreeRow, tree_rows};
