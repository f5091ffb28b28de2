pub use crate::{
    DropContext, DropPolicy, DropRejection, NoFilter, Node, NodeKey, TreeAction, TreeError,
    TreeEvent, TreeFilter, TreeIndex, TreeResult, TreeRow, ViewOptions, check_drop, children_of,
    compare_items, get_descendants, get_modified_index, get_tree_index, get_tree_item,
    is_ancestor, is_droppable, move_node, mutate_tree, mutate_tree_with_index, tree_rows,
};
