use thiserror::Error;

/// Faults raised when an operation's preconditions do not hold.
///
/// Ordinary "not found" and "not allowed" outcomes are not errors: lookups
/// return `Option` and drop checks return [`DropRejection`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("node not found: {0}")]
    NodeNotFound(String),

    #[error("index {index} out of bounds for tree of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("node at index {index} is {found}, expected {expected}")]
    IndexMismatch {
        index: usize,
        expected: String,
        found: String,
    },

    #[error("parent links form a cycle through: {0}")]
    Cycle(String),
}

impl TreeError {
    pub(crate) fn not_found(id: &impl std::fmt::Debug) -> Self {
        Self::NodeNotFound(format!("{id:?}"))
    }

    pub(crate) fn cycle(id: &impl std::fmt::Debug) -> Self {
        Self::Cycle(format!("{id:?}"))
    }
}

pub type TreeResult<T> = Result<T, TreeError>;

/// Reason a drop was refused by [`check_drop`](crate::check_drop).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropRejection {
    #[error("a node cannot be dropped onto itself")]
    SelfDrop,

    #[error("target is a descendant of the dragged node")]
    Cycle,

    #[error("target does not accept children")]
    NotContainer,

    #[error("dragged node is not in the tree")]
    UnknownSource,

    #[error("target is neither a node nor the root")]
    UnknownTarget,

    #[error("drop vetoed by caller")]
    Vetoed,
}
