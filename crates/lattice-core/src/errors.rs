//! Error types for the Lattice layout engine.

use thiserror::Error;

use crate::node::NodeId;

/// Errors from tree mutation and query operations.
///
/// All of these are local, recoverable failures: the tree remains
/// structurally consistent after any failed call, with no partial mutation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The handle does not resolve to a live node in this tree. Returned
    /// for removed nodes and for handles minted by a different tree.
    #[error("Node {0} is not in the tree")]
    InvalidNodeId(NodeId),

    /// A child index was out of bounds for the parent's child list.
    #[error("Child index {child_index} is out of bounds for node {parent} ({child_count} children)")]
    ChildIndexOutOfBounds {
        /// The parent node the index was applied to
        parent: NodeId,
        /// The offending index
        child_index: usize,
        /// The parent's child count at the time of the call
        child_count: usize,
    },
}

/// Convenience alias for tree operation results.
pub type TreeResult<T> = Result<T, TreeError>;
