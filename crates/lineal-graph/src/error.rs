//! Error types for the lineage graph

use lineal_domain::SignatureId;
use thiserror::Error;

/// Errors that can occur when mutating the lineage graph
///
/// Both variants indicate a workflow bug rather than a recoverable runtime
/// condition: the fixed workflows always register parents before children and
/// never reuse an id.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A declared parent id is not present in the graph
    #[error("Dangling parent: {0} is not registered in the graph")]
    DanglingParent(SignatureId),

    /// A signature with this id is already registered
    #[error("Duplicate signature id: {0}")]
    DuplicateSignature(SignatureId),

    /// The same parent id appears more than once in parent_ids
    #[error("Duplicate parent id {0} in parent list")]
    DuplicateParent(SignatureId),
}
