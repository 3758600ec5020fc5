//! Error types for the orchestration layer

use lineal_graph::GraphError;
use lineal_llm::ServiceError;
use thiserror::Error;

/// Errors that abort a problem-processing run
///
/// Phase failures are fatal: no partial signature set is registered for a
/// failed phase, and the caller receives the error rather than a partial
/// result. Contradiction-evaluation and synthesis failures are absorbed
/// elsewhere and never surface here.
#[derive(Error, Debug)]
pub enum OrchestratorError {
    /// The reasoning service failed or returned an unparseable payload
    #[error("Reasoning service error: {0}")]
    Service(#[from] ServiceError),

    /// Registration violated a graph invariant (a workflow bug)
    #[error("Lineage graph error: {0}")]
    Graph(#[from] GraphError),
}
