//! Lineal Graph Layer
//!
//! Append-only DAG of signatures keyed by id, with parent -> children
//! adjacency. Owns registration, lookup, ancestor-lineage traversal, and the
//! visualization-ready export projection.
//!
//! ## Guarantees
//!
//! - Once registered, a signature is never mutated or removed
//! - A signature's parents must already be registered (no forward references,
//!   so the graph is always acyclic)
//! - Lineage queries are stable once computed

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod export;
pub mod graph;

pub use error::GraphError;
pub use export::{EdgeExport, GraphExport, NodeExport};
pub use graph::LineageGraph;
