//! The lineage graph - append-only DAG of signatures

use crate::error::GraphError;
use lineal_domain::{Signature, SignatureId};
use std::collections::BTreeMap;

/// Append-only DAG of signatures with parent -> children adjacency
///
/// Keyed by `SignatureId`. Because ids are UUIDv7 and generated monotonically
/// within a process, id order is registration order, so ordered iteration over
/// the map yields nodes in insertion order.
///
/// Registration takes `&mut self`, so writers are serialized by the borrow
/// checker; reads are `&self` and may be shared freely.
#[derive(Debug, Clone, Default)]
pub struct LineageGraph {
    nodes: BTreeMap<SignatureId, Signature>,
    edges: BTreeMap<SignatureId, Vec<SignatureId>>,
}

impl LineageGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a signature in the graph
    ///
    /// Validates before mutating, so a failed registration leaves the graph
    /// unchanged. Every id in `parent_ids` must already be registered - the
    /// strict contract that keeps the graph a DAG.
    ///
    /// # Errors
    ///
    /// - `DuplicateSignature` if the id is already registered
    /// - `DuplicateParent` if the same parent appears twice
    /// - `DanglingParent` if any parent id is unknown
    pub fn register(&mut self, signature: Signature) -> Result<SignatureId, GraphError> {
        if self.nodes.contains_key(&signature.id) {
            return Err(GraphError::DuplicateSignature(signature.id));
        }
        for (i, parent_id) in signature.parent_ids.iter().enumerate() {
            if signature.parent_ids[..i].contains(parent_id) {
                return Err(GraphError::DuplicateParent(*parent_id));
            }
            if !self.nodes.contains_key(parent_id) {
                return Err(GraphError::DanglingParent(*parent_id));
            }
        }

        let id = signature.id;
        for parent_id in &signature.parent_ids {
            self.edges.entry(*parent_id).or_default().push(id);
        }
        self.nodes.insert(id, signature);
        Ok(id)
    }

    /// Look up a signature by id
    ///
    /// Absence is a normal case (e.g., querying stale ids), so this returns
    /// `None` rather than an error.
    pub fn get(&self, id: SignatureId) -> Option<&Signature> {
        self.nodes.get(&id)
    }

    /// Direct children of a signature, in registration order
    ///
    /// Empty for leaves and for unknown ids.
    pub fn children_of(&self, id: SignatureId) -> &[SignatureId] {
        self.edges.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Transitive ancestors of a signature, depth-first
    ///
    /// Each parent is followed by its own ancestors, in parent order. A
    /// diamond-shaped lineage yields the shared ancestor once per path:
    /// each path is a distinct causal route, and callers needing a
    /// deduplicated set can post-process.
    pub fn ancestors_of(&self, id: SignatureId) -> Vec<SignatureId> {
        let mut lineage = Vec::new();
        if let Some(signature) = self.nodes.get(&id) {
            for parent_id in &signature.parent_ids {
                if self.nodes.contains_key(parent_id) {
                    lineage.push(*parent_id);
                    lineage.extend(self.ancestors_of(*parent_id));
                }
            }
        }
        lineage
    }

    /// Number of registered signatures
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no signatures
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate signatures in id (= registration) order
    pub fn signatures(&self) -> impl Iterator<Item = &Signature> {
        self.nodes.values()
    }

    pub(crate) fn edges(&self) -> &BTreeMap<SignatureId, Vec<SignatureId>> {
        &self.edges
    }
}
