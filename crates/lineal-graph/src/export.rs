//! Visualization-ready projection of the lineage graph

use crate::error::GraphError;
use crate::graph::LineageGraph;
use lineal_domain::{Category, Signature, SignatureId};
use serde::{Deserialize, Serialize};

/// One node in the exported graph document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeExport {
    /// Signature id
    pub id: SignatureId,
    /// Role/agent label that produced the signature
    pub origin: String,
    /// Why the signature exists
    pub category: Category,
    /// Final recommendation
    pub conclusion: String,
    /// Overall confidence
    pub confidence: f64,
    /// Creation time (milliseconds since Unix epoch)
    pub created_at: u64,
}

/// One parent -> child edge in the exported graph document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeExport {
    /// Parent signature id
    pub source: SignatureId,
    /// Child signature id
    pub target: SignatureId,
}

/// Node/edge document for visualization and persistence
///
/// This is the only durable artifact format. It round-trips losslessly for
/// the fields it carries: nodes in registration order, edges grouped by
/// parent with children in registration order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphExport {
    /// All registered signatures, projected
    pub nodes: Vec<NodeExport>,
    /// All parent -> child edges
    pub edges: Vec<EdgeExport>,
}

impl LineageGraph {
    /// Produce the node/edge projection of this graph
    ///
    /// Read-only; no side effects.
    pub fn export(&self) -> GraphExport {
        let nodes = self
            .signatures()
            .map(|sig| NodeExport {
                id: sig.id,
                origin: sig.origin.clone(),
                category: sig.category,
                conclusion: sig.conclusion.clone(),
                confidence: sig.confidence,
                created_at: sig.created_at,
            })
            .collect();

        let edges = self
            .edges()
            .iter()
            .flat_map(|(source, targets)| {
                targets.iter().map(|target| EdgeExport {
                    source: *source,
                    target: *target,
                })
            })
            .collect();

        GraphExport { nodes, edges }
    }

    /// Reconstruct a graph from an export document
    ///
    /// The rehydrated signatures carry only the exported fields; reasoning
    /// steps, inputs, constraints, and alternatives are not part of the
    /// export and come back empty. Node and edge sets (and their orders) are
    /// preserved, so `rehydrate(g.export()).export() == g.export()`.
    pub fn rehydrate(export: &GraphExport) -> Result<Self, GraphError> {
        let mut graph = LineageGraph::new();
        for node in &export.nodes {
            let parent_ids: Vec<SignatureId> = export
                .edges
                .iter()
                .filter(|e| e.target == node.id)
                .map(|e| e.source)
                .collect();

            graph.register(Signature {
                id: node.id,
                origin: node.origin.clone(),
                created_at: node.created_at,
                category: node.category,
                reasoning_steps: vec![],
                conclusion: node.conclusion.clone(),
                confidence: node.confidence,
                parent_ids,
                inputs: serde_json::Value::Null,
                constraints: vec![],
                alternatives: vec![],
            })?;
        }
        Ok(graph)
    }
}
