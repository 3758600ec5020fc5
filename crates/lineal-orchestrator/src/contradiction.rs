//! Contradiction evaluation between registered signatures

use crate::config::OrchestratorConfig;
use lineal_domain::{ContradictionVerdict, ReasoningProvider, Signature};
use lineal_llm::{ReasoningClient, ServiceError, SignaturePreview};
use tracing::{info, warn};

/// Evaluates pairs of signatures for logical contradictions
///
/// A pure function of already-registered signatures; never mutates the graph.
/// Evaluation failure is absorbed into a degraded verdict because a failed
/// comparison must not prevent returning the two already-valid plans.
pub struct ContradictionEvaluator<P> {
    client: ReasoningClient<P>,
    config: OrchestratorConfig,
}

impl<P> ContradictionEvaluator<P>
where
    P: ReasoningProvider,
    P::Error: Into<ServiceError>,
{
    /// Create an evaluator over the given client
    pub fn new(client: ReasoningClient<P>, config: OrchestratorConfig) -> Self {
        Self { client, config }
    }

    /// Compare two signatures and return a verdict
    ///
    /// Never fails: any service or parse error degrades to a verdict with
    /// `has_contradiction = false`, category `error`, severity 0.0, and the
    /// failure description as the root cause.
    pub fn detect(&self, a: &Signature, b: &Signature) -> ContradictionVerdict {
        let preview_a = SignaturePreview::of(a, self.config.step_preview_limit);
        let preview_b = SignaturePreview::of(b, self.config.step_preview_limit);

        match self.client.compare(&preview_a, &preview_b) {
            Ok(verdict) => {
                info!(
                    has_contradiction = verdict.has_contradiction,
                    severity = verdict.severity,
                    category = %verdict.category,
                    "Contradiction evaluation complete"
                );
                verdict
            }
            Err(e) => {
                warn!("Contradiction evaluation failed: {}", e);
                ContradictionVerdict::degraded(a.id, b.id, e.to_string())
            }
        }
    }

    /// Evaluate every unordered pair of the given signatures
    ///
    /// Returns only the verdicts that clear the severity threshold. A
    /// convenience for >2-way fan-out; the two-plan workflow calls `detect`
    /// directly.
    pub fn detect_multi(&self, signatures: &[Signature]) -> Vec<ContradictionVerdict> {
        let mut contradictions = Vec::new();
        for i in 0..signatures.len() {
            for j in (i + 1)..signatures.len() {
                let verdict = self.detect(&signatures[i], &signatures[j]);
                if verdict.has_contradiction && verdict.severity > self.config.severity_threshold {
                    contradictions.push(verdict);
                }
            }
        }
        contradictions
    }
}
