//! Synthesis - arbitration between two conflicting signatures

use crate::config::OrchestratorConfig;
use crate::roles::SYNTHESIS_ORIGIN;
use lineal_domain::{
    Category, ContradictionVerdict, ReasoningPayload, ReasoningProvider, ReasoningStep, Signature,
};
use lineal_llm::{ReasoningClient, ServiceError, SignaturePreview};
use tracing::{info, warn};

/// Produces a synthesis signature from two conflicting signatures
///
/// On service failure a deterministic local fallback runs instead: this is
/// the last line of defense against total failure of the parallel workflow,
/// so `synthesize` never fails.
pub struct Synthesizer<P> {
    client: ReasoningClient<P>,
    config: OrchestratorConfig,
}

impl<P> Synthesizer<P>
where
    P: ReasoningProvider,
    P::Error: Into<ServiceError>,
{
    /// Create a synthesizer over the given client
    pub fn new(client: ReasoningClient<P>, config: OrchestratorConfig) -> Self {
        Self { client, config }
    }

    /// Arbitrate between two conflicting signatures
    ///
    /// The result is a new signature with `category = synthesis` and
    /// `parent_ids = [a.id, b.id]` in that order. An explicit
    /// result-with-fallback: the service path and the local fallback are the
    /// two arms of one match, not exception-driven control flow.
    pub fn synthesize(
        &self,
        a: &Signature,
        b: &Signature,
        verdict: &ContradictionVerdict,
    ) -> Signature {
        let preview_a = SignaturePreview::of(a, self.config.step_preview_limit);
        let preview_b = SignaturePreview::of(b, self.config.step_preview_limit);

        match self.client.arbitrate(&preview_a, &preview_b, verdict) {
            Ok((payload, rationale)) => {
                info!(confidence = payload.confidence, "Synthesis complete");
                Signature::from_payload(
                    SYNTHESIS_ORIGIN,
                    Category::Synthesis,
                    payload,
                    vec![a.id, b.id],
                    serde_json::json!({
                        "contradiction": verdict,
                        "arbitration": rationale,
                    }),
                    vec![],
                )
            }
            Err(e) => {
                warn!("Synthesis failed, applying fallback: {}", e);
                self.fallback(a, b, verdict, &e.to_string())
            }
        }
    }

    /// Deterministic local fallback: keep the higher-confidence path
    ///
    /// Copies the winner's conclusion, applies the configured confidence
    /// penalty, and records a single reasoning step naming the fallback with
    /// the failure reason as evidence.
    fn fallback(
        &self,
        a: &Signature,
        b: &Signature,
        verdict: &ContradictionVerdict,
        reason: &str,
    ) -> Signature {
        let winner = if a.confidence > b.confidence { a } else { b };

        let payload = ReasoningPayload {
            steps: vec![ReasoningStep {
                step: 1,
                thought: format!(
                    "Synthesis failed, defaulting to higher confidence path from {}",
                    winner.origin
                ),
                confidence: winner.confidence,
                evidence: vec![format!("Automatic fallback due to synthesis error: {}", reason)],
            }],
            conclusion: winner.conclusion.clone(),
            confidence: winner.confidence * self.config.fallback_penalty,
            alternatives: vec![],
        };

        Signature::from_payload(
            SYNTHESIS_ORIGIN,
            Category::Synthesis,
            payload,
            vec![a.id, b.id],
            serde_json::json!({
                "contradiction": verdict,
                "fallback_reason": reason,
            }),
            vec![],
        )
    }
}
